/// Messages the popup sends to the background worker
use serde::{Deserialize, Serialize};

/// `{action: "TurnOnOff"}` or `{action: "Deduplicate"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Command {
    TurnOnOff,
    Deduplicate,
}
