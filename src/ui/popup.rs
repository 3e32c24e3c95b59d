/// Popup UI: on/off, one-shot deduplication, exclusion patterns

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlTextAreaElement;
use patternfly_yew::prelude::*;
use log::{error, warn};

use crate::chrome::{self, send_command};
use crate::commands::Command;
use crate::error::DedupError;

const SAVED_DISPLAY_MS: i32 = 2000;
const ERROR_DISPLAY_MS: i32 = 3000;

#[derive(Clone, PartialEq)]
enum SaveStatus {
    Saved,
    Invalid(String),
}

/// Where the stored exclusion list stands
#[derive(Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    /// Saving before a successful load would overwrite the stored list
    fn can_save(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let patterns_text = use_state(String::new);
    let status = use_state(|| None::<SaveStatus>);
    let load_state = use_state(|| LoadState::Loading);

    // Load saved patterns on mount
    {
        let patterns_text = patterns_text.clone();
        let load_state = load_state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match chrome::reactor().settings().await {
                    Ok(settings) => {
                        patterns_text.set(settings.exclusion_patterns.join("\n"));
                        load_state.set(LoadState::Ready);
                    }
                    Err(e) => {
                        error!("Failed to load exclusions: {}", e);
                        load_state.set(LoadState::Failed(format!(
                            "Could not load exclusions: {}",
                            e
                        )));
                    }
                }
            });
            || ()
        });
    }

    let on_turn_on_off = Callback::from(|_| send_and_close(Command::TurnOnOff));
    let on_deduplicate = Callback::from(|_| send_and_close(Command::Deduplicate));

    let on_input = {
        let patterns_text = patterns_text.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(textarea) = e.target_dyn_into::<HtmlTextAreaElement>() {
                patterns_text.set(textarea.value());
            }
        })
    };

    let on_save = {
        let patterns_text = patterns_text.clone();
        let status = status.clone();

        Callback::from(move |_| {
            let text = (*patterns_text).clone();
            let status = status.clone();

            spawn_local(async move {
                match chrome::reactor().save_exclusions(&text).await {
                    Ok(_) => {
                        status.set(Some(SaveStatus::Saved));
                        clear_after(status, SAVED_DISPLAY_MS);
                    }
                    Err(e) => {
                        if !matches!(e, DedupError::InvalidPattern { .. }) {
                            error!("Failed to save exclusions: {}", e);
                        }
                        status.set(Some(SaveStatus::Invalid(e.to_string())));
                        clear_after(status, ERROR_DISPLAY_MS);
                    }
                }
            });
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Deduplicator"}</h1>

            <div class="flex-column-gap">
                <Button onclick={on_turn_on_off} variant={ButtonVariant::Secondary} block={true}>
                    {"Turn On/Off"}
                </Button>
                <Button onclick={on_deduplicate} variant={ButtonVariant::Secondary} block={true}>
                    {"Deduplicate"}
                </Button>
            </div>

            <div class="exclusions">
                <h2 class="stats-title">{"Exclusions (one regex per line)"}</h2>
                {match &*load_state {
                    LoadState::Loading => html! { <Spinner /> },
                    LoadState::Failed(message) => html! {
                        <Alert r#type={AlertType::Danger} title={message.clone()} inline={true}>
                        </Alert>
                    },
                    LoadState::Ready => html! {
                        <textarea
                            id="exclusionRegexes"
                            class="exclusion-textarea"
                            rows="6"
                            value={(*patterns_text).clone()}
                            oninput={on_input}
                        />
                    },
                }}
                <Button onclick={on_save} disabled={!load_state.can_save()} variant={ButtonVariant::Primary} block={true}>
                    {"Save"}
                </Button>
            </div>

            {match &*status {
                Some(SaveStatus::Saved) => html! {
                    <Alert r#type={AlertType::Success} title={"Saved!"} inline={true}>
                    </Alert>
                },
                Some(SaveStatus::Invalid(message)) => html! {
                    <Alert r#type={AlertType::Danger} title={message.clone()} inline={true}>
                    </Alert>
                },
                None => html! {}
            }}
        </div>
    }
}

// Helper functions

/// Hand the command to the background worker, then close the popup
fn send_and_close(command: Command) {
    spawn_local(async move {
        if let Err(e) = send_command(command).await {
            warn!("{}", e);
        }
        if let Some(window) = web_sys::window() {
            let _ = window.close();
        }
    });
}

fn clear_after(status: UseStateHandle<Option<SaveStatus>>, millis: i32) {
    let clear = Closure::once_into_js(move || status.set(None));
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            clear.unchecked_ref(),
            millis,
        );
    }
}
