use yew::prelude::*;
use web_sys::HtmlInputElement;
use wasm_bindgen_futures::spawn_local;
use gloo_timers::callback::Timeout;
use log::{error, info};

use crate::config::CLOSE_FORM_DELAY_MS;
use crate::waitlist::form::{submit_label, toggle_label, SubmitStatus};
use crate::waitlist::sync::PageSync;

#[derive(Properties, PartialEq)]
pub struct WaitlistFormProps {
    pub sync: PageSync,
}

#[function_component(WaitlistForm)]
pub fn waitlist_form(props: &WaitlistFormProps) -> Html {
    let is_open = use_state(|| false);
    let email = use_state(String::new);
    let status = use_state(SubmitStatus::default);
    let is_submitting = use_state(|| false);
    let enabled = props.sync.waitlist().is_enabled();

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| {
            is_open.set(!*is_open);
        })
    };

    let oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onsubmit = {
        let sync = props.sync.clone();
        let is_open = is_open.clone();
        let email = email.clone();
        let status = status.clone();
        let is_submitting = is_submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let value = (*email).clone();

            // blank email and missing config never leave the page
            if let Err(err) = sync.waitlist().prepare(&value) {
                status.set(SubmitStatus::Error(err.user_message()));
                return;
            }

            is_submitting.set(true);
            status.set(SubmitStatus::Loading);

            let sync = sync.clone();
            let is_open = is_open.clone();
            let email = email.clone();
            let status = status.clone();
            let is_submitting = is_submitting.clone();
            spawn_local(async move {
                let result = sync.submit(&value).await;
                match &result {
                    Ok(target) => {
                        info!("Waitlist signup saved, counter heading to {}", target);
                        email.set(String::new());
                        let status = status.clone();
                        Timeout::new(CLOSE_FORM_DELAY_MS, move || {
                            is_open.set(false);
                            status.set(SubmitStatus::Idle);
                        })
                        .forget();
                    }
                    Err(err) => error!("Waitlist submission failed: {}", err),
                }
                status.set(SubmitStatus::from_result(&result));
                is_submitting.set(false);
            });
        })
    };

    html! {
        <div class="waitlist">
            <button type="button" class="waitlist-toggle" onclick={toggle}>
                <svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="#3D74B6" stroke-width="2">
                    <path d="M4 4h16v16H4z" />
                    <polyline points="22,6 12,13 2,6" />
                </svg>
                <span>{toggle_label(*is_open)}</span>
            </button>
            if *is_open {
                <form class="waitlist-form" onsubmit={onsubmit}>
                    <label for="waitlist-email">{"Enter your email"}</label>
                    <div class="waitlist-form-row">
                        <input
                            id="waitlist-email"
                            type="email"
                            value={(*email).clone()}
                            oninput={oninput}
                            placeholder="you@example.com"
                        />
                        <button type="submit" disabled={*is_submitting || !enabled}>
                            {submit_label(*is_submitting)}
                        </button>
                    </div>
                    if let Some(message) = status.message() {
                        <p class={status.css_class()}>{message.to_string()}</p>
                    }
                    {
                        if let Some(err) = props.sync.waitlist().configuration_error() {
                            html! {
                                <p class="waitlist-config-warning">{err.user_message()}</p>
                            }
                        } else {
                            html! {
                                <p class="waitlist-note">{"No spam. We'll only email you when your spot opens up."}</p>
                            }
                        }
                    }
                </form>
            }
        </div>
    }
}
