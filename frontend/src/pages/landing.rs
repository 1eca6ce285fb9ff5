use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use gloo_timers::callback::Interval;
use log::{error, info, warn};

use crate::components::section_nav::SectionNav;
use crate::components::waitlist_counter::WaitlistCounter;
use crate::components::waitlist_form::WaitlistForm;
use crate::config::{COUNT_ANIMATION_MS, SECTION_ORDER, WAITLIST_POLL_INTERVAL_MS};
use crate::counter::animator::CounterAnimator;
use crate::counter::scheduler::AnimationFrames;
use crate::sections::tracker::SectionTracker;
use crate::sections::viewport::DomViewport;
use crate::waitlist::sync::{CountSync, PageSync, Refresh, Sweep, Waitlist};

fn spawn_refresh(sync: PageSync, sweep: Sweep) {
    spawn_local(async move {
        match sync.refresh(sweep).await {
            Ok(Refresh::Applied(target)) => {
                gloo_console::log!(format!("Waitlist counter target: {}", target));
            }
            Ok(Refresh::Skipped) => info!("Previous waitlist poll still running, skipping this one"),
            Err(err) => error!("{}", err),
        }
    });
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let display_count = use_state(|| 0u64);
    let active_section = use_state(|| 0usize);
    let tracker = use_mut_ref(|| SectionTracker::new(&SECTION_ORDER));

    let sync = {
        let setter = display_count.setter();
        use_memo(
            move |_| {
                let animator = CounterAnimator::new(AnimationFrames, COUNT_ANIMATION_MS, move |value| {
                    setter.set(value)
                });
                CountSync::new(Waitlist::from_config(), animator)
            },
            (),
        )
    };

    // Count up from zero once, then keep in step with the table
    {
        let sync = (*sync).clone();
        use_effect_with_deps(
            move |_| {
                let poller = match sync.waitlist().configuration_error() {
                    Some(err) => {
                        warn!("{}, waitlist counter disabled", err);
                        None
                    }
                    None => {
                        spawn_refresh(sync.clone(), Sweep::FromZero);
                        let poll_sync = sync.clone();
                        Some(Interval::new(WAITLIST_POLL_INTERVAL_MS, move || {
                            spawn_refresh(poll_sync.clone(), Sweep::FromCurrent);
                        }))
                    }
                };

                move || {
                    drop(poller);
                    sync.animator().cancel();
                }
            },
            (),
        );
    }

    {
        let tracker = tracker.clone();
        let active_section = active_section.clone();
        use_effect_with_deps(
            move |_| {
                let listener = DomViewport::new().and_then(|viewport| {
                    let window = web_sys::window()?;

                    // the page may load already scrolled (deep link, reload)
                    active_section.set(tracker.borrow_mut().recompute(&viewport));

                    let on_scroll = Closure::wrap(Box::new(move || {
                        let index = tracker.borrow_mut().recompute(&viewport);
                        active_section.set(index);
                    }) as Box<dyn FnMut()>);

                    window
                        .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
                        .ok()?;
                    Some((window, on_scroll))
                });

                move || {
                    if let Some((window, on_scroll)) = listener {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            on_scroll.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let on_previous = {
        let tracker = tracker.clone();
        let active_section = active_section.clone();
        Callback::from(move |_: ()| {
            if let Some(viewport) = DomViewport::new() {
                let mut tracker = tracker.borrow_mut();
                active_section.set(tracker.previous(&viewport));
                if let Some(id) = tracker.active_id() {
                    gloo_console::log!(format!("Navigated to #{}", id));
                }
            }
        })
    };

    let on_next = {
        let tracker = tracker.clone();
        let active_section = active_section.clone();
        Callback::from(move |_: ()| {
            if let Some(viewport) = DomViewport::new() {
                let mut tracker = tracker.borrow_mut();
                active_section.set(tracker.next(&viewport));
                if let Some(id) = tracker.active_id() {
                    gloo_console::log!(format!("Navigated to #{}", id));
                }
            }
        })
    };

    let (at_first, at_last, position) = {
        let tracker = tracker.borrow();
        (tracker.is_first(), tracker.is_last(), tracker.position_label())
    };

    html! {
        <div class="landing-page">
            <div class="landing-background" />
            <div class="landing-background-secondary" />

            <header class={classes!("landing-header", (*active_section > 0).then(|| "scrolled"))}>
                <div class="landing-brand">
                    <img src="images/translogo.png" alt="Plureto logo" loading="lazy" />
                    <span>{"Plureto"}</span>
                </div>
                <p class="landing-backed-by">
                    {"Backed by "}
                    <span class="highlight">{"Sam Altman's"}</span>
                    {" "}
                    <span class="residency">{"The Residency"}</span>
                </p>
            </header>

            <section id="hero" class="hero">
                <div class="hero-content">
                    <h2>
                        {"It's Like Life,"}<br />
                        {"But With Cheat Codes."}
                    </h2>
                    <p class="hero-subtitle">
                        {"Plureto learns who you are and helps you choose better in work, relationships, and life."}
                    </p>
                    <WaitlistForm sync={(*sync).clone()} />
                    <WaitlistCounter count={*display_count} counting={sync.animator().is_running()} />
                </div>
            </section>

            <section id="pillars" class="pillars">
                <h3>{"Plureto helps you make better choices by truly knowing you."}</h3>
                <div class="pillar-tags">
                    <span>{"Always On Insights"}</span>
                    <span>{"Smart Recall"}</span>
                    <span>{"Emotional Intelligence"}</span>
                    <span>{"Growth Tracking"}</span>
                </div>
                <div class="pillar-mockup">
                    <img src="images/a.png" alt="Plureto app interface" loading="lazy" />
                </div>
            </section>

            <section id="smarter" class="smarter">
                <h2>
                    <span class="muted">{"It's time to think smarter"}</span><br />
                    <span>{"Decisions. Plans."}</span><br />
                    <span>{"Conversations. Goals."}</span><br />
                    <span>{"Really, your whole life."}</span>
                </h2>
            </section>

            <section id="features-grid" class="features-grid">
                <div class="feature">
                    <h3>{"Help, Right When You Need It"}</h3>
                    <p>{"Plureto spots what's on your screen and drops help the moment you need it."}</p>
                    <img src="images/feature-icons.png" alt="Apps Plureto integrates with" loading="lazy" />
                </div>
                <div class="feature">
                    <h3>{"Growth, One Chat at a Time"}</h3>
                    <p>{"It remembers your choices, gives weekly nudges, and chats with you on an emotional level."}</p>
                    <img src="images/feature-reminder.png" alt="Growth reminders on Plureto" loading="lazy" />
                </div>
            </section>

            <section id="calendar" class="calendar">
                <div class="calendar-text">
                    <p class="eyebrow">{"Stay Organized"}</p>
                    <h2>{"Your Schedule,"}<br />{"Simplified"}</h2>
                    <p>
                        {"Plureto's intelligent calendar keeps you on track with smart scheduling, automatic reminders, and seamless integration with your daily routine. Never miss what matters most."}
                    </p>
                    <ul class="calendar-points">
                        <li>{"Smart scheduling with AI-powered suggestions"}</li>
                        <li>{"Automatic reminders for important events"}</li>
                        <li>{"Seamless sync across all your devices"}</li>
                    </ul>
                </div>
                <div class="calendar-image">
                    <img src="images/calendar.png" alt="Plureto Calendar Interface" loading="lazy" />
                </div>
            </section>

            <section id="insights" class="insights">
                <p class="eyebrow">{"The insight you didn't know you needed."}</p>
                <h2>{"Plureto connects"}<br />{"the dots you didn't see."}</h2>
                <p>
                    {"Plureto learns your patterns, remembers what matters, and gives you honest, timely advice to help you grow whether in conversations, decisions, or daily life"}
                </p>
                <button type="button" class="coming-soon" disabled={true}>{"Coming Soon"}</button>
            </section>

            <section id="final-section" class="final-section">
                <h2>{"Your Personal Intelligence,"}<br />{"Ready Anytime."}</h2>
                <div class="floating-icons">
                    <img src="images/chromeimg.jpg" alt="Floating Chrome icon" loading="lazy" />
                    <img src="images/instagram.jpg" alt="Floating Instagram icon" loading="lazy" />
                </div>
            </section>

            <footer id="footer" class="landing-footer">
                <span class="footer-brand">{"Plureto"}</span>
                <div class="footer-columns">
                    { footer_column("Legal", &["Privacy Policy", "Terms of Service", "Support"]) }
                    { footer_column("Get Started", &["Pricing", "Sales", "Manifesto"]) }
                    { footer_column("Resources", &["Pricing", "Sales", "Manifesto"]) }
                    { footer_column("Help", &["FAQ", "Tutorials", "Contact Us"]) }
                </div>
            </footer>

            <SectionNav
                at_first={at_first}
                at_last={at_last}
                label={position}
                on_previous={on_previous}
                on_next={on_next}
            />
        </div>
    }
}

fn footer_column(title: &'static str, links: &[&'static str]) -> Html {
    html! {
        <div class="footer-column">
            <h4>{title}</h4>
            <ul>
                { for links.iter().map(|link| html! { <li><a href="#">{*link}</a></li> }) }
            </ul>
        </div>
    }
}
