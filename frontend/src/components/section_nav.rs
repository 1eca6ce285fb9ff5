use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SectionNavProps {
    pub at_first: bool,
    pub at_last: bool,
    /// e.g. `"2/8"`
    pub label: String,
    pub on_previous: Callback<()>,
    pub on_next: Callback<()>,
}

#[function_component(SectionNav)]
pub fn section_nav(props: &SectionNavProps) -> Html {
    let at_first = props.at_first;
    let at_last = props.at_last;

    let go_up = props.on_previous.reform(|_: MouseEvent| ());
    let go_down = props.on_next.reform(|_: MouseEvent| ());

    html! {
        <div class="section-nav">
            <button
                type="button"
                class={classes!("section-nav-arrow", at_first.then(|| "disabled"))}
                onclick={go_up}
                disabled={at_first}
                aria-label="Previous section"
            >
                <svg width="22" height="22" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5">
                    <polyline points="18 15 12 9 6 15" />
                </svg>
            </button>
            <div class="section-nav-position">
                <span>{props.label.clone()}</span>
            </div>
            <button
                type="button"
                class={classes!("section-nav-arrow", at_last.then(|| "disabled"))}
                onclick={go_down}
                disabled={at_last}
                aria-label="Next section"
            >
                <svg width="22" height="22" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2.5">
                    <polyline points="6 9 12 15 18 9" />
                </svg>
            </button>
        </div>
    }
}
