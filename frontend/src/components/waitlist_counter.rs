use yew::prelude::*;

/// `3016` -> `"3,016"`
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[derive(Properties, PartialEq)]
pub struct WaitlistCounterProps {
    pub count: u64,
    #[prop_or_default]
    pub counting: bool,
}

#[function_component(WaitlistCounter)]
pub fn waitlist_counter(props: &WaitlistCounterProps) -> Html {
    html! {
        <div class="waitlist-counter">
            <span class={classes!("waitlist-counter-pill", props.counting.then(|| "counting"))}>
                <span class="waitlist-counter-value">{format!("{}+", format_count(props.count))}</span>
                <span class="waitlist-counter-label">{"people already inside"}</span>
            </span>
            <div class="waitlist-counter-glow" />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::format_count;

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(3016), "3,016");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
