use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount in rupees with Indian digit grouping, e.g. ₹1,59,384.
/// Rounds to whole rupees; negative amounts render as -₹…
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let prefix = if amount < Decimal::ZERO { "-₹" } else { "₹" };
    format!("{}{}", prefix, group_indian(&rounded.to_string()))
}

/// Indian grouping: the last three digits, then groups of two
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Format a tax rate as a percentage, trimming trailing zeros: "12.5%", "15%"
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

/// Format an effective percentage to two decimal places: "4.69%"
pub fn format_effective_percent(percent: Decimal) -> String {
    format!("{:.2}%", percent)
}

/// Format a date as DD-Mon-YYYY, e.g. 23-Jul-2024
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}
