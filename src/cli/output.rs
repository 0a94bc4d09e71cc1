//! Output formatting utilities for the CLI.

use serde::Serialize;

/// Renders a command result for humans or as JSON.
pub trait CommandOutput: Serialize {
    /// Plain text rendering.
    fn to_human(&self) -> String;

    /// JSON rendering.
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print `result` in the selected mode.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Format a dollar amount with thousands separators.
pub fn currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let (sign, cents) = if cents < 0 { ("-", -cents) } else { ("", cents) };
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Bulleted list, or a placeholder when empty.
pub fn bullet_list<I, S>(items: I, empty: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = items
        .into_iter()
        .map(|item| format!("  - {}", item.as_ref()))
        .collect();
    if lines.is_empty() {
        format!("  {empty}")
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(999.5), "$999.50");
        assert_eq!(currency(14950.0), "$14,950.00");
        assert_eq!(currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(currency(-12.0), "-$12.00");
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list(Vec::<String>::new(), "none"), "  none");
        assert_eq!(bullet_list(["a", "b"], "none"), "  - a\n  - b");
    }
}
