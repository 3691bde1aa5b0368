//! Free-text parsing of phrases like "120 USD to EUR".

use regex::Regex;
use std::sync::LazyLock;

// 1 = amount, 2 = optional source code, 3 = target code
static MESSAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:[.,][0-9]+)?)\s*([a-z]{3})?\s*(?:to|in|->)?\s*([a-z]{3})")
        .expect("message pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMessage {
    pub amount: f64,
    /// Empty when the message names no source currency.
    pub from: String,
    pub to: String,
}

/// Extracts an amount, an optional source code and a target code from `text`.
///
/// Codes are returned as written; normalization is left to the caller.
pub fn parse_message(text: &str) -> Option<ParsedMessage> {
    let captures = MESSAGE_PATTERN.captures(text.trim())?;
    let amount_raw = captures.get(1)?.as_str();
    let to = captures.get(3)?.as_str();
    let from = captures.get(2).map_or("", |m| m.as_str());

    let amount = amount_raw.replacen(',', ".", 1).parse::<f64>().ok()?;

    Some(ParsedMessage {
        amount,
        from: from.to_string(),
        to: to.to_string(),
    })
}
