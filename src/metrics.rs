use once_cell::sync::Lazy;
use regex::Regex;

/// Matches dollar amounts (`$5`, `$5.00`, `$1,234.56`) and spelled-out
/// amounts (`100 dollars`, `50 USD`). Bare numbers without a currency
/// marker do not match.
static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\$\d+(\.\d{1,2})?|\$\d{1,3}(,\d{3})*(\.\d{2})?|(\d+\s+(dollars|USD)))")
        .expect("money pattern is valid")
});

/// Case-insensitive, non-overlapping count of the literal `phrase` in
/// `text`. An empty phrase counts as zero.
pub fn phrase_count(text: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    text.to_lowercase().matches(&phrase.to_lowercase()).count()
}

/// Whether `text` mentions an amount of money.
pub fn mentions_money(text: &str) -> bool {
    MONEY_PATTERN.is_match(text)
}
