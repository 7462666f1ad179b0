//! Prefix suggestions over a dataset's word list.
//!
//! Separate from similarity ranking: this only answers "which stored words
//! start with what has been typed so far".

/// Default number of suggestions.
pub const MAX_SUGGESTIONS: usize = 10;

/// Words starting with `input` (trimmed, case-insensitive), in table order.
///
/// A word equal to the input is left out, so picking a suggestion does not
/// bring the same suggestion straight back. Blank input suggests nothing.
///
/// # Examples
///
/// ```
/// use wordsim::suggest::suggest;
///
/// let words: Vec<String> = ["king", "kingdom", "kind", "queen"]
///     .iter().map(|w| w.to_string()).collect();
///
/// assert_eq!(suggest(" Kin", &words, 10), vec!["king", "kingdom", "kind"]);
/// assert_eq!(suggest("king", &words, 10), vec!["kingdom"]);
/// assert!(suggest("  ", &words, 10).is_empty());
/// ```
pub fn suggest<'a>(input: &str, words: &'a [String], max: usize) -> Vec<&'a str> {
    let prefix = input.trim().to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }

    words
        .iter()
        .filter(|word| {
            let lower = word.to_lowercase();
            lower.starts_with(&prefix) && lower != prefix
        })
        .map(String::as_str)
        .take(max)
        .collect()
}
