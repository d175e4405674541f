//! Scrubbing for raw database driver error text.
//!
//! Driver messages have no field names to classify, so this is a narrower,
//! fixed set of passes aimed at what drivers actually echo back: connection
//! parameters and credentials embedded in URLs.

use std::sync::LazyLock;

use regex::Regex;

static PASSES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)password=[^\s&]+", "password=[REDACTED]"),
        (r"(?i)secret=[^\s&]+", "secret=[REDACTED]"),
        (r"(?i)key=[^\s&]+", "key=[REDACTED]"),
        (r"(?i)user=[^\s&]+", "user=[REDACTED]"),
        (r"//[^\s/@:]+:[^\s@]+@", "//[REDACTED]:[REDACTED]@"),
        (r"(?i)for user=\w+", "for user=[REDACTED]"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("database error pattern is valid"),
            replacement,
        )
    })
    .collect()
});

/// Removes credentials from a database error message before it is shown to a
/// user or written to a log.
///
/// ```rust
/// use scrubber::sanitize_database_error;
///
/// let message = "Connection failed: password=secret123 for user=admin at localhost:5432";
/// assert_eq!(
///     sanitize_database_error(message),
///     "Connection failed: password=[REDACTED] for user=[REDACTED] at localhost:5432"
/// );
/// ```
pub fn sanitize_database_error(message: &str) -> String {
    PASSES
        .iter()
        .fold(message.to_owned(), |text, (pattern, replacement)| {
            pattern.replace_all(&text, *replacement).into_owned()
        })
}
