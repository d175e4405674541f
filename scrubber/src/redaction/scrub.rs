//! Content scrubbing for string values.
//!
//! A string is run through an ordered table of substitutions. Each pass sees
//! the output of the previous one and replaces every match. Credential-bearing
//! database URLs are checked before anything else because they replace the
//! whole string, which must not be undone by a narrower pass.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use super::policy::{
    CARD_PLACEHOLDER, EMAIL_PLACEHOLDER, JWT_PLACEHOLDER, REDACTED_PLACEHOLDER, SSN_PLACEHOLDER,
};
use crate::classification::{classify_field, FieldClass};

/// Array elements longer than this (in characters) are redacted outright.
const LIST_ITEM_MAX_CHARS: usize = 30;

/// Prefixes that mark an array element as a credential.
const LIST_ITEM_SECRET_PREFIXES: [&str; 3] = ["sk_", "pk_", "Bearer"];

static DATABASE_URL_WITH_CREDENTIALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:postgres(?:ql)?|mysql|mariadb|mongodb(?:\+srv)?|rediss?|amqps?|mssql|sqlserver)://[^\s/@:]*:[^\s@]+@",
    )
    .expect("database url pattern is valid")
});

static URL_CREDENTIALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//[^\s/@:]+:[^\s@]+@").expect("url credential pattern is valid")
});

/// One substitution in the scrub table.
struct Pass {
    pattern: Regex,
    replacement: &'static str,
    /// Left out when the field name mentions "email".
    skip_for_email_fields: bool,
}

impl Pass {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("scrub pattern is valid"),
            replacement,
            skip_for_email_fields: false,
        }
    }

    fn skip_for_email_fields(mut self) -> Self {
        self.skip_for_email_fields = true;
        self
    }
}

// Order matters: key=value and JWT run before the generic long-run pass so
// their more specific sentinels win.
static PASSES: LazyLock<Vec<Pass>> = LazyLock::new(|| {
    vec![
        Pass::new(r"(?i)(password|secret|key|token)=[^&\s]+", "${1}=[REDACTED]"),
        Pass::new(
            r"eyJ[A-Za-z0-9_-]+\.eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+",
            JWT_PLACEHOLDER,
        ),
        Pass::new(
            r"\b[0-9]{4}[\s-]?[0-9]{4}[\s-]?[0-9]{4}[\s-]?[0-9]{4}\b",
            CARD_PLACEHOLDER,
        ),
        Pass::new(r"\b[0-9]{3}-[0-9]{2}-[0-9]{4}\b", SSN_PLACEHOLDER),
        Pass::new(
            r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
            EMAIL_PLACEHOLDER,
        )
        .skip_for_email_fields(),
        Pass::new(r"(sk_|pk_|Bearer )[A-Za-z0-9_-]{15,}", "${1}[REDACTED]"),
        Pass::new(r"[A-Za-z0-9_-]{35,}", REDACTED_PLACEHOLDER),
    ]
});

/// Scrubs embedded secrets out of `value`, using `field_name` for context.
///
/// Strings under [`FieldClass::Safe`] names are returned unchanged. This does
/// not replace strings under sensitive names; that decision belongs to the
/// redactor, which never calls the scrubber for them.
///
/// ```rust
/// use scrubber::scrub_string;
///
/// assert_eq!(scrub_string("call 123-45-6789", "notes"), "call [SSN_REDACTED]");
/// assert_eq!(scrub_string("123-45-6789", "createdAt"), "123-45-6789");
/// ```
pub fn scrub_string(value: &str, field_name: &str) -> String {
    scrub_classified(value, field_name, classify_field(field_name)).into_owned()
}

pub(crate) fn scrub_classified<'a>(
    value: &'a str,
    field_name: &str,
    class: FieldClass,
) -> Cow<'a, str> {
    if class == FieldClass::Safe {
        return Cow::Borrowed(value);
    }

    let Some(mut text) = scrub_urls(Cow::Borrowed(value)) else {
        return Cow::Borrowed(REDACTED_PLACEHOLDER);
    };

    let email_field = field_name.to_lowercase().contains("email");
    for pass in PASSES.iter() {
        if email_field && pass.skip_for_email_fields {
            continue;
        }
        text = replace_all(text, &pass.pattern, pass.replacement);
    }

    // A pass can collapse whitespace inside an authority (a spaced card number
    // becomes one sentinel), exposing a credential URL the first check missed.
    scrub_urls(text).unwrap_or(Cow::Borrowed(REDACTED_PLACEHOLDER))
}

/// Masks URL credentials. Returns `None` when the whole string must be
/// replaced because it carries a credential-bearing database URL.
fn scrub_urls(text: Cow<'_, str>) -> Option<Cow<'_, str>> {
    if !(text.contains("://") && text.contains('@')) {
        return Some(text);
    }
    if DATABASE_URL_WITH_CREDENTIALS.is_match(&text) {
        return None;
    }
    Some(replace_all(text, &URL_CREDENTIALS, "//[REDACTED]:[REDACTED]@"))
}

/// Redacts an array element, which has no field name to go by.
///
/// Long strings and strings with a credential prefix are replaced; everything
/// else is kept.
pub(crate) fn scrub_list_item(value: &str) -> Cow<'_, str> {
    let looks_secret = value.chars().count() > LIST_ITEM_MAX_CHARS
        || LIST_ITEM_SECRET_PREFIXES
            .iter()
            .any(|prefix| value.starts_with(prefix));
    if looks_secret {
        Cow::Borrowed(REDACTED_PLACEHOLDER)
    } else {
        Cow::Borrowed(value)
    }
}

fn replace_all<'a>(text: Cow<'a, str>, pattern: &Regex, replacement: &str) -> Cow<'a, str> {
    let replaced = match pattern.replace_all(&text, replacement) {
        Cow::Owned(replaced) => Some(replaced),
        Cow::Borrowed(_) => None,
    };
    replaced.map_or(text, Cow::Owned)
}
