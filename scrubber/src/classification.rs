//! Field-name classification: "is whatever lives under this key a secret?"
//!
//! Classification looks only at the name, never at the value, and is
//! case-insensitive. Three tables are consulted in order:
//!
//! 1. an exact-match list of sensitive names,
//! 2. patterns for names known to carry structural data (ids, timestamps,
//!    status flags),
//! 3. patterns for names that resemble sensitive compound terms.
//!
//! The last table ends with broad catch-alls (`auth`, `key`, `secret`,
//! `token` anywhere in the name). They over-match on names like `keyboard`;
//! over-redaction is the accepted failure mode here.

use std::sync::LazyLock;

use regex::RegexSet;

/// Outcome of classifying a field name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldClass {
    /// The name is a known secret. Scalars are replaced; objects are walked
    /// so non-sensitive members inside them survive.
    ExactSensitive,
    /// The name holds structural data. Strings are never content-scrubbed.
    Safe,
    /// The name looks like a sensitive compound term. The whole value is
    /// replaced, containers included.
    PatternSensitive,
    /// No opinion. Strings are content-scrubbed, containers are walked.
    Unclassified,
}

impl FieldClass {
    /// Returns `true` for the two classes whose scalar values are replaced.
    pub fn is_sensitive(self) -> bool {
        matches!(self, FieldClass::ExactSensitive | FieldClass::PatternSensitive)
    }
}

/// Lower-cased names that are always secret. Equality match, not substring.
static EXACT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "key",
    "apikey",
    "api_key",
    "authorization",
    "credential",
    "credentials",
    "private",
    "confidential",
    "ssn",
    "socialsecuritynumber",
    "creditcard",
    "cc",
    "cvv",
    "passport",
    "driverlicense",
    "bankaccount",
    "routingnumber",
    "accesstoken",
    "refreshtoken",
    "sessiontoken",
    "jwt",
    "bearer",
    "oauth",
    "clientid",
    "clientsecret",
    "databaseurl",
    "connectionstring",
    "webhooksecret",
    "encryptionkey",
    "signingkey",
    "salt",
    "hash",
    "pin",
    "securitycode",
    "totp",
    "mfa",
    "twofactor",
];

static SAFE_FIELD_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"userid|username|email",
        r"^user$",
        r"id$",
        r"name$",
        r"type$",
        r"status$",
        r"role$",
        r"level$",
        r"created|updated|timestamp|date|time",
        r"(count|size|length|format|version)$",
        r"config|setting|option|flag|enabled|active|visible|public",
        r"description|title|label|category|tag|metadata",
    ])
    .expect("safe field patterns are valid")
});

static SENSITIVE_FIELD_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // Whole-name compound tokens.
        r"^(password|token|secret|key|credential|api|auth|private|confidential|ssn)$",
        r"^(credit|cvv|passport|bank|routing|account|jwt|bearer|oauth|webhook)$",
        r"^(encryption|signing|access|refresh|session|client|database|connection)$",
        // Compound terms anywhere in the name.
        r"auth.*token",
        r"access.*token",
        r"refresh.*token",
        r"session.*token",
        r"api.*key",
        r"webhook.*secret",
        r"encryption.*key",
        r"signing.*key",
        r"client.*secret",
        r"database.*url",
        r"connection.*string",
        // Catch-alls.
        r"auth",
        r"key",
        r"secret",
        r"token",
    ])
    .expect("sensitive field patterns are valid")
});

/// Classifies a field name.
///
/// ```rust
/// use scrubber::{classify_field, FieldClass};
///
/// assert_eq!(classify_field("Password"), FieldClass::ExactSensitive);
/// assert_eq!(classify_field("createdAt"), FieldClass::Safe);
/// assert_eq!(classify_field("authToken"), FieldClass::PatternSensitive);
/// assert_eq!(classify_field("notes"), FieldClass::Unclassified);
/// ```
pub fn classify_field(field_name: &str) -> FieldClass {
    let name = field_name.to_lowercase();
    if EXACT_SENSITIVE_FIELDS.contains(&name.as_str()) {
        FieldClass::ExactSensitive
    } else if SAFE_FIELD_PATTERNS.is_match(&name) {
        FieldClass::Safe
    } else if SENSITIVE_FIELD_PATTERNS.is_match(&name) {
        FieldClass::PatternSensitive
    } else {
        FieldClass::Unclassified
    }
}
