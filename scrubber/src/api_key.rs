//! Format checks for API keys supplied in configuration or requests.

use std::sync::LazyLock;

use regex::RegexSet;

static API_KEY_FORMATS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // Stripe-style: sk_test_..., pk_live_...
        r"^(sk|pk)_(test|live)_[A-Za-z0-9]{24,}$",
        // Opaque alphanumeric
        r"^[A-Za-z0-9]{32,}$",
        // UUID
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    ])
    .expect("api key patterns are valid")
});

/// Returns `true` if `key` has a recognised API key shape.
///
/// Accepted: Stripe-style keys (`sk_`/`pk_` + `test_`/`live_` + 24 or more
/// alphanumerics), opaque keys of 32 or more alphanumerics, and hyphenated
/// UUIDs. This checks shape only, never validity with an issuer.
pub fn validate_api_key(key: &str) -> bool {
    API_KEY_FORMATS.is_match(key)
}
