//! Sentinels and limits shared by the redaction passes.
//!
//! Every sentinel is chosen so that no scrub pass matches it again, which is
//! what keeps redaction idempotent.

/// Default placeholder used for full redaction.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

/// Replaces a container reached again from inside itself during the same call.
pub const CIRCULAR_REFERENCE_PLACEHOLDER: &str = "[CIRCULAR_REFERENCE]";

/// Replaces a container nested deeper than [`RedactorConfig::max_depth`].
pub const MAX_DEPTH_PLACEHOLDER: &str = "[MAX_DEPTH_EXCEEDED]";

/// Replaces JSON Web Tokens embedded in free text.
pub const JWT_PLACEHOLDER: &str = "[JWT_REDACTED]";

/// Replaces 16-digit card numbers embedded in free text.
pub const CARD_PLACEHOLDER: &str = "[CARD_REDACTED]";

/// Replaces social security numbers embedded in free text.
pub const SSN_PLACEHOLDER: &str = "[SSN_REDACTED]";

/// Replaces email addresses embedded in free text.
pub const EMAIL_PLACEHOLDER: &str = "[EMAIL_REDACTED]";

/// Default nesting limit for [`RedactorConfig`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Limits applied by a [`Redactor`](super::Redactor).
///
/// Use [`RedactorConfig::default`] and the `with_*` builders to create
/// instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedactorConfig {
    /// Number of container levels below the root that are walked.
    max_depth: usize,
}

impl RedactorConfig {
    /// Sets how many container levels below the root are walked.
    ///
    /// A container found deeper than this is replaced with
    /// [`MAX_DEPTH_PLACEHOLDER`] instead of being descended into. `0` keeps
    /// only the root's scalar members.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the configured nesting limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for RedactorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RedactorConfig, DEFAULT_MAX_DEPTH};

    #[test]
    fn default_config_uses_default_depth() {
        assert_eq!(RedactorConfig::default().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn with_max_depth_overrides_limit() {
        let config = RedactorConfig::default().with_max_depth(3);
        assert_eq!(config.max_depth(), 3);
    }
}
