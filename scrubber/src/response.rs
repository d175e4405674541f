//! Mapping application errors to user-facing error payloads.
//!
//! This is the caller the redactor exists for: an HTTP error handler that
//! wants to put an error's context into a response body. The mapping here is
//! framework-agnostic. It produces an [`ErrorResponse`] that serializes to
//! `{"error", "code", "statusCode", "context"}`, and it guarantees that any
//! context included has been through [`redact_sensitive_data`] and that
//! driver messages have been through [`sanitize_database_error`].

use std::{env, fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

use crate::{
    redact_sensitive_data,
    redaction::{sanitize_database_error, scrub_string},
    value::{Object, Value},
};

/// Environment variable read first by [`Environment::from_env`].
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

/// Read by [`Environment::from_env`] when [`ENVIRONMENT_VAR`] is unset, so
/// services that already switch on `NODE_ENV` keep working.
pub const FALLBACK_ENVIRONMENT_VAR: &str = "NODE_ENV";

/// Deployment environment, which decides how much an internal error reveals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Local development; internal errors include their message and stack.
    #[default]
    Development,
    /// Test runs; behaves like development.
    Test,
    /// Production; internal errors are opaque.
    Production,
}

impl Environment {
    /// Reads [`ENVIRONMENT_VAR`], then [`FALLBACK_ENVIRONMENT_VAR`]. When
    /// neither is set this is development.
    pub fn from_env() -> Result<Self, ConfigError> {
        for variable in [ENVIRONMENT_VAR, FALLBACK_ENVIRONMENT_VAR] {
            match env::var(variable) {
                Ok(name) => return name.parse(),
                Err(env::VarError::NotPresent) => continue,
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(ConfigError::InvalidEncoding { variable })
                }
            }
        }
        Ok(Self::default())
    }

    /// Returns `true` in production.
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownEnvironment {
                name: name.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        })
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The environment name is not one of development, test, production.
    #[error("unknown environment `{name}`")]
    UnknownEnvironment {
        /// The rejected name.
        name: String,
    },
    /// The variable holds bytes that are not valid UTF-8.
    #[error("environment variable `{variable}` is not valid unicode")]
    InvalidEncoding {
        /// The variable that was read.
        variable: &'static str,
    },
}

/// Errors an application surfaces to its callers.
///
/// The `Display` output is the raw message and may contain secrets; turn the
/// error into an [`ErrorResponse`] before showing it to anyone.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed.
    #[error("{message}")]
    Validation {
        /// What was wrong.
        message: String,
        /// Caller-supplied diagnostic data.
        context: Option<Value>,
    },
    /// A resource does not exist.
    #[error("{}", not_found_message(resource, id.as_deref()))]
    NotFound {
        /// The kind of resource.
        resource: String,
        /// The identifier that was looked up.
        id: Option<String>,
    },
    /// The request conflicts with existing state.
    #[error("{message}")]
    Conflict {
        /// What conflicted.
        message: String,
        /// Caller-supplied diagnostic data.
        context: Option<Value>,
    },
    /// The database driver reported an error.
    #[error("database error: {message}")]
    Database {
        /// The driver's raw message.
        message: String,
    },
    /// Token or session validation failed.
    #[error("authentication error: {message}")]
    Authentication {
        /// Why validation failed.
        message: String,
    },
    /// Anything else.
    #[error("{message}")]
    Internal {
        /// The raw message.
        message: String,
        /// A captured backtrace or stack, if any.
        stack: Option<String>,
    },
}

fn not_found_message(resource: &str, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("{resource} with id {id} not found"),
        None => format!("{resource} not found"),
    }
}

impl ServiceError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::Database { .. } => "DATABASE_ERROR",
            Self::Authentication { .. } => "AUTH_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Authentication { .. } => 401,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Database { .. } | Self::Internal { .. } => 500,
        }
    }
}

/// A user-facing error payload whose context has already been redacted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable code, see [`ServiceError::code`].
    pub code: &'static str,
    /// HTTP status code.
    pub status_code: u16,
    /// Redacted diagnostic data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl ErrorResponse {
    /// Builds the payload for `error` as seen from `environment`.
    pub fn from_error(error: &ServiceError, environment: Environment) -> Self {
        let (message, context) = match error {
            ServiceError::Validation { message, context }
            | ServiceError::Conflict { message, context } => {
                (message.clone(), context.as_ref().map(redact_sensitive_data))
            }
            ServiceError::NotFound { resource, id } => {
                let context = Object::new()
                    .with("resource", resource.as_str())
                    .with("id", id.as_deref().map_or(Value::Undefined, Value::from));
                (
                    error.to_string(),
                    Some(redact_sensitive_data(&Value::from(context))),
                )
            }
            ServiceError::Database { message } => {
                let context =
                    Object::new().with("originalError", sanitize_database_error(message));
                (
                    "Database operation failed".to_owned(),
                    Some(redact_sensitive_data(&Value::from(context))),
                )
            }
            ServiceError::Authentication { .. } => ("Authentication failed".to_owned(), None),
            ServiceError::Internal { .. } if environment.is_production() => {
                ("Internal server error".to_owned(), None)
            }
            ServiceError::Internal { message, stack } => {
                let context = Object::new().with(
                    "originalError",
                    stack.as_deref().map_or(Value::Undefined, Value::from),
                );
                (
                    scrub_string(message, "error"),
                    Some(redact_sensitive_data(&Value::from(context))),
                )
            }
        };

        Self {
            error: message,
            code: error.code(),
            status_code: error.status_code(),
            context,
        }
    }
}
