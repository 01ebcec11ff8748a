//! Unified error handling for the MídiaTopo core.
//!
//! Store operations return one result type instead of mixing "return null"
//! and "throw": lookup misses are `Ok(None)`, state-changing misses and
//! conflicts are typed variants, and engine failures always propagate.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Field-keyed validation failures, collected before any store access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub HashMap<String, Vec<String>>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&String> = self.0.keys().collect();
        fields.sort();
        let mut first = true;
        for field in fields {
            for message in &self.0[field] {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Caller-side form violations; never reaches the store.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Duplicate email, caught by the pre-check or by the UNIQUE constraint.
    #[error("email already registered")]
    EmailTaken,

    /// Login or password-change credential miss.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A state-changing operation matched no user row.
    #[error("no user matches the given email")]
    UserNotFound,

    /// A state-changing operation matched no ad row.
    #[error("anúncio not found")]
    AnuncioNotFound,

    /// A flow that needs the current session was called without one.
    #[error("no active session")]
    NotLoggedIn,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("session snapshot encoding failed: {0}")]
    SessionEncoding(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Single field validation error
    pub fn validation_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.to_string(), vec![message.into()]);
        Error::Validation(ValidationErrors(errors))
    }
}

/// Builder for collecting multiple validation errors
#[derive(Debug, Default)]
pub struct ValidationErrorBuilder {
    errors: HashMap<String, Vec<String>>,
}

impl ValidationErrorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation error for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Return Ok(()) if no errors were collected, or Err(Error::Validation)
    pub fn finish(self) -> Result<(), Error> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(ValidationErrors(self.errors)))
        }
    }
}
