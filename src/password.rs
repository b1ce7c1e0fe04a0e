//! Password validation and hashing.
//!
//! Passwords are checked for strength with zxcvbn before being hashed with
//! bcrypt. The [ValidatedPassword] type is the only way to construct a
//! [PasswordHash] from user input, so a hash always comes from a password
//! that passed the strength check.

use bcrypt::DEFAULT_COST;
use serde::{Deserialize, Serialize};
use zxcvbn::{Score, zxcvbn};

use crate::Error;

/// The minimum number of characters a password must have.
const MIN_PASSWORD_LENGTH: usize = 8;

/// The minimum zxcvbn score (0-4) a password must reach.
const MIN_PASSWORD_SCORE: Score = Score::Three;

/// A password that passed the length and strength checks but has not been
/// hashed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Validate a raw password.
    ///
    /// `user_inputs` should contain strings associated with the user (e.g.,
    /// their email) so that passwords built from them score poorly.
    ///
    /// # Errors
    /// Returns [Error::TooWeak] with a human-readable reason if the password
    /// is too short or scores below the strength threshold.
    pub fn new(raw_password: &str, user_inputs: &[&str]) -> Result<Self, Error> {
        if raw_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Error::TooWeak(format!(
                "passwords must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }

        let estimate = zxcvbn(raw_password, user_inputs);

        if estimate.score() < MIN_PASSWORD_SCORE {
            let reason = estimate
                .feedback()
                .and_then(|feedback| feedback.warning())
                .map(|warning| warning.to_string())
                .unwrap_or_else(|| "try a longer or less predictable password".to_owned());

            return Err(Error::TooWeak(reason));
        }

        Ok(Self(raw_password.to_owned()))
    }

    /// Create a `ValidatedPassword` without running the strength check.
    ///
    /// Intended for tests where the bcrypt round-trip is the thing under
    /// test, not the strength estimate.
    #[cfg(test)]
    pub(crate) fn new_unchecked(raw_password: &str) -> Self {
        Self(raw_password.to_owned())
    }
}

/// A bcrypt hash of a validated password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a validated password.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the underlying hashing library
    /// fails. The error string should only be logged on the server.
    pub fn new(password: ValidatedPassword) -> Result<Self, Error> {
        bcrypt::hash(&password.0, DEFAULT_COST)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// This should only be called on strings coming out of a trusted source
    /// such as the application's database.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_owned())
    }

    /// Check that `raw_password` matches the stored password.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the stored hash is malformed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        bcrypt::verify(raw_password, &self.0)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// The hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
