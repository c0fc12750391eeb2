//! Password policy enforcement for new passwords.

use zxcvbn::Score;

use torum_core::config::AuthConfig;
use torum_core::error::AppError;

/// Longest password accepted, in characters.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
    /// Weakest acceptable zxcvbn score.
    min_score: Score,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            min_score: score_from_level(config.password_min_score),
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// `user_inputs` (username, email) are penalised by the strength
    /// estimator. Returns the first violation found.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if password.chars().count() > MAX_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
            )));
        }

        if !password.chars().any(char::is_alphabetic) {
            return Err(AppError::validation(
                "Password must contain at least one letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, user_inputs);
        if estimate.score() < self.min_score {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password with more entropy.",
            ));
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

fn score_from_level(level: u8) -> Score {
    match level {
        0 => Score::Zero,
        1 => Score::One,
        2 => Score::Two,
        3 => Score::Three,
        _ => Score::Four,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_accepts_strong_password() {
        assert!(validator().validate("violet-harbor-tram-73", &[]).is_ok());
    }

    #[test]
    fn test_rejects_short_password() {
        let err = validator().validate("ab1", &[]).unwrap_err();
        assert!(err.message.contains("at least 8"));
    }

    #[test]
    fn test_rejects_overlong_password() {
        let long = format!("{}1", "violet-harbor-".repeat(10));
        let err = validator().validate(&long, &[]).unwrap_err();
        assert!(err.message.contains("at most 128"));
    }

    #[test]
    fn test_requires_letter_and_digit() {
        assert!(validator().validate("93715284061", &[]).is_err());
        let err = validator().validate("violet-harbor-tram", &[]).unwrap_err();
        assert!(err.message.contains("digit"));
    }

    #[test]
    fn test_rejects_common_password() {
        let err = validator().validate("password1", &[]).unwrap_err();
        assert!(err.message.contains("too weak"));
    }

    #[test]
    fn test_user_inputs_weaken_score() {
        let strict = PasswordValidator::new(&AuthConfig {
            password_min_score: 3,
            ..AuthConfig::default()
        });
        assert!(strict.validate("alicealice1", &["alice"]).is_err());
    }

    #[test]
    fn test_not_same() {
        let v = validator();
        assert!(v.validate_not_same("old-pass-1", "old-pass-1").is_err());
        assert!(v.validate_not_same("old-pass-1", "new-pass-2").is_ok());
    }
}
