//! User profiles and sign-up validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::normalize_label};

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());
static PASSWORD_CHARSET: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9!$%@#£€*?&]{8,}$").ok());

pub const MIN_PASSWORD_CHARS: usize = 8;

/// Profile row of a user, separate from the auth identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// `None` until the user sets it; percentage views need it.
    pub monthly_income: Option<MoneyCents>,
    pub total_balance: MoneyCents,
}

impl UserProfile {
    /// Monthly income or `IncomeNotSet`.
    pub fn require_income(&self) -> ResultEngine<MoneyCents> {
        match self.monthly_income {
            Some(income) if income.is_positive() => Ok(income),
            _ => Err(EngineError::IncomeNotSet),
        }
    }
}

/// A validated sign-up request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

fn valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

fn valid_password(password: &str) -> bool {
    PASSWORD_CHARSET
        .as_ref()
        .is_some_and(|re| re.is_match(password))
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

impl SignupForm {
    /// Validates every field and reports all problems at once.
    pub fn new(full_name: &str, email: &str, password: &str) -> ResultEngine<Self> {
        let mut problems = Vec::new();

        let full_name = normalize_label(full_name, "full name");
        if let Err(EngineError::InvalidName(msg)) = &full_name {
            problems.push(msg.clone());
        }

        let email = email.trim().to_lowercase();
        if !valid_email(&email) {
            problems.push("invalid email address".to_string());
        }

        if !valid_password(password) {
            problems.push(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters with a letter and a digit"
            ));
        }

        match full_name {
            Ok(full_name) if problems.is_empty() => Ok(Self {
                full_name,
                email,
                password: password.to_string(),
            }),
            _ => Err(EngineError::InvalidSignup(problems)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_form_and_lowercases_email() {
        let form = SignupForm::new("  Asha  Rao ", " Asha@Example.COM ", "secret123").unwrap();
        assert_eq!(form.full_name, "Asha Rao");
        assert_eq!(form.email, "asha@example.com");
    }

    #[test]
    fn reports_every_problem() {
        let err = SignupForm::new("", "not-an-email", "short").unwrap_err();
        match err {
            EngineError::InvalidSignup(problems) => assert_eq!(problems.len(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn password_needs_letter_and_digit() {
        assert!(SignupForm::new("A", "a@b.co", "abcdefgh").is_err());
        assert!(SignupForm::new("A", "a@b.co", "12345678").is_err());
        assert!(SignupForm::new("A", "a@b.co", "pass word1").is_err());
        assert!(SignupForm::new("A", "a@b.co", "p@ssw0rd€").is_ok());
    }

    #[test]
    fn income_must_be_set() {
        let mut profile = UserProfile {
            id: Uuid::nil(),
            email: "a@b.co".to_string(),
            name: "A".to_string(),
            monthly_income: None,
            total_balance: MoneyCents::ZERO,
        };
        assert_eq!(profile.require_income(), Err(EngineError::IncomeNotSet));
        profile.monthly_income = Some(MoneyCents::from_major(1000));
        assert_eq!(profile.require_income(), Ok(MoneyCents::from_major(1000)));
    }
}
