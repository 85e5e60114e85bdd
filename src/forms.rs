//! Form validation
//!
//! Client-side checks run synchronously on every change. A form whose
//! validation fails never reaches the network: `submit` returns the
//! collected [`FormErrors`] instead of dispatching.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::actions::{AuthActions, DnpActions};
use crate::api::{ActionResult, ApiClient};
use crate::common_passwords::is_common_password;
use crate::evaluator::evaluate_password_strength;
use crate::models::{DnpEntry, Session};
use crate::sections::MIN_LENGTH;
use crate::types::PasswordEvaluation;

/// Longest note accepted on a DNP entry.
pub const MAX_NOTE_LENGTH: usize = 280;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    Artist,
    Note,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Password confirmation",
            Field::Artist => "Artist",
            Field::Note => "Note",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(Field),
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {} characters", MIN_LENGTH)]
    PasswordTooShort,
    #[error("Password is too weak")]
    WeakPassword,
    #[error("This password is too common")]
    CommonPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Note must be at most {max} characters")]
    NoteTooLong { max: usize },
}

impl ValidationError {
    /// Field the message is displayed under.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required(field) => *field,
            ValidationError::InvalidEmail => Field::Email,
            ValidationError::PasswordTooShort
            | ValidationError::WeakPassword
            | ValidationError::CommonPassword => Field::Password,
            ValidationError::PasswordMismatch => Field::ConfirmPassword,
            ValidationError::NoteTooLong { .. } => Field::Note,
        }
    }
}

/// Every validation failure of a form, in field order.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("form has {} invalid field(s)", .0.len())]
pub struct FormErrors(Vec<ValidationError>);

impl FormErrors {
    fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    /// First message for `field`, for inline display.
    pub fn for_field(&self, field: Field) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

/// Structural email check: `local@domain.tld`, no whitespace.
///
/// The domain needs a dot with at least one character on each side.
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn check_email(email: &str, errors: &mut FormErrors) {
    if email.trim().is_empty() {
        errors.push(ValidationError::Required(Field::Email));
    } else if !validate_email(email) {
        errors.push(ValidationError::InvalidEmail);
    }
}

fn secret(value: &str) -> SecretString {
    SecretString::new(value.to_string().into())
}

#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: secret(password),
        }
    }

    pub fn set_password(&mut self, value: &str) {
        self.password = secret(value);
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        check_email(&self.email, &mut errors);
        if self.password.expose_secret().is_empty() {
            errors.push(ValidationError::Required(Field::Password));
        }
        errors.into_result()
    }

    pub fn form_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Signs in, or returns the validation errors without dispatching.
    pub async fn submit<C: ApiClient>(
        &self,
        auth: &mut AuthActions<C>,
    ) -> Result<ActionResult<Session>, FormErrors> {
        self.validate()?;
        Ok(auth.login(self.email.trim(), &self.password).await)
    }
}

#[derive(Debug)]
pub struct RegisterForm {
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl RegisterForm {
    pub fn new(email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: secret(password),
            confirm_password: secret(confirm_password),
        }
    }

    pub fn set_password(&mut self, value: &str) {
        self.password = secret(value);
    }

    pub fn set_confirm_password(&mut self, value: &str) {
        self.confirm_password = secret(value);
    }

    /// Strength meter state for the current password.
    pub fn password_evaluation(&self) -> PasswordEvaluation {
        evaluate_password_strength(&self.password)
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        check_email(&self.email, &mut errors);

        let password = self.password.expose_secret();
        if password.is_empty() {
            errors.push(ValidationError::Required(Field::Password));
        } else {
            let evaluation = self.password_evaluation();
            if !evaluation.criteria.length {
                errors.push(ValidationError::PasswordTooShort);
            } else if !evaluation.meets_submission_gate() {
                errors.push(ValidationError::WeakPassword);
            } else if is_common_password(password) {
                errors.push(ValidationError::CommonPassword);
            }
        }

        let confirm = self.confirm_password.expose_secret();
        if confirm.is_empty() {
            errors.push(ValidationError::Required(Field::ConfirmPassword));
        } else if confirm != password {
            errors.push(ValidationError::PasswordMismatch);
        }

        errors.into_result()
    }

    pub fn form_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Creates the account, or returns the validation errors without dispatching.
    pub async fn submit<C: ApiClient>(
        &self,
        auth: &mut AuthActions<C>,
    ) -> Result<ActionResult<Session>, FormErrors> {
        self.validate()?;
        Ok(auth.register(self.email.trim(), &self.password).await)
    }
}

/// Adds the artist picked from search results to the DNP list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddArtistForm {
    pub artist_id: String,
    pub note: String,
}

impl AddArtistForm {
    pub fn new(artist_id: &str, note: &str) -> Self {
        Self {
            artist_id: artist_id.to_string(),
            note: note.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.artist_id.trim().is_empty() {
            errors.push(ValidationError::Required(Field::Artist));
        }
        if self.note.trim().chars().count() > MAX_NOTE_LENGTH {
            errors.push(ValidationError::NoteTooLong {
                max: MAX_NOTE_LENGTH,
            });
        }
        errors.into_result()
    }

    pub fn form_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub async fn submit<C: ApiClient>(
        &self,
        dnp: &mut DnpActions<C>,
    ) -> Result<ActionResult<DnpEntry>, FormErrors> {
        self.validate()?;
        Ok(dnp.add_artist(self.artist_id.trim(), Some(&self.note)).await)
    }
}
