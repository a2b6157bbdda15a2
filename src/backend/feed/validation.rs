//! Input rules shared by the user and post resolvers.

use crate::backend::error::{ApiError, ValidationIssue};

pub const MIN_PASSWORD_LEN: usize = 5;
pub const MIN_TEXT_LEN: usize = 5;

/// Minimal structural e-mail check: `local@domain.tld`, no whitespace
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2 && !host.starts_with('.'),
        None => false,
    }
}

fn long_enough(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Collects issues and turns them into one 422 error
#[derive(Debug, Default)]
pub struct Checks {
    issues: Vec<ValidationIssue>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.issues.push(ValidationIssue::new(message));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ApiError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation("Invalid input.", std::mem::take(&mut self.issues)))
        }
    }
}

pub fn check_user_input(email: &str, password: &str) -> Result<(), ApiError> {
    Checks::new()
        .require(is_email(email), "E-Mail is invalid.")
        .require(long_enough(password, MIN_PASSWORD_LEN), "Password too short!")
        .finish()
}

pub fn check_post_input(title: &str, content: &str) -> Result<(), ApiError> {
    Checks::new()
        .require(long_enough(title, MIN_TEXT_LEN), "Title is invalid.")
        .require(long_enough(content, MIN_TEXT_LEN), "Content is invalid.")
        .finish()
}
