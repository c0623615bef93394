//! Login, signup, reply and new-thread form validation.
//!
//! Each `submit_*` returns the success toast text, or a [`ValidationError`]
//! whose `Display` is the warning toast text.

use super::password::{self, Strength};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_REPLY_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your username! ⚠️")]
    MissingUsername,
    #[error("Password must be at least 8 characters! ⚠️")]
    PasswordTooShort,
    #[error("Please enter a valid email! ⚠️")]
    InvalidEmail,
    #[error("Reply must be at least 10 characters! ⚠️")]
    ReplyTooShort,
    #[error("Please enter a thread title! ⚠️")]
    MissingTitle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn submit(&self) -> Result<String, ValidationError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        Ok(format!("Welcome back, {username}! 🎉"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    /// Password length is checked before the email.
    pub fn submit(&self) -> Result<String, ValidationError> {
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(format!("Account created for {}! 🚀", self.username.trim()))
    }

    pub fn strength(&self) -> Option<Strength> {
        if self.password.is_empty() {
            None
        } else {
            Some(password::strength(&self.password))
        }
    }
}

pub fn submit_reply(body: &str) -> Result<&'static str, ValidationError> {
    if body.trim().chars().count() < MIN_REPLY_LEN {
        return Err(ValidationError::ReplyTooShort);
    }
    Ok("Reply posted successfully! 💬")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadForm {
    pub title: String,
    pub category: String,
    pub body: String,
    pub tags: String,
}

impl ThreadForm {
    pub fn submit(&self) -> Result<&'static str, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        Ok("Thread created successfully! 🎉")
    }

    /// Comma separated tags, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}
