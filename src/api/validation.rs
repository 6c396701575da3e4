use regex::Regex;
use std::sync::LazyLock;

use super::ApiError;
use crate::models::{NewUser, UpdateUser};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

pub fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.len() < 3 {
        return Err(ApiError::validation(
            "Username must be at least 3 characters",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if !EMAIL_RE.is_match(email) {
        return Err(ApiError::validation("Email is invalid"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < 6 {
        return Err(ApiError::validation(
            "Password must be at least 6 characters",
        ));
    }

    if password.len() > 50 {
        return Err(ApiError::validation(
            "Password must not contain more than 50 characters",
        ));
    }

    Ok(())
}

/// All fields required; first violated rule wins.
pub fn validate_new_user(user: &NewUser) -> Result<(), ApiError> {
    validate_username(&user.username)?;
    validate_email(&user.email)?;
    validate_password(&user.password)?;
    Ok(())
}

/// Same per-field rules, applied only to the fields that are present.
pub fn validate_update_user(update: &UpdateUser) -> Result<(), ApiError> {
    if let Some(username) = &update.username {
        validate_username(username)?;
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    if let Some(password) = &update.password {
        validate_password(password)?;
    }
    Ok(())
}
