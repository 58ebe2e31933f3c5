use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{JwtError, TokenKeys};
use crate::database::models::user::{generate_uid, normalize_email};
use crate::database::{NewUser, PublicUser, Storage, StorageError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists")]
    UserExists,
    /// Unknown email and wrong password are deliberately the same error.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Validation(String),
    #[error("User no longer exists")]
    UnknownUser,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(_) => AuthError::UserExists,
            other => AuthError::Storage(other),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub uname: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signed token plus the public view of the user it was issued to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: PublicUser,
}

/// Signup, login and token-subject lookup over the configured storage
#[derive(Clone)]
pub struct AuthService {
    storage: Arc<dyn Storage>,
    tokens: TokenKeys,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>, tokens: TokenKeys, bcrypt_cost: u32) -> Self {
        Self {
            storage,
            tokens,
            bcrypt_cost,
        }
    }

    pub fn tokens(&self) -> &TokenKeys {
        &self.tokens
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<Session, AuthError> {
        let email = normalize_email(&request.email);
        let uname = request.uname.trim().to_string();

        validate_email_format(&email).map_err(AuthError::Validation)?;
        if uname.is_empty() {
            return Err(AuthError::Validation("Username cannot be empty".to_string()));
        }
        if request.password.is_empty() {
            return Err(AuthError::Validation("Password cannot be empty".to_string()));
        }
        let phone = request
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        check_length("Username", &uname, MAX_UNAME_LEN)?;
        check_length("Email", &email, MAX_EMAIL_LEN)?;
        if let Some(phone) = &phone {
            check_length("Phone", phone, MAX_PHONE_LEN)?;
        }

        if self.storage.get_user(&email).await?.is_some() {
            return Err(AuthError::UserExists);
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost).await?;

        // create_user re-checks the email under its own lock / unique index
        let user = self
            .storage
            .create_user(NewUser {
                uid: generate_uid(),
                uname,
                email,
                password_hash,
                phone,
            })
            .await?;

        tracing::info!("Created user {} ({})", user.uid, user.email);

        let token = self.tokens.issue(&user.uid, &user.email)?;
        Ok(Session {
            token,
            user: user.into(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<Session, AuthError> {
        let email = normalize_email(&request.email);

        let user = match self.storage.get_user(&email).await? {
            Some(user) => user,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !verify_password(&request.password, &user.password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.uid, &user.email)?;
        Ok(Session {
            token,
            user: user.into(),
        })
    }

    /// Public record of the user a token was issued to
    pub async fn whoami(&self, uid: &str) -> Result<PublicUser, AuthError> {
        self.storage
            .get_user_by_uid(uid)
            .await?
            .map(PublicUser::from)
            .ok_or(AuthError::UnknownUser)
    }
}

// Column widths of the users table
const MAX_UNAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 255;
const MAX_PHONE_LEN: usize = 20;

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AuthError> {
    if value.chars().count() > max {
        return Err(AuthError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Validate email format
///
/// Requires a non-empty local part and a dotted domain.
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format".to_string());
    }

    let domain = parts[1];
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Invalid email format".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}
