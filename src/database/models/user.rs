use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored user record. `password` holds the bcrypt hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub uid: String,
    pub uname: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// User fields that are safe to hand back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub uid: String,
    pub uname: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            uid: user.uid.clone(),
            uname: user.uname.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid,
            uname: user.uname,
            email: user.email,
            phone: user.phone,
        }
    }
}

/// Insert payload for `Storage::create_user`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub uid: String,
    pub uname: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
}

impl NewUser {
    pub fn into_user(self) -> User {
        User {
            uid: self.uid,
            uname: self.uname,
            email: self.email,
            password: self.password_hash,
            phone: self.phone,
        }
    }
}

/// `kod` followed by 12 hex characters.
pub fn generate_uid() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("kod{}", &id[..12])
}

/// Emails are compared trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_has_prefix_and_length() {
        let uid = generate_uid();
        assert!(uid.starts_with("kod"));
        assert_eq!(uid.len(), 15);
        assert_ne!(uid, generate_uid());
    }

    #[test]
    fn public_user_drops_password() {
        let user = User {
            uid: "kod1".to_string(),
            uname: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "$2b$10$hash".to_string(),
            phone: None,
        };
        let value = serde_json::to_value(PublicUser::from(&user)).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["email"], "ana@example.com");
    }

    #[test]
    fn normalizes_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
