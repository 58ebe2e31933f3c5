use crate::cli::config::Session;
use crate::database::PublicUser;

pub const NOT_SIGNED_IN: &str = "Not signed in. Run `kodflix login` first.";

/// Signed-in user and bearer token, required by every command behind the main view
pub fn require_user(session: &Session) -> anyhow::Result<(&PublicUser, &str)> {
    match (&session.user, &session.token) {
        (Some(user), Some(token)) => Ok((user, token.as_str())),
        _ => Err(anyhow::anyhow!(NOT_SIGNED_IN)),
    }
}

/// `login` and `signup` refuse to run over an existing session
pub fn require_signed_out(session: &Session) -> anyhow::Result<()> {
    match &session.user {
        Some(user) => Err(anyhow::anyhow!(
            "Already signed in as {}. Run `kodflix logout` first.",
            user.email
        )),
        None => Ok(()),
    }
}
