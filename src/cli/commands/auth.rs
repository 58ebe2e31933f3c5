use serde_json::json;

use crate::cli::guard::{require_signed_out, require_user};
use crate::cli::utils::output_success;
use crate::cli::Context;

/// Creates the account without signing in; the user logs in next.
pub async fn signup(
    ctx: &Context,
    uname: &str,
    email: &str,
    password: &str,
    phone: Option<&str>,
) -> anyhow::Result<()> {
    require_signed_out(&ctx.session)?;

    let client = ctx.client()?;
    let created = client.signup(uname, email, password, phone).await?;
    tracing::debug!("Created account {}", created.user.uid);

    output_success(
        &ctx.output,
        "Account created! Please sign in.",
        Some(json!({ "user": created.user })),
    )
}

pub async fn login(ctx: &mut Context, email: &str, password: &str) -> anyhow::Result<()> {
    require_signed_out(&ctx.session)?;

    let client = ctx.client()?;
    let session = client.login(email, password).await?;
    let uname = session.user.uname.clone();

    ctx.session.sign_in(session.user, session.token);
    ctx.save()?;

    output_success(
        &ctx.output,
        &format!("Signed in as {}", uname),
        Some(json!({ "user": ctx.session.user })),
    )
}

pub fn logout(ctx: &mut Context) -> anyhow::Result<()> {
    let was_signed_in = ctx.session.is_signed_in();
    ctx.session.sign_out();
    ctx.save()?;

    let message = if was_signed_in {
        "Signed out"
    } else {
        "No active session"
    };
    output_success(&ctx.output, message, None)
}

pub async fn whoami(ctx: &Context) -> anyhow::Result<()> {
    require_user(&ctx.session)?;

    let user = ctx.client()?.whoami().await?;
    output_success(
        &ctx.output,
        &format!("{} <{}> ({})", user.uname, user.email, user.uid),
        Some(json!({ "user": user })),
    )
}
