mod common;

use anyhow::Result;
use serde_json::json;
use tempfile::TempDir;

use kodflix_api::cli::client::{ApiClient, FALLBACK_ERROR};
use kodflix_api::cli::commands::{auth, watchlist};
use kodflix_api::cli::config::{Session, SessionStore};
use kodflix_api::cli::guard::NOT_SIGNED_IN;
use kodflix_api::cli::{Context, OutputFormat};

use common::TestApp;

/// Serve the test app on a real socket so the CLI client can reach it
async fn serve(app: &TestApp) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let router = app.router.clone();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{}", addr))
}

fn context(server: &str, dir: &TempDir) -> Context {
    let session = Session {
        server: server.to_string(),
        ..Session::default()
    };
    Context {
        output: OutputFormat::Json,
        store: SessionStore::at(dir.path()),
        session,
    }
}

#[tokio::test]
async fn signup_does_not_sign_in_but_login_persists_session() -> Result<()> {
    let app = TestApp::offline().await?;
    let server = serve(&app).await?;
    let dir = tempfile::tempdir()?;
    let mut ctx = context(&server, &dir);

    auth::signup(&ctx, "Ana", "ana@example.com", "pw1", None).await?;
    assert!(!ctx.session.is_signed_in());
    assert!(!ctx.store.path().exists());

    auth::login(&mut ctx, "ana@example.com", "pw1").await?;
    let saved = ctx.store.load()?;
    assert!(saved.is_signed_in());
    assert_eq!(saved.user.as_ref().map(|u| u.email.as_str()), Some("ana@example.com"));
    assert_eq!(saved.server, server);

    // A second login is redirected away
    let err = auth::login(&mut ctx, "ana@example.com", "pw1").await.unwrap_err();
    assert!(err.to_string().starts_with("Already signed in as ana@example.com"));

    auth::logout(&mut ctx)?;
    assert!(!ctx.store.load()?.is_signed_in());
    Ok(())
}

#[tokio::test]
async fn server_error_message_reaches_the_user() -> Result<()> {
    let app = TestApp::offline().await?;
    let server = serve(&app).await?;
    let dir = tempfile::tempdir()?;
    let mut ctx = context(&server, &dir);

    let err = auth::login(&mut ctx, "nobody@example.com", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!ctx.session.is_signed_in());
    Ok(())
}

#[tokio::test]
async fn unreachable_server_uses_fallback_message() -> Result<()> {
    let client = ApiClient::new("http://127.0.0.1:9", None)?;
    let err = client.login("a@b.co", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), FALLBACK_ERROR);
    Ok(())
}

#[tokio::test]
async fn watchlist_commands_need_a_session() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let ctx = context("http://127.0.0.1:9", &dir);

    let err = watchlist::handle(&ctx, watchlist::WatchlistCommands::List)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), NOT_SIGNED_IN);
    Ok(())
}

#[tokio::test]
async fn watchlist_mutations_use_the_server_list() -> Result<()> {
    let app = TestApp::offline().await?;
    let server = serve(&app).await?;
    let dir = tempfile::tempdir()?;
    let mut ctx = context(&server, &dir);

    auth::signup(&ctx, "Ana", "ana@example.com", "pw1", None).await?;
    auth::login(&mut ctx, "ana@example.com", "pw1").await?;

    let client = ctx.client()?;
    let list = client.add_to_watchlist(&json!({ "id": 550, "title": "Fight Club" })).await?;
    assert_eq!(list.len(), 1);

    watchlist::handle(&ctx, watchlist::WatchlistCommands::Remove { id: 550 }).await?;
    assert!(client.watchlist().await?.is_empty());
    Ok(())
}
