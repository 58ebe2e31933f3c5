mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

fn ids(body: &serde_json::Value) -> Vec<i64> {
    body.as_array()
        .expect("watchlist response is an array")
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn watchlist_requires_a_token() -> Result<()> {
    let app = TestApp::offline().await?;

    let res = app.get("/api/watchlist", None).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["success"], false);

    let res = app.post("/api/watchlist", None, json!({ "id": 550 })).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.delete("/api/watchlist/550", Some("not-a-token")).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn new_user_has_empty_list() -> Result<()> {
    let app = TestApp::offline().await?;
    let token = app.signup("Ana", "ana@example.com", "pw").await?;

    let res = app.get("/api/watchlist", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn adding_twice_keeps_one_entry() -> Result<()> {
    let app = TestApp::offline().await?;
    let token = app.signup("Ana", "ana@example.com", "pw").await?;
    let movie = json!({ "id": 550, "title": "Fight Club", "poster_path": "/f.jpg" });

    let first = app.post("/api/watchlist", Some(&token), movie.clone()).await?;
    assert_eq!(first.status, StatusCode::OK, "body: {}", first.body);
    assert_eq!(ids(&first.body), vec![550]);
    assert_eq!(first.body[0]["title"], "Fight Club");

    let second = app.post("/api/watchlist", Some(&token), movie).await?;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body, first.body);
    Ok(())
}

#[tokio::test]
async fn list_keeps_insertion_order() -> Result<()> {
    let app = TestApp::offline().await?;
    let token = app.signup("Ana", "ana@example.com", "pw").await?;

    for id in [603, 550, 1399] {
        app.post("/api/watchlist", Some(&token), json!({ "id": id }))
            .await?;
    }

    let res = app.get("/api/watchlist", Some(&token)).await?;
    assert_eq!(ids(&res.body), vec![603, 550, 1399]);
    Ok(())
}

#[tokio::test]
async fn remove_returns_updated_list_and_ignores_absent_ids() -> Result<()> {
    let app = TestApp::offline().await?;
    let token = app.signup("Ana", "ana@example.com", "pw").await?;
    app.post("/api/watchlist", Some(&token), json!({ "id": 550 })).await?;
    app.post("/api/watchlist", Some(&token), json!({ "id": 603 })).await?;

    let res = app.delete("/api/watchlist/550", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(ids(&res.body), vec![603]);

    let res = app.delete("/api/watchlist/999", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(ids(&res.body), vec![603]);
    Ok(())
}

#[tokio::test]
async fn lists_are_per_user() -> Result<()> {
    let app = TestApp::offline().await?;
    let ana = app.signup("Ana", "ana@example.com", "pw").await?;
    let bo = app.signup("Bo", "bo@example.com", "pw").await?;

    app.post("/api/watchlist", Some(&ana), json!({ "id": 550 })).await?;
    app.post("/api/watchlist", Some(&bo), json!({ "id": 603 })).await?;

    // Bo removing Ana's id touches only Bo's list
    let res = app.delete("/api/watchlist/550", Some(&bo)).await?;
    assert_eq!(ids(&res.body), vec![603]);

    let res = app.get("/api/watchlist", Some(&ana)).await?;
    assert_eq!(ids(&res.body), vec![550]);
    Ok(())
}

#[tokio::test]
async fn invalid_movies_are_rejected() -> Result<()> {
    let app = TestApp::offline().await?;
    let token = app.signup("Ana", "ana@example.com", "pw").await?;

    for body in [
        json!({ "title": "No id" }),
        json!({ "id": "550" }),
        json!({ "id": 1.5 }),
        json!([550]),
    ] {
        let res = app.post("/api/watchlist", Some(&token), body).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "body: {}", res.body);
    }

    let res = app.delete("/api/watchlist/abc", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.get("/api/watchlist", Some(&token)).await?;
    assert_eq!(res.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn token_for_vanished_user_cannot_write() -> Result<()> {
    let app = TestApp::offline().await?;
    let token = app.state.auth.tokens().issue("kod000000000000", "ghost@example.com")?;

    let res = app.post("/api/watchlist", Some(&token), json!({ "id": 550 })).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.get("/api/watchlist", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    assert!(app.state.storage.list_watchlist("kod000000000000").await?.is_empty());
    Ok(())
}
