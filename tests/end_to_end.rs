mod common;

use serde_json::json;

#[tokio::test]
async fn test_shorten_redirect_stats_flow() {
    let (server, _repo) = common::create_test_server().await;

    let created = server
        .post("/api/shorten")
        .json(&json!({ "url": "github.com" }))
        .await;
    assert_eq!(created.status_code(), 201);

    let created = created.json::<serde_json::Value>();
    let code = created["short_code"].as_str().unwrap().to_string();
    assert_eq!(created["original_url"], "http://github.com");
    assert_eq!(created["short_url"], format!("{}/{code}", common::TEST_BASE_URL));

    let stats = server.get(&format!("/api/stats/{code}")).await;
    stats.assert_status_ok();
    assert_eq!(stats.json::<serde_json::Value>()["click_count"], 0);

    let redirect = server.get(&format!("/{code}")).await;
    assert_eq!(redirect.status_code(), 302);
    assert_eq!(redirect.header("location"), "http://github.com");

    let stats = server
        .get(&format!("/api/stats/{code}"))
        .await
        .json::<serde_json::Value>();
    assert_eq!(stats["click_count"], 1);
    assert_eq!(stats["original_url"], "http://github.com");
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let (server, repo) = common::create_app_server().await;
    common::create_test_mapping(&repo, "slash1", "https://example.com/landing").await;

    let stats = server.get("/api/stats/slash1/").await;
    stats.assert_status_ok();
    assert_eq!(stats.json::<serde_json::Value>()["short_code"], "slash1");

    let redirect = server.get("/slash1/").await;
    assert_eq!(redirect.status_code(), 302);
    assert_eq!(redirect.header("location"), "https://example.com/landing");

    server.get("/api/health/").await.assert_status_ok();
}

#[tokio::test]
async fn test_served_app_routes_match_router() {
    let (server, _repo) = common::create_app_server().await;

    let created = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://www.rust-lang.org" }))
        .await;
    assert_eq!(created.status_code(), 201);
    let code = created.json::<serde_json::Value>()["short_code"]
        .as_str()
        .unwrap()
        .to_string();

    assert_eq!(server.get(&format!("/{code}")).await.status_code(), 302);
    server.get("/").await.assert_status_ok();
    server.get("/api/nope").await.assert_status_not_found();
}
