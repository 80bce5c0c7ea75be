use super::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn stub_create_pr_returns_canned_pr() {
    let stub = StubGitHub::new();
    let pr = stub.create_pr("org/repo", "feature", "main", "my change").await.unwrap();
    assert_eq!(pr.title, "my change");
    assert_eq!(pr.state, "open");
}

#[tokio::test]
async fn live_list_issues_parses_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/repo/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "number": 42, "title": "bug", "state": "open" }
        ])))
        .mount(&server)
        .await;

    let live = LiveGitHub::with_base_url(server.uri(), "token");
    let issues = live.list_issues("org/repo").await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].number, 42);
}

#[tokio::test]
async fn live_merge_pr_maps_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/org/repo/pulls/7/merge"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let live = LiveGitHub::with_base_url(server.uri(), "token");
    assert!(matches!(live.merge_pr("org/repo", 7).await, Err(CapabilityError::RateLimited)));
}
