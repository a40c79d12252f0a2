//! Wiremock stubs for the GitHub endpoints a status run reads.

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the webhook receiver mounted on the same mock server.
pub const WEBHOOK_PATH: &str = "/hooks/receiver";

fn pulls_path(repository: &str, number: u64) -> String {
    format!("/api/v3/repos/{repository}/pulls/{number}")
}

fn get(route: String, body: &Value) -> Mock {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

/// JSON body of an open pull request with one label.
pub fn pull_request_body(number: u64, title: &str) -> Value {
    json!({
        "number": number,
        "title": title,
        "state": "open",
        "draft": false,
        "merged": false,
        "merged_at": null,
        "labels": [{ "name": "backend" }]
    })
}

/// Mounts the single pull request, its commits, and its (empty) review
/// requests.
pub async fn mount_pull_request(server: &MockServer, repository: &str, number: u64, title: &str) {
    let base = pulls_path(repository, number);
    get(base.clone(), &pull_request_body(number, title))
        .mount(server)
        .await;
    get(format!("{base}/commits"), &json!([]))
        .mount(server)
        .await;
    get(
        format!("{base}/requested_reviewers"),
        &json!({ "users": [], "teams": [] }),
    )
    .mount(server)
    .await;
}

/// Mounts the review list for a pull request.
pub async fn mount_reviews(server: &MockServer, repository: &str, number: u64, reviews: &Value) {
    get(format!("{}/reviews", pulls_path(repository, number)), reviews)
        .mount(server)
        .await;
}

/// A submitted approval by user `id`.
pub fn approval(id: u64) -> Value {
    json!({
        "id": id,
        "user": { "id": id, "login": format!("reviewer{id}"), "type": "User" },
        "state": "APPROVED",
        "submitted_at": "2025-03-01T09:00:00Z"
    })
}

/// Mounts an open pull request listing for `repository`.
pub async fn mount_pull_request_listing(server: &MockServer, repository: &str, pulls: &Value) {
    get(format!("/api/v3/repos/{repository}/pulls"), pulls)
        .mount(server)
        .await;
}

/// Mounts a 401 response for the pull request endpoint.
pub async fn mount_rejected_token(server: &MockServer, repository: &str, number: u64) {
    Mock::given(method("GET"))
        .and(path(pulls_path(repository, number)))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(server)
        .await;
}

/// Mounts the webhook receiver answering `204 No Content`.
pub async fn mount_webhook_receiver(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

/// JSON bodies of every request the webhook receiver got.
pub async fn webhook_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == WEBHOOK_PATH)
        .filter_map(|request| serde_json::from_slice(&request.body).ok())
        .collect()
}
