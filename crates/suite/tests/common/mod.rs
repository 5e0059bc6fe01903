//! In-process stand-in for the fixture service
#![allow(dead_code)]

use std::path::Path;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use restprobe_suite::{SuiteConfig, SuiteContext};

pub const SAMANTHA_ID: i64 = 3;
pub const SAMANTHA_POSTS: [i64; 2] = [21, 22];

pub fn users() -> Value {
    json!([
        {
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": { "street": "Kulas Light", "suite": "Apt. 556", "city": "Gwenborough",
                         "zipcode": "92998-3874", "geo": { "lat": "-37.3159", "lng": "81.1496" } },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered client-server neural-net",
                         "bs": "harness real-time e-markets" }
        },
        {
            "id": 3,
            "name": "Clementine Bauch",
            "username": "Samantha",
            "email": "Nathan@yesenia.net",
            "address": { "street": "Douglas Extension", "suite": "Suite 847", "city": "McKenziehaven",
                         "zipcode": "59590-4157", "geo": { "lat": "-68.6102", "lng": "-47.0653" } },
            "phone": "1-463-123-4447",
            "website": "ramiro.info",
            "company": { "name": "Romaguera-Jacobson", "catchPhrase": "Face to face bifurcated interface",
                         "bs": "e-enable strategic applications" }
        }
    ])
}

pub fn posts_for(user_id: i64, ids: &[i64]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| {
                json!({
                    "userId": user_id,
                    "id": id,
                    "title": format!("post {id}"),
                    "body": "quia et suscipit suscipit recusandae consequuntur"
                })
            })
            .collect(),
    )
}

pub fn comment(id: i64, post_id: i64, email: &str) -> Value {
    json!({
        "postId": post_id,
        "id": id,
        "name": format!("comment {id}"),
        "email": email,
        "body": "laudantium enim quasi est quidem magnam voluptate ipsam eos"
    })
}

/// Six well-formed comments per post, ids derived from the post id
pub fn comments_for(post_id: i64) -> Value {
    Value::Array(
        (0..6)
            .map(|n| comment(post_id * 10 + n, post_id, &format!("reader{n}@example.com")))
            .collect(),
    )
}

pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_comments(server: &MockServer, post_id: i64, body: Value) {
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", post_id.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_comments_status(server: &MockServer, post_id: i64, status: u16) {
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", post_id.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Any other postId gets 200 and an empty list, like the real service
pub async fn mount_comments_fallback(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(10)
        .mount(server)
        .await;
}

/// Users, Samantha's posts (Bret has none), and comments for every post
pub async fn healthy_service() -> MockServer {
    let server = MockServer::start().await;
    mount_users_and_posts(&server).await;
    for post_id in SAMANTHA_POSTS {
        mount_comments(&server, post_id, comments_for(post_id)).await;
    }
    mount_comments_fallback(&server).await;
    server
}

pub async fn mount_users_and_posts(server: &MockServer) {
    mount_json(server, "/users", users()).await;
    mount_json(
        server,
        &format!("/users/{SAMANTHA_ID}/posts"),
        posts_for(SAMANTHA_ID, &SAMANTHA_POSTS),
    )
    .await;
    mount_json(server, "/users/1/posts", json!([])).await;
}

pub fn config(server: &MockServer, output_dir: &Path) -> SuiteConfig {
    SuiteConfig {
        base_url: server.uri(),
        output_dir: output_dir.to_path_buf(),
        log_dir: output_dir.join("logs"),
        ..SuiteConfig::default()
    }
}

pub fn context(server: &MockServer, output_dir: &Path) -> SuiteContext {
    SuiteContext::without_logging(config(server, output_dir)).expect("context builds")
}
