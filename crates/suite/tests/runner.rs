//! Scenario catalogue and runner against a fake fixture service

mod common;

use serde_json::json;
use wiremock::MockServer;

use restprobe_suite::runner::{CaseStatus, TestSuiteResult};
use restprobe_suite::scenario::catalogue;
use restprobe_suite::{Error, Tag, TestRunner};

use common::*;

fn status_of(results: &TestSuiteResult, name: &str) -> CaseStatus {
    results
        .results
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no result for {name}"))
        .status
}

#[tokio::test]
async fn every_case_passes_against_healthy_service() {
    let server = healthy_service().await;
    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::new(context(&server, dir.path()));

    let results = runner.run_all().await.unwrap();
    let failures: Vec<_> = results
        .results
        .iter()
        .filter(|r| !r.success())
        .map(|r| format!("{}: {:?}", r.name, r.error))
        .collect();
    assert!(failures.is_empty(), "unexpected failures: {failures:#?}");
    assert_eq!(results.total, catalogue().len());
    assert_eq!(results.skipped, 0);
}

#[tokio::test]
async fn results_are_written_as_json() {
    let server = healthy_service().await;
    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::new(context(&server, dir.path()));

    let results = runner.run_tagged(Tag::Negative).await.unwrap();
    assert_eq!(results.total, 8);
    assert_eq!(results.passed, 8);

    let path = runner.write_results(&results).unwrap();
    assert_eq!(path, dir.path().join("test-results.json"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["total"], 8);
    assert_eq!(written["failed"], 0);
    assert!(written["results"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["status"] == "passed"));
}

#[tokio::test]
async fn unknown_case_name_is_configuration_error() {
    let server = healthy_service().await;
    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::new(context(&server, dir.path()));

    let err = runner.run_test("test_does_not_exist[Samantha]").await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn duplicate_comments_fail_only_the_checks_that_see_them() {
    let server = MockServer::start().await;
    mount_users_and_posts(&server).await;
    mount_comments(&server, 21, comments_for(21)).await;
    mount_comments(
        &server,
        22,
        json!([
            comment(220, 22, "a@example.com"),
            comment(220, 22, "a@example.com"),
            comment(221, 22, "b@example.com"),
            comment(222, 22, "c@example.com"),
            comment(223, 22, "d@example.com"),
            comment(224, 22, "e@example.com"),
        ]),
    )
    .await;
    mount_comments_fallback(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::new(context(&server, dir.path()));
    let results = runner.run_all().await.unwrap();

    assert_eq!(status_of(&results, "test_validate_comment_structure[Samantha]"), CaseStatus::Failed);
    assert_eq!(status_of(&results, "test_no_duplicate_comments[Samantha]"), CaseStatus::Failed);
    assert_eq!(status_of(&results, "test_user_posts_comments_end_to_end[Samantha]"), CaseStatus::Failed);
    assert_eq!(status_of(&results, "test_validate_comment_values[Samantha]"), CaseStatus::Passed);
    assert_eq!(status_of(&results, "test_get_comments_for_invalid_post_id[abc]"), CaseStatus::Passed);
    assert_eq!(results.failed, 3);

    let structure = results
        .results
        .iter()
        .find(|r| r.name == "test_validate_comment_structure[Samantha]")
        .unwrap();
    assert!(structure.error.as_deref().unwrap().contains("Duplicate comment ID found: 220"));
}

#[tokio::test]
async fn bad_email_and_mismatched_post_are_caught() {
    let server = MockServer::start().await;
    mount_users_and_posts(&server).await;
    mount_comments(&server, 21, comments_for(21)).await;
    mount_comments(
        &server,
        22,
        json!([comment(230, 22, "not-an-email"), comment(231, 99, "ok@example.com")]),
    )
    .await;
    mount_comments_fallback(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::new(context(&server, dir.path()));

    let email = runner
        .run_test("test_validate_email_format_in_comments[Samantha]")
        .await
        .unwrap();
    assert_eq!(email.status, CaseStatus::Failed);
    assert!(email.error.unwrap().contains("Invalid email format: not-an-email"));

    let values = runner
        .run_test("test_validate_comment_values[Samantha]")
        .await
        .unwrap();
    assert_eq!(values.status, CaseStatus::Failed);
    assert!(values.error.unwrap().contains("postId mismatch in comment 231"));
}

#[tokio::test]
async fn email_check_skips_post_without_comments() {
    let server = MockServer::start().await;
    mount_users_and_posts(&server).await;
    mount_comments_fallback(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::new(context(&server, dir.path()));

    let result = runner
        .run_test("test_validate_email_format_in_comments[Samantha]")
        .await
        .unwrap();
    assert_eq!(result.status, CaseStatus::Skipped);
    assert!(result.success());
    assert!(result.error.unwrap().contains("No comments returned for post 21"));

    let result = runner
        .run_test("test_get_comments_for_valid_posts[Samantha]")
        .await
        .unwrap();
    assert_eq!(result.status, CaseStatus::Failed);
}

#[tokio::test]
async fn server_errors_are_flagged() {
    let server = MockServer::start().await;
    mount_users_and_posts(&server).await;
    mount_comments_status(&server, 21, 503).await;
    mount_comments(&server, 22, comments_for(22)).await;

    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::new(context(&server, dir.path()));

    let result = runner
        .run_test("test_unexpected_server_errors[Samantha]")
        .await
        .unwrap();
    assert_eq!(result.status, CaseStatus::Failed);
    assert!(result.error.unwrap().contains("Unexpected server error 503 for post 21"));

    let result = runner
        .run_test("test_unexpected_status_codes[Samantha]")
        .await
        .unwrap();
    assert_eq!(result.status, CaseStatus::Failed);
}

#[tokio::test]
async fn too_few_comments_fail_large_response_check() {
    let server = MockServer::start().await;
    mount_users_and_posts(&server).await;
    mount_comments(&server, 21, json!([comment(1, 21, "a@example.com")])).await;
    mount_comments(&server, 22, json!([comment(2, 22, "b@example.com")])).await;

    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::new(context(&server, dir.path()));

    let result = runner
        .run_test("test_large_api_response[Samantha]")
        .await
        .unwrap();
    assert_eq!(result.status, CaseStatus::Failed);
    assert!(result.error.unwrap().contains("but got only 2"));
}

#[tokio::test]
async fn unreachable_service_fails_cases_without_aborting() {
    let dir = tempfile::tempdir().unwrap();
    let config = restprobe_suite::SuiteConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        output_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let runner = TestRunner::new(restprobe_suite::SuiteContext::without_logging(config).unwrap());

    let results = runner.run_tagged(Tag::Smoke).await.unwrap();
    assert!(results.total > 0);
    assert_eq!(results.failed, results.total);
    assert!(results
        .results
        .iter()
        .all(|r| r.error.as_deref().unwrap().starts_with("Transport error")));
}

#[tokio::test]
async fn runner_exposes_its_context() {
    let server = healthy_service().await;
    let dir = tempfile::tempdir().unwrap();
    let runner = TestRunner::new(context(&server, dir.path()));

    assert_eq!(runner.context().config().base_url, server.uri());
    assert_eq!(runner.context().config().output_dir, dir.path());
    // Logger setup was left to the caller, so there is no log file
    assert!(runner.context().log_path().is_none());
}
