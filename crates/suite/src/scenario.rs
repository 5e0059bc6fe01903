//! Scenario catalogue
//!
//! A [`Scenario`] is one test body; a [`TestCase`] binds a scenario to its
//! parameters from [`crate::fixtures`] and gives it a unique name.
//!
//! ```text
//! Scenario            tags
//! ───────────────────────────────────────────────────────────────
//! user_posts          functional
//! user_with_posts     smoke functional regression
//! comments_for_valid  smoke functional regression
//! end_to_end          smoke functional regression
//! invalid_post_id     negative regression
//! status_codes        negative regression
//! server_errors       negative regression
//! large_response      performance regression
//! response_time       smoke performance regression
//! comment_structure   smoke validation regression
//! comment_values      smoke validation regression
//! missing_fields      validation regression
//! extra_fields        validation regression
//! email_format        validation regression
//! no_duplicates       validation regression
//! idempotent          validation regression
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use restprobe_common::validation::{
    check_comment_set, check_email, check_no_duplicates, check_post_ownership, check_unique_ids,
    check_values, missing_fields,
};
use restprobe_common::HttpStatus;

use crate::context::SuiteContext;
use crate::endpoint::{Endpoint, PathParams};
use crate::error::{Error, Result};
use crate::filter::UserFilter;
use crate::fixtures::{InvalidPostId, INVALID_POST_IDS, VALID_USERS};

/// Marker used to select cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Smoke,
    Functional,
    Regression,
    Negative,
    Performance,
    Validation,
}

/// How a case ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Skipped(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    UserPosts { username: &'static str },
    UserWithPosts { username: &'static str },
    CommentsForValidPosts { username: &'static str },
    EndToEnd { username: &'static str },
    CommentsForInvalidPostId { post_id: InvalidPostId },
    UnexpectedStatusCodes { username: &'static str },
    UnexpectedServerErrors { username: &'static str },
    LargeApiResponse { username: &'static str },
    ApiResponseTime { username: &'static str },
    CommentStructure { username: &'static str },
    CommentValues { username: &'static str },
    MissingRequiredFields { username: &'static str },
    UnexpectedExtraFields { username: &'static str },
    EmailFormat { username: &'static str },
    NoDuplicateComments { username: &'static str },
    CommentsIdempotent { username: &'static str },
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::Assertion(message()))
    }
}

impl Scenario {
    /// Every scenario parametrized by a username
    pub fn per_user(username: &'static str) -> Vec<Scenario> {
        vec![
            Scenario::UserPosts { username },
            Scenario::UserWithPosts { username },
            Scenario::CommentsForValidPosts { username },
            Scenario::EndToEnd { username },
            Scenario::UnexpectedStatusCodes { username },
            Scenario::UnexpectedServerErrors { username },
            Scenario::LargeApiResponse { username },
            Scenario::ApiResponseTime { username },
            Scenario::CommentStructure { username },
            Scenario::CommentValues { username },
            Scenario::MissingRequiredFields { username },
            Scenario::UnexpectedExtraFields { username },
            Scenario::EmailFormat { username },
            Scenario::NoDuplicateComments { username },
            Scenario::CommentsIdempotent { username },
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::UserPosts { .. } => "test_get_user_posts",
            Scenario::UserWithPosts { .. } => "test_get_user_with_posts",
            Scenario::CommentsForValidPosts { .. } => "test_get_comments_for_valid_posts",
            Scenario::EndToEnd { .. } => "test_user_posts_comments_end_to_end",
            Scenario::CommentsForInvalidPostId { .. } => "test_get_comments_for_invalid_post_id",
            Scenario::UnexpectedStatusCodes { .. } => "test_unexpected_status_codes",
            Scenario::UnexpectedServerErrors { .. } => "test_unexpected_server_errors",
            Scenario::LargeApiResponse { .. } => "test_large_api_response",
            Scenario::ApiResponseTime { .. } => "test_api_response_time",
            Scenario::CommentStructure { .. } => "test_validate_comment_structure",
            Scenario::CommentValues { .. } => "test_validate_comment_values",
            Scenario::MissingRequiredFields { .. } => "test_comments_missing_required_fields",
            Scenario::UnexpectedExtraFields { .. } => "test_comments_unexpected_extra_fields",
            Scenario::EmailFormat { .. } => "test_validate_email_format_in_comments",
            Scenario::NoDuplicateComments { .. } => "test_no_duplicate_comments",
            Scenario::CommentsIdempotent { .. } => "test_comments_are_idempotent",
        }
    }

    pub fn tags(&self) -> &'static [Tag] {
        use Tag::*;
        match self {
            Scenario::UserPosts { .. } => &[Functional],
            Scenario::UserWithPosts { .. }
            | Scenario::CommentsForValidPosts { .. }
            | Scenario::EndToEnd { .. } => &[Smoke, Functional, Regression],
            Scenario::CommentsForInvalidPostId { .. }
            | Scenario::UnexpectedStatusCodes { .. }
            | Scenario::UnexpectedServerErrors { .. } => &[Negative, Regression],
            Scenario::LargeApiResponse { .. } => &[Performance, Regression],
            Scenario::ApiResponseTime { .. } => &[Smoke, Performance, Regression],
            Scenario::CommentStructure { .. } | Scenario::CommentValues { .. } => {
                &[Smoke, Validation, Regression]
            }
            Scenario::MissingRequiredFields { .. }
            | Scenario::UnexpectedExtraFields { .. }
            | Scenario::EmailFormat { .. }
            | Scenario::NoDuplicateComments { .. }
            | Scenario::CommentsIdempotent { .. } => &[Validation, Regression],
        }
    }

    /// Parameter shown in the case name
    fn parameter(&self) -> String {
        match self {
            Scenario::CommentsForInvalidPostId { post_id } => post_id.to_string(),
            Scenario::UserPosts { username }
            | Scenario::UserWithPosts { username }
            | Scenario::CommentsForValidPosts { username }
            | Scenario::EndToEnd { username }
            | Scenario::UnexpectedStatusCodes { username }
            | Scenario::UnexpectedServerErrors { username }
            | Scenario::LargeApiResponse { username }
            | Scenario::ApiResponseTime { username }
            | Scenario::CommentStructure { username }
            | Scenario::CommentValues { username }
            | Scenario::MissingRequiredFields { username }
            | Scenario::UnexpectedExtraFields { username }
            | Scenario::EmailFormat { username }
            | Scenario::NoDuplicateComments { username }
            | Scenario::CommentsIdempotent { username } => username.to_string(),
        }
    }

    /// Execute the scenario. Calls are issued strictly one after another.
    pub async fn run(&self, ctx: &SuiteContext) -> Result<Outcome> {
        let helper = ctx.helper();
        let ok = HttpStatus::Ok;

        match *self {
            Scenario::UserPosts { username } => {
                let user = helper.get_user(ok, &UserFilter::by_username(username)).await?;
                let posts = helper.get_user_posts(user.id, ok).await?;
                ensure(!posts.is_empty(), || format!("User {username} has no posts"))?;
                let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
                info!("User {} has posts: {:?}", username, ids);
            }

            Scenario::UserWithPosts { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                info!("User {} fetched with {} posts", data.user.username, data.posts.len());
            }

            Scenario::CommentsForValidPosts { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    let comments = helper.require_comments(post.id, ok).await?;
                    info!("Post {} returned {} comments.", post.id, comments.len());
                }
            }

            Scenario::EndToEnd { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    let comments = helper.require_comments(post.id, ok).await?;
                    check_comment_set(&comments, post.id)?;
                }
                info!(
                    "User {} passed the user -> posts -> comments chain for {} posts",
                    username,
                    data.posts.len()
                );
            }

            Scenario::CommentsForInvalidPostId { post_id } => {
                let comments = helper.get_post_comments(post_id, ok).await?;
                ensure(comments.is_empty(), || {
                    format!(
                        "Expected empty list for postId {:?}, but got {} comments",
                        post_id.to_string(),
                        comments.len()
                    )
                })?;
                info!("Invalid postId '{}' correctly returned an empty list.", post_id);
            }

            Scenario::UnexpectedStatusCodes { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    let params = PathParams::new().with("post_id", post.id);
                    let response = helper
                        .dispatcher()
                        .dispatch(Endpoint::GetPostComments, &params, None)
                        .await?;
                    ensure(response.is(ok), || {
                        format!("Unexpected status code {} for post {}", response.status, post.id)
                    })?;
                    info!("Post {} returned expected status code 200.", post.id);
                }
            }

            Scenario::UnexpectedServerErrors { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    let params = PathParams::new().with("post_id", post.id);
                    let response = helper
                        .dispatcher()
                        .dispatch(Endpoint::GetPostComments, &params, None)
                        .await?;
                    let trouble = HttpStatus::SERVER_TROUBLE.iter().any(|s| response.is(*s));
                    ensure(!trouble, || {
                        format!("Unexpected server error {} for post {}", response.status, post.id)
                    })?;
                    info!("Post {} did not trigger any unexpected server errors.", post.id);
                }
            }

            Scenario::LargeApiResponse { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                let mut total = 0;
                for post in &data.posts {
                    total += helper.get_post_comments(post.id, ok).await?.len();
                }
                let minimum = ctx.config().large_response_min_comments;
                ensure(total > minimum, || {
                    format!("Expected more than {minimum} comments in large response, but got only {total}")
                })?;
                info!("Total comments retrieved across posts: {}", total);
            }

            Scenario::ApiResponseTime { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                let budget = ctx.config().response_time_budget();
                for post in &data.posts {
                    let started = Instant::now();
                    helper.get_post_comments(post.id, ok).await?;
                    let elapsed = started.elapsed();
                    ensure(elapsed < budget, || {
                        format!(
                            "API response time too slow for post {}: {}ms (budget {}ms)",
                            post.id,
                            elapsed.as_millis(),
                            budget.as_millis()
                        )
                    })?;
                    info!("API response time for post {}: {}ms", post.id, elapsed.as_millis());
                }
            }

            Scenario::CommentStructure { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    // Field presence and types are checked while the helper parses
                    let comments = helper.require_comments(post.id, ok).await?;
                    for comment in &comments {
                        check_post_ownership(comment, post.id)?;
                    }
                    check_unique_ids(&comments)?;
                    info!("All comments for post {} passed structure validation.", post.id);
                }
            }

            Scenario::CommentValues { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    let comments = helper.require_comments(post.id, ok).await?;
                    for comment in &comments {
                        check_values(comment, post.id)?;
                    }
                    info!("All comments for post {} passed value validation.", post.id);
                }
            }

            Scenario::MissingRequiredFields { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    // Raw call: the typed helper would stop at the first missing field
                    let params = PathParams::new().with("post_id", post.id);
                    let response = helper
                        .dispatcher()
                        .dispatch(Endpoint::GetPostComments, &params, None)
                        .await?;
                    ensure(response.is(ok), || {
                        format!("Failed to fetch comments, Status: {}", response.status)
                    })?;
                    let raw: Vec<Value> = response.json()?;
                    ensure(!raw.is_empty(), || {
                        format!("Expected comments for post {}, but got an empty response.", post.id)
                    })?;
                    for comment in &raw {
                        let missing = missing_fields(comment);
                        ensure(missing.is_empty(), || {
                            format!("Comment {comment} is missing required fields: {missing:?}")
                        })?;
                    }
                    info!("All comments for post {} contain required fields.", post.id);
                }
            }

            Scenario::UnexpectedExtraFields { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    let comments = helper.require_comments(post.id, ok).await?;
                    for comment in &comments {
                        let extra = comment.extra_fields();
                        if !extra.is_empty() {
                            warn!("Comment {} contains unexpected fields: {:?}", comment.id, extra);
                        }
                    }
                    info!("Checked for unexpected fields in comments for post {}.", post.id);
                }
            }

            Scenario::EmailFormat { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    let comments = helper.get_post_comments(post.id, ok).await?;
                    if comments.is_empty() {
                        return Ok(Outcome::Skipped(format!(
                            "No comments returned for post {}",
                            post.id
                        )));
                    }
                    for comment in &comments {
                        check_email(comment)?;
                        check_values(comment, post.id)?;
                    }
                    info!("All emails in comments for post {} are valid.", post.id);
                }
            }

            Scenario::NoDuplicateComments { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    let comments = helper.require_comments(post.id, ok).await?;
                    check_no_duplicates(&comments)?;
                    info!("All comments for post {} are unique.", post.id);
                }
            }

            Scenario::CommentsIdempotent { username } => {
                let data = helper
                    .get_user_with_posts(ok, &UserFilter::by_username(username))
                    .await?;
                for post in &data.posts {
                    let first: BTreeSet<i64> = helper
                        .get_post_comments(post.id, ok)
                        .await?
                        .iter()
                        .map(|c| c.id)
                        .collect();
                    let second: BTreeSet<i64> = helper
                        .get_post_comments(post.id, ok)
                        .await?
                        .iter()
                        .map(|c| c.id)
                        .collect();
                    ensure(first == second, || {
                        format!(
                            "Comment ids for post {} changed between calls: {:?} vs {:?}",
                            post.id, first, second
                        )
                    })?;
                }
                info!("Comment ids were stable for all {} posts", data.posts.len());
            }
        }

        Ok(Outcome::Passed)
    }
}

/// A scenario bound to its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Unique name, e.g. `test_no_duplicate_comments[Samantha]`
    pub name: String,
    pub description: &'static str,
    pub scenario: Scenario,
}

impl TestCase {
    pub fn new(description: &'static str, scenario: Scenario) -> Self {
        Self {
            name: format!("{}[{}]", scenario.name(), scenario.parameter()),
            description,
            scenario,
        }
    }

    pub fn tags(&self) -> &'static [Tag] {
        self.scenario.tags()
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags().contains(&tag)
    }
}

/// Every case, expanded over the fixture parameters
pub fn catalogue() -> Vec<TestCase> {
    let mut cases = Vec::new();

    for &(description, username) in VALID_USERS {
        for scenario in Scenario::per_user(username) {
            cases.push(TestCase::new(description, scenario));
        }
    }

    for &(description, post_id) in INVALID_POST_IDS {
        cases.push(TestCase::new(
            description,
            Scenario::CommentsForInvalidPostId { post_id },
        ));
    }

    cases
}

/// Cases carrying `tag`
pub fn filter_by_tag(cases: &[TestCase], tag: Tag) -> Vec<TestCase> {
    cases.iter().filter(|c| c.has_tag(tag)).cloned().collect()
}
