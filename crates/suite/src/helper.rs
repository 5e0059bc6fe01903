//! Domain helper - user, post and comment lookups built on the dispatcher

use std::fmt::Display;

use serde_json::Value;
use tracing::{info, warn};

use restprobe_common::validation::check_structure;
use restprobe_common::{Comment, HttpStatus, Post, User, UserWithPosts};

use crate::dispatcher::{ApiResponse, Dispatcher};
use crate::endpoint::{Endpoint, PathParams};
use crate::error::{Error, Result};
use crate::filter::UserFilter;

pub struct Helper {
    dispatcher: Dispatcher,
}

impl Helper {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Raw access for scenarios that inspect status codes themselves
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn expect_status(response: &ApiResponse, expected: HttpStatus) -> Result<()> {
        if response.status != expected.code() {
            return Err(Error::UnexpectedStatus {
                endpoint: response.endpoint,
                expected: expected.code(),
                actual: response.status,
            });
        }
        Ok(())
    }

    /// Fetch the whole user collection and return the first user matching
    /// every criterion of `filter`.
    ///
    /// The service has no server-side filtering, so this is always a single
    /// `GET /users`. No match is reported as [`Error::UserNotFound`].
    pub async fn get_user(&self, expected: HttpStatus, filter: &UserFilter) -> Result<User> {
        let response = self
            .dispatcher
            .dispatch(Endpoint::GetUsers, &PathParams::new(), None)
            .await?;
        Self::expect_status(&response, expected)?;

        let users: Vec<User> = response.json()?;
        match users.into_iter().find(|user| filter.matches(user)) {
            Some(user) => {
                info!("User found: {} (id {})", user.username, user.id);
                Ok(user)
            }
            None => {
                warn!("No user found matching criteria: {}", filter);
                Err(Error::UserNotFound(filter.to_string()))
            }
        }
    }

    /// Posts written by `user_id`. An empty list is returned as-is.
    pub async fn get_user_posts(&self, user_id: i64, expected: HttpStatus) -> Result<Vec<Post>> {
        let params = PathParams::new().with("user_id", user_id);
        let response = self
            .dispatcher
            .dispatch(Endpoint::GetUserPosts, &params, None)
            .await?;
        Self::expect_status(&response, expected)?;

        let posts: Vec<Post> = response.json()?;
        info!("User {} has {} posts.", user_id, posts.len());
        Ok(posts)
    }

    /// Comments for `post_id`, which is sent verbatim so invalid ids can be
    /// exercised. Every comment must carry the required structure; an empty
    /// list is returned as-is.
    pub async fn get_post_comments(
        &self,
        post_id: impl Display,
        expected: HttpStatus,
    ) -> Result<Vec<Comment>> {
        let post_id = post_id.to_string();
        let params = PathParams::new().with("post_id", &post_id);
        let response = self
            .dispatcher
            .dispatch(Endpoint::GetPostComments, &params, None)
            .await?;
        Self::expect_status(&response, expected)?;

        let raw: Vec<Value> = response.json()?;
        let comments = raw
            .into_iter()
            .map(|value| -> Result<Comment> {
                check_structure(&value)?;
                Ok(serde_json::from_value(value)?)
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Post {:?} has {} comments.", post_id, comments.len());
        Ok(comments)
    }

    /// Like [`Helper::get_post_comments`], but an empty result is a failure
    pub async fn require_comments(&self, post_id: i64, expected: HttpStatus) -> Result<Vec<Comment>> {
        let comments = self.get_post_comments(post_id, expected).await?;
        if comments.is_empty() {
            return Err(Error::EmptyResult(format!(
                "Expected comments for post {post_id}, but got an empty response."
            )));
        }
        Ok(comments)
    }

    /// Find a user and fetch their posts; both steps must produce results
    pub async fn get_user_with_posts(
        &self,
        expected: HttpStatus,
        filter: &UserFilter,
    ) -> Result<UserWithPosts> {
        let user = self.get_user(expected, filter).await?;
        let posts = self.get_user_posts(user.id, expected).await?;
        if posts.is_empty() {
            return Err(Error::EmptyResult(format!("User {} has no posts!", user.id)));
        }
        Ok(UserWithPosts { user, posts })
    }
}
