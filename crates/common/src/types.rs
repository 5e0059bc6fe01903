//! Core types for the fixture service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user record from `/users`.
///
/// Missing fields read as empty so one incomplete record does not spoil
/// the whole collection; it simply matches no filter on that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: Address,
    pub company: Company,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

/// A post record from `/users/{id}/posts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// A comment record from `/comments?postId={id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "postId")]
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,

    /// Fields the service sent that are not part of the comment structure
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Comment {
    /// Names of fields outside the required structure
    pub fn extra_fields(&self) -> Vec<&str> {
        self.extra.keys().map(String::as_str).collect()
    }

    /// Every required field, used for whole-record duplicate detection
    pub fn fingerprint(&self) -> (i64, i64, &str, &str, &str) {
        (self.id, self.post_id, &self.name, &self.email, &self.body)
    }
}

/// A user together with the posts fetched for them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithPosts {
    pub user: User,
    pub posts: Vec<Post>,
}

/// HTTP status codes the suite asserts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpStatus {
    Ok,
    Created,
    NoContent,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    TooManyRequests,
    InternalServerError,
    ServiceUnavailable,
}

impl HttpStatus {
    pub fn code(self) -> u16 {
        match self {
            HttpStatus::Ok => 200,
            HttpStatus::Created => 201,
            HttpStatus::NoContent => 204,
            HttpStatus::BadRequest => 400,
            HttpStatus::Unauthorized => 401,
            HttpStatus::Forbidden => 403,
            HttpStatus::NotFound => 404,
            HttpStatus::TooManyRequests => 429,
            HttpStatus::InternalServerError => 500,
            HttpStatus::ServiceUnavailable => 503,
        }
    }

    /// Statuses that signal the service itself misbehaved or throttled us
    pub const SERVER_TROUBLE: [HttpStatus; 3] = [
        HttpStatus::TooManyRequests,
        HttpStatus::InternalServerError,
        HttpStatus::ServiceUnavailable,
    ];
}

impl From<HttpStatus> for u16 {
    fn from(status: HttpStatus) -> Self {
        status.code()
    }
}

impl std::fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_fixture_json() {
        let json = r#"{
            "id": 3,
            "name": "Clementine Bauch",
            "username": "Samantha",
            "email": "Nathan@yesenia.net",
            "address": {
                "street": "Douglas Extension",
                "suite": "Suite 847",
                "city": "McKenziehaven",
                "zipcode": "59590-4157",
                "geo": { "lat": "-68.6102", "lng": "-47.0653" }
            },
            "phone": "1-463-123-4447",
            "website": "ramiro.info",
            "company": {
                "name": "Romaguera-Jacobson",
                "catchPhrase": "Face to face bifurcated interface",
                "bs": "e-enable strategic applications"
            }
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "Samantha");
        assert_eq!(user.address.city, "McKenziehaven");
        assert_eq!(user.company.catch_phrase, "Face to face bifurcated interface");
    }

    #[test]
    fn test_user_with_missing_fields_reads_as_empty() {
        let user: User = serde_json::from_str(r#"{"id": 1, "username": "Samantha", "email": "a@b.io"}"#).unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.username, "Samantha");
        assert_eq!(user.address.city, "");
    }

    #[test]
    fn test_comment_keeps_extra_fields() {
        let json = r#"{
            "postId": 21, "id": 101, "name": "a", "email": "a@b.io",
            "body": "text", "likes": 4
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.post_id, 21);
        assert_eq!(comment.extra_fields(), vec!["likes"]);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(HttpStatus::Ok.code(), 200);
        assert_eq!(u16::from(HttpStatus::TooManyRequests), 429);
        assert_eq!(HttpStatus::ServiceUnavailable.to_string(), "503");
    }
}
