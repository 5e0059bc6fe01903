//! Structured user filter

use std::fmt;

use serde::{Deserialize, Serialize};

use restprobe_common::User;

/// Criteria for picking a user out of the `/users` collection.
///
/// Every field that is set must match (case-insensitive equality). An empty
/// filter matches the first user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Matches `company.name`
    pub company: Option<String>,
    /// Matches `address.city`
    pub address_city: Option<String>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self::new().username(username)
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    pub fn website(mut self, value: impl Into<String>) -> Self {
        self.website = Some(value.into());
        self
    }

    pub fn company(mut self, value: impl Into<String>) -> Self {
        self.company = Some(value.into());
        self
    }

    pub fn address_city(mut self, value: impl Into<String>) -> Self {
        self.address_city = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }

    /// The set criteria as (label, expected value) pairs
    fn criteria(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("username", &self.username),
            ("email", &self.email),
            ("phone", &self.phone),
            ("website", &self.website),
            ("company", &self.company),
            ("address_city", &self.address_city),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }

    pub fn matches(&self, user: &User) -> bool {
        self.criteria()
            .into_iter()
            .all(|(label, expected)| field(user, label).to_lowercase() == expected.to_lowercase())
    }
}

fn field<'a>(user: &'a User, label: &str) -> &'a str {
    match label {
        "name" => &user.name,
        "username" => &user.username,
        "email" => &user.email,
        "phone" => &user.phone,
        "website" => &user.website,
        "company" => &user.company.name,
        "address_city" => &user.address.city,
        _ => "",
    }
}

impl fmt::Display for UserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let criteria = self.criteria();
        if criteria.is_empty() {
            return f.write_str("{}");
        }
        let parts: Vec<String> = criteria
            .into_iter()
            .map(|(label, value)| format!("{label}={value:?}"))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
