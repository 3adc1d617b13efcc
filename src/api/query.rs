//
//  atlassian-client
//  api/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query string assembly for service endpoints.
//!
//! Parameters are emitted in the order they were added. Optional inputs that
//! are absent (or empty) leave their key out entirely instead of sending an
//! empty value, and multi-value parameters are comma-joined in the order the
//! caller supplied them, without sorting or de-duplication.
//!
//! ```rust
//! use atlassian_client::api::Query;
//!
//! let query = Query::new()
//!     .param("start", 0)
//!     .param("limit", 25)
//!     .list("expand", &["a", "b"])
//!     .list::<&str>("location", &[]);
//!
//! assert_eq!(query.encode(), "start=0&limit=25&expand=a,b");
//! assert_eq!(
//!     query.append_to("wiki/rest/api/content/42/child/comment"),
//!     "wiki/rest/api/content/42/child/comment?start=0&limit=25&expand=a,b"
//! );
//! ```

use std::fmt::Display;

use url::form_urlencoded;

/// An ordered set of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter that is always sent, such as pagination bounds.
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.pairs.push((key.to_string(), encode(&value.to_string())));
        self
    }

    /// Adds a parameter only when a value is present.
    pub fn opt(self, key: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Adds a string parameter only when it is non-empty.
    pub fn text(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.param(key, value)
        }
    }

    /// Adds a numeric parameter only when it is non-zero.
    pub fn nonzero(self, key: &str, value: i64) -> Self {
        if value == 0 {
            self
        } else {
            self.param(key, value)
        }
    }

    /// Adds a comma-joined multi-value parameter, skipping empty slices.
    ///
    /// Each element is encoded on its own so the separating commas stay
    /// literal in the resulting query string.
    pub fn list<S: AsRef<str>>(mut self, key: &str, values: &[S]) -> Self {
        if values.is_empty() {
            return self;
        }

        let joined = values
            .iter()
            .map(|value| encode(value.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.pairs.push((key.to_string(), joined));
        self
    }

    /// Same as [`list`](Self::list) for numeric identifiers.
    pub fn ids<N: Display>(self, key: &str, values: &[N]) -> Self {
        let values: Vec<String> = values.iter().map(ToString::to_string).collect();
        self.list(key, &values)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Looks up the encoded value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// The encoded query string, without the leading `?`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), value))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the query to `path`, leaving the path untouched when empty.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.encode())
        }
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
