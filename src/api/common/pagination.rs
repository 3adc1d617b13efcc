//
//  atlassian-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Atlassian API Responses
//!
//! Atlassian products disagree on how a page of results looks. The shapes
//! that are shared by more than one product live here; product specific
//! shapes (Admin's `links.next`, Confluence's `results`) live next to the
//! services that return them.
//!
//! | Type | Used by | Strategy |
//! |------|---------|----------|
//! | [`CursorPage`] | Bitbucket | URL-based (next/previous links) |
//! | [`OffsetPage`] | Jira Agile, Service Management | Offset-based (start index) |
//!
//! # Notes
//!
//! - Default values are used for optional fields to handle partial responses
//! - The `values` field is always present, even if empty

use serde::{Deserialize, Serialize};

/// Link-driven page, as returned by Bitbucket Cloud.
///
/// Iterate by following [`next_url()`](Self::next_url) until it is `None`.
///
/// ```rust
/// use atlassian_client::api::common::CursorPage;
///
/// let json = r#"{
///     "values": ["a", "b"],
///     "page": 1,
///     "pagelen": 2,
///     "size": 5,
///     "next": "https://api.bitbucket.org/2.0/repositories/acme?page=2"
/// }"#;
///
/// let page: CursorPage<String> = serde_json::from_str(json).unwrap();
/// assert!(page.has_next());
/// assert_eq!(page.values.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPage<T> {
    /// Items in the current page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,

    /// Requested page size.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages, when the server computed it.
    #[serde(default)]
    pub size: Option<u32>,

    /// Absolute URL of the next page.
    #[serde(default)]
    pub next: Option<String>,

    /// Absolute URL of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> CursorPage<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

/// Offset-driven page, as returned by Jira Agile and Jira Service Management.
///
/// Agile names its fields `startAt` / `maxResults` / `total` / `isLast`, while
/// Service Management uses `start` / `limit` / `size` / `isLastPage`. Both
/// spellings deserialize into the same struct.
///
/// ```rust
/// use atlassian_client::api::common::OffsetPage;
///
/// let agile = r#"{"startAt": 0, "maxResults": 2, "total": 3, "isLast": false, "values": [1, 2]}"#;
/// let page: OffsetPage<u32> = serde_json::from_str(agile).unwrap();
/// assert_eq!(page.next_start(), Some(2));
///
/// let sm = r#"{"start": 50, "limit": 50, "size": 1, "isLastPage": true, "values": [7]}"#;
/// let page: OffsetPage<u32> = serde_json::from_str(sm).unwrap();
/// assert_eq!(page.next_start(), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffsetPage<T> {
    /// Items in the current page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Offset of the first item in this page (0-indexed).
    #[serde(default, alias = "startAt")]
    pub start: u32,

    /// Page size that was requested.
    #[serde(default, alias = "maxResults")]
    pub limit: u32,

    /// Number of items in this page (Service Management) or in total (Agile).
    #[serde(default, alias = "total")]
    pub size: u32,

    /// Whether this is the final page.
    #[serde(default, rename = "isLastPage", alias = "isLast")]
    pub is_last_page: bool,
}

impl<T> OffsetPage<T> {
    pub fn has_next(&self) -> bool {
        !self.is_last_page
    }

    /// The `start` value to request the following page with.
    ///
    /// Computed from the current offset and the number of items returned,
    /// since neither product reports it directly. `None` on the last page,
    /// on an empty page (the offset would not advance) and on overflow.
    pub fn next_start(&self) -> Option<u32> {
        if !self.has_next() || self.values.is_empty() {
            return None;
        }
        let returned = u32::try_from(self.values.len()).ok()?;
        self.start.checked_add(returned)
    }
}
