//! Cursor pagination.
//!
//! Every list call takes an optional limit and an optional cursor, and
//! returns a page of entries plus the cursor to continue from. Cursors are
//! produced by the store and are opaque to everything else: they are never
//! parsed, joined or edited, only handed back byte for byte. Paging is
//! forward only.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Opaque continuation token issued by a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a raw token. Empty tokens mean "no more entries" and yield `None`.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bounds for a single list call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of entries to return. The store picks a default (and
    /// enforces its own maximum) when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Where to resume from, as returned by the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

impl PageRequest {
    pub fn new(limit: Option<u32>, cursor: Option<Cursor>) -> Self {
        Self { limit, cursor }
    }

    /// Build from raw query parameters. An empty token is treated as absent.
    pub fn from_parts(limit: Option<u32>, token: Option<String>) -> Self {
        Self {
            limit,
            cursor: token.and_then(Cursor::new),
        }
    }

    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            cursor: None,
        }
    }

    /// The request for the page after `next`, keeping the same limit.
    pub fn resume(&self, next: Cursor) -> Self {
        Self {
            limit: self.limit,
            cursor: Some(next),
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub entries: Vec<T>,
    /// Present when more entries exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn new(entries: Vec<T>, next: Option<Cursor>) -> Self {
        Self { entries, next }
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            next: None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    /// Transform entries, dropping the ones `f` rejects. The cursor is kept
    /// untouched so that filtering never shortens the enumeration.
    pub fn filter_map<U>(self, f: impl FnMut(T) -> Option<U>) -> Page<U> {
        Page {
            entries: self.entries.into_iter().filter_map(f).collect(),
            next: self.next,
        }
    }
}

/// Follow cursors until the store reports the end, collecting every entry.
pub async fn collect_all<T, E, F, Fut>(first: PageRequest, mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut entries = Vec::new();
    let mut request = first;

    loop {
        let page = fetch(request.clone()).await?;
        entries.extend(page.entries);

        match page.next {
            Some(next) => request = request.resume(next),
            None => return Ok(entries),
        }
    }
}
