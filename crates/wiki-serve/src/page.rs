//! The wiki page entity and its validated title.

use std::borrow::Cow;
use std::fmt;

use crate::error::WikiError;

/// A page title: a non-empty run of ASCII letters and digits.
///
/// Titles double as filesystem keys, so nothing outside `[A-Za-z0-9]` is
/// ever admitted. Matching is exact; no case folding or trimming happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    /// Validate a raw title string.
    pub fn parse(raw: &str) -> Result<Self, WikiError> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(WikiError::InvalidTitle(raw.to_string()))
        }
    }

    /// Wrap a string the caller has already matched against `[A-Za-z0-9]+`.
    pub(crate) fn from_validated(raw: &str) -> Self {
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the page's read-only view.
    pub fn view_path(&self) -> String {
        format!("/view/{}", self.0)
    }

    /// Path of the page's edit form.
    pub fn edit_path(&self) -> String {
        format!("/edit/{}", self.0)
    }

    /// Path the edit form posts to.
    pub fn save_path(&self) -> String {
        format!("/save/{}", self.0)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single wiki page. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    /// Raw page content, exactly as stored on disk.
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: Vec<u8>) -> Self {
        Self { title, body }
    }

    /// A page with no content, used when editing a page that does not exist yet.
    pub fn empty(title: Title) -> Self {
        Self {
            title,
            body: Vec::new(),
        }
    }

    /// Body decoded for display. Invalid UTF-8 is replaced, never rejected.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
