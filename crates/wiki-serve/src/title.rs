//! Page title extraction from request paths.

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::error::WikiError;
use crate::page::Title;

/// Full-path pattern for every page-addressing route. Group 2 is the title.
const TITLE_PATH_PATTERN: &str = r"^/(edit|save|view)/([A-Za-z0-9]+)$";

/// Extracts and validates page titles from request paths.
///
/// The pattern is compiled once at startup and shared read-only through
/// [`AppState`](crate::AppState).
#[derive(Debug, Clone)]
pub struct TitleValidator {
    pattern: Regex,
}

impl TitleValidator {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(TITLE_PATH_PATTERN).expect("title path regex should compile"),
        }
    }

    /// Return the title addressed by `path`, or [`WikiError::InvalidTitle`]
    /// if the whole path does not match.
    ///
    /// The path is percent-decoded first, so `/view/%41` addresses `A`.
    /// Paths that do not decode to UTF-8 are rejected.
    pub fn extract_title(&self, path: &str) -> Result<Title, WikiError> {
        let invalid = || WikiError::InvalidTitle(path.to_string());
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map_err(|_| invalid())?;
        let captures = self.pattern.captures(&decoded).ok_or_else(invalid)?;
        Ok(Title::from_validated(&captures[2]))
    }
}

impl Default for TitleValidator {
    fn default() -> Self {
        Self::new()
    }
}
