//! Wiki-style `[Title]` link rewriting.

use regex::Regex;

/// A bracketed token, matched lazily so `[a] [b]` yields two links.
const LINK_PATTERN: &str = r"\[(.+?)\]";

const LINK_REPLACEMENT: &str = r#"<a href="/view/${1}">${1}</a>."#;

/// Rewrites every `[token]` into a link to `/view/token`.
///
/// This is a plain textual pass over already-rendered HTML. It does not
/// know about markup, so brackets anywhere in the document are rewritten,
/// including inside the edit form's textarea. The token is not checked
/// against the title pattern nor against existing pages.
#[derive(Debug, Clone)]
pub struct LinkRenderer {
    pattern: Regex,
}

impl LinkRenderer {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(LINK_PATTERN).expect("link regex should compile"),
        }
    }

    pub fn rewrite(&self, html: &str) -> String {
        self.pattern.replace_all(html, LINK_REPLACEMENT).into_owned()
    }
}

impl Default for LinkRenderer {
    fn default() -> Self {
        Self::new()
    }
}
