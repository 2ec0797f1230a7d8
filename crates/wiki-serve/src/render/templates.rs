//! The `view` and `edit` page templates.
//!
//! Templates are built once at startup and shared read-only. The built-in
//! set is compiled with maud; a directory of Tera templates can be loaded
//! instead.

use std::path::Path;

use anyhow::Context;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use tera::Tera;

use crate::error::WikiError;
use crate::page::Page;

/// Inline CSS shared by every page, including error pages.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:#111;background:#fafafa;display:flex;justify-content:center;padding:1.5rem 1rem}
main{max-width:720px;width:100%}
h1{font-size:1.75rem;margin-bottom:.5rem}
a{color:#2455c3;text-decoration:none}
a:hover{text-decoration:underline}
.actions{margin-bottom:1rem;font-size:.9rem}
.page-body{white-space:pre-wrap;word-break:break-word}
textarea{width:100%;font-family:ui-monospace,Menlo,monospace;font-size:.95rem;padding:.5rem}
.save-button{margin-top:.5rem;padding:.35rem 1rem}
.error-page{text-align:center;padding-top:4rem}
.error-page p{margin:1rem 0}
"#;

/// Named templates a page can be rendered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    View,
    Edit,
}

impl Template {
    pub fn name(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Self::View => "view.html",
            Self::Edit => "edit.html",
        }
    }
}

/// A set of page templates.
///
/// Implementations produce the complete HTML document for a page. They are
/// injected into [`Renderer`](super::Renderer) so tests can substitute fakes.
pub trait PageTemplates: Send + Sync {
    fn render(&self, template: Template, page: &Page) -> Result<String, WikiError>;
}

/// Built-in templates compiled with maud. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaudTemplates;

impl PageTemplates for MaudTemplates {
    fn render(&self, template: Template, page: &Page) -> Result<String, WikiError> {
        let markup = match template {
            Template::View => view_page(page),
            Template::Edit => edit_page(page),
        };
        Ok(markup.into_string())
    }
}

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main { (content) }
            }
        }
    }
}

fn view_page(page: &Page) -> Markup {
    let title = page.title.as_str();
    layout(
        title,
        html! {
            h1 { (title) }
            p class="actions" {
                a href=(page.title.edit_path()) { "edit" }
            }
            div class="page-body" { (page.body_text()) }
        },
    )
}

fn edit_page(page: &Page) -> Markup {
    let title = page.title.as_str();
    layout(
        &format!("Editing {title}"),
        html! {
            h1 { "Editing " (title) }
            form action=(page.title.save_path()) method="POST" {
                div {
                    textarea name="body" rows="20" cols="80" { (page.body_text()) }
                }
                div {
                    input class="save-button" type="submit" value="Save";
                }
            }
        },
    )
}

/// Tera templates read from `view.html` and `edit.html` in a directory.
///
/// Each template sees `Title` and `Body` in its context. HTML autoescaping
/// is on, as for every `.html` template in Tera.
#[derive(Debug)]
pub struct TeraTemplates {
    tera: Tera,
}

impl TeraTemplates {
    /// Parse both templates from `dir`. A missing file or a syntax error
    /// fails here, not at render time.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_template_files(
            [Template::View, Template::Edit]
                .into_iter()
                .map(|template| (dir.join(template.file_name()), Some(template.file_name())))
                .collect::<Vec<_>>(),
        )
        .with_context(|| format!("failed to load templates from {}", dir.display()))?;

        tracing::info!(dir = %dir.display(), "templates loaded");
        Ok(Self { tera })
    }
}

impl PageTemplates for TeraTemplates {
    fn render(&self, template: Template, page: &Page) -> Result<String, WikiError> {
        let mut context = tera::Context::new();
        context.insert("Title", page.title.as_str());
        context.insert("Body", &page.body_text());

        self.tera
            .render(template.file_name(), &context)
            .map_err(|err| WikiError::Render {
                template: template.name(),
                reason: error_chain(&err),
            })
    }
}

/// Tera puts the useful detail in the source chain; flatten it.
fn error_chain(err: &tera::Error) -> String {
    use std::error::Error as _;

    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        reason.push_str(": ");
        reason.push_str(&inner.to_string());
        source = inner.source();
    }
    reason
}
