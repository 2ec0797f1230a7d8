//! View, edit and save handlers.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use crate::error::WikiError;
use crate::form;
use crate::page::Page;
use crate::render::Template;
use crate::state::AppState;

/// Page the root path redirects to.
pub const FRONT_PAGE: &str = "FrontPage";

/// Form field holding the page body.
const BODY_FIELD: &str = "body";

/// Redirect to the front page, whether or not it exists.
pub async fn root() -> Response {
    found(&format!("/view/{FRONT_PAGE}"))
}

/// Render a page, or send the client to its edit form if it does not exist.
pub async fn view(State(state): State<AppState>, uri: Uri) -> Result<Response, WikiError> {
    let title = state.titles.extract_title(uri.path())?;

    let Some(page) = state.pages.load(&title).await else {
        tracing::debug!(title = %title, "page missing, redirecting to editor");
        return Ok(found(&title.edit_path()));
    };

    let html = state.renderer.render(Template::View, &page)?;
    Ok(html_response(html))
}

/// Render the edit form, starting blank for a page that does not exist.
pub async fn edit(State(state): State<AppState>, uri: Uri) -> Result<Response, WikiError> {
    let title = state.titles.extract_title(uri.path())?;
    let page = state.pages.load_or_empty(&title).await;

    let html = state.renderer.render(Template::Edit, &page)?;
    Ok(html_response(html))
}

/// Replace a page body with the posted `body` field and redirect to it.
///
/// The field is read from a urlencoded or multipart body, then from the
/// query string. Any other content type, or no field at all, saves an
/// empty page. Bytes are stored exactly as submitted.
pub async fn save(State(state): State<AppState>, request: Request) -> Result<Response, WikiError> {
    let title = state.titles.extract_title(request.uri().path())?;

    let from_query = request
        .uri()
        .query()
        .and_then(|query| form::urlencoded_value(query.as_bytes(), BODY_FIELD));

    let from_body = match FormKind::of(request.headers()) {
        FormKind::UrlEncoded => match Bytes::from_request(request, &state).await {
            Ok(bytes) => form::urlencoded_value(&bytes, BODY_FIELD),
            Err(rejection) => return Ok(rejection.into_response()),
        },
        FormKind::Multipart => {
            let multipart = match Multipart::from_request(request, &state).await {
                Ok(multipart) => multipart,
                Err(rejection) => return Ok(rejection.into_response()),
            };
            match multipart_field(multipart, BODY_FIELD).await {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!(title = %title, error = %err, "unreadable multipart form");
                    return Ok(err.into_response());
                }
            }
        }
        FormKind::Other => None,
    };

    let body = from_body.or(from_query).unwrap_or_default();
    let page = Page::new(title, body);
    state.pages.save(&page).await?;

    Ok(found(&page.title.view_path()))
}

/// How a save request encodes its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKind {
    UrlEncoded,
    Multipart,
    Other,
}

impl FormKind {
    fn of(headers: &HeaderMap) -> Self {
        let mime = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|essence| essence.trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some("application/x-www-form-urlencoded") => Self::UrlEncoded,
            Some("multipart/form-data") => Self::Multipart,
            _ => Self::Other,
        }
    }
}

/// Raw bytes of the first multipart field called `name`.
async fn multipart_field(
    mut multipart: Multipart,
    name: &str,
) -> Result<Option<Vec<u8>>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(name) {
            return Ok(Some(field.bytes().await?.to_vec()));
        }
    }
    Ok(None)
}

/// `302 Found` redirect. axum's `Redirect` only offers 303, 307 and 308.
fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(err) => WikiError::Internal(anyhow::anyhow!("bad redirect target: {err}")).into_response(),
    }
}

/// Build an HTTP response with HTML content and security/cache headers.
fn html_response(html: String) -> Response {
    let mut headers = HeaderMap::new();

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );

    // Security headers
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    // Pages change on every save; always revalidate against the ETag.
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    (StatusCode::OK, headers, html).into_response()
}
