//! End-to-end tests driving the wiki router in-process.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use wiki_serve::render::{MaudTemplates, PageTemplates, Template};
use wiki_serve::{AppState, Config, Page, WikiError, router};

fn config(data_dir: &Path) -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        data_dir: data_dir.to_path_buf(),
        template_dir: None,
    }
}

fn app(tmp: &TempDir) -> Router {
    router(AppState::new(config(tmp.path())).unwrap())
}

fn app_with_templates(tmp: &TempDir, templates: Arc<dyn PageTemplates>) -> Router {
    router(AppState::with_templates(config(tmp.path()), templates))
}

/// Counts render calls and delegates to the built-in templates.
#[derive(Default)]
struct CountingTemplates {
    calls: AtomicUsize,
}

impl PageTemplates for CountingTemplates {
    fn render(&self, template: Template, page: &Page) -> Result<String, WikiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        MaudTemplates.render(template, page)
    }
}

struct FailingTemplates;

impl PageTemplates for FailingTemplates {
    fn render(&self, template: Template, _page: &Page) -> Result<String, WikiError> {
        Err(WikiError::Render {
            template: template.name(),
            reason: "template exploded".to_string(),
        })
    }
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        location,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

async fn get(app: &Router, path: &str) -> TestResponse {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_form(app: &Router, path: &str, form: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

fn data_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn root_redirects_to_front_page() {
    let tmp = TempDir::new().unwrap();
    let response = get(&app(&tmp), "/").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location.as_deref(), Some("/view/FrontPage"));
}

#[tokio::test]
async fn unknown_paths_fall_back_to_front_page() {
    let tmp = TempDir::new().unwrap();
    let response = get(&app(&tmp), "/some/other/place").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location.as_deref(), Some("/view/FrontPage"));
}

#[tokio::test]
async fn view_missing_page_redirects_to_edit_without_rendering() {
    let tmp = TempDir::new().unwrap();
    let templates = Arc::new(CountingTemplates::default());
    let app = app_with_templates(&tmp, templates.clone());

    let response = get(&app, "/view/Missing").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location.as_deref(), Some("/edit/Missing"));
    assert_eq!(templates.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn edit_missing_page_renders_blank_form_without_creating_file() {
    let tmp = TempDir::new().unwrap();
    let response = get(&app(&tmp), "/edit/NewPage").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Editing NewPage"));
    assert!(response.body.contains(r#"action="/save/NewPage""#));
    assert!(response.body.contains("></textarea>"));
    assert!(data_files(tmp.path()).is_empty());
}

#[tokio::test]
async fn save_writes_file_and_redirects_to_view() {
    let tmp = TempDir::new().unwrap();
    let app = app(&tmp);

    let response = post_form(&app, "/save/Test", "body=hello").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location.as_deref(), Some("/view/Test"));
    assert_eq!(std::fs::read(tmp.path().join("Test.txt")).unwrap(), b"hello");

    let view = get(&app, "/view/Test").await;
    assert_eq!(view.status, StatusCode::OK);
    assert!(view.body.contains("hello"));
}

#[tokio::test]
async fn save_overwrites_and_edit_shows_current_body() {
    let tmp = TempDir::new().unwrap();
    let app = app(&tmp);

    post_form(&app, "/save/Notes", "body=first+draft").await;
    post_form(&app, "/save/Notes", "body=second").await;

    assert_eq!(std::fs::read(tmp.path().join("Notes.txt")).unwrap(), b"second");
    let edit = get(&app, "/edit/Notes").await;
    assert!(edit.body.contains(">second</textarea>"));
}

#[tokio::test]
async fn save_without_body_field_stores_empty_page() {
    let tmp = TempDir::new().unwrap();
    let response = post_form(&app(&tmp), "/save/Blank", "other=1").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert!(std::fs::read(tmp.path().join("Blank.txt")).unwrap().is_empty());
}

#[tokio::test]
async fn bracket_tokens_become_links_even_for_missing_pages() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Home.txt"), "go to [Other] now").unwrap();

    let response = get(&app(&tmp), "/view/Home").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .body
            .contains(r#"go to <a href="/view/Other">Other</a>. now"#)
    );
    assert!(!tmp.path().join("Other.txt").exists());
}

#[tokio::test]
async fn invalid_titles_are_not_found_and_touch_no_storage() {
    let tmp = TempDir::new().unwrap();
    let app = app(&tmp);

    for path in [
        "/view/",
        "/view/bad-title",
        "/view/a/b",
        "/edit/",
        "/edit/Bad.Title",
        "/view/%2e%2e",
        "/view/a%2Fb",
    ] {
        let response = get(&app, path).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert!(response.body.contains("Invalid Page Title"), "{path}");
    }

    for path in ["/save/", "/save/bad_title", "/save/Nested/Page"] {
        let response = post_form(&app, path, "body=x").await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
    }

    assert!(data_files(tmp.path()).is_empty());
}

#[tokio::test]
async fn save_failure_is_internal_error() {
    let tmp = TempDir::new().unwrap();
    let app = router(AppState::new(config(&tmp.path().join("missing-dir"))).unwrap());

    let response = post_form(&app, "/save/Test", "body=hello").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Save Failed"));
    assert!(!tmp.path().join("missing-dir").exists());
}

#[tokio::test]
async fn render_failure_sends_no_partial_page() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Test.txt"), "secret body").unwrap();
    let app = app_with_templates(&tmp, Arc::new(FailingTemplates));

    let response = get(&app, "/view/Test").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("template exploded"));
    assert!(!response.body.contains("secret body"));
}

#[tokio::test]
async fn custom_template_dir_is_used() {
    let data = TempDir::new().unwrap();
    let templates = TempDir::new().unwrap();
    std::fs::write(
        templates.path().join("view.html"),
        "<article>{{ Title }}: {{ Body }}</article>",
    )
    .unwrap();
    std::fs::write(templates.path().join("edit.html"), "<form>{{ Body }}</form>").unwrap();
    std::fs::write(data.path().join("Test.txt"), "hi [There]").unwrap();

    let mut config = config(data.path());
    config.template_dir = Some(templates.path().to_path_buf());
    let app = router(AppState::new(config).unwrap());

    let response = get(&app, "/view/Test").await;
    assert_eq!(
        response.body,
        r#"<article>Test: hi <a href="/view/There">There</a>.</article>"#
    );
}

#[tokio::test]
async fn save_requires_post() {
    let tmp = TempDir::new().unwrap();
    let response = get(&app(&tmp), "/save/Test").await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(data_files(tmp.path()).is_empty());
}

#[tokio::test]
async fn health_reports_ok() {
    let tmp = TempDir::new().unwrap();
    let response = get(&app(&tmp), "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data_dir_writable"], true);
}

#[tokio::test]
async fn health_degrades_without_data_dir() {
    let tmp = TempDir::new().unwrap();
    let app = router(AppState::new(config(&tmp.path().join("gone"))).unwrap());

    let response = get(&app, "/health").await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["data_dir_writable"], false);
}

#[tokio::test]
async fn save_keeps_non_utf8_bytes() {
    let tmp = TempDir::new().unwrap();
    let response = post_form(&app(&tmp), "/save/Bin", "body=%FFok").await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        std::fs::read(tmp.path().join("Bin.txt")).unwrap(),
        vec![0xff, b'o', b'k']
    );
}

#[tokio::test]
async fn save_accepts_multipart_form() {
    let tmp = TempDir::new().unwrap();
    let boundary = "wikiboundary";
    let payload = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"other\"\r\n\r\n\
         ignored\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"body\"\r\n\r\n\
         hello\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/save/Multi")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(payload))
        .unwrap();

    let response = send(&app(&tmp), request).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(std::fs::read(tmp.path().join("Multi.txt")).unwrap(), b"hello");
}

#[tokio::test]
async fn save_falls_back_to_query_string() {
    let tmp = TempDir::new().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/save/Q?body=hello+there")
        .body(Body::empty())
        .unwrap();

    let response = send(&app(&tmp), request).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        std::fs::read(tmp.path().join("Q.txt")).unwrap(),
        b"hello there"
    );
}

#[tokio::test]
async fn posted_field_wins_over_query_string() {
    let tmp = TempDir::new().unwrap();
    post_form(&app(&tmp), "/save/Both?body=query", "body=form").await;

    assert_eq!(std::fs::read(tmp.path().join("Both.txt")).unwrap(), b"form");
}

#[tokio::test]
async fn unrecognised_content_type_saves_empty_page() {
    let tmp = TempDir::new().unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/save/Plain")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("body=hello"))
        .unwrap();

    let response = send(&app(&tmp), request).await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert!(std::fs::read(tmp.path().join("Plain.txt")).unwrap().is_empty());
}

#[tokio::test]
async fn percent_encoded_title_addresses_page() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("A.txt"), "decoded").unwrap();

    let response = get(&app(&tmp), "/view/%41").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("decoded"));
}
