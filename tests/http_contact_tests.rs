use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use contactbook::{
    AppState, Contact, ContactStore, FileContactStore, FlashMessages, InMemoryContactStore,
    build_router,
};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Arc<dyn ContactStore>,
}

impl TestApp {
    fn with_store(store: Arc<dyn ContactStore>) -> Self {
        let state = AppState::new(store.clone(), FlashMessages::new(Duration::from_secs(60)));
        Self {
            router: build_router(state, "public"),
            store,
        }
    }

    fn new() -> Self {
        Self::with_store(Arc::new(InMemoryContactStore::new()))
    }

    fn seeded(contacts: Vec<Contact>) -> Self {
        Self::with_store(Arc::new(InMemoryContactStore::with_contacts(contacts)))
    }

    async fn send(&self, request: Request<Body>) -> Reply {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response expected");
        let status = response.status();
        let location = header_string(response.headers(), header::LOCATION);
        let set_cookie = header_string(response.headers(), header::SET_COOKIE);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body should be readable");
        Reply {
            status,
            location,
            set_cookie,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    async fn get(&self, uri: &str) -> Reply {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn get_with_cookie(&self, uri: &str, cookie: &str) -> Reply {
        let request = Request::get(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Reply {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn names(&self) -> Vec<String> {
        self.store
            .load_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect()
    }
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    set_cookie: Option<String>,
    body: String,
}

impl Reply {
    /// `name=value` part of the flash cookie, ready to send back.
    fn cookie_pair(&self) -> String {
        self.set_cookie
            .as_deref()
            .and_then(|cookie| cookie.split(';').next())
            .expect("flash cookie expected")
            .to_string()
    }
}

fn header_string(headers: &axum::http::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn ana() -> Contact {
    Contact::new("Ana", "ana@x.com", "081234567890")
}

#[tokio::test]
async fn home_and_about_pages_render() {
    let app = TestApp::new();
    let home = app.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("Welcome"));

    let about = app.get("/about").await;
    assert_eq!(about.status, StatusCode::OK);
    assert!(about.body.contains("About"));
}

#[tokio::test]
async fn add_contact_redirects_and_flashes_once() {
    let app = TestApp::new();

    let reply = app
        .post_form(
            "/contact",
            &[("name", "Ana"), ("email", "ana@x.com"), ("mobile", "081234567890")],
        )
        .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/contact"));
    assert_eq!(app.names().await, ["Ana"]);

    let cookie = reply.cookie_pair();
    let list = app.get_with_cookie("/contact", &cookie).await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains("Contact Ana was added."));
    assert!(list.body.contains("/contact/Ana"));
    assert!(
        list.set_cookie
            .as_deref()
            .is_some_and(|c| c.contains("Max-Age=0"))
    );

    let again = app.get_with_cookie("/contact", &cookie).await;
    assert!(!again.body.contains("was added."));
}

#[tokio::test]
async fn add_rejection_redisplays_submitted_values() {
    let app = TestApp::seeded(vec![ana()]);

    let reply = app
        .post_form(
            "/contact",
            &[("name", "ana"), ("email", "broken"), ("mobile", "12")],
        )
        .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body.contains("Contact name is already taken."));
    assert!(reply.body.contains("Email is not valid."));
    assert!(reply.body.contains("Mobile number is not valid."));
    assert!(reply.body.contains(r#"value="broken""#));
    assert!(reply.set_cookie.is_none());
    assert_eq!(app.names().await, ["Ana"]);
}

#[tokio::test]
async fn edit_form_is_prefilled_or_empty() {
    let app = TestApp::seeded(vec![ana()]);

    let found = app.get("/contact/edit/ana").await;
    assert_eq!(found.status, StatusCode::OK);
    assert!(found.body.contains(r#"name="priorName" value="Ana""#));
    assert!(found.body.contains(r#"value="081234567890""#));

    let missing = app.get("/contact/edit/Nobody").await;
    assert_eq!(missing.status, StatusCode::OK);
    assert!(missing.body.contains(r#"name="priorName" value="""#));
}

#[tokio::test]
async fn update_renames_contact() {
    let app = TestApp::seeded(vec![
        ana(),
        Contact::new("Citra", "citra@x.com", "085712345678"),
    ]);

    let reply = app
        .post_form(
            "/contact/update",
            &[
                ("priorName", "Ana"),
                ("name", "Budi"),
                ("email", "budi@x.com"),
                ("mobile", "081298765432"),
            ],
        )
        .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(app.names().await, ["Citra", "Budi"]);

    let list = app.get_with_cookie("/contact", &reply.cookie_pair()).await;
    assert!(list.body.contains("Contact Budi was updated."));
}

#[tokio::test]
async fn update_onto_taken_name_is_rejected() {
    let app = TestApp::seeded(vec![
        ana(),
        Contact::new("Budi", "budi@x.com", "081298765432"),
    ]);

    let reply = app
        .post_form(
            "/contact/update",
            &[
                ("priorName", "Budi"),
                ("name", "Ana"),
                ("email", "budi@x.com"),
                ("mobile", "081298765432"),
            ],
        )
        .await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(reply.body.contains("Contact name is already taken."));
    assert!(reply.body.contains(r#"name="priorName" value="Budi""#));
    assert_eq!(app.names().await, ["Ana", "Budi"]);
}

#[tokio::test]
async fn delete_existing_contact() {
    let app = TestApp::seeded(vec![ana()]);

    let reply = app.get("/contact/delete/ana").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert!(app.names().await.is_empty());

    let list = app.get_with_cookie("/contact", &reply.cookie_pair()).await;
    assert!(list.body.contains("Contact Ana was deleted."));
}

#[tokio::test]
async fn delete_unknown_contact_is_404() {
    let app = TestApp::new();

    let reply = app.get("/contact/delete/Ana").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, "Error 404: contact name not found!");
    assert!(app.names().await.is_empty());
}

#[tokio::test]
async fn detail_renders_contact_or_empty_view() {
    let app = TestApp::seeded(vec![Contact::new(
        "Ana Maria",
        "ana@x.com",
        "081234567890",
    )]);

    let found = app.get("/contact/ana%20maria").await;
    assert_eq!(found.status, StatusCode::OK);
    assert!(found.body.contains("Ana Maria"));
    assert!(found.body.contains("/contact/edit/Ana%20Maria"));

    let missing = app.get("/contact/Nobody").await;
    assert_eq!(missing.status, StatusCode::OK);
    assert!(missing.body.contains("Contact not found."));
}

#[tokio::test]
async fn add_form_renders_empty() {
    let app = TestApp::new();
    let reply = app.get("/contact/add").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains(r#"action="/contact""#));
}

#[tokio::test]
async fn unmatched_route_renders_not_found_page() {
    let app = TestApp::new();
    let reply = app.get("/no/such/page").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.contains("Error 404"));
}

#[tokio::test]
async fn corrupt_store_renders_error_page() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contacts.json");
    let store = FileContactStore::open(&path).await.unwrap();
    std::fs::write(&path, "{ broken").unwrap();
    let app = TestApp::with_store(Arc::new(store));

    let reply = app.get("/contact").await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(reply.body.contains("Error 500"));
}

#[tokio::test]
async fn static_assets_are_served_from_public_dir() {
    let app = TestApp::new();

    let css = app.get("/static/css/style.css").await;
    assert_eq!(css.status, StatusCode::OK);
    assert!(css.body.contains(".navbar"));

    let missing = app.get("/static/nope.css").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submission_without_form_content_type_renders_error_page() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/contact")
        .body(Body::from("name=A"))
        .unwrap();
    let reply = app.send(request).await;
    assert_eq!(reply.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(reply.body.contains("<html"));
    assert!(reply.body.contains("Error 415"));
    assert!(app.names().await.is_empty());
}
