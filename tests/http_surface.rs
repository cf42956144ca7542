use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bookshelf::{build_router, AppState, BookLookup, BookStore};
use tempfile::TempDir;

async fn boot_app(catalog_url: String, dir: &TempDir) -> SocketAddr {
    let db_path = dir.path().join("shelf.sqlite");
    let store = BookStore::open(db_path.to_str().expect("utf8 db path")).expect("open store");
    let lookup = BookLookup::new(catalog_url, Duration::from_secs(2)).expect("build client");
    let state = AppState {
        store: Arc::new(store),
        lookup: Arc::new(lookup),
    };
    serve(build_router(state)).await
}

async fn boot_fixture_catalog(body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/volumes",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    let addr = serve(app).await;
    format!("http://{addr}/volumes")
}

async fn boot_broken_catalog() -> String {
    let app = Router::new().route(
        "/volumes",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let addr = serve(app).await;
    format!("http://{addr}/volumes")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn book_form(title: &str, image: &str) -> Vec<(&'static str, String)> {
    vec![
        ("authors", "J. R. R. Tolkien".to_string()),
        ("title", title.to_string()),
        ("isbn", "9780261103344".to_string()),
        ("image", image.to_string()),
        ("description", "A hole in the ground.".to_string()),
    ]
}

#[tokio::test]
async fn create_show_update_delete_flow() {
    let dir = TempDir::new().expect("tempdir");
    let addr = boot_app("http://127.0.0.1:9/volumes".to_string(), &dir).await;
    let client = reqwest::Client::new();

    // Create redirects to the detail page for the generated id.
    let created = client
        .post(format!("http://{addr}/books"))
        .form(&book_form("The Hobbit", "http://books.example/hobbit.jpg"))
        .send()
        .await
        .expect("create");
    assert_eq!(created.status(), StatusCode::OK);
    let detail_url = created.url().to_string();
    assert!(detail_url.contains("/books/"), "got {detail_url}");
    assert!(created.text().await.expect("body").contains("The Hobbit"));

    // Update through the method-override form twice; idempotent.
    for _ in 0..2 {
        let updated = client
            .post(format!("{detail_url}?_method=PUT"))
            .form(&book_form("There and Back Again", ""))
            .send()
            .await
            .expect("update");
        assert_eq!(updated.status(), StatusCode::OK);
        assert!(updated
            .text()
            .await
            .expect("body")
            .contains("There and Back Again"));
    }

    // The home listing shows the edited title.
    let home = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect("home");
    assert!(home.text().await.expect("body").contains("There and Back Again"));

    // Delete lands back on an empty listing.
    let deleted = client
        .post(format!("{detail_url}?_method=DELETE"))
        .send()
        .await
        .expect("delete");
    assert_eq!(deleted.status(), StatusCode::OK);
    let body = deleted.text().await.expect("body");
    assert!(body.contains("Nothing saved yet"));
}

#[tokio::test]
async fn deleting_a_missing_id_shows_the_error_page_and_keeps_the_listing() {
    let dir = TempDir::new().expect("tempdir");
    let addr = boot_app("http://127.0.0.1:9/volumes".to_string(), &dir).await;
    let client = reqwest::Client::new();

    client
        .post(format!("http://{addr}/books"))
        .form(&book_form("Survivor", ""))
        .send()
        .await
        .expect("create");

    let response = client
        .post(format!("http://{addr}/books/9999?_method=DELETE"))
        .send()
        .await
        .expect("delete missing");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response
        .text()
        .await
        .expect("body")
        .contains("Something went wrong"));

    let home = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect("home");
    assert!(home.text().await.expect("body").contains("Survivor"));
}

#[tokio::test]
async fn unknown_routes_render_the_error_page() {
    let dir = TempDir::new().expect("tempdir");
    let addr = boot_app("http://127.0.0.1:9/volumes".to_string(), &dir).await;

    let response = reqwest::get(format!("http://{addr}/no/such/page"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response
        .text()
        .await
        .expect("body")
        .contains("Something went wrong"));
}

#[tokio::test]
async fn search_renders_normalized_hits_with_fallbacks() {
    let catalog = boot_fixture_catalog(serde_json::json!({
        "items": [
            {
                "volumeInfo": {
                    "title": "The Hobbit",
                    "authors": ["J. R. R. Tolkien"],
                    "description": "A hole in the ground.",
                    "industryIdentifiers": [
                        {"type": "ISBN_13", "identifier": "9780261103344"}
                    ],
                    "imageLinks": {"thumbnail": "http://books.example/hobbit.jpg"}
                }
            },
            {"volumeInfo": {}}
        ]
    }))
    .await;
    let dir = TempDir::new().expect("tempdir");
    let addr = boot_app(catalog, &dir).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/searches"))
        .form(&[("searchQuery", "Hobbit"), ("searchBy", "title")])
        .send()
        .await
        .expect("search");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.expect("body");
    assert!(body.contains("The Hobbit"));
    assert!(body.contains("9780261103344"));
    // The bare second entry renders entirely from fallbacks.
    assert!(body.contains("there is no title"));
    assert!(body.contains("No description was found"));
    assert!(body.contains("freeiconspng.com"));
    assert!(body.contains("Unknown author"));
}

#[tokio::test]
async fn search_against_a_failing_catalog_renders_the_error_page() {
    let catalog = boot_broken_catalog().await;
    let dir = TempDir::new().expect("tempdir");
    let addr = boot_app(catalog, &dir).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/searches"))
        .form(&[("searchQuery", "Hobbit"), ("searchBy", "title")])
        .send()
        .await
        .expect("search");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response
        .text()
        .await
        .expect("body")
        .contains("Something went wrong"));
}

#[tokio::test]
async fn empty_image_field_stores_null_and_lists_without_an_image() {
    let dir = TempDir::new().expect("tempdir");
    let addr = boot_app("http://127.0.0.1:9/volumes".to_string(), &dir).await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("http://{addr}/books"))
        .form(&book_form("Plain Cover", ""))
        .send()
        .await
        .expect("create");
    assert_eq!(created.status(), StatusCode::OK);
    assert!(!created.text().await.expect("body").contains("<img src=\"\""));

    let home = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect("home");
    let body = home.text().await.expect("body");
    assert!(body.contains("Plain Cover"));
    assert!(!body.contains("<img src=\"\""));
}
