use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Form, Path, State};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::error::AppError;
use crate::lookup::BookLookup;
use crate::models::BookDraft;
use crate::normalize::normalize;
use crate::render;
use crate::store::BookStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BookStore>,
    pub lookup: Arc<BookLookup>,
}

pub fn build_router(state: AppState) -> Router {
    let routed = Router::new()
        .route("/", get(home))
        .route("/searches/new", get(new_search))
        .route("/searches", post(run_search))
        .route("/books", post(create_book))
        .route(
            "/books/:id",
            get(show_book).put(update_book).delete(delete_book),
        )
        .fallback(unknown_route)
        .with_state(state);
    // `Router::layer` runs middleware after routing, so the override must be
    // layered on an outer router for the rewritten verb to affect matching.
    Router::new()
        .fallback_service(routed)
        .layer(middleware::from_fn(method_override))
}

#[derive(Debug, Deserialize)]
struct SearchForm {
    #[serde(rename = "searchQuery")]
    search_query: String,
    #[serde(rename = "searchBy")]
    search_by: String,
}

#[derive(Debug, Deserialize)]
struct BookForm {
    authors: String,
    title: String,
    isbn: String,
    image: Option<String>,
    description: String,
}

impl BookForm {
    fn into_draft(self) -> BookDraft {
        BookDraft {
            author: self.authors,
            title: self.title,
            isbn: self.isbn,
            image_url: self.image.filter(|url| !url.is_empty()),
            description: self.description,
        }
    }
}

async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let books = state.store.list_all()?;
    Ok(Html(render::index(&books)))
}

async fn new_search() -> Html<String> {
    Html(render::search_form())
}

async fn run_search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    let raw = state
        .lookup
        .search(&form.search_query, &form.search_by)
        .await?;
    let hits: Vec<_> = raw.into_iter().map(normalize).collect();
    Ok(Html(render::search_results(&hits)))
}

async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, AppError> {
    let id = state.store.create(&form.into_draft())?;
    Ok(Redirect::to(&format!("/books/{id}")))
}

async fn show_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let book = state.store.get_by_id(id)?;
    Ok(Html(render::detail(&book)))
}

async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, AppError> {
    state.store.update(id, &form.into_draft())?;
    Ok(Redirect::to(&format!("/books/{id}")))
}

async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.store.delete(id)?;
    Ok(Redirect::to("/"))
}

async fn unknown_route() -> Response {
    (StatusCode::NOT_FOUND, Html(render::error_page())).into_response()
}

/// Lets plain HTML forms drive the PUT and DELETE routes: a POST whose
/// query string carries `_method=PUT` or `_method=DELETE` is rewritten to
/// that verb before routing.
async fn method_override(mut request: Request<Body>, next: Next) -> Response {
    if request.method() == Method::POST {
        if let Some(target) = request.uri().query().and_then(override_target) {
            *request.method_mut() = target;
        }
    }
    next.run(request).await
}

fn override_target(query: &str) -> Option<Method> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != "_method" {
            return None;
        }
        match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        }
    })
}
