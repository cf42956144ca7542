#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod http;
pub mod lookup;
pub mod models;
pub mod normalize;
pub mod render;
pub mod store;

pub use config::ServerConfig;
pub use error::AppError;
pub use http::{build_router, AppState};
pub use lookup::BookLookup;
pub use models::{BookDraft, SavedBook, SearchHit};
pub use store::BookStore;
