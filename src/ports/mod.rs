// src/ports/mod.rs
pub mod html;
pub mod http;

pub use html::HtmlPresenter;
pub use http::{create_router, AppState, SharedStore};
