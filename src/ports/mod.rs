// src/ports/mod.rs
pub mod html;
pub mod web;

pub use html::HtmlPresenter;
pub use web::{router, AppState};
