//! Catalog home page

use axum::extract::State;

use crate::{
    error::AppResult,
    views::{Page, View},
    AppState,
};

pub async fn home() -> Page {
    Page::redirect("/catalog")
}

/// Record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Page> {
    let counts = state.services.catalog.counts().await?;
    Ok(Page::Render(View::Index { counts }))
}
