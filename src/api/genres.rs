//! Genre pages

use axum::{
    extract::{Path, State},
    Form,
};

use super::{parse_id, GENRES_PATH};
use crate::{
    error::{AppError, AppResult},
    models::GenreForm,
    repository::Inserted,
    services::{Deletion, Submission},
    validation::Violations,
    views::{Page, View},
    AppState,
};

/// Display list of all genres
pub async fn list(State(state): State<AppState>) -> AppResult<Page> {
    let genres = state.services.genres.list().await?;
    Ok(Page::Render(View::GenreList { genres }))
}

/// Detail page for one genre and its books
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let id = parse_id(&id).ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
    let (genre, books) = state.services.genres.detail(id).await?;
    Ok(Page::Render(View::GenreDetail { genre, books }))
}

pub async fn create_form() -> Page {
    Page::Render(View::GenreForm {
        title: "Create Genre",
        form: GenreForm::default(),
        violations: Violations::default(),
    })
}

/// Redirects to the new genre, or to the existing one with the same name
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Page> {
    let page = match state.services.genres.create(&form).await? {
        Submission::Invalid { form, violations } => Page::Render(View::GenreForm {
            title: "Create Genre",
            form,
            violations,
        }),
        Submission::Saved(Inserted::New(genre) | Inserted::Existing(genre)) => {
            Page::redirect(genre.url())
        }
    };
    Ok(page)
}

/// Confirmation page listing the books that block deletion
///
/// A missing genre sends the user back to the list instead of a 404.
pub async fn delete_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let preview = match parse_id(&id) {
        Some(id) => state.services.genres.delete_preview(id).await?,
        None => None,
    };
    let page = match preview {
        Some((genre, books)) => Page::Render(View::GenreDelete {
            genre: Some(genre),
            books,
        }),
        None => {
            tracing::warn!("Genre {} not found for delete, redirecting to list", id);
            Page::redirect(GENRES_PATH)
        }
    };
    Ok(page)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let Some(id) = parse_id(&id) else {
        return Ok(Page::redirect(GENRES_PATH));
    };
    let page = match state.services.genres.delete(id).await? {
        Deletion::Blocked { record, books } => Page::Render(View::GenreDelete {
            genre: record,
            books,
        }),
        Deletion::Deleted => Page::redirect(GENRES_PATH),
    };
    Ok(page)
}

/// Edit form pre-filled with the stored values
pub async fn update_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let genre = match parse_id(&id) {
        Some(id) => state.services.genres.get(id).await?,
        None => None,
    };
    let page = match genre {
        Some(genre) => Page::Render(View::GenreForm {
            title: "Update Genre",
            form: GenreForm::from(&genre),
            violations: Violations::default(),
        }),
        None => {
            tracing::warn!("Genre {} not found for update, redirecting to list", id);
            Page::redirect(GENRES_PATH)
        }
    };
    Ok(page)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Page> {
    let id = parse_id(&id).ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
    let page = match state.services.genres.update(id, &form).await? {
        Submission::Invalid { form, violations } => Page::Render(View::GenreForm {
            title: "Update Genre",
            form,
            violations,
        }),
        Submission::Saved(genre) => Page::redirect(genre.url()),
    };
    Ok(page)
}
