//! Author pages

use axum::{
    extract::{Path, State},
    Form,
};

use super::{parse_id, AUTHORS_PATH};
use crate::{
    error::{AppError, AppResult},
    models::AuthorForm,
    services::{Deletion, Submission},
    validation::Violations,
    views::{Page, View},
    AppState,
};

/// Display list of all authors
pub async fn list(State(state): State<AppState>) -> AppResult<Page> {
    let authors = state.services.authors.list().await?;
    Ok(Page::Render(View::AuthorList { authors }))
}

/// Detail page for one author and their books
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let id = parse_id(&id).ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    let (author, books) = state.services.authors.detail(id).await?;
    Ok(Page::Render(View::AuthorDetail { author, books }))
}

pub async fn create_form() -> Page {
    Page::Render(View::AuthorForm {
        title: "Create Author",
        form: AuthorForm::default(),
        violations: Violations::default(),
    })
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Page> {
    let page = match state.services.authors.create(&form).await? {
        Submission::Invalid { form, violations } => Page::Render(View::AuthorForm {
            title: "Create Author",
            form,
            violations,
        }),
        Submission::Saved(author) => Page::redirect(author.url()),
    };
    Ok(page)
}

/// Confirmation page listing the books that block deletion
///
/// A missing author sends the user back to the list instead of a 404.
pub async fn delete_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let preview = match parse_id(&id) {
        Some(id) => state.services.authors.delete_preview(id).await?,
        None => None,
    };
    let page = match preview {
        Some((author, books)) => Page::Render(View::AuthorDelete {
            author: Some(author),
            books,
        }),
        None => {
            tracing::warn!("Author {} not found for delete, redirecting to list", id);
            Page::redirect(AUTHORS_PATH)
        }
    };
    Ok(page)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let Some(id) = parse_id(&id) else {
        return Ok(Page::redirect(AUTHORS_PATH));
    };
    let page = match state.services.authors.delete(id).await? {
        Deletion::Blocked { record, books } => Page::Render(View::AuthorDelete {
            author: record,
            books,
        }),
        Deletion::Deleted => Page::redirect(AUTHORS_PATH),
    };
    Ok(page)
}

/// Edit form pre-filled with the stored values
pub async fn update_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Page> {
    let author = match parse_id(&id) {
        Some(id) => state.services.authors.get(id).await?,
        None => None,
    };
    let page = match author {
        Some(author) => Page::Render(View::AuthorForm {
            title: "Update Author",
            form: AuthorForm::from(&author),
            violations: Violations::default(),
        }),
        None => {
            tracing::warn!("Author {} not found for update, redirecting to list", id);
            Page::redirect(AUTHORS_PATH)
        }
    };
    Ok(page)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Page> {
    let id = parse_id(&id).ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    let page = match state.services.authors.update(id, &form).await? {
        Submission::Invalid { form, violations } => Page::Render(View::AuthorForm {
            title: "Update Author",
            form,
            violations,
        }),
        Submission::Saved(author) => Page::redirect(author.url()),
    };
    Ok(page)
}
