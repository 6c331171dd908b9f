//! HTML views
//!
//! A handler answers with a [`Page`]: either a named view with its data, or
//! a redirect. Views are rendered with maud, which escapes every
//! interpolated value.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use maud::{html, Markup, DOCTYPE};

use crate::{
    models::{Author, AuthorForm, Book, CatalogCounts, Genre, GenreForm},
    validation::Violations,
};

/// What a handler wants sent back
#[derive(Debug)]
pub enum Page {
    Render(View),
    Redirect(String),
}

impl Page {
    pub fn redirect(to: impl Into<String>) -> Self {
        Page::Redirect(to.into())
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self {
            Page::Render(view) => Html(view.render().into_string()).into_response(),
            Page::Redirect(to) => Redirect::to(&to).into_response(),
        }
    }
}

/// A named template together with its data
#[derive(Debug)]
pub enum View {
    Index {
        counts: CatalogCounts,
    },
    AuthorList {
        authors: Vec<Author>,
    },
    AuthorDetail {
        author: Author,
        books: Vec<Book>,
    },
    AuthorForm {
        title: &'static str,
        form: AuthorForm,
        violations: Violations,
    },
    AuthorDelete {
        author: Option<Author>,
        books: Vec<Book>,
    },
    GenreList {
        genres: Vec<Genre>,
    },
    GenreDetail {
        genre: Genre,
        books: Vec<Book>,
    },
    GenreForm {
        title: &'static str,
        form: GenreForm,
        violations: Violations,
    },
    GenreDelete {
        genre: Option<Genre>,
        books: Vec<Book>,
    },
}

impl View {
    /// Template name
    pub fn template(&self) -> &'static str {
        match self {
            View::Index { .. } => "index",
            View::AuthorList { .. } => "author_list",
            View::AuthorDetail { .. } => "author_detail",
            View::AuthorForm { .. } => "author_form",
            View::AuthorDelete { .. } => "author_delete",
            View::GenreList { .. } => "genre_list",
            View::GenreDetail { .. } => "genre_detail",
            View::GenreForm { .. } => "genre_form",
            View::GenreDelete { .. } => "genre_delete",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Index { .. } => "Local Library Home",
            View::AuthorList { .. } => "Author List",
            View::AuthorDetail { .. } => "Author Detail",
            View::AuthorForm { title, .. } | View::GenreForm { title, .. } => *title,
            View::AuthorDelete { .. } => "Delete Author",
            View::GenreList { .. } => "Genre List",
            View::GenreDetail { .. } => "Genre Detail",
            View::GenreDelete { .. } => "Delete Genre",
        }
    }

    pub fn render(&self) -> Markup {
        let content = match self {
            View::Index { counts } => index(counts),
            View::AuthorList { authors } => author_list(authors),
            View::AuthorDetail { author, books } => author_detail(author, books),
            View::AuthorForm {
                form, violations, ..
            } => author_form(form, violations),
            View::AuthorDelete { author, books } => author_delete(author.as_ref(), books),
            View::GenreList { genres } => genre_list(genres),
            View::GenreDetail { genre, books } => genre_detail(genre, books),
            View::GenreForm {
                form, violations, ..
            } => genre_form(form, violations),
            View::GenreDelete { genre, books } => genre_delete(genre.as_ref(), books),
        };
        layout(self.template(), self.title(), content)
    }
}

/// Page shell, with the template name on `<body>`
fn layout(template: &str, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body data-template=(template) {
                nav {
                    ul {
                        li { a href="/catalog" { "Home" } }
                        li { a href="/catalog/authors" { "All authors" } }
                        li { a href="/catalog/genres" { "All genres" } }
                        li { a href="/catalog/author/create" { "Create new author" } }
                        li { a href="/catalog/genre/create" { "Create new genre" } }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

/// Page shown for any error forwarded to the dispatcher
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let content = html! {
        p.error { (message) }
        p { "Status: " (status.as_u16()) }
    };
    layout("error", status.canonical_reason().unwrap_or("Error"), content)
}

fn violation_list(violations: &Violations) -> Markup {
    html! {
        @if !violations.is_empty() {
            ul.errors {
                @for violation in violations.iter() {
                    li data-field=(violation.field) { (violation.message) }
                }
            }
        }
    }
}

fn book_list(books: &[Book]) -> Markup {
    html! {
        @if books.is_empty() {
            p { "This record has no books." }
        } @else {
            dl.books {
                @for book in books {
                    dt { (book.title) }
                    dd { (book.summary) }
                }
            }
        }
    }
}

fn index(counts: &CatalogCounts) -> Markup {
    html! {
        p { "Welcome to the library catalog." }
        ul {
            li { strong { "Books: " } (counts.books) }
            li { strong { "Authors: " } (counts.authors) }
            li { strong { "Genres: " } (counts.genres) }
        }
    }
}

fn author_list(authors: &[Author]) -> Markup {
    html! {
        @if authors.is_empty() {
            p { "There are no authors." }
        } @else {
            ul.authors {
                @for author in authors {
                    li {
                        a href=(author.url()) { (author.name()) }
                        " (" (author.lifespan()) ")"
                    }
                }
            }
        }
    }
}

fn author_detail(author: &Author, books: &[Book]) -> Markup {
    html! {
        h2 { "Author: " (author.name()) }
        p { (author.lifespan()) }
        h3 { "Books" }
        (book_list(books))
        hr;
        p { a href={ (author.url()) "/delete" } { "Delete author" } }
        p { a href={ (author.url()) "/update" } { "Update author" } }
    }
}

fn author_form(form: &AuthorForm, violations: &Violations) -> Markup {
    html! {
        form method="POST" {
            div.form-group {
                label for="first_name" { "First Name:" }
                input id="first_name" type="text" name="first_name" placeholder="First name" value=(form.first_name);
                label for="family_name" { "Family Name:" }
                input id="family_name" type="text" name="family_name" placeholder="Family name" value=(form.family_name);
            }
            div.form-group {
                label for="date_of_birth" { "Date of birth:" }
                input id="date_of_birth" type="date" name="date_of_birth" value=(form.date_of_birth);
            }
            div.form-group {
                label for="date_of_death" { "Date of death:" }
                input id="date_of_death" type="date" name="date_of_death" value=(form.date_of_death);
            }
            button type="submit" { "Submit" }
        }
        (violation_list(violations))
    }
}

fn author_delete(author: Option<&Author>, books: &[Book]) -> Markup {
    html! {
        @if let Some(author) = author {
            h2 { (author.name()) }
            p { (author.lifespan()) }
        }
        @if books.is_empty() {
            p { "Do you really want to delete this author?" }
            form method="POST" {
                button type="submit" { "Delete" }
            }
        } @else {
            p { strong { "Delete the following books before attempting to delete this author." } }
            h3 { "Books" }
            (book_list(books))
        }
    }
}

fn genre_list(genres: &[Genre]) -> Markup {
    html! {
        @if genres.is_empty() {
            p { "There are no genres." }
        } @else {
            ul.genres {
                @for genre in genres {
                    li { a href=(genre.url()) { (genre.name) } }
                }
            }
        }
    }
}

fn genre_detail(genre: &Genre, books: &[Book]) -> Markup {
    html! {
        h2 { "Genre: " (genre.name) }
        h3 { "Books" }
        (book_list(books))
        hr;
        p { a href={ (genre.url()) "/delete" } { "Delete genre" } }
        p { a href={ (genre.url()) "/update" } { "Update genre" } }
    }
}

fn genre_form(form: &GenreForm, violations: &Violations) -> Markup {
    html! {
        form method="POST" {
            div.form-group {
                label for="name" { "Genre:" }
                input id="name" type="text" name="name" placeholder="Fantasy, Poetry etc." value=(form.name);
            }
            button type="submit" { "Submit" }
        }
        (violation_list(violations))
    }
}

fn genre_delete(genre: Option<&Genre>, books: &[Book]) -> Markup {
    html! {
        @if let Some(genre) = genre {
            h2 { (genre.name) }
        }
        @if books.is_empty() {
            p { "Do you really want to delete this genre?" }
            form method="POST" {
                button type="submit" { "Delete" }
            }
        } @else {
            p { strong { "Delete the following books before attempting to delete this genre." } }
            h3 { "Books" }
            (book_list(books))
        }
    }
}
