//! Route-level tests against the in-memory store

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header, Request, StatusCode},
    Router,
};
use catalog_server::{
    api,
    models::{AuthorData, Book, Genre, GenreData},
    repository::{CatalogStore, MemoryStore, Repository},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

struct Response {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

fn setup() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(Repository::new(store.clone()));
    (api::router(state), store)
}

async fn add_genre(store: &MemoryStore, name: &str) -> Genre {
    store
        .create_genre(GenreData { name: name.into() })
        .await
        .expect("genre")
        .into_inner()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("location").to_string());
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    Response {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}

async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

async fn post(app: &Router, uri: &str, form: &str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request");
    send(app, request).await
}

fn author_data(first: &str, family: &str) -> AuthorData {
    AuthorData {
        first_name: first.to_string(),
        family_name: family.to_string(),
        date_of_birth: None,
        date_of_death: None,
    }
}

fn book(title: &str, author_id: Uuid, genre_ids: Vec<Uuid>) -> Book {
    Book {
        id: Uuid::new_v4(),
        title: title.to_string(),
        summary: format!("Summary of {}", title),
        isbn: String::new(),
        author_id,
        genre_ids,
    }
}

#[tokio::test]
async fn test_health_check() {
    let (app, _store) = setup();
    let response = get(&app, "/health").await;
    assert_eq!(response.status, StatusCode::OK);

    let body: Value = serde_json::from_str(&response.body).expect("json");
    assert_eq!(body["status"], "healthy");

    let response = get(&app, "/ready").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_home_redirects_to_catalog_index() {
    let (app, store) = setup();
    store.create_author(author_data("Isaac", "Asimov")).await.unwrap();

    let response = get(&app, "/").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/catalog"));

    let response = get(&app, "/catalog").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Authors: </strong>1"));
}

#[tokio::test]
async fn test_create_author_redirects_to_detail() {
    let (app, store) = setup();

    let response = post(
        &app,
        "/catalog/author/create",
        "first_name=+Isaac+&family_name=Asimov&date_of_birth=1920-01-02&date_of_death=",
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let authors = store.list_authors().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].first_name, "Isaac");
    assert_eq!(response.location, Some(authors[0].url()));

    let detail = get(&app, &authors[0].url()).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Asimov, Isaac"));
    assert!(detail.body.contains("Jan 2, 1920"));
}

#[tokio::test]
async fn test_create_author_with_same_name_twice() {
    let (app, store) = setup();
    let form = "first_name=Isaac&family_name=Asimov";

    let first = post(&app, "/catalog/author/create", form).await;
    let second = post(&app, "/catalog/author/create", form).await;
    assert_eq!(first.status, StatusCode::SEE_OTHER);
    assert_eq!(second.status, StatusCode::SEE_OTHER);
    assert_ne!(first.location, second.location);
    assert_eq!(store.list_authors().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_author_is_not_persisted() {
    let (app, store) = setup();

    let response = post(
        &app,
        "/catalog/author/create",
        "first_name=&family_name=Le+Guin&date_of_birth=someday",
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.location.is_none());
    assert!(response.body.contains("First name must be specified."));
    assert!(response.body.contains("First name has non-alphanumeric characters."));
    assert!(response.body.contains("Family name has non-alphanumeric characters."));
    assert!(response.body.contains("Invalid date of birth"));
    // input is echoed back
    assert!(response.body.contains(r#"value="Le Guin""#));
    assert!(store.list_authors().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_forms_render() {
    let (app, _store) = setup();
    let response = get(&app, "/catalog/author/create").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<title>Create Author</title>"));

    let response = get(&app, "/catalog/genre/create").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<title>Create Genre</title>"));
}

#[tokio::test]
async fn test_duplicate_genre_redirects_to_existing() {
    let (app, store) = setup();

    let first = post(&app, "/catalog/genre/create", "name=Fantasy").await;
    assert_eq!(first.status, StatusCode::SEE_OTHER);
    let second = post(&app, "/catalog/genre/create", "name=Fantasy").await;
    assert_eq!(second.status, StatusCode::SEE_OTHER);
    assert_eq!(first.location, second.location);
    assert_eq!(store.list_genres().await.unwrap().len(), 1);

    // exact match only
    post(&app, "/catalog/genre/create", "name=fantasy").await;
    assert_eq!(store.list_genres().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_blank_genre_is_not_persisted() {
    let (app, store) = setup();
    let response = post(&app, "/catalog/genre/create", "name=+++").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Genre name required"));
    assert!(store.list_genres().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_author_with_books_is_refused() {
    let (app, store) = setup();
    let author = store.create_author(author_data("Isaac", "Asimov")).await.unwrap();
    let other = store.create_author(author_data("Ben", "Bova")).await.unwrap();
    store.insert_book(book("Foundation", author.id, vec![])).await;
    store.insert_book(book("Mars", other.id, vec![])).await;

    let confirm = get(&app, &format!("{}/delete", author.url())).await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(confirm.body.contains("Foundation"));
    assert!(!confirm.body.contains("Mars"));

    let response = post(&app, &format!("{}/delete", author.url()), "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Delete the following books"));
    assert!(response.body.contains("Foundation"));
    assert!(!response.body.contains("Mars"));
    assert!(store.get_author(author.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_author_without_books() {
    let (app, store) = setup();
    let author = store.create_author(author_data("Isaac", "Asimov")).await.unwrap();

    let confirm = get(&app, &format!("{}/delete", author.url())).await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(confirm.body.contains("Do you really want to delete this author?"));

    let response = post(&app, &format!("{}/delete", author.url()), "").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/catalog/authors"));

    let detail = get(&app, &author.url()).await;
    assert_eq!(detail.status, StatusCode::NOT_FOUND);
    assert!(detail.body.contains("Author not found"));
}

#[tokio::test]
async fn test_delete_genre_with_books_is_refused() {
    let (app, store) = setup();
    let author = store.create_author(author_data("Isaac", "Asimov")).await.unwrap();
    let genre = add_genre(&store, "SF").await;
    store
        .insert_book(book("I Robot", author.id, vec![genre.id]))
        .await;

    let response = post(&app, &format!("{}/delete", genre.url()), "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("I Robot"));
    assert!(store.get_genre(genre.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_genre_without_books() {
    let (app, store) = setup();
    let genre = add_genre(&store, "SF").await;

    let response = post(&app, &format!("{}/delete", genre.url()), "").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/catalog/genres"));
    assert_eq!(get(&app, &genre.url()).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_records() {
    let (app, _store) = setup();
    let id = Uuid::new_v4();

    // detail pages report 404
    let response = get(&app, &format!("/catalog/author/{}", id)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = get(&app, &format!("/catalog/genre/{}", id)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = get(&app, "/catalog/author/not-a-uuid").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // delete and update forms go back to the list
    for (uri, list) in [
        (format!("/catalog/author/{}/delete", id), "/catalog/authors"),
        (format!("/catalog/author/{}/update", id), "/catalog/authors"),
        (format!("/catalog/genre/{}/delete", id), "/catalog/genres"),
        (format!("/catalog/genre/{}/update", id), "/catalog/genres"),
    ] {
        let response = get(&app, &uri).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(response.location.as_deref(), Some(list), "{}", uri);
    }
}

#[tokio::test]
async fn test_update_author() {
    let (app, store) = setup();
    let author = store.create_author(author_data("Isaac", "Asimov")).await.unwrap();
    let uri = format!("{}/update", author.url());

    let form = get(&app, &uri).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("<title>Update Author</title>"));
    assert!(form.body.contains(r#"value="Asimov""#));

    let response = post(
        &app,
        &uri,
        "first_name=Isaac&family_name=Azimov&date_of_death=1992-04-06",
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location, Some(author.url()));

    let stored = store.get_author(author.id).await.unwrap().expect("author");
    assert_eq!(stored.family_name, "Azimov");
    assert!(stored.date_of_death.is_some());
    assert_eq!(store.list_authors().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_update_keeps_stored_author() {
    let (app, store) = setup();
    let author = store.create_author(author_data("Isaac", "Asimov")).await.unwrap();

    let response = post(
        &app,
        &format!("{}/update", author.url()),
        "first_name=Isaac&family_name=",
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Family name must be specified."));
    assert_eq!(
        store.get_author(author.id).await.unwrap(),
        Some(author.clone())
    );
}

#[tokio::test]
async fn test_update_genre() {
    let (app, store) = setup();
    let genre = add_genre(&store, "SF").await;

    let response = post(
        &app,
        &format!("{}/update", genre.url()),
        "name=Science+Fiction",
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location, Some(genre.url()));
    assert_eq!(
        store.get_genre(genre.id).await.unwrap().map(|g| g.name),
        Some("Science Fiction".to_string())
    );
}

#[tokio::test]
async fn test_update_of_unknown_genre_is_not_found() {
    let (app, _store) = setup();
    let response = post(
        &app,
        &format!("/catalog/genre/{}/update", Uuid::new_v4()),
        "name=Poetry",
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_author_list_is_sorted_with_stable_ties() {
    let (app, store) = setup();
    for (first, family) in [("Zed", "Wells"), ("Isaac", "Asimov"), ("Anna", "Wells"), ("Ben", "Bova")] {
        store.create_author(author_data(first, family)).await.unwrap();
    }

    let response = get(&app, "/catalog/authors").await;
    assert_eq!(response.status, StatusCode::OK);

    let positions: Vec<usize> = ["Asimov, Isaac", "Bova, Ben", "Wells, Zed", "Wells, Anna"]
        .iter()
        .map(|name| response.body.find(*name).expect(name))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
}

#[tokio::test]
async fn test_genre_list_and_detail() {
    let (app, store) = setup();
    let author = store.create_author(author_data("Isaac", "Asimov")).await.unwrap();
    let poetry = add_genre(&store, "Poetry").await;
    add_genre(&store, "Fantasy").await;
    store
        .insert_book(book("Odes", author.id, vec![poetry.id]))
        .await;

    let list = get(&app, "/catalog/genres").await;
    let fantasy = list.body.find(">Fantasy<").expect("fantasy");
    let poetry_pos = list.body.find(">Poetry<").expect("poetry");
    assert!(fantasy < poetry_pos);

    let detail = get(&app, &poetry.url()).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Genre: Poetry"));
    assert!(detail.body.contains("Odes"));
}

#[tokio::test]
async fn test_genre_list_ties_keep_creation_order() {
    let (app, store) = setup();
    let first = add_genre(&store, "Poetry").await;
    let second = add_genre(&store, "Poems").await;
    add_genre(&store, "Drama").await;
    // renaming is not deduplicated, so two genres can share a name
    store
        .update_genre(second.id, GenreData { name: "Poetry".into() })
        .await
        .unwrap();

    let list = get(&app, "/catalog/genres").await;
    assert_eq!(list.status, StatusCode::OK);
    let positions: Vec<usize> = [">Drama<".to_string(), first.url(), second.url()]
        .iter()
        .map(|needle| list.body.find(needle.as_str()).expect(needle))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
}

#[tokio::test]
async fn test_delete_of_missing_author_still_referenced_by_books() {
    let (app, store) = setup();
    let id = Uuid::new_v4();
    store.insert_book(book("Orphaned", id, vec![])).await;

    let response = post(&app, &format!("/catalog/author/{}/delete", id), "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Orphaned"));
    assert!(response.body.contains(r#"data-template="author_delete""#));
    assert!(!response.body.contains("<h2>"));
    assert!(!response.body.contains("<button"));
}
