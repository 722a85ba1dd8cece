//! In-process stand-in for the books service, so the suite can be exercised
//! without a live deployment.

use std::net::TcpListener as StdListener;
use std::sync::{Arc, Mutex};
use std::thread;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Map, Value};

pub const GENRES: [&str; 7] = [
    "Fiction",
    "Children",
    "Biography",
    "Science",
    "Science Fiction",
    "Fantasy",
    "Other",
];

const FIELDS: [&str; 4] = ["title", "authors", "ISBN", "genre"];

/// How the stand-in deviates from a conforming service
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Conforming,
    /// Stores books whatever their genre
    AcceptAnyGenre,
    /// Answers a malformed payload with an HTML 500 page
    HtmlServerError,
    /// Answers a malformed payload with a plain-text 400
    PlainBadRequest,
    /// Reports the same id for every created book
    RepeatedId,
    /// Reads a single book back with a different author
    WrongAuthors,
    /// Starts out holding one book the suite did not create
    ExtraBook,
    /// Answers DELETE with 200 but keeps the book
    IgnoreDelete,
}

struct Service {
    behavior: Behavior,
    store: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    next_id: u64,
    books: Vec<Value>,
}

/// Starts a fresh, empty service and returns its base URL
pub fn spawn(behavior: Behavior) -> String {
    let listener = StdListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let mut store = Store::default();
    if behavior == Behavior::ExtraBook {
        store.next_id += 1;
        store.books.push(json!({
            "id": store.next_id.to_string(),
            "title": "The Prince and the Pauper",
            "authors": "Mark Twain",
            "ISBN": "978-0-14-043669-0",
            "genre": "Fiction",
        }));
    }

    let service = Arc::new(Service {
        behavior,
        store: Mutex::new(store),
    });
    let app = Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", get(get_book).delete(delete_book))
        .with_state(service);

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}", addr)
}

/// Base URL where nothing is listening
pub fn unreachable_url() -> String {
    let listener = StdListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}", addr)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn malformed(behavior: Behavior) -> Response {
    match behavior {
        Behavior::HtmlServerError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Internal Server Error</h1>"),
        )
            .into_response(),
        Behavior::PlainBadRequest => (StatusCode::BAD_REQUEST, "Bad Request").into_response(),
        _ => error(StatusCode::BAD_REQUEST, "Malformed data"),
    }
}

async fn create_book(State(service): State<Arc<Service>>, body: Bytes) -> Response {
    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(payload)) => payload,
        _ => return malformed(service.behavior),
    };

    let mut book = Map::new();
    for field in FIELDS.iter() {
        match payload.get(*field) {
            Some(Value::String(value)) => {
                book.insert(field.to_string(), Value::String(value.clone()));
            }
            _ => return malformed(service.behavior),
        }
    }

    let genre = book["genre"].as_str().unwrap_or_default();
    if service.behavior != Behavior::AcceptAnyGenre && !GENRES.contains(&genre) {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "Invalid Genre");
    }

    let mut store = service.store.lock().unwrap();
    store.next_id += 1;
    let id = store.next_id.to_string();
    book.insert(String::from("id"), Value::String(id.clone()));
    store.books.push(Value::Object(book));

    if service.behavior == Behavior::RepeatedId {
        return (StatusCode::CREATED, Json(json!({ "id": "1" }))).into_response();
    }

    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}

async fn list_books(State(service): State<Arc<Service>>) -> Response {
    let store = service.store.lock().unwrap();

    Json(Value::Array(store.books.clone())).into_response()
}

async fn get_book(State(service): State<Arc<Service>>, Path(id): Path<String>) -> Response {
    let store = service.store.lock().unwrap();

    match store.books.iter().find(|book| book["id"] == id.as_str()) {
        Some(book) => {
            let mut book = book.clone();
            if service.behavior == Behavior::WrongAuthors {
                book["authors"] = json!("Samuel Clemens");
            }
            Json(book).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Book not found"),
    }
}

async fn delete_book(State(service): State<Arc<Service>>, Path(id): Path<String>) -> Response {
    let mut store = service.store.lock().unwrap();

    match store.books.iter().position(|book| book["id"] == id.as_str()) {
        Some(index) => {
            if service.behavior != Behavior::IgnoreDelete {
                store.books.remove(index);
            }
            Json(json!({ "id": id })).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Book not found"),
    }
}
