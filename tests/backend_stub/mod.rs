// Not every test binary uses every helper here.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Read as _;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::Value;

/// Knobs for backend misbehavior the client must surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryStubConfig {
    /// Answer `POST /api/addManual` with the backend's lookup-failure body.
    pub reject_manual_adds: bool,
}

/// In-memory state behind the stub, shared with the test for assertions.
#[derive(Debug, Default)]
pub struct LibraryState {
    pub books: Vec<Value>,
    /// ISBN lookup table backing `POST /api/addBook`.
    pub catalog: HashMap<String, Value>,
    pub next_id: i64,
    /// Every request as "METHOD /path", in arrival order.
    pub requests: Vec<String>,
}

/// A library backend on a loopback port, speaking just enough of the REST
/// surface for the CLI: books listing, id lookup, manual add, ISBN add with
/// the fixed duplicate/not-found body strings, copy add, read marking, edit,
/// and delete.
pub struct LibraryStub {
    pub port: u16,
    state: Arc<Mutex<LibraryState>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl LibraryStub {
    pub fn spawn(config: LibraryStubConfig) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start library stub server");
        let port = server
            .server_addr()
            .to_ip()
            .expect("library stub listen addr")
            .port();

        let state = Arc::new(Mutex::new(LibraryState {
            next_id: 1,
            ..LibraryState::default()
        }));

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let thread_state = Arc::clone(&state);
        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                let (path, query) = match url.split_once('?') {
                    Some((path, query)) => (path.to_owned(), query.to_owned()),
                    None => (url.clone(), String::new()),
                };
                let method = request.method().to_string();

                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);

                let reply = {
                    let mut state = thread_state.lock().expect("lock library state");
                    state.requests.push(format!("{method} {path}"));
                    handle_request(&mut state, config, &method, &path, &query, &body)
                };

                match reply {
                    Reply::Text(status, text) => {
                        let _ = request.respond(
                            tiny_http::Response::from_string(text).with_status_code(status),
                        );
                    }
                    Reply::Json(status, json) => {
                        let header = tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"application/json"[..],
                        )
                        .expect("build header");
                        let _ = request.respond(
                            tiny_http::Response::from_string(json.to_string())
                                .with_status_code(status)
                                .with_header(header),
                        );
                    }
                }
            }
        });

        Self {
            port,
            state,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Put a book on the shelf, assigning an id when the fixture omits one.
    pub fn seed(&self, mut book: Value) -> i64 {
        let mut state = self.state.lock().expect("lock library state");
        let id = match book.get("id").and_then(Value::as_i64) {
            Some(id) => id,
            None => {
                let id = state.next_id;
                book["id"] = Value::from(id);
                id
            }
        };
        state.next_id = state.next_id.max(id + 1);
        state.books.push(book);
        id
    }

    /// Register ISBN metadata so a scan lookup can resolve it.
    pub fn seed_catalog(&self, isbn: &str, metadata: Value) {
        let mut state = self.state.lock().expect("lock library state");
        state.catalog.insert(isbn.to_owned(), metadata);
    }

    pub fn books(&self) -> Vec<Value> {
        self.state.lock().expect("lock library state").books.clone()
    }

    pub fn book(&self, id: i64) -> Option<Value> {
        self.books()
            .into_iter()
            .find(|book| book.get("id").and_then(Value::as_i64) == Some(id))
    }

    pub fn requests(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("lock library state")
            .requests
            .clone()
    }

    pub fn request_count(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }
}

impl Drop for LibraryStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

enum Reply {
    Text(u16, String),
    Json(u16, Value),
}

fn handle_request(
    state: &mut LibraryState,
    config: LibraryStubConfig,
    method: &str,
    path: &str,
    query: &str,
    body: &str,
) -> Reply {
    match (method, path) {
        ("GET", "/api/books") => Reply::Json(200, Value::Array(state.books.clone())),

        ("GET", "/api/getBook") => {
            let Some(id) = query_param(query, "id").and_then(|raw| raw.parse::<i64>().ok()) else {
                return Reply::Text(400, "missing id".to_owned());
            };
            match find_book(state, id) {
                Some(idx) => Reply::Json(200, state.books[idx].clone()),
                None => Reply::Text(404, "book not found".to_owned()),
            }
        }

        ("POST", "/api/addManual") => {
            if config.reject_manual_adds {
                return Reply::Text(200, "Book could not be found".to_owned());
            }
            let Ok(mut record) = serde_json::from_str::<Value>(body) else {
                return Reply::Text(400, "invalid json".to_owned());
            };
            record["id"] = Value::from(state.next_id);
            state.next_id += 1;
            state.books.push(record);
            Reply::Text(200, "Added book".to_owned())
        }

        ("POST", "/api/addBook") => {
            let Some(isbn) = query_param(query, "isbn") else {
                return Reply::Text(400, "missing isbn".to_owned());
            };
            let on_shelf = state
                .books
                .iter()
                .any(|book| book.get("isbn").and_then(Value::as_str) == Some(isbn.as_str()));
            if on_shelf {
                return Reply::Text(200, "This book already exists".to_owned());
            }
            match state.catalog.get(&isbn).cloned() {
                Some(mut record) => {
                    record["id"] = Value::from(state.next_id);
                    record["isbn"] = Value::from(isbn);
                    state.next_id += 1;
                    state.books.push(record);
                    Reply::Text(200, "Added book".to_owned())
                }
                None => Reply::Text(200, "There was a problem adding the book".to_owned()),
            }
        }

        ("POST", "/api/addCopy") => {
            let Some(isbn) = query_param(query, "isbn") else {
                return Reply::Text(400, "missing isbn".to_owned());
            };
            let entry = state
                .books
                .iter_mut()
                .find(|book| book.get("isbn").and_then(Value::as_str) == Some(isbn.as_str()));
            match entry {
                Some(book) => {
                    let copies = book.get("copies").and_then(Value::as_i64).unwrap_or(1);
                    book["copies"] = Value::from(copies + 1);
                    Reply::Text(200, "Added copy".to_owned())
                }
                None => Reply::Text(404, "book not found".to_owned()),
            }
        }

        ("POST", "/api/markRead") => {
            let Ok(payload) = serde_json::from_str::<Value>(body) else {
                return Reply::Text(400, "invalid json".to_owned());
            };
            let id = payload.get("id").and_then(Value::as_i64);
            let read = payload.get("read").and_then(Value::as_i64);
            let (Some(id), Some(read)) = (id, read) else {
                return Reply::Text(400, "missing id or read".to_owned());
            };
            match find_book(state, id) {
                Some(idx) => {
                    state.books[idx]["read"] = Value::from(read);
                    state.books[idx]["isRead"] = Value::from(read == 1);
                    Reply::Text(200, "Marked book".to_owned())
                }
                None => Reply::Text(404, "book not found".to_owned()),
            }
        }

        ("POST", "/api/editBook") => {
            let Ok(update) = serde_json::from_str::<Value>(body) else {
                return Reply::Text(400, "invalid json".to_owned());
            };
            let Some(id) = update.get("id").and_then(Value::as_i64) else {
                return Reply::Text(400, "missing id".to_owned());
            };
            let Some(idx) = find_book(state, id) else {
                return Reply::Text(404, "book not found".to_owned());
            };
            if let (Some(book), Some(fields)) =
                (state.books[idx].as_object_mut(), update.as_object())
            {
                for (key, value) in fields {
                    book.insert(key.clone(), value.clone());
                }
            }
            Reply::Text(200, "Updated book".to_owned())
        }

        ("DELETE", "/api/deleteBook") => {
            let Ok(payload) = serde_json::from_str::<Value>(body) else {
                return Reply::Text(400, "invalid json".to_owned());
            };
            let Some(id) = payload.get("id").and_then(Value::as_i64) else {
                return Reply::Text(400, "missing id".to_owned());
            };
            match find_book(state, id) {
                Some(idx) => {
                    state.books.remove(idx);
                    Reply::Text(200, "Deleted book".to_owned())
                }
                None => Reply::Text(404, "book not found".to_owned()),
            }
        }

        _ => Reply::Text(404, "not found".to_owned()),
    }
}

fn find_book(state: &LibraryState, id: i64) -> Option<usize> {
    state
        .books
        .iter()
        .position(|book| book.get("id").and_then(Value::as_i64) == Some(id))
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name {
            Some(value.to_owned())
        } else {
            None
        }
    })
}
