use crate::app::AppState;
use crate::db::connection::{init_db, Database};
use crate::db::schools::insert_school;
use crate::domain::NewSchool;
use crate::media::InlineHost;
use astra::{Body, Request, Response};
use chrono::Utc;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// 1x1 transparent GIF.
pub const TINY_GIF: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Initialize a fresh test DB file using the production schema.
/// Each call gets its own file so tests can run in parallel.
pub fn init_test_db() -> Database {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let path = std::env::temp_dir().join(format!(
        "school_finder_test_{}_{}_{}.sqlite3",
        std::process::id(),
        nanos,
        COUNTER.fetch_add(1, Ordering::Relaxed),
    ));

    let db = Database::new(path.to_string_lossy());
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn test_app(page_size: u32) -> AppState {
    AppState::new(init_test_db(), Arc::new(InlineHost), page_size, 1024)
}

pub fn draft(name: &str, city: &str) -> NewSchool {
    NewSchool {
        name: name.into(),
        address: format!("1 {name} Lane"),
        city: city.into(),
        state: "Kerala".into(),
        contact: "0471234567".into(),
        email_id: "desk@school.in".into(),
        image_base64: TINY_GIF.into(),
    }
}

/// Insert `n` schools named "School 1".."School n"; returns their ids.
pub fn seed(app: &AppState, n: usize) -> Vec<i64> {
    app.db
        .with_conn(|conn| {
            (1..=n)
                .map(|i| {
                    let city = if i % 2 == 0 { "Kochi" } else { "Thrissur" };
                    let school = draft(&format!("School {i}"), city);
                    insert_school(conn, &school, "https://img/x.png", Utc::now().naive_utc())
                })
                .collect()
        })
        .unwrap()
}

pub fn request(method: &str, uri: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}
