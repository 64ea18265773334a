use crate::app::AppState;
use crate::db::schools;
use crate::domain::{validate_new_school, NewSchool, School};
use crate::errors::ServerError;
use crate::listing::project;
use crate::responses::{
    empty_response, html_response, json_error_response, json_response, redirect, ResultResp,
};
use crate::templates::pages::{add_school_page, home_page, school_cards, HomeView};
use crate::theme::Theme;
use astra::Request;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;
use url::{form_urlencoded, Url};

pub const MAX_PAGE_LIMIT: u32 = 100;

/// Room for the JSON fields around a base64 image of the largest allowed size.
const BODY_OVERHEAD: usize = 64 * 1024;

pub fn handle(req: Request, app: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    tracing::debug!(%method, %path, "request");

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => home(&req, app),
        ("GET", ["addSchool"]) => html_response(add_school_page(Theme::from_request(&req))),
        ("POST", ["theme"]) => toggle_theme(&req),

        ("GET", ["schools"]) => as_json(list_schools(&req, app)),
        ("POST", ["schools"]) => as_json(create_school(req, app)),
        ("GET", ["schools", "cards"]) => cards(&req, app),
        ("DELETE", ["schools", id]) => {
            let result = delete_school(app, id);
            if is_htmx(&req) {
                result.and_then(|_| empty_response())
            } else {
                as_json(result.and_then(|_| {
                    json_response(200, &json!({ "message": "School deleted successfully" }))
                }))
            }
        }

        _ => Err(ServerError::NotFound),
    }
}

/// JSON routes answer errors in JSON rather than with the HTML error page.
fn as_json(result: ResultResp) -> ResultResp {
    result.or_else(|e| Ok(json_error_response(e)))
}

fn home(req: &Request, app: &AppState) -> ResultResp {
    let params = parse_query(req);
    let query = params.get("q").map(|q| q.trim()).unwrap_or("");

    let (page, total) = app.db.with_conn(|conn| {
        let page = schools::list_schools_after(conn, 0, app.page_size)?;
        let total = schools::count_schools(conn)?;
        Ok((page, total))
    })?;

    let next_after = next_after(&page, app.page_size);
    let shown = newest_first_matching(page, query);

    html_response(home_page(&HomeView {
        theme: Theme::from_request(req),
        query,
        schools: &shown,
        next_after,
        total,
    }))
}

/// Infinite-scroll fragment. The sentinel asks for the rows after the last
/// id it has seen, so deleting a card never shifts what comes next.
/// `page=N` is still accepted for plain offset paging.
fn cards(req: &Request, app: &AppState) -> ResultResp {
    let params = parse_query(req);
    let query = params.get("q").map(|q| q.trim()).unwrap_or("");
    let seen_before = params.get("seen").is_some_and(|v| v == "1");

    let batch = match params.get("after") {
        Some(raw) => {
            let after_id: i64 = raw
                .trim()
                .parse()
                .map_err(|_| ServerError::BadRequest("Invalid cursor".into()))?;
            app.db
                .with_conn(|conn| schools::list_schools_after(conn, after_id, app.page_size))?
        }
        None => {
            let page = page_param(&params)?;
            app.db
                .with_conn(|conn| schools::list_schools(conn, page, app.page_size))?
        }
    };

    let next_after = next_after(&batch, app.page_size);
    let shown = newest_first_matching(batch, query);

    html_response(school_cards(&shown, next_after, query, seen_before))
}

fn list_schools(req: &Request, app: &AppState) -> ResultResp {
    let params = parse_query(req);
    let page = page_param(&params)?;
    let limit = match params.get("limit") {
        None => app.page_size,
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ServerError::BadRequest("Invalid limit".into()))?,
    }
    .clamp(1, MAX_PAGE_LIMIT);

    let page = app
        .db
        .with_conn(|conn| schools::list_schools(conn, page, limit))?;

    json_response(200, &page)
}

fn max_body_bytes(app: &AppState) -> usize {
    app.max_image_bytes * 4 / 3 + BODY_OVERHEAD
}

fn create_school(req: Request, app: &AppState) -> ResultResp {
    let limit = max_body_bytes(app);
    let mut body = Vec::new();
    req.into_body()
        .reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Could not read body: {e}")))?;
    if body.len() > limit {
        tracing::warn!(limit, "school submission body too large");
        return Err(ServerError::PayloadTooLarge);
    }

    let draft: NewSchool = serde_json::from_slice(&body)
        .map_err(|_| ServerError::BadRequest("Invalid JSON".into()))?;

    let image = validate_new_school(&draft, app.max_image_bytes).map_err(ServerError::Validation)?;
    let image_url = app.images.upload(&image)?;

    let id = app.db.with_conn(|conn| {
        schools::insert_school(conn, &draft, &image_url, Utc::now().naive_utc())
    })?;
    tracing::info!(id, name = draft.name.trim(), "school added");

    json_response(201, &json!({ "message": "School added successfully" }))
}

fn delete_school(app: &AppState, raw_id: &str) -> Result<(), ServerError> {
    let id: i64 = raw_id
        .parse()
        .map_err(|_| ServerError::BadRequest("Invalid ID".into()))?;

    let deleted = app.db.with_conn(|conn| schools::delete_school(conn, id))?;
    if !deleted {
        return Err(ServerError::SchoolNotFound(id));
    }

    tracing::info!(id, "school deleted");
    Ok(())
}

fn toggle_theme(req: &Request) -> ResultResp {
    let theme = Theme::from_request(req).toggled();
    let back = req
        .headers()
        .get("Referer")
        .and_then(|v| v.to_str().ok())
        .and_then(local_path)
        .unwrap_or_else(|| "/".to_string());

    redirect(&back, Some(theme.set_cookie().as_str()))
}

/// Path and query of a Referer, so the redirect never leaves this site.
fn local_path(referer: &str) -> Option<String> {
    if referer.starts_with('/') && !referer.starts_with("//") {
        return Some(referer.to_string());
    }
    let url = Url::parse(referer).ok()?;
    Some(match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    })
}

fn is_htmx(req: &Request) -> bool {
    req.headers().contains_key("HX-Request")
}

/// Last id of a full page, where the next one starts. A short page is the end.
fn next_after(batch: &[School], page_size: u32) -> Option<i64> {
    if batch.len() < page_size as usize {
        return None;
    }
    batch.last().map(|s| s.id)
}

fn newest_first_matching(mut batch: Vec<School>, query: &str) -> Vec<School> {
    batch.reverse();
    project(&batch, query)
}

fn page_param(params: &HashMap<String, String>) -> Result<u32, ServerError> {
    match params.get("page") {
        None => Ok(1),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(ServerError::BadRequest("Invalid page".into())),
        },
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
