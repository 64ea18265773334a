// HTML pages and htmx fragments.
use crate::router::handle;
use crate::tests::utils::{body_string, request, seed, test_app};
use rstest::rstest;
use scraper::{Html, Selector};

fn select_texts(html: &str, selector: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse(selector).unwrap();
    doc.select(&sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

fn card_names(html: &str) -> Vec<String> {
    select_texts(html, ".school-card h3")
}

#[test]
fn home_shows_first_page_newest_first_with_sentinel() {
    let app = test_app(3);
    seed(&app, 5);

    let resp = handle(request("GET", "/"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let html = body_string(resp);

    assert_eq!(card_names(&html), vec!["School 3", "School 2", "School 1"]);
    assert!(html.contains("Find Your School"));
    assert!(html.contains("hx-get=\"/schools/cards?after=3&amp;seen=1\""));
    assert!(html.contains("5 schools listed"));
    assert!(!html.contains("You've reached the end."));
}

#[test]
fn home_on_empty_database_says_no_schools() {
    let app = test_app(3);

    let html = body_string(handle(request("GET", "/"), &app).unwrap());

    assert_eq!(select_texts(&html, ".no-results"), vec!["No schools found."]);
    assert!(card_names(&html).is_empty());
}

#[test]
fn home_filters_by_query() {
    let app = test_app(10);
    seed(&app, 4);

    let html = body_string(handle(request("GET", "/?q=KOCHI"), &app).unwrap());

    assert_eq!(card_names(&html), vec!["School 4", "School 2"]);
    assert!(html.contains("You've reached the end."));
    let doc = Html::parse_document(&html);
    let input = doc
        .select(&Selector::parse("input[name=q]").unwrap())
        .next()
        .unwrap();
    assert_eq!(input.value().attr("value"), Some("KOCHI"));
}

#[test]
fn cards_fragment_serves_later_pages() {
    let app = test_app(2);
    seed(&app, 5);

    let second = body_string(handle(request("GET", "/schools/cards?after=2&seen=1"), &app).unwrap());
    assert_eq!(card_names(&second), vec!["School 4", "School 3"]);
    assert!(second.contains("/schools/cards?after=4&amp;seen=1"));
    assert!(!second.contains("<html"));

    let third = body_string(handle(request("GET", "/schools/cards?after=4&seen=1"), &app).unwrap());
    assert_eq!(card_names(&third), vec!["School 5"]);
    assert!(third.contains("You've reached the end."));
}

#[test]
fn cards_fragment_still_accepts_page_numbers() {
    let app = test_app(2);
    seed(&app, 5);

    let html = body_string(handle(request("GET", "/schools/cards?page=2"), &app).unwrap());
    assert_eq!(card_names(&html), vec!["School 4", "School 3"]);
    assert!(html.contains("/schools/cards?after=4&amp;seen=1"));
}

#[test]
fn cards_fragment_carries_the_query_forward() {
    let app = test_app(2);
    seed(&app, 6);

    let html = body_string(
        handle(request("GET", "/schools/cards?after=2&seen=1&q=thrissur"), &app).unwrap(),
    );

    assert_eq!(card_names(&html), vec!["School 3"]);
    assert!(html.contains("/schools/cards?after=4&amp;seen=1&amp;q=thrissur"));
}

#[test]
fn deleting_a_card_does_not_skip_the_next_one() {
    let app = test_app(2);
    let ids = seed(&app, 5);

    let home = body_string(handle(request("GET", "/"), &app).unwrap());
    assert!(home.contains("/schools/cards?after=2&amp;seen=1"));

    let req = http::Request::builder()
        .method("DELETE")
        .uri(format!("/schools/{}", ids[0]))
        .header("HX-Request", "true")
        .body(astra::Body::empty())
        .unwrap();
    assert_eq!(handle(req, &app).unwrap().status(), 200);

    let next = body_string(handle(request("GET", "/schools/cards?after=2&seen=1"), &app).unwrap());
    assert_eq!(card_names(&next), vec!["School 4", "School 3"]);
}

#[test]
fn search_with_no_match_anywhere_ends_with_no_schools_found() {
    let app = test_app(2);
    seed(&app, 4);

    let home = body_string(handle(request("GET", "/?q=nomatch"), &app).unwrap());
    assert!(card_names(&home).is_empty());
    assert!(home.contains("/schools/cards?after=2&amp;q=nomatch"));

    let middle =
        body_string(handle(request("GET", "/schools/cards?after=2&q=nomatch"), &app).unwrap());
    assert!(middle.contains("/schools/cards?after=4&amp;q=nomatch"));

    let last =
        body_string(handle(request("GET", "/schools/cards?after=4&q=nomatch"), &app).unwrap());
    assert_eq!(select_texts(&last, ".no-results"), vec!["No schools found."]);
    assert!(!last.contains("You've reached the end."));
}

#[test]
fn search_with_earlier_matches_ends_with_end_message() {
    let app = test_app(2);
    seed(&app, 4);

    let last = body_string(
        handle(request("GET", "/schools/cards?after=4&seen=1&q=kochi"), &app).unwrap(),
    );

    assert!(last.contains("You've reached the end."));
    assert!(select_texts(&last, ".no-results").is_empty());
}

#[rstest]
#[case("/schools/cards?page=0")]
#[case("/schools/cards?after=abc")]
fn cards_fragment_rejects_bad_cursor(#[case] uri: &str) {
    let app = test_app(2);

    let err = handle(request("GET", uri), &app).unwrap_err();
    assert_eq!(err.status(), 400);
}

#[test]
fn cards_have_htmx_delete_with_confirmation() {
    let app = test_app(5);
    let ids = seed(&app, 1);

    let html = body_string(handle(request("GET", "/"), &app).unwrap());
    let doc = Html::parse_document(&html);
    let button = doc
        .select(&Selector::parse(".school-card button").unwrap())
        .next()
        .unwrap();

    let expected = format!("/schools/{}", ids[0]);
    assert_eq!(button.value().attr("hx-delete"), Some(expected.as_str()));
    assert_eq!(
        button.value().attr("hx-confirm"),
        Some("Are you sure you want to delete this school?")
    );
}

#[test]
fn add_school_page_has_the_form() {
    let app = test_app(5);

    let html = body_string(handle(request("GET", "/addSchool"), &app).unwrap());

    for id in ["name", "address", "city", "state", "contact", "email_id", "image"] {
        let sel = format!("#add-school #{id}");
        assert_eq!(select_texts(&html, &sel).len(), 1, "missing field {id}");
    }
    assert!(html.contains("aria-label=\"Go back\""));
}

#[test]
fn theme_toggle_sets_cookie_and_redirects_back() {
    let app = test_app(5);
    let req = http::Request::builder()
        .method("POST")
        .uri("/theme")
        .header("Referer", "http://localhost:3000/addSchool")
        .header("Cookie", "theme=dark")
        .body(astra::Body::empty())
        .unwrap();

    let resp = handle(req, &app).unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/addSchool");
    let cookie = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("theme=light;"));
}

#[test]
fn dark_theme_cookie_marks_the_page() {
    let app = test_app(5);
    let req = http::Request::builder()
        .uri("/")
        .header("Cookie", "theme=dark")
        .body(astra::Body::empty())
        .unwrap();

    let html = body_string(handle(req, &app).unwrap());

    let doc = Html::parse_document(&html);
    let root = doc.select(&Selector::parse("html").unwrap()).next().unwrap();
    assert_eq!(root.value().attr("class"), Some("dark"));
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app(5);

    let err = handle(request("GET", "/nowhere"), &app).unwrap_err();
    assert_eq!(err.status(), 404);
}
