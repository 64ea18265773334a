// JSON routes under /schools.
use crate::db::schools::count_schools;
use crate::router::handle;
use crate::tests::utils::{body_json, draft, json_request, request, seed, test_app, TINY_GIF};
use rstest::rstest;
use serde_json::json;

#[test]
fn get_schools_pages_oldest_first() {
    let app = test_app(10);
    let ids = seed(&app, 12);

    let resp = handle(request("GET", "/schools?page=2&limit=5"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/json"
    );

    let body = body_json(resp);
    let got: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(got, ids[5..10].to_vec());
    assert_eq!(body[0]["name"], "School 6");
    assert!(body[0].get("email_id").is_none());
}

#[test]
fn get_schools_defaults_to_first_page_of_configured_size() {
    let app = test_app(4);
    seed(&app, 6);

    let body = body_json(handle(request("GET", "/schools"), &app).unwrap());
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[test]
fn get_schools_clamps_limit() {
    let app = test_app(10);
    seed(&app, 3);

    let body = body_json(handle(request("GET", "/schools?limit=0"), &app).unwrap());
    assert_eq!(body.as_array().unwrap().len(), 1);

    let body = body_json(handle(request("GET", "/schools?limit=5000"), &app).unwrap());
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[test]
fn get_schools_past_the_end_is_empty() {
    let app = test_app(10);
    seed(&app, 3);

    let body = body_json(handle(request("GET", "/schools?page=9"), &app).unwrap());
    assert_eq!(body, json!([]));
}

#[rstest]
#[case("/schools?page=0")]
#[case("/schools?page=-1")]
#[case("/schools?page=two")]
#[case("/schools?limit=ten")]
fn get_schools_rejects_bad_paging(#[case] uri: &str) {
    let app = test_app(10);

    let resp = handle(request("GET", uri), &app).unwrap();
    assert_eq!(resp.status(), 400);
    assert!(body_json(resp)["error"].is_string());
}

#[test]
fn post_school_creates_it() {
    let app = test_app(10);
    let body = serde_json::to_value(draft("Lotus Valley", "Noida")).unwrap();

    let resp = handle(json_request("POST", "/schools", &body), &app).unwrap();

    assert_eq!(resp.status(), 201);
    assert_eq!(
        body_json(resp),
        json!({ "message": "School added successfully" })
    );

    let listed = body_json(handle(request("GET", "/schools"), &app).unwrap());
    assert_eq!(listed[0]["name"], "Lotus Valley");
    assert_eq!(listed[0]["city"], "Noida");
    assert_eq!(listed[0]["image"], TINY_GIF);
}

#[test]
fn post_school_reports_every_invalid_field() {
    let app = test_app(10);
    let body = json!({
        "name": "  ",
        "address": "2 Hill Road",
        "city": "Shimla",
        "state": "HP",
        "contact": "98-76",
        "email_id": "nope",
        "imageBase64": "data:text/plain;base64,aGk="
    });

    let resp = handle(json_request("POST", "/schools", &body), &app).unwrap();
    assert_eq!(resp.status(), 400);

    let err = body_json(resp);
    assert_eq!(err["error"], "Validation failed");
    assert_eq!(err["fields"]["name"], "School name is required");
    assert_eq!(err["fields"]["contact"], "Contact must be a number");
    assert_eq!(err["fields"]["email_id"], "Invalid email");
    assert_eq!(err["fields"]["image"], "File must be an image");
    assert!(err["fields"].get("city").is_none());

    let count = app.db.with_conn(|conn| count_schools(conn)).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn post_school_rejects_oversized_image() {
    let app = test_app(10);
    let mut school = draft("Big Pic", "Goa");
    school.image_base64 = format!("data:image/png;base64,{}", "A".repeat(2000));

    let resp = handle(
        json_request("POST", "/schools", &serde_json::to_value(school).unwrap()),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["fields"]["image"], "Image size is too large");
}

#[test]
fn post_school_refuses_body_over_the_cap_before_decoding() {
    // 1 KiB images: the cap is 1365 bytes of base64 plus 64 KiB.
    let app = test_app(10);
    let mut school = draft("Huge Upload", "Goa");
    school.image_base64 = format!("data:image/png;base64,{}", "A".repeat(80 * 1024));

    let resp = handle(
        json_request("POST", "/schools", &serde_json::to_value(school).unwrap()),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 413);
    assert_eq!(body_json(resp), json!({ "error": "Request body too large" }));
    let count = app.db.with_conn(|conn| count_schools(conn)).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn post_school_rejects_invalid_json() {
    let app = test_app(10);
    let req = http::Request::builder()
        .method("POST")
        .uri("/schools")
        .body(astra::Body::from("{not json"))
        .unwrap();

    let resp = handle(req, &app).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp), json!({ "error": "Invalid JSON" }));
}

#[test]
fn delete_school_removes_it() {
    let app = test_app(10);
    let ids = seed(&app, 2);

    let resp = handle(request("DELETE", &format!("/schools/{}", ids[0])), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        body_json(resp),
        json!({ "message": "School deleted successfully" })
    );

    let listed = body_json(handle(request("GET", "/schools"), &app).unwrap());
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], ids[1]);
}

#[test]
fn delete_missing_school_is_404() {
    let app = test_app(10);

    let resp = handle(request("DELETE", "/schools/77"), &app).unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp), json!({ "error": "School not found" }));
}

#[test]
fn delete_with_bad_id_is_400() {
    let app = test_app(10);

    let resp = handle(request("DELETE", "/schools/abc"), &app).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp), json!({ "error": "Invalid ID" }));
}

#[test]
fn htmx_delete_answers_with_empty_body() {
    let app = test_app(10);
    let ids = seed(&app, 1);

    let req = http::Request::builder()
        .method("DELETE")
        .uri(format!("/schools/{}", ids[0]))
        .header("HX-Request", "true")
        .body(astra::Body::empty())
        .unwrap();

    let resp = handle(req, &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(crate::tests::utils::body_string(resp), "");
}
