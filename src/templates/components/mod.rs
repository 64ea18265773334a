use maud::{html, Markup};
use url::form_urlencoded;

use crate::domain::School;
use crate::templates::layouts::desktop::Nav;

pub mod error;

pub use error::html_error_response;

pub fn navbar(nav: Nav) -> Markup {
    html! {
        nav class="top" {
            div {
                @if nav.show_back {
                    a href="/" aria-label="Go back" { "‹ " }
                }
                a href="/" { strong { "School Finder" } }
            }
            div {
                form method="post" action="/theme" style="display: inline" {
                    button type="submit" aria-label="Toggle Dark Mode" {
                        @if nav.theme.is_dark() { "☀" } @else { "☾" }
                    }
                }
                @if nav.show_add_school {
                    " "
                    a href="/addSchool" { "Add School +" }
                }
            }
        }
    }
}

pub fn school_card(school: &School) -> Markup {
    html! {
        div class="school-card" title=(format!("{} - {}", school.name, school.city)) {
            img src=(school.image) alt=(school.name) loading="lazy";
            div class="body" {
                h3 { (school.name) }
                p class="muted" style="text-align: left" { (school.address) }
                p class="city" { (school.city) }
            }
            div class="delete" {
                button
                    hx-delete=(format!("/schools/{}", school.id))
                    hx-confirm="Are you sure you want to delete this school?"
                    hx-target="closest .school-card"
                    hx-swap="outerHTML"
                    aria-label="Delete school"
                { "🗑" }
            }
        }
    }
}

/// URL of the cards fragment following `after_id`, carrying the search
/// query and whether any card has been shown yet.
pub fn cards_url(after_id: i64, query: &str, seen_any: bool) -> String {
    let mut qs = form_urlencoded::Serializer::new(String::new());
    qs.append_pair("after", &after_id.to_string());
    if seen_any {
        qs.append_pair("seen", "1");
    }
    if !query.is_empty() {
        qs.append_pair("q", query);
    }
    format!("/schools/cards?{}", qs.finish())
}

/// Placeholder that fetches the next page once scrolled into view.
pub fn load_more_sentinel(after_id: i64, query: &str, seen_any: bool) -> Markup {
    html! {
        div class="sentinel muted"
            hx-get=(cards_url(after_id, query, seen_any))
            hx-trigger="revealed"
            hx-swap="outerHTML"
        { "Loading more…" }
    }
}

pub fn end_of_list() -> Markup {
    html! {
        p class="muted end" { "You've reached the end." }
    }
}

pub fn no_results() -> Markup {
    html! {
        p class="muted no-results" { "No schools found." }
    }
}

pub fn form_input(label: &str, id: &str, input_type: &str) -> Markup {
    html! {
        div {
            label for=(id) { (label) }
            br;
            input type=(input_type) id=(id) name=(id);
            p class="field-error" id=(format!("err-{id}")) {}
        }
    }
}

pub fn form_textarea(label: &str, id: &str) -> Markup {
    html! {
        div {
            label for=(id) { (label) }
            br;
            textarea id=(id) name=(id) rows="4" {}
            p class="field-error" id=(format!("err-{id}")) {}
        }
    }
}
