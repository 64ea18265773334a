// templates/pages/home.rs

use crate::domain::School;
use crate::templates::pages::school_cards;
use crate::templates::{desktop_layout, Nav};
use crate::theme::Theme;
use maud::{html, Markup};

pub struct HomeView<'a> {
    pub theme: Theme,
    pub query: &'a str,
    /// First page, already newest-first and filtered.
    pub schools: &'a [School],
    /// Last id of the first page when more may follow.
    pub next_after: Option<i64>,
    pub total: i64,
}

pub fn home_page(view: &HomeView) -> Markup {
    let nav = Nav {
        theme: view.theme,
        show_add_school: true,
        show_back: false,
    };

    desktop_layout(
        "Find Your School",
        nav,
        html! {
            main {
                h1 style="text-align: center" { "Find Your School" }
                p class="muted" { (view.total) " schools listed" }

                form method="get" action="/" style="margin: 2rem 0" {
                    input
                        type="search"
                        name="q"
                        value=(view.query)
                        placeholder="Search by name, city or address"
                        style="width: 100%; padding: .75rem; font-size: 1rem"
                        hx-get="/"
                        hx-trigger="keyup changed delay:300ms, search"
                        hx-target="#school-grid"
                        hx-select="#school-grid"
                        hx-swap="outerHTML"
                        hx-push-url="true";
                }

                div id="school-grid" class="grid" {
                    (school_cards(view.schools, view.next_after, view.query, false))
                }
            }
        },
    )
}
