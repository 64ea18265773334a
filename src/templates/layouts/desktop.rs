use crate::templates::components::navbar;
use crate::theme::Theme;
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// What the navbar shows on a given page.
#[derive(Debug, Clone, Copy)]
pub struct Nav {
    pub theme: Theme,
    pub show_add_school: bool,
    pub show_back: bool,
}

const STYLES: &str = r#"
:root { --bg: #f9fafb; --fg: #111827; --card: #ffffff; --muted: #4b5563; --accent: #2563eb; }
html.dark { --bg: #0f172a; --fg: #e5e7eb; --card: #1e293b; --muted: #94a3b8; --accent: #60a5fa; }
@media (prefers-color-scheme: dark) {
  html:not(.light) { --bg: #0f172a; --fg: #e5e7eb; --card: #1e293b; --muted: #94a3b8; --accent: #60a5fa; }
}
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--fg); }
nav.top { position: sticky; top: 0; background: var(--accent); padding: 1rem; display: flex; justify-content: space-between; align-items: center; }
nav.top a, nav.top button { color: #fff; background: none; border: none; font-size: 1.1rem; cursor: pointer; text-decoration: none; }
main { max-width: 64rem; margin: 0 auto; padding: 2rem 1rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1.5rem; }
.school-card { background: var(--card); border-radius: .5rem; overflow: hidden; position: relative; box-shadow: 0 1px 4px rgba(0,0,0,.15); }
.school-card img { width: 100%; height: 12rem; object-fit: cover; }
.school-card .body { padding: 1rem; }
.school-card .city { color: var(--accent); font-weight: 500; }
.school-card .delete { position: absolute; bottom: 1rem; right: .5rem; }
.muted { color: var(--muted); text-align: center; }
.field-error { color: #dc2626; font-size: .875rem; }
"#;

pub fn desktop_layout(title: &str, nav: Nav, content: Markup) -> Markup {
    let html_class = match nav.theme {
        Theme::Dark => "dark",
        Theme::Light => "light",
        Theme::System => "",
    };

    html! {
        (DOCTYPE)
        html lang="en" class=(html_class) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · School Finder" }
                style { (PreEscaped(STYLES)) }
                script src="https://unpkg.com/htmx.org@1.9.12" defer {}
            }
            body {
                (navbar(nav))
                (content)
            }
        }
    }
}
