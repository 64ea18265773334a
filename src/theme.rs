// src/theme.rs
use astra::Request;

pub const THEME_COOKIE: &str = "theme";

/// Colour scheme preference carried in the `theme` cookie.
/// `System` means no cookie yet; the stylesheet follows the OS setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn from_request(req: &Request) -> Self {
        req.headers()
            .get_all("Cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(Self::from_cookie_header)
            .unwrap_or_default()
    }

    fn from_cookie_header(header: &str) -> Option<Self> {
        header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            if name != THEME_COOKIE {
                return None;
            }
            match value {
                "dark" => Some(Theme::Dark),
                "light" => Some(Theme::Light),
                _ => None,
            }
        })
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light | Theme::System => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// `Set-Cookie` value persisting this choice for a year.
    pub fn set_cookie(self) -> String {
        let value = match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "",
        };
        format!("{THEME_COOKIE}={value}; Path=/; Max-Age=31536000; SameSite=Lax")
    }
}
