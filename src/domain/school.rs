// src/domain/school.rs

use serde::{Deserialize, Serialize};

/// One school as the listing endpoint returns it.
/// Immutable once fetched; list code only changes which schools are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    /// Public URL handed back by the image host.
    pub image: String,
}

impl School {
    /// Lowercased `name city address`, the text the search box matches against.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.name, self.city, self.address).to_lowercase()
    }
}

/// Submission payload of the add-school form.
///
/// Every field defaults to empty so a missing field surfaces as a
/// validation message instead of a JSON error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    /// `data:image/...;base64,...` produced by the browser's FileReader.
    #[serde(rename = "imageBase64")]
    pub image_base64: String,
}
