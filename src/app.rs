use std::sync::Arc;

use crate::db::Database;
use crate::media::ImageHost;

/// Shared by every worker; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub images: Arc<dyn ImageHost>,
    pub page_size: u32,
    pub max_image_bytes: usize,
}

impl AppState {
    pub fn new(
        db: Database,
        images: Arc<dyn ImageHost>,
        page_size: u32,
        max_image_bytes: usize,
    ) -> Self {
        Self {
            db,
            images,
            page_size: page_size.max(1),
            max_image_bytes,
        }
    }
}
