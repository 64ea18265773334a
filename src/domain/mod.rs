pub mod school;
pub mod validation;

pub use school::{NewSchool, School};
pub use validation::{validate_new_school, ValidationErrors, DEFAULT_MAX_IMAGE_BYTES};
