pub mod add_school;
pub mod cards;
pub mod home;

pub use add_school::add_school_page;
pub use cards::school_cards;
pub use home::{home_page, HomeView};
