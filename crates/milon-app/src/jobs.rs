pub mod daily;
pub mod list_models;
pub mod quiz;

pub use daily::handle_daily;
pub use list_models::{handle_list_models, log_available_models};
pub use quiz::handle_quiz;
