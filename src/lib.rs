pub mod config;
pub mod logger;
pub mod opener;
pub mod post;
pub mod prompt;
pub mod scaffold;
pub mod text_utils;
mod test_data;
