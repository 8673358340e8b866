pub mod config;
pub mod logging;

pub mod content;
pub mod extractor;
pub mod har;
pub mod url_model;
