pub mod format;
pub mod models;
pub mod status;
