pub mod config;
pub mod scanner;

/// Application name for XDG paths
pub const APP_NAME: &str = "tonesort";
