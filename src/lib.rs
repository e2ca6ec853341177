pub mod api;
pub mod config;
pub mod console;
pub mod terminal;
