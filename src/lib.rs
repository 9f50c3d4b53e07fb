pub mod commands;
pub mod config;
pub mod formatting;
pub mod layout_constants;
pub mod picker;
pub mod tui;
