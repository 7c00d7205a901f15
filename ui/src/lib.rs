#![warn(clippy::all, rust_2018_idioms)]
//! Desktop viewer for the Characteristics of Business Owners survey.

pub mod app;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::CboApp;

/// Window and page title.
pub const TITLE: &str = "Characteristics of Business Owners";
