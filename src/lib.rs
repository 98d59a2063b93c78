pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod i18n;
pub mod models;
pub mod store;
pub mod ui;

pub use error::{LensError, Result};
