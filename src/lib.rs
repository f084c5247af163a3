//! QuickLang - system language picker for handheld consoles
//!
//! The library holds everything except the terminal loop: the language
//! catalog, the favorites store and its on-disk format, the navigator,
//! input edge detection, the platform seam (registry + reboot) and the
//! `App` state machine that ties them together.

pub mod app;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod input;
pub mod labels;
pub mod navigator;
pub mod platform;
pub mod settings;
pub mod ui;

pub use error::{Error, Result};
