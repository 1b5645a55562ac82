//! UI layer for the desktop panel: app shell, paths and panel state.

pub mod app;

pub use app::{AppPaths, PanelApp, StartupConfig};
