mod app;
mod config;
mod console;
mod effects;
mod page_server;
mod persistence;
mod render;
mod webview;

pub use app::run_app;
