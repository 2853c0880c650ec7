//! Loopback HTTP server for the player page.
//!
//! The YouTube embed checks the page's origin and referrer, so the page is
//! served from `http://127.0.0.1:<port>` instead of being injected as a string.

use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use std::thread;

use anyhow::Context;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use nullstream_logging::{shell_error, shell_info};

/// Player page. Posts `{event, value}` JSON through `window.ipc.postMessage`.
pub(crate) const PLAYER_HTML: &str = include_str!("../../assets/player.html");

pub(crate) const PLAYER_PATH: &str = "/player.html";

pub(crate) fn router() -> Router {
    Router::new().route(PLAYER_PATH, get(|| async { Html(PLAYER_HTML) }))
}

/// Binds on the calling thread, so the returned url is reachable immediately.
/// The server itself runs on its own thread for the life of the process.
pub(crate) fn spawn(port: u16) -> anyhow::Result<String> {
    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, port)))
        .with_context(|| format!("bind player page server on port {port}"))?;
    listener
        .set_nonblocking(true)
        .context("configure player page listener")?;
    let addr = listener.local_addr().context("read player page address")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()
        .context("build player page runtime")?;
    thread::Builder::new()
        .name("player-page".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                let listener = match tokio::net::TcpListener::from_std(listener) {
                    Ok(listener) => listener,
                    Err(err) => {
                        shell_error!("Player page listener unusable: {}", err);
                        return;
                    }
                };
                if let Err(err) = axum::serve(listener, router()).await {
                    shell_error!("Player page server stopped: {}", err);
                }
            });
        })
        .context("spawn player page thread")?;

    let url = format!("http://{addr}{PLAYER_PATH}");
    shell_info!("Serving player page at {}", url);
    Ok(url)
}
