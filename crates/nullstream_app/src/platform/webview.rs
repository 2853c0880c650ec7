//! Embedded runtime host: a tao window with a wry web view showing the player page.

use anyhow::Context;
use nullstream_core::Msg;
use tao::dpi::LogicalSize;
use tao::event_loop::EventLoop;
use tao::window::{Window, WindowBuilder};
use wry::http::Request;
use wry::{WebView, WebViewBuilder};

use super::app::ShellEvent;
use super::config::AppConfig;

/// Fire-and-forget script evaluation against the player page.
pub(crate) trait ScriptHost {
    fn run_script(&self, script: &str) -> anyhow::Result<()>;
}

impl ScriptHost for WebView {
    fn run_script(&self, script: &str) -> anyhow::Result<()> {
        self.evaluate_script(script)?;
        Ok(())
    }
}

/// `page_url` must be served over http so the embedded player gets a real origin.
pub(crate) fn create_player_window(
    event_loop: &EventLoop<ShellEvent>,
    config: &AppConfig,
    page_url: &str,
) -> anyhow::Result<(Window, WebView)> {
    let window = WindowBuilder::new()
        .with_title("NullStream")
        .with_inner_size(LogicalSize::new(
            f64::from(config.window_width),
            f64::from(config.window_height),
        ))
        .build(event_loop)
        .context("create window")?;

    let proxy = event_loop.create_proxy();
    let builder = WebViewBuilder::new()
        .with_url(page_url)
        .with_ipc_handler(move |request: Request<String>| {
            // Runs on the web view's context; hop back to the main loop first.
            let _ = proxy.send_event(ShellEvent::Msg(Msg::BridgeMessage(request.into_body())));
        });

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window).context("create web view")?;

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;

        let vbox = window
            .default_vbox()
            .context("window has no GTK container")?;
        builder.build_gtk(vbox).context("create web view")?
    };

    Ok((window, webview))
}
