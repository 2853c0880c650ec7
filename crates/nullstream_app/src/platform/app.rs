use std::path::Path;
use std::sync::{Arc, Mutex};

use log::LevelFilter;
use nullstream_core::{update, AppState, AppViewModel, Msg};
use nullstream_engine::EngineHandle;
use nullstream_logging::{shell_info, shell_warn};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};

use super::config::{AppConfig, CONFIG_FILENAME};
use super::console::{self, ConsoleAction, ConsoleCommand};
use super::effects::{EffectRunner, MsgSink};
use super::page_server;
use super::persistence;
use super::render;
use super::webview::{self, ScriptHost};

/// Everything delivered to the main loop from other threads.
#[derive(Debug)]
pub(crate) enum ShellEvent {
    Msg(Msg),
    Console(ConsoleCommand),
}

pub fn run_app() -> anyhow::Result<()> {
    let loaded = AppConfig::load(Path::new(CONFIG_FILENAME));
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        Ok(None) | Err(_) => AppConfig::default(),
    };
    nullstream_logging::initialize(config.log_destination(), LevelFilter::Info, &config.log_file);
    if let Err(err) = &loaded {
        shell_warn!("Using default configuration: {}", err);
    }

    let event_loop = EventLoopBuilder::<ShellEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let engine_proxy = Mutex::new(proxy.clone());
    let sink = MsgSink::new(move |msg| {
        if let Ok(proxy) = engine_proxy.lock() {
            let _ = proxy.send_event(ShellEvent::Msg(msg));
        }
    });
    let engine = EngineHandle::new(config.oembed_settings(), Arc::new(sink));
    let store = persistence::playlist_store(&config.data_dir());
    shell_info!("Playlist store at {:?}", store.path());
    let saved = persistence::load_playlist(&store);

    let page_url = page_server::spawn(config.player_port)?;
    let (window, webview) = webview::create_player_window(&event_loop, &config, &page_url)?;

    let mut shell = Shell::new(
        AppState::with_play_delay(config.play_delay()),
        EffectRunner::new(engine, store),
    );
    shell.dispatch(Msg::RestorePlaylist(saved), &webview);
    shell.dispatch(Msg::WebViewAttached, &webview);
    shell.print(vec!["Type 'help' for commands.".to_string()]);
    console::spawn(proxy);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::UserEvent(ShellEvent::Msg(msg)) => shell.dispatch(msg, &webview),
            Event::UserEvent(ShellEvent::Console(command)) => {
                match console::resolve(command, &shell.view()) {
                    ConsoleAction::Send(msg) => shell.dispatch(msg, &webview),
                    ConsoleAction::Print(lines) => shell.print(lines),
                    ConsoleAction::Quit => {
                        shell.dispatch(Msg::WebViewDetached, &webview);
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                window_id,
                ..
            } if window_id == window.id() => {
                shell.dispatch(Msg::WebViewDetached, &webview);
                *control_flow = ControlFlow::Exit;
            }
            _ => {}
        }
    })
}

/// Owns the state on the main loop and runs the effects of each update.
struct Shell {
    state: AppState,
    runner: EffectRunner,
    rendered: AppViewModel,
}

impl Shell {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        let rendered = state.view();
        Self {
            state,
            runner,
            rendered,
        }
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    fn dispatch(&mut self, msg: Msg, host: &dyn ScriptHost) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects, host);

        if was_dirty {
            let view = self.state.view();
            self.print(render::changes(&self.rendered, &view));
            self.rendered = view;
        }
    }

    fn print(&self, lines: Vec<String>) {
        for line in lines {
            println!("{line}");
        }
    }
}
