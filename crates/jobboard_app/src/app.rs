use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use board_logging::{board_debug, board_info, board_warn};
use chrono::Local;
use jobboard_core::{update, ListingState, Msg, PollSettings, RequestSeq};
use jobboard_engine::{EngineEvent, EngineHandle, EventSink};

use crate::commands::{parse_command, Action, HELP};
use crate::config::AppSettings;
use crate::effects::{to_failure, to_page, EffectRunner};
use crate::render::render;

enum AppEvent {
    Line(String),
    InputClosed,
    Engine(EngineEvent),
}

struct AppEventSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for AppEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Engine(event));
    }
}

pub fn run_app(settings: AppSettings) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();

    let sink = Arc::new(AppEventSink {
        tx: event_tx.clone(),
    });
    let engine = EngineHandle::new(settings.search.clone(), sink)
        .context("failed to create search client")?;

    // Stdin is read on its own thread so the loop can also react to the engine.
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });

    let mut app = App::new(settings.page_size, settings.poll, EffectRunner::new(engine));
    println!("{HELP}");
    app.dispatch(Msg::Mounted {
        settings: settings.poll,
    });

    while let Ok(event) = event_rx.recv() {
        let now = Instant::now();
        match event {
            AppEvent::Line(line) => {
                if app.handle_line(&line, now) {
                    break;
                }
            }
            AppEvent::InputClosed => break,
            AppEvent::Engine(EngineEvent::TimerFired) => app.dispatch(Msg::TimerFired { now }),
            AppEvent::Engine(EngineEvent::SearchCompleted { request_id, result }) => {
                let result = match result {
                    Ok(page) => {
                        board_debug!("Search #{} returned {} jobs", request_id, page.items.len());
                        Ok(to_page(page))
                    }
                    Err(err) => {
                        board_warn!("Search #{} failed: {}", request_id, err);
                        Err(to_failure(&err))
                    }
                };
                app.dispatch(Msg::SearchSettled {
                    seq: RequestSeq(request_id),
                    result,
                    now,
                });
            }
        }
    }

    app.dispatch(Msg::Unmounted);
    board_info!("Listing closed");
    Ok(())
}

struct App {
    state: ListingState,
    poll: PollSettings,
    runner: EffectRunner,
}

impl App {
    fn new(page_size: u32, poll: PollSettings, runner: EffectRunner) -> Self {
        Self {
            state: ListingState::new(page_size),
            poll,
            runner,
        }
    }

    /// Returns true when the user asked to quit.
    fn handle_line(&mut self, line: &str, now: Instant) -> bool {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return false,
            Err(err) => {
                println!("{err}");
                return false;
            }
        };

        match command.into_action(&self.state.view(), self.poll, now) {
            Action::Dispatch(msg) => self.dispatch(msg),
            Action::Visibility(visible) => {
                if let Some(msg) = self.runner.set_visible(visible, now) {
                    self.dispatch(msg);
                }
            }
            Action::ShowHelp => println!("{HELP}"),
            Action::Quit => return true,
        }
        false
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            inbox.extend(self.runner.run(effects, Instant::now()));
            let was_dirty = state.consume_dirty();
            self.state = state;
            if was_dirty && self.state.is_mounted() {
                self.render();
            }
        }
    }

    fn render(&self) {
        let updated_at = Local::now().format("%H:%M:%S").to_string();
        let mut out = io::stdout().lock();
        for line in render(&self.state.view(), &updated_at) {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }
}
