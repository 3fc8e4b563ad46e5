//! Event loop: stdin commands, effect results, and the clock.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, Utc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::MissedTickBehavior;

use skydeck_core::Config;

use crate::command::{self, Command, HELP};
use crate::render::TerminalRenderer;
use crate::services::Services;
use crate::state::{update, Action, AppState};
use crate::view::View;

pub struct Dashboard<W: Write> {
    state: AppState,
    services: Services,
    renderer: TerminalRenderer,
    icon_base_url: String,
    clock_interval: Duration,
    out: W,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
}

impl<W: Write> Dashboard<W> {
    /// Build the dashboard with the persisted theme and favorites.
    pub fn new(config: &Config, services: Services, renderer: TerminalRenderer, out: W) -> Self {
        let theme = services.preferences.load_theme();
        let favorites = services.preferences.load_favorites();
        tracing::info!(
            "Loaded preferences: theme={}, {} favorites",
            theme.as_str(),
            favorites.len()
        );

        let state = AppState::new(
            config.weather.units,
            theme,
            favorites,
            config.ui.popular_cities.clone(),
            Utc::now(),
        );
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            state,
            services,
            renderer,
            icon_base_url: config.weather.icon_base_url.clone(),
            clock_interval: Duration::from_secs(config.ui.clock_refresh_secs.max(1)),
            out,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Apply an action and start the effects it asks for.
    pub fn dispatch(&mut self, action: Action) {
        if let Action::FetchDone { query, result } = &action {
            match result {
                Ok(report) => tracing::info!(
                    "Showing weather for {} (query: {})",
                    report.current.display_name(),
                    query
                ),
                Err(e) if e.is_not_found() => tracing::info!("No match for {}", query),
                Err(e) => tracing::warn!("Lookup for {} failed: {}", query, e.user_message()),
            }
        }

        let (state, effects) = update(std::mem::take(&mut self.state), action);
        self.state = state;

        for effect in effects {
            self.services.execute(effect, &self.tx);
        }
    }

    /// Wait for the next result from a spawned fetch or locate.
    pub async fn next_action(&mut self) -> Option<Action> {
        self.rx.recv().await
    }

    pub fn render(&mut self) -> std::io::Result<()> {
        let view = View::build(&self.state, &Local, &self.icon_base_url);
        self.renderer.render(&view, &mut self.out)
    }

    fn note(&mut self, text: &str) -> std::io::Result<()> {
        self.renderer.render_note(text, &mut self.out)
    }

    /// Run until `quit` or end of input. `initial_city` is searched first.
    pub async fn run<R>(&mut self, input: R, initial_city: Option<String>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut clock = tokio::time::interval(self.clock_interval);
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if let Some(city) = initial_city {
            self.dispatch(Action::Search(city));
        }
        self.render()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::debug!("Input closed");
                        break;
                    };
                    match command::parse(&line) {
                        Command::Quit => break,
                        Command::Empty => self.render()?,
                        Command::Help => {
                            self.render()?;
                            self.note(HELP)?;
                        }
                        Command::Unknown(message) => {
                            self.render()?;
                            self.note(&message)?;
                        }
                        Command::Dispatch(action) => {
                            self.dispatch(action);
                            self.render()?;
                        }
                    }
                }
                Some(action) = self.rx.recv() => {
                    self.dispatch(action);
                    self.render()?;
                }
                _ = clock.tick() => {
                    self.dispatch(Action::Tick(Utc::now()));
                    self.render()?;
                }
            }
        }

        Ok(())
    }
}
