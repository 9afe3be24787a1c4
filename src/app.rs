use crate::client::ApiClient;
use crate::config::Config;
use crate::state::AppState;
use crate::types::Screen;
use crate::ui::draw::{self, ScreenLists, SPINNER_FRAMES};
use crate::ui::events::EventHandler;
use crate::{explorer, jobs};
use color_eyre::Result;
use ratatui::{DefaultTerminal, Frame};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    client: ApiClient,
    config: Config,
    event_handler: EventHandler,
    lists: ScreenLists,
    spinner_index: usize,
    last_tick: Instant,
}

impl App {
    pub fn new(config: Config) -> Self {
        let client = ApiClient::new(config.base_url().to_string());

        Self {
            state: Arc::new(RwLock::new(AppState::new())),
            client,
            config,
            event_handler: EventHandler::new(),
            lists: ScreenLists::default(),
            spinner_index: 0,
            last_tick: Instant::now(),
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAMES.len();
                self.last_tick = Instant::now();
            }

            self.fetch_on_first_visit();

            terminal.draw(|frame| self.draw(frame))?;

            let state = Arc::clone(&self.state);
            let url_submitted =
                self.event_handler
                    .handle_events(state, &self.client, self.config.base_url())?;

            // A submitted base URL is saved and swaps the client out
            if let Some(url) = url_submitted {
                self.config.set_base_url(&url)?;
                self.client = ApiClient::new(self.config.base_url().to_string());
            }
        }

        Ok(())
    }

    /// Entering a data screen for the first time starts its initial fetch
    fn fetch_on_first_visit(&self) {
        let first_visit = {
            let mut s = self.state.write().unwrap();
            match s.screen {
                Screen::Explorer if !s.explorer.visited => {
                    s.explorer.visited = true;
                    Some(Screen::Explorer)
                }
                Screen::Jobs if !s.jobs.visited => {
                    s.jobs.visited = true;
                    Some(Screen::Jobs)
                }
                _ => None,
            }
        };

        match first_visit {
            Some(Screen::Explorer) => {
                explorer::fetch_tables_background(Arc::clone(&self.state), self.client.clone());
            }
            Some(Screen::Jobs) => {
                jobs::fetch_jobs_background(Arc::clone(&self.state), self.client.clone());
            }
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let state = self.state.read().unwrap();
        draw::draw(
            frame,
            &state,
            self.config.base_url(),
            self.spinner_index,
            &mut self.lists,
        );
    }
}
