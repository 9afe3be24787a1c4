mod actions;
mod app;
mod auth;
mod catalog;
mod client;
mod config;
mod editor;
mod explorer;
mod jobs;
mod request;
mod state;
mod types;
mod ui;
mod utils;

use app::App;
use color_eyre::Result;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;

    let terminal = ratatui::init();
    let app_result = App::new(config).run(terminal).await;
    ratatui::restore();
    app_result
}
