use dotenv::dotenv;
use log::{error, info};

use rust_trivia::config::Config;
use rust_trivia::quiz::console::Terminal;
use rust_trivia::quiz::game::Game;
use rust_trivia::quiz::record::JsonRecordStore;
use rust_trivia::quiz::trivia_api::TriviaApi;

#[tokio::main]
async fn main() {
    // a missing .env is fine, the defaults cover everything
    dotenv().ok();
    pretty_env_logger::init();

    if let Err(e) = run().await {
        error!("Game aborted: {}", e);
        eprintln!("\nThe game had to stop: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> rust_trivia::Result<()> {
    let config = Config::from_env()?;
    info!("Starting trivia with {:?}", config);

    let api = TriviaApi::new(
        config.api_url.clone(),
        config.request_timeout,
        config.retry.clone(),
    )?;
    let store = JsonRecordStore::new(config.record_path.clone());
    let mut terminal = Terminal::new();

    let summary = Game::new().run(&api, &mut terminal, &store).await?;
    info!("Session finished: {:?}", summary);
    Ok(())
}
