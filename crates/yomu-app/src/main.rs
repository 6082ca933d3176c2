use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use yomu_client::AnalyzeClient;
use yomu_core::PageController;
use yomu_types::ReaderCommand;

pub mod cli;
pub mod controller;
pub mod events;
pub mod io;
pub mod logging;
pub mod profile;
pub mod state;
pub mod ui;


use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    logging::init_tracing(cli.log_json);

    let config = profile::load_config(&cli)?;
    let client = AnalyzeClient::with_timeout(
        config.network.analyze_url.clone(),
        config.network.timeout(),
    )?;
    tracing::info!("Using analyzer at {}", client.url());

    let controller = PageController::new(
        Arc::new(client),
        config.reader.page_size,
        config.reader.prefetch_pages,
    );
    let state = Arc::new(AppState::new(config));
    let initial = initial_command(&cli);

    if cli.dump {
        return dump(&state, controller, initial).await;
    }

    run(state, controller, initial).await
}

/// Source named on the command line, if any
fn initial_command(cli: &Cli) -> Option<ReaderCommand> {
    if let Some(path) = &cli.file {
        Some(ReaderCommand::OpenFile(path.clone()))
    } else {
        cli.preset.clone().map(ReaderCommand::Preset)
    }
}

async fn run(
    state: Arc<AppState>,
    controller: PageController,
    initial: Option<ReaderCommand>,
) -> anyhow::Result<()> {
    let app = AppController::new(state);
    if let Some(command) = initial {
        app.send(command).await?;
    }
    let mut tasks = app.spawn_tasks(controller)?;

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) | None => tracing::debug!("event loop exited"),
                Some(Ok(Err(e))) => tracing::error!("event loop failed: {e}"),
                Some(Err(e)) => tracing::error!("event loop panicked: {e}"),
            }
        }
    }

    app.shutdown();
    tasks.shutdown().await;
    Ok(())
}

/// Fetch the first page of the chosen source, print it and exit
async fn dump(
    state: &AppState,
    mut controller: PageController,
    initial: Option<ReaderCommand>,
) -> anyhow::Result<()> {
    let Some(command) = initial else {
        anyhow::bail!("--dump needs --file or --preset");
    };

    events::open_source(state, &mut controller, command).await?;
    controller.wait_for_page().await;
    events::redraw(state, &controller);

    if let Some(error) = &controller.state().last_error {
        anyhow::bail!("{error}");
    }
    Ok(())
}
