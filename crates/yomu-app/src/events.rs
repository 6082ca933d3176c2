use std::ops::ControlFlow;
use std::path::Path;
use std::sync::Arc;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use yomu_core::PageController;
use yomu_types::ReaderCommand;

use crate::state::AppState;
use crate::ui::{self, RenderOptions};

/// Reader main loop: user commands and fetch results, one at a time
pub async fn event_loop(
    state: Arc<AppState>,
    mut controller: PageController,
    command_rx: AsyncReceiver<ReaderCommand>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let completions = controller.completions();
    redraw(&state, &controller);

    tracing::info!("[EVENT_LOOP] Waiting for commands");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            command = command_rx.recv() => {
                let command = command?;
                tracing::debug!("[EVENT_LOOP] Command: {:?}", command);
                if handle_command(&state, &mut controller, command).await.is_break() {
                    cancel.cancel();
                    break;
                }
            }
            completion = completions.recv() => {
                if controller.apply(completion?) {
                    redraw(&state, &controller);
                }
            }
        }
    }

    tracing::info!("[EVENT_LOOP] Stopping");
    Ok(())
}

pub async fn handle_command(
    state: &AppState,
    controller: &mut PageController,
    command: ReaderCommand,
) -> ControlFlow<()> {
    match command {
        command @ (ReaderCommand::OpenFile(_) | ReaderCommand::Preset(_)) => {
            match open_source(state, controller, command).await {
                Ok(()) => redraw(state, controller),
                Err(e) => {
                    tracing::warn!("{e}");
                    ui::notice(&e.to_string());
                }
            }
        }
        ReaderCommand::ListPresets => {
            ui::notice(ui::render_presets(&state.config.reader.presets).trim_end())
        }
        ReaderCommand::NextPage => {
            if controller.next_page() {
                redraw(state, controller);
            } else {
                ui::notice("Already on the last page");
            }
        }
        ReaderCommand::PrevPage => {
            if controller.prev_page() {
                redraw(state, controller);
            } else {
                ui::notice("Already on the first page");
            }
        }
        ReaderCommand::Toggle(id) => {
            if controller.toggle_token(id) {
                redraw(state, controller);
            } else {
                ui::notice(&format!("No word with id {id} on this page"));
            }
        }
        ReaderCommand::Cancel => {
            if controller.state().loading {
                controller.cancel();
                ui::notice("Request cancelled.");
                redraw(state, controller);
            } else {
                ui::notice("Nothing to cancel");
            }
        }
        ReaderCommand::Reset => {
            controller.reset();
            redraw(state, controller);
        }
        ReaderCommand::ShowPage => redraw(state, controller),
        ReaderCommand::Help => ui::notice(ui::HELP.trim_end()),
        ReaderCommand::Quit => return ControlFlow::Break(()),
    }

    ControlFlow::Continue(())
}

/// Switch to the file or preset named by `command`
pub async fn open_source(
    state: &AppState,
    controller: &mut PageController,
    command: ReaderCommand,
) -> anyhow::Result<()> {
    match command {
        ReaderCommand::OpenFile(path) => {
            let (name, content) = read_file(&path)
                .await
                .map_err(|e| anyhow::anyhow!("Cannot open {}: {e}", path.display()))?;
            controller.select_file(name, content);
        }
        ReaderCommand::Preset(key) => {
            let preset = state
                .config
                .reader
                .find_preset(&key)
                .ok_or_else(|| anyhow::anyhow!("No preset `{key}`"))?;
            controller.select_preset(preset.id.clone());
        }
        other => anyhow::bail!("{other:?} does not name a source"),
    }
    Ok(())
}

/// File name shown to the analyzer plus the raw bytes; decoding happens server side
async fn read_file(path: &Path) -> std::io::Result<(String, Vec<u8>)> {
    let content = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((name, content))
}

pub fn render_options(state: &AppState) -> RenderOptions {
    RenderOptions {
        color: state.color,
        show_ids: state.config.ui.show_token_ids,
    }
}

pub fn redraw(state: &AppState, controller: &PageController) {
    ui::draw(&ui::render(
        controller.state(),
        controller.page_size(),
        render_options(state),
    ));
}
