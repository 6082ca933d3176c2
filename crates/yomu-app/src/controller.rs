use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yomu_core::PageController;
use yomu_types::ReaderCommand;

use crate::events::event_loop;
use crate::io::input_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub commands: (AsyncSender<ReaderCommand>, AsyncReceiver<ReaderCommand>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            commands: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Queue a command as if the user had typed it
    pub async fn send(&self, command: ReaderCommand) -> anyhow::Result<()> {
        self.channels.commands.0.send(command).await?;
        Ok(())
    }

    pub fn spawn_tasks(
        &self,
        controller: PageController,
    ) -> anyhow::Result<JoinSet<anyhow::Result<()>>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            controller,
            self.channels.commands.1.clone(),
            self.cancel_token.clone(),
        ));

        // Stdin watcher
        let cancel = self.cancel_token.child_token();
        let command_tx = self.channels.commands.0.clone_sync();
        std::thread::Builder::new()
            .name("stdin".to_string())
            .spawn(move || input_loop(cancel, command_tx))?;

        Ok(tasks)
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
