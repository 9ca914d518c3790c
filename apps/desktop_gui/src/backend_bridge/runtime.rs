//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread, time::Instant};

use anyhow::{Context, Result};
use client_core::{CalculatorClient, FileStore};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::{
    backend_bridge::commands::BackendCommand,
    config::Settings,
    controller::{
        calculator::{CalculatorController, CalculatorView},
        events::{UiError, UiEvent},
    },
};

/// Forwards view updates to the UI thread without blocking the worker.
/// Events that do not fit in the queue are dropped and logged.
pub struct ChannelView {
    ui_tx: Sender<UiEvent>,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }

    fn forward(&self, event: UiEvent) {
        let kind = event.kind();
        match self.ui_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::debug!(event = kind, "ui queue full; dropping backend event")
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!(event = kind, "ui queue closed; dropping backend event")
            }
        }
    }
}

impl CalculatorView for ChannelView {
    fn render_display(&mut self, text: &str) {
        self.forward(UiEvent::Display(text.to_string()));
    }

    fn set_memory_indicator(&mut self, visible: bool) {
        self.forward(UiEvent::MemoryIndicator(visible));
    }

    fn report_error(&mut self, error: UiError) {
        self.forward(UiEvent::Error(error));
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match build_runtime() {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::startup(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ))));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match build_client(&settings) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::startup(format!(
                        "backend worker startup failure: {err:#}"
                    ))));
                    tracing::error!("failed to build calculator client: {err:#}");
                    return;
                }
            };

            match client.health().await {
                Ok(health) => tracing::info!(
                    server_url = client.server_url(),
                    status = %health.status,
                    "calculator service reachable"
                ),
                Err(err) => tracing::warn!(
                    server_url = client.server_url(),
                    "calculator service health probe failed: {err}"
                ),
            }
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Connected to {}",
                client.server_url()
            )));

            let mut controller = CalculatorController::new(
                Arc::new(client),
                ChannelView::new(ui_tx.clone()),
                settings.error_revert_delay(),
            );
            run_command_loop(&mut controller, &cmd_rx).await;
            tracing::info!("backend worker stopped");
        });
    });
}

/// Worker threads keep driving pooled HTTP connections while the command loop
/// blocks on the UI queue, so connections closed by the server while idle
/// are noticed before the next request.
fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

fn build_client(settings: &Settings) -> Result<CalculatorClient> {
    std::fs::create_dir_all(&settings.data_dir).with_context(|| {
        format!(
            "could not prepare data directory '{}'",
            settings.data_dir.display()
        )
    })?;
    let store = Arc::new(FileStore::in_data_dir(&settings.data_dir));
    CalculatorClient::new(settings.server_url.clone(), store)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))
}

/// Processes presses strictly in arrival order, waking early for any
/// scheduled error revert. Returns on shutdown or when the UI goes away.
pub async fn run_command_loop<V: CalculatorView>(
    controller: &mut CalculatorController<V>,
    cmd_rx: &Receiver<BackendCommand>,
) {
    loop {
        controller.revert_if_due(Instant::now());

        let next = match controller.next_revert_deadline() {
            Some(deadline) => cmd_rx.recv_deadline(deadline),
            None => cmd_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match next {
            Ok(BackendCommand::Press(role)) => controller.dispatch(role).await,
            Ok(BackendCommand::Shutdown) => break,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    tracing::debug!(
        display = %controller.state().display_value,
        "backend command loop finished"
    );
}
