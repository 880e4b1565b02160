//! Sign-Capture: gesture capture controller for sign-language datasets.

mod app;
mod capture_command;
mod config;
mod error;
mod frame_source;
mod uploader;

pub(crate) use {
    app::App,
    capture_command::CaptureCommand,
    error::{AppError, Result as AppResult},
    frame_source::FrameSource,
    uploader::HttpGestureSender,
};

use crate::config::Config;

use sign_capture_core::{CaptureSettings, GestureCaptureController};
use tokio::{
    signal,
    sync::{mpsc, watch},
};
use tracing::{error, info};

/// Application entry point.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("sign_capture=debug,sign_capture_core=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Config validation failed: {:?}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!(error = ?e, "Capture session failed");
        std::process::exit(1);
    }
}

/// Wire the detector stream, event loop, and uploader together and run
/// until the stream ends or Ctrl-C arrives.
async fn run(config: Config) -> AppResult<()> {
    let sender = HttpGestureSender::new(&config.server)?;

    let settings: CaptureSettings = config.capture.settings();
    let mut controller = GestureCaptureController::new(settings, Box::new(sender))?;
    controller.set_label(config.behavior.label.clone());
    controller.set_auto_flow(config.behavior.auto_flow);

    let (command_tx, command_rx) = mpsc::channel(64);
    let (snapshot_tx, _snapshot_rx) = watch::channel(controller.snapshot());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let frame_source = FrameSource::new(command_tx.clone());
    let app = App::new(controller, command_rx, snapshot_tx, shutdown_tx);

    let ctrl_c_tx = command_tx.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            let _ = ctrl_c_tx.send(CaptureCommand::Shutdown).await;
        }
    });

    let (source_result, ()) = tokio::join!(frame_source.run(shutdown_rx), app.run());

    if let Err(e) = source_result {
        error!(error = ?e, "Frame source error");
    }

    Ok(())
}
