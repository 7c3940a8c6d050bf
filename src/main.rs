#![windows_subsystem = "windows"]

use memento_mori::platform::{config_path, SystemEditor};
use memento_mori::ui::{overlay, tray, OverlayApp, UiHandle};
use memento_mori::{AgeSource, AppState};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let source = AgeSource::new(config_path());
    tracing::info!(
        config = %source.config_path().display(),
        birthdate = %source.birthdate(),
        "starting"
    );

    eframe::run_native(
        overlay::APP_NAME,
        overlay::native_options(),
        Box::new(|cc| {
            let (ui, actions) = UiHandle::new(cc.egui_ctx.clone());
            let mut state = AppState::new(source, Box::new(SystemEditor));
            state.attach_tray(tray::spawn(ui, tray::INITIAL_TOOLTIP.to_string()));
            Ok(Box::new(OverlayApp::new(cc, state, actions)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("overlay event loop failed: {e}"))?;

    tracing::info!("exited");
    Ok(())
}
