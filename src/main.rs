// src/main.rs
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use boxoffice::app::BoxOfficeApp;
use boxoffice::config::load_config;

fn pick_renderer() -> eframe::Renderer {
    match env::var("BOXOFFICE_RENDERER").as_deref() {
        Ok("glow") => eframe::Renderer::Glow,
        Ok("wgpu") => eframe::Renderer::Wgpu,
        _ => {
            // Default: Windows = WGPU (DX12), Others = Glow (GL)
            #[cfg(target_os = "windows")]
            { eframe::Renderer::Wgpu }
            #[cfg(not(target_os = "windows"))]
            { eframe::Renderer::Glow }
        }
    }
}

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let cfg = load_config();
    info!(
        "Starting box office explorer (endpoint configured: {}, page rows: {})",
        cfg.endpoint().is_some(),
        cfg.page_rows
    );

    let options = eframe::NativeOptions {
        renderer: pick_renderer(),
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    match eframe::run_native(
        "Box Office Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(BoxOfficeApp::new(&cc.egui_ctx, &cfg)))),
    ) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("eframe failed to start: {e:?}");
            error!("Hint: try BOXOFFICE_RENDERER=wgpu or glow.");
            Err(e)
        }
    }
}
