// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod config;
mod engine;
mod gui;
mod telemetry;
mod types;
mod widgets;
use config::AppConfig;
use eframe::egui;
use std::sync::mpsc::channel;
// 入口函数
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config_path = AppConfig::path_from_env();
    let config = AppConfig::load(&config_path)?;
    log::info!("config: {:?}", config);

    // 启动后台引擎
    let source = engine::open_source(&config)?;
    let (tx, rx) = channel();
    let (tx_cmd, rx_cmd) = channel();
    engine::spawn_thread(source, config.frame_interval_ms, tx, rx_cmd);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 720.0])
        .with_min_inner_size([640.0, 480.0])
        .with_title("Accelerometer Dashboard");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "accel-gauge",
        options,
        Box::new(move |_cc| Box::new(gui::GaugeApp::new(&config, rx, tx_cmd))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
