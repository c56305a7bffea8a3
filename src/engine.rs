// src/engine.rs
use crate::config::AppConfig;
use crate::telemetry::{JsonLineSource, SimulatedSource, TelemetrySource};
use crate::types::*;
use anyhow::Context;
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub type BoxedSource = Box<dyn TelemetrySource + Send>;

/// 根据配置选择数据源：回放文件优先，否则使用模拟加速度计
pub fn open_source(config: &AppConfig) -> anyhow::Result<BoxedSource> {
    match &config.replay_path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening replay {}", path.display()))?;
            info!("replaying frames from {}", path.display());
            Ok(Box::new(JsonLineSource::new(BufReader::new(file))))
        }
        None => {
            info!("simulating {} accelerometer(s)", config.accelerometers);
            Ok(Box::new(SimulatedSource::new(config.accelerometers, config.noise)))
        }
    }
}

pub fn spawn_thread(
    mut source: BoxedSource,
    interval_ms: u64,
    tx: Sender<EngineMessage>,
    rx_cmd: Receiver<GuiCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        tx.send(EngineMessage::Log("⚙️ Telemetry engine ready.".to_owned())).ok();

        let mut interval = Duration::from_millis(interval_ms.max(1));
        let mut is_streaming = false;

        loop {
            // 1. 处理 GUI 命令 (GUI 关闭后退出线程)
            loop {
                match rx_cmd.try_recv() {
                    Ok(GuiCommand::StartStream) => {
                        if !is_streaming {
                            is_streaming = true;
                            tx.send(EngineMessage::Status(true)).ok();
                            tx.send(EngineMessage::Log("🌊 Stream Started".to_owned())).ok();
                        }
                    }
                    Ok(GuiCommand::StopStream) => {
                        if is_streaming {
                            is_streaming = false;
                            tx.send(EngineMessage::Status(false)).ok();
                            tx.send(EngineMessage::Log("🛑 Stream Stopped".to_owned())).ok();
                        }
                    }
                    Ok(GuiCommand::SetInterval(ms)) => interval = Duration::from_millis(ms.max(1)),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }

            // 2. 数据流
            if !is_streaming {
                thread::sleep(Duration::from_millis(20));
                continue;
            }
            match source.next_frame() {
                Ok(Some(frame)) => {
                    if tx.send(EngineMessage::Frame(frame)).is_err() {
                        return;
                    }
                }
                Ok(None) => {
                    is_streaming = false;
                    info!("telemetry source exhausted");
                    tx.send(EngineMessage::Status(false)).ok();
                    tx.send(EngineMessage::Log("⏹ Source finished".to_owned())).ok();
                }
                Err(e) => {
                    warn!("dropping bad frame: {e}");
                    tx.send(EngineMessage::Log(format!("⚠️ {e}"))).ok();
                }
            }
            thread::sleep(interval);
        }
    })
}
