// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints};
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};
use crate::config::{AppConfig, MAX_PRECISION};
use crate::telemetry::{AccelerometerSource, Dashboard};
use crate::types::*;
use crate::widgets::accelerometer::needle_color;
use crate::widgets::AccelerometerWidget;

const HISTORY_LEN: usize = 500;

pub struct GaugeApp {
    // 系统状态
    is_streaming: bool,
    started: Instant,

    // 仪表盘模型与控件
    dashboard: Dashboard,
    widgets: Vec<AccelerometerWidget>,
    history: Vec<Vec<[f64; 2]>>,

    // 配置
    precision: usize,
    interval_ms: u64,

    // 界面日志
    log_messages: Vec<String>,

    // 通讯管道
    rx: Receiver<EngineMessage>,
    tx_cmd: Sender<GuiCommand>,
}

impl GaugeApp {
    pub fn new(config: &AppConfig, rx: Receiver<EngineMessage>, tx_cmd: Sender<GuiCommand>) -> Self {
        Self {
            is_streaming: false,
            started: Instant::now(),
            dashboard: Dashboard::new(config.precision),
            widgets: Vec::new(),
            history: Vec::new(),
            precision: config.precision,
            interval_ms: config.frame_interval_ms,
            log_messages: vec!["Accelerometer dashboard ready.".to_owned()],
            rx,
            tx_cmd,
        }
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > 8 { self.log_messages.remove(0); }
    }

    fn send(&mut self, cmd: GuiCommand) {
        if self.tx_cmd.send(cmd).is_err() {
            log::error!("telemetry engine is gone");
            self.log("❌ Engine stopped");
        }
    }

    // 加速度计数量变化时重建所有仪表 (保留仍存在的仪表的可见性与历史)
    fn rebuild_widgets(&mut self) {
        let count = self.dashboard.accelerometer_count();
        let now = Instant::now();
        let t = self.started.elapsed().as_secs_f64();
        let visible: Vec<bool> = self.widgets.iter().map(|w| w.enabled).collect();
        self.widgets = (0..count)
            .map(|i| AccelerometerWidget::new(i, &mut self.dashboard))
            .collect();
        self.history.resize_with(count, Vec::new);
        // 新仪表在本帧通知之后才订阅，需要主动读取当前帧
        for (i, (widget, history)) in self.widgets.iter_mut().zip(self.history.iter_mut()).enumerate() {
            if let Some(&enabled) = visible.get(i) {
                widget.enabled = enabled;
            }
            if widget.refresh(&self.dashboard, now) {
                history.push([t, widget.value()]);
                if history.len() > HISTORY_LEN { history.remove(0); }
            }
        }
        self.log(&format!("{} accelerometer(s) detected", count));
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                EngineMessage::Log(s) => self.log(&s),
                EngineMessage::Status(b) => self.is_streaming = b,
                EngineMessage::Frame(frame) => {
                    if self.dashboard.update_frame(frame) {
                        self.rebuild_widgets();
                    }
                }
            }
        }
    }

    fn poll_widgets(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let t = self.started.elapsed().as_secs_f64();
        let mut next_redraw: Option<Duration> = None;
        for (widget, history) in self.widgets.iter_mut().zip(self.history.iter_mut()) {
            if widget.poll(&self.dashboard, now) > 0 {
                history.push([t, widget.value()]);
                if history.len() > HISTORY_LEN { history.remove(0); }
            }
            if widget.take_due_redraws(now) > 0 {
                ctx.request_repaint();
            }
            if let Some(wait) = widget.next_redraw_in(now) {
                next_redraw = Some(next_redraw.map_or(wait, |w| w.min(wait)));
            }
        }
        if let Some(wait) = next_redraw {
            ctx.request_repaint_after(wait);
        }
    }
}

impl eframe::App for GaugeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. 消息处理
        self.drain_messages();
        // 2. 仪表更新与延迟重绘
        self.poll_widgets(ctx);
        if self.is_streaming { ctx.request_repaint_after(Duration::from_millis(self.interval_ms)); }

        // 3. UI 绘制
        let mut visuals = egui::Visuals::dark();
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 10, 15);
        ctx.set_visuals(visuals);

        egui::SidePanel::left("L").min_width(260.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("Accelerometer Dashboard");
            ui.separator();

            let stream_btn = if self.is_streaming { "STOP STREAM" } else { "START STREAM" };
            if ui.button(stream_btn).clicked() {
                if self.is_streaming { self.send(GuiCommand::StopStream); }
                else { self.send(GuiCommand::StartStream); }
            }

            ui.add_space(10.0);
            if ui.add(egui::Slider::new(&mut self.precision, 0..=MAX_PRECISION).text("Precision")).changed() {
                self.dashboard.set_precision(self.precision);
            }
            if ui.add(egui::Slider::new(&mut self.interval_ms, 5..=1000).text("Interval (ms)")).changed() {
                self.send(GuiCommand::SetInterval(self.interval_ms));
            }

            ui.add_space(10.0);
            ui.label("GAUGES");
            for widget in &mut self.widgets {
                let title = widget.title().to_owned();
                let inert = widget.is_inert();
                ui.add_enabled(!inert, egui::Checkbox::new(&mut widget.enabled, title));
            }

            ui.add_space(10.0);
            ui.separator();
            egui::ScrollArea::vertical().max_height(140.0).show(ui, |ui| {
                for m in &self.log_messages { ui.monospace(m); }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.widgets.is_empty() {
                ui.label("Waiting for accelerometer data...");
                return;
            }
            ui.horizontal_wrapped(|ui| {
                for widget in self.widgets.iter().filter(|w| w.enabled) {
                    widget.ui(ui);
                }
            });
            ui.separator();
            Plot::new("g_history")
                .view_aspect(3.0)
                .include_y(0.0)
                .include_y(2.0)
                .auto_bounds_x()
                .show(ui, |plot_ui| {
                    for (i, (widget, points)) in self.widgets.iter().zip(&self.history).enumerate() {
                        if widget.enabled && !points.is_empty() {
                            plot_ui.line(
                                Line::new(PlotPoints::new(points.clone()))
                                    .name(widget.title())
                                    .color(needle_color(i)),
                            );
                        }
                    }
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{Dataset, Frame, Group};
    use std::sync::mpsc::channel;

    fn accel_frame(groups: usize) -> Frame {
        Frame {
            title: "t".into(),
            groups: (0..groups)
                .map(|i| {
                    Group::accelerometer(
                        format!("A{i}"),
                        vec![Dataset::new("x", 9.18), Dataset::new("y", 0.0), Dataset::new("z", 0.0)],
                    )
                })
                .collect(),
        }
    }

    fn app() -> (GaugeApp, Sender<EngineMessage>, Receiver<GuiCommand>) {
        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();
        (GaugeApp::new(&AppConfig::default(), rx, tx_cmd), tx, rx_cmd)
    }

    #[test]
    fn first_frame_is_shown_on_new_gauges() {
        let (mut app, tx, _rx_cmd) = app();
        tx.send(EngineMessage::Frame(accel_frame(1))).unwrap();
        app.drain_messages();
        app.poll_widgets(&egui::Context::default());
        assert_eq!(app.widgets.len(), 1);
        assert_eq!(app.widgets[0].display(), "1.00 G");
        assert_eq!(app.history[0].len(), 1);
    }

    #[test]
    fn rebuild_keeps_visibility_and_history() {
        let (mut app, tx, _rx_cmd) = app();
        tx.send(EngineMessage::Frame(accel_frame(2))).unwrap();
        app.drain_messages();
        app.widgets[1].enabled = false;

        tx.send(EngineMessage::Frame(accel_frame(3))).unwrap();
        app.drain_messages();
        assert_eq!(app.widgets.len(), 3);
        assert!(app.widgets[0].enabled);
        assert!(!app.widgets[1].enabled);
        assert!(app.widgets[2].enabled);
        assert_eq!(app.history[0].len(), 2);
        assert_eq!(app.history[1].len(), 1);
        assert_eq!(app.history[2].len(), 1);
        assert_eq!(app.widgets[1].display(), "--");
    }
}
