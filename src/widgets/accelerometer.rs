// src/widgets/accelerometer.rs
use std::f32::consts::PI;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use eframe::egui;
use egui::{Color32, Pos2, Stroke, Vec2};
use crate::telemetry::{AccelerometerSampleProcessor, AccelerometerSource, Dashboard, DashboardEvent};
/// Gauge scale in G.
pub const SCALE_MIN: f64 = 0.0;
pub const SCALE_MAX: f64 = 12.0;
/// Dial arc in degrees, clockwise from the 6 o'clock position.
const ARC_START_DEG: f32 = 90.0;
const ARC_END_DEG: f32 = 360.0;
const NEEDLE_PALETTE: [Color32; 6] = [
    Color32::from_rgb(0, 255, 255),
    Color32::from_rgb(255, 0, 255),
    Color32::from_rgb(255, 200, 0),
    Color32::from_rgb(80, 255, 120),
    Color32::from_rgb(255, 90, 90),
    Color32::from_rgb(120, 160, 255),
];
pub struct AccelerometerWidget {
    processor: AccelerometerSampleProcessor,
    events: Receiver<DashboardEvent>,
    title: String,
    pub enabled: bool,
    value: f64,
    display: String,
    pending_redraws: Vec<Instant>,
}
impl AccelerometerWidget {
    pub fn new(index: usize, dashboard: &mut Dashboard) -> Self {
        let processor = AccelerometerSampleProcessor::new(index, &*dashboard);
        let title = dashboard
            .accelerometer(index)
            .map(|g| g.title.clone())
            .unwrap_or_else(|| format!("Accelerometer {}", index + 1));
        Self {
            processor,
            events: dashboard.subscribe(),
            title,
            enabled: !processor.is_inert(),
            value: SCALE_MIN,
            display: "--".to_owned(),
            pending_redraws: Vec::new(),
        }
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn value(&self) -> f64 {
        self.value
    }
    pub fn display(&self) -> &str {
        &self.display
    }
    pub fn is_inert(&self) -> bool {
        self.processor.is_inert()
    }
    /// Handles every queued dashboard notification. Returns how many produced a reading.
    pub fn poll(&mut self, dashboard: &Dashboard, now: Instant) -> usize {
        let mut updates = 0;
        while let Ok(DashboardEvent::Updated) = self.events.try_recv() {
            if self.refresh(dashboard, now) {
                updates += 1;
            }
        }
        updates
    }
    /// Processes the dashboard's current frame once, without waiting for a notification.
    pub fn refresh(&mut self, dashboard: &Dashboard, now: Instant) -> bool {
        let Some(reading) = self
            .processor
            .handle(self.enabled, dashboard, dashboard.precision())
        else {
            return false;
        };
        self.value = reading.value;
        self.display = reading.display;
        // One timer per update, even if an earlier one is still pending.
        self.pending_redraws.push(now + reading.redraw.delay);
        true
    }
    /// Removes redraw deadlines that have passed and returns how many fired.
    pub fn take_due_redraws(&mut self, now: Instant) -> usize {
        let before = self.pending_redraws.len();
        self.pending_redraws.retain(|deadline| *deadline > now);
        before - self.pending_redraws.len()
    }
    pub fn next_redraw_in(&self, now: Instant) -> Option<Duration> {
        self.pending_redraws
            .iter()
            .min()
            .map(|deadline| deadline.saturating_duration_since(now))
    }
    pub fn ui(&self, ui: &mut egui::Ui) {
        let size = 180.0;
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), egui::Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;
        let face = if self.enabled {
            Color32::from_rgb(30, 30, 35)
        } else {
            Color32::from_rgb(20, 20, 20)
        };
        let text_color = Color32::from_rgb(180, 180, 180);
        painter.circle_filled(center, radius, face);
        painter.circle_stroke(center, radius, Stroke::new(1.5, Color32::from_rgb(80, 80, 85)));
        // Ticks every G, labels every 2 G.
        for step in 0..=(SCALE_MAX as i32) {
            let angle = needle_angle(step as f64);
            let dir = Vec2::angled(angle);
            let inner = if step % 2 == 0 { 0.80 } else { 0.88 };
            painter.line_segment(
                [center + dir * radius * inner, center + dir * radius * 0.95],
                Stroke::new(1.0, text_color),
            );
            if step % 2 == 0 {
                painter.text(
                    center + dir * radius * 0.66,
                    egui::Align2::CENTER_CENTER,
                    step.to_string(),
                    egui::FontId::proportional(10.0),
                    text_color,
                );
            }
        }
        let needle_color = if self.enabled {
            needle_color(self.processor.index())
        } else {
            Color32::DARK_GRAY
        };
        let tip: Pos2 = center + Vec2::angled(needle_angle(self.value)) * radius * 0.85;
        painter.line_segment([center, tip], Stroke::new(3.0, needle_color));
        painter.circle_filled(center, 6.0, Color32::from_rgb(70, 70, 75));
        painter.text(
            center + Vec2::new(0.0, radius * 0.45),
            egui::Align2::CENTER_CENTER,
            &self.display,
            egui::FontId::monospace(14.0),
            Color32::WHITE,
        );
        painter.text(
            response.rect.center_top(),
            egui::Align2::CENTER_TOP,
            &self.title,
            egui::FontId::proportional(12.0),
            text_color,
        );
    }
}
pub fn needle_color(index: usize) -> Color32 {
    NEEDLE_PALETTE[index % NEEDLE_PALETTE.len()]
}
/// Screen angle (radians, clockwise from +x) for a gauge value. Values outside the scale are pinned.
pub fn needle_angle(value: f64) -> f32 {
    let t = ((value.clamp(SCALE_MIN, SCALE_MAX) - SCALE_MIN) / (SCALE_MAX - SCALE_MIN)) as f32;
    let degrees = ARC_START_DEG + t * (ARC_END_DEG - ARC_START_DEG);
    // 0° on the dial is straight down, which is +90° on screen.
    (degrees + 90.0) * PI / 180.0
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{Dataset, Frame, Group};
    fn frame(x: f64) -> Frame {
        Frame {
            title: "t".into(),
            groups: vec![Group::accelerometer(
                "Nose",
                vec![Dataset::new("x", x), Dataset::new("y", 0.0), Dataset::new("z", 0.0)],
            )],
        }
    }
    fn dashboard_with_frame() -> Dashboard {
        let mut dash = Dashboard::new(2);
        dash.update_frame(frame(9.18));
        dash
    }
    #[test]
    fn updates_value_and_text_on_notification() {
        let mut dash = dashboard_with_frame();
        let mut widget = AccelerometerWidget::new(0, &mut dash);
        assert_eq!(widget.title(), "Nose");
        dash.update_frame(frame(9.18 * 2.0));
        assert_eq!(widget.poll(&dash, Instant::now()), 1);
        assert_eq!(widget.value(), 2.0);
        assert_eq!(widget.display(), "2.00 G");
    }
    #[test]
    fn refresh_reads_current_frame_without_notification() {
        let mut dash = dashboard_with_frame();
        let mut widget = AccelerometerWidget::new(0, &mut dash);
        let now = Instant::now();
        assert_eq!(widget.poll(&dash, now), 0);
        assert!(widget.refresh(&dash, now));
        assert_eq!(widget.display(), "1.00 G");
        assert_eq!(widget.next_redraw_in(now), Some(Duration::from_millis(20)));
        widget.enabled = false;
        assert!(!widget.refresh(&dash, now));
    }
    #[test]
    fn disabled_widget_ignores_updates() {
        let mut dash = dashboard_with_frame();
        let mut widget = AccelerometerWidget::new(0, &mut dash);
        widget.enabled = false;
        dash.update_frame(frame(9.18));
        assert_eq!(widget.poll(&dash, Instant::now()), 0);
        assert_eq!(widget.display(), "--");
    }
    #[test]
    fn out_of_range_widget_is_inert() {
        let mut dash = dashboard_with_frame();
        let mut widget = AccelerometerWidget::new(3, &mut dash);
        assert!(widget.is_inert());
        assert!(!widget.enabled);
        widget.enabled = true;
        dash.update_frame(frame(9.18));
        assert_eq!(widget.poll(&dash, Instant::now()), 0);
    }
    #[test]
    fn every_update_schedules_its_own_redraw() {
        let mut dash = dashboard_with_frame();
        let mut widget = AccelerometerWidget::new(0, &mut dash);
        let now = Instant::now();
        dash.update_frame(frame(1.0));
        dash.update_frame(frame(2.0));
        dash.update_frame(frame(3.0));
        assert_eq!(widget.poll(&dash, now), 3);
        assert_eq!(widget.next_redraw_in(now), Some(Duration::from_millis(20)));
        assert_eq!(widget.take_due_redraws(now), 0);
        assert_eq!(widget.take_due_redraws(now + Duration::from_millis(21)), 3);
        assert_eq!(widget.next_redraw_in(now), None);
    }
    #[test]
    fn needle_spans_the_arc_and_pins_out_of_range() {
        let start = needle_angle(SCALE_MIN);
        let end = needle_angle(SCALE_MAX);
        assert!((end - start - 270.0_f32.to_radians()).abs() < 1e-5);
        assert_eq!(needle_angle(-3.0), start);
        assert_eq!(needle_angle(40.0), end);
        assert!(needle_angle(6.0) > start && needle_angle(6.0) < end);
    }
    #[test]
    fn needle_colors_wrap_around_palette() {
        assert_eq!(needle_color(0), needle_color(NEEDLE_PALETTE.len()));
    }
}
