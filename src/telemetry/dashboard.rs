use std::sync::mpsc::{channel, Receiver, Sender};
use log::debug;
use crate::telemetry::{AccelerometerSource, Frame, Group};
/// Notification sent to subscribers after a new frame has been stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardEvent {
    Updated,
}
/// Latest telemetry frame plus display settings shared by all gauges.
pub struct Dashboard {
    frame: Frame,
    precision: usize,
    subscribers: Vec<Sender<DashboardEvent>>,
}
impl Dashboard {
    pub fn new(precision: usize) -> Self {
        Self {
            frame: Frame::default(),
            precision,
            subscribers: Vec::new(),
        }
    }
    pub fn subscribe(&mut self) -> Receiver<DashboardEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
    /// Stores `frame` and notifies every live subscriber.
    /// Returns `true` when the number of accelerometer groups changed.
    pub fn update_frame(&mut self, frame: Frame) -> bool {
        let before = self.frame.accelerometer_count();
        self.frame = frame;
        let after = self.frame.accelerometer_count();
        self.subscribers
            .retain(|tx| tx.send(DashboardEvent::Updated).is_ok());
        if before != after {
            debug!("accelerometer layout changed: {before} -> {after}");
        }
        before != after
    }
    pub fn precision(&self) -> usize {
        self.precision
    }
    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision;
    }
}
impl AccelerometerSource for Dashboard {
    fn accelerometer_count(&self) -> usize {
        self.frame.accelerometer_count()
    }
    fn accelerometer(&self, index: usize) -> Option<&Group> {
        self.frame.accelerometer(index)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::Dataset;
    fn accel_frame(groups: usize) -> Frame {
        Frame {
            title: "t".into(),
            groups: (0..groups)
                .map(|i| {
                    Group::accelerometer(
                        format!("A{i}"),
                        vec![Dataset::new("x", 1.0), Dataset::new("y", 2.0), Dataset::new("z", 3.0)],
                    )
                })
                .collect(),
        }
    }
    #[test]
    fn notifies_each_subscriber_once_per_update() {
        let mut dash = Dashboard::new(2);
        let a = dash.subscribe();
        let b = dash.subscribe();
        dash.update_frame(accel_frame(1));
        dash.update_frame(accel_frame(1));
        assert_eq!(a.try_iter().count(), 2);
        assert_eq!(b.try_iter().count(), 2);
    }
    #[test]
    fn drops_disconnected_subscribers() {
        let mut dash = Dashboard::new(2);
        let keep = dash.subscribe();
        drop(dash.subscribe());
        dash.update_frame(accel_frame(1));
        assert_eq!(dash.subscriber_count(), 1);
        assert_eq!(keep.try_recv(), Ok(DashboardEvent::Updated));
    }
    #[test]
    fn reports_layout_changes() {
        let mut dash = Dashboard::new(2);
        assert!(dash.update_frame(accel_frame(2)));
        assert!(!dash.update_frame(accel_frame(2)));
        assert_eq!(dash.accelerometer_count(), 2);
        assert!(dash.update_frame(accel_frame(1)));
    }
}
