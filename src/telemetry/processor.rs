use std::time::Duration;
use log::trace;
use crate::telemetry::{AccelerometerSource, Skip};
/// Raw sensor units per G. Calibration value of the sensor, not standard gravity.
pub const GRAVITY_DIVISOR: f64 = 9.18;
/// Delay between a gauge update and its repaint.
pub const REDRAW_DELAY: Duration = Duration::from_millis(20);
/// Deferred repaint asked for by a successful update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawRequest {
    pub delay: Duration,
}
/// Output of one accelerometer update.
#[derive(Clone, Debug, PartialEq)]
pub struct GaugeReading {
    /// Resultant magnitude in G.
    pub value: f64,
    /// `value` with the display precision and a `" G"` suffix.
    pub display: String,
    pub redraw: RedrawRequest,
}
/// Turns the latest x/y/z readings of one accelerometer group into a gauge value.
///
/// Holds only its index. An index outside the source's accelerometer range at
/// construction time leaves the processor inert for good.
#[derive(Clone, Copy, Debug)]
pub struct AccelerometerSampleProcessor {
    index: usize,
    inert: bool,
}
impl AccelerometerSampleProcessor {
    pub fn new<S: AccelerometerSource + ?Sized>(index: usize, source: &S) -> Self {
        let inert = index >= source.accelerometer_count();
        if inert {
            log::warn!(
                "accelerometer index {index} out of range ({} available), gauge disabled",
                source.accelerometer_count()
            );
        }
        Self { index, inert }
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn is_inert(&self) -> bool {
        self.inert
    }
    pub fn process<S: AccelerometerSource + ?Sized>(
        &self,
        source: &S,
        precision: usize,
    ) -> Result<GaugeReading, Skip> {
        if self.inert {
            return Err(Skip::Inert);
        }
        let group = source
            .accelerometer(self.index)
            .ok_or(Skip::UnavailableSource { index: self.index })?;
        if group.dataset_count() != 3 {
            return Err(Skip::MalformedGroup {
                index: self.index,
                count: group.dataset_count(),
            });
        }
        let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
        for dataset in (0..group.dataset_count()).filter_map(|i| group.dataset(i)) {
            match dataset.tag.as_str() {
                "x" => x = dataset.value,
                "y" => y = dataset.value,
                "z" => z = dataset.value,
                _ => {}
            }
        }
        let value = magnitude_g(x, y, z);
        Ok(GaugeReading {
            value,
            display: format_g(value, precision),
            redraw: RedrawRequest {
                delay: REDRAW_DELAY,
            },
        })
    }
    /// Handler for one "dashboard updated" notification. Disabled gauges do nothing.
    pub fn handle<S: AccelerometerSource + ?Sized>(
        &self,
        enabled: bool,
        source: &S,
        precision: usize,
    ) -> Option<GaugeReading> {
        if !enabled {
            return None;
        }
        match self.process(source, precision) {
            Ok(reading) => Some(reading),
            Err(skip) => {
                trace!("accelerometer update skipped: {skip}");
                None
            }
        }
    }
}
/// Resultant magnitude in G of a raw three-axis sample.
pub fn magnitude_g(x: f64, y: f64, z: f64) -> f64 {
    let (x, y, z) = (x / GRAVITY_DIVISOR, y / GRAVITY_DIVISOR, z / GRAVITY_DIVISOR);
    (x * x + y * y + z * z).sqrt()
}
pub fn format_g(value: f64, precision: usize) -> String {
    format!("{value:.precision$} G")
}
