use std::collections::VecDeque;
use std::io::BufRead;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::telemetry::processor::GRAVITY_DIVISOR;
use crate::telemetry::{Dataset, Frame, Group, TelemetryError};
/// Trait representing something that can yield telemetry frames on demand.
pub trait TelemetrySource {
    fn next_frame(&mut self) -> Result<Option<Frame>, TelemetryError>;
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<Frame>,
}
impl ManualSource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            queue: frames.into_iter().collect(),
        }
    }
}
impl TelemetrySource for ManualSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, TelemetryError> {
        Ok(self.queue.pop_front())
    }
}
/// Replays newline-delimited JSON frames. Blank lines are ignored.
pub struct JsonLineSource<R: BufRead> {
    reader: R,
    line: String,
}
impl<R: BufRead> JsonLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}
impl<R: BufRead> TelemetrySource for JsonLineSource<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, TelemetryError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let text = self.line.trim();
            if !text.is_empty() {
                return Frame::from_json(text).map(Some);
            }
        }
    }
}
/// Largest peak noise (m/s²) the simulator accepts; larger values are capped.
pub const MAX_NOISE: f64 = 100.0;
/// Synthetic accelerometers: a slowly tumbling 1 G vector plus uniform noise.
pub struct SimulatedSource {
    accelerometers: usize,
    noise: f64,
    phase: f64,
    rng: StdRng,
}
impl SimulatedSource {
    pub fn new(accelerometers: usize, noise: f64) -> Self {
        Self::with_rng(accelerometers, noise, StdRng::from_entropy())
    }
    pub fn seeded(accelerometers: usize, noise: f64, seed: u64) -> Self {
        Self::with_rng(accelerometers, noise, StdRng::seed_from_u64(seed))
    }
    fn with_rng(accelerometers: usize, noise: f64, rng: StdRng) -> Self {
        Self {
            accelerometers,
            noise: if noise.is_finite() { noise.abs().min(MAX_NOISE) } else { 0.0 },
            phase: 0.0,
            rng,
        }
    }
    fn jitter(&mut self) -> f64 {
        if self.noise == 0.0 {
            0.0
        } else {
            self.rng.gen_range(-self.noise..=self.noise)
        }
    }
}
impl TelemetrySource for SimulatedSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, TelemetryError> {
        self.phase += 0.05;
        let mut groups = Vec::with_capacity(self.accelerometers);
        for i in 0..self.accelerometers {
            // Each sensor tumbles at its own rate and shakes a little harder than the last.
            let p = self.phase * (1.0 + i as f64 * 0.3);
            let shake = 1.0 + i as f64 * 0.5;
            let x = GRAVITY_DIVISOR * p.sin() * p.cos() + self.jitter() * shake;
            let y = GRAVITY_DIVISOR * p.sin() * p.sin() + self.jitter() * shake;
            let z = GRAVITY_DIVISOR * p.cos() + self.jitter() * shake;
            let mut datasets = vec![Dataset::new("x", x), Dataset::new("y", y), Dataset::new("z", z)];
            for (dataset, title) in datasets.iter_mut().zip(["X", "Y", "Z"]) {
                dataset.title = title.to_owned();
                dataset.units = "m/s²".to_owned();
            }
            groups.push(Group::accelerometer(format!("Accelerometer {}", i + 1), datasets));
        }
        Ok(Some(Frame {
            title: "Simulated IMU".to_owned(),
            groups,
        }))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::telemetry::processor::magnitude_g;
    use crate::telemetry::AccelerometerSource;
    #[test]
    fn manual_source_drains_in_order() {
        let a = Frame { title: "a".into(), groups: vec![] };
        let b = Frame { title: "b".into(), groups: vec![] };
        let mut source = ManualSource::new(vec![a, b]);
        assert_eq!(source.next_frame().unwrap().unwrap().title, "a");
        assert_eq!(source.next_frame().unwrap().unwrap().title, "b");
        assert!(source.next_frame().unwrap().is_none());
    }
    #[test]
    fn json_lines_skip_blanks_and_stop_at_eof() {
        let text = "{\"title\":\"one\"}\n\n   \n{\"title\":\"two\",\"groups\":[]}\n";
        let mut source = JsonLineSource::new(Cursor::new(text));
        assert_eq!(source.next_frame().unwrap().unwrap().title, "one");
        assert_eq!(source.next_frame().unwrap().unwrap().title, "two");
        assert!(source.next_frame().unwrap().is_none());
    }
    #[test]
    fn json_lines_surface_parse_errors() {
        let mut source = JsonLineSource::new(Cursor::new("garbage\n"));
        assert!(matches!(source.next_frame(), Err(TelemetryError::Json(_))));
    }
    #[test]
    fn noiseless_simulation_stays_at_one_g() {
        let mut source = SimulatedSource::seeded(3, 0.0, 7);
        for _ in 0..20 {
            let frame = source.next_frame().unwrap().unwrap();
            assert_eq!(frame.accelerometer_count(), 3);
            for i in 0..3 {
                let group = frame.accelerometer(i).unwrap();
                assert_eq!(group.dataset_count(), 3);
                let v: Vec<f64> = group.datasets.iter().map(|d| d.value).collect();
                assert!((magnitude_g(v[0], v[1], v[2]) - 1.0).abs() < 1e-9);
            }
        }
    }
    #[test]
    fn huge_noise_is_capped() {
        let mut source = SimulatedSource::seeded(1, f64::MAX, 3);
        let frame = source.next_frame().unwrap().unwrap();
        let group = frame.accelerometer(0).unwrap();
        for dataset in &group.datasets {
            assert!(dataset.value.abs() <= GRAVITY_DIVISOR + MAX_NOISE);
        }
        let mut nan = SimulatedSource::seeded(1, f64::NAN, 3);
        assert!(nan.next_frame().unwrap().is_some());
    }
    #[test]
    fn seeded_simulation_is_reproducible() {
        let mut a = SimulatedSource::seeded(2, 0.5, 42);
        let mut b = SimulatedSource::seeded(2, 0.5, 42);
        for _ in 0..5 {
            assert_eq!(a.next_frame().unwrap(), b.next_frame().unwrap());
        }
    }
}
