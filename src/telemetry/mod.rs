// src/telemetry/mod.rs
pub mod dashboard;
pub mod error;
pub mod frame;
pub mod processor;
pub mod source;
pub use dashboard::{Dashboard, DashboardEvent};
pub use error::{Skip, TelemetryError};
pub use frame::{AccelerometerSource, Dataset, Frame, Group};
pub use processor::AccelerometerSampleProcessor;
pub use source::{JsonLineSource, ManualSource, SimulatedSource, TelemetrySource};
