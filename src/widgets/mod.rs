// src/widgets/mod.rs
pub mod accelerometer;
pub use accelerometer::AccelerometerWidget;
