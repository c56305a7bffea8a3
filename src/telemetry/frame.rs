use serde::{Deserialize, Deserializer};
use crate::telemetry::TelemetryError;
/// Widget kind that marks a group as a three-axis accelerometer.
pub const ACCELEROMETER_WIDGET: &str = "accelerometer";
/// Single reading inside a group. `tag` is the frame's `"widget"` field
/// ("x", "y", "z" for accelerometer axes).
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "widget")]
    pub tag: String,
    #[serde(default)]
    pub units: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
}
impl Dataset {
    pub fn new(tag: impl Into<String>, value: f64) -> Self {
        Self {
            tag: tag.into(),
            value,
            ..Default::default()
        }
    }
}
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Group {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub widget: String,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}
impl Group {
    pub fn accelerometer(title: impl Into<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            title: title.into(),
            widget: ACCELEROMETER_WIDGET.to_owned(),
            datasets,
        }
    }
    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }
    pub fn dataset(&self, index: usize) -> Option<&Dataset> {
        self.datasets.get(index)
    }
    pub fn is_accelerometer(&self) -> bool {
        self.widget == ACCELEROMETER_WIDGET
    }
}
/// One decoded telemetry update.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Frame {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub groups: Vec<Group>,
}
impl Frame {
    pub fn from_json(text: &str) -> Result<Self, TelemetryError> {
        Ok(serde_json::from_str(text)?)
    }
    fn accelerometers(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|g| g.is_accelerometer())
    }
}
/// Read access to accelerometer groups, as seen by a gauge.
pub trait AccelerometerSource {
    fn accelerometer_count(&self) -> usize;
    fn accelerometer(&self, index: usize) -> Option<&Group>;
}
impl AccelerometerSource for Frame {
    fn accelerometer_count(&self) -> usize {
        self.accelerometers().count()
    }
    fn accelerometer(&self, index: usize) -> Option<&Group> {
        self.accelerometers().nth(index)
    }
}
// Numbers arrive either as JSON numbers or as strings; anything unparsable reads as 0.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        serde_json::Value::Bool(b) => f64::from(u8::from(b)),
        _ => 0.0,
    })
}
