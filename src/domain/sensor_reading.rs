use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorReading {
    pub sensor_name: String,
    pub sensor_type: String,
    pub timestamp: DateTime<Utc>,
    pub value: i64,
}

impl core::fmt::Display for SensorReading {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "(name='{}', type='{}', timestamp='{}', value={})",
            self.sensor_name, self.sensor_type, self.timestamp, self.value
        )
    }
}
