//! Simulated fridge sensors and the store their readings go to.
//!
//! Runs independently of the accounting workflow.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::domain::{Error, Sensor, SensorReading, SensorStore};

pub mod sqlite;

pub use sqlite::SqliteSensorStore;

pub const ALL_SENSORS_LABEL: &str = "All sensor readings";

pub struct TemperatureSensor {
    name: String,
}

impl TemperatureSensor {
    pub const SENSOR_TYPE: &'static str = "temperature";

    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Sensor for TemperatureSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn sensor_type(&self) -> &str {
        Self::SENSOR_TYPE
    }

    fn read(&mut self) -> SensorReading {
        SensorReading {
            sensor_name: self.name.clone(),
            sensor_type: Self::SENSOR_TYPE.to_string(),
            timestamp: Utc::now(),
            value: rand::thread_rng().gen_range(-5..=25),
        }
    }
}

/// Keeps readings in insertion order, dropping the oldest past `capacity`.
#[derive(Debug)]
pub struct InMemorySensorStore {
    readings: VecDeque<SensorReading>,
    capacity: usize,
}

impl InMemorySensorStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            readings: VecDeque::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl Default for InMemorySensorStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl SensorStore for InMemorySensorStore {
    async fn add_reading(&mut self, reading: SensorReading) -> Result<(), Error> {
        if self.capacity == 0 {
            return Err(Error::Storage("sensor store has no capacity".to_string()));
        }
        if self.readings.len() == self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(reading);
        Ok(())
    }

    async fn readings(&self, count: usize) -> Result<Vec<SensorReading>, Error> {
        let skip = self.readings.len().saturating_sub(count);
        Ok(self.readings.iter().skip(skip).cloned().collect())
    }

    async fn readings_for_sensor(
        &self,
        sensor_name: &str,
        count: usize,
    ) -> Result<Vec<SensorReading>, Error> {
        let mut latest: Vec<SensorReading> = self
            .readings
            .iter()
            .rev()
            .filter(|r| r.sensor_name == sensor_name)
            .take(count)
            .cloned()
            .collect();
        latest.reverse();
        Ok(latest)
    }
}

/// Reads every sensor into the store once per `pause`, `iterations` times,
/// or forever when `iterations` is `None`. The first pass runs immediately.
/// An unbounded run only returns on error.
pub async fn acquire<S>(
    sensors: &mut [Box<dyn Sensor + Send>],
    store: &mut S,
    pause: Duration,
    iterations: Option<u32>,
) -> Result<u32, Error>
where
    S: SensorStore,
{
    if pause.is_zero() {
        return Err(Error::Config("sensor pause must be non-zero".to_string()));
    }
    let mut ticker = tokio::time::interval(pause);
    let mut done = 0;

    while iterations.is_none_or(|n| done < n) {
        ticker.tick().await;

        for sensor in sensors.iter_mut() {
            let reading = sensor.read();
            tracing::debug!(
                sensor = sensor.name(),
                kind = sensor.sensor_type(),
                %reading,
                "sensor read"
            );
            store.add_reading(reading).await?;
        }

        done += 1;
        tracing::info!(iteration = done, sensors = sensors.len(), "sensor readings stored");
    }

    Ok(done)
}

/// JSON body for the live-data chart: `[epoch_ms, value]` pairs.
#[derive(Debug, Serialize)]
pub struct ReadingsPayload {
    pub label: String,
    pub data: Vec<(i64, i64)>,
}

pub fn readings_payload(label: impl Into<String>, readings: &[SensorReading]) -> ReadingsPayload {
    ReadingsPayload {
        label: label.into(),
        data: readings
            .iter()
            .map(|r| (r.timestamp.timestamp_millis(), r.value))
            .collect(),
    }
}

/// Latest `count` readings for one sensor, or for all of them, labelled the
/// way the live-data chart expects.
pub async fn latest_payload<S>(
    store: &S,
    sensor_name: Option<&str>,
    count: usize,
) -> Result<ReadingsPayload, Error>
where
    S: SensorStore + ?Sized,
{
    match sensor_name {
        Some(name) => Ok(readings_payload(
            name,
            &store.readings_for_sensor(name, count).await?,
        )),
        None => Ok(readings_payload(
            ALL_SENSORS_LABEL,
            &store.readings(count).await?,
        )),
    }
}
