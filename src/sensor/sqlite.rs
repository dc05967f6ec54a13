//! SQLite-backed sensor store. Readings survive restarts of the sensor loop.

use std::path::Path;

use async_trait::async_trait;
use chrono::DateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;

use crate::domain::{Error, SensorReading, SensorStore};

#[derive(Debug, Clone)]
pub struct SqliteSensorStore {
    pool: SqlitePool,
}

impl SqliteSensorStore {
    /// Opens (or creates) the database at `path` and makes sure the table exists.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS readings (
                sensor_name   TEXT NOT NULL,
                sensor_type   TEXT NOT NULL,
                created_at_ms INTEGER NOT NULL,
                value         INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        tracing::debug!(path = %path.as_ref().display(), "sensor store opened");
        Ok(Self { pool })
    }
}

fn limit(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

fn from_row(row: &SqliteRow) -> Result<SensorReading, Error> {
    let millis: i64 = row.try_get("created_at_ms")?;
    let timestamp = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| Error::Storage(format!("timestamp out of range: {millis}")))?;
    Ok(SensorReading {
        sensor_name: row.try_get("sensor_name")?,
        sensor_type: row.try_get("sensor_type")?,
        timestamp,
        value: row.try_get("value")?,
    })
}

/// Rows come back newest first; callers want oldest first.
fn oldest_first(rows: &[SqliteRow]) -> Result<Vec<SensorReading>, Error> {
    rows.iter().rev().map(from_row).collect()
}

#[async_trait]
impl SensorStore for SqliteSensorStore {
    async fn add_reading(&mut self, reading: SensorReading) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO readings (sensor_name, sensor_type, created_at_ms, value) VALUES (?, ?, ?, ?)",
        )
        .bind(&reading.sensor_name)
        .bind(&reading.sensor_type)
        .bind(reading.timestamp.timestamp_millis())
        .bind(reading.value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn readings(&self, count: usize) -> Result<Vec<SensorReading>, Error> {
        let rows = sqlx::query(
            "SELECT sensor_name, sensor_type, created_at_ms, value FROM readings \
             ORDER BY created_at_ms DESC, rowid DESC LIMIT ?",
        )
        .bind(limit(count))
        .fetch_all(&self.pool)
        .await?;
        oldest_first(&rows)
    }

    async fn readings_for_sensor(
        &self,
        sensor_name: &str,
        count: usize,
    ) -> Result<Vec<SensorReading>, Error> {
        let rows = sqlx::query(
            "SELECT sensor_name, sensor_type, created_at_ms, value FROM readings \
             WHERE sensor_name = ? ORDER BY created_at_ms DESC, rowid DESC LIMIT ?",
        )
        .bind(sensor_name)
        .bind(limit(count))
        .fetch_all(&self.pool)
        .await?;
        oldest_first(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(name: &str, secs: i64, value: i64) -> SensorReading {
        SensorReading {
            sensor_name: name.to_string(),
            sensor_type: "temperature".to_string(),
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            value,
        }
    }

    #[tokio::test]
    async fn returns_latest_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SqliteSensorStore::connect(dir.path().join("readings.db"))
            .await
            .unwrap();
        for i in 0..5 {
            store.add_reading(reading("a", i, i)).await.unwrap();
            store.add_reading(reading("b", i, 100 + i)).await.unwrap();
        }

        let latest: Vec<i64> = store
            .readings(3)
            .await
            .unwrap()
            .iter()
            .map(|r| r.value)
            .collect();
        assert_eq!(latest, vec![103, 4, 104]);

        let only_a = store.readings_for_sensor("a", 2).await.unwrap();
        assert_eq!(only_a.iter().map(|r| r.value).collect::<Vec<_>>(), vec![3, 4]);
        assert_eq!(only_a[1], reading("a", 4, 4));
        assert!(store.readings_for_sensor("c", 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn readings_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.db");

        let mut store = SqliteSensorStore::connect(&path).await.unwrap();
        store.add_reading(reading("thermometer 1", 1, -3)).await.unwrap();
        drop(store);

        let reopened = SqliteSensorStore::connect(&path).await.unwrap();
        let back = reopened.readings(10).await.unwrap();
        assert_eq!(back, vec![reading("thermometer 1", 1, -3)]);
    }
}
