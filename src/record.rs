//! Weather record type
//!
//! Records are written by an external process; this service only reads them,
//! so every field is optional to tolerate whatever shape the store holds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single city weather observation as stored in the `weather` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    /// City name, used as the lookup key (not unique)
    pub city: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub description: Option<String>,
    /// Creation time, filled in by the writer
    pub created_at: Option<DateTime<Utc>>,
}

impl WeatherRecord {
    /// Create a record with all observation fields set and `createdAt` of now
    pub fn new(
        city: impl Into<String>,
        temperature: f64,
        humidity: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            city: Some(city.into()),
            temperature: Some(temperature),
            humidity: Some(humidity),
            description: Some(description.into()),
            created_at: Some(Utc::now()),
        }
    }

    /// Set the creation timestamp
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}
