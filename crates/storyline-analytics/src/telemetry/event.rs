//! TelemetryEvent parsing.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use storyline_core::config::AnalyticsConfig;
use storyline_core::errors::TelemetryError;

/// One player action as reported by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryEvent {
    pub actor: String,
    pub verb: String,
    pub object: String,
    pub result: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Wire shape, every field optional so a missing one can be named.
#[derive(Debug, Deserialize)]
struct RawEvent {
    actor: Option<String>,
    verb: Option<String>,
    object: Option<String>,
    result: Option<String>,
    timestamp: Option<String>,
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TelemetryError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => Ok(ts.with_timezone(&Utc)),
        Err(rfc_err) => NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| TelemetryError::InvalidTimestamp {
                value: value.to_string(),
                message: rfc_err.to_string(),
            }),
    }
}

impl TelemetryEvent {
    pub fn new(
        actor: impl Into<String>,
        verb: impl Into<String>,
        object: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            actor: actor.into(),
            verb: verb.into(),
            object: object.into(),
            result: None,
            timestamp,
        }
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Parse one JSON message.
    ///
    /// `timestamp` may be RFC 3339 or a naive ISO-8601 date-time, which is
    /// read as UTC.
    pub fn from_json(json: &str) -> Result<Self, TelemetryError> {
        let raw: RawEvent = serde_json::from_str(json)?;
        let timestamp = raw
            .timestamp
            .ok_or(TelemetryError::MissingField("timestamp"))?;
        Ok(Self {
            actor: raw.actor.ok_or(TelemetryError::MissingField("actor"))?,
            verb: raw.verb.ok_or(TelemetryError::MissingField("verb"))?,
            object: raw.object.ok_or(TelemetryError::MissingField("object"))?,
            result: raw.result,
            timestamp: parse_timestamp(&timestamp)?,
        })
    }

    pub fn to_json(&self) -> Result<String, TelemetryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// An unlock attempt that succeeded.
    pub fn is_unlock(&self, config: &AnalyticsConfig) -> bool {
        self.verb == config.effective_unlock_verb()
            && self.result.as_deref() == Some(config.effective_unlock_result())
    }
}

/// Outcome of a JSON-lines parse: the good events plus each bad line's
/// 1-based number and error.
#[derive(Debug, Default)]
pub struct TelemetryBatch {
    pub events: Vec<TelemetryEvent>,
    pub errors: Vec<(usize, TelemetryError)>,
}

impl TelemetryBatch {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse one event per line. Blank lines are skipped, bad lines collected.
pub fn parse_lines(input: &str) -> TelemetryBatch {
    let mut batch = TelemetryBatch::default();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match TelemetryEvent::from_json(line) {
            Ok(event) => batch.events.push(event),
            Err(e) => {
                tracing::warn!(line = i + 1, error = %e, "skipping telemetry line");
                batch.errors.push((i + 1, e));
            }
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn offset_timestamp_is_converted_to_utc() {
        let ts = parse_timestamp("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn naive_timestamp_with_space_separator() {
        let ts = parse_timestamp("2024-03-01 08:15:30.250").unwrap();
        assert_eq!((ts.day(), ts.minute()), (1, 15));
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(TelemetryError::InvalidTimestamp { .. })
        ));
    }
}
