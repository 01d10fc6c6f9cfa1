use crate::config::MAX_TIME_BEFORE_MINUTES;

use chrono::NaiveTime;

use std::error::Error;

/// Outcome of a lookup against the transit API.
///
/// Absence is a regular answer here, not an error: an unknown location or a
/// search without itinerary yields `NotFound` and the caller decides what to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    #[cfg(test)]
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

/// A resolved stop, taken from the first result of a location search.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub location_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// First leg of the best itinerary between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyLeg {
    pub trip_id: String,
    /// Realtime departure, RFC 3339.
    pub departure: Option<String>,
    pub planned_departure: Option<String>,
    /// Seconds, may be negative.
    pub departure_delay: Option<i64>,
    /// Name of the line, e.g. "U2" or "M27"
    pub line_name: String,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub timeout_secs: u32,
}

/// Everything the scheduler needs to know about the daily commute.
#[derive(Debug, Clone, PartialEq)]
pub struct CommuteConfig {
    pub origin: String,
    pub destination: String,
    pub target: NaiveTime,
    pub lead_minutes: i64,
}

impl CommuteConfig {
    pub fn new(
        origin: String,
        destination: String,
        time_to_go: &str,
        lead_minutes: i64,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err("Location keywords must not be empty!")?;
        }
        if lead_minutes < 0 {
            return Err(format!("Advance notice must not be negative, got {}", lead_minutes))?;
        }
        if lead_minutes > MAX_TIME_BEFORE_MINUTES {
            return Err(format!(
                "Advance notice must be at most {} minutes, got {}",
                MAX_TIME_BEFORE_MINUTES, lead_minutes
            ))?;
        }
        let target = parse_time_to_go(time_to_go)?;

        Ok(Self {
            origin,
            destination,
            target,
            lead_minutes,
        })
    }
}

/// Parses the daily commute time given as `HH:MM`.
pub fn parse_time_to_go(s: &str) -> Result<NaiveTime, Box<dyn Error + Send + Sync>> {
    match NaiveTime::parse_from_str(s.trim(), "%H:%M") {
        Ok(t) => Ok(t),
        Err(e) => Err(format!("Invalid commute time '{}' (expected hh:mm): {}", s, e))?,
    }
}
