use crate::structs::*;

use reqwest::{
    header::{ACCEPT, USER_AGENT},
    StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;

pub type ApiResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

const AGENT: &str = concat!("commute-notifier/", env!("CARGO_PKG_VERSION"));

//////////////////////////////////////////////////////////
// API calls
//////////////////////////////////////////////////////////
#[derive(Debug, Clone)]
pub struct TransportApi {
    client: reqwest::Client,
    base_url: String,
}

impl TransportApi {
    pub fn new(base_url: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Looks up a free-text location and returns the first matching stop.
    pub async fn get_station(&self, query: &str) -> ApiResult<Lookup<Station>> {
        let params = [("query", query.to_string()), ("results", "1".to_string())];

        match self.get_json("locations", &params).await? {
            Some(json) => Ok(parse_station(&json)),
            None => Ok(Lookup::NotFound),
        }
    }

    /// Asks for the single best itinerary and returns its first leg.
    pub async fn get_journey(&self, from: &Station, to: &Station) -> ApiResult<Lookup<JourneyLeg>> {
        let params = [
            ("from", from.id.clone()),
            ("from.latitude", from.latitude.to_string()),
            ("from.longitude", from.longitude.to_string()),
            ("to.id", to.id.clone()),
            ("to.name", to.name.clone()),
            ("to.latitude", to.latitude.to_string()),
            ("to.longitude", to.longitude.to_string()),
            ("results", "1".to_string()),
        ];

        match self.get_json("journeys", &params).await? {
            Some(json) => Ok(parse_journey_leg(&json)),
            None => Ok(Lookup::NotFound),
        }
    }

    /// `None` for any status other than 200. Transport errors and bodies that
    /// are not JSON at all are passed up to the caller.
    async fn get_json(&self, endpoint: &str, params: &[(&str, String)]) -> ApiResult<Option<Value>> {
        let url = format!("{}{}", self.base_url, endpoint);

        let resp = self
            .client
            .get(url)
            .query(params)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, AGENT)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("GET {} -> {}", resp.url(), status);
        if status != StatusCode::OK {
            log::warn!("{} answered with status {}", endpoint, status);
            return Ok(None);
        }

        let body = resp.text().await?;
        let json: Value = serde_json::from_str(&body)?;
        Ok(Some(json))
    }
}

//////////////////////////////////////////////////////////
// Response shapes
//////////////////////////////////////////////////////////
/// HAFAS ids come as strings, some endpoints hand out plain numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    id: RawId,
    name: String,
    location: RawCoordinates,
}

#[derive(Debug, Deserialize)]
struct RawCoordinates {
    id: RawId,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeg {
    trip_id: Option<String>,
    departure: Option<String>,
    planned_departure: Option<String>,
    departure_delay: Option<i64>,
    line: Option<RawLine>,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    name: Option<String>,
    mode: Option<String>,
}

/// Builds a `Station` out of the first entry of a `locations` answer.
/// An entry missing any of the five fields counts as not found.
pub fn parse_station(json: &Value) -> Lookup<Station> {
    let first = match json.get(0) {
        Some(v) => v,
        None => return Lookup::NotFound,
    };

    match RawLocation::deserialize(first) {
        Ok(raw) => Lookup::Found(Station {
            id: raw.id.into(),
            name: raw.name,
            location_id: raw.location.id.into(),
            latitude: raw.location.latitude,
            longitude: raw.location.longitude,
        }),
        Err(e) => {
            log::warn!("Unusable location entry: {}", e);
            Lookup::NotFound
        }
    }
}

/// Extracts `journeys[0].legs[0]` of a `journeys` answer.
/// Walking legs carry neither trip nor line and count as not found.
pub fn parse_journey_leg(json: &Value) -> Lookup<JourneyLeg> {
    let first_leg = match json.pointer("/journeys/0/legs/0") {
        Some(v) => v,
        None => return Lookup::NotFound,
    };

    let raw = match RawLeg::deserialize(first_leg) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Unusable journey leg: {}", e);
            return Lookup::NotFound;
        }
    };

    let (line_name, mode) = match raw.line {
        Some(RawLine { name: Some(name), mode }) => (name, mode.unwrap_or_default()),
        _ => return Lookup::NotFound,
    };

    raw.trip_id
        .map(|trip_id| JourneyLeg {
            trip_id,
            departure: raw.departure,
            planned_departure: raw.planned_departure,
            departure_delay: raw.departure_delay,
            line_name,
            mode,
        })
        .into()
}
