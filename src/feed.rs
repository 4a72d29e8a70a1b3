//! Near-Earth-object feed ingestion.
//!
//! Issues a single GET against the NEO feed for a fixed date window on a
//! background thread, parses the JSON body, and flattens it into display
//! records for placement. Any failure along the way collapses into one
//! `FeedError`, logged once; the scene simply shows no markers.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver};

use bevy::prelude::*;
use serde::Deserialize;

/// Display radius floor so tiny or unreported diameters still render
/// (display units).
pub const MIN_DISPLAY_RADIUS: f32 = 0.1;

/// Kilometers of estimated diameter per display unit of marker radius.
pub const DIAMETER_KM_PER_UNIT: f64 = 10.0;

/// Kilometers of miss distance per display unit of orbit radius.
pub const MISS_DISTANCE_KM_PER_UNIT: f64 = 1.0e6;

/// Where and what to fetch.
///
/// The date window is fixed; the API key is read from `NASA_API_KEY`,
/// falling back to the rate-limited demo key.
#[derive(Resource, Clone, Debug)]
pub struct FeedConfig {
    pub base_url: String,
    pub start_date: String,
    pub end_date: String,
    pub api_key: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.nasa.gov/neo/rest/v1".to_string(),
            start_date: "2024-10-01".to_string(),
            end_date: "2024-10-08".to_string(),
            api_key: std::env::var("NASA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string()),
        }
    }
}

impl FeedConfig {
    /// Full feed URL for the configured date window (inclusive).
    pub fn feed_url(&self) -> String {
        format!(
            "{}/feed?start_date={}&end_date={}&api_key={}",
            self.base_url, self.start_date, self.end_date, self.api_key
        )
    }
}

/// The single recognized failure kind: anything that goes wrong between
/// issuing the request and producing placement records.
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("failed to read feed body: {0}")]
    Read(#[from] std::io::Error),

    #[error("malformed feed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feed entry {0:?} has no close-approach data")]
    MissingCloseApproach(String),

    #[error("feed worker terminated without a result")]
    WorkerGone,
}

/// One near-Earth object, reduced to what placement needs.
///
/// Records are transient: consumed once by placement, never retained.
#[derive(Clone, Debug, PartialEq)]
pub struct NeoRecord {
    pub name: String,
    /// Maximum estimated diameter in kilometers.
    pub diameter_km: f64,
    /// Miss distance of the first close approach, in kilometers.
    pub miss_distance_km: f64,
}

impl NeoRecord {
    /// Marker sphere radius in display units, floored so a zero or absent
    /// diameter still renders as a dot.
    pub fn display_radius(&self) -> f32 {
        let radius = (self.diameter_km / DIAMETER_KM_PER_UNIT) as f32;
        if radius.is_finite() {
            radius.max(MIN_DISPLAY_RADIUS)
        } else {
            MIN_DISPLAY_RADIUS
        }
    }

    /// Distance from the scene origin in display units. Non-finite input
    /// collapses to zero so placement can never produce NaN coordinates.
    pub fn display_distance(&self) -> f32 {
        let distance = (self.miss_distance_km / MISS_DISTANCE_KM_PER_UNIT) as f32;
        if distance.is_finite() { distance.max(0.0) } else { 0.0 }
    }
}

/// Wire format of the feed body, reduced to the fields we read.
#[derive(Deserialize, Debug)]
pub struct FeedResponse {
    /// Date string -> objects approaching that day. A `BTreeMap` keeps date
    /// iteration deterministic (ascending), which plain JSON objects do not
    /// guarantee.
    pub near_earth_objects: BTreeMap<String, Vec<FeedEntry>>,
}

#[derive(Deserialize, Debug)]
pub struct FeedEntry {
    pub name: String,
    #[serde(default)]
    pub estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Deserialize, Debug, Default)]
pub struct EstimatedDiameter {
    #[serde(default)]
    pub kilometers: DiameterRange,
}

#[derive(Deserialize, Debug, Default)]
pub struct DiameterRange {
    #[serde(default)]
    pub estimated_diameter_max: f64,
}

#[derive(Deserialize, Debug)]
pub struct CloseApproach {
    pub miss_distance: MissDistance,
}

#[derive(Deserialize, Debug)]
pub struct MissDistance {
    /// The feed serializes kilometers as a JSON string.
    #[serde(deserialize_with = "number_or_string")]
    pub kilometers: f64,
}

/// Accept a JSON number or its string form ("501127.8").
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

/// Flatten the response into placement records: per-date feed order within
/// ascending date order.
///
/// An entry without a close-approach record fails the whole ingestion; the
/// failure taxonomy has no partial-result case.
pub fn flatten_feed(response: FeedResponse) -> Result<Vec<NeoRecord>, FeedError> {
    let mut records = Vec::new();
    for (_date, entries) in response.near_earth_objects {
        for entry in entries {
            let miss_distance_km = entry
                .close_approach_data
                .first()
                .map(|approach| approach.miss_distance.kilometers)
                .ok_or_else(|| FeedError::MissingCloseApproach(entry.name.clone()))?;

            records.push(NeoRecord {
                name: entry.name,
                diameter_km: entry.estimated_diameter.kilometers.estimated_diameter_max,
                miss_distance_km,
            });
        }
    }
    Ok(records)
}

/// Blocking fetch and parse. Runs on the background worker thread.
pub fn fetch_feed(url: &str) -> Result<Vec<NeoRecord>, FeedError> {
    let body = ureq::get(url).call().map_err(Box::new)?.into_string()?;
    let response: FeedResponse = serde_json::from_str(&body)?;
    flatten_feed(response)
}

/// Lifecycle of the one-shot feed fetch.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// Channel carrying the background fetch result to the ECS thread.
///
/// Removed once the result has been consumed, so polling stops after the
/// single fetch resolves.
#[derive(Resource)]
pub struct FeedTask(pub Mutex<Receiver<Result<Vec<NeoRecord>, FeedError>>>);

/// Plugin providing feed ingestion and marker placement.
pub struct NeoFeedPlugin;

impl Plugin for NeoFeedPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FeedConfig>()
            .init_resource::<FeedState>()
            .add_systems(Startup, begin_fetch)
            .add_systems(Update, crate::neo::place_fetched_neos);
    }
}

/// Kick off the fetch on a plain OS thread; the HTTP client blocks, the
/// scene must not.
fn begin_fetch(mut commands: Commands, config: Res<FeedConfig>) {
    let url = config.feed_url();
    let (sender, receiver) = mpsc::channel();

    std::thread::spawn(move || {
        let _ = sender.send(fetch_feed(&url));
    });

    commands.insert_resource(FeedTask(Mutex::new(receiver)));
    info!(
        "Requesting NEO feed for {}..{}",
        config.start_date, config.end_date
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(json: &str) -> FeedResponse {
        serde_json::from_str(json).expect("fixture should parse")
    }

    #[test]
    fn feed_url_interpolates_window_and_key() {
        let config = FeedConfig {
            base_url: "https://feed.example/v1".to_string(),
            start_date: "2024-10-01".to_string(),
            end_date: "2024-10-08".to_string(),
            api_key: "KEY".to_string(),
        };
        assert_eq!(
            config.feed_url(),
            "https://feed.example/v1/feed?start_date=2024-10-01&end_date=2024-10-08&api_key=KEY"
        );
    }

    #[test]
    fn flattens_entries_across_dates_in_date_order() {
        let response = parse(
            r#"{
                "near_earth_objects": {
                    "2024-10-02": [{
                        "name": "(2024 B)",
                        "estimated_diameter": {"kilometers": {"estimated_diameter_max": 2.5}},
                        "close_approach_data": [{"miss_distance": {"kilometers": "2000000"}}]
                    }],
                    "2024-10-01": [{
                        "name": "(2024 A)",
                        "estimated_diameter": {"kilometers": {"estimated_diameter_max": 1.0}},
                        "close_approach_data": [{"miss_distance": {"kilometers": "500000"}}]
                    }]
                }
            }"#,
        );

        let records = flatten_feed(response).unwrap();
        let names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
        assert_eq!(names, ["(2024 A)", "(2024 B)"]);
    }

    #[test]
    fn miss_distance_accepts_string_or_number() {
        let response = parse(
            r#"{
                "near_earth_objects": {
                    "2024-10-01": [
                        {
                            "name": "string form",
                            "close_approach_data": [{"miss_distance": {"kilometers": "501127.8"}}]
                        },
                        {
                            "name": "number form",
                            "close_approach_data": [{"miss_distance": {"kilometers": 501127.8}}]
                        }
                    ]
                }
            }"#,
        );

        let records = flatten_feed(response).unwrap();
        assert_relative_eq!(records[0].miss_distance_km, 501127.8);
        assert_relative_eq!(records[1].miss_distance_km, 501127.8);
    }

    #[test]
    fn absent_diameter_defaults_to_zero_and_floors() {
        let response = parse(
            r#"{
                "near_earth_objects": {
                    "2024-10-01": [{
                        "name": "no diameter",
                        "close_approach_data": [{"miss_distance": {"kilometers": "1000000"}}]
                    }]
                }
            }"#,
        );

        let records = flatten_feed(response).unwrap();
        assert_eq!(records[0].diameter_km, 0.0);
        assert_relative_eq!(records[0].display_radius(), MIN_DISPLAY_RADIUS);
        assert_relative_eq!(records[0].display_distance(), 1.0);
    }

    #[test]
    fn entry_without_close_approach_fails_ingestion() {
        let response = parse(
            r#"{
                "near_earth_objects": {
                    "2024-10-01": [{"name": "orphan", "close_approach_data": []}]
                }
            }"#,
        );

        let error = flatten_feed(response).unwrap_err();
        assert!(matches!(error, FeedError::MissingCloseApproach(name) if name == "orphan"));
    }

    #[test]
    fn empty_feed_yields_no_records() {
        let response = parse(r#"{"near_earth_objects": {}}"#);
        assert!(flatten_feed(response).unwrap().is_empty());
    }

    #[test]
    fn unparseable_body_is_a_json_error() {
        let error = serde_json::from_str::<FeedResponse>("not json").unwrap_err();
        let error = FeedError::from(error);
        assert!(matches!(error, FeedError::Json(_)));
    }

    #[test]
    fn display_derivation_matches_scales() {
        let record = NeoRecord {
            name: "scaled".to_string(),
            diameter_km: 20.0,
            miss_distance_km: 9_000_000.0,
        };
        assert_relative_eq!(record.display_radius(), 2.0);
        assert_relative_eq!(record.display_distance(), 9.0);
    }

    #[test]
    fn degenerate_inputs_never_produce_nan() {
        let record = NeoRecord {
            name: "degenerate".to_string(),
            diameter_km: f64::NAN,
            miss_distance_km: f64::INFINITY,
        };
        assert_eq!(record.display_radius(), MIN_DISPLAY_RADIUS);
        assert_eq!(record.display_distance(), 0.0);
    }
}
