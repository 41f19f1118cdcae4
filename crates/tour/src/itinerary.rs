//! The CV dataset: an ordered list of experiences, one per tour stop.
//!
//! The bundled dataset is compiled into the binary. An alternative file can be
//! supplied at startup (see [`crate::config::DATASET_ENV_VAR`]); either way the
//! data is validated once and never mutated afterwards.

use std::collections::HashSet;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::geodesy::GeoCoord;

const BUNDLED_DATASET: &str = include_str!("../data/experiences.json");

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A tour stop on the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    pub coordinates: GeoCoord,
    /// ISO 3166-1 alpha-2, e.g. "IT", "GB".
    pub country_code: String,
}

impl Location {
    /// City part of the display name, used for marker labels.
    pub fn short_label(&self) -> &str {
        self.name.split(',').next().unwrap_or(&self.name).trim()
    }
}

/// Employment period as `YYYY-MM` strings; `end` may be `"present"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: String,
    pub end: String,
}

impl Period {
    pub fn is_current(&self) -> bool {
        self.end.eq_ignore_ascii_case("present")
    }

    /// Human-readable range, e.g. `Nov 2022 - Present`.
    pub fn display(&self) -> String {
        let end = if self.is_current() {
            "Present".to_string()
        } else {
            month_label(&self.end)
        };
        format!("{} - {}", month_label(&self.start), end)
    }
}

/// `2022-11` -> `Nov 2022`. Anything unparseable is shown verbatim.
fn month_label(raw: &str) -> String {
    let Some((year, month)) = raw.split_once('-') else {
        return raw.to_string();
    };
    match month.parse::<usize>() {
        Ok(m @ 1..=12) if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) => {
            format!("{} {}", MONTHS[m - 1], year)
        }
        _ => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub location: Location,
    pub company: String,
    pub job_title: String,
    pub period: Period,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

/// Owner shown on the welcome overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub intro: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Dataset {
    #[serde(default)]
    profile: Profile,
    experiences: Vec<Experience>,
}

/// Validated, read-only tour itinerary.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Itinerary {
    profile: Profile,
    experiences: Vec<Experience>,
}

impl Itinerary {
    /// Validate and wrap a list of experiences.
    ///
    /// Fails if the list is empty, any coordinate is out of range, or two
    /// experiences share an id.
    pub fn new(profile: Profile, experiences: Vec<Experience>) -> Result<Self, DatasetError> {
        if experiences.is_empty() {
            return Err(DatasetError::Empty);
        }
        let mut seen = HashSet::new();
        for exp in &experiences {
            exp.location
                .coordinates
                .validate()
                .map_err(|source| DatasetError::InvalidCoordinate {
                    id: exp.id.clone(),
                    source,
                })?;
            if !seen.insert(exp.id.as_str()) {
                return Err(DatasetError::DuplicateId(exp.id.clone()));
            }
        }
        Ok(Self {
            profile,
            experiences,
        })
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(BUNDLED_DATASET)
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Self::new(dataset.profile, dataset.experiences)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn len(&self) -> usize {
        self.experiences.len()
    }

    /// Always false for a constructed itinerary; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Experience> {
        self.experiences.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Experience> {
        self.experiences.iter()
    }

    pub fn coordinates(&self, index: usize) -> Option<GeoCoord> {
        self.get(index).map(|exp| exp.location.coordinates)
    }
}
