//! Zone data model.

use serde::{Deserialize, Serialize};

use crate::zones::pattern::PincodePattern;

/// Priority given to zones that do not set one. Lower values win.
pub const DEFAULT_PRIORITY: i32 = 999;

/// What kind of area a zone describes.
///
/// Display metadata only: resolution consults `pincode_patterns` for every
/// zone type, including `City` and `State`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    #[default]
    Pincode,
    City,
    State,
    Country,
}

/// Delivery window in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedDays {
    pub min: u32,
    pub max: u32,
}

impl Default for EstimatedDays {
    fn default() -> Self {
        Self { min: 3, max: 7 }
    }
}

/// A configured delivery rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique identifier within one configuration.
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub zone_type: ZoneType,

    /// Patterns tried in order during resolution.
    #[serde(default)]
    pub pincode_patterns: Vec<PincodePattern>,

    /// Stored for display; never consulted by resolution.
    #[serde(default)]
    pub cities: Vec<String>,

    /// Stored for display; never consulted by resolution.
    #[serde(default)]
    pub states: Vec<String>,

    pub delivery_charge: f64,

    /// Cart total at or above which delivery is free. `None` = never free.
    #[serde(default)]
    pub free_delivery_threshold: Option<f64>,

    #[serde(default)]
    pub estimated_days: EstimatedDays,

    #[serde(default = "default_true")]
    pub cod_available: bool,

    #[serde(default = "default_priority")]
    pub priority: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Zone {
    /// Create an active pincode zone with defaults for everything optional.
    pub fn new(id: impl Into<String>, name: impl Into<String>, delivery_charge: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            zone_type: ZoneType::default(),
            pincode_patterns: Vec::new(),
            cities: Vec::new(),
            states: Vec::new(),
            delivery_charge,
            free_delivery_threshold: None,
            estimated_days: EstimatedDays::default(),
            cod_available: true,
            priority: DEFAULT_PRIORITY,
            is_active: true,
        }
    }

    pub fn with_patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PincodePattern>,
    {
        self.pincode_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_free_delivery_threshold(mut self, threshold: f64) -> Self {
        self.free_delivery_threshold = Some(threshold);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// First pattern of this zone matching `code`, in configured order.
    pub fn matching_pattern(&self, code: &str) -> Option<&PincodePattern> {
        self.pincode_patterns.iter().find(|p| p.matches(code))
    }
}

fn default_true() -> bool {
    true
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_zone_defaults() {
        let zone: Zone = toml::from_str(
            r#"
            id = "mumbai"
            name = "Mumbai"
            delivery_charge = 100.0
            pincode_patterns = ["400*"]
            "#,
        )
        .unwrap();

        assert_eq!(zone.priority, DEFAULT_PRIORITY);
        assert!(zone.is_active);
        assert!(zone.cod_available);
        assert_eq!(zone.zone_type, ZoneType::Pincode);
        assert_eq!(zone.estimated_days, EstimatedDays { min: 3, max: 7 });
        assert_eq!(zone.free_delivery_threshold, None);
        assert!(zone.matching_pattern("400050").is_some());
    }

    #[test]
    fn test_city_zone_still_matches_on_patterns_only() {
        let mut zone = Zone::new("blr", "Bangalore", 80.0).with_patterns(["560*"]);
        zone.zone_type = ZoneType::City;
        zone.cities = vec!["Bangalore".into()];

        assert!(zone.matching_pattern("Bangalore").is_none());
        assert_eq!(zone.matching_pattern("560001").map(|p| p.as_str()), Some("560*"));
    }
}
