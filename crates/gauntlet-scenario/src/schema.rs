//! Scenario schema: parsing, validation, and projection.

use std::path::Path;

use serde::Deserialize;

use gauntlet_adapter::AdapterConfig;

use crate::error::ScenarioError;

/// Default seed substituted when a scenario leaves `seed` unset.
///
/// The adapter requires a concrete seed; absence never propagates
/// past resolution.
pub const DEFAULT_SEED: u64 = 0;

/// Raw on-disk form: every field optional so validation can name
/// exactly which one is missing or malformed.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScenario {
    map_type: Option<String>,
    seed: Option<i64>,
    traffic_density: Option<f64>,
}

/// A validated scenario description.
///
/// Read once from a file and immutable for the lifetime of a run. The
/// adapter configuration derived from it is a one-way projection.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioConfig {
    /// Map token string describing the road topology.
    pub map_type: String,
    /// Optional RNG seed; `None` means "unset", resolved to
    /// [`DEFAULT_SEED`] at projection time.
    pub seed: Option<u64>,
    /// Traffic density in `[0, 1]`.
    pub traffic_density: f64,
}

impl ScenarioConfig {
    /// Load and validate a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// - [`ScenarioError::UnsupportedFormat`] for any extension outside
    ///   the YAML family (no partial parsing is attempted);
    /// - [`ScenarioError::Parse`] for malformed YAML or unknown keys;
    /// - [`ScenarioError::MissingField`] / [`ScenarioError::InvalidValue`]
    ///   naming the offending field.
    pub fn from_yaml(path: &Path) -> Result<Self, ScenarioError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => {}
            _ => {
                return Err(ScenarioError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        }

        let text = std::fs::read_to_string(path).map_err(|e| ScenarioError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let raw: RawScenario =
            serde_yaml::from_str(&text).map_err(|e| ScenarioError::Parse {
                reason: e.to_string(),
            })?;
        Self::validate(raw)
    }

    fn validate(raw: RawScenario) -> Result<Self, ScenarioError> {
        let map_type = raw
            .map_type
            .ok_or(ScenarioError::MissingField { field: "map_type" })?;
        if map_type.is_empty() {
            return Err(ScenarioError::InvalidValue {
                field: "map_type",
                reason: "must not be empty".to_string(),
            });
        }

        let seed = match raw.seed {
            None => None,
            Some(s) if s < 0 => {
                return Err(ScenarioError::InvalidValue {
                    field: "seed",
                    reason: format!("must be non-negative, got {s}"),
                })
            }
            Some(s) => Some(s as u64),
        };

        let traffic_density = raw
            .traffic_density
            .ok_or(ScenarioError::MissingField {
                field: "traffic_density",
            })?;
        if !traffic_density.is_finite() || !(0.0..=1.0).contains(&traffic_density) {
            return Err(ScenarioError::InvalidValue {
                field: "traffic_density",
                reason: format!("must be in [0, 1], got {traffic_density}"),
            });
        }

        Ok(Self {
            map_type,
            seed,
            traffic_density,
        })
    }

    /// Project into an adapter configuration.
    ///
    /// An unset seed becomes [`DEFAULT_SEED`]; a single scenario variant
    /// is exposed; manual control is always off for scripted runs.
    pub fn resolve(&self, render: bool) -> AdapterConfig {
        AdapterConfig {
            use_render: render,
            manual_control: false,
            map_name: self.map_type.clone(),
            start_seed: self.seed.unwrap_or(DEFAULT_SEED),
            num_scenarios: 1,
            traffic_density: self.traffic_density,
        }
    }
}

/// Load a scenario file and resolve it in one call.
pub fn resolve_scenario(path: &Path, render: bool) -> Result<AdapterConfig, ScenarioError> {
    let scenario = ScenarioConfig::from_yaml(path)?;
    tracing::debug!(
        map = %scenario.map_type,
        seed = ?scenario.seed,
        density = scenario.traffic_density,
        "scenario resolved"
    );
    Ok(scenario.resolve(render))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("create temp scenario");
        file.write_all(contents.as_bytes()).expect("write scenario");
        file
    }

    #[test]
    fn well_formed_scenario_parses() {
        let file = yaml_file("map_type: \"X\"\nseed: 42\ntraffic_density: 0.1\n");
        let scenario = ScenarioConfig::from_yaml(file.path()).unwrap();
        assert_eq!(scenario.map_type, "X");
        assert_eq!(scenario.seed, Some(42));
        assert_eq!(scenario.traffic_density, 0.1);
    }

    #[test]
    fn non_yaml_extension_is_rejected_unparsed() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("create temp file");
        // Valid YAML content, still rejected on extension alone.
        file.write_all(b"map_type: X\ntraffic_density: 0.1\n")
            .expect("write");
        match ScenarioConfig::from_yaml(file.path()) {
            Err(ScenarioError::UnsupportedFormat { .. }) => {}
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn yml_extension_is_accepted() {
        let mut file = tempfile::Builder::new()
            .suffix(".yml")
            .tempfile()
            .expect("create temp file");
        file.write_all(b"map_type: S\ntraffic_density: 0.0\n")
            .expect("write");
        assert!(ScenarioConfig::from_yaml(file.path()).is_ok());
    }

    #[test]
    fn missing_map_type_names_the_field() {
        let file = yaml_file("traffic_density: 0.1\n");
        match ScenarioConfig::from_yaml(file.path()) {
            Err(ScenarioError::MissingField { field: "map_type" }) => {}
            other => panic!("expected MissingField(map_type), got {other:?}"),
        }
    }

    #[test]
    fn missing_traffic_density_names_the_field() {
        let file = yaml_file("map_type: X\n");
        match ScenarioConfig::from_yaml(file.path()) {
            Err(ScenarioError::MissingField {
                field: "traffic_density",
            }) => {}
            other => panic!("expected MissingField(traffic_density), got {other:?}"),
        }
    }

    #[test]
    fn negative_seed_is_invalid() {
        let file = yaml_file("map_type: X\nseed: -3\ntraffic_density: 0.1\n");
        match ScenarioConfig::from_yaml(file.path()) {
            Err(ScenarioError::InvalidValue { field: "seed", .. }) => {}
            other => panic!("expected InvalidValue(seed), got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_density_is_invalid() {
        let file = yaml_file("map_type: X\ntraffic_density: 1.5\n");
        match ScenarioConfig::from_yaml(file.path()) {
            Err(ScenarioError::InvalidValue {
                field: "traffic_density",
                ..
            }) => {}
            other => panic!("expected InvalidValue(traffic_density), got {other:?}"),
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml_file("map_type: X\ntraffic_density: 0.1\nweather: rain\n");
        match ScenarioConfig::from_yaml(file.path()) {
            Err(ScenarioError::Parse { reason }) => {
                assert!(reason.contains("weather"), "diagnostic should name the key");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let file = yaml_file("map_type: [unclosed\n");
        assert!(matches!(
            ScenarioConfig::from_yaml(file.path()),
            Err(ScenarioError::Parse { .. })
        ));
    }

    // ── Resolution ───────────────────────────────────────────

    #[test]
    fn omitted_seed_resolves_to_zero() {
        let file = yaml_file("map_type: X\ntraffic_density: 0.1\n");
        let config = ScenarioConfig::from_yaml(file.path()).unwrap().resolve(false);
        assert_eq!(config.start_seed, DEFAULT_SEED);
    }

    #[test]
    fn resolve_is_a_one_way_projection() {
        let scenario = ScenarioConfig {
            map_type: "SCS".to_string(),
            seed: Some(7),
            traffic_density: 0.3,
        };
        let config = scenario.resolve(true);
        assert_eq!(config.map_name, "SCS");
        assert_eq!(config.start_seed, 7);
        assert_eq!(config.traffic_density, 0.3);
        assert!(config.use_render);
        assert!(!config.manual_control);
        assert_eq!(config.num_scenarios, 1);
        assert!(config.validate().is_ok());
    }
}
