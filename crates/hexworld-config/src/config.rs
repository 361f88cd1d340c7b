//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Largest accepted `icosphere.iso_divisions`.
pub const MAX_ISO_DIVISIONS: u32 = 1023;

/// Largest accepted `icosphere.zone_divisions`.
pub const MAX_ZONE_DIVISIONS: u32 = 4096;

/// Icosahedron edge length over its circumradius.
const ICOSAHEDRON_EDGE_RATIO: f64 = 1.051_462_224_238_267_3;

/// A weld quantum must stay this many times smaller than the lattice spacing.
const WELD_MARGIN: f64 = 4.0;

/// `<platform config dir>/hexworld`, or `None` if the platform has none.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hexworld"))
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sphere generation settings.
    pub icosphere: IcosphereConfig,
    /// Mesh export settings.
    pub export: ExportConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Face layout of each zone lattice.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum TriangulationSetting {
    /// Upward triangles only.
    Strip,
    /// Upward and downward triangles.
    #[default]
    Diamond,
}

/// Sphere generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IcosphereConfig {
    /// Sphere radius in world units.
    pub radius: f64,
    /// Times each icosahedron face is split before zones are built.
    pub iso_divisions: u32,
    /// Lattice divisions per zone edge.
    pub zone_divisions: u32,
    pub triangulation: TriangulationSetting,
}

impl Default for IcosphereConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            iso_divisions: 0,
            zone_divisions: 4,
            triangulation: TriangulationSetting::Diamond,
        }
    }
}

/// Mesh export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Merge coincident points across zones.
    pub weld: bool,
    /// Distance below which points are merged.
    pub weld_quantum: f64,
    /// Emit quads instead of triangle pairs.
    pub quads: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            weld: true,
            weld_quantum: 0.1,
            quads: false,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject settings the generator cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.icosphere.radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "icosphere.radius must be finite and positive, got {radius}"
            )));
        }
        let quantum = self.export.weld_quantum;
        if !quantum.is_finite() || quantum <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "export.weld_quantum must be finite and positive, got {quantum}"
            )));
        }
        let iso = self.icosphere.iso_divisions;
        if iso > MAX_ISO_DIVISIONS {
            return Err(ConfigError::Invalid(format!(
                "icosphere.iso_divisions must be at most {MAX_ISO_DIVISIONS}, got {iso}"
            )));
        }
        let divisions = self.icosphere.zone_divisions;
        if divisions > MAX_ZONE_DIVISIONS {
            return Err(ConfigError::Invalid(format!(
                "icosphere.zone_divisions must be at most {MAX_ZONE_DIVISIONS}, got {divisions}"
            )));
        }
        if divisions == 0 {
            log::warn!("icosphere.zone_divisions is 0, zones will not be subdivided");
        }
        let spacing = self.lattice_spacing();
        if self.export.weld && quantum * WELD_MARGIN > spacing {
            return Err(ConfigError::Invalid(format!(
                "export.weld_quantum {quantum} would merge distinct points; \
                 the lattice spacing is about {spacing:.6}"
            )));
        }
        Ok(())
    }

    /// Approximate distance between neighbouring lattice points on the sphere.
    pub fn lattice_spacing(&self) -> f64 {
        let settings = &self.icosphere;
        let steps =
            (f64::from(settings.iso_divisions) + 1.0) * f64::from(settings.zone_divisions.max(1));
        settings.radius * ICOSAHEDRON_EDGE_RATIO / steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("radius: 100.0"));
        assert!(ron_str.contains("zone_divisions: 4"));
        assert!(ron_str.contains("triangulation: Diamond"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(icosphere: (radius: 5.0))").unwrap();
        assert_eq!(config.icosphere.radius, 5.0);
        assert_eq!(config.icosphere.zone_divisions, 4);
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_strip_triangulation_parses() {
        let config: Config = ron::from_str("(icosphere: (triangulation: Strip))").unwrap();
        assert_eq!(config.icosphere.triangulation, TriangulationSetting::Strip);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.icosphere.iso_divisions = 2;
        config.export.quads = true;
        config.debug.log_level = "trace".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("hexworld");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.icosphere.zone_divisions = 9;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.icosphere.zone_divisions), Some(9));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.icosphere.radius = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.export.weld_quantum = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_bounds_divisions() {
        let mut config = Config::default();
        config.icosphere.iso_divisions = 65536;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.icosphere.zone_divisions = MAX_ZONE_DIVISIONS + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.icosphere.iso_divisions = MAX_ISO_DIVISIONS;
        config.icosphere.radius = 1.0e6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_weld_quantum_must_be_below_lattice_spacing() {
        let mut config = Config::default();
        config.icosphere.radius = 1.0;
        config.icosphere.zone_divisions = 24;
        assert!(config.lattice_spacing() < 0.05);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.export.weld_quantum = 1e-4;
        assert!(config.validate().is_ok());

        config.export.weld_quantum = 0.1;
        config.export.weld = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// hexworld\n(\n  // nothing set\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
