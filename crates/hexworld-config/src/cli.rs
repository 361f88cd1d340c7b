//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, TriangulationSetting};

/// hexworld command-line arguments.
///
/// Generation settings override values loaded from `config.ron`; the
/// inspection arguments select what to report.
#[derive(Parser, Debug, Default)]
#[command(name = "hexworld", about = "Icosphere generation and adjacency inspection")]
pub struct CliArgs {
    /// Sphere radius.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Times each icosahedron face is split before zones are built.
    #[arg(long)]
    pub iso_divisions: Option<u32>,

    /// Lattice divisions per zone edge.
    #[arg(long)]
    pub divisions: Option<u32>,

    /// Face layout of each zone.
    #[arg(long, value_enum)]
    pub triangulation: Option<TriangulationSetting>,

    /// Merge coincident points in the export.
    #[arg(long)]
    pub weld: Option<bool>,

    /// Export quads instead of triangle pairs.
    #[arg(long)]
    pub quads: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Zone to inspect.
    #[arg(long, default_value_t = 0)]
    pub zone: u32,

    /// Vertex index within the inspected zone.
    #[arg(long, default_value_t = 0)]
    pub vertex: u32,

    /// Write the JSON mesh export here.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.radius {
            self.icosphere.radius = radius;
        }
        if let Some(iso) = args.iso_divisions {
            self.icosphere.iso_divisions = iso;
        }
        if let Some(divisions) = args.divisions {
            self.icosphere.zone_divisions = divisions;
        }
        if let Some(triangulation) = args.triangulation {
            self.icosphere.triangulation = triangulation;
        }
        if let Some(weld) = args.weld {
            self.export.weld = weld;
        }
        if let Some(quads) = args.quads {
            self.export.quads = quads;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            radius: Some(6371.0),
            divisions: Some(8),
            triangulation: Some(TriangulationSetting::Strip),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.icosphere.radius, 6371.0);
        assert_eq!(config.icosphere.zone_divisions, 8);
        assert_eq!(config.icosphere.triangulation, TriangulationSetting::Strip);
        // Non-overridden fields retain defaults
        assert_eq!(config.icosphere.iso_divisions, 0);
        assert!(config.export.weld);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "hexworld",
            "--iso-divisions",
            "1",
            "--triangulation",
            "strip",
            "--weld",
            "false",
            "--zone",
            "3",
            "--vertex",
            "7",
        ])
        .unwrap();
        assert_eq!(args.iso_divisions, Some(1));
        assert_eq!(args.triangulation, Some(TriangulationSetting::Strip));
        assert_eq!(args.weld, Some(false));
        assert_eq!((args.zone, args.vertex), (3, 7));
        assert!(args.output.is_none());
    }
}
