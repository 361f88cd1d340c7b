//! Builds an icosphere from the hexworld config, checks its valence, prints
//! the adjacency of one vertex and optionally writes the JSON mesh export.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hexworld_config::{CliArgs, Config, ConfigError, TriangulationSetting, default_config_dir};
use hexworld_icosphere::{
    BaseShape, ExportOptions, FaceStyle, Icosphere, IcosphereError, Triangulation, VertexRef,
    ZoneId,
};
use tracing::info;

/// Errors that abort an inspection run.
#[derive(Debug, thiserror::Error)]
enum InspectError {
    #[error("no config directory on this platform; pass --config")]
    NoConfigDir,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Icosphere(#[from] IcosphereError),

    #[error("failed to serialize export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn triangulation(setting: TriangulationSetting) -> Triangulation {
    match setting {
        TriangulationSetting::Strip => Triangulation::Strip,
        TriangulationSetting::Diamond => Triangulation::Diamond,
    }
}

fn export_options(config: &Config) -> ExportOptions {
    let options = if config.export.weld {
        ExportOptions::welded(config.export.weld_quantum)
    } else {
        ExportOptions::zone_local()
    };
    options.with_faces(if config.export.quads {
        FaceStyle::Quads
    } else {
        FaceStyle::Triangles
    })
}

fn build(config: &Config) -> Result<Icosphere, InspectError> {
    let settings = &config.icosphere;
    let shape = BaseShape::build(settings.radius, settings.iso_divisions)?;
    info!(
        "Base shape: {} points, {} zones",
        shape.points().len(),
        shape.zones().len()
    );
    Ok(shape.into_icosphere(
        settings.zone_divisions,
        triangulation(settings.triangulation),
    )?)
}

fn run(args: &CliArgs) -> Result<(), InspectError> {
    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => default_config_dir().ok_or(InspectError::NoConfigDir)?,
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(args);
    config.validate()?;

    let log_dir = config_dir.join("logs");
    hexworld_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let sphere = build(&config)?;
    sphere.resolve_all()?;

    let valence = sphere.valence_report()?;
    info!("Valence: {}", report::valence_summary(&valence));
    for violation in &valence.violations {
        tracing::warn!(
            vertex = %violation.vertex,
            expected = violation.expected,
            found = violation.found,
            "valence violation"
        );
    }

    let v = VertexRef::new(ZoneId(args.zone), args.vertex);
    print!("{}", report::vertex_report(&sphere, v)?);
    if let Some(lattice) = sphere.lattice(v.zone) {
        println!("{} lattice (row, N - row + col, N - col):", v.zone);
        print!("{}", report::lattice_report(lattice));
    }

    if let Some(path) = &args.output {
        let export = sphere.export(&export_options(&config))?;
        std::fs::write(path, export.to_json()?).map_err(|source| InspectError::Write {
            path: path.clone(),
            source,
        })?;
        info!(
            "Wrote {} points and {} faces to {}",
            export.point_count(),
            export.face_count(),
            path.display()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("hexworld-inspect: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_follow_config() {
        let mut config = Config::default();
        assert_eq!(export_options(&config), ExportOptions::welded(0.1));

        config.export.weld = false;
        config.export.quads = true;
        assert_eq!(
            export_options(&config),
            ExportOptions::zone_local().with_faces(FaceStyle::Quads)
        );
    }

    #[test]
    fn test_build_uses_config_settings() {
        let mut config = Config::default();
        config.icosphere.iso_divisions = 1;
        config.icosphere.zone_divisions = 2;
        let sphere = build(&config).unwrap();
        assert_eq!(sphere.zones().len(), 80);
        assert_eq!(sphere.lattices()[0].divisions(), 2);
    }

    #[test]
    fn test_run_writes_export() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sphere.json");
        let args = CliArgs {
            config: Some(dir.path().join("config")),
            divisions: Some(2),
            output: Some(output.clone()),
            ..CliArgs::default()
        };
        run(&args).unwrap();

        let json = std::fs::read_to_string(output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["points"].as_array().map(Vec::len), Some(42));
        assert_eq!(value["faces"].as_array().map(Vec::len), Some(80));
    }

    #[test]
    fn test_bad_radius_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            config: Some(dir.path().to_path_buf()),
            radius: Some(-2.0),
            ..CliArgs::default()
        };
        assert!(matches!(run(&args), Err(InspectError::Config(_))));
    }

    #[test]
    fn test_oversized_iso_divisions_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            config: Some(dir.path().to_path_buf()),
            iso_divisions: Some(65536),
            ..CliArgs::default()
        };
        assert!(matches!(run(&args), Err(InspectError::Config(_))));
    }

    #[test]
    fn test_weld_coarser_than_lattice_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            config: Some(dir.path().to_path_buf()),
            radius: Some(1.0),
            divisions: Some(24),
            ..CliArgs::default()
        };
        assert!(matches!(run(&args), Err(InspectError::Config(_))));
    }
}
