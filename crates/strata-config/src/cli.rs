//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strata_materials::TintPolicy;
use strata_terrain::{DEFAULT_TERRAIN_SIZE, MAX_TERRAIN_SIZE, MIN_TERRAIN_SIZE};

use crate::Config;

/// Color policy for textured voxels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TintArg {
    /// Keep the material's fallback color under its texture.
    Fallback,
    /// Show textures untinted.
    White,
}

impl From<TintArg> for TintPolicy {
    fn from(arg: TintArg) -> Self {
        match arg {
            TintArg::Fallback => TintPolicy::FallbackColor,
            TintArg::White => TintPolicy::WhiteUnderTexture,
        }
    }
}

/// strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Layered voxel terrain generator")]
pub struct CliArgs {
    /// Terrain size (32-256). Invalid input falls back to 64.
    #[arg(long)]
    pub size: Option<String>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Directory containing material textures.
    #[arg(long)]
    pub textures: Option<PathBuf>,

    /// Output path for the height map preview PNG.
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Write voxel placements as JSON to this path.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Color policy for textured voxels.
    #[arg(long, value_enum)]
    pub tint: Option<TintArg>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse a user-supplied terrain size.
///
/// Empty input yields the default, numbers are clamped to the supported range,
/// anything else logs a warning and yields the default.
pub fn parse_terrain_size(input: &str) -> u32 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DEFAULT_TERRAIN_SIZE;
    }
    match trimmed.parse::<i64>() {
        Ok(n) => n.clamp(i64::from(MIN_TERRAIN_SIZE), i64::from(MAX_TERRAIN_SIZE)) as u32,
        Err(_) => {
            tracing::warn!(
                "Invalid terrain size {trimmed:?}, using default {DEFAULT_TERRAIN_SIZE}"
            );
            DEFAULT_TERRAIN_SIZE
        }
    }
}

impl Config {
    /// Apply only the CLI overrides that logging setup depends on.
    pub fn apply_log_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }

    /// Apply CLI overrides to a loaded config.
    ///
    /// An unparseable `--size` is reported with `tracing::warn!`, so call this
    /// after the subscriber is installed.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        self.apply_log_overrides(args);
        if let Some(ref size) = args.size {
            self.terrain.size = parse_terrain_size(size);
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(ref dir) = args.textures {
            self.assets.texture_dir = Some(dir.clone());
        }
        if let Some(ref path) = args.preview {
            self.assets.preview_path = Some(path.clone());
        }
        if let Some(ref path) = args.export {
            self.assets.export_path = Some(path.clone());
        }
        if let Some(tint) = args.tint {
            self.appearance.tint = tint.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::TerrainConfig;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a scoped fmt subscriber and return what it printed.
    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_parse_terrain_size() {
        assert_eq!(parse_terrain_size("128"), 128);
        assert_eq!(parse_terrain_size(" 48 "), 48);
        assert_eq!(parse_terrain_size(""), 64);
        assert_eq!(parse_terrain_size("abc"), 64);
        assert_eq!(parse_terrain_size("12.5"), 64);
        assert_eq!(parse_terrain_size("8"), 32);
        assert_eq!(parse_terrain_size("-40"), 32);
        assert_eq!(parse_terrain_size("100000"), 256);
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            size: Some("512".to_string()),
            seed: Some(3),
            tint: Some(TintArg::White),
            textures: Some(PathBuf::from("tex")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.size, 256);
        assert_eq!(config.terrain.seed, 3);
        assert_eq!(config.appearance.tint, TintPolicy::WhiteUnderTexture);
        assert_eq!(config.assets.texture_dir, Some(PathBuf::from("tex")));
        // Non-overridden fields retain defaults
        assert_eq!(config.assets.preview_path, None);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_invalid_size_override_warns_and_uses_default() {
        let mut config = Config::default();
        config.terrain.size = 128;
        let args = CliArgs {
            size: Some("abc".to_string()),
            ..Default::default()
        };

        let logs = capture_logs(|| config.apply_cli_overrides(&args));

        assert_eq!(config.terrain.size, 64);
        assert!(logs.contains("WARN"), "expected a warning, got: {logs}");
        assert!(
            logs.contains("Invalid terrain size \"abc\""),
            "warning should quote the input, got: {logs}"
        );
    }

    #[test]
    fn test_valid_size_override_is_silent() {
        let mut config = Config::default();
        let args = CliArgs {
            size: Some("100".to_string()),
            ..Default::default()
        };
        let logs = capture_logs(|| config.apply_cli_overrides(&args));
        assert_eq!(config.terrain.size, 100);
        assert!(logs.is_empty(), "unexpected output: {logs}");
    }

    #[test]
    fn test_log_overrides_leave_terrain_untouched() {
        let mut config = Config::default();
        let args = CliArgs {
            size: Some("abc".to_string()),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        let logs = capture_logs(|| config.apply_log_overrides(&args));
        assert_eq!(config.debug.log_level, "debug");
        assert_eq!(config.terrain, TerrainConfig::default());
        assert!(logs.is_empty(), "unexpected output: {logs}");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "strata",
            "--size",
            "96",
            "--tint",
            "white",
            "--export",
            "out.json",
        ]);
        assert_eq!(args.size.as_deref(), Some("96"));
        assert_eq!(args.tint, Some(TintArg::White));
        assert_eq!(args.export, Some(PathBuf::from("out.json")));
        assert_eq!(args.seed, None);
    }
}
