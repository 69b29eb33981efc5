//! Command-line argument parsing for Pangaea.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, Selection};

/// Pangaea command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "pangaea", about = "Seeded biome map generator")]
pub struct CliArgs {
    /// Grid width in tiles.
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height in tiles.
    #[arg(long)]
    pub height: Option<usize>,

    /// Number of biome seeds.
    #[arg(long)]
    pub seeds: Option<usize>,

    /// RNG seed for a reproducible map.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Spread step cap.
    #[arg(long)]
    pub max_steps: Option<u32>,

    /// Pick archetypes uniformly instead of by spawn weight.
    #[arg(long)]
    pub uniform: bool,

    /// Disable archetype exclusion zones.
    #[arg(long)]
    pub no_exclusion: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.world.width = w;
        }
        if let Some(h) = args.height {
            self.world.height = h;
        }
        if let Some(n) = args.seeds {
            self.world.seed_count = n;
        }
        if let Some(seed) = args.seed {
            self.world.seed = Some(seed);
        }
        if let Some(cap) = args.max_steps {
            self.world.max_steps = Some(cap);
        }
        if args.uniform {
            self.world.selection = Selection::Uniform;
        }
        if args.no_exclusion {
            self.world.exclusion_zones = false;
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
            width: Some(128),
            seed: Some(9),
            uniform: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.width, 128);
        assert_eq!(config.world.seed, Some(9));
        assert_eq!(config.world.selection, Selection::Uniform);
        // Non-overridden fields retain defaults
        assert_eq!(config.world.height, 48);
        assert!(config.world.exclusion_zones);
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
            "pangaea",
            "--width",
            "20",
            "--seeds",
            "3",
            "--no-exclusion",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.width, Some(20));
        assert_eq!(args.seeds, Some(3));
        assert!(args.no_exclusion);
        assert!(!args.uniform);

        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert!(!config.world.exclusion_zones);
        assert_eq!(config.debug.log_level, "debug");
    }
}
