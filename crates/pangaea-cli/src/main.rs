//! Command-line biome map generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p pangaea-cli -- --width 96 --height 64 --seed 7`.

mod report;

use std::process::ExitCode;

use clap::Parser;
use pangaea_biome::{Catalog, GeneratorSettings, SelectionMode, World, WorldGenerator, seed};
use pangaea_config::{CliArgs, Config, Selection, WorldConfig, default_config_dir};
use tracing::{error, info};

fn generator_settings(world: &WorldConfig) -> GeneratorSettings {
    GeneratorSettings {
        width: world.width,
        height: world.height,
        seed_count: world.seed_count,
        selection: match world.selection {
            Selection::Weighted => SelectionMode::Weighted,
            Selection::Uniform => SelectionMode::Uniform,
        },
        max_steps: world.max_steps,
    }
}

fn catalog_for(world: &WorldConfig) -> Catalog {
    let catalog = Catalog::builtin();
    if world.exclusion_zones {
        catalog
    } else {
        catalog.without_exclusion()
    }
}

fn print_world(world: &World) {
    print!("{}", report::render_table(&report::summarize(world)));
    println!("grid hash: {:016x}", seed::hash_grid(world.grid()));
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_dir.display());
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    pangaea_log::init_logging(
        Some(&config_dir.join("logs")),
        config.debug.log_file,
        Some(&config),
    );

    let settings = generator_settings(&config.world);
    let generator = match WorldGenerator::new(settings, catalog_for(&config.world)) {
        Ok(generator) => generator,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let world_seed = config.world.seed.unwrap_or_else(rand::random);
    info!(seed = world_seed, "using world seed");

    match generator.generate(&mut seed::world_rng(world_seed)) {
        Ok(world) => {
            print_world(&world);
            ExitCode::SUCCESS
        }
        Err(aborted) => {
            let partial = &aborted.partial;
            error!(
                claimed = partial.grid().claimed_count(),
                total = partial.grid().area(),
                "{}: {}",
                aborted,
                aborted.error
            );
            print_world(partial);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_follow_config() {
        let world = WorldConfig {
            width: 30,
            height: 20,
            seed_count: 4,
            max_steps: Some(500),
            selection: Selection::Uniform,
            ..WorldConfig::default()
        };
        let settings = generator_settings(&world);
        assert_eq!(settings.width, 30);
        assert_eq!(settings.height, 20);
        assert_eq!(settings.seed_count, 4);
        assert_eq!(settings.max_steps, Some(500));
        assert_eq!(settings.selection, SelectionMode::Uniform);
    }

    #[test]
    fn test_exclusion_toggle() {
        let mut world = WorldConfig::default();
        assert!(catalog_for(&world).iter().any(|(_, a)| a.exclusion_radius > 0));
        world.exclusion_zones = false;
        assert!(catalog_for(&world).iter().all(|(_, a)| a.exclusion_radius == 0));
    }

    #[test]
    fn test_default_config_generates_complete_world() {
        let world_config = WorldConfig::default();
        let settings = generator_settings(&world_config);
        let generator = WorldGenerator::new(settings, catalog_for(&world_config)).unwrap();
        let world = generator.generate(&mut seed::world_rng(1)).unwrap();
        assert!(world.is_complete());
        assert!(!report::summarize(&world).is_empty());
    }
}
