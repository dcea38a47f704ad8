use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use ball_room::config::{ConfigReport, GameConfig};
use ball_room::game::GamePlugin;

/// A wireframe room full of bouncing icosphere balls.
#[derive(Parser, Debug)]
#[command(name = "ball_room", version, about)]
struct Cli {
    /// Extra config layer applied after the default files.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Exit after this many seconds (overrides window.autoClose).
    #[arg(long)]
    auto_close: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut layers = vec![
        PathBuf::from("assets/config/game.ron"),
        PathBuf::from("assets/config/game.local.ron"),
    ];
    if let Some(extra) = cli.config {
        layers.push(extra);
    }
    let (mut cfg, used, errors) = GameConfig::load_layered(&layers);
    if let Some(secs) = cli.auto_close {
        cfg.window.auto_close = secs;
    }

    App::new()
        .insert_resource(ConfigReport {
            layers: used,
            errors,
        })
        .insert_resource(cfg.clone())
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: cfg.window.title.clone(),
                    resolution: (cfg.window.width, cfg.window.height).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins(GamePlugin)
        .run();

    Ok(())
}
