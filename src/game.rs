use bevy::prelude::*;

use crate::auto_close::AutoClosePlugin;
use crate::camera::CameraPlugin;
use crate::config::{ConfigReport, GameConfig};
use crate::motion::BounceMotionPlugin;
use crate::overlay::OverlayPlugin;
use crate::room::RoomPlugin;
use crate::spawn::BallSpawnPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CameraPlugin,
            RoomPlugin,
            BallSpawnPlugin,
            BounceMotionPlugin,
            OverlayPlugin,
            AutoClosePlugin,
        ))
        .add_systems(Startup, report_config);
    }
}

// Config loading happens before the log backend exists, so the loader's
// findings are replayed here.
fn report_config(report: Option<Res<ConfigReport>>, cfg: Res<GameConfig>) {
    if let Some(report) = report {
        for layer in &report.layers {
            info!("config layer: {layer}");
        }
        for err in &report.errors {
            warn!("config: {err}");
        }
    }
    for warning in cfg.validate() {
        warn!("config: {warning}");
    }
}
