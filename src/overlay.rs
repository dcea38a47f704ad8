// On-screen frame stats (top-left) plus a periodic log line with the same
// figures, so headless runs still report.

use bevy::prelude::*;

use crate::components::Ball;
use crate::config::GameConfig;

/// Exponentially smoothed frame statistics, updated every frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FrameStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub frames: u64,
    pub ball_count: usize,
}

#[derive(Resource, Deref, DerefMut)]
struct StatsLogTimer(Timer);

#[derive(Component)]
struct OverlayText;

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameStats>()
            .add_systems(Startup, setup_overlay)
            .add_systems(Update, (collect_stats, update_overlay, log_stats).chain());
    }
}

fn setup_overlay(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.insert_resource(StatsLogTimer(Timer::from_seconds(
        cfg.overlay.log_interval.max(0.1),
        TimerMode::Repeating,
    )));
    if !cfg.overlay.enabled {
        return;
    }
    commands.spawn((
        Text::new("..."),
        TextFont {
            font_size: 14.0,
            ..Default::default()
        },
        TextColor(Color::WHITE),
        bevy::ui::Node {
            position_type: bevy::ui::PositionType::Absolute,
            top: Val::Px(4.0),
            left: Val::Px(6.0),
            ..Default::default()
        },
        OverlayText,
    ));
}

fn collect_stats(time: Res<Time>, mut stats: ResMut<FrameStats>, q_balls: Query<&Ball>) {
    stats.frames += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    stats.ball_count = q_balls.iter().count();
}

fn update_overlay(stats: Res<FrameStats>, mut q_text: Query<&mut Text, With<OverlayText>>) {
    if let Ok(mut text) = q_text.single_mut() {
        text.0 = format!(
            "{:.0} fps  {:.1} ms  {} balls",
            stats.fps, stats.frame_time_ms, stats.ball_count
        );
    }
}

fn log_stats(time: Res<Time>, mut timer: ResMut<StatsLogTimer>, stats: Res<FrameStats>) {
    timer.tick(time.delta());
    if timer.just_finished() {
        info!(
            "frame={} fps={:.1} ft_ms={:.1} balls={}",
            stats.frames, stats.fps, stats.frame_time_ms, stats.ball_count
        );
    }
}
