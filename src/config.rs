use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Ball Room".into(),
            auto_close: 0.0,
        }
    }
}

/// The wireframe box the balls ricochet inside. Footprint spans
/// [-half_extent, half_extent] on x/z; the floor sits at y = 0 and the
/// ceiling at y = height.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RoomConfig {
    pub half_extent: f32,
    pub height: f32,
    /// Grid line subdivisions per face edge of the room wireframe.
    pub grid_segments: u32,
}
impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            half_extent: 3.0,
            height: 6.0,
            grid_segments: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BallSpawnConfig {
    pub count: usize,
    pub radius: f32,
    /// Icosphere subdivision level for the shared ball mesh.
    pub subdivisions: u32,
    /// Distance each ball travels per axis per rendered frame.
    pub step: f32,
}
impl Default for BallSpawnConfig {
    fn default() -> Self {
        Self {
            count: 200,
            radius: 0.08,
            subdivisions: 2,
            step: 0.03,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    /// Orbit target height above the floor.
    pub target_height: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians of orbit per pixel of mouse drag.
    pub orbit_sensitivity: f32,
    /// World units of dolly per scroll line.
    pub zoom_sensitivity: f32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            target_height: 1.6,
            distance: 15.0,
            min_distance: 2.0,
            max_distance: 40.0,
            orbit_sensitivity: 0.005,
            zoom_sensitivity: 1.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    pub enabled: bool,
    /// Seconds between stats log lines.
    pub log_interval: f32,
}
impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_interval: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub room: RoomConfig,
    pub balls: BallSpawnConfig,
    pub camera: CameraConfig,
    pub overlay: OverlayConfig,
}

/// What the layered loader actually did, kept around so startup can log it
/// once the log backend exists.
#[derive(Resource, Debug, Default, Clone)]
pub struct ConfigReport {
    pub layers: Vec<String>,
    pub errors: Vec<String>,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load multiple config layers, later files overriding earlier ones (deep merge).
    /// Missing files are skipped; returns (config, layer_paths_used, errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        let mut replaced = false;
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                let val = incoming.take().unwrap();
                                merge_value(ev, val);
                                replaced = true;
                                break;
                            }
                        }
                        if !replaced {
                            bm.insert(k, incoming.unwrap());
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }

        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }

        if let Some(val) = merged {
            match val.clone().into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => (GameConfig::default(), used, {
                    let mut evec = errors;
                    evec.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    evec
                }),
            }
        } else {
            (GameConfig::default(), used, errors)
        }
    }

    /// Validate the configuration returning human-readable warning strings.
    /// Suspicious values, not hard errors; log each with `warn!` at startup.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        if self.room.half_extent <= 0.0 {
            w.push("room.half_extent must be > 0".into());
        }
        if self.room.height <= 0.0 {
            w.push("room.height must be > 0".into());
        }
        if self.room.grid_segments == 0 {
            w.push("room.grid_segments is 0; wireframe degenerates to the box outline".into());
        }
        if self.balls.count == 0 {
            w.push("balls.count is 0; nothing will spawn".into());
        }
        if self.balls.count > 50_000 {
            w.push(format!(
                "balls.count {} very high; performance may suffer",
                self.balls.count
            ));
        }
        if self.balls.radius <= 0.0 {
            w.push("balls.radius must be > 0".into());
        }
        if self.balls.step <= 0.0 {
            w.push("balls.step must be > 0; balls will not move".into());
        }
        // Containment only holds when one frame's travel fits inside each interval.
        if self.balls.step >= self.room.half_extent * 2.0 || self.balls.step >= self.room.height {
            w.push(format!(
                "balls.step {} not smaller than the room interval; balls may escape",
                self.balls.step
            ));
        }
        if !(10.0..=120.0).contains(&self.camera.fov_degrees) {
            w.push(format!(
                "camera.fov_degrees {} outside recommended 10..120",
                self.camera.fov_degrees
            ));
        }
        if self.camera.min_distance <= 0.0 {
            w.push("camera.min_distance must be > 0".into());
        }
        if self.camera.min_distance > self.camera.max_distance {
            w.push(format!(
                "camera.min_distance ({}) greater than max_distance ({})",
                self.camera.min_distance, self.camera.max_distance
            ));
        }
        if !(self.camera.min_distance..=self.camera.max_distance).contains(&self.camera.distance) {
            w.push(format!(
                "camera.distance {} outside its own clamp range",
                self.camera.distance
            ));
        }
        if self.camera.orbit_sensitivity <= 0.0 {
            w.push("camera.orbit_sensitivity must be > 0".into());
        }
        if self.camera.zoom_sensitivity <= 0.0 {
            w.push("camera.zoom_sensitivity must be > 0".into());
        }
        if self.overlay.enabled && self.overlay.log_interval <= 0.0 {
            w.push("overlay.log_interval must be > 0 when the overlay is enabled".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_sample_config() {
        let sample = r#"(
            window: (width: 800.0, height: 600.0, title: "Test"),
            room: (half_extent: 4.0, height: 8.0, grid_segments: 6),
            balls: (
                count: 10,
                radius: 0.1,
                subdivisions: 1,
                step: 0.05,
            ),
            camera: (
                fov_degrees: 60.0,
                target_height: 1.6,
                distance: 12.0,
                min_distance: 2.0,
                max_distance: 30.0,
                orbit_sensitivity: 0.004,
                zoom_sensitivity: 1.0,
            ),
            overlay: (enabled: true, log_interval: 2.0),
        )"#;
        let mut file = tempfile::NamedTempFile::new().expect("tmp file");
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = GameConfig::load_from_file(file.path()).expect("parse config");
        assert_eq!(cfg.window.width, 800.0);
        assert_eq!(cfg.balls.count, 10);
        assert!((cfg.balls.step - 0.05).abs() < 1e-6);
        assert_eq!(cfg.room.grid_segments, 6);
        assert!((cfg.camera.fov_degrees - 60.0).abs() < 1e-6);
        assert!(
            cfg.validate().is_empty(),
            "expected no validation warnings for sample config"
        );
    }

    #[test]
    fn defaults_match_reference_scene() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.balls.count, 200);
        assert!((cfg.balls.step - 0.03).abs() < f32::EPSILON);
        assert!((cfg.room.half_extent - 3.0).abs() < f32::EPSILON);
        assert!((cfg.room.height - 6.0).abs() < f32::EPSILON);
        assert!(cfg.validate().is_empty(), "defaults must validate cleanly");
    }

    #[test]
    fn validate_detects_warnings() {
        let bad = GameConfig {
            window: WindowConfig {
                width: -100.0,
                height: 0.0,
                title: "Bad".into(),
                auto_close: -5.0,
            },
            room: RoomConfig {
                half_extent: 0.0,
                height: -1.0,
                grid_segments: 0,
            },
            balls: BallSpawnConfig {
                count: 0,
                radius: 0.0,
                subdivisions: 2,
                step: 0.0,
            },
            camera: CameraConfig {
                fov_degrees: 5.0,
                target_height: 1.6,
                distance: 50.0,
                min_distance: 10.0,
                max_distance: 5.0,
                orbit_sensitivity: 0.0,
                zoom_sensitivity: -1.0,
            },
            overlay: OverlayConfig {
                enabled: true,
                log_interval: 0.0,
            },
        };
        let warnings = bad.validate();
        let joined = warnings.join(" | ");
        assert!(joined.contains("window dimensions must be > 0"));
        assert!(joined.contains("window.autoClose"));
        assert!(joined.contains("room.half_extent must be > 0"));
        assert!(joined.contains("room.height must be > 0"));
        assert!(joined.contains("balls.count is 0"));
        assert!(joined.contains("balls.radius must be > 0"));
        assert!(joined.contains("balls.step must be > 0"));
        assert!(joined.contains("camera.fov_degrees"));
        assert!(joined.contains("camera.min_distance"));
        assert!(joined.contains("overlay.log_interval"));
        assert!(
            warnings.len() >= 10,
            "expected many warnings, got {}: {joined}",
            warnings.len()
        );
    }

    #[test]
    fn step_exceeding_interval_warns() {
        let cfg = GameConfig {
            balls: BallSpawnConfig {
                step: 7.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(cfg
            .validate()
            .iter()
            .any(|w| w.contains("balls may escape")));
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = GameConfig::load_or_default("this/file/does/not/exist.ron");
        assert!(err.is_some());
        assert_eq!(cfg.window.width, WindowConfig::default().width);
    }

    #[test]
    fn layered_merge_overrides() {
        let base = r"(
            window: (width: 900.0),
            balls: (count: 50),
        )";
        let override_one = r#"(
            window: (title: "Custom Title"),
            balls: (count: 75),
        )"#;
        let mut f1 = tempfile::NamedTempFile::new().unwrap();
        let mut f2 = tempfile::NamedTempFile::new().unwrap();
        f1.write_all(base.as_bytes()).unwrap();
        f2.write_all(override_one.as_bytes()).unwrap();
        let (cfg, used, errors) = GameConfig::load_layered([f1.path(), f2.path()]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.window.width, 900.0); // from base
        assert_eq!(cfg.window.title, "Custom Title"); // overridden
        assert_eq!(cfg.balls.count, 75); // overridden
        assert_eq!(cfg.window.height, WindowConfig::default().height);
    }

    #[test]
    fn layered_skips_missing_and_keeps_going() {
        let only = r"(balls: (count: 13))";
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(only.as_bytes()).unwrap();
        let missing = Path::new("no/such/file.ron");
        let (cfg, used, errors) = GameConfig::load_layered([missing, f.path()]);
        assert_eq!(used.len(), 1);
        assert_eq!(errors.len(), 1, "missing layer reported: {errors:?}");
        assert_eq!(cfg.balls.count, 13);
    }

    #[test]
    fn parse_autoclose_and_validate() {
        let sample = r"(window: (autoClose: 3.25))";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = GameConfig::load_from_file(file.path()).expect("parse config");
        assert!((cfg.window.auto_close - 3.25).abs() < 1e-6);
        let neg_sample = r"(window: (autoClose: -5.0))";
        let mut file2 = tempfile::NamedTempFile::new().unwrap();
        file2.write_all(neg_sample.as_bytes()).unwrap();
        let cfg2 = GameConfig::load_from_file(file2.path()).expect("parse config");
        assert!(
            cfg2.validate()
                .iter()
                .any(|w| w.contains("window.autoClose")),
            "expected warning for negative autoClose"
        );
    }
}
