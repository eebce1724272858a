//! JSON render settings.
//!
//! A settings file may override any subset of the camera and render
//! options; whatever it leaves out keeps the scene's own values.

use crate::error::RenderResult;
use crate::{CameraConfig, Color, RenderConfig};
use lux_math::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional overrides applied on top of a scene's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub camera: CameraOverrides,
    pub render: Option<RenderConfig>,
}

/// Camera fields a settings file may replace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraOverrides {
    pub vfov: Option<f32>,
    pub look_from: Option<Vec3>,
    pub look_at: Option<Vec3>,
    pub vup: Option<Vec3>,
    pub aspect_ratio: Option<f32>,
    pub image_width: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub defocus_angle: Option<f32>,
    pub focus_dist: Option<f32>,
    pub background: Option<Color>,
}

impl CameraOverrides {
    /// Replace the fields of `config` that are set here.
    pub fn apply(&self, config: &mut CameraConfig) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if let Some(value) = self.$field {
                    config.$field = value;
                })*
            };
        }
        overlay!(
            vfov,
            look_from,
            look_at,
            vup,
            aspect_ratio,
            image_width,
            samples_per_pixel,
            max_depth,
            defocus_angle,
            focus_dist,
            background
        );
    }
}

impl SceneConfig {
    /// Parse settings from a JSON string.
    pub fn from_json(text: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Load settings from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> RenderResult<SceneConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let config = SceneConfig::from_json(&text)?;
    log::info!("Loaded render settings from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderError;

    #[test]
    fn test_overrides_replace_only_set_fields() {
        let config = SceneConfig::from_json(
            r#"{
                "camera": { "image_width": 64, "look_from": [1.0, 2.0, 3.0] },
                "render": { "seed": 4, "parallel": false }
            }"#,
        )
        .unwrap();

        let mut camera = CameraConfig::default();
        config.camera.apply(&mut camera);
        assert_eq!(camera.image_width, 64);
        assert_eq!(camera.look_from, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.vfov, CameraConfig::default().vfov);

        let render = config.render.unwrap();
        assert_eq!(render.seed, 4);
        assert!(!render.parallel);
        assert_eq!(render.bucket_size, RenderConfig::default().bucket_size);
    }

    #[test]
    fn test_empty_object_is_no_op() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = SceneConfig::from_json(r#"{ "camera": { "fov": 30 } }"#).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config("/nonexistent/lux/settings.json").unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
