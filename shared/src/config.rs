use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub service: ServiceConfig,
    pub canvas: CanvasConfig,
    pub animation: AnimationConfig,
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub predict_path: String,
    pub status_path: String,
    pub field_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub brush_radius: f32,
    /// `#rrggbb`
    pub brush_color: String,
    pub file_name: String,
}

/// Timings are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub interval_ms: u32,
    pub total_duration_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub empty_drawing: EmptyDrawingPolicy,
    pub out_of_range: RangePolicy,
}

/// What exporting a canvas without strokes does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDrawingPolicy {
    #[default]
    Block,
    AllowBlank,
}

/// What happens to a service value outside [0, 100] before it is animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    #[default]
    Clamp,
    PassThrough,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            predict_path: "/predict".to_string(),
            status_path: "/status".to_string(),
            field_name: "file".to_string(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 400,
            brush_radius: 2.0,
            brush_color: "#0000ff".to_string(),
            file_name: "drawing.png".to_string(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            interval_ms: 30,
            total_duration_ms: 1500,
        }
    }
}

impl ServiceConfig {
    pub fn predict_url(&self) -> String {
        join_url(&self.base_url, &self.predict_path)
    }

    pub fn status_url(&self) -> String {
        join_url(&self.base_url, &self.status_path)
    }
}

impl CanvasConfig {
    pub fn brush_rgb(&self) -> Option<[u8; 3]> {
        let hex = self.brush_color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some([channel(0)?, channel(2)?, channel(4)?])
    }
}

impl AnimationConfig {
    /// Number of ticks the animation is spread over.
    pub fn steps(&self) -> f64 {
        f64::from(self.total_duration_ms) / f64::from(self.interval_ms)
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must not be empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if !(self.canvas.brush_radius.is_finite() && self.canvas.brush_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "brush radius must be positive, got {}",
                self.canvas.brush_radius
            )));
        }
        if self.canvas.brush_rgb().is_none() {
            return Err(ConfigError::Invalid(format!(
                "brush color must be #rrggbb, got {:?}",
                self.canvas.brush_color
            )));
        }
        if self.animation.interval_ms == 0 {
            return Err(ConfigError::Invalid("animation interval must be positive".into()));
        }
        if self.animation.interval_ms > self.animation.total_duration_ms {
            return Err(ConfigError::Invalid(format!(
                "animation interval {}ms exceeds total duration {}ms",
                self.animation.interval_ms, self.animation.total_duration_ms
            )));
        }
        if self.service.field_name.is_empty() {
            return Err(ConfigError::Invalid("upload field name must not be empty".into()));
        }
        Ok(())
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_ui() {
        let config = PipelineConfig::default();
        assert_eq!(config.canvas.width, 500);
        assert_eq!(config.canvas.height, 400);
        assert_eq!(config.animation.interval_ms, 30);
        assert_eq!(config.animation.total_duration_ms, 1500);
        assert_eq!(config.animation.steps(), 50.0);
        assert_eq!(config.service.predict_url(), "http://localhost:8000/predict");
        assert_eq!(config.service.status_url(), "http://localhost:8000/status");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = PipelineConfig::from_yaml_str(
            "service:\n  base_url: http://example.test/\npolicy:\n  out_of_range: pass_through\n",
        )
        .unwrap();
        assert_eq!(config.service.predict_url(), "http://example.test/predict");
        assert_eq!(config.policy.out_of_range, RangePolicy::PassThrough);
        assert_eq!(config.policy.empty_drawing, EmptyDrawingPolicy::Block);
        assert_eq!(config.canvas, CanvasConfig::default());
    }

    #[test]
    fn bundled_config_is_valid() {
        let config = PipelineConfig::from_yaml_str(include_str!("../../config/pipeline.yaml"));
        assert!(config.is_ok(), "{:?}", config.err());
    }

    #[test]
    fn rejects_bad_animation_timing() {
        let err = PipelineConfig::from_yaml_str("animation:\n  interval_ms: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = PipelineConfig::from_yaml_str(
            "animation:\n  interval_ms: 2000\n  total_duration_ms: 1500\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_brush_color() {
        let err = PipelineConfig::from_yaml_str("canvas:\n  brush_color: blue\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn parses_brush_color() {
        let canvas = CanvasConfig {
            brush_color: "#1890ff".to_string(),
            ..CanvasConfig::default()
        };
        assert_eq!(canvas.brush_rgb(), Some([0x18, 0x90, 0xff]));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = PipelineConfig::from_yaml_str("canvas: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
