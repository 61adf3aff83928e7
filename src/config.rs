//! Declarative bar configuration, loaded from TOML.
//!
//! ```toml
//! collapsed_height = 56
//! anim_duration_ms = 250
//! status_bar_scrim = "#33000000"
//!
//! [[children]]
//! id = 1
//! mode = "pin"
//! margin_left = 72
//! scale = 0.8
//! text_color = "#FFFFFF"
//! interpolator = "decelerate"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::animation::Interpolator;
use crate::child::ChildId;
use crate::error::{Error, Result};
use crate::geometry::Argb;
use crate::transition::{CollapseMode, TransitionSpec};

#[derive(Debug, Clone, Deserialize)]
pub struct BarConfig {
    /// Height of the fully collapsed bar
    #[serde(default = "default_collapsed_height")]
    pub collapsed_height: i32,
    /// Full expand-to-collapse snap duration
    #[serde(default = "default_anim_duration_ms")]
    pub anim_duration_ms: u64,
    /// Overlay for the window's status bar area, fading in as the bar collapses
    #[serde(default)]
    pub status_bar_scrim: Option<Argb>,
    #[serde(default)]
    pub children: Vec<ChildConfig>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            collapsed_height: default_collapsed_height(),
            anim_duration_ms: default_anim_duration_ms(),
            status_bar_scrim: None,
            children: Vec::new(),
        }
    }
}

fn default_collapsed_height() -> i32 {
    56
}

fn default_anim_duration_ms() -> u64 {
    250
}

impl BarConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.collapsed_height < 0 {
            return Err(Error::Config(format!(
                "collapsed_height must not be negative, got {}",
                self.collapsed_height
            )));
        }
        for (i, child) in self.children.iter().enumerate() {
            if self.children[..i].iter().any(|c| c.id == child.id) {
                return Err(Error::Config(format!(
                    "child {} is configured more than once",
                    child.id
                )));
            }
            child.validate()?;
        }
        Ok(())
    }

    /// Transition specs keyed by child id
    pub fn specs(&self) -> Result<Vec<(ChildId, TransitionSpec)>> {
        self.children
            .iter()
            .map(|child| Ok((ChildId(child.id), child.clone().into_spec()?)))
            .collect()
    }
}

/// Targets for one child; every field except `id` is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildConfig {
    pub id: u32,
    #[serde(default)]
    pub mode: CollapseMode,
    /// Both scale axes at once; wins over `scale_x` and `scale_y`
    #[serde(default)]
    pub scale: Option<f32>,
    #[serde(default)]
    pub scale_x: Option<f32>,
    #[serde(default)]
    pub scale_y: Option<f32>,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub margin_left: Option<i32>,
    #[serde(default)]
    pub margin_right: Option<i32>,
    #[serde(default)]
    pub margin_top: Option<i32>,
    #[serde(default)]
    pub margin_bottom: Option<i32>,
    #[serde(default)]
    pub alpha: Option<f32>,
    #[serde(default)]
    pub text_color: Option<Argb>,
    #[serde(default)]
    pub scrim: Option<Argb>,
    #[serde(default)]
    pub interpolator: Interpolator,
    #[serde(default)]
    pub scale_x_interpolator: Interpolator,
    #[serde(default)]
    pub scale_y_interpolator: Interpolator,
}

impl ChildConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(alpha) = self.alpha {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::Config(format!(
                    "child {}: alpha must be within [0, 1], got {alpha}",
                    self.id
                )));
            }
        }
        for (name, size) in [("width", self.width), ("height", self.height)] {
            if let Some(size) = size.filter(|s| *s < 0) {
                return Err(Error::Config(format!(
                    "child {}: {name} must not be negative, got {size}",
                    self.id
                )));
            }
        }
        Ok(())
    }

    pub fn into_spec(self) -> Result<TransitionSpec> {
        self.validate()?;
        let (scale_x, scale_y) = match self.scale {
            Some(scale) => {
                if self.scale_x.is_some() || self.scale_y.is_some() {
                    log::warn!(
                        "Child {}: scale {scale} overrides scale_x/scale_y",
                        self.id
                    );
                }
                (Some(scale), Some(scale))
            }
            None => (self.scale_x, self.scale_y),
        };
        Ok(TransitionSpec {
            mode: self.mode,
            margin_left: self.margin_left,
            margin_right: self.margin_right,
            margin_top: self.margin_top,
            margin_bottom: self.margin_bottom,
            width: self.width,
            height: self.height,
            scale_x,
            scale_y,
            alpha: self.alpha,
            text_color: self.text_color,
            scrim: self.scrim,
            interpolator: self.interpolator,
            scale_x_interpolator: self.scale_x_interpolator,
            scale_y_interpolator: self.scale_y_interpolator,
        })
    }
}
