use serde::Deserialize;

use crate::animation::Interpolator;
use crate::geometry::Argb;

/// How a child moves vertically when no explicit top or bottom margin is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapseMode {
    /// Keep the child centered in the collapsed bar
    #[default]
    Pin,
    /// Move the child up and out of the bar
    #[serde(alias = "out")]
    SlideOut,
    /// Leave the child's vertical position alone
    None,
}

/// Collapsed-state targets for one child.
///
/// Every target is optional; a `None` target is never animated. An explicit
/// margin wins over the mode for its axis: bottom over top over mode
/// vertically, right over left horizontally.
#[derive(Debug, Clone, Default)]
pub struct TransitionSpec {
    pub mode: CollapseMode,
    pub margin_left: Option<i32>,
    pub margin_right: Option<i32>,
    pub margin_top: Option<i32>,
    pub margin_bottom: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub alpha: Option<f32>,
    pub text_color: Option<Argb>,
    /// Overlay painted over the child, fading in as the bar collapses
    pub scrim: Option<Argb>,
    /// Curve for position, size, alpha and text color
    pub interpolator: Interpolator,
    pub scale_x_interpolator: Interpolator,
    pub scale_y_interpolator: Interpolator,
}

impl TransitionSpec {
    pub fn new(mode: CollapseMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn pin() -> Self {
        Self::new(CollapseMode::Pin)
    }

    pub fn slide_out() -> Self {
        Self::new(CollapseMode::SlideOut)
    }

    /// No vertical movement unless a margin is set
    pub fn still() -> Self {
        Self::new(CollapseMode::None)
    }

    pub fn margin_left(mut self, margin: i32) -> Self {
        self.margin_left = Some(margin);
        self
    }

    pub fn margin_right(mut self, margin: i32) -> Self {
        self.margin_right = Some(margin);
        self
    }

    pub fn margin_top(mut self, margin: i32) -> Self {
        self.margin_top = Some(margin);
        self
    }

    pub fn margin_bottom(mut self, margin: i32) -> Self {
        self.margin_bottom = Some(margin);
        self
    }

    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    /// Same target scale on both axes
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale_x = Some(scale);
        self.scale_y = Some(scale);
        self
    }

    pub fn scale_x(mut self, scale: f32) -> Self {
        self.scale_x = Some(scale);
        self
    }

    pub fn scale_y(mut self, scale: f32) -> Self {
        self.scale_y = Some(scale);
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn text_color(mut self, color: Argb) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn scrim(mut self, color: Argb) -> Self {
        self.scrim = Some(color);
        self
    }

    pub fn interpolator(mut self, curve: Interpolator) -> Self {
        self.interpolator = curve;
        self
    }

    pub fn scale_x_interpolator(mut self, curve: Interpolator) -> Self {
        self.scale_x_interpolator = curve;
        self
    }

    pub fn scale_y_interpolator(mut self, curve: Interpolator) -> Self {
        self.scale_y_interpolator = curve;
        self
    }

    /// Horizontal scale used for size-delta corrections (1.0 when unset)
    pub(crate) fn effective_scale_x(&self) -> f32 {
        self.scale_x.unwrap_or(1.0)
    }

    /// Vertical scale used for size-delta corrections (1.0 when unset)
    pub(crate) fn effective_scale_y(&self) -> f32 {
        self.scale_y.unwrap_or(1.0)
    }
}
