//! Interpolation curves that reshape the collapse percent before it is applied.
//!
//! Every child carries three independent curves: one for position, size,
//! alpha and color, and one each for horizontal and vertical scale. A curve
//! maps the bar's linear collapse percent `p` in `[0, 1]` onto the progress
//! used for that property.
//!
//! ## Built-in Curves
//!
//! - [`Interpolator::Linear`] - Progress follows the percent exactly (default)
//! - [`Interpolator::Accelerate`] - Starts slow, ends fast
//! - [`Interpolator::Decelerate`] - Starts fast, ends slow
//! - [`Interpolator::AccelerateDecelerate`] - Cosine ease in and out
//! - [`Interpolator::FastOutSlowIn`] - Material standard curve
//! - [`Interpolator::CubicBezier`] - CSS-style cubic bezier curve
//! - [`Interpolator::Custom`] - User-defined function
//!
//! Curves are expected to be monotonic and to map 0 to 0 and 1 to 1. Built-in
//! curves guarantee both; custom curves are trusted.
//!
//! ## Configuration
//!
//! ```toml
//! interpolator = "decelerate"
//! scale_x_interpolator = { cubic_bezier = [0.4, 0.0, 0.2, 1.0] }
//! ```

use std::f32::consts::PI;
use std::sync::Arc;

use serde::Deserialize;

/// A progress curve applied to the collapse percent
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolator {
    /// Progress equals the collapse percent
    #[default]
    Linear,
    /// Quadratic ease in
    Accelerate,
    /// Quadratic ease out
    Decelerate,
    /// Cosine ease in and out
    AccelerateDecelerate,
    /// Cubic bezier (0.4, 0.0, 0.2, 1.0)
    FastOutSlowIn,
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// Custom curve, only available programmatically
    #[serde(skip)]
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl Interpolator {
    /// Map a collapse percent onto curve progress
    pub fn evaluate(&self, percent: f32) -> f32 {
        match self {
            Interpolator::Linear => percent,
            Interpolator::Accelerate => accelerate(percent),
            Interpolator::Decelerate => decelerate(percent),
            Interpolator::AccelerateDecelerate => accelerate_decelerate(percent),
            Interpolator::FastOutSlowIn => cubic_bezier(percent, 0.4, 0.0, 0.2, 1.0),
            Interpolator::CubicBezier(x1, y1, x2, y2) => {
                cubic_bezier(percent, *x1, *y1, *x2, *y2)
            }
            Interpolator::Custom(f) => f(percent),
        }
    }

    /// Create a custom curve from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Interpolator::Custom(Arc::new(f))
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Interpolator::Linear)
    }
}

impl std::fmt::Debug for Interpolator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpolator::Linear => write!(f, "Linear"),
            Interpolator::Accelerate => write!(f, "Accelerate"),
            Interpolator::Decelerate => write!(f, "Decelerate"),
            Interpolator::AccelerateDecelerate => write!(f, "AccelerateDecelerate"),
            Interpolator::FastOutSlowIn => write!(f, "FastOutSlowIn"),
            Interpolator::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            Interpolator::Custom(_) => write!(f, "Custom"),
        }
    }
}

fn accelerate(t: f32) -> f32 {
    t * t
}

fn decelerate(t: f32) -> f32 {
    t * (2.0 - t)
}

fn accelerate_decelerate(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// Cubic bezier curve evaluation
/// Assumes x1, x2 are in [0, 1]
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    // Newton-Raphson: find the curve parameter whose x equals t
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = cubic_bezier_x(current_t, x1, x2);
        let current_slope = cubic_bezier_slope(current_t, x1, x2);
        if current_slope.abs() < 1e-6 {
            break;
        }
        current_t -= (current_x - t) / current_slope;
    }
    cubic_bezier_y(current_t, y1, y2)
}

fn cubic_bezier_x(t: f32, x1: f32, x2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * x1 + 3.0 * mt * t * t * x2 + t * t * t
}

fn cubic_bezier_y(t: f32, y1: f32, y2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * y1 + 3.0 * mt * t * t * y2 + t * t * t
}

fn cubic_bezier_slope(t: f32, x1: f32, x2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built_ins() -> Vec<Interpolator> {
        vec![
            Interpolator::Linear,
            Interpolator::Accelerate,
            Interpolator::Decelerate,
            Interpolator::AccelerateDecelerate,
            Interpolator::FastOutSlowIn,
            Interpolator::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ]
    }

    #[test]
    fn test_built_ins_pin_endpoints() {
        for curve in built_ins() {
            assert_eq!(curve.evaluate(0.0), 0.0, "{:?} at 0", curve);
            assert_eq!(curve.evaluate(1.0), 1.0, "{:?} at 1", curve);
        }
    }

    #[test]
    fn test_built_ins_are_monotonic() {
        for curve in built_ins() {
            let mut previous = curve.evaluate(0.0);
            for i in 1..=100 {
                let value = curve.evaluate(i as f32 / 100.0);
                assert!(
                    value + 1e-4 >= previous,
                    "{:?} decreased at step {}",
                    curve,
                    i
                );
                previous = value;
            }
        }
    }

    #[test]
    fn test_accelerate_is_slow_first() {
        assert!(Interpolator::Accelerate.evaluate(0.5) < 0.5);
        assert!(Interpolator::Decelerate.evaluate(0.5) > 0.5);
    }

    #[test]
    fn test_custom() {
        let curve = Interpolator::custom(|t| t * t * t);
        assert_eq!(curve.evaluate(0.5), 0.125);
        assert_eq!(format!("{:?}", curve), "Custom");
    }

    #[test]
    fn test_deserialize_names_and_bezier() {
        #[derive(Deserialize)]
        struct Curves {
            a: Interpolator,
            b: Interpolator,
        }
        let curves: Curves =
            toml::from_str("a = \"accelerate_decelerate\"\nb = { cubic_bezier = [0.4, 0.0, 0.2, 1.0] }")
                .unwrap();
        assert!(matches!(curves.a, Interpolator::AccelerateDecelerate));
        assert!(matches!(curves.b, Interpolator::CubicBezier(x1, _, _, _) if x1 == 0.4));
    }
}
