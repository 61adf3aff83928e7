//! Per-child interpolation of position, size, scale, alpha and text color.
//!
//! For each child at collapse percent `p` the engine:
//!
//! 1. offers the child to the handler registry, skipping everything up to
//!    the notification (its scrim included) if claimed
//! 2. places it vertically (bottom margin, else top margin, else mode)
//! 3. places it horizontally (right margin, else left margin)
//! 4. interpolates its layout width and height
//! 5. interpolates scale X and scale Y, each with its own curve
//! 6. interpolates alpha
//! 7. interpolates text color, channel by channel
//! 8. notifies every handler
//!
//! Position, size, alpha and color use the child's main curve. Translations
//! are computed as a total distance scaled by curve progress, so they are
//! zero when expanded and land on the target when collapsed.

use std::collections::{HashMap, HashSet};

use crate::animation::Interpolate;
use crate::child::{ChildId, ChildView};
use crate::geometry::{Argb, Bounds, Padding};
use crate::invalidation::ChangeFlags;
use crate::transition::handler::HandlerRegistry;
use crate::transition::origin::{OriginState, OriginStateCache};
use crate::transition::spec::{CollapseMode, TransitionSpec};

/// Bar geometry the transition math depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarMetrics {
    pub width: i32,
    pub padding: Padding,
    pub collapsed_height: i32,
    pub expanded_height: i32,
    pub current_height: i32,
}

/// A child scrim to paint over the child's on-screen bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrimPaint {
    pub child: ChildId,
    pub bounds: Bounds,
    pub color: Argb,
    /// Overall opacity, 0 when expanded and 255 when collapsed
    pub alpha: u8,
}

/// Scrim opacity at `percent`
pub fn scrim_alpha(percent: f32) -> u8 {
    (255.0 * percent) as u8
}

/// How much a scale changes a length
fn scale_delta(length: i32, scale: f32) -> f32 {
    length as f32 * scale - length as f32
}

/// Vertical translation at curve progress `t`, or `None` when the child
/// doesn't move vertically.
pub fn vertical_translation(
    spec: &TransitionSpec,
    origin: &OriginState,
    bar: &BarMetrics,
    t: f32,
) -> Option<f32> {
    if let Some(margin_bottom) = spec.margin_bottom {
        return Some(-(margin_bottom as f32) * t);
    }
    if let Some(margin_top) = spec.margin_top {
        let target = (margin_top + bar.padding.top) as f32
            + scale_delta(origin.height, spec.effective_scale_y()) / 2.0;
        let total = origin.top() as f32 - target;
        return Some(-total * t);
    }
    match spec.mode {
        CollapseMode::Pin => {
            let target = bar.collapsed_height / 2 - origin.height / 2 - bar.padding.top;
            let total = (origin.top() - target) as f32;
            Some(-total * t)
        }
        CollapseMode::SlideOut => {
            let target = -(origin.height as f32)
                - scale_delta(origin.height, spec.effective_scale_y()) / 2.0;
            let total = origin.top() as f32 - target;
            Some(-total * t)
        }
        CollapseMode::None => None,
    }
}

/// Horizontal translation at curve progress `t`, or `None` when no horizontal
/// margin is set.
pub fn horizontal_translation(
    spec: &TransitionSpec,
    origin: &OriginState,
    bar: &BarMetrics,
    t: f32,
) -> Option<f32> {
    let half_delta = scale_delta(origin.width, spec.effective_scale_x()) / 2.0;
    if let Some(margin_right) = spec.margin_right {
        let total = ((bar.width - bar.padding.right - margin_right - origin.right()) as f32
            - half_delta) as i32;
        return Some(total as f32 * t);
    }
    if let Some(margin_left) = spec.margin_left {
        let total =
            ((origin.left() - bar.padding.left - margin_left) as f32 - half_delta) as i32;
        return Some(-(total as f32) * t);
    }
    None
}

#[derive(Debug, Default)]
pub struct TransitionEngine {
    specs: HashMap<ChildId, TransitionSpec>,
    origins: OriginStateCache,
    handlers: HandlerRegistry,
    /// Children a handler took over during the last pass
    claimed: HashSet<ChildId>,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_spec(&mut self, id: ChildId, spec: TransitionSpec) {
        self.specs.insert(id, spec);
    }

    pub fn spec(&self, id: ChildId) -> Option<&TransitionSpec> {
        self.specs.get(&id)
    }

    /// Forget everything cached for a child that left the bar
    pub fn forget(&mut self, id: ChildId) {
        self.specs.remove(&id);
        self.origins.remove(id);
    }

    pub fn origins(&self) -> &OriginStateCache {
        &self.origins
    }

    pub fn origins_mut(&mut self) -> &mut OriginStateCache {
        &mut self.origins
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    /// Apply the transition for `percent` to every child
    pub fn transition_children(
        &mut self,
        children: &mut [Box<dyn ChildView>],
        bar: &BarMetrics,
        percent: f32,
    ) -> ChangeFlags {
        let mut flags = ChangeFlags::empty();
        self.claimed.clear();
        for child in children.iter_mut() {
            let child = child.as_mut();
            if self.handlers.offer(bar, child, percent) {
                self.claimed.insert(child.id());
                flags |= ChangeFlags::NEEDS_PAINT;
            } else {
                flags |= self.transition_child(child, bar, percent);
            }
            self.handlers.notify_after(bar, child, percent);
        }
        flags
    }

    fn transition_child(
        &mut self,
        child: &mut dyn ChildView,
        bar: &BarMetrics,
        percent: f32,
    ) -> ChangeFlags {
        let origin = self.origins.get(child);
        let fallback;
        let spec = match self.specs.get(&child.id()) {
            Some(spec) => spec,
            None => {
                fallback = TransitionSpec::default();
                &fallback
            }
        };

        let t = spec.interpolator.evaluate(percent);
        let mut flags = ChangeFlags::NEEDS_PAINT;

        if let Some(y) = vertical_translation(spec, &origin, bar, t) {
            child.set_translation_y(y);
        }
        if let Some(x) = horizontal_translation(spec, &origin, bar, t) {
            child.set_translation_x(x);
        }

        if let Some(width) = spec.width {
            child.set_layout_width(i32::between(origin.width, width, t));
            flags |= ChangeFlags::NEEDS_LAYOUT;
        }
        if let Some(height) = spec.height {
            child.set_layout_height(i32::between(origin.height, height, t));
            flags |= ChangeFlags::NEEDS_LAYOUT;
        }

        if let Some(scale_x) = spec.scale_x {
            let tx = spec.scale_x_interpolator.evaluate(percent);
            child.set_scale_x(f32::between(origin.scale_x, scale_x, tx));
        }
        if let Some(scale_y) = spec.scale_y {
            let ty = spec.scale_y_interpolator.evaluate(percent);
            child.set_scale_y(f32::between(origin.scale_y, scale_y, ty));
        }

        if let Some(alpha) = spec.alpha {
            child.set_alpha(f32::between(origin.alpha, alpha, t));
        }

        if let (Some(target), Some(from)) = (spec.text_color, origin.text_color) {
            if child.text_style().is_some() {
                child.set_text_color(Argb::between(from, target, t));
            }
        }

        flags
    }

    /// Whether a handler took over `id` during the last pass
    pub fn is_claimed(&self, id: ChildId) -> bool {
        self.claimed.contains(&id)
    }

    /// Scrims of every child that declares one, over its translated bounds.
    /// Children claimed by a handler get none.
    pub fn scrim_paints(&self, children: &[Box<dyn ChildView>], percent: f32) -> Vec<ScrimPaint> {
        let alpha = scrim_alpha(percent);
        children
            .iter()
            .filter(|child| !self.claimed.contains(&child.id()))
            .filter_map(|child| {
                let color = self.specs.get(&child.id())?.scrim?;
                let (tx, ty) = child.translation();
                Some(ScrimPaint {
                    child: child.id(),
                    bounds: child.bounds().translated(tx, ty),
                    color,
                    alpha,
                })
            })
            .collect()
    }
}
