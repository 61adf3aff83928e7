//! Height and percent ownership for the collapsing bar.
//!
//! The controller is the only place the bar's current height changes. Both the
//! scroll path and the snap driver go through [`CollapseController::apply_delta`],
//! which clamps, recomputes the collapse percent and re-runs the transition
//! engine over every child.

use log::{debug, trace};

use crate::animation::SnapTarget;
use crate::child::{ChildId, ChildView};
use crate::error::{Error, Result};
use crate::geometry::Padding;
use crate::invalidation::ChangeFlags;
use crate::transition::{BarMetrics, TransitionEngine, TransitionSpec};

/// How the host should lay the children out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Position every child from its own layout parameters
    Full,
    /// Keep the bounds already written into each child's layout record
    PinnedBounds,
}

/// What a layout pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    /// Full pass while expanded; origin state was re-captured
    Refreshed,
    /// Origin bounds were written back and kept by the host
    Pinned,
    /// A child had no writable layout record, so a full pass ran instead
    FullFallback,
}

pub struct CollapseController {
    collapsed_height: i32,
    /// Fixed by the first measurement, forgotten on detach
    expanded_height: Option<i32>,
    current_height: i32,
    percent: f32,
    laid_out: bool,
    width: i32,
    padding: Padding,
    children: Vec<Box<dyn ChildView>>,
    engine: TransitionEngine,
    flags: ChangeFlags,
}

impl CollapseController {
    pub fn new(collapsed_height: i32) -> Self {
        Self {
            collapsed_height,
            expanded_height: None,
            current_height: 0,
            percent: 0.0,
            laid_out: false,
            width: 0,
            padding: Padding::default(),
            children: Vec::new(),
            engine: TransitionEngine::new(),
            flags: ChangeFlags::empty(),
        }
    }

    pub fn collapsed_height(&self) -> i32 {
        self.collapsed_height
    }

    pub fn expanded_height(&self) -> Option<i32> {
        self.expanded_height
    }

    pub fn current_height(&self) -> i32 {
        self.current_height
    }

    /// 0 when expanded, 1 when collapsed
    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn is_measured(&self) -> bool {
        self.expanded_height.is_some()
    }

    pub fn is_collapsed(&self) -> bool {
        self.is_measured() && self.current_height == self.collapsed_height
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded_height == Some(self.current_height)
    }

    pub fn metrics(&self) -> BarMetrics {
        BarMetrics {
            width: self.width,
            padding: self.padding,
            collapsed_height: self.collapsed_height,
            expanded_height: self.expanded_height.unwrap_or(self.current_height),
            current_height: self.current_height,
        }
    }

    /// Record the host's measurement of the fully expanded bar.
    ///
    /// The first measurement fixes the expanded height and starts the bar
    /// expanded. Returns the height the bar wants to occupy.
    pub fn on_measure(&mut self, expanded_height: i32) -> Result<i32> {
        if expanded_height < self.collapsed_height {
            return Err(Error::CollapsedExceedsExpanded {
                collapsed: self.collapsed_height,
                expanded: expanded_height,
            });
        }
        match self.expanded_height {
            None => {
                debug!("Bar measured: expanded {expanded_height}, collapsed {}", self.collapsed_height);
                self.expanded_height = Some(expanded_height);
                self.current_height = expanded_height;
                self.update_percent();
            }
            Some(fixed) if fixed != expanded_height => {
                trace!("Ignoring re-measurement {expanded_height}, expanded height stays {fixed}");
            }
            Some(_) => {}
        }
        Ok(self.current_height)
    }

    /// Run the host layout pass and keep origin state in step with it.
    pub fn on_layout<F>(&mut self, host_pass: F) -> LayoutOutcome
    where
        F: FnOnce(&mut [Box<dyn ChildView>], LayoutMode),
    {
        if !self.laid_out || self.is_expanded() {
            host_pass(&mut self.children, LayoutMode::Full);
            self.engine.origins_mut().refresh_all(&self.children);
            self.laid_out = true;
            return LayoutOutcome::Refreshed;
        }
        if self.engine.origins_mut().reset_all_borders(&mut self.children) {
            host_pass(&mut self.children, LayoutMode::PinnedBounds);
            LayoutOutcome::Pinned
        } else {
            debug!("Origin bounds can't be written back, running a full layout pass");
            host_pass(&mut self.children, LayoutMode::Full);
            LayoutOutcome::FullFallback
        }
    }

    /// Forget the measurement; the next attach measures and lays out afresh.
    pub fn on_detach(&mut self) {
        self.expanded_height = None;
        self.laid_out = false;
        self.current_height = 0;
        self.percent = 0.0;
    }

    /// Container width and padding, as placed by the host
    pub fn set_frame(&mut self, width: i32, padding: Padding) {
        if self.width != width || self.padding != padding {
            self.width = width;
            self.padding = padding;
            self.flags |= ChangeFlags::NEEDS_LAYOUT;
        }
    }

    /// Shrink (positive `dy`) or grow (negative `dy`) the bar.
    ///
    /// Returns how much of `dy` the bar absorbed; the rest belongs to the
    /// scrolling sibling. An unmeasured bar absorbs nothing.
    pub fn apply_delta(&mut self, dy: i32) -> i32 {
        let Some(expanded) = self.expanded_height else {
            return 0;
        };
        let previous = self.current_height;
        let next = previous
            .saturating_sub(dy)
            .max(0)
            .min(expanded)
            .max(self.collapsed_height)
            .min(expanded);
        let consumed = previous - next;
        if next != previous {
            self.current_height = next;
            self.update_percent();
            trace!("Bar height {previous} -> {next}, percent {:.3}", self.percent);
            self.flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
            self.transition();
        }
        consumed
    }

    fn update_percent(&mut self) {
        let Some(expanded) = self.expanded_height else {
            self.percent = 0.0;
            return;
        };
        let range = expanded - self.collapsed_height;
        self.percent = if range == 0 {
            1.0
        } else {
            (expanded - self.current_height) as f32 / range as f32
        };
    }

    /// Re-apply the current percent to every child
    pub fn transition(&mut self) {
        let metrics = self.metrics();
        self.flags |= self
            .engine
            .transition_children(&mut self.children, &metrics, self.percent);
    }

    /// Add a child, replacing any child with the same id
    pub fn add_child(&mut self, child: Box<dyn ChildView>) {
        let id = child.id();
        match self.children.iter_mut().find(|c| c.id() == id) {
            Some(slot) => *slot = child,
            None => self.children.push(child),
        }
        self.flags |= ChangeFlags::NEEDS_LAYOUT;
    }

    pub fn remove_child(&mut self, id: ChildId) -> Option<Box<dyn ChildView>> {
        let index = self.children.iter().position(|c| c.id() == id)?;
        self.engine.forget(id);
        self.flags |= ChangeFlags::NEEDS_LAYOUT;
        Some(self.children.remove(index))
    }

    /// Attach a transition spec to a child id, applying it at the current percent
    pub fn set_transition_spec(&mut self, id: ChildId, spec: TransitionSpec) {
        self.engine.set_spec(id, spec);
        if self.laid_out {
            self.transition();
        }
    }

    pub fn child(&self, id: ChildId) -> Option<&dyn ChildView> {
        self.children
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    pub fn child_mut(&mut self, id: ChildId) -> Option<&mut (dyn ChildView + 'static)> {
        self.children
            .iter_mut()
            .find(|c| c.id() == id)
            .map(|c| c.as_mut())
    }

    pub fn children(&self) -> &[Box<dyn ChildView>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn ChildView>] {
        &mut self.children
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TransitionEngine {
        &mut self.engine
    }

    /// Drain the work accumulated since the last call
    pub fn take_change_flags(&mut self) -> ChangeFlags {
        std::mem::take(&mut self.flags)
    }
}

impl SnapTarget for CollapseController {
    fn apply_delta(&mut self, dy: i32) -> i32 {
        CollapseController::apply_delta(self, dy)
    }

    fn is_collapsed(&self) -> bool {
        CollapseController::is_collapsed(self)
    }

    fn is_expanded(&self) -> bool {
        CollapseController::is_expanded(self)
    }
}

impl std::fmt::Debug for CollapseController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollapseController")
            .field("collapsed_height", &self.collapsed_height)
            .field("expanded_height", &self.expanded_height)
            .field("current_height", &self.current_height)
            .field("percent", &self.percent)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}
