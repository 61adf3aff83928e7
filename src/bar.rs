//! The collapsing bar as the host sees it.
//!
//! [`CollapseBar`] wires the controller, the scroll filter and the snap driver
//! together behind the host protocol: measure and lay out, feed scroll
//! deltas, report the end of a gesture, and pump frames while a snap runs.
//! Manual scrolling and the snap driver never move the bar at the same time;
//! any forwarded scroll delta stops a running snap first.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::animation::{AutoAnimationDriver, DriverState, SnapAction};
use crate::child::{ChildId, ChildView};
use crate::config::BarConfig;
use crate::controller::{CollapseController, LayoutMode, LayoutOutcome};
use crate::error::{Error, Result};
use crate::geometry::{Argb, Padding};
use crate::invalidation::ChangeFlags;
use crate::scroll::{ScrollAction, ScrollAdapter, ScrollVerdict};
use crate::transition::{scrim_alpha, CollapseHandler, HandlerId, ScrimPaint, TransitionSpec};

/// Releasing an expanding gesture below this percent snaps open
pub const AUTO_EXPAND_PERCENT_THRESHOLD: f32 = 0.95;
/// Releasing a collapsing gesture above this percent snaps shut
pub const AUTO_COLLAPSE_PERCENT_THRESHOLD: f32 = 0.05;

/// A snap that was just started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAnimation {
    pub action: SnapAction,
    /// Duration asked for, before scaling to the remaining distance
    pub requested_duration_ms: u64,
    /// Duration the driver runs with
    pub duration_ms: u64,
    /// Pixels between the current and the terminal height
    pub distance: i32,
}

/// Where the scrolling sibling below the bar belongs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingPlacement {
    /// Shift the sibling down by the bar's current height
    Offset { dy: i32 },
    /// Move the sibling's top edge to the collapsed bar's bottom
    SnapBelow { top: i32 },
    /// Already flush below the collapsed bar
    Unchanged,
}

#[derive(Debug)]
pub struct CollapseBar {
    controller: CollapseController,
    driver: AutoAnimationDriver,
    scroll: ScrollAdapter,
    anim_duration_ms: u64,
    status_bar_scrim: Option<Argb>,
}

impl CollapseBar {
    pub fn new(config: &BarConfig) -> Result<Self> {
        config.validate()?;
        let mut controller = CollapseController::new(config.collapsed_height);
        for (id, spec) in config.specs()? {
            controller.set_transition_spec(id, spec);
        }
        Ok(Self {
            controller,
            driver: AutoAnimationDriver::new(),
            scroll: ScrollAdapter::new(),
            anim_duration_ms: config.anim_duration_ms,
            status_bar_scrim: config.status_bar_scrim,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::new(&BarConfig::from_toml_str(content)?)
    }

    pub fn controller(&self) -> &CollapseController {
        &self.controller
    }

    pub fn percent(&self) -> f32 {
        self.controller.percent()
    }

    pub fn current_height(&self) -> i32 {
        self.controller.current_height()
    }

    pub fn is_collapsed(&self) -> bool {
        self.controller.is_collapsed()
    }

    pub fn is_expanded(&self) -> bool {
        self.controller.is_expanded()
    }

    pub fn anim_duration_ms(&self) -> u64 {
        self.anim_duration_ms
    }

    pub fn pending_action(&self) -> ScrollAction {
        self.scroll.pending()
    }

    // Host layout protocol

    /// See [`CollapseController::on_measure`]
    pub fn on_measure(&mut self, expanded_height: i32) -> Result<i32> {
        self.controller.on_measure(expanded_height)
    }

    /// See [`CollapseController::on_layout`]
    pub fn on_layout<F>(&mut self, host_pass: F) -> LayoutOutcome
    where
        F: FnOnce(&mut [Box<dyn ChildView>], LayoutMode),
    {
        self.controller.on_layout(host_pass)
    }

    pub fn on_detach(&mut self) {
        self.driver.stop();
        self.scroll.reset();
        self.controller.on_detach();
    }

    pub fn set_frame(&mut self, width: i32, padding: Padding) {
        self.controller.set_frame(width, padding);
    }

    // Host scroll protocol

    /// Offer a delta before the sibling scrolls. Returns the amount consumed.
    pub fn on_pre_scroll(&mut self, dy: i32) -> i32 {
        if self.controller.is_collapsed() {
            return 0;
        }
        self.handle_delta(dy)
    }

    /// Hand over whatever the sibling left unconsumed
    pub fn on_scroll(&mut self, dy_unconsumed: i32) {
        if dy_unconsumed != 0 {
            self.handle_delta(dy_unconsumed);
        }
    }

    fn handle_delta(&mut self, dy: i32) -> i32 {
        match self.scroll.filter(dy) {
            // The shake is swallowed whole so the sibling doesn't jitter either
            ScrollVerdict::Shake => dy,
            ScrollVerdict::Forward(dy) => {
                if self.driver.is_running() {
                    debug!("Scroll interrupts the running snap");
                    self.driver.stop();
                }
                self.controller.apply_delta(dy)
            }
        }
    }

    /// End of a scroll gesture. Snaps toward the gesture's direction unless the
    /// bar is already close to that end.
    pub fn on_scroll_stopped(&mut self, now_ms: u64) -> Result<Option<AutoAnimation>> {
        if !self.controller.is_measured() {
            return Ok(None);
        }
        let percent = self.controller.percent();
        let duration = self.anim_duration_ms as f32;
        match self.scroll.pending() {
            ScrollAction::Expanding if percent < AUTO_EXPAND_PERCENT_THRESHOLD => {
                let requested = (duration * percent) as u64;
                self.begin_auto_animation(ScrollAction::Expanding, requested, now_ms)
                    .map(Some)
            }
            ScrollAction::Collapsing if percent > AUTO_COLLAPSE_PERCENT_THRESHOLD => {
                let requested = (duration * (1.0 - percent)) as u64;
                self.begin_auto_animation(ScrollAction::Collapsing, requested, now_ms)
                    .map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Whether a fling may start; there's nothing to fling when collapsed
    pub fn on_pre_fling(&mut self, _velocity: f32) -> bool {
        !self.controller.is_collapsed()
    }

    // Snap animation

    /// Start snapping toward the end `action` points at, replacing any
    /// running snap. `duration_ms` is scaled by the share of the full range
    /// left to cover, so every snap moves at the same speed.
    pub fn begin_auto_animation(
        &mut self,
        action: ScrollAction,
        duration_ms: u64,
        now_ms: u64,
    ) -> Result<AutoAnimation> {
        let snap = action
            .snap_action()
            .ok_or_else(|| Error::InvalidAction(format!("{action:?}")))?;
        let expanded = self.controller.expanded_height().ok_or(Error::NotMeasured)?;
        self.driver.stop();

        let collapsed = self.controller.collapsed_height();
        let target = match snap {
            SnapAction::Collapse => collapsed,
            SnapAction::Expand => expanded,
        };
        let distance = (self.controller.current_height() - target).abs();
        let range = expanded - collapsed;
        let scaled = if range == 0 {
            0
        } else {
            (duration_ms as f64 * distance as f64 / range as f64) as u64
        };

        debug!("Starting {snap:?} snap over {distance}px in {scaled}ms");
        self.driver.start(scaled, distance, now_ms, snap);
        Ok(AutoAnimation {
            action: snap,
            requested_duration_ms: duration_ms,
            duration_ms: scaled,
            distance,
        })
    }

    /// Start a snap from an action tag, `"expand"` or `"collapse"`
    pub fn run_auto_animation(
        &mut self,
        tag: &str,
        duration_ms: u64,
        now_ms: u64,
    ) -> Result<AutoAnimation> {
        let snap: SnapAction = tag.parse()?;
        self.begin_auto_animation(snap.into(), duration_ms, now_ms)
    }

    pub fn run_auto_expand(&mut self, duration_ms: u64, now_ms: u64) -> Result<AutoAnimation> {
        self.begin_auto_animation(ScrollAction::Expanding, duration_ms, now_ms)
    }

    pub fn run_auto_collapse(&mut self, duration_ms: u64, now_ms: u64) -> Result<AutoAnimation> {
        self.begin_auto_animation(ScrollAction::Collapsing, duration_ms, now_ms)
    }

    /// Advance a running snap. Call once per host frame while animating.
    pub fn on_frame(&mut self, now_ms: u64) -> DriverState {
        self.driver.step(now_ms, &mut self.controller)
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_running()
    }

    pub fn stop_animation(&mut self) {
        self.driver.stop();
    }

    /// Drain the work the host owes the bar
    pub fn take_change_flags(&mut self) -> ChangeFlags {
        let mut flags = self.controller.take_change_flags();
        if self.driver.is_running() {
            flags |= ChangeFlags::NEEDS_FRAME;
        }
        flags
    }

    // Painting and siblings

    pub fn scrim_paints(&self) -> Vec<ScrimPaint> {
        self.controller
            .engine()
            .scrim_paints(self.controller.children(), self.controller.percent())
    }

    /// Status bar overlay color and its current opacity
    pub fn status_bar_scrim(&self) -> Option<(Argb, u8)> {
        self.status_bar_scrim
            .map(|color| (color, scrim_alpha(self.controller.percent())))
    }

    /// Where the scrolling sibling should sit, given both top edges
    pub fn sibling_placement(&self, bar_top: i32, sibling_top: i32) -> SiblingPlacement {
        let current = self.controller.current_height();
        if !self.controller.is_collapsed() {
            return SiblingPlacement::Offset { dy: current };
        }
        let bottom = bar_top + current;
        if sibling_top != bottom {
            SiblingPlacement::SnapBelow { top: bottom }
        } else {
            SiblingPlacement::Unchanged
        }
    }

    // Children and handlers

    pub fn add_child(&mut self, child: Box<dyn ChildView>) {
        self.controller.add_child(child);
    }

    pub fn remove_child(&mut self, id: ChildId) -> Option<Box<dyn ChildView>> {
        self.controller.remove_child(id)
    }

    pub fn set_transition_spec(&mut self, id: ChildId, spec: TransitionSpec) {
        self.controller.set_transition_spec(id, spec);
    }

    pub fn child(&self, id: ChildId) -> Option<&dyn ChildView> {
        self.controller.child(id)
    }

    pub fn child_mut(&mut self, id: ChildId) -> Option<&mut (dyn ChildView + 'static)> {
        self.controller.child_mut(id)
    }

    pub fn children_mut(&mut self) -> &mut [Box<dyn ChildView>] {
        self.controller.children_mut()
    }

    pub fn add_collapse_handler(&mut self, handler: Rc<RefCell<dyn CollapseHandler>>) -> HandlerId {
        self.controller.engine_mut().handlers_mut().add(handler)
    }

    pub fn remove_collapse_handler(&mut self, id: HandlerId) -> bool {
        self.controller.engine_mut().handlers_mut().remove(id)
    }
}
