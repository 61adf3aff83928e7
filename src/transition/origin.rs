//! Baseline geometry and style of each child at full expansion.
//!
//! Every interpolated property starts from the value recorded here, so the
//! cache must be refreshed whenever the bar finishes a layout pass while
//! expanded. A stale entry only produces wrong pixels, never unsafety.

use std::collections::HashMap;

use crate::child::{ChildId, ChildView};
use crate::geometry::{Argb, Bounds};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginState {
    pub bounds: Bounds,
    pub width: i32,
    pub height: i32,
    pub alpha: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Only for text-bearing children
    pub text_color: Option<Argb>,
    pub text_size: Option<f32>,
    /// Whether `bounds` came from the host's layout record and can be written back
    pub can_reset_bounds: bool,
}

impl OriginState {
    pub fn capture(child: &dyn ChildView) -> Self {
        let (bounds, can_reset_bounds) = match child.raw_bounds() {
            Some(raw) => (raw, true),
            None => (child.bounds(), false),
        };
        let laid_out = child.bounds();
        let (scale_x, scale_y) = child.scale();
        let text = child.text_style();
        Self {
            bounds,
            width: laid_out.width(),
            height: laid_out.height(),
            alpha: child.alpha(),
            scale_x,
            scale_y,
            text_color: text.map(|t| t.color),
            text_size: text.map(|t| t.size),
            can_reset_bounds,
        }
    }

    pub fn update(&mut self, child: &dyn ChildView) {
        *self = Self::capture(child);
    }

    pub fn top(&self) -> i32 {
        self.bounds.top
    }

    pub fn left(&self) -> i32 {
        self.bounds.left
    }

    pub fn right(&self) -> i32 {
        self.bounds.right
    }
}

#[derive(Debug, Default)]
pub struct OriginStateCache {
    entries: HashMap<ChildId, OriginState>,
}

impl OriginStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached origin of `child`, captured from its current state on first use
    pub fn get(&mut self, child: &dyn ChildView) -> OriginState {
        *self
            .entries
            .entry(child.id())
            .or_insert_with(|| OriginState::capture(child))
    }

    /// Cached origin without capturing
    pub fn peek(&self, id: ChildId) -> Option<&OriginState> {
        self.entries.get(&id)
    }

    /// Re-capture every child and drop entries for children that are gone
    pub fn refresh_all(&mut self, children: &[Box<dyn ChildView>]) {
        for child in children {
            let child = child.as_ref();
            match self.entries.get_mut(&child.id()) {
                Some(origin) => origin.update(child),
                None => {
                    self.entries.insert(child.id(), OriginState::capture(child));
                }
            }
        }
        if self.entries.len() > children.len() {
            self.entries
                .retain(|id, _| children.iter().any(|c| c.id() == *id));
        }
    }

    pub fn remove(&mut self, id: ChildId) -> Option<OriginState> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every child's origin edges back into its host layout record.
    ///
    /// Returns false, writing nothing, if any child lacks the capability. A
    /// child refusing the write midway also returns false; earlier writes stay.
    pub fn reset_all_borders(&mut self, children: &mut [Box<dyn ChildView>]) -> bool {
        for child in children.iter() {
            if !self.get(child.as_ref()).can_reset_bounds {
                log::debug!("Child {:?} has no writable layout record", child.id());
                return false;
            }
        }
        for child in children.iter_mut() {
            let bounds = self.get(child.as_ref()).bounds;
            if !child.try_set_raw_bounds(bounds) {
                log::debug!("Child {:?} refused its origin bounds", child.id());
                return false;
            }
        }
        true
    }
}
