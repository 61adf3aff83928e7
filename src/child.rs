//! The host-side view of a bar child.
//!
//! The bar never lays out its children. The host layout positions them and
//! exposes each one through [`ChildView`]; the transition engine reads its
//! baseline geometry and overlays translation, scale, alpha, layout size and
//! text color on top.

use crate::geometry::{Argb, Bounds};

/// Stable identity of a child, shared by the host and the bar's transition specs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ChildId(pub u32);

/// Text styling of text-bearing children
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Argb,
    pub size: f32,
}

/// A child of the bar, as seen by the transition engine.
pub trait ChildView {
    fn id(&self) -> ChildId;

    /// Edges as placed by the last host layout pass
    fn bounds(&self) -> Bounds;

    /// Edges recorded in the host's own layout record, when the host lets the
    /// bar read and write that record directly. `None` means the capability is
    /// unavailable for this child.
    fn raw_bounds(&self) -> Option<Bounds> {
        None
    }

    /// Write edges straight into the host's layout record so the next pass
    /// keeps them. Returns false when the capability is unavailable.
    fn try_set_raw_bounds(&mut self, _bounds: Bounds) -> bool {
        false
    }

    fn translation(&self) -> (f32, f32);
    fn set_translation_x(&mut self, x: f32);
    fn set_translation_y(&mut self, y: f32);

    fn scale(&self) -> (f32, f32);
    fn set_scale_x(&mut self, x: f32);
    fn set_scale_y(&mut self, y: f32);

    fn alpha(&self) -> f32;
    fn set_alpha(&mut self, alpha: f32);

    /// Request a layout width for the next host pass
    fn set_layout_width(&mut self, width: i32);
    /// Request a layout height for the next host pass
    fn set_layout_height(&mut self, height: i32);

    /// `Some` for text-bearing children
    fn text_style(&self) -> Option<TextStyle> {
        None
    }

    fn set_text_color(&mut self, _color: Argb) {}
}

/// An in-memory child for headless hosts.
///
/// Holds exactly the state the engine reads and writes. `layout_at` plays the
/// role of the host layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildNode {
    id: ChildId,
    bounds: Bounds,
    raw_bounds: Option<Bounds>,
    translation: (f32, f32),
    scale: (f32, f32),
    alpha: f32,
    layout_width: Option<i32>,
    layout_height: Option<i32>,
    text: Option<TextStyle>,
}

impl ChildNode {
    pub fn new(id: ChildId, bounds: Bounds) -> Self {
        Self {
            id,
            bounds,
            raw_bounds: None,
            translation: (0.0, 0.0),
            scale: (1.0, 1.0),
            alpha: 1.0,
            layout_width: None,
            layout_height: None,
            text: None,
        }
    }

    /// Make the child text-bearing
    pub fn with_text(mut self, color: Argb, size: f32) -> Self {
        self.text = Some(TextStyle { color, size });
        self
    }

    /// Expose the host layout record for direct reads and writes
    pub fn with_raw_bounds(mut self) -> Self {
        self.raw_bounds = Some(self.bounds);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = (x, y);
        self
    }

    /// Place the child, as a host layout pass would
    pub fn layout_at(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        if self.raw_bounds.is_some() {
            self.raw_bounds = Some(bounds);
        }
    }

    /// Place the child where its layout record says, if it has one
    pub fn layout_from_record(&mut self) {
        if let Some(raw) = self.raw_bounds {
            self.bounds = raw;
        }
    }

    pub fn layout_width(&self) -> Option<i32> {
        self.layout_width
    }

    pub fn layout_height(&self) -> Option<i32> {
        self.layout_height
    }

    pub fn text_color(&self) -> Option<Argb> {
        self.text.map(|t| t.color)
    }
}

impl ChildView for ChildNode {
    fn id(&self) -> ChildId {
        self.id
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn raw_bounds(&self) -> Option<Bounds> {
        self.raw_bounds
    }

    fn try_set_raw_bounds(&mut self, bounds: Bounds) -> bool {
        match self.raw_bounds.as_mut() {
            Some(raw) => {
                *raw = bounds;
                true
            }
            None => false,
        }
    }

    fn translation(&self) -> (f32, f32) {
        self.translation
    }

    fn set_translation_x(&mut self, x: f32) {
        self.translation.0 = x;
    }

    fn set_translation_y(&mut self, y: f32) {
        self.translation.1 = y;
    }

    fn scale(&self) -> (f32, f32) {
        self.scale
    }

    fn set_scale_x(&mut self, x: f32) {
        self.scale.0 = x;
    }

    fn set_scale_y(&mut self, y: f32) {
        self.scale.1 = y;
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn set_layout_width(&mut self, width: i32) {
        self.layout_width = Some(width);
    }

    fn set_layout_height(&mut self, height: i32) {
        self.layout_height = Some(height);
    }

    fn text_style(&self) -> Option<TextStyle> {
        self.text
    }

    fn set_text_color(&mut self, color: Argb) {
        if let Some(text) = self.text.as_mut() {
            text.color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_bounds_capability_is_opt_in() {
        let mut plain = ChildNode::new(ChildId(1), Bounds::new(0, 0, 10, 10));
        assert_eq!(plain.raw_bounds(), None);
        assert!(!plain.try_set_raw_bounds(Bounds::new(1, 1, 2, 2)));

        let mut capable = ChildNode::new(ChildId(2), Bounds::new(0, 0, 10, 10)).with_raw_bounds();
        assert!(capable.try_set_raw_bounds(Bounds::new(5, 5, 15, 15)));
        capable.layout_from_record();
        assert_eq!(capable.bounds(), Bounds::new(5, 5, 15, 15));
    }

    #[test]
    fn test_text_color_only_for_text_children() {
        let mut icon = ChildNode::new(ChildId(1), Bounds::default());
        icon.set_text_color(Argb::WHITE);
        assert_eq!(icon.text_color(), None);

        let mut title = ChildNode::new(ChildId(2), Bounds::default()).with_text(Argb::BLACK, 20.0);
        title.set_text_color(Argb::WHITE);
        assert_eq!(title.text_color(), Some(Argb::WHITE));
    }
}
