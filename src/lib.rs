//! A percent-driven transition engine for collapsible header bars.
//!
//! The bar shrinks from its measured height to a fixed collapsed height as
//! the user scrolls, and every child follows along: translation, layout
//! size, scale, alpha and text color are interpolated from the child's
//! expanded baseline toward its configured collapsed targets.
//!
//! The host owns layout, drawing and the event loop. It drives a
//! [`CollapseBar`] through the measure/layout protocol, feeds it scroll
//! deltas, and pumps [`CollapseBar::on_frame`] while a snap animation runs.

pub mod animation;
pub mod bar;
pub mod child;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod invalidation;
pub mod scroll;
pub mod transition;

pub use bar::{AutoAnimation, CollapseBar, SiblingPlacement};
pub use error::{Error, Result};

pub mod prelude {
    pub use crate::animation::{DriverState, Interpolator, SnapAction};
    pub use crate::bar::{
        AutoAnimation, CollapseBar, SiblingPlacement, AUTO_COLLAPSE_PERCENT_THRESHOLD,
        AUTO_EXPAND_PERCENT_THRESHOLD,
    };
    pub use crate::child::{ChildId, ChildNode, ChildView, TextStyle};
    pub use crate::config::{BarConfig, ChildConfig};
    pub use crate::controller::{LayoutMode, LayoutOutcome};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Argb, Bounds, Padding};
    pub use crate::invalidation::ChangeFlags;
    pub use crate::scroll::ScrollAction;
    pub use crate::transition::{
        BarMetrics, CollapseHandler, CollapseMode, HandlerId, ScrimPaint, TransitionSpec,
    };
}
