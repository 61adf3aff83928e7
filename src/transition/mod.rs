mod engine;
mod handler;
mod origin;
mod spec;

pub use engine::{
    horizontal_translation, scrim_alpha, vertical_translation, BarMetrics, ScrimPaint,
    TransitionEngine,
};
pub use handler::{CollapseHandler, HandlerId, HandlerRegistry};
pub use origin::{OriginState, OriginStateCache};
pub use spec::{CollapseMode, TransitionSpec};
