mod driver;
mod lerp;
mod timing;

pub use driver::{AutoAnimationDriver, DriverState, SnapAction, SnapTarget};
pub use lerp::{point_between, Interpolate};
pub use timing::Interpolator;
