use crate::geometry::Argb;

/// Values that move from an origin toward a collapsed target as the bar collapses.
pub trait Interpolate: Copy {
    /// `t = 0.0` returns exactly `from`, `t = 1.0` returns exactly `to`.
    fn between(from: Self, to: Self, t: f32) -> Self;
}

/// Walks `|from - to| * t` away from `from` in the direction of `to`.
pub fn point_between(from: f32, to: f32, t: f32) -> f32 {
    // Endpoints are returned verbatim so float error never leaks into them.
    if t == 0.0 {
        return from;
    }
    if t == 1.0 {
        return to;
    }
    let distance = (from - to).abs();
    if from < to {
        from + distance * t
    } else {
        from - distance * t
    }
}

impl Interpolate for f32 {
    fn between(from: Self, to: Self, t: f32) -> Self {
        point_between(from, to, t)
    }
}

impl Interpolate for i32 {
    fn between(from: Self, to: Self, t: f32) -> Self {
        point_between(from as f32, to as f32, t) as i32
    }
}

impl Interpolate for Argb {
    fn between(from: Self, to: Self, t: f32) -> Self {
        let from = from.channels();
        let to = to.channels();
        let mut mixed = [0u8; 4];
        for (i, channel) in mixed.iter_mut().enumerate() {
            *channel = point_between(from[i] as f32, to[i] as f32, t) as u8;
        }
        Argb::from_channels(mixed)
    }
}
