//! Unit-circle layout of the radar chart, shared by the screen plot and the
//! PDF page.
//!
//! Axis `i` of `n` sits at `2πi/n` counter-clockwise from 3 o'clock. A score
//! maps linearly onto the radius: the bottom of the radial range is the
//! centre, the top is the outer ring at radius 1.

use std::f64::consts::TAU;

use super::RadialAxis;

/// Segments used to approximate a circular grid ring.
const RING_SEGMENTS: usize = 72;

pub fn axis_angle(axis: usize, axis_count: usize) -> f64 {
    if axis_count == 0 {
        return 0.0;
    }
    TAU * axis as f64 / axis_count as f64
}

/// Radius in `[0, 1]`; values outside the axis range are pinned to its ends.
pub fn radius(value: f64, axis: &RadialAxis) -> f64 {
    let (lo, hi) = axis.range;
    if hi <= lo {
        return 0.0;
    }
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

pub fn polar_point(value: f64, axis: usize, axis_count: usize, radial: &RadialAxis) -> [f64; 2] {
    let r = radius(value, radial);
    let a = axis_angle(axis, axis_count);
    [r * a.cos(), r * a.sin()]
}

/// Outer end of spoke `axis`.
pub fn spoke_end(axis: usize, axis_count: usize) -> [f64; 2] {
    let a = axis_angle(axis, axis_count);
    [a.cos(), a.sin()]
}

/// Closed circle at the radius of `value`.
pub fn ring(value: f64, radial: &RadialAxis) -> Vec<[f64; 2]> {
    let r = radius(value, radial);
    (0..=RING_SEGMENTS)
        .map(|i| {
            let a = TAU * i as f64 / RING_SEGMENTS as f64;
            [r * a.cos(), r * a.sin()]
        })
        .collect()
}
