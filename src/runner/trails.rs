//! Runner domain: pickup placement along polyline trails.

use bevy::prelude::*;

use crate::content::TrailDef;

/// Minimum distance between two samples.
pub const MIN_SPACING: f32 = 0.05;

/// Headings allowed when snapping, in degrees.
pub const SNAP_ANGLES_DEG: [f32; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

/// Running length at each vertex. Returns the total length too.
fn cumulative_lengths(points: &[Vec2]) -> (Vec<f32>, f32) {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for pair in points.windows(2) {
        total += pair[0].distance(pair[1]);
        cumulative.push(total);
    }
    (cumulative, total)
}

/// Point at `distance` along the polyline.
fn evaluate_at(points: &[Vec2], cumulative: &[f32], distance: f32) -> Vec2 {
    let Some(total) = cumulative.last().copied() else {
        return Vec2::ZERO;
    };
    let d = distance.clamp(0.0, total);
    let hi = cumulative.partition_point(|&c| c < d);
    if hi == 0 {
        return points[0];
    }
    if hi >= cumulative.len() {
        return points[points.len() - 1];
    }
    let (d1, d2) = (cumulative[hi - 1], cumulative[hi]);
    let u = if (d2 - d1).abs() <= f32::EPSILON {
        0.0
    } else {
        (d - d1) / (d2 - d1)
    };
    points[hi - 1].lerp(points[hi], u)
}

/// Samples evenly spaced points along a polyline.
///
/// Sampling starts `start_offset` along the path. The last sample lands on
/// or before the end; `include_end_if_fits` adds the sample that fits
/// exactly in the remaining length. Degenerate paths yield nothing.
pub fn sample_polyline(
    points: &[Vec2],
    spacing: f32,
    start_offset: f32,
    include_end_if_fits: bool,
) -> Vec<Vec2> {
    if points.len() < 2 {
        return Vec::new();
    }
    let (cumulative, total) = cumulative_lengths(points);
    if total <= 1e-5 {
        return Vec::new();
    }

    let step = spacing.max(MIN_SPACING);
    let t0 = start_offset.clamp(0.0, total);
    let whole = ((total - t0) / step).floor() as usize;
    let count = if include_end_if_fits { whole + 1 } else { whole };

    (0..count)
        .map(|i| t0 + i as f32 * step)
        .take_while(|d| *d <= total + 1e-4)
        .map(|d| evaluate_at(points, &cumulative, d))
        .collect()
}

/// Nearest allowed heading for a direction, as a unit vector.
pub fn snap_direction(direction: Vec2, angles_deg: &[f32]) -> Vec2 {
    if direction.length_squared() <= f32::EPSILON || angles_deg.is_empty() {
        return direction;
    }
    let angle = direction.y.atan2(direction.x).to_degrees().rem_euclid(360.0);
    let angular_distance = |a: f32| {
        let diff = (a.rem_euclid(360.0) - angle).abs();
        diff.min(360.0 - diff)
    };
    let best = angles_deg
        .iter()
        .copied()
        .min_by(|a, b| angular_distance(*a).total_cmp(&angular_distance(*b)))
        .unwrap_or(0.0);
    Vec2::from_angle(best.to_radians())
}

/// Rebuilds a polyline so every segment follows an allowed heading while
/// keeping its length.
pub fn snap_polyline(points: &[Vec2], angles_deg: &[f32]) -> Vec<Vec2> {
    let Some(first) = points.first().copied() else {
        return Vec::new();
    };
    let mut snapped = Vec::with_capacity(points.len());
    snapped.push(first);
    let mut cursor = first;
    for pair in points.windows(2) {
        let segment = pair[1] - pair[0];
        cursor += snap_direction(segment, angles_deg) * segment.length();
        snapped.push(cursor);
    }
    snapped
}

/// Local pickup positions for a trail definition.
pub fn sample_trail(trail: &TrailDef) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = trail.points.iter().map(|(x, y)| Vec2::new(*x, *y)).collect();
    if trail.angle_snap {
        points = snap_polyline(&points, &SNAP_ANGLES_DEG);
    }
    sample_polyline(
        &points,
        trail.spacing,
        trail.start_offset,
        trail.include_end_if_fits,
    )
}
