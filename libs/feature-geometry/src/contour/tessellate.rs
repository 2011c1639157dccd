use crate::model::{ContourSegment, SegmentKind};
use config::constants::{BULGE_EPSILON, CONTOUR_EPSILON, EPSILON};
use glam::DVec2;
use std::f64::consts::{PI, TAU};

/// Control point for a bulge-encoded polyline span.
///
/// Returns `None` for straight spans (`|bulge| < BULGE_EPSILON`) and for
/// zero-length chords. Positive bulges bow to the left of `start -> end`.
pub fn bulge_to_arc_midpoint(start: DVec2, end: DVec2, bulge: f64) -> Option<DVec2> {
    if bulge.abs() < BULGE_EPSILON {
        return None;
    }
    let delta = end - start;
    let chord = delta.length();
    if chord < EPSILON {
        return None;
    }

    let sagitta = bulge.abs() * chord / 2.0;
    let perpendicular = delta.perp() / chord;
    Some((start + end) / 2.0 + perpendicular * sagitta * bulge.signum())
}

fn angle_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

fn sweep_arc(
    center: DVec2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
    subdivisions: u32,
) -> Vec<DVec2> {
    let steps = subdivisions.max(1);
    (0..=steps)
        .map(|i| {
            let angle = start_angle + sweep * i as f64 / steps as f64;
            center + DVec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Samples a counter-clockwise arc from `start` to `end`.
///
/// The sweep is normalized to `[0, 2π)`; a zero sweep (coincident start
/// and end) is a full circle.
pub fn tessellate_arc(
    center: DVec2,
    radius: f64,
    start: DVec2,
    end: DVec2,
    subdivisions: u32,
) -> Vec<DVec2> {
    let start_angle = angle_of(start - center);
    let end_angle = angle_of(end - center);
    let mut sweep = (end_angle - start_angle).rem_euclid(TAU);
    if sweep < EPSILON {
        sweep = TAU;
    }
    sweep_arc(center, radius, start_angle, sweep, subdivisions)
}

fn tessellate_arc_clockwise(
    center: DVec2,
    radius: f64,
    start: DVec2,
    end: DVec2,
    subdivisions: u32,
) -> Vec<DVec2> {
    let start_angle = angle_of(start - center);
    let end_angle = angle_of(end - center);
    let mut sweep = (start_angle - end_angle).rem_euclid(TAU);
    if sweep < EPSILON {
        sweep = TAU;
    }
    sweep_arc(center, radius, start_angle, -sweep, subdivisions)
}

/// Samples a bezier curve with `subdivisions + 1` points.
///
/// No control points gives the straight segment, one gives a quadratic and
/// two a cubic curve; longer lists use de Casteljau evaluation.
pub fn tessellate_bezier(
    start: DVec2,
    control_points: &[DVec2],
    end: DVec2,
    subdivisions: u32,
) -> Vec<DVec2> {
    if control_points.is_empty() {
        return vec![start, end];
    }

    let steps = subdivisions.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let s = 1.0 - t;
            match control_points {
                [c] => start * (s * s) + *c * (2.0 * s * t) + end * (t * t),
                [c1, c2] => {
                    start * (s * s * s)
                        + *c1 * (3.0 * s * s * t)
                        + *c2 * (3.0 * s * t * t)
                        + end * (t * t * t)
                }
                _ => de_casteljau(start, control_points, end, t),
            }
        })
        .collect()
}

fn de_casteljau(start: DVec2, control_points: &[DVec2], end: DVec2, t: f64) -> DVec2 {
    let mut pts: Vec<DVec2> = std::iter::once(start)
        .chain(control_points.iter().copied())
        .chain(std::iter::once(end))
        .collect();
    for level in (1..pts.len()).rev() {
        for i in 0..level {
            pts[i] = pts[i].lerp(pts[i + 1], t);
        }
    }
    pts[0]
}

/// Catmull-Rom spline through `start`, the control points and `end`.
fn tessellate_spline(
    start: DVec2,
    control_points: &[DVec2],
    end: DVec2,
    subdivisions: u32,
) -> Vec<DVec2> {
    let knots: Vec<DVec2> = std::iter::once(start)
        .chain(control_points.iter().copied())
        .chain(std::iter::once(end))
        .collect();
    let steps = subdivisions.max(1);
    let last = knots.len() - 1;

    let mut out = vec![start];
    for span in 0..last {
        let p0 = knots[span.saturating_sub(1)];
        let p1 = knots[span];
        let p2 = knots[span + 1];
        let p3 = knots[(span + 2).min(last)];
        for i in 1..=steps {
            let t = i as f64 / steps as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let point = (p1 * 2.0
                + (p2 - p0) * t
                + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
                + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
                * 0.5;
            out.push(point);
        }
    }
    out
}

fn tessellate_segment(segment: &ContourSegment, subdivisions: u32) -> Vec<DVec2> {
    let ContourSegment {
        start, end, bulge, ..
    } = *segment;

    match segment.kind {
        SegmentKind::Line => match bulge.and_then(|b| bulge_to_arc_midpoint(start, end, b)) {
            Some(mid) => tessellate_bezier(start, &[mid], end, subdivisions),
            None => vec![start, end],
        },
        SegmentKind::Arc => match segment.center {
            Some(center) => {
                let radius = segment.radius.unwrap_or_else(|| start.distance(center));
                if bulge.is_some_and(|b| b < 0.0) {
                    tessellate_arc_clockwise(center, radius, start, end, subdivisions)
                } else {
                    tessellate_arc(center, radius, start, end, subdivisions)
                }
            }
            None => match bulge.and_then(|b| bulge_to_arc_midpoint(start, end, b)) {
                Some(mid) => tessellate_bezier(start, &[mid], end, subdivisions),
                None => vec![start, end],
            },
        },
        SegmentKind::Bezier => {
            tessellate_bezier(start, &segment.control_points, end, subdivisions)
        }
        SegmentKind::Spline => {
            tessellate_spline(start, &segment.control_points, end, subdivisions)
        }
    }
}

/// Flattens a mixed segment list into one point list.
///
/// A segment that starts where the previous one ended does not repeat
/// the shared point; gaps are bridged with a straight edge.
pub fn tessellate_segments(segments: &[ContourSegment], subdivisions: u32) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::new();
    for segment in segments {
        let points = tessellate_segment(segment, subdivisions);
        let skip = match (out.last(), points.first()) {
            (Some(last), Some(first)) if last.distance(*first) <= CONTOUR_EPSILON => 1,
            _ => 0,
        };
        out.extend(points.into_iter().skip(skip));
    }
    out
}

/// Expands a bulge-encoded polyline.
///
/// `bulges[i]` applies to the span `points[i] -> points[i + 1]`; missing
/// entries are straight. Curved spans become quadratic beziers whose
/// control point is [`bulge_to_arc_midpoint`].
pub fn polyline_with_bulges(points: &[DVec2], bulges: &[f64], subdivisions: u32) -> Vec<DVec2> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut out = vec![*first];
    for (i, pair) in points.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let bulge = bulges.get(i).copied().unwrap_or(0.0);
        match bulge_to_arc_midpoint(a, b, bulge) {
            Some(mid) => out.extend(tessellate_bezier(a, &[mid], b, subdivisions).into_iter().skip(1)),
            None => out.push(b),
        }
    }
    out
}

/// Stadium outline centred on `center`, counter-clockwise.
///
/// `length` is the overall extent along `angle` (radians) and `width` the
/// diameter of the rounded ends. When `length <= width` the result is a
/// circle.
pub fn obround(center: DVec2, length: f64, width: f64, angle: f64, segments: u32) -> Vec<DVec2> {
    let radius = width / 2.0;
    let half_straight = ((length - width) / 2.0).max(0.0);
    let per_end = (segments.max(8) / 2).max(4);

    let mut local = Vec::with_capacity(2 * per_end as usize + 2);
    if half_straight <= EPSILON {
        let n = per_end * 2;
        local.extend((0..n).map(|i| {
            let a = TAU * i as f64 / n as f64;
            DVec2::new(a.cos(), a.sin()) * radius
        }));
    } else {
        // Right cap from -90° to 90°, then left cap from 90° to 270°
        for (cx, offset) in [(half_straight, -PI / 2.0), (-half_straight, PI / 2.0)] {
            local.extend((0..=per_end).map(|i| {
                let a = offset + PI * i as f64 / per_end as f64;
                DVec2::new(cx + radius * a.cos(), radius * a.sin())
            }));
        }
    }

    let rotation = DVec2::from_angle(angle);
    local
        .into_iter()
        .map(|p| center + rotation.rotate(p))
        .collect()
}
