//! Geometry helpers on plain `(x, y)` tuples (court units = feet).

pub type Point = (f32, f32);

#[inline]
pub fn add(a: Point, b: Point) -> Point {
    (a.0 + b.0, a.1 + b.1)
}

#[inline]
pub fn sub(a: Point, b: Point) -> Point {
    (a.0 - b.0, a.1 - b.1)
}

#[inline]
pub fn scale(v: Point, s: f32) -> Point {
    (v.0 * s, v.1 * s)
}

#[inline]
pub fn length(v: Point) -> f32 {
    (v.0 * v.0 + v.1 * v.1).sqrt()
}

#[inline]
pub fn distance(a: Point, b: Point) -> f32 {
    length(sub(a, b))
}

/// Unit vector, or zero for a (near) zero input.
#[inline]
pub fn normalize(v: Point) -> Point {
    let len = length(v);
    if len < 0.0001 {
        (0.0, 0.0)
    } else {
        (v.0 / len, v.1 / len)
    }
}

/// Unit direction from `from` toward `to`.
#[inline]
pub fn direction(from: Point, to: Point) -> Point {
    normalize(sub(to, from))
}

/// Left-hand perpendicular.
#[inline]
pub fn perpendicular(v: Point) -> Point {
    (-v.1, v.0)
}

#[inline]
pub fn lerp(a: Point, b: Point, t: f32) -> Point {
    let t = t.clamp(0.0, 1.0);
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

#[inline]
pub fn midpoint(a: Point, b: Point) -> Point {
    ((a.0 + b.0) * 0.5, (a.1 + b.1) * 0.5)
}

/// Step from `from` toward `to` by at most `max_step`.
pub fn move_toward(from: Point, to: Point, max_step: f32) -> Point {
    let d = distance(from, to);
    if d <= max_step || d < 0.0001 {
        to
    } else {
        add(from, scale(direction(from, to), max_step))
    }
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn point_to_segment_distance(p: Point, a: Point, b: Point) -> f32 {
    distance(p, lerp(a, b, segment_fraction(p, a, b)))
}

/// Fraction along `a -> b` (clamped to 0..1) of the point nearest `p`.
#[inline]
pub fn segment_fraction(p: Point, a: Point, b: Point) -> f32 {
    let ab = sub(b, a);
    let len_sq = ab.0 * ab.0 + ab.1 * ab.1;
    if len_sq < 0.0001 {
        return 0.0;
    }
    (((p.0 - a.0) * ab.0 + (p.1 - a.1) * ab.1) / len_sq).clamp(0.0, 1.0)
}

#[inline]
pub fn clamp_point(p: Point, min: Point, max: Point) -> Point {
    (p.0.clamp(min.0, max.0), p.1.clamp(min.1, max.1))
}

/// Map a 0-100 rating to 0..1.
#[inline]
pub fn norm(rating: f32) -> f32 {
    (rating / 100.0).clamp(0.0, 1.0)
}

/// Map a 0-100 rating to a multiplier centred on 1.0 at rating 50
/// (0.6 at 0, 1.4 at 100).
#[inline]
pub fn rating_modifier(rating: f32) -> f32 {
    0.6 + 0.8 * norm(rating)
}
