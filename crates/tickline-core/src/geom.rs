#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

/// Linear interpolation from `from` towards `to`. `t` may be negative or above 1.
pub fn lerp(from: Point, to: Point, t: f64) -> Point {
    from + (to - from) * t
}

/// Unit normal of the segment `from -> to`, oriented so that it never points to screen-left.
///
/// Horizontal segments get the normal pointing down (positive y). Degenerate segments fall back
/// to `(1, 0)`.
pub fn screen_right_normal(from: Point, to: Point) -> Vector {
    let d = to - from;
    let len = d.length();
    if !(len.is_finite() && len > 0.0) {
        return vector(1.0, 0.0);
    }
    let mut n = vector(-d.y, d.x) / len;
    if n.x < 0.0 || (n.x == 0.0 && n.y < 0.0) {
        n = -n;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_supports_negative_fractions() {
        let p = lerp(point(0.0, 0.0), point(10.0, 20.0), -0.5);
        assert_eq!(p, point(-5.0, -10.0));
    }

    #[test]
    fn normal_points_right_for_vertical_segments() {
        assert_eq!(
            screen_right_normal(point(0.0, 0.0), point(0.0, 10.0)),
            vector(1.0, 0.0)
        );
        assert_eq!(
            screen_right_normal(point(0.0, 10.0), point(0.0, 0.0)),
            vector(1.0, 0.0)
        );
    }

    #[test]
    fn normal_of_degenerate_segment_is_finite() {
        let n = screen_right_normal(point(3.0, 3.0), point(3.0, 3.0));
        assert_eq!(n, vector(1.0, 0.0));
    }
}
