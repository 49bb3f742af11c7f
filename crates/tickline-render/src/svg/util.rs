use std::fmt::Write as _;
use tickline_core::geom::Point;

/// Writes `v` in its shortest round-trippable form, without `-0` or tiny float noise.
pub(super) fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }

    let _ = write!(out, "{v}");
}

pub(super) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

/// `x1,y1 x2,y2 ...` with every coordinate multiplied by `scale`.
pub(super) fn fmt_points_into(out: &mut String, points: &[Point], scale: f64) {
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        fmt_into(out, p.x * scale);
        out.push(',');
        fmt_into(out, p.y * scale);
    }
}
