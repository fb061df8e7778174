//! Smooth interpolating curve through the beam's waypoints.
//!
//! Uniform Catmull-Rom segments, one per consecutive point pair, expressed in
//! Hermite form with finite-difference tangents. The curve passes through every
//! control point. Missing neighbours at both ends are mirrored so the first and
//! last segments stay well defined.

use super::geometry::Vec3;

/// Samples used to approximate arc length.
const ARC_DIVISIONS: usize = 200;
const TANGENT_DELTA: f64 = 1e-4;

fn hermite(p0: Vec3, p1: Vec3, m0: Vec3, m1: Vec3, t: f64) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    p0 * (2.0 * t3 - 3.0 * t2 + 1.0)
        + m0 * (t3 - 2.0 * t2 + t)
        + p1 * (-2.0 * t3 + 3.0 * t2)
        + m1 * (t3 - t2)
}

/// One Catmull-Rom segment between `current` (t = 0) and `next` (t = 1).
fn catmull_rom(prev: Vec3, current: Vec3, next: Vec3, next_next: Vec3, t: f64) -> Vec3 {
    let tangent_start = (next - prev) * 0.5;
    let tangent_end = (next_next - current) * 0.5;
    hermite(current, next, tangent_start, tangent_end, t)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    /// Cumulative length at `i / ARC_DIVISIONS` of the parameter range.
    arc_lengths: Vec<f64>,
}

impl CatmullRomCurve {
    /// Returns `None` when fewer than two points are supplied.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut curve = Self { points, arc_lengths: Vec::with_capacity(ARC_DIVISIONS + 1) };
        curve.arc_lengths = curve.measure();
        Some(curve)
    }

    #[cfg(test)]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    fn measure(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(ARC_DIVISIONS + 1);
        let mut total = 0.0;
        let mut last = self.point(0.0);
        lengths.push(0.0);
        for i in 1..=ARC_DIVISIONS {
            let current = self.point(i as f64 / ARC_DIVISIONS as f64);
            total += current.distance(last);
            lengths.push(total);
            last = current;
        }
        lengths
    }

    pub fn length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t` in `[0, 1]`; each segment spans an equal
    /// share of the parameter range regardless of its length.
    pub fn point(&self, t: f64) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let last = self.points.len() - 1;
        let scaled = t * last as f64;
        let index = (scaled.floor() as usize).min(last - 1);
        let local = scaled - index as f64;

        let current = self.points[index];
        let next = self.points[index + 1];
        let prev = if index > 0 {
            self.points[index - 1]
        } else {
            current * 2.0 - next
        };
        let next_next = if index + 2 <= last {
            self.points[index + 2]
        } else {
            next * 2.0 - current
        };
        catmull_rom(prev, current, next, next_next, local)
    }

    /// Unit tangent at curve parameter `t`, by finite difference.
    pub fn tangent(&self, t: f64) -> Vec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1))
            .try_normalize()
            .unwrap_or(Vec3::X)
    }

    /// Curve parameter at which the arc length reaches `fraction` of the total.
    pub fn parameter_at_fraction(&self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        let target = fraction * self.length();
        if target <= 0.0 {
            return 0.0;
        }
        let i = self.arc_lengths.partition_point(|&len| len < target);
        if i == 0 {
            return 0.0;
        }
        if i > ARC_DIVISIONS {
            return 1.0;
        }
        let before = self.arc_lengths[i - 1];
        let after = self.arc_lengths[i];
        let span = after - before;
        let local = if span > 0.0 { (target - before) / span } else { 0.0 };
        ((i - 1) as f64 + local) / ARC_DIVISIONS as f64
    }

    /// Point reached after travelling `fraction` of the total arc length.
    pub fn point_at(&self, fraction: f64) -> Vec3 {
        self.point(self.parameter_at_fraction(fraction))
    }

    pub fn tangent_at(&self, fraction: f64) -> Vec3 {
        self.tangent(self.parameter_at_fraction(fraction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn zigzag() -> CatmullRomCurve {
        CatmullRomCurve::new(vec![
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.5, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-0.5, -1.0, 0.0),
            Vec3::new(0.0, -1.5, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_fewer_than_two_points() {
        assert!(CatmullRomCurve::new(vec![]).is_none());
        assert!(CatmullRomCurve::new(vec![Vec3::ZERO]).is_none());
    }

    #[test]
    fn passes_through_every_control_point() {
        let curve = zigzag();
        let last = curve.points().len() - 1;
        for (i, expected) in curve.points().iter().enumerate() {
            let p = curve.point(i as f64 / last as f64);
            assert_abs_diff_eq!(p.x, expected.x, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, expected.y, epsilon = 1e-9);
            assert_abs_diff_eq!(p.z, expected.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn two_point_curve_is_a_straight_line() {
        let curve = CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)]).unwrap();
        assert_abs_diff_eq!(curve.length(), 5.0, epsilon = 1e-6);
        let mid = curve.point_at(0.5);
        assert_abs_diff_eq!(mid.x, 1.5, epsilon = 1e-3);
        assert_abs_diff_eq!(mid.y, 2.0, epsilon = 1e-3);
        let tangent = curve.tangent_at(0.5);
        assert_abs_diff_eq!(tangent.x, 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(tangent.y, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn arc_fraction_parameter_is_monotonic_and_bounded() {
        let curve = zigzag();
        assert_eq!(curve.parameter_at_fraction(-1.0), 0.0);
        assert_eq!(curve.parameter_at_fraction(2.0), 1.0);
        let mut previous = 0.0;
        for step in 1..=50 {
            let t = curve.parameter_at_fraction(step as f64 / 50.0);
            assert!(t >= previous);
            previous = t;
        }
        assert_abs_diff_eq!(previous, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn half_arc_length_splits_the_curve_evenly() {
        let curve = zigzag();
        let t = curve.parameter_at_fraction(0.5);
        let steps = 400;
        let mut first_half = 0.0;
        let mut last = curve.point(0.0);
        for i in 1..=steps {
            let p = curve.point(t * i as f64 / steps as f64);
            first_half += p.distance(last);
            last = p;
        }
        assert_abs_diff_eq!(first_half / curve.length(), 0.5, epsilon = 0.01);
    }
}
