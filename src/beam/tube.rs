use super::curve::CatmullRomCurve;
use super::geometry::Vec3;

/// Wireframe tube swept along a curve.
///
/// Rings are placed at arc-length uniform stations, so revealing the first `k`
/// of `tubular_segments` segments shows exactly `k / tubular_segments` of the
/// curve's length.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeMesh {
    rings: Vec<Vec<Vec3>>,
    draw_range: usize,
}

impl TubeMesh {
    pub fn new(
        curve: &CatmullRomCurve,
        tubular_segments: usize,
        radius: f64,
        radial_segments: usize,
    ) -> Self {
        let tubular_segments = tubular_segments.max(1);
        let radial_segments = radial_segments.max(3);

        let mut rings = Vec::with_capacity(tubular_segments + 1);
        let mut normal: Option<Vec3> = None;
        for i in 0..=tubular_segments {
            let fraction = i as f64 / tubular_segments as f64;
            let center = curve.point_at(fraction);
            let tangent = curve.tangent_at(fraction);

            // Parallel transport: carry the previous normal over and strip
            // whatever now points along the tangent.
            let carried = normal.unwrap_or_else(|| initial_normal(tangent));
            let n = (carried - tangent * carried.dot(tangent))
                .try_normalize()
                .unwrap_or_else(|| initial_normal(tangent));
            let b = tangent.cross(n);
            normal = Some(n);

            let ring = (0..radial_segments)
                .map(|j| {
                    let theta = j as f64 / radial_segments as f64 * std::f64::consts::TAU;
                    let (sin, cos) = theta.sin_cos();
                    center + (n * cos + b * sin) * radius
                })
                .collect();
            rings.push(ring);
        }

        Self { rings, draw_range: 0 }
    }

    pub fn tubular_segments(&self) -> usize {
        self.rings.len() - 1
    }

    pub fn radial_segments(&self) -> usize {
        self.rings.first().map_or(0, Vec::len)
    }

    #[cfg(test)]
    pub fn draw_range(&self) -> usize {
        self.draw_range
    }

    /// Shows the leading `fraction` of the tube's length.
    pub fn set_reveal(&mut self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        self.draw_range = (fraction * self.tubular_segments() as f64).round() as usize;
    }

    /// Edges of the visible segments: along the tube, around each ring, and
    /// one diagonal per quad.
    pub fn visible_edges(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        let radial = self.radial_segments();
        (0..self.draw_range).flat_map(move |i| {
            let ring = &self.rings[i];
            let next_ring = &self.rings[i + 1];
            (0..radial).flat_map(move |j| {
                let k = (j + 1) % radial;
                let mut edges = vec![
                    (ring[j], next_ring[j]),
                    (next_ring[j], next_ring[k]),
                    (ring[j], next_ring[k]),
                ];
                if i == 0 {
                    edges.push((ring[j], ring[k]));
                }
                edges
            })
        })
    }
}

fn initial_normal(tangent: Vec3) -> Vec3 {
    // Pick the axis least aligned with the tangent.
    let axis = if tangent.z.abs() < 0.9 { Vec3::Z } else { Vec3::X };
    tangent
        .cross(axis)
        .try_normalize()
        .unwrap_or(Vec3::Y)
}
