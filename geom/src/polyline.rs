use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D, Pt3D};

/// An ordered sequence of points, interpreted as a piecewise-linear path. Unlike most polylines,
/// a single point (or a run of identical points) is allowed; map data has degenerate lines, and
/// resampling has a well-defined answer for them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyLine {
    pts: Vec<Pt3D>,
}

/// How to measure arc length along a polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Metric {
    Spatial,
    /// Ignore elevation.
    Planar,
}

impl PolyLine {
    pub fn new(pts: Vec<Pt3D>) -> Result<PolyLine> {
        if pts.is_empty() {
            bail!("Can't make a PolyLine with no points");
        }
        if let Some(pt) = pts.iter().find(|pt| !pt.is_finite()) {
            bail!("PolyLine has a non-finite point {}", pt);
        }
        Ok(PolyLine { pts })
    }

    pub fn points(&self) -> &Vec<Pt3D> {
        &self.pts
    }

    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    pub fn first_pt(&self) -> Pt3D {
        self.pts[0]
    }

    pub fn last_pt(&self) -> Pt3D {
        self.pts[self.pts.len() - 1]
    }

    /// The mean of all points, ignoring elevation.
    pub fn planar_center(&self) -> Pt2D {
        let pts: Vec<Pt2D> = self.pts.iter().map(|pt| pt.to_2d()).collect();
        // There's always at least one point
        Pt2D::center(&pts).unwrap_or_else(|| self.first_pt().to_2d())
    }

    /// Redistributes points every `spacing` along the 3D arc length, starting from the first
    /// point. The last point is always kept, so the final gap may be shorter than `spacing`. The
    /// number of points depends on the length.
    pub fn resample_with_spacing(&self, spacing: Distance) -> Result<PolyLine> {
        if spacing <= Distance::ZERO {
            bail!("Can't resample with spacing {}", spacing);
        }
        let step = spacing.inner_meters();
        let cumulative = self.cumulative(Metric::Spatial);
        let total = cumulative[cumulative.len() - 1];

        let mut pts = Vec::new();
        let mut i = 0;
        loop {
            let dist = (i as f64) * step;
            if dist >= total {
                break;
            }
            pts.push(self.pt_at(&cumulative, dist));
            i += 1;
        }
        pts.push(self.pt_at(&cumulative, total));

        if !pts[0].approx_eq(self.first_pt()) {
            pts.insert(0, self.first_pt());
        }
        if !pts[pts.len() - 1].approx_eq(self.last_pt()) {
            pts.push(self.last_pt());
        }
        PolyLine::new(pts)
    }

    /// Returns exactly `count` points, evenly spaced along the arc length measured in the plane.
    /// The first and last points are exactly the original endpoints. A polyline with no planar
    /// length collapses to copies of its first point, still ending on the original last point.
    pub fn resample_to_count(&self, count: usize) -> Result<PolyLine> {
        if count < 2 {
            bail!("Can't resample a PolyLine to {} points", count);
        }
        let cumulative = self.cumulative(Metric::Planar);
        let total = cumulative[cumulative.len() - 1];

        let mut pts = if total > 0.0 {
            let denom = (count - 1) as f64;
            (0..count)
                .map(|i| self.pt_at(&cumulative, total * (i as f64) / denom))
                .collect::<Vec<_>>()
        } else {
            vec![self.first_pt(); count]
        };
        pts[0] = self.first_pt();
        pts[count - 1] = self.last_pt();
        PolyLine::new(pts)
    }

    /// The running arc length at each vertex. Always starts with 0 and has one entry per point.
    fn cumulative(&self, metric: Metric) -> Vec<f64> {
        let mut result = Vec::with_capacity(self.pts.len());
        let mut so_far = 0.0;
        result.push(so_far);
        for pair in self.pts.windows(2) {
            let dist = match metric {
                Metric::Spatial => pair[0].dist_to(pair[1]),
                Metric::Planar => pair[0].planar_dist_to(pair[1]),
            };
            so_far += dist.inner_meters();
            result.push(so_far);
        }
        result
    }

    /// Linearly interpolates the point `dist` along the path. Zero-length pieces are skipped, so
    /// this never divides by zero. Out-of-range distances clamp to the endpoints.
    fn pt_at(&self, cumulative: &[f64], dist: f64) -> Pt3D {
        // The first vertex strictly past dist
        let idx = cumulative.partition_point(|d| *d <= dist);
        if idx == 0 {
            return self.first_pt();
        }
        if idx >= self.pts.len() {
            return self.last_pt();
        }
        // cumulative[idx - 1] <= dist < cumulative[idx], so the piece has positive length
        let (d1, d2) = (cumulative[idx - 1], cumulative[idx]);
        self.pts[idx - 1].lerp(self.pts[idx], (dist - d1) / (d2 - d1))
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn line(pts: Vec<(f64, f64, f64)>) -> PolyLine {
        PolyLine::new(pts.into_iter().map(|(x, y, z)| Pt3D::new(x, y, z)).collect()).unwrap()
    }

    fn random_polyline(rng: &mut XorShiftRng) -> PolyLine {
        let n = rng.gen_range(2..30);
        let mut pts = Vec::new();
        for _ in 0..n {
            pts.push(Pt3D::new(
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-5.0..5.0),
            ));
        }
        // Sprinkle in a repeated vertex now and then
        if rng.gen_bool(0.3) {
            let idx = rng.gen_range(0..pts.len());
            pts.insert(idx, pts[idx]);
        }
        PolyLine::new(pts).unwrap()
    }

    #[test]
    fn rejects_empty() {
        assert!(PolyLine::new(Vec::new()).is_err());
        assert!(PolyLine::new(vec![Pt3D::new(f64::NAN, 0.0, 0.0)]).is_err());
    }

    #[test]
    fn count_and_endpoints_hold_for_random_lines() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        for _ in 0..200 {
            let pl = random_polyline(&mut rng);
            for count in [2, 3, 20, 57] {
                let resampled = pl.resample_to_count(count).unwrap();
                assert_eq!(resampled.num_points(), count);
                assert_eq!(resampled.first_pt(), pl.first_pt());
                assert_eq!(resampled.last_pt(), pl.last_pt());
                assert!(resampled.points().iter().all(|pt| pt.is_finite()));
            }
        }
    }

    #[test]
    fn count_resampling_is_evenly_spaced() {
        let pl = line(vec![(0.0, 0.0, 0.0), (10.0, 0.0, 0.0), (10.0, 9.0, 0.0)]);
        let resampled = pl.resample_to_count(20).unwrap();
        for pair in resampled.points().windows(2) {
            assert!((pair[0].dist_to(pair[1]).inner_meters() - 1.0).abs() < 1e-9);
        }
        assert_eq!(resampled.points()[10], Pt3D::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn count_resampling_interpolates_elevation_along_the_plane() {
        let pl = line(vec![(0.0, 0.0, 0.0), (4.0, 0.0, 2.0)]);
        let resampled = pl.resample_to_count(3).unwrap();
        assert_eq!(resampled.points()[1], Pt3D::new(2.0, 0.0, 1.0));
    }

    #[test]
    fn degenerate_input_replicates_the_point() {
        let pt = Pt3D::new(3.5, -1.25, 7.0);
        for pl in [
            PolyLine::new(vec![pt]).unwrap(),
            PolyLine::new(vec![pt, pt, pt]).unwrap(),
        ] {
            let resampled = pl.resample_to_count(20).unwrap();
            assert_eq!(resampled.points(), &vec![pt; 20]);

            let spaced = pl.resample_with_spacing(Distance::meters(0.5)).unwrap();
            assert_eq!(spaced.points(), &vec![pt]);
        }
    }

    #[test]
    fn count_must_cover_both_endpoints() {
        let pl = line(vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        assert!(pl.resample_to_count(1).is_err());
        assert!(pl.resample_to_count(0).is_err());
    }

    #[test]
    fn spacing_resampling() {
        let pl = line(vec![(0.0, 0.0, 0.0), (1.2, 0.0, 0.0)]);
        let spaced = pl.resample_with_spacing(Distance::meters(0.5)).unwrap();
        assert_eq!(spaced.num_points(), 4);
        for (pt, x) in spaced.points().iter().zip([0.0, 0.5, 1.0, 1.2]) {
            assert!((pt.x - x).abs() < 1e-12);
        }
        assert_eq!(spaced.last_pt(), pl.last_pt());

        // An exact multiple doesn't duplicate the final point
        let pl = line(vec![(0.0, 0.0, 0.0), (0.0, 1.0, 0.0)]);
        let spaced = pl.resample_with_spacing(Distance::meters(0.5)).unwrap();
        let ys: Vec<f64> = spaced.points().iter().map(|pt| pt.y).collect();
        assert_eq!(ys, vec![0.0, 0.5, 1.0]);

        assert!(pl.resample_with_spacing(Distance::ZERO).is_err());
    }

    #[test]
    fn spacing_then_count_keeps_endpoints() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..50 {
            let pl = random_polyline(&mut rng);
            let spaced = pl.resample_with_spacing(Distance::meters(0.5)).unwrap();
            assert_eq!(spaced.first_pt(), pl.first_pt());
            assert_eq!(spaced.last_pt(), pl.last_pt());
            let fixed = spaced.resample_to_count(20).unwrap();
            assert_eq!(fixed.first_pt(), pl.first_pt());
            assert_eq!(fixed.last_pt(), pl.last_pt());
        }
    }

    #[test]
    fn center_ignores_elevation() {
        let pl = line(vec![(0.0, 0.0, 0.0), (3.0, 4.0, 12.0)]);
        assert_eq!(pl.planar_center(), Pt2D::new(1.5, 2.0));
        let spaced = pl.resample_with_spacing(Distance::meters(0.5)).unwrap();
        // 13m in 3D
        assert_eq!(spaced.num_points(), 27);
    }
}
