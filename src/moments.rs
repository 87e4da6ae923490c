use nalgebra as na;
use ndarray::prelude::*;

/// Raw spatial moments used by the tracker. `Mpq` weights each sample by
/// `x^p * y^q`, with `x` the column and `y` the row inside the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    M00,
    M10,
    M01,
    M11,
    M20,
    M02,
}

impl Moment {
    pub const ALL: [Moment; 6] = [
        Moment::M00,
        Moment::M10,
        Moment::M01,
        Moment::M11,
        Moment::M20,
        Moment::M02,
    ];

    #[inline]
    fn weight(self, x: f64, y: f64) -> f64 {
        match self {
            Moment::M00 => 1.0,
            Moment::M10 => x,
            Moment::M01 => y,
            Moment::M11 => x * y,
            Moment::M20 => x * x,
            Moment::M02 => y * y,
        }
    }
}

/// Single moment of a weight map.
pub fn moment(view: ArrayView2<'_, f32>, which: Moment) -> f64 {
    view.indexed_iter()
        .map(|((row, col), &p)| which.weight(col as f64, row as f64) * p as f64)
        .sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m11: f64,
    pub m20: f64,
    pub m02: f64,
}

impl Moments {
    /// Zeroth and first order moments only, the rest are left at zero.
    pub fn first_order(view: ArrayView2<'_, f32>) -> Self {
        let mut m = Moments::default();

        for ((row, col), &p) in view.indexed_iter() {
            let p = p as f64;
            m.m00 += p;
            m.m10 += col as f64 * p;
            m.m01 += row as f64 * p;
        }

        m
    }

    /// All six moments in one pass.
    pub fn compute(view: ArrayView2<'_, f32>) -> Self {
        let mut m = Moments::default();

        for ((row, col), &p) in view.indexed_iter() {
            let (x, y, p) = (col as f64, row as f64, p as f64);
            let (px, py) = (x * p, y * p);

            m.m00 += p;
            m.m10 += px;
            m.m01 += py;
            m.m11 += x * py;
            m.m20 += x * px;
            m.m02 += y * py;
        }

        m
    }

    #[inline]
    pub fn get(&self, which: Moment) -> f64 {
        match which {
            Moment::M00 => self.m00,
            Moment::M10 => self.m10,
            Moment::M01 => self.m01,
            Moment::M11 => self.m11,
            Moment::M20 => self.m20,
            Moment::M02 => self.m02,
        }
    }

    /// Weighted mean position, local to the crop. `None` for zero mass.
    #[inline]
    pub fn centroid(&self) -> Option<na::Point2<f64>> {
        if self.m00 > 0.0 {
            Some(na::Point2::new(self.m10 / self.m00, self.m01 / self.m00))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> Array2<f32> {
        array![[0.0, 1.0, 0.0], [0.5, 1.0, 0.0], [0.0, 0.0, 2.0]]
    }

    #[test]
    fn test_known_moments() {
        let p = sample();
        let m = Moments::compute(p.view());

        assert_abs_diff_eq!(m.m00, 4.5);
        // x: 1*1 + 0*0.5 + 1*1 + 2*2
        assert_abs_diff_eq!(m.m10, 6.0);
        // y: 0*1 + 1*0.5 + 1*1 + 2*2
        assert_abs_diff_eq!(m.m01, 5.5);
        assert_abs_diff_eq!(m.m11, 1.0 + 8.0);
        assert_abs_diff_eq!(m.m20, 1.0 + 1.0 + 8.0);
        assert_abs_diff_eq!(m.m02, 0.5 + 1.0 + 8.0);
    }

    #[test]
    fn test_single_moments_match_one_pass() {
        let p = sample();
        let all = Moments::compute(p.view());

        for which in Moment::ALL.iter().copied() {
            assert_abs_diff_eq!(moment(p.view(), which), all.get(which), epsilon = 1e-12);
        }

        let first = Moments::first_order(p.view());
        assert_abs_diff_eq!(first.m10, all.m10);
        assert_abs_diff_eq!(first.m11, 0.0);
    }

    #[test]
    fn test_centroid() {
        let p = Array2::<f32>::zeros((4, 4));
        assert_eq!(Moments::compute(p.view()).centroid(), None);

        let mut p = Array2::<f32>::zeros((5, 7));
        p[[3, 2]] = 0.7;
        let c = Moments::first_order(p.view()).centroid().unwrap();
        assert_abs_diff_eq!(c.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 3.0, epsilon = 1e-12);
    }
}
