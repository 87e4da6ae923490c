use nalgebra as na;
use serde_derive::Serialize;

use crate::moments::Moments;
use crate::rect::Rect;

/// Ellipse with the same second-order moments as a weight map.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: na::Point2<f64>,
    pub major_axis: f64,
    pub minor_axis: f64,
    /// Radians, counter-clockwise as seen on screen (rows growing downwards),
    /// within `[-pi/2, pi/2]`.
    pub orientation: f64,
}

impl Ellipse {
    /// Fits an ellipse to moments taken over a crop whose top-left pixel sits
    /// at `origin` in image coordinates.
    pub fn fit(m: &Moments, origin: (i32, i32)) -> Self {
        let m00 = m.m00 + f64::EPSILON;
        let (mx, my) = (m.m10 / m00, m.m01 / m00);

        let uxx = m.m20 / m00 - mx * mx;
        let uyy = m.m02 / m00 - my * my;
        // negated so that the angle runs counter-clockwise
        let uxy = -m.m11 / m00 + (m.m10 * m.m01) / (m00 * m00);

        let common = ((uxx - uyy).powi(2) + 4.0 * uxy * uxy).sqrt();
        let scale = 2.0 * std::f64::consts::SQRT_2;
        let major_axis = scale * (uxx + uyy + common).max(0.0).sqrt();
        let minor_axis = scale * (uxx + uyy - common).max(0.0).sqrt();

        Self {
            center: na::Point2::new(origin.0 as f64 + mx, origin.1 as f64 + my),
            major_axis,
            minor_axis,
            orientation: orientation(uxx, uyy, uxy),
        }
    }

    /// Width and height of the axis-aligned box spanned by the rotated axes.
    pub fn footprint(&self) -> (f64, f64) {
        let (sin, cos) = self.orientation.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());

        let width = (self.major_axis * cos).max(self.minor_axis * sin);
        let height = (self.major_axis * sin).max(self.minor_axis * cos);

        (width, height)
    }

    /// Integer box of the footprint, centered on the ellipse. Not clipped.
    pub fn bounding_box(&self) -> Rect {
        let (w, h) = self.footprint();

        Rect::centered_at(self.center, w.round() as u32, h.round() as u32)
    }
}

fn orientation(uxx: f64, uyy: f64, uxy: f64) -> f64 {
    let (num, den) = if uyy > uxx {
        (
            uyy - uxx + ((uyy - uxx).powi(2) + 4.0 * uxy * uxy).sqrt(),
            2.0 * uxy,
        )
    } else {
        (
            2.0 * uxy,
            uxx - uyy + ((uxx - uyy).powi(2) + 4.0 * uxy * uxy).sqrt(),
        )
    };

    if num == 0.0 && den == 0.0 {
        0.0
    } else {
        (num / den).atan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::prelude::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

    /// Filled ellipse rotated by `angle` counter-clockwise on screen.
    fn render(dims: (usize, usize), center: (f64, f64), axes: (f64, f64), angle: f64) -> Array2<f32> {
        let (sin, cos) = angle.sin_cos();

        Array2::from_shape_fn((dims.1, dims.0), |(r, c)| {
            let dx = c as f64 - center.0;
            let dy = center.1 - r as f64;
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;

            if (u / axes.0).powi(2) + (v / axes.1).powi(2) <= 1.0 {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn test_axis_aligned() {
        let p = render((100, 100), (50.0, 40.0), (30.0, 10.0), 0.0);
        let e = Ellipse::fit(&Moments::compute(p.view()), (0, 0));

        assert_abs_diff_eq!(e.orientation, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(e.center.x, 50.0, epsilon = 1e-6);
        assert_abs_diff_eq!(e.center.y, 40.0, epsilon = 1e-6);
        // full axis lengths, up to pixelation
        assert_abs_diff_eq!(e.major_axis, 60.0, epsilon = 1.0);
        assert_abs_diff_eq!(e.minor_axis, 20.0, epsilon = 1.0);

        let bbox = e.bounding_box();
        assert_abs_diff_eq!(bbox.width as f64, 60.0, epsilon = 1.0);
        assert_abs_diff_eq!(bbox.height as f64, 20.0, epsilon = 1.0);
    }

    #[test]
    fn test_rotated() {
        for &angle in [FRAC_PI_6, FRAC_PI_4, -FRAC_PI_6, 1.3, -1.3].iter() {
            let p = render((120, 120), (60.0, 60.0), (30.0, 12.0), angle);
            let e = Ellipse::fit(&Moments::compute(p.view()), (5, 7));

            assert!(e.orientation.abs() <= FRAC_PI_2);
            assert_abs_diff_eq!(e.orientation, angle, epsilon = 0.02);
            assert_abs_diff_eq!(e.center.x, 65.0, epsilon = 0.1);
            assert_abs_diff_eq!(e.center.y, 67.0, epsilon = 0.1);
        }
    }

    #[test]
    fn test_vertical_is_half_pi() {
        let p = render((80, 80), (40.0, 40.0), (25.0, 8.0), FRAC_PI_2);
        let e = Ellipse::fit(&Moments::compute(p.view()), (0, 0));

        assert_abs_diff_eq!(e.orientation.abs(), FRAC_PI_2, epsilon = 1e-6);
        let (w, h) = e.footprint();
        assert!(h > w);
    }

    #[test]
    fn test_empty_moments_degenerate_to_point() {
        let e = Ellipse::fit(&Moments::default(), (3, 4));

        assert_eq!(e.orientation, 0.0);
        assert_eq!(e.major_axis, 0.0);
        assert_eq!(e.minor_axis, 0.0);
        assert_eq!(e.center, na::Point2::new(3.0, 4.0));
        assert_eq!(e.bounding_box().area(), 0);
    }

    #[test]
    fn test_footprint_projects_axes() {
        let e = Ellipse {
            center: na::Point2::new(0.0, 0.0),
            major_axis: 20.0,
            minor_axis: 10.0,
            orientation: FRAC_PI_6,
        };

        let (w, h) = e.footprint();
        assert_abs_diff_eq!(w, 20.0 * FRAC_PI_6.cos(), epsilon = 1e-9);
        assert_abs_diff_eq!(h, 20.0 * FRAC_PI_6.sin(), epsilon = 1e-9);
    }
}
