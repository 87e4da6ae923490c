use log::trace;
use nalgebra as na;
use ndarray::prelude::*;

use crate::moments::Moments;
use crate::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanShift {
    /// Final window, zero-sized when the searched region held no mass.
    pub window: Rect,
    pub iterations: usize,
    pub converged: bool,
}

/// Moves a fixed-size `window` over the weight `map` towards the local
/// centroid of mass until the shift drops below `max_step` or `max_iterations`
/// is reached. The window is clipped to the map after every shift.
pub fn mean_shift(
    map: ArrayView2<'_, f32>,
    window: Rect,
    max_iterations: usize,
    max_step: f64,
) -> MeanShift {
    let dims = (map.ncols(), map.nrows());
    let mut window = window.clip(dims);

    for iter in 0..max_iterations {
        if window.is_empty() {
            return MeanShift {
                window,
                iterations: iter,
                converged: false,
            };
        }

        let (rows, cols) = window.slice_bounds();
        let moments = Moments::first_order(map.slice(s![rows, cols]));

        let local = match moments.centroid() {
            Some(c) => c,
            None => {
                trace!("mean-shift: no mass in {:?}", window);

                return MeanShift {
                    window: Rect::point(window.x, window.y),
                    iterations: iter + 1,
                    converged: false,
                };
            }
        };

        let prev = window.center();
        let center = na::Point2::new(window.x as f64 + local.x, window.y as f64 + local.y);
        window = Rect::centered_at(center, window.width, window.height).clip(dims);

        let step = na::distance(&prev, &center);
        trace!("mean-shift #{}: {:?} step {:.3}", iter, window, step);

        if step < max_step {
            return MeanShift {
                window,
                iterations: iter + 1,
                converged: true,
            };
        }
    }

    MeanShift {
        window,
        iterations: max_iterations,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(dims: (usize, usize), center: (usize, usize), half: usize) -> Array2<f32> {
        Array2::from_shape_fn((dims.1, dims.0), |(r, c)| {
            let inside = r + half >= center.1
                && r <= center.1 + half
                && c + half >= center.0
                && c <= center.0 + half;

            if inside {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn test_converges_on_blob_centroid() {
        let map = blob((80, 80), (40, 40), 5);
        let res = mean_shift(map.view(), Rect::new(25, 25, 21, 21), 20, 0.5);

        assert!(res.converged);
        assert!(res.iterations <= 20);
        assert_eq!(res.window.width, 21);
        assert_eq!(res.window.height, 21);

        let d = na::distance(&res.window.center(), &na::Point2::new(40.0, 40.0));
        assert!(d < 0.5, "center {:?}", res.window.center());
    }

    #[test]
    fn test_iteration_bound() {
        // a ramp keeps pulling the window right until it hits the border
        let map = Array2::from_shape_fn((20, 200), |(_, c)| c as f32);

        for max in 1..5 {
            let res = mean_shift(map.view(), Rect::new(0, 0, 10, 20), max, 0.5);
            assert_eq!(res.iterations, max);
            assert!(!res.converged);
        }
    }

    #[test]
    fn test_zero_mass_collapses() {
        let map = blob((50, 50), (40, 40), 2);
        let res = mean_shift(map.view(), Rect::new(2, 3, 10, 10), 20, 0.5);

        assert_eq!(res.window, Rect::point(2, 3));
        assert_eq!(res.iterations, 1);
        assert!(!res.converged);
    }

    #[test]
    fn test_window_outside_map() {
        let map = blob((50, 50), (25, 25), 2);
        let res = mean_shift(map.view(), Rect::new(60, 60, 10, 10), 20, 0.5);

        assert!(res.window.is_empty());
        assert_eq!(res.iterations, 0);
    }
}
