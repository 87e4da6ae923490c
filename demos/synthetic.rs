use camshift::{HistogramTracker, Rect, TrackerConfig};
use log::{info, warn};
use ndarray::prelude::*;

const WIDTH: usize = 320;
const HEIGHT: usize = 240;
const FRAMES: usize = 60;

/// Hue-like plane with a rotating ellipse drifting over a noisy background.
fn render(idx: usize) -> (Array2<u8>, (f64, f64), f64) {
    let t = idx as f64;
    let center = (60.0 + 3.0 * t, 120.0 + 40.0 * (t / 12.0).sin());
    let angle = 0.3 + 0.02 * t;
    let (sin, cos) = angle.sin_cos();

    let frame = Array2::from_shape_fn((HEIGHT, WIDTH), |(r, c)| {
        let dx = c as f64 - center.0;
        let dy = center.1 - r as f64;
        let u = dx * cos + dy * sin;
        let v = -dx * sin + dy * cos;

        if (u / 28.0).powi(2) + (v / 14.0).powi(2) <= 1.0 {
            190 + ((r * 7 + c * 3) % 9) as u8
        } else {
            30 + ((r * 13 + c * 5) % 40) as u8
        }
    });

    (frame, center, angle)
}

fn around(center: (f64, f64), width: u32, height: u32) -> Rect {
    Rect::centered_at(nalgebra::Point2::new(center.0, center.1), width, height)
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => TrackerConfig::default(),
    };

    let mut tracker = HistogramTracker::with_config(config)?;

    let (first, center, _) = render(0);
    tracker.initialize_object(first.view(), around(center, 8, 8))?;
    tracker.seed_window(around(center, 60, 50))?;

    for idx in 1..FRAMES {
        let (frame, center, angle) = render(idx);
        let res = tracker.track(frame.view())?;

        if res.score < 0.3 {
            warn!("frame {}: object lost (score {:.2}), reseeding", idx, res.score);
            tracker.seed_window(around(center, 60, 50))?;
            continue;
        }

        info!(
            "frame {}: truth ({:.1}, {:.1}) {:.2} rad",
            idx, center.0, center.1, angle
        );
        println!("{}", serde_json::to_string(&res)?);
    }

    Ok(())
}
