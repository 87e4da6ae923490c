use num_traits::{Bounded, ToPrimitive};
use std::fmt;

/// Element kinds a frame may carry.
///
/// Every supported kind maps its values onto `[0, 1]` by the full
/// representable range of the type: integers by `[MIN, MAX]`, floats are
/// expected to already lie in `[0, 1]`.
pub trait Pixel: Copy + Send + Sync + fmt::Debug + 'static {
    const KIND: &'static str;

    /// Position of the value within the type's range, `None` if the value is
    /// not a valid sample of this kind.
    fn unit(self) -> Option<f64>;

    /// Histogram bin of this value for `num_bins` bins centered on equally
    /// spaced points of the range.
    #[inline]
    fn bin(self, num_bins: usize) -> Option<usize> {
        let u = self.unit()?;
        let last = num_bins.checked_sub(1)?;
        let idx = (u * last as f64 + 0.5).floor() as usize;

        Some(idx.min(last))
    }
}

#[inline]
fn int_unit<T: Bounded + ToPrimitive>(v: T) -> Option<f64> {
    let lo = T::min_value().to_f64()?;
    let hi = T::max_value().to_f64()?;

    Some((v.to_f64()? - lo) / (hi - lo))
}

macro_rules! int_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                const KIND: &'static str = stringify!($t);

                #[inline]
                fn unit(self) -> Option<f64> {
                    int_unit(self)
                }
            }
        )*
    };
}

int_pixel!(u8, u16, i16);

impl Pixel for f32 {
    const KIND: &'static str = "f32";

    #[inline]
    fn unit(self) -> Option<f64> {
        (self as f64).unit()
    }
}

impl Pixel for f64 {
    const KIND: &'static str = "f64";

    #[inline]
    fn unit(self) -> Option<f64> {
        if (0.0..=1.0).contains(&self) {
            Some(self)
        } else {
            None
        }
    }
}
