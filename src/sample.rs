use std::cmp::Ordering;
use std::fmt::Debug;

/// Element type a running percentile can be computed over.
///
/// `order` must be a total order. Floats use `total_cmp`, so a NaN never
/// aborts the computation: negative NaNs sort below `-inf`, positive NaNs
/// above `+inf`, and `-0.0` sorts just below `0.0`.
pub trait Sample: Copy + PartialEq + Debug + Send + Sync + 'static {
    fn order(&self, other: &Self) -> Ordering;
}

macro_rules! impl_sample_float {
    ($($type:ty),* $(,)?) => {
        $(
            impl Sample for $type {
                #[inline]
                fn order(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }
            }
        )*
    };
}

macro_rules! impl_sample_ord {
    ($($type:ty),* $(,)?) => {
        $(
            impl Sample for $type {
                #[inline]
                fn order(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

impl_sample_float!(f32, f64);
// bool orders as false < true, i.e. as 0/1.
impl_sample_ord!(bool, i8, i16, i32, i64, u8, u16, u32, u64);
