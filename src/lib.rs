pub mod codec;
pub mod error;
pub mod logger;
pub mod percentile;
pub mod progbase;
pub mod sample;
pub mod signal;
pub mod sliding_percentile;
pub mod sorted_window;

pub use error::PercentileError;
pub use percentile::{median_rank, rank_for_percentile, running_percentile, running_percentile_into};
pub use sample::Sample;
pub use signal::{ElementType, Signal};
pub use sliding_percentile::SlidingPercentile;
pub use sorted_window::SortedWindow;
