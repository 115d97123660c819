pub mod random_sampling;
pub mod selector;
pub mod sizer;
pub mod stats;
pub mod three_day_trend;

pub use random_sampling::RandomSamplingStrategy;
pub use selector::{select_candidates, MAX_CANDIDATES_PER_SIDE};
pub use sizer::{size_buy, size_sell, MIN_ASK, MIN_BID, MIN_QTY};
pub use stats::{trend_stats, DayAverage, TrendSignal, TrendStats, TREND_DAYS};
pub use three_day_trend::ThreeDayTrendStrategy;
