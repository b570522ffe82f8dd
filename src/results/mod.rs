pub mod ank;
pub mod hours;
pub mod week;

pub use week::{bucket_by_week, WeekBucket};
