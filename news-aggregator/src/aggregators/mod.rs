pub mod day_bucket;

pub use day_bucket::{order_by_day, shuffled_copy};
