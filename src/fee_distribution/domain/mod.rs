mod distribution;
mod fee_sample;
mod fee_stats;
mod fee_target;

pub use distribution::*;
pub use fee_sample::*;
pub use fee_stats::*;
pub use fee_target::*;
