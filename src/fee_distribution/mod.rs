mod domain;
mod fee_distribution;

pub use domain::*;
pub use fee_distribution::*;
