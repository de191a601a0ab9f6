use std::fmt;

/// Block whose fee distribution is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeTarget {
    /// A confirmed block, by chain height.
    Height(u64),
    /// A projected block, by position (0 = next block).
    Projected(usize),
}

impl fmt::Display for FeeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeTarget::Height(height) => write!(f, "#{}", height),
            FeeTarget::Projected(index) => write!(f, "(projected {})", index),
        }
    }
}
