pub mod categories;
pub mod criteria;
pub mod interpretation;
pub mod thresholds;
