pub mod ai;
pub mod assistant;
pub mod consultation;
pub mod lifestyle;
pub mod products;
pub mod report_analysis;
