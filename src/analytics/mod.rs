pub mod health_score;
pub mod insights;
pub mod scoring;
