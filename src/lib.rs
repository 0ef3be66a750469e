pub mod chart;
pub mod error;
pub mod pipeline;
pub mod table;