pub mod analysis;
pub mod confidence;
pub mod contract;
pub mod input;
pub mod plan;
pub mod route;
pub mod valuation;
