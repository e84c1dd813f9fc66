// Team stat aggregation and rotisserie category ranking.

pub mod aggregate;
pub mod category;
pub mod ranking;
