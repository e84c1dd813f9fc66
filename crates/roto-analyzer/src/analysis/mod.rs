// Per-team analysis built on top of the league standings.

pub mod free_agents;
pub mod recommend;
pub mod team;

pub use recommend::{generate_recommendations, NeedArea, Recommendation};
pub use team::{analyze_team, AnalysisError, TeamAnalysis, TradePartner};
