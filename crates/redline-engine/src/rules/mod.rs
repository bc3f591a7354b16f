//! Static rule tables: clause categories and high-risk phrase patterns

pub mod clause_categories;
pub mod risk_patterns;
