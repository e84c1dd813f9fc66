// Scoring categories for the 6x5 rotisserie format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of the scoring table a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryGroup {
    Batting,
    Pitching,
}

/// A scored statistic that teams are ranked on.
///
/// Variant order is the canonical display order and is also the tie-break
/// order when two categories share the same rank for a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Runs,
    HomeRuns,
    Rbi,
    StolenBases,
    Avg,
    Ops,
    Era,
    Whip,
    K9,
    QualityStarts,
    Saves,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 11] = [
        Category::Runs,
        Category::HomeRuns,
        Category::Rbi,
        Category::StolenBases,
        Category::Avg,
        Category::Ops,
        Category::Era,
        Category::Whip,
        Category::K9,
        Category::QualityStarts,
        Category::Saves,
    ];

    pub const BATTING: [Category; 6] = [
        Category::Runs,
        Category::HomeRuns,
        Category::Rbi,
        Category::StolenBases,
        Category::Avg,
        Category::Ops,
    ];

    pub const PITCHING: [Category; 5] = [
        Category::Era,
        Category::Whip,
        Category::K9,
        Category::QualityStarts,
        Category::Saves,
    ];

    /// Short column code used in CSV headers and report tables.
    pub fn code(&self) -> &'static str {
        match self {
            Category::Runs => "R",
            Category::HomeRuns => "HR",
            Category::Rbi => "RBI",
            Category::StolenBases => "SB",
            Category::Avg => "AVG",
            Category::Ops => "OPS",
            Category::Era => "ERA",
            Category::Whip => "WHIP",
            Category::K9 => "K9",
            Category::QualityStarts => "QS",
            Category::Saves => "SV",
        }
    }

    pub fn group(&self) -> CategoryGroup {
        match self {
            Category::Runs
            | Category::HomeRuns
            | Category::Rbi
            | Category::StolenBases
            | Category::Avg
            | Category::Ops => CategoryGroup::Batting,
            Category::Era
            | Category::Whip
            | Category::K9
            | Category::QualityStarts
            | Category::Saves => CategoryGroup::Pitching,
        }
    }

    pub fn is_batting(&self) -> bool {
        self.group() == CategoryGroup::Batting
    }

    pub fn is_pitching(&self) -> bool {
        self.group() == CategoryGroup::Pitching
    }

    /// ERA and WHIP are the only categories where a smaller value wins.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, Category::Era | Category::Whip)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batting_and_pitching_partition_all() {
        assert_eq!(Category::BATTING.len() + Category::PITCHING.len(), Category::ALL.len());
        for cat in Category::BATTING {
            assert!(cat.is_batting());
        }
        for cat in Category::PITCHING {
            assert!(cat.is_pitching());
        }
    }

    #[test]
    fn only_ratio_categories_are_lower_better() {
        let lower: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| !c.higher_is_better())
            .collect();
        assert_eq!(lower, vec![Category::Era, Category::Whip]);
    }

    #[test]
    fn canonical_order_matches_all() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }
}
