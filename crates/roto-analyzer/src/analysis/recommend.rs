// Strategy recommendations: a fixed, ordered rule table over a team analysis.
//
// Every rule reads the analysis only; output order is the rule order below.

use std::fmt;

use serde::Serialize;

use crate::analysis::team::TeamAnalysis;
use crate::stats::category::Category;

// ---------------------------------------------------------------------------
// Rule thresholds
// ---------------------------------------------------------------------------

/// Batters past this index in roster order are treated as bench.
pub const STARTING_LINEUP_BATTERS: usize = 9;

/// A batter is a trade-from-strength candidate above either threshold.
pub const SPEED_SB: u32 = 20;
pub const SPEED_R: u32 = 90;
pub const MAX_SPEED_CANDIDATES: usize = 2;

/// Strengths quoted in the trade-from-strength advice.
pub const QUOTED_STRENGTHS: usize = 2;

/// More relievers than this (with any saves) suggests one is expendable.
pub const RELIEVER_SURPLUS: usize = 2;

/// Minimum projections for a player to be offered as a trade chip.
pub const CHIP_SB: u32 = 20;
pub const CHIP_SV: u32 = 20;

/// Example high-OPS bats named in the OPS advice.
pub const HIGH_OPS_EXAMPLES: [&str; 3] = ["Juan Soto", "Aaron Judge", "Yordan Alvarez"];

// ---------------------------------------------------------------------------
// Need areas
// ---------------------------------------------------------------------------

/// Coarse roster need a weak category points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NeedArea {
    StartingPitching,
    ReliefPitching,
    PowerHitting,
    Speed,
    BattingAverage,
}

impl NeedArea {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Era | Category::Whip | Category::K9 | Category::QualityStarts => {
                NeedArea::StartingPitching
            }
            Category::Saves => NeedArea::ReliefPitching,
            Category::HomeRuns | Category::Rbi => NeedArea::PowerHitting,
            Category::Runs | Category::StolenBases => NeedArea::Speed,
            Category::Avg | Category::Ops => NeedArea::BattingAverage,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NeedArea::StartingPitching => "starting pitching",
            NeedArea::ReliefPitching => "relief pitching",
            NeedArea::PowerHitting => "power hitting",
            NeedArea::Speed => "speed",
            NeedArea::BattingAverage => "batting average/OPS",
        }
    }
}

impl fmt::Display for NeedArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub body: String,
}

impl Recommendation {
    fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Recommendation {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}

fn join_codes(categories: impl Iterator<Item = Category>) -> String {
    categories.map(|c| c.code()).collect::<Vec<_>>().join(", ")
}

/// Need areas for the weaknesses, deduplicated in first-seen order.
pub fn need_areas(analysis: &TeamAnalysis) -> Vec<NeedArea> {
    let mut areas = Vec::new();
    for category in analysis.weakness_categories() {
        let area = NeedArea::for_category(category);
        if !areas.contains(&area) {
            areas.push(area);
        }
    }
    areas
}

fn target_weaknesses(analysis: &TeamAnalysis) -> Option<Recommendation> {
    let areas = need_areas(analysis);
    if areas.is_empty() {
        return None;
    }
    let labels: Vec<&str> = areas.iter().map(NeedArea::label).collect();
    Some(Recommendation::new(
        format!("Target {}", labels.join(", ")),
        format!(
            "Your team is weakest in {}. Consider trading for players who excel in these categories.",
            join_codes(analysis.weakness_categories())
        ),
    ))
}

fn trade_from_strength(analysis: &TeamAnalysis) -> Option<Recommendation> {
    if !(analysis.is_strength(Category::StolenBases) || analysis.is_strength(Category::Runs)) {
        return None;
    }
    let candidates: Vec<&str> = analysis
        .batters
        .iter()
        .filter(|b| b.sb > SPEED_SB || b.r > SPEED_R)
        .map(|b| b.name.as_str())
        .take(MAX_SPEED_CANDIDATES)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    Some(Recommendation::new(
        "Trade from Strength",
        format!(
            "You have excellent {} numbers. Consider trading a player like {}, who provide significant value in these categories but may be expendable.",
            join_codes(analysis.strength_categories().take(QUOTED_STRENGTHS)),
            candidates.join(", ")
        ),
    ))
}

fn improve_ops(analysis: &TeamAnalysis) -> Option<Recommendation> {
    if !analysis.is_weakness(Category::Ops) {
        return None;
    }
    let [a, b, c] = HIGH_OPS_EXAMPLES;
    Some(Recommendation::new(
        "Improve OPS",
        format!(
            "Your team is ranked low in OPS despite having good hitters. Consider adding a high-OPS bat like {a}, {b}, or {c} if possible."
        ),
    ))
}

fn weak_ratios(analysis: &TeamAnalysis) -> bool {
    analysis.is_weakness(Category::Era) || analysis.is_weakness(Category::Whip)
}

fn pitching_ratios(analysis: &TeamAnalysis) -> Option<Recommendation> {
    weak_ratios(analysis).then(|| {
        Recommendation::new(
            "Focus on Pitching Ratios",
            "Target pitchers with elite ratios who may not be as highly valued for counting stats like QS or K.",
        )
    })
}

fn surplus_closer(analysis: &TeamAnalysis) -> Option<Recommendation> {
    let relievers: Vec<&str> = analysis
        .pitchers
        .iter()
        .filter(|p| p.sv > 0)
        .map(|p| p.name.as_str())
        .collect();
    if relievers.len() <= RELIEVER_SURPLUS || analysis.is_weakness(Category::Saves) {
        return None;
    }
    let last = relievers.last()?;
    Some(Recommendation::new(
        "Consider Trading a Closer",
        format!(
            "You have {} strong relievers. Consider trading one (perhaps {}) for help in other categories.",
            relievers.len(),
            last
        ),
    ))
}

fn monitor_bench(analysis: &TeamAnalysis) -> Option<Recommendation> {
    let bench: Vec<&str> = analysis
        .batters
        .iter()
        .skip(STARTING_LINEUP_BATTERS)
        .map(|b| b.name.as_str())
        .collect();
    if bench.is_empty() {
        return None;
    }
    Some(Recommendation::new(
        "Monitor Bench",
        format!(
            "{} are currently on your bench. Monitor their performance and be ready to use them if they outperform your starters.",
            bench.join(", ")
        ),
    ))
}

/// A player we could offer for `category`, if the category has chip rules.
fn trade_chip(analysis: &TeamAnalysis, category: Category) -> Option<&str> {
    match category {
        Category::StolenBases => analysis
            .batters
            .iter()
            .find(|b| b.sb > CHIP_SB)
            .map(|b| b.name.as_str()),
        Category::Saves => analysis
            .pitchers
            .iter()
            .find(|p| p.sv > CHIP_SV)
            .map(|p| p.name.as_str()),
        _ => None,
    }
}

fn trade_package(analysis: &TeamAnalysis) -> Option<Recommendation> {
    let partner = analysis.trade_partners.first()?;
    let target = partner.notable_players.first()?;
    let (chip, category) = analysis
        .strength_categories()
        .find_map(|c| trade_chip(analysis, c).map(|name| (name, c)))?;
    Some(Recommendation::new(
        "Potential Trade Package Example",
        format!(
            "Give: {} ({}) + Get: A high-quality player like {} from {}",
            chip,
            category.code(),
            target,
            partner.team
        ),
    ))
}

fn waiver_focus(analysis: &TeamAnalysis) -> Option<Recommendation> {
    if weak_ratios(analysis) {
        Some(Recommendation::new(
            "Waiver Wire Focus",
            "Keep an eye on the waiver wire for starting pitchers with good ratios, even if they don't accumulate many counting stats.",
        ))
    } else if analysis.is_weakness(Category::Ops) || analysis.is_weakness(Category::Avg) {
        Some(Recommendation::new(
            "Waiver Wire Focus",
            "Monitor for high-OBP/SLG hitters who may be undervalued, especially players who get hot and could provide short-term value.",
        ))
    } else {
        None
    }
}

type Rule = fn(&TeamAnalysis) -> Option<Recommendation>;

/// Rules in output order.
const RULES: [Rule; 8] = [
    target_weaknesses,
    trade_from_strength,
    improve_ops,
    pitching_ratios,
    surplus_closer,
    monitor_bench,
    trade_package,
    waiver_focus,
];

/// Apply every rule in order and collect the ones that fire.
pub fn generate_recommendations(analysis: &TeamAnalysis) -> Vec<Recommendation> {
    RULES.iter().filter_map(|rule| rule(analysis)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
