// Team stat aggregation: roster + projections -> team batting and pitching
// totals, with composite rate stats derived from the summed counting stats.
//
// The projection source only carries AVG/OPS for batters and ERA/WHIP/K9
// for pitchers, so hits, total bases, walks and hits allowed are estimated
// with the coarse constants below. They are approximations, not
// sabermetric formulas.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::league::projections::ProjectionStore;
use crate::league::roster::{LeagueRosters, RosterRole, TeamRoster};
use crate::stats::category::Category;

// ---------------------------------------------------------------------------
// Estimation constants
// ---------------------------------------------------------------------------

/// Estimated on-base percentage = AVG + this offset.
pub const OBP_OVER_AVG: f64 = 0.07;

/// Estimated walks issued per inning pitched.
pub const WALKS_PER_INNING: f64 = 0.35;

/// Decimal places team rate stats are rounded to before ranking.
const AVG_PLACES: i32 = 3;
const ERA_WHIP_PLACES: i32 = 2;
const K9_PLACES: i32 = 1;

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round to the nearest integer, ties to even.
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Round to `places` decimals, ties to even at the scaled value.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    round_half_even(value * scale) / scale
}

/// A rounded estimate as a non-negative count.
fn derived_count(value: f64) -> u32 {
    round_half_even(value).max(0.0) as u32
}

// ---------------------------------------------------------------------------
// Team totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamBatting {
    pub r: u32,
    pub hr: u32,
    pub rbi: u32,
    pub sb: u32,
    pub ab: u32,
    /// Estimated hits: sum of round(AB * AVG) per player.
    pub h: u32,
    /// Estimated total bases: sum of round(AB * SLG) per player.
    pub tb: u32,
    pub avg: f64,
    pub obp: f64,
    pub slg: f64,
    pub ops: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamPitching {
    pub ip: f64,
    pub er: u32,
    pub k: u32,
    /// Estimated hits allowed.
    pub h: u32,
    /// Estimated walks issued.
    pub bb: u32,
    pub qs: u32,
    pub sv: u32,
    pub era: f64,
    pub whip: f64,
    pub k9: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamTotals {
    pub batting: TeamBatting,
    pub pitching: TeamPitching,
}

impl TeamTotals {
    /// The team's value in a scoring category.
    pub fn value(&self, category: Category) -> f64 {
        let b = &self.batting;
        let p = &self.pitching;
        match category {
            Category::Runs => b.r as f64,
            Category::HomeRuns => b.hr as f64,
            Category::Rbi => b.rbi as f64,
            Category::StolenBases => b.sb as f64,
            Category::Avg => b.avg,
            Category::Ops => b.ops,
            Category::Era => p.era,
            Category::Whip => p.whip,
            Category::K9 => p.k9,
            Category::QualityStarts => p.qs as f64,
            Category::Saves => p.sv as f64,
        }
    }
}

/// A rostered player with no matching projection. Excluded from sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingProjection {
    pub team: String,
    pub player: String,
    pub role: RosterRole,
}

/// Totals for every team plus the players that could not be counted.
#[derive(Debug, Clone, Default)]
pub struct LeagueTotals {
    pub teams: BTreeMap<String, TeamTotals>,
    pub missing: Vec<MissingProjection>,
}

impl LeagueTotals {
    pub fn team(&self, name: &str) -> Option<&TeamTotals> {
        self.teams.get(name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

fn aggregate_batting(
    team: &str,
    batters: &[String],
    store: &ProjectionStore,
    missing: &mut Vec<MissingProjection>,
) -> TeamBatting {
    let mut totals = TeamBatting::default();

    for name in batters {
        let Some(proj) = store.batter(name) else {
            warn!("No projection found for batter {} on {}", name, team);
            missing.push(MissingProjection {
                team: team.to_string(),
                player: name.clone(),
                role: RosterRole::Batter,
            });
            continue;
        };
        let ab = proj.ab as f64;
        let slg = proj.ops - (proj.avg + OBP_OVER_AVG);

        totals.r = totals.r.saturating_add(proj.r);
        totals.hr = totals.hr.saturating_add(proj.hr);
        totals.rbi = totals.rbi.saturating_add(proj.rbi);
        totals.sb = totals.sb.saturating_add(proj.sb);
        totals.ab = totals.ab.saturating_add(proj.ab);
        totals.h = totals.h.saturating_add(derived_count(ab * proj.avg));
        totals.tb = totals.tb.saturating_add(derived_count(ab * slg));
    }

    if totals.ab > 0 {
        let ab = totals.ab as f64;
        totals.avg = round_to(totals.h as f64 / ab, AVG_PLACES);
        totals.slg = round_to(totals.tb as f64 / ab, AVG_PLACES);
        totals.obp = round_to(totals.avg + OBP_OVER_AVG, AVG_PLACES);
        totals.ops = round_to(totals.obp + totals.slg, AVG_PLACES);
    }

    totals
}

fn aggregate_pitching(
    team: &str,
    pitchers: &[String],
    store: &ProjectionStore,
    missing: &mut Vec<MissingProjection>,
) -> TeamPitching {
    let mut totals = TeamPitching::default();

    for name in pitchers {
        let Some(proj) = store.pitcher(name) else {
            warn!("No projection found for pitcher {} on {}", name, team);
            missing.push(MissingProjection {
                team: team.to_string(),
                player: name.clone(),
                role: RosterRole::Pitcher,
            });
            continue;
        };
        let bb = derived_count(proj.ip * WALKS_PER_INNING);

        totals.ip += proj.ip;
        totals.er = totals.er.saturating_add(derived_count(proj.ip * proj.era / 9.0));
        totals.k = totals.k.saturating_add(derived_count(proj.ip * proj.k9 / 9.0));
        totals.qs = totals.qs.saturating_add(proj.qs);
        totals.sv = totals.sv.saturating_add(proj.sv);
        totals.bb = totals.bb.saturating_add(bb);
        totals.h = totals.h.saturating_add(derived_count(proj.ip * proj.whip - bb as f64));
    }

    if totals.ip > 0.0 {
        totals.era = round_to(totals.er as f64 * 9.0 / totals.ip, ERA_WHIP_PLACES);
        totals.whip = round_to((totals.h as f64 + totals.bb as f64) / totals.ip, ERA_WHIP_PLACES);
        totals.k9 = round_to(totals.k as f64 * 9.0 / totals.ip, K9_PLACES);
    }

    totals
}

/// Totals for a single roster. Missing players are appended to `missing`.
pub fn team_totals(
    team: &str,
    roster: &TeamRoster,
    store: &ProjectionStore,
    missing: &mut Vec<MissingProjection>,
) -> TeamTotals {
    TeamTotals {
        batting: aggregate_batting(team, &roster.batters, store, missing),
        pitching: aggregate_pitching(team, &roster.pitchers, store, missing),
    }
}

/// Compute totals for every team in the league.
///
/// Pure function of its inputs: calling it twice on the same data yields
/// identical results.
pub fn compute_league_totals(rosters: &LeagueRosters, store: &ProjectionStore) -> LeagueTotals {
    let mut league = LeagueTotals::default();
    for (team, roster) in rosters.iter() {
        let totals = team_totals(team, roster, store, &mut league.missing);
        league.teams.insert(team.to_string(), totals);
    }
    league
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
