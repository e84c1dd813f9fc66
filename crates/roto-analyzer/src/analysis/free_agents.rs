// Free-agent rankings: projected players on no roster, scored with
// configurable category weights, plus per-category leader lists.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::league::projections::{BatterProjection, PitcherProjection, ProjectionStore};
use crate::league::roster::LeagueRosters;

// ---------------------------------------------------------------------------
// Scoring constants
// ---------------------------------------------------------------------------

const HR_MULTIPLIER: f64 = 3.0;
const SB_MULTIPLIER: f64 = 3.0;
const AVG_SCALE: f64 = 1000.0;
const OPS_SCALE: f64 = 500.0;

const IP_MULTIPLIER: f64 = 0.3;
const ERA_CEILING: f64 = 5.00;
const ERA_SCALE: f64 = 20.0;
const WHIP_CEILING: f64 = 1.50;
const WHIP_SCALE: f64 = 50.0;
const K9_MULTIPLIER: f64 = 2.0;
const QS_MULTIPLIER: f64 = 3.0;
const SV_MULTIPLIER: f64 = 4.0;

/// A pitcher with at least this many saves is treated as a reliever.
pub const RELIEVER_MIN_SV: u32 = 8;
/// A pitcher projected for fewer innings is treated as a reliever.
pub const RELIEVER_MAX_IP: f64 = 100.0;

/// Entries per category leader list.
pub const LEADERS_PER_CATEGORY: usize = 5;
/// Playing-time floors for the rate-stat leader lists.
pub const LEADER_MIN_AB: u32 = 400;
pub const LEADER_MIN_IP: f64 = 150.0;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatterWeights {
    #[serde(alias = "R")]
    pub r: f64,
    #[serde(alias = "HR")]
    pub hr: f64,
    #[serde(alias = "RBI")]
    pub rbi: f64,
    #[serde(alias = "SB")]
    pub sb: f64,
    #[serde(alias = "AVG")]
    pub avg: f64,
    #[serde(alias = "OPS")]
    pub ops: f64,
}

impl Default for BatterWeights {
    fn default() -> Self {
        BatterWeights {
            r: 1.0,
            hr: 1.2,
            rbi: 1.0,
            sb: 1.0,
            avg: 1.5,
            ops: 1.8,
        }
    }
}

impl BatterWeights {
    pub fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("R", self.r),
            ("HR", self.hr),
            ("RBI", self.rbi),
            ("SB", self.sb),
            ("AVG", self.avg),
            ("OPS", self.ops),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitcherWeights {
    #[serde(alias = "IP")]
    pub ip: f64,
    #[serde(alias = "ERA")]
    pub era: f64,
    #[serde(alias = "WHIP")]
    pub whip: f64,
    #[serde(alias = "K9")]
    pub k9: f64,
    #[serde(alias = "QS")]
    pub qs: f64,
    #[serde(alias = "SV")]
    pub sv: f64,
}

impl Default for PitcherWeights {
    fn default() -> Self {
        PitcherWeights {
            ip: 1.0,
            era: 1.5,
            whip: 1.5,
            k9: 1.2,
            qs: 1.3,
            sv: 1.2,
        }
    }
}

impl PitcherWeights {
    pub fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("IP", self.ip),
            ("ERA", self.era),
            ("WHIP", self.whip),
            ("K9", self.k9),
            ("QS", self.qs),
            ("SV", self.sv),
        ]
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

pub fn batter_score(proj: &BatterProjection, w: &BatterWeights) -> f64 {
    proj.r as f64 * w.r
        + proj.hr as f64 * w.hr * HR_MULTIPLIER
        + proj.rbi as f64 * w.rbi
        + proj.sb as f64 * w.sb * SB_MULTIPLIER
        + proj.avg * AVG_SCALE * w.avg
        + proj.ops * OPS_SCALE * w.ops
}

pub fn pitcher_score(proj: &PitcherProjection, w: &PitcherWeights) -> f64 {
    // Lower ERA/WHIP is better; anything past the ceiling scores nothing.
    let era_score = if proj.era < ERA_CEILING {
        (ERA_CEILING - proj.era) * ERA_SCALE
    } else {
        0.0
    };
    let whip_score = if proj.whip < WHIP_CEILING {
        (WHIP_CEILING - proj.whip) * WHIP_SCALE
    } else {
        0.0
    };

    proj.ip * w.ip * IP_MULTIPLIER
        + era_score * w.era
        + whip_score * w.whip
        + proj.k9 * w.k9 * K9_MULTIPLIER
        + proj.qs as f64 * w.qs * QS_MULTIPLIER
        + proj.sv as f64 * w.sv * SV_MULTIPLIER
}

/// Rough role guess from the projection alone.
pub fn is_reliever(proj: &PitcherProjection) -> bool {
    proj.sv >= RELIEVER_MIN_SV || proj.ip < RELIEVER_MAX_IP
}

// ---------------------------------------------------------------------------
// Pool and rankings
// ---------------------------------------------------------------------------

/// Projected players who appear on no roster, alphabetical.
#[derive(Debug, Clone, Default)]
pub struct FreeAgentPool {
    pub batters: Vec<BatterProjection>,
    pub pitchers: Vec<PitcherProjection>,
}

pub fn find_free_agents(rosters: &LeagueRosters, store: &ProjectionStore) -> FreeAgentPool {
    let rostered = rosters.rostered_players();
    let pool = FreeAgentPool {
        batters: store
            .batters
            .values()
            .filter(|p| !rostered.contains(p.name.as_str()))
            .cloned()
            .collect(),
        pitchers: store
            .pitchers
            .values()
            .filter(|p| !rostered.contains(p.name.as_str()))
            .cloned()
            .collect(),
    };
    info!(
        "Identified {} free agent batters and {} free agent pitchers",
        pool.batters.len(),
        pool.pitchers.len()
    );
    pool
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored<T> {
    pub player: T,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryLeaders {
    /// HR + RBI/3.
    pub power: Vec<BatterProjection>,
    pub speed: Vec<BatterProjection>,
    pub avg: Vec<BatterProjection>,
    pub ops: Vec<BatterProjection>,
    pub era: Vec<PitcherProjection>,
    pub whip: Vec<PitcherProjection>,
    pub k9: Vec<PitcherProjection>,
    pub qs: Vec<PitcherProjection>,
    pub sv: Vec<PitcherProjection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FreeAgentRankings {
    pub batters: Vec<Scored<BatterProjection>>,
    pub starters: Vec<Scored<PitcherProjection>>,
    pub relievers: Vec<Scored<PitcherProjection>>,
    pub leaders: CategoryLeaders,
}

fn by_score_desc<T>(a: &Scored<T>, b: &Scored<T>, name: impl Fn(&T) -> &str) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| name(&a.player).cmp(name(&b.player)))
}

/// Top `LEADERS_PER_CATEGORY` items by `key`. Input order breaks ties.
fn leaders<'a, T: Clone + 'a>(
    items: impl Iterator<Item = &'a T>,
    key: impl Fn(&T) -> f64,
    descending: bool,
) -> Vec<T> {
    let mut list: Vec<&T> = items.collect();
    list.sort_by(|a, b| {
        let ord = key(*a).total_cmp(&key(*b));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    list.into_iter().take(LEADERS_PER_CATEGORY).cloned().collect()
}

fn category_leaders(pool: &FreeAgentPool) -> CategoryLeaders {
    let batters = || pool.batters.iter();
    let regulars = || pool.batters.iter().filter(|b| b.ab >= LEADER_MIN_AB);
    let pitchers = || pool.pitchers.iter();
    let workhorses = || pool.pitchers.iter().filter(|p| p.ip >= LEADER_MIN_IP);

    CategoryLeaders {
        power: leaders(batters(), |b| b.hr as f64 + b.rbi as f64 / 3.0, true),
        speed: leaders(batters(), |b| b.sb as f64, true),
        avg: leaders(regulars(), |b| b.avg, true),
        ops: leaders(regulars(), |b| b.ops, true),
        era: leaders(workhorses(), |p| p.era, false),
        whip: leaders(workhorses(), |p| p.whip, false),
        k9: leaders(workhorses(), |p| p.k9, true),
        qs: leaders(pitchers(), |p| p.qs as f64, true),
        sv: leaders(pitchers(), |p| p.sv as f64, true),
    }
}

/// Score and sort the pool. Pitchers are split into starters and relievers.
pub fn rank_free_agents(
    pool: &FreeAgentPool,
    batter_weights: &BatterWeights,
    pitcher_weights: &PitcherWeights,
) -> FreeAgentRankings {
    let mut batters: Vec<Scored<BatterProjection>> = pool
        .batters
        .iter()
        .map(|b| Scored {
            score: batter_score(b, batter_weights),
            player: b.clone(),
        })
        .collect();
    batters.sort_by(|a, b| by_score_desc(a, b, |p| p.name.as_str()));

    let mut pitchers: Vec<Scored<PitcherProjection>> = pool
        .pitchers
        .iter()
        .map(|p| Scored {
            score: pitcher_score(p, pitcher_weights),
            player: p.clone(),
        })
        .collect();
    pitchers.sort_by(|a, b| by_score_desc(a, b, |p| p.name.as_str()));

    let (relievers, starters): (Vec<_>, Vec<_>) =
        pitchers.into_iter().partition(|s| is_reliever(&s.player));

    FreeAgentRankings {
        batters,
        starters,
        relievers,
        leaders: category_leaders(pool),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::defaults::{default_projections, default_rosters};
    use crate::league::roster::RosterRole;

    const EPS: f64 = 1e-9;

    fn batter(name: &str, ab: u32, hr: u32, sb: u32, avg: f64) -> BatterProjection {
        BatterProjection {
            name: name.to_string(),
            ab,
            r: 100,
            hr,
            rbi: 90,
            sb,
            avg,
            ops: 0.850,
        }
    }

    fn pitcher(name: &str, ip: f64, era: f64, sv: u32) -> PitcherProjection {
        PitcherProjection {
            name: name.to_string(),
            ip,
            era,
            whip: 1.10,
            k9: 9.0,
            qs: 18,
            sv,
        }
    }

    #[test]
    fn batter_score_uses_weighted_formula() {
        let b = batter("Test", 550, 30, 10, 0.280);
        // 100 + 3*30*1.2 + 90 + 3*10 + 1000*.28*1.5 + 500*.85*1.8
        let expected = 100.0 + 108.0 + 90.0 + 30.0 + 420.0 + 765.0;
        assert!((batter_score(&b, &BatterWeights::default()) - expected).abs() < EPS);
    }

    #[test]
    fn pitcher_score_uses_weighted_formula() {
        let p = pitcher("Test", 180.0, 3.00, 0);
        // 0.3*180 + 40*1.5 + 20*1.5 + 2*9*1.2 + 3*18*1.3
        let expected = 54.0 + 60.0 + 30.0 + 21.6 + 70.2;
        assert!((pitcher_score(&p, &PitcherWeights::default()) - expected).abs() < 1e-6);
    }

    #[test]
    fn ratio_scores_floor_at_ceiling() {
        let mut p = pitcher("Bad", 100.0, 5.50, 0);
        p.whip = 1.60;
        p.k9 = 0.0;
        p.qs = 0;
        let w = PitcherWeights::default();
        assert!((pitcher_score(&p, &w) - 30.0).abs() < EPS);
    }

    #[test]
    fn reliever_classification() {
        assert!(is_reliever(&pitcher("Closer", 65.0, 3.0, 30)));
        assert!(is_reliever(&pitcher("Swingman", 95.0, 3.0, 0)));
        assert!(is_reliever(&pitcher("Hybrid", 150.0, 3.0, 8)));
        assert!(!is_reliever(&pitcher("Starter", 100.0, 3.0, 7)));
    }

    #[test]
    fn pool_excludes_rostered_players() {
        let mut rosters = LeagueRosters::new();
        rosters.add_player("Team", "Taken Bat", RosterRole::Batter);
        rosters.add_player("Team", "Taken Arm", RosterRole::Pitcher);
        let store = ProjectionStore::from_parts(
            vec![batter("Taken Bat", 500, 20, 5, 0.270), batter("Open Bat", 500, 20, 5, 0.270)],
            vec![pitcher("Taken Arm", 170.0, 3.5, 0), pitcher("Open Arm", 170.0, 3.5, 0)],
        );
        let pool = find_free_agents(&rosters, &store);
        assert_eq!(pool.batters.len(), 1);
        assert_eq!(pool.batters[0].name, "Open Bat");
        assert_eq!(pool.pitchers.len(), 1);
        assert_eq!(pool.pitchers[0].name, "Open Arm");
    }

    #[test]
    fn rankings_sorted_and_split() {
        let pool = FreeAgentPool {
            batters: vec![batter("Low", 500, 5, 0, 0.240), batter("High", 500, 40, 30, 0.300)],
            pitchers: vec![
                pitcher("Starter", 180.0, 3.2, 0),
                pitcher("Closer", 65.0, 2.8, 35),
                pitcher("Setup", 70.0, 3.1, 3),
            ],
        };
        let rankings =
            rank_free_agents(&pool, &BatterWeights::default(), &PitcherWeights::default());

        assert_eq!(rankings.batters[0].player.name, "High");
        assert!(rankings.batters[0].score > rankings.batters[1].score);
        assert_eq!(rankings.starters.len(), 1);
        assert_eq!(rankings.relievers.len(), 2);
        assert_eq!(rankings.relievers[0].player.name, "Closer");
    }

    #[test]
    fn leaders_respect_playing_time_floors() {
        let pool = FreeAgentPool {
            batters: vec![
                batter("Part Timer", 200, 10, 2, 0.340),
                batter("Regular", 520, 25, 12, 0.290),
            ],
            pitchers: vec![pitcher("Reliever", 60.0, 1.90, 20), pitcher("Starter", 175.0, 3.40, 0)],
        };
        let leaders = category_leaders(&pool);
        assert_eq!(leaders.avg.len(), 1);
        assert_eq!(leaders.avg[0].name, "Regular");
        assert_eq!(leaders.era.len(), 1);
        assert_eq!(leaders.era[0].name, "Starter");
        // Counting-stat lists have no floor.
        assert_eq!(leaders.sv[0].name, "Reliever");
        assert_eq!(leaders.power[0].name, "Regular");
    }

    #[test]
    fn builtin_league_has_free_agents() {
        let pool = find_free_agents(&default_rosters(), &default_projections());
        assert!(!pool.batters.is_empty());
        assert!(!pool.pitchers.is_empty());
        let rankings =
            rank_free_agents(&pool, &BatterWeights::default(), &PitcherWeights::default());
        assert!(rankings.batters.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(rankings.leaders.power.len() <= LEADERS_PER_CATEGORY);
    }

    #[test]
    fn weights_deserialize_with_partial_tables() {
        let w: BatterWeights = toml::from_str("HR = 2.0").unwrap();
        assert_eq!(w.hr, 2.0);
        assert_eq!(w.ops, 1.8);
    }
}
