// Builds the per-player importance table from season-aggregated inputs.
// Always a full rebuild: the table is cheap to recompute and an
// incremental path would only invite stale sub-scores.

use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

const W_MINUTES: f64 = 0.15;
const W_ATTACK: f64 = 0.20;
const W_PROGRESSION: f64 = 0.20;
const W_ON_OFF: f64 = 0.20;
const W_TACTICAL: f64 = 0.10;
const W_COMBO: f64 = 0.15;

/// One row of the season player-statistics export, per-90 rates already
/// derived upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonStats {
    pub player: String,
    pub position: String,
    pub minutes: f64,
    pub goals_per_90: f64,
    pub xg_per_90: f64,
    pub xag_per_90: f64,
    pub progressive_carries: f64,
    pub progressive_passes: f64,
    pub progressive_receptions: f64,
}

/// Who started a match and the points it yielded (3/1/0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLineup {
    pub match_id: String,
    pub players: Vec<String>,
    pub points: f64,
}

/// Aggregate for one multi-player combination on record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboRecord {
    pub players: Vec<String>,
    pub matches: f64,
    pub avg_points: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactCategory {
    Leader,
    KeyStarter,
    Starter,
    Rotation,
    LowImpact,
}

impl ImpactCategory {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ImpactCategory::Leader
        } else if score >= 65.0 {
            ImpactCategory::KeyStarter
        } else if score >= 50.0 {
            ImpactCategory::Starter
        } else if score >= 30.0 {
            ImpactCategory::Rotation
        } else {
            ImpactCategory::LowImpact
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImpactCategory::Leader => "leader",
            ImpactCategory::KeyStarter => "key_starter",
            ImpactCategory::Starter => "starter",
            ImpactCategory::Rotation => "rotation",
            ImpactCategory::LowImpact => "low_impact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerImpactRecord {
    pub player_id: String,
    pub name: String,
    pub position: String,
    pub minutes_played: f64,
    /// Composite importance in [0, 100], one-decimal precision.
    pub impact_score: f64,
    pub category: ImpactCategory,
}

/// Min-max over the pool; a zero range flattens everyone to 0 rather than
/// dividing by zero.
fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let mut min = first;
    let mut max = first;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    let range = max - min;
    if range <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / range).collect()
}

/// Progression counts the same everywhere but matters more the deeper the
/// role; attackers get theirs discounted since the attack sub-score
/// already covers them.
fn position_multiplier(position: &str) -> f64 {
    let p = position.to_uppercase();
    if p.contains("GK") {
        1.1
    } else if p.contains("DF") || p.contains("CB") || p.contains("LB") || p.contains("RB") {
        1.2
    } else if p.contains("DM") {
        1.2
    } else if p.contains("MF") {
        1.0
    } else {
        0.7
    }
}

/// Average points with the player starting minus average points without.
/// A player present in every recorded lineup is compared against half the
/// global average; a player absent from every lineup contributes 0.
fn on_off_differentials(
    season_stats: &[PlayerSeasonStats],
    lineup_history: &[MatchLineup],
) -> Vec<f64> {
    let global_avg =
        lineup_history.iter().map(|m| m.points).sum::<f64>() / lineup_history.len().max(1) as f64;

    season_stats
        .iter()
        .map(|stats| {
            let mut with = Vec::new();
            let mut without = Vec::new();
            for lineup in lineup_history {
                if lineup.players.iter().any(|p| p == &stats.player) {
                    with.push(lineup.points);
                } else {
                    without.push(lineup.points);
                }
            }
            if with.is_empty() {
                return 0.0;
            }
            let avg_with = with.iter().sum::<f64>() / with.len() as f64;
            let avg_without = if without.is_empty() {
                global_avg * 0.5
            } else {
                without.iter().sum::<f64>() / without.len() as f64
            };
            avg_with - avg_without
        })
        .collect()
}

/// Match-weighted average points over every combination that includes the
/// player; players on no recorded combination score 0.
fn combination_scores(
    season_stats: &[PlayerSeasonStats],
    combination_history: &[ComboRecord],
) -> Vec<f64> {
    let mut points: HashMap<&str, f64> = HashMap::new();
    let mut matches: HashMap<&str, f64> = HashMap::new();
    for combo in combination_history {
        for member in &combo.players {
            *points.entry(member.as_str()).or_default() += combo.avg_points * combo.matches;
            *matches.entry(member.as_str()).or_default() += combo.matches;
        }
    }

    season_stats
        .iter()
        .map(|stats| {
            let m = matches.get(stats.player.as_str()).copied().unwrap_or(0.0);
            if m <= 0.0 {
                0.0
            } else {
                points.get(stats.player.as_str()).copied().unwrap_or(0.0) / m
            }
        })
        .collect()
}

/// Rebuilds the whole impact table from current statistics. Season stats
/// and lineup history are required; an empty combination table or
/// importance ranking just zeroes those sub-scores.
pub fn build_player_impact_table(
    season_stats: &[PlayerSeasonStats],
    lineup_history: &[MatchLineup],
    combination_history: &[ComboRecord],
    tactical_importance: &HashMap<String, f64>,
) -> Result<Vec<PlayerImpactRecord>> {
    if season_stats.is_empty() {
        bail!("season player statistics table is missing or empty");
    }
    if lineup_history.is_empty() {
        bail!("lineup history table is missing or empty");
    }

    let collect =
        |f: fn(&PlayerSeasonStats) -> f64| -> Vec<f64> { season_stats.iter().map(f).collect() };

    let minutes_n = min_max_normalize(&collect(|s| s.minutes));
    let gls_n = min_max_normalize(&collect(|s| s.goals_per_90));
    let xg_n = min_max_normalize(&collect(|s| s.xg_per_90));
    let xag_n = min_max_normalize(&collect(|s| s.xag_per_90));
    let prgc_n = min_max_normalize(&collect(|s| s.progressive_carries));
    let prgp_n = min_max_normalize(&collect(|s| s.progressive_passes));
    let prgr_n = min_max_normalize(&collect(|s| s.progressive_receptions));

    let on_off_n = min_max_normalize(&on_off_differentials(season_stats, lineup_history));
    let combo_n = min_max_normalize(&combination_scores(season_stats, combination_history));
    let tactical_raw: Vec<f64> = season_stats
        .iter()
        .map(|s| tactical_importance.get(&s.player).copied().unwrap_or(0.0))
        .collect();
    let tactical_n = min_max_normalize(&tactical_raw);

    let total_weight = W_MINUTES + W_ATTACK + W_PROGRESSION + W_ON_OFF + W_TACTICAL + W_COMBO;

    let table = season_stats
        .iter()
        .enumerate()
        .map(|(i, stats)| {
            let attack = 0.4 * gls_n[i] + 0.3 * xg_n[i] + 0.3 * xag_n[i];
            let progression_base = 0.4 * prgc_n[i] + 0.3 * prgp_n[i] + 0.3 * prgr_n[i];
            let progression =
                (progression_base * position_multiplier(&stats.position)).clamp(0.0, 1.0);

            let raw = (W_MINUTES * minutes_n[i]
                + W_ATTACK * attack
                + W_PROGRESSION * progression
                + W_ON_OFF * on_off_n[i]
                + W_TACTICAL * tactical_n[i]
                + W_COMBO * combo_n[i])
                / total_weight;

            let impact_score = ((raw * 100.0).clamp(0.0, 100.0) * 10.0).round() / 10.0;

            PlayerImpactRecord {
                player_id: stats.player.clone(),
                name: stats.player.clone(),
                position: stats.position.clone(),
                minutes_played: stats.minutes,
                impact_score,
                category: ImpactCategory::from_score(impact_score),
            }
        })
        .collect();

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(player: &str, position: &str, minutes: f64, scale: f64) -> PlayerSeasonStats {
        PlayerSeasonStats {
            player: player.to_string(),
            position: position.to_string(),
            minutes,
            goals_per_90: 0.5 * scale,
            xg_per_90: 0.4 * scale,
            xag_per_90: 0.3 * scale,
            progressive_carries: 60.0 * scale,
            progressive_passes: 80.0 * scale,
            progressive_receptions: 70.0 * scale,
        }
    }

    fn one_match(players: &[&str], points: f64) -> MatchLineup {
        MatchLineup {
            match_id: "m1".to_string(),
            players: players.iter().map(|p| p.to_string()).collect(),
            points,
        }
    }

    #[test]
    fn normalize_handles_zero_range() {
        assert_eq!(min_max_normalize(&[2.0, 2.0, 2.0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(min_max_normalize(&[]), Vec::<f64>::new());
        let n = min_max_normalize(&[0.0, 5.0, 10.0]);
        assert_eq!(n, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn position_multiplier_covers_roles() {
        assert_eq!(position_multiplier("GK"), 1.1);
        assert_eq!(position_multiplier("DF,CB"), 1.2);
        assert_eq!(position_multiplier("DM"), 1.2);
        assert_eq!(position_multiplier("MF"), 1.0);
        assert_eq!(position_multiplier("FW"), 0.7);
    }

    #[test]
    fn missing_required_tables_are_errors() {
        let pool = vec![stats("A", "MF", 900.0, 1.0)];
        let history = vec![one_match(&["A"], 3.0)];
        let empty_map = HashMap::new();
        assert!(build_player_impact_table(&[], &history, &[], &empty_map).is_err());
        assert!(build_player_impact_table(&pool, &[], &[], &empty_map).is_err());
    }

    #[test]
    fn zero_stat_player_scores_zero_and_low_impact() {
        let pool = vec![
            stats("Star", "FW", 2500.0, 1.0),
            stats("Ghost", "FW", 0.0, 0.0),
        ];
        // Star started and won; Ghost never appeared.
        let history = vec![one_match(&["Star"], 3.0), one_match(&["Star"], 3.0)];
        let combos = vec![ComboRecord {
            players: vec!["Star".to_string()],
            matches: 2.0,
            avg_points: 3.0,
        }];
        let mut importance = HashMap::new();
        importance.insert("Star".to_string(), 90.0);

        let table = build_player_impact_table(&pool, &history, &combos, &importance).unwrap();
        let ghost = table.iter().find(|r| r.name == "Ghost").unwrap();
        assert_eq!(ghost.impact_score, 0.0);
        assert_eq!(ghost.category, ImpactCategory::LowImpact);
        let star = table.iter().find(|r| r.name == "Star").unwrap();
        assert!(star.impact_score > ghost.impact_score);
    }

    #[test]
    fn flat_pool_scores_zero_for_everyone() {
        let pool = vec![
            stats("A", "MF", 1000.0, 1.0),
            stats("B", "MF", 1000.0, 1.0),
            stats("C", "MF", 1000.0, 1.0),
        ];
        // Everyone starts every match: identical on/off for all.
        let history = vec![
            one_match(&["A", "B", "C"], 3.0),
            one_match(&["A", "B", "C"], 1.0),
        ];
        let table = build_player_impact_table(&pool, &history, &[], &HashMap::new()).unwrap();
        for record in &table {
            assert_eq!(record.impact_score, 0.0);
            assert_eq!(record.category, ImpactCategory::LowImpact);
        }
    }

    #[test]
    fn on_off_rewards_players_the_team_wins_with() {
        let pool = vec![
            stats("With", "MF", 1000.0, 1.0),
            stats("Without", "MF", 1000.0, 1.0),
        ];
        let history = vec![
            one_match(&["With"], 3.0),
            one_match(&["With"], 3.0),
            one_match(&["Without"], 0.0),
        ];
        let diffs = on_off_differentials(&pool, &history);
        assert!(diffs[0] > diffs[1]);
    }

    #[test]
    fn never_rested_player_compares_to_half_global_average() {
        let pool = vec![stats("Ever", "MF", 1000.0, 1.0)];
        let history = vec![one_match(&["Ever"], 3.0), one_match(&["Ever"], 1.0)];
        let diffs = on_off_differentials(&pool, &history);
        // avg_with = 2.0, global average 2.0, fallback baseline 1.0.
        assert!((diffs[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn combination_score_is_match_weighted() {
        let pool = vec![stats("A", "MF", 1000.0, 1.0)];
        let combos = vec![
            ComboRecord {
                players: vec!["A".to_string(), "B".to_string()],
                matches: 3.0,
                avg_points: 3.0,
            },
            ComboRecord {
                players: vec!["A".to_string(), "C".to_string()],
                matches: 1.0,
                avg_points: 0.0,
            },
        ];
        let scores = combination_scores(&pool, &combos);
        // (3*3 + 0*1) / 4 matches
        assert!((scores[0] - 2.25).abs() < 1e-12);
    }

    #[test]
    fn categories_follow_cut_points() {
        assert_eq!(ImpactCategory::from_score(85.0), ImpactCategory::Leader);
        assert_eq!(ImpactCategory::from_score(80.0), ImpactCategory::Leader);
        assert_eq!(ImpactCategory::from_score(70.0), ImpactCategory::KeyStarter);
        assert_eq!(ImpactCategory::from_score(55.0), ImpactCategory::Starter);
        assert_eq!(ImpactCategory::from_score(30.0), ImpactCategory::Rotation);
        assert_eq!(ImpactCategory::from_score(29.9), ImpactCategory::LowImpact);
    }

    #[test]
    fn scores_are_rounded_to_one_decimal() {
        let pool = vec![
            stats("A", "FW", 977.0, 0.9),
            stats("B", "MF", 1534.0, 0.6),
            stats("C", "DF", 251.0, 0.3),
        ];
        let history = vec![
            one_match(&["A", "B"], 3.0),
            one_match(&["B", "C"], 1.0),
            one_match(&["A", "C"], 0.0),
        ];
        let table = build_player_impact_table(&pool, &history, &[], &HashMap::new()).unwrap();
        for record in &table {
            let tenths = record.impact_score * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-9);
            assert!((0.0..=100.0).contains(&record.impact_score));
        }
    }
}
