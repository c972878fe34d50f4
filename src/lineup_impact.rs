// Compares an intended starting lineup against the best available eleven
// and prices in missing key players. Stateless: every call takes the
// current impact table.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::identity::{CaseFoldResolver, NameResolver};
use crate::player_impact::PlayerImpactRecord;

pub const DEFAULT_KEY_PLAYER_THRESHOLD: f64 = 70.0;

/// A 30% shortfall or surplus against the best-eleven baseline maps to the
/// extremes of the strength scale.
const STRENGTH_SPAN: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupImpactResult {
    /// Net score fed back into MatchContext.lineup_strength_score.
    pub lineup_strength_score: f64,
    /// Pre-penalty strength from the baseline ratio.
    pub raw_strength: f64,
    /// Share of key-player impact missing from the lineup, in [0, 1].
    pub absence_penalty: f64,
    pub net_impact: f64,
    pub missing_key_players: Vec<String>,
    pub used_players: Vec<String>,
    pub explanation: String,
}

impl LineupImpactResult {
    fn unrecognized() -> Self {
        Self {
            lineup_strength_score: 0.0,
            raw_strength: 0.0,
            absence_penalty: 0.0,
            net_impact: 0.0,
            missing_key_players: Vec::new(),
            used_players: Vec::new(),
            explanation: "Lineup not recognized or not covered by the player impact table."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleBucket {
    Goalkeeper,
    Defensive,
    Midfield,
    Offensive,
}

fn role_bucket(position: &str) -> RoleBucket {
    let p = position.to_uppercase();
    if p.contains("GK") {
        RoleBucket::Goalkeeper
    } else if p.contains("DF") || p.contains("CB") || p.contains("LB") || p.contains("RB") {
        RoleBucket::Defensive
    } else if p.contains("DM") || p.contains("MF") {
        RoleBucket::Midfield
    } else {
        RoleBucket::Offensive
    }
}

fn join_names(labels: &[String]) -> String {
    match labels {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        _ => {
            let head = &labels[..labels.len() - 1];
            format!("{} and {}", head.join(", "), labels[labels.len() - 1])
        }
    }
}

fn build_explanation(missing: &[&PlayerImpactRecord], raw_strength: f64) -> String {
    let mut parts: Vec<String> = Vec::new();

    if missing.is_empty() {
        parts.push(
            "Lineup close to the best available eleven, with no major absence.".to_string(),
        );
    } else {
        let labels: Vec<String> = missing
            .iter()
            .map(|r| format!("{} ({})", r.name, r.position))
            .collect();
        let names_text = join_names(&labels);

        let roles: Vec<RoleBucket> = missing.iter().map(|r| role_bucket(&r.position)).collect();
        let majority = (roles.len() / 2).max(1);
        let count_of = |bucket: RoleBucket| roles.iter().filter(|&&r| r == bucket).count();

        // Goalkeepers count toward no zone, so a lone missing keeper
        // reads as an overall-balance hit.
        let zone = if count_of(RoleBucket::Defensive) >= majority {
            Some("defensive")
        } else if count_of(RoleBucket::Offensive) >= majority {
            Some("offensive")
        } else if count_of(RoleBucket::Midfield) >= majority {
            Some("midfield")
        } else {
            None
        };

        match zone {
            Some(zone) => parts.push(format!(
                "The absence of {names_text} reduces the team's {zone} impact."
            )),
            None => parts.push(format!(
                "The absence of {names_text} reduces the team's overall balance."
            )),
        }
    }

    if raw_strength >= 0.4 {
        parts.push("The starting eleven shows strong collective coherence.".to_string());
    } else if raw_strength <= -0.4 {
        parts.push("The starting eleven is well below the squad's full potential.".to_string());
    }

    parts.join(" ")
}

pub fn compute_lineup_impact(
    lineup_players: &[String],
    impact_table: &[PlayerImpactRecord],
    key_player_threshold: f64,
    resolver: &dyn NameResolver,
) -> LineupImpactResult {
    let lineup_keys: HashSet<String> = lineup_players
        .iter()
        .map(|p| resolver.resolve(p))
        .collect();

    let in_lineup: Vec<&PlayerImpactRecord> = impact_table
        .iter()
        .filter(|r| lineup_keys.contains(&resolver.resolve(&r.name)))
        .collect();

    // Defined fallback, not an error: an unrecognized lineup must not
    // poison the global score with a spurious penalty.
    if in_lineup.is_empty() {
        return LineupImpactResult::unrecognized();
    }

    let mut by_score: Vec<&PlayerImpactRecord> = impact_table.iter().collect();
    by_score.sort_by(|a, b| {
        b.impact_score
            .partial_cmp(&a.impact_score)
            .unwrap_or(Ordering::Equal)
    });
    let baseline_sum: f64 = by_score.iter().take(11).map(|r| r.impact_score).sum();
    let lineup_sum: f64 = in_lineup.iter().map(|r| r.impact_score).sum();

    let ratio = if baseline_sum <= 0.0 {
        1.0
    } else {
        lineup_sum / baseline_sum
    };
    let raw_strength = ((ratio - 1.0) / STRENGTH_SPAN).clamp(-1.0, 1.0);

    let key_players: Vec<&PlayerImpactRecord> = impact_table
        .iter()
        .filter(|r| r.impact_score >= key_player_threshold)
        .collect();
    let missing_keys: Vec<&PlayerImpactRecord> = key_players
        .iter()
        .copied()
        .filter(|r| !lineup_keys.contains(&resolver.resolve(&r.name)))
        .collect();

    let total_key_score: f64 = key_players.iter().map(|r| r.impact_score).sum();
    let absence_penalty = if total_key_score <= 0.0 {
        0.0
    } else {
        missing_keys.iter().map(|r| r.impact_score).sum::<f64>() / total_key_score
    };

    let net_impact = (raw_strength - absence_penalty).clamp(-1.0, 1.0);
    let explanation = build_explanation(&missing_keys, raw_strength);

    let mut missing_key_players: Vec<String> =
        missing_keys.iter().map(|r| r.name.clone()).collect();
    missing_key_players.sort();
    let mut used_players: Vec<String> = in_lineup.iter().map(|r| r.name.clone()).collect();
    used_players.sort();

    LineupImpactResult {
        lineup_strength_score: net_impact,
        raw_strength,
        absence_penalty,
        net_impact,
        missing_key_players,
        used_players,
        explanation,
    }
}

/// Case-folding resolver and the 70-point key-player threshold.
pub fn compute_lineup_impact_default(
    lineup_players: &[String],
    impact_table: &[PlayerImpactRecord],
) -> LineupImpactResult {
    compute_lineup_impact(
        lineup_players,
        impact_table,
        DEFAULT_KEY_PLAYER_THRESHOLD,
        &CaseFoldResolver,
    )
}
