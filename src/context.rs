use serde::{Deserialize, Serialize};

/// Fully-resolved feature record for one fixture. Collaborators build this
/// from scraped stats; the engine never reads anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchContext {
    pub opponent: String,
    pub is_home: bool,
    // Absences
    pub key_absences_count: u32,
    pub key_absences_impact: f64,
    // Recent form (points per match)
    pub ppm_last_5: f64,
    pub ppm_last_10: f64,
    pub opp_ppm_last_5: f64,
    pub opp_ppm_last_10: f64,
    // Standings
    pub team_rank: u32,
    pub opp_rank: u32,
    pub team_home_rank: u32,
    pub team_away_rank: u32,
    pub opp_home_rank: u32,
    pub opp_away_rank: u32,
    // Head-to-head over the last five meetings
    pub h2h_win_rate_5: f64,
    pub h2h_loss_rate_5: f64,
    pub h2h_matches_5: u32,
    // Opponent against top sides
    pub opp_vs_top_teams_ppm: f64,
    pub league_ppm_top_threshold: f64,
    // Net lineup impact in [-1, 1], from the lineup engine when available.
    #[serde(default)]
    pub lineup_strength_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Absences,
    Form,
    HomeAway,
    Standings,
    H2h,
    OppVsStrong,
    Lineup,
}

impl Factor {
    /// Fixed display and aggregation order.
    pub const ALL: [Factor; 7] = [
        Factor::Absences,
        Factor::Form,
        Factor::HomeAway,
        Factor::Standings,
        Factor::H2h,
        Factor::OppVsStrong,
        Factor::Lineup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Factor::Absences => "absences",
            Factor::Form => "form",
            Factor::HomeAway => "home_away",
            Factor::Standings => "standings",
            Factor::H2h => "h2h",
            Factor::OppVsStrong => "opp_vs_strong",
            Factor::Lineup => "lineup",
        }
    }
}

/// One value per factor. Doubles as a score set (each in [-1, 1]) and a
/// weight set (non-negative, summing to 1). A typed record instead of a
/// string-keyed map: a factor can neither be misspelled nor dropped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorValues {
    pub absences: f64,
    pub form: f64,
    pub home_away: f64,
    pub standings: f64,
    pub h2h: f64,
    pub opp_vs_strong: f64,
    pub lineup: f64,
}

impl FactorValues {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Absences => self.absences,
            Factor::Form => self.form,
            Factor::HomeAway => self.home_away,
            Factor::Standings => self.standings,
            Factor::H2h => self.h2h,
            Factor::OppVsStrong => self.opp_vs_strong,
            Factor::Lineup => self.lineup,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }
}

pub type ScoreSet = FactorValues;
pub type WeightSet = FactorValues;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightRegime {
    /// Absences are severe enough to dominate the weighting.
    AbsenceDominant,
    /// Default weighting led by form and venue.
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbs {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub scores: ScoreSet,
    pub weights: WeightSet,
    pub regime: WeightRegime,
    pub global_score: f64,
    pub probabilities: OutcomeProbs,
    pub explanation: String,
}
