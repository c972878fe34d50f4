// Turns a score/weight pair into the audit text shown next to the
// probabilities. Display-only: nothing here feeds back into the numbers.

use crate::context::{ScoreSet, WeightSet};

pub fn explain_prediction(scores: &ScoreSet, weights: &WeightSet) -> String {
    let mut reasons: Vec<&'static str> = Vec::new();

    if scores.absences <= -0.4 {
        reasons.push("Heavy absences in the squad (dominant factor).");
    } else if scores.absences < 0.0 {
        reasons.push("A few absences slightly weaken the team.");
    } else {
        reasons.push("Squad near full strength, absences barely register.");
    }

    if scores.form >= 0.3 {
        reasons.push("Recent form clearly favors the team.");
    } else if scores.form <= -0.3 {
        reasons.push("Recent form favors the opponent.");
    }

    if scores.home_away > 0.0 {
        reasons.push("Playing at home.");
    } else {
        reasons.push("Playing away.");
    }

    if scores.standings >= 0.3 {
        reasons.push("Overall and venue-specific standings clearly favor the team.");
    } else if scores.standings <= -0.3 {
        reasons.push("Standings lean toward the opponent.");
    }

    if scores.h2h >= 0.2 {
        reasons.push("Recent head-to-head record is favorable.");
    } else if scores.h2h <= -0.2 {
        reasons.push("Recent head-to-head record is unfavorable.");
    }

    if scores.opp_vs_strong <= -0.2 {
        reasons.push("Opponent performs well against strong sides.");
    } else if scores.opp_vs_strong >= 0.2 {
        reasons.push("Opponent struggles against strong sides.");
    }

    if scores.lineup >= 0.4 {
        reasons.push("Starting lineup very close to the best available eleven.");
    } else if scores.lineup >= 0.15 {
        reasons.push("Starting lineup broadly competitive despite some adjustments.");
    } else if scores.lineup <= -0.4 {
        reasons.push("Starting eleven badly weakened by rotation or major absences.");
    } else if scores.lineup <= -0.15 {
        reasons.push("Starting eleven slightly below the squad's best potential.");
    }

    if weights.absences > weights.form {
        reasons.push("Absences carry the dominant weight in this context.");
    } else {
        reasons.push("Recent form and venue dominate the weighting.");
    }

    reasons.join(" ")
}
