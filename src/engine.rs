// Single source of truth for the global score and the win/draw/loss
// probabilities. Upstream collaborators only build a MatchContext and call
// compute_match_prediction; everything in here is pure and total over
// finite inputs.

use rayon::prelude::*;

use crate::config::ModelConfig;
use crate::context::{
    MatchContext, OutcomeProbs, PredictionResult, ScoreSet, WeightRegime, WeightSet,
};
use crate::explain::explain_prediction;

fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

/// More and costlier absences push toward -1; a full squad sits at 0.
pub fn score_absences(ctx: &MatchContext) -> f64 {
    let raw = -(ctx.key_absences_impact + ctx.key_absences_count as f64 * 0.5);
    clamp_unit(raw / 5.0)
}

pub fn score_form(ctx: &MatchContext) -> f64 {
    let own = (ctx.ppm_last_5 + ctx.ppm_last_10) / 2.0;
    let opp = (ctx.opp_ppm_last_5 + ctx.opp_ppm_last_10) / 2.0;
    clamp_unit((own - opp) / 3.0)
}

/// Fixed venue bonus, deliberately not data-driven.
pub fn score_home_away(ctx: &MatchContext) -> f64 {
    if ctx.is_home { 0.25 } else { -0.25 }
}

/// Average of the overall rank gap and the venue-specific rank gap, each
/// scaled so roughly ten positions reach the extremes.
pub fn score_standings(ctx: &MatchContext) -> f64 {
    let overall = (ctx.opp_rank as f64 - ctx.team_rank as f64) / 10.0;
    let (own_ctx, opp_ctx) = if ctx.is_home {
        (ctx.team_home_rank, ctx.opp_away_rank)
    } else {
        (ctx.team_away_rank, ctx.opp_home_rank)
    };
    let contextual = (opp_ctx as f64 - own_ctx as f64) / 10.0;
    clamp_unit((overall + contextual) / 2.0)
}

/// Zero on an empty sample: five meetings is already thin, none at all is
/// no signal.
pub fn score_h2h(ctx: &MatchContext) -> f64 {
    if ctx.h2h_matches_5 == 0 {
        return 0.0;
    }
    clamp_unit(ctx.h2h_win_rate_5 - ctx.h2h_loss_rate_5)
}

/// An opponent that overperforms against top sides makes the fixture
/// harder, hence the negated difference.
pub fn score_opponent_vs_strong(ctx: &MatchContext) -> f64 {
    let diff = ctx.opp_vs_top_teams_ppm - ctx.league_ppm_top_threshold;
    clamp_unit(-diff / 2.0)
}

pub fn score_lineup(ctx: &MatchContext) -> f64 {
    clamp_unit(ctx.lineup_strength_score)
}

pub fn score_factors(ctx: &MatchContext) -> ScoreSet {
    ScoreSet {
        absences: score_absences(ctx),
        form: score_form(ctx),
        home_away: score_home_away(ctx),
        standings: score_standings(ctx),
        h2h: score_h2h(ctx),
        opp_vs_strong: score_opponent_vs_strong(ctx),
        lineup: score_lineup(ctx),
    }
}

/// Strictly below the threshold the absence-dominant weights take over;
/// at the threshold itself the balanced set still applies.
pub fn select_weights(config: &ModelConfig, absence_score: f64) -> (WeightRegime, WeightSet) {
    if absence_score < config.absence_regime_threshold {
        (
            WeightRegime::AbsenceDominant,
            config.absence_dominant_weights,
        )
    } else {
        (WeightRegime::Balanced, config.balanced_weights)
    }
}

pub fn aggregate(scores: &ScoreSet, weights: &WeightSet) -> f64 {
    let total: f64 = scores
        .iter()
        .map(|(factor, score)| score * weights.get(factor))
        .sum();
    clamp_unit(total)
}

/// Three-way logit transform: win and loss logits mirror each other and
/// the draw logit decays with distance from a level score, so evenly
/// matched sides draw most often.
pub fn probabilities_from_score(global_score: f64, sharpness: f64) -> OutcomeProbs {
    let x = global_score * sharpness;
    let win = x.exp();
    let draw = (-x.abs()).exp();
    let loss = (-x).exp();
    let total = win + draw + loss;
    OutcomeProbs {
        win: win / total,
        draw: draw / total,
        loss: loss / total,
    }
}

pub fn compute_match_prediction(ctx: &MatchContext) -> PredictionResult {
    compute_match_prediction_with(&ModelConfig::default(), ctx)
}

pub fn compute_match_prediction_with(config: &ModelConfig, ctx: &MatchContext) -> PredictionResult {
    let scores = score_factors(ctx);
    let (regime, weights) = select_weights(config, scores.absences);
    let global_score = aggregate(&scores, &weights);
    let probabilities = probabilities_from_score(global_score, config.sharpness);
    let explanation = explain_prediction(&scores, &weights);
    PredictionResult {
        scores,
        weights,
        regime,
        global_score,
        probabilities,
        explanation,
    }
}

/// Contexts are independent, so a fixture list is scored in parallel.
/// Output order matches input order.
pub fn predict_all(contexts: &[MatchContext]) -> Vec<PredictionResult> {
    predict_all_with(&ModelConfig::default(), contexts)
}

pub fn predict_all_with(config: &ModelConfig, contexts: &[MatchContext]) -> Vec<PredictionResult> {
    contexts
        .par_iter()
        .map(|ctx| compute_match_prediction_with(config, ctx))
        .collect()
}

/// New context with the lineup engine's net score injected; the original
/// is left untouched.
pub fn with_lineup_strength(ctx: &MatchContext, lineup_strength_score: f64) -> MatchContext {
    MatchContext {
        lineup_strength_score,
        ..ctx.clone()
    }
}
