use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use prematch::context::MatchContext;
use prematch::engine::compute_match_prediction;

fn main() -> anyhow::Result<()> {
    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: predict <match_context.json>");
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("read match context {}", path.display()))?;
    let ctx: MatchContext = serde_json::from_str(&raw)
        .with_context(|| format!("parse match context {}", path.display()))?;

    let result = compute_match_prediction(&ctx);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
