use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use prematch::lineup_impact::compute_lineup_impact_default;
use prematch::player_impact::PlayerImpactRecord;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let (Some(table_path), Some(lineup_path)) = (args.next(), args.next()) else {
        bail!("usage: lineup <impact_table.json> <lineup.json>");
    };

    let table: Vec<PlayerImpactRecord> = read_json(&table_path)?;
    let lineup: Vec<String> = read_json(&lineup_path)?;

    let result = compute_lineup_impact_default(&lineup, &table);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
