//! Preview example: comparing characters and exporting CSV
//!
//! This example demonstrates:
//! - Setting up a multi-character preset
//! - Building sampled series for visible stats and ranks
//! - Saving the preset and exporting the series as CSV

use statcurve::preset::{auto_y_max, CurvePreset, StatKind};
use statcurve::*;

fn main() -> Result<(), GrowthError> {
    let mut preset = CurvePreset {
        max_level: 60,
        samples: 12,
        ..CurvePreset::default()
    };
    preset.visible_stats = [StatKind::Str, StatKind::Luk].into_iter().collect();
    preset.visible_ranks = [Rank::R, Rank::UR].into_iter().collect();

    // B is a late bloomer
    let b = &mut preset.characters[1];
    b.strength.base = 8.0;
    b.strength.growth = 1.4;
    b.strength.curve = KeyframeCurve::linear(0.0, 0.0, 1.0, 1.0)?;

    // C copies A with a stronger luck line
    let copy = preset.duplicate_character(0).unwrap_or(0);
    preset.characters[copy].luck.growth = 2.0;

    let series = preset.build_series();
    println!("Built {} series, y max = {:.2}", series.len(), auto_y_max(&series));
    for s in &series {
        let last = s.samples.last().map(|p| p.value).unwrap_or_default();
        println!("  {:<16} L{} = {:.2}", s.name, preset.level_range().max(), last);
    }

    let dir = std::env::temp_dir().join("statcurve-preview");
    std::fs::create_dir_all(&dir).map_err(|e| GrowthError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let preset_path = dir.join("preset.json");
    preset.save(&preset_path)?;
    let csv_path = dir.join("series.csv");
    preset.export_csv(&csv_path, &series)?;

    println!("\nPreset: {}", preset_path.display());
    println!("CSV: {}", csv_path.display());

    let mut out = Vec::new();
    preset
        .write_csv(&mut out, &series[..2])
        .map_err(|e| GrowthError::Io {
            path: String::from("<memory>"),
            message: e.to_string(),
        })?;
    println!("\n{}", String::from_utf8_lossy(&out));

    Ok(())
}
