//! Player example: table rows driving in-game stats
//!
//! This example demonstrates:
//! - Registering and loading a data table from JSON text
//! - Levelling a player and reading derived stats
//! - Caching balancing values for a table row

use statcurve::player::{PlayerProgress, PlayerStatRow};
use statcurve::preset::StatKind;
use statcurve::table::DataTables;
use statcurve::*;

const PLAYER_TABLE: &str = r#"[
    {"Id": "knight", "UnitRank": "SR", "Str": 15, "Dex": 9, "Luk": 6,
     "StrGrowthRate": 1.2, "DexGrowthRate": 0.8, "LukGrowthRate": 0.5}
]"#;

fn main() -> Result<(), GrowthError> {
    let mut tables = DataTables::new();
    tables.register::<PlayerStatRow>();
    tables.load_text("PlayerStatTable.json", PLAYER_TABLE)?;

    let Some(row) = tables.get_all::<PlayerStatRow>().first().cloned() else {
        println!("No player rows loaded");
        return Ok(());
    };
    println!("Loaded row {} ({})", row.id, row.unit_rank);

    let mut progress = PlayerProgress::new(row.clone());
    println!("\n=== Level Up ===");
    for _ in 0..5 {
        let stats = progress.level_up();
        println!(
            "  Lv{:<3} STR {:>3} DEX {:>3} LUK {:>3} dmg {:>7.2} spd {:.3}",
            progress.level(),
            stats.str,
            stats.dex,
            stats.luk,
            stats.damage,
            stats.speed
        );
    }
    let stats = progress.reset();
    println!("Reset to Lv{}: STR {}", progress.level(), stats.str);

    println!("\n=== Balancing Values ===");
    let mut cache = GrowthCache::new();
    let range = LevelRange::new(1, 100);
    for kind in StatKind::ALL {
        let id = ProfileId::from(format!("{}-{}", row.id, kind));
        cache.register(id.clone(), row.profile(kind, RankMultipliers::default()), range);
        let value = cache.evaluate(&id, 50, row.unit_rank)?;
        println!("  {} at Lv50: {:.2}", id, value);
    }
    println!("Cached values: {}", cache.len());

    Ok(())
}
