//! Basic example: evaluating a curved stat profile
//!
//! This example demonstrates:
//! - Building a profile with rank multipliers and a keyframe curve
//! - Evaluating it at a few levels for every rank
//! - Tracing one evaluation step by step

use statcurve::*;

fn main() -> Result<(), GrowthError> {
    // Growth accelerates through the middle of the range, then eases off
    let curve = KeyframeCurve::new(vec![
        Keyframe::new(0.0, 0.0),
        Keyframe::new(0.5, 1.0),
        Keyframe::new(1.0, 0.2),
    ])?;

    let profile = StatProfile::new(10.0, 1.0)
        .with_multipliers(RankMultipliers::default())
        .with_curve(curve, 0.5);
    profile.validate()?;

    let range = LevelRange::new(1, 100);
    println!("Profile: {:?}", profile);
    println!("Range: {}..={}", range.min(), range.max());

    println!("\n=== Values by Rank ===");
    println!("{:>6} {:>10} {:>10} {:>10} {:>10}", "Level", "R", "SR", "SSR", "UR");
    for level in [1, 10, 25, 50, 75, 100] {
        print!("{:>6}", level);
        for rank in Rank::ALL {
            print!(" {:>10.2}", evaluate(&profile, level, range, rank));
        }
        println!();
    }

    println!("\n=== Breakdown (level 6, SR) ===");
    let breakdown = evaluate_detailed(&profile, 6, range, Rank::SR);
    for step in &breakdown.steps {
        println!(
            "  L{:<3} t={:.3} factor={:.4} step={:.4} bonus={:.4}",
            step.level, step.progress, step.curve_factor, step.step_growth, step.bonus
        );
    }
    println!(
        "\nCalculation: {} * {:.4} * {} = {:.4}",
        breakdown.base, breakdown.bonus, breakdown.rank_multiplier, breakdown.value
    );

    Ok(())
}
