use statcurve::*;
use std::sync::Arc;

fn curved_profile() -> StatProfile {
    let curve = KeyframeCurve::new(vec![
        Keyframe::new(0.0, 0.0),
        Keyframe::new(0.5, 1.0),
        Keyframe::new(1.0, 0.25),
    ])
    .unwrap();
    StatProfile::new(12.0, 1.5)
        .with_multipliers(RankMultipliers::default())
        .with_curve(curve, 0.8)
}

/// Zero growth leaves every level at `base * multiplier`.
#[test]
fn test_zero_growth_is_flat() {
    let profile = StatProfile::new(25.0, 0.0)
        .with_multipliers(RankMultipliers::default())
        .with_curve(ConstantCurve(3.0), 2.0);
    let range = LevelRange::new(1, 60);

    for rank in Rank::ALL {
        let expected = 25.0 * floor_rank_multiplier(profile.rank_multiplier(rank));
        for level in [1, 2, 30, 60, 120] {
            assert_eq!(evaluate(&profile, level, range, rank), expected);
        }
    }
}

/// Level 1 is never compounded, whatever the growth or curve.
#[test]
fn test_level_one_is_base() {
    let profile = curved_profile();
    let range = LevelRange::new(5, 80);

    for rank in Rank::ALL {
        let expected = 12.0 * profile.rank_multiplier(rank);
        assert_eq!(evaluate(&profile, 1, range, rank), expected);
        assert_eq!(evaluate(&profile, 0, range, rank), expected);
        assert_eq!(evaluate(&profile, i32::MIN, range, rank), expected);
    }
}

#[test]
fn test_monotonic_with_positive_factors() {
    let profile = curved_profile();
    let range = LevelRange::new(1, 100);

    let mut previous = evaluate(&profile, 1, range, Rank::SSR);
    for level in 2..=150 {
        let value = evaluate(&profile, level, range, Rank::SSR);
        assert!(value >= previous, "level {} dropped: {} < {}", level, value, previous);
        previous = value;
    }
}

#[test]
fn test_deterministic() {
    let profile = curved_profile();
    let range = LevelRange::new(1, 100);

    for level in [1, 17, 50, 99, 100, 101] {
        let first = evaluate(&profile, level, range, Rank::UR);
        for _ in 0..5 {
            assert_eq!(evaluate(&profile, level, range, Rank::UR).to_bits(), first.to_bits());
        }
    }
}

#[test]
fn test_single_sample_is_range_min() {
    let profile = curved_profile();
    let range = LevelRange::new(10, 40);

    let samples: Vec<Sample> = sample_series(&profile, range, Rank::R, 1).collect();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].level, 10);
    assert_eq!(samples[0].value, evaluate(&profile, 10, range, Rank::R));

    let samples: Vec<Sample> = sample_series(&profile, range, Rank::R, 0).collect();
    assert_eq!(samples.len(), 1);
}

#[test]
fn test_concrete_scenario() {
    let profile = StatProfile::new(10.0, 1.0);
    let range = LevelRange::new(1, 100);

    assert!((evaluate(&profile, 2, range, Rank::R) - 10.5).abs() < 1e-4);
    assert!((evaluate(&profile, 3, range, Rank::R) - 11.025).abs() < 1e-4);
}

#[test]
fn test_zero_multiplier_floors() {
    let profile = StatProfile::new(10.0, 1.0).with_multipliers(RankMultipliers::uniform(0.0));
    let range = LevelRange::new(1, 100);

    let value = evaluate(&profile, 3, range, Rank::SR);
    assert!(value > 0.0);
    assert!((value - 11.025 * MIN_RANK_MULTIPLIER).abs() < 1e-9);

    let negative = profile.clone().with_multipliers(RankMultipliers::uniform(-4.0));
    assert_eq!(
        evaluate(&negative, 3, range, Rank::SR).to_bits(),
        value.to_bits()
    );
}

#[test]
fn test_single_level_range() {
    // min == max: span is 1, so progress is 0 at min and clamps to 1 above it
    let identity = FnCurve::new(|t| t, "identity");
    let profile = StatProfile::new(10.0, 1.0).with_curve(identity, 1.0);
    let range = LevelRange::new(5, 5);

    let breakdown = evaluate_detailed(&profile, 7, range, Rank::R);
    assert_eq!(breakdown.steps.len(), 6);
    assert_eq!(breakdown.step_at(2).unwrap().progress, 0.0);
    assert_eq!(breakdown.step_at(5).unwrap().progress, 0.0);
    assert_eq!(breakdown.step_at(6).unwrap().progress, 1.0);
    assert_eq!(breakdown.step_at(7).unwrap().curve_factor, 2.0);
}

#[test]
fn test_breakdown_matches_evaluate() {
    let profile = curved_profile();
    let range = LevelRange::new(1, 100);

    for level in [1, 2, 50, 100, 130] {
        for rank in Rank::ALL {
            let detailed = evaluate_detailed(&profile, level, range, rank);
            let plain = evaluate(&profile, level, range, rank);
            assert_eq!(detailed.value.to_bits(), plain.to_bits());
            assert_eq!(detailed.steps.len(), (level - 1) as usize);
        }
    }
}

#[test]
fn test_breakdown_steps_compound() {
    let profile = curved_profile();
    let breakdown = evaluate_detailed(&profile, 10, LevelRange::new(1, 10), Rank::R);

    let mut bonus = 1.0;
    for step in &breakdown.steps {
        let expected_growth = profile.growth_rate() * step.curve_factor * GROWTH_STEP_SCALE;
        assert_eq!(step.step_growth, expected_growth);
        bonus *= 1.0 + step.step_growth;
        assert_eq!(step.bonus, bonus);
    }
    assert_eq!(breakdown.bonus, bonus);
}

#[test]
fn test_breakdown_serializes() {
    let profile = StatProfile::new(10.0, 1.0);
    let breakdown = evaluate_detailed(&profile, 3, LevelRange::default(), Rank::SR);

    let json = serde_json::to_string(&breakdown).unwrap();
    let back: GrowthBreakdown = serde_json::from_str(&json).unwrap();
    assert_eq!(back.rank, Rank::SR);
    assert_eq!(back.steps.len(), 2);
}

#[test]
fn test_shared_curve_between_profiles() {
    let curve: Arc<dyn ResponseCurve> = Arc::new(KeyframeCurve::linear(0.0, 0.0, 1.0, 1.0).unwrap());
    let a = StatProfile::new(10.0, 1.0).with_shared_curve(Arc::clone(&curve), 1.0);
    let b = StatProfile::new(20.0, 1.0).with_shared_curve(curve, 1.0);
    let range = LevelRange::new(1, 50);

    let va = evaluate(&a, 40, range, Rank::R);
    let vb = evaluate(&b, 40, range, Rank::R);
    assert!((vb - 2.0 * va).abs() < 1e-9);
}

#[test]
fn test_series_levels_span_range() {
    let profile = StatProfile::new(10.0, 1.0);
    let range = LevelRange::new(1, 100);

    let series = sample_series(&profile, range, Rank::R, 200);
    assert_eq!(series.len(), 200);
    let samples: Vec<Sample> = series.collect();
    assert_eq!(samples.first().unwrap().level, 1);
    assert_eq!(samples.last().unwrap().level, 100);
    assert!(samples.windows(2).all(|w| w[0].level <= w[1].level));
    assert!(samples.iter().all(|s| range.contains(s.level)));
}

#[test]
fn test_evaluate_across_threads() {
    let profile = Arc::new(curved_profile());
    let range = LevelRange::new(1, 100);
    let expected = evaluate(&profile, 75, range, Rank::SSR);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let profile = Arc::clone(&profile);
            std::thread::spawn(move || evaluate(&profile, 75, range, Rank::SSR))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().to_bits(), expected.to_bits());
    }
}

#[test]
fn test_cache_over_profiles() {
    let mut cache = GrowthCache::new();
    let range = LevelRange::new(1, 100);
    let ids: Vec<ProfileId> = ["A-STR", "A-DEX", "B-STR"].iter().map(|&s| s.into()).collect();
    for (i, id) in ids.iter().enumerate() {
        cache.register(id.clone(), StatProfile::new(10.0 + i as f64, 1.0), range);
    }

    for id in &ids {
        for level in 1..=10 {
            let value = cache.evaluate(id, level, Rank::R).unwrap();
            let direct = evaluate(cache.profile(id).unwrap(), level, range, Rank::R);
            assert_eq!(value.to_bits(), direct.to_bits());
        }
    }
    assert_eq!(cache.len(), 30);

    cache.invalidate(&ids[1]);
    assert_eq!(cache.len(), 20);
    assert!(matches!(
        cache.evaluate(&ProfileId::from_str("C-LUK"), 1, Rank::R),
        Err(GrowthError::UnknownProfile(_))
    ));
}

#[test]
fn test_validate_reports_field() {
    let profile = StatProfile::new(f64::NAN, 1.0);
    assert_eq!(
        profile.validate(),
        Err(GrowthError::NonFinite { field: "base" })
    );
    assert!(curved_profile().validate().is_ok());
}
