// lcstats-core/tests/engine_tests.rs
use anyhow::Result;
use std::sync::Arc;
use test_log::test;

use lcstats_core::{
    headless_extract, EngineConfig, FeatureEngine, FourierStatsEngine, FullStatsEngine,
    HeadlessEngineType, LightCurve, BASIC_FEATURE_NAMES,
};

fn sample_curve(phase_shift: f64) -> LightCurve {
    let t: Vec<f64> = (0..40).map(|i| f64::from(i) * 0.61 + 0.03 * f64::from(i % 3)).collect();
    let mag: Vec<f64> = t
        .iter()
        .map(|x| 17.0 + 0.25 * (2.0 * std::f64::consts::PI * x / 3.1 + phase_shift).sin())
        .collect();
    LightCurve::new(t, mag, vec![0.02; 40]).unwrap()
}

#[test]
fn test_engines_are_interchangeable_behind_the_trait() -> Result<()> {
    let config = EngineConfig::load_default()?;
    let engines: Vec<Box<dyn FeatureEngine>> = vec![
        Box::new(FullStatsEngine::new(config.clone())?),
        Box::new(FourierStatsEngine::new(config.clone())?),
    ];

    let lc = sample_curve(0.0);
    let full = engines[0].extract(&lc, 3.1);
    let fourier_only = engines[1].extract(&lc, 3.1);

    assert_eq!(full.len(), 36);
    assert_eq!(fourier_only.len(), 14);
    assert_eq!(&full.as_slice()[22..], fourier_only.as_slice());
    assert_eq!(&full.names()[..22], &BASIC_FEATURE_NAMES.map(String::from)[..]);
    assert_eq!(engines[0].config(), &config);
    Ok(())
}

#[test]
fn test_engine_can_be_shared_across_threads() -> Result<()> {
    let engine = Arc::new(FullStatsEngine::new(EngineConfig::load_default()?)?);
    let shifts = [0.0, 0.5, 1.0, 1.5];

    let parallel: Vec<Vec<f64>> = std::thread::scope(|scope| {
        let handles: Vec<_> = shifts
            .iter()
            .map(|&shift| {
                let engine = Arc::clone(&engine);
                scope.spawn(move || engine.extract(&sample_curve(shift), 3.1).as_slice().to_vec())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (shift, row) in shifts.iter().zip(&parallel) {
        let sequential = engine.extract(&sample_curve(*shift), 3.1).as_slice().to_vec();
        let bits = |r: &[f64]| r.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(row), bits(&sequential));
    }
    Ok(())
}

#[test]
fn test_fourier_block_tracks_signal_amplitude() -> Result<()> {
    let engine = FourierStatsEngine::new(EngineConfig::load_default()?)?;
    let row = engine.extract(&sample_curve(0.3), 3.1);

    let amp = row.get("f1_amp").unwrap();
    assert!((amp - 0.25).abs() < 1e-6, "f1_amp = {}", amp);
    assert!(row.get("f1_power").unwrap() > 0.999);
    Ok(())
}

#[test]
fn test_headless_extract_matches_engine() -> Result<()> {
    let lc = sample_curve(0.7);
    let config = EngineConfig::load_default()?;
    let engine = FullStatsEngine::new(config.clone())?;

    let from_engine = engine.extract(&lc, 3.1);
    let from_headless = headless_extract(
        config,
        lc.t().to_vec(),
        lc.mag().to_vec(),
        lc.err().to_vec(),
        3.1,
        HeadlessEngineType::Full,
    )?;

    assert_eq!(from_engine.names(), from_headless.names());
    let bits = |r: &[f64]| r.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(from_engine.as_slice()), bits(from_headless.as_slice()));
    Ok(())
}

#[test]
fn test_feature_vector_serializes_in_column_order() -> Result<()> {
    let engine = FourierStatsEngine::new(EngineConfig::load_default()?)?;
    let row = engine.extract(&sample_curve(0.0), 3.1);
    let json: serde_json::Value = serde_json::to_value(&row)?;

    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 14);
    assert_eq!(items[0]["name"], "f1_power");
    assert_eq!(items[13]["name"], "f1_relphi4");
    Ok(())
}
