//! Property tests for indicator and scoring invariants.
//!
//! Uses proptest to verify:
//! 1. Alignment: every indicator output has the input's length
//! 2. SMA identity: window 1 returns the input unchanged
//! 3. RSI bounds: index 0 is 50 and every value lies in [0, 100]
//! 4. Volatility warmup: indices below the window are exactly 0
//! 5. Parameter defaulting is idempotent
//! 6. Score and confidence stay clamped for any inputs

use proptest::prelude::*;
use robx_core::indicators::{rsi, sma, volatility};
use robx_core::signals::scoring::{confidence, recommendation_for, score, LatestValues};
use robx_core::{Recommendation, SignalParameters};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_prices() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..1000.0_f64, 0..120)
}

fn arb_window() -> impl Strategy<Value = usize> {
    0usize..80
}

fn arb_param() -> impl Strategy<Value = Option<u32>> {
    prop::option::of(0u32..200)
}

fn arb_params() -> impl Strategy<Value = SignalParameters> {
    (
        arb_param(),
        arb_param(),
        arb_param(),
        arb_param(),
        arb_param(),
        arb_param(),
        arb_param(),
    )
        .prop_map(|(s, l, p, ob, os, vw, volw)| SignalParameters {
            short_window: s,
            long_window: l,
            rsi_period: p,
            rsi_overbought: ob,
            rsi_oversold: os,
            volume_window: vw,
            volatility_window: volw,
        })
}

fn arb_latest() -> impl Strategy<Value = LatestValues> {
    (
        0.0..1e4_f64,
        0.0..1e4_f64,
        0.0..1e4_f64,
        0.0..=100.0_f64,
        0.0..1e7_f64,
        0.0..1e7_f64,
        0.0..1.0_f64,
    )
        .prop_map(|(close, sma_short, sma_long, rsi, volume, volume_ma, volatility)| {
            LatestValues {
                close,
                sma_short,
                sma_long,
                rsi,
                volume,
                volume_ma,
                volatility,
            }
        })
}

// ── 1–2. SMA ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn sma_preserves_length(values in arb_prices(), window in arb_window()) {
        prop_assert_eq!(sma(&values, window).len(), values.len());
    }

    #[test]
    fn sma_window_one_is_identity(values in arb_prices()) {
        prop_assert_eq!(sma(&values, 1), values);
    }

    /// The average of a full window lies between the window's min and max.
    #[test]
    fn sma_within_window_range(values in arb_prices(), window in 1usize..30) {
        let result = sma(&values, window);
        for i in (window.saturating_sub(1))..values.len() {
            let slice = &values[i + 1 - window..=i];
            let lo = slice.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(result[i] >= lo - 1e-6 && result[i] <= hi + 1e-6);
        }
    }
}

// ── 3. RSI ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_bounded_and_starts_neutral(values in arb_prices(), period in arb_window()) {
        let result = rsi(&values, period);
        prop_assert_eq!(result.len(), values.len());
        if let Some(&first) = result.first() {
            prop_assert_eq!(first, 50.0);
        }
        for (i, &v) in result.iter().enumerate() {
            prop_assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {}: {}", i, v);
        }
    }
}

// ── 4. Volatility ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn volatility_zero_during_warmup(
        values in prop::collection::vec(1.0..1000.0_f64, 0..120),
        window in 2usize..60,
    ) {
        let result = volatility(&values, window);
        prop_assert_eq!(result.len(), values.len());
        for &v in result.iter().take(window) {
            prop_assert_eq!(v, 0.0);
        }
        prop_assert!(result.iter().all(|v| v.is_finite() && *v >= 0.0));
    }
}

// ── 5. Defaulting ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn defaulting_is_idempotent(params in arb_params()) {
        let once = params.with_defaults();
        prop_assert_eq!(once.with_defaults(), once);
    }

    #[test]
    fn defaulting_leaves_no_zero_or_unset_field(params in arb_params()) {
        let p = params.with_defaults();
        for field in [
            p.short_window, p.long_window, p.rsi_period, p.rsi_overbought,
            p.rsi_oversold, p.volume_window, p.volatility_window,
        ] {
            prop_assert!(matches!(field, Some(v) if v > 0));
        }
    }
}

// ── 6. Clamped score ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn score_and_confidence_are_clamped(latest in arb_latest(), params in arb_params()) {
        let s = score(&latest, &params);
        prop_assert!((0.0..=100.0).contains(&s));
        let c = confidence(s);
        prop_assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn decision_agrees_with_bands(latest in arb_latest()) {
        let s = score(&latest, &SignalParameters::default());
        let rec = recommendation_for(s);
        match rec {
            Recommendation::Buy => prop_assert!(s >= 60.0),
            Recommendation::Sell => prop_assert!(s <= 40.0),
            Recommendation::Hold => prop_assert!(s > 40.0 && s < 60.0),
        }
    }
}
