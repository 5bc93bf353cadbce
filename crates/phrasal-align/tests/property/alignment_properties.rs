//! Property tests for phrasal-align: length, coverage, determinism, and
//! strategy agreement on feasible inputs.

use std::sync::Arc;

use proptest::prelude::*;

use phrasal_align::Aligner;
use phrasal_core::config::{AlignmentConfig, EmbeddingConfig};
use phrasal_core::AlignStrategy;
use phrasal_embeddings::EmbeddingEngine;

fn engine() -> Arc<EmbeddingEngine> {
    let config = EmbeddingConfig {
        dimensions: 64,
        ..EmbeddingConfig::default()
    };
    Arc::new(EmbeddingEngine::new(&config).unwrap())
}

fn han_unit() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('一', '龥'), 1..4)
        .prop_map(|chars| chars.into_iter().collect())
}

fn hangul_token() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('가', '힣'), 1..4)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn result_length_equals_unit_count(
        units in prop::collection::vec(han_unit(), 0..8),
        tokens in prop::collection::vec(hangul_token(), 0..12),
    ) {
        let aligner = Aligner::new(engine(), AlignmentConfig::default());
        let out = aligner.align(&units, &tokens).unwrap();
        prop_assert_eq!(out.len(), units.len());
    }

    #[test]
    fn feasible_inputs_tile_every_token(
        units in prop::collection::vec(han_unit(), 1..6),
        extra in 0usize..10,
    ) {
        // M in [N, 2N] keeps L * N >= M, so a full tiling exists.
        let m = units.len() + extra.min(units.len());
        let tokens: Vec<String> = (0..m).map(|t| format!("토큰{t}")).collect();

        let aligner = Aligner::new(engine(), AlignmentConfig::default());
        let out = aligner.align_detailed(&units, &tokens).unwrap();

        prop_assert!(out.best_score.is_some());
        prop_assert!(out.recoveries.is_empty());
        let mut cursor = 0;
        for span in &out.spans {
            let span = span.unwrap();
            prop_assert_eq!(span.start, cursor);
            prop_assert!(span.len() >= 1 && span.len() <= out.max_span_len);
            cursor = span.end;
        }
        prop_assert_eq!(cursor, tokens.len());
    }

    #[test]
    fn alignment_is_deterministic(
        units in prop::collection::vec(han_unit(), 0..6),
        tokens in prop::collection::vec(hangul_token(), 0..10),
    ) {
        let oracle = engine();
        let first = Aligner::new(oracle.clone(), AlignmentConfig::default())
            .align(&units, &tokens)
            .unwrap();
        let second = Aligner::new(oracle, AlignmentConfig::default())
            .align(&units, &tokens)
            .unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn strategies_agree_when_feasible(
        units in prop::collection::vec(han_unit(), 1..5),
        tokens in prop::collection::vec(hangul_token(), 1..10),
    ) {
        let oracle = engine();
        let reconciling = Aligner::new(oracle.clone(), AlignmentConfig::default());
        let strict = Aligner::new(oracle, AlignmentConfig::default())
            .with_strategy(AlignStrategy::Strict);

        let a = reconciling.align_detailed(&units, &tokens).unwrap();
        let b = strict.align_detailed(&units, &tokens).unwrap();
        if a.best_score.is_some() {
            prop_assert_eq!(a.segments, b.segments);
        } else {
            prop_assert!(b.segments.iter().all(String::is_empty));
        }
    }

    #[test]
    fn span_limit_stays_in_bounds(n in 0usize..50, m in 0usize..500) {
        let aligner = Aligner::new(engine(), AlignmentConfig::default());
        let l = aligner.max_span_len(n, m);
        prop_assert!((1..=15).contains(&l));
        if n > 0 && m / n <= 7 {
            prop_assert_eq!(l, (2 * (m / n)).max(1));
        }
    }
}
