use phrasal_core::errors::*;
use phrasal_core::PhraseRecord;

#[test]
fn count_mismatch_carries_values() {
    let err = EmbeddingError::CountMismatch {
        expected: 12,
        actual: 7,
    };
    let msg = err.to_string();
    assert!(msg.contains("12"));
    assert!(msg.contains("7"));
}

#[test]
fn scratch_error_carries_widths() {
    let err = AlignmentError::ScratchNotPrepared {
        expected: 6,
        actual: 4,
    };
    let msg = err.to_string();
    assert!(msg.contains('6'));
    assert!(msg.contains('4'));
}

// --- From impls ---

#[test]
fn embedding_error_converts_to_phrasal_error() {
    let err: PhrasalError = EmbeddingError::InferenceFailed {
        reason: "gpu gone".into(),
    }
    .into();
    assert!(err.is_oracle_failure());
    assert!(err.to_string().contains("gpu gone"));
}

#[test]
fn alignment_error_is_not_an_oracle_failure() {
    let err: PhrasalError = AlignmentError::InvalidSpanLimit { value: 0 }.into();
    assert!(!err.is_oracle_failure());
    assert!(matches!(err, PhrasalError::AlignmentError(_)));
}

#[test]
fn phrase_record_serializes_to_one_line() {
    let record = PhraseRecord {
        sentence_id: 3,
        phrase_id: 1,
        source_phrase: "子曰".into(),
        target_phrase: "공자가 말하길".into(),
    };
    let line = record.to_json_line().unwrap();
    assert!(!line.contains('\n'));
    let back: PhraseRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(back, record);
}
