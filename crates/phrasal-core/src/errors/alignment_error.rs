/// Alignment engine errors.
#[derive(Debug, thiserror::Error)]
pub enum AlignmentError {
    /// Scratch buffers were handed to the DP without being prepared for
    /// the current target length.
    #[error("dp scratch not prepared: expected width {expected}, got {actual}")]
    ScratchNotPrepared { expected: usize, actual: usize },

    #[error("invalid span limit: {value}")]
    InvalidSpanLimit { value: usize },
}
