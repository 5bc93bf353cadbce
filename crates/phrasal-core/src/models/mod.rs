mod align_strategy;
mod phrase_record;
mod recovery_event;
mod span;

pub use align_strategy::AlignStrategy;
pub use phrase_record::PhraseRecord;
pub use recovery_event::{RecoveryAction, RecoveryEvent};
pub use span::Span;
