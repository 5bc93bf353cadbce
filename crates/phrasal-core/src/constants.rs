/// Hard upper bound on the number of target tokens a single span may cover.
pub const MAX_SPAN_CAP: usize = 15;

/// Multiplier applied to the average tokens-per-unit ratio when deriving
/// the span length limit.
pub const SPAN_RATIO_MULTIPLIER: usize = 2;

/// Added to vector norms before division so zero vectors normalize to zero.
pub const NORM_EPSILON: f64 = 1e-8;

/// Separator used when joining span tokens into text.
pub const TOKEN_SEPARATOR: &str = " ";

/// Component name reported on recovery events.
pub const ALIGNER_COMPONENT: &str = "aligner";

/// Environment variable consulted for the tracing filter.
pub const LOG_ENV_VAR: &str = "PHRASAL_LOG";
