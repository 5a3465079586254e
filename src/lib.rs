pub mod core;
pub mod correction;
pub mod metric;

pub use correction::{
    correct_pronunciation, CorrectedG2p, CorrectionError, CorrectionRules, G2p,
    PronunciationCorrector, RulesError, StemPrecedence,
};
pub use metric::{
    compute_cer, compute_cer_with, compute_crr, compute_crr_with, evaluate_pairs, BatchSummary,
    MetricOptions, MetricRecord, OperationCounts,
};
