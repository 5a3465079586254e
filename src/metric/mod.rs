//! 발음 평가 지표 모듈 (CER/CRR)

mod alignment;
mod cer;

pub use alignment::{align, AlignmentResult, OperationCounts};
pub use cer::{
    compute_cer, compute_cer_with, compute_crr, compute_crr_with, evaluate_pairs, preprocess,
    BatchSummary, MetricOptions, MetricRecord,
};
