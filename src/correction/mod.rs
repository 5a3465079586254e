//! 발음 보정 모듈
//!
//! 일반 G2P 변환기 출력의 알려진 체계적 오류(의도 어미 "-게" -> "-께",
//! 단어 경계를 넘은 잘못된 유음화)를 고치는 규칙 엔진과, 재작성에서
//! 지켜야 할 구간을 잠시 가리는 보호 테이블을 제공합니다.

mod engine;
mod g2p;
mod protector;
mod rules;

pub use engine::{correct_pronunciation, PronunciationCorrector};
pub use g2p::{CorrectedG2p, G2p};
pub use protector::SegmentProtector;
pub use rules::{CorrectionRules, RulesError, StemPrecedence};

use crate::core::SyllableError;

/// 보정 과정의 오류
///
/// 모든 오류는 입력이 같으면 결정적으로 재현되며, 호출자에게
/// 동기적으로 보고됩니다.
#[derive(Debug)]
pub enum CorrectionError {
    /// 고유 마커 할당 실패 (내부 불일치)
    MarkerCollision(String),
    /// 음절 조합 실패 (내부 불일치)
    Syllable(SyllableError),
}

impl std::fmt::Display for CorrectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionError::MarkerCollision(s) => write!(f, "보호 마커 할당 오류: {}", s),
            CorrectionError::Syllable(e) => write!(f, "음절 조합 오류: {}", e),
        }
    }
}

impl std::error::Error for CorrectionError {}

impl From<SyllableError> for CorrectionError {
    fn from(e: SyllableError) -> Self {
        CorrectionError::Syllable(e)
    }
}
