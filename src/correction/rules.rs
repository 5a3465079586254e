//! 발음 보정 규칙 테이블
//!
//! 예외 단어, 보호 조사, 부사형 어간 목록은 생성 시점에 주입되는
//! 불변 설정 데이터입니다. 테이블 순서는 적용 순서와 같아 의미가 있습니다.

use serde::{Deserialize, Serialize};
use std::fs;

/// 규칙으로 유도되지 않는 기본 예외 단어 (표기 -> 발음)
/// 밝기: ㄺ 받침 + ㄱ 초성의 불규칙 경음화
const DEFAULT_WORD_EXCEPTIONS: &[(&str, &str)] = &[("밝기", "발끼")];

/// 재작성 트리거("게")를 포함하지만 절대 재작성하면 안 되는 조사
/// 긴 형태를 먼저 보호해야 짧은 형태가 안쪽에서 매치되지 않음
const DEFAULT_PROTECTED_PARTICLES: &[&str] = &["에게서", "에게로", "에게"];

/// "-게"가 의도 어미가 아니라 부사형 어미인 어간 목록
/// ㄹ 받침 어간(길, 달, 잘, 멀)은 의도 어미와 표면형이 겹치는 중의적 어간
const DEFAULT_ADVERBIAL_STEMS: &[&str] = &[
    "크", "작", "높", "낮", "길", "짧", "빠르", "느리", "쉽", "어렵", "좋", "나쁘", "예쁘", "달",
    "잘", "멀", "깊", "얕", "넓", "좁", "늦", "같", "다르", "맛있", "재미있",
];

/// 어간 보호와 의도 어미 재작성이 충돌할 때의 우선순위
///
/// ㄹ 받침 어간의 "-게" 형태는 부사형("잘게 썰다")일 수도,
/// 의도 어미("내가 잘게")일 수도 있어 어느 쪽을 택해도 반례가 남습니다.
/// 어느 해석이 맞는지는 규칙만으로 정할 수 없으므로 설정으로 노출합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StemPrecedence {
    /// 어간 보호 우선: 목록의 모든 어간 + "게"를 보호 (기본값)
    #[default]
    ProtectStems,
    /// 재작성 우선: ㄹ 받침 어간은 보호하지 않고 "-게" -> "-께" 재작성 허용
    RewriteIntention,
}

/// 발음 보정 규칙
///
/// 생성 후 변경되지 않으며 여러 스레드에서 안전하게 공유됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionRules {
    /// 예외 단어 치환 (표기 -> 발음), 적용 순서 유지
    #[serde(default = "default_word_exceptions")]
    pub word_exceptions: Vec<(String, String)>,
    /// 보호 조사 목록 (긴 형태 먼저)
    #[serde(default = "default_protected_particles")]
    pub protected_particles: Vec<String>,
    /// 부사형 "-게" 어간 목록
    #[serde(default = "default_adverbial_stems")]
    pub adverbial_stems: Vec<String>,
    /// 어간 보호 / 재작성 우선순위
    #[serde(default)]
    pub stem_precedence: StemPrecedence,
}

fn default_word_exceptions() -> Vec<(String, String)> {
    DEFAULT_WORD_EXCEPTIONS
        .iter()
        .map(|(pattern, replacement)| (pattern.to_string(), replacement.to_string()))
        .collect()
}

fn default_protected_particles() -> Vec<String> {
    DEFAULT_PROTECTED_PARTICLES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_adverbial_stems() -> Vec<String> {
    DEFAULT_ADVERBIAL_STEMS.iter().map(|s| s.to_string()).collect()
}

impl Default for CorrectionRules {
    fn default() -> Self {
        Self {
            word_exceptions: default_word_exceptions(),
            protected_particles: default_protected_particles(),
            adverbial_stems: default_adverbial_stems(),
            stem_precedence: StemPrecedence::default(),
        }
    }
}

/// 규칙 파일 로드/저장 오류
#[derive(Debug)]
pub enum RulesError {
    /// 파일 읽기/쓰기 실패
    IoError(std::io::Error),
    /// JSON 파싱/직렬화 실패
    ParseError(String),
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::IoError(e) => write!(f, "파일 읽기 오류: {}", e),
            RulesError::ParseError(s) => write!(f, "JSON 파싱 오류: {}", s),
        }
    }
}

impl std::error::Error for RulesError {}

impl From<std::io::Error> for RulesError {
    fn from(e: std::io::Error) -> Self {
        RulesError::IoError(e)
    }
}

impl CorrectionRules {
    /// JSON 파일에서 규칙 로드
    ///
    /// 파일에 없는 필드는 기본 테이블로 채워집니다.
    ///
    /// # 파일 형식
    /// ```json
    /// {
    ///   "word_exceptions": [["밝기", "발끼"]],
    ///   "protected_particles": ["에게서", "에게로", "에게"],
    ///   "adverbial_stems": ["크", "작"],
    ///   "stem_precedence": "protect_stems"
    /// }
    /// ```
    pub fn load(path: &str) -> Result<Self, RulesError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| RulesError::ParseError(e.to_string()))
    }

    /// 규칙을 JSON 파일로 저장
    pub fn save(&self, path: &str) -> Result<(), RulesError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RulesError::ParseError(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }
}
