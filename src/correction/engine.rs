//! 발음 보정 규칙 엔진
//!
//! 일반 G2P 변환기의 출력에 남는 체계적 오류 두 가지를 고칩니다:
//!
//! 1. **의도/약속 어미**: ㄹ 받침 음절 뒤의 어미 "-게(요)"는 "-께(요)"로
//!    발음됨 (줄게 -> 줄께). 단, "에게" 같은 조사와 부사형 "-게"는
//!    건드리면 안 되므로 먼저 보호 구간으로 치환한 뒤 재작성합니다.
//! 2. **잘못된 유음화**: 단어 경계(공백)를 넘어 ㄹ 받침 + ㄹ 초성으로
//!    변환된 음절의 초성을 ㄴ으로 복원합니다.
//!
//! 한 번의 호출 안에서 단계 순서는 고정이며, 호출 사이에 상태를
//! 유지하지 않습니다.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::core::{
    compose_syllable, decompose_syllable, is_hangul_syllable, HangulSyllable, CHOSEONG_NIEUN,
    CHOSEONG_RIEUL, JONGSEONG_RIEUL,
};

use super::protector::SegmentProtector;
use super::rules::{CorrectionRules, StemPrecedence};
use super::CorrectionError;

/// "-하게" 파생형 (생산적인 형용사+하다 부사형, 보호 대상)
static HAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[가-힣]+하게").unwrap());

/// 의도 어미 후보: 한글 음절 + 공백(선택) + "게" + "요"(선택)
static INTENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([가-힣])(\s*)게(요?)").unwrap());

/// 발음 보정 규칙 엔진
///
/// 규칙 테이블은 생성 시점에 고정되며, 호출마다 새 보호 테이블을
/// 만들어 쓰고 버립니다.
#[derive(Debug, Clone)]
pub struct PronunciationCorrector {
    rules: CorrectionRules,
}

impl Default for PronunciationCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl PronunciationCorrector {
    /// 기본 규칙으로 생성
    pub fn new() -> Self {
        Self {
            rules: CorrectionRules::default(),
        }
    }

    /// 규칙을 지정하여 생성
    pub fn with_rules(rules: CorrectionRules) -> Self {
        Self { rules }
    }

    /// 현재 규칙 테이블
    pub fn rules(&self) -> &CorrectionRules {
        &self.rules
    }

    /// G2P 출력 텍스트의 체계적 오류를 보정
    ///
    /// 단계 (고정 순서):
    /// 1. 예외 단어 치환
    /// 2. 조사 보호
    /// 3. 부사형 어간 + "게" 보호
    /// 4. "-하게" 파생형 보호
    /// 5. 의도 어미 재작성 ("게" -> "께")
    /// 6. 보호 구간 복원
    /// 7. 유음화 오류 복원
    pub fn correct(&self, text: &str) -> Result<String, CorrectionError> {
        // 1. 예외 단어 치환 (보호보다 먼저)
        let mut working = text.to_string();
        for (pattern, replacement) in &self.rules.word_exceptions {
            if working.contains(pattern.as_str()) {
                debug!("예외 단어 치환: {} -> {}", pattern, replacement);
                working = working.replace(pattern.as_str(), replacement);
            }
        }

        // 2~4. 재작성하면 안 되는 구간 보호
        let mut protector = SegmentProtector::new();
        for particle in &self.rules.protected_particles {
            working = protector.protect_literal(&working, particle)?;
        }
        for stem in &self.rules.adverbial_stems {
            // 재작성 우선 설정이면 중의적(ㄹ 받침) 어간은 보호하지 않음
            if self.rules.stem_precedence == StemPrecedence::RewriteIntention
                && stem_ends_with_rieul(stem)
            {
                continue;
            }
            let adverbial_form = format!("{}게", stem);
            working = protector.protect_literal(&working, &adverbial_form)?;
        }
        working = protector.protect_regex(&working, &HAGE_RE)?;
        if !protector.is_empty() {
            debug!("보호 구간 {}개", protector.len());
        }

        // 5. 의도 어미 재작성
        working = rewrite_intention_ending(&working);

        // 6. 복원
        working = protector.restore(&working);

        // 7. 유음화 오류 복원
        fix_rhotacization(&working)
    }
}

/// 어간의 마지막 음절이 ㄹ 받침인지 확인
fn stem_ends_with_rieul(stem: &str) -> bool {
    stem.chars()
        .last()
        .and_then(decompose_syllable)
        .map_or(false, |s| s.jongseong == JONGSEONG_RIEUL)
}

/// ㄹ 받침 음절 + (공백) + "게(요)"가 어절 끝에 올 때 "게"를 "께"로 재작성
///
/// 분해 결과로 받침을 확인하는 표적 재작성이며, "게" 뒤에 한글 음절이
/// 이어지면 어미가 아니므로 (게임, 게으름 등) 건너뜁니다.
fn rewrite_intention_ending(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in INTENTION_RE.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&text[last..m.start()]);
        last = m.end();

        let lead = &caps[1];
        let rieul_final = lead
            .chars()
            .next()
            .and_then(decompose_syllable)
            .map_or(false, |s| s.jongseong == JONGSEONG_RIEUL);
        // 어미 위치 확인: "게(요)" 뒤에 한글 음절이 이어지면 재작성하지 않음
        let followed_by_hangul = text[m.end()..]
            .chars()
            .next()
            .map_or(false, is_hangul_syllable);

        if rieul_final && !followed_by_hangul {
            out.push_str(lead);
            out.push_str(&caps[2]);
            out.push('께');
            out.push_str(&caps[3]);
        } else {
            out.push_str(m.as_str());
        }
    }
    out.push_str(&text[last..]);
    out
}

/// 단어 경계를 넘은 유음화(ㄹ 받침 + 공백 + ㄹ 초성)를 ㄴ 초성으로 복원
///
/// 문자 버퍼를 왼쪽부터 한 번에 훑으며 제자리에서 고치므로
/// 치환이 아직 처리하지 않은 매치의 위치를 무효화하지 않습니다.
fn fix_rhotacization(text: &str) -> Result<String, CorrectionError> {
    let mut chars: Vec<char> = text.chars().collect();
    let mut fixed = 0usize;

    let mut i = 0;
    while i < chars.len() {
        let rieul_final = decompose_syllable(chars[i])
            .map_or(false, |s| s.jongseong == JONGSEONG_RIEUL);
        if !rieul_final {
            i += 1;
            continue;
        }

        // 공백 구간(1개 이상) 건너뛰기
        let mut j = i + 1;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if j == i + 1 || j >= chars.len() {
            i += 1;
            continue;
        }

        if let Some(second) = decompose_syllable(chars[j]) {
            if second.choseong == CHOSEONG_RIEUL {
                chars[j] = compose_syllable(HangulSyllable {
                    choseong: CHOSEONG_NIEUN,
                    ..second
                })?;
                fixed += 1;
            }
        }
        i += 1;
    }

    if fixed > 0 {
        debug!("유음화 복원 {}회", fixed);
    }
    Ok(chars.into_iter().collect())
}

/// 기본 규칙으로 발음 보정
pub fn correct_pronunciation(text: &str) -> Result<String, CorrectionError> {
    PronunciationCorrector::new().correct(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intention_ending_basic() {
        assert_eq!(correct_pronunciation("줄게").unwrap(), "줄께");
        assert_eq!(correct_pronunciation("할게").unwrap(), "할께");
        assert_eq!(correct_pronunciation("만들게").unwrap(), "만들께");
    }

    #[test]
    fn test_intention_ending_with_yo() {
        assert_eq!(correct_pronunciation("볼게요").unwrap(), "볼께요");
        assert_eq!(correct_pronunciation("이 책을 읽을게요").unwrap(), "이 책을 읽을께요");
    }

    #[test]
    fn test_intention_ending_in_sentence() {
        assert_eq!(
            correct_pronunciation("내일 학교에 갈게").unwrap(),
            "내일 학교에 갈께"
        );
        assert_eq!(
            correct_pronunciation("그건 내가 할게").unwrap(),
            "그건 내가 할께"
        );
    }

    #[test]
    fn test_no_rewrite_without_rieul_final() {
        // 받침 없는 음절 + 게: 재작성 없음
        assert_eq!(correct_pronunciation("가게").unwrap(), "가게");
        assert_eq!(correct_pronunciation("모자 게").unwrap(), "모자 게");
    }

    #[test]
    fn test_no_rewrite_mid_word() {
        // "게" 뒤에 한글이 이어지면 어미가 아님
        assert_eq!(correct_pronunciation("올 게임").unwrap(), "올 게임");
        assert_eq!(correct_pronunciation("들게으름").unwrap(), "들게으름");
    }

    #[test]
    fn test_particle_protected() {
        // 조사 "에게"의 "게"는 재작성 대상이 아님
        assert_eq!(correct_pronunciation("딸에게").unwrap(), "딸에게");
        assert_eq!(
            correct_pronunciation("형에게 줄게").unwrap(),
            "형에게 줄께"
        );
    }

    #[test]
    fn test_adverbial_stem_protected() {
        // 부사형 어간 + 게: 보호되어 재작성 없음 (기본 우선순위)
        assert_eq!(correct_pronunciation("크게 말했다").unwrap(), "크게 말했다");
        assert_eq!(correct_pronunciation("길게 늘였다").unwrap(), "길게 늘였다");
        assert_eq!(correct_pronunciation("잘게 썰었다").unwrap(), "잘게 썰었다");
    }

    #[test]
    fn test_hage_derived_protected() {
        assert_eq!(
            correct_pronunciation("이상하게 생겼다").unwrap(),
            "이상하게 생겼다"
        );
        // 보호와 재작성이 한 문장에 공존
        assert_eq!(
            correct_pronunciation("깨끗하게 치울게").unwrap(),
            "깨끗하게 치울께"
        );
    }

    #[test]
    fn test_stem_precedence_rewrite_intention() {
        // 재작성 우선: ㄹ 받침 어간(잘)은 보호하지 않음
        let rules = CorrectionRules {
            stem_precedence: StemPrecedence::RewriteIntention,
            ..CorrectionRules::default()
        };
        let corrector = PronunciationCorrector::with_rules(rules);
        // "내가 잘게" (자다 의도형) -> 잘께
        assert_eq!(corrector.correct("내가 잘게").unwrap(), "내가 잘께");
        // 대가: 부사형 "잘게"도 재작성됨
        assert_eq!(corrector.correct("잘게 썰었다").unwrap(), "잘께 썰었다");
        // ㄹ 받침이 아닌 어간(크)은 여전히 보호됨
        assert_eq!(corrector.correct("크게 말했다").unwrap(), "크게 말했다");
    }

    #[test]
    fn test_word_exception() {
        assert_eq!(correct_pronunciation("밝기").unwrap(), "발끼");
        assert_eq!(
            correct_pronunciation("화면 밝기를 줄일게").unwrap(),
            "화면 발끼를 줄일께"
        );
    }

    #[test]
    fn test_rhotacization_fix() {
        // ㄹ 받침 + 공백 + ㄹ 초성 -> ㄴ 초성으로 복원
        assert_eq!(correct_pronunciation("서울 랭면").unwrap(), "서울 냉면");
        assert_eq!(correct_pronunciation("올 려름").unwrap(), "올 녀름");
    }

    #[test]
    fn test_rhotacization_not_applied_within_word() {
        // 공백 없는 단어 내부 유음화는 올바른 발음이므로 유지
        assert_eq!(correct_pronunciation("설랄").unwrap(), "설랄");
    }

    #[test]
    fn test_rhotacization_chain() {
        // 고친 음절이 다시 ㄹ 받침이면 다음 경계도 이어서 복원됨
        assert_eq!(correct_pronunciation("갈 룰 릴").unwrap(), "갈 눌 닐");
    }

    #[test]
    fn test_rhotacization_requires_whitespace() {
        assert_eq!(correct_pronunciation("갈 로").unwrap(), "갈 노");
        assert_eq!(correct_pronunciation("갈로").unwrap(), "갈로");
    }

    #[test]
    fn test_empty_and_non_hangul_passthrough() {
        assert_eq!(correct_pronunciation("").unwrap(), "");
        assert_eq!(correct_pronunciation("hello world 123").unwrap(), "hello world 123");
    }

    #[test]
    fn test_custom_rules_small_table() {
        // 작은 테이블을 주입한 테스트 대역
        let rules = CorrectionRules {
            word_exceptions: vec![],
            protected_particles: vec![],
            adverbial_stems: vec![],
            stem_precedence: StemPrecedence::ProtectStems,
        };
        let corrector = PronunciationCorrector::with_rules(rules);
        // 보호 테이블이 비면 "에게"도 재작성 후보가 되지만
        // "에"는 ㄹ 받침이 아니므로 결과는 같음
        assert_eq!(corrector.correct("딸에게").unwrap(), "딸에게");
        // 어간 보호가 없으면 부사형도 재작성됨
        assert_eq!(corrector.correct("길게 말했다").unwrap(), "길께 말했다");
    }
}
