//! 유니코드 한글 음절 분해/조합 유틸리티

/// 한글 음절 시작 코드포인트 (가)
const HANGUL_SYLLABLE_BASE: u32 = 0xAC00;
/// 한글 음절 마지막 코드포인트 (힣)
const HANGUL_SYLLABLE_LAST: u32 = 0xD7A3;

/// 초성 개수
const CHOSEONG_COUNT: u32 = 19;
/// 중성 개수
const JUNGSEONG_COUNT: u32 = 21;
/// 종성 개수 (종성 없음 포함)
const JONGSEONG_COUNT: u32 = 28;

/// 초성 ㄴ 인덱스
pub const CHOSEONG_NIEUN: u32 = 2;
/// 초성 ㄹ 인덱스
pub const CHOSEONG_RIEUL: u32 = 5;
/// 초성 ㅇ 인덱스
pub const CHOSEONG_IEUNG: u32 = 11;
/// 종성 ㄹ 인덱스
pub const JONGSEONG_RIEUL: u32 = 8;

/// 완성형 한글 음절의 초성/중성/종성 분해 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HangulSyllable {
    /// 초성 인덱스 (0~18)
    pub choseong: u32,
    /// 중성 인덱스 (0~20)
    pub jungseong: u32,
    /// 종성 인덱스 (0~27, 0 = 종성 없음)
    pub jongseong: u32,
}

/// 음절 조합 오류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyllableError {
    /// 자모 인덱스가 유효 범위를 벗어남
    InvalidJamoIndex(HangulSyllable),
}

impl std::fmt::Display for SyllableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyllableError::InvalidJamoIndex(s) => write!(
                f,
                "자모 인덱스 범위 오류: 초성 {}, 중성 {}, 종성 {}",
                s.choseong, s.jungseong, s.jongseong
            ),
        }
    }
}

impl std::error::Error for SyllableError {}

/// 문자가 완성형 한글 음절(가~힣)인지 확인
pub fn is_hangul_syllable(c: char) -> bool {
    (HANGUL_SYLLABLE_BASE..=HANGUL_SYLLABLE_LAST).contains(&(c as u32))
}

/// 완성형 한글을 초성/중성/종성 인덱스로 분해
/// 음절 블록 밖의 문자는 None (분해 대상 아님, 호출자가 그대로 통과시킴)
pub fn decompose_syllable(c: char) -> Option<HangulSyllable> {
    if !is_hangul_syllable(c) {
        return None;
    }
    let offset = c as u32 - HANGUL_SYLLABLE_BASE;
    Some(HangulSyllable {
        choseong: offset / (JUNGSEONG_COUNT * JONGSEONG_COUNT),
        jungseong: (offset / JONGSEONG_COUNT) % JUNGSEONG_COUNT,
        jongseong: offset % JONGSEONG_COUNT,
    })
}

/// 초성/중성/종성 인덱스로 완성형 한글 음절 생성
/// 인덱스가 범위를 벗어나면 오류
pub fn compose_syllable(syllable: HangulSyllable) -> Result<char, SyllableError> {
    let HangulSyllable {
        choseong,
        jungseong,
        jongseong,
    } = syllable;
    if choseong >= CHOSEONG_COUNT || jungseong >= JUNGSEONG_COUNT || jongseong >= JONGSEONG_COUNT {
        return Err(SyllableError::InvalidJamoIndex(syllable));
    }
    let code = HANGUL_SYLLABLE_BASE
        + (choseong * JUNGSEONG_COUNT + jungseong) * JONGSEONG_COUNT
        + jongseong;
    // 유효 인덱스 조합은 항상 음절 블록 내부의 유효한 코드포인트
    char::from_u32(code).ok_or(SyllableError::InvalidJamoIndex(syllable))
}
