//! 한글 음절 코덱 모듈

pub mod unicode;

pub use unicode::{
    compose_syllable, decompose_syllable, is_hangul_syllable, HangulSyllable, SyllableError,
    CHOSEONG_IEUNG, CHOSEONG_NIEUN, CHOSEONG_RIEUL, JONGSEONG_RIEUL,
};
