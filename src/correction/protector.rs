//! 보호 구간 치환/복원
//!
//! 전역 재작성 패스가 건드리면 안 되는 구간을 고유 마커로 잠시 치환하고,
//! 재작성이 끝난 뒤 마커를 원문으로 복원합니다. 마커는 사용 영역(PUA)
//! 구분 문자와 단조 증가 카운터로 만들어 본문과 충돌하지 않게 합니다.

use regex::Regex;

use super::CorrectionError;

/// 마커 여는 구분 문자 (사용 영역)
const MARKER_OPEN: char = '\u{E000}';
/// 마커 닫는 구분 문자 (사용 영역)
const MARKER_CLOSE: char = '\u{E001}';
/// 마커 할당 재시도 상한
const MAX_MARKER_ATTEMPTS: usize = 1_000;

/// 보호 구간 테이블
///
/// 규칙 엔진 호출 한 번 동안만 살아있고, 복원 후 버려집니다.
#[derive(Debug, Default)]
pub struct SegmentProtector {
    /// (마커, 원문) 기록 — 삽입 순서 유지
    segments: Vec<(String, String)>,
    /// 다음 마커 번호
    counter: usize,
}

impl SegmentProtector {
    /// 빈 테이블 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 기록된 보호 구간 수
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// 보호 구간이 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// 현재 본문에 존재하지 않는 고유 마커 할당
    ///
    /// 카운터가 단조 증가하므로 이전 마커와는 항상 다르고,
    /// 본문과의 충돌만 검사하면 됩니다. 상한까지 충돌하면
    /// 내부 불일치 오류를 반환합니다 (조용히 본문을 훼손하지 않음).
    fn allocate_marker(&mut self, text: &str) -> Result<String, CorrectionError> {
        for _ in 0..MAX_MARKER_ATTEMPTS {
            let candidate = format!("{}{}{}", MARKER_OPEN, self.counter, MARKER_CLOSE);
            self.counter += 1;
            if !text.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(CorrectionError::MarkerCollision(format!(
            "마커 {}회 할당 시도 실패",
            MAX_MARKER_ATTEMPTS
        )))
    }

    /// 리터럴의 모든 출현을 왼쪽부터 마커로 치환
    ///
    /// 각 매치는 정확히 한 번 소비되고, 탐색은 삽입된 마커 뒤에서
    /// 재개됩니다 (치환된 구간을 다시 훑지 않음).
    pub fn protect_literal(&mut self, text: &str, literal: &str) -> Result<String, CorrectionError> {
        if literal.is_empty() {
            return Ok(text.to_string());
        }
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find(literal) {
            out.push_str(&rest[..pos]);
            let marker = self.allocate_marker(text)?;
            out.push_str(&marker);
            self.segments.push((marker, literal.to_string()));
            rest = &rest[pos + literal.len()..];
        }
        out.push_str(rest);
        Ok(out)
    }

    /// 정규식의 모든 매치를 왼쪽부터 마커로 치환
    pub fn protect_regex(&mut self, text: &str, re: &Regex) -> Result<String, CorrectionError> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in re.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            let marker = self.allocate_marker(text)?;
            self.segments.push((marker.clone(), m.as_str().to_string()));
            out.push_str(&marker);
            last = m.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }

    /// 모든 마커를 원문으로 복원
    ///
    /// 마커는 서로 겹치지 않는 고유 문자열이므로 복원 순서는 무관합니다.
    pub fn restore(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (marker, original) in &self.segments {
            result = result.replace(marker.as_str(), original);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static HAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[가-힣]+하게").unwrap());

    #[test]
    fn test_protect_restore_roundtrip() {
        let mut protector = SegmentProtector::new();
        let text = "형에게 크게 말했다";
        let working = protector.protect_literal(text, "에게").unwrap();
        let working = protector.protect_literal(&working, "크게").unwrap();

        assert!(!working.contains("에게"));
        assert!(!working.contains("크게"));
        assert_eq!(protector.restore(&working), text);
    }

    #[test]
    fn test_protect_multiple_occurrences() {
        let mut protector = SegmentProtector::new();
        let text = "에게 주고 에게 받고";
        let working = protector.protect_literal(text, "에게").unwrap();

        assert_eq!(protector.len(), 2);
        assert!(!working.contains("에게"));
        assert_eq!(protector.restore(&working), text);
    }

    #[test]
    fn test_protect_regex() {
        let mut protector = SegmentProtector::new();
        let text = "이상하게 생겼고 깨끗하게 치웠다";
        let working = protector.protect_regex(text, &HAGE_RE).unwrap();

        assert_eq!(protector.len(), 2);
        assert!(!working.contains("하게"));
        assert_eq!(protector.restore(&working), text);
    }

    #[test]
    fn test_no_match_is_identity() {
        let mut protector = SegmentProtector::new();
        let text = "보호할 것이 없다";
        assert_eq!(protector.protect_literal(text, "에게").unwrap(), text);
        assert!(protector.is_empty());
    }

    #[test]
    fn test_marker_collision_skips_counter() {
        // 본문에 첫 마커 후보와 같은 문자열이 이미 있으면 다음 번호로 넘어감
        let mut protector = SegmentProtector::new();
        let text = format!("{}0{} 에게", MARKER_OPEN, MARKER_CLOSE);
        let working = protector.protect_literal(&text, "에게").unwrap();

        assert!(!working.contains("에게"));
        assert_eq!(protector.restore(&working), text);
    }

    #[test]
    fn test_restore_order_independent() {
        let mut protector = SegmentProtector::new();
        let text = "크게 작게";
        let working = protector.protect_literal(text, "크게").unwrap();
        let working = protector.protect_literal(&working, "작게").unwrap();

        // 기록 순서를 뒤집어도 복원 결과는 같아야 함
        let mut reversed = SegmentProtector::new();
        reversed.segments = protector.segments.iter().rev().cloned().collect();
        assert_eq!(protector.restore(&working), reversed.restore(&working));
    }
}
