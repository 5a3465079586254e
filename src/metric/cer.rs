//! 한국어 CER/CRR 계산기
//!
//! 정답/가설 문장을 전처리한 뒤 정렬 엔진으로 편집 연산을 분류하고
//! CER(문자 오류율)과 CRR(문자 인식률)을 계산합니다.

use serde::{Deserialize, Serialize};

use super::alignment::{align, OperationCounts};

/// 전처리 옵션
#[derive(Debug, Clone, Copy)]
pub struct MetricOptions {
    /// 공백 제거 여부
    pub remove_spaces: bool,
    /// 문장부호 제거 여부
    pub remove_punctuation: bool,
}

impl Default for MetricOptions {
    fn default() -> Self {
        Self {
            remove_spaces: true,
            remove_punctuation: true,
        }
    }
}

/// CER/CRR 측정 결과
///
/// 불변식: `crr == round4(1 - cer)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// 문자 오류율 (0.0 ~ 1.0, 소수점 4자리 반올림)
    pub cer: f64,
    /// 문자 인식률 (1 - CER)
    pub crr: f64,
    /// 연산별 횟수
    #[serde(flatten)]
    pub ops: OperationCounts,
}

/// 텍스트 전처리: 문장부호 제거 후 공백 제거
///
/// 문장부호 제거는 유니코드 기준 영숫자(한글 포함)와 공백만 남깁니다.
pub fn preprocess(text: &str, options: &MetricOptions) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if options.remove_punctuation && !c.is_alphanumeric() && !c.is_whitespace() {
            continue;
        }
        if options.remove_spaces && c.is_whitespace() {
            continue;
        }
        out.push(c);
    }
    out
}

/// 소수점 4자리 반올림
fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// 기본 옵션(공백/문장부호 제거)으로 CER 계산
pub fn compute_cer(reference: &str, hypothesis: &str) -> MetricRecord {
    compute_cer_with(reference, hypothesis, &MetricOptions::default())
}

/// 옵션을 지정하여 CER 계산
///
/// - `hits = len(ref) - (대체 + 삭제)`
/// - `incorrect = 대체 + 삭제 + 삽입`
/// - `total = len(ref) + 삽입`
/// - `cer = incorrect / total` (둘 다 빈 문자열이면 0)
pub fn compute_cer_with(
    reference: &str,
    hypothesis: &str,
    options: &MetricOptions,
) -> MetricRecord {
    let ref_chars: Vec<char> = preprocess(reference, options).chars().collect();
    let hyp_chars: Vec<char> = preprocess(hypothesis, options).chars().collect();

    let result = align(&hyp_chars, &ref_chars);
    let OperationCounts {
        substitutions,
        deletions,
        insertions,
    } = result.ops;

    let hits = ref_chars.len() - (substitutions + deletions);
    let incorrect = substitutions + deletions + insertions;
    let total = substitutions + deletions + hits + insertions;

    let cer = if total > 0 {
        round4(incorrect as f64 / total as f64)
    } else {
        0.0
    };
    let crr = round4(1.0 - cer);

    MetricRecord {
        cer,
        crr,
        ops: result.ops,
    }
}

/// 기본 옵션으로 CRR 계산 (CER과 같은 연산 횟수, crr = 1 - cer)
pub fn compute_crr(reference: &str, hypothesis: &str) -> MetricRecord {
    compute_cer(reference, hypothesis)
}

/// 옵션을 지정하여 CRR 계산
pub fn compute_crr_with(
    reference: &str,
    hypothesis: &str,
    options: &MetricOptions,
) -> MetricRecord {
    compute_cer_with(reference, hypothesis, options)
}

/// 데이터셋 단위 평가 요약
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchSummary {
    /// 평가한 쌍의 수
    pub count: usize,
    /// 평균 CER (count == 0이면 0.0)
    pub mean_cer: f64,
    /// 평균 CRR (count == 0이면 0.0)
    pub mean_crr: f64,
}

/// 여러 (정답, 가설) 쌍을 기본 옵션으로 평가하여 평균을 냅니다
pub fn evaluate_pairs<'a, I>(pairs: I) -> BatchSummary
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut count = 0usize;
    let mut cer_sum = 0.0f64;
    let mut crr_sum = 0.0f64;

    for (reference, hypothesis) in pairs {
        let record = compute_cer(reference, hypothesis);
        cer_sum += record.cer;
        crr_sum += record.crr;
        count += 1;
    }

    if count == 0 {
        return BatchSummary {
            count: 0,
            mean_cer: 0.0,
            mean_crr: 0.0,
        };
    }

    BatchSummary {
        count,
        mean_cer: round4(cer_sum / count as f64),
        mean_crr: round4(crr_sum / count as f64),
    }
}
