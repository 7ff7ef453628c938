//! 금액 표시 형식.

/// 세 자리마다 쉼표를 넣는다. (90000000 -> "90,000,000")
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// 천 단위 구분 + 통화 접미사.
pub fn currency(value: u64, suffix: &str) -> String {
    format!("{}{suffix}", thousands(value))
}

/// 전체 대비 비율(%)을 소수 첫째 자리까지 표시한다. 전체가 0이면 0.0%.
pub fn percent(part: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}
