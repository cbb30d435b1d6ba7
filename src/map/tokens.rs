//! `.MAP` 文本的分词与数值转换工具

/// 按分隔符集合拆分一行文本
///
/// 每个字段去除首尾空白,空字段保留其位置。空行不产生任何字段。
pub fn tokenize<'a>(line: &'a str, delimiters: &[char]) -> Vec<&'a str> {
    if line.is_empty() {
        return Vec::new();
    }
    line.split(|c| delimiters.contains(&c))
        .map(str::trim)
        .collect()
}

/// 按逗号拆分
pub fn split_fields(line: &str) -> Vec<&str> {
    tokenize(line, &[','])
}

/// 不区分大小写的前缀比较
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let (text, prefix) = (text.as_bytes(), prefix.as_bytes());
    text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// 宽松的浮点数转换
///
/// 与区域设置无关,始终以 `.` 作为小数点。
/// 解析最长的数值前缀,没有可解析的内容时返回 `0.0`。
pub fn atof(token: &str) -> f64 {
    let s = token.trim();
    if let Ok(v) = s.parse::<f64>() {
        return v;
    }
    numeric_prefix(s).parse().unwrap_or(0.0)
}

fn numeric_prefix(s: &str) -> &str {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa = i - int_start;
    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        mantissa += i - frac_start;
    }
    if mantissa == 0 {
        return "";
    }

    // 指数部分必须带数字才计入
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            return &s[..j];
        }
    }
    &s[..i]
}
