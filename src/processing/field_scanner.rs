//! Finds `label:value` fields inside single tokens.

/// Trailing `]` left by nested containers, removed at most this many times.
const MAX_TRAILING_BRACKETS: usize = 2;

/// Return the value following `label` when `token` holds exactly one `label`.
///
/// Up to two trailing `]` are stripped from the value. `None` means the field
/// is absent from this token, which is the normal case.
pub fn scan_field<'a>(token: &'a str, label: &str) -> Option<&'a str> {
    let mut parts = token.split(label);
    parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(strip_brackets(value))
}

fn strip_brackets(value: &str) -> &str {
    let mut value = value;
    for _ in 0..MAX_TRAILING_BRACKETS {
        match value.strip_suffix(']') {
            Some(v) => value = v,
            None => break,
        }
    }
    value
}

/// Resource group LS: canonical decimal if numeric, else empty.
pub fn normalize_numeric_ls(raw: &str) -> String {
    match raw.parse::<i64>() {
        Ok(n) => n.to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_field_found() {
        assert_eq!(scan_field("name:sub-A", "name:"), Some("sub-A"));
        assert_eq!(scan_field("[map[name:rg-1", "name:"), Some("rg-1"));
    }

    #[test]
    fn test_scan_field_absent() {
        assert_eq!(scan_field("id:1234", "name:"), None);
        assert_eq!(scan_field("", "name:"), None);
    }

    #[test]
    fn test_scan_field_twice_is_absent() {
        assert_eq!(scan_field("name:a,name:b", "name:"), None);
    }

    #[test]
    fn test_scan_field_strips_two_brackets() {
        assert_eq!(scan_field("LS:12]", "LS:"), Some("12"));
        assert_eq!(scan_field("LS:12]]", "LS:"), Some("12"));
        assert_eq!(scan_field("LS:12]]]", "LS:"), Some("12]"));
    }

    #[test]
    fn test_scan_field_empty_value() {
        assert_eq!(scan_field("[map[LS:", "LS:"), Some(""));
        assert_eq!(scan_field("LS:]", "LS:"), Some(""));
    }

    #[test]
    fn test_normalize_numeric_ls() {
        assert_eq!(normalize_numeric_ls("007"), "7");
        assert_eq!(normalize_numeric_ls("4711"), "4711");
        assert_eq!(normalize_numeric_ls("-3"), "-3");
        assert_eq!(normalize_numeric_ls("abc"), "");
        assert_eq!(normalize_numeric_ls(""), "");
        assert_eq!(normalize_numeric_ls("<nil>"), "");
        assert_eq!(normalize_numeric_ls("12 "), "");
    }
}
