pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

pub fn truncate(s: &str, max_len: usize) -> String {
    match max_len {
        0 => return String::new(),
        1 => return "…".to_string(),
        _ => {}
    }

    if s.chars().nth(max_len).is_none() {
        return s.to_string();
    }

    let mut out: String = s.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

/// Renders a coefficient without a trailing `.0` for whole numbers.
pub fn format_real(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Two lines showing `formula` with a caret under byte `offset`.
///
/// Returns `None` when the formula is too wide for `width` columns, since a
/// wrapped pointer would point at the wrong character.
pub fn point_at(formula: &str, offset: usize, width: usize) -> Option<(String, String)> {
    if formula.chars().count() > width {
        return None;
    }
    let column = formula
        .char_indices()
        .take_while(|&(idx, _)| idx < offset)
        .count();
    Some((formula.to_string(), format!("{}^", " ".repeat(column))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_short_reason() {
        assert_eq!(wrap("isotope label is empty", 40), vec!["isotope label is empty"]);
    }

    #[test]
    fn wrap_long_reason() {
        let result = wrap("group opened with '(' is never closed with ')'", 24);
        assert_eq!(
            result,
            vec!["group opened with '(' is", "never closed with ')'"]
        );
    }

    #[test]
    fn wrap_empty_gives_one_line() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate("CaCO3", 10), "CaCO3");
        assert_eq!(truncate("CaCO3", 5), "CaCO3");
    }

    #[test]
    fn truncate_long_formula() {
        assert_eq!(truncate("Ca(Mg,Fe)(CO3)2", 8), "Ca(Mg,F…");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Ca→Mg→Fe", 4), "Ca→…");
    }

    #[test]
    fn format_real_trims_whole_numbers() {
        assert_eq!(format_real(2.0), "2");
        assert_eq!(format_real(-1.0), "-1");
        assert_eq!(format_real(0.25), "0.25");
    }

    #[test]
    fn point_at_marks_offending_character() {
        let (line, caret) = point_at("Ca(OH2", 2, 40).unwrap();
        assert_eq!(line, "Ca(OH2");
        assert_eq!(caret, "  ^");
    }

    #[test]
    fn point_at_counts_characters_not_bytes() {
        let (_, caret) = point_at("→x", 3, 40).unwrap();
        assert_eq!(caret, " ^");
    }

    #[test]
    fn point_at_rejects_wide_formulas() {
        assert!(point_at("CaCO3", 0, 3).is_none());
    }
}
