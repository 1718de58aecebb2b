//! Display formatting for datatable tab labels.

/// Datatable names arrive machine-shaped (`loan_collateral_details`,
/// `family-members`); turn them into something a tab strip can show.
pub fn format_tab_label(raw: &str) -> String {
    raw.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_snake_case_names() {
        assert_eq!(format_tab_label("loan_collateral_details"), "Loan Collateral Details");
    }

    #[test]
    fn formats_kebab_case_names() {
        assert_eq!(format_tab_label("family-members"), "Family Members");
    }

    #[test]
    fn collapses_extra_separators() {
        assert_eq!(format_tab_label("  extra__client  info "), "Extra Client Info");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(format_tab_label(""), "");
    }
}
