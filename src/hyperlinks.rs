//! Hyperlink formulas linking budget rows to division sheets.
//!
//! The budget summary's Details cell holds
//! `=HYPERLINK("#sheet=division-03", "View Division")`. The grid engine
//! evaluates it; clicking it hands the URL back to us for navigation.

/// Label shown in the Details cell of a budget row.
pub const DIVISION_LINK_LABEL: &str = "View Division";

/// URL fragment prefix used for in-workbook sheet links.
const SHEET_FRAGMENT: &str = "#sheet=";

/// Parsed `HYPERLINK(url, label)` formula
#[derive(Debug, PartialEq, Eq)]
pub struct HyperlinkFormula<'a> {
    pub url: &'a str,
    pub label: Option<&'a str>,
}

/// Build the formula linking to a sheet.
#[must_use]
pub fn sheet_link_formula(sheet_id: &str) -> String {
    format!("=HYPERLINK(\"{SHEET_FRAGMENT}{sheet_id}\", \"{DIVISION_LINK_LABEL}\")")
}

/// Whether a cell's text is a hyperlink formula.
#[must_use]
pub fn is_hyperlink_formula(text: &str) -> bool {
    text.starts_with("=HYPERLINK")
}

/// Parse `=HYPERLINK("url", "label")`. The label is optional.
pub fn parse_hyperlink_formula(formula: &str) -> Option<HyperlinkFormula<'_>> {
    let args = formula
        .trim()
        .strip_prefix("=HYPERLINK(")?
        .strip_suffix(')')?;

    let (url, rest) = take_quoted(args.trim_start())?;
    let rest = rest.trim_start();
    if rest.is_empty() {
        return Some(HyperlinkFormula { url, label: None });
    }

    let (label, tail) = take_quoted(rest.strip_prefix(',')?.trim_start())?;
    if !tail.trim().is_empty() {
        return None;
    }
    Some(HyperlinkFormula {
        url,
        label: Some(label),
    })
}

/// Sheet id addressed by an in-workbook link URL (`#sheet=<id>`).
pub fn sheet_id_from_url(url: &str) -> Option<&str> {
    url.strip_prefix(SHEET_FRAGMENT).filter(|id| !id.is_empty())
}

/// Sheet id a hyperlink formula points at, if it is an in-workbook link.
pub fn linked_sheet_id(formula: &str) -> Option<&str> {
    parse_hyperlink_formula(formula).and_then(|f| sheet_id_from_url(f.url))
}

/// Split `"quoted"rest` into the quoted text and the remainder.
fn take_quoted(s: &str) -> Option<(&str, &str)> {
    let inner = s.strip_prefix('"')?;
    let end = inner.find('"')?;
    Some((inner.get(..end)?, inner.get(end + 1..)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builds_division_link() {
        assert_eq!(
            sheet_link_formula("division-03"),
            "=HYPERLINK(\"#sheet=division-03\", \"View Division\")"
        );
    }

    #[test]
    fn parses_what_it_builds() {
        let f = sheet_link_formula("division-26");
        let parsed = parse_hyperlink_formula(&f).unwrap();
        assert_eq!(parsed.url, "#sheet=division-26");
        assert_eq!(parsed.label, Some("View Division"));
        assert_eq!(linked_sheet_id(&f), Some("division-26"));
    }

    #[test]
    fn label_is_optional() {
        let parsed = parse_hyperlink_formula("=HYPERLINK(\"https://example.com\")").unwrap();
        assert_eq!(parsed.url, "https://example.com");
        assert_eq!(parsed.label, None);
        assert_eq!(linked_sheet_id("=HYPERLINK(\"https://example.com\")"), None);
    }

    #[test]
    fn rejects_malformed_formulas() {
        assert!(parse_hyperlink_formula("=SUM(A1:A3)").is_none());
        assert!(parse_hyperlink_formula("=HYPERLINK(\"#sheet=x\"").is_none());
        assert!(parse_hyperlink_formula("=HYPERLINK(\"a\", \"b\", \"c\")").is_none());
        assert_eq!(sheet_id_from_url("#sheet="), None);
    }
}
