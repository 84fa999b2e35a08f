//! The cost-code catalog offered by the "add division" dialog.
//!
//! Defaults to the CSI MasterFormat divisions. Hosts may supply their own list.

use serde::{Deserialize, Serialize};

/// A cost code and the trade it covers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CostCode {
    pub code: String,
    pub trade: String,
}

impl CostCode {
    pub fn new(code: impl Into<String>, trade: impl Into<String>) -> Self {
        CostCode {
            code: code.into(),
            trade: trade.into(),
        }
    }

    /// Numeric value of the code's digits (`"03 30 00"` -> 33000).
    /// `None` when the code has no digits.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        let digits: String = self.code.chars().filter(char::is_ascii_digit).collect();
        digits.parse().ok()
    }

    /// Case-insensitive match on code or trade. `term` must already be lower case.
    fn matches(&self, term: &str) -> bool {
        self.code.to_lowercase().contains(term) || self.trade.to_lowercase().contains(term)
    }
}

const MASTERFORMAT: &[(&str, &str)] = &[
    ("00", "Procurement and Contracting Requirements"),
    ("01", "General Requirements"),
    ("02", "Existing Conditions"),
    ("03", "Concrete"),
    ("04", "Masonry"),
    ("05", "Metals"),
    ("06", "Wood, Plastics, and Composites"),
    ("07", "Thermal and Moisture Protection"),
    ("08", "Openings"),
    ("09", "Finishes"),
    ("10", "Specialties"),
    ("11", "Equipment"),
    ("12", "Furnishings"),
    ("13", "Special Construction"),
    ("14", "Conveying Equipment"),
    ("21", "Fire Suppression"),
    ("22", "Plumbing"),
    ("23", "Heating, Ventilating, and Air Conditioning"),
    ("25", "Integrated Automation"),
    ("26", "Electrical"),
    ("27", "Communications"),
    ("28", "Electronic Safety and Security"),
    ("31", "Earthwork"),
    ("32", "Exterior Improvements"),
    ("33", "Utilities"),
    ("34", "Transportation"),
    ("35", "Waterway and Marine Construction"),
    ("40", "Process Interconnections"),
    ("41", "Material Processing and Handling Equipment"),
    ("42", "Process Heating, Cooling, and Drying Equipment"),
    ("43", "Process Gas and Liquid Handling, Purification, and Storage Equipment"),
    ("44", "Pollution and Waste Control Equipment"),
    ("45", "Industry-Specific Manufacturing Equipment"),
    ("46", "Water and Wastewater Equipment"),
    ("48", "Electrical Power Generation"),
];

/// The default catalog, sorted.
#[must_use]
pub fn default_cost_codes() -> Vec<CostCode> {
    let mut codes: Vec<CostCode> = MASTERFORMAT
        .iter()
        .map(|(code, trade)| CostCode::new(*code, *trade))
        .collect();
    sort_cost_codes(&mut codes);
    codes
}

/// Sort by the numeric value of each code. Codes without digits go last.
pub fn sort_cost_codes(codes: &mut [CostCode]) {
    codes.sort_by_key(|c| (c.number().is_none(), c.number()));
}

/// Entries whose code or trade contains `term`, ignoring case.
/// An empty term matches everything.
pub fn search<'a>(codes: &'a [CostCode], term: &str) -> Vec<&'a CostCode> {
    let term = term.trim().to_lowercase();
    codes
        .iter()
        .filter(|c| term.is_empty() || c.matches(&term))
        .collect()
}
