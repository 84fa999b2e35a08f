use super::Dialog;
use crate::cost_codes::{default_cost_codes, search, sort_cost_codes, CostCode};

/// Pick a division from the cost-code catalog.
#[derive(Debug, Clone)]
pub struct AddDivisionDialog {
    catalog: Vec<CostCode>,
    search_term: String,
    selected: Option<CostCode>,
}

impl Default for AddDivisionDialog {
    fn default() -> Self {
        Self::with_catalog(default_cost_codes())
    }
}

impl AddDivisionDialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom catalog. It is sorted by code.
    #[must_use]
    pub fn with_catalog(mut catalog: Vec<CostCode>) -> Self {
        sort_cost_codes(&mut catalog);
        AddDivisionDialog {
            catalog,
            search_term: String::new(),
            selected: None,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Catalog entries matching the search term.
    pub fn filtered(&self) -> Vec<&CostCode> {
        search(&self.catalog, &self.search_term)
    }

    /// Select the catalog entry with this code. Unknown codes clear nothing
    /// and return false.
    pub fn select(&mut self, code: &str) -> bool {
        match self.catalog.iter().find(|c| c.code == code) {
            Some(item) => {
                self.selected = Some(item.clone());
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&CostCode> {
        self.selected.as_ref()
    }
}

impl Dialog for AddDivisionDialog {
    /// `(code, trade)`
    type Output = (String, String);

    fn is_valid(&self) -> bool {
        self.selected.is_some()
    }

    fn output(&self) -> Option<Self::Output> {
        self.selected
            .as_ref()
            .map(|c| (c.code.clone(), c.trade.clone()))
    }

    fn reset(&mut self) {
        self.search_term.clear();
        self.selected = None;
    }
}
