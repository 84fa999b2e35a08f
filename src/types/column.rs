use serde::{Deserialize, Serialize};

/// The two kinds of sheet a project holds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SheetKind {
    /// The single "Budget Summary" sheet listing divisions.
    Budget,
    /// A detail sheet of line items for one division.
    Division,
}

/// Column types. Rows are keyed by these, so a sheet holds at most one value
/// per type in each row.
///
/// Serialized as the prefixed screaming-case keys the stored JSON uses
/// (`BUDGET_COST_CODE`, `DIVISION_UNIT_COST`, ...).
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    BudgetCostCode,
    BudgetDivision,
    BudgetDetails,
    BudgetCost,
    BudgetNotes,
    DivisionCode,
    DivisionCost,
    DivisionLineItems,
    DivisionNotes,
    DivisionOther,
    DivisionQuantity,
    DivisionReference,
    DivisionRequiredQuantity,
    DivisionSubcontractor,
    DivisionUnitCost,
    DivisionUnits,
}

impl ColumnType {
    /// Budget-sheet column types, in declaration order.
    pub const BUDGET: [ColumnType; 5] = [
        ColumnType::BudgetCostCode,
        ColumnType::BudgetDivision,
        ColumnType::BudgetDetails,
        ColumnType::BudgetCost,
        ColumnType::BudgetNotes,
    ];

    /// Division-sheet column types, in declaration order.
    pub const DIVISION: [ColumnType; 11] = [
        ColumnType::DivisionCode,
        ColumnType::DivisionCost,
        ColumnType::DivisionLineItems,
        ColumnType::DivisionNotes,
        ColumnType::DivisionOther,
        ColumnType::DivisionQuantity,
        ColumnType::DivisionReference,
        ColumnType::DivisionRequiredQuantity,
        ColumnType::DivisionSubcontractor,
        ColumnType::DivisionUnitCost,
        ColumnType::DivisionUnits,
    ];

    /// Column types that may be added to a sheet of the given kind.
    #[must_use]
    pub fn for_kind(kind: SheetKind) -> &'static [ColumnType] {
        match kind {
            SheetKind::Budget => &Self::BUDGET,
            SheetKind::Division => &Self::DIVISION,
        }
    }

    /// The sheet kind this column type belongs to.
    #[must_use]
    pub fn kind(self) -> SheetKind {
        match self {
            Self::BudgetCostCode
            | Self::BudgetDivision
            | Self::BudgetDetails
            | Self::BudgetCost
            | Self::BudgetNotes => SheetKind::Budget,
            _ => SheetKind::Division,
        }
    }

    /// Whether cells of this type hold numbers.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::BudgetCost
                | Self::DivisionCost
                | Self::DivisionQuantity
                | Self::DivisionRequiredQuantity
                | Self::DivisionUnitCost
        )
    }

    /// Whether users may edit cells of this type. Every type is editable today.
    #[must_use]
    pub fn is_editable(self) -> bool {
        true
    }

    /// Default column width in pixels.
    #[must_use]
    pub fn default_width(self) -> u32 {
        match self {
            Self::BudgetDivision
            | Self::BudgetDetails
            | Self::BudgetNotes
            | Self::DivisionLineItems => 200,
            Self::DivisionSubcontractor => 150,
            Self::DivisionUnits => 100,
            _ => 120,
        }
    }

    /// The wire key, e.g. `BUDGET_COST_CODE`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::BudgetCostCode => "BUDGET_COST_CODE",
            Self::BudgetDivision => "BUDGET_DIVISION",
            Self::BudgetDetails => "BUDGET_DETAILS",
            Self::BudgetCost => "BUDGET_COST",
            Self::BudgetNotes => "BUDGET_NOTES",
            Self::DivisionCode => "DIVISION_CODE",
            Self::DivisionCost => "DIVISION_COST",
            Self::DivisionLineItems => "DIVISION_LINE_ITEMS",
            Self::DivisionNotes => "DIVISION_NOTES",
            Self::DivisionOther => "DIVISION_OTHER",
            Self::DivisionQuantity => "DIVISION_QUANTITY",
            Self::DivisionReference => "DIVISION_REFERENCE",
            Self::DivisionRequiredQuantity => "DIVISION_REQUIRED_QUANTITY",
            Self::DivisionSubcontractor => "DIVISION_SUBCONTRACTOR",
            Self::DivisionUnitCost => "DIVISION_UNIT_COST",
            Self::DivisionUnits => "DIVISION_UNITS",
        }
    }

    /// Parse a wire key back into a column type.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::BUDGET
            .iter()
            .chain(Self::DIVISION.iter())
            .copied()
            .find(|t| t.key() == key)
    }

    /// Human label shown in the "add column" picker: the key without its
    /// sheet prefix, lower case, underscores as spaces.
    #[must_use]
    pub fn label(self) -> String {
        let key = self.key();
        let bare = key
            .strip_prefix("BUDGET_")
            .or_else(|| key.strip_prefix("DIVISION_"))
            .unwrap_or(key);
        bare.replace('_', " ").to_lowercase()
    }
}

/// A sheet column.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    /// A new column with a freshly generated id.
    #[must_use]
    pub fn new(title: impl Into<String>, column_type: ColumnType) -> Self {
        Column {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            column_type,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_serde_names() {
        for t in ColumnType::BUDGET.iter().chain(ColumnType::DIVISION.iter()) {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.key()));
            assert_eq!(ColumnType::from_key(t.key()), Some(*t));
        }
    }

    #[test]
    fn labels_drop_prefix() {
        assert_eq!(ColumnType::BudgetCostCode.label(), "cost code");
        assert_eq!(
            ColumnType::DivisionRequiredQuantity.label(),
            "required quantity"
        );
    }

    #[test]
    fn kinds_partition_the_types() {
        assert!(ColumnType::BUDGET
            .iter()
            .all(|t| t.kind() == SheetKind::Budget));
        assert!(ColumnType::DIVISION
            .iter()
            .all(|t| t.kind() == SheetKind::Division));
    }

    #[test]
    fn fresh_columns_get_distinct_ids() {
        let a = Column::new("Units", ColumnType::DivisionUnits);
        let b = Column::new("Units", ColumnType::DivisionUnits);
        assert_ne!(a.id, b.id);
    }
}
