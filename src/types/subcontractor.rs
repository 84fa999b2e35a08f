use serde::{Deserialize, Serialize};

/// Contact details of a subcontractor, attached to a subcontractor column
/// through the bid book dialog.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SubcontractorInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
}
