use super::validation::{is_present, is_valid_email, is_valid_phone, EMAIL_MESSAGE, PHONE_MESSAGE};
use super::{Dialog, FieldError};
use crate::types::SubcontractorInfo;

/// Subcontractor contact details for a subcontractor column.
#[derive(Debug, Clone)]
pub struct BidBookDialog {
    sheet_id: String,
    column_id: String,
    seed: SubcontractorInfo,
    input: SubcontractorInfo,
}

impl BidBookDialog {
    /// Open for a column, pre-filled with the details saved for it (if any).
    #[must_use]
    pub fn new(sheet_id: &str, column_id: &str, existing: Option<&SubcontractorInfo>) -> Self {
        let seed = existing.cloned().unwrap_or_default();
        BidBookDialog {
            sheet_id: sheet_id.to_string(),
            column_id: column_id.to_string(),
            input: seed.clone(),
            seed,
        }
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    pub fn input(&self) -> &SubcontractorInfo {
        &self.input
    }

    pub fn set_name(&mut self, name: &str) {
        self.input.name = name.to_string();
    }

    pub fn set_company(&mut self, company: &str) {
        self.input.company = company.to_string();
    }

    pub fn set_phone(&mut self, phone: &str) {
        self.input.phone = phone.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.input.email = email.to_string();
    }
}

impl Dialog for BidBookDialog {
    type Output = SubcontractorInfo;

    fn is_valid(&self) -> bool {
        let i = &self.input;
        is_present(&i.name)
            && is_present(&i.company)
            && is_valid_email(i.email.trim())
            && is_valid_phone(&i.phone)
    }

    fn output(&self) -> Option<Self::Output> {
        self.is_valid().then(|| SubcontractorInfo {
            name: self.input.name.trim().to_string(),
            email: self.input.email.trim().to_string(),
            phone: self.input.phone.trim().to_string(),
            company: self.input.company.trim().to_string(),
        })
    }

    fn reset(&mut self) {
        self.input = self.seed.clone();
    }

    fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !self.input.phone.is_empty() && !is_valid_phone(&self.input.phone) {
            errors.push(FieldError {
                field: "phone",
                message: PHONE_MESSAGE,
            });
        }
        if !self.input.email.is_empty() && !is_valid_email(self.input.email.trim()) {
            errors.push(FieldError {
                field: "email",
                message: EMAIL_MESSAGE,
            });
        }
        errors
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn filled() -> BidBookDialog {
        let mut dialog = BidBookDialog::new("division-03", "col-1", None);
        dialog.set_name("Ana Ruiz");
        dialog.set_company("Forms Inc");
        dialog.set_phone("(555) 123-4567");
        dialog.set_email("ana@forms.example");
        dialog
    }

    #[test]
    fn empty_form_is_invalid_without_messages() {
        let dialog = BidBookDialog::new("division-03", "col-1", None);
        assert!(!dialog.is_valid());
        assert!(dialog.errors().is_empty());
    }

    #[test]
    fn bad_phone_and_email_are_reported() {
        let mut dialog = filled();
        dialog.set_phone("555-1234");
        dialog.set_email("ana@forms");
        assert!(!dialog.is_valid());
        let errors = dialog.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, PHONE_MESSAGE);
        assert_eq!(errors[1].field, "email");
    }

    #[test]
    fn company_is_required() {
        let mut dialog = filled();
        dialog.set_company(" ");
        assert!(!dialog.is_valid());
        assert!(dialog.errors().is_empty());
    }

    #[test]
    fn seeds_from_existing_and_resets_to_it() {
        let existing = filled().submit().unwrap();
        let mut dialog = BidBookDialog::new("division-03", "col-1", Some(&existing));
        assert!(dialog.is_valid());
        dialog.set_name("Someone Else");
        dialog.reset();
        assert_eq!(dialog.input(), &existing);
    }
}
