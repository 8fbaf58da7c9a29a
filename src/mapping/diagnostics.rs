/// Messages collected while building and applying a mapping, in scan order.
///
/// Warnings come from the labs table (missing or duplicate lab ids), errors
/// from the products table (lab ids with no known company). Nothing is
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Diagnostics {
    pub fn new(warnings: Vec<String>, errors: Vec<String>) -> Self {
        Self { warnings, errors }
    }

    /// Appends `other` after the messages already held.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
