//! Filing form classification.
//!
//! Only full-year reports contribute to annual statements. [`FilingForm`] separates the
//! annual report forms (and their amendments, including the foreign-filer equivalents)
//! from everything else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Form types that represent a full-year report.
pub const ANNUAL_FORMS: &[&str] = &["10-K", "10-K/A", "20-F", "20-F/A", "40-F", "40-F/A"];

/// Classification of the filing form a fact was disclosed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilingForm {
    /// Annual report or an amendment to one.
    Annual,
    /// Quarterly or any other interim form.
    Interim,
}

impl FilingForm {
    /// Classifies a raw form string. Unknown forms are treated as interim.
    #[must_use]
    pub fn classify(form: &str) -> Self {
        if ANNUAL_FORMS.contains(&form) {
            Self::Annual
        } else {
            Self::Interim
        }
    }

    /// Returns true if this is an annual form.
    #[must_use]
    pub const fn is_annual(&self) -> bool {
        matches!(self, Self::Annual)
    }
}

impl fmt::Display for FilingForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Annual => write!(f, "annual"),
            Self::Interim => write!(f, "interim"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("10-K", FilingForm::Annual)]
    #[case("10-K/A", FilingForm::Annual)]
    #[case("20-F", FilingForm::Annual)]
    #[case("40-F/A", FilingForm::Annual)]
    #[case("10-Q", FilingForm::Interim)]
    #[case("10-Q/A", FilingForm::Interim)]
    #[case("8-K", FilingForm::Interim)]
    #[case("10-k", FilingForm::Interim)]
    fn test_classify(#[case] form: &str, #[case] expected: FilingForm) {
        assert_eq!(FilingForm::classify(form), expected);
    }
}
