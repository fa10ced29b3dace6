//! A single catalog entry and its validation rules.
//!
//! Fields are private: construction validates everything, and partial
//! updates silently drop values that would break an invariant.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::error::ValidationError;

/// Category assigned when none is supplied
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Whether an item can currently be borrowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// On the shelf
    Accessible,

    /// Checked out
    OnLoan,
}

impl Availability {
    /// Canonical text form, also used when rendering
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Accessible => "Accessible",
            Availability::OnLoan => "On Loan",
        }
    }

    /// Lenient parse for operator input: trims and ignores case.
    ///
    /// The item itself only accepts the exact canonical strings, so callers
    /// reading from a keyboard normalize through this first.
    pub fn parse_loose(input: &str) -> Option<Self> {
        let input = input.trim();
        [Availability::Accessible, Availability::OnLoan]
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Accessible" => Ok(Availability::Accessible),
            "On Loan" => Ok(Availability::OnLoan),
            other => Err(ValidationError::InvalidAvailability(other.to_string())),
        }
    }
}

/// Partial update for an item; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub category: Option<String>,
    pub availability: Option<String>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = Some(availability.into());
        self
    }
}

/// One entry in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    code: String,
    title: String,
    creator: String,
    category: String,
    availability: Availability,
}

impl CatalogItem {
    /// Create a validated item.
    ///
    /// `code`, `title` and `creator` must be non-blank; all string fields are
    /// stored trimmed. A missing category becomes [`DEFAULT_CATEGORY`], and
    /// `availability` must be exactly `"Accessible"` or `"On Loan"`.
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        creator: impl Into<String>,
        category: Option<String>,
        availability: &str,
    ) -> Result<Self, ValidationError> {
        let code = required(code.into(), "Code")?;
        let title = required(title.into(), "Title")?;
        let creator = required(creator.into(), "Creator")?;
        let category = category
            .map(|c| c.trim().to_string())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let availability = availability.parse()?;

        Ok(Self {
            code,
            title,
            creator,
            category,
            availability,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Apply a partial update.
    ///
    /// Blank titles or creators and unrecognised availability values are
    /// ignored rather than rejected, leaving the current value in place. A
    /// supplied category always replaces the current one.
    pub fn update_fields(&mut self, update: ItemUpdate) {
        if let Some(title) = update.title {
            match non_blank(&title) {
                Some(title) => self.title = title,
                None => debug!(code = %self.code, "ignoring blank title"),
            }
        }

        if let Some(creator) = update.creator {
            match non_blank(&creator) {
                Some(creator) => self.creator = creator,
                None => debug!(code = %self.code, "ignoring blank creator"),
            }
        }

        if let Some(category) = update.category {
            self.category = category.trim().to_string();
        }

        if let Some(status) = update.availability {
            match status.parse() {
                Ok(availability) => self.availability = availability,
                Err(_) => debug!(code = %self.code, status = %status, "ignoring invalid status"),
            }
        }
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] '{}' by {} | Category: {} | {}",
            self.code, self.title, self.creator, self.category, self.availability
        )
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
    non_blank(&value).ok_or(ValidationError::Required { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> CatalogItem {
        CatalogItem::new("B1", "Dune", "Herbert", Some("SciFi".to_string()), "Accessible").unwrap()
    }

    #[test]
    fn test_item_creation_trims_fields() {
        let item = CatalogItem::new(
            " B2 ",
            "  Neuromancer ",
            " Gibson",
            Some(" Cyberpunk ".to_string()),
            "On Loan",
        )
        .unwrap();

        assert_eq!(item.code(), "B2");
        assert_eq!(item.title(), "Neuromancer");
        assert_eq!(item.creator(), "Gibson");
        assert_eq!(item.category(), "Cyberpunk");
        assert_eq!(item.availability(), Availability::OnLoan);
    }

    #[test]
    fn test_missing_category_defaults() {
        let item = CatalogItem::new("B1", "Dune", "Herbert", None, "Accessible").unwrap();
        assert_eq!(item.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_blank_category_kept_as_given() {
        let item =
            CatalogItem::new("B1", "Dune", "Herbert", Some("   ".to_string()), "Accessible").unwrap();
        assert_eq!(item.category(), "");
    }

    #[test]
    fn test_blank_required_fields_rejected() {
        let err = CatalogItem::new("B1", "   ", "Herbert", None, "Accessible").unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "Title" });

        let err = CatalogItem::new("B1", "Dune", "", None, "Accessible").unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "Creator" });

        let err = CatalogItem::new("\t", "Dune", "Herbert", None, "Accessible").unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "Code" });
    }

    #[test]
    fn test_availability_must_match_exactly() {
        for bad in ["accessible", "OnLoan", "Loaned", "", " Accessible"] {
            let result = CatalogItem::new("B1", "Dune", "Herbert", None, bad);
            assert!(
                matches!(result, Err(ValidationError::InvalidAvailability(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_loose() {
        assert_eq!(Availability::parse_loose("accessible"), Some(Availability::Accessible));
        assert_eq!(Availability::parse_loose(" on loan "), Some(Availability::OnLoan));
        assert_eq!(Availability::parse_loose("ON LOAN"), Some(Availability::OnLoan));
        assert_eq!(Availability::parse_loose("onloan"), None);
        assert_eq!(Availability::parse_loose(""), None);
    }

    #[test]
    fn test_render() {
        assert_eq!(
            dune().to_string(),
            "[B1] 'Dune' by Herbert | Category: SciFi | Accessible"
        );
    }

    #[test]
    fn test_update_replaces_valid_fields() {
        let mut item = dune();
        item.update_fields(
            ItemUpdate::new()
                .with_title(" Dune Messiah ")
                .with_creator("Frank Herbert")
                .with_category("Classics")
                .with_availability("On Loan"),
        );

        assert_eq!(
            item.to_string(),
            "[B1] 'Dune Messiah' by Frank Herbert | Category: Classics | On Loan"
        );
    }

    #[test]
    fn test_update_ignores_invalid_fields() {
        let mut item = dune();
        item.update_fields(
            ItemUpdate::new()
                .with_title("  ")
                .with_creator("")
                .with_availability("Loaned"),
        );

        assert_eq!(item, dune());
    }

    #[test]
    fn test_update_category_is_unconditional() {
        let mut item = dune();
        item.update_fields(ItemUpdate::new().with_category("   "));
        assert_eq!(item.category(), "");
        assert_eq!(item.title(), "Dune");
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut item = dune();
        item.update_fields(ItemUpdate::new());
        assert_eq!(item, dune());
    }
}
