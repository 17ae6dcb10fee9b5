//! Product and Category Model
//!
//! Catalog entities, the derived final price, and field validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationErrors};

/// Repository-assigned product identity.
pub type ProductId = i32;

/// Repository-assigned category identity.
pub type CategoryId = i32;

// == Constraints ==
/// Maximum product and category name length in characters
pub const MAX_NAME_LENGTH: usize = 60;

/// Maximum product description length in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 250;

/// Smallest accepted base price, whole currency units (inclusive)
pub const MIN_BASE_PRICE: i64 = 1;

/// Largest accepted base price, whole currency units (inclusive)
pub const MAX_BASE_PRICE: i64 = 100_000;

/// Largest accepted markup percentage (inclusive)
pub const MAX_MARKUP_PERCENTAGE: i32 = 100;

// == Category ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// == Product Input ==
/// Product fields supplied by a caller, before the repository assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub markup_percentage: i32,
    pub category_id: CategoryId,
}

impl ProductInput {
    /// Checks every field constraint and reports all violations at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.push("name", "The Name field is required.");
        } else if self.name.chars().count() > MAX_NAME_LENGTH {
            errors.push(
                "name",
                format!("Name must be at most {} characters.", MAX_NAME_LENGTH),
            );
        }

        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                errors.push(
                    "description",
                    format!(
                        "Description must be at most {} characters.",
                        MAX_DESCRIPTION_LENGTH
                    ),
                );
            }
        }

        if self.base_price < Decimal::from(MIN_BASE_PRICE)
            || self.base_price > Decimal::from(MAX_BASE_PRICE)
        {
            errors.push(
                "basePrice",
                format!(
                    "Base price must be between {} and {}.",
                    MIN_BASE_PRICE, MAX_BASE_PRICE
                ),
            );
        }

        if !(0..=MAX_MARKUP_PERCENTAGE).contains(&self.markup_percentage) {
            errors.push(
                "markupPercentage",
                format!(
                    "Markup percentage must be between 0 and {}.",
                    MAX_MARKUP_PERCENTAGE
                ),
            );
        }

        if self.category_id <= 0 {
            errors.push("categoryId", "The Category field is required.");
        }

        errors.into_result()
    }

    /// Attaches an identity, producing the stored shape of the product.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            base_price: self.base_price,
            markup_percentage: self.markup_percentage,
            category_id: self.category_id,
            category: None,
        }
    }
}

// == Product ==
/// A stored product. The final price is derived on demand and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub markup_percentage: i32,
    pub category_id: CategoryId,
    /// Joined by the repository when available
    pub category: Option<Category>,
}

impl Product {
    /// `base_price + base_price * markup_percentage / 100`, computed exactly.
    pub fn final_price(&self) -> Decimal {
        final_price(self.base_price, self.markup_percentage)
    }

    /// Strips identity and join data back into caller input.
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            description: self.description.clone(),
            base_price: self.base_price,
            markup_percentage: self.markup_percentage,
            category_id: self.category_id,
        }
    }
}

/// Final price for a base price and markup percentage.
pub fn final_price(base_price: Decimal, markup_percentage: i32) -> Decimal {
    base_price + base_price * Decimal::from(markup_percentage) / Decimal::ONE_HUNDRED
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    fn valid_input() -> ProductInput {
        ProductInput {
            name: "Soccer Ball".to_string(),
            description: Some("Size 5 training ball".to_string()),
            base_price: Decimal::from(250),
            markup_percentage: 20,
            category_id: 1,
        }
    }

    fn validation_fields(input: &ProductInput) -> Vec<&'static str> {
        match input.validate() {
            Err(CatalogError::Validation(errors)) => errors.iter().map(|e| e.field).collect(),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(()) => Vec::new(),
        }
    }

    #[test]
    fn test_final_price_seed_products() {
        let ball = valid_input().with_id(1);
        assert_eq!(ball.final_price(), Decimal::from(300));

        let boots = ProductInput {
            base_price: Decimal::from(700),
            markup_percentage: 15,
            ..valid_input()
        }
        .with_id(2);
        assert_eq!(boots.final_price(), Decimal::from(805));
    }

    #[test]
    fn test_final_price_boundaries() {
        let cases = [
            (1, 0, Decimal::ONE),
            (1, 100, Decimal::TWO),
            (100_000, 0, Decimal::from(100_000)),
            (100_000, 100, Decimal::from(200_000)),
        ];
        for (base, markup, expected) in cases {
            assert_eq!(final_price(Decimal::from(base), markup), expected);
        }
    }

    #[test]
    fn test_final_price_is_exact_for_fractions() {
        // 19.99 * 15% = 2.9985, no float rounding
        let price = final_price(Decimal::new(1999, 2), 15);
        assert_eq!(price, Decimal::new(229_885, 4));
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_base_price_bounds_inclusive() {
        let mut input = valid_input();
        input.base_price = Decimal::ONE;
        assert!(input.validate().is_ok());
        input.base_price = Decimal::from(100_000);
        assert!(input.validate().is_ok());
        input.base_price = Decimal::new(99, 2);
        assert_eq!(validation_fields(&input), vec!["basePrice"]);
        input.base_price = Decimal::new(10_000_001, 2);
        assert_eq!(validation_fields(&input), vec!["basePrice"]);
    }

    #[test]
    fn test_name_rules() {
        let mut input = valid_input();
        input.name = "   ".to_string();
        assert_eq!(validation_fields(&input), vec!["name"]);
        input.name = "x".repeat(MAX_NAME_LENGTH);
        assert!(input.validate().is_ok());
        input.name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(validation_fields(&input), vec!["name"]);
    }

    #[test]
    fn test_reports_every_violation() {
        let input = ProductInput {
            name: String::new(),
            description: Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1)),
            base_price: Decimal::ZERO,
            markup_percentage: 101,
            category_id: 0,
        };
        assert_eq!(
            validation_fields(&input),
            vec![
                "name",
                "description",
                "basePrice",
                "markupPercentage",
                "categoryId"
            ]
        );
    }

    #[test]
    fn test_negative_markup_rejected() {
        let mut input = valid_input();
        input.markup_percentage = -1;
        assert_eq!(validation_fields(&input), vec!["markupPercentage"]);
    }
}
