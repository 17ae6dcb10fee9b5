//! Request DTOs
//!
//! Incoming JSON bodies and HTML form submissions.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::catalog::{CategoryId, ProductId, ProductInput};
use crate::error::{CatalogError, Result, ValidationErrors};

/// JSON body for POST /api/products and PUT /api/products/{id}
///
/// Missing fields take their zero value and are then rejected by validation,
/// so a partial body answers 400 with field detail. PascalCase keys are
/// accepted too, as sent by older browser clients.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPayload {
    /// Ignored on create; must equal the path id on update
    #[serde(alias = "Id")]
    pub id: Option<ProductId>,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Description")]
    pub description: Option<String>,
    #[serde(alias = "BasePrice")]
    pub base_price: Decimal,
    #[serde(alias = "MarkupPercentage")]
    pub markup_percentage: i32,
    #[serde(alias = "CategoryId")]
    pub category_id: CategoryId,
}

impl ProductPayload {
    pub fn into_input(self) -> ProductInput {
        ProductInput {
            name: self.name,
            description: self.description.filter(|d| !d.is_empty()),
            base_price: self.base_price,
            markup_percentage: self.markup_percentage,
            category_id: self.category_id,
        }
    }
}

/// Form body posted by the product create and edit pages.
///
/// Every field arrives as text so that unparseable numbers become field
/// errors instead of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub base_price: String,
    pub markup_percentage: String,
    pub category_id: String,
    /// Caller marker, echoed into the redirect
    pub user: Option<String>,
}

impl ProductForm {
    /// Parses and validates the form into catalog input.
    pub fn to_input(&self) -> Result<ProductInput> {
        let mut errors = ValidationErrors::new();

        let base_price = parse_field(&self.base_price, "basePrice", "Base price", &mut errors);
        let markup_percentage = parse_field(
            &self.markup_percentage,
            "markupPercentage",
            "Markup percentage",
            &mut errors,
        );
        let category_id = parse_field(&self.category_id, "categoryId", "Category", &mut errors);

        let description = self.description.trim();
        let input = ProductInput {
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            base_price: base_price.unwrap_or_default(),
            markup_percentage: markup_percentage.unwrap_or_default(),
            category_id: category_id.unwrap_or_default(),
        };

        // Report parse failures alongside range failures of the other fields
        if let Err(CatalogError::Validation(found)) = input.validate() {
            for error in found.iter() {
                if !errors.has_field(error.field) {
                    errors.push(error.field, error.message.clone());
                }
            }
        }

        errors.into_result().map(|()| input)
    }

    /// Prefills the edit form from a stored product.
    pub fn from_input(input: &ProductInput) -> Self {
        Self {
            name: input.name.clone(),
            description: input.description.clone().unwrap_or_default(),
            base_price: input.base_price.to_string(),
            markup_percentage: input.markup_percentage.to_string(),
            category_id: input.category_id.to_string(),
            user: None,
        }
    }
}

/// Query string accepted by the product pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    /// Caller marker; admin links are shown when it reads "admin"
    pub user: Option<String>,
    /// Length of the recent products listing
    pub count: Option<usize>,
}

fn parse_field<T: FromStr>(
    raw: &str,
    field: &'static str,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.push(field, format!("The {} field is required.", label));
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(field, format!("The value '{}' is not valid for {}.", raw, label));
            None
        }
    }
}
