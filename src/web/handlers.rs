//! Page Handlers
//!
//! Product pages and the form-based mutations behind the mutation gate.
//! Successful mutations publish a `ProductChanged` event and redirect back
//! to the list.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::info;

use crate::api::AppState;
use crate::auth::{RequireAdmin, ADMIN_MARKER, MARKER_PARAM};
use crate::catalog::{ProductId, DEFAULT_RECENT_COUNT};
use crate::error::{CatalogError, Result, ValidationErrors};
use crate::models::{PageQuery, ProductForm};
use crate::notify::ProductChanged;

use super::views::{self, FormMode, Links};

fn not_found(id: ProductId) -> CatalogError {
    CatalogError::NotFound(format!("Product {} not found", id))
}

fn back_to_list() -> Redirect {
    Redirect::to(&format!("/products?{}={}", MARKER_PARAM, ADMIN_MARKER))
}

// == Public Pages ==
/// Handler for GET /products
pub async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let products = state.catalog.list_all().await?;
    let links = Links::for_marker(query.user.as_deref());
    Ok(Html(views::render_product_list(&products, links)))
}

/// Handler for GET /products/listpartial
pub async fn list_partial_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let products = state.catalog.list_all().await?;
    let links = Links::for_marker(query.user.as_deref());
    Ok(Html(views::render_product_table(&products, links)))
}

/// Handler for GET /products/recent
pub async fn recent_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    let count = query.count.unwrap_or(DEFAULT_RECENT_COUNT);
    let products = state.catalog.recent_products(count).await?;
    Ok(Html(views::render_recent_products(&products)))
}

/// Handler for GET /products/details/:id
pub async fn details_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Html<String>> {
    let product = state.catalog.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Html(views::render_product_details(&product)))
}

// == Gated Forms ==
/// Handler for GET /products/create
pub async fn create_form_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let categories = state.catalog.list_categories().await?;
    Ok(Html(views::render_product_form(
        FormMode::Create,
        &ProductForm::default(),
        &categories,
        None,
    )))
}

/// Handler for GET /products/edit/:id
pub async fn edit_form_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Html<String>> {
    let product = state.catalog.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    let categories = state.catalog.list_categories().await?;
    let form = ProductForm::from_input(&product.to_input());
    Ok(Html(views::render_product_form(
        FormMode::Edit(id),
        &form,
        &categories,
        None,
    )))
}

/// Handler for GET /products/delete/:id
pub async fn delete_form_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Html<String>> {
    let product = state.catalog.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Html(views::render_delete_confirm(&product)))
}

// == Gated Mutations ==
/// Handler for POST /products/create
pub async fn create_handler(
    State(state): State<AppState>,
    RequireAdmin(principal): RequireAdmin,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(CatalogError::Validation(errors)) => {
            return rejected_form(&state, FormMode::Create, &form, &errors).await
        }
        Err(e) => return Err(e),
    };

    let created = state.catalog.create(input).await?;
    state.notifier.publish(ProductChanged::added(created.id));
    info!(id = created.id, by = %principal.name, "Product created from form");

    Ok(back_to_list().into_response())
}

/// Handler for POST /products/edit/:id
pub async fn edit_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    RequireAdmin(principal): RequireAdmin,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let input = match form.to_input() {
        Ok(input) => input,
        Err(CatalogError::Validation(errors)) => {
            return rejected_form(&state, FormMode::Edit(id), &form, &errors).await
        }
        Err(e) => return Err(e),
    };

    if !state.catalog.update(id, input).await? {
        return Err(not_found(id));
    }
    state.notifier.publish(ProductChanged::updated(id));
    info!(id, by = %principal.name, "Product updated from form");

    Ok(back_to_list().into_response())
}

/// Handler for POST /products/delete/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    RequireAdmin(principal): RequireAdmin,
) -> Result<Response> {
    if !state.catalog.delete(id).await? {
        return Err(not_found(id));
    }
    state.notifier.publish(ProductChanged::deleted(id));
    info!(id, by = %principal.name, "Product deleted from form");

    Ok(back_to_list().into_response())
}

/// Re-renders a rejected submission with its field messages and a 400.
async fn rejected_form(
    state: &AppState,
    mode: FormMode,
    form: &ProductForm,
    errors: &ValidationErrors,
) -> Result<Response> {
    let categories = state.catalog.list_categories().await?;
    let html = views::render_product_form(mode, form, &categories, Some(errors));
    Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
}
