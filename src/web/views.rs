//! HTML Views
//!
//! Server-rendered product pages. Every page shares one layout, which also
//! subscribes to `/productHub` and reloads the product table on change.

use crate::auth::{ADMIN_MARKER, MARKER_PARAM};
use crate::catalog::{Category, Product, ProductId};
use crate::error::ValidationErrors;
use crate::models::ProductForm;

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; color: #212529; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #dee2e6; padding: 0.5rem; text-align: left; }
.price { text-align: right; }
.field { margin-bottom: 1rem; }
.field label { display: block; font-weight: 600; }
.field-error { color: #c92a2a; font-size: 0.875rem; }
"#;

const LIVE_RELOAD_SCRIPT: &str = r#"
(function () {
    var table = document.getElementById("product-list");
    if (!table || !window.WebSocket) { return; }
    var scheme = location.protocol === "https:" ? "wss://" : "ws://";
    var socket = new WebSocket(scheme + location.host + "/productHub");
    socket.onmessage = function () {
        fetch("/products/listpartial" + location.search)
            .then(function (r) { return r.text(); })
            .then(function (html) { table.innerHTML = html; });
    };
})();
"#;

/// Whether the page should offer create/edit/delete links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Links {
    ReadOnly,
    Admin,
}

impl Links {
    pub fn for_marker(marker: Option<&str>) -> Self {
        if marker == Some(ADMIN_MARKER) {
            Links::Admin
        } else {
            Links::ReadOnly
        }
    }
}

/// Which product form is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

fn html_page(title: &str, content: &str) -> String {
    let mut html = String::with_capacity(content.len() + 2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>");
    html.push_str(&html_escape(title));
    html.push_str(" - SmartGear</title>\n<style>");
    html.push_str(STYLES);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<nav><a href=\"/products\">Products</a><a href=\"/products/recent\">Recent</a></nav>\n");
    html.push_str("<h1>");
    html.push_str(&html_escape(title));
    html.push_str("</h1>\n");
    html.push_str(content);
    html.push_str("\n<script>");
    html.push_str(LIVE_RELOAD_SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

fn admin_query() -> String {
    format!("?{}={}", MARKER_PARAM, ADMIN_MARKER)
}

// == Product Table ==
/// The product table alone, served to clients refreshing after an event.
pub fn render_product_table(products: &[Product], links: Links) -> String {
    let mut content = String::with_capacity(256 + products.len() * 256);

    content.push_str("<table>\n<thead><tr><th>Name</th><th>Category</th>");
    content.push_str("<th class=\"price\">Base price</th><th class=\"price\">Markup</th>");
    content.push_str("<th class=\"price\">Final price</th><th></th></tr></thead>\n<tbody>\n");

    for product in products {
        content.push_str("<tr><td><a href=\"/products/details/");
        content.push_str(&product.id.to_string());
        content.push_str("\">");
        content.push_str(&html_escape(&product.name));
        content.push_str("</a></td><td>");
        if let Some(category) = &product.category {
            content.push_str(&html_escape(&category.name));
        }
        content.push_str("</td><td class=\"price\">");
        content.push_str(&product.base_price.to_string());
        content.push_str("</td><td class=\"price\">");
        content.push_str(&product.markup_percentage.to_string());
        content.push_str("%</td><td class=\"price\">");
        content.push_str(&product.final_price().to_string());
        content.push_str("</td><td>");
        if links == Links::Admin {
            let query = admin_query();
            content.push_str(&format!(
                "<a href=\"/products/edit/{id}{query}\">Edit</a> <a href=\"/products/delete/{id}{query}\">Delete</a>",
                id = product.id,
            ));
        }
        content.push_str("</td></tr>\n");
    }

    if products.is_empty() {
        content.push_str("<tr><td colspan=\"6\">No products yet.</td></tr>\n");
    }
    content.push_str("</tbody>\n</table>");
    content
}

// == Pages ==
pub fn render_product_list(products: &[Product], links: Links) -> String {
    let mut content = String::new();
    if links == Links::Admin {
        content.push_str(&format!(
            "<p><a href=\"/products/create{}\">Create new product</a></p>\n",
            admin_query()
        ));
    }
    content.push_str("<div id=\"product-list\">\n");
    content.push_str(&render_product_table(products, links));
    content.push_str("\n</div>");
    html_page("Products", &content)
}

pub fn render_recent_products(products: &[Product]) -> String {
    let mut content = String::from("<ol>\n");
    for product in products {
        content.push_str(&format!(
            "<li><a href=\"/products/details/{}\">{}</a> ({})</li>\n",
            product.id,
            html_escape(&product.name),
            product.final_price()
        ));
    }
    content.push_str("</ol>");
    html_page("Recent products", &content)
}

fn render_product_facts(product: &Product) -> String {
    let category = product
        .category
        .as_ref()
        .map(|c| html_escape(&c.name))
        .unwrap_or_else(|| product.category_id.to_string());

    format!(
        "<dl>\n<dt>Name</dt><dd>{}</dd>\n<dt>Description</dt><dd>{}</dd>\n\
         <dt>Category</dt><dd>{}</dd>\n<dt>Base price</dt><dd>{}</dd>\n\
         <dt>Markup</dt><dd>{}%</dd>\n<dt>Final price</dt><dd>{}</dd>\n</dl>\n",
        html_escape(&product.name),
        html_escape(product.description.as_deref().unwrap_or("")),
        category,
        product.base_price,
        product.markup_percentage,
        product.final_price(),
    )
}

pub fn render_product_details(product: &Product) -> String {
    html_page(&product.name, &render_product_facts(product))
}

/// Confirmation page for deleting a product.
pub fn render_delete_confirm(product: &Product) -> String {
    let mut content = String::from("<p>Are you sure you want to delete this product?</p>\n");
    content.push_str(&render_product_facts(product));
    content.push_str(&format!(
        "<form method=\"POST\" action=\"/products/delete/{}\">\n",
        product.id
    ));
    content.push_str(&hidden_marker());
    content.push_str("<button type=\"submit\">Delete</button>\n</form>");
    html_page("Delete product", &content)
}

fn hidden_marker() -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        MARKER_PARAM, ADMIN_MARKER
    )
}

// == Product Form ==
/// Create or edit form, with field messages when a submission was rejected.
pub fn render_product_form(
    mode: FormMode,
    form: &ProductForm,
    categories: &[Category],
    errors: Option<&ValidationErrors>,
) -> String {
    let (title, action) = match mode {
        FormMode::Create => ("Create product".to_string(), "/products/create".to_string()),
        FormMode::Edit(id) => ("Edit product".to_string(), format!("/products/edit/{}", id)),
    };

    let mut content = String::with_capacity(4096);
    content.push_str("<form method=\"POST\" action=\"");
    content.push_str(&action);
    content.push_str("\">\n");
    content.push_str(&hidden_marker());

    let field = |content: &mut String, name: &str, label: &str, input: String| {
        content.push_str("<div class=\"field\">\n<label for=\"");
        content.push_str(name);
        content.push_str("\">");
        content.push_str(label);
        content.push_str("</label>\n");
        content.push_str(&input);
        if let Some(errors) = errors {
            for message in errors.messages_for(name) {
                content.push_str("<div class=\"field-error\">");
                content.push_str(&html_escape(message));
                content.push_str("</div>\n");
            }
        }
        content.push_str("</div>\n");
    };

    field(
        &mut content,
        "name",
        "Name",
        text_input("name", &form.name),
    );
    field(
        &mut content,
        "description",
        "Description",
        format!(
            "<textarea id=\"description\" name=\"description\">{}</textarea>\n",
            html_escape(&form.description)
        ),
    );
    field(
        &mut content,
        "basePrice",
        "Base price",
        text_input("basePrice", &form.base_price),
    );
    field(
        &mut content,
        "markupPercentage",
        "Markup percentage",
        text_input("markupPercentage", &form.markup_percentage),
    );
    field(
        &mut content,
        "categoryId",
        "Category",
        category_select(categories, &form.category_id),
    );

    content.push_str("<button type=\"submit\">Save</button>\n</form>");
    html_page(&title, &content)
}

fn text_input(name: &str, value: &str) -> String {
    format!(
        "<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\">\n",
        html_escape(value)
    )
}

fn category_select(categories: &[Category], selected: &str) -> String {
    let mut select = String::from("<select id=\"categoryId\" name=\"categoryId\">\n");
    select.push_str("<option value=\"\">Select a category</option>\n");
    for category in categories {
        let id = category.id.to_string();
        let marker = if id == selected.trim() { " selected" } else { "" };
        select.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            id,
            marker,
            html_escape(&category.name)
        ));
    }
    select.push_str("</select>\n");
    select
}

/// Simple HTML escaping to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
