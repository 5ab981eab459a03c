//! Catalog lookup tools exposed to the model.
//!
//! Tool argument structs mirror the declared schemas. Lookups are lenient
//! with identifiers the model made up: a blank or malformed id reads as
//! "not found", never an error, so the model can recover in-conversation.

use async_trait::async_trait;
use genai_client::Tool;
use intent::{SortBy, SortOrder};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::{search_products, Category, Product, ProductSummary, SearchArgs};

/// Error surfaced when a tool's catalog query fails.
#[derive(Debug, thiserror::Error)]
pub enum CatalogToolError {
    #[error("catalog query failed: {0}")]
    Query(String),
}

impl From<anyhow::Error> for CatalogToolError {
    fn from(err: anyhow::Error) -> Self {
        CatalogToolError::Query(err.to_string())
    }
}

fn parse_product_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

/// search_products: filtered catalog search returning compact hits.
pub struct SearchTool {
    pub pool: PgPool,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchToolArgs {
    pub query: Option<String>,
    pub category_name: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<f64>,
}

impl SearchToolArgs {
    fn into_search(self) -> SearchArgs {
        SearchArgs {
            query: self.query.unwrap_or_default(),
            category_name: self.category_name.unwrap_or_default(),
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock: self.in_stock.unwrap_or(false),
            sort_by: self.sort_by.unwrap_or_default(),
            sort_order: self.sort_order.unwrap_or_default(),
            limit: self.limit.map(|l| l as i64),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchToolOutput {
    pub items: Vec<ProductSummary>,
}

#[async_trait]
impl Tool for SearchTool {
    const NAME: &'static str = "search_products";
    type Args = SearchToolArgs;
    type Output = SearchToolOutput;
    type Error = CatalogToolError;

    fn description(&self) -> &str {
        "Busca productos del catálogo con filtros. Devuelve pocos resultados resumidos."
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let items = search_products(&args.into_search(), &self.pool).await?;
        Ok(SearchToolOutput { items })
    }
}

/// get_product_by_id: one product with its description.
pub struct ProductByIdTool {
    pub pool: PgPool,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProductIdArgs {
    #[schemars(required)]
    pub id: String,
}

/// Wire shape for a full product; missing text fields collapse to "".
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    pub image_url: String,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description.unwrap_or_default(),
            price: p.price,
            stock: p.stock,
            category: p.category.unwrap_or_default(),
            image_url: p.image_url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductLookupOutput {
    pub product: Option<ProductView>,
}

#[async_trait]
impl Tool for ProductByIdTool {
    const NAME: &'static str = "get_product_by_id";
    type Args = ProductIdArgs;
    type Output = ProductLookupOutput;
    type Error = CatalogToolError;

    fn description(&self) -> &str {
        "Obtiene un producto por id."
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let product = match parse_product_id(&args.id) {
            Some(id) => Product::find_by_id(id, &self.pool).await?,
            None => None,
        };
        Ok(ProductLookupOutput {
            product: product.map(ProductView::from),
        })
    }
}

/// get_stock: stock level by product id, echoing the id back.
pub struct StockTool {
    pub pool: PgPool,
}

#[derive(Debug, Serialize)]
pub struct StockOutput {
    pub id: String,
    pub stock: Option<i32>,
}

#[async_trait]
impl Tool for StockTool {
    const NAME: &'static str = "get_stock";
    type Args = ProductIdArgs;
    type Output = StockOutput;
    type Error = CatalogToolError;

    fn description(&self) -> &str {
        "Obtiene el stock de un producto por id."
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let requested = args.id.trim();
        let (id, stock) = match parse_product_id(requested) {
            Some(parsed) => match Product::stock_by_id(parsed, &self.pool).await? {
                Some(stock) => (parsed.to_string(), Some(stock)),
                None => (requested.to_string(), None),
            },
            None => (requested.to_string(), None),
        };
        Ok(StockOutput { id, stock })
    }
}

/// get_categories: the category list.
pub struct CategoriesTool {
    pub pool: PgPool,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NoArgs {}

#[derive(Debug, Serialize)]
pub struct CategoriesOutput {
    pub categories: Vec<Category>,
}

#[async_trait]
impl Tool for CategoriesTool {
    const NAME: &'static str = "get_categories";
    type Args = NoArgs;
    type Output = CategoriesOutput;
    type Error = CatalogToolError;

    fn description(&self) -> &str {
        "Lista las categorías disponibles."
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let categories = Category::find_all(&self.pool).await?;
        Ok(CategoriesOutput { categories })
    }
}
