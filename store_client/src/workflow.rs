//! Order placement. The stepwise flow issues one request per write, as the old
//! desktop client did, so a failure part way leaves the earlier writes in place.
//! The atomic flow is a single checkout call.

use crate::api::{self, id_from_location, ApiClient};
use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use std::str::FromStr;

pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Product (by name) and quantity, parsed from `NAME=QTY`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderLine {
    pub product: String,
    pub quantity: i64,
}

impl FromStr for OrderLine {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (product, quantity) = s
            .rsplit_once('=')
            .with_context(|| format!("expected NAME=QTY, got '{}'", s))?;
        let quantity: i64 = quantity
            .trim()
            .parse()
            .with_context(|| format!("invalid quantity in '{}'", s))?;
        if quantity < 1 {
            bail!("quantity must be at least 1 in '{}'", s);
        }
        Ok(OrderLine {
            product: product.trim().to_string(),
            quantity,
        })
    }
}

struct ResolvedLine {
    name: String,
    product_id: i64,
    stock_href: String,
    quantity: i64,
}

async fn resolve_lines(api: &ApiClient, lines: &[OrderLine]) -> Result<Vec<ResolvedLine>> {
    if lines.is_empty() {
        bail!("an order needs at least one line");
    }
    let mut resolved = Vec::with_capacity(lines.len());
    for line in lines {
        let product = api.find(api::PRODUCTS, "products", "name", &line.product).await?;
        resolved.push(ResolvedLine {
            name: line.product.clone(),
            product_id: product.i64_field("id")?,
            stock_href: product.control("product:stock-by-product")?.href.clone(),
            quantity: line.quantity,
        });
    }
    Ok(resolved)
}

/// Check stock, create the order, then each product order followed by its stock decrement.
/// Returns the new order's href.
pub async fn place_order_stepwise(api: &ApiClient, customer_uuid: &str, lines: &[OrderLine]) -> Result<String> {
    let resolved = resolve_lines(api, lines).await?;
    for line in &resolved {
        let stock = api
            .get(&line.stock_href)
            .await
            .with_context(|| format!("no stock entry for '{}'", line.name))?;
        let available = stock.i64_field("quantity")?;
        if available < line.quantity {
            bail!(
                "Insufficient stock for product '{}': requested {}, available {}",
                line.name,
                line.quantity,
                available
            );
        }
    }

    let orders = api.get(api::ORDERS).await?;
    let created_at = chrono::Local::now().format(CREATED_AT_FORMAT).to_string();
    let order_href = api
        .create(
            &orders,
            "order:add-order",
            &json!({"customerId": customer_uuid, "createdAt": created_at}),
        )
        .await
        .context("creating order")?;
    let order_id = id_from_location(&order_href)?;
    tracing::info!(order = %order_href, "order created");

    let productorders = api.get(api::PRODUCTORDERS).await?;
    for line in &resolved {
        api.create(
            &productorders,
            "productorder:add-productorder",
            &json!({"orderId": order_id, "productId": line.product_id, "quantity": line.quantity}),
        )
        .await
        .with_context(|| format!("adding '{}' to order {}", line.name, order_id))?;
        reduce_stock(api, line).await?;
    }
    Ok(order_href)
}

async fn reduce_stock(api: &ApiClient, line: &ResolvedLine) -> Result<()> {
    let stock = api.get(&line.stock_href).await?;
    let remaining = stock.i64_field("quantity")? - line.quantity;
    let mut changes = Map::new();
    changes.insert("quantity".into(), Value::from(remaining));
    api.edit(&stock, &changes)
        .await
        .with_context(|| format!("updating stock of '{}'", line.name))?;
    tracing::debug!(product = %line.name, remaining, "stock reduced");
    Ok(())
}

/// Place the whole order through the checkout control. Nothing is written unless every line fits.
pub async fn place_order_atomic(api: &ApiClient, customer_uuid: &str, lines: &[OrderLine]) -> Result<String> {
    let resolved = resolve_lines(api, lines).await?;
    let items: Vec<Value> = resolved
        .iter()
        .map(|l| json!({"productId": l.product_id, "quantity": l.quantity}))
        .collect();
    let orders = api.get(api::ORDERS).await?;
    let order_href = api
        .create(&orders, "order:checkout", &json!({"customerId": customer_uuid, "items": items}))
        .await
        .context("checkout")?;
    tracing::info!(order = %order_href, lines = resolved.len(), "order checked out");
    Ok(order_href)
}
