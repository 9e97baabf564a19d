//! Reverse routing: hrefs for every collection and item route.

pub fn customer_collection() -> String {
    "/api/customers/".to_string()
}

pub fn customer_item(uuid: &str) -> String {
    format!("/api/customers/{}/", encode_segment(uuid))
}

pub fn customer_orders(uuid: &str) -> String {
    format!("/api/customers/{}/orders/", encode_segment(uuid))
}

pub fn order_collection() -> String {
    "/api/orders/".to_string()
}

pub fn order_item(id: i64) -> String {
    format!("/api/orders/{}/", id)
}

pub fn checkout() -> String {
    "/api/checkout/".to_string()
}

pub fn productorder_collection() -> String {
    "/api/productorders/".to_string()
}

pub fn productorder_item(id: i64) -> String {
    format!("/api/productorders/{}/", id)
}

pub fn product_collection() -> String {
    "/api/products/".to_string()
}

pub fn product_item(name: &str) -> String {
    format!("/api/products/{}/", encode_segment(name))
}

pub fn product_productorders(name: &str) -> String {
    format!("/api/products/{}/productorders/", encode_segment(name))
}

pub fn stock_collection() -> String {
    "/api/stock/".to_string()
}

pub fn stock_item(product_id: i64) -> String {
    format!("/api/stock/{}/", product_id)
}

pub fn profile(name: &str) -> String {
    format!("/profiles/{}/", name)
}

/// Percent-encode a single path segment. Only RFC 3986 unreserved bytes pass through.
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}
