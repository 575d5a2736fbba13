//! Product payload loader
//!
//! Parses the raw Shopify Admin GraphQL response into documents. The
//! payload is treated as opaque JSON up to this point; accepted shapes
//! are the full GraphQL response, the unwrapped products connection, or
//! a bare array of product objects.

use serde_json::Value;
use shopvec_core::{Document, Result, ShopvecError};

/// Parse a raw products payload into a document sequence.
///
/// One product node becomes one document whose content is the product
/// title and whose metadata carries id, title, and handle when present.
pub fn parse_products(payload: &Value) -> Result<Vec<Document>> {
    let nodes = extract_nodes(payload).ok_or_else(|| {
        ShopvecError::Validation(
            "Products payload does not look like a Shopify products response".to_string(),
        )
    })?;

    let documents = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| node_to_document(index, node))
        .collect();

    Ok(documents)
}

/// Locate the product nodes inside any of the accepted payload shapes
fn extract_nodes(payload: &Value) -> Option<Vec<&Value>> {
    if let Some(array) = payload.as_array() {
        return Some(array.iter().collect());
    }

    let products = payload
        .pointer("/data/products")
        .or_else(|| payload.pointer("/products"))?;

    let edges = products.get("edges")?.as_array()?;
    Some(
        edges
            .iter()
            .map(|edge| edge.get("node").unwrap_or(edge))
            .collect(),
    )
}

fn node_to_document(index: usize, node: &Value) -> Document {
    let id = match node.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => format!("product-{index}"),
    };

    let title = node.get("title").and_then(Value::as_str).unwrap_or_default();
    let handle = node.get("handle").and_then(Value::as_str);

    let content = if title.is_empty() {
        node.to_string()
    } else {
        title.to_string()
    };

    let mut doc = Document::new(id.clone(), content).with_metadata("id", id);
    if !title.is_empty() {
        doc = doc.with_metadata("title", title);
    }
    if let Some(handle) = handle {
        doc = doc.with_metadata("handle", handle);
    }
    doc
}
