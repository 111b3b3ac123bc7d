//! Product summaries
//!
//! Turns priced products into display-ready fields. The TUI cards and the
//! headless `lookup` command both render from these, so the two never
//! disagree on what a product shows.

use serde_json::Value;

use crate::gateway::{display_value, spec_rows, PricedProduct, SpecGroup};
use crate::logic::pricing::{format_change, format_list_price};
use crate::theme::UiText;

/// Unit shown for products the backend has no price for
const DEFAULT_UNIT: &str = "Month";

/// Meta key holding the documentation link
const LINK_KEY: &str = "introduceUrl";

/// Titled group of key/value rows
#[derive(Debug, Clone, PartialEq)]
pub struct CardSection {
    pub title: &'static str,
    pub rows: Vec<(String, String)>,
}

/// Everything a product card shows
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub price: String,
    pub unit: String,
    pub effective_date: String,
    /// Instance family or volume type, `Not Found` when unpriced
    pub family: String,
    /// Percent change since the previous lookup
    pub change: Option<f64>,
    pub link: Option<String>,
    pub sections: Vec<CardSection>,
}

fn base_summary(product: &PricedProduct, family_key: &str) -> ProductSummary {
    let (unit, effective_date) = match &product.list_price {
        Some(price) => (price.unit.clone(), price.effective_date.clone()),
        None => (DEFAULT_UNIT.to_string(), String::new()),
    };
    let family = match product.list_price {
        Some(_) => product.meta(family_key),
        None => None,
    };

    ProductSummary {
        price: format_list_price(product.list_price.as_ref()),
        unit,
        effective_date,
        family: family.unwrap_or_else(|| UiText::NOT_FOUND.to_string()),
        change: None,
        link: product.meta(LINK_KEY),
        sections: Vec::new(),
    }
}

fn section(title: &'static str, group: &SpecGroup) -> Option<CardSection> {
    let rows: Vec<(String, String)> = spec_rows(group)
        .into_iter()
        .filter(|(key, _)| key != LINK_KEY)
        .collect();
    (!rows.is_empty()).then_some(CardSection { title, rows })
}

/// Summary of an instance product, with the price change if known
pub fn instance_summary(product: &PricedProduct, change: Option<f64>) -> ProductSummary {
    let mut summary = base_summary(product, "instanceFamily");
    summary.change = change;
    summary.sections = [
        section("Product", &product.product_meta),
        section("Hardware", &product.hardware_specs),
        section("Software", &product.software_specs),
        section("Storage", &product.instance_storage),
        section("Features", &product.product_feature),
    ]
    .into_iter()
    .flatten()
    .collect();
    summary
}

/// Summary of an EBS volume product
pub fn volume_summary(product: &PricedProduct) -> ProductSummary {
    let mut summary = base_summary(product, "volumeType");
    summary.sections = [
        section("Product", &product.product_meta),
        section("Specs", &product.product_specs),
    ]
    .into_iter()
    .flatten()
    .collect();
    summary
}

/// Top-level fields of an instance detail object as key/value rows.
///
/// Nested values are shown as compact JSON.
pub fn detail_rows(detail: &Value) -> Vec<(String, String)> {
    match detail {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Array(_) | Value::Object(_) => Some(value.to_string()),
                    scalar => display_value(scalar),
                };
                text.map(|t| (key.clone(), t))
            })
            .collect(),
        other => display_value(other)
            .map(|t| vec![("value".to_string(), t)])
            .unwrap_or_default(),
    }
}

/// Plain-text card for headless output
pub fn summary_lines(title: &str, summary: &ProductSummary) -> Vec<String> {
    let mut lines = vec![format!("== {title} ==")];
    let mut price = format!("Price: {} / {}", summary.price, summary.unit);
    if let Some(change) = summary.change {
        price.push_str(&format!(" ({})", format_change(change)));
    }
    lines.push(price);
    if !summary.effective_date.is_empty() {
        lines.push(format!("Effective: {}", summary.effective_date));
    }
    lines.push(format!("Family: {}", summary.family));
    if let Some(link) = &summary.link {
        lines.push(format!("More: {link}"));
    }
    for section in &summary.sections {
        lines.push(String::new());
        lines.push(format!("[{}]", section.title));
        for (key, value) in &section.rows {
            lines.push(format!("  {key}: {value}"));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instance() -> PricedProduct {
        serde_json::from_value(json!({
            "listPrice": {"pricePerUnit": {"currency": "USD", "value": 70.08},
                          "unit": "Month", "effectiveDate": "2024-06-01"},
            "productMeta": {"instanceFamily": "General purpose",
                            "introduceUrl": "https://aws.amazon.com/ec2/instance-types/m5"},
            "hardwareSpecs": {"vcpu": "2", "memory": "8 GiB", "gpu": null},
            "softwareSpecs": {}
        }))
        .unwrap()
    }

    #[test]
    fn instance_summary_fields() {
        let summary = instance_summary(&instance(), Some(20.0));
        assert_eq!(summary.price, "USD 70.08");
        assert_eq!(summary.family, "General purpose");
        assert_eq!(summary.change, Some(20.0));
        assert_eq!(
            summary.link.as_deref(),
            Some("https://aws.amazon.com/ec2/instance-types/m5")
        );
        let titles: Vec<&str> = summary.sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, ["Product", "Hardware"]);
        // Link is shown once, not as a product row
        assert_eq!(summary.sections[0].rows.len(), 1);
    }

    #[test]
    fn unpriced_product_shows_placeholders() {
        let product: PricedProduct =
            serde_json::from_value(json!({"productMeta": {"volumeType": "gp3"}})).unwrap();
        let summary = volume_summary(&product);
        assert_eq!(summary.price, "unknown");
        assert_eq!(summary.unit, "Month");
        assert_eq!(summary.family, "Not Found");
    }

    #[test]
    fn detail_rows_flatten_top_level() {
        let rows = detail_rows(&json!({
            "instanceType": "m5.large",
            "vCpuInfo": {"DefaultVCpus": 2},
            "burstable": false,
            "note": null
        }));
        assert_eq!(
            rows,
            vec![
                ("instanceType".to_string(), "m5.large".to_string()),
                ("vCpuInfo".to_string(), r#"{"DefaultVCpus":2}"#.to_string()),
                ("burstable".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn text_card_includes_change_and_sections() {
        let lines = summary_lines("Instance", &instance_summary(&instance(), Some(-12.5)));
        assert_eq!(lines[0], "== Instance ==");
        assert_eq!(lines[1], "Price: USD 70.08 / Month (-12.50%)");
        assert!(lines.contains(&"  memory: 8 GiB".to_string()));
    }
}
