//! Wire models for the pricing API
//!
//! Field names follow the backend's JSON (camelCase for product objects,
//! snake_case for the category list). Unknown fields are ignored so newer
//! backends keep working.

use crate::logic::options::Choice;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered key/value group (hardware specs, product meta, ...)
pub type SpecGroup = serde_json::Map<String, Value>;

/// `instance/regions` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    /// Friendly name; the backend returns null for regions it has no name for
    #[serde(default)]
    pub name: Option<String>,
}

/// `instance/operations` entry (usage operation code and its platform)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub operation: String,
    pub platform: String,
}

/// `instance/categories` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// `instance/family` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceFamily {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, alias = "description")]
    pub note: String,
}

/// `instance/sizes` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSize {
    #[serde(rename = "instanceType")]
    pub instance_type: String,
}

impl InstanceSize {
    pub fn new(instance_type: impl Into<String>) -> Self {
        Self {
            instance_type: instance_type.into(),
        }
    }
}

/// `instance/voltypes` entry (plain string on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeType(pub String);

/// Price amount with its currency code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePerUnit {
    pub currency: String,
    pub value: f64,
}

/// Normalized list price (monthly for both instances and volumes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPrice {
    #[serde(rename = "pricePerUnit")]
    pub price_per_unit: PricePerUnit,
    #[serde(default)]
    pub unit: String,
    #[serde(rename = "effectiveDate", default)]
    pub effective_date: String,
}

/// Priced instance or volume product.
///
/// Instances fill the hardware/software/storage/feature groups, volumes fill
/// `product_specs`. A missing `list_price` means the backend found no price
/// for the key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PricedProduct {
    #[serde(rename = "listPrice", default)]
    pub list_price: Option<ListPrice>,
    #[serde(rename = "productMeta", default)]
    pub product_meta: SpecGroup,
    #[serde(rename = "hardwareSpecs", default)]
    pub hardware_specs: SpecGroup,
    #[serde(rename = "softwareSpecs", default)]
    pub software_specs: SpecGroup,
    // Older backends misspell this key
    #[serde(rename = "instanceStorage", alias = "instanceSotrage", default)]
    pub instance_storage: SpecGroup,
    #[serde(rename = "productFeature", default)]
    pub product_feature: SpecGroup,
    #[serde(rename = "productSpecs", default)]
    pub product_specs: SpecGroup,
}

impl PricedProduct {
    /// Numeric price amount, if the product is priced
    pub fn price_value(&self) -> Option<f64> {
        self.list_price.as_ref().map(|p| p.price_per_unit.value)
    }

    /// A product-meta field rendered as text
    pub fn meta(&self, key: &str) -> Option<String> {
        self.product_meta.get(key).and_then(display_value)
    }

    /// A hardware-spec field rendered as text
    pub fn hardware(&self, key: &str) -> Option<String> {
        self.hardware_specs.get(key).and_then(display_value)
    }
}

/// Render a JSON scalar for a table cell; null and empty strings yield `None`.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Key/value rows for a spec group, in response order, skipping empty values.
pub fn spec_rows(group: &SpecGroup) -> Vec<(String, String)> {
    group
        .iter()
        .filter_map(|(k, v)| display_value(v).map(|v| (k.clone(), v)))
        .collect()
}

impl Choice for Region {
    fn value(&self) -> &str {
        &self.code
    }

    fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} {}", self.code, name),
            None => self.code.clone(),
        }
    }
}

impl Choice for Operation {
    fn value(&self) -> &str {
        &self.operation
    }

    fn label(&self) -> String {
        self.platform.clone()
    }
}

impl Choice for Category {
    fn value(&self) -> &str {
        &self.category
    }

    fn label(&self) -> String {
        format!("{}  -  {}", self.display_name, self.description)
    }
}

impl Choice for InstanceFamily {
    fn value(&self) -> &str {
        &self.name
    }

    fn label(&self) -> String {
        format!("{}  :  {}", self.name, self.note)
    }
}

impl Choice for InstanceSize {
    fn value(&self) -> &str {
        &self.instance_type
    }

    fn label(&self) -> String {
        self.instance_type.clone()
    }
}

impl Choice for VolumeType {
    fn value(&self) -> &str {
        &self.0
    }

    fn label(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTANCE_JSON: &str = r#"{
        "productMeta": {"instanceFamily": "General purpose", "tenancy": "Shared",
                        "location": "US East (N. Virginia)",
                        "introduceUrl": "https://aws.amazon.com/ec2/instance-types/m5"},
        "hardwareSpecs": {"physicalProcessor": "Intel Xeon Platinum 8175", "clockSpeed": "3.1 GHz",
                          "vcpu": "2", "memory": "8 GiB", "networkPerformance": "Up to 10 Gigabit",
                          "gpu": null},
        "softwareSpecs": {"operatingSystem": "Linux"},
        "instanceSotrage": {"volumeType": "Instance Store", "description": "EBS only"},
        "productFeature": {"intelTurboAvailable": "Yes"},
        "listPrice": {"unit": "Month", "pricePerUnit": {"currency": "USD", "value": 70.08},
                      "effectiveDate": "2024-06-01T00:00:00Z", "rateCode": "ignored"}
    }"#;

    #[test]
    fn decodes_instance_product_with_legacy_storage_key() {
        let product: PricedProduct = serde_json::from_str(INSTANCE_JSON).unwrap();
        assert_eq!(product.price_value(), Some(70.08));
        assert_eq!(product.instance_storage.len(), 2);
        assert_eq!(product.meta("tenancy").as_deref(), Some("Shared"));
    }

    #[test]
    fn spec_rows_keep_order_and_skip_nulls() {
        let product: PricedProduct = serde_json::from_str(INSTANCE_JSON).unwrap();
        let rows = spec_rows(&product.hardware_specs);
        let keys: Vec<&str> = rows.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            ["physicalProcessor", "clockSpeed", "vcpu", "memory", "networkPerformance"]
        );
    }

    #[test]
    fn product_without_list_price_is_unpriced() {
        let product: PricedProduct = serde_json::from_str(r#"{"productMeta": {}}"#).unwrap();
        assert!(product.list_price.is_none());
        assert_eq!(product.price_value(), None);
    }

    #[test]
    fn family_accepts_note_or_description() {
        let a: InstanceFamily =
            serde_json::from_str(r#"{"name": "m5", "category": "general", "note": "Intel"}"#)
                .unwrap();
        let b: InstanceFamily = serde_json::from_str(
            r#"{"name": "m5", "category": "general", "description": "Intel", "architecture": "x86_64"}"#,
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.label(), "m5  :  Intel");
    }

    #[test]
    fn region_label_tolerates_missing_name() {
        let region: Region = serde_json::from_str(r#"{"code": "cn-north-1", "name": null}"#).unwrap();
        assert_eq!(region.label(), "cn-north-1");
    }

    #[test]
    fn volume_types_are_plain_strings() {
        let types: Vec<VolumeType> = serde_json::from_str(r#"["gp3", "io2"]"#).unwrap();
        assert_eq!(types[1].value(), "io2");
    }
}
