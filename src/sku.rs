use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = '-';

/// Prefix, category, manufacturer, product line and unique identifier.
const MIN_TOKENS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkuError {
    #[error("malformed SKU '{sku}': expected at least {} dash-separated parts, found {found}", MIN_TOKENS)]
    Malformed { sku: String, found: usize },
}

/// Structured product code, e.g. `WMT-GROC-NESTLE-CHOC-WEIGHT-100G-67890`.
///
/// Attributes keep the order they were parsed in, so a parsed SKU renders
/// back to the exact string it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sku {
    pub prefix: String,
    pub product_category: String,
    pub manufacturer: String,
    pub product_line: String,
    pub attributes: IndexMap<String, String>,
    pub unique_identifier: String,
}

impl Sku {
    /// Parse a dash-delimited SKU.
    ///
    /// Tokens between the product line and the identifier are read as
    /// key/value pairs. A key with no value before the identifier is dropped.
    pub fn parse(s: &str) -> Result<Self, SkuError> {
        let tokens: Vec<&str> = s.split(SEPARATOR).collect();
        if tokens.len() < MIN_TOKENS {
            return Err(SkuError::Malformed {
                sku: s.to_string(),
                found: tokens.len(),
            });
        }

        let last = tokens.len() - 1;
        let attributes = tokens[4..last]
            .chunks_exact(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect();

        Ok(Sku {
            prefix: tokens[0].to_string(),
            product_category: tokens[1].to_string(),
            manufacturer: tokens[2].to_string(),
            product_line: tokens[3].to_string(),
            attributes,
            unique_identifier: tokens[last].to_string(),
        })
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.prefix, self.product_category, self.manufacturer, self.product_line
        )?;
        for (key, value) in &self.attributes {
            write!(f, "-{}-{}", key, value)?;
        }
        write!(f, "-{}", self.unique_identifier)
    }
}

impl FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sku::parse(s)
    }
}

// On the wire a SKU is its canonical string.
impl Serialize for Sku {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Sku {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Sku::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sku_with_attribute() {
        let sku = Sku::parse("WMT-GROC-NESTLE-CHOC-WEIGHT-100G-67890").unwrap();
        assert_eq!(sku.prefix, "WMT");
        assert_eq!(sku.product_category, "GROC");
        assert_eq!(sku.manufacturer, "NESTLE");
        assert_eq!(sku.product_line, "CHOC");
        assert_eq!(sku.attributes.len(), 1);
        assert_eq!(sku.attributes.get("WEIGHT").map(String::as_str), Some("100G"));
        assert_eq!(sku.unique_identifier, "67890");
    }

    #[test]
    fn test_parse_sku_without_attributes() {
        let sku = Sku::parse("TGT-GROC-ACME-SOUP-00001").unwrap();
        assert!(sku.attributes.is_empty());
        assert_eq!(sku.product_line, "SOUP");
        assert_eq!(sku.unique_identifier, "00001");
    }

    #[test]
    fn test_parse_sku_multiple_attributes_keep_order() {
        let sku = Sku::parse("TGT-BVRG-KLARBRUNN-WATER-SIZE-12PK-FLVR-LIME-00005").unwrap();
        let keys: Vec<&str> = sku.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["SIZE", "FLVR"]);
        assert_eq!(sku.attributes["FLVR"], "LIME");
    }

    #[test]
    fn test_parse_sku_drops_unpaired_attribute_token() {
        let sku = Sku::parse("TGT-FOOD-EMILS-PIZZA-TYPE-CHEESE-EXTRA-00002").unwrap();
        assert_eq!(sku.attributes.len(), 1);
        assert_eq!(sku.attributes["TYPE"], "CHEESE");
        assert!(!sku.attributes.contains_key("EXTRA"));
        assert_eq!(sku.unique_identifier, "00002");
    }

    #[test]
    fn test_parse_malformed_sku() {
        let err = Sku::parse("TGT-GROC").unwrap_err();
        assert_eq!(
            err,
            SkuError::Malformed {
                sku: "TGT-GROC".to_string(),
                found: 2,
            }
        );
    }

    #[test]
    fn test_parse_four_tokens_is_malformed() {
        assert!(Sku::parse("TGT-GROC-ACME-SOUP").is_err());
    }

    #[test]
    fn test_display_reproduces_parsed_string() {
        let input = "WMT-GROC-NESTLE-CHOC-WEIGHT-100G-67890";
        let sku: Sku = input.parse().unwrap();
        assert_eq!(sku.to_string(), input);
    }

    #[test]
    fn test_display_built_sku() {
        let mut attributes = IndexMap::new();
        attributes.insert("SIZE".to_string(), "LRG".to_string());
        let sku = Sku {
            prefix: "TST".to_string(),
            product_category: "GROC".to_string(),
            manufacturer: "TESTBRAND".to_string(),
            product_line: "PROD".to_string(),
            attributes,
            unique_identifier: "12345".to_string(),
        };
        assert_eq!(sku.to_string(), "TST-GROC-TESTBRAND-PROD-SIZE-LRG-12345");
    }

    #[test]
    fn test_deserialize_from_json_string() {
        let sku: Sku = serde_json::from_str("\"TGT-BVRG-MTNDEW-SODA-SIZE-12PK-00001\"").unwrap();
        assert_eq!(sku.manufacturer, "MTNDEW");
        assert_eq!(
            serde_json::to_string(&sku).unwrap(),
            "\"TGT-BVRG-MTNDEW-SODA-SIZE-12PK-00001\""
        );
    }

    #[test]
    fn test_deserialize_malformed_reports_sku_error() {
        let err = serde_json::from_str::<Sku>("\"TGT-GROC\"").unwrap_err();
        assert!(err.to_string().contains("malformed SKU 'TGT-GROC'"));
    }
}
