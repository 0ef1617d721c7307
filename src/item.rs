use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Inventory Item
// ============================================================================

/// A tradeable item as reported by the inventory service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    /// Icon path relative to the image host
    pub icon_url: String,
    /// Market price in dollars
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
}

impl InventoryItem {
    pub fn new(name: &str, icon_url: &str, price: f64) -> Self {
        Self {
            name: name.to_string(),
            icon_url: icon_url.to_string(),
            price,
        }
    }

    /// Full image URL for this item's icon
    pub fn image_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.icon_url)
    }

    /// Items priced under the threshold can't be wagered
    pub fn is_eligible(&self, item_threshold: f64) -> bool {
        self.price >= item_threshold
    }
}

// ============================================================================
// Price Parsing
// ============================================================================

/// Prices arrive either as numbers or as decimal strings ("10.00")
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => n,
        RawPrice::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid price {:?}: {}", s, e)))?,
    };

    if !price.is_finite() || price < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(price)
}
