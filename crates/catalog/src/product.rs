use serde::{Deserialize, Serialize};

use storefront_core::Entity;

/// Opaque product identifier, compared by exact string equality.
///
/// Catalog backends emit either JSON strings or integers; both are accepted
/// and the identifier is always written back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "WireProductId")]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Numbers keep their decimal form; integral floats (`3.0`) match the integer id.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireProductId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl From<WireProductId> for ProductId {
    fn from(value: WireProductId) -> Self {
        match value {
            WireProductId::Text(s) => Self(s),
            WireProductId::Unsigned(n) => Self(n.to_string()),
            WireProductId::Signed(n) => Self(n.to_string()),
            WireProductId::Float(n) => Self(n.to_string()),
        }
    }
}

/// Immutable catalog entry.
///
/// Owned by the catalog; the cart only ever holds copies. `id` is optional
/// because the catalog is not validated: a record without one still loads,
/// it just never shares identity with another product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<ProductId>,
    #[serde(default)]
    title: String,
    /// Unit price in catalog currency units.
    #[serde(default)]
    price: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    image: String,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
        }
    }

    /// A product record that carries no identifier.
    pub fn anonymous(title: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            ..Self::new("", title, price)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn product_id(&self) -> Option<&ProductId> {
        self.id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<&ProductId> {
        self.id.as_ref()
    }
}
