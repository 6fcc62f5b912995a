use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PRODUCT_IMAGE_PLACEHOLDER: &str = "/api/placeholder/300/300";

/// Product lines sold by the store. The serialized form is the label used in
/// the catalog table and in persisted carts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Gelas Bambu", alias = "Bamboo Glass")]
    BambooGlass,
    #[serde(rename = "Gelas Ampas Tebu", alias = "Sugarcane-Pulp Glass")]
    SugarcanePulpGlass,
    #[serde(rename = "Mix Eco Series", alias = "Mixed Eco Series")]
    MixedEcoSeries,
    #[serde(rename = "Limited Edition")]
    LimitedEdition,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::BambooGlass => "Gelas Bambu",
            Category::SugarcanePulpGlass => "Gelas Ampas Tebu",
            Category::MixedEcoSeries => "Mix Eco Series",
            Category::LimitedEdition => "Limited Edition",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Gelas Bambu" | "Bamboo Glass" => Ok(Category::BambooGlass),
            "Gelas Ampas Tebu" | "Sugarcane-Pulp Glass" => Ok(Category::SugarcanePulpGlass),
            "Mix Eco Series" | "Mixed Eco Series" => Ok(Category::MixedEcoSeries),
            "Limited Edition" => Ok(Category::LimitedEdition),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A catalog entry. Prices are whole IDR.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_new: bool,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: u64,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: PRODUCT_IMAGE_PLACEHOLDER.to_string(),
            description: String::new(),
            category,
            is_popular: false,
            is_new: false,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }

    pub fn new_arrival(mut self) -> Self {
        self.is_new = true;
        self
    }
}

/// Raw catalog row as stored by the database, before defaults are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub is_popular: bool,
    pub is_new: bool,
}

impl TryFrom<ProductRecord> for Product {
    type Error = UnknownCategory;

    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            name: r.name,
            price: r.price,
            image: r
                .image_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| PRODUCT_IMAGE_PLACEHOLDER.to_string()),
            description: r.description.unwrap_or_default(),
            category: r.category.parse()?,
            is_popular: r.is_popular,
            is_new: r.is_new,
        })
    }
}
