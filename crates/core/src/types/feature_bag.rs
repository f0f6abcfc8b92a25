use serde::{Deserialize, Serialize};

/// How the Feature Extractor resolved `category` (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMethod {
    Regex,
    Context,
    Ner,
    None,
}

/// Structured product-search features extracted from a normalized query.
///
/// Every field is optional: extraction only populates what the query
/// actually mentions, and `_filter_features_by_category` subsequently
/// removes (not nulls) any field not on the resolved category's allow-list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureBag {
    pub storage: Option<String>,
    pub ram: Option<String>,
    pub screen_size: Option<String>,
    pub resolution: Option<String>,
    #[serde(default)]
    pub camera_mp: Vec<u32>,
    pub battery: Option<String>,
    pub processor: Option<String>,
    pub price: Option<f64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub category: Option<String>,
    pub category_confidence: Option<f32>,
    pub category_method: Option<CategoryMethod>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    pub size: Option<String>,
    pub material: Option<String>,
    pub sleeve: Option<String>,
    pub dimension: Option<String>,
    pub capacity: Option<String>,
    pub luggage_size: Option<String>,
    pub luggage_type: Option<String>,
    pub wheels: Option<String>,
    #[serde(default)]
    pub entities: Vec<String>,
}

impl FeatureBag {
    /// True when extraction resolved an exact brand+model product code via
    /// the regex path at its ceiling confidence, used by the Synonym
    /// Mapper's skip policy (§4.8) and the orchestrator's early-exit check
    /// (§4.10 step 7).
    pub fn has_exact_product_code(&self) -> bool {
        self.category_method == Some(CategoryMethod::Regex)
            && self.category_confidence.unwrap_or(0.0) >= 0.95
            && !self.brands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_product_code_requires_regex_method_and_brand() {
        let mut bag = FeatureBag {
            category_method: Some(CategoryMethod::Regex),
            category_confidence: Some(0.95),
            ..Default::default()
        };
        assert!(!bag.has_exact_product_code());
        bag.brands.push("samsung".to_string());
        assert!(bag.has_exact_product_code());
    }

    #[test]
    fn context_method_never_counts_as_exact() {
        let bag = FeatureBag {
            category_method: Some(CategoryMethod::Context),
            category_confidence: Some(0.95),
            brands: vec!["samsung".to_string()],
            ..Default::default()
        };
        assert!(!bag.has_exact_product_code());
    }
}
