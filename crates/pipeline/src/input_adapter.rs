//! Input Adapter (§4.1): classifies raw user input as free text or a
//! product URL, expands known shorteners, and resolves e-commerce URLs to
//! a scraped product via a FIFO-capped cache. Grounded on
//! `input_handler.py`.

use std::collections::VecDeque;

use dashmap::DashMap;
use parking_lot::Mutex;
use qprep_config::constants::{caches, timeouts};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::types::{InputType, ProcessedInput};

const URL_SHORTENERS: &[&str] = &[
    "bit.ly", "tinyurl.com", "goo.gl", "t.co", "ow.ly", "is.gd", "buff.ly", "adf.ly", "short.io",
    "rb.gy",
];

/// Scraped product record, as returned by the external product-scraping
/// collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedProduct {
    pub name: Option<String>,
    #[serde(default)]
    pub specs: std::collections::BTreeMap<String, String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub rating: Option<f64>,
}

impl ScrapedProduct {
    /// Flattens the product record into a space-joined string for the
    /// downstream text-processing stages (§4.1 `_product_to_text`).
    fn to_query_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        for (key, value) in &self.specs {
            if !value.is_empty() {
                parts.push(format!("{key} {value}"));
            }
        }
        if let Some(price) = self.price {
            parts.push(format!("price {price}"));
        }
        if let Some(category) = &self.category {
            parts.push(category.clone());
        }
        if let Some(brand) = &self.brand {
            let already_in_name = self
                .name
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(&brand.to_lowercase()));
            if !already_in_name {
                parts.push(brand.clone());
            }
        }
        if let Some(rating) = self.rating {
            parts.push(format!("rating {rating}"));
        }
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlatformInfo {
    platform: Option<&'static str>,
}

/// FIFO-evicted cache of scraped products keyed by `platform:product_id`,
/// mirroring the donor's class-level dict + insertion-order eviction.
struct ProductCache {
    entries: DashMap<String, ScrapedProduct>,
    order: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl ProductCache {
    fn new(capacity: usize) -> Self {
        Self { entries: DashMap::new(), order: Mutex::new(VecDeque::new()), capacity }
    }

    fn get(&self, key: &str) -> Option<ScrapedProduct> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    fn insert(&self, key: String, product: ScrapedProduct) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, product);
            return;
        }
        let mut order = self.order.lock();
        if order.len() >= self.capacity {
            if let Some(oldest) = order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        order.push_back(key.clone());
        self.entries.insert(key, product);
    }
}

/// Classifies raw input, expands shortened URLs, and resolves known
/// e-commerce platforms to a scraped product. Never raises: every network
/// failure degrades to the best available text.
pub struct InputAdapter {
    http: Client,
    scrape_base_url: Option<String>,
    product_cache: ProductCache,
    asin_pattern: Regex,
    flipkart_pid_pattern: Regex,
    myntra_pid_pattern: Regex,
}

impl InputAdapter {
    pub fn new(scrape_base_url: Option<String>) -> Self {
        let http = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(std::time::Duration::from_millis(timeouts::URL_EXPANSION_MS))
            .build()
            .expect("reqwest client builder should not fail on static config");
        Self {
            http,
            scrape_base_url,
            product_cache: ProductCache::new(caches::PRODUCT_SCRAPE_FIFO),
            asin_pattern: Regex::new(r"/dp/([A-Z0-9]{10})").unwrap(),
            flipkart_pid_pattern: Regex::new(r"pid=([A-Z0-9]+)").unwrap(),
            myntra_pid_pattern: Regex::new(r"/(\d+)/buy").unwrap(),
        }
    }

    pub async fn process(&self, raw: &str) -> ProcessedInput {
        let raw = raw.trim();

        if !looks_like_url_fast(raw) {
            return ProcessedInput::text(raw);
        }

        if !is_url(raw) {
            return ProcessedInput::text(raw);
        }

        let (platform, product_id) = self.extract_platform_info(raw);
        if let (Some(platform), Some(product_id)) = (platform, &product_id) {
            let cache_key = format!("{platform}:{product_id}");
            if let Some(product) = self.product_cache.get(&cache_key) {
                return ProcessedInput {
                    input_type: InputType::Url,
                    query_text: product.to_query_text(),
                    platform: Some(platform.to_string()),
                    product_id: Some(product_id.clone()),
                    product_data: serde_json::to_value(&product).ok(),
                    expanded_url: Some(raw.to_string()),
                    cache_hit: true,
                };
            }
        }

        let expanded_url = if is_shortened_url(raw) { self.expand_url(raw).await } else { raw.to_string() };

        let (platform, product_id) = self.extract_platform_info(&expanded_url);

        let Some(platform) = platform else {
            return ProcessedInput {
                input_type: InputType::Url,
                query_text: expanded_url.clone(),
                platform: None,
                product_id,
                product_data: None,
                expanded_url: Some(expanded_url),
                cache_hit: false,
            };
        };

        let cache_key = format!("{platform}:{}", product_id.clone().unwrap_or_else(|| expanded_url.clone()));
        if let Some(product) = self.product_cache.get(&cache_key) {
            return ProcessedInput {
                input_type: InputType::Url,
                query_text: product.to_query_text(),
                platform: Some(platform.to_string()),
                product_id,
                product_data: serde_json::to_value(&product).ok(),
                expanded_url: Some(expanded_url),
                cache_hit: true,
            };
        }

        match self.scrape_product(&expanded_url).await {
            Some(product) => {
                self.product_cache.insert(cache_key, product.clone());
                ProcessedInput {
                    input_type: InputType::Url,
                    query_text: product.to_query_text(),
                    platform: Some(platform.to_string()),
                    product_id,
                    product_data: serde_json::to_value(&product).ok(),
                    expanded_url: Some(expanded_url),
                    cache_hit: false,
                }
            }
            None => {
                tracing::warn!(platform, "product scraping failed, using URL text as fallback");
                ProcessedInput {
                    input_type: InputType::Url,
                    query_text: expanded_url.clone(),
                    platform: Some(platform.to_string()),
                    product_id,
                    product_data: None,
                    expanded_url: Some(expanded_url),
                    cache_hit: false,
                }
            }
        }
    }

    fn extract_platform_info(&self, url: &str) -> (Option<&'static str>, Option<String>) {
        let domain = extract_domain(url);

        if domain.contains("amazon") {
            let product_id = self.asin_pattern.captures(url).map(|c| c[1].to_string());
            return (Some("amazon"), product_id);
        }
        if domain.contains("flipkart") {
            let product_id = self.flipkart_pid_pattern.captures(url).map(|c| c[1].to_string());
            return (Some("flipkart"), product_id);
        }
        if domain.contains("myntra") {
            let product_id = self.myntra_pid_pattern.captures(url).map(|c| c[1].to_string());
            return (Some("myntra"), product_id);
        }
        for platform in ["snapdeal", "ajio", "meesho"] {
            if domain.contains(platform) {
                return (Some(platform), None);
            }
        }
        (None, None)
    }

    async fn expand_url(&self, short_url: &str) -> String {
        let short_url_owned;
        let url = if short_url.starts_with("http") {
            short_url
        } else {
            short_url_owned = format!("https://{short_url}");
            &short_url_owned
        };

        match self.http.head(url).send().await {
            Ok(response) => response.url().to_string(),
            Err(err) => {
                tracing::warn!(%err, url, "failed to expand shortened URL");
                short_url.to_string()
            }
        }
    }

    async fn scrape_product(&self, url: &str) -> Option<ScrapedProduct> {
        let base = self.scrape_base_url.as_ref()?;
        let endpoint = format!("{base}/scrape");
        let response = self
            .http
            .post(&endpoint)
            .json(&serde_json::json!({ "url": url }))
            .timeout(std::time::Duration::from_millis(timeouts::SCRAPE_MS))
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<ScrapedProduct>().await {
                    Ok(product) if product.name.is_some() => Some(product),
                    Ok(_) => {
                        tracing::warn!("scraping returned empty or invalid data");
                        None
                    }
                    Err(err) => {
                        tracing::error!(%err, "failed to decode scraped product");
                        None
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "scrape request returned non-success status");
                None
            }
            Err(err) => {
                tracing::error!(%err, "error scraping product");
                None
            }
        }
    }
}

fn looks_like_url_fast(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("www.")
        || lower.contains(".com")
        || lower.contains(".in")
        || lower.contains(".org")
        || lower.contains(".ly")
}

fn is_url(text: &str) -> bool {
    static PATTERN: once_cell::sync::Lazy<Regex> = once_cell::sync::Lazy::new(|| {
        Regex::new(r"(?i)^https?://|^www\.|\.[a-z]{2,}/").unwrap()
    });
    PATTERN.is_match(text)
}

fn is_shortened_url(url: &str) -> bool {
    let domain = extract_domain(url);
    URL_SHORTENERS.iter().any(|shortener| domain.contains(shortener))
}

fn extract_domain(url: &str) -> String {
    let without_scheme = url.splitn(2, "://").nth(1).unwrap_or(url);
    let host = without_scheme.split(['/', '?', '#']).next().unwrap_or(without_scheme);
    host.to_lowercase().trim_start_matches("www.").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_query_takes_fast_path() {
        assert!(!looks_like_url_fast("best budget phone under 20000"));
    }

    #[test]
    fn recognizes_url_indicators() {
        assert!(looks_like_url_fast("https://www.amazon.in/dp/B08X"));
        assert!(looks_like_url_fast("bit.ly/abc123"));
        assert!(looks_like_url_fast("check flipkart.com for deals"));
    }

    #[test]
    fn extracts_amazon_asin() {
        let adapter = InputAdapter::new(None);
        let (platform, product_id) =
            adapter.extract_platform_info("https://www.amazon.in/Some-Phone/dp/B08X4RXM8K/ref=sr_1");
        assert_eq!(platform, Some("amazon"));
        assert_eq!(product_id.as_deref(), Some("B08X4RXM8K"));
    }

    #[test]
    fn extracts_flipkart_pid() {
        let adapter = InputAdapter::new(None);
        let (platform, product_id) =
            adapter.extract_platform_info("https://www.flipkart.com/product/p/itm?pid=MOBGHX8K7VXXZ8SV");
        assert_eq!(platform, Some("flipkart"));
        assert_eq!(product_id.as_deref(), Some("MOBGHX8K7VXXZ8SV"));
    }

    #[test]
    fn detects_known_shortener() {
        assert!(is_shortened_url("https://bit.ly/3xAbcde"));
        assert!(!is_shortened_url("https://www.amazon.in/dp/B08X4RXM8K"));
    }

    #[test]
    fn product_to_text_joins_fields() {
        let mut specs = std::collections::BTreeMap::new();
        specs.insert("RAM".to_string(), "8GB".to_string());
        let product = ScrapedProduct {
            name: Some("Galaxy M14".to_string()),
            specs,
            price: Some(12999.0),
            category: Some("mobile".to_string()),
            brand: Some("Samsung".to_string()),
            rating: Some(4.2),
        };
        let text = product.to_query_text();
        assert!(text.contains("Galaxy M14"));
        assert!(text.contains("RAM 8GB"));
        assert!(text.contains("price 12999"));
        assert!(text.contains("Samsung"));
    }

    #[tokio::test]
    async fn non_url_text_short_circuits_without_network() {
        let adapter = InputAdapter::new(None);
        let result = adapter.process("wireless earbuds under 2000").await;
        assert_eq!(result.input_type, InputType::Text);
        assert_eq!(result.query_text, "wireless earbuds under 2000");
    }
}
