//! Feature Extractor (§4.7): a regex battery over specs, price, and
//! category, with context-inference and optional NER fallbacks for
//! category resolution. Grounded on `feature_extractor.py`.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use qprep_core::{CategoryMethod, FeatureBag};
use regex::Regex;

/// Optional secondary category source (spaCy NER in the source has no
/// drop-in Rust equivalent; absence degrades resolution from `context`
/// straight to `none`, per the degradable-I/O policy).
pub trait EntityExtractor: Send + Sync {
    /// Named entities found in `text`, returned as raw surface strings.
    fn extract_entities(&self, text: &str) -> Vec<String>;
    /// Best category guess from noun chunks / PRODUCT entities.
    fn extract_category(&self, text: &str) -> Option<String>;
}

static STORAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*(gb|tb)\s+(?:storage|rom|internal)|\((\d+)\s+(gb|tb)\)|,\s*(\d+)\s+(gb|tb)\)").unwrap()
});
static RAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(gb|mb)\s+ram\b").unwrap());
static SCREEN_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:screen|display)\s*(?:size|:)?\s*(\d+(?:\.\d+)?)\s*(?:inch|")|(\d+(?:\.\d+)?)\s*(?:inch|")\s*(?:screen|display)"#).unwrap()
});
static RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d+)\s*(?:pixels?|resolution|display)").unwrap());
static CAMERA_MP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*mp\s*(?:camera)?|(?:camera\s*)?(\d+)\s*megapixel").unwrap());
static BATTERY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d{3,})\s*mah|(\d{3,})\s*wh").unwrap());
static PROCESSOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(snapdragon|mediatek|helio|exynos|dimensity|intel|amd|apple|bionic|m\d+)\s*(\w+)?").unwrap()
});
static PRICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        (?:rs\.?|₹|rupees?|inr|taka|tk)\s*(\d+(?:,\d+)*(?:\.\d+)?) |
        (\d+(?:,\d+)*(?:\.\d+)?)\s*(?:rs\.?|₹|rupees?|inr|taka|tk) |
        (?:above|below|under|around|price|cost|dam|damer)\s+(\d+) |
        (\d+)\s+(?:ke\s+)?(?:upar|niche|under|above) |
        (\d+)\s+(?:ar\s+)?(?:modhe|majhe) |
        (\d+)\s+(?:taka|tk)\s+(?:damer|dam) |
        (?:wireless|wired|gaming|bluetooth|smart|digital|portable|electric|manual|automatic|rechargeable)?\s*
        (?:laptops?|computers?|pcs?|notebooks?|macbooks?|phones?|mobiles?|smartphones?|iphones?|
        headphones?|earphones?|earbuds|airpods|headsets?|chargers?|powerbanks?|tablets?|
        watch(?:es)?|smartwatch(?:es)?|cameras?|speakers?|mice|mouse|keyboards?|routers?|pendrives?|
        refrigerators?|fridges?|washing\s+machines?|microwaves?|tvs?|televisions?|monitors?)\s+(\d{3,7})\b
        ",
    )
    .unwrap()
});
static PRICE_MIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:above|upar|more than|beshi)\s+(\d+)").unwrap());
static PRICE_MAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:below|niche|under|less than|modhe|ar\s+modhe|majhe|ar\s+majhe|kom)\s+(\d+)|(\d+)\s+(?:taka|tk)\s+(?:damer|dam)").unwrap()
});
static CATEGORY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)\b(
        laptop|computer|pc|notebook|macbook|
        phone|mobile|smartphone|iphone|
        headphone|earphone|earbuds|airpods|headset|
        charger|powerbank|adapter|cable|
        tablet|ipad|kindle|
        watch|smartwatch|fitband|tracker|
        camera|dslr|webcam|gopro|
        speaker|soundbar|bluetooth|jbl|
        tv|television|monitor|screen|display|
        keyboard|mouse|mousepad|
        router|modem|wifi|
        pendrive|usb|harddisk|ssd|
        refrigerator|fridge|freezer|
        washing\s+machine|washer|dryer|
        microwave|oven|toaster|mixer|grinder|juicer|
        iron|press|
        fan|cooler|heater|geyser|
        vacuum|cleaner|
        chimney|stove|induction|
        purifier|humidifier|dehumidifier|
        tshirt|shirt|top|blouse|kurti|kurta|
        jeans|pants|trousers|shorts|
        dress|gown|saree|lehenga|
        jacket|coat|hoodie|sweater|cardigan|
        shoes|sneakers|sandals|slippers|heels|boots|
        bag|handbag|backpack|purse|wallet|
        belt|tie|scarf|cap|hat|
        bracelet|bangle|
        necklace|chain|pendant|earring|ring|
        sunglasses|glasses|goggles|
        cycle|bicycle|bike|
        treadmill|dumbbell|yoga\s+mat|
        cricket\s+bat|football|basketball|
        book|novel|diary|pen|pencil|
        perfume|fragrance|deodorant|
        shampoo|conditioner|soap|facewash|cream|lotion|
        trimmer|shaver|razor|hairdryer|straightener|
        chair|table|desk|bed|sofa|couch|mattress|pillow|
        wardrobe|cupboard|shelf|rack|
        plate|bowl|glass|mug|cup|spoon|fork|knife|
        cookware|pan|kadhai|cooker|
        toy|doll|puzzle|
        diaper|feeder|stroller|crib|
        bottle|flask|tiffin|lunchbox|
        umbrella|raincoat|
        suitcase|luggage|trolley
        )\b",
    )
    .unwrap()
});
static SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(xs|s|m|l|xl|xxl|xxxl|\d+xl|size\s*\d+|\d+\s*inch|free size|one size)\b").unwrap()
});
static MATERIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(cotton|polyester|silk|wool|leather|denim|linen|rayon|nylon|spandex|wood|metal|plastic|glass|iron|ceramic|marble|granite)\b").unwrap()
});
static SLEEVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(full sleeve|half sleeve|sleeveless|short sleeve|long sleeve)\b").unwrap());
static DIMENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)\s*(?:x\s*(\d+(?:\.\d+)?))?\s*(cm|inch|ft|meter)?").unwrap()
});
static CAPACITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(liter|litre|kg|ton|watt|w)\b").unwrap());
static LUGGAGE_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:cabin|check-?in)?\s*(?:size)?\s*\(?\s*(\d+)\s*cm\s*\)?|(\d+)\s*cm\s*(?:cabin|suitcase|trolley|bag)?").unwrap()
});
static LUGGAGE_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(cabin|check-?in|trolley|carry-?on|backpack|duffle|briefcase)\b").unwrap());
static WHEELS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*wheels?").unwrap());
static COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(black|white|blue|red|green|gold|silver|gray|grey|pink|purple|yellow|orange)\b").unwrap());
static BRAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(samsung|apple|xiaomi|redmi|realme|oneplus|oppo|vivo|motorola|nokia|asus|lenovo|hp|dell|acer|lg|sony|boat|jbl|bose)\b").unwrap()
});

const PHONE_BRANDS: &[&str] = &[
    "realme", "xiaomi", "redmi", "samsung", "oppo", "vivo", "oneplus", "iphone", "apple", "nokia",
    "motorola", "poco", "iqoo", "nothing",
];
const PHONE_INDICATORS: &[&str] = &["5g", "4g", "dual sim", "selfie", "front camera", "rear camera"];
const LAPTOP_BRANDS: &[&str] = &["dell", "hp", "lenovo", "asus", "acer", "msi", "macbook", "thinkpad"];
const LAPTOP_INDICATORS: &[&str] =
    &["intel", "amd", "ryzen", "i3", "i5", "i7", "i9", "ssd", "windows", "linux"];
static PHONE_MODEL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bp\d+\b").unwrap());

fn category_type_for(category: &str) -> Option<&'static str> {
    match category {
        "laptop" | "phone" | "mobile" | "tablet" | "headphone" | "earphone" | "watch"
        | "smartwatch" | "camera" | "tv" | "monitor" | "speaker" => Some("electronics"),
        "suitcase" | "bag" | "backpack" | "trolley" | "duffle" | "briefcase" | "luggage" => {
            Some("luggage")
        }
        "tshirt" | "shirt" | "jeans" | "dress" | "saree" | "shoes" | "jacket" | "sweater" => {
            Some("clothing")
        }
        "chair" | "table" | "sofa" | "bed" | "desk" | "wardrobe" => Some("furniture"),
        "refrigerator" | "washing machine" | "microwave" | "fan" | "ac" => Some("appliances"),
        _ => None,
    }
}

/// Removes feature keys not relevant to the resolved category's type,
/// matching §3's "dropped by a category-feature allow-list".
fn filter_by_category(mut bag: FeatureBag) -> FeatureBag {
    let Some(category) = bag.category.clone() else { return bag };
    let Some(category_type) = category_type_for(&category) else { return bag };

    match category_type {
        "electronics" => {
            bag.size = None;
            bag.material = None;
            bag.sleeve = None;
            bag.dimension = None;
            bag.capacity = None;
            bag.luggage_size = None;
            bag.luggage_type = None;
            bag.wheels = None;
        }
        "luggage" => {
            bag.ram = None;
            bag.storage = None;
            bag.screen_size = None;
            bag.resolution = None;
            bag.camera_mp.clear();
            bag.battery = None;
            bag.processor = None;
            bag.size = None;
            bag.sleeve = None;
            bag.dimension = None;
            bag.capacity = None;
        }
        "clothing" => {
            bag.ram = None;
            bag.storage = None;
            bag.screen_size = None;
            bag.resolution = None;
            bag.camera_mp.clear();
            bag.battery = None;
            bag.processor = None;
            bag.dimension = None;
            bag.capacity = None;
            bag.luggage_size = None;
            bag.luggage_type = None;
            bag.wheels = None;
        }
        "furniture" => {
            bag.ram = None;
            bag.storage = None;
            bag.screen_size = None;
            bag.resolution = None;
            bag.camera_mp.clear();
            bag.battery = None;
            bag.processor = None;
            bag.size = None;
            bag.sleeve = None;
            bag.luggage_size = None;
            bag.luggage_type = None;
            bag.wheels = None;
        }
        "appliances" => {
            bag.ram = None;
            bag.storage = None;
            bag.screen_size = None;
            bag.resolution = None;
            bag.camera_mp.clear();
            bag.battery = None;
            bag.processor = None;
            bag.size = None;
            bag.sleeve = None;
            bag.luggage_size = None;
            bag.luggage_type = None;
            bag.wheels = None;
        }
        _ => {}
    }
    bag
}

/// Regex-driven structured feature extraction with optional NER
/// enrichment for category resolution.
pub struct FeatureExtractor {
    entity_extractor: Option<Arc<dyn EntityExtractor>>,
}

const NER_IGNORE_WORDS: &[&str] = &[
    "product", "item", "thing", "stuff", "something", "anything", "price", "rupee", "rs", "inr",
    "under", "above", "below", "quality", "best", "good", "cheap", "expensive", "new", "old",
];

impl FeatureExtractor {
    pub fn new() -> Self {
        Self { entity_extractor: None }
    }

    pub fn with_entity_extractor(mut self, extractor: Arc<dyn EntityExtractor>) -> Self {
        self.entity_extractor = Some(extractor);
        self
    }

    pub fn extract(&self, text: &str) -> FeatureBag {
        let mut bag = FeatureBag {
            storage: first_match2(&STORAGE, text, storage_fmt),
            ram: first_match2(&RAM, text, |c| format!("{}{}", &c[1], c[2].to_uppercase())),
            screen_size: first_match2(&SCREEN_SIZE, text, screen_size_fmt),
            resolution: first_match2(&RESOLUTION, text, |c| format!("{}x{}", &c[1], &c[2])),
            camera_mp: CAMERA_MP
                .captures_iter(text)
                .filter_map(|c| c.get(1).or_else(|| c.get(2)))
                .filter_map(|m| m.as_str().parse::<u32>().ok())
                .collect(),
            battery: first_match2(&BATTERY, text, |c| {
                format!("{}mAh", c.get(1).or_else(|| c.get(2)).unwrap().as_str())
            }),
            processor: first_match2(&PROCESSOR, text, |c| {
                let mut parts = vec![c[1].to_string()];
                if let Some(m) = c.get(2) {
                    parts.push(m.as_str().to_string());
                }
                parts.join(" ")
            }),
            price: extract_price(text),
            price_min: PRICE_MIN.captures(text).and_then(|c| c.get(1)).and_then(parse_num),
            price_max: PRICE_MAX
                .captures(text)
                .and_then(|c| c.get(1).or_else(|| c.get(2)))
                .and_then(parse_num),
            size: first_match2(&SIZE, text, |c| c[0].to_string()),
            material: first_match2(&MATERIAL, text, |c| c[0].to_string()),
            sleeve: first_match2(&SLEEVE, text, |c| c[0].to_string()),
            dimension: first_match2(&DIMENSION, text, dimension_fmt),
            capacity: first_match2(&CAPACITY, text, |c| format!("{} {}", &c[1], &c[2])),
            luggage_size: first_match2(&LUGGAGE_SIZE, text, |c| {
                format!("{} cm", c.get(1).or_else(|| c.get(2)).unwrap().as_str())
            }),
            luggage_type: first_match2(&LUGGAGE_TYPE, text, |c| c[0].to_string()),
            wheels: first_match2(&WHEELS, text, |c| c[1].to_string()),
            colors: dedup_lower(COLOR.captures_iter(text).map(|c| c[0].to_string())),
            brands: dedup_lower(BRAND.captures_iter(text).map(|c| c[0].to_string())),
            category: CATEGORY.find(text).map(|m| m.as_str().to_lowercase()),
            ..Default::default()
        };

        let entities = self
            .entity_extractor
            .as_ref()
            .map(|extractor| extractor.extract_entities(text))
            .unwrap_or_default();
        bag.entities = entities;

        if bag.category.is_some() {
            bag.category_confidence = Some(0.95);
            bag.category_method = Some(CategoryMethod::Regex);
        } else if let Some(inferred) = infer_category_from_context(text, &bag) {
            bag.category = Some(inferred);
            bag.category_confidence = Some(0.85);
            bag.category_method = Some(CategoryMethod::Context);
        } else if let Some(extractor) = &self.entity_extractor {
            match extractor.extract_category(text) {
                Some(category) if !NER_IGNORE_WORDS.contains(&category.as_str()) => {
                    bag.category = Some(category);
                    bag.category_confidence = Some(0.75);
                    bag.category_method = Some(CategoryMethod::Ner);
                }
                _ => {
                    bag.category_confidence = Some(0.0);
                    bag.category_method = Some(CategoryMethod::None);
                }
            }
        } else {
            bag.category_confidence = Some(0.0);
            bag.category_method = Some(CategoryMethod::None);
        }

        filter_by_category(bag)
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn infer_category_from_context(text: &str, bag: &FeatureBag) -> Option<String> {
    let lower = text.to_lowercase();
    let has_ram = bag.ram.is_some();
    let has_storage = bag.storage.is_some();

    let has_phone_brand = PHONE_BRANDS.iter().any(|b| lower.contains(b));
    let has_phone_indicator = PHONE_INDICATORS.iter().any(|i| lower.contains(i));
    if has_phone_brand && (has_phone_indicator || (has_ram && has_storage)) {
        return Some("phone".to_string());
    }

    let has_laptop_brand = LAPTOP_BRANDS.iter().any(|b| lower.contains(b));
    let has_laptop_indicator = LAPTOP_INDICATORS.iter().any(|i| lower.contains(i));
    if has_laptop_brand && (has_laptop_indicator || (has_ram && has_storage)) {
        return Some("laptop".to_string());
    }

    if PHONE_MODEL_PATTERN.is_match(&lower) && (has_ram || has_storage) {
        return Some("phone".to_string());
    }

    None
}

fn extract_price(text: &str) -> Option<f64> {
    let captures = PRICE.captures(text)?;
    (1..=7).find_map(|i| captures.get(i)).and_then(parse_num)
}

fn parse_num(m: regex::Match) -> Option<f64> {
    m.as_str().replace(',', "").parse().ok()
}

fn storage_fmt(c: &regex::Captures) -> String {
    for (size_idx, unit_idx) in [(1, 2), (3, 4), (5, 6)] {
        if let Some(size) = c.get(size_idx) {
            let unit = c.get(unit_idx).map(|m| m.as_str().to_uppercase()).unwrap_or_else(|| "GB".to_string());
            return format!("{}{}", size.as_str(), unit);
        }
    }
    String::new()
}

fn screen_size_fmt(c: &regex::Captures) -> String {
    let size = c.get(1).or_else(|| c.get(2)).unwrap();
    format!("{}\"", size.as_str())
}

fn dimension_fmt(c: &regex::Captures) -> String {
    let dims: Vec<&str> = [c.get(1), c.get(2), c.get(3)].into_iter().flatten().map(|m| m.as_str()).collect();
    let unit = c.get(4).map(|m| m.as_str()).unwrap_or("");
    format!("{}{}", dims.join("x"), unit)
}

fn first_match2(
    pattern: &Regex,
    text: &str,
    format: impl Fn(&regex::Captures) -> String,
) -> Option<String> {
    pattern.captures(text).map(|c| format(&c)).filter(|s| !s.is_empty())
}

fn dedup_lower(items: impl Iterator<Item = String>) -> Vec<String> {
    let set: HashSet<String> = items.map(|s| s.to_lowercase()).collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_phone_specs() {
        let extractor = FeatureExtractor::new();
        let bag = extractor.extract("samsung galaxy 8gb ram 128 gb storage price 25000");
        assert_eq!(bag.ram.as_deref(), Some("8GB"));
        assert_eq!(bag.storage.as_deref(), Some("128GB"));
        assert_eq!(bag.price, Some(25000.0));
        assert!(bag.brands.contains(&"samsung".to_string()));
    }

    #[test]
    fn regex_category_wins_over_context() {
        let extractor = FeatureExtractor::new();
        let bag = extractor.extract("realme phone 5g 8gb ram 128gb storage");
        assert_eq!(bag.category.as_deref(), Some("phone"));
        assert_eq!(bag.category_method, Some(CategoryMethod::Regex));
        assert_eq!(bag.category_confidence, Some(0.95));
    }

    #[test]
    fn context_infers_phone_without_explicit_keyword() {
        let extractor = FeatureExtractor::new();
        let bag = extractor.extract("realme 5g 8gb ram 128gb storage");
        assert_eq!(bag.category.as_deref(), Some("phone"));
        assert_eq!(bag.category_method, Some(CategoryMethod::Context));
    }

    #[test]
    fn no_category_without_any_signal() {
        let extractor = FeatureExtractor::new();
        let bag = extractor.extract("something nice for a gift");
        assert_eq!(bag.category, None);
        assert_eq!(bag.category_method, Some(CategoryMethod::None));
        assert_eq!(bag.category_confidence, Some(0.0));
    }

    #[test]
    fn romanized_price_phrases_extract() {
        let extractor = FeatureExtractor::new();
        let bag = extractor.extract("phone 15000 ke upar chahiye");
        assert_eq!(bag.price, Some(15000.0));
    }

    #[test]
    fn luggage_category_drops_electronics_fields() {
        let extractor = FeatureExtractor::new();
        let bag = extractor.extract("suitcase 55 cm trolley 4 wheels price 3000");
        assert_eq!(bag.category.as_deref(), Some("suitcase"));
        assert!(bag.ram.is_none());
        assert!(bag.storage.is_none());
        assert_eq!(bag.wheels.as_deref(), Some("4"));
    }
}
