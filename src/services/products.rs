use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const DEFAULT_SELECTION: usize = 6;
const MIN_MATCHES: usize = 3;
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=300";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub short_description: String,
    pub full_description: String,
    pub price: u32,
    pub image: String,
    pub rating: f64,
    pub review_count: u32,
    pub ingredients: Vec<String>,
    pub benefits: Vec<String>,
}

struct Entry {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    short: &'static str,
    full: &'static str,
    price: u32,
    rating: f64,
    reviews: u32,
    ingredients: &'static [&'static str],
    benefits: &'static [&'static str],
}

impl From<&Entry> for Product {
    fn from(e: &Entry) -> Self {
        Product {
            id: e.id.into(),
            name: e.name.into(),
            category: e.category.into(),
            short_description: e.short.into(),
            full_description: e.full.into(),
            price: e.price,
            image: PLACEHOLDER_IMAGE.into(),
            rating: e.rating,
            review_count: e.reviews,
            ingredients: e.ingredients.iter().map(|s| s.to_string()).collect(),
            benefits: e.benefits.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "ashwagandha-500mg",
        name: "Ashwagandha Root Extract",
        category: "stress-relief",
        short: "Natural stress reliever and energy booster",
        full: "Ashwagandha is an adaptogenic herb that helps the body manage stress and promotes overall wellbeing. Our extract is made from organic ashwagandha roots.",
        price: 599,
        rating: 4.7,
        reviews: 128,
        ingredients: &["Organic Ashwagandha Root Extract", "Vegetable Cellulose Capsule"],
        benefits: &[
            "Reduces stress and anxiety",
            "Improves energy levels",
            "Supports immune function",
            "Enhances focus and concentration",
        ],
    },
    Entry {
        id: "triphala-60caps",
        name: "Triphala Capsules",
        category: "detox",
        short: "Digestive support and gentle detoxification",
        full: "Triphala is a traditional Ayurvedic formula made from three fruits: Amalaki, Bibhitaki, and Haritaki. It supports digestion, detoxification, and regular elimination.",
        price: 499,
        rating: 4.5,
        reviews: 92,
        ingredients: &[
            "Organic Amalaki Fruit",
            "Organic Bibhitaki Fruit",
            "Organic Haritaki Fruit",
            "Vegetable Cellulose Capsule",
        ],
        benefits: &[
            "Supports healthy digestion",
            "Gentle detoxification",
            "Promotes regular elimination",
            "Rich in antioxidants",
        ],
    },
    Entry {
        id: "brahmi-memory",
        name: "Brahmi Memory Support",
        category: "brain-health",
        short: "Enhances memory and cognitive function",
        full: "Brahmi (Bacopa monnieri) is a powerful herb known for its cognitive-enhancing properties. It supports memory, focus, and overall brain health.",
        price: 649,
        rating: 4.6,
        reviews: 75,
        ingredients: &["Organic Brahmi Extract", "Vegetable Cellulose Capsule"],
        benefits: &[
            "Enhances memory and recall",
            "Improves focus and concentration",
            "Reduces mental fatigue",
            "Supports overall brain health",
        ],
    },
    Entry {
        id: "turmeric-curcumin",
        name: "Turmeric Curcumin Complex",
        category: "inflammation",
        short: "Anti-inflammatory and antioxidant support",
        full: "Our Turmeric Curcumin Complex combines high-potency turmeric extract with black pepper for enhanced absorption. It provides powerful anti-inflammatory and antioxidant benefits.",
        price: 549,
        rating: 4.8,
        reviews: 156,
        ingredients: &[
            "Organic Turmeric Extract (95% Curcuminoids)",
            "Black Pepper Extract (Piperine)",
            "Vegetable Cellulose Capsule",
        ],
        benefits: &[
            "Reduces inflammation",
            "Supports joint health",
            "Powerful antioxidant",
            "Enhances immune function",
        ],
    },
    Entry {
        id: "shilajit-resin",
        name: "Pure Himalayan Shilajit Resin",
        category: "energy-boost",
        short: "Natural energy and vitality enhancer",
        full: "Shilajit is a natural mineral resin found in the Himalayas. It's rich in fulvic acid and minerals that support energy, vitality, and overall health.",
        price: 1299,
        rating: 4.9,
        reviews: 64,
        ingredients: &["Pure Himalayan Shilajit Resin"],
        benefits: &[
            "Boosts energy and reduces fatigue",
            "Enhances nutrient absorption",
            "Supports cognitive function",
            "Promotes cellular regeneration",
        ],
    },
    Entry {
        id: "chyawanprash",
        name: "Traditional Chyawanprash",
        category: "immunity",
        short: "Immune-boosting herbal jam",
        full: "Chyawanprash is a traditional Ayurvedic herbal jam made with Amla (Indian Gooseberry) and over 40 herbs and spices. It supports immunity, vitality, and overall health.",
        price: 449,
        rating: 4.6,
        reviews: 108,
        ingredients: &[
            "Amla (Indian Gooseberry)",
            "Honey",
            "Ghee",
            "40+ Ayurvedic herbs and spices",
        ],
        benefits: &[
            "Strengthens immune system",
            "Rich in antioxidants",
            "Supports respiratory health",
            "Enhances digestion",
        ],
    },
    Entry {
        id: "arjuna-heart",
        name: "Arjuna Heart Support",
        category: "heart-health",
        short: "Natural support for cardiovascular health",
        full: "Arjuna bark has been used in Ayurveda for centuries to support heart health. Our extract provides concentrated support for cardiovascular function and healthy blood pressure.",
        price: 699,
        rating: 4.7,
        reviews: 87,
        ingredients: &["Organic Arjuna Bark Extract", "Vegetable Cellulose Capsule"],
        benefits: &[
            "Supports heart function",
            "Maintains healthy blood pressure",
            "Strengthens cardiac muscle",
            "Antioxidant protection",
        ],
    },
    Entry {
        id: "sleep-formula",
        name: "Ayurvedic Sleep Formula",
        category: "sleep-support",
        short: "Natural sleep aid for restful nights",
        full: "Our Ayurvedic Sleep Formula combines Jatamansi, Ashwagandha, and other traditional herbs to promote relaxation and restful sleep without morning grogginess.",
        price: 599,
        rating: 4.5,
        reviews: 94,
        ingredients: &[
            "Organic Jatamansi Root",
            "Organic Ashwagandha Root",
            "Organic Valerian Root",
            "Organic Chamomile Flower",
            "Vegetable Cellulose Capsule",
        ],
        benefits: &[
            "Promotes restful sleep",
            "Reduces time to fall asleep",
            "Calms the mind",
            "No morning grogginess",
        ],
    },
    Entry {
        id: "gymnema-blood-sugar",
        name: "Gymnema Blood Sugar Support",
        category: "diabetes-support",
        short: "Natural support for healthy blood sugar levels",
        full: "Gymnema Sylvestre has been used in Ayurveda for centuries to support healthy blood sugar levels. Our extract provides concentrated support for metabolic health.",
        price: 649,
        rating: 4.6,
        reviews: 72,
        ingredients: &["Organic Gymnema Sylvestre Leaf Extract", "Vegetable Cellulose Capsule"],
        benefits: &[
            "Supports healthy blood sugar levels",
            "Reduces sugar cravings",
            "Supports pancreatic function",
            "Promotes metabolic health",
        ],
    },
    Entry {
        id: "garcinia-weight",
        name: "Garcinia Weight Management",
        category: "weight-management",
        short: "Natural support for weight management",
        full: "Garcinia Cambogia contains hydroxycitric acid (HCA), which may help support weight management by reducing appetite and blocking fat production.",
        price: 549,
        rating: 4.3,
        reviews: 118,
        ingredients: &["Organic Garcinia Cambogia Extract (60% HCA)", "Vegetable Cellulose Capsule"],
        benefits: &[
            "Reduces appetite",
            "Blocks fat production",
            "Supports weight management",
            "Improves metabolism",
        ],
    },
];

static CATALOG: Lazy<Vec<Product>> = Lazy::new(|| ENTRIES.iter().map(Product::from).collect());

pub fn catalog() -> &'static [Product] {
    &CATALOG
}

/// Products for the given category tags. Matches keep catalog order; a thin
/// match list is padded with the best-rated remaining products.
pub fn recommend_products<S: AsRef<str>>(categories: &[S]) -> Vec<Product> {
    let catalog = catalog();
    if categories.is_empty() {
        return catalog.iter().take(DEFAULT_SELECTION).cloned().collect();
    }

    let wanted = |p: &Product| categories.iter().any(|c| c.as_ref() == p.category);
    let mut selected: Vec<Product> = catalog.iter().filter(|p| wanted(p)).cloned().collect();
    if selected.len() >= MIN_MATCHES {
        return selected;
    }

    let mut popular: Vec<&Product> = catalog.iter().filter(|p| !wanted(p)).collect();
    // stable, so equal ratings keep catalog order
    popular.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    let missing = DEFAULT_SELECTION - selected.len();
    selected.extend(popular.into_iter().take(missing).cloned());
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn catalog_has_ten_products() {
        assert_eq!(catalog().len(), 10);
        assert_eq!(catalog()[4].price, 1299);
    }

    #[test]
    fn no_categories_returns_first_six() {
        let picked = recommend_products::<&str>(&[]);
        assert_eq!(
            ids(&picked),
            vec![
                "ashwagandha-500mg",
                "triphala-60caps",
                "brahmi-memory",
                "turmeric-curcumin",
                "shilajit-resin",
                "chyawanprash",
            ]
        );
    }

    #[test]
    fn single_match_is_padded_with_top_rated() {
        let picked = recommend_products(&["sleep-support"]);
        assert_eq!(
            ids(&picked),
            vec![
                "sleep-formula",
                "shilajit-resin",
                "turmeric-curcumin",
                "ashwagandha-500mg",
                "arjuna-heart",
                "brahmi-memory",
            ]
        );
    }

    #[test]
    fn enough_matches_are_returned_as_is() {
        let picked = recommend_products(&[
            "weight-management".to_string(),
            "detox".to_string(),
            "immunity".to_string(),
            "heart-health".to_string(),
        ]);
        assert_eq!(
            ids(&picked),
            vec!["triphala-60caps", "chyawanprash", "arjuna-heart", "garcinia-weight"]
        );
    }

    #[test]
    fn unknown_categories_fall_back_to_popular() {
        let picked = recommend_products(&["sleep-improvement", "weight-gain"]);
        assert_eq!(picked.len(), 6);
        assert_eq!(picked[0].id, "shilajit-resin");
    }
}
