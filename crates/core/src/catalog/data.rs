//! Built-in DirectOne catalog data.

use rust_decimal::Decimal;

use super::{Catalog, Category, Product, Review};
use crate::types::{CategoryId, Price, ProductId, ReviewId};

const IMAGE_BASE: &str = "https://images.unsplash.com";

struct ProductRow {
    id: i32,
    name: &'static str,
    description: &'static str,
    pence: i64,
    original_pence: Option<i64>,
    image: &'static str,
    category: &'static str,
    /// Rating in tenths of a star.
    rating_tenths: i64,
    review_count: u32,
    features: [&'static str; 4],
}

const PRODUCTS: &[ProductRow] = &[
    ProductRow {
        id: 1,
        name: "Wireless Bluetooth Headphones",
        description: "Premium noise-cancelling wireless headphones with 30-hour battery life and superior sound quality.",
        pence: 8999,
        original_pence: Some(12_999),
        image: "photo-1505740420928-5e560c06d30e",
        category: "electronics",
        rating_tenths: 48,
        review_count: 124,
        features: ["Noise Cancelling", "30h Battery", "Wireless", "Premium Sound"],
    },
    ProductRow {
        id: 2,
        name: "Smart Fitness Watch",
        description: "Advanced fitness tracker with heart rate monitoring, GPS, and 7-day battery life.",
        pence: 19_999,
        original_pence: None,
        image: "photo-1523275335684-37898b6baf30",
        category: "electronics",
        rating_tenths: 46,
        review_count: 89,
        features: [
            "Heart Rate Monitor",
            "GPS Tracking",
            "7-day Battery",
            "Water Resistant",
        ],
    },
    ProductRow {
        id: 3,
        name: "Organic Cotton Bed Sheets",
        description: "Luxurious 100% organic cotton bed sheets, hypoallergenic and breathable for perfect sleep.",
        pence: 7999,
        original_pence: Some(9999),
        image: "photo-1631049307264-da0ec9d70304",
        category: "home",
        rating_tenths: 49,
        review_count: 156,
        features: [
            "100% Organic Cotton",
            "Hypoallergenic",
            "Breathable",
            "Machine Washable",
        ],
    },
    ProductRow {
        id: 4,
        name: "Professional Coffee Maker",
        description: "Barista-quality coffee maker with programmable settings and thermal carafe.",
        pence: 14_999,
        original_pence: None,
        image: "photo-1495474472287-4d71bcdd2085",
        category: "home",
        rating_tenths: 47,
        review_count: 203,
        features: [
            "Programmable",
            "Thermal Carafe",
            "Auto Shut-off",
            "12-cup Capacity",
        ],
    },
    ProductRow {
        id: 5,
        name: "Designer Leather Handbag",
        description: "Elegant genuine leather handbag with multiple compartments and adjustable strap.",
        pence: 12_999,
        original_pence: Some(17_999),
        image: "photo-1553062407-98eeb64c6a62",
        category: "fashion",
        rating_tenths: 45,
        review_count: 67,
        features: [
            "Genuine Leather",
            "Multiple Compartments",
            "Adjustable Strap",
            "Designer Quality",
        ],
    },
    ProductRow {
        id: 6,
        name: "Wireless Phone Charger",
        description: "Fast wireless charging pad compatible with all Qi-enabled devices.",
        pence: 2999,
        original_pence: Some(3999),
        image: "photo-1609592806596-4d8b5b1d7e7e",
        category: "electronics",
        rating_tenths: 44,
        review_count: 91,
        features: [
            "Fast Charging",
            "Qi Compatible",
            "LED Indicator",
            "Non-slip Base",
        ],
    },
    ProductRow {
        id: 7,
        name: "Indoor Plant Collection",
        description: "Set of 3 low-maintenance indoor plants perfect for home or office decoration.",
        pence: 4999,
        original_pence: None,
        image: "photo-1416879595882-3373a0480b5b",
        category: "home",
        rating_tenths: 48,
        review_count: 134,
        features: [
            "Low Maintenance",
            "Air Purifying",
            "Decorative Pots",
            "Care Instructions",
        ],
    },
    ProductRow {
        id: 8,
        name: "Premium Wool Scarf",
        description: "Soft merino wool scarf in classic design, perfect for any season.",
        pence: 5999,
        original_pence: None,
        image: "photo-1520903920243-00d872a2d1c9",
        category: "fashion",
        rating_tenths: 46,
        review_count: 45,
        features: [
            "Merino Wool",
            "Classic Design",
            "Soft Texture",
            "Versatile Style",
        ],
    },
    ProductRow {
        id: 9,
        name: "Bluetooth Speaker",
        description: "Portable waterproof Bluetooth speaker with 360-degree sound and 12-hour battery.",
        pence: 6999,
        original_pence: Some(8999),
        image: "photo-1608043152269-423dbba4e7e1",
        category: "electronics",
        rating_tenths: 47,
        review_count: 178,
        features: ["Waterproof", "360° Sound", "12h Battery", "Portable Design"],
    },
    ProductRow {
        id: 10,
        name: "Classic Denim Jacket",
        description: "Timeless denim jacket made from premium cotton denim with vintage wash.",
        pence: 8999,
        original_pence: None,
        image: "photo-1551698618-1dfe5d97d256",
        category: "fashion",
        rating_tenths: 45,
        review_count: 82,
        features: [
            "Premium Cotton",
            "Vintage Wash",
            "Classic Fit",
            "Durable Construction",
        ],
    },
    ProductRow {
        id: 11,
        name: "Productivity Planner",
        description: "Daily planner designed to boost productivity with goal tracking and time management.",
        pence: 2499,
        original_pence: None,
        image: "photo-1506905925346-21bda4d32df4",
        category: "books",
        rating_tenths: 48,
        review_count: 156,
        features: [
            "Goal Tracking",
            "Time Management",
            "Daily Planning",
            "Premium Paper",
        ],
    },
    ProductRow {
        id: 12,
        name: "Mindfulness Journal",
        description: "Guided journal for mindfulness practice with daily prompts and reflection exercises.",
        pence: 1999,
        original_pence: Some(2999),
        image: "photo-1544716278-ca5e3f4abd8c",
        category: "books",
        rating_tenths: 49,
        review_count: 234,
        features: [
            "Daily Prompts",
            "Reflection Exercises",
            "Mindfulness Guide",
            "Quality Binding",
        ],
    },
];

const CATEGORIES: &[(&str, &str, u32)] = &[
    ("all", "All Products", 12),
    ("electronics", "Electronics", 4),
    ("home", "Home & Garden", 3),
    ("fashion", "Fashion", 3),
    ("books", "Books", 2),
];

const REVIEWS: &[(i32, i32, &str, u8, &str, &str)] = &[
    (
        1,
        1,
        "Sarah M.",
        5,
        "Absolutely love these headphones! The sound quality is incredible and they're so comfortable.",
        "2024-01-15",
    ),
    (
        2,
        1,
        "James R.",
        4,
        "Great value for money. Battery life is as advertised and noise cancelling works well.",
        "2024-01-10",
    ),
    (
        3,
        3,
        "Emma L.",
        5,
        "These sheets are amazing! So soft and breathable. Best purchase I've made this year.",
        "2024-01-12",
    ),
];

impl From<&ProductRow> for Product {
    fn from(row: &ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name.to_owned(),
            description: row.description.to_owned(),
            price: Price::gbp_from_pence(row.pence),
            original_price: row.original_pence.map(Price::gbp_from_pence),
            image: format!("{IMAGE_BASE}/{}?w=400&h=400&fit=crop", row.image),
            category: CategoryId::new(row.category),
            rating: Decimal::new(row.rating_tenths, 1),
            review_count: row.review_count,
            in_stock: true,
            features: row.features.iter().map(|f| (*f).to_owned()).collect(),
        }
    }
}

/// Build the DirectOne catalog.
pub(super) fn directone() -> Catalog {
    let products = PRODUCTS.iter().map(Product::from).collect();

    let categories = CATEGORIES
        .iter()
        .map(|&(id, name, count)| Category {
            id: CategoryId::new(id),
            name: name.to_owned(),
            count,
        })
        .collect();

    let reviews = REVIEWS
        .iter()
        .map(
            |&(id, product_id, user_name, rating, comment, date)| Review {
                id: ReviewId::new(id),
                product_id: ProductId::new(product_id),
                user_name: user_name.to_owned(),
                rating,
                comment: comment.to_owned(),
                date: date.to_owned(),
                verified: true,
            },
        )
        .collect();

    Catalog::new(products, categories, reviews)
}
