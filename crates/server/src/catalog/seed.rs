//! Seeded catalog data.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fitpass_core::{GymId, ProductId, SlotId};

use crate::models::{GeoPoint, Gym, Product, Slot};

/// Gym membership tiers offered on the platform.
pub const GYM_CATEGORIES: [&str; 3] = ["Basic", "Premium", "Elite"];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn slot(
    id: &str,
    gym_id: &str,
    d: NaiveDate,
    start: &str,
    end: &str,
    capacity: u32,
    booked: u32,
) -> Slot {
    Slot {
        id: SlotId::new(id),
        gym_id: GymId::new(gym_id),
        date: d,
        start_time: start.to_owned(),
        end_time: end.to_owned(),
        capacity,
        booked,
    }
}

pub fn gyms() -> Vec<Gym> {
    let june_first = date(2025, 6, 1);
    vec![
        Gym {
            id: GymId::new("1"),
            name: "FitZone Gym".to_owned(),
            description: "A modern gym with all the latest equipment for your fitness needs."
                .to_owned(),
            image: "https://images.pexels.com/photos/1954524/pexels-photo-1954524.jpeg".to_owned(),
            location: GeoPoint {
                lat: 37.7749,
                lng: -122.4194,
                address: "123 Fitness Ave, San Francisco, CA".to_owned(),
            },
            price: Decimal::new(50, 0),
            rating: Decimal::new(45, 1),
            amenities: vec![
                "Cardio Equipment".to_owned(),
                "Weight Training".to_owned(),
                "Locker Rooms".to_owned(),
                "Showers".to_owned(),
            ],
            categories: vec!["Basic".to_owned(), "Premium".to_owned()],
            slots: vec![
                slot("101", "1", june_first, "07:00", "08:30", 20, 8),
                slot("102", "1", june_first, "09:00", "10:30", 20, 15),
            ],
        },
        Gym {
            id: GymId::new("2"),
            name: "PowerHouse Fitness".to_owned(),
            description: "Specializing in strength training with professional trainers."
                .to_owned(),
            image: "https://images.pexels.com/photos/13106590/pexels-photo-13106590.jpeg"
                .to_owned(),
            location: GeoPoint {
                lat: 37.7833,
                lng: -122.4167,
                address: "456 Muscle St, San Francisco, CA".to_owned(),
            },
            price: Decimal::new(75, 0),
            rating: Decimal::new(48, 1),
            amenities: vec![
                "Weight Training".to_owned(),
                "Personal Trainers".to_owned(),
                "Sauna".to_owned(),
                "Juice Bar".to_owned(),
            ],
            categories: vec!["Premium".to_owned(), "Elite".to_owned()],
            slots: vec![
                slot("201", "2", june_first, "08:00", "09:30", 15, 10),
                slot("202", "2", june_first, "10:00", "11:30", 15, 5),
            ],
        },
        Gym {
            id: GymId::new("3"),
            name: "Yoga Bliss Studio".to_owned(),
            description: "Find your inner peace with our expert yoga instructors.".to_owned(),
            image: "https://images.pexels.com/photos/4056723/pexels-photo-4056723.jpeg".to_owned(),
            location: GeoPoint {
                lat: 37.7750,
                lng: -122.4183,
                address: "789 Zen Blvd, San Francisco, CA".to_owned(),
            },
            price: Decimal::new(60, 0),
            rating: Decimal::new(46, 1),
            amenities: vec![
                "Yoga Studios".to_owned(),
                "Meditation Rooms".to_owned(),
                "Locker Rooms".to_owned(),
                "Tea Bar".to_owned(),
            ],
            categories: vec![
                "Basic".to_owned(),
                "Premium".to_owned(),
                "Elite".to_owned(),
            ],
            slots: vec![
                slot("301", "3", june_first, "07:00", "08:00", 25, 20),
                slot("302", "3", june_first, "18:00", "19:00", 25, 12),
            ],
        },
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("1"),
            name: "Premium Protein Shake".to_owned(),
            description: "High-quality protein shake for muscle recovery.".to_owned(),
            price: Decimal::new(899, 2),
            image: "https://images.pexels.com/photos/8026227/pexels-photo-8026227.jpeg".to_owned(),
            category: "Supplements".to_owned(),
            gym_id: Some(GymId::new("1")),
            in_stock: true,
        },
        Product {
            id: ProductId::new("2"),
            name: "Fitness Gloves".to_owned(),
            description: "Durable gym gloves for weight training.".to_owned(),
            price: Decimal::new(2499, 2),
            image: "https://images.pexels.com/photos/4397840/pexels-photo-4397840.jpeg".to_owned(),
            category: "Accessories".to_owned(),
            gym_id: None,
            in_stock: true,
        },
        Product {
            id: ProductId::new("3"),
            name: "Yoga Mat".to_owned(),
            description: "Non-slip yoga mat for all your yoga needs.".to_owned(),
            price: Decimal::new(3999, 2),
            image: "https://images.pexels.com/photos/5767279/pexels-photo-5767279.jpeg".to_owned(),
            category: "Equipment".to_owned(),
            gym_id: Some(GymId::new("3")),
            in_stock: true,
        },
        Product {
            id: ProductId::new("4"),
            name: "Energy Drink".to_owned(),
            description: "Pre-workout energy drink to boost your performance.".to_owned(),
            price: Decimal::new(399, 2),
            image: "https://images.pexels.com/photos/4134791/pexels-photo-4134791.jpeg".to_owned(),
            category: "Beverages".to_owned(),
            gym_id: None,
            in_stock: true,
        },
        Product {
            id: ProductId::new("5"),
            name: "Fitness Tracker".to_owned(),
            description: "Track your fitness metrics with this sleek fitness band.".to_owned(),
            price: Decimal::new(9999, 2),
            image: "https://images.pexels.com/photos/4498482/pexels-photo-4498482.jpeg".to_owned(),
            category: "Electronics".to_owned(),
            gym_id: None,
            in_stock: true,
        },
        Product {
            id: ProductId::new("6"),
            name: "Gym Towel Set".to_owned(),
            description: "Set of 3 gym towels, perfect for your workout sessions.".to_owned(),
            price: Decimal::new(1999, 2),
            image: "https://images.pexels.com/photos/6456303/pexels-photo-6456303.jpeg".to_owned(),
            category: "Accessories".to_owned(),
            gym_id: Some(GymId::new("2")),
            in_stock: true,
        },
    ]
}
