//! Test fixtures and data factories

use items_rs::{Item, ItemStore};
use serde_json::{Value, json};

/// Factory for creating test items
pub struct ItemFactory;

impl ItemFactory {
    /// Unsaved `NEW` item numbered `n`
    pub fn create(n: i64) -> Item {
        Item::new(
            format!("Item{}", n),
            format!("Description{}", n),
            format!("test{}@example.com", n),
        )
    }

    /// Items numbered `1..=count`, unsaved
    pub fn many(count: i64) -> Vec<Item> {
        (1..=count).map(Self::create).collect()
    }

    /// JSON body for create and update requests
    pub fn payload(name: &str, email: &str) -> Value {
        json!({
            "name": name,
            "description": format!("{} description", name),
            "email": email,
        })
    }
}

/// Save `count` fresh items and return their ids
pub async fn seed(store: &dyn ItemStore, count: i64) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count as usize);
    for item in ItemFactory::many(count) {
        let saved = store.save(item).await.expect("Failed to seed item");
        ids.extend(saved.id);
    }
    ids
}
