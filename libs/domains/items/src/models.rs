use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Item entity - one inventory record
///
/// A transient instance carries id 0 until its first save assigns the real
/// key. Structural equality (`PartialEq`) compares every field; identity of
/// persisted records goes through [`Item::same_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Item {
    /// Unique identifier; 0 on a transient (never saved) instance
    #[serde(default)]
    pub id: i32,
    /// Display name, unique across the inventory
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Grouping category
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Units on hand
    #[validate(range(min = 0))]
    pub stock: i32,
    /// Unit price
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Creation timestamp (store-assigned)
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewItem {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

impl Item {
    /// Build a transient item from a NewItem DTO. The timestamps are
    /// placeholders until the store assigns its own on first save.
    pub fn new(input: NewItem) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: input.name,
            category: input.category,
            stock: input.stock,
            price: input.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this instance has been persisted yet
    pub fn is_transient(&self) -> bool {
        self.id == 0
    }

    /// Identity equality for persisted items: two instances address the same
    /// stored record iff they carry the same assigned id. Transient items
    /// have no identity yet and never match.
    pub fn same_record(&self, other: &Item) -> bool {
        !self.is_transient() && self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(name: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            category: "hardware".to_string(),
            stock: 5,
            price: 1.25,
        }
    }

    #[test]
    fn test_new_item_is_transient() {
        let item = Item::new(new_item("bolt"));
        assert!(item.is_transient());
        assert_eq!(item.name, "bolt");
    }

    #[test]
    fn test_same_record_compares_assigned_ids_only() {
        let mut a = Item::new(new_item("bolt"));
        let mut b = Item::new(new_item("nut"));

        // transient instances have no identity
        assert!(!a.same_record(&b));

        a.id = 7;
        b.id = 7;
        assert!(a.same_record(&b));

        b.id = 8;
        assert!(!a.same_record(&b));
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let item = Item::new(NewItem {
            name: String::new(),
            category: "hardware".to_string(),
            stock: 5,
            price: 1.25,
        });
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_stock_and_price() {
        let mut item = Item::new(new_item("bolt"));
        item.stock = -1;
        assert!(item.validate().is_err());

        item.stock = 1;
        item.price = -0.5;
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_well_formed_item() {
        let item = Item::new(new_item("bolt"));
        assert!(item.validate().is_ok());
    }
}
