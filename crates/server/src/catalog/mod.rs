//! Static gym and product catalog.
//!
//! The catalog is the only data source for listing pages. It is immutable
//! reference data built once at startup; live reservation deltas are kept
//! separately in the slot ledger.

pub mod filter;
mod seed;

use fitpass_core::{GymId, ProductId, SlotId};

use crate::models::{Gym, Product, Slot};

/// In-memory catalog of gyms (with their slots) and marketplace products.
#[derive(Debug, Clone)]
pub struct Catalog {
    gyms: Vec<Gym>,
    products: Vec<Product>,
    categories: Vec<&'static str>,
}

impl Catalog {
    /// Build the seeded catalog.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            gyms: seed::gyms(),
            products: seed::products(),
            categories: seed::GYM_CATEGORIES.to_vec(),
        }
    }

    /// All gyms, in catalog order.
    #[must_use]
    pub fn gyms(&self) -> &[Gym] {
        &self.gyms
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Gym membership tiers offered on the platform.
    #[must_use]
    pub fn gym_categories(&self) -> &[&'static str] {
        &self.categories
    }

    /// Look up a gym by ID.
    #[must_use]
    pub fn gym(&self, id: &GymId) -> Option<&Gym> {
        self.gyms.iter().find(|gym| &gym.id == id)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Look up a slot by ID across all gyms, returning its gym too.
    #[must_use]
    pub fn slot(&self, id: &SlotId) -> Option<(&Gym, &Slot)> {
        self.gyms
            .iter()
            .find_map(|gym| gym.slot(id).map(|slot| (gym, slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.gyms().len(), 3);
        assert_eq!(catalog.products().len(), 6);
        assert_eq!(catalog.gym_categories(), ["Basic", "Premium", "Elite"]);
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let catalog = Catalog::seed();
        let mut slot_ids: Vec<_> = catalog
            .gyms()
            .iter()
            .flat_map(|gym| gym.slots.iter().map(|slot| slot.id.clone()))
            .collect();
        let before = slot_ids.len();
        slot_ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        slot_ids.dedup();
        assert_eq!(slot_ids.len(), before);
    }

    #[test]
    fn test_slot_lookup_finds_parent_gym() {
        let catalog = Catalog::seed();
        let (gym, slot) = catalog.slot(&SlotId::new("101")).expect("slot 101 seeded");
        assert_eq!(gym.id, GymId::new("1"));
        assert_eq!(slot.capacity, 20);
        assert_eq!(slot.booked, 8);
    }

    #[test]
    fn test_slots_reference_their_gym() {
        let catalog = Catalog::seed();
        for gym in catalog.gyms() {
            for slot in &gym.slots {
                assert_eq!(slot.gym_id, gym.id);
                assert!(slot.booked <= slot.capacity);
            }
        }
    }
}
