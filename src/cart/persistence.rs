//! Cart persistence

use crate::{cart::CartLineItem, storage::KeyValueStorage};

/// Storage key the serialised cart lives under.
pub const CART_STORAGE_KEY: &str = "ihram.cart";

/// What was found in storage when the cart was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rehydration {
    /// Nothing was stored; the cart starts empty.
    Empty,

    /// This many lines were restored.
    Restored(usize),

    /// The stored value could not be read or parsed; the cart starts empty.
    Corrupt,
}

pub(super) fn rehydrate<S: KeyValueStorage>(storage: &S) -> (Vec<CartLineItem>, Rehydration) {
    let raw = match storage.read(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (Vec::new(), Rehydration::Empty),
        Err(_unreadable) => return (Vec::new(), Rehydration::Corrupt),
    };

    match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
        Ok(lines) => {
            let lines = normalise(lines);
            let restored = lines.len();

            (lines, Rehydration::Restored(restored))
        }
        Err(_malformed) => (Vec::new(), Rehydration::Corrupt),
    }
}

/// Drop empty lines and merge duplicate ids left by older writers.
fn normalise(lines: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut merged: Vec<CartLineItem> = Vec::with_capacity(lines.len());

    for line in lines.into_iter().filter(|line| line.quantity >= 1) {
        if let Some(existing) = merged.iter_mut().find(|existing| existing.id == line.id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            merged.push(line);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        cart::{CartStore, NewCartItem},
        storage::{MemoryStorage, StorageError},
    };

    use super::*;

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_owned()))
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_owned()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_owned()))
        }
    }

    #[test]
    fn missing_value_loads_an_empty_cart() {
        let (cart, status) = CartStore::load_with_status(MemoryStorage::new());

        assert!(cart.is_empty());
        assert_eq!(status, Rehydration::Empty);
    }

    #[test]
    fn corrupt_value_loads_an_empty_cart() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.write(CART_STORAGE_KEY, "{invalid json")?;

        let (cart, status) = CartStore::load_with_status(storage);

        assert!(cart.is_empty());
        assert_eq!(status, Rehydration::Corrupt);

        Ok(())
    }

    #[test]
    fn unreadable_storage_loads_an_empty_cart() {
        let (cart, status) = CartStore::load_with_status(BrokenStorage);

        assert!(cart.is_empty());
        assert_eq!(status, Rehydration::Corrupt);
    }

    #[test]
    fn failed_writes_keep_the_in_memory_change() {
        let mut cart = CartStore::load(BrokenStorage);

        let result = cart.add_item(
            NewCartItem {
                id: "ihram-adult".to_owned(),
                name: "Ihram set".to_owned(),
                image: None,
                price: dec!(349),
            },
            1,
        );

        assert!(matches!(result, Err(crate::cart::CartError::Storage(_))));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn stored_values_from_the_web_client_are_accepted() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.write(
            CART_STORAGE_KEY,
            r#"[{"id":"ihram-adult","name":"Ihram","image":"/ihram.jpg","price":349.0,"quantity":2}]"#,
        )?;

        let cart = CartStore::load(storage);

        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), dec!(698));

        Ok(())
    }

    #[test]
    fn zero_quantity_lines_are_dropped_and_duplicates_merged() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.write(
            CART_STORAGE_KEY,
            r#"[
                {"id":"a","name":"A","price":10,"quantity":0},
                {"id":"b","name":"B","price":10,"quantity":1},
                {"id":"b","name":"B","price":10,"quantity":2}
            ]"#,
        )?;

        let (cart, status) = CartStore::load_with_status(storage);

        assert_eq!(status, Rehydration::Restored(1));
        assert_eq!(cart.total_items(), 3);

        Ok(())
    }

    #[test]
    fn cart_survives_a_reload() -> TestResult {
        let mut cart = CartStore::load(MemoryStorage::new());

        for (id, quantity) in [("ihram-adult", 2), ("ihram-child", 1), ("belt", 4)] {
            cart.add_item(
                NewCartItem {
                    id: id.to_owned(),
                    name: id.to_owned(),
                    image: None,
                    price: dec!(12.5),
                },
                quantity,
            )?;
        }

        let before: BTreeSet<_> = cart
            .checkout_lines()
            .into_iter()
            .map(|line| (line.id, line.quantity))
            .collect();

        let reloaded = CartStore::load(cart.into_storage());

        let after: BTreeSet<_> = reloaded
            .checkout_lines()
            .into_iter()
            .map(|line| (line.id, line.quantity))
            .collect();

        assert_eq!(before, after);

        Ok(())
    }
}
