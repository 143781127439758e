//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{KeyValueStorage, StorageError};

mod persistence;

pub use persistence::{CART_STORAGE_KEY, Rehydration};

/// Errors raised by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A quantity below one (or beyond `u32`) was supplied to an insert.
    #[error("quantity must be a positive whole number, got {0}")]
    InvalidQuantity(i64),

    /// The cart could not be serialised for storage.
    #[error("failed to serialise cart")]
    Serialize(#[from] serde_json::Error),

    /// The cart was updated in memory but could not be persisted.
    #[error("failed to persist cart")]
    Storage(#[from] StorageError),
}

/// A product as it is added to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    /// Catalog product identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Display image path.
    pub image: Option<String>,

    /// Unit price at the time of adding.
    pub price: Decimal,
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Catalog product identifier, unique within the cart.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Display image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Unit price cached at add time. Display only; never sent to checkout.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Number of units, always at least one.
    pub quantity: u32,
}

impl CartLineItem {
    /// Price of the whole line.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The identifying half of a line item, as sent to checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    /// Catalog product identifier.
    pub id: String,

    /// Number of units.
    pub quantity: u32,
}

/// The shopping cart and its storage.
///
/// This is the only mutation surface for cart state. Every mutation writes the
/// full cart back to storage before returning.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStorage> {
    items: Vec<CartLineItem>,
    storage: S,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Rehydrate the cart from storage, falling back to an empty cart.
    pub fn load(storage: S) -> Self {
        Self::load_with_status(storage).0
    }

    /// Rehydrate the cart from storage and report what was found.
    pub fn load_with_status(storage: S) -> (Self, Rehydration) {
        let (items, status) = persistence::rehydrate(&storage);

        (Self { items, storage }, status)
    }

    /// Add `quantity` units of `item`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is below one; the cart is left untouched.
    /// - [`CartError::Storage`]: the change could not be persisted.
    pub fn add_item(&mut self, item: NewCartItem, quantity: i64) -> Result<(), CartError> {
        let quantity = positive_quantity(quantity)?;

        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLineItem {
                id: item.id,
                name: item.name,
                image: item.image,
                price: item.price,
                quantity,
            });
        }

        self.persist()
    }

    /// Add a single unit of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the change could not be persisted.
    pub fn add_one(&mut self, item: NewCartItem) -> Result<(), CartError> {
        self.add_item(item, 1)
    }

    /// Set the quantity of line `id`. Anything below one removes the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` does not fit a line quantity.
    /// - [`CartError::Storage`]: the change could not be persisted.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return self.remove_item(id);
        }

        let quantity = positive_quantity(quantity)?;

        if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
        }

        self.persist()
    }

    /// Remove line `id`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the change could not be persisted.
    pub fn remove_item(&mut self, id: &str) -> Result<(), CartError> {
        self.items.retain(|line| line.id != id);

        self.persist()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the change could not be persisted.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.items.clear();

        self.persist()
    }

    /// Clear the cart on arrival at the payment success page.
    ///
    /// Only a present, non-empty checkout session id counts as a completed
    /// payment; anything else leaves the cart intact. Returns whether the
    /// cart was cleared.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the change could not be persisted.
    pub fn clear_after_payment(&mut self, session_id: Option<&str>) -> Result<bool, CartError> {
        match session_id.map(str::trim) {
            Some(id) if !id.is_empty() => {
                self.clear()?;

                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Total number of units across all lines.
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Sum of every line total, at the cached unit prices.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Product ids and quantities, without prices.
    pub fn checkout_lines(&self) -> Vec<CheckoutLine> {
        self.items
            .iter()
            .map(|line| CheckoutLine {
                id: line.id.clone(),
                quantity: line.quantity,
            })
            .collect()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> Result<(), CartError> {
        let serialised = serde_json::to_string(&self.items)?;

        self.storage.write(CART_STORAGE_KEY, &serialised)?;

        Ok(())
    }
}

fn positive_quantity(quantity: i64) -> Result<u32, CartError> {
    u32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .ok_or(CartError::InvalidQuantity(quantity))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    fn ihram(id: &str) -> NewCartItem {
        NewCartItem {
            id: id.to_owned(),
            name: "Ihram set".to_owned(),
            image: Some("/images/ihram.jpg".to_owned()),
            price: dec!(349),
        }
    }

    fn empty_cart() -> CartStore<MemoryStorage> {
        CartStore::load(MemoryStorage::new())
    }

    #[test]
    fn adding_the_same_item_twice_merges_quantities() -> TestResult {
        let mut cart = empty_cart();

        cart.add_item(ihram("ihram-adult"), 2)?;
        cart.add_item(ihram("ihram-adult"), 3)?;

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 5);

        Ok(())
    }

    #[test]
    fn add_one_adds_a_single_unit() -> TestResult {
        let mut cart = empty_cart();

        cart.add_one(ihram("ihram-adult"))?;

        assert_eq!(cart.total_items(), 1);

        Ok(())
    }

    #[test]
    fn non_positive_quantities_are_rejected() -> TestResult {
        let mut cart = empty_cart();

        cart.add_item(ihram("ihram-adult"), 1)?;

        assert!(matches!(
            cart.add_item(ihram("ihram-adult"), 0),
            Err(CartError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add_item(ihram("ihram-child"), -2),
            Err(CartError::InvalidQuantity(-2))
        ));
        assert_eq!(cart.total_items(), 1);

        Ok(())
    }

    #[test]
    fn updating_to_zero_removes_the_line() -> TestResult {
        let mut cart = empty_cart();

        cart.add_item(ihram("ihram-adult"), 2)?;
        cart.update_quantity("ihram-adult", 0)?;

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);

        Ok(())
    }

    #[test]
    fn updating_sets_the_quantity() -> TestResult {
        let mut cart = empty_cart();

        cart.add_item(ihram("ihram-adult"), 2)?;
        cart.update_quantity("ihram-adult", 7)?;

        assert_eq!(cart.total_items(), 7);

        Ok(())
    }

    #[test]
    fn updating_an_unknown_line_is_a_no_op() -> TestResult {
        let mut cart = empty_cart();

        cart.add_item(ihram("ihram-adult"), 2)?;
        cart.update_quantity("ihram-child", 4)?;

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 2);

        Ok(())
    }

    #[test]
    fn removing_an_absent_line_is_a_no_op() -> TestResult {
        let mut cart = empty_cart();

        cart.add_item(ihram("ihram-adult"), 1)?;
        cart.remove_item("ihram-child")?;
        cart.remove_item("ihram-adult")?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn totals_are_derived_from_lines() -> TestResult {
        let mut cart = empty_cart();

        cart.add_item(ihram("ihram-adult"), 2)?;
        cart.add_item(
            NewCartItem {
                price: dec!(199.50),
                ..ihram("ihram-child")
            },
            1,
        )?;

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), dec!(897.50));

        Ok(())
    }

    #[test]
    fn checkout_lines_carry_ids_and_quantities_only() -> TestResult {
        let mut cart = empty_cart();

        cart.add_item(ihram("ihram-adult"), 2)?;

        assert_eq!(
            cart.checkout_lines(),
            vec![CheckoutLine {
                id: "ihram-adult".to_owned(),
                quantity: 2
            }]
        );

        Ok(())
    }

    #[test]
    fn payment_return_without_session_keeps_the_cart() -> TestResult {
        let mut cart = empty_cart();

        cart.add_item(ihram("ihram-adult"), 2)?;

        assert!(!cart.clear_after_payment(None)?);
        assert!(!cart.clear_after_payment(Some("  "))?);
        assert_eq!(cart.total_items(), 2);

        assert!(cart.clear_after_payment(Some("cs_test_123"))?);
        assert!(cart.is_empty());

        Ok(())
    }
}
