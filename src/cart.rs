//! Client-side cart: an owned state container over (product, quantity) pairs
//! with an injected persistence adapter. Mutations are pure state transitions;
//! the adapter write is a side effect and a failed write is logged rather than
//! surfaced, so cart operations themselves never fail.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::orders::CheckoutItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: Uuid,
    pub name: String,
    pub price: i64,
    pub image: Option<String>,
    pub quantity: i32,
}

/// Persistence adapter for the cart. Local storage today; could be a
/// server-synced store.
pub trait CartStore {
    fn load(&self) -> anyhow::Result<Vec<CartItem>>;
    fn save(&self, items: &[CartItem]) -> anyhow::Result<()>;
}

pub struct Cart<S: CartStore> {
    items: Vec<CartItem>,
    store: S,
}

impl<S: CartStore> Cart<S> {
    /// Restore the cart from its store. An unreadable store starts empty.
    pub fn load(store: S) -> Self {
        let items = store.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load cart, starting empty");
            Vec::new()
        });
        Self { items, store }
    }

    /// Add a product: an already-present product gains one unit, a new one is
    /// appended with quantity 1 regardless of the quantity on `item`.
    pub fn add(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(CartItem { quantity: 1, ..item }),
        }
        self.persist();
    }

    /// Set the quantity of a product. Zero or negative removes the item;
    /// an absent product id is a no-op.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i32) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = quantity;
            self.persist();
        }
    }

    pub fn remove(&mut self, product_id: Uuid) {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        if self.items.len() != before {
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    pub fn total_price(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.price * i64::from(item.quantity))
            .sum()
    }

    pub fn total_items(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Snapshot the cart as checkout line items (price and name are frozen at
    /// this point; later product edits do not affect them).
    pub fn checkout_items(&self) -> Vec<CheckoutItem> {
        self.items
            .iter()
            .map(|item| CheckoutItem {
                product_id: item.product_id,
                product_name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
            })
            .collect()
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.items) {
            tracing::warn!(error = %err, "failed to persist cart");
        }
    }
}

/// Volatile store, mainly for tests.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<Vec<CartItem>>,
}

impl CartStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Vec<CartItem>> {
        Ok(self.items.borrow().clone())
    }

    fn save(&self, items: &[CartItem]) -> anyhow::Result<()> {
        *self.items.borrow_mut() = items.to_vec();
        Ok(())
    }
}

/// JSON-file-backed store: the durable client-local storage analogue. The
/// cart survives reloads and is scoped to whoever owns the file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> anyhow::Result<Vec<CartItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        let items = serde_json::from_str(&raw)?;
        Ok(items)
    }

    fn save(&self, items: &[CartItem]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(items)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
