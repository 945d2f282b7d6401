//! Cart persistence
//!
//! The cart's item list is serialized to durable storage after every
//! mutation and restored verbatim on session start. Only the items are
//! persisted; the sidebar visibility flag is transient.
//!
//! Storage is last-write-wins: concurrent sessions sharing the same storage
//! location overwrite each other without coordination.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use thiserror::Error;

use crate::{
    cart::{Cart, CartItem},
    products::{Product, ProductId},
};

/// Fixed namespace key the cart snapshot is stored under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Errors raised by a [`CartStore`].
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// Reading or writing the backing storage failed.
    #[error("cart storage i/o error")]
    Io(#[from] io::Error),

    /// A snapshot exists but could not be decoded. There is no schema
    /// versioning; callers may treat this as an empty cart.
    #[error("corrupt cart snapshot")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable storage for the cart's item list.
///
/// An absent snapshot is an empty cart, not an error.
pub trait CartStore {
    /// Load the persisted item list, empty when no snapshot exists.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] when the snapshot cannot be read or
    /// decoded.
    fn load(&self) -> Result<Vec<CartItem>, CartStoreError>;

    /// Replace the persisted item list.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] when the snapshot cannot be written.
    fn save(&self, items: &[CartItem]) -> Result<(), CartStoreError>;
}

/// File-backed store: one JSON document named after [`CART_STORAGE_KEY`]
/// inside the given directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory must already exist.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CART_STORAGE_KEY}.json")),
        }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Vec<CartItem>, CartStoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, items: &[CartItem]) -> Result<(), CartStoreError> {
        let json = serde_json::to_vec(items)?;

        // Write-then-rename: a crash mid-save must not truncate the
        // previous snapshot. The rename keeps last-write-wins semantics.
        let staging = self.path.with_extension("json.tmp");

        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;

        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<CartItem>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Vec<CartItem>, CartStoreError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(items.clone())
    }

    fn save(&self, items: &[CartItem]) -> Result<(), CartStoreError> {
        let mut stored = self.items.lock().unwrap_or_else(PoisonError::into_inner);

        *stored = items.to_vec();

        Ok(())
    }
}

impl<S: CartStore> CartStore for &S {
    fn load(&self) -> Result<Vec<CartItem>, CartStoreError> {
        (*self).load()
    }

    fn save(&self, items: &[CartItem]) -> Result<(), CartStoreError> {
        (*self).save(items)
    }
}

/// A cart bound to a store: hydrated from the persisted snapshot on
/// construction, re-saved after every item mutation.
///
/// This is the state container consumers hold instead of an ambient global;
/// whoever owns the session owns the `PersistedCart`. Visibility changes
/// mutate in memory only and never trigger a save.
#[derive(Debug)]
pub struct PersistedCart<S: CartStore> {
    cart: Cart,
    store: S,
}

impl<S: CartStore> PersistedCart<S> {
    /// Restore the cart from the store's snapshot; an absent snapshot yields
    /// an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] when an existing snapshot cannot be read
    /// or decoded.
    pub fn hydrate(store: S) -> Result<Self, CartStoreError> {
        let items = store.load()?;

        Ok(Self {
            cart: Cart::with_items(items),
            store,
        })
    }

    /// Read access to the underlying cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// [`Cart::add_item`], followed by a save of the item list.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] when the snapshot cannot be written; the
    /// in-memory cart keeps the applied mutation either way.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<u32, CartStoreError> {
        let applied = self.cart.add_item(product, quantity);
        self.persist()?;

        Ok(applied)
    }

    /// [`Cart::remove_item`], followed by a save of the item list.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] when the snapshot cannot be written.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<(), CartStoreError> {
        self.cart.remove_item(product_id);
        self.persist()
    }

    /// [`Cart::update_quantity`], followed by a save of the item list.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] when the snapshot cannot be written.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<u32, CartStoreError> {
        let applied = self.cart.update_quantity(product_id, quantity);
        self.persist()?;

        Ok(applied)
    }

    /// [`Cart::clear`], followed by a save of the item list.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] when the snapshot cannot be written.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();
        self.persist()
    }

    /// Toggle the sidebar visibility flag. Not persisted.
    pub fn toggle_open(&mut self) {
        self.cart.toggle_open();
    }

    /// Show the cart sidebar. Not persisted.
    pub fn open(&mut self) {
        self.cart.open();
    }

    /// Hide the cart sidebar. Not persisted.
    pub fn close(&mut self) {
        self.cart.close();
    }

    fn persist(&self) -> Result<(), CartStoreError> {
        self.store.save(self.cart.items())
    }
}
