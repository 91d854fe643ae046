//! Multi-book registry.
//!
//! Maps book names to independent engine instances. The `DashMap` guards
//! lookup and creation; every mutation of a single book happens under that
//! book's own `RwLock`, so per-book operations observe a total order while
//! different books proceed in parallel.

use std::collections::BTreeMap;

use dashmap::DashMap;
use matchbook::{Order, OrderBook, OrderId, Trade};
use tokio::sync::RwLock;

use crate::types::BookStatus;

/// All live order books, keyed by name.
pub struct Registry {
    books: DashMap<String, RwLock<OrderBook>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
        }
    }

    /// Submits an order to the named book, creating the book on first
    /// reference, and returns any immediate trades.
    ///
    /// The book's write lock is held for the whole engine call, so the
    /// submission and its matching are one atomic step from the point of
    /// view of every other request touching this book.
    pub async fn place(&self, book: &str, order: Order) -> Vec<Trade> {
        let entry = self
            .books
            .entry(book.to_string())
            .or_insert_with(|| RwLock::new(OrderBook::new()))
            .downgrade();
        let mut engine = entry.write().await;
        engine.add_order(order)
    }

    /// Cancels an order in the named book.
    ///
    /// Returns whether anything was removed. An unknown book counts as an
    /// unknown order; no book is created as a side effect of a cancel.
    pub async fn cancel(&self, book: &str, id: OrderId) -> bool {
        let Some(entry) = self.books.get(book) else {
            return false;
        };
        let mut engine = entry.write().await;
        engine.cancel_order(id)
    }

    /// Captures every book's aggregated ladders, keyed by book name.
    ///
    /// Each book is snapshotted under its read lock, so every entry is a
    /// consistent cut of that book; no ordering is promised across books.
    /// The map is name-sorted for stable JSON output.
    pub async fn status(&self) -> BTreeMap<String, BookStatus> {
        let mut books = BTreeMap::new();
        for entry in self.books.iter() {
            let engine = entry.read().await;
            books.insert(entry.key().clone(), BookStatus::from_book(&engine));
        }
        books
    }

    /// Number of books created so far.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
