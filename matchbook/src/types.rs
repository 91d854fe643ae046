//! Core data types for the order book.
//!
//! Prices are signed 32-bit ticks (negative prices are legal, e.g. for
//! spread instruments), quantities unsigned 32-bit, order ids unsigned
//! 64-bit and assigned by the caller.

use serde::{Deserialize, Serialize};

/// Limit price in integer ticks.
pub type Price = i32;

/// Order or trade quantity in lots.
pub type Quantity = u32;

/// Unique order identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

/// Order side - Buy (bid) or Sell (ask).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// Time-in-force instructions for order lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Rests on the book until matched or cancelled.
    GoodTillCancel,
    /// Matches what it can immediately; any remainder is cancelled.
    FillAndKill,
}

/// A limit order.
///
/// `remaining` starts equal to the initial quantity and only ever
/// decreases, via [`Order::fill`]. An order whose remaining quantity
/// reaches zero is filled and leaves the book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub tif: TimeInForce,
    pub price: Price,
    initial: Quantity,
    remaining: Quantity,
}

impl Order {
    /// Creates a new order with its full quantity unfilled.
    /// Callers must supply a positive quantity.
    pub fn new(id: OrderId, side: Side, tif: TimeInForce, price: Price, quantity: Quantity) -> Self {
        debug_assert!(quantity > 0, "order quantity must be positive");
        Self {
            id,
            side,
            tif,
            price,
            initial: quantity,
            remaining: quantity,
        }
    }

    pub fn initial(&self) -> Quantity {
        self.initial
    }

    pub fn remaining(&self) -> Quantity {
        self.remaining
    }

    pub fn filled(&self) -> Quantity {
        self.initial - self.remaining
    }

    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Consumes `quantity` from the remaining amount.
    ///
    /// Filling past the remaining quantity is a logic fault; the matching
    /// loop sizes every fill by `min` of both remainders, so the assertion
    /// is unreachable from the public operations.
    pub(crate) fn fill(&mut self, quantity: Quantity) {
        assert!(
            quantity <= self.remaining,
            "order {} cannot be filled past its remaining quantity",
            self.id.0
        );
        self.remaining -= quantity;
    }
}

/// Replacement fields for an amendment.
///
/// Carries everything of the replacement order except the time-in-force,
/// which is inherited from the order being amended.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct OrderModify {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

/// One side of a fill: which order traded, at what price, how much.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    pub order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

/// A single fill between one bid and one ask.
///
/// Both sides share the same quantity and, by convention, the same price:
/// the price of whichever order was already resting on the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub bid: TradeInfo,
    pub ask: TradeInfo,
}

/// Aggregated liquidity at one price level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub price: Price,
    pub quantity: Quantity,
}

/// Value snapshot of both ladders, decoupled from the live book.
///
/// Bids are ordered best-first (descending price), asks best-first
/// (ascending price).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub bids: Vec<LevelInfo>,
    pub asks: Vec<LevelInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_accounting() {
        let mut order = Order::new(OrderId(7), Side::Buy, TimeInForce::GoodTillCancel, 100, 10);
        assert_eq!(order.initial(), 10);
        assert_eq!(order.remaining(), 10);
        assert_eq!(order.filled(), 0);
        assert!(!order.is_filled());

        order.fill(4);
        assert_eq!(order.remaining(), 6);
        assert_eq!(order.filled(), 4);

        order.fill(6);
        assert_eq!(order.remaining(), 0);
        assert_eq!(order.filled(), 10);
        assert!(order.is_filled());
    }

    #[test]
    #[should_panic(expected = "remaining quantity")]
    fn overfill_is_a_logic_fault() {
        let mut order = Order::new(OrderId(1), Side::Sell, TimeInForce::GoodTillCancel, 50, 3);
        order.fill(4);
    }

    #[test]
    fn negative_prices_are_legal() {
        let order = Order::new(OrderId(2), Side::Sell, TimeInForce::FillAndKill, -25, 1);
        assert_eq!(order.price, -25);
    }
}
