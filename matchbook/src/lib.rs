//! Price-time priority limit order book.
//!
//! Core features:
//! - Side-sorted price ladders with FIFO queues at each level
//! - O(log P) best-price access, O(1) cancellation by order id
//! - GoodTillCancel and FillAndKill time-in-force handling
//! - On-demand aggregated liquidity snapshots per price level

pub mod types;

pub use types::{
    BookSnapshot, LevelInfo, Order, OrderId, OrderModify, Price, Quantity, Side, TimeInForce,
    Trade, TradeInfo,
};
pub mod ladder;
pub use ladder::Ladder;

use std::collections::HashMap;

/// Index entry tying a resting order to its queue slot in the ladder.
struct OrderEntry {
    order: Order,
    slot: u32,
}

/// Central limit order book with separate bid/ask sides.
///
/// Uses price-time priority: better prices match first, then earliest
/// orders. The order index is the sole authority on which ids exist; the
/// ladders queue only ids. Not thread-safe - wrap in a lock for concurrent
/// access.
pub struct OrderBook {
    /// Buy orders, highest price first.
    bids: Ladder,
    /// Sell orders, lowest price first.
    asks: Ladder,
    /// Resting orders by id, each with its ladder slot.
    orders: HashMap<OrderId, OrderEntry>,
}

impl OrderBook {
    /// Creates an empty order book.
    pub fn new() -> Self {
        Self {
            bids: Ladder::new(Side::Buy),
            asks: Ladder::new(Side::Sell),
            orders: HashMap::new(),
        }
    }

    /// Submits an order, returning any immediate trades.
    ///
    /// A duplicate id is silently ignored and returns no trades. A
    /// FillAndKill order that cannot cross on arrival is never inserted.
    /// Everything else joins the tail of its price level and is matched
    /// against the opposite side; a GoodTillCancel remainder rests, a
    /// FillAndKill remainder is cancelled.
    pub fn add_order(&mut self, order: Order) -> Vec<Trade> {
        if self.orders.contains_key(&order.id) {
            return Vec::new();
        }
        if order.tif == TimeInForce::FillAndKill && !self.can_match(order.side, order.price) {
            return Vec::new();
        }

        let id = order.id;
        let slot = self.ladder_mut(order.side).push_back(order.price, id);
        self.orders.insert(id, OrderEntry { order, slot });
        self.match_orders(id)
    }

    /// Removes a resting order. Unknown ids are a no-op; returns whether
    /// anything was removed.
    pub fn cancel_order(&mut self, id: OrderId) -> bool {
        let Some(entry) = self.orders.remove(&id) else {
            return false;
        };
        let (side, price) = (entry.order.side, entry.order.price);
        self.ladder_mut(side).remove(price, entry.slot);
        true
    }

    /// Amends an order as cancel-then-add, forfeiting its time priority.
    ///
    /// The replacement inherits the original's time-in-force; side, price
    /// and quantity come from the modification. Unknown ids return no
    /// trades.
    pub fn modify_order(&mut self, modify: OrderModify) -> Vec<Trade> {
        let Some(entry) = self.orders.get(&modify.id) else {
            return Vec::new();
        };
        let tif = entry.order.tif;
        self.cancel_order(modify.id);
        self.add_order(Order::new(
            modify.id,
            modify.side,
            tif,
            modify.price,
            modify.quantity,
        ))
    }

    /// Number of resting orders.
    pub fn size(&self) -> usize {
        self.orders.len()
    }

    /// Returns current best bid price (highest buy price).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best()
    }

    /// Returns current best ask price (lowest sell price).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best()
    }

    /// Aggregates remaining quantity per price level on both sides.
    ///
    /// Bids come out best-first (descending), asks best-first (ascending).
    /// The result is a detached value; holding it needs no lock.
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.level_infos(&self.bids),
            asks: self.level_infos(&self.asks),
        }
    }

    fn level_infos(&self, ladder: &Ladder) -> Vec<LevelInfo> {
        ladder
            .iter()
            .map(|(price, ids)| LevelInfo {
                price,
                quantity: ids.map(|id| self.orders[&id].order.remaining()).sum(),
            })
            .collect()
    }

    /// Whether an order on `side` at `price` would cross the opposite best.
    fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.asks.best().is_some_and(|ask| price >= ask),
            Side::Sell => self.bids.best().is_some_and(|bid| price <= bid),
        }
    }

    fn ladder_mut(&mut self, side: Side) -> &mut Ladder {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Crosses the top of the book until the spread reopens.
    ///
    /// Each iteration fills the two front orders of the best bid and best
    /// ask queues by the smaller remaining quantity, then removes whichever
    /// of them is exhausted. Every fill involves the just-inserted
    /// aggressor, because the book was uncrossed before the insertion; the
    /// trade price on both sides is the resting order's price. Afterwards a
    /// FillAndKill aggressor with a remainder is cancelled so it never
    /// rests.
    fn match_orders(&mut self, aggressor: OrderId) -> Vec<Trade> {
        let mut trades = Vec::new();

        loop {
            let Some((bid_price, bid_id)) = self.bids.best_front() else {
                break;
            };
            let Some((ask_price, ask_id)) = self.asks.best_front() else {
                break;
            };
            if bid_price < ask_price {
                break;
            }
            debug_assert!(
                bid_id == aggressor || ask_id == aggressor,
                "cross without the incoming order"
            );

            let bid_remaining = self.orders[&bid_id].order.remaining();
            let ask_remaining = self.orders[&ask_id].order.remaining();
            let quantity = bid_remaining.min(ask_remaining);
            let price = if bid_id == aggressor { ask_price } else { bid_price };

            if let Some(bid) = self.orders.get_mut(&bid_id) {
                bid.order.fill(quantity);
            }
            if let Some(ask) = self.orders.get_mut(&ask_id) {
                ask.order.fill(quantity);
            }

            trades.push(Trade {
                bid: TradeInfo {
                    order_id: bid_id,
                    price,
                    quantity,
                },
                ask: TradeInfo {
                    order_id: ask_id,
                    price,
                    quantity,
                },
            });

            if quantity == bid_remaining {
                self.bids.pop_front(bid_price);
                self.orders.remove(&bid_id);
            }
            if quantity == ask_remaining {
                self.asks.pop_front(ask_price);
                self.orders.remove(&ask_id);
            }
        }

        if let Some(entry) = self.orders.get(&aggressor) {
            if entry.order.tif == TimeInForce::FillAndKill {
                self.cancel_order(aggressor);
            }
        }

        trades
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
