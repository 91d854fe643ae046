//! API types for the HTTP surface.

use matchbook::OrderBook;
use serde::{Deserialize, Serialize};

/// Form body for `POST /trade`.
///
/// Every field is optional at the extractor level so that a missing or
/// empty field maps to the documented 400 response instead of an opaque
/// extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct TradeForm {
    pub book: Option<String>,
    pub orderid: Option<String>,
    pub tradetype: Option<String>,
    pub side: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
}

/// Form body for `POST /cancel`.
#[derive(Debug, Default, Deserialize)]
pub struct CancelForm {
    pub book: Option<String>,
    pub orderid: Option<String>,
}

/// Side tag on an aggregated status level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelSide {
    Bid,
    Ask,
}

/// One aggregated price level in a `/status` book entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelEntry {
    #[serde(rename = "type")]
    pub side: LevelSide,
    pub price: i32,
    pub quantity: u32,
}

/// Status view of one book: both ladders plus its resting order count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookStatus {
    pub bids: Vec<LevelEntry>,
    pub asks: Vec<LevelEntry>,
    pub size: usize,
}

impl BookStatus {
    /// Captures one book's aggregated ladders. Bids come out
    /// price-descending, asks ascending.
    pub fn from_book(book: &OrderBook) -> Self {
        let snapshot = book.snapshot();
        Self {
            bids: snapshot
                .bids
                .iter()
                .map(|level| LevelEntry {
                    side: LevelSide::Bid,
                    price: level.price,
                    quantity: level.quantity,
                })
                .collect(),
            asks: snapshot
                .asks
                .iter()
                .map(|level| LevelEntry {
                    side: LevelSide::Ask,
                    price: level.price,
                    quantity: level.quantity,
                })
                .collect(),
            size: book.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchbook::{Order, OrderId, Side, TimeInForce};
    use serde_json::json;

    #[test]
    fn status_serializes_to_the_wire_shape() {
        let mut book = OrderBook::new();
        book.add_order(Order::new(
            OrderId(1),
            Side::Buy,
            TimeInForce::GoodTillCancel,
            100,
            10,
        ));
        book.add_order(Order::new(
            OrderId(2),
            Side::Sell,
            TimeInForce::GoodTillCancel,
            101,
            7,
        ));

        let value = serde_json::to_value(BookStatus::from_book(&book)).unwrap();
        assert_eq!(
            value,
            json!({
                "bids": [{ "type": "Bid", "price": 100, "quantity": 10 }],
                "asks": [{ "type": "Ask", "price": 101, "quantity": 7 }],
                "size": 2
            })
        );
    }
}
