use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::cart::models::Cart;
use crate::cart::models::CartLine;
use crate::user::models::UserId;

/// Order unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A submitted order: the cart's lines frozen at submission time.
///
/// The total is captured at submission, so later price changes do not
/// rewrite history.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub lines: Vec<CartLine>,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot a cart into a new order. The cart itself is left untouched.
    pub fn from_cart(cart: &Cart, now: DateTime<Utc>) -> Self {
        Self {
            id: OrderId::new(),
            user_id: cart.user_id,
            lines: cart.lines.clone(),
            total_cents: cart.total_cents(),
            created_at: now,
        }
    }
}
