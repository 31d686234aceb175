use std::fmt;

use uuid::Uuid;

use crate::item::models::Item;
use crate::item::models::ItemId;
use crate::user::models::UserId;
use crate::user::models::Username;

/// Cart unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartId(pub Uuid);

impl CartId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CartId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One cart position: an item and how many of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: Item,
    pub quantity: u32,
}

/// A user's shopping cart.
///
/// One cart per user; lines are keyed by item. The total is derived from
/// the lines, never stored separately.
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Fresh empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: CartId::new(),
            user_id,
            lines: Vec::new(),
        }
    }

    /// Add `quantity` of `item`, merging into an existing line.
    pub fn add_item(&mut self, item: Item, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine { item, quantity });
        }
    }

    /// Remove `quantity` of the item; a line that reaches zero is dropped.
    pub fn remove_item(&mut self, item_id: ItemId, quantity: u32) {
        if let Some(position) = self.lines.iter().position(|line| line.item.id == item_id) {
            let line = &mut self.lines[position];
            if line.quantity > quantity {
                line.quantity -= quantity;
            } else {
                self.lines.remove(position);
            }
        }
    }

    /// Sum of line price times quantity, in cents.
    pub fn total_cents(&self) -> i64 {
        self.lines
            .iter()
            .map(|line| line.item.price_cents * i64::from(line.quantity))
            .sum()
    }
}

/// Command to add or remove cart positions.
#[derive(Debug)]
pub struct ModifyCartCommand {
    pub username: Username,
    pub item_id: ItemId,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(id: i64, price_cents: i64) -> Item {
        Item {
            id: ItemId(id),
            name: format!("Widget {}", id),
            description: "A test widget".to_string(),
            price_cents,
        }
    }

    #[test]
    fn test_add_item_merges_lines() {
        let mut cart = Cart::new(UserId::new());
        cart.add_item(widget(1, 299), 1);
        cart.add_item(widget(1, 299), 2);

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
        assert_eq!(cart.total_cents(), 897);
    }

    #[test]
    fn test_remove_item_clamps_to_zero() {
        let mut cart = Cart::new(UserId::new());
        cart.add_item(widget(1, 299), 2);
        cart.remove_item(ItemId(1), 5);

        assert!(cart.lines.is_empty());
        assert_eq!(cart.total_cents(), 0);
    }

    #[test]
    fn test_remove_item_partial() {
        let mut cart = Cart::new(UserId::new());
        cart.add_item(widget(1, 299), 3);
        cart.add_item(widget(2, 199), 1);
        cart.remove_item(ItemId(1), 1);

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.total_cents(), 2 * 299 + 199);
    }
}
