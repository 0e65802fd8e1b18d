//! Cart
//!
//! Client-held shopping cart. Unit prices are resolved locally from the tiers the client knows
//! about and are not authoritative: the server revalidates stock (and optionally price) when the
//! order is placed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    placement::RequestedLine,
    pricing::{line_total, resolve_unit_price},
    tiers::PricingTier,
};

/// Pricing known to the client for a product at the time it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct<K> {
    /// Product identifier.
    pub product: K,

    /// Display name.
    pub name: String,

    /// Price when no tier qualifies.
    pub base_price: Decimal,

    /// Volume tiers.
    pub tiers: Vec<PricingTier>,
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine<K> {
    item: CartProduct<K>,
    quantity: u32,
    unit_price: Decimal,
}

impl<K> CartLine<K> {
    fn new(item: CartProduct<K>, quantity: u32) -> Self {
        let mut line = CartLine {
            item,
            quantity,
            unit_price: Decimal::ZERO,
        };

        line.reprice();

        line
    }

    fn reprice(&mut self) {
        self.unit_price = resolve_unit_price(self.item.base_price, self.quantity, &self.item.tiers);
    }

    /// Product on this line.
    pub fn product(&self) -> &CartProduct<K> {
        &self.item
    }

    /// Units on this line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price resolved for the current quantity.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// `unit_price × quantity`.
    pub fn total(&self) -> Decimal {
        line_total(self.quantity, self.unit_price)
    }
}

/// Cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart<K> {
    lines: Vec<CartLine<K>>,
}

impl<K> Default for Cart<K> {
    fn default() -> Self {
        Cart { lines: Vec::new() }
    }
}

impl<K: Copy + PartialEq> Cart<K> {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product.
    ///
    /// When the product is already in the cart the quantities are merged, keeping the pricing
    /// captured when it was first added. Adding zero units does nothing.
    pub fn add_item(&mut self, item: CartProduct<K>, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self.line_mut(item.product) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.reprice();

            return;
        }

        self.lines.push(CartLine::new(item, quantity));
    }

    /// Set the quantity for a product. Zero or less removes the line.
    pub fn update_quantity(&mut self, product: K, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product);

            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        if let Some(line) = self.line_mut(product) {
            line.quantity = quantity;
            line.reprice();
        }
    }

    /// Remove a product from the cart.
    pub fn remove_item(&mut self, product: K) {
        self.lines.retain(|line| line.item.product != product);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine<K>] {
        &self.lines
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of line totals at the locally resolved prices.
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Lines to submit when placing an order.
    pub fn to_order_items(&self) -> Vec<RequestedLine<K>> {
        self.lines
            .iter()
            .map(|line| RequestedLine {
                product: line.item.product,
                quantity: i64::from(line.quantity),
                price_at_purchase: line.unit_price,
            })
            .collect()
    }

    fn line_mut(&mut self, product: K) -> Option<&mut CartLine<K>> {
        self.lines.iter_mut().find(|line| line.item.product == product)
    }
}
