//! Pricing
//!
//! Volume (tiered) price resolution and line arithmetic. Every consumer that needs an effective
//! unit price (the cart, product quotes, and server-side price checks during order placement)
//! goes through [`resolve_unit_price`] so the tie-break behaviour is identical everywhere.

use rust_decimal::Decimal;

use crate::tiers::PricingTier;

/// Resolve the effective per-unit price for `quantity` units.
///
/// Returns the `unit_price` of the tier with the numerically largest `minimum_quantity` that is
/// `<= quantity`. When several tiers share that threshold, the one listed first wins. When no
/// tier qualifies (including an empty tier list), `base_price` is returned unchanged.
///
/// Callers reject `quantity == 0` before calling; this function does not validate it.
pub fn resolve_unit_price(base_price: Decimal, quantity: u32, tiers: &[PricingTier]) -> Decimal {
    // First-listed wins on duplicate thresholds. This mirrors a stable descending sort and is
    // kept for compatibility with existing price expectations, although it was likely never
    // an intentional policy.
    tiers
        .iter()
        .filter(|tier| tier.minimum_quantity() <= quantity)
        .fold(None::<&PricingTier>, |best, tier| match best {
            Some(current) if current.minimum_quantity() >= tier.minimum_quantity() => Some(current),
            _ => Some(tier),
        })
        .map_or(base_price, PricingTier::unit_price)
}

/// Extension of a single line: `unit_price × quantity`.
pub fn line_total(quantity: u32, unit_price: Decimal) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum line extensions into an order total.
pub fn total_amount<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (u32, Decimal)>,
{
    lines
        .into_iter()
        .map(|(quantity, unit_price)| line_total(quantity, unit_price))
        .sum()
}
