//! Suggested-total calculation
//!
//! Pure functions over selections and price tables. All amounts are in
//! the smallest currency unit; totals are exact integer sums.
//!
//! Consumables price from the **current** table (a price change
//! retroactively affects an unsaved suggested total); laser selections
//! price from their **stored** snapshot (frozen at selection time).
//! A consumable name missing from the table contributes 0 — the
//! selection stays saveable and the operator sees "price unknown"
//! upstream, it is not an error here.

use std::collections::HashMap;

use shared::models::{ConsumableLine, LaserAreaSelection, ProductSaleLine};

/// Quantities are positive; a request for ≤ 0 is clamped to 1, not
/// rejected.
pub fn clamp_quantity(qty: i64) -> i64 {
    qty.max(1)
}

/// Suggested total for a consumable selection against the live price
/// table.
pub fn consumables_total(lines: &[ConsumableLine], price_table: &HashMap<String, i64>) -> i64 {
    lines
        .iter()
        .map(|line| {
            let unit_price = price_table.get(&line.name).copied().unwrap_or(0);
            unit_price * clamp_quantity(line.amount)
        })
        .sum()
}

/// Total of a laser-area selection, from the frozen per-selection
/// prices.
pub fn laser_total(selections: &[LaserAreaSelection]) -> i64 {
    selections.iter().map(|s| s.price).sum()
}

/// Total for a care-product sale.
pub fn product_sale_total(lines: &[ProductSaleLine]) -> i64 {
    lines
        .iter()
        .map(|line| line.unit_price * clamp_quantity(line.qty))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Gender;

    fn line(name: &str, amount: i64) -> ConsumableLine {
        ConsumableLine {
            name: name.to_string(),
            amount,
        }
    }

    fn table(entries: &[(&str, i64)]) -> HashMap<String, i64> {
        entries
            .iter()
            .map(|(name, price)| (name.to_string(), *price))
            .collect()
    }

    #[test]
    fn test_consumables_total_basic() {
        let total = consumables_total(&[line("Botox", 2)], &table(&[("Botox", 500_000)]));
        assert_eq!(total, 1_000_000);
    }

    #[test]
    fn test_consumables_total_multiple_lines() {
        let prices = table(&[("Botox", 500_000), ("Filler", 2_000_000)]);
        let total = consumables_total(&[line("Botox", 3), line("Filler", 1)], &prices);
        assert_eq!(total, 3_500_000);
    }

    #[test]
    fn test_unknown_item_contributes_zero() {
        let prices = table(&[("Botox", 500_000)]);
        let total = consumables_total(&[line("Botox", 1), line("Deleted Item", 4)], &prices);
        assert_eq!(total, 500_000);
    }

    #[test]
    fn test_quantity_clamped_to_one() {
        let prices = table(&[("Botox", 500_000)]);
        assert_eq!(consumables_total(&[line("Botox", 0)], &prices), 500_000);
        assert_eq!(consumables_total(&[line("Botox", -5)], &prices), 500_000);
    }

    #[test]
    fn test_empty_selection_is_zero() {
        assert_eq!(consumables_total(&[], &table(&[])), 0);
        assert_eq!(laser_total(&[]), 0);
        assert_eq!(product_sale_total(&[]), 0);
    }

    #[test]
    fn test_laser_total_uses_frozen_prices() {
        let selections = vec![
            LaserAreaSelection {
                area: "Underarm".to_string(),
                gender: Gender::Female,
                price: 800_000,
            },
            LaserAreaSelection {
                area: "Full Leg".to_string(),
                gender: Gender::Female,
                price: 3_200_000,
            },
        ];
        assert_eq!(laser_total(&selections), 4_000_000);
    }

    #[test]
    fn test_product_sale_total() {
        let lines = vec![
            ProductSaleLine {
                product_id: "sunscreen".to_string(),
                qty: 2,
                unit_price: 450_000,
            },
            ProductSaleLine {
                product_id: "serum".to_string(),
                qty: 0, // clamped to 1
                unit_price: 1_200_000,
            },
        ];
        assert_eq!(product_sale_total(&lines), 2_100_000);
    }
}
