use supdem_core::models::LinearCurve;

/// Quantities supplied and demanded at a ladder of prices
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceTable {
    /// One row per price, in ascending order
    pub rows: Vec<PriceRow>,
}

/// A single price and the rounded quantities at it
///
/// A quantity that is negative (or not a number) cannot be traded and is `None`,
/// displayed as "—".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceRow {
    /// The price
    pub price: f64,
    /// The rounded quantity supplied at this price
    pub supplied: Option<i64>,
    /// The rounded quantity demanded at this price
    pub demanded: Option<i64>,
}

impl PriceTable {
    /// Builds the table for prices `step, 2 * step, ...` up to and including `max_price`
    pub fn new(supply: &LinearCurve, demand: &LinearCurve, step: f64, max_price: f64) -> Self {
        let count = if step > 0.0 {
            (max_price / step + 1e-9).floor().max(0.0) as usize
        } else {
            0
        };
        let rows = (1..=count)
            .map(|i| {
                let price = step * i as f64;
                PriceRow {
                    price,
                    supplied: tradeable(supply.quantity_at_price(price)),
                    demanded: tradeable(demand.quantity_at_price(price)),
                }
            })
            .collect();
        Self { rows }
    }
}

fn tradeable(quantity: f64) -> Option<i64> {
    let rounded = quantity.round();
    (rounded.is_finite() && rounded >= 0.0).then_some(rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use supdem_core::models::{Preset, Side};

    #[test]
    fn test_unit_elastic_table() {
        let supply = Preset::UnitElastic.builtin(Side::Supply);
        let demand = Preset::UnitElastic.builtin(Side::Demand);
        let table = PriceTable::new(&supply, &demand, 50.0, 500.0);

        assert_eq!(table.rows.len(), 10);
        assert_eq!(table.rows[0].price, 50.0);
        assert_eq!(table.rows[9].price, 500.0);

        // supply: q = 40 + (p - 80) / 2, demand: q = 40 - (p - 320) / 2
        assert_eq!(table.rows[0].supplied, Some(25));
        assert_eq!(table.rows[0].demanded, Some(175));
        assert_eq!(table.rows[3].supplied, Some(100));
        assert_eq!(table.rows[3].demanded, Some(100));
        assert_eq!(table.rows[9].supplied, Some(250));
        assert_eq!(table.rows[9].demanded, None);
    }

    #[test]
    fn test_negative_supply_is_hidden() {
        let supply = Preset::Inelastic.builtin(Side::Supply);
        let demand = Preset::Inelastic.builtin(Side::Demand);
        let table = PriceTable::new(&supply, &demand, 100.0, 500.0);
        assert_eq!(table.rows.len(), 5);
        // the inelastic supply reaches quantity 0 only at a price of -550
        assert!(table.rows.iter().all(|row| row.supplied.is_some()));
        // the inelastic demand reaches quantity 0 at a price of 950
        assert!(table.rows.iter().all(|row| row.demanded.is_some()));

        let supply = Preset::Elastic.builtin(Side::Supply);
        let table = PriceTable::new(&supply, &demand, 50.0, 500.0);
        // the elastic supply crosses quantity 0 at a price of 187.5
        assert_eq!(table.rows[2].supplied, None);
        assert_eq!(table.rows[3].supplied, Some(100));
    }

    #[test]
    fn test_degenerate_step() {
        let supply = Preset::UnitElastic.builtin(Side::Supply);
        let demand = Preset::UnitElastic.builtin(Side::Demand);
        assert!(PriceTable::new(&supply, &demand, 0.0, 500.0).rows.is_empty());
    }
}
