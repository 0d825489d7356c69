use std::collections::BTreeMap;

use crate::PackSize;

/// The packs chosen to fulfil one order.
///
/// Only sizes with a positive count appear in [`packs`](Self::packs). For a
/// zero quantity the breakdown is empty and ships nothing; otherwise
/// `total_items >= order_quantity`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackBreakdown {
    order_quantity: u64,
    packs: BTreeMap<PackSize, u64>,
    total_items: u64,
}

impl PackBreakdown {
    pub(crate) fn empty(order_quantity: u64) -> Self {
        Self {
            order_quantity,
            packs: BTreeMap::new(),
            total_items: 0,
        }
    }

    pub(crate) fn from_packs(order_quantity: u64, packs: impl IntoIterator<Item = PackSize>) -> Self {
        let mut breakdown = Self::empty(order_quantity);

        for size in packs {
            *breakdown.packs.entry(size).or_default() += 1;
            breakdown.total_items += size.get();
        }

        breakdown
    }

    /// The quantity the customer asked for.
    pub fn order_quantity(&self) -> u64 {
        self.order_quantity
    }

    /// Pack size to number of packs of that size, ascending by size.
    pub fn packs(&self) -> &BTreeMap<PackSize, u64> {
        &self.packs
    }

    /// How many packs of `size` are shipped.
    pub fn count(&self, size: PackSize) -> u64 {
        self.packs.get(&size).copied().unwrap_or_default()
    }

    /// Items actually shipped.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Packs actually shipped.
    pub fn total_packs(&self) -> u64 {
        self.packs.values().sum()
    }

    /// Items shipped beyond the order quantity.
    pub fn overshoot(&self) -> u64 {
        self.total_items.saturating_sub(self.order_quantity)
    }
}
