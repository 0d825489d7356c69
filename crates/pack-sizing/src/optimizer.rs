use crate::{PackBreakdown, PackSize};

/// Computes the packs to ship for `order_quantity`.
///
/// The result never ships fewer items than ordered, ships as few items as
/// possible, and among equally small shipments uses the fewest packs. When
/// several breakdowns tie on both, the one found first while trying pack sizes
/// in ascending order wins, so results are reproducible.
///
/// `pack_sizes` may come in any order; duplicates are ignored.
///
/// # Panics
///
/// Panics if `pack_sizes` is empty, or if the search table for `order_quantity`
/// plus the largest pack size cannot be allocated. Callers cap both the quantity
/// and the pack sizes before getting here.
pub fn optimize(order_quantity: u64, pack_sizes: &[PackSize]) -> PackBreakdown {
    assert!(!pack_sizes.is_empty(), "optimizing requires at least one pack size");

    let mut sizes = pack_sizes.to_vec();
    sizes.sort_unstable();
    sizes.dedup();

    if order_quantity == 0 {
        return PackBreakdown::empty(order_quantity);
    }

    let smallest = sizes[0];

    if order_quantity < smallest.get() {
        return PackBreakdown::from_packs(order_quantity, [smallest]);
    }

    let table = Table::build(order_quantity, &sizes);
    let total = table.best_total(order_quantity);

    PackBreakdown::from_packs(order_quantity, table.packs_for(total, &sizes))
}

/// Best known way to reach one exact total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    items: u64,
    packs: u64,
    /// Index of the pack size added last. The rest of the breakdown is the
    /// entry at `total - sizes[last]`.
    last: usize,
}

impl Entry {
    fn is_better_than(&self, other: &Entry) -> bool {
        self.items < other.items || (self.items == other.items && self.packs < other.packs)
    }
}

/// `entries[t]` holds the best breakdown shipping exactly `t` items, or `None`
/// when no combination of pack sizes adds up to `t`.
struct Table {
    entries: Vec<Option<Entry>>,
}

impl Table {
    fn build(order_quantity: u64, sizes: &[PackSize]) -> Self {
        let largest = sizes[sizes.len() - 1].get();

        // An optimal shipment never exceeds the order by a full largest pack.
        let bound = order_quantity
            .checked_add(largest)
            .and_then(|bound| usize::try_from(bound).ok())
            .expect("order quantity is too large to search");

        tracing::trace!(order_quantity, bound, pack_sizes = sizes.len(), "building pack table");

        // A failed reservation panics instead of aborting the process.
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(bound + 1)
            .expect("pack table does not fit in memory");
        entries.resize(bound + 1, None);

        entries[0] = Some(Entry {
            items: 0,
            packs: 0,
            last: 0,
        });

        for total in 1..=bound {
            let mut best: Option<Entry> = None;

            for (index, size) in sizes.iter().enumerate() {
                let size = size.get() as usize;

                if size > total {
                    break;
                }

                let Some(previous) = entries[total - size] else {
                    continue;
                };

                let candidate = Entry {
                    items: previous.items + size as u64,
                    packs: previous.packs + 1,
                    last: index,
                };

                match best {
                    Some(current) if !candidate.is_better_than(&current) => {}
                    _ => best = Some(candidate),
                }
            }

            entries[total] = best;
        }

        Self { entries }
    }

    /// First reachable total at or above the order with the fewest items.
    fn best_total(&self, order_quantity: u64) -> usize {
        let mut best: Option<(usize, Entry)> = None;

        for (total, entry) in self.entries.iter().enumerate().skip(order_quantity as usize) {
            let Some(entry) = entry else {
                continue;
            };

            match best {
                Some((_, current)) if entry.items >= current.items => {}
                _ => best = Some((total, *entry)),
            }
        }

        // Some multiple of the largest pack always lands inside the searched range.
        best.map(|(total, _)| total)
            .expect("a reachable total exists within one largest pack of the order")
    }

    fn packs_for(&self, mut total: usize, sizes: &[PackSize]) -> Vec<PackSize> {
        let mut packs = Vec::new();

        while total > 0 {
            let entry = self.entries[total].expect("every step back lands on a reachable total");

            let size = sizes[entry.last];
            packs.push(size);
            total -= size.get() as usize;
        }

        packs
    }
}
