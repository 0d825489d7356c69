#![allow(unused_crate_dependencies)]

use std::thread;

use pack_sizing::{optimize, PackBreakdown, PackSize, PackSizeRegistry};

fn sizes(items: &[u64]) -> Vec<PackSize> {
    items.iter().map(|&items| PackSize::new(items).unwrap()).collect()
}

/// Smallest (total items, pack count) over every combination shipping at least `quantity`.
fn exhaustive_best(quantity: u64, sizes: &[u64]) -> (u64, u64) {
    fn walk(sizes: &[u64], limit: u64, quantity: u64, items: u64, packs: u64, best: &mut Option<(u64, u64)>) {
        let Some((&size, rest)) = sizes.split_first() else {
            if items >= quantity && best.map_or(true, |best| (items, packs) < best) {
                *best = Some((items, packs));
            }
            return;
        };

        let mut count = 0;
        while items + count * size <= limit {
            walk(rest, limit, quantity, items + count * size, packs + count, best);
            count += 1;
        }
    }

    let limit = quantity + sizes.iter().max().unwrap();
    let mut best = None;
    walk(sizes, limit, quantity, 0, 0, &mut best);

    best.unwrap()
}

fn assert_well_formed(breakdown: &PackBreakdown, available: &[PackSize]) {
    let shipped: u64 = breakdown.packs().iter().map(|(size, count)| size.get() * count).sum();

    assert_eq!(shipped, breakdown.total_items());
    assert!(breakdown.total_items() >= breakdown.order_quantity());

    for (size, count) in breakdown.packs() {
        assert!(available.contains(size), "{size} is not an available pack size");
        assert!(*count > 0);
    }
}

#[test]
fn matches_exhaustive_search() {
    let sets: &[&[u64]] = &[&[3, 5, 7], &[4, 6, 9], &[2, 11], &[23, 31, 53], &[5, 12, 25, 40], &[7]];

    for set in sets {
        let available = sizes(set);

        for quantity in 1..=120 {
            let breakdown = optimize(quantity, &available);
            assert_well_formed(&breakdown, &available);

            let expected = exhaustive_best(quantity, set);
            let actual = (breakdown.total_items(), breakdown.total_packs());

            assert_eq!(expected, actual, "quantity {quantity} with pack sizes {set:?}");
        }
    }
}

#[test]
fn default_sizes_never_under_ship() {
    let registry = PackSizeRegistry::default();
    let available = registry.sizes();

    for quantity in (0..=20_000).step_by(97) {
        let breakdown = optimize(quantity, &available);

        assert_well_formed(&breakdown, &available);
        assert!(breakdown.overshoot() < 250, "overshoot for {quantity}");
    }
}

#[test]
fn zero_quantity_is_always_empty() {
    let sets: [&[u64]; 3] = [&[1], &[250, 500], &[23, 31, 53]];

    for set in sets {
        let breakdown = optimize(0, &sizes(set));

        assert!(breakdown.packs().is_empty());
        assert_eq!(0, breakdown.total_items());
    }
}

#[test]
fn update_is_atomic_for_readers() {
    let registry = PackSizeRegistry::default();
    let from = PackSize::new(250).unwrap();
    let to = PackSize::new(300).unwrap();

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..2_000 {
                registry.update_size(from, to).unwrap();
                registry.update_size(to, from).unwrap();
            }
        });

        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..2_000 {
                    let snapshot = registry.sizes();

                    assert!(snapshot.windows(2).all(|pair| pair[0] < pair[1]));
                    assert_eq!(5, snapshot.len());
                    assert!(snapshot.contains(&from) ^ snapshot.contains(&to));
                }
            });
        }
    });

    assert_eq!(sizes(&[250, 500, 1000, 2000, 5000]), registry.sizes());
}

#[test]
fn concurrent_mutations_keep_the_set_ordered() {
    let registry = PackSizeRegistry::default();

    thread::scope(|scope| {
        for worker in 0..4u64 {
            let registry = &registry;

            scope.spawn(move || {
                for step in 1..=500u64 {
                    let size = PackSize::new(step * 4 + worker).unwrap();

                    registry.add_size(size);
                    registry.add_size(size);

                    if step % 3 == 0 {
                        registry.remove_size(size);
                    }
                }
            });
        }
    });

    let snapshot = registry.sizes();
    assert!(snapshot.windows(2).all(|pair| pair[0] < pair[1]));
}
