//! Candidate shortlist for exact resolution.

use crate::seeds::SeedIndex;
use privy_core::{Cell, Seed, SeedId};
use smallvec::SmallVec;

/// Straight-line nearest seeds considered per exact query by default.
pub const DEFAULT_SHORTLIST_K: usize = 5;

/// Inline capacity of a [`Shortlist`]: `k` nearest plus up to four
/// neighbour ids.
pub type Shortlist<'s> = SmallVec<[&'s Seed; 9]>;

/// Candidate seeds for an exact query at `point`.
///
/// The `k` seeds nearest to `point` by straight-line distance come first,
/// closest first, ties in seed order. Seeds named in `neighbour_ids` and
/// not already present follow in the order given. Ids not in the index
/// are ignored. No seed appears twice.
pub fn shortlist<'s>(
    point: Cell,
    seeds: &'s SeedIndex,
    neighbour_ids: &[SeedId],
    k: usize,
) -> Shortlist<'s> {
    let mut ranked: Vec<(i64, usize)> = seeds
        .iter()
        .enumerate()
        .map(|(pos, s)| (point.euclidean_sq(s.cell), pos))
        .collect();
    let k = k.min(ranked.len());
    if k < ranked.len() {
        ranked.select_nth_unstable(k);
        ranked.truncate(k);
    }
    ranked.sort_unstable();

    let all = seeds.as_slice();
    let mut out: Shortlist<'s> = ranked.iter().map(|&(_, pos)| &all[pos]).collect();
    for id in neighbour_ids {
        if let Some(seed) = seeds.get(*id) {
            if !out.iter().any(|s| s.id == seed.id) {
                out.push(seed);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use privy_space::Grid;

    fn index(seeds: &[Seed]) -> SeedIndex {
        let grid = Grid::filled(10, 10, 0).unwrap();
        SeedIndex::from_seeds(seeds, &grid).unwrap()
    }

    fn ids(list: &Shortlist<'_>) -> Vec<u32> {
        list.iter().map(|s| s.id.0).collect()
    }

    #[test]
    fn nearest_first() {
        let seeds = index(&[
            Seed::new(1, (0, 0)),
            Seed::new(2, (9, 9)),
            Seed::new(3, (4, 4)),
        ]);
        let list = shortlist(Cell::new(5, 5), &seeds, &[], 2);
        assert_eq!(ids(&list), vec![3, 2]);
    }

    #[test]
    fn ties_keep_seed_order() {
        let seeds = index(&[
            Seed::new(8, (0, 4)),
            Seed::new(2, (4, 0)),
            Seed::new(5, (4, 8)),
        ]);
        // (4, 4) is 4 away from each of the three.
        let list = shortlist(Cell::new(4, 4), &seeds, &[], 2);
        assert_eq!(ids(&list), vec![8, 2]);
    }

    #[test]
    fn neighbour_ids_appended_without_duplicates() {
        let seeds = index(&[
            Seed::new(1, (0, 0)),
            Seed::new(2, (0, 1)),
            Seed::new(3, (9, 9)),
        ]);
        let list = shortlist(Cell::new(0, 2), &seeds, &[SeedId(3), SeedId(2), SeedId(3)], 1);
        assert_eq!(ids(&list), vec![2, 3]);
    }

    #[test]
    fn unknown_neighbour_id_ignored() {
        let seeds = index(&[Seed::new(1, (0, 0))]);
        let list = shortlist(Cell::new(3, 3), &seeds, &[SeedId(99)], 5);
        assert_eq!(ids(&list), vec![1]);
    }

    #[test]
    fn k_larger_than_seed_count() {
        let seeds = index(&[Seed::new(1, (0, 0)), Seed::new(2, (5, 5))]);
        let list = shortlist(Cell::new(5, 4), &seeds, &[], DEFAULT_SHORTLIST_K);
        assert_eq!(ids(&list), vec![2, 1]);
    }
}
