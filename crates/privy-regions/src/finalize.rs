//! Final seed stamp.
//!
//! Every seed writes its own id into its own cell. The writes target
//! pairwise distinct cells, so each one holds a unique `&mut` into the
//! region buffer and they run as independent tasks joined before return.

use crate::seeds::SeedIndex;
use indexmap::IndexMap;
use privy_space::{Grid, RegionGrid};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

macro_rules! maybe_par_into_iter {
    ($v:expr) => {{
        #[cfg(feature = "parallel")]
        {
            $v.into_par_iter()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $v.into_iter()
        }
    }};
}

/// Stamp each seed's id into its cell. Returns the number of cells written.
pub(crate) fn finalize(regions: &mut RegionGrid, grid: &Grid, seeds: &SeedIndex) -> usize {
    let owners: IndexMap<usize, i32> = seeds
        .iter()
        .filter_map(|s| grid.index(s.cell).map(|idx| (idx, s.id.to_raw())))
        .collect();

    let writes: Vec<(&mut i32, i32)> = regions
        .as_mut_slice()
        .iter_mut()
        .enumerate()
        .filter_map(|(idx, slot)| owners.get(&idx).map(|&raw| (slot, raw)))
        .collect();
    let count = writes.len();

    maybe_par_into_iter!(writes).for_each(|(slot, raw)| *slot = raw);
    count
}
