//! Fixed-capacity bump arena backing all pixel storage.
//!
//! The arena is sized once at startup and zeroed at construction. Grants
//! advance a monotonic offset and are never released individually; the
//! arena's lifetime bounds every sub-allocation. Handles are arena-relative
//! [`Region`]s rather than raw addresses so every access stays
//! bounds-checked. Storage is kept as 32-bit cells so pixel views never
//! fight the allocator over alignment.

use thiserror::Error;

/// Fixed bookkeeping prefix paid by every grant: the payload byte length
/// plus an allocated marker, one cell each.
const HEADER_CELLS: usize = 2;
pub const HEADER_BYTES: usize = HEADER_CELLS * 4;

/// Arena allocation failure. Everything is pre-allocated once at startup,
/// so callers treat this as a fatal startup condition; there is no recovery
/// path and nothing is retried.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("arena exhausted: requested {requested} bytes with {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
}

/// Handle to a granted run of 32-bit cells. Offsets are relative to the
/// arena base, never raw addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    start: usize,
    cells: usize,
}

impl Region {
    /// Number of 32-bit cells in the region.
    pub fn len(&self) -> usize {
        self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells == 0
    }

    fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.cells
    }
}

/// One contiguous pre-sized pool with a bump pointer.
#[derive(Debug)]
pub struct Arena {
    memory: Vec<u32>,
    offset: usize,
}

impl Arena {
    /// Reserve `capacity` bytes, zero-initialized once here (not per grant).
    pub fn new(capacity: usize) -> Self {
        Self {
            memory: vec![0_u32; capacity / 4],
            offset: 0,
        }
    }

    /// Grant a run of `count` 32-bit cells.
    ///
    /// The offset only ever moves forward; no compaction, no reuse. Distinct
    /// grants never alias because each starts past the previous grant's end.
    pub fn alloc_cells(&mut self, count: usize) -> Result<Region, ArenaError> {
        let needed = count + HEADER_CELLS;
        if needed > self.memory.len() - self.offset {
            return Err(ArenaError::Exhausted {
                requested: count * 4,
                remaining: self.remaining(),
            });
        }

        self.memory[self.offset] = (count * 4) as u32;
        self.memory[self.offset + 1] = 1; // allocated marker

        let region = Region {
            start: self.offset + HEADER_CELLS,
            cells: count,
        };
        self.offset += needed;
        Ok(region)
    }

    /// Shared view of a region's cells.
    pub fn cells(&self, region: Region) -> &[u32] {
        &self.memory[region.range()]
    }

    /// Exclusive view of a region's cells.
    pub fn cells_mut(&mut self, region: Region) -> &mut [u32] {
        &mut self.memory[region.range()]
    }

    /// Simultaneous exclusive/shared views of two distinct regions, for
    /// buffer-to-buffer copies. Safe because grants never overlap.
    pub fn cells_pair_mut(&mut self, dst: Region, src: Region) -> (&mut [u32], &[u32]) {
        debug_assert!(
            dst.range().end <= src.range().start || src.range().end <= dst.range().start,
            "regions must not overlap"
        );
        if dst.start < src.start {
            let (lo, hi) = self.memory.split_at_mut(src.start);
            (&mut lo[dst.range()], &hi[..src.cells])
        } else {
            let (lo, hi) = self.memory.split_at_mut(dst.start);
            (&mut hi[..dst.cells], &lo[src.range()])
        }
    }

    /// Bytes granted so far, headers included.
    pub fn used(&self) -> usize {
        self.offset * 4
    }

    pub fn capacity(&self) -> usize {
        self.memory.len() * 4
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.used()
    }
}
