//! Image buffers over arena or owned storage.
//!
//! A buffer is a `(width, height)` grid of packed ARGB cells. Storage is
//! either a [`Region`] borrowed from the arena (the arena owns the bytes,
//! dropping the buffer frees nothing) or an owned `Vec<u32>`. One value
//! never switches between the two contracts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::arena::{Arena, ArenaError, Region};

/// Width and height of a pixel grid. Zero-area bounds mark the degraded
/// "empty" buffer a failed resource load falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Cell count, `width * height`.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

/// Why a texture resource failed to decode. Load failures never escape
/// [`ImageBuffer::load`]; this type exists for the log line.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("bad texture bounds {width}x{height}")]
    BadBounds { width: i32, height: i32 },
    #[error(transparent)]
    Arena(#[from] ArenaError),
}

/// The two storage contracts. Kept private so a buffer cannot be flipped
/// from one to the other after construction.
#[derive(Debug)]
enum PixelStore {
    /// Arena-backed; the arena owns the cells for the whole session.
    Borrowed(Region),
    /// Buffer-owned; dropped with the buffer.
    Owned(Vec<u32>),
}

/// A pixel grid of exactly `width * height` packed ARGB cells.
#[derive(Debug)]
pub struct ImageBuffer {
    pub bounds: Bounds,
    store: PixelStore,
}

impl ImageBuffer {
    /// Zero-filled arena-backed buffer. Arena memory is zeroed at
    /// construction and grants are never reused, so a fresh region is
    /// already clear.
    pub fn create(bounds: Bounds, arena: &mut Arena) -> Result<Self, ArenaError> {
        let region = arena.alloc_cells(bounds.area())?;
        Ok(Self {
            bounds,
            store: PixelStore::Borrowed(region),
        })
    }

    /// Zero-filled buffer with its own storage, for destinations that live
    /// outside the arena.
    pub fn create_owned(bounds: Bounds) -> Self {
        Self {
            bounds,
            store: PixelStore::Owned(vec![0_u32; bounds.area()]),
        }
    }

    /// The zero-area degraded buffer.
    pub fn empty() -> Self {
        Self {
            bounds: Bounds::default(),
            store: PixelStore::Owned(Vec::new()),
        }
    }

    /// Load a texture resource into arena storage.
    ///
    /// Format: `i32 width, i32 height`, then `width * height` packed ARGB
    /// cells, row-major, no padding. The path is tried as given, then
    /// relative to the running executable's directory. Failure is not
    /// fatal: it is logged and an empty buffer comes back, leaving the
    /// scene to run with degraded visuals.
    pub fn load(path: impl AsRef<Path>, arena: &mut Arena) -> Self {
        let path = path.as_ref();
        match Self::try_load(path, arena) {
            Ok(buffer) => {
                log::info!(
                    "loaded texture {} ({}x{})",
                    path.display(),
                    buffer.bounds.width,
                    buffer.bounds.height
                );
                buffer
            }
            Err(err) => {
                log::warn!("could not load texture {}: {}", path.display(), err);
                Self::empty()
            }
        }
    }

    fn try_load(path: &Path, arena: &mut Arena) -> Result<Self, TextureError> {
        let mut file = open_with_fallback(path)?;

        let mut header = [0_u8; 8];
        file.read_exact(&mut header)?;
        let width = i32::from_le_bytes(header[0..4].try_into().unwrap());
        let height = i32::from_le_bytes(header[4..8].try_into().unwrap());
        if width <= 0 || height <= 0 {
            return Err(TextureError::BadBounds { width, height });
        }

        let bounds = Bounds::new(width as u32, height as u32);
        let region = arena.alloc_cells(bounds.area())?;
        file.read_exact(bytemuck::cast_slice_mut(arena.cells_mut(region)))?;

        Ok(Self {
            bounds,
            store: PixelStore::Borrowed(region),
        })
    }

    /// Shared view of the cells.
    pub fn pixels<'a>(&'a self, arena: &'a Arena) -> &'a [u32] {
        match &self.store {
            PixelStore::Borrowed(region) => arena.cells(*region),
            PixelStore::Owned(cells) => cells,
        }
    }

    /// Exclusive view of the cells.
    pub fn pixels_mut<'a>(&'a mut self, arena: &'a mut Arena) -> &'a mut [u32] {
        match &mut self.store {
            PixelStore::Borrowed(region) => arena.cells_mut(*region),
            PixelStore::Owned(cells) => cells,
        }
    }

    /// Exclusive view of this buffer together with a shared view of another,
    /// regardless of which storage contract each carries.
    pub fn pixels_pair_mut<'a>(
        &'a mut self,
        src: &'a ImageBuffer,
        arena: &'a mut Arena,
    ) -> (&'a mut [u32], &'a [u32]) {
        match (&mut self.store, &src.store) {
            (PixelStore::Borrowed(d), PixelStore::Borrowed(s)) => arena.cells_pair_mut(*d, *s),
            (PixelStore::Borrowed(d), PixelStore::Owned(s)) => (arena.cells_mut(*d), s.as_slice()),
            (PixelStore::Owned(d), PixelStore::Borrowed(s)) => (d.as_mut_slice(), arena.cells(*s)),
            (PixelStore::Owned(d), PixelStore::Owned(s)) => (d.as_mut_slice(), s.as_slice()),
        }
    }

    /// Zero every cell.
    pub fn clear(&mut self, arena: &mut Arena) {
        self.pixels_mut(arena).fill(0);
    }

    /// Row-wise circular copy from `src`, starting at source row
    /// `row_offset % src.height` and wrapping back to source row 0 once the
    /// source runs out. Drives the scrolling background.
    ///
    /// The destination must not exceed the source on either axis; a
    /// mismatch is logged and the copy skipped, leaving prior contents.
    pub fn copy_rows(&mut self, arena: &mut Arena, src: &ImageBuffer, row_offset: usize) {
        if self.bounds.width > src.bounds.width || self.bounds.height > src.bounds.height {
            log::warn!(
                "cannot copy {}x{} into larger {}x{}",
                src.bounds.width,
                src.bounds.height,
                self.bounds.width,
                self.bounds.height
            );
            return;
        }
        if self.bounds.is_empty() {
            return;
        }

        let dw = self.bounds.width as usize;
        let dh = self.bounds.height as usize;
        let sw = src.bounds.width as usize;
        let sh = src.bounds.height as usize;

        let start = row_offset % sh;
        let straight = dh.min(sh - start);

        let (dst_px, src_px) = self.pixels_pair_mut(src, arena);
        for row in 0..straight {
            let d = row * dw;
            let s = (start + row) * sw;
            dst_px[d..d + dw].copy_from_slice(&src_px[s..s + dw]);
        }
        // Wrap: the remaining destination rows come from source row 0 on
        for row in straight..dh {
            let d = row * dw;
            let s = (row - straight) * sw;
            dst_px[d..d + dw].copy_from_slice(&src_px[s..s + dw]);
        }
    }
}

fn open_with_fallback(path: &Path) -> std::io::Result<File> {
    match File::open(path) {
        Ok(file) => Ok(file),
        Err(err) => {
            // Keep the whole given path so res/foo.graw lands under the
            // executable's res/ directory, not beside the executable
            let Some(dir) = std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
            else {
                return Err(err);
            };
            let retry = dir.join(path);
            log::info!("retrying texture load from {}", retry.display());
            File::open(retry)
        }
    }
}
