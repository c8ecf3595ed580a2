use std::collections::VecDeque;

use lane_frame::{Frame, PixelKey, GRID_CELLS};
use tracing::trace;

use crate::blob::Blob;

/// Threshold used when none is configured.
pub const DEFAULT_THRESHOLD: u16 = 1;

/// Blob finding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobConfig {
    /// Minimum magnitude for a pixel to join a blob.
    pub threshold: u16,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl BlobConfig {
    pub fn with_threshold(threshold: u16) -> Self {
        Self { threshold }
    }

    /// Find the blobs of `frame` at this threshold.
    pub fn find(&self, frame: &Frame) -> Vec<Blob> {
        find_blobs(frame, self.threshold)
    }
}

const NEIGHBOUR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Partition the stored pixels of `frame` with magnitude `>= threshold` into
/// 8-connected blobs.
///
/// Seeds are taken in ascending key order, so blobs come out ordered by
/// their smallest key. Traversal is breadth-first and iterative. A pixel is
/// claimed when it is first discovered, so it is queued at most once.
pub fn find_blobs(frame: &Frame, threshold: u16) -> Vec<Blob> {
    // Qualifying pixels that no blob has claimed yet.
    let mut pending = vec![false; GRID_CELLS];
    for (key, magnitude) in frame.pixels() {
        if magnitude >= threshold {
            pending[key.index()] = true;
        }
    }

    let mut blobs = Vec::new();
    let mut queue = VecDeque::new();

    for (seed, _) in frame.pixels() {
        if !pending[seed.index()] {
            continue;
        }
        pending[seed.index()] = false;
        queue.push_back(seed);

        let mut keys = Vec::new();
        while let Some(key) = queue.pop_front() {
            keys.push(key);
            for neighbour in neighbours(key) {
                if pending[neighbour.index()] {
                    pending[neighbour.index()] = false;
                    queue.push_back(neighbour);
                }
            }
        }
        blobs.push(Blob::new(keys));
    }

    trace!(
        channel = frame.channel(),
        timestamp = frame.timestamp(),
        threshold,
        blobs = blobs.len(),
        "blob search complete"
    );
    blobs
}

/// Grid neighbours of `key`, without wrapping at the edges.
fn neighbours(key: PixelKey) -> impl Iterator<Item = PixelKey> {
    let (x, y) = (key.x(), key.y());
    NEIGHBOUR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
        Some(PixelKey::new(
            x.checked_add_signed(dx)?,
            y.checked_add_signed(dy)?,
        ))
    })
}
