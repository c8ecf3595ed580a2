use lane_frame::{Frame, PixelKey, GRID_SIDE};

const EDGE: u8 = (GRID_SIDE - 1) as u8;

/// One connected component of a frame.
///
/// A blob only holds keys into the frame it was found in. Keys are in
/// discovery order, starting with the blob's smallest key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    keys: Vec<PixelKey>,
}

impl Blob {
    pub(crate) fn new(keys: Vec<PixelKey>) -> Self {
        debug_assert!(!keys.is_empty());
        Self { keys }
    }

    pub fn keys(&self) -> &[PixelKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: PixelKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PixelKey> {
        self.keys.iter()
    }

    /// Summarize this blob against the frame it was found in.
    pub fn stats(&self, frame: &Frame) -> BlobStats {
        BlobStats::from_keys(&self.keys, frame)
    }
}

impl<'a> IntoIterator for &'a Blob {
    type Item = &'a PixelKey;
    type IntoIter = std::slice::Iter<'a, PixelKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Geometry and charge summary of a blob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobStats {
    /// Number of pixels.
    pub size: usize,
    /// Sum of magnitudes.
    pub volume: u64,
    /// Largest single magnitude.
    pub height: u16,
    pub x_min: u8,
    pub x_max: u8,
    pub y_min: u8,
    pub y_max: u8,
    /// Magnitude-weighted mean position. Falls back to the plain mean when
    /// every magnitude is zero.
    pub centroid: (f64, f64),
}

impl BlobStats {
    fn from_keys(keys: &[PixelKey], frame: &Frame) -> Self {
        let mut stats = Self {
            size: keys.len(),
            volume: 0,
            height: 0,
            x_min: EDGE,
            x_max: 0,
            y_min: EDGE,
            y_max: 0,
            centroid: (0.0, 0.0),
        };

        let (mut wx, mut wy) = (0.0f64, 0.0f64);
        let (mut sx, mut sy) = (0.0f64, 0.0f64);
        for &key in keys {
            let magnitude = frame.pixel(key).unwrap_or(0);
            let (x, y) = (key.x(), key.y());

            stats.volume += u64::from(magnitude);
            stats.height = stats.height.max(magnitude);
            stats.x_min = stats.x_min.min(x);
            stats.x_max = stats.x_max.max(x);
            stats.y_min = stats.y_min.min(y);
            stats.y_max = stats.y_max.max(y);

            wx += f64::from(x) * f64::from(magnitude);
            wy += f64::from(y) * f64::from(magnitude);
            sx += f64::from(x);
            sy += f64::from(y);
        }

        stats.centroid = if stats.volume > 0 {
            let volume = stats.volume as f64;
            (wx / volume, wy / volume)
        } else if stats.size > 0 {
            let size = stats.size as f64;
            (sx / size, sy / size)
        } else {
            (0.0, 0.0)
        };
        stats
    }

    /// Bounding box width in pixels.
    pub fn width(&self) -> u16 {
        u16::from(self.x_max.saturating_sub(self.x_min)) + 1
    }

    /// Bounding box height in pixels.
    pub fn depth(&self) -> u16 {
        u16::from(self.y_max.saturating_sub(self.y_min)) + 1
    }

    /// True if any pixel lies on the outer ring of the grid, so the track
    /// may continue off the sensor.
    pub fn touches_edge(&self) -> bool {
        self.x_min == 0 || self.y_min == 0 || self.x_max == EDGE || self.y_max == EDGE
    }

    /// Number of positions this bounding box could be shifted to without
    /// touching the edge. Zero when the box spans a full axis.
    pub fn hitting_area(&self) -> u32 {
        let span = |min: u8, max: u8| 254 - i32::from(max) + i32::from(min);
        let (sx, sy) = (span(self.x_min, self.x_max), span(self.y_min, self.y_max));
        if sx <= 0 || sy <= 0 {
            return 0;
        }
        (sx * sy) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find_blobs;

    fn single_blob(pixels: &[(u8, u8, u16)]) -> (Frame, Blob) {
        let mut frame = Frame::new(1, 0, 0);
        for &(x, y, v) in pixels {
            frame.set_pixel(PixelKey::new(x, y), v);
        }
        let mut blobs = find_blobs(&frame, 1);
        assert_eq!(blobs.len(), 1);
        let blob = blobs.remove(0);
        (frame, blob)
    }

    #[test]
    fn stats_of_small_blob() {
        let (frame, blob) = single_blob(&[(10, 20, 2), (11, 20, 6), (11, 21, 2)]);
        let stats = blob.stats(&frame);

        assert_eq!(stats.size, 3);
        assert_eq!(stats.volume, 10);
        assert_eq!(stats.height, 6);
        assert_eq!((stats.x_min, stats.x_max), (10, 11));
        assert_eq!((stats.y_min, stats.y_max), (20, 21));
        assert_eq!(stats.width(), 2);
        assert_eq!(stats.depth(), 2);
        assert!(!stats.touches_edge());

        let (cx, cy) = stats.centroid;
        assert!((cx - 10.8).abs() < 1e-9);
        assert!((cy - 20.2).abs() < 1e-9);
    }

    #[test]
    fn edge_detection() {
        let (frame, blob) = single_blob(&[(0, 50, 1)]);
        assert!(blob.stats(&frame).touches_edge());

        let (frame, blob) = single_blob(&[(80, 255, 1)]);
        assert!(blob.stats(&frame).touches_edge());

        let (frame, blob) = single_blob(&[(1, 1, 1)]);
        assert!(!blob.stats(&frame).touches_edge());
    }

    #[test]
    fn hitting_area_of_single_pixel() {
        let (frame, blob) = single_blob(&[(100, 100, 3)]);
        assert_eq!(blob.stats(&frame).hitting_area(), 254 * 254);
    }

    #[test]
    fn blob_iteration_matches_keys() {
        let (_, blob) = single_blob(&[(3, 3, 1), (3, 4, 1)]);
        let collected: Vec<PixelKey> = blob.iter().copied().collect();
        assert_eq!(collected, blob.keys());
        assert_eq!((&blob).into_iter().count(), 2);
        assert!(blob.contains(PixelKey::new(3, 4)));
        assert!(!blob.is_empty());
    }
}
