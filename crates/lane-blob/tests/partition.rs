use std::collections::BTreeSet;

use lane_blob::{find_blobs, Blob};
use lane_frame::{Frame, PixelKey, GRID_CELLS};

fn frame_from(pixels: impl IntoIterator<Item = (u8, u8, u16)>) -> Frame {
    let mut frame = Frame::new(0, 1_400_000_000, 0);
    for (x, y, v) in pixels {
        frame.set_pixel(PixelKey::new(x, y), v);
    }
    frame
}

/// Checks that the blobs are pairwise disjoint and cover exactly the
/// qualifying pixels.
fn assert_partition(frame: &Frame, threshold: u16, blobs: &[Blob]) {
    let expected: BTreeSet<PixelKey> = frame
        .pixels()
        .filter(|(_, v)| *v >= threshold)
        .map(|(k, _)| k)
        .collect();

    let mut seen = BTreeSet::new();
    for blob in blobs {
        assert!(!blob.is_empty());
        for key in blob {
            assert!(seen.insert(*key), "{key} appears in two blobs");
        }
    }
    assert_eq!(seen, expected);
}

/// Small deterministic generator so the scattered frames are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }
}

#[test]
fn scattered_frames_partition_at_every_threshold() {
    for seed in 1..=8u64 {
        let mut rng = Lcg(seed);
        let pixels: Vec<_> = (0..2_000)
            .map(|_| {
                let r = rng.next();
                ((r & 0xFF) as u8, ((r >> 8) & 0x3F) as u8, ((r >> 16) % 8) as u16)
            })
            .collect();
        let frame = frame_from(pixels);

        for threshold in [0, 1, 3, 7, 8] {
            let blobs = find_blobs(&frame, threshold);
            assert_partition(&frame, threshold, &blobs);
        }
    }
}

#[test]
fn single_pixel_is_one_blob() {
    let frame = frame_from([(0, 0, 5)]);
    let blobs = find_blobs(&frame, 1);
    assert_eq!(blobs.len(), 1);
    assert_eq!(blobs[0].keys(), &[PixelKey::new(0, 0)]);
}

#[test]
fn full_frame_is_one_blob() {
    let frame = frame_from((0..=255u8).flat_map(|x| (0..=255u8).map(move |y| (x, y, 2))));
    assert_eq!(frame.len(), GRID_CELLS);

    let blobs = find_blobs(&frame, 2);
    assert_eq!(blobs.len(), 1);
    assert_eq!(blobs[0].len(), GRID_CELLS);
    assert_partition(&frame, 2, &blobs);
}

#[test]
fn crossing_line_merges_two_columns() {
    let column = |x: u8| (0..=255u8).map(move |y| (x, y, 1));
    let frame = frame_from(column(3).chain(column(9)));

    let blobs = find_blobs(&frame, 1);
    assert_eq!(blobs.len(), 2);
    assert!(blobs.iter().all(|b| b.len() == 256));

    let row = (0..=255u8).map(|x| (x, 3, 1));
    let frame = frame_from(column(3).chain(column(9)).chain(row));

    let blobs = find_blobs(&frame, 1);
    assert_eq!(blobs.len(), 1);
    assert_eq!(blobs[0].len(), 256 + 256 + 256 - 2);
    assert_partition(&frame, 1, &blobs);
}

#[test]
fn stats_cover_whole_column() {
    let frame = frame_from((0..=255u8).map(|y| (7, y, 3)));
    let blobs = find_blobs(&frame, 1);
    let stats = blobs[0].stats(&frame);

    assert_eq!(stats.size, 256);
    assert_eq!(stats.volume, 768);
    assert_eq!(stats.height, 3);
    assert!(stats.touches_edge());
    assert_eq!(stats.hitting_area(), 0);
}
