//! Snapshot rendering of the training state.

use crate::config::SnapshotConfig;
use crate::dataset::{Bounds, City};
use crate::error::Result;
use crate::som::NeuronRing;
use image::{Rgb, RgbImage};
use log::debug;
use std::fs;

/// Collaborator invoked by the trainer on its snapshot schedule.
pub trait Snapshotter {
    /// Records the current (cities, ring) state, tagged with `iteration`.
    fn snapshot(&mut self, cities: &[City], ring: &NeuronRing, iteration: usize) -> Result<()>;
}

/// A snapshotter that discards every snapshot.
pub struct NullSnapshotter;

impl Snapshotter for NullSnapshotter {
    fn snapshot(&mut self, _cities: &[City], _ring: &NeuronRing, _iteration: usize) -> Result<()> {
        Ok(())
    }
}

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const CITY_COLOR: Rgb<u8> = Rgb([200, 30, 30]);
const RING_COLOR: Rgb<u8> = Rgb([40, 40, 40]);

/// Extra margin around the dataset bounds, per side, so cities never sit on
/// the frame border.
const FRAME_MARGIN: f64 = 0.05;

/// Renders PNG frames of the ring closing in on the cities.
///
/// The frame is fixed from the dataset bounds at construction, so successive
/// snapshots stay aligned and can be assembled into an animation.
pub struct PngSnapshotter {
    config: SnapshotConfig,
    frame: Bounds,
    frames_written: usize,
}

impl PngSnapshotter {
    /// Creates the output directory and fixes the rendering frame.
    pub fn new(config: SnapshotConfig, dataset_bounds: &Bounds) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.output_dir)?;
        Ok(Self {
            frame: dataset_bounds.padded(FRAME_MARGIN),
            config,
            frames_written: 0,
        })
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    fn to_pixel(&self, x: f64, y: f64) -> (i64, i64) {
        let fx = if self.frame.width() > 0.0 {
            (x - self.frame.min_x) / self.frame.width()
        } else {
            0.5
        };
        let fy = if self.frame.height() > 0.0 {
            (y - self.frame.min_y) / self.frame.height()
        } else {
            0.5
        };

        // Flip y so larger coordinates render upward.
        let px = (fx * (self.config.width - 1) as f64).round() as i64;
        let py = ((1.0 - fy) * (self.config.height - 1) as f64).round() as i64;
        (px, py)
    }
}

impl Snapshotter for PngSnapshotter {
    fn snapshot(&mut self, cities: &[City], ring: &NeuronRing, iteration: usize) -> Result<()> {
        let mut img = RgbImage::from_pixel(self.config.width, self.config.height, BACKGROUND);

        // Ring first, cities on top.
        for i in 0..ring.len() {
            let a = ring.get(i as i64);
            let b = ring.get(i as i64 + 1);
            draw_segment(&mut img, self.to_pixel(a.x, a.y), self.to_pixel(b.x, b.y), RING_COLOR);
        }
        for city in cities {
            let (px, py) = self.to_pixel(city.x, city.y);
            draw_square(&mut img, px, py, 2, CITY_COLOR);
        }

        let path = self
            .config
            .output_dir
            .join(format!("ring_{iteration:06}.png"));
        img.save(&path)?;
        self.frames_written += 1;
        debug!("Wrote snapshot {:?}", path);
        Ok(())
    }
}

fn put_pixel_clipped(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_square(img: &mut RgbImage, cx: i64, cy: i64, half: i64, color: Rgb<u8>) {
    for dy in -half..=half {
        for dx in -half..=half {
            put_pixel_clipped(img, cx + dx, cy + dy, color);
        }
    }
}

fn draw_segment(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()).max(1);
    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        let x = from.0 as f64 + t * (to.0 - from.0) as f64;
        let y = from.1 as f64 + t * (to.1 - from.1) as f64;
        put_pixel_clipped(img, x.round() as i64, y.round() as i64, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::som::Neuron;
    use tempfile::tempdir;

    fn test_state() -> (Vec<City>, NeuronRing, Bounds) {
        let cities = vec![City::new(0.0, 0.0), City::new(10.0, 10.0)];
        let ring = NeuronRing::from_neurons(vec![
            Neuron::new(2.0, 2.0),
            Neuron::new(8.0, 2.0),
            Neuron::new(8.0, 8.0),
            Neuron::new(2.0, 8.0),
        ]);
        let bounds = Bounds::of(&cities).unwrap();
        (cities, ring, bounds)
    }

    #[test]
    fn test_null_snapshotter() {
        let (cities, ring, _) = test_state();
        NullSnapshotter.snapshot(&cities, &ring, 0).unwrap();
    }

    #[test]
    fn test_png_snapshotter_writes_frames() {
        let dir = tempdir().unwrap();
        let config = SnapshotConfig {
            output_dir: dir.path().join("frames"),
            width: 64,
            height: 64,
        };
        let (cities, ring, bounds) = test_state();

        let mut snapshotter = PngSnapshotter::new(config, &bounds).unwrap();
        snapshotter.snapshot(&cities, &ring, 0).unwrap();
        snapshotter.snapshot(&cities, &ring, 250).unwrap();

        assert_eq!(snapshotter.frames_written(), 2);
        assert!(dir.path().join("frames/ring_000000.png").is_file());
        assert!(dir.path().join("frames/ring_000250.png").is_file());
    }

    #[test]
    fn test_degenerate_bounds_render() {
        // A single-city dataset has zero-extent bounds; rendering must not
        // divide by zero.
        let dir = tempdir().unwrap();
        let config = SnapshotConfig {
            output_dir: dir.path().to_path_buf(),
            width: 32,
            height: 32,
        };
        let cities = vec![City::new(5.0, 5.0)];
        let ring = NeuronRing::from_neurons(vec![Neuron::new(5.0, 5.0)]);
        let bounds = Bounds::of(&cities).unwrap();

        let mut snapshotter = PngSnapshotter::new(config, &bounds).unwrap();
        snapshotter.snapshot(&cities, &ring, 0).unwrap();
        assert!(dir.path().join("ring_000000.png").is_file());
    }
}
