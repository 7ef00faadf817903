//! Turns a field into a picture.  Counts are scaled over the field's
//! own range and pushed through the familiar "hot" colormap: near-black,
//! through red and yellow, to white.  The picture is drawn with its
//! origin at the lower left, so the imaginary axis points up.

use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use itertools::{Itertools, MinMaxResult};
use num::clamp;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use field::Field;
use planes::Region;

// Breakpoints of the hot colormap: red saturates first, then green,
// then blue.
const RED_END: f64 = 0.365_079;
const GREEN_END: f64 = 0.746_032;
const RED_FLOOR: f64 = 0.0416;

/// Map a value in 0..=1 to an RGB triple on the hot colormap.
pub fn hot(x: f64) -> [u8; 3] {
    let x = clamp(x, 0.0, 1.0);
    let red = RED_FLOOR + (1.0 - RED_FLOOR) * x / RED_END;
    let green = (x - RED_END) / (GREEN_END - RED_END);
    let blue = (x - GREEN_END) / (1.0 - GREEN_END);
    let channel = |v: f64| (clamp(v, 0.0, 1.0) * 255.0).round() as u8;
    [channel(red), channel(green), channel(blue)]
}

/// An RGB rendering of a field, along with the region it depicts.
#[derive(Clone, Debug)]
pub struct Heatmap {
    width: usize,
    height: usize,
    extent: Region,
    pixels: Vec<u8>,
}

impl Heatmap {
    /// Color a field.  The lowest count in the field is the darkest
    /// red and the highest is white; a field of one value is all dark.
    /// Each field is scaled over its own range, so successive frames
    /// are not on a common scale.
    pub fn new(field: &Field, extent: &Region) -> Heatmap {
        let (low, high) = match field.cells().iter().minmax() {
            MinMaxResult::NoElements => (0, 0),
            MinMaxResult::OneElement(&n) => (n, n),
            MinMaxResult::MinMax(&l, &h) => (l, h),
        };
        let span = f64::from(high - low);

        let mut pixels = Vec::with_capacity(field.cells().len() * 3);
        for row in field.rows().rev() {
            for &n in row {
                let x = if span > 0.0 {
                    f64::from(n - low) / span
                } else {
                    0.0
                };
                pixels.extend_from_slice(&hot(x));
            }
        }

        Heatmap {
            width: field.width(),
            height: field.height(),
            extent: *extent,
            pixels,
        }
    }

    /// The region of the complex plane the picture spans.
    pub fn extent(&self) -> &Region {
        &self.extent
    }

    /// Raw RGB bytes, top row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Encode the picture as a binary PPM.
    pub fn write_ppm<W: Write>(&self, output: W) -> Result<(), io::Error> {
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
        encoder.encode(
            &self.pixels[..],
            self.width as u32,
            self.height as u32,
            ColorType::RGB(8),
        )?;
        Ok(())
    }

    /// Write the picture to `outfile` as a binary PPM.
    pub fn save<P: AsRef<Path>>(&self, outfile: P) -> Result<(), io::Error> {
        let output = File::create(outfile.as_ref())?;
        debug!(
            "Writing {}x{} heatmap of {:?} to {}",
            self.width,
            self.height,
            self.extent,
            outfile.as_ref().display()
        );
        self.write_ppm(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field::generate_field;

    #[test]
    fn hot_runs_from_near_black_to_white() {
        assert_eq!(hot(0.0), [11, 0, 0]);
        assert_eq!(hot(1.0), [255, 255, 255]);
        assert_eq!(hot(RED_END), [255, 0, 0]);
        assert_eq!(hot(GREEN_END), [255, 255, 0]);
        assert_eq!(hot(-3.0), hot(0.0));
        assert_eq!(hot(7.0), hot(1.0));
    }

    #[test]
    fn bottom_row_of_the_field_is_drawn_last() {
        let region = Region::new(-2.5, 1.0, -1.5, 1.5);
        // Row 0 is [1, 1, 2, 2], row 1 is [1, 20, 20, 20].
        let field = generate_field(4, 2, &region, 20).unwrap();
        let map = Heatmap::new(&field, &region);
        assert_eq!(map.pixels().len(), 4 * 2 * 3);
        assert_eq!(&map.pixels()[3..6], &[255, 255, 255]);
        assert_eq!(&map.pixels()[12..15], &hot(0.0)[..]);
        assert_eq!(map.extent(), &region);
    }

    #[test]
    fn flat_fields_are_darkest() {
        let region = Region::new(-0.1, 0.1, -0.1, 0.1);
        let field = generate_field(3, 3, &region, 10).unwrap();
        let map = Heatmap::new(&field, &region);
        assert!(map.pixels().chunks(3).all(|p| p == &hot(0.0)[..]));
    }

    #[test]
    fn ppm_output_carries_the_pixels() {
        let region = Region::new(-2.5, 1.0, -1.5, 1.5);
        let field = generate_field(5, 4, &region, 20).unwrap();
        let map = Heatmap::new(&field, &region);
        let mut buf: Vec<u8> = Vec::new();
        map.write_ppm(&mut buf).unwrap();
        assert!(buf.starts_with(b"P6"));
        assert!(buf.ends_with(map.pixels()));
    }
}
