//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by a Region.  Unlike
//! a general-purpose mapping, only the pixel-to-point direction is
//! needed: every pixel is sampled once, at its left-lower corner.
use num::Complex;

use error::FieldError;

/// The rectangle of the complex plane being sampled, treating the real
/// part as the x-component and the imaginary part as the y-component.
///
/// A Region can be built with any four numbers; `validate()` is what
/// enforces `x_min < x_max` and `y_min < y_max`.  The generator always
/// validates before it starts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Left edge (smallest real part).
    pub x_min: f64,
    /// Right edge.  Never sampled exactly.
    pub x_max: f64,
    /// Lower edge (smallest imaginary part).
    pub y_min: f64,
    /// Upper edge.  Never sampled exactly.
    pub y_max: f64,
}

impl Region {
    /// Build a region from its four edges, unchecked.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Region {
        Region {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Build a region from its left-lower and right-upper corners.
    pub fn from_corners(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Region {
        Region::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// A square region of half-width `radius` around `center`.
    pub fn around(center: Complex<f64>, radius: f64) -> Region {
        Region::new(
            center.re - radius,
            center.re + radius,
            center.im - radius,
            center.im + radius,
        )
    }

    /// Check that every edge is finite and that neither range is empty
    /// or inverted.
    pub fn validate(&self) -> Result<(), FieldError> {
        let edges = [self.x_min, self.x_max, self.y_min, self.y_max];
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(FieldError::NonFiniteBound);
        }
        if !(self.x_min < self.x_max) {
            return Err(FieldError::InvertedReal(self.x_min, self.x_max));
        }
        if !(self.y_min < self.y_max) {
            return Err(FieldError::InvertedImaginary(self.y_min, self.y_max));
        }
        Ok(())
    }

    /// Width of the real range.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the imaginary range.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Describes the column, row of a pixel.  Column runs with the real
/// axis, row with the imaginary axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian plane
/// `width` by `height` pixels, and a region of the complex plane.  Maps
/// pixels in the first to points in the second.
#[derive(Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    cells: usize,
    region: Region,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the
    /// region of the complex plane it is laid over.
    pub fn new(width: usize, height: usize, region: Region) -> Result<PlaneMapper, FieldError> {
        if width == 0 {
            return Err(FieldError::ZeroWidth);
        }
        if height == 0 {
            return Err(FieldError::ZeroHeight);
        }
        let cells = width
            .checked_mul(height)
            .ok_or(FieldError::TooLarge(width, height))?;
        region.validate()?;
        Ok(PlaneMapper {
            width,
            height,
            cells,
            region,
        })
    }

    /// Columns in the integral plane.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows in the integral plane.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The complex region being sampled.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.cells
    }

    /// Always false; construction refuses empty planes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The real part sampled for a column.  The divisor is the width,
    /// not width - 1, so `x_max` itself is never reached.
    #[inline]
    pub fn column_to_re(&self, column: usize) -> f64 {
        self.region.x_min + (self.region.x_max - self.region.x_min) * (column as f64)
            / (self.width as f64)
    }

    /// The imaginary part sampled for a row.
    #[inline]
    pub fn row_to_im(&self, row: usize) -> f64 {
        self.region.y_min + (self.region.y_max - self.region.y_min) * (row as f64)
            / (self.height as f64)
    }

    /// Given a pixel on the integral cartesian plane, map that to a
    /// point on the complex cartesian plane.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.column_to_re(pixel.0), self.row_to_im(pixel.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Region {
        Region::new(-2.0, 2.0, -2.0, 2.0)
    }

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(
            4,
            4,
            Region::from_corners(Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0)),
        );
        assert_eq!(pm.unwrap_err(), FieldError::InvertedImaginary(1.0, -1.0));
        let pm = PlaneMapper::new(4, 4, Region::new(1.0, -1.0, -1.0, 1.0));
        assert_eq!(pm.unwrap_err(), FieldError::InvertedReal(1.0, -1.0));
    }

    #[test]
    fn planemapper_fails_on_degenerate_shape() {
        let pm = PlaneMapper::new(4, 4, Region::new(-0.5, -0.5, 0.0, 0.0));
        assert_eq!(pm.unwrap_err(), FieldError::InvertedReal(-0.5, -0.5));
    }

    #[test]
    fn planemapper_fails_on_empty_planes() {
        assert_eq!(PlaneMapper::new(0, 4, square()).unwrap_err(), FieldError::ZeroWidth);
        assert_eq!(PlaneMapper::new(4, 0, square()).unwrap_err(), FieldError::ZeroHeight);
    }

    #[test]
    fn planemapper_fails_on_unaddressable_planes() {
        let huge = ::std::usize::MAX;
        assert_eq!(
            PlaneMapper::new(huge, 2, square()).unwrap_err(),
            FieldError::TooLarge(huge, 2)
        );
        let pm = PlaneMapper::new(huge, 1, square()).unwrap();
        assert_eq!(pm.len(), huge);
    }

    #[test]
    fn planemapper_fails_on_non_finite_bounds() {
        let region = Region::new(::std::f64::NAN, 1.0, -1.0, 1.0);
        assert_eq!(region.validate().unwrap_err(), FieldError::NonFiniteBound);
        let region = Region::new(-1.0, 1.0, -1.0, ::std::f64::INFINITY);
        assert_eq!(region.validate().unwrap_err(), FieldError::NonFiniteBound);
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, square()).unwrap();
        assert_eq!(pm.len(), 16);
        assert!(!pm.is_empty());
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, Region::new(0.0, 5.0, 0.0, 5.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, square()).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn right_edge_is_never_sampled() {
        let pm = PlaneMapper::new(500, 500, Region::new(-2.5, 1.0, -1.5, 1.5)).unwrap();
        assert_eq!(pm.column_to_re(0), -2.5);
        let last = pm.column_to_re(499);
        assert_eq!(last, -2.5 + (1.0 - -2.5) * 499.0 / 500.0);
        assert!(last < 1.0);
        assert!(pm.row_to_im(499) < 1.5);
    }

    #[test]
    fn regions_built_around_a_center() {
        let r = Region::around(Complex::new(-0.5, 0.0), 1.5);
        assert_eq!(r, Region::new(-2.0, 1.0, -1.5, 1.5));
        assert_eq!(r.width(), 3.0);
        assert_eq!(r.height(), 3.0);
    }
}
