//! The one thing that can go wrong with a field is being asked for
//! one of an impossible shape.  Everything here is caught before a
//! single pixel is computed.

/// Reasons a field request is refused.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum FieldError {
    /// The image has no columns.
    #[fail(display = "Image width must be at least 1")]
    ZeroWidth,

    /// The image has no rows.
    #[fail(display = "Image height must be at least 1")]
    ZeroHeight,

    /// The grid has more cells than can be addressed.
    #[fail(display = "Image of {}x{} pixels is too large", _0, _1)]
    TooLarge(usize, usize),

    /// An iteration budget of zero can't tell any point from any other.
    #[fail(display = "Iteration count must be at least 1")]
    ZeroIterations,

    /// A threaded render needs somebody to do the work.
    #[fail(display = "Thread count must be at least 1")]
    ZeroThreads,

    /// One of the region's bounds is NaN or infinite.
    #[fail(display = "Region bounds must be finite numbers")]
    NonFiniteBound,

    /// The real (x) range is empty or runs backwards.
    #[fail(
        display = "The left edge ({}) is not to the left of the right edge ({})",
        _0, _1
    )]
    InvertedReal(f64, f64),

    /// The imaginary (y) range is empty or runs backwards.
    #[fail(
        display = "The lower edge ({}) is not below the upper edge ({})",
        _0, _1
    )]
    InvertedImaginary(f64, f64),

    /// A cooperative cancellation was requested before the field was
    /// finished.  The partial field is discarded.
    #[fail(display = "Render cancelled")]
    Cancelled,
}
