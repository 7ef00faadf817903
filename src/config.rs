//! Everything one render needs, with the classic full view as the
//! default.

use error::FieldError;
use field::{Field, FieldGenerator};
use planes::Region;

/// Default image width in pixels.
pub const WIDTH: usize = 500;
/// Default image height in pixels.
pub const HEIGHT: usize = 500;
/// Default iteration budget.
pub const MAX_ITER: u32 = 100;
/// The whole set, with a little room on the left.
pub const REGION: Region = Region {
    x_min: -2.5,
    x_max: 1.0,
    y_min: -1.5,
    y_max: 1.5,
};

/// Parameters of a single render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Columns in the field.
    pub width: usize,
    /// Rows in the field.
    pub height: usize,
    /// Part of the complex plane to sample.
    pub region: Region,
    /// Iteration budget per point.
    pub max_iter: u32,
    /// Worker threads.
    pub threads: usize,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: WIDTH,
            height: HEIGHT,
            region: REGION,
            max_iter: MAX_ITER,
            threads: num_cpus::get(),
        }
    }
}

impl RenderConfig {
    /// Check the configuration and build a generator for it.
    pub fn generator(&self) -> Result<FieldGenerator, FieldError> {
        if self.threads == 0 {
            return Err(FieldError::ZeroThreads);
        }
        FieldGenerator::new(self.width, self.height, self.region, self.max_iter)
    }

    /// Render the configured field.
    pub fn render(&self) -> Result<Field, FieldError> {
        self.generator()?.render(self.threads)
    }
}
