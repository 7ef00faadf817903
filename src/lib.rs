#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time field generator
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the iteration `z = z * z + c`, starting from zero, never
//! runs off to infinity.  We can't iterate forever, so instead we
//! count how many steps each point takes before its magnitude passes
//! 2 (after which it is guaranteed to escape), giving up at some
//! maximum.  That count, taken for every pixel of an image laid over a
//! rectangle of the complex plane, is the "field" this crate produces.
//!
//! Every pixel is independent of every other, so the field can be
//! split into rows and handed to as many threads as there are cores.
//! The result is identical no matter how many threads do the work.
//!
//! The `heatmap` module turns a field into a picture, and the
//! `schedule` module describes a canned zoom animation, one field per
//! frame.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;
#[cfg(test)]
extern crate rand;

pub mod config;
pub mod error;
pub mod escape;
pub mod field;
pub mod heatmap;
pub mod planes;
pub mod schedule;

pub use config::RenderConfig;
pub use error::FieldError;
pub use escape::escape_count;
pub use field::{generate_field, Field, FieldGenerator};
pub use planes::{Pixel, PlaneMapper, Region};
pub use schedule::{frame_params, AnimationSchedule, FrameParams, ZoomPolicy};
