//! The field: one escape count per pixel, and the generator that
//! fills it in, either on the calling thread or across a pool of
//! scoped workers.

use num::Complex;
use std::ops::Index;
use std::panic;
use std::slice::{Chunks, ChunksMut};
use std::iter::Enumerate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use error::FieldError;
use escape::escape_count;
use planes::{Pixel, PlaneMapper, Region};

type RowQueue<'a> = Mutex<Enumerate<ChunksMut<'a, u32>>>;

/// A `height` by `width` grid of escape counts, stored row-major.  Row
/// 0 is the bottom of the region (`y_min`); column 0 is its left edge
/// (`x_min`).
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Field {
    /// Columns in the grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows in the grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The count at `row`, `column`, if that cell exists.
    pub fn get(&self, row: usize, column: usize) -> Option<u32> {
        if row < self.height && column < self.width {
            Some(self.cells[row * self.width + column])
        } else {
            None
        }
    }

    /// One row of counts, left to right, if that row exists.
    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row < self.height {
            Some(&self.cells[row * self.width..(row + 1) * self.width])
        } else {
            None
        }
    }

    /// Rows from the bottom of the region to the top.
    pub fn rows(&self) -> Chunks<u32> {
        self.cells.chunks(self.width)
    }

    /// Every count, row-major.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Give up the grid's storage.
    pub fn into_cells(self) -> Vec<u32> {
        self.cells
    }
}

impl Index<(usize, usize)> for Field {
    type Output = u32;

    fn index(&self, (row, column): (usize, usize)) -> &u32 {
        assert!(column < self.width, "column {} out of range", column);
        &self.cells[row * self.width + column]
    }
}

/// Holds a validated plane and an iteration budget.  Once built, every
/// render it produces is identical, whatever the thread count.
#[derive(Debug)]
pub struct FieldGenerator {
    plane: PlaneMapper,
    max_iter: u32,
}

impl FieldGenerator {
    /// Requires the width and height of the grid, the region of the
    /// complex plane to lay it over, and the iteration budget per
    /// point.  Refuses anything that can't produce a proper field.
    pub fn new(
        width: usize,
        height: usize,
        region: Region,
        max_iter: u32,
    ) -> Result<Self, FieldError> {
        let plane = PlaneMapper::new(width, height, region)?;
        if max_iter == 0 {
            return Err(FieldError::ZeroIterations);
        }
        Ok(FieldGenerator { plane, max_iter })
    }

    /// The plane the generator samples.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The iteration budget.
    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    fn render_row(&self, row: usize, cells: &mut [u32]) {
        let im = self.plane.row_to_im(row);
        for (column, cell) in cells.iter_mut().enumerate() {
            let c = Complex::new(self.plane.column_to_re(column), im);
            *cell = escape_count(c, self.max_iter);
        }
    }

    fn field(&self, cells: Vec<u32>) -> Field {
        Field {
            width: self.plane.width(),
            height: self.plane.height(),
            cells,
        }
    }

    /// The single-threaded render.  Walks the plane pixel by pixel.
    pub fn render_single(&self) -> Field {
        debug!(
            "Rendering {}x{} over {:?} at {} iterations, single-threaded",
            self.plane.width(),
            self.plane.height(),
            self.plane.region(),
            self.max_iter
        );
        let mut cells = Vec::with_capacity(self.plane.len());
        for row in 0..self.plane.height() {
            for column in 0..self.plane.width() {
                let c = self.plane.pixel_to_point(&Pixel(column, row));
                cells.push(escape_count(c, self.max_iter));
            }
        }
        self.field(cells)
    }

    /// A multi-threaded render that takes a thread count.
    pub fn render(&self, threads: usize) -> Result<Field, FieldError> {
        self.render_cancellable(threads, &AtomicBool::new(false))
    }

    /// A multi-threaded render that gives up between rows once `cancel`
    /// is set.  The workers share a queue of rows; each row is a
    /// disjoint slice of the output, so no cell is written twice.
    pub fn render_cancellable(
        &self,
        threads: usize,
        cancel: &AtomicBool,
    ) -> Result<Field, FieldError> {
        if threads == 0 {
            return Err(FieldError::ZeroThreads);
        }
        debug!(
            "Rendering {}x{} over {:?} at {} iterations on {} threads",
            self.plane.width(),
            self.plane.height(),
            self.plane.region(),
            self.max_iter,
            threads
        );

        let mut cells = vec![0 as u32; self.plane.len()];
        {
            let rows: RowQueue = Mutex::new(cells.chunks_mut(self.plane.width()).enumerate());
            let rows = &rows;
            crossbeam::scope(|spawner| {
                for worker in 0..threads {
                    spawner.spawn(move |_| {
                        let mut rendered = 0;
                        loop {
                            if cancel.load(Ordering::Relaxed) {
                                break;
                            }
                            let next = { rows.lock().unwrap().next() };
                            match next {
                                Some((row, cells)) => {
                                    self.render_row(row, cells);
                                    rendered += 1;
                                }
                                None => break,
                            }
                        }
                        trace!("Worker {} rendered {} rows", worker, rendered);
                    });
                }
            })
            .unwrap_or_else(|e| panic::resume_unwind(e));
        }

        if cancel.load(Ordering::Relaxed) {
            debug!("Render cancelled; discarding partial field");
            return Err(FieldError::Cancelled);
        }
        Ok(self.field(cells))
    }
}

/// Generate the escape-count field for `region` at `width` by `height`
/// pixels, using every available core.
pub fn generate_field(
    width: usize,
    height: usize,
    region: &Region,
    max_iter: u32,
) -> Result<Field, FieldError> {
    FieldGenerator::new(width, height, *region, max_iter)?.render(num_cpus::get())
}
