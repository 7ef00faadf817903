#[macro_use]
extern crate criterion;
extern crate escapefield;
extern crate num;
extern crate num_cpus;

use criterion::Criterion;
use escapefield::{escape_count, FieldGenerator, Region};
use num::Complex;

fn kernel(c: &mut Criterion) {
    c.bench_function("escape_count in set, 1000", |b| {
        b.iter(|| escape_count(Complex::new(-0.1, 0.1), 1000))
    });
}

fn field(c: &mut Criterion) {
    let generator = FieldGenerator::new(200, 200, Region::new(-2.5, 1.0, -1.5, 1.5), 100).unwrap();
    c.bench_function("field 200x200 single", move |b| b.iter(|| generator.render_single()));
    let generator = FieldGenerator::new(200, 200, Region::new(-2.5, 1.0, -1.5, 1.5), 100).unwrap();
    c.bench_function("field 200x200 threaded", move |b| {
        b.iter(|| generator.render(num_cpus::get()).unwrap())
    });
}

criterion_group!(benches, kernel, field);
criterion_main!(benches);
