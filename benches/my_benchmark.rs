use criterion::{criterion_group, criterion_main, Criterion};
use molview::bvh::{Ray, SegmentBvh};
use molview::{parse_all, ParseOptions};
use std::hint::black_box;
use std::time::Duration;

/// `records` copies of a flat ferrocene-like sandwich with hydrogens, one
/// explicit bond per ring carbon and no metal bond.
fn generate_sdf(records: usize) -> String {
    let mut atoms = vec![("Fe", 0.0, 0.0, 0.0)];
    for ring in [-1.65_f64, 1.65] {
        for k in 0..5 {
            let angle = f64::from(k) * std::f64::consts::TAU / 5.0;
            atoms.push(("C", 1.2 * angle.cos(), 1.2 * angle.sin() + ring, 0.0));
            atoms.push(("H", 2.2 * angle.cos(), 2.2 * angle.sin() + ring, 0.0));
        }
    }
    let mut bonds = Vec::new();
    for ring in 0..2 {
        for k in 0..5 {
            let carbon = 2 + ring * 10 + 2 * k;
            let next = 2 + ring * 10 + 2 * ((k + 1) % 5);
            bonds.push((carbon, next, if k % 2 == 0 { 2 } else { 1 }));
            bonds.push((carbon, carbon + 1, 1));
        }
    }

    let mut text = String::new();
    for i in 0..records {
        text.push_str(&format!("sandwich {i}\n  molview\n\n"));
        text.push_str(&format!(
            "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000\n",
            atoms.len(),
            bonds.len()
        ));
        for (symbol, x, y, z) in &atoms {
            text.push_str(&format!(
                "{x:>10.4}{y:>10.4}{z:>10.4} {symbol:<3} 0  0  0  0  0  0  0  0  0  0  0  0\n"
            ));
        }
        for (a, b, order) in &bonds {
            text.push_str(&format!("{a:>3}{b:>3}{order:>3}  0  0  0  0\n"));
        }
        text.push_str("M  END\n>  <INDEX>\n");
        text.push_str(&format!("{i}\n\n$$$$\n"));
    }
    text
}

fn criterion_benchmark(c: &mut Criterion) {
    let text = generate_sdf(500);
    let options = ParseOptions::default();

    let mut group = c.benchmark_group("my_group");
    group.measurement_time(Duration::from_secs(6));
    group.bench_function("parse 500 records", |b| {
        b.iter(|| black_box(parse_all(black_box(&text), &options).unwrap().len()))
    });

    let molecule = parse_all(&generate_sdf(1), &options).unwrap().remove(0);
    group.bench_function("build and pick", |b| {
        b.iter(|| {
            let bvh = SegmentBvh::from_molecule(black_box(&molecule));
            let ray = Ray::new([0.3, 0.2, 10.0], [0.0, 0.0, -1.0]);
            black_box(bvh.pick(&ray, 0.5))
        })
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
