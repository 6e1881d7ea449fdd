use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::Rgba;
use seamcarve::{compute_energy, PixelBuffer, SeamCarver, SeamFinder, Strategy};

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                Rgba([(x * 7 % 256) as u8, (y * 3 % 256) as u8, ((x ^ y) % 256) as u8, 255])
            })
        })
        .collect();
    PixelBuffer::from_pixels(width, height, pixels).unwrap()
}

fn seam_finding(c: &mut Criterion) {
    let energy = compute_energy(&gradient(256, 192));
    for strategy in Strategy::ALL.iter() {
        c.bench_function(&format!("{} vertical seam 256x192", strategy), |b| {
            b.iter(|| strategy.find_vertical_seam(black_box(&energy)))
        });
        c.bench_function(&format!("{} horizontal seam 256x192", strategy), |b| {
            b.iter(|| strategy.find_horizontal_seam(black_box(&energy)))
        });
    }
}

fn energy(c: &mut Criterion) {
    let buffer = gradient(256, 192);
    c.bench_function("energy 256x192", |b| b.iter(|| compute_energy(black_box(&buffer))));
}

fn carving(c: &mut Criterion) {
    let source = gradient(64, 48);
    for strategy in Strategy::ALL.iter() {
        c.bench_function(&format!("{} carve 64x48 to 48x40", strategy), |b| {
            b.iter(|| {
                let mut buffer = source.clone();
                SeamCarver::new(*strategy).carve(&mut buffer, 48, 40)
            })
        });
    }
}

criterion_group!(benches, seam_finding, energy, carving);
criterion_main!(benches);
