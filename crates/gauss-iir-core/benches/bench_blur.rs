use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gauss_iir_core::{blur_with_strategy, ExecutionStrategy, Shape};

fn bench_blur_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian IIR 2D");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for sigma in [1.5f32, 10.0].iter() {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}", width, height, sigma);

            let shape = Shape::new(&[*width, *height]).unwrap();
            let data = vec![0.5f32; width * height];

            for (name, strategy) in [
                ("serial", ExecutionStrategy::Serial),
                ("parallel", ExecutionStrategy::Parallel),
            ] {
                group.bench_with_input(
                    BenchmarkId::new(name, &parameter_string),
                    &data,
                    |b, i| {
                        let mut buf = i.clone();
                        b.iter(|| {
                            black_box(blur_with_strategy(
                                &mut buf, &shape, *sigma, 3, strategy,
                            ))
                        })
                    },
                );
            }
        }
    }

    group.finish();
}

fn bench_blur_3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian IIR 3D");

    for size in [32usize, 64, 128].iter() {
        group.throughput(criterion::Throughput::Elements(size.pow(3) as u64));

        let shape = Shape::new(&[*size, *size, *size]).unwrap();
        let data = vec![0.5f32; shape.numel()];

        for numsteps in [1usize, 4].iter() {
            let parameter_string = format!("{}^3x{}", size, numsteps);
            group.bench_with_input(
                BenchmarkId::new("auto", &parameter_string),
                &data,
                |b, i| {
                    let mut buf = i.clone();
                    b.iter(|| {
                        black_box(blur_with_strategy(
                            &mut buf,
                            &shape,
                            2.0,
                            *numsteps,
                            ExecutionStrategy::Auto,
                        ))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_blur_2d, bench_blur_3d);
criterion_main!(benches);
