use criterion::{Criterion, black_box, criterion_group, criterion_main};
use splitter_fs::io::{self, RobustnessConfig};
use splitter_fs::NormalizedPath;
use tempfile::tempdir;

fn write_atomic_benchmark(c: &mut Criterion) {
    c.bench_function("io::write_atomic", |b| {
        let dir = tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("tools/core/xrp-get-balance.ts"));
        let content = "export async function handleGetBalance() {}".as_bytes();
        let config = RobustnessConfig::default();

        b.iter(|| {
            io::write_atomic(black_box(&path), black_box(content), config).unwrap();
        })
    });
}

criterion_group!(benches, write_atomic_benchmark);
criterion_main!(benches);
