//! Benchmarks for the semi-global locate hot path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use semialign::{Aligner, Flags};

const ADAPTER: &str = "AGATCGGAAGAGC";

/// Random DNA read of the given length with the adapter spliced in near
/// the 3' end.
fn read_with_adapter(len: usize) -> String {
    let bases = b"ACGT";
    let mut rng = rand::thread_rng();
    let mut read: String = (0..len)
        .map(|_| bases[rng.gen_range(0..4)] as char)
        .collect();
    let insert_at = len - len / 4;
    read.replace_range(insert_at..(insert_at + ADAPTER.len()).min(len), ADAPTER);
    read
}

fn bench_locate_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate_back_adapter");
    let back = Flags::START_IN_QUERY | Flags::STOP_IN_QUERY | Flags::STOP_IN_REF;

    for read_len in [100, 150, 300].iter() {
        let reads: Vec<String> = (0..256).map(|_| read_with_adapter(*read_len)).collect();
        let mut aligner = Aligner::new(ADAPTER, 0.1, back, false, false).unwrap();

        group.throughput(Throughput::Elements(reads.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}bp", read_len)),
            read_len,
            |b, _| {
                b.iter(|| {
                    for read in &reads {
                        black_box(aligner.locate(black_box(read)));
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_locate_semiglobal(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate_semiglobal");

    let reads: Vec<String> = (0..256).map(|_| read_with_adapter(150)).collect();
    for error_rate in [0.0, 0.1, 0.2].iter() {
        let mut aligner =
            Aligner::new(ADAPTER, *error_rate, Flags::SEMIGLOBAL, false, false).unwrap();

        group.throughput(Throughput::Elements(reads.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("e{}", error_rate)),
            error_rate,
            |b, _| {
                b.iter(|| {
                    for read in &reads {
                        black_box(aligner.locate(black_box(read)));
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_locate_back, bench_locate_semiglobal);
criterion_main!(benches);
