//! Kyber keypair / encapsulate / decapsulate timings for every parameter set.

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crystals_rs::kem::{self, KemParams};

fn keygen_coins(tag: u8) -> [u8; 64] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(37)))
}

fn enc_coins(tag: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(53)))
}

fn short_name<P>() -> &'static str {
    let name = std::any::type_name::<P>();
    name.rsplit("::").next().unwrap_or(name)
}

fn bench_param_set<P: KemParams>(c: &mut Criterion, tag: u8) {
    let mut g = c.benchmark_group(short_name::<P>());
    let full = keygen_coins(tag);
    let m = enc_coins(tag);

    let (pk, sk) = kem::keypair_derand::<P>(&full);
    let (ct, _) = kem::encapsulate_derand::<P>(&pk, &m);

    g.bench_function(BenchmarkId::from_parameter("keypair"), |b| {
        b.iter(|| black_box(kem::keypair_derand::<P>(black_box(&full))));
    });

    g.bench_function(BenchmarkId::from_parameter("encapsulate"), |b| {
        b.iter(|| black_box(kem::encapsulate_derand::<P>(black_box(&pk), black_box(&m))));
    });

    g.bench_function(BenchmarkId::from_parameter("decapsulate"), |b| {
        b.iter(|| black_box(kem::decapsulate::<P>(black_box(&ct), black_box(&sk))));
    });

    g.bench_function(BenchmarkId::from_parameter("roundtrip"), |b| {
        b.iter(|| {
            let (ct, _ss_enc) = kem::encapsulate_derand::<P>(black_box(&pk), black_box(&m));
            black_box(kem::decapsulate::<P>(black_box(&ct), black_box(&sk)));
        });
    });

    g.finish();
}

fn kem_benches(c: &mut Criterion) {
    bench_param_set::<kem::Kyber512>(c, 1);
    bench_param_set::<kem::Kyber768>(c, 2);
    bench_param_set::<kem::Kyber1024>(c, 3);
}

criterion_group!(benches, kem_benches);
criterion_main!(benches);
