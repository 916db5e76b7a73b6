//! Dilithium keypair / sign / verify timings for every parameter set.

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crystals_rs::sign::{self, SignParams};

const MESSAGE: &[u8] = b"benchmark message for dilithium signing";

fn seed(tag: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(41)))
}

fn short_name<P>() -> &'static str {
    let name = std::any::type_name::<P>();
    name.rsplit("::").next().unwrap_or(name)
}

fn bench_param_set<P: SignParams>(c: &mut Criterion, tag: u8) {
    let mut g = c.benchmark_group(short_name::<P>());
    let seed = seed(tag);

    let (pk, sk) = sign::keypair_derand::<P>(&seed);
    let Ok(sig) = sign::sign::<P>(&sk, MESSAGE) else {
        panic!("signing failed for {}", short_name::<P>());
    };

    g.bench_function(BenchmarkId::from_parameter("keypair"), |b| {
        b.iter(|| black_box(sign::keypair_derand::<P>(black_box(&seed))));
    });

    // rejection sampling makes the time depend on the message
    g.bench_function(BenchmarkId::from_parameter("sign"), |b| {
        b.iter(|| black_box(sign::sign::<P>(black_box(&sk), black_box(MESSAGE))));
    });

    g.bench_function(BenchmarkId::from_parameter("verify"), |b| {
        b.iter(|| black_box(sign::verify::<P>(black_box(&pk), black_box(MESSAGE), black_box(&sig))));
    });

    g.finish();
}

fn sign_benches(c: &mut Criterion) {
    bench_param_set::<sign::Dilithium2>(c, 1);
    bench_param_set::<sign::Dilithium3>(c, 2);
    bench_param_set::<sign::Dilithium5>(c, 3);
}

criterion_group!(benches, sign_benches);
criterion_main!(benches);
