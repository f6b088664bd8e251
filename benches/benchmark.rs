use criterion::{criterion_group, criterion_main, Criterion};

#[cfg(feature = "bike-l1")]
use bike_kem::bike_l1;
#[cfg(feature = "bike-l3")]
use bike_kem::bike_l3;
#[cfg(feature = "bike-l5")]
use bike_kem::bike_l5;
use bike_kem::traits::{Decaps, Encaps, KeyGen};

#[allow(clippy::redundant_closure)]
pub fn criterion_benchmark(c: &mut Criterion) {
    #[cfg(feature = "bike-l1")]
    {
        let (pk, sk) = bike_l1::KG::try_keygen().unwrap();
        let (_, ct) = pk.try_encaps().unwrap();
        c.bench_function("bike_l1 KeyGen", |b| b.iter(|| bike_l1::KG::try_keygen()));
        c.bench_function("bike_l1 Encaps", |b| b.iter(|| pk.try_encaps()));
        c.bench_function("bike_l1 Decaps", |b| b.iter(|| sk.decaps(&ct)));
    }

    #[cfg(feature = "bike-l3")]
    {
        let (pk, sk) = bike_l3::KG::try_keygen().unwrap();
        let (_, ct) = pk.try_encaps().unwrap();
        c.bench_function("bike_l3 KeyGen", |b| b.iter(|| bike_l3::KG::try_keygen()));
        c.bench_function("bike_l3 Encaps", |b| b.iter(|| pk.try_encaps()));
        c.bench_function("bike_l3 Decaps", |b| b.iter(|| sk.decaps(&ct)));
    }

    #[cfg(feature = "bike-l5")]
    {
        let (pk, sk) = bike_l5::KG::try_keygen().unwrap();
        let (_, ct) = pk.try_encaps().unwrap();
        c.bench_function("bike_l5 KeyGen", |b| b.iter(|| bike_l5::KG::try_keygen()));
        c.bench_function("bike_l5 Encaps", |b| b.iter(|| pk.try_encaps()));
        c.bench_function("bike_l5 Decaps", |b| b.iter(|| sk.decaps(&ct)));
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

/*

The iterative QC-MDPC decoder dominates decaps cost; expect decaps to run
noticeably slower than keygen/encaps, and l3/l5 to scale worse than l1 since
the decoder's per-round cost is quadratic in r.

$ cargo bench --features bike-l1,bike-l3,bike-l5

*/
