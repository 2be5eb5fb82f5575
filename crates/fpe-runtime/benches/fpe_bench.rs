use criterion::{criterion_group, criterion_main, Criterion};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use fpe_core::{derive_schedule, Base, CipherId, Domain, KeyMaterial, RoundCipher};
use fpe_runtime::feistel::encrypt_block;
use fpe_runtime::FpeContext;
use num_bigint::BigUint;

fn key_material(rng: &mut ChaCha20Rng) -> KeyMaterial {
    let mut key = [0u8; 16];
    let mut password = [0u8; 16];
    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut password);
    rng.fill_bytes(&mut iv);
    KeyMaterial::new(key.to_vec(), password.to_vec(), Some(iv.to_vec()))
        .expect("random key material has valid lengths")
}

fn bench_schedule(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let material = key_material(&mut rng);

    let mut group = c.benchmark_group("schedule");
    group.bench_function("derive_7_rounds", |b| {
        b.iter(|| derive_schedule(&material, 7, 17, CipherId::Aes128Cbc));
    });
    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let material = key_material(&mut rng);
    let ctx = FpeContext::new(
        Domain::new("0", "9999999999").expect("valid domain"),
        CipherId::Aes128Cbc,
        7,
    )
    .expect("valid context");

    let schedule = ctx.derive_schedule(&material).expect("schedule");
    let round_cipher = RoundCipher::new(CipherId::Aes128Cbc, &material).expect("round cipher");

    let mut group = c.benchmark_group("engine");
    group.sample_size(20);
    group.bench_function("feistel_encrypt_block", |b| {
        let block = BigUint::from(rng.gen_range(0u64..(1 << 34)));
        b.iter(|| encrypt_block(&block, &round_cipher, &schedule));
    });
    group.bench_function("encrypt_decimal", |b| {
        let value = rng.gen_range(0u64..10_000_000_000).to_string();
        b.iter(|| ctx.encrypt(&value, Base::Decimal, &material, false));
    });
    group.finish();
}

criterion_group!(benches, bench_schedule, bench_engine);
criterion_main!(benches);
