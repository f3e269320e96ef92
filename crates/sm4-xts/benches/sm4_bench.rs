use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use sm4_core::{encrypt_block, expand_key, Sm4, Sm4Key};
use sm4_xts::{Sm4Xts, TweakConfig};

fn bench_block(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);

    let mut group = c.benchmark_group("block");
    group.bench_function("expand_key", |b| {
        b.iter(|| expand_key(&Sm4Key::from(key)));
    });

    let round_keys = expand_key(&Sm4Key::from(key));
    group.throughput(Throughput::Bytes(16));
    group.bench_function("encrypt_block", |b| {
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);
        b.iter(|| encrypt_block(&block, &round_keys));
    });
    group.finish();
}

fn bench_xts(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let mut data_key = [0u8; 16];
    let mut tweak_key = [0u8; 16];
    rng.fill_bytes(&mut data_key);
    rng.fill_bytes(&mut tweak_key);
    let xts = Sm4Xts::from_ciphers(Sm4::new(&data_key), Sm4::new(&tweak_key));
    let ieee = xts.clone().with_tweak_config(TweakConfig::ieee1619());

    let mut group = c.benchmark_group("xts");
    group.sample_size(20);
    for len in [512usize, 4096 + 5] {
        let mut sector = vec![0u8; len];
        rng.fill_bytes(&mut sector);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(format!("encrypt_{len}"), |b| {
            b.iter(|| {
                let mut data = sector.clone();
                xts.encrypt_in_place(&[0u8; 16], &mut data)
            });
        });
        group.bench_function(format!("encrypt_ieee_{len}"), |b| {
            b.iter(|| {
                let mut data = sector.clone();
                ieee.encrypt_in_place(&[0u8; 16], &mut data)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_block, bench_xts);
criterion_main!(benches);
