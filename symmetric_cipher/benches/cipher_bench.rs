use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::RngCore;
use std::hint::black_box;
use symmetric_cipher::crypto::des::{DES, des_crypt};
use symmetric_cipher::{CipherAlgorithm, CipherContext, CipherMode, CryptMode, PaddingMode};

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buffer = vec![0u8; len];
    rand::rng().fill_bytes(&mut buffer);
    buffer
}

fn bench_des_block(c: &mut Criterion) {
    let des = DES::with_key(b"12345678").unwrap();
    let block = random_bytes(8);

    c.bench_function("DES block encrypt", |b| {
        b.iter(|| CipherAlgorithm::encrypt(&des, black_box(&block)))
    });
}

fn bench_des_crypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("DES ECB PKCS7");

    for size in [64usize, 1024, 16 * 1024] {
        let data = random_bytes(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encrypt", size), &data, |b, data| {
            b.iter(|| des_crypt(black_box(data), b"12345678", CryptMode::Encrypt, PaddingMode::PKCS7))
        });

        let encrypted = des_crypt(&data, b"12345678", CryptMode::Encrypt, PaddingMode::PKCS7).unwrap();
        group.bench_with_input(BenchmarkId::new("decrypt", size), &encrypted, |b, data| {
            b.iter(|| des_crypt(black_box(data), b"12345678", CryptMode::Decrypt, PaddingMode::PKCS7))
        });
    }

    group.finish();
}

fn bench_des_cbc_context(c: &mut Criterion) {
    let ctx = CipherContext::new(
        Box::new(DES::with_key(b"12345678").unwrap()),
        CipherMode::CBC,
        PaddingMode::PKCS7,
        Some(random_bytes(8)),
    )
    .unwrap();
    let data = random_bytes(4096);

    let mut group = c.benchmark_group("DES CBC context");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("encrypt 4KiB", |b| {
        b.iter(|| ctx.crypt(black_box(&data), CryptMode::Encrypt))
    });
    group.finish();
}

criterion_group!(benches, bench_des_block, bench_des_crypt, bench_des_cbc_context);
criterion_main!(benches);
