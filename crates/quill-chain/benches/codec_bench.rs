//! Performance benchmarks for the RLP codec and transaction signing.
//!
//! - Encoding and decoding strings, nested lists and transactions
//! - Signing legacy and EIP-155 transactions end to end
//! - Address normalization

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quill_chain::{
    decode, decode_hex, encode, sign_transaction, try_sign_transaction, EthereumAddress, RlpValue,
};
use quill_crypto::{Secp256k1KeyPair, SecretKey};

const LEGACY_UNSIGNED: &str =
    "0xe585746f6b6682832dc6c0832dc6c094dc0a63a5bdb165640661709569816bf08594dfd78080";

const EIP155_UNSIGNED: &str = "0xf86d85746f6b6682832dc6c0832dc6c094dc0a63a5bdb16564066170956981\
    6bf08594dfd780b844a9059cbb0000000000000000000000002278562760cf038cb33b7b405c295a4c50db4f\
    dd00000000000000000000000000000000000000000000000000000002540be400748080";

fn bench_signer() -> Secp256k1KeyPair {
    Secp256k1KeyPair::from_secret_key(&SecretKey::new([0x42; 32])).unwrap()
}

/// A list of `width` three-string lists, like the 32-entry test vector.
fn wide_list(width: usize) -> RlpValue {
    let entry = RlpValue::from(vec![
        RlpValue::from("asdf"),
        RlpValue::from("qwer"),
        RlpValue::from("zxcv"),
    ]);
    RlpValue::from(vec![entry; width])
}

fn nested_list(depth: usize) -> RlpValue {
    let mut value = RlpValue::from(Vec::<RlpValue>::new());
    for _ in 1..depth {
        value = RlpValue::from(vec![value]);
    }
    value
}

/// Benchmark encoding byte strings of increasing size.
fn benchmark_encode_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode/string");

    for size in [1usize, 55, 1024, 65_536] {
        let value = RlpValue::from_bytes(vec![0x78; size]);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| black_box(encode(black_box(value)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark encoding and decoding lists by width and depth.
fn benchmark_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("lists");

    for width in [32usize, 1024] {
        let value = wide_list(width);
        let encoded = encode(&value).unwrap();

        group.bench_with_input(BenchmarkId::new("encode_wide", width), &value, |b, value| {
            b.iter(|| black_box(encode(black_box(value)).unwrap()));
        });
        group.bench_with_input(
            BenchmarkId::new("decode_wide", width),
            &encoded,
            |b, encoded| {
                b.iter(|| black_box(decode(black_box(encoded)).unwrap()));
            },
        );
    }

    let deep = encode(&nested_list(512)).unwrap();
    group.bench_function("decode_nested/512", |b| {
        b.iter(|| black_box(decode(black_box(&deep)).unwrap()));
    });

    group.finish();
}

/// Benchmark rejecting adversarial input at the nesting limit.
fn benchmark_reject_deep_nesting(c: &mut Criterion) {
    let hostile = vec![0xc1u8; 64 * 1024];

    c.bench_function("decode/reject_deep_nesting", |b| {
        b.iter(|| black_box(decode(black_box(&hostile)).is_err()));
    });
}

/// Benchmark decoding a transaction from hex.
fn benchmark_decode_transaction(c: &mut Criterion) {
    c.bench_function("decode/eip155_transaction_hex", |b| {
        b.iter(|| black_box(decode_hex(black_box(EIP155_UNSIGNED)).unwrap()));
    });
}

/// Benchmark the full signing path: decode, keccak, ECDSA, re-encode.
fn benchmark_sign_transaction(c: &mut Criterion) {
    let signer = bench_signer();
    let mut group = c.benchmark_group("sign_transaction");

    group.bench_function("legacy", |b| {
        b.iter(|| black_box(sign_transaction(&signer, black_box(LEGACY_UNSIGNED)).unwrap()));
    });
    group.bench_function("eip155", |b| {
        b.iter(|| black_box(try_sign_transaction(&signer, black_box(EIP155_UNSIGNED)).unwrap()));
    });
    group.bench_function("reject_garbage", |b| {
        b.iter(|| black_box(sign_transaction(&signer, black_box("0xf86d8570be4007480801"))));
    });

    group.finish();
}

/// Benchmark address normalization for each accepted format.
fn benchmark_address_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("address_parse");

    for (name, raw) in [
        ("hex", "0x037be053f866be6ee6dda11f258bd871b701a8d7"),
        ("ethereum_uri", "ethereum:0x037be053f866be6ee6dda11f258bd871b701a8d7"),
        ("icap", "iban:XE420ENF06QHAD2B0729XZJ1OU26UVM0TSN"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), raw, |b, raw| {
            b.iter(|| black_box(EthereumAddress::parse(black_box(raw)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_strings,
    benchmark_lists,
    benchmark_reject_deep_nesting,
    benchmark_decode_transaction,
    benchmark_sign_transaction,
    benchmark_address_parse,
);

criterion_main!(benches);
