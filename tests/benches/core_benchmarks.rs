//! # BOSSWAVE Core Benchmarks
//!
//! | Component | Operation |
//! |-----------|-----------|
//! | U | `restrict_by`, cached vs uncached |
//! | F | frame serialise and parse at several payload sizes |
//! | C | Ed25519 verify, hybrid DH, BLS aggregate verify by chain length |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bw_crypto::{aggregate, ed25519_calc_secret, verify_aggregate, BlsKeyPair, Ed25519KeyPair};
use bw_uri::{restrict_by, RestrictionCache};
use bw_wire::{read_frame, Command, FrameBuilder, ObjectRegistry, OpaquePayloadObject, WireConfig};

// ============================================================================
// URI ALGEBRA
// ============================================================================

fn bench_restrict(c: &mut Criterion) {
    let mut group = c.benchmark_group("uri-restrict");

    let cases = [
        ("plus", "a/+/c", "a/b/c"),
        ("left-star", "a/*", "a/b/c"),
        ("both-stars", "a/b/*/x/y", "a/b/c/d/*/y"),
        ("disjoint", "a/b/c/*/x/y/z", "a/b/1/*/2/y/z"),
    ];
    for (name, from, by) in cases {
        group.bench_function(BenchmarkId::new("direct", name), |b| {
            b.iter(|| black_box(restrict_by(black_box(from), black_box(by)).is_ok()))
        });
    }

    let cache = RestrictionCache::new(1024).unwrap();
    group.bench_function("cached-hit", |b| {
        b.iter(|| black_box(cache.restrict("a/b/*/x/y", "a/b/c/d/*/y").is_ok()))
    });

    group.finish();
}

// ============================================================================
// FRAME CODEC
// ============================================================================

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame-codec");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let registry = ObjectRegistry::with_defaults();
    let config = WireConfig::default();

    for size in [64usize, 4 * 1024, 256 * 1024] {
        let frame = FrameBuilder::new(Command::PUBLISH, 1)
            .header("uri", "castle/kitchen/temp")
            .payload_object(Arc::new(OpaquePayloadObject::new(0x4000_0000, vec![0xAB; size])))
            .build()
            .unwrap();
        let wire = frame.to_bytes();

        group.throughput(Throughput::Bytes(wire.len() as u64));
        group.bench_with_input(BenchmarkId::new("serialise", size), &frame, |b, frame| {
            b.iter(|| black_box(frame.to_bytes()))
        });
        group.bench_with_input(BenchmarkId::new("parse", size), &wire, |b, wire| {
            b.iter(|| {
                let mut input = wire.as_ref();
                runtime
                    .block_on(read_frame(&mut input, &registry, &config))
                    .is_ok()
            })
        });
    }

    group.finish();
}

// ============================================================================
// CRYPTO
// ============================================================================

fn bench_crypto(c: &mut Criterion) {
    let mut group = c.benchmark_group("crypto");
    group.measurement_time(Duration::from_secs(10));
    let mut rng = StdRng::seed_from_u64(1);

    let alice = Ed25519KeyPair::generate(&mut rng);
    let bob = Ed25519KeyPair::generate(&mut rng);
    let message = b"publish castle/kitchen/temp";
    let signature = alice.sign(message);

    group.bench_function("ed25519-verify", |b| {
        b.iter(|| black_box(alice.public_key().verify(message, &signature)))
    });
    group.bench_function("hybrid-dh", |b| {
        b.iter(|| black_box(ed25519_calc_secret(&alice.to_seed(), bob.public_key().as_bytes()).is_ok()))
    });

    for chain_len in [1usize, 4, 16] {
        let keys: Vec<BlsKeyPair> = (0..chain_len)
            .map(|_| BlsKeyPair::generate(&mut rng).unwrap())
            .collect();
        let messages: Vec<Vec<u8>> = (0..chain_len)
            .map(|i| format!("dot {i}").into_bytes())
            .collect();
        let message_refs: Vec<&[u8]> = messages.iter().map(Vec::as_slice).collect();
        let public_keys: Vec<_> = keys.iter().map(BlsKeyPair::public_key).collect();
        let signatures: Vec<_> = keys
            .iter()
            .zip(&message_refs)
            .map(|(key, message)| key.sign(message))
            .collect();
        let aggregated = aggregate(&signatures).unwrap();

        group.throughput(Throughput::Elements(chain_len as u64));
        group.bench_with_input(
            BenchmarkId::new("bls-verify-aggregate", chain_len),
            &aggregated,
            |b, sig| b.iter(|| black_box(verify_aggregate(&public_keys, &message_refs, sig))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_restrict, bench_frames, bench_crypto);
criterion_main!(benches);
