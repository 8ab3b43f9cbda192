//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::hash::{BuildHasherDefault, Hasher};

/// Hashes integer keys to their own value, like `std::hash<int>` in BusTub.
#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }

    fn write_i32(&mut self, n: i32) {
        self.0 = n as u64;
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = u64::from(n);
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
}

pub type IdentityState = BuildHasherDefault<IdentityHasher>;

/// Install a test-writer subscriber so `RUST_LOG=debug cargo test` shows
/// split/evict events. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
