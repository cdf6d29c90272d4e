use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicI64, Ordering};

/// 当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 used to seed plan entity ids.
///
/// Layout (53 bits, safe for JavaScript consumers of exported snapshots):
///   - 41 bits: milliseconds since 2025-01-01 UTC
///   - 12 bits: random
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    const EPOCH_MS: i64 = 1_735_689_600_000;
    let ts = (now_millis() - EPOCH_MS).max(0) & 0x1FF_FFFF_FFFF;
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000);
    (ts << 12) | rand_bits
}

/// Monotonic id source for areas, tables and seats of one plan session.
///
/// Seeded once from [`snowflake_id`] so that ids minted by different editors
/// rarely collide, then incremented so bulk generation (seat grids, banquet
/// layouts) never produces duplicates within a session.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicI64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::starting_at(snowflake_id())
    }

    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }

    /// Never hand out an id at or below `id` (used after loading a plan).
    pub fn observe(&self, id: i64) {
        self.next.fetch_max(id + 1, Ordering::Relaxed);
    }

    pub fn allocate(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase hex SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
