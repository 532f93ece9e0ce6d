//! Hashing of arena state for replay comparison.
//!
//! FNV-1a over every slot: occupancy, payload and raw link. Free slots are
//! included, so two arenas with the same chain but different free-slot
//! contents hash differently. Not cryptographic.

use statlink_core::{SlotIndex, SlotRead};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Hash recorded for steps taken while the simulator is uninitialized.
pub const UNINITIALIZED_HASH: u64 = FNV_OFFSET;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash every slot of `source`.
///
/// Folds in the capacity first, then per slot the occupancy byte, the
/// payload as a `u32` (0 for the empty sentinel) and the raw link.
pub fn state_hash(source: &dyn SlotRead) -> u64 {
    let capacity = source.capacity();
    let mut hash = fnv1a_u64(FNV_OFFSET, capacity as u64);

    for i in 0..capacity {
        let Ok(raw) = u32::try_from(i) else { break };
        let idx = SlotIndex(raw);
        let Some(node) = source.node(idx) else {
            continue;
        };
        hash = fnv1a_byte(hash, u8::from(source.is_occupied(idx)));
        hash = fnv1a_u32(hash, node.data.map_or(0, |p| u32::from(p.get())));
        hash = fnv1a_u64(hash, node.next.raw() as u64);
    }
    hash
}

/// Hash of an arena configuration, stored in the journal header.
pub fn config_hash(capacity: u32) -> u64 {
    fnv1a_u32(FNV_OFFSET, capacity)
}
