//! Reusable cell-key deduper for the candidate (dead-cell) phase.
//!
//! Open-addressed linear-probing hash set of [`CellKey`]. Slots are lazily
//! cleared with an epoch stamp, so each generation can start a fresh set
//! without touching the full backing array.

use super::codec::CellKey;

const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

#[derive(Clone, Copy)]
struct Slot {
    key: u128,
    stamp: u32,
}

impl Slot {
    const EMPTY: Self = Self { key: 0, stamp: 0 };
}

#[inline(always)]
fn key_hash(key: u128) -> u64 {
    // Pairing keys along a diagonal are consecutive; mix both halves so they
    // spread across the table.
    const ML: u64 = 0x517c_c1b7_2722_0a95;
    const MH: u64 = 0x6c62_272e_07bb_0142;
    let lo = (key as u64).wrapping_mul(ML);
    let hi = ((key >> 64) as u64).wrapping_mul(MH);
    (lo ^ hi.rotate_right(32)).rotate_left(5)
}

fn slots_for(keys: usize) -> usize {
    keys.saturating_mul(LOAD_DEN)
        .div_ceil(LOAD_NUM)
        .next_power_of_two()
        .max(16)
}

pub struct KeySet {
    slots: Vec<Slot>,
    mask: usize,
    stamp: u32,
    len: usize,
}

impl Default for KeySet {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySet {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(cap: usize) -> Self {
        let slots = slots_for(cap);
        Self {
            slots: vec![Slot::EMPTY; slots],
            mask: slots - 1,
            stamp: 1,
            len: 0,
        }
    }

    /// Forget every key inserted so far in O(1).
    #[inline]
    pub fn begin_step(&mut self) {
        self.len = 0;
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.stamp = 1;
            for slot in &mut self.slots {
                slot.stamp = 0;
            }
        }
    }

    #[inline]
    pub fn reserve_for(&mut self, keys: usize) {
        if keys == 0 {
            return;
        }
        let needed = slots_for(keys);
        if needed > self.slots.len() {
            self.resize(needed);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    fn needs_grow(&self) -> bool {
        self.len * LOAD_DEN >= self.slots.len() * LOAD_NUM
    }

    fn resize(&mut self, new_slots: usize) {
        debug_assert!(new_slots.is_power_of_two());
        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::EMPTY; new_slots]);
        self.mask = new_slots - 1;
        self.len = 0;

        for slot in old_slots {
            if slot.stamp == self.stamp {
                self.insert_rehash(slot.key);
            }
        }
    }

    #[inline(always)]
    fn insert_rehash(&mut self, key: u128) {
        let mut pos = key_hash(key) as usize & self.mask;
        while self.slots[pos].stamp == self.stamp {
            pos = (pos + 1) & self.mask;
        }
        self.slots[pos] = Slot {
            key,
            stamp: self.stamp,
        };
        self.len += 1;
    }

    /// Insert a key.
    /// Returns `true` if newly inserted, `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, key: CellKey) -> bool {
        if self.needs_grow() {
            self.resize((self.slots.len() * 2).max(16));
        }

        let raw = key.raw();
        let mut pos = key_hash(raw) as usize & self.mask;
        loop {
            let slot = &mut self.slots[pos];
            if slot.stamp != self.stamp {
                *slot = Slot {
                    key: raw,
                    stamp: self.stamp,
                };
                self.len += 1;
                return true;
            }
            if slot.key == raw {
                return false;
            }
            pos = (pos + 1) & self.mask;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::KeySet;
    use crate::sparselife::codec::encode;

    #[test]
    fn dedups_within_step_and_resets_across_steps() {
        let a = encode(1, 2).unwrap();
        let b = encode(-5, 9).unwrap();
        let mut set = KeySet::new();
        set.begin_step();
        assert!(set.insert(a));
        assert!(!set.insert(a));
        assert!(set.insert(b));
        assert_eq!(set.len(), 2);

        set.begin_step();
        assert_eq!(set.len(), 0);
        assert!(set.insert(a));
        assert!(!set.insert(a));
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut set = KeySet::with_capacity(8);
        set.begin_step();
        for i in 0..10_000i64 {
            assert!(set.insert(encode(i, -i).unwrap()));
        }
        assert_eq!(set.len(), 10_000);
        for i in 0..10_000i64 {
            assert!(!set.insert(encode(i, -i).unwrap()));
        }
    }

    #[test]
    fn reserve_keeps_existing_keys() {
        let mut set = KeySet::with_capacity(4);
        set.begin_step();
        for i in 0..10i64 {
            set.insert(encode(i, i).unwrap());
        }
        set.reserve_for(50_000);
        assert_eq!(set.len(), 10);
        for i in 0..10i64 {
            assert!(!set.insert(encode(i, i).unwrap()));
        }
    }

    #[test]
    fn stamp_wraparound_clears_stale_slots() {
        let key = encode(3, 3).unwrap();
        let mut set = KeySet::new();
        set.stamp = u32::MAX;
        assert!(set.insert(key));
        set.begin_step();
        assert_eq!(set.stamp, 1);
        assert!(set.insert(key));
    }
}
