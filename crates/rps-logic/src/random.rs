//! Deterministic randomness for opponents
//!
//! Every random choice an opponent makes comes from a [`SeededRng`], so a
//! session started with `--seed` plays out the same way twice.

const GOLDEN: u64 = 0x9e37_79b9_7f4a_7c15;

/// splitmix64 finaliser, used to spread seed bytes over the whole state
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// xorshift64* generator keyed by a 32-byte seed and a stream index
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Independent streams over one seed give each opponent (or each side of
    /// an exhibition) its own sequence.
    pub fn new(seed: &[u8; 32], stream: u32) -> Self {
        let state = seed
            .chunks_exact(8)
            .map(|c| u64::from_le_bytes(c.try_into().unwrap_or_default()))
            .fold(mix(u64::from(stream).wrapping_add(GOLDEN)), |acc, word| {
                mix(acc ^ word)
            });

        // the all-zero state is a fixed point
        Self {
            state: if state == 0 { GOLDEN } else { state },
        }
    }

    /// Seed from a single integer, as given on the command line
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(&bytes, 0)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// High half of the next output; the low bits of xorshift* are weaker
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform-ish value in `[0, max)`; 0 when `max` is 0
    pub fn next_range(&mut self, max: u32) -> u32 {
        match max {
            0 => 0,
            _ => self.next_u32() % max,
        }
    }

    /// Pick one element uniformly, `None` if the slice is empty
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_range(items.len() as u32) as usize;
        items.get(idx)
    }

    /// 32 fresh bytes, e.g. to seed an exhibition off a session stream
    pub fn next_seed(&mut self) -> [u8; 32] {
        let mut seed = [0u8; 32];
        for chunk in seed.chunks_mut(8) {
            chunk.copy_from_slice(&self.next_u64().to_le_bytes());
        }
        seed
    }
}
