//! 32-bit FNV-1a.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Streaming FNV-1a hasher. Writing `a` then `b` yields the same digest as
/// hashing `a + b` in one go.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a {
    state: u32,
}

impl Fnv1a {
    pub fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }

    pub fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u32;
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    pub fn finish(&self) -> u32 {
        self.state
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self::new()
    }
}

pub fn digest(s: &str) -> u32 {
    let mut hasher = Fnv1a::new();
    hasher.write(s.as_bytes());
    hasher.finish()
}

/// `digest(addr + key)` without building the concatenated string.
pub fn placement_digest(addr: &str, key: &str) -> u32 {
    let mut hasher = Fnv1a::new();
    hasher.write(addr.as_bytes());
    hasher.write(key.as_bytes());
    hasher.finish()
}
