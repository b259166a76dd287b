use hmac::{Hmac, Mac};
use sha2::Sha256;

// Deterministic reel RNG using an HMAC construction
// seed + nonce -> HMAC-SHA256 -> bytes -> floats in [0,1)

pub type HmacSha256 = Hmac<Sha256>;

pub fn derive_hash_hex(input: &[u8]) -> String {
    use sha2::Digest;
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

pub fn derive_floats(hmac_bytes: &[u8], count: usize) -> Vec<f64> {
    // Convert successive 4-byte chunks into u32 then map to [0,1)
    let mut out = Vec::with_capacity(count);
    let mut buffer = hmac_bytes.to_vec();
    let mut i = 0usize;
    while out.len() < count {
        if i + 4 > buffer.len() {
            // extend the buffer deterministically by hashing the previous buffer
            let hex = derive_hash_hex(&buffer);
            buffer = hex::decode(hex).expect("valid hex");
            i = 0;
            continue;
        }
        let chunk = &buffer[i..i + 4];
        let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let f = (v as f64) / (u32::MAX as f64 + 1.0);
        out.push(f);
        i += 4;
    }
    out
}

/// Seedable draw source for the reels. Every call to [`ReelRng::next_floats`]
/// consumes one nonce, so a session replayed from the same seed produces the
/// same sequence of draws.
pub struct ReelRng {
    seed: String,
    nonce: u64,
}

impl ReelRng {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            nonce: 0,
        }
    }

    pub fn with_nonce(seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            seed: seed.into(),
            nonce,
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Hex fingerprint of the seed, safe to log.
    pub fn seed_hash_hex(&self) -> String {
        derive_hash_hex(self.seed.as_bytes())
    }

    fn hmac_bytes(&self) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.seed.as_bytes()).expect("HMAC key");
        let msg = format!("spin:{}", self.nonce);
        mac.update(msg.as_bytes());
        let res = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&res);
        out
    }

    pub fn next_floats(&mut self, count: usize) -> Vec<f64> {
        let bytes = self.hmac_bytes();
        self.nonce += 1;
        derive_floats(&bytes, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = ReelRng::new("seed");
        let mut rng2 = ReelRng::new("seed");
        assert_eq!(rng1.seed_hash_hex(), rng2.seed_hash_hex());
        assert_eq!(rng1.next_floats(5), rng2.next_floats(5));
        assert_eq!(rng1.next_floats(5), rng2.next_floats(5));
    }

    #[test]
    fn test_nonce_advances() {
        let mut rng = ReelRng::new("seed");
        let first = rng.next_floats(3);
        let second = rng.next_floats(3);
        assert_ne!(first, second);
        assert_eq!(rng.nonce(), 2);
    }

    #[test]
    fn test_resume_from_nonce() {
        let mut rng = ReelRng::new("seed");
        rng.next_floats(3);
        let mut resumed = ReelRng::with_nonce("seed", 1);
        assert_eq!(rng.next_floats(3), resumed.next_floats(3));
    }

    #[test]
    fn test_floats_in_unit_range() {
        let mut rng = ReelRng::new("seed");
        for f in rng.next_floats(64) {
            assert!((0.0..1.0).contains(&f));
        }
    }
}
