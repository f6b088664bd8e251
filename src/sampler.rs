use crate::primitives::prf_bytes;
use crate::ring::RingElement;

/// A keyed pseudorandom byte stream, generated by one AES-256-CTR context
/// seeded from a single 32-byte seed (§4.2, §4.9). Buffers the whole stream
/// up front since every call site in this crate needs a bounded, known
/// amount of randomness.
pub(crate) struct Prf<const LEN: usize> {
    bytes: [u8; LEN],
    pos: usize,
}

impl<const LEN: usize> Prf<LEN> {
    pub(crate) fn new(seed: &[u8; 32]) -> Self {
        let mut bytes = [0u8; LEN];
        prf_bytes(seed, &mut bytes);
        Self { bytes, pos: 0 }
    }

    /// Pulls the next 4-byte little-endian word from the stream. Returns
    /// `None` once the fixed-size buffer is exhausted, which the caller
    /// surfaces as the PRF-exhaustion error of §9 rather than panicking.
    fn next_u32(&mut self) -> Option<u32> {
        if self.pos + 4 > LEN {
            return None;
        }
        let word = u32::from_le_bytes(self.bytes[self.pos..self.pos + 4].try_into().unwrap());
        self.pos += 4;
        Some(word)
    }

    fn next_byte(&mut self) -> Option<u8> {
        if self.pos >= LEN {
            return None;
        }
        let b = self.bytes[self.pos];
        self.pos += 1;
        Some(b)
    }
}

/// Fills `out` with `r_bits` independent uniform bits packed into `R_SIZE`
/// bytes, masking the unused tail (§4.2 `sample_uniform_r_bits`).
pub(crate) fn sample_uniform_r_bits<const R_SIZE: usize, const PRF_LEN: usize>(
    seed: &[u8; 32],
    r_bits: usize,
) -> Result<RingElement<R_SIZE>, &'static str> {
    let mut prf = Prf::<PRF_LEN>::new(seed);
    let mut bytes = [0u8; R_SIZE];
    for b in bytes.iter_mut() {
        *b = prf.next_byte().ok_or("PRF stream exhausted")?;
    }
    let mut e = RingElement::from_bytes(bytes);
    e.mask(r_bits);
    Ok(e)
}

/// Draws `W` distinct positions in `0..r_bits` from a single PRF context,
/// using Lemire-style rejection sampling to avoid modulo bias, and rejecting
/// duplicates by scanning the whole accepted set every time (no early exit),
/// so that running time depends only on `W` and `r_bits`, not on which
/// values happen to collide (§4.2 `generate_sparse_rep`).
pub(crate) fn generate_sparse_rep<const W: usize, const PRF_LEN: usize>(
    seed: &[u8; 32],
    r_bits: usize,
) -> Result<[u32; W], &'static str> {
    let mut prf = Prf::<PRF_LEN>::new(seed);
    let mut out = [0u32; W];
    let mut filled = 0usize;
    let bound = r_bits as u64;
    let limit = (u64::from(u32::MAX) + 1) / bound * bound;

    while filled < W {
        let word = prf.next_u32().ok_or("PRF stream exhausted drawing sparse support")?;
        let word = u64::from(word);
        if word >= limit {
            continue; // reject to avoid modulo bias
        }
        let candidate = (word % bound) as u32;

        let mut is_duplicate = false;
        for i in 0..filled {
            is_duplicate |= out[i] == candidate;
        }
        if !is_duplicate {
            out[filled] = candidate;
            filled += 1;
        }
    }
    // The SparseList(w) invariant (§3) requires a sorted, duplicate-free index
    // list; `sort_unstable` is an in-place algorithm so this needs no `alloc`.
    out.sort_unstable();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_rep_has_distinct_entries_and_is_in_range() {
        let seed = [3u8; 32];
        let r_bits = 101;
        let idx: [u32; 10] = generate_sparse_rep::<10, 4096>(&seed, r_bits).unwrap();
        for &v in idx.iter() {
            assert!((v as usize) < r_bits);
        }
        for i in 0..idx.len() {
            for j in (i + 1)..idx.len() {
                assert_ne!(idx[i], idx[j]);
            }
        }
    }

    #[test]
    fn sparse_rep_is_deterministic_given_same_seed() {
        let seed = [9u8; 32];
        let a: [u32; 8] = generate_sparse_rep::<8, 2048>(&seed, 89).unwrap();
        let b: [u32; 8] = generate_sparse_rep::<8, 2048>(&seed, 89).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn uniform_r_bits_masks_tail() {
        let seed = [1u8; 32];
        let e: RingElement<2> = sample_uniform_r_bits::<2, 64>(&seed, 12).unwrap();
        assert_eq!(e.0[1] & 0xF0, 0);
    }
}
