use crate::ring::RingElement;

/// Splits a packed `2r`-bit buffer into its low-`r`-bit and high-`r`-bit
/// halves (§4.1). When `r` is not a multiple of 8 the boundary falls inside a
/// byte, so the high half must be reassembled by shifting each source byte
/// pair; when `r` is byte-aligned the halves are a straight copy and the
/// byte-pair shift (which would otherwise need a shift-by-8 on a `u8`, which
/// Rust panics on) is skipped entirely.
pub(crate) fn split_e<const R_SIZE: usize, const N_SIZE: usize>(
    e: &[u8; N_SIZE],
    r_bits: usize,
) -> (RingElement<R_SIZE>, RingElement<R_SIZE>) {
    let lead = (r_bits % 8) as u32;

    let mut e0_bytes = [0u8; R_SIZE];
    e0_bytes.copy_from_slice(&e[..R_SIZE]);

    let mut e1_bytes = [0u8; R_SIZE];
    if lead == 0 {
        let tail_len = N_SIZE - R_SIZE;
        e1_bytes[..tail_len].copy_from_slice(&e[R_SIZE..N_SIZE]);
    } else {
        let trail = 8 - lead;
        for i in R_SIZE..N_SIZE {
            let hi = e[i] << trail;
            let lo = e[i - 1] >> lead;
            e1_bytes[i - R_SIZE] = hi | lo;
        }
        if N_SIZE < 2 * R_SIZE {
            e1_bytes[R_SIZE - 1] = e[N_SIZE - 1] >> lead;
        }
    }

    let mut e0 = RingElement::from_bytes(e0_bytes);
    let mut e1 = RingElement::from_bytes(e1_bytes);
    e0.mask(r_bits);
    e1.mask(r_bits);
    (e0, e1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_byte_aligned_boundary_is_a_straight_copy() {
        // r = 16 -> R_SIZE = 2, N_SIZE = 4, boundary falls exactly on a byte.
        let e: [u8; 4] = [0xAB, 0xCD, 0x12, 0x34];
        let (e0, e1) = split_e::<2, 4>(&e, 16);
        assert_eq!(e0.0, [0xAB, 0xCD]);
        assert_eq!(e1.0, [0x12, 0x34]);
    }

    #[test]
    fn split_non_aligned_boundary_reassembles_bit_stream() {
        // r = 12 -> R_SIZE = 2, N_SIZE = 3 (24 bits covers 2r=24 exactly).
        // Low 12 bits come from e[0] and the low nibble of e[1].
        // High 12 bits are e[1]'s top nibble followed by e[2].
        let e: [u8; 3] = [0b1111_0000, 0b1010_1100, 0b0110_0110];
        let (e0, e1) = split_e::<2, 3>(&e, 12);
        assert_eq!(e0.0, [0b1111_0000, 0b0000_1100]);
        assert_eq!(e1.0, [0b0110_1010, 0b0000_0110]);
    }
}
