#![no_std]
#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Implements the BIKE-1 Round-2 post-quantum Key-Encapsulation Mechanism over quasi-cyclic
//! MDPC codes. See the BIKE Round-2 submission to the NIST PQC standardization process.
//
// Functionality map per the BIKE-1 Round-2 construction:
//
// Split operator (packed 2r-bit buffer -> (e0, e1))   --> split.rs
// H: extract-then-expand error derivation               --> kem.rs (function_h)
// get_ss: shared-secret KDF                              --> kem.rs (get_ss)
// Public-key computation (g, h0, h1) -> (f0, f1)         --> kem.rs (bike_pk_gen)
// Keypair / Encaps / Decaps orchestration                --> kem.rs
// QC-MDPC syndrome + bit-flipping decoder                --> decoder.rs
// Binary-polynomial ring arithmetic mod (x^r - 1)         --> gf2x.rs
// RingElement storage and bit/byte invariants             --> ring.rs
// Uniform and sparse-representation sampling              --> sampler.rs
// SHA-384, AES-256-CTR PRF, constant-time helpers          --> primitives.rs
//
// The three parameter sets are modules in this file with injected macro code that
// connects them to the orchestration in kem.rs.

// Supports automatically clearing sensitive data on drop
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::traits::SerDes;

mod decoder;
mod gf2x;
mod kem;
mod primitives;
mod ring;
mod sampler;
mod split;

/// All functionality is covered by traits, such that consumers can utilize trait objects as
/// desired.
pub mod traits;

/// Shared Secret Key length for all BIKE parameter sets, in bytes.
pub const SS_LEN: usize = 32;

/// The (opaque) shared secret established by a successful (or implicitly-rejected)
/// decapsulation.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; SS_LEN]);

impl SerDes for SharedSecret {
    type ByteArray = [u8; SS_LEN];

    fn into_bytes(self) -> Self::ByteArray { self.0 }

    fn try_from_bytes(ss: Self::ByteArray) -> Result<Self, &'static str> { Ok(SharedSecret(ss)) }
}

// Constant-time equality: a shared secret must never be compared via a short-circuiting `==`
// on its raw bytes.
impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool { crate::primitives::ct_eq(&self.0, &other.0) }
}

// This common functionality is injected into each parameter-set module.
macro_rules! functionality {
    () => {
        use crate::kem::{
            bike_decaps_internal, bike_encaps_internal, bike_keypair_internal, get_ss,
            SecretKeyMaterial,
        };
        use crate::ring::RingElement;
        use crate::traits::{Decaps, Encaps, KeyGen, SerDes};
        use crate::SharedSecret;
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};

        /// Correctly-sized public key specific to this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct PublicKey([u8; PK_LEN]);

        /// Correctly-sized secret key specific to this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SecretKey([u8; SK_LEN]);

        /// Correctly-sized ciphertext specific to this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct Ciphertext([u8; CT_LEN]);

        /// Key generation produces a `(PublicKey, SecretKey)` pair. The public key may be sent
        /// to any party; the secret key must remain private.
        pub struct KG();

        impl KeyGen for KG {
            type PublicKey = PublicKey;
            type SecretKey = SecretKey;

            fn try_keygen_with_rng(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(PublicKey, SecretKey), &'static str> {
                let kp = bike_keypair_internal::<R_SIZE, DV, PRF_DV_LEN, PRF_R_LEN>(rng, R_BITS)?;

                let mut pk_bytes = [0u8; PK_LEN];
                pk_bytes[..R_SIZE].copy_from_slice(&kp.pk.f0.0);
                pk_bytes[R_SIZE..].copy_from_slice(&kp.pk.f1.0);

                let mut sk_bytes = [0u8; SK_LEN];
                let mut off = 0;
                sk_bytes[off..off + R_SIZE].copy_from_slice(&kp.sk.h0.0);
                off += R_SIZE;
                sk_bytes[off..off + R_SIZE].copy_from_slice(&kp.sk.h1.0);
                off += R_SIZE;
                for &idx in kp.sk.wlist0.iter() {
                    sk_bytes[off..off + 4].copy_from_slice(&idx.to_le_bytes());
                    off += 4;
                }
                for &idx in kp.sk.wlist1.iter() {
                    sk_bytes[off..off + 4].copy_from_slice(&idx.to_le_bytes());
                    off += 4;
                }
                sk_bytes[off..off + R_SIZE].copy_from_slice(&kp.sk.sigma0.0);
                off += R_SIZE;
                sk_bytes[off..off + R_SIZE].copy_from_slice(&kp.sk.sigma1.0);

                Ok((PublicKey(pk_bytes), SecretKey(sk_bytes)))
            }
        }

        impl Encaps for PublicKey {
            type CipherText = Ciphertext;
            type SharedSecretKey = SharedSecret;

            fn try_encaps_with_rng(
                &self, rng: &mut impl CryptoRngCore,
            ) -> Result<(SharedSecret, Ciphertext), &'static str> {
                let mut f0 = RingElement::<R_SIZE>::zero();
                f0.0.copy_from_slice(&self.0[..R_SIZE]);
                let mut f1 = RingElement::<R_SIZE>::zero();
                f1.0.copy_from_slice(&self.0[R_SIZE..]);

                let enc = bike_encaps_internal::<R_SIZE, N_SIZE, T, SS_LEN, PRF_R_LEN, PRF_T_LEN>(
                    rng, R_BITS, &f0, &f1,
                )?;

                let mut ct_bytes = [0u8; CT_LEN];
                ct_bytes[..R_SIZE].copy_from_slice(&enc.c0.0);
                ct_bytes[R_SIZE..].copy_from_slice(&enc.c1.0);

                Ok((SharedSecret(enc.ss), Ciphertext(ct_bytes)))
            }
        }

        impl Decaps for SecretKey {
            type CipherText = Ciphertext;
            type SharedSecretKey = SharedSecret;

            fn decaps(&self, ct: &Ciphertext) -> SharedSecret {
                let mut off = 0;
                let mut h0 = RingElement::<R_SIZE>::zero();
                h0.0.copy_from_slice(&self.0[off..off + R_SIZE]);
                off += R_SIZE;
                let mut h1 = RingElement::<R_SIZE>::zero();
                h1.0.copy_from_slice(&self.0[off..off + R_SIZE]);
                off += R_SIZE;

                let mut wlist0 = [0u32; DV];
                for slot in wlist0.iter_mut() {
                    *slot = u32::from_le_bytes(self.0[off..off + 4].try_into().unwrap());
                    off += 4;
                }
                let mut wlist1 = [0u32; DV];
                for slot in wlist1.iter_mut() {
                    *slot = u32::from_le_bytes(self.0[off..off + 4].try_into().unwrap());
                    off += 4;
                }

                let mut sigma0 = RingElement::<R_SIZE>::zero();
                sigma0.0.copy_from_slice(&self.0[off..off + R_SIZE]);
                off += R_SIZE;
                let mut sigma1 = RingElement::<R_SIZE>::zero();
                sigma1.0.copy_from_slice(&self.0[off..off + R_SIZE]);

                let mut sk = SecretKeyMaterial { h0, h1, wlist0, wlist1, sigma0, sigma1 };

                let mut c0 = RingElement::<R_SIZE>::zero();
                c0.0.copy_from_slice(&ct.0[..R_SIZE]);
                let mut c1 = RingElement::<R_SIZE>::zero();
                c1.0.copy_from_slice(&ct.0[R_SIZE..]);

                let ss = bike_decaps_internal::<R_SIZE, N_SIZE, DV, T, SS_LEN, PRF_T_LEN>(
                    R_BITS, MAX_DECODER_ITERS, &sk, &c0, &c1,
                );
                sk.zeroize();
                SharedSecret(ss)
            }
        }

        impl SerDes for PublicKey {
            type ByteArray = [u8; PK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(pk: Self::ByteArray) -> Result<Self, &'static str> { Ok(PublicKey(pk)) }
        }

        impl SerDes for SecretKey {
            type ByteArray = [u8; SK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(sk: Self::ByteArray) -> Result<Self, &'static str> {
                // Validates that both embedded sparse index lists are sorted and lie within
                // [0, R_BITS), per the SparseList(dv) invariant.
                let mut off = R_SIZE * 2;
                let mut prev = None;
                for _ in 0..DV {
                    let v = u32::from_le_bytes(sk[off..off + 4].try_into().unwrap());
                    if v as usize >= R_BITS {
                        return Err("secret key sparse index out of range");
                    }
                    if let Some(p) = prev {
                        if v <= p {
                            return Err("secret key sparse index list not sorted");
                        }
                    }
                    prev = Some(v);
                    off += 4;
                }
                prev = None;
                for _ in 0..DV {
                    let v = u32::from_le_bytes(sk[off..off + 4].try_into().unwrap());
                    if v as usize >= R_BITS {
                        return Err("secret key sparse index out of range");
                    }
                    if let Some(p) = prev {
                        if v <= p {
                            return Err("secret key sparse index list not sorted");
                        }
                    }
                    prev = Some(v);
                    off += 4;
                }
                Ok(SecretKey(sk))
            }
        }

        impl SerDes for Ciphertext {
            type ByteArray = [u8; CT_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ct: Self::ByteArray) -> Result<Self, &'static str> { Ok(Ciphertext(ct)) }
        }
    };
}

/// Functionality for the BIKE-1 Round-2 parameter set targeting NIST security category 1.
#[cfg(feature = "bike-l1")]
pub mod bike_l1 {
    //! Security category 1 (r = 12323, dv = 71, t = 134).
    //!
    //! Typical usage flow:
    //! 1. The originator runs `KG::try_keygen()` to get a `PublicKey` and `SecretKey`.
    //! 2. The originator serializes the public key via `into_bytes()` and sends it to the
    //!    remote party.
    //! 3. The remote party deserializes it via `try_from_bytes(...)` and runs `try_encaps()` to
    //!    get a shared secret and ciphertext.
    //! 4. The remote party serializes the ciphertext and sends it to the originator.
    //! 5. The originator deserializes it and calls `secret_key.decaps(&ciphertext)` to recover
    //!    the same shared secret.

    const R_BITS: usize = 12323;
    const DV: usize = 71;
    const T: usize = 134;
    const R_SIZE: usize = 1541;
    const N_SIZE: usize = 3081;
    const SS_LEN: usize = crate::SS_LEN;
    const PRF_DV_LEN: usize = DV * 64;
    const PRF_T_LEN: usize = T * 64;
    const PRF_R_LEN: usize = R_SIZE;
    const MAX_DECODER_ITERS: usize = 8;

    /// Serialized Public Key length (in bytes).
    pub const PK_LEN: usize = 2 * R_SIZE;
    /// Serialized Secret Key length (in bytes).
    pub const SK_LEN: usize = 2 * R_SIZE + 8 * DV + 2 * R_SIZE;
    /// Serialized Ciphertext length (in bytes).
    pub const CT_LEN: usize = 2 * R_SIZE;

    functionality!();
}

/// Functionality for the BIKE-1 Round-2 parameter set targeting NIST security category 3.
#[cfg(feature = "bike-l3")]
pub mod bike_l3 {
    //! Security category 3 (r = 24659, dv = 103, t = 199).

    const R_BITS: usize = 24659;
    const DV: usize = 103;
    const T: usize = 199;
    const R_SIZE: usize = 3083;
    const N_SIZE: usize = 6165;
    const SS_LEN: usize = crate::SS_LEN;
    const PRF_DV_LEN: usize = DV * 64;
    const PRF_T_LEN: usize = T * 64;
    const PRF_R_LEN: usize = R_SIZE;
    const MAX_DECODER_ITERS: usize = 8;

    /// Serialized Public Key length (in bytes).
    pub const PK_LEN: usize = 2 * R_SIZE;
    /// Serialized Secret Key length (in bytes).
    pub const SK_LEN: usize = 2 * R_SIZE + 8 * DV + 2 * R_SIZE;
    /// Serialized Ciphertext length (in bytes).
    pub const CT_LEN: usize = 2 * R_SIZE;

    functionality!();
}

/// Functionality for the BIKE-1 Round-2 parameter set targeting NIST security category 5.
#[cfg(feature = "bike-l5")]
pub mod bike_l5 {
    //! Security category 5 (r = 40973, dv = 137, t = 264).

    const R_BITS: usize = 40973;
    const DV: usize = 137;
    const T: usize = 264;
    const R_SIZE: usize = 5122;
    const N_SIZE: usize = 10244;
    const SS_LEN: usize = crate::SS_LEN;
    const PRF_DV_LEN: usize = DV * 64;
    const PRF_T_LEN: usize = T * 64;
    const PRF_R_LEN: usize = R_SIZE;
    const MAX_DECODER_ITERS: usize = 8;

    /// Serialized Public Key length (in bytes).
    pub const PK_LEN: usize = 2 * R_SIZE;
    /// Serialized Secret Key length (in bytes).
    pub const SK_LEN: usize = 2 * R_SIZE + 8 * DV + 2 * R_SIZE;
    /// Serialized Ciphertext length (in bytes).
    pub const CT_LEN: usize = 2 * R_SIZE;

    functionality!();
}
