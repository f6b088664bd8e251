use rand_core::CryptoRngCore;

#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// The `KeyGen` trait is defined to allow trait objects.
pub trait KeyGen {
    /// The public key sent from the originator to the remote party.
    type PublicKey;
    /// The private key used by the originator to recover the shared secret.
    type SecretKey;


    /// Generates a public/secret keypair specific to this parameter set, using the OS default
    /// random number generator.
    ///
    /// # Errors
    /// Returns an error if the random number generator fails.
    ///
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(feature = "bike-l1")] {
    /// use bike_kem::bike_l1;  // Could also be bike_l3 or bike_l5.
    /// use bike_kem::traits::{KeyGen, SerDes, Decaps, Encaps};
    ///
    /// let (pk1, sk1) = bike_l1::KG::try_keygen()?;  // Party 1 generates both keys
    /// let pk1_bytes = pk1.into_bytes();  // Party 1 serializes the public key
    ///
    /// let pk2_bytes = pk1_bytes;  // Party 1 sends the public key to party 2
    ///
    /// let pk2 = bike_l1::PublicKey::try_from_bytes(pk2_bytes)?;  // Party 2 deserializes the public key
    /// let (ssk2, ct2) = pk2.try_encaps()?;  // Party 2 generates a shared secret and ciphertext
    /// let ct2_bytes = ct2.into_bytes();  // Party 2 serializes the ciphertext
    ///
    /// let ct1_bytes = ct2_bytes;  // Party 2 sends the ciphertext to party 1
    ///
    /// let ct1 = bike_l1::Ciphertext::try_from_bytes(ct1_bytes)?;  // Party 1 deserializes the ciphertext
    /// let ssk1 = sk1.decaps(&ct1);  // Party 1 runs decaps to recover the shared secret (always succeeds)
    ///
    /// assert!(ssk1 == ssk2);  // Each party has the same shared secret (no Debug impl to print on failure)
    /// # }
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_keygen() -> Result<(Self::PublicKey, Self::SecretKey), &'static str> {
        Self::try_keygen_with_rng(&mut OsRng)
    }


    /// Generates a public/secret keypair using a caller-supplied random number generator.
    ///
    /// # Arguments
    /// * `rng` - A cryptographically secure random number generator implementing `CryptoRngCore`
    ///
    /// # Errors
    /// Returns an error if the random number generator fails, or if rejection sampling exhausts
    /// its PRF budget (cryptographically improbable for the parameter sets this crate ships).
    fn try_keygen_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::PublicKey, Self::SecretKey), &'static str>;
}


/// The `Encaps` trait defines methods for generating a shared secret and ciphertext from a
/// public key.
pub trait Encaps {
    /// The shared secret type generated during encapsulation.
    type SharedSecretKey;
    /// The ciphertext type transmitted to the decapsulating party.
    type CipherText;


    /// Generates a shared secret and ciphertext using the OS default random number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails or the PRF budget is exhausted.
    #[cfg(feature = "default-rng")]
    fn try_encaps(&self) -> Result<(Self::SharedSecretKey, Self::CipherText), &'static str> {
        self.try_encaps_with_rng(&mut OsRng)
    }


    /// Generates a shared secret and ciphertext using a caller-supplied random number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails or the PRF budget is exhausted.
    fn try_encaps_with_rng(
        &self, rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::SharedSecretKey, Self::CipherText), &'static str>;
}


/// The `Decaps` trait defines the method for recovering the shared secret from a secret key and
/// ciphertext. Decoding failure is never surfaced as an `Err`: an invalid ciphertext yields a
/// pseudorandom shared secret indistinguishable from a genuine one (implicit rejection), so
/// there is no secret-dependent branch for a caller, or a timing side channel, to observe.
pub trait Decaps {
    /// The ciphertext type received from the encapsulating party.
    type CipherText;
    /// The shared secret type recovered during decapsulation.
    type SharedSecretKey;


    /// Recovers the shared secret for this ciphertext. Always succeeds; the return type stays
    /// `Self::SharedSecretKey` rather than a `Result` for the same reason.
    fn decaps(&self, ct: &Self::CipherText) -> Self::SharedSecretKey;
}


/// The `SerDes` trait provides methods for serializing and deserializing cryptographic objects
/// to and from fixed-size byte arrays.
pub trait SerDes {
    /// The fixed-size byte array type used for serialization.
    type ByteArray;


    /// Produces a byte array of fixed size specific to the struct being serialized.
    fn into_bytes(self) -> Self::ByteArray;


    /// Consumes a byte array of fixed size specific to the struct being deserialized.
    ///
    /// # Errors
    /// Returns an error on malformed input (e.g. a secret key whose embedded sparse index list
    /// is out of range or not sorted).
    fn try_from_bytes(ba: Self::ByteArray) -> Result<Self, &'static str>
    where
        Self: Sized;
}
