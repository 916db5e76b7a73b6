//! Golden regression digests.
//!
//! Every randomized operation is driven by an all-zero entropy source, so
//! keys, ciphertexts and signatures are fixed. The SHA-256 digests below
//! pin the exact byte output of every parameter set.

use core::convert::Infallible;

use crystals_rs::{kem, sign};
use rand_core::{TryCryptoRng, TryRng};
use sha2::{Digest, Sha256};

/// Entropy source that only ever yields zero bytes.
struct ZeroRng;

impl TryRng for ZeroRng {
    type Error = Infallible;

    fn try_next_u32(&mut self) -> Result<u32, Infallible> {
        Ok(0)
    }

    fn try_next_u64(&mut self) -> Result<u64, Infallible> {
        Ok(0)
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Infallible> {
        dst.fill(0);
        Ok(())
    }
}

impl TryCryptoRng for ZeroRng {}

fn digest(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

fn kem_digests<P: kem::KemParams>() -> (String, String) {
    let mut rng = ZeroRng;
    let (pk, sk) = kem::keypair::<P>(&mut rng);
    let (ct, ss) = kem::encapsulate::<P>(&pk, &mut rng);
    assert_eq!(kem::decapsulate::<P>(&ct, &sk).as_bytes(), ss.as_bytes());
    (
        digest(&[pk.as_bytes(), sk.as_bytes()]),
        digest(&[ct.as_bytes(), ss.as_bytes()]),
    )
}

/// Decapsulation of the zero-coin ciphertext with its first byte flipped.
fn kem_rejection_secret<P: kem::KemParams>() -> String {
    let (pk, sk) = kem::keypair_derand::<P>(&[0; 64]);
    let (ct, _) = kem::encapsulate_derand::<P>(&pk, &[0; 32]);
    let mut bytes = ct.into_bytes();
    bytes.as_mut()[0] ^= 1;
    let ss = kem::decapsulate::<P>(&kem::Ciphertext::from_bytes(bytes), &sk);
    hex::encode(ss.as_bytes())
}

const GOLDEN_MESSAGE: &[u8] = b"crystals golden message";

fn sign_digests<P: sign::SignParams>() -> (String, String) {
    let (pk, sk) = sign::keypair::<P>(&mut ZeroRng);
    let sig = sign::sign::<P>(&sk, GOLDEN_MESSAGE).unwrap();
    assert_eq!(sign::verify::<P>(&pk, GOLDEN_MESSAGE, &sig), Ok(()));
    (
        digest(&[pk.as_bytes(), sk.as_bytes()]),
        digest(&[sig.as_bytes()]),
    )
}

#[test]
fn kyber512_golden() {
    let (keys, encaps) = kem_digests::<kem::Kyber512>();
    assert_eq!(keys, "72fe66343330ec73ce0a829f2f350ce5e889a9a1e1a04b050247c9f4918d2891");
    assert_eq!(encaps, "f9cdb96045f55e318656d07993d5971cbccee44fa166588578716b2d7b592d23");
    assert_eq!(
        kem_rejection_secret::<kem::Kyber512>(),
        "2a60a03eded17883c86a0e57790924d5591da17a8d6fe0afc00361579fab489e"
    );
}

#[test]
fn kyber768_golden() {
    let (keys, encaps) = kem_digests::<kem::Kyber768>();
    assert_eq!(keys, "be8cb9102f18c43a7ad223f83f2776478c70ac9b7f3caf524617ea24ea9d4798");
    assert_eq!(encaps, "8836c4cb83b4c7d5e4d24098d0d6b63f3eacc75ee655a304828f1193c3a7015f");
    assert_eq!(
        kem_rejection_secret::<kem::Kyber768>(),
        "c1ce088725e2ff2fc0bd7afbaf5172039061702ae8a31286904fdfe782c804a1"
    );
}

#[test]
fn kyber1024_golden() {
    let (keys, encaps) = kem_digests::<kem::Kyber1024>();
    assert_eq!(keys, "5de05d4d4ca6942712aced1d50e02f7ecc0c8c3c629fdf68b39687a0667e0fd2");
    assert_eq!(encaps, "93189b7b144d64197c3da615b9eca2a737f6aafacaca836c3a8b539749ad2f2e");
    assert_eq!(
        kem_rejection_secret::<kem::Kyber1024>(),
        "0b0869b3f84007b07abf86ec5a2a599229d9a811e4608dd5a1699a3140c080bb"
    );
}

#[test]
fn dilithium2_golden() {
    let (keys, sig) = sign_digests::<sign::Dilithium2>();
    assert_eq!(keys, "3fb2d4f8f9d987772d2081ee46922911613db3dcf38987609d1668b5c63ce50f");
    assert_eq!(sig, "880068e59a9e2c6b01748e6f1d46cf26249cc35f83d06aa44f4a5f4167bcb10d");
}

#[test]
fn dilithium3_golden() {
    let (keys, sig) = sign_digests::<sign::Dilithium3>();
    assert_eq!(keys, "db27726759571d948c0d0f3d7e1a97a583928bcc722c2816abb832b1a2a73a4e");
    assert_eq!(sig, "9c3c56f7db643f5163233c250475f9b6ce8460d0ce1cf3deef3d801fca535a8f");
}

#[test]
fn dilithium5_golden() {
    let (keys, sig) = sign_digests::<sign::Dilithium5>();
    assert_eq!(keys, "93b82b0c2e4265e789f33021563f72e5863a0f89067ecd0ce2d8bef59b251787");
    assert_eq!(sig, "58e1698c6cf8fe279c347f8cca3e44ee4dd374e5dff7a9f0c9c7638b931794ae");
}
