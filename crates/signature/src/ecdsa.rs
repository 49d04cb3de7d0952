use crate::{
    error::SignatureError,
    types::{Digest, Signer, Verifier},
};
use secp256k1::{
    Message, PublicKey, Secp256k1, SecretKey as PrivateKey,
    ecdsa::{
        RecoverableSignature as SecpRecoverableSignature, RecoveryId, Signature as EcdsaSignature,
    },
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::LazyLock};

static SECP256K1_SIGNING: LazyLock<Secp256k1<secp256k1::SignOnly>> =
    LazyLock::new(Secp256k1::signing_only);
static SECP256K1_VERIFY: LazyLock<Secp256k1<secp256k1::VerifyOnly>> =
    LazyLock::new(Secp256k1::verification_only);

#[derive(Clone)]
pub struct SigningKey(PrivateKey);

impl FromStr for SigningKey {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let private_key = PrivateKey::from_str(strip_hex_prefix(s))?;
        Ok(Self(private_key))
    }
}

impl Signer for SigningKey {
    fn from_slice(slice: &[u8]) -> Result<Self, SignatureError> {
        if slice.len() != secp256k1::constants::SECRET_KEY_SIZE {
            return Err(SignatureError::InvalidKeyLength {
                expected: secp256k1::constants::SECRET_KEY_SIZE,
                actual: slice.len(),
            });
        }
        let private_key = PrivateKey::from_slice(slice)?;
        Ok(Self(private_key))
    }

    fn sign_digest(&self, digest: &Digest) -> Result<RecoverableSignature, SignatureError> {
        let message = Message::from_digest(*digest);
        let signature = SECP256K1_SIGNING.sign_ecdsa_recoverable(&message, &self.0);
        Ok(RecoverableSignature::from_secp(&signature))
    }
}

impl SigningKey {
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey(PublicKey::from_secret_key(&SECP256K1_SIGNING, &self.0))
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct VerifyingKey(PublicKey);

impl VerifyingKey {
    /// Hex of the 33-byte compressed SEC1 encoding, without `0x` prefix.
    pub fn to_compressed_hex(&self) -> String {
        hex::encode(self.0.serialize())
    }
}

impl fmt::Display for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compressed_hex())
    }
}

impl TryFrom<String> for VerifyingKey {
    type Error = SignatureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<VerifyingKey> for String {
    fn from(value: VerifyingKey) -> Self {
        value.to_compressed_hex()
    }
}

impl FromStr for VerifyingKey {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(strip_hex_prefix(s))?;
        <Self as Verifier>::from_slice(&bytes)
    }
}

impl Verifier for VerifyingKey {
    fn from_slice(slice: &[u8]) -> Result<Self, SignatureError> {
        let public_key = PublicKey::from_slice(slice)?;
        Ok(Self(public_key))
    }

    fn verify_digest(
        &self,
        digest: &Digest,
        signature: &RecoverableSignature,
    ) -> Result<bool, SignatureError> {
        // r and s outside the curve order cannot have been produced by any key.
        let Ok(standard) = EcdsaSignature::from_compact(signature.compact()) else {
            return Ok(false);
        };
        let message = Message::from_digest(*digest);
        Ok(SECP256K1_VERIFY
            .verify_ecdsa(&message, &standard, &self.0)
            .is_ok())
    }
}

/// 65-byte `r || s || v` secp256k1 signature from which the signer's public
/// key can be recovered.
#[derive(Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct RecoverableSignature([u8; RecoverableSignature::BYTE_SIZE]);

impl RecoverableSignature {
    pub const BYTE_SIZE: usize = 65;

    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let bytes: [u8; Self::BYTE_SIZE] =
            bytes
                .try_into()
                .map_err(|_| SignatureError::InvalidSignatureLength {
                    expected: Self::BYTE_SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self(bytes))
    }

    /// Accepts hex with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(strip_hex_prefix(s))?;
        Self::from_slice(&bytes)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; Self::BYTE_SIZE] {
        &self.0
    }

    /// The `r || s` part, without the recovery byte.
    pub fn compact(&self) -> &[u8] {
        &self.0[..64]
    }

    pub fn recovery_byte(&self) -> u8 {
        self.0[64]
    }

    pub fn recover(&self, digest: &Digest) -> Result<VerifyingKey, SignatureError> {
        let recovery_byte = self.recovery_byte();
        let recovery_id = RecoveryId::try_from(i32::from(recovery_byte))
            .map_err(|_| SignatureError::InvalidRecoveryId(recovery_byte))?;
        let signature = SecpRecoverableSignature::from_compact(self.compact(), recovery_id)?;
        let message = Message::from_digest(*digest);
        let public_key = SECP256K1_VERIFY.recover_ecdsa(&message, &signature)?;
        Ok(VerifyingKey(public_key))
    }

    fn from_secp(signature: &SecpRecoverableSignature) -> Self {
        let (recovery_id, compact) = signature.serialize_compact();
        let mut bytes = [0u8; Self::BYTE_SIZE];
        bytes[..64].copy_from_slice(&compact);
        bytes[64] = i32::from(recovery_id) as u8;
        Self(bytes)
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoverableSignature({})", self.to_hex())
    }
}

impl fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for RecoverableSignature {
    type Error = SignatureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<RecoverableSignature> for String {
    fn from(value: RecoverableSignature) -> Self {
        value.to_hex()
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
