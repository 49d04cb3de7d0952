use crate::{
    detail::ProofDetail,
    error::{Error, Result},
};
use scoria_signature::{Digest, RecoverableSignature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A signed [`ProofDetail`] as submitted by a worker.
///
/// The worker's identity is not transmitted: it is recovered from the
/// signature the first time it is needed and kept in a write-once cell.
/// Racing recoveries compute the same key, so whichever write wins is the
/// correct one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProofMsg {
    #[serde(rename = "zkProof")]
    pub detail: ProofDetail,
    /// `0x`-prefixed hex of the 65-byte `r || s || v` signature.
    pub signature: String,
    #[serde(skip)]
    public_key: OnceLock<VerifyingKey>,
}

impl ProofMsg {
    pub fn new(detail: ProofDetail) -> Self {
        Self {
            detail,
            signature: String::new(),
            public_key: OnceLock::new(),
        }
    }

    pub fn signed(detail: ProofDetail, signing_key: &SigningKey) -> Result<Self> {
        let mut message = Self::new(detail);
        message.sign(signing_key)?;
        Ok(message)
    }

    pub fn sign(&mut self, signing_key: &SigningKey) -> Result<()> {
        let digest = self.detail.hash().map_err(Error::Signing)?;
        let signature = signing_key.sign_digest(&digest).map_err(Error::Signing)?;
        self.signature = signature.to_hex();
        self.public_key = OnceLock::new();
        Ok(())
    }

    /// Checks the signature against the signer's public key, recovering and
    /// caching that key on first use.
    ///
    /// Returns an error when the message cannot be hashed or the signature
    /// cannot be decoded or recovered, and `Ok(false)` when the signature is
    /// well formed but does not match. Once the key is cached only `r || s`
    /// takes part in the check.
    pub fn verify(&self) -> Result<bool> {
        let digest = self.detail.hash().map_err(Error::Verification)?;
        let signature =
            RecoverableSignature::from_hex(&self.signature).map_err(Error::Verification)?;
        let public_key = self.cached_or_recovered(&digest, &signature)?;
        public_key
            .verify_digest(&digest, &signature)
            .map_err(Error::Verification)
    }

    /// Compressed public key of the signer, hex encoded without prefix.
    pub fn public_key(&self) -> Result<String> {
        if let Some(public_key) = self.public_key.get() {
            return Ok(public_key.to_compressed_hex());
        }
        let digest = self.detail.hash().map_err(Error::Verification)?;
        let signature =
            RecoverableSignature::from_hex(&self.signature).map_err(Error::Verification)?;
        let public_key = self.cached_or_recovered(&digest, &signature)?;
        Ok(public_key.to_compressed_hex())
    }

    fn cached_or_recovered(
        &self,
        digest: &Digest,
        signature: &RecoverableSignature,
    ) -> Result<&VerifyingKey> {
        if let Some(public_key) = self.public_key.get() {
            return Ok(public_key);
        }
        let recovered = signature.recover(digest).map_err(Error::Verification)?;
        Ok(self.public_key.get_or_init(|| recovered))
    }
}
