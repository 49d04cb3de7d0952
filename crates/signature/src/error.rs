#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("Invalid key length. Expected:{expected}, Got:{actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
    #[error("Invalid signature length. Expected:{expected}, Got:{actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },
    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),
    #[error("Fail to decode hex string: {0}")]
    HexDecodeError(#[from] hex::FromHexError),
    #[error("Secp256k1 library error: {0}")]
    Secp256k1LibError(#[from] secp256k1::Error),
    #[error("Failed to encode the message: {0}")]
    Encode(#[from] bincode::Error),
}
