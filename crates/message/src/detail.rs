use crate::{
    proof::{BatchProof, ChunkProof},
    types::{ProofFailureType, ProofType, RespStatus},
};
use scoria_signature::{Digest, SignatureError, digest};
use serde::{Deserialize, Serialize};

/// The proof carried by a successful submission. One variant per proof
/// type, so a chunk result can never carry a batch proof or both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofPayload {
    Chunk(Box<ChunkProof>),
    Batch(BatchProof),
}

impl ProofPayload {
    pub fn proof_type(&self) -> ProofType {
        match self {
            ProofPayload::Chunk(_) => ProofType::Chunk,
            ProofPayload::Batch(_) => ProofType::Batch,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofOutcome {
    Proved(ProofPayload),
    Failed {
        proof_type: ProofType,
        failure: ProofFailureType,
        error: String,
    },
}

/// Result of a single task as reported by a worker. This is the value that
/// gets hashed and signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofDetail {
    pub id: String,
    pub outcome: ProofOutcome,
}

impl ProofDetail {
    pub fn chunk(id: impl Into<String>, proof: ChunkProof) -> Self {
        Self {
            id: id.into(),
            outcome: ProofOutcome::Proved(ProofPayload::Chunk(Box::new(proof))),
        }
    }

    pub fn batch(id: impl Into<String>, proof: BatchProof) -> Self {
        Self {
            id: id.into(),
            outcome: ProofOutcome::Proved(ProofPayload::Batch(proof)),
        }
    }

    pub fn failed(
        id: impl Into<String>,
        proof_type: ProofType,
        failure: ProofFailureType,
        error: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            outcome: ProofOutcome::Failed {
                proof_type,
                failure,
                error: error.into(),
            },
        }
    }

    pub fn proof_type(&self) -> ProofType {
        match &self.outcome {
            ProofOutcome::Proved(payload) => payload.proof_type(),
            ProofOutcome::Failed { proof_type, .. } => *proof_type,
        }
    }

    pub fn status(&self) -> RespStatus {
        match self.outcome {
            ProofOutcome::Proved(_) => RespStatus::Ok,
            ProofOutcome::Failed { .. } => RespStatus::ProofError,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ProofOutcome::Proved(_) => None,
            ProofOutcome::Failed { error, .. } => Some(error),
        }
    }

    pub fn chunk_proof(&self) -> Option<&ChunkProof> {
        match &self.outcome {
            ProofOutcome::Proved(ProofPayload::Chunk(proof)) => Some(proof),
            _ => None,
        }
    }

    pub fn batch_proof(&self) -> Option<&BatchProof> {
        match &self.outcome {
            ProofOutcome::Proved(ProofPayload::Batch(proof)) => Some(proof),
            _ => None,
        }
    }

    /// Keccak-256 of the canonical encoding. Signatures are made over this
    /// digest, so it must be reproducible bit for bit on both sides.
    pub fn hash(&self) -> Result<Digest, SignatureError> {
        digest(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::Hash32,
        proof::{ChunkInfo, SubCircuitRowUsage},
    };

    fn chunk_proof() -> ChunkProof {
        ChunkProof {
            storage_trace: Some(vec![9, 9, 9]),
            protocol: vec![1, 2],
            proof: vec![3; 64],
            instances: vec![4; 32],
            vk: vec![5; 32],
            chunk_info: Some(ChunkInfo {
                chain_id: 534352,
                prev_state_root: Hash32([1; 32]),
                post_state_root: Hash32([2; 32]),
                withdraw_root: Hash32([3; 32]),
                data_hash: Hash32([4; 32]),
                is_padding: false,
                tx_bytes: vec![0xf8, 0x6b],
            }),
            git_version: "v0.11.0".to_string(),
            row_usages: vec![SubCircuitRowUsage {
                name: "evm".to_string(),
                row_number: 1024,
            }],
        }
    }

    #[test]
    fn test_accessors_follow_outcome() {
        let proved = ProofDetail::chunk("task-1", chunk_proof());
        assert_eq!(proved.proof_type(), ProofType::Chunk);
        assert_eq!(proved.status(), RespStatus::Ok);
        assert_eq!(proved.error(), None);
        assert!(proved.chunk_proof().is_some());
        assert!(proved.batch_proof().is_none());

        let failed = ProofDetail::failed(
            "task-2",
            ProofType::Batch,
            ProofFailureType::Panic,
            "worker crashed",
        );
        assert_eq!(failed.proof_type(), ProofType::Batch);
        assert_eq!(failed.status(), RespStatus::ProofError);
        assert_eq!(failed.error(), Some("worker crashed"));
        assert!(failed.chunk_proof().is_none());
        assert!(failed.batch_proof().is_none());
    }

    #[test]
    fn test_hash_is_deterministic() {
        let first = ProofDetail::chunk("task-1", chunk_proof());
        let second = ProofDetail::chunk("task-1", chunk_proof());
        assert_eq!(first.hash().unwrap(), second.hash().unwrap());
    }

    #[test]
    fn test_hash_changes_with_every_field() {
        let base = ProofDetail::chunk("task-1", chunk_proof());
        let base_hash = base.hash().unwrap();

        let mutations: &[fn(&mut ChunkProof)] = &[
            |p| p.storage_trace = None,
            |p| p.protocol.push(0),
            |p| p.proof[0] ^= 1,
            |p| {
                p.instances.pop();
            },
            |p| p.vk[31] = 0,
            |p| p.git_version.push('+'),
            |p| p.row_usages[0].row_number += 1,
            |p| p.row_usages[0].name = "mpt".to_string(),
            |p| p.chunk_info = None,
            |p| {
                if let Some(info) = p.chunk_info.as_mut() {
                    info.chain_id += 1;
                }
            },
            |p| {
                if let Some(info) = p.chunk_info.as_mut() {
                    info.is_padding = true;
                }
            },
            |p| {
                if let Some(info) = p.chunk_info.as_mut() {
                    info.data_hash = Hash32::zero();
                }
            },
            |p| {
                if let Some(info) = p.chunk_info.as_mut() {
                    info.tx_bytes.clear();
                }
            },
        ];

        for (index, mutate) in mutations.iter().enumerate() {
            let mut proof = chunk_proof();
            mutate(&mut proof);
            let mutated = ProofDetail::chunk("task-1", proof);
            assert_ne!(mutated.hash().unwrap(), base_hash, "mutation {index}");
        }

        let renamed = ProofDetail::chunk("task-2", chunk_proof());
        assert_ne!(renamed.hash().unwrap(), base_hash);
    }

    #[test]
    fn test_hash_distinguishes_outcomes() {
        let failed_chunk =
            ProofDetail::failed("task-1", ProofType::Chunk, ProofFailureType::NoPanic, "oom");
        let failed_batch =
            ProofDetail::failed("task-1", ProofType::Batch, ProofFailureType::NoPanic, "oom");
        let panicked =
            ProofDetail::failed("task-1", ProofType::Chunk, ProofFailureType::Panic, "oom");
        let other_error =
            ProofDetail::failed("task-1", ProofType::Chunk, ProofFailureType::NoPanic, "oom!");
        let batch = ProofDetail::batch("task-1", BatchProof::default());

        let hashes = [
            failed_chunk.hash().unwrap(),
            failed_batch.hash().unwrap(),
            panicked.hash().unwrap(),
            other_error.hash().unwrap(),
            batch.hash().unwrap(),
        ];
        for (i, left) in hashes.iter().enumerate() {
            for right in &hashes[i + 1..] {
                assert_ne!(left, right);
            }
        }
    }

    #[test]
    fn test_json_shape() {
        let detail = ProofDetail::batch(
            "task-9",
            BatchProof {
                proof: vec![0xab; 32],
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["id"], "task-9");
        assert_eq!(
            json["outcome"]["proved"]["batch"]["proof"],
            format!("0x{}", "ab".repeat(32))
        );
        assert_eq!(serde_json::from_value::<ProofDetail>(json).unwrap(), detail);
    }
}
