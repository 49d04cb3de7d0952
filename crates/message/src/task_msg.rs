use crate::{
    codec::Hash32,
    detail::ProofDetail,
    error::{Error, Result},
    proof::{ChunkInfo, ChunkProof},
    types::ProofType,
};
use serde::{Deserialize, Serialize};

/// A proving task sent to a worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMsg {
    pub uuid: String,
    pub id: String,
    pub detail: TaskDetail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskDetail {
    Chunk(ChunkTaskDetail),
    Batch(BatchTaskDetail),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkTaskDetail {
    pub block_hashes: Vec<Hash32>,
}

/// Chunk infos and the matching chunk proofs to aggregate, index by index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BatchTaskParts")]
pub struct BatchTaskDetail {
    chunk_infos: Vec<ChunkInfo>,
    chunk_proofs: Vec<ChunkProof>,
}

#[derive(Deserialize)]
struct BatchTaskParts {
    chunk_infos: Vec<ChunkInfo>,
    chunk_proofs: Vec<ChunkProof>,
}

impl TryFrom<BatchTaskParts> for BatchTaskDetail {
    type Error = Error;

    fn try_from(parts: BatchTaskParts) -> Result<Self> {
        Self::new(parts.chunk_infos, parts.chunk_proofs)
    }
}

impl BatchTaskDetail {
    pub fn new(chunk_infos: Vec<ChunkInfo>, chunk_proofs: Vec<ChunkProof>) -> Result<Self> {
        if chunk_infos.len() != chunk_proofs.len() {
            return Err(Error::ChunkCountMismatch {
                chunk_infos: chunk_infos.len(),
                chunk_proofs: chunk_proofs.len(),
            });
        }
        Ok(Self {
            chunk_infos,
            chunk_proofs,
        })
    }

    pub fn chunk_infos(&self) -> &[ChunkInfo] {
        &self.chunk_infos
    }

    pub fn chunk_proofs(&self) -> &[ChunkProof] {
        &self.chunk_proofs
    }

    pub fn chunks(&self) -> impl Iterator<Item = (&ChunkInfo, &ChunkProof)> {
        self.chunk_infos.iter().zip(self.chunk_proofs.iter())
    }

    pub fn len(&self) -> usize {
        self.chunk_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_infos.is_empty()
    }
}

impl TaskMsg {
    pub fn chunk(
        uuid: impl Into<String>,
        id: impl Into<String>,
        block_hashes: Vec<Hash32>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            id: id.into(),
            detail: TaskDetail::Chunk(ChunkTaskDetail { block_hashes }),
        }
    }

    pub fn batch(
        uuid: impl Into<String>,
        id: impl Into<String>,
        detail: BatchTaskDetail,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            id: id.into(),
            detail: TaskDetail::Batch(detail),
        }
    }

    pub fn proof_type(&self) -> ProofType {
        match self.detail {
            TaskDetail::Chunk(_) => ProofType::Chunk,
            TaskDetail::Batch(_) => ProofType::Batch,
        }
    }

    /// Whether `detail` answers this task: same task id and proof type.
    pub fn is_answered_by(&self, detail: &ProofDetail) -> bool {
        self.id == detail.id && self.proof_type() == detail.proof_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{proof::BatchProof, types::ProofFailureType};

    fn chunk_info(chain_id: u64) -> ChunkInfo {
        ChunkInfo {
            chain_id,
            ..Default::default()
        }
    }

    #[test]
    fn test_batch_detail_rejects_mismatched_lengths() {
        let result = BatchTaskDetail::new(
            vec![chunk_info(1), chunk_info(2)],
            vec![ChunkProof::default()],
        );
        assert!(matches!(
            result,
            Err(Error::ChunkCountMismatch {
                chunk_infos: 2,
                chunk_proofs: 1
            })
        ));
    }

    #[test]
    fn test_batch_detail_pairs_chunks_in_order() {
        let detail = BatchTaskDetail::new(
            vec![chunk_info(1), chunk_info(2)],
            vec![ChunkProof::default(), ChunkProof::default()],
        )
        .unwrap();

        assert_eq!(detail.len(), 2);
        let chain_ids: Vec<u64> = detail.chunks().map(|(info, _)| info.chain_id).collect();
        assert_eq!(chain_ids, vec![1, 2]);
    }

    #[test]
    fn test_deserialize_enforces_chunk_count() {
        let json = serde_json::json!({
            "chunk_infos": [serde_json::to_value(chunk_info(1)).unwrap()],
            "chunk_proofs": [],
        });
        assert!(serde_json::from_value::<BatchTaskDetail>(json).is_err());
    }

    #[test]
    fn test_task_answered_by_matching_detail() {
        let task = TaskMsg::chunk("uuid-1", "task-1", vec![Hash32([1; 32]), Hash32([2; 32])]);
        assert_eq!(task.proof_type(), ProofType::Chunk);

        let answer = ProofDetail::chunk("task-1", ChunkProof::default());
        let wrong_type = ProofDetail::batch("task-1", BatchProof::default());
        let wrong_id =
            ProofDetail::failed("task-2", ProofType::Chunk, ProofFailureType::NoPanic, "");

        assert!(task.is_answered_by(&answer));
        assert!(!task.is_answered_by(&wrong_type));
        assert!(!task.is_answered_by(&wrong_id));
    }

    #[test]
    fn test_task_json_round_trip() {
        let detail =
            BatchTaskDetail::new(vec![chunk_info(7)], vec![ChunkProof::default()]).unwrap();
        let task = TaskMsg::batch("uuid-2", "batch-1", detail);

        let json = serde_json::to_value(&task).unwrap();
        assert!(json["detail"]["batch"]["chunk_infos"].is_array());
        assert_eq!(serde_json::from_value::<TaskMsg>(json).unwrap(), task);
    }
}
