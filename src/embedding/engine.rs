//! Local sentence-embedding engine built on candle.
//!
//! Loads one BERT-family sentence-transformer per run and reuses it for every
//! encode call. Model files resolve from a local directory when configured,
//! otherwise from the HuggingFace Hub cache. A load failure is fatal to the
//! whole run - there is no degraded mode.

use anyhow::{Context, Result};
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use hf_hub::{api::sync::Api, Repo, RepoType};
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

use crate::embedding::encoder::TextEncoder;

/// Default sentence-transformer checkpoint
pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/paraphrase-MiniLM-L6-v2";

/// Vector length produced by the default checkpoint
pub const EMBEDDING_DIM: usize = 384;

/// Sentence-embedding engine over a candle BERT model
pub struct EmbeddingEngine {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dimension: usize,
}

impl std::fmt::Debug for EmbeddingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingEngine")
            .field("device", &self.device)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

/// Paths to the three files a checkpoint consists of
struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

impl EmbeddingEngine {
    /// Load the default checkpoint from the HuggingFace Hub cache
    pub fn new() -> Result<Self> {
        Self::from_hub(DEFAULT_MODEL_ID)
    }

    /// Load a checkpoint by model id, downloading into the Hub cache on first
    /// use
    pub fn from_hub(model_id: &str) -> Result<Self> {
        tracing::info!(model_id, "loading embedding model from hub");

        let api = Api::new().context("failed to create HuggingFace API client")?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let files = ModelFiles {
            config: repo.get("config.json").context("failed to fetch model config")?,
            tokenizer: repo
                .get("tokenizer.json")
                .context("failed to fetch tokenizer")?,
            weights: repo
                .get("model.safetensors")
                .context("failed to fetch model weights")?,
        };

        Self::load(files)
    }

    /// Load a checkpoint from a local directory containing config.json,
    /// tokenizer.json, and model.safetensors
    pub fn from_dir(dir: &Path) -> Result<Self> {
        tracing::info!(dir = %dir.display(), "loading embedding model from local directory");

        let files = ModelFiles {
            config: dir.join("config.json"),
            tokenizer: dir.join("tokenizer.json"),
            weights: dir.join("model.safetensors"),
        };

        for path in [&files.config, &files.tokenizer, &files.weights] {
            if !path.exists() {
                anyhow::bail!("model file missing: {}", path.display());
            }
        }

        Self::load(files)
    }

    fn load(files: ModelFiles) -> Result<Self> {
        let device = Device::Cpu;

        let config_contents =
            std::fs::read_to_string(&files.config).context("failed to read model config")?;
        let config: Config =
            serde_json::from_str(&config_contents).context("failed to parse model config")?;

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| anyhow::anyhow!("failed to load tokenizer: {e}"))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], DTYPE, &device)
                .context("failed to load model weights")?
        };
        let model = BertModel::load(vb, &config).context("failed to build BERT model")?;

        Ok(Self {
            model,
            tokenizer,
            device,
            dimension: config.hidden_size,
        })
    }

    fn forward_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("tokenization failed: {e}"))?;

        let batch_size = texts.len();
        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        // Pad token ids and attention masks to a rectangular batch
        let mut flat_ids = vec![0u32; batch_size * max_len];
        let mut flat_mask = vec![0u32; batch_size * max_len];
        for (row, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            flat_ids[row * max_len..row * max_len + ids.len()].copy_from_slice(ids);
            flat_mask[row * max_len..row * max_len + mask.len()].copy_from_slice(mask);
        }

        let token_ids = Tensor::from_vec(flat_ids, (batch_size, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(flat_mask, (batch_size, max_len), &self.device)?;
        let token_type_ids = token_ids.zeros_like()?;

        let hidden = self
            .model
            .forward(&token_ids, &token_type_ids, Some(&attention_mask))?;

        let pooled = mean_pool(&hidden, &attention_mask)?;
        Ok(pooled.to_vec2::<f32>()?)
    }
}

impl TextEncoder for EmbeddingEngine {
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(batch_size = texts.len(), "encoding batch");
        self.forward_batch(texts)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Attention-masked mean pooling over the token dimension
fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let mask = attention_mask
        .unsqueeze(2)?
        .expand(hidden.shape())?
        .to_dtype(hidden.dtype())?;

    let summed = (hidden * &mask)?.sum(1)?;
    let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;

    Ok(summed.broadcast_div(&counts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dir_requires_all_model_files() {
        let dir = tempfile::tempdir().unwrap();
        // Only a config file present - tokenizer and weights missing
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        let result = EmbeddingEngine::from_dir(dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("model file missing"));
    }

    #[test]
    #[ignore] // Integration test - requires model download
    fn test_hub_model_dimension() {
        let engine = EmbeddingEngine::new().expect("failed to load engine");
        assert_eq!(engine.dimension(), EMBEDDING_DIM);
    }

    #[test]
    #[ignore] // Integration test - requires model download
    fn test_encode_batch_shapes() {
        let engine = EmbeddingEngine::new().expect("failed to load engine");
        let vectors = engine
            .encode_batch(&["first sentence", "second sentence"])
            .expect("encode failed");
        assert_eq!(vectors.len(), 2);
        assert!(vectors.iter().all(|v| v.len() == EMBEDDING_DIM));
    }

    #[test]
    #[ignore] // Integration test - requires model download
    fn test_encode_is_deterministic() {
        let engine = EmbeddingEngine::new().expect("failed to load engine");
        let a = engine.encode("the same input").expect("encode failed");
        let b = engine.encode("the same input").expect("encode failed");
        assert_eq!(a, b);
    }
}
