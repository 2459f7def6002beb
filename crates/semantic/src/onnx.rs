use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::assets::resolve_model_assets;
use crate::cache::{ModelCell, ProviderStatus};
use crate::normalize::mean_pool;
use crate::{EmbeddingProvider, EmbeddingVector, SemanticConfig, SemanticError};

/// Sentence-transformer provider backed by ONNX Runtime.
///
/// Construction is cheap; the tokenizer and session are loaded on first use (or by
/// [`warm_up`](Self::warm_up)) and then shared by every caller for the life of the
/// provider. A failed load is not retried until [`EmbeddingProvider::reset`].
pub struct OnnxProvider {
    cfg: SemanticConfig,
    model: ModelCell<OnnxModel>,
}

struct OnnxModel {
    tokenizer: Tokenizer,
    session: Mutex<Session>,
}

impl OnnxModel {
    fn load(cfg: &SemanticConfig) -> Result<Self, SemanticError> {
        let start = Instant::now();
        let assets = resolve_model_assets(cfg)?;

        let tokenizer = Tokenizer::from_file(&assets.tokenizer_path)
            .map_err(|e| SemanticError::TokenizerMissing(format!("tokenizer load: {e}")))?;

        let session = Session::builder()
            .map_err(|e| SemanticError::ProviderUnavailable(format!("session builder: {e}")))?
            .with_intra_threads(cfg.intra_threads)
            .map_err(|e| SemanticError::ProviderUnavailable(format!("thread config: {e}")))?
            .commit_from_file(&assets.model_path)
            .map_err(|e| SemanticError::ProviderUnavailable(format!("model load: {e}")))?;

        info!(
            model = %cfg.model_name,
            path = %assets.model_path.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "embedding_model_loaded"
        );

        Ok(Self {
            tokenizer,
            session: Mutex::new(session),
        })
    }
}

impl OnnxProvider {
    pub fn new(cfg: SemanticConfig) -> Self {
        Self {
            cfg,
            model: ModelCell::new(),
        }
    }

    /// Load the model now instead of on the first request.
    pub fn warm_up(&self) -> Result<(), SemanticError> {
        self.model().map(|_| ())
    }

    pub fn status(&self) -> ProviderStatus {
        self.model.status()
    }

    fn model(&self) -> Result<Arc<OnnxModel>, SemanticError> {
        self.model.get_or_load(|| OnnxModel::load(&self.cfg))
    }
}

impl EmbeddingProvider for OnnxProvider {
    fn embed(&self, text: &str) -> Result<EmbeddingVector, SemanticError> {
        self.embed_batch(&[text])?
            .pop()
            .ok_or_else(|| SemanticError::EmbeddingFailed("model returned no outputs".into()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>, SemanticError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let model = self.model()?;
        let pooled = run_onnx_embeddings(&model, texts, &self.cfg)?;
        if pooled.len() != texts.len() {
            return Err(SemanticError::EmbeddingFailed(format!(
                "model returned {} embeddings for {} inputs",
                pooled.len(),
                texts.len()
            )));
        }
        pooled
            .into_iter()
            .map(EmbeddingVector::try_normalized)
            .collect()
    }

    fn model_name(&self) -> &str {
        &self.cfg.model_name
    }

    fn reset(&self) {
        self.model.reset();
    }
}

struct EncodedDoc {
    ids: Vec<i64>,
    mask: Vec<i64>,
}

fn encode_documents(
    tokenizer: &Tokenizer,
    texts: &[&str],
    max_sequence_length: usize,
) -> Result<(Vec<EncodedDoc>, usize), SemanticError> {
    let mut encoded = Vec::with_capacity(texts.len());
    let mut max_len = 0usize;

    for text in texts {
        let encoding = tokenizer
            .encode(*text, true)
            .map_err(|e| SemanticError::EmbeddingFailed(format!("tokenize: {e}")))?;
        let mut ids: Vec<i64> = encoding.get_ids().iter().map(|&x| i64::from(x)).collect();
        let mut mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&x| i64::from(x))
            .collect();
        if ids.len() != mask.len() {
            return Err(SemanticError::EmbeddingFailed(
                "tokenizer produced mismatched id/mask lengths".into(),
            ));
        }
        ids.truncate(max_sequence_length);
        mask.truncate(max_sequence_length);
        max_len = max_len.max(ids.len());
        encoded.push(EncodedDoc { ids, mask });
    }

    Ok((encoded, max_len))
}

/// Pads the batch to a `[batch, seq_len]` layout, row-major.
fn build_padded_inputs(encoded: &[EncodedDoc], seq_len: usize) -> (Vec<i64>, Vec<i64>) {
    let batch = encoded.len();
    let mut input_ids = vec![0i64; batch * seq_len];
    let mut attention_mask = vec![0i64; batch * seq_len];
    for (row, doc) in encoded.iter().enumerate() {
        let offset = row * seq_len;
        input_ids[offset..offset + doc.ids.len()].copy_from_slice(&doc.ids);
        attention_mask[offset..offset + doc.mask.len()].copy_from_slice(&doc.mask);
    }
    (input_ids, attention_mask)
}

fn run_onnx_embeddings(
    model: &OnnxModel,
    texts: &[&str],
    cfg: &SemanticConfig,
) -> Result<Vec<Vec<f32>>, SemanticError> {
    let (encoded, max_len) = encode_documents(&model.tokenizer, texts, cfg.max_sequence_length)?;
    let seq_len = max_len.max(1);
    let batch = encoded.len();
    let (input_ids, attention_mask) = build_padded_inputs(&encoded, seq_len);

    let shape = vec![batch as i64, seq_len as i64];
    let ids_tensor = Tensor::from_array((shape.clone(), input_ids))
        .map_err(|e| SemanticError::EmbeddingFailed(format!("input_ids tensor: {e}")))?;
    let mask_tensor = Tensor::from_array((shape.clone(), attention_mask.clone()))
        .map_err(|e| SemanticError::EmbeddingFailed(format!("attention_mask tensor: {e}")))?;

    let mut session = model.session.lock().unwrap_or_else(PoisonError::into_inner);
    let outputs = if cfg.use_token_type_ids {
        let type_tensor = Tensor::from_array((shape, vec![0i64; batch * seq_len]))
            .map_err(|e| SemanticError::EmbeddingFailed(format!("token_type_ids tensor: {e}")))?;
        session.run(ort::inputs![ids_tensor, mask_tensor, type_tensor])
    } else {
        session.run(ort::inputs![ids_tensor, mask_tensor])
    }
    .map_err(|e| SemanticError::EmbeddingFailed(format!("inference: {e}")))?;

    let (output_shape, output_data) = outputs[0]
        .try_extract_tensor::<f32>()
        .map_err(|e| SemanticError::EmbeddingFailed(format!("extract tensor: {e}")))?;
    let dims: Vec<usize> = output_shape.iter().map(|&d| d.max(0) as usize).collect();
    debug!(?dims, batch, seq_len, "onnx_output");

    match dims.as_slice() {
        // Token-level hidden states: pool them ourselves.
        [b, s, hidden] if *b == batch && *s == seq_len => Ok(mean_pool(
            output_data,
            &attention_mask,
            batch,
            seq_len,
            *hidden,
        )),
        // Export already pooled to one vector per input.
        [b, hidden] if *b == batch && *hidden > 0 => Ok(output_data
            .chunks(*hidden)
            .map(<[f32]>::to_vec)
            .collect()),
        _ => Err(SemanticError::EmbeddingFailed(format!(
            "unexpected output shape: {dims:?}"
        ))),
    }
}
