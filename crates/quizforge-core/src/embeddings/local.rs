//! Local Embedding Provider
//!
//! fastembed-backed `TextEncoder` implementation. Inference is fully local;
//! the model is downloaded once into a cache directory and initialized
//! lazily on first use.

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::{Mutex, OnceLock};

use super::encoder::{Embedding, EncoderError, TextEncoder};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Embedding dimensions after truncation (384 → 256, L2-renormalized)
pub const DEFAULT_DIMENSIONS: usize = 256;

/// Maximum text length fed to the model (longer inputs are truncated)
pub const MAX_TEXT_LENGTH: usize = 8192;

// ============================================================================
// GLOBAL MODEL
// ============================================================================

static EMBEDDING_MODEL_RESULT: OnceLock<Result<Mutex<TextEmbedding>, String>> = OnceLock::new();

/// Get the cache directory for fastembed models.
/// Uses QUIZFORGE_MODEL_CACHE env var, or falls back to the platform cache dir.
fn get_cache_dir() -> std::path::PathBuf {
    if let Ok(path) = std::env::var("QUIZFORGE_MODEL_CACHE") {
        return std::path::PathBuf::from(path);
    }

    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "quizforge", "core") {
        return proj_dirs.cache_dir().join("fastembed");
    }

    if let Some(base_dirs) = directories::BaseDirs::new() {
        return base_dirs.home_dir().join(".cache/quizforge/fastembed");
    }

    std::path::PathBuf::from(".fastembed_cache")
}

fn get_model() -> Result<std::sync::MutexGuard<'static, TextEmbedding>, EncoderError> {
    let result = EMBEDDING_MODEL_RESULT.get_or_init(|| {
        let cache_dir = get_cache_dir();

        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            tracing::warn!("Failed to create cache directory {:?}: {}", cache_dir, e);
        }

        let options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_show_download_progress(true)
            .with_cache_dir(cache_dir);

        TextEmbedding::try_new(options).map(Mutex::new).map_err(|e| {
            format!(
                "Failed to initialize all-MiniLM-L6-v2 embedding model: {}. \
                Ensure ONNX runtime is available and model files can be downloaded.",
                e
            )
        })
    });

    match result {
        Ok(model) => model
            .lock()
            .map_err(|e| EncoderError::ModelInit(format!("Lock poisoned: {}", e))),
        Err(err) => Err(EncoderError::ModelInit(err.clone())),
    }
}

/// Truncate to `dimensions` and L2-normalize
fn truncate_normalize(mut vector: Vec<f32>, dimensions: usize) -> Vec<f32> {
    if vector.len() > dimensions {
        vector.truncate(dimensions);
    }
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}

// ============================================================================
// LOCAL ENCODER
// ============================================================================

/// fastembed-backed encoder (all-MiniLM-L6-v2)
///
/// Cheap to construct; the heavyweight model state is a lazily-initialized
/// global shared by all instances.
pub struct LocalEncoder {
    dimensions: usize,
}

impl Default for LocalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalEncoder {
    /// Create a new local encoder with default output dimensions
    pub fn new() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Create with explicit output dimensions (truncated from the model output)
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Check whether the model initialized (downloads on first call)
    pub fn is_ready(&self) -> bool {
        match get_model() {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Embedding model not ready: {}", e);
                false
            }
        }
    }

    /// Force model initialization, surfacing any init error
    pub fn init(&self) -> Result<(), EncoderError> {
        get_model().map(|_| ())
    }
}

impl TextEncoder for LocalEncoder {
    fn model_name(&self) -> &str {
        "sentence-transformers/all-MiniLM-L6-v2"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn encode(&self, text: &str) -> Result<Embedding, EncoderError> {
        if text.is_empty() {
            return Err(EncoderError::InvalidInput("Text cannot be empty".to_string()));
        }

        let mut model = get_model()?;

        let text = if text.len() > MAX_TEXT_LENGTH {
            &text[..MAX_TEXT_LENGTH]
        } else {
            text
        };

        let embeddings = model
            .embed(vec![text], None)
            .map_err(|e| EncoderError::EncodeFailed(e.to_string()))?;

        let Some(vector) = embeddings.into_iter().next() else {
            return Err(EncoderError::EncodeFailed(
                "No embedding generated".to_string(),
            ));
        };

        Ok(Embedding::new(truncate_normalize(vector, self.dimensions)))
    }
}

// ============================================================================
// TESTS
// ============================================================================
