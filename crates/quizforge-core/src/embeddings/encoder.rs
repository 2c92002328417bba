//! Encoder Capability and Similarity Math
//!
//! The `TextEncoder` trait abstracts over embedding providers; `Encoder`
//! wraps one as an explicit capability with a `Configured`/`Unconfigured`
//! variant. Similarity functions live here because the brute-force index
//! needs them with or without an encoder implementation compiled in.

use std::sync::Arc;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Floor added to the cosine denominator so a zero vector scores 0 instead of
/// dividing by zero.
pub const COSINE_EPSILON: f32 = 1e-12;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Encoder error types
///
/// Only a *configured* encoder produces these. An unconfigured encoder is a
/// normal mode, not a failure (see [`Encoder::encode`]).
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum EncoderError {
    /// Failed to initialize the underlying model
    ModelInit(String),
    /// Failed to generate an embedding
    EncodeFailed(String),
    /// Invalid input (empty text, etc.)
    InvalidInput(String),
}

impl std::fmt::Display for EncoderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncoderError::ModelInit(e) => write!(f, "Model initialization failed: {}", e),
            EncoderError::EncodeFailed(e) => write!(f, "Embedding generation failed: {}", e),
            EncoderError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
        }
    }
}

impl std::error::Error for EncoderError {}

// ============================================================================
// EMBEDDING TYPE
// ============================================================================

/// A fixed-dimension semantic embedding vector
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    /// The embedding vector
    pub vector: Vec<f32>,
    /// Dimensions of the vector
    pub dimensions: usize,
}

impl Embedding {
    /// Create a new embedding from a vector
    pub fn new(vector: Vec<f32>) -> Self {
        let dimensions = vector.len();
        Self { vector, dimensions }
    }

    /// Compute cosine similarity with another embedding
    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        cosine_similarity(&self.vector, &other.vector)
    }

    /// Normalize the vector to unit length in place
    pub fn normalize(&mut self) {
        let norm = self.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut self.vector {
                *x /= norm;
            }
        }
    }

    /// Convert to little-endian bytes for storage
    pub fn to_bytes(&self) -> Vec<u8> {
        self.vector.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Create from bytes; `None` if the length is not a multiple of 4
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() % 4 != 0 {
            return None;
        }
        let vector: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Some(Self::new(vector))
    }
}

// ============================================================================
// ENCODER CAPABILITY
// ============================================================================

/// An embedding provider: text in, fixed-dimension vector out.
///
/// Implementations may be slow (model inference, network) and must be
/// deterministic for a given model version.
pub trait TextEncoder: Send + Sync {
    /// Name of the underlying model
    fn model_name(&self) -> &str;

    /// Output dimensionality
    fn dimensions(&self) -> usize;

    /// Encode one text into an embedding
    fn encode(&self, text: &str) -> Result<Embedding, EncoderError>;
}

/// Encoder capability, dispatched on rather than probed for.
#[derive(Clone, Default)]
pub enum Encoder {
    /// A configured embedding provider
    Configured(Arc<dyn TextEncoder>),
    /// No provider configured; the semantic path is switched off
    #[default]
    Unconfigured,
}

impl Encoder {
    /// Wrap a provider as a configured capability
    pub fn configured(provider: Arc<dyn TextEncoder>) -> Self {
        Encoder::Configured(provider)
    }

    /// Whether a provider is configured
    pub fn is_configured(&self) -> bool {
        matches!(self, Encoder::Configured(_))
    }

    /// Model name of the configured provider, if any
    pub fn model_name(&self) -> Option<&str> {
        match self {
            Encoder::Configured(provider) => Some(provider.model_name()),
            Encoder::Unconfigured => None,
        }
    }

    /// Encode one text.
    ///
    /// `Ok(None)` means no provider is configured. `Err` is only produced by
    /// a configured provider that failed; callers decide whether that is
    /// fatal (it is not, for duplicate checking; see the detector).
    pub fn encode(&self, text: &str) -> Result<Option<Embedding>, EncoderError> {
        match self {
            Encoder::Configured(provider) => provider.encode(text).map(Some),
            Encoder::Unconfigured => Ok(None),
        }
    }
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoder::Configured(provider) => f
                .debug_struct("Encoder::Configured")
                .field("model", &provider.model_name())
                .field("dimensions", &provider.dimensions())
                .finish(),
            Encoder::Unconfigured => write!(f, "Encoder::Unconfigured"),
        }
    }
}

// ============================================================================
// SIMILARITY FUNCTIONS
// ============================================================================

/// Compute cosine similarity between two vectors.
///
/// The denominator carries an epsilon floor, so a zero vector yields 0.0.
/// Mismatched lengths also yield 0.0.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    dot / ((norm_a.sqrt() * norm_b.sqrt()) + COSINE_EPSILON)
}

/// Compute dot product between two vectors
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Compute Euclidean distance between two vectors
#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::MAX;
    }

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

// ============================================================================
// TESTS
// ============================================================================
