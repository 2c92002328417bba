//! Incremental Vector Index
//!
//! Supports add-one insertion and top-k cosine-similarity queries without
//! full rebuilds. The backend is chosen explicitly at construction:
//! `BruteForce` scores every stored vector per query and is exact;
//! `Approximate` (feature `vector-search`) maintains a USearch HNSW graph
//! for sub-linear queries at larger scale.
//!
//! Dimensionality is fixed by the first inserted vector; every later `add`
//! or `query` must match it. Equal-similarity results are ordered by
//! insertion (earlier-inserted wins).

use crate::embeddings::cosine_similarity;

#[cfg(feature = "vector-search")]
use usearch::{Index, IndexOptions, MetricKind, ScalarKind};

// ============================================================================
// CONSTANTS
// ============================================================================

/// HNSW connectivity parameter (higher = better recall, more memory)
pub const DEFAULT_CONNECTIVITY: usize = 16;

/// HNSW expansion factor for index building
pub const DEFAULT_EXPANSION_ADD: usize = 128;

/// HNSW expansion factor for search
pub const DEFAULT_EXPANSION_SEARCH: usize = 64;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Vector index error types
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum VectorIndexError {
    /// Vector dimensionality differs from the index's established dimensionality
    DimensionMismatch {
        /// Dimensionality fixed at first insertion
        expected: usize,
        /// Dimensionality of the offending vector
        got: usize,
    },
    /// Backend-specific failure
    Backend(String),
}

impl std::fmt::Display for VectorIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorIndexError::DimensionMismatch { expected, got } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, got)
            }
            VectorIndexError::Backend(e) => write!(f, "Index backend error: {}", e),
        }
    }
}

impl std::error::Error for VectorIndexError {}

// ============================================================================
// BACKEND SELECTION
// ============================================================================

/// Index backend, selected by the caller at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexBackend {
    /// Exact search; scores every stored vector per query
    #[default]
    BruteForce,
    /// USearch HNSW; trades exactness for sub-linear query time
    #[cfg(feature = "vector-search")]
    Approximate,
}

impl IndexBackend {
    /// Backend name for logging and stats
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexBackend::BruteForce => "brute-force",
            #[cfg(feature = "vector-search")]
            IndexBackend::Approximate => "approximate",
        }
    }
}

/// Index statistics
#[derive(Debug, Clone)]
pub struct VectorIndexStats {
    /// Total number of stored vectors
    pub total_vectors: usize,
    /// Established dimensionality (None until first insertion)
    pub dimensions: Option<usize>,
    /// Active backend
    pub backend: &'static str,
}

// ============================================================================
// VECTOR INDEX
// ============================================================================

enum Backend {
    BruteForce {
        // insertion order doubles as the tie-break order
        entries: Vec<(String, Vec<f32>)>,
    },
    #[cfg(feature = "vector-search")]
    Approximate(ApproximateState),
}

#[cfg(feature = "vector-search")]
struct ApproximateState {
    // created lazily at first insertion, once dimensionality is known
    index: Option<Index>,
    // u64 key in the HNSW graph == position in this list
    ids: Vec<String>,
}

/// Incremental similarity index over (id, embedding) pairs
pub struct VectorIndex {
    backend: Backend,
    kind: IndexBackend,
    dimensions: Option<usize>,
}

impl VectorIndex {
    /// Create an empty index with the given backend
    pub fn new(backend: IndexBackend) -> Self {
        let state = match backend {
            IndexBackend::BruteForce => Backend::BruteForce {
                entries: Vec::new(),
            },
            #[cfg(feature = "vector-search")]
            IndexBackend::Approximate => Backend::Approximate(ApproximateState {
                index: None,
                ids: Vec::new(),
            }),
        };
        Self {
            backend: state,
            kind: backend,
            dimensions: None,
        }
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        match &self.backend {
            Backend::BruteForce { entries } => entries.len(),
            #[cfg(feature = "vector-search")]
            Backend::Approximate(state) => state.ids.len(),
        }
    }

    /// Whether the index holds no vectors
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Established dimensionality (None until the first insertion)
    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    /// Active backend
    pub fn backend(&self) -> IndexBackend {
        self.kind
    }

    /// Get index statistics
    pub fn stats(&self) -> VectorIndexStats {
        VectorIndexStats {
            total_vectors: self.len(),
            dimensions: self.dimensions,
            backend: self.kind.as_str(),
        }
    }

    fn check_dimensions(&self, got: usize) -> Result<(), VectorIndexError> {
        match self.dimensions {
            Some(expected) if expected != got => {
                Err(VectorIndexError::DimensionMismatch { expected, got })
            }
            _ => Ok(()),
        }
    }

    /// Append one (id, vector) pair.
    ///
    /// The first insertion fixes the index's dimensionality. Callers keep
    /// ids unique; the index itself does not enforce that.
    pub fn add(&mut self, id: &str, vector: Vec<f32>) -> Result<(), VectorIndexError> {
        self.check_dimensions(vector.len())?;

        match &mut self.backend {
            Backend::BruteForce { entries } => {
                self.dimensions = Some(vector.len());
                entries.push((id.to_string(), vector));
            }
            #[cfg(feature = "vector-search")]
            Backend::Approximate(state) => {
                if state.index.is_none() {
                    let options = IndexOptions {
                        dimensions: vector.len(),
                        metric: MetricKind::Cos,
                        quantization: ScalarKind::F32,
                        connectivity: DEFAULT_CONNECTIVITY,
                        expansion_add: DEFAULT_EXPANSION_ADD,
                        expansion_search: DEFAULT_EXPANSION_SEARCH,
                        multi: false,
                    };
                    let created = Index::new(&options)
                        .map_err(|e| VectorIndexError::Backend(e.to_string()))?;
                    state.index = Some(created);
                }
                let Some(index) = state.index.as_ref() else {
                    return Err(VectorIndexError::Backend(
                        "index unavailable after initialization".to_string(),
                    ));
                };

                // usearch requires reserved capacity ahead of add()
                if index.size() >= index.capacity() {
                    let new_capacity = std::cmp::max(index.capacity() * 2, 16);
                    index
                        .reserve(new_capacity)
                        .map_err(|e| VectorIndexError::Backend(e.to_string()))?;
                }

                let key = state.ids.len() as u64;
                index
                    .add(key, &vector)
                    .map_err(|e| VectorIndexError::Backend(e.to_string()))?;

                self.dimensions = Some(vector.len());
                state.ids.push(id.to_string());
            }
        }

        Ok(())
    }

    /// Top-k nearest neighbors by cosine similarity.
    ///
    /// Returns at most `k` `(id, similarity)` pairs in descending similarity
    /// order; equal similarities resolve to the earlier-inserted id. An empty
    /// index returns an empty result for any query.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<(String, f32)>, VectorIndexError> {
        if self.is_empty() || k == 0 {
            return Ok(vec![]);
        }
        self.check_dimensions(vector.len())?;

        match &self.backend {
            Backend::BruteForce { entries } => {
                let mut scored: Vec<(String, f32)> = entries
                    .iter()
                    .map(|(id, stored)| (id.clone(), cosine_similarity(stored, vector)))
                    .collect();
                // stable sort keeps insertion order among equal similarities
                scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
                scored.truncate(k);
                Ok(scored)
            }
            #[cfg(feature = "vector-search")]
            Backend::Approximate(state) => {
                let Some(index) = &state.index else {
                    return Ok(vec![]);
                };

                let matches = index
                    .search(vector, k)
                    .map_err(|e| VectorIndexError::Backend(e.to_string()))?;

                let mut scored: Vec<(u64, String, f32)> = matches
                    .keys
                    .iter()
                    .zip(matches.distances.iter())
                    .filter_map(|(key, distance)| {
                        state
                            .ids
                            .get(*key as usize)
                            .map(|id| (*key, id.clone(), 1.0 - distance))
                    })
                    .collect();
                scored.sort_by(|a, b| {
                    b.2.partial_cmp(&a.2)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.0.cmp(&b.0))
                });

                Ok(scored.into_iter().map(|(_, id, sim)| (id, sim)).collect())
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
