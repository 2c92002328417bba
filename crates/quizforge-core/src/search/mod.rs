//! Search Module
//!
//! Incremental nearest-neighbor search over question embeddings:
//! - Brute-force backend (exact, O(n) per query), always available
//! - Approximate backend (USearch HNSW), behind the `vector-search` feature
//!
//! Both backends expose one `add`/`query` contract, so the duplicate
//! detector is backend-agnostic.

mod vector;

pub use vector::{
    IndexBackend, VectorIndex, VectorIndexError, VectorIndexStats, DEFAULT_CONNECTIVITY,
    DEFAULT_EXPANSION_ADD, DEFAULT_EXPANSION_SEARCH,
};
