//! Semantic Embeddings Module
//!
//! Text-to-vector encoding for the duplicate detector's semantic path.
//!
//! The `Encoder` capability type makes "no encoder configured" a first-class
//! runtime mode rather than an error: the detector dispatches on the variant
//! and degrades to exact-match-only behavior when unconfigured. The optional
//! `embeddings` feature adds a fastembed-backed local encoder.

mod encoder;

#[cfg(feature = "embeddings")]
#[cfg_attr(docsrs, doc(cfg(feature = "embeddings")))]
mod local;

pub use encoder::{
    cosine_similarity, dot_product, euclidean_distance, Embedding, Encoder, EncoderError,
    TextEncoder, COSINE_EPSILON,
};

#[cfg(feature = "embeddings")]
pub use local::{LocalEncoder, DEFAULT_DIMENSIONS, MAX_TEXT_LENGTH};
