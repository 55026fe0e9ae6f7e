//! Hyperdimensional Computing (HDC) encoding of utterances.
//!
//! Utterances are mapped to dense bipolar hypervectors without any trained
//! model:
//!
//! 1. **Item memory**: every token gets a fixed random hypervector derived
//!    from the token string and a seed.
//! 2. **Binding (⊗)**: the tokens of an n-gram are combined by element-wise
//!    product after rotating each by its position (ρ^p), so `a b` ≠ `b a`.
//! 3. **Bundling (⊕)**: the n-grams of an utterance (or the utterances of a
//!    window) are merged by per-dimension majority vote. Tied dimensions are
//!    filled from the bundled vectors themselves.
//!
//! With a few thousand dimensions, random token vectors are nearly
//! orthogonal, so two utterances are similar when they share n-grams and
//! near-orthogonal when they share none.
//!
//! References:
//! - Kanerva (2009): "Hyperdimensional Computing: An Introduction to Computing in Distributed Representation with High-Dimensional Random Vectors"
//! - Rahimi et al. (2016): "A Robust and Energy-Efficient Classifier Using Brain-Inspired Hyperdimensional Computing"

mod encoder;
mod hypervector;

pub use encoder::{HyperEncoder, ItemMemory};
pub use hypervector::Hypervector;
