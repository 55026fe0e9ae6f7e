//! Text processing module for utterance tokenization and normalization.

mod normalizer;
mod tokenizer;

pub use normalizer::Normalizer;
pub use tokenizer::Tokenizer;
