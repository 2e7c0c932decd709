pub mod sentence_limiter;

pub use sentence_limiter::{limit_sentences, sentences, SENTENCE_DELIMITER};
