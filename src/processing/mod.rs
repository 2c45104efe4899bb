//! Keyword extraction, curated vocabulary and matching

pub mod analyzer;
pub mod keyword_set;
pub mod matcher;
pub mod stopwords;
pub mod text_processor;
pub mod vocabulary;
