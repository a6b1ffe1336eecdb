pub mod caption_track;
pub mod normalizer;
pub mod report;
pub mod resolver;
pub mod tokenization;
