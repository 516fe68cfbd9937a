mod align;
mod compare;
mod error;
mod fingerprint;
mod normalize;
mod segments;
mod structure;
mod types;

pub use compare::{compare, compare_files, load_source};

pub use error::CompareError;

pub use types::{CompareOptions, MatchingSegment, SimilarityLevel, SimilarityReport};
