pub mod advice;
pub mod input;
pub mod profile;
pub mod random;
pub mod scorer;
pub mod signal;
pub mod surface;
pub mod taxonomy;
pub mod tier;

// Re-export common types for convenience
pub use input::{AnalysisInput, ContentKind};
pub use random::{RandomSource, SeededSource, SequenceSource, ThreadSource};
pub use scorer::{score, AnalysisResult, RiskScorer, ScoreResult, ScoringConfig};
pub use surface::Surface;
pub use taxonomy::{KeywordCategory, Taxonomy};
pub use tier::Tier;
