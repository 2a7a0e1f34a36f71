// src/extractors/mod.rs
pub mod figures;
pub mod section;

// Re-export key extraction types for convenience
pub use figures::{ExtractedFigures, FieldSpec, FieldValue, FigureExtractor, FigureGrammar, PostProcess};
pub use section::{ExtractedSection, SectionEnd, SectionExtractor, SectionRegion};
