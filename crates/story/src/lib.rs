//! Nusantara Story
//!
//! Narrative generation and structured promotional analysis for
//! cultural and tourism objects

mod error;
mod generator;
mod model;
mod prompts;
mod recovery;

pub use error::{GenerationError, RecoveryError};
pub use generator::{RetryPolicy, StoryGenerator, StoryOutcome};
pub use model::{
    item_field_names, AnalysisCategory, AnalysisItem, AnalysisRecord, NarrativeResult,
    ObjectDescription, StyleTag,
};
pub use prompts::{
    analysis_prompt, audience_label, narrative_prompt, style_label, ANALYSIS_OPTIONS,
    NARRATIVE_OPTIONS,
};
pub use recovery::{extract_candidate, recover};
