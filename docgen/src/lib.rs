// Internal modules
pub mod config;
pub mod documentation;
pub mod extraction;
pub mod file_processor;
pub mod identifier;
#[macro_use]
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod utils;

// Re-export key types for library consumers
pub use documentation::{DocumentSet, DocumentedMember};
pub use identifier::{IdentifierDecoder, MemberKind, MemberRecord, Parameter};
pub use normalize::{TokenNormalizer, TranslationTable};
pub use pipeline::{PipelineError, PipelineResult};

// Re-export pipeline output for JSON consumers
pub use pipeline::output::PipelineOutput;
