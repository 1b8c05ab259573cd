pub mod algorithms;
pub mod engine;
pub mod ingest;
pub mod report;
pub mod scanner;

pub use algorithms::clustering::{cluster_frames, Cluster};
pub use algorithms::library_match::find_library_matches;
pub use algorithms::name_match::fuzzy_match;
pub use algorithms::similarity::structural_similarity;
pub use engine::{similarity_key, PatternEngine};
pub use ingest::{extract_file_key, DesignFile, LibraryCatalog, TeamFile};
pub use scanner::{DesignFileSource, Scanner};
