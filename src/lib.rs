// Keyterm: key term extraction for speech corpora
//
// This is the library root. Each module corresponds to a stage of the
// analysis: building the corpus, shaping its vocabulary, scoring terms,
// and presenting the results.

pub mod config;
pub mod corpus;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod status;
pub mod terms;
