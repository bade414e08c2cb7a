// Analysis pipeline: corpus preparation and per-group keyness batches.

pub mod keyness;
pub mod prepare;
