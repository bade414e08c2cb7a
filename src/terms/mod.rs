// Vocabulary construction — term counting, collocation detection and
// multi-word unit compounding.

pub mod collocation;
pub mod compound;
pub mod counter;
