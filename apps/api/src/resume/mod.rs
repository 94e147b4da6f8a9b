// Pure résumé logic: field normalization, validation, scoring and whole-value
// edits. Nothing here does I/O.

pub mod editing;
pub mod handlers;
pub mod normalize;
pub mod scoring;
pub mod validation;
