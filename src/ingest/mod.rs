/// Ingestion module
///
/// Turns user supplied files into stored photos:
/// - Type and size checks (validator.rs)
/// - Binary to data URI conversion (encoder.rs)
/// - Descriptors for files and folders on disk (source.rs)
/// - The batch pipeline tying them together (pipeline.rs)

pub mod encoder;
pub mod pipeline;
pub mod source;
pub mod validator;
