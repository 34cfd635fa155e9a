//! Image transformation components.
//!
//! Each stage of turning one source image into a fixed-size output:
//! - **accept**: Decide which inputs are offered to the converter
//! - **discovery**: Find accepted files in directories
//! - **validate**: Size and magic-byte checks before decoding
//! - **decode**: Decode with a timeout and dimension limits
//! - **geometry**: Contain-fit placement math
//! - **engine**: Draw onto the canvas and encode
//! - **encode**: WebP / PNG / JPEG encoders
//! - **converter**: Orchestrates the stages for one input

pub mod accept;
pub mod converter;
pub mod decode;
pub mod discovery;
pub mod encode;
pub mod engine;
pub mod geometry;
pub mod validate;

// Re-exports for convenient access
pub use accept::{accepted_extensions, accepted_mime_types, is_accepted};
pub use converter::Converter;
pub use decode::{ImageDecoder, SourceImage};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use encode::encode_canvas;
pub use engine::{convert, convert_bytes};
pub use geometry::{contain_placement, PixelRect, Placement};
pub use validate::Validator;
