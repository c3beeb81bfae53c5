//! Patch payload handling for Kami.
//!
//! When a JavaScript patch is copied inside Origami Studio, the clipboard
//! receives a binary property list describing the selection. This crate:
//! - decodes that payload and picks out the script's declared path
//!   ([`DecodedRecord`], [`PatchQuery`])
//! - finds where the script really lives on disk ([`PathResolver`])
//!
//! The declared path is missing one directory: Origami stores the script
//! under a per-document UUID directory that the payload does not mention.
//!
//! ```text
//! declared:  /var/folders/ab/T/1234567890.js
//! on disk:   /var/folders/ab/T/XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX/1234567890.js
//! ```

mod decode;
mod error;
mod resolve;

pub use decode::{DecodedRecord, PatchQuery};
pub use error::DecodeError;
pub use resolve::{PathResolver, ResolvedPath};
