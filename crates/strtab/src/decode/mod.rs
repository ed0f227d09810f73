//! Declaration scanning: cursor, comment skipping, escape decoding and the staged
//! recognizer that drives them.

pub mod cursor;
pub mod escape;
pub mod parser;
pub mod skipper;
