extern crate miette;
extern crate thiserror;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CipherError {
    #[error("repeating key is empty")]
    #[diagnostic(code(libctb::empty_key_error))]
    EmptyKey,
}

#[derive(Error, Diagnostic, Debug)]
pub enum DigestError {
    #[error("checksum mismatch (expected {expected:?}, received {received:?})")]
    #[diagnostic(code(libctb::digest_error))]
    Mismatch { expected: String, received: String },
}

#[derive(Error, Diagnostic, Debug)]
pub enum ProgressError {
    #[error(
        "incorrect size of the offset table (not a multiple of {expected:?}, received {received:?})"
    )]
    #[diagnostic(code(libctb::table_size_error))]
    IncorrectSizeTable { expected: usize, received: usize },

    #[error(
        "layer offsets must increase (offset {received:?} at position {position:?} does not exceed {previous:?})"
    )]
    #[diagnostic(code(libctb::offset_order_error))]
    NonIncreasingOffset {
        position: usize,
        previous: u64,
        received: u64,
    },

    #[error("byte offset {received:?} does not match any layer boundary")]
    #[diagnostic(code(libctb::offset_lookup_error))]
    UnknownOffset { received: u64 },
}
