//! Raw student records.
//!
//! A `RawInput` is the unencoded answer set for one student: attribute names
//! mapped to text or numbers, exactly as captured by the form or sent by a
//! JSON caller. Nothing here validates ranges or categories; that is the
//! encoder's job.

mod raw;

pub use raw::{RawInput, RawValue};
