//! Decode loosely typed JSON maps into typed structs.
//!
//! [`Decoder`] drives any `serde::Deserialize` type straight from a
//! `serde_json::Value`, adding the conversions a plain `serde_json::from_value`
//! refuses: numbers between integer and float kinds, numeric strings, and in
//! weak mode bools, prefixed integers and empty containers. Field names match
//! case-insensitively when there is no exact key.
//!
//! [`decode_path`] builds a struct from values scattered across a nested map,
//! with the location of each field described by [`PathDecode`].

mod de;
mod decoder;
mod error;
mod path;

pub use decoder::{decode, weak_decode, DecodeHook, Decoder, DecoderConfig, Kind, Metadata};
pub use error::DecodeError;
pub use path::{decode_path, decode_slice_path, find_data, project, FieldPath, PathDecode, Projector};

pub(crate) use de::{parse_bool, parse_prefixed_int};
