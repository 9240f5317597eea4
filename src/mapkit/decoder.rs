use super::de::{Context, ValueDeserializer};
use super::error::DecodeError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Shape of a value on either side of a conversion, as seen by a [`DecodeHook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    String,
    Slice,
    Map,
    Struct,
    Option,
    Enum,
    Unit,
    Any,
}

impl Kind {
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(n) if n.is_u64() => Kind::Uint,
            Value::Number(n) if n.is_i64() => Kind::Int,
            Value::Number(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Slice,
            Value::Object(_) => Kind::Map,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Struct => "struct",
            Kind::Option => "option",
            Kind::Enum => "enum",
            Kind::Unit => "unit",
            Kind::Any => "any",
        }
    }
}

/// Called with (source kind, target kind, raw value) before each conversion.
/// `Ok(Some(v))` replaces the value and `Ok(None)` keeps it. `Err` is reported
/// as that field's error and the field keeps its zero value.
pub type DecodeHook =
    Arc<dyn Fn(Kind, Kind, &Value) -> std::result::Result<Option<Value>, String> + Send + Sync>;

#[derive(Clone, Default)]
pub struct DecoderConfig {
    /// Allow the lossy conversions: bool <-> number <-> string, prefixed
    /// integer strings, and an empty array standing in for an empty map.
    pub weakly_typed_input: bool,
    /// Treat keys that match no struct field as an error.
    pub error_unused: bool,
    pub decode_hook: Option<DecodeHook>,
    /// Record decoded and unused key paths.
    pub metadata: bool,
}

impl fmt::Debug for DecoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderConfig")
            .field("weakly_typed_input", &self.weakly_typed_input)
            .field("error_unused", &self.error_unused)
            .field("decode_hook", &self.decode_hook.is_some())
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// Key paths seen during a decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Fields that were decoded, e.g. `items[0].sku`.
    pub keys: Vec<String>,
    /// Keys of the input that no field consumed.
    pub unused: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn decode<T: DeserializeOwned>(&self, value: &Value) -> Result<T, DecodeError> {
        self.decode_with_metadata(value).map(|(decoded, _)| decoded)
    }

    pub fn decode_with_metadata<T: DeserializeOwned>(
        &self,
        value: &Value,
    ) -> Result<(T, Metadata), DecodeError> {
        let ctx = Context::new(self.config.clone());
        let result = T::deserialize(ValueDeserializer::new(value, String::new(), &ctx));
        let (collected, metadata) = ctx.finish();

        match result {
            Err(e) => Err(e.at("").prepend(collected)),
            Ok(_) if !collected.is_empty() => Err(DecodeError::new(collected)),
            Ok(decoded) => Ok((decoded, metadata)),
        }
    }
}

/// Strict decode: numeric kinds still convert into each other.
pub fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, DecodeError> {
    Decoder::default().decode(value)
}

pub fn weak_decode<T: DeserializeOwned>(value: &Value) -> Result<T, DecodeError> {
    Decoder::new(DecoderConfig {
        weakly_typed_input: true,
        ..DecoderConfig::default()
    })
    .decode(value)
}
