use super::decoder::{DecoderConfig, Kind, Metadata};
use super::error::DecodeError;
use serde::de::{
    self, DeserializeSeed, Deserializer as _, EnumAccess, IntoDeserializer, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::cell::RefCell;

type Result<T> = std::result::Result<T, DecodeError>;

/// State shared by every deserializer of one decode.
pub(crate) struct Context {
    config: DecoderConfig,
    errors: RefCell<Vec<String>>,
    keys: RefCell<Vec<String>>,
    unused: RefCell<Vec<String>>,
}

impl Context {
    pub(crate) fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            errors: RefCell::new(Vec::new()),
            keys: RefCell::new(Vec::new()),
            unused: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn finish(self) -> (Vec<String>, Metadata) {
        (
            self.errors.into_inner(),
            Metadata {
                keys: self.keys.into_inner(),
                unused: self.unused.into_inner(),
            },
        )
    }

    fn weak(&self) -> bool {
        self.config.weakly_typed_input
    }

    fn record_key(&self, path: &str, value: &Value) {
        if self.config.metadata && !path.is_empty() && !value.is_null() {
            self.keys.borrow_mut().push(path.to_string());
        }
    }

    fn record_errors(&self, err: DecodeError) {
        self.errors.borrow_mut().extend(err.errors);
    }
}

fn join_field(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

/// Integer text with an optional sign and a `0x`, `0o`, `0b` or leading `0` prefix.
pub(crate) fn parse_prefixed_int(text: &str) -> std::result::Result<i128, String> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (radix, digits) = if let Some(d) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, d)
    } else if let Some(d) = body.strip_prefix("0o").or_else(|| body.strip_prefix("0O")) {
        (8, d)
    } else if let Some(d) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, d)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(format!("invalid syntax: {:?}", text));
    }
    let magnitude = i128::from_str_radix(digits, radix).map_err(|e| e.to_string())?;
    Ok(if negative { -magnitude } else { magnitude })
}

pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" | "" => Some(false),
        _ => None,
    }
}

fn visit_integer<'de, V: Visitor<'de>>(visitor: V, value: i128, name: &str) -> Result<V::Value> {
    if let Ok(v) = i64::try_from(value) {
        visitor.visit_i64(v)
    } else if let Ok(v) = u64::try_from(value) {
        visitor.visit_u64(v)
    } else {
        Err(DecodeError::located(format!("'{}' value {} out of range", name, value)))
    }
}

fn visit_number<'de, V: Visitor<'de>>(visitor: V, n: &Number) -> Result<V::Value> {
    if let Some(i) = n.as_i64() {
        visitor.visit_i64(i)
    } else if let Some(u) = n.as_u64() {
        visitor.visit_u64(u)
    } else {
        visitor.visit_f64(n.as_f64().unwrap_or_default())
    }
}

/// Unwrap a prepared deserializer, or return early through the zero value.
macro_rules! prepare_or_zero {
    ($de:expr, $kind:expr, $zero:ident => $fallback:expr) => {
        match $de.prepare($kind) {
            Ok(this) => this,
            Err($zero) => return $fallback,
        }
    };
}

pub(crate) struct ValueDeserializer<'a> {
    value: Cow<'a, Value>,
    name: String,
    ctx: &'a Context,
}

impl<'a> ValueDeserializer<'a> {
    pub(crate) fn new(value: &'a Value, name: String, ctx: &'a Context) -> Self {
        Self {
            value: Cow::Borrowed(value),
            name,
            ctx,
        }
    }

    /// Run the decode hook for a conversion into `target`. A null source
    /// leaves the target at its zero value, as does a failing hook.
    fn prepare(mut self, target: Kind) -> std::result::Result<Self, ZeroDeserializer> {
        if self.value.is_null() && !matches!(target, Kind::Any | Kind::Unit) {
            return Err(ZeroDeserializer);
        }
        if let Some(hook) = &self.ctx.config.decode_hook {
            match hook(Kind::of(&self.value), target, &self.value) {
                Ok(Some(replacement)) => self.value = Cow::Owned(replacement),
                Ok(None) => {}
                Err(message) => {
                    return Err(self.fail(DecodeError::located(format!(
                        "'{}' decode hook failed: {}",
                        self.name, message
                    ))))
                }
            }
        }
        Ok(self)
    }

    /// Record a failed conversion and carry on with the zero value.
    fn fail(&self, err: DecodeError) -> ZeroDeserializer {
        self.ctx.record_errors(err.at(&self.name));
        ZeroDeserializer
    }

    fn mismatch(&self, expected: &str) -> DecodeError {
        DecodeError::located(format!(
            "'{}' expected type '{}', got unconvertible type '{}'",
            self.name,
            expected,
            Kind::of(&self.value).name()
        ))
    }

    /// Integer conversion into a target that holds `min..=max`.
    fn integer<'de, V: Visitor<'de>>(
        self,
        target: Kind,
        (min, max): (i128, i128),
        visitor: V,
    ) -> Result<V::Value> {
        let this = prepare_or_zero!(self, target, zero => zero.deserialize_i64(visitor));
        let weak = this.ctx.weak();
        let parsed = match &*this.value {
            Value::Number(n) => Ok(if let Some(i) = n.as_i64() {
                i128::from(i)
            } else if let Some(u) = n.as_u64() {
                i128::from(u)
            } else {
                i128::from(n.as_f64().unwrap_or_default() as i64)
            }),
            Value::Bool(b) if weak => Ok(i128::from(*b)),
            Value::String(s) if weak => parse_prefixed_int(s.trim()).map_err(|e| {
                DecodeError::located(format!(
                    "cannot parse '{}' as {}: {}",
                    this.name,
                    target.name(),
                    e
                ))
            }),
            Value::String(s) => Ok(s.trim().parse::<i128>().unwrap_or_else(|e| {
                tracing::debug!("'{}': {:?} is not an integer ({}), using 0", this.name, s, e);
                0
            })),
            _ => Err(this.mismatch(target.name())),
        };

        match parsed {
            Ok(value) if value < min || value > max => this
                .fail(DecodeError::located(format!(
                    "cannot parse '{}', {} overflows {}",
                    this.name,
                    value,
                    target.name()
                )))
                .deserialize_i64(visitor),
            Ok(value) => visit_integer(visitor, value, &this.name),
            Err(e) => this.fail(e).deserialize_i64(visitor),
        }
    }

    fn float<'de, V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::Float, zero => zero.deserialize_f64(visitor));
        let weak = this.ctx.weak();
        match &*this.value {
            Value::Number(n) => visitor.visit_f64(n.as_f64().unwrap_or_default()),
            Value::Bool(b) if weak => visitor.visit_f64(if *b { 1.0 } else { 0.0 }),
            Value::String(s) if weak => match s.trim().parse::<f64>() {
                Ok(parsed) => visitor.visit_f64(parsed),
                Err(e) => this
                    .fail(DecodeError::located(format!(
                        "cannot parse '{}' as float: {}",
                        this.name, e
                    )))
                    .deserialize_f64(visitor),
            },
            Value::String(s) => visitor.visit_f64(crate::strkit::string_to_float64(s.trim())),
            _ => this.fail(this.mismatch("float")).deserialize_f64(visitor),
        }
    }

    /// Sequence conversion. `len` is the element count a tuple target expects.
    fn seq_of<'de, V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::Slice, zero => zero.deserialize_tuple(len, visitor));
        match &*this.value {
            Value::Array(items) => visitor.visit_seq(SeqDeserializer {
                items: items.iter().enumerate(),
                name: &this.name,
                ctx: this.ctx,
            }),
            Value::Object(map) if this.ctx.weak() && map.is_empty() => {
                visitor.visit_seq(SeqDeserializer {
                    items: [].iter().enumerate(),
                    name: &this.name,
                    ctx: this.ctx,
                })
            }
            other => this
                .fail(DecodeError::located(format!(
                    "'{}': source data must be an array or slice, got {}",
                    this.name,
                    Kind::of(other).name()
                )))
                .deserialize_tuple(len, visitor),
        }
    }
}

macro_rules! deserialize_integer {
    ($($method:ident => $kind:expr, $min:expr, $max:expr);* $(;)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                self.integer($kind, ($min, $max), visitor)
            }
        )*
    };
}

impl<'de, 'a> de::Deserializer<'de> for ValueDeserializer<'a> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::Any, zero => zero.deserialize_any(visitor));
        match &*this.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Number(n) => visit_number(visitor, n),
            Value::String(s) => visitor.visit_str(s),
            Value::Array(items) => visitor.visit_seq(SeqDeserializer {
                items: items.iter().enumerate(),
                name: &this.name,
                ctx: this.ctx,
            }),
            Value::Object(map) => visitor.visit_map(MapDeserializer::new(map, &this.name, this.ctx)),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::Bool, zero => zero.deserialize_bool(visitor));
        let weak = this.ctx.weak();
        match &*this.value {
            Value::Bool(b) => visitor.visit_bool(*b),
            Value::Number(n) if weak => visitor.visit_bool(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
            Value::String(s) if weak => match parse_bool(s) {
                Some(b) => visitor.visit_bool(b),
                None => this
                    .fail(DecodeError::located(format!(
                        "cannot parse '{}' as bool: invalid syntax {:?}",
                        this.name, s
                    )))
                    .deserialize_bool(visitor),
            },
            _ => this.fail(this.mismatch("bool")).deserialize_bool(visitor),
        }
    }

    deserialize_integer! {
        deserialize_i8 => Kind::Int, i128::from(i8::MIN), i128::from(i8::MAX);
        deserialize_i16 => Kind::Int, i128::from(i16::MIN), i128::from(i16::MAX);
        deserialize_i32 => Kind::Int, i128::from(i32::MIN), i128::from(i32::MAX);
        deserialize_i64 => Kind::Int, i128::from(i64::MIN), i128::from(i64::MAX);
        deserialize_i128 => Kind::Int, i128::MIN, i128::MAX;
        deserialize_u8 => Kind::Uint, 0, i128::from(u8::MAX);
        deserialize_u16 => Kind::Uint, 0, i128::from(u16::MAX);
        deserialize_u32 => Kind::Uint, 0, i128::from(u32::MAX);
        deserialize_u64 => Kind::Uint, 0, i128::from(u64::MAX);
        deserialize_u128 => Kind::Uint, 0, i128::MAX;
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.float(visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.float(visitor)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_string(visitor)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::String, zero => zero.deserialize_string(visitor));
        let weak = this.ctx.weak();
        match &*this.value {
            Value::String(s) => visitor.visit_str(s),
            Value::Bool(b) if weak => visitor.visit_str(if *b { "1" } else { "0" }),
            // Plain decimal, no exponent and no trailing ".0".
            number @ Value::Number(_) if weak => visitor.visit_string(crate::strkit::to_string(number)),
            _ => this.fail(this.mismatch("string")).deserialize_string(visitor),
        }
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if let Value::String(s) = &*self.value {
            return visitor.visit_bytes(s.as_bytes());
        }
        self.seq_of(0, visitor)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::Option, zero => zero.deserialize_option(visitor));
        visitor.visit_some(this)
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::Unit, zero => zero.deserialize_unit(visitor));
        match &*this.value {
            Value::Null => visitor.visit_unit(),
            _ => this.fail(this.mismatch("unit")).deserialize_unit(visitor),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.seq_of(0, visitor)
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        self.seq_of(len, visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.seq_of(len, visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::Map, zero => zero.deserialize_map(visitor));
        let empty = Map::new();
        let map = match &*this.value {
            Value::Object(map) => map,
            Value::Array(items) if this.ctx.weak() && items.is_empty() => &empty,
            other => {
                return this
                    .fail(DecodeError::located(format!(
                        "'{}' expected a map, got '{}'",
                        this.name,
                        Kind::of(other).name()
                    )))
                    .deserialize_map(visitor)
            }
        };
        visitor.visit_map(MapDeserializer::new(map, &this.name, this.ctx))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::Struct, zero => zero.deserialize_struct(name, fields, visitor));
        let map = match &*this.value {
            Value::Object(map) => map,
            other => {
                return this
                    .fail(DecodeError::located(format!(
                        "'{}' expected a map, got '{}'",
                        this.name,
                        Kind::of(other).name()
                    )))
                    .deserialize_struct(name, fields, visitor)
            }
        };

        let access = StructDeserializer::new(map, fields, &this.name, this.ctx);
        visitor.visit_map(access).map_err(|e| e.at(&this.name))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let this = prepare_or_zero!(self, Kind::Enum, zero => zero.deserialize_enum(name, variants, visitor));
        match &*this.value {
            Value::String(variant) => visitor.visit_enum(variant.as_str().into_deserializer()),
            Value::Object(map) if map.len() == 1 => {
                let (variant, content) = map.iter().next().ok_or_else(|| this.mismatch("enum"))?;
                visitor.visit_enum(EnumDeserializer {
                    variant,
                    content,
                    name: join_field(&this.name, variant),
                    ctx: this.ctx,
                })
            }
            _ => this
                .fail(this.mismatch("enum"))
                .deserialize_enum(name, variants, visitor),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

/// Produces the zero value of whatever type asks: `false`, `0`, `""`, `None`,
/// empty collections, and structs whose fields are all zero.
pub(crate) struct ZeroDeserializer;

macro_rules! zero_integer {
    ($($method:ident),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                visitor.visit_i64(0)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ZeroDeserializer {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_bool(false)
    }

    zero_integer!(
        deserialize_i8,
        deserialize_i16,
        deserialize_i32,
        deserialize_i64,
        deserialize_i128,
        deserialize_u8,
        deserialize_u16,
        deserialize_u32,
        deserialize_u64,
        deserialize_u128,
    );

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_f64(0.0)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_f64(0.0)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_char('\0')
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_str("")
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_str("")
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_bytes(&[])
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_bytes(&[])
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_none()
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_seq(ZeroSeq { remaining: 0 })
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        visitor.visit_seq(ZeroSeq { remaining: len })
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_seq(ZeroSeq { remaining: len })
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_map(ZeroFields { fields: NO_FIELDS.iter() })
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_map(ZeroFields {
            fields: fields.iter(),
        })
    }

    /// The first variant, which only works out when it is a unit variant.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match variants.first() {
            Some(variant) => visitor.visit_enum((*variant).into_deserializer()),
            None => Err(DecodeError::located(format!("enum {} has no variants", name))),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_str("")
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}

struct ZeroSeq {
    remaining: usize,
}

impl<'de> SeqAccess<'de> for ZeroSeq {
    type Error = DecodeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(ZeroDeserializer).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

const NO_FIELDS: &[&str] = &[];

struct ZeroFields {
    fields: std::slice::Iter<'static, &'static str>,
}

impl<'de> MapAccess<'de> for ZeroFields {
    type Error = DecodeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        match self.fields.next() {
            Some(field) => seed
                .deserialize(de::value::StrDeserializer::<DecodeError>::new(field))
                .map(Some),
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        seed.deserialize(ZeroDeserializer)
    }
}

struct SeqDeserializer<'b, I> {
    items: I,
    name: &'b str,
    ctx: &'b Context,
}

impl<'de, 'b, I> SeqAccess<'de> for SeqDeserializer<'b, I>
where
    I: Iterator<Item = (usize, &'b Value)>,
{
    type Error = DecodeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        let Some((index, item)) = self.items.next() else {
            return Ok(None);
        };
        let path = format!("{}[{}]", self.name, index);
        let value = seed
            .deserialize(ValueDeserializer::new(item, path.clone(), self.ctx))
            .map_err(|e| e.at(&path))?;
        self.ctx.record_key(&path, item);
        Ok(Some(value))
    }
}

struct MapDeserializer<'b> {
    entries: serde_json::map::Iter<'b>,
    pending: Option<(&'b Value, String)>,
    name: &'b str,
    ctx: &'b Context,
}

impl<'b> MapDeserializer<'b> {
    fn new(map: &'b Map<String, Value>, name: &'b str, ctx: &'b Context) -> Self {
        Self {
            entries: map.iter(),
            pending: None,
            name,
            ctx,
        }
    }
}

impl<'de, 'b> MapAccess<'de> for MapDeserializer<'b> {
    type Error = DecodeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };
        let path = format!("{}[{}]", self.name, key);
        let decoded = seed
            .deserialize(KeyDeserializer { key, name: &path })
            .map_err(|e| e.at(&path))?;
        self.pending = Some((value, path));
        Ok(Some(decoded))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let (value, path) = self
            .pending
            .take()
            .ok_or_else(|| DecodeError::located("map value requested before its key"))?;
        let decoded = seed
            .deserialize(ValueDeserializer::new(value, path.clone(), self.ctx))
            .map_err(|e| e.at(&path))?;
        self.ctx.record_key(&path, value);
        Ok(decoded)
    }
}

struct StructEntry<'b> {
    key: String,
    value: &'b Value,
    path: String,
    known: bool,
}

struct StructDeserializer<'b> {
    entries: std::vec::IntoIter<StructEntry<'b>>,
    pending: Option<StructEntry<'b>>,
    ctx: &'b Context,
}

impl<'b> StructDeserializer<'b> {
    /// Pair input keys with struct fields. Exact names win, then a
    /// case-insensitive match against a field nobody has claimed yet.
    fn new(
        map: &'b Map<String, Value>,
        fields: &'static [&'static str],
        name: &str,
        ctx: &'b Context,
    ) -> Self {
        let mut claimed: Vec<&str> = map
            .keys()
            .filter(|k| fields.contains(&k.as_str()))
            .map(String::as_str)
            .collect();

        let mut entries = Vec::with_capacity(map.len());
        let mut unused = Vec::new();
        for (key, value) in map {
            let field = if fields.contains(&key.as_str()) {
                Some(key.as_str())
            } else {
                let lowered = key.to_lowercase();
                let found = fields
                    .iter()
                    .copied()
                    .find(|f| !claimed.contains(f) && f.to_lowercase() == lowered);
                if let Some(f) = found {
                    claimed.push(f);
                }
                found
            };

            match field {
                Some(field) => entries.push(StructEntry {
                    key: field.to_string(),
                    value,
                    path: join_field(name, field),
                    known: true,
                }),
                None => {
                    unused.push(key.clone());
                    entries.push(StructEntry {
                        key: key.clone(),
                        value,
                        path: join_field(name, key),
                        known: false,
                    });
                }
            }
        }

        if !unused.is_empty() {
            if ctx.config.error_unused {
                unused.sort();
                ctx.errors.borrow_mut().push(format!(
                    "'{}' has invalid keys: {}",
                    name,
                    unused.join(", ")
                ));
            } else if ctx.config.metadata {
                ctx.unused
                    .borrow_mut()
                    .extend(unused.iter().map(|k| join_field(name, k)));
            }
        }

        Self {
            entries: entries.into_iter(),
            pending: None,
            ctx,
        }
    }
}

impl<'de, 'b> MapAccess<'de> for StructDeserializer<'b> {
    type Error = DecodeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        let Some(entry) = self.entries.next() else {
            return Ok(None);
        };
        let key = seed.deserialize(de::value::StrDeserializer::<DecodeError>::new(&entry.key))?;
        self.pending = Some(entry);
        Ok(Some(key))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let entry = self
            .pending
            .take()
            .ok_or_else(|| DecodeError::located("struct field requested before its key"))?;
        let decoded = seed
            .deserialize(ValueDeserializer::new(entry.value, entry.path.clone(), self.ctx))
            .map_err(|e| e.at(&entry.path))?;
        if entry.known {
            self.ctx.record_key(&entry.path, entry.value);
        }
        Ok(decoded)
    }
}

struct EnumDeserializer<'b> {
    variant: &'b str,
    content: &'b Value,
    name: String,
    ctx: &'b Context,
}

impl<'de, 'b> EnumAccess<'de> for EnumDeserializer<'b> {
    type Error = DecodeError;
    type Variant = Self;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self)> {
        let variant = seed.deserialize(de::value::StrDeserializer::<DecodeError>::new(self.variant))?;
        Ok((variant, self))
    }
}

impl<'de, 'b> VariantAccess<'de> for EnumDeserializer<'b> {
    type Error = DecodeError;

    fn unit_variant(self) -> Result<()> {
        match self.content {
            Value::Null => Ok(()),
            other => Err(DecodeError::located(format!(
                "'{}' expected a unit variant, got '{}'",
                self.name,
                Kind::of(other).name()
            ))),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(ValueDeserializer::new(self.content, self.name, self.ctx))
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        de::Deserializer::deserialize_seq(
            ValueDeserializer::new(self.content, self.name, self.ctx),
            visitor,
        )
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        de::Deserializer::deserialize_struct(
            ValueDeserializer::new(self.content, self.name, self.ctx),
            "",
            fields,
            visitor,
        )
    }
}

/// Map keys are always strings in JSON; numeric and bool key types parse them.
struct KeyDeserializer<'b> {
    key: &'b str,
    name: &'b str,
}

impl<'b> KeyDeserializer<'b> {
    fn parse_error(&self, target: &str) -> DecodeError {
        DecodeError::located(format!(
            "cannot parse '{}' key {:?} as {}",
            self.name, self.key, target
        ))
    }
}

macro_rules! deserialize_key_integer {
    ($($method:ident),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                let parsed = self
                    .key
                    .trim()
                    .parse::<i128>()
                    .map_err(|_| self.parse_error("int"))?;
                visit_integer(visitor, parsed, self.name)
            }
        )*
    };
}

impl<'de, 'b> de::Deserializer<'de> for KeyDeserializer<'b> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_str(self.key)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match parse_bool(self.key) {
            Some(b) => visitor.visit_bool(b),
            None => Err(self.parse_error("bool")),
        }
    }

    deserialize_key_integer!(
        deserialize_i8,
        deserialize_i16,
        deserialize_i32,
        deserialize_i64,
        deserialize_u8,
        deserialize_u16,
        deserialize_u32,
        deserialize_u64,
    );

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_f64(visitor)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let parsed = self.key.trim().parse::<f64>().map_err(|_| self.parse_error("float"))?;
        visitor.visit_f64(parsed)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_enum(self.key.into_deserializer())
    }

    forward_to_deserialize_any! {
        i128 u128 char str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}
