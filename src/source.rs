//! Conversion of external data into the ordered pairs a list is built from.
//!
//! Anything implementing [`PairSource`] can seed an [`ArrayList`]. Plain values
//! become sequential lists, keyed sources keep their keys, and any
//! `serde::Serialize` type can be enumerated field by field through
//! [`ArrayList::from_serialize`].

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde::ser;

use crate::core::error::ListError;
use crate::core::mapping::ArrayList;
use crate::core::types::{Key, Value};

/// Something that can produce an ordered sequence of key-value pairs.
pub trait PairSource {
    fn into_pairs(self) -> Vec<(Key, Value)>;
}

/// Wraps an iterator of `(key, value)` pairs.
pub struct Keyed<I>(pub I);

/// Wraps an iterator of values; keys are assigned `0, 1, 2, ...`.
pub struct Values<I>(pub I);

fn enumerate<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Vec<(Key, Value)> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (Key::Int(i as i64), v.into()))
        .collect()
}

impl<V: Into<Value>> PairSource for Vec<V> {
    fn into_pairs(self) -> Vec<(Key, Value)> {
        enumerate(self)
    }
}

impl<V: Into<Value>, const N: usize> PairSource for [V; N] {
    fn into_pairs(self) -> Vec<(Key, Value)> {
        enumerate(self)
    }
}

impl<I, V> PairSource for Values<I>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    fn into_pairs(self) -> Vec<(Key, Value)> {
        enumerate(self.0)
    }
}

impl<I, K, V> PairSource for Keyed<I>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Key>,
    V: Into<Value>,
{
    fn into_pairs(self) -> Vec<(Key, Value)> {
        self.0.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
    }
}

impl<K: Into<Key>, V: Into<Value>> PairSource for IndexMap<K, V> {
    fn into_pairs(self) -> Vec<(Key, Value)> {
        self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
    }
}

impl PairSource for ArrayList {
    fn into_pairs(self) -> Vec<(Key, Value)> {
        self.into_iter().collect()
    }
}

impl PairSource for &ArrayList {
    fn into_pairs(self) -> Vec<(Key, Value)> {
        self.to_vec()
    }
}

impl ArrayList {
    /// Builds a list from any serializable value.
    ///
    /// Structs and maps are enumerated in their natural field order, sequences
    /// get sequential keys and a lone scalar becomes a one-element list.
    pub fn from_serialize<T>(value: &T) -> Result<ArrayList, ListError>
    where
        T: Serialize + ?Sized,
    {
        match to_value(value)? {
            Value::Array(list) => Ok(list),
            Value::Null => Ok(ArrayList::default()),
            scalar => Ok(ArrayList::from(vec![scalar])),
        }
    }
}

pub fn to_value<T>(value: &T) -> Result<Value, ListError>
where
    T: Serialize + ?Sized,
{
    value.serialize(ValueSerializer).map_err(|e| ListError::Interchange(e.0))
}

#[derive(Debug)]
pub struct SourceError(String);

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for SourceError {}

impl ser::Error for SourceError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        SourceError(msg.to_string())
    }
}

struct ValueSerializer;

fn tagged(variant: &'static str, inner: Value) -> Value {
    Value::Array(ArrayList::from_source(Keyed(vec![(variant, inner)])))
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = SourceError;
    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = VariantSeqSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = StructSerializer;
    type SerializeStructVariant = VariantStructSerializer;

    fn serialize_bool(self, v: bool) -> Result<Value, SourceError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, SourceError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, SourceError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, SourceError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, SourceError> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, SourceError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, SourceError> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, SourceError> {
        self.serialize_i64(i64::from(v))
    }

    //integers past i64 degrade to floats
    fn serialize_u64(self, v: u64) -> Result<Value, SourceError> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Int(i)),
            Err(_) => Ok(Value::Float(v as f64)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value, SourceError> {
        Ok(Value::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, SourceError> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, SourceError> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, SourceError> {
        Ok(Value::Str(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, SourceError> {
        let bytes = v.iter().map(|b| Value::Int(i64::from(*b))).collect();
        Ok(Value::Array(bytes))
    }

    fn serialize_none(self) -> Result<Value, SourceError> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, SourceError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, SourceError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, SourceError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, SourceError> {
        Ok(Value::Str(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value, SourceError>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, SourceError>
    where
        T: ?Sized + Serialize,
    {
        let inner = value.serialize(ValueSerializer)?;
        Ok(tagged(variant, inner))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqSerializer, SourceError> {
        Ok(SeqSerializer {
            elements: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqSerializer, SourceError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqSerializer, SourceError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantSeqSerializer, SourceError> {
        Ok(VariantSeqSerializer {
            variant,
            elements: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapSerializer, SourceError> {
        Ok(MapSerializer {
            entries: Vec::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<StructSerializer, SourceError> {
        Ok(StructSerializer {
            entries: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantStructSerializer, SourceError> {
        Ok(VariantStructSerializer {
            variant,
            fields: StructSerializer {
                entries: Vec::with_capacity(len),
            },
        })
    }
}

struct SeqSerializer {
    elements: Vec<Value>,
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = Value;
    type Error = SourceError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), SourceError>
    where
        T: ?Sized + Serialize,
    {
        self.elements.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SourceError> {
        Ok(Value::Array(ArrayList::from(self.elements)))
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = Value;
    type Error = SourceError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), SourceError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, SourceError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Value;
    type Error = SourceError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), SourceError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, SourceError> {
        ser::SerializeSeq::end(self)
    }
}

struct VariantSeqSerializer {
    variant: &'static str,
    elements: Vec<Value>,
}

impl ser::SerializeTupleVariant for VariantSeqSerializer {
    type Ok = Value;
    type Error = SourceError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), SourceError>
    where
        T: ?Sized + Serialize,
    {
        self.elements.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SourceError> {
        Ok(tagged(self.variant, Value::Array(ArrayList::from(self.elements))))
    }
}

struct MapSerializer {
    entries: Vec<(Key, Value)>,
    next_key: Option<Key>,
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = SourceError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), SourceError>
    where
        T: ?Sized + Serialize,
    {
        if self.next_key.is_some() {
            return Err(SourceError("map key serialized twice without a value".into()));
        }
        let raw = key.serialize(ValueSerializer)?;
        let key = match raw {
            Value::Int(i) => Key::Int(i),
            Value::Str(s) => Key::from(s),
            Value::Bool(b) => Key::Int(i64::from(b)),
            other => return Err(SourceError(format!("map key must be an int or string, got {other:?}"))),
        };
        self.next_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), SourceError>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| SourceError("map value serialized before its key".into()))?;
        self.entries.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, SourceError> {
        if self.next_key.is_some() {
            return Err(SourceError("map ended with a dangling key".into()));
        }
        Ok(Value::Array(ArrayList::from_source(Keyed(self.entries))))
    }
}

struct StructSerializer {
    entries: Vec<(Key, Value)>,
}

impl ser::SerializeStruct for StructSerializer {
    type Ok = Value;
    type Error = SourceError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), SourceError>
    where
        T: ?Sized + Serialize,
    {
        self.entries.push((Key::from(key), value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<Value, SourceError> {
        Ok(Value::Array(ArrayList::from_source(Keyed(self.entries))))
    }
}

struct VariantStructSerializer {
    variant: &'static str,
    fields: StructSerializer,
}

impl ser::SerializeStructVariant for VariantStructSerializer {
    type Ok = Value;
    type Error = SourceError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), SourceError>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(&mut self.fields, key, value)
    }

    fn end(self) -> Result<Value, SourceError> {
        let inner = ser::SerializeStruct::end(self.fields)?;
        Ok(tagged(self.variant, inner))
    }
}
