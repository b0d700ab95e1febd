//! Zero-value classification for configuration values.
//!
//! Every type that can appear in a configuration record exposes a borrowed
//! [`Value`] view of itself through [`Inspect`]. The classifier only ever
//! looks at that view, so generated and hand-written schemas classify the
//! same way.
//!
//! # Rules
//!
//! - Text is default when empty
//! - Sequences and mappings are default when they have no elements
//!   (an absent collection and an empty one are indistinguishable)
//! - Booleans are default when `false`, numbers when zero
//! - Optionals are default when absent; a present optional is populated
//!   regardless of its content
//! - Records are default when every declared field is default
//! - Unrecognized shapes are never default

use crate::schema::{FieldKind, Schema};
use std::collections::{BTreeMap, HashMap};

/// Borrowed view of a configuration value, as seen by the classifier and the walker.
pub enum Value<'a> {
    Text(&'a str),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Elements of a sequence, each inspected on its own.
    Sequence(Vec<Value<'a>>),
    /// A mapping; only its length matters.
    Mapping(usize),
    Optional(Option<Box<Value<'a>>>),
    Record(&'a dyn Schema),
    /// A shape the classifier does not know, carrying a description of it.
    Opaque(&'static str),
}

impl Value<'_> {
    /// Whether this is a plain scalar (text, boolean or number).
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Text(_) | Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_)
        )
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Short human-readable name of the shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Optional(_) => "optional",
            Value::Record(_) => "record",
            Value::Opaque(shape) => *shape,
        }
    }
}

/// Returns true when the value is indistinguishable from its unset default.
pub fn is_default(value: &Value<'_>) -> bool {
    match value {
        Value::Text(text) => text.is_empty(),
        Value::Bool(flag) => !flag,
        Value::Int(n) => *n == 0,
        Value::UInt(n) => *n == 0,
        Value::Float(n) => *n == 0.0,
        Value::Sequence(items) => items.is_empty(),
        Value::Mapping(len) => *len == 0,
        Value::Optional(inner) => inner.is_none(),
        Value::Record(record) => record
            .fields()
            .iter()
            .all(|field| is_default(&field.value)),
        // Unknown shapes surface rather than hide.
        Value::Opaque(_) => false,
    }
}

/// Types that can describe themselves to the classifier.
pub trait Inspect {
    /// The schema kind this type always produces.
    const KIND: FieldKind;

    fn inspect(&self) -> Value<'_>;
}

macro_rules! inspect_numbers {
    ($variant:ident as $repr:ty: $($t:ty),+) => {
        $(
            impl Inspect for $t {
                const KIND: FieldKind = FieldKind::Scalar;

                #[allow(clippy::cast_lossless, clippy::cast_possible_wrap)]
                fn inspect(&self) -> Value<'_> {
                    Value::$variant(*self as $repr)
                }
            }
        )+
    };
}

inspect_numbers!(Int as i64: i8, i16, i32, i64, isize);
inspect_numbers!(UInt as u64: u8, u16, u32, u64, usize);
inspect_numbers!(Float as f64: f32, f64);

impl Inspect for bool {
    const KIND: FieldKind = FieldKind::Scalar;

    fn inspect(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Inspect for String {
    const KIND: FieldKind = FieldKind::Scalar;

    fn inspect(&self) -> Value<'_> {
        Value::Text(self)
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    const KIND: FieldKind = match T::KIND {
        FieldKind::Record => FieldKind::RecordSequence,
        FieldKind::Dynamic => FieldKind::Dynamic,
        _ => FieldKind::ScalarSequence,
    };

    fn inspect(&self) -> Value<'_> {
        Value::Sequence(self.iter().map(Inspect::inspect).collect())
    }
}

impl<T: Inspect> Inspect for Option<T> {
    const KIND: FieldKind = match T::KIND {
        FieldKind::Record => FieldKind::OptionalRecord,
        FieldKind::Dynamic => FieldKind::Dynamic,
        _ => FieldKind::OptionalScalar,
    };

    fn inspect(&self) -> Value<'_> {
        Value::Optional(self.as_ref().map(|inner| Box::new(inner.inspect())))
    }
}

// A box is always present, so it classifies as its content.
impl<T: Inspect> Inspect for Box<T> {
    const KIND: FieldKind = T::KIND;

    fn inspect(&self) -> Value<'_> {
        (**self).inspect()
    }
}

impl<K, V, S> Inspect for HashMap<K, V, S> {
    const KIND: FieldKind = FieldKind::Mapping;

    fn inspect(&self) -> Value<'_> {
        Value::Mapping(self.len())
    }
}

impl<K, V> Inspect for BTreeMap<K, V> {
    const KIND: FieldKind = FieldKind::Mapping;

    fn inspect(&self) -> Value<'_> {
        Value::Mapping(self.len())
    }
}

/// Free-form YAML is classified by its runtime shape.
impl Inspect for serde_yaml::Value {
    const KIND: FieldKind = FieldKind::Dynamic;

    fn inspect(&self) -> Value<'_> {
        use serde_yaml::Value as Yaml;

        match self {
            Yaml::Null => Value::Optional(None),
            Yaml::Bool(flag) => Value::Bool(*flag),
            Yaml::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    n.as_f64()
                        .map_or(Value::Opaque("yaml number"), Value::Float)
                }
            }
            Yaml::String(text) => Value::Text(text),
            Yaml::Sequence(items) => Value::Sequence(items.iter().map(Inspect::inspect).collect()),
            Yaml::Mapping(map) => Value::Mapping(map.len()),
            Yaml::Tagged(_) => Value::Opaque("tagged yaml value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_of<T: Inspect>(value: T) -> bool {
        is_default(&value.inspect())
    }

    #[test]
    fn test_text() {
        assert!(default_of(String::new()));
        assert!(!default_of("test".to_string()));
    }

    #[test]
    fn test_bool() {
        assert!(default_of(false));
        assert!(!default_of(true));
    }

    #[test]
    fn test_signed_integers() {
        assert!(default_of(0i8));
        assert!(!default_of(5i8));
        assert!(default_of(0i16));
        assert!(!default_of(42i32));
        assert!(default_of(0i64));
        assert!(!default_of(-1i64));
        assert!(default_of(0isize));
    }

    #[test]
    fn test_unsigned_integers() {
        assert!(default_of(0u8));
        assert!(default_of(0u16));
        assert!(!default_of(42u32));
        assert!(default_of(0u64));
        assert!(!default_of(42usize));
    }

    #[test]
    fn test_floats() {
        assert!(default_of(0f32));
        assert!(!default_of(2.5f32));
        assert!(default_of(0f64));
        assert!(default_of(-0.0f64));
        assert!(!default_of(2.5f64));
        assert!(!default_of(f64::NAN));
    }

    #[test]
    fn test_sequences() {
        assert!(default_of(Vec::<String>::new()));
        assert!(!default_of(vec!["test".to_string()]));
        // A sequence holding only default elements is still populated.
        assert!(!default_of(vec![String::new()]));
    }

    #[test]
    fn test_mappings() {
        assert!(default_of(HashMap::<String, String>::new()));
        assert!(!default_of(HashMap::from([(
            "key".to_string(),
            "value".to_string()
        )])));
        assert!(default_of(BTreeMap::<String, u32>::new()));
        assert!(!default_of(BTreeMap::from([("key".to_string(), 0u32)])));
    }

    #[test]
    fn test_optionals_do_not_recurse() {
        assert!(default_of(None::<String>));
        assert!(!default_of(Some("test".to_string())));
        // Presence alone counts as populated.
        assert!(!default_of(Some(String::new())));
        assert!(!default_of(Some(false)));
    }

    #[test]
    fn test_box_is_transparent() {
        assert!(default_of(Box::new(0u32)));
        assert!(!default_of(Box::new("x".to_string())));
    }

    #[test]
    fn test_yaml_values() {
        let parse = |s: &str| -> serde_yaml::Value { serde_yaml::from_str(s).unwrap() };

        assert!(default_of(parse("~")));
        assert!(default_of(parse("''")));
        assert!(default_of(parse("0")));
        assert!(default_of(parse("0.0")));
        assert!(default_of(parse("false")));
        assert!(default_of(parse("[]")));
        assert!(default_of(parse("{}")));
        assert!(!default_of(parse("x")));
        assert!(!default_of(parse("18446744073709551615")));
        assert!(!default_of(parse("[1]")));
        assert!(!default_of(parse("{a: 1}")));
    }

    #[test]
    fn test_opaque_is_never_default() {
        assert!(!is_default(&Value::Opaque("widget")));

        let tagged: serde_yaml::Value = serde_yaml::from_str("!custom ''").unwrap();
        assert!(matches!(tagged.inspect(), Value::Opaque(_)));
        assert!(!default_of(tagged));
    }

    #[test]
    fn test_static_kinds() {
        assert_eq!(<String as Inspect>::KIND, FieldKind::Scalar);
        assert_eq!(<Vec<String> as Inspect>::KIND, FieldKind::ScalarSequence);
        assert_eq!(<Option<u8> as Inspect>::KIND, FieldKind::OptionalScalar);
        assert_eq!(<HashMap<String, u8> as Inspect>::KIND, FieldKind::Mapping);
        assert_eq!(<Box<bool> as Inspect>::KIND, FieldKind::Scalar);
        assert_eq!(<serde_yaml::Value as Inspect>::KIND, FieldKind::Dynamic);
        // Containers of free-form values stay free-form.
        assert_eq!(<Vec<serde_yaml::Value> as Inspect>::KIND, FieldKind::Dynamic);
        assert_eq!(<Option<serde_yaml::Value> as Inspect>::KIND, FieldKind::Dynamic);
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(Value::Text("x").shape(), "text");
        assert_eq!(Value::Mapping(0).shape(), "mapping");
        assert_eq!(Value::Opaque("widget").shape(), "widget");
        assert!(Value::UInt(1).is_scalar());
        assert!(!Value::Optional(None).is_scalar());
    }
}
