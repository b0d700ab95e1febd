//! Static schema metadata for configuration records.
//!
//! Each record type describes its own fields through [`Schema`]: the exposed
//! (serialized) name, whether the field is deprecated or ignored, the kind of
//! value it holds, and an accessor producing the value view. Tables are
//! usually generated with [`record_schema!`](crate::record_schema).

use crate::inspect::{Inspect, Value};
use std::fmt;

/// Shape of a field, which decides how the walker treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    OptionalScalar,
    Record,
    OptionalRecord,
    ScalarSequence,
    RecordSequence,
    Mapping,
    /// Shape only known at runtime, e.g. free-form YAML. Unrecognized
    /// shapes can only appear under this kind.
    Dynamic,
}

impl FieldKind {
    /// Check whether a value view is consistent with this declared kind.
    pub fn accepts(self, value: &Value<'_>) -> bool {
        match (self, value) {
            (FieldKind::Dynamic, _) => true,
            (FieldKind::Scalar, v) => v.is_scalar(),
            (FieldKind::OptionalScalar, Value::Optional(inner)) => {
                inner.as_deref().map_or(true, |v| !v.is_record())
            }
            (FieldKind::Record, Value::Record(_)) => true,
            (FieldKind::OptionalRecord, Value::Optional(inner)) => {
                inner.as_deref().map_or(true, Value::is_record)
            }
            (FieldKind::ScalarSequence, Value::Sequence(items)) => {
                items.iter().all(|v| !v.is_record())
            }
            (FieldKind::RecordSequence, Value::Sequence(items)) => {
                items.iter().all(Value::is_record)
            }
            (FieldKind::Mapping, Value::Mapping(_)) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::OptionalScalar => "optional scalar",
            FieldKind::Record => "record",
            FieldKind::OptionalRecord => "optional record",
            FieldKind::ScalarSequence => "sequence of scalars",
            FieldKind::RecordSequence => "sequence of records",
            FieldKind::Mapping => "mapping",
            FieldKind::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a single declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Serialized name; empty means the field is not exposed
    pub name: &'static str,
    pub kind: FieldKind,
    pub deprecated: bool,
    /// Excluded from traversal, but still part of the record's default-ness
    pub ignored: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            deprecated: false,
            ignored: false,
        }
    }

    /// Mark the field as using a retired convention.
    pub const fn deprecated(self) -> Self {
        Self {
            deprecated: true,
            ..self
        }
    }

    /// Exclude the field from traversal.
    pub const fn ignored(self) -> Self {
        Self {
            ignored: true,
            ..self
        }
    }

    /// Whether the walker should visit this field at all.
    pub fn is_exposed(&self) -> bool {
        !self.ignored && !self.name.is_empty()
    }
}

/// A declared field paired with a view of its current value.
pub struct Field<'a> {
    pub def: FieldDef,
    pub value: Value<'a>,
}

/// A composite record that can enumerate its declared fields.
pub trait Schema {
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Static kind of the value behind a reference.
pub fn kind_of<T: Inspect + ?Sized>(_: &T) -> FieldKind {
    T::KIND
}

/// Implement [`Schema`] and [`Inspect`] for record types.
///
/// ```
/// use goreleaser_deprecation_check::record_schema;
///
/// #[derive(Default)]
/// struct Snapshot {
///     name_template: String,
///     version_template: String,
/// }
///
/// record_schema! {
///     Snapshot {
///         name_template => "name_template" [deprecated],
///         version_template => "version_template",
///     }
/// }
/// ```
///
/// Flags in brackets are applied to the field definition: `deprecated`,
/// `ignored`.
#[macro_export]
macro_rules! record_schema {
    ($(
        $ty:ident {
            $( $field:ident => $name:literal $( [ $( $flag:ident ),+ $(,)? ] )? ),* $(,)?
        }
    )+) => {
        $(
            impl $crate::schema::Schema for $ty {
                fn fields(&self) -> ::std::vec::Vec<$crate::schema::Field<'_>> {
                    ::std::vec![
                        $(
                            $crate::schema::Field {
                                def: $crate::schema::FieldDef::new(
                                    $name,
                                    $crate::schema::kind_of(&self.$field),
                                )
                                $( $( .$flag() )+ )?,
                                value: $crate::inspect::Inspect::inspect(&self.$field),
                            },
                        )*
                    ]
                }
            }

            impl $crate::inspect::Inspect for $ty {
                const KIND: $crate::schema::FieldKind = $crate::schema::FieldKind::Record;

                fn inspect(&self) -> $crate::inspect::Value<'_> {
                    $crate::inspect::Value::Record(self)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::is_default;

    #[derive(Default)]
    struct Inner {
        flag: bool,
    }

    #[derive(Default)]
    struct Outer {
        name: String,
        old_name: String,
        cache: String,
        inner: Inner,
        maybe: Option<Inner>,
        items: Vec<Inner>,
        tags: Vec<String>,
    }

    crate::record_schema! {
        Inner {
            flag => "flag",
        }
        Outer {
            name => "name",
            old_name => "old_name" [deprecated],
            cache => "cache" [ignored],
            inner => "inner",
            maybe => "maybe",
            items => "items",
            tags => "tags",
        }
    }

    #[test]
    fn test_generated_table() {
        let outer = Outer::default();
        let defs: Vec<FieldDef> = outer.fields().iter().map(|f| f.def).collect();

        assert_eq!(defs.len(), 7);
        assert_eq!(defs[0], FieldDef::new("name", FieldKind::Scalar));
        assert_eq!(
            defs[1],
            FieldDef::new("old_name", FieldKind::Scalar).deprecated()
        );
        assert!(defs[2].ignored);
        assert!(!defs[2].is_exposed());
        assert_eq!(defs[3].kind, FieldKind::Record);
        assert_eq!(defs[4].kind, FieldKind::OptionalRecord);
        assert_eq!(defs[5].kind, FieldKind::RecordSequence);
        assert_eq!(defs[6].kind, FieldKind::ScalarSequence);
    }

    #[test]
    fn test_generated_kinds_accept_values() {
        let outer = Outer {
            maybe: Some(Inner { flag: true }),
            items: vec![Inner::default()],
            tags: vec!["a".to_string()],
            ..Default::default()
        };

        for field in outer.fields() {
            assert!(field.def.kind.accepts(&field.value), "{}", field.def.name);
        }
    }

    #[test]
    fn test_record_default_includes_ignored_fields() {
        assert!(is_default(&Outer::default().inspect()));

        let cached = Outer {
            cache: "warm".to_string(),
            ..Default::default()
        };
        assert!(!is_default(&cached.inspect()));

        let nested = Outer {
            inner: Inner { flag: true },
            ..Default::default()
        };
        assert!(!is_default(&nested.inspect()));
    }

    #[test]
    fn test_kind_rejects_mismatched_shape() {
        assert!(!FieldKind::Record.accepts(&Value::Text("x")));
        assert!(!FieldKind::Scalar.accepts(&Value::Optional(None)));
        assert!(FieldKind::OptionalRecord.accepts(&Value::Optional(None)));
        assert!(!FieldKind::OptionalRecord
            .accepts(&Value::Optional(Some(Box::new(Value::Bool(true))))));
        assert!(!FieldKind::Mapping.accepts(&Value::Sequence(Vec::new())));
        assert!(FieldKind::Dynamic.accepts(&Value::Opaque("anything")));
        assert!(!FieldKind::Scalar.accepts(&Value::Opaque("anything")));
    }

    #[test]
    fn test_unexposed_names() {
        assert!(!FieldDef::new("", FieldKind::Scalar).is_exposed());
        assert!(FieldDef::new("x", FieldKind::Scalar).is_exposed());
        assert_eq!(FieldKind::RecordSequence.to_string(), "sequence of records");
    }
}
