//! Deprecation walker.
//!
//! Traverses a record depth-first using its schema metadata and collects the
//! dotted paths of deprecated fields that hold a non-default value. Paths are
//! shaped by field names only: every element of a sequence of records is
//! walked under the same prefix, so repeated occurrences collapse into one
//! entry.

use crate::error::SchemaError;
use crate::inspect::{is_default, Value};
use crate::schema::Schema;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Maximum record nesting the walker will follow.
pub const MAX_DEPTH: usize = 32;

/// Deprecated paths found in a configuration value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprecationReport {
    paths: BTreeSet<String>,
    /// Fields whose shape is not recognized; reported as populated when deprecated
    unsupported: BTreeSet<String>,
}

impl DeprecationReport {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Deprecated paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Paths of fields with an unsupported shape, in sorted order.
    pub fn unsupported(&self) -> impl Iterator<Item = &str> {
        self.unsupported.iter().map(String::as_str)
    }
}

/// Collect every populated deprecated field reachable from `root`.
pub fn collect_deprecations(root: &dyn Schema) -> Result<DeprecationReport, SchemaError> {
    let mut report = DeprecationReport::default();
    walk(root, "", 0, &mut report)?;
    debug!(
        deprecated = report.paths.len(),
        unsupported = report.unsupported.len(),
        "Deprecation walk finished"
    );
    Ok(report)
}

fn walk(
    record: &dyn Schema,
    prefix: &str,
    depth: usize,
    report: &mut DeprecationReport,
) -> Result<(), SchemaError> {
    if depth > MAX_DEPTH {
        return Err(SchemaError::TooDeep {
            path: prefix.to_string(),
            limit: MAX_DEPTH,
        });
    }

    let fields = record.fields();
    let mut seen = HashSet::with_capacity(fields.len());

    for field in &fields {
        let def = field.def;
        if !def.is_exposed() {
            continue;
        }
        if def.name.contains('.') {
            return Err(SchemaError::InvalidName {
                prefix: prefix.to_string(),
                name: def.name,
            });
        }

        let path = compose(prefix, def.name);
        if !seen.insert(def.name) {
            return Err(SchemaError::DuplicateField { path });
        }
        if !def.kind.accepts(&field.value) {
            return Err(SchemaError::KindMismatch {
                path,
                declared: def.kind,
                found: field.value.shape(),
            });
        }

        if let Value::Opaque(shape) = &field.value {
            warn!(path = %path, shape = *shape, "Unsupported field shape, treating it as populated");
            report.unsupported.insert(path.clone());
        }

        if def.deprecated && !is_default(&field.value) {
            debug!(path = %path, "Deprecated field is set");
            report.paths.insert(path.clone());
        }

        match &field.value {
            Value::Record(inner) => walk(*inner, &path, depth + 1, report)?,
            Value::Optional(Some(inner)) => {
                if let Value::Record(inner) = inner.as_ref() {
                    walk(*inner, &path, depth + 1, report)?;
                }
            }
            Value::Sequence(items) => {
                for item in items {
                    if let Value::Record(inner) = item {
                        walk(*inner, &path, depth + 1, report)?;
                    }
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn compose(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::Inspect;
    use crate::schema::{Field, FieldDef, FieldKind};
    use std::collections::HashMap;

    #[derive(Debug, Clone, Default)]
    struct Leaf {
        b: String,
        c: u32,
    }

    #[derive(Debug, Clone, Default)]
    struct Root {
        name: String,
        a: Leaf,
        optional: Option<Leaf>,
        list: Vec<Leaf>,
        legacy: bool,
        labels: HashMap<String, String>,
        skipped: String,
    }

    crate::record_schema! {
        Leaf {
            b => "b" [deprecated],
            c => "c",
        }
        Root {
            name => "name",
            a => "a",
            optional => "optional",
            list => "list",
            legacy => "legacy" [deprecated],
            labels => "labels" [deprecated],
            skipped => "skipped" [deprecated, ignored],
        }
    }

    fn leaf(b: &str) -> Leaf {
        Leaf {
            b: b.to_string(),
            c: 0,
        }
    }

    fn paths(report: &DeprecationReport) -> Vec<&str> {
        report.paths().collect()
    }

    #[test]
    fn test_empty_value_yields_empty_report() {
        let report = collect_deprecations(&Root::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.unsupported().count(), 0);
    }

    #[test]
    fn test_path_composition() {
        let root = Root {
            a: leaf("x"),
            ..Default::default()
        };
        let report = collect_deprecations(&root).unwrap();
        assert_eq!(paths(&report), vec!["a.b"]);
    }

    #[test]
    fn test_optional_record_is_walked_when_present() {
        let root = Root {
            optional: Some(leaf("x")),
            ..Default::default()
        };
        let report = collect_deprecations(&root).unwrap();
        assert_eq!(paths(&report), vec!["optional.b"]);

        let present_but_empty = Root {
            optional: Some(Leaf::default()),
            ..Default::default()
        };
        assert!(collect_deprecations(&present_but_empty).unwrap().is_empty());
    }

    #[test]
    fn test_sequence_elements_collapse() {
        let root = Root {
            list: vec![leaf("one"), leaf(""), leaf("two")],
            ..Default::default()
        };
        let report = collect_deprecations(&root).unwrap();
        assert_eq!(report.len(), 1);
        assert!(report.contains("list.b"));
    }

    #[test]
    fn test_non_deprecated_fields_only() {
        let root = Root {
            name: "test".to_string(),
            a: Leaf {
                b: String::new(),
                c: 7,
            },
            list: vec![Leaf {
                b: String::new(),
                c: 1,
            }],
            ..Default::default()
        };
        assert!(collect_deprecations(&root).unwrap().is_empty());
    }

    #[test]
    fn test_ignored_fields_are_skipped() {
        let root = Root {
            skipped: "set".to_string(),
            ..Default::default()
        };
        assert!(collect_deprecations(&root).unwrap().is_empty());
    }

    #[test]
    fn test_deprecated_mapping_and_bool() {
        let root = Root {
            legacy: true,
            labels: HashMap::from([("k".to_string(), "v".to_string())]),
            ..Default::default()
        };
        let report = collect_deprecations(&root).unwrap();
        assert_eq!(paths(&report), vec!["labels", "legacy"]);
    }

    #[test]
    fn test_empty_collection_counts_as_absent() {
        let root = Root {
            labels: HashMap::new(),
            list: Vec::new(),
            ..Default::default()
        };
        assert!(collect_deprecations(&root).unwrap().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let root = Root {
            a: leaf("x"),
            list: vec![leaf("y")],
            legacy: true,
            ..Default::default()
        };
        let first = collect_deprecations(&root).unwrap();
        let second = collect_deprecations(&root).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_monotonic_under_population() {
        let before = Root {
            a: leaf("x"),
            ..Default::default()
        };
        let mut after = before.clone();
        after.legacy = true;

        let before = collect_deprecations(&before).unwrap();
        let after = collect_deprecations(&after).unwrap();

        assert!(before.paths().all(|p| after.contains(p)));
        assert_eq!(after.len(), before.len() + 1);
        assert!(after.contains("legacy") && !before.contains("legacy"));
    }

    // A deprecated container is reported and still walked.
    #[derive(Default)]
    struct Legacy {
        old: Leaf,
    }

    crate::record_schema! {
        Legacy {
            old => "old" [deprecated],
        }
    }

    #[test]
    fn test_deprecated_record_is_still_walked() {
        let legacy = Legacy { old: leaf("x") };
        let report = collect_deprecations(&legacy).unwrap();
        assert_eq!(paths(&report), vec!["old", "old.b"]);
    }

    #[derive(Default)]
    struct Nothing {}

    crate::record_schema! {
        Nothing {}
    }

    #[test]
    fn test_record_without_fields() {
        assert!(collect_deprecations(&Nothing {}).unwrap().is_empty());
    }

    #[derive(Default)]
    struct Chain {
        flag: bool,
        next: Option<Box<Chain>>,
    }

    crate::record_schema! {
        Chain {
            flag => "flag" [deprecated],
            next => "next",
        }
    }

    fn chain(len: usize) -> Chain {
        let mut head = Chain {
            flag: true,
            next: None,
        };
        for _ in 0..len {
            head = Chain {
                flag: false,
                next: Some(Box::new(head)),
            };
        }
        head
    }

    #[test]
    fn test_nested_chain_within_limit() {
        let report = collect_deprecations(&chain(2)).unwrap();
        assert_eq!(paths(&report), vec!["next.next.flag"]);
    }

    #[test]
    fn test_depth_ceiling() {
        let err = collect_deprecations(&chain(MAX_DEPTH + 1)).unwrap_err();
        assert!(matches!(err, SchemaError::TooDeep { limit, .. } if limit == MAX_DEPTH));
    }

    struct Miscalibrated {
        name: String,
    }

    impl Schema for Miscalibrated {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field {
                def: FieldDef::new("name", FieldKind::Record),
                value: self.name.inspect(),
            }]
        }
    }

    #[test]
    fn test_kind_mismatch_is_fatal() {
        let err = collect_deprecations(&Miscalibrated {
            name: String::new(),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::KindMismatch {
                declared: FieldKind::Record,
                found: "text",
                ..
            }
        ));
    }

    struct Duplicated {
        a: String,
        b: String,
    }

    impl Schema for Duplicated {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field {
                    def: FieldDef::new("same", FieldKind::Scalar),
                    value: self.a.inspect(),
                },
                Field {
                    def: FieldDef::new("same", FieldKind::Scalar),
                    value: self.b.inspect(),
                },
            ]
        }
    }

    #[test]
    fn test_duplicate_names_are_fatal() {
        let err = collect_deprecations(&Duplicated {
            a: String::new(),
            b: String::new(),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "field `same` is declared more than once");
    }

    struct Dotted {
        a: String,
    }

    impl Schema for Dotted {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field {
                def: FieldDef::new("a.b", FieldKind::Scalar),
                value: self.a.inspect(),
            }]
        }
    }

    #[test]
    fn test_dotted_names_are_fatal() {
        let err = collect_deprecations(&Dotted { a: String::new() }).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName { name: "a.b", .. }));
    }

    #[derive(Default)]
    struct FreeForm {
        extra: serde_yaml::Value,
        custom: serde_yaml::Value,
    }

    crate::record_schema! {
        FreeForm {
            extra => "extra" [deprecated],
            custom => "custom",
        }
    }

    #[test]
    fn test_unsupported_shapes_are_flagged_and_walk_continues() {
        let value = FreeForm {
            extra: serde_yaml::from_str("!widget x").unwrap(),
            custom: serde_yaml::from_str("!widget y").unwrap(),
        };
        let report = collect_deprecations(&value).unwrap();

        assert_eq!(paths(&report), vec!["extra"]);
        assert_eq!(report.unsupported().collect::<Vec<_>>(), vec!["custom", "extra"]);
    }

    #[test]
    fn test_free_form_null_is_default() {
        let report = collect_deprecations(&FreeForm::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.unsupported().count(), 0);
    }
}
