use serde::Serialize;

use crate::check::is_default_entry;
use crate::parts::INDEX;
use crate::shape::{EntryRef, ValidEntry};

/// One default entry plus the remaining entries, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultAndExport {
    pub default: EntryRef,
    pub exports: Vec<EntryRef>,
}

impl DefaultAndExport {
    /// Every entry, default first.
    pub fn iter(&self) -> impl Iterator<Item = &EntryRef> {
        std::iter::once(&self.default).chain(&self.exports)
    }
}

/// Split a validated entry into the package's default export and the rest.
///
/// For lists and maps the first entry labeled `index`, or whose path is a
/// conventional main entry, becomes the default. Without one the first
/// entry is promoted.
pub fn default_and_exports(entry: &ValidEntry) -> DefaultAndExport {
    match entry {
        ValidEntry::ClientServer(pair) => {
            let side = pair.side().label();
            let mut default = None;
            let mut exports = Vec::new();
            for (label, path) in pair.labels() {
                let item = EntryRef::labeled(label.clone(), path.clone());
                if default.is_none() && label == side {
                    default = Some(item);
                } else {
                    exports.push(item);
                }
            }
            // Both sides survive validation, so the default side is present.
            match default {
                Some(default) => DefaultAndExport { default, exports },
                None => promote_first(exports),
            }
        }
        _ => {
            let mut refs = entry.refs();
            match refs.iter().position(is_default) {
                Some(index) => {
                    let default = refs.remove(index);
                    DefaultAndExport {
                        default,
                        exports: refs,
                    }
                }
                None => promote_first(refs),
            }
        }
    }
}

fn is_default(item: &EntryRef) -> bool {
    item.label() == Some(INDEX) || is_default_entry(item.path())
}

fn promote_first(mut refs: Vec<EntryRef>) -> DefaultAndExport {
    let default = if refs.is_empty() {
        EntryRef::Path(String::new())
    } else {
        refs.remove(0)
    };
    DefaultAndExport {
        default,
        exports: refs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ClientServerEntry;
    use indexmap::IndexMap;

    fn labels(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn single_has_no_exports() {
        let split = default_and_exports(&ValidEntry::Single("src/index.ts".into()));
        assert_eq!(split.default, EntryRef::Path("src/index.ts".into()));
        assert!(split.exports.is_empty());
    }

    #[test]
    fn array_prefers_conventional_entry() {
        let entry = ValidEntry::Array(vec![
            "src/cli.ts".into(),
            "./src/index.ts".into(),
            "src/utils.ts".into(),
        ]);
        let split = default_and_exports(&entry);
        assert_eq!(split.default.path(), "./src/index.ts");
        assert_eq!(
            split.exports,
            vec![
                EntryRef::Path("src/cli.ts".into()),
                EntryRef::Path("src/utils.ts".into())
            ]
        );
    }

    #[test]
    fn array_promotes_first_without_conventional_entry() {
        let entry = ValidEntry::Array(vec!["src/a.ts".into(), "src/b.ts".into()]);
        let split = default_and_exports(&entry);
        assert_eq!(split.default.path(), "src/a.ts");
        assert_eq!(split.exports.len(), 1);
    }

    #[test]
    fn object_index_label_wins_first_encountered() {
        let entry = ValidEntry::Object(labels(&[
            ("cli", "src/cli.ts"),
            ("index", "src/app.ts"),
            ("main", "src/index.ts"),
        ]));
        let split = default_and_exports(&entry);
        assert_eq!(split.default, EntryRef::labeled("index", "src/app.ts"));
        assert_eq!(split.exports.len(), 2);
        assert_eq!(split.iter().count(), 3);
    }

    #[test]
    fn client_server_default_follows_side() {
        let pair = ClientServerEntry::from_map(labels(&[
            ("client", "src/client.ts"),
            ("shared", "src/shared.ts"),
            ("server", "src/server.ts"),
            ("__default__", "node"),
        ]))
        .unwrap();
        let split = default_and_exports(&ValidEntry::ClientServer(pair));
        assert_eq!(split.default, EntryRef::labeled("server", "src/server.ts"));
        assert_eq!(
            split.exports,
            vec![
                EntryRef::labeled("client", "src/client.ts"),
                EntryRef::labeled("shared", "src/shared.ts")
            ]
        );
    }
}
