//! Entry shapes before and after validation.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::parse::parse_entry;
use crate::paths::{directory_of, find_source_root};

/// Reserved key choosing which side of a client/server pair is the default.
pub const CLIENT_SERVER_MARKER: &str = "__default__";

/// Marker value selecting the server side.
pub const NODE_MARKER: &str = "node";

pub const CLIENT: &str = "client";
pub const SERVER: &str = "server";

/// A parsed, not yet validated entry declaration.
///
/// A glob pattern can only appear as `Single`; validation expands it into
/// an `Array`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryShape {
    Single(String),
    Array(Vec<String>),
    Object(IndexMap<String, String>),
    ClientServer(ClientServerEntry),
}

impl EntryShape {
    /// Number of declared entries (a glob counts as one).
    pub fn len(&self) -> usize {
        match self {
            EntryShape::Single(_) => 1,
            EntryShape::Array(paths) => paths.len(),
            EntryShape::Object(map) => map.len(),
            EntryShape::ClientServer(entry) => entry.labels().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for EntryShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryShape::Single(path) => f.write_str(path),
            EntryShape::Array(paths) => f.write_str(&paths.join(", ")),
            EntryShape::Object(map) => write_labeled(f, map.iter()),
            EntryShape::ClientServer(entry) => write_labeled(f, entry.labels().iter()),
        }
    }
}

fn write_labeled<'a>(
    f: &mut fmt::Formatter<'_>,
    labels: impl Iterator<Item = (&'a String, &'a String)>,
) -> fmt::Result {
    let rendered: Vec<String> = labels
        .map(|(label, path)| format!("{label}: {path}"))
        .collect();
    write!(f, "{{ {} }}", rendered.join(", "))
}

impl Serialize for EntryShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EntryShape::Single(path) => serializer.serialize_str(path),
            EntryShape::Array(paths) => {
                let mut seq = serializer.serialize_seq(Some(paths.len()))?;
                for path in paths {
                    seq.serialize_element(path)?;
                }
                seq.end()
            }
            EntryShape::Object(map) => map.serialize(serializer),
            EntryShape::ClientServer(entry) => entry.serialize(serializer),
        }
    }
}

/// Deserialization is lenient: any JSON value goes through [`parse_entry`].
impl<'de> Deserialize<'de> for EntryShape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(parse_entry(&raw))
    }
}

/// Which side of a client/server pair owns the manifest's root export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Client,
    Server,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Client => CLIENT,
            Side::Server => SERVER,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Client => Side::Server,
            Side::Server => Side::Client,
        }
    }
}

/// Labeled entries containing both a `client` and a `server` path.
///
/// Labels keep their declaration order. The marker key is stored apart from
/// the labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientServerEntry {
    labels: IndexMap<String, String>,
    marker: Option<String>,
}

impl ClientServerEntry {
    /// Split the marker off `map`. Returns the map unchanged when it lacks
    /// either side.
    pub fn from_map(
        mut map: IndexMap<String, String>,
    ) -> Result<Self, IndexMap<String, String>> {
        if !(map.contains_key(CLIENT) && map.contains_key(SERVER)) {
            return Err(map);
        }
        let marker = map.shift_remove(CLIENT_SERVER_MARKER);
        Ok(Self {
            labels: map,
            marker,
        })
    }

    pub(crate) fn with_labels(&self, labels: IndexMap<String, String>) -> Self {
        Self {
            labels,
            marker: self.marker.clone(),
        }
    }

    /// All labeled paths, marker excluded.
    pub fn labels(&self) -> &IndexMap<String, String> {
        &self.labels
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn get(&self, side: Side) -> Option<&str> {
        self.labels.get(side.label()).map(String::as_str)
    }

    /// The default side: `Server` only when the marker says `node`.
    pub fn side(&self) -> Side {
        match self.marker.as_deref() {
            Some(NODE_MARKER) => Side::Server,
            _ => Side::Client,
        }
    }
}

impl Serialize for ClientServerEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.marker.is_some());
        let mut map = serializer.serialize_map(Some(self.labels.len() + extra))?;
        for (label, path) in &self.labels {
            map.serialize_entry(label, path)?;
        }
        if let Some(marker) = &self.marker {
            map.serialize_entry(CLIENT_SERVER_MARKER, marker)?;
        }
        map.end()
    }
}

/// Resolved kind of a validated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    Single,
    Array,
    Object,
    Client,
    Server,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Single => "Single",
            EntryKind::Array => "Array",
            EntryKind::Object => "Object",
            EntryKind::Client => "Client",
            EntryKind::Server => "Server",
        };
        f.write_str(name)
    }
}

/// One entry as seen by the alias deriver: a bare path or a labeled one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryRef {
    Path(String),
    Labeled { label: String, path: String },
}

impl EntryRef {
    pub fn labeled(label: impl Into<String>, path: impl Into<String>) -> Self {
        EntryRef::Labeled {
            label: label.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            EntryRef::Path(path) | EntryRef::Labeled { path, .. } => path,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            EntryRef::Path(_) => None,
            EntryRef::Labeled { label, .. } => Some(label),
        }
    }
}

/// A bare path serializes as a string, a labeled one as `{label: path}`.
impl Serialize for EntryRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EntryRef::Path(path) => serializer.serialize_str(path),
            EntryRef::Labeled { label, path } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(label, path)?;
                map.end()
            }
        }
    }
}

/// An entry whose paths all exist. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidEntry {
    Single(String),
    Array(Vec<String>),
    Object(IndexMap<String, String>),
    ClientServer(ClientServerEntry),
}

impl ValidEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            ValidEntry::Single(_) => EntryKind::Single,
            ValidEntry::Array(_) => EntryKind::Array,
            ValidEntry::Object(_) => EntryKind::Object,
            ValidEntry::ClientServer(entry) => match entry.side() {
                Side::Client => EntryKind::Client,
                Side::Server => EntryKind::Server,
            },
        }
    }

    /// Paths in declaration order.
    pub fn paths(&self) -> Vec<&str> {
        match self {
            ValidEntry::Single(path) => vec![path.as_str()],
            ValidEntry::Array(paths) => paths.iter().map(String::as_str).collect(),
            ValidEntry::Object(map) => map.values().map(String::as_str).collect(),
            ValidEntry::ClientServer(entry) => {
                entry.labels().values().map(String::as_str).collect()
            }
        }
    }

    /// Entries in declaration order, labeled where the shape carries labels.
    pub fn refs(&self) -> Vec<EntryRef> {
        match self {
            ValidEntry::Single(path) => vec![EntryRef::Path(path.clone())],
            ValidEntry::Array(paths) => paths.iter().cloned().map(EntryRef::Path).collect(),
            ValidEntry::Object(map) => labeled_refs(map),
            ValidEntry::ClientServer(entry) => labeled_refs(entry.labels()),
        }
    }

    /// Common source root of all paths.
    ///
    /// A single entry's root is its own directory.
    pub fn source_root(&self) -> String {
        match self {
            ValidEntry::Single(path) => directory_of(path),
            _ => find_source_root(self.paths()),
        }
    }

    /// Whether this entry is a list or labeled map that a barrel can merge.
    pub fn is_mergeable(&self) -> bool {
        matches!(self, ValidEntry::Array(_) | ValidEntry::Object(_))
    }

    pub fn into_shape(self) -> EntryShape {
        match self {
            ValidEntry::Single(path) => EntryShape::Single(path),
            ValidEntry::Array(paths) => EntryShape::Array(paths),
            ValidEntry::Object(map) => EntryShape::Object(map),
            ValidEntry::ClientServer(entry) => EntryShape::ClientServer(entry),
        }
    }
}

fn labeled_refs(map: &IndexMap<String, String>) -> Vec<EntryRef> {
    map.iter()
        .map(|(label, path)| EntryRef::labeled(label.clone(), path.clone()))
        .collect()
}
