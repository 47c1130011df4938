//! Untyped manifest tree.
//!
//! Manifests are hand-authored and only loosely structured, so the tree keeps
//! just the shapes the extractor cares about. Everything that is not a mapping,
//! a sequence or a string collapses to [`ManifestNode::Other`] instead of failing
//! deserialization. The same visitor backs json, ron and toml input.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::{collections::BTreeMap, fmt};

/// Mapping key carrying a scoped base-directory override.
pub const BASE_PATH_KEY: &str = "basePath";

#[derive(Debug, Clone, PartialEq)]
pub enum ManifestNode {
    Mapping(BTreeMap<String, ManifestNode>),
    Sequence(Vec<ManifestNode>),
    StringLeaf(String),
    /// Numbers, booleans, null and anything else without paths in it.
    Other,
}

impl ManifestNode {
    /// `basePath` declared directly on this node, if it is a mapping and the value is a string.
    pub fn base_path(&self) -> Option<&str> {
        match self {
            ManifestNode::Mapping(map) => match map.get(BASE_PATH_KEY) {
                Some(ManifestNode::StringLeaf(s)) => Some(s.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ManifestNode::Mapping(_) => "mapping",
            ManifestNode::Sequence(_) => "sequence",
            ManifestNode::StringLeaf(_) => "string",
            ManifestNode::Other => "other",
        }
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = ManifestNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any manifest value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<ManifestNode, E> {
        Ok(ManifestNode::Other)
    }
    fn visit_i64<E: de::Error>(self, _: i64) -> Result<ManifestNode, E> {
        Ok(ManifestNode::Other)
    }
    fn visit_u64<E: de::Error>(self, _: u64) -> Result<ManifestNode, E> {
        Ok(ManifestNode::Other)
    }
    fn visit_f64<E: de::Error>(self, _: f64) -> Result<ManifestNode, E> {
        Ok(ManifestNode::Other)
    }
    fn visit_bytes<E: de::Error>(self, _: &[u8]) -> Result<ManifestNode, E> {
        Ok(ManifestNode::Other)
    }
    fn visit_unit<E: de::Error>(self) -> Result<ManifestNode, E> {
        Ok(ManifestNode::Other)
    }
    fn visit_none<E: de::Error>(self) -> Result<ManifestNode, E> {
        Ok(ManifestNode::Other)
    }
    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<ManifestNode, D::Error> {
        ManifestNode::deserialize(d)
    }
    fn visit_newtype_struct<D: Deserializer<'de>>(self, d: D) -> Result<ManifestNode, D::Error> {
        ManifestNode::deserialize(d)
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<ManifestNode, E> {
        Ok(ManifestNode::StringLeaf(v.to_string()))
    }
    fn visit_str<E: de::Error>(self, v: &str) -> Result<ManifestNode, E> {
        Ok(ManifestNode::StringLeaf(v.to_owned()))
    }
    fn visit_string<E: de::Error>(self, v: String) -> Result<ManifestNode, E> {
        Ok(ManifestNode::StringLeaf(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ManifestNode, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<ManifestNode>()? {
            items.push(item);
        }
        Ok(ManifestNode::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ManifestNode, A::Error> {
        let mut out = BTreeMap::new();
        while let Some((MapKey(k), v)) = map.next_entry::<MapKey, ManifestNode>()? {
            out.insert(k, v);
        }
        Ok(ManifestNode::Mapping(out))
    }
}

impl<'de> Deserialize<'de> for ManifestNode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(NodeVisitor)
    }
}

/// Map key; ron allows scalar keys, which are kept as their text form.
struct MapKey(String);

struct MapKeyVisitor;

impl<'de> Visitor<'de> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or scalar map key")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<MapKey, E> {
        Ok(MapKey(v.to_owned()))
    }
    fn visit_string<E: de::Error>(self, v: String) -> Result<MapKey, E> {
        Ok(MapKey(v))
    }
    fn visit_char<E: de::Error>(self, v: char) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<MapKey, E> {
        Ok(MapKey(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(MapKeyVisitor)
    }
}
