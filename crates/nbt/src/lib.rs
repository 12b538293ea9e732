//! Tagged-tree value model and binary codec.
//!
//! Implements the self-describing binary format used by hotbar preset
//! files: a tree of named, typed nodes (integers, strings, arrays, lists,
//! nested compounds) with big-endian encoding and optional gzip wrapping.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod io;

pub use io::{from_reader, to_writer};

/// Tag type identifiers as they appear on the wire.
pub mod tag_id {
    pub const END: u8 = 0;
    pub const BYTE: u8 = 1;
    pub const SHORT: u8 = 2;
    pub const INT: u8 = 3;
    pub const LONG: u8 = 4;
    pub const FLOAT: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const BYTE_ARRAY: u8 = 7;
    pub const STRING: u8 = 8;
    pub const LIST: u8 = 9;
    pub const COMPOUND: u8 = 10;
    pub const INT_ARRAY: u8 = 11;
    pub const LONG_ARRAY: u8 = 12;
}

/// Errors produced by the binary codec.
#[derive(Debug, Error)]
pub enum NbtError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("root tag must be a compound, got type id 0x{0:02X}")]
    InvalidRootTag(u8),
    #[error("unknown tag type id 0x{0:02X}")]
    UnknownTagId(u8),
    #[error("invalid UTF-8 in string: {0}")]
    InvalidString(#[from] std::string::FromUtf8Error),
    #[error("negative length {0}")]
    NegativeLength(i32),
    #[error("nesting depth limit exceeded")]
    DepthLimitExceeded,
    #[error("string of {0} bytes exceeds the 16-bit length prefix")]
    StringTooLong(usize),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One typed node in the tree.
///
/// Lists carry the type id of their elements so that empty lists survive
/// a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(u8, Vec<Tag>),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    /// Wire type id of this node.
    pub fn id(&self) -> u8 {
        match self {
            Tag::Byte(_) => tag_id::BYTE,
            Tag::Short(_) => tag_id::SHORT,
            Tag::Int(_) => tag_id::INT,
            Tag::Long(_) => tag_id::LONG,
            Tag::Float(_) => tag_id::FLOAT,
            Tag::Double(_) => tag_id::DOUBLE,
            Tag::ByteArray(_) => tag_id::BYTE_ARRAY,
            Tag::String(_) => tag_id::STRING,
            Tag::List(_, _) => tag_id::LIST,
            Tag::Compound(_) => tag_id::COMPOUND,
            Tag::IntArray(_) => tag_id::INT_ARRAY,
            Tag::LongArray(_) => tag_id::LONG_ARRAY,
        }
    }

    /// Build a list from elements, deriving the element type id from the
    /// first element (the conventional `END` id for an empty list).
    pub fn list_of(items: Vec<Tag>) -> Tag {
        let elem_id = items.first().map(Tag::id).unwrap_or(tag_id::END);
        Tag::List(elem_id, items)
    }

    /// View this node as a compound.
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// View this node as a list of elements.
    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Tag::List(_, items) => Some(items),
            _ => None,
        }
    }

    /// View this node as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    /// Widen any integer node to `i64`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Tag::Byte(v) => Some(*v as i64),
            Tag::Short(v) => Some(*v as i64),
            Tag::Int(v) => Some(*v as i64),
            Tag::Long(v) => Some(*v),
            _ => None,
        }
    }
}

/// An insertion-ordered map of named nodes.
///
/// Preserving entry order is what lets an edited file re-encode with every
/// untouched region unchanged, so this is a `Vec` of pairs rather than a
/// hash map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compound(Vec<(String, Tag)>);

impl Compound {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
        self.0.iter_mut().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Insert an entry, replacing any existing entry with the same name in
    /// place (its position in the order is kept).
    pub fn insert(&mut self, name: impl Into<String>, value: Tag) {
        let name = name.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }

    /// Remove an entry by name, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        let pos = self.0.iter().position(|(k, _)| k == name)?;
        Some(self.0.remove(pos).1)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Tag)> for Compound {
    fn from_iter<I: IntoIterator<Item = (String, Tag)>>(iter: I) -> Self {
        let mut c = Compound::new();
        for (k, v) in iter {
            c.insert(k, v);
        }
        c
    }
}

/// A decoded file: the named root compound plus whether the source bytes
/// were gzip-wrapped (so [`encode`] can reproduce the wrapping).
#[derive(Debug, Clone, PartialEq)]
pub struct NbtFile {
    pub name: String,
    pub root: Compound,
    pub compressed: bool,
}

/// Decode a file, inflating a gzip wrapper when the magic bytes announce one.
pub fn decode(bytes: &[u8]) -> Result<NbtFile, NbtError> {
    let compressed = bytes.len() >= 2 && bytes[0] == 0x1F && bytes[1] == 0x8B;

    let (name, root) = if compressed {
        use flate2::read::GzDecoder;
        from_reader(&mut GzDecoder::new(bytes))?
    } else {
        from_reader(&mut &bytes[..])?
    };

    Ok(NbtFile {
        name,
        root,
        compressed,
    })
}

/// Encode a file, re-applying the gzip wrapper when the source had one.
pub fn encode(file: &NbtFile) -> Result<Vec<u8>, NbtError> {
    if file.compressed {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        to_writer(&mut encoder, &file.name, &file.root)?;
        Ok(encoder.finish()?)
    } else {
        let mut buf = Vec::new();
        to_writer(&mut buf, &file.name, &file.root)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_preserves_insertion_order() {
        let mut c = Compound::new();
        c.insert("zebra", Tag::Int(1));
        c.insert("apple", Tag::Int(2));
        c.insert("mango", Tag::Int(3));

        let keys: Vec<_> = c.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn compound_insert_replaces_in_place() {
        let mut c = Compound::new();
        c.insert("a", Tag::Int(1));
        c.insert("b", Tag::Int(2));
        c.insert("a", Tag::Int(99));

        let keys: Vec<_> = c.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(c.get("a"), Some(&Tag::Int(99)));
    }

    #[test]
    fn list_of_derives_element_id() {
        assert_eq!(
            Tag::list_of(vec![Tag::Byte(1), Tag::Byte(2)]).id(),
            tag_id::LIST
        );
        match Tag::list_of(vec![Tag::Short(7)]) {
            Tag::List(id, items) => {
                assert_eq!(id, tag_id::SHORT);
                assert_eq!(items.len(), 1);
            }
            _ => unreachable!(),
        }
        match Tag::list_of(vec![]) {
            Tag::List(id, items) => {
                assert_eq!(id, tag_id::END);
                assert!(items.is_empty());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn as_int_widens() {
        assert_eq!(Tag::Byte(-3).as_int(), Some(-3));
        assert_eq!(Tag::Short(1000).as_int(), Some(1000));
        assert_eq!(Tag::Int(70_000).as_int(), Some(70_000));
        assert_eq!(Tag::Long(i64::MAX).as_int(), Some(i64::MAX));
        assert_eq!(Tag::String("5".into()).as_int(), None);
    }

    #[test]
    fn decode_encode_uncompressed_roundtrip() {
        let mut root = Compound::new();
        root.insert("answer", Tag::Int(42));
        root.insert("label", Tag::String("hello".into()));
        let file = NbtFile {
            name: String::new(),
            root,
            compressed: false,
        };

        let bytes = encode(&file).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, file);

        // Deterministic writer: encoding twice yields identical bytes.
        assert_eq!(bytes, encode(&decoded).unwrap());
    }

    #[test]
    fn decode_encode_gzip_roundtrip() {
        let mut root = Compound::new();
        root.insert("payload", Tag::LongArray(vec![1, 2, 3]));
        let file = NbtFile {
            name: "root".into(),
            root,
            compressed: true,
        };

        let bytes = encode(&file).unwrap();
        assert_eq!(&bytes[..2], &[0x1F, 0x8B]);

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, file);
        assert!(decoded.compressed);
    }

    #[test]
    fn decode_empty_input_fails() {
        assert!(decode(&[]).is_err());
    }
}
