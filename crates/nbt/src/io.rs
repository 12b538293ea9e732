//! Big-endian stream reader and writer for the tagged-tree format.

use std::io::{Read, Write};

use crate::{tag_id, Compound, NbtError, Tag};

/// Maximum nesting depth accepted by the reader. Files in the wild stay in
/// single digits; the limit exists so a crafted file cannot blow the stack.
const MAX_DEPTH: usize = 512;

/// Read one named root compound from a stream.
pub fn from_reader<R: Read>(reader: &mut R) -> Result<(String, Compound), NbtError> {
    let root_id = read_u8(reader)?;
    if root_id != tag_id::COMPOUND {
        return Err(NbtError::InvalidRootTag(root_id));
    }

    let name = read_string(reader)?;
    let root = read_compound(reader, MAX_DEPTH)?;
    Ok((name, root))
}

/// Write one named root compound to a stream.
pub fn to_writer<W: Write>(writer: &mut W, name: &str, root: &Compound) -> Result<(), NbtError> {
    write_u8(writer, tag_id::COMPOUND)?;
    write_string(writer, name)?;
    write_compound(writer, root)
}

fn read_payload<R: Read>(reader: &mut R, id: u8, depth: usize) -> Result<Tag, NbtError> {
    if depth == 0 {
        return Err(NbtError::DepthLimitExceeded);
    }

    match id {
        tag_id::BYTE => Ok(Tag::Byte(read_u8(reader)? as i8)),
        tag_id::SHORT => Ok(Tag::Short(i16::from_be_bytes(read_array(reader)?))),
        tag_id::INT => Ok(Tag::Int(i32::from_be_bytes(read_array(reader)?))),
        tag_id::LONG => Ok(Tag::Long(i64::from_be_bytes(read_array(reader)?))),
        tag_id::FLOAT => Ok(Tag::Float(f32::from_be_bytes(read_array(reader)?))),
        tag_id::DOUBLE => Ok(Tag::Double(f64::from_be_bytes(read_array(reader)?))),
        tag_id::BYTE_ARRAY => {
            let len = read_len(reader)?;
            let mut buf = vec![0u8; len];
            fill(reader, &mut buf)?;
            Ok(Tag::ByteArray(buf.into_iter().map(|b| b as i8).collect()))
        }
        tag_id::STRING => Ok(Tag::String(read_string(reader)?)),
        tag_id::LIST => {
            let elem_id = read_u8(reader)?;
            let len = read_len(reader)?;
            let mut items = Vec::with_capacity(len.min(4096));
            for _ in 0..len {
                items.push(read_payload(reader, elem_id, depth - 1)?);
            }
            Ok(Tag::List(elem_id, items))
        }
        tag_id::COMPOUND => Ok(Tag::Compound(read_compound(reader, depth - 1)?)),
        tag_id::INT_ARRAY => {
            let len = read_len(reader)?;
            let mut values = Vec::with_capacity(len.min(4096));
            for _ in 0..len {
                values.push(i32::from_be_bytes(read_array(reader)?));
            }
            Ok(Tag::IntArray(values))
        }
        tag_id::LONG_ARRAY => {
            let len = read_len(reader)?;
            let mut values = Vec::with_capacity(len.min(4096));
            for _ in 0..len {
                values.push(i64::from_be_bytes(read_array(reader)?));
            }
            Ok(Tag::LongArray(values))
        }
        other => Err(NbtError::UnknownTagId(other)),
    }
}

fn read_compound<R: Read>(reader: &mut R, depth: usize) -> Result<Compound, NbtError> {
    if depth == 0 {
        return Err(NbtError::DepthLimitExceeded);
    }

    let mut compound = Compound::new();
    loop {
        let id = read_u8(reader)?;
        if id == tag_id::END {
            return Ok(compound);
        }
        let name = read_string(reader)?;
        let value = read_payload(reader, id, depth)?;
        compound.insert(name, value);
    }
}

fn write_payload<W: Write>(writer: &mut W, tag: &Tag) -> Result<(), NbtError> {
    match tag {
        Tag::Byte(v) => write_u8(writer, *v as u8),
        Tag::Short(v) => Ok(writer.write_all(&v.to_be_bytes())?),
        Tag::Int(v) => Ok(writer.write_all(&v.to_be_bytes())?),
        Tag::Long(v) => Ok(writer.write_all(&v.to_be_bytes())?),
        Tag::Float(v) => Ok(writer.write_all(&v.to_be_bytes())?),
        Tag::Double(v) => Ok(writer.write_all(&v.to_be_bytes())?),
        Tag::ByteArray(values) => {
            write_len(writer, values.len())?;
            let bytes: Vec<u8> = values.iter().map(|&b| b as u8).collect();
            Ok(writer.write_all(&bytes)?)
        }
        Tag::String(s) => write_string(writer, s),
        Tag::List(elem_id, items) => {
            write_u8(writer, *elem_id)?;
            write_len(writer, items.len())?;
            for item in items {
                write_payload(writer, item)?;
            }
            Ok(())
        }
        Tag::Compound(compound) => write_compound(writer, compound),
        Tag::IntArray(values) => {
            write_len(writer, values.len())?;
            for v in values {
                writer.write_all(&v.to_be_bytes())?;
            }
            Ok(())
        }
        Tag::LongArray(values) => {
            write_len(writer, values.len())?;
            for v in values {
                writer.write_all(&v.to_be_bytes())?;
            }
            Ok(())
        }
    }
}

fn write_compound<W: Write>(writer: &mut W, compound: &Compound) -> Result<(), NbtError> {
    for (name, value) in compound.iter() {
        write_u8(writer, value.id())?;
        write_string(writer, name)?;
        write_payload(writer, value)?;
    }
    write_u8(writer, tag_id::END)
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, NbtError> {
    let len = u16::from_be_bytes(read_array(reader)?) as usize;
    let mut buf = vec![0u8; len];
    fill(reader, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_string<W: Write>(writer: &mut W, s: &str) -> Result<(), NbtError> {
    let bytes = s.as_bytes();
    if bytes.len() > u16::MAX as usize {
        return Err(NbtError::StringTooLong(bytes.len()));
    }
    writer.write_all(&(bytes.len() as u16).to_be_bytes())?;
    writer.write_all(bytes)?;
    Ok(())
}

/// Signed 32-bit length prefix; negative lengths are rejected.
fn read_len<R: Read>(reader: &mut R) -> Result<usize, NbtError> {
    let len = i32::from_be_bytes(read_array(reader)?);
    if len < 0 {
        return Err(NbtError::NegativeLength(len));
    }
    Ok(len as usize)
}

fn write_len<W: Write>(writer: &mut W, len: usize) -> Result<(), NbtError> {
    writer.write_all(&(len as i32).to_be_bytes())?;
    Ok(())
}

fn read_u8<R: Read>(reader: &mut R) -> Result<u8, NbtError> {
    let buf: [u8; 1] = read_array(reader)?;
    Ok(buf[0])
}

fn write_u8<W: Write>(writer: &mut W, byte: u8) -> Result<(), NbtError> {
    writer.write_all(&[byte])?;
    Ok(())
}

fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N], NbtError> {
    let mut buf = [0u8; N];
    fill(reader, &mut buf)?;
    Ok(buf)
}

fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), NbtError> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            NbtError::UnexpectedEof
        } else {
            NbtError::Io(e)
        }
    })
}
