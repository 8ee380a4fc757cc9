//! Class file parsing.
//!
//! Reads any well-formed class file's structure, resolving names through the
//! constant pool. Attribute bodies are decoded for Code, ConstantValue,
//! Exceptions and InnerClasses; other attributes are kept by name only.

use classstub_core::AccessFlags;

use crate::constants::{MAGIC, attr, tag};
use crate::error::ReadError;
use crate::utf8;

/// A constant pool entry as read from a file.
#[derive(Clone, Debug, PartialEq)]
pub enum PoolEntry {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    Class(u16),
    String(u16),
    Fieldref(u16, u16),
    Methodref(u16, u16),
    InterfaceMethodref(u16, u16),
    NameAndType(u16, u16),
    MethodHandle(u8, u16),
    MethodType(u16),
    Dynamic(u16, u16),
    InvokeDynamic(u16, u16),
    Module(u16),
    Package(u16),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCode {
    pub max_stack: u16,
    pub max_locals: u16,
    pub bytes: Vec<u8>,
}

/// A field or method.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedMember {
    pub access: AccessFlags,
    pub name: String,
    pub descriptor: String,
    /// Pool index of the ConstantValue, if present.
    pub constant: Option<u16>,
    pub code: Option<ParsedCode>,
    /// Binary names from the Exceptions attribute.
    pub exceptions: Vec<String>,
    /// Names of attributes that were not decoded.
    pub other_attributes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedInnerClass {
    pub inner: String,
    pub outer: Option<String>,
    pub inner_name: Option<String>,
    pub access: AccessFlags,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedClass {
    pub minor: u16,
    pub major: u16,
    /// Indexed by pool index; slot 0 and the upper half of wide entries are `None`.
    pub pool: Vec<Option<PoolEntry>>,
    pub access: AccessFlags,
    pub this_class: String,
    /// `None` only for `java/lang/Object`.
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<ParsedMember>,
    pub methods: Vec<ParsedMember>,
    pub inner_classes: Vec<ParsedInnerClass>,
    pub other_attributes: Vec<String>,
}

impl ParsedClass {
    pub fn entry(&self, index: u16) -> Option<&PoolEntry> {
        self.pool.get(index as usize)?.as_ref()
    }

    pub fn utf8(&self, index: u16) -> Result<&str, ReadError> {
        utf8_at(&self.pool, index)
    }

    /// Binary name behind a `CONSTANT_Class` index.
    pub fn class_name(&self, index: u16) -> Result<&str, ReadError> {
        class_at(&self.pool, index)
    }

    /// Number of Utf8 entries equal to `value`.
    pub fn count_utf8(&self, value: &str) -> usize {
        self.pool
            .iter()
            .flatten()
            .filter(|e| matches!(e, PoolEntry::Utf8(s) if s == value))
            .count()
    }

    pub fn field(&self, name: &str) -> Option<&ParsedMember> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&ParsedMember> {
        self.methods.iter().find(|m| m.name == name)
    }
}

pub fn parse(bytes: &[u8]) -> Result<ParsedClass, ReadError> {
    let mut r = Cursor::new(bytes);

    let magic = r.u32()?;
    if magic != MAGIC {
        return Err(ReadError::InvalidMagic(magic));
    }
    let minor = r.u16()?;
    let major = r.u16()?;

    let pool = read_pool(&mut r)?;

    let access = AccessFlags::from_bits(r.u16()?);
    let this_class = class_at(&pool, r.u16()?)?.to_owned();
    let super_index = r.u16()?;
    let super_class = match super_index {
        0 => None,
        index => Some(class_at(&pool, index)?.to_owned()),
    };

    let interface_count = r.u16()?;
    let mut interfaces = Vec::with_capacity(interface_count as usize);
    for _ in 0..interface_count {
        interfaces.push(class_at(&pool, r.u16()?)?.to_owned());
    }

    let fields = read_members(&mut r, &pool)?;
    let methods = read_members(&mut r, &pool)?;

    let mut inner_classes = Vec::new();
    let mut other_attributes = Vec::new();
    let attr_count = r.u16()?;
    for _ in 0..attr_count {
        let (name, body) = read_attribute(&mut r, &pool)?;
        if name == attr::INNER_CLASSES {
            inner_classes = read_inner_classes(body, &pool)?;
        } else {
            other_attributes.push(name.to_owned());
        }
    }

    if r.remaining() > 0 {
        return Err(ReadError::TrailingBytes(r.remaining()));
    }

    Ok(ParsedClass {
        minor,
        major,
        pool,
        access,
        this_class,
        super_class,
        interfaces,
        fields,
        methods,
        inner_classes,
        other_attributes,
    })
}

fn read_pool(r: &mut Cursor<'_>) -> Result<Vec<Option<PoolEntry>>, ReadError> {
    let count = r.u16()? as usize;
    let mut pool = Vec::with_capacity(count);
    pool.push(None);

    while pool.len() < count {
        let index = pool.len() as u16;
        let tag_byte = r.u8()?;
        let entry = match tag_byte {
            tag::UTF8 => {
                let len = r.u16()? as usize;
                let raw = r.take(len)?;
                PoolEntry::Utf8(utf8::decode(raw).ok_or(ReadError::BadUtf8(index))?)
            }
            tag::INTEGER => PoolEntry::Integer(r.u32()? as i32),
            tag::FLOAT => PoolEntry::Float(f32::from_bits(r.u32()?)),
            tag::LONG => PoolEntry::Long(r.u64()? as i64),
            tag::DOUBLE => PoolEntry::Double(f64::from_bits(r.u64()?)),
            tag::CLASS => PoolEntry::Class(r.u16()?),
            tag::STRING => PoolEntry::String(r.u16()?),
            tag::FIELDREF => PoolEntry::Fieldref(r.u16()?, r.u16()?),
            tag::METHODREF => PoolEntry::Methodref(r.u16()?, r.u16()?),
            tag::INTERFACE_METHODREF => PoolEntry::InterfaceMethodref(r.u16()?, r.u16()?),
            tag::NAME_AND_TYPE => PoolEntry::NameAndType(r.u16()?, r.u16()?),
            tag::METHOD_HANDLE => PoolEntry::MethodHandle(r.u8()?, r.u16()?),
            tag::METHOD_TYPE => PoolEntry::MethodType(r.u16()?),
            tag::DYNAMIC => PoolEntry::Dynamic(r.u16()?, r.u16()?),
            tag::INVOKE_DYNAMIC => PoolEntry::InvokeDynamic(r.u16()?, r.u16()?),
            tag::MODULE => PoolEntry::Module(r.u16()?),
            tag::PACKAGE => PoolEntry::Package(r.u16()?),
            other => return Err(ReadError::UnknownTag { tag: other, index }),
        };

        let wide = matches!(entry, PoolEntry::Long(_) | PoolEntry::Double(_));
        pool.push(Some(entry));
        if wide {
            pool.push(None);
        }
    }
    Ok(pool)
}

fn read_members(
    r: &mut Cursor<'_>,
    pool: &[Option<PoolEntry>],
) -> Result<Vec<ParsedMember>, ReadError> {
    let count = r.u16()?;
    let mut members = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let access = AccessFlags::from_bits(r.u16()?);
        let name = utf8_at(pool, r.u16()?)?.to_owned();
        let descriptor = utf8_at(pool, r.u16()?)?.to_owned();

        let mut member = ParsedMember {
            access,
            name,
            descriptor,
            constant: None,
            code: None,
            exceptions: Vec::new(),
            other_attributes: Vec::new(),
        };

        let attr_count = r.u16()?;
        for _ in 0..attr_count {
            let (attr_name, body) = read_attribute(r, pool)?;
            match attr_name {
                attr::CODE => member.code = Some(read_code(body)?),
                attr::CONSTANT_VALUE => {
                    let mut b = Cursor::new(body);
                    member.constant = Some(b.u16()?);
                    b.finish(attr::CONSTANT_VALUE)?;
                }
                attr::EXCEPTIONS => member.exceptions = read_exceptions(body, pool)?,
                other => member.other_attributes.push(other.to_owned()),
            }
        }
        members.push(member);
    }
    Ok(members)
}

fn read_attribute<'a, 'p>(
    r: &mut Cursor<'a>,
    pool: &'p [Option<PoolEntry>],
) -> Result<(&'p str, &'a [u8]), ReadError> {
    let name = utf8_at(pool, r.u16()?)?;
    let len = r.u32()? as usize;
    Ok((name, r.take(len)?))
}

fn read_code(body: &[u8]) -> Result<ParsedCode, ReadError> {
    let mut b = Cursor::new(body);
    let max_stack = b.u16()?;
    let max_locals = b.u16()?;
    let len = b.u32()? as usize;
    let bytes = b.take(len)?.to_vec();

    // Exception table entries are 8 bytes each; nested attributes are skipped.
    let handlers = b.u16()? as usize;
    b.take(handlers * 8)?;
    let nested = b.u16()?;
    for _ in 0..nested {
        b.u16()?;
        let len = b.u32()? as usize;
        b.take(len)?;
    }
    b.finish(attr::CODE)?;

    Ok(ParsedCode {
        max_stack,
        max_locals,
        bytes,
    })
}

fn read_exceptions(body: &[u8], pool: &[Option<PoolEntry>]) -> Result<Vec<String>, ReadError> {
    let mut b = Cursor::new(body);
    let count = b.u16()?;
    let mut names = Vec::with_capacity(count as usize);
    for _ in 0..count {
        names.push(class_at(pool, b.u16()?)?.to_owned());
    }
    b.finish(attr::EXCEPTIONS)?;
    Ok(names)
}

fn read_inner_classes(
    body: &[u8],
    pool: &[Option<PoolEntry>],
) -> Result<Vec<ParsedInnerClass>, ReadError> {
    let mut b = Cursor::new(body);
    let count = b.u16()?;
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let inner = class_at(pool, b.u16()?)?.to_owned();
        let outer = match b.u16()? {
            0 => None,
            index => Some(class_at(pool, index)?.to_owned()),
        };
        let inner_name = match b.u16()? {
            0 => None,
            index => Some(utf8_at(pool, index)?.to_owned()),
        };
        let access = AccessFlags::from_bits(b.u16()?);
        records.push(ParsedInnerClass {
            inner,
            outer,
            inner_name,
            access,
        });
    }
    b.finish(attr::INNER_CLASSES)?;
    Ok(records)
}

fn utf8_at(pool: &[Option<PoolEntry>], index: u16) -> Result<&str, ReadError> {
    match pool.get(index as usize) {
        Some(Some(PoolEntry::Utf8(s))) => Ok(s),
        Some(Some(_)) => Err(ReadError::WrongEntry {
            index,
            expected: "Utf8",
        }),
        _ => Err(ReadError::BadIndex(index)),
    }
}

fn class_at(pool: &[Option<PoolEntry>], index: u16) -> Result<&str, ReadError> {
    match pool.get(index as usize) {
        Some(Some(PoolEntry::Class(name))) => utf8_at(pool, *name),
        Some(Some(_)) => Err(ReadError::WrongEntry {
            index,
            expected: "Class",
        }),
        _ => Err(ReadError::BadIndex(index)),
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(ReadError::UnexpectedEof(self.pos))?;
        let bytes = self.bytes;
        let slice = &bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, ReadError> {
        Ok(self.array::<1>()?[0])
    }

    fn u16(&mut self) -> Result<u16, ReadError> {
        self.array().map(u16::from_be_bytes)
    }

    fn u32(&mut self) -> Result<u32, ReadError> {
        self.array().map(u32::from_be_bytes)
    }

    fn u64(&mut self) -> Result<u64, ReadError> {
        self.array().map(u64::from_be_bytes)
    }

    /// An attribute body must be consumed exactly.
    fn finish(&self, attribute: &'static str) -> Result<(), ReadError> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(ReadError::BadAttribute(attribute))
        }
    }
}
