//! Constant pool builder.
//!
//! Every entry is interned: adding a constant that is already present returns
//! the existing index. Index 0 is reserved by the format, and `Long`/`Double`
//! entries occupy two slots.

use std::collections::HashMap;

use crate::constants::{MAX_POOL_SLOTS, tag};
use crate::error::PoolError;
use crate::utf8;

/// A constant pool entry. Float payloads are stored as raw bits so entries
/// can be hashed and compared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Utf8(String),
    Integer(i32),
    Float(u32),
    Long(i64),
    Double(u64),
    Class(u16),
    String(u16),
    NameAndType(u16, u16),
    Methodref(u16, u16),
}

impl Constant {
    /// Number of pool slots the entry occupies.
    pub fn width(&self) -> usize {
        match self {
            Constant::Long(_) | Constant::Double(_) => 2,
            _ => 1,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        match self {
            Constant::Utf8(s) => {
                let bytes = utf8::encode(s);
                out.push(tag::UTF8);
                out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
                out.extend_from_slice(&bytes);
            }
            Constant::Integer(v) => {
                out.push(tag::INTEGER);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Constant::Float(bits) => {
                out.push(tag::FLOAT);
                out.extend_from_slice(&bits.to_be_bytes());
            }
            Constant::Long(v) => {
                out.push(tag::LONG);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Constant::Double(bits) => {
                out.push(tag::DOUBLE);
                out.extend_from_slice(&bits.to_be_bytes());
            }
            Constant::Class(name) => {
                out.push(tag::CLASS);
                out.extend_from_slice(&name.to_be_bytes());
            }
            Constant::String(value) => {
                out.push(tag::STRING);
                out.extend_from_slice(&value.to_be_bytes());
            }
            Constant::NameAndType(name, descriptor) => {
                out.push(tag::NAME_AND_TYPE);
                out.extend_from_slice(&name.to_be_bytes());
                out.extend_from_slice(&descriptor.to_be_bytes());
            }
            Constant::Methodref(class, name_and_type) => {
                out.push(tag::METHODREF);
                out.extend_from_slice(&class.to_be_bytes());
                out.extend_from_slice(&name_and_type.to_be_bytes());
            }
        }
    }
}

/// Deduplicating constant pool for one class file.
#[derive(Debug)]
pub struct ConstantPool {
    /// Entries in index order, paired with their pool index.
    entries: Vec<(u16, Constant)>,
    lookup: HashMap<Constant, u16>,
    /// Next free slot; starts at 1.
    next: usize,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
            next: 1,
        }
    }

    /// Intern a constant, returning its pool index.
    pub fn add(&mut self, constant: Constant) -> Result<u16, PoolError> {
        if let Some(&index) = self.lookup.get(&constant) {
            return Ok(index);
        }

        let end = self.next + constant.width();
        if end > MAX_POOL_SLOTS {
            return Err(PoolError::Overflow(end - 1));
        }

        let index = self.next as u16;
        self.next = end;
        self.lookup.insert(constant.clone(), index);
        self.entries.push((index, constant));
        Ok(index)
    }

    pub fn utf8(&mut self, value: &str) -> Result<u16, PoolError> {
        let encoded_len = utf8::encode(value).len();
        if encoded_len > u16::MAX as usize {
            return Err(PoolError::Utf8TooLong(encoded_len));
        }
        self.add(Constant::Utf8(value.to_owned()))
    }

    /// `CONSTANT_Class` for a binary name such as `java/lang/Object`.
    pub fn class(&mut self, binary_name: &str) -> Result<u16, PoolError> {
        let name = self.utf8(binary_name)?;
        self.add(Constant::Class(name))
    }

    /// `CONSTANT_String` for a string literal.
    pub fn string(&mut self, value: &str) -> Result<u16, PoolError> {
        let utf8 = self.utf8(value)?;
        self.add(Constant::String(utf8))
    }

    pub fn integer(&mut self, value: i32) -> Result<u16, PoolError> {
        self.add(Constant::Integer(value))
    }

    pub fn float(&mut self, value: f32) -> Result<u16, PoolError> {
        self.add(Constant::Float(value.to_bits()))
    }

    pub fn long(&mut self, value: i64) -> Result<u16, PoolError> {
        self.add(Constant::Long(value))
    }

    pub fn double(&mut self, value: f64) -> Result<u16, PoolError> {
        self.add(Constant::Double(value.to_bits()))
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> Result<u16, PoolError> {
        let name = self.utf8(name)?;
        let descriptor = self.utf8(descriptor)?;
        self.add(Constant::NameAndType(name, descriptor))
    }

    pub fn method_ref(
        &mut self,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> Result<u16, PoolError> {
        let class = self.class(owner)?;
        let name_and_type = self.name_and_type(name, descriptor)?;
        self.add(Constant::Methodref(class, name_and_type))
    }

    /// Value of `constant_pool_count`: highest used index plus one.
    pub fn count(&self) -> u16 {
        self.next as u16
    }

    /// Number of distinct entries (not slots).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u16) -> Option<&Constant> {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .ok()
            .map(|pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &Constant)> {
        self.entries.iter().map(|(i, c)| (*i, c))
    }

    /// Serialize `constant_pool_count` followed by every entry.
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.count().to_be_bytes());
        for (_, constant) in &self.entries {
            constant.write(out);
        }
    }
}

impl Default for ConstantPool {
    fn default() -> Self {
        Self::new()
    }
}
