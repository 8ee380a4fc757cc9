//! Class file serialization.
//!
//! Layout, in order: magic, minor, major, constant pool, access flags,
//! this class, super class, interfaces, fields, methods, attributes. Every
//! name is a constant pool index; callers intern through [`ClassFile::pool`]
//! while assembling the structure.

use classstub_core::AccessFlags;

use crate::code::Code;
use crate::constants::{ClassVersion, MAGIC, MAX_CODE_LENGTH, attr};
use crate::error::{PoolError, WriteError};
use crate::pool::ConstantPool;

/// One `InnerClasses` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InnerClassEntry {
    pub inner_class: u16,
    /// 0 when the class is not a member.
    pub outer_class: u16,
    /// 0 for anonymous classes.
    pub inner_name: u16,
    pub access: AccessFlags,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attribute {
    Code { name: u16, code: Code },
    ConstantValue { name: u16, value: u16 },
    Exceptions { name: u16, classes: Vec<u16> },
    InnerClasses { name: u16, classes: Vec<InnerClassEntry> },
}

impl Attribute {
    pub fn code(pool: &mut ConstantPool, code: Code) -> Result<Self, PoolError> {
        let name = pool.utf8(attr::CODE)?;
        Ok(Attribute::Code { name, code })
    }

    pub fn constant_value(pool: &mut ConstantPool, value: u16) -> Result<Self, PoolError> {
        let name = pool.utf8(attr::CONSTANT_VALUE)?;
        Ok(Attribute::ConstantValue { name, value })
    }

    pub fn exceptions(pool: &mut ConstantPool, classes: Vec<u16>) -> Result<Self, PoolError> {
        let name = pool.utf8(attr::EXCEPTIONS)?;
        Ok(Attribute::Exceptions { name, classes })
    }

    pub fn inner_classes(
        pool: &mut ConstantPool,
        classes: Vec<InnerClassEntry>,
    ) -> Result<Self, PoolError> {
        let name = pool.utf8(attr::INNER_CLASSES)?;
        Ok(Attribute::InnerClasses { name, classes })
    }

    fn name(&self) -> u16 {
        match self {
            Attribute::Code { name, .. }
            | Attribute::ConstantValue { name, .. }
            | Attribute::Exceptions { name, .. }
            | Attribute::InnerClasses { name, .. } => *name,
        }
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<(), WriteError> {
        let mut body = Vec::new();
        match self {
            Attribute::Code { code, .. } => {
                if code.bytes.len() > MAX_CODE_LENGTH {
                    return Err(WriteError::CodeTooLarge(code.bytes.len()));
                }
                body.extend_from_slice(&code.max_stack.to_be_bytes());
                body.extend_from_slice(&code.max_locals.to_be_bytes());
                body.extend_from_slice(&(code.bytes.len() as u32).to_be_bytes());
                body.extend_from_slice(&code.bytes);
                // exception_table_length, attributes_count
                body.extend_from_slice(&0u16.to_be_bytes());
                body.extend_from_slice(&0u16.to_be_bytes());
            }
            Attribute::ConstantValue { value, .. } => {
                body.extend_from_slice(&value.to_be_bytes());
            }
            Attribute::Exceptions { classes, .. } => {
                write_count(&mut body, "exceptions", classes.len())?;
                for class in classes {
                    body.extend_from_slice(&class.to_be_bytes());
                }
            }
            Attribute::InnerClasses { classes, .. } => {
                write_count(&mut body, "inner classes", classes.len())?;
                for entry in classes {
                    body.extend_from_slice(&entry.inner_class.to_be_bytes());
                    body.extend_from_slice(&entry.outer_class.to_be_bytes());
                    body.extend_from_slice(&entry.inner_name.to_be_bytes());
                    body.extend_from_slice(&entry.access.bits().to_be_bytes());
                }
            }
        }

        out.extend_from_slice(&self.name().to_be_bytes());
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        out.extend_from_slice(&body);
        Ok(())
    }
}

/// A `field_info` structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    pub access: AccessFlags,
    pub name: u16,
    pub descriptor: u16,
    pub attributes: Vec<Attribute>,
}

/// A `method_info` structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub access: AccessFlags,
    pub name: u16,
    pub descriptor: u16,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug)]
pub struct ClassFile {
    pub version: ClassVersion,
    pub pool: ConstantPool,
    pub access: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub attributes: Vec<Attribute>,
}

impl ClassFile {
    pub fn new(version: ClassVersion) -> Self {
        Self {
            version,
            pool: ConstantPool::new(),
            access: AccessFlags::NONE,
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteError> {
        let mut out = Vec::with_capacity(512);

        out.extend_from_slice(&MAGIC.to_be_bytes());
        out.extend_from_slice(&self.version.minor().to_be_bytes());
        out.extend_from_slice(&self.version.major().to_be_bytes());
        self.pool.write(&mut out);

        out.extend_from_slice(&self.access.bits().to_be_bytes());
        out.extend_from_slice(&self.this_class.to_be_bytes());
        out.extend_from_slice(&self.super_class.to_be_bytes());

        write_count(&mut out, "interfaces", self.interfaces.len())?;
        for interface in &self.interfaces {
            out.extend_from_slice(&interface.to_be_bytes());
        }

        write_count(&mut out, "fields", self.fields.len())?;
        for field in &self.fields {
            write_member(&mut out, field.access, field.name, field.descriptor, &field.attributes)?;
        }

        write_count(&mut out, "methods", self.methods.len())?;
        for method in &self.methods {
            write_member(
                &mut out,
                method.access,
                method.name,
                method.descriptor,
                &method.attributes,
            )?;
        }

        write_attributes(&mut out, &self.attributes)?;
        Ok(out)
    }
}

fn write_member(
    out: &mut Vec<u8>,
    access: AccessFlags,
    name: u16,
    descriptor: u16,
    attributes: &[Attribute],
) -> Result<(), WriteError> {
    out.extend_from_slice(&access.bits().to_be_bytes());
    out.extend_from_slice(&name.to_be_bytes());
    out.extend_from_slice(&descriptor.to_be_bytes());
    write_attributes(out, attributes)
}

fn write_attributes(out: &mut Vec<u8>, attributes: &[Attribute]) -> Result<(), WriteError> {
    write_count(out, "attributes", attributes.len())?;
    for attribute in attributes {
        attribute.write(out)?;
    }
    Ok(())
}

fn write_count(out: &mut Vec<u8>, what: &'static str, count: usize) -> Result<(), WriteError> {
    let count16 = u16::try_from(count).map_err(|_| WriteError::TooMany { what, count })?;
    out.extend_from_slice(&count16.to_be_bytes());
    Ok(())
}
