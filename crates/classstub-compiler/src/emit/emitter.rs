//! Per-class emission state machine.

use classstub_bytecode::{Attribute, ClassFile, FieldInfo, InnerClassEntry, MethodInfo};
use classstub_core::{AccessFlags, Class, ConstantValue, Field, Method};

use super::{EmitError, Phase};
use crate::config::EmitConfig;
use crate::stub::stub_body;

/// Bits a class entry never carries; they only mean something in the
/// owning scope or in an InnerClasses record.
const CLASS_ENTRY_MASK: AccessFlags = AccessFlags::STATIC
    .union(AccessFlags::PRIVATE)
    .union(AccessFlags::PROTECTED);

/// Builds one class file: `begin`, then fields, nested classes and methods
/// in that order, then `finish`.
#[derive(Debug)]
pub struct ClassFileEmitter<'c> {
    config: &'c EmitConfig,
    file: ClassFile,
    super_name: String,
    phase: Phase,
    inner_classes: Vec<InnerClassEntry>,
}

impl<'c> ClassFileEmitter<'c> {
    pub fn begin(config: &'c EmitConfig, class: &Class) -> Result<Self, EmitError> {
        let mut file = ClassFile::new(config.version);

        let mut access = class.access_flags() | synthetic(config);
        if !class.is_interface() {
            access |= AccessFlags::SUPER;
        }
        file.access = access.without(CLASS_ENTRY_MASK);

        file.this_class = file.pool.class(class.name())?;
        file.super_class = file.pool.class(class.super_name())?;
        for interface in class.interfaces() {
            let index = file.pool.class(interface)?;
            file.interfaces.push(index);
        }

        Ok(Self {
            config,
            file,
            super_name: class.super_name().to_owned(),
            phase: Phase::Begun,
            inner_classes: Vec::new(),
        })
    }

    pub fn field(&mut self, field: &Field) -> Result<(), EmitError> {
        self.advance(Phase::Fields)?;
        let pool = &mut self.file.pool;

        let name = pool.utf8(field.name())?;
        let descriptor = pool.utf8(field.descriptor())?;
        let mut attributes = Vec::new();
        if let Some(constant) = field.constant() {
            let value = match constant {
                ConstantValue::Int(v) => pool.integer(*v)?,
                ConstantValue::Long(v) => pool.long(*v)?,
                ConstantValue::Float(v) => pool.float(*v)?,
                ConstantValue::Double(v) => pool.double(*v)?,
                ConstantValue::String(v) => pool.string(v)?,
            };
            attributes.push(Attribute::constant_value(pool, value)?);
        }

        self.file.fields.push(FieldInfo {
            access: field.access_flags() | synthetic(self.config),
            name,
            descriptor,
            attributes,
        });
        Ok(())
    }

    /// Record `nested` in this class's InnerClasses attribute.
    pub fn nested(&mut self, nested: &Class) -> Result<(), EmitError> {
        self.advance(Phase::Nested)?;
        let pool = &mut self.file.pool;

        let inner_class = pool.class(nested.name())?;
        let (outer_class, inner_name) = match nested.split_nested() {
            Some((outer, inner)) => (pool.class(outer)?, pool.utf8(inner)?),
            None => (0, 0),
        };

        self.inner_classes.push(InnerClassEntry {
            inner_class,
            outer_class,
            inner_name,
            access: nested.access_flags() | synthetic(self.config),
        });
        Ok(())
    }

    pub fn method(&mut self, method: &Method) -> Result<(), EmitError> {
        self.advance(Phase::Methods)?;
        let pool = &mut self.file.pool;

        let name = pool.utf8(method.name())?;
        let descriptor = pool.utf8(&method.descriptor())?;

        let mut attributes = Vec::new();
        if let Some(code) = stub_body(pool, method, &self.super_name, self.config.mode)? {
            attributes.push(Attribute::code(pool, code)?);
        }
        if !method.exceptions().is_empty() {
            let classes = method
                .exceptions()
                .iter()
                .map(|e| pool.class(e))
                .collect::<Result<Vec<_>, _>>()?;
            attributes.push(Attribute::exceptions(pool, classes)?);
        }

        self.file.methods.push(MethodInfo {
            access: method.access_flags() | synthetic(self.config),
            name,
            descriptor,
            attributes,
        });
        Ok(())
    }

    /// Serialize the accumulated class file.
    pub fn finish(mut self) -> Result<Vec<u8>, EmitError> {
        if !self.inner_classes.is_empty() {
            let classes = std::mem::take(&mut self.inner_classes);
            let attribute = Attribute::inner_classes(&mut self.file.pool, classes)?;
            self.file.attributes.push(attribute);
        }
        Ok(self.file.to_bytes()?)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn advance(&mut self, to: Phase) -> Result<(), EmitError> {
        if to < self.phase {
            return Err(EmitError::OutOfOrder {
                current: self.phase,
                attempted: to,
            });
        }
        self.phase = to;
        Ok(())
    }
}

fn synthetic(config: &EmitConfig) -> AccessFlags {
    if config.synthetic {
        AccessFlags::SYNTHETIC
    } else {
        AccessFlags::NONE
    }
}
