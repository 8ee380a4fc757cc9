//! Stub method bodies.

use classstub_bytecode::{Code, CodeBuilder, ConstantPool, Insn};
use classstub_core::{CONSTRUCTOR_NAME, Method};

use crate::emit::EmitError;

/// Exception every throwing stub raises.
pub const UNSUPPORTED_OPERATION: &str = "java/lang/UnsupportedOperationException";

/// Message passed to the exception constructor.
pub const NOT_IMPLEMENTED: &str = "Not implemented!";

const STRING_CONSTRUCTOR: &str = "(Ljava/lang/String;)V";

/// What a stub body does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyMode {
    /// Raise `UnsupportedOperationException("Not implemented!")`.
    #[default]
    Throw,
    /// Return the zero value of the return type.
    Default,
}

impl BodyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyMode::Throw => "throw",
            BodyMode::Default => "default",
        }
    }
}

/// Body for `method`, or `None` when the method carries no Code attribute.
///
/// `super_name` is the binary name of the declaring class's superclass; a
/// default-mode constructor chains to its no-arg constructor.
pub fn stub_body(
    pool: &mut ConstantPool,
    method: &Method,
    super_name: &str,
    mode: BodyMode,
) -> Result<Option<Code>, EmitError> {
    if !method.has_body() {
        return Ok(None);
    }

    let descriptor = method.descriptor();
    let mut code = CodeBuilder::for_method(&descriptor, method.is_static())
        .ok_or_else(|| EmitError::BadDescriptor(descriptor.clone()))?;

    match mode {
        BodyMode::Throw => throw_body(pool, &mut code)?,
        BodyMode::Default if method.is_constructor() => {
            let init = pool.method_ref(super_name, CONSTRUCTOR_NAME, "()V")?;
            code.extend([
                Insn::Aload(0),
                Insn::InvokeSpecial {
                    method_ref: init,
                    arg_slots: 0,
                    ret_slots: 0,
                },
                Insn::Return,
            ]);
        }
        BodyMode::Default => {
            code.extend(default_return(method.return_descriptor()));
        }
    }

    Ok(Some(code.finish()))
}

fn throw_body(pool: &mut ConstantPool, code: &mut CodeBuilder) -> Result<(), EmitError> {
    let class = pool.class(UNSUPPORTED_OPERATION)?;
    let message = pool.string(NOT_IMPLEMENTED)?;
    let init = pool.method_ref(UNSUPPORTED_OPERATION, CONSTRUCTOR_NAME, STRING_CONSTRUCTOR)?;
    code.extend([
        Insn::New(class),
        Insn::Dup,
        Insn::Ldc(message),
        Insn::InvokeSpecial {
            method_ref: init,
            arg_slots: 1,
            ret_slots: 0,
        },
        Insn::Athrow,
    ]);
    Ok(())
}

/// Zero-value return, chosen by the first character of the descriptor.
pub fn default_return(return_descriptor: &str) -> Vec<Insn> {
    match return_descriptor.as_bytes().first() {
        Some(b'V') => vec![Insn::Return],
        Some(b'I' | b'C' | b'S' | b'B' | b'Z') => vec![Insn::Iconst0, Insn::Ireturn],
        Some(b'J') => vec![Insn::Lconst0, Insn::Lreturn],
        Some(b'F') => vec![Insn::Fconst0, Insn::Freturn],
        Some(b'D') => vec![Insn::Dconst0, Insn::Dreturn],
        _ => vec![Insn::AconstNull, Insn::Areturn],
    }
}
