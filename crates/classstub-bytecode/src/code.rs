//! Instruction encoding for stub method bodies.
//!
//! [`CodeBuilder`] tracks the operand stack depth after every instruction, so
//! `max_stack` and `max_locals` are computed rather than hand-counted.

use crate::constants::opcode;

/// One instruction. Pool operands are indices into the class's constant pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insn {
    AconstNull,
    Iconst0,
    Lconst0,
    Fconst0,
    Dconst0,
    /// Single-slot constant; encoded as `ldc_w` when the index does not fit a byte.
    Ldc(u16),
    Aload(u8),
    Dup,
    New(u16),
    /// `arg_slots` excludes the receiver.
    InvokeSpecial {
        method_ref: u16,
        arg_slots: u16,
        ret_slots: u16,
    },
    Ireturn,
    Lreturn,
    Freturn,
    Dreturn,
    Areturn,
    Return,
    Athrow,
}

impl Insn {
    /// Net stack effect in slots.
    fn stack_delta(self) -> i32 {
        match self {
            Insn::AconstNull
            | Insn::Iconst0
            | Insn::Fconst0
            | Insn::Ldc(_)
            | Insn::Aload(_)
            | Insn::Dup
            | Insn::New(_) => 1,
            Insn::Lconst0 | Insn::Dconst0 => 2,
            Insn::InvokeSpecial {
                arg_slots,
                ret_slots,
                ..
            } => ret_slots as i32 - arg_slots as i32 - 1,
            Insn::Ireturn | Insn::Freturn | Insn::Areturn | Insn::Athrow => -1,
            Insn::Lreturn | Insn::Dreturn => -2,
            Insn::Return => 0,
        }
    }

    /// Whether control never falls through to the next instruction.
    fn is_terminal(self) -> bool {
        matches!(
            self,
            Insn::Ireturn
                | Insn::Lreturn
                | Insn::Freturn
                | Insn::Dreturn
                | Insn::Areturn
                | Insn::Return
                | Insn::Athrow
        )
    }

    fn encode(self, out: &mut Vec<u8>) {
        match self {
            Insn::AconstNull => out.push(opcode::ACONST_NULL),
            Insn::Iconst0 => out.push(opcode::ICONST_0),
            Insn::Lconst0 => out.push(opcode::LCONST_0),
            Insn::Fconst0 => out.push(opcode::FCONST_0),
            Insn::Dconst0 => out.push(opcode::DCONST_0),
            Insn::Ldc(index) => match u8::try_from(index) {
                Ok(short) => out.extend_from_slice(&[opcode::LDC, short]),
                Err(_) => {
                    out.push(opcode::LDC_W);
                    out.extend_from_slice(&index.to_be_bytes());
                }
            },
            Insn::Aload(0) => out.push(opcode::ALOAD_0),
            Insn::Aload(slot) => out.extend_from_slice(&[opcode::ALOAD, slot]),
            Insn::Dup => out.push(opcode::DUP),
            Insn::New(class) => {
                out.push(opcode::NEW);
                out.extend_from_slice(&class.to_be_bytes());
            }
            Insn::InvokeSpecial { method_ref, .. } => {
                out.push(opcode::INVOKESPECIAL);
                out.extend_from_slice(&method_ref.to_be_bytes());
            }
            Insn::Ireturn => out.push(opcode::IRETURN),
            Insn::Lreturn => out.push(opcode::LRETURN),
            Insn::Freturn => out.push(opcode::FRETURN),
            Insn::Dreturn => out.push(opcode::DRETURN),
            Insn::Areturn => out.push(opcode::ARETURN),
            Insn::Return => out.push(opcode::RETURN),
            Insn::Athrow => out.push(opcode::ATHROW),
        }
    }
}

/// A finished method body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Code {
    pub max_stack: u16,
    pub max_locals: u16,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct CodeBuilder {
    bytes: Vec<u8>,
    depth: i32,
    max_depth: i32,
    max_locals: u16,
}

impl CodeBuilder {
    pub fn new(max_locals: u16) -> Self {
        Self {
            bytes: Vec::new(),
            depth: 0,
            max_depth: 0,
            max_locals,
        }
    }

    /// Builder whose locals cover the parameters of `descriptor`, plus the
    /// receiver unless `is_static`. `None` if the descriptor is malformed.
    pub fn for_method(descriptor: &str, is_static: bool) -> Option<Self> {
        let (arg_slots, _) = method_slots(descriptor)?;
        let receiver = if is_static { 0 } else { 1 };
        Some(Self::new(arg_slots + receiver))
    }

    pub fn push(&mut self, insn: Insn) -> &mut Self {
        insn.encode(&mut self.bytes);
        self.depth += insn.stack_delta();
        self.max_depth = self.max_depth.max(self.depth);
        if insn.is_terminal() {
            self.depth = 0;
        }
        self
    }

    pub fn extend(&mut self, insns: impl IntoIterator<Item = Insn>) -> &mut Self {
        for insn in insns {
            self.push(insn);
        }
        self
    }

    pub fn finish(self) -> Code {
        Code {
            max_stack: self.max_depth as u16,
            max_locals: self.max_locals,
            bytes: self.bytes,
        }
    }
}

/// Slot counts of a method descriptor: `(arguments, return value)`.
///
/// `long` and `double` take two slots, `void` none.
pub fn method_slots(descriptor: &str) -> Option<(u16, u16)> {
    let rest = descriptor.strip_prefix('(')?;
    let (params, ret) = rest.split_once(')')?;

    let mut slots = 0u16;
    let mut bytes = params.as_bytes();
    while !bytes.is_empty() {
        let (width, len) = field_slots(bytes)?;
        slots = slots.checked_add(width)?;
        bytes = &bytes[len..];
    }

    let ret_slots = match ret {
        "V" => 0,
        _ => {
            let (width, len) = field_slots(ret.as_bytes())?;
            if len != ret.len() {
                return None;
            }
            width
        }
    };
    Some((slots, ret_slots))
}

/// Slots and byte length of the field descriptor at the start of `bytes`.
fn field_slots(bytes: &[u8]) -> Option<(u16, usize)> {
    let dims = bytes.iter().take_while(|&&b| b == b'[').count();
    let rest = &bytes[dims..];
    let (width, len) = match rest.first()? {
        b'J' | b'D' => (2, 1),
        b'I' | b'Z' | b'B' | b'C' | b'S' | b'F' => (1, 1),
        b'L' => {
            let end = rest.iter().position(|&b| b == b';')?;
            (1, end + 1)
        }
        _ => return None,
    };
    let width = if dims > 0 { 1 } else { width };
    Some((width, dims + len))
}
