//! Human-readable class file dump.
//!
//! Pool references are rendered symbolically (names, literals), never as raw
//! indices, so the output stays stable when pool layout changes.

use std::fmt::Write as _;

use classstub_core::AccessFlags;

use crate::constants::opcode;
use crate::reader::{ParsedClass, ParsedMember, PoolEntry};

#[derive(Clone, Copy)]
enum FlagContext {
    Class,
    Field,
    Method,
    Inner,
}

impl FlagContext {
    fn names(self) -> &'static [(AccessFlags, &'static str)] {
        const CLASS: &[(AccessFlags, &str)] = &[
            (AccessFlags::PUBLIC, "public"),
            (AccessFlags::FINAL, "final"),
            (AccessFlags::SUPER, "super"),
            (AccessFlags::INTERFACE, "interface"),
            (AccessFlags::ABSTRACT, "abstract"),
            (AccessFlags::SYNTHETIC, "synthetic"),
        ];
        const FIELD: &[(AccessFlags, &str)] = &[
            (AccessFlags::PUBLIC, "public"),
            (AccessFlags::PRIVATE, "private"),
            (AccessFlags::PROTECTED, "protected"),
            (AccessFlags::STATIC, "static"),
            (AccessFlags::FINAL, "final"),
            (AccessFlags::VOLATILE, "volatile"),
            (AccessFlags::SYNTHETIC, "synthetic"),
        ];
        const METHOD: &[(AccessFlags, &str)] = &[
            (AccessFlags::PUBLIC, "public"),
            (AccessFlags::PRIVATE, "private"),
            (AccessFlags::PROTECTED, "protected"),
            (AccessFlags::STATIC, "static"),
            (AccessFlags::FINAL, "final"),
            (AccessFlags::NATIVE, "native"),
            (AccessFlags::ABSTRACT, "abstract"),
            (AccessFlags::SYNTHETIC, "synthetic"),
        ];
        const INNER: &[(AccessFlags, &str)] = &[
            (AccessFlags::PUBLIC, "public"),
            (AccessFlags::PRIVATE, "private"),
            (AccessFlags::PROTECTED, "protected"),
            (AccessFlags::STATIC, "static"),
            (AccessFlags::FINAL, "final"),
            (AccessFlags::INTERFACE, "interface"),
            (AccessFlags::ABSTRACT, "abstract"),
            (AccessFlags::SYNTHETIC, "synthetic"),
        ];
        match self {
            FlagContext::Class => CLASS,
            FlagContext::Field => FIELD,
            FlagContext::Method => METHOD,
            FlagContext::Inner => INNER,
        }
    }
}

/// `0x0021 public super`; bits without a name in `context` print as hex.
fn format_flags(flags: AccessFlags, context: FlagContext) -> String {
    let mut out = format!("{:#06x}", flags.bits());
    let mut rest = flags;
    for &(flag, name) in context.names() {
        if flags.contains(flag) {
            out.push(' ');
            out.push_str(name);
            rest = rest.without(flag);
        }
    }
    if rest.bits() != 0 {
        write!(out, " {:#06x}", rest.bits()).unwrap();
    }
    out
}

/// Render a parsed class as text.
pub fn dump(class: &ParsedClass) -> String {
    let mut out = String::new();

    writeln!(out, "[class]").unwrap();
    writeln!(out, "version {}.{}", class.major, class.minor).unwrap();
    writeln!(out, "access {}", format_flags(class.access, FlagContext::Class)).unwrap();
    writeln!(out, "this {}", class.this_class).unwrap();
    match &class.super_class {
        Some(name) => writeln!(out, "super {name}").unwrap(),
        None => writeln!(out, "super -").unwrap(),
    }
    if !class.interfaces.is_empty() {
        writeln!(out, "interfaces {}", class.interfaces.join(", ")).unwrap();
    }

    if !class.fields.is_empty() {
        writeln!(out, "\n[fields]").unwrap();
        for field in &class.fields {
            dump_member(&mut out, class, field, FlagContext::Field);
        }
    }

    if !class.methods.is_empty() {
        writeln!(out, "\n[methods]").unwrap();
        for method in &class.methods {
            dump_member(&mut out, class, method, FlagContext::Method);
        }
    }

    if !class.inner_classes.is_empty() {
        writeln!(out, "\n[inner_classes]").unwrap();
        for record in &class.inner_classes {
            write!(out, "{}", record.inner).unwrap();
            if let Some(outer) = &record.outer {
                write!(out, " outer {outer}").unwrap();
            }
            if let Some(name) = &record.inner_name {
                write!(out, " name {name}").unwrap();
            }
            writeln!(out, " {}", format_flags(record.access, FlagContext::Inner)).unwrap();
        }
    }

    out
}

fn dump_member(out: &mut String, class: &ParsedClass, member: &ParsedMember, ctx: FlagContext) {
    write!(
        out,
        "{} {} {}",
        format_flags(member.access, ctx),
        member.name,
        member.descriptor
    )
    .unwrap();
    if let Some(index) = member.constant {
        write!(out, " = {}", format_constant(class, index)).unwrap();
    }
    out.push('\n');

    if !member.exceptions.is_empty() {
        writeln!(out, "  throws {}", member.exceptions.join(", ")).unwrap();
    }
    if let Some(code) = &member.code {
        writeln!(out, "  code stack={} locals={}", code.max_stack, code.max_locals).unwrap();
        disassemble(out, class, &code.bytes);
    }
}

fn format_constant(class: &ParsedClass, index: u16) -> String {
    match class.entry(index) {
        Some(PoolEntry::Integer(v)) => format!("int {v}"),
        Some(PoolEntry::Long(v)) => format!("long {v}"),
        Some(PoolEntry::Float(v)) => format!("float {v:?}"),
        Some(PoolEntry::Double(v)) => format!("double {v:?}"),
        Some(PoolEntry::String(utf8)) => match class.utf8(*utf8) {
            Ok(s) => format!("{s:?}"),
            Err(_) => format!("#{index}"),
        },
        Some(PoolEntry::Class(_)) => match class.class_name(index) {
            Ok(name) => format!("class {name}"),
            Err(_) => format!("#{index}"),
        },
        _ => format!("#{index}"),
    }
}

fn format_method_ref(class: &ParsedClass, index: u16) -> String {
    let Some(PoolEntry::Methodref(owner, nat)) = class.entry(index) else {
        return format!("#{index}");
    };
    let Some(PoolEntry::NameAndType(name, descriptor)) = class.entry(*nat) else {
        return format!("#{index}");
    };
    match (
        class.class_name(*owner),
        class.utf8(*name),
        class.utf8(*descriptor),
    ) {
        (Ok(owner), Ok(name), Ok(descriptor)) => format!("{owner}.{name}{descriptor}"),
        _ => format!("#{index}"),
    }
}

fn disassemble(out: &mut String, class: &ParsedClass, bytes: &[u8]) {
    let u16_at = |at: usize| -> Option<u16> {
        Some(u16::from_be_bytes([*bytes.get(at)?, *bytes.get(at + 1)?]))
    };

    let mut pc = 0;
    while pc < bytes.len() {
        let op = bytes[pc];
        let (text, len) = match op {
            opcode::ACONST_NULL => ("aconst_null".to_owned(), 1),
            opcode::ICONST_0 => ("iconst_0".to_owned(), 1),
            opcode::LCONST_0 => ("lconst_0".to_owned(), 1),
            opcode::FCONST_0 => ("fconst_0".to_owned(), 1),
            opcode::DCONST_0 => ("dconst_0".to_owned(), 1),
            opcode::ALOAD_0 => ("aload_0".to_owned(), 1),
            opcode::DUP => ("dup".to_owned(), 1),
            opcode::IRETURN => ("ireturn".to_owned(), 1),
            opcode::LRETURN => ("lreturn".to_owned(), 1),
            opcode::FRETURN => ("freturn".to_owned(), 1),
            opcode::DRETURN => ("dreturn".to_owned(), 1),
            opcode::ARETURN => ("areturn".to_owned(), 1),
            opcode::RETURN => ("return".to_owned(), 1),
            opcode::ATHROW => ("athrow".to_owned(), 1),
            opcode::ALOAD | opcode::LDC => {
                let Some(&operand) = bytes.get(pc + 1) else {
                    writeln!(out, "    {pc} <truncated>").unwrap();
                    return;
                };
                let text = if op == opcode::ALOAD {
                    format!("aload {operand}")
                } else {
                    format!("ldc {}", format_constant(class, operand as u16))
                };
                (text, 2)
            }
            opcode::LDC_W | opcode::NEW | opcode::INVOKESPECIAL => {
                let Some(index) = u16_at(pc + 1) else {
                    writeln!(out, "    {pc} <truncated>").unwrap();
                    return;
                };
                let text = match op {
                    opcode::LDC_W => format!("ldc_w {}", format_constant(class, index)),
                    opcode::NEW => match class.class_name(index) {
                        Ok(name) => format!("new {name}"),
                        Err(_) => format!("new #{index}"),
                    },
                    _ => format!("invokespecial {}", format_method_ref(class, index)),
                };
                (text, 3)
            }
            other => {
                writeln!(out, "    {pc} <unknown {other:#04x}>").unwrap();
                return;
            }
        };
        writeln!(out, "    {pc} {text}").unwrap();
        pc += len;
    }
}
