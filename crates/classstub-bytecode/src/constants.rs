//! Class file format constants.

/// Magic number at offset 0 of every class file.
pub const MAGIC: u32 = 0xCAFE_BABE;

/// Largest constant pool index plus one (`constant_pool_count` is a u16).
pub const MAX_POOL_SLOTS: usize = u16::MAX as usize;

/// Code arrays must be shorter than 64 KiB.
pub const MAX_CODE_LENGTH: usize = u16::MAX as usize;

/// Target class file version.
///
/// Stub bodies are straight-line code, so none of the tiers needs a
/// `StackMapTable`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClassVersion {
    Java6,
    Java7,
    #[default]
    Java8,
}

impl ClassVersion {
    pub fn major(self) -> u16 {
        match self {
            ClassVersion::Java6 => 50,
            ClassVersion::Java7 => 51,
            ClassVersion::Java8 => 52,
        }
    }

    pub fn minor(self) -> u16 {
        0
    }

    /// Tier for a Java release number (`6`, `7`, `8`).
    pub fn from_release(release: u8) -> Option<Self> {
        match release {
            6 => Some(ClassVersion::Java6),
            7 => Some(ClassVersion::Java7),
            8 => Some(ClassVersion::Java8),
            _ => None,
        }
    }
}

/// Constant pool tags.
pub mod tag {
    pub const UTF8: u8 = 1;
    pub const INTEGER: u8 = 3;
    pub const FLOAT: u8 = 4;
    pub const LONG: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const CLASS: u8 = 7;
    pub const STRING: u8 = 8;
    pub const FIELDREF: u8 = 9;
    pub const METHODREF: u8 = 10;
    pub const INTERFACE_METHODREF: u8 = 11;
    pub const NAME_AND_TYPE: u8 = 12;
    pub const METHOD_HANDLE: u8 = 15;
    pub const METHOD_TYPE: u8 = 16;
    pub const DYNAMIC: u8 = 17;
    pub const INVOKE_DYNAMIC: u8 = 18;
    pub const MODULE: u8 = 19;
    pub const PACKAGE: u8 = 20;
}

/// Attribute names.
pub mod attr {
    pub const CODE: &str = "Code";
    pub const CONSTANT_VALUE: &str = "ConstantValue";
    pub const EXCEPTIONS: &str = "Exceptions";
    pub const INNER_CLASSES: &str = "InnerClasses";
}

/// The opcodes stub bodies use.
pub mod opcode {
    pub const ACONST_NULL: u8 = 0x01;
    pub const ICONST_0: u8 = 0x03;
    pub const LCONST_0: u8 = 0x09;
    pub const FCONST_0: u8 = 0x0b;
    pub const DCONST_0: u8 = 0x0e;
    pub const LDC: u8 = 0x12;
    pub const LDC_W: u8 = 0x13;
    pub const ALOAD: u8 = 0x19;
    pub const ALOAD_0: u8 = 0x2a;
    pub const DUP: u8 = 0x59;
    pub const IRETURN: u8 = 0xac;
    pub const LRETURN: u8 = 0xad;
    pub const FRETURN: u8 = 0xae;
    pub const DRETURN: u8 = 0xaf;
    pub const ARETURN: u8 = 0xb0;
    pub const RETURN: u8 = 0xb1;
    pub const INVOKESPECIAL: u8 = 0xb7;
    pub const NEW: u8 = 0xbb;
    pub const ATHROW: u8 = 0xbf;
}
