//! Error types for class file construction and parsing.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("constant pool overflow: {0} slots (max 65534)")]
    Overflow(usize),
    #[error("constant too long: {0} bytes of modified UTF-8 (max 65535)")]
    Utf8TooLong(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("too many {what}: {count} (max 65535)")]
    TooMany { what: &'static str, count: usize },
    #[error("method code too large: {0} bytes (max 65535)")]
    CodeTooLarge(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("invalid magic: expected 0xCAFEBABE, got {0:#010x}")]
    InvalidMagic(u32),
    #[error("unexpected end of data at offset {0}")]
    UnexpectedEof(usize),
    #[error("unknown constant pool tag {tag} at index {index}")]
    UnknownTag { tag: u8, index: u16 },
    #[error("constant pool index {0} is out of range or unusable")]
    BadIndex(u16),
    #[error("constant pool index {index} is not a {expected} entry")]
    WrongEntry { index: u16, expected: &'static str },
    #[error("malformed modified UTF-8 in constant {0}")]
    BadUtf8(u16),
    #[error("malformed {0} attribute")]
    BadAttribute(&'static str),
    #[error("{0} trailing bytes after class file")]
    TrailingBytes(usize),
}
