//! Access flags and the visibility/modifier model.
//!
//! The JVM stores access as a 16-bit word. The model keeps the parts that are
//! mutually exclusive in single-valued enums, so exclusivity holds by
//! construction instead of depending on the order setters are called in.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A JVM access flag word.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessFlags(u16);

impl AccessFlags {
    pub const NONE: Self = Self(0);
    pub const PUBLIC: Self = Self(0x0001);
    pub const PRIVATE: Self = Self(0x0002);
    pub const PROTECTED: Self = Self(0x0004);
    pub const STATIC: Self = Self(0x0008);
    pub const FINAL: Self = Self(0x0010);
    /// Shares its bit with `ACC_SYNCHRONIZED` on methods.
    pub const SUPER: Self = Self(0x0020);
    pub const VOLATILE: Self = Self(0x0040);
    pub const NATIVE: Self = Self(0x0100);
    pub const INTERFACE: Self = Self(0x0200);
    pub const ABSTRACT: Self = Self(0x0400);
    pub const SYNTHETIC: Self = Self(0x1000);

    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Clear every bit set in `other`.
    #[inline]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for AccessFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for AccessFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for AccessFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessFlags({:#06x})", self.0)
    }
}

/// Source-level visibility. Exactly one applies at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Package,
    Public,
    Private,
    Protected,
}

impl Visibility {
    pub fn flags(self) -> AccessFlags {
        match self {
            Visibility::Package => AccessFlags::NONE,
            Visibility::Public => AccessFlags::PUBLIC,
            Visibility::Private => AccessFlags::PRIVATE,
            Visibility::Protected => AccessFlags::PROTECTED,
        }
    }
}

/// Visibility plus the two independently composable modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Access {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
}

impl Access {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public() -> Self {
        Self::new().with_visibility(Visibility::Public)
    }

    /// Replace the visibility; the previous one is dropped.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, value: bool) -> Self {
        self.is_static = value;
        self
    }

    pub fn with_final(mut self, value: bool) -> Self {
        self.is_final = value;
        self
    }

    pub fn flags(&self) -> AccessFlags {
        let mut flags = self.visibility.flags();
        if self.is_static {
            flags |= AccessFlags::STATIC;
        }
        if self.is_final {
            flags |= AccessFlags::FINAL;
        }
        flags
    }
}

/// Implementation modifier of a method. `abstract`, `final` and `native`
/// exclude each other; the last one applied wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MethodModifier {
    #[default]
    None,
    Abstract,
    Final,
    Native,
}

impl MethodModifier {
    pub fn flags(self) -> AccessFlags {
        match self {
            MethodModifier::None => AccessFlags::NONE,
            MethodModifier::Abstract => AccessFlags::ABSTRACT,
            MethodModifier::Final => AccessFlags::FINAL,
            MethodModifier::Native => AccessFlags::NATIVE,
        }
    }

    /// Whether a method with this modifier carries a Code attribute.
    pub fn has_body(self) -> bool {
        !matches!(self, MethodModifier::Abstract | MethodModifier::Native)
    }
}

/// Inheritance modifier of a class. `abstract` and `final` exclude each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClassModifier {
    #[default]
    None,
    Abstract,
    Final,
}

impl ClassModifier {
    pub fn flags(self) -> AccessFlags {
        match self {
            ClassModifier::None => AccessFlags::NONE,
            ClassModifier::Abstract => AccessFlags::ABSTRACT,
            ClassModifier::Final => AccessFlags::FINAL,
        }
    }
}
