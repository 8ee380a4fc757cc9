use classstub_core::{Class, ClassArena, ClassId};

use crate::diagnostics::Diagnostics;
use crate::resolve::NameResolver;

/// Everything owned by one compilation unit.
///
/// Each input file gets a fresh context; nothing here is shared between
/// units.
#[derive(Debug, Clone, Default)]
pub struct UnitContext {
    pub resolver: NameResolver,
    pub arena: ClassArena,
    pub diagnostics: Diagnostics,
}

impl UnitContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class with the given binary name, if one was built.
    pub fn find_class(&self, binary_name: &str) -> Option<(ClassId, &Class)> {
        self.arena.iter().find(|(_, c)| c.name() == binary_name)
    }
}
