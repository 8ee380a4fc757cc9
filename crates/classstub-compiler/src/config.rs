//! Configuration for class file emission.

use classstub_bytecode::ClassVersion;

use crate::stub::BodyMode;

/// Configuration for class file emission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitConfig {
    /// Class file version tier
    pub(crate) version: ClassVersion,
    /// What generated method bodies do
    pub(crate) mode: BodyMode,
    /// Whether every class, field, method and InnerClasses record is marked synthetic
    pub(crate) synthetic: bool,
}

impl EmitConfig {
    /// Create a new EmitConfig with default values: Java 8, throwing bodies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class file version tier.
    pub fn version(mut self, value: ClassVersion) -> Self {
        self.version = value;
        self
    }

    /// Set the stub body mode.
    pub fn mode(mut self, value: BodyMode) -> Self {
        self.mode = value;
        self
    }

    /// Set whether to mark generated members synthetic.
    pub fn synthetic(mut self, value: bool) -> Self {
        self.synthetic = value;
        self
    }

    pub fn body_mode(&self) -> BodyMode {
        self.mode
    }

    pub fn class_version(&self) -> ClassVersion {
        self.version
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}
