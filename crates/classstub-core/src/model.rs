//! The symbolic class model.
//!
//! Values are produced by builders and stored in a [`ClassArena`]. Nested
//! classes reference each other by [`ClassId`], never by name, so two
//! enclosing classes may each declare a nested class with the same simple name.

use indexmap::IndexSet;

use crate::access::{Access, AccessFlags, ClassModifier, MethodModifier, Visibility};
use crate::descriptor::OBJECT;

/// Method name the JVM reserves for constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Separator between an enclosing class and its nested class in binary names.
pub const NESTED_SEPARATOR: char = '$';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

/// Value of a `ConstantValue` attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    descriptor: String,
    constant: Option<ConstantValue>,
    access: Access,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn constant(&self) -> Option<&ConstantValue> {
        self.constant.as_ref()
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn access_flags(&self) -> AccessFlags {
        self.access.flags()
    }
}

#[derive(Clone, Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            field: Field {
                name: name.into(),
                descriptor: descriptor.into(),
                constant: None,
                access: Access::default(),
            },
        }
    }

    pub fn access(mut self, access: Access) -> Self {
        self.field.access = access;
        self
    }

    pub fn constant(mut self, value: ConstantValue) -> Self {
        self.field.constant = Some(value);
        self
    }

    pub fn build(self) -> Field {
        self.field
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Method {
    name: String,
    return_descriptor: String,
    params: Vec<String>,
    exceptions: Vec<String>,
    access: Access,
    modifier: MethodModifier,
    constructor: bool,
}

impl Method {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_descriptor(&self) -> &str {
        &self.return_descriptor
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Binary names of the declared thrown types.
    pub fn exceptions(&self) -> &[String] {
        &self.exceptions
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn modifier(&self) -> MethodModifier {
        self.modifier
    }

    pub fn is_constructor(&self) -> bool {
        self.constructor
    }

    pub fn is_static(&self) -> bool {
        self.access.is_static
    }

    pub fn has_body(&self) -> bool {
        self.modifier.has_body()
    }

    pub fn descriptor(&self) -> String {
        crate::descriptor::method_descriptor(&self.params, &self.return_descriptor)
    }

    pub fn access_flags(&self) -> AccessFlags {
        self.access.flags() | self.modifier.flags()
    }
}

/// Builds a [`Method`]. Setters follow last-wins semantics.
#[derive(Clone, Debug)]
pub struct MethodBuilder {
    method: Method,
}

impl MethodBuilder {
    pub fn new(name: impl Into<String>, return_descriptor: impl Into<String>) -> Self {
        Self {
            method: Method {
                name: name.into(),
                return_descriptor: return_descriptor.into(),
                params: Vec::new(),
                exceptions: Vec::new(),
                access: Access::default(),
                modifier: MethodModifier::None,
                constructor: false,
            },
        }
    }

    /// A constructor: named `<init>`, returning `V`.
    pub fn constructor() -> Self {
        let mut builder = Self::new(CONSTRUCTOR_NAME, "V");
        builder.method.constructor = true;
        builder
    }

    /// Apply visibility and static from `access`; a final flag becomes the
    /// `Final` modifier.
    pub fn access(mut self, access: Access) -> Self {
        self.method.access.visibility = access.visibility;
        self.method.access.is_static = access.is_static;
        if access.is_final {
            self.method.modifier = MethodModifier::Final;
        }
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.method.access.visibility = visibility;
        self
    }

    pub fn public(self) -> Self {
        self.visibility(Visibility::Public)
    }

    pub fn static_(mut self, value: bool) -> Self {
        self.method.access.is_static = value;
        self
    }

    pub fn modifier(mut self, modifier: MethodModifier) -> Self {
        self.method.modifier = modifier;
        self
    }

    pub fn abstract_(self) -> Self {
        self.modifier(MethodModifier::Abstract)
    }

    pub fn final_(self) -> Self {
        self.modifier(MethodModifier::Final)
    }

    pub fn native(self) -> Self {
        self.modifier(MethodModifier::Native)
    }

    pub fn param(mut self, descriptor: impl Into<String>) -> Self {
        self.method.params.push(descriptor.into());
        self
    }

    pub fn params<I, S>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.method.params = descriptors.into_iter().map(Into::into).collect();
        self
    }

    pub fn exceptions<I, S>(mut self, binary_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.method.exceptions = binary_names.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(mut self) -> Method {
        if self.method.constructor {
            self.method.name = CONSTRUCTOR_NAME.to_owned();
            self.method.return_descriptor = "V".to_owned();
            self.method.access.is_static = false;
            self.method.modifier = MethodModifier::None;
        }
        self.method
    }
}

/// Index of a class in its [`ClassArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    name: String,
    super_name: String,
    interfaces: IndexSet<String>,
    kind: TypeKind,
    access: Access,
    modifier: ClassModifier,
    enclosing: Option<ClassId>,
    nested: Vec<ClassId>,
    fields: Vec<Field>,
    methods: Vec<Method>,
}

impl Class {
    /// Binary name, e.g. `p/Outer$Inner`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn super_name(&self) -> &str {
        &self.super_name
    }

    pub fn interfaces(&self) -> impl ExactSizeIterator<Item = &str> {
        self.interfaces.iter().map(String::as_str)
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn modifier(&self) -> ClassModifier {
        self.modifier
    }

    pub fn enclosing(&self) -> Option<ClassId> {
        self.enclosing
    }

    /// Classes recorded in this class's InnerClasses attribute.
    pub fn nested(&self) -> &[ClassId] {
        &self.nested
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Artifact stem: the binary name after the package, `Outer$Inner` for
    /// nested classes.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Split a nested binary name into `(outer, inner)` at the last `$`.
    pub fn split_nested(&self) -> Option<(&str, &str)> {
        split_nested_name(&self.name)
    }

    /// Access word derived from the model, with interface coercion applied.
    ///
    /// Interfaces always carry `INTERFACE | ABSTRACT` and never `FINAL` or
    /// `SUPER`, whatever was set explicitly.
    pub fn access_flags(&self) -> AccessFlags {
        let flags = self.access.flags() | self.modifier.flags();
        match self.kind {
            TypeKind::Class => flags,
            TypeKind::Interface => (flags | AccessFlags::INTERFACE | AccessFlags::ABSTRACT)
                .without(AccessFlags::FINAL | AccessFlags::SUPER),
        }
    }
}

/// `p/Outer$Inner` → `("p/Outer", "Inner")`.
pub fn split_nested_name(binary_name: &str) -> Option<(&str, &str)> {
    let (outer, inner) = binary_name.rsplit_once(NESTED_SEPARATOR)?;
    (!outer.is_empty() && !inner.is_empty()).then_some((outer, inner))
}

/// Builds a [`Class`]. Setters follow last-wins semantics.
#[derive(Clone, Debug)]
pub struct ClassBuilder {
    class: Class,
}

impl ClassBuilder {
    /// Start a class with the given name; dots are converted to slashes.
    pub fn new(name: &str) -> Self {
        Self {
            class: Class {
                name: crate::descriptor::binary_name(name),
                super_name: OBJECT.to_owned(),
                interfaces: IndexSet::new(),
                kind: TypeKind::Class,
                access: Access::default(),
                modifier: ClassModifier::None,
                enclosing: None,
                nested: Vec::new(),
                fields: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    /// Set the supertype. `None` or a blank name falls back to `java/lang/Object`.
    pub fn super_name(mut self, name: Option<&str>) -> Self {
        self.class.super_name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => crate::descriptor::binary_name(name),
            _ => OBJECT.to_owned(),
        };
        self
    }

    pub fn interface(mut self, name: &str) -> Self {
        self.class
            .interfaces
            .insert(crate::descriptor::binary_name(name));
        self
    }

    pub fn interfaces<'a, I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self = self.interface(name);
        }
        self
    }

    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.class.kind = kind;
        self
    }

    /// Apply visibility and static from `access`; a final flag becomes the
    /// `Final` modifier.
    pub fn access(mut self, access: Access) -> Self {
        self.class.access.visibility = access.visibility;
        self.class.access.is_static = access.is_static;
        if access.is_final {
            self.class.modifier = ClassModifier::Final;
        }
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.class.access.visibility = visibility;
        self
    }

    pub fn public(self) -> Self {
        self.visibility(Visibility::Public)
    }

    pub fn static_(mut self, value: bool) -> Self {
        self.class.access.is_static = value;
        self
    }

    pub fn modifier(mut self, modifier: ClassModifier) -> Self {
        self.class.modifier = modifier;
        self
    }

    pub fn abstract_(self) -> Self {
        self.modifier(ClassModifier::Abstract)
    }

    pub fn final_(self) -> Self {
        self.modifier(ClassModifier::Final)
    }

    pub fn field(mut self, field: Field) -> Self {
        self.class.fields.push(field);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.class.methods.push(method);
        self
    }

    pub fn build(self) -> Class {
        self.class
    }
}

/// Owns every class of one compilation unit.
#[derive(Clone, Debug, Default)]
pub struct ClassArena {
    classes: Vec<Class>,
}

impl ClassArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, class: Class) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(class);
        id
    }

    /// Allocate `class` as a nested member of `enclosing` and link it into
    /// the enclosing class's nested list.
    pub fn alloc_nested(&mut self, enclosing: ClassId, mut class: Class) -> ClassId {
        class.enclosing = Some(enclosing);
        let id = self.alloc(class);
        self.link_nested(enclosing, id);
        id
    }

    /// Record `nested` in the InnerClasses list of `owner`. Duplicates are ignored.
    pub fn link_nested(&mut self, owner: ClassId, nested: ClassId) {
        let list = &mut self.classes[owner.index()].nested;
        if !list.contains(&nested) {
            list.push(nested);
        }
    }

    pub fn push_field(&mut self, owner: ClassId, field: Field) {
        self.classes[owner.index()].fields.push(field);
    }

    pub fn push_method(&mut self, owner: ClassId, method: Method) {
        self.classes[owner.index()].methods.push(method);
    }

    pub fn get(&self, id: ClassId) -> &Class {
        &self.classes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &Class)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| (ClassId(i as u32), c))
    }
}

impl std::ops::Index<ClassId> for ClassArena {
    type Output = Class;

    fn index(&self, id: ClassId) -> &Class {
        self.get(id)
    }
}
