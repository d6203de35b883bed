// FAMIX entity kinds
//
// Every node in the model is one of these variants. Strings that end up in
// the output are held as `MseString`, so a constructed entity is always
// serializable.

use super::value::{MseString, NodeId};

/// Meta-model namespace prefix for all type tags
pub const FAMIX_PREFIX: &str = "FAMIX";

/// The logical grouping for the whole analyzed codebase
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: MseString,
}

/// A file unit: compilation unit or header/interface file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    pub file_path: MseString,
    pub file_name: MseString,
    pub language: MseString,
}

/// Directed uses-relationship between two file units
#[derive(Debug, Clone, PartialEq)]
pub struct Include {
    pub source: NodeId,
    pub target: NodeId,
}

/// Binds a node to the unit it was found in
#[derive(Debug, Clone, PartialEq)]
pub struct FileAnchor {
    pub element: NodeId,
    pub unit: NodeId,
    pub file_name: MseString,
    pub start_line: Option<i64>,
    pub end_line: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: MseString,
    pub package: NodeId,
    /// Base class names as written, before linking
    pub supers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inheritance {
    pub subclass: NodeId,
    pub superclass: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: MseString,
    pub signature: MseString,
    pub parent: NodeId,
    pub declared_type: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: MseString,
    pub parent: NodeId,
    pub declared_type: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: MseString,
    pub signature: MseString,
    pub declared_type: Option<NodeId>,
}

/// A call expression with a known caller
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub signature: MseString,
    pub sender: NodeId,
}

/// Closed set of entity kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Package(Package),
    CompilationUnit(SourceUnit),
    Header(SourceUnit),
    Include(Include),
    FileAnchor(FileAnchor),
    Class(Class),
    Inheritance(Inheritance),
    Method(Method),
    Attribute(Attribute),
    Function(Function),
    Invocation(Invocation),
}

impl Entity {
    /// Meta-model type tag, e.g. `FAMIX.Class`
    pub fn type_tag(&self) -> &'static str {
        match self {
            Entity::Package(_) => "FAMIX.Package",
            Entity::CompilationUnit(_) => "FAMIX.CompilationUnit",
            Entity::Header(_) => "FAMIX.Header",
            Entity::Include(_) => "FAMIX.Include",
            Entity::FileAnchor(_) => "FAMIX.FileAnchor",
            Entity::Class(_) => "FAMIX.Class",
            Entity::Inheritance(_) => "FAMIX.Inheritance",
            Entity::Method(_) => "FAMIX.Method",
            Entity::Attribute(_) => "FAMIX.Attribute",
            Entity::Function(_) => "FAMIX.Function",
            Entity::Invocation(_) => "FAMIX.Invocation",
        }
    }

    /// Name of named entities
    pub fn name(&self) -> Option<&str> {
        match self {
            Entity::Package(p) => Some(p.name.as_str()),
            Entity::CompilationUnit(u) | Entity::Header(u) => Some(u.file_name.as_str()),
            Entity::Class(c) => Some(c.name.as_str()),
            Entity::Method(m) => Some(m.name.as_str()),
            Entity::Attribute(a) => Some(a.name.as_str()),
            Entity::Function(f) => Some(f.name.as_str()),
            _ => None,
        }
    }

    /// The unit payload, if this is a compilation unit or header
    pub fn as_unit(&self) -> Option<&SourceUnit> {
        match self {
            Entity::CompilationUnit(u) | Entity::Header(u) => Some(u),
            _ => None,
        }
    }

    /// Mutable declared-type slot of typed entities
    pub(crate) fn declared_type_mut(&mut self) -> Option<&mut Option<NodeId>> {
        match self {
            Entity::Method(m) => Some(&mut m.declared_type),
            Entity::Attribute(a) => Some(&mut a.declared_type),
            Entity::Function(f) => Some(&mut f.declared_type),
            _ => None,
        }
    }

    /// Declared type of typed entities, once resolved
    pub fn declared_type(&self) -> Option<NodeId> {
        match self {
            Entity::Method(m) => m.declared_type,
            Entity::Attribute(a) => a.declared_type,
            Entity::Function(f) => f.declared_type,
            _ => None,
        }
    }
}
