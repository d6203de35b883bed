// Conversion engine: srcML fact base -> FAMIX model
//
// The stages run in a fixed order over one `ConversionContext`. Later
// stages rely on earlier ones being complete: inheritance and type
// resolution need every class, call attribution needs every class and
// function.

pub mod anchors;
pub mod calls;
pub mod classes;
pub mod functions;
pub mod includes;
pub mod inheritance;
pub mod signature;
pub mod types;
pub mod units;

pub use signature::make_signature;

use crate::config::{Config, ConversionConfig};
use crate::error::Result;
use crate::model::{Entity, MseString, NodeId, Package, Registry};
use crate::parser::parse_document;
use roxmltree::Document;
use std::collections::HashMap;
use tracing::info;

/// File units by file name and by full path
#[derive(Debug, Default)]
pub struct UnitIndex {
    by_name: HashMap<String, NodeId>,
    by_path: HashMap<String, NodeId>,
}

impl UnitIndex {
    /// Register a unit; a later unit with the same file name replaces the earlier one
    pub fn insert(&mut self, name: &str, path: &str, id: NodeId) {
        self.by_name.insert(name.to_string(), id);
        self.by_path.insert(path.to_string(), id);
    }

    pub fn by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn by_path(&self, path: &str) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    /// Number of distinct file names
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// An extracted class and what later stages need to know about it
#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub id: NodeId,
    pub name: String,
    pub supers: Vec<String>,
    /// Methods in declaration order
    pub methods: Vec<(String, NodeId)>,
}

impl ClassInfo {
    /// First method with the given name
    pub fn method(&self, name: &str) -> Option<NodeId> {
        self.methods
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }
}

/// All extracted classes, with a by-name table where the last class wins
#[derive(Debug, Default)]
pub struct ClassTable {
    classes: Vec<ClassInfo>,
    by_name: HashMap<String, usize>,
}

impl ClassTable {
    pub fn insert(&mut self, info: ClassInfo) {
        self.by_name.insert(info.name.clone(), self.classes.len());
        self.classes.push(info);
    }

    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        self.by_name.get(name).map(|&i| &self.classes[i])
    }

    /// Every extracted class in extraction order
    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.iter()
    }

    /// Number of distinct class names
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// A declared-type mention awaiting resolution against the class table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingType {
    pub name: String,
    pub owner: NodeId,
}

/// Tallies reported at the end of a conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub units: usize,
    pub headers: usize,
    pub includes_resolved: usize,
    pub includes_unresolved: usize,
    pub classes: usize,
    pub methods: usize,
    pub attributes: usize,
    pub inheritances: usize,
    pub functions: usize,
    pub functions_deduplicated: usize,
    pub types_resolved: usize,
    pub types_unresolved: usize,
    pub invocations: usize,
    pub calls_unattributed: usize,
    pub anchors_unresolved: usize,
}

impl ConversionStats {
    /// Human-readable summary, one tally per line
    pub fn summary(&self) -> String {
        let lines = [
            format!("Found {} units ({} headers)", self.units, self.headers),
            format!("Resolved {} includes", self.includes_resolved),
            format!(
                "Could not resolve {} includes (probably external libs)",
                self.includes_unresolved
            ),
            format!(
                "Found {} classes ({} methods, {} attributes, {} inheritances)",
                self.classes, self.methods, self.attributes, self.inheritances
            ),
            format!(
                "Found {} non-class functions ({} duplicates merged)",
                self.functions, self.functions_deduplicated
            ),
            format!(
                "Resolved {} types ({} unresolved)",
                self.types_resolved, self.types_unresolved
            ),
            format!(
                "Found {} invocations ({} calls without sender)",
                self.invocations, self.calls_unattributed
            ),
        ];
        let mut out = lines.join("\n");
        if self.anchors_unresolved > 0 {
            out.push_str(&format!(
                "\nCould not resolve {} source anchors",
                self.anchors_unresolved
            ));
        }
        out
    }
}

/// State shared by all conversion stages
#[derive(Debug)]
pub struct ConversionContext {
    pub registry: Registry,
    pub package: NodeId,
    pub units: UnitIndex,
    pub classes: ClassTable,
    /// Free functions by normalized signature
    pub functions: HashMap<String, NodeId>,
    pub pending_types: Vec<PendingType>,
    pub stats: ConversionStats,
    pub options: ConversionConfig,
}

impl ConversionContext {
    /// Create a context holding only the package node
    pub fn new(package: &str, options: ConversionConfig) -> Result<Self> {
        let mut registry = Registry::new();
        let name = MseString::with_policy(package, options.strip_quotes)?;
        let package = registry.add(Entity::Package(Package { name }));
        Ok(Self {
            registry,
            package,
            units: UnitIndex::default(),
            classes: ClassTable::default(),
            functions: HashMap::new(),
            pending_types: Vec::new(),
            stats: ConversionStats::default(),
            options,
        })
    }

    /// Build an output string under the configured quote policy
    pub fn string(&self, s: impl Into<String>) -> Result<MseString> {
        MseString::with_policy(s, self.options.strip_quotes)
    }

    /// Record a declared-type mention for the resolution pass
    pub fn defer_type(&mut self, owner: NodeId, name: String) {
        self.pending_types.push(PendingType { name, owner });
    }

    fn finish(self) -> Model {
        Model {
            registry: self.registry,
            stats: self.stats,
        }
    }
}

/// Result of a conversion
#[derive(Debug)]
pub struct Model {
    pub registry: Registry,
    pub stats: ConversionStats,
}

/// Runs the conversion stages over a srcML document
pub struct Converter {
    config: Config,
}

impl Converter {
    /// Create a converter with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Convert srcML text
    pub fn convert_str(&self, text: &str) -> Result<Model> {
        let doc = parse_document(text)?;
        self.convert_document(&doc)
    }

    /// Convert a parsed srcML document
    pub fn convert_document(&self, doc: &Document) -> Result<Model> {
        let mut ctx = ConversionContext::new(
            &self.config.project.package,
            self.config.conversion.clone(),
        )?;
        let root = doc.root_element();

        units::index_units(&mut ctx, root)?;
        info!(
            units = ctx.stats.units,
            headers = ctx.stats.headers,
            "indexed units"
        );

        includes::resolve_includes(&mut ctx, root)?;
        info!(
            resolved = ctx.stats.includes_resolved,
            unresolved = ctx.stats.includes_unresolved,
            "resolved includes"
        );

        classes::extract_classes(&mut ctx, root)?;
        info!(classes = ctx.stats.classes, "extracted classes");

        inheritance::link_inheritance(&mut ctx);
        info!(inheritances = ctx.stats.inheritances, "linked inheritance");

        functions::extract_functions(&mut ctx, root)?;
        info!(functions = ctx.stats.functions, "extracted non-class functions");

        types::resolve_types(&mut ctx)?;
        info!(
            resolved = ctx.stats.types_resolved,
            unresolved = ctx.stats.types_unresolved,
            "resolved declared types"
        );

        calls::resolve_calls(&mut ctx, root)?;
        info!(
            invocations = ctx.stats.invocations,
            unattributed = ctx.stats.calls_unattributed,
            "resolved invocations"
        );

        Ok(ctx.finish())
    }
}
