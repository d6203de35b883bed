// MSE serializer
//
// Writes the registry in creation order as one parenthesized model:
//
//   (
//   	(FAMIX.Class (id: 4)
//   		(name 'Solver')
//   		(belongsToPackage (ref: 0)))
//   )
//
// Strings were validated when the entities were built, so writing can only
// fail on I/O.

use crate::error::{Error, Result};
use crate::model::{Entity, MseValue, Node, NodeId, Registry};
use std::io::Write;

/// Attribute list of a node, in output order
pub fn attributes(node: &Node) -> Vec<(&'static str, MseValue)> {
    let mut attrs = match &node.entity {
        Entity::Package(p) => vec![("name", p.name.clone().into())],
        Entity::CompilationUnit(u) | Entity::Header(u) => vec![
            ("filepath", u.file_path.clone().into()),
            ("name", u.file_name.clone().into()),
            ("language", u.language.clone().into()),
        ],
        Entity::Include(i) => vec![
            ("source", MseValue::Ref(i.source)),
            ("target", MseValue::Ref(i.target)),
        ],
        Entity::FileAnchor(a) => {
            let mut attrs = vec![
                ("element", MseValue::Ref(a.element)),
                ("unit", MseValue::Ref(a.unit)),
                ("fileName", a.file_name.clone().into()),
            ];
            if let Some(line) = a.start_line {
                attrs.push(("startLine", MseValue::Int(line)));
            }
            if let Some(line) = a.end_line {
                attrs.push(("endLine", MseValue::Int(line)));
            }
            attrs
        }
        Entity::Class(c) => vec![
            ("name", c.name.clone().into()),
            ("belongsToPackage", MseValue::Ref(c.package)),
        ],
        Entity::Inheritance(i) => vec![
            ("subclass", MseValue::Ref(i.subclass)),
            ("superclass", MseValue::Ref(i.superclass)),
        ],
        Entity::Method(m) => {
            let mut attrs = vec![
                ("name", m.name.clone().into()),
                ("signature", m.signature.clone().into()),
                ("parentType", MseValue::Ref(m.parent)),
            ];
            push_declared_type(&mut attrs, m.declared_type);
            attrs
        }
        Entity::Attribute(a) => {
            let mut attrs = vec![
                ("name", a.name.clone().into()),
                ("parentType", MseValue::Ref(a.parent)),
            ];
            push_declared_type(&mut attrs, a.declared_type);
            attrs
        }
        Entity::Function(f) => {
            let mut attrs = vec![
                ("name", f.name.clone().into()),
                ("signature", f.signature.clone().into()),
            ];
            push_declared_type(&mut attrs, f.declared_type);
            attrs
        }
        Entity::Invocation(i) => vec![
            ("signature", i.signature.clone().into()),
            ("sender", MseValue::Ref(i.sender)),
        ],
    };
    if let Some(anchor) = node.source_anchor {
        attrs.push(("sourceAnchor", MseValue::Ref(anchor)));
    }
    attrs
}

fn push_declared_type(attrs: &mut Vec<(&'static str, MseValue)>, ty: Option<NodeId>) {
    if let Some(ty) = ty {
        attrs.push(("declaredType", MseValue::Ref(ty)));
    }
}

/// Streams a registry as MSE text
pub struct MseWriter<W: Write> {
    out: W,
}

impl<W: Write> MseWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the whole model
    pub fn write_model(&mut self, registry: &Registry) -> Result<()> {
        writeln!(self.out, "(")?;
        for node in registry.iter() {
            self.write_node(node)?;
            writeln!(self.out)?;
        }
        writeln!(self.out, ")")?;
        self.out.flush()?;
        Ok(())
    }

    fn write_node(&mut self, node: &Node) -> Result<()> {
        write!(
            self.out,
            "\t({} {}",
            node.entity.type_tag(),
            MseValue::Id(node.id)
        )?;
        for (name, value) in attributes(node) {
            write!(self.out, "\n\t\t({} {})", name, value)?;
        }
        write!(self.out, ")")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render a registry to a string
pub fn render(registry: &Registry) -> Result<String> {
    let mut writer = MseWriter::new(Vec::new());
    writer.write_model(registry)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::other(format!("non UTF-8 output: {}", e)))
}
