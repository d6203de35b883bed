// Declared types
//
// Type mentions are recorded while extracting, before all classes are known.
// Once extraction is complete each mention is matched by exact name against
// the class table. A miss leaves the owner without a declared type.

use super::ConversionContext;
use crate::error::Result;
use crate::parser::srcml::{child, children, collapse_whitespace, text};
use roxmltree::Node;
use tracing::debug;

/// Effective type name of a `type` element.
///
/// Uses the type's `name`; a qualified name whose first component is one of
/// `markers` (e.g. `SP::Solver`) is reduced to its last component.
pub fn declared_type_name(type_elem: Node, markers: &[String]) -> Option<String> {
    let name = child(type_elem, "name")?;
    let parts: Vec<Node> = children(name, "name").collect();
    let raw = match parts.as_slice() {
        [first, .., last] if markers.iter().any(|m| *m == text(*first)) => text(*last),
        _ => text(name),
    };
    let name = collapse_whitespace(&raw);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Bind every pending type mention that names a known class
pub fn resolve_types(ctx: &mut ConversionContext) -> Result<()> {
    let pending = std::mem::take(&mut ctx.pending_types);
    for mention in pending {
        match ctx.classes.get(&mention.name).map(|c| c.id) {
            Some(class) => {
                if ctx.registry.bind_declared_type(mention.owner, class)? {
                    ctx.stats.types_resolved += 1;
                }
            }
            None => {
                debug!(name = %mention.name, owner = %mention.owner, "unresolved type");
                ctx.stats.types_unresolved += 1;
            }
        }
    }
    Ok(())
}
