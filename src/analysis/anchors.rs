// Source anchors
//
// Binds an entity to the unit it was found in. A unit path missing from the
// index is logged and the entity stays without a location.

use super::ConversionContext;
use crate::error::Result;
use crate::model::{Entity, FileAnchor, NodeId};
use crate::parser::srcml::position_line;
use crate::parser::ScopeStack;
use roxmltree::Node;
use tracing::warn;

/// Anchor `owner` (built from `element`) to its enclosing unit
pub fn anchor_to_unit(
    ctx: &mut ConversionContext,
    owner: NodeId,
    element: Node,
    scopes: &ScopeStack,
) -> Result<Option<NodeId>> {
    let Some(path) = scopes.unit().and_then(|u| u.attribute("filename")) else {
        return Ok(None);
    };
    let Some(unit) = ctx.units.by_path(path) else {
        warn!(path, entity = %owner, "could not resolve source anchor");
        ctx.stats.anchors_unresolved += 1;
        return Ok(None);
    };
    let Some(file_name) = ctx
        .registry
        .entity(unit)
        .and_then(Entity::as_unit)
        .map(|u| u.file_name.clone())
    else {
        return Ok(None);
    };

    let (start_line, end_line) = if ctx.options.source_lines {
        (position_line(element, "start"), position_line(element, "end"))
    } else {
        (None, None)
    };
    let anchor = ctx.registry.add(Entity::FileAnchor(FileAnchor {
        element: owner,
        unit,
        file_name,
        start_line,
        end_line,
    }));
    ctx.registry.attach_anchor(owner, anchor)?;
    Ok(Some(anchor))
}
