// Include resolution
//
// Two dialects:
// - preprocessor `#include` directives (`cpp:include/cpp:file`)
// - interface-generator `%include "file"`, which srcML does not tag; it is
//   recognized from three adjacent tokens: `%`, `include`, a string literal.
//
// An Include edge is only created when both ends are known units.

use super::units::{unit_elements, UnitElement};
use super::ConversionContext;
use crate::error::Result;
use crate::model::{Entity, Include};
use crate::parser::srcml::{
    children, is_cpp_element, is_element, text, INTERFACE_LANGUAGE, MODELED_LANGUAGES,
};
use roxmltree::Node;
use tracing::debug;

/// Resolve includes of every unit
pub fn resolve_includes(ctx: &mut ConversionContext, root: Node) -> Result<()> {
    for unit in unit_elements(root) {
        for target in include_targets(&unit) {
            link(ctx, unit.name(), target.as_deref());
        }
    }
    Ok(())
}

/// Referenced file names of a unit; `None` marks a reference whose name could not be read
pub fn include_targets(unit: &UnitElement) -> Vec<Option<String>> {
    let mut targets = Vec::new();
    if unit.language == INTERFACE_LANGUAGE {
        targets.extend(interface_includes(unit.node));
    }
    if unit.language == INTERFACE_LANGUAGE || MODELED_LANGUAGES.contains(&unit.language) {
        targets.extend(preprocessor_includes(unit.node).into_iter().map(Some));
    }
    targets
}

/// File tokens of `#include` directives, without `<>` or `"` delimiters
pub fn preprocessor_includes(unit: Node) -> Vec<String> {
    unit.descendants()
        .filter(|n| is_cpp_element(*n, "include"))
        .flat_map(|inc| children(inc, "file").collect::<Vec<_>>())
        .map(|file| text(file).replace(['<', '>', '"'], ""))
        .collect()
}

/// File names of `%include "file"` macro calls
pub fn interface_includes(unit: Node) -> Vec<Option<String>> {
    unit.descendants()
        .filter(|n| is_element(*n, "literal"))
        .filter(|lit| is_include_macro(*lit))
        .map(|lit| quoted_file_name(&text(lit)))
        .collect()
}

/// The literal is preceded by `include`, which is preceded by `%`
fn is_include_macro(literal: Node) -> bool {
    let Some(keyword) = literal.prev_sibling_element() else {
        return false;
    };
    let Some(percent) = keyword.prev_sibling_element() else {
        return false;
    };
    text(keyword) == "include" && text(percent) == "%"
}

/// `"file.h"` or a bare `file.h`
fn quoted_file_name(literal: &str) -> Option<String> {
    let parts: Vec<&str> = literal.split('"').collect();
    match parts.as_slice() {
        [_, name, _] => Some((*name).to_string()),
        [bare] => Some((*bare).to_string()),
        _ => None,
    }
}

fn link(ctx: &mut ConversionContext, including: &str, included: Option<&str>) {
    let source = ctx.units.by_name(including);
    let target = included.and_then(|name| ctx.units.by_name(name));
    match (source, target) {
        (Some(source), Some(target)) if source != target => {
            ctx.registry.add(Entity::Include(Include { source, target }));
            ctx.stats.includes_resolved += 1;
        }
        _ => {
            debug!(from = including, to = ?included, "unresolved include");
            ctx.stats.includes_unresolved += 1;
        }
    }
}
