// Free function extraction
//
// Function definitions outside any class, deduplicated by signature. Some
// shapes cannot be signed reliably and are skipped: template placeholders
// (names starting with the template sigil), out-of-line `A::b` definitions
// and functions without a parameter list.

use super::anchors::anchor_to_unit;
use super::types::declared_type_name;
use super::{make_signature, ConversionContext};
use crate::error::Result;
use crate::model::{Entity, Function};
use crate::parser::srcml::{
    child, collapse_whitespace, element_children, is_element, local_name, text,
};
use crate::parser::walk;
use roxmltree::Node;
use tracing::debug;

/// Extract non-member functions
pub fn extract_functions(ctx: &mut ConversionContext, root: Node) -> Result<()> {
    walk(root, |node, scopes| {
        if !is_element(node, "function") || scopes.in_class() {
            return Ok(());
        }
        let Some(name) = child(node, "name") else {
            return Ok(());
        };
        let name_text = collapse_whitespace(&text(name));
        if name_text.is_empty() || name_text.starts_with(ctx.options.template_sigil) {
            debug!(name = %name_text, "skipping template placeholder");
            return Ok(());
        }
        if qualified_parts(name).is_some() {
            debug!(name = %name_text, "skipping out-of-line member definition");
            return Ok(());
        }
        let Some(params) = child(node, "parameter_list") else {
            return Ok(());
        };

        let ty = child(node, "type");
        let signature = make_signature(name, params, ty, true)?;
        if ctx.functions.contains_key(signature.as_str()) {
            ctx.stats.functions_deduplicated += 1;
            return Ok(());
        }

        let key = signature.as_str().to_string();
        let function = Function {
            name: ctx.string(name_text)?,
            signature,
            declared_type: None,
        };
        let id = ctx.registry.add(Entity::Function(function));
        ctx.functions.insert(key, id);
        anchor_to_unit(ctx, id, node, scopes)?;
        if let Some(type_name) =
            ty.and_then(|t| declared_type_name(t, &ctx.options.type_prefix_markers))
        {
            ctx.defer_type(id, type_name);
        }
        ctx.stats.functions += 1;
        Ok(())
    })
}

/// `(class, member)` of a three-part `Class :: member` name
pub fn qualified_parts(name: Node) -> Option<(String, String)> {
    let parts: Vec<Node> = element_children(name).collect();
    match parts.as_slice() {
        [class, op, member] if local_name(*op) == "operator" && text(*op) == "::" => {
            Some((collapse_whitespace(&text(*class)), collapse_whitespace(&text(*member))))
        }
        _ => None,
    }
}
