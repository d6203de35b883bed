// Normalized signatures
//
// `{return type} {name}{parameter list}` built from flattened element text
// (comments and initializers dropped), whitespace collapsed. Signatures key
// function deduplication and sender lookup.

use crate::error::Result;
use crate::model::MseString;
use crate::parser::srcml::{collapse_whitespace, flattened_text};
use roxmltree::Node;

/// Build the signature of a function or method.
///
/// With `strip` the delimiter is removed, otherwise it is an error.
pub fn make_signature(
    name: Node,
    params: Node,
    return_type: Option<Node>,
    strip: bool,
) -> Result<MseString> {
    let head = return_type.map(flattened_text).unwrap_or_default();
    let raw = format!("{} {}{}", head, flattened_text(name), flattened_text(params));
    MseString::with_policy(collapse_whitespace(&raw), strip)
}
