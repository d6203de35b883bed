// srcML fact base access
//
// The fact base is a srcML archive: a root `unit` holding one `unit` per
// source file, each tagged with `filename` and `language`. Structure lives
// in the src namespace, preprocessor constructs in the cpp namespace.

use crate::error::Result;
use roxmltree::{Document, Node, ParsingOptions};
use std::path::Path;

/// Namespace of generic source structure
pub const SRC_NS: &str = "http://www.srcML.org/srcML/src";
/// Namespace of preprocessor constructs
pub const CPP_NS: &str = "http://www.srcML.org/srcML/cpp";
/// Namespace of position attributes (`--position`)
pub const POS_NS: &str = "http://www.srcML.org/srcML/position";

/// Language tag forced onto interface-generator files
pub const INTERFACE_LANGUAGE: &str = "SWIG";
/// Extension of interface-generator files
pub const INTERFACE_EXTENSION: &str = "i";
/// Extensions classified as headers
pub const HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "hh", "hxx", "h++", INTERFACE_EXTENSION];
/// Languages whose classes, functions and calls are modeled
pub const MODELED_LANGUAGES: &[&str] = &["C", "C++"];

/// Parse a srcML document
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// Local (namespace-free) element name
pub fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check whether `node` is an element with the given local name
pub fn is_element(node: Node, name: &str) -> bool {
    node.is_element() && local_name(node) == name
}

/// First child element with the given local name
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| is_element(*c, name))
}

/// All child elements with the given local name
pub fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| is_element(*c, name))
}

/// All child elements
pub fn element_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(|c| c.is_element())
}

/// Full text content of an element, like XPath `string()`
pub fn text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Text content with `comment` and `init` subtrees removed
pub fn flattened_text(node: Node) -> String {
    let mut out = String::new();
    push_flattened(node, &mut out);
    out
}

fn push_flattened(node: Node, out: &mut String) {
    for c in node.children() {
        if c.is_text() {
            if let Some(t) = c.text() {
                out.push_str(t);
            }
        } else if c.is_element() {
            match local_name(c) {
                "comment" | "init" => {}
                _ => push_flattened(c, out),
            }
        }
    }
}

/// Collapse runs of whitespace into single spaces and trim
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check whether an element is a preprocessor construct with the given name
pub fn is_cpp_element(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace() == Some(CPP_NS) && local_name(node) == name
}

/// Line number from a `pos:start`/`pos:end` attribute (`"line:column"`)
pub fn position_line(node: Node, which: &str) -> Option<i64> {
    node.attribute((POS_NS, which))
        .and_then(|v| v.split(':').next())
        .and_then(|l| l.trim().parse().ok())
}

/// File name component of a srcML `filename` attribute
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of a path without the dot
pub fn extension(path: &str) -> Option<&str> {
    Path::new(file_name(path)).extension().and_then(|e| e.to_str())
}

pub fn is_header_path(path: &str) -> bool {
    extension(path).is_some_and(|e| HEADER_EXTENSIONS.contains(&e))
}

pub fn is_interface_path(path: &str) -> bool {
    extension(path) == Some(INTERFACE_EXTENSION)
}

pub fn is_modeled_language(language: Option<&str>) -> bool {
    language.is_some_and(|l| MODELED_LANGUAGES.contains(&l))
}
