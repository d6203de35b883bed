// Scope-stack traversal of a srcML tree
//
// A single depth-first walk keeps the stack of enclosing scopes
// (unit -> class -> function), so visitors can ask for their nearest unit,
// class or function without walking ancestors again.

use super::srcml::{is_interface_path, local_name, INTERFACE_LANGUAGE};
use crate::error::Result;
use roxmltree::Node;

/// Kind of an enclosing scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Unit,
    Class,
    Function,
    Constructor,
}

impl ScopeKind {
    /// Classify an element by its local name
    pub fn of(node: Node) -> Option<Self> {
        if !node.is_element() {
            return None;
        }
        match local_name(node) {
            "unit" => Some(ScopeKind::Unit),
            "class" | "class_decl" | "struct" | "struct_decl" => Some(ScopeKind::Class),
            "function" | "function_decl" => Some(ScopeKind::Function),
            "constructor" | "constructor_decl" => Some(ScopeKind::Constructor),
            _ => None,
        }
    }
}

/// An enclosing scope
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a, 'input> {
    pub kind: ScopeKind,
    pub node: Node<'a, 'input>,
}

/// Enclosing scopes of the node being visited, outermost first
#[derive(Debug, Default)]
pub struct ScopeStack<'a, 'input> {
    frames: Vec<Frame<'a, 'input>>,
}

impl<'a, 'input> ScopeStack<'a, 'input> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    fn push(&mut self, frame: Frame<'a, 'input>) {
        self.frames.push(frame);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Innermost scope of the given kind
    pub fn nearest(&self, kind: ScopeKind) -> Option<Node<'a, 'input>> {
        self.frames
            .iter()
            .rev()
            .find(|f| f.kind == kind)
            .map(|f| f.node)
    }

    /// Innermost unit that names a file
    pub fn unit(&self) -> Option<Node<'a, 'input>> {
        self.frames
            .iter()
            .rev()
            .filter(|f| f.kind == ScopeKind::Unit)
            .map(|f| f.node)
            .find(|n| n.has_attribute("filename"))
    }

    pub fn class(&self) -> Option<Node<'a, 'input>> {
        self.nearest(ScopeKind::Class)
    }

    pub fn function(&self) -> Option<Node<'a, 'input>> {
        self.nearest(ScopeKind::Function)
    }

    pub fn constructor(&self) -> Option<Node<'a, 'input>> {
        self.nearest(ScopeKind::Constructor)
    }

    pub fn in_class(&self) -> bool {
        self.class().is_some()
    }

    /// Language declared by the innermost scope carrying a `language` attribute
    pub fn language(&self) -> Option<&'a str> {
        self.frames
            .iter()
            .rev()
            .find_map(|f| f.node.attribute("language"))
    }

    /// Declared language, except that interface-generator files are always SWIG
    pub fn effective_language(&self) -> Option<&'a str> {
        let path = self.unit().and_then(|u| u.attribute("filename"));
        if path.is_some_and(is_interface_path) {
            Some(INTERFACE_LANGUAGE)
        } else {
            self.language()
        }
    }
}

/// Visit every element below `root` together with its enclosing scopes.
///
/// The stack passed to `visit` holds the ancestors of the visited node, not
/// the node itself.
pub fn walk<'a, 'input, F>(root: Node<'a, 'input>, mut visit: F) -> Result<()>
where
    F: FnMut(Node<'a, 'input>, &ScopeStack<'a, 'input>) -> Result<()>,
{
    let mut stack = ScopeStack::new();
    walk_node(root, &mut stack, &mut visit)
}

fn walk_node<'a, 'input, F>(
    node: Node<'a, 'input>,
    stack: &mut ScopeStack<'a, 'input>,
    visit: &mut F,
) -> Result<()>
where
    F: FnMut(Node<'a, 'input>, &ScopeStack<'a, 'input>) -> Result<()>,
{
    visit(node, stack)?;

    let kind = ScopeKind::of(node);
    if let Some(kind) = kind {
        stack.push(Frame { kind, node });
    }
    for child in node.children().filter(|c| c.is_element()) {
        walk_node(child, stack, visit)?;
    }
    if kind.is_some() {
        stack.pop();
    }
    Ok(())
}
