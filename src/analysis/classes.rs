// Class and member extraction
//
// Only classes whose enclosing unit is C or C++ are modeled. A class owns
// the members found in its body up to, but not into, nested classes and
// function bodies.

use super::anchors::anchor_to_unit;
use super::types::declared_type_name;
use super::{make_signature, ClassInfo, ConversionContext};
use crate::error::Result;
use crate::model::{Attribute, Class, Entity, Method, NodeId};
use crate::parser::srcml::{
    child, children, collapse_whitespace, element_children, is_modeled_language, local_name,
    text,
};
use crate::parser::{walk, ScopeKind};
use roxmltree::Node;
use tracing::debug;

/// Element names that define a class body
const CLASS_ELEMENTS: &[&str] = &["class", "struct"];

/// Bodies that are not scopes but whose declarations are locals
const OPAQUE_BODIES: &[&str] = &["destructor", "destructor_decl"];

/// Extract every modeled class with its methods and attributes
pub fn extract_classes(ctx: &mut ConversionContext, root: Node) -> Result<()> {
    walk(root, |node, scopes| {
        if !node.is_element() || !CLASS_ELEMENTS.contains(&local_name(node)) {
            return Ok(());
        }
        if !is_modeled_language(scopes.effective_language()) {
            return Ok(());
        }
        let Some(name) = child(node, "name").map(|n| collapse_whitespace(&text(n))) else {
            debug!("skipping anonymous class");
            return Ok(());
        };

        let supers = base_class_names(node);
        let class = Class {
            name: ctx.string(name.as_str())?,
            package: ctx.package,
            supers: supers.clone(),
        };
        let id = ctx.registry.add(Entity::Class(class));
        anchor_to_unit(ctx, id, node, scopes)?;

        let members = class_members(node);
        let mut methods = Vec::new();
        for m in members.iter().filter(|m| ScopeKind::of(**m) == Some(ScopeKind::Function)) {
            if let Some(method) = add_method(ctx, id, *m)? {
                methods.push(method);
            }
        }
        for stmt in members.iter().filter(|m| local_name(**m) == "decl_stmt") {
            for decl in children(*stmt, "decl") {
                add_attribute(ctx, id, decl)?;
            }
        }

        ctx.stats.classes += 1;
        ctx.classes.insert(ClassInfo {
            id,
            name,
            supers,
            methods,
        });
        Ok(())
    })
}

/// Names in `super` clauses, directly under the class or under `super_list`
pub fn base_class_names(class: Node) -> Vec<String> {
    let direct = children(class, "super");
    let listed = children(class, "super_list").flat_map(|l| children(l, "super"));
    direct
        .chain(listed)
        .flat_map(|s| children(s, "name"))
        .map(|n| collapse_whitespace(&text(n)))
        .collect()
}

/// Member declarations of a class body: functions and declaration statements
pub fn class_members<'a, 'input>(class: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    let mut members = Vec::new();
    collect_members(class, &mut members);
    members
}

fn collect_members<'a, 'input>(node: Node<'a, 'input>, out: &mut Vec<Node<'a, 'input>>) {
    for c in element_children(node) {
        match ScopeKind::of(c) {
            Some(ScopeKind::Function) => out.push(c),
            Some(_) => {}
            None if local_name(c) == "decl_stmt" => out.push(c),
            None if OPAQUE_BODIES.contains(&local_name(c)) => {}
            None => collect_members(c, out),
        }
    }
}

fn add_method(
    ctx: &mut ConversionContext,
    class: NodeId,
    function: Node,
) -> Result<Option<(String, NodeId)>> {
    let (Some(name), Some(params)) = (child(function, "name"), child(function, "parameter_list"))
    else {
        debug!(class = %class, "skipping member function without name or parameters");
        return Ok(None);
    };
    let ty = child(function, "type");
    let signature = make_signature(name, params, ty, ctx.options.strip_quotes)?;
    let method_name = collapse_whitespace(&text(name));

    let method = Method {
        name: ctx.string(method_name.as_str())?,
        signature,
        parent: class,
        declared_type: None,
    };
    let id = ctx.registry.add(Entity::Method(method));
    if let Some(type_name) = ty.and_then(|t| declared_type_name(t, &ctx.options.type_prefix_markers))
    {
        ctx.defer_type(id, type_name);
    }
    ctx.stats.methods += 1;
    Ok(Some((method_name, id)))
}

fn add_attribute(ctx: &mut ConversionContext, class: NodeId, decl: Node) -> Result<()> {
    let Some(name) = child(decl, "name") else {
        return Ok(());
    };
    let type_name = name
        .prev_sibling_element()
        .filter(|p| local_name(*p) == "type")
        .and_then(|t| declared_type_name(t, &ctx.options.type_prefix_markers));

    let attribute = Attribute {
        name: ctx.string(collapse_whitespace(&text(name)))?,
        parent: class,
        declared_type: None,
    };
    let id = ctx.registry.add(Entity::Attribute(attribute));
    if let Some(type_name) = type_name {
        ctx.defer_type(id, type_name);
    }
    ctx.stats.attributes += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::units::index_units;
    use crate::config::ConversionConfig;
    use crate::error::Error;
    use crate::model::FileAnchor;
    use crate::parser::parse_document;

    fn extract_with(body: &str, options: ConversionConfig) -> Result<ConversionContext> {
        let xml = format!(
            r#"<unit xmlns="http://www.srcML.org/srcML/src" xmlns:pos="http://www.srcML.org/srcML/position">{}</unit>"#,
            body
        );
        let doc = parse_document(&xml).unwrap();
        let mut ctx = ConversionContext::new("P", options)?;
        index_units(&mut ctx, doc.root_element())?;
        extract_classes(&mut ctx, doc.root_element())?;
        Ok(ctx)
    }

    fn extract(body: &str) -> ConversionContext {
        extract_with(body, ConversionConfig::default()).unwrap()
    }

    fn names_of(ctx: &ConversionContext, tag: &str) -> Vec<String> {
        ctx.registry
            .iter()
            .filter(|n| n.entity.type_tag() == tag)
            .filter_map(|n| n.entity.name().map(str::to_string))
            .collect()
    }

    const SOLVER: &str = r#"<unit language="C++" filename="solver.h"><class pos:start="2:1" pos:end="9:2">class <name>Solver</name> <super_list>: <super><specifier>public</specifier> <name>Base</name></super>, <super><specifier>public</specifier> <name>Named</name></super></super_list> <block>{<private type="default">
<decl_stmt><decl><type><name>int</name></type> <name>iterations</name></decl>;</decl_stmt>
<decl_stmt><decl><type><name><name>SP</name><operator>::</operator><name>Matrix</name></name></type> <name>jacobian</name></decl>;</decl_stmt>
</private><public>
<function_decl><type><specifier>virtual</specifier> <name>void</name></type> <name>solve</name><parameter_list>(<parameter><decl><type><name>double</name></type> <name>tol</name></decl></parameter>)</parameter_list>;</function_decl>
<function><type><name>int</name></type> <name>count</name><parameter_list>()</parameter_list> <block>{ <decl_stmt><decl><type><name>int</name></type> <name>local</name></decl>;</decl_stmt> <return>return <expr><name>iterations</name></expr>;</return> }</block></function>
<constructor><name>Solver</name><parameter_list>()</parameter_list> <block>{}</block></constructor>
</public>}</block>;</class></unit>"#;

    #[test]
    fn test_class_with_members() {
        let ctx = extract(SOLVER);
        assert_eq!(names_of(&ctx, "FAMIX.Class"), vec!["Solver"]);
        assert_eq!(names_of(&ctx, "FAMIX.Method"), vec!["solve", "count"]);
        assert_eq!(names_of(&ctx, "FAMIX.Attribute"), vec!["iterations", "jacobian"]);

        let info = ctx.classes.get("Solver").unwrap();
        assert_eq!(info.supers, vec!["Base", "Named"]);
        assert!(info.method("solve").is_some());
        assert!(info.method("Solver").is_none());
    }

    #[test]
    fn test_method_signature_and_type_mentions() {
        let ctx = extract(SOLVER);
        let solve = ctx.classes.get("Solver").unwrap().method("solve").unwrap();
        match ctx.registry.entity(solve).unwrap() {
            Entity::Method(m) => {
                assert_eq!(m.signature, "virtual void solve(double tol)");
                assert_eq!(m.parent, ctx.classes.get("Solver").unwrap().id);
            }
            other => panic!("Expected method, got {:?}", other),
        }

        let mentions: Vec<&str> = ctx.pending_types.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(mentions, vec!["void", "int", "int", "Matrix"]);
    }

    #[test]
    fn test_class_anchor_with_lines() {
        let ctx = extract(SOLVER);
        let class = ctx.classes.get("Solver").unwrap().id;
        let anchor = ctx.registry.get(class).unwrap().source_anchor.unwrap();
        match ctx.registry.entity(anchor).unwrap() {
            Entity::FileAnchor(a) => {
                assert_eq!(a.element, class);
                assert_eq!(a.file_name, "solver.h");
                assert_eq!(a.start_line, Some(2));
                assert_eq!(a.end_line, Some(9));
            }
            other => panic!("Expected anchor, got {:?}", other),
        }
    }

    #[test]
    fn test_source_lines_disabled() {
        let options = ConversionConfig {
            source_lines: false,
            ..ConversionConfig::default()
        };
        let ctx = extract_with(SOLVER, options).unwrap();
        let class = ctx.classes.get("Solver").unwrap().id;
        let anchor = ctx.registry.get(class).unwrap().source_anchor.unwrap();
        assert!(matches!(
            ctx.registry.entity(anchor),
            Some(Entity::FileAnchor(FileAnchor { start_line: None, end_line: None, .. }))
        ));
    }

    #[test]
    fn test_old_style_super() {
        let ctx = extract(
            r#"<unit language="C++" filename="d.h"><class>class <name>D</name> <super>: <specifier>public</specifier> <name>B</name></super> <block>{}</block>;</class></unit>"#,
        );
        assert_eq!(ctx.classes.get("D").unwrap().supers, vec!["B"]);
    }

    #[test]
    fn test_destructor_locals_are_not_attributes() {
        let ctx = extract(
            r#"<unit language="C++" filename="a.h"><class>class <name>A</name> <block>{<private type="default">
<decl_stmt><decl><type><name>int</name></type> <name>field</name></decl>;</decl_stmt>
<destructor><name>~A</name><parameter_list>()</parameter_list> <block>{<block_content> <decl_stmt><decl><type><name>int</name></type> <name>tmp</name></decl>;</decl_stmt> </block_content>}</block></destructor>
</private>}</block>;</class></unit>"#,
        );
        assert_eq!(names_of(&ctx, "FAMIX.Attribute"), vec!["field"]);
        assert_eq!(ctx.stats.attributes, 1);
        assert!(names_of(&ctx, "FAMIX.Method").is_empty());
    }

    #[test]
    fn test_nested_class_owns_its_members() {
        let ctx = extract(
            r#"<unit language="C++" filename="o.h"><class>class <name>Outer</name> <block>{<public>
<class>class <name>Inner</name> <block>{<public><function_decl><type><name>void</name></type> <name>deep</name><parameter_list>()</parameter_list>;</function_decl></public>}</block>;</class>
<function_decl><type><name>void</name></type> <name>shallow</name><parameter_list>()</parameter_list>;</function_decl>
</public>}</block>;</class></unit>"#,
        );
        assert_eq!(names_of(&ctx, "FAMIX.Class"), vec!["Outer", "Inner"]);
        assert!(ctx.classes.get("Outer").unwrap().method("deep").is_none());
        assert!(ctx.classes.get("Outer").unwrap().method("shallow").is_some());
        assert!(ctx.classes.get("Inner").unwrap().method("deep").is_some());
    }

    #[test]
    fn test_struct_is_a_class() {
        let ctx = extract(
            r#"<unit language="C" filename="p.h"><struct>struct <name>Point</name> <block>{<public type="default"><decl_stmt><decl><type><name>double</name></type> <name>x</name></decl>, <decl><type ref="prev"/><name>y</name></decl>;</decl_stmt></public>}</block>;</struct></unit>"#,
        );
        assert_eq!(names_of(&ctx, "FAMIX.Class"), vec!["Point"]);
        assert_eq!(names_of(&ctx, "FAMIX.Attribute"), vec!["x", "y"]);
        assert_eq!(ctx.pending_types.len(), 1);
    }

    #[test]
    fn test_anonymous_class_skipped() {
        let ctx = extract(
            r#"<unit language="C++" filename="a.h"><class>class <block>{}</block>;</class></unit>"#,
        );
        assert_eq!(ctx.stats.classes, 0);
        assert_eq!(ctx.registry.count_tagged("FAMIX.Class"), 0);
    }

    #[test]
    fn test_non_modeled_languages_skipped() {
        let ctx = extract(
            r#"<unit language="Java" filename="A.java"><class>class <name>A</name> <block>{}</block></class></unit>
<unit language="C++" filename="wrap.i"><class>class <name>Wrapped</name> <block>{}</block>;</class></unit>"#,
        );
        assert_eq!(ctx.stats.classes, 0);
    }

    #[test]
    fn test_quote_in_class_name_is_fatal() {
        let result = extract_with(
            r#"<unit language="C++" filename="q.h"><class>class <name>Bad'Name</name> <block>{}</block>;</class></unit>"#,
            ConversionConfig::default(),
        );
        assert!(matches!(result, Err(Error::InvalidStringContent { .. })));
    }

    #[test]
    fn test_quote_in_method_signature_is_fatal() {
        let result = extract_with(
            r#"<unit language="C++" filename="q.h"><class>class <name>Q</name> <block>{<public><function_decl><type><name>void</name></type> <name>f</name><parameter_list>(<parameter><decl><type><name>x'</name></type></decl></parameter>)</parameter_list>;</function_decl></public>}</block>;</class></unit>"#,
            ConversionConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_strip_quotes_option() {
        let options = ConversionConfig {
            strip_quotes: true,
            ..ConversionConfig::default()
        };
        let ctx = extract_with(
            r#"<unit language="C++" filename="q.h"><class>class <name>Bad'Name</name> <block>{}</block>;</class></unit>"#,
            options,
        )
        .unwrap();
        assert_eq!(names_of(&ctx, "FAMIX.Class"), vec!["BadName"]);
    }
}
