// Invocation attribution
//
// Each call expression is attributed to the method or free function whose
// body contains it. Calls in constructors, in interface files and in bodies
// that cannot be signed are counted but produce no invocation.

use super::functions::qualified_parts;
use super::{make_signature, ConversionContext};
use crate::error::Result;
use crate::model::{Entity, Invocation, MseString, NodeId};
use crate::parser::srcml::{
    child, collapse_whitespace, is_element, is_interface_path, is_modeled_language, text,
};
use crate::parser::{walk, ScopeStack};
use roxmltree::Node;
use tracing::debug;

/// Create an Invocation for every call whose sender can be identified
pub fn resolve_calls(ctx: &mut ConversionContext, root: Node) -> Result<()> {
    walk(root, |node, scopes| {
        if !is_element(node, "call") {
            return Ok(());
        }
        let Some(path) = scopes.unit().and_then(|u| u.attribute("filename")) else {
            return Ok(());
        };
        if is_interface_path(path) {
            return Ok(());
        }

        let call_text = collapse_whitespace(&text(node));
        let Some(sender) = sender_of(ctx, scopes)? else {
            debug!(call = %call_text, "call without sender");
            ctx.stats.calls_unattributed += 1;
            return Ok(());
        };

        let invocation = Invocation {
            signature: MseString::stripped(&call_text),
            sender,
        };
        ctx.registry.add(Entity::Invocation(invocation));
        ctx.stats.invocations += 1;
        Ok(())
    })
}

/// Method or function whose body encloses the current node
fn sender_of(ctx: &ConversionContext, scopes: &ScopeStack) -> Result<Option<NodeId>> {
    if let Some(class) = scopes.class() {
        let Some(info) = child(class, "name")
            .map(|n| collapse_whitespace(&text(n)))
            .and_then(|name| ctx.classes.get(&name))
        else {
            return Ok(None);
        };
        if scopes.constructor().is_some() {
            return Ok(None);
        }
        return Ok(scopes
            .function()
            .and_then(|f| child(f, "name"))
            .and_then(|n| info.method(&collapse_whitespace(&text(n)))));
    }

    let Some(function) = scopes.function() else {
        return Ok(None);
    };
    if !is_modeled_language(scopes.effective_language()) {
        return Ok(None);
    }
    let Some(name) = child(function, "name") else {
        return Ok(None);
    };
    if text(name).starts_with(ctx.options.template_sigil) {
        return Ok(None);
    }

    if let Some(params) = child(function, "parameter_list") {
        let signature = make_signature(name, params, child(function, "type"), true)?;
        if let Some(&id) = ctx.functions.get(signature.as_str()) {
            return Ok(Some(id));
        }
    }
    Ok(qualified_parts(name).and_then(|(class, member)| ctx.classes.get(&class)?.method(&member)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classes::extract_classes;
    use crate::analysis::functions::extract_functions;
    use crate::analysis::units::index_units;
    use crate::config::ConversionConfig;
    use crate::parser::parse_document;

    fn resolve(xml: &str) -> ConversionContext {
        let doc = parse_document(xml).unwrap();
        let root = doc.root_element();
        let mut ctx = ConversionContext::new("P", ConversionConfig::default()).unwrap();
        index_units(&mut ctx, root).unwrap();
        extract_classes(&mut ctx, root).unwrap();
        extract_functions(&mut ctx, root).unwrap();
        resolve_calls(&mut ctx, root).unwrap();
        ctx
    }

    fn unit(filename: &str, body: &str) -> String {
        format!(
            r#"<unit xmlns="http://www.srcML.org/srcML/src"><unit language="C++" filename="{}">{}</unit></unit>"#,
            filename, body
        )
    }

    fn invocations(ctx: &ConversionContext) -> Vec<(String, NodeId)> {
        ctx.registry
            .iter()
            .filter_map(|n| match &n.entity {
                Entity::Invocation(i) => Some((i.signature.as_str().to_string(), i.sender)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_call_in_free_function() {
        let ctx = resolve(&unit(
            "main.cpp",
            r#"<function><type><name>int</name></type> <name>main</name><parameter_list>()</parameter_list> <block>{ <expr_stmt><expr><call><name><name>d</name><operator>.</operator><name>f</name></name><argument_list>()</argument_list></call></expr>;</expr_stmt> }</block></function>"#,
        ));
        let main = ctx.functions["int main()"];
        assert_eq!(invocations(&ctx), vec![("d.f()".to_string(), main)]);
        assert_eq!(ctx.stats.invocations, 1);
    }

    #[test]
    fn test_call_in_inline_method() {
        let ctx = resolve(&unit(
            "solver.h",
            r#"<class>class <name>Solver</name> <block>{<public><function><type><name>void</name></type> <name>run</name><parameter_list>()</parameter_list> <block>{ <expr_stmt><expr><call><name>step</name><argument_list>( <argument><expr><literal type="char">'x'</literal></expr></argument> )</argument_list></call></expr>;</expr_stmt> }</block></function></public>}</block>;</class>"#,
        ));
        let run = ctx.classes.get("Solver").unwrap().method("run").unwrap();
        assert_eq!(invocations(&ctx), vec![("step( x )".to_string(), run)]);
    }

    #[test]
    fn test_call_in_out_of_line_method() {
        let ctx = resolve(&unit(
            "solver.cpp",
            r#"<class>class <name>Solver</name> <block>{<public><function_decl><type><name>void</name></type> <name>run</name><parameter_list>()</parameter_list>;</function_decl></public>}</block>;</class>
<function><type><name>void</name></type> <name><name>Solver</name><operator>::</operator><name>run</name></name><parameter_list>()</parameter_list> <block>{ <expr_stmt><expr><call><name>step</name><argument_list>()</argument_list></call></expr>;</expr_stmt> }</block></function>"#,
        ));
        let run = ctx.classes.get("Solver").unwrap().method("run").unwrap();
        assert_eq!(invocations(&ctx), vec![("step()".to_string(), run)]);
    }

    #[test]
    fn test_out_of_line_method_of_template_specialization() {
        let ctx = resolve(&unit(
            "map.cpp",
            r#"<class>class <name><name>Map</name><argument_list>&lt;<argument><expr><name>K</name></expr></argument>, <argument><expr><name>V</name></expr></argument>&gt;</argument_list></name> <block>{<public><function_decl><type><name>V</name></type> <name>get</name><parameter_list>()</parameter_list>;</function_decl></public>}</block>;</class>
<function><type><name>V</name></type> <name><name><name>Map</name><argument_list>&lt;<argument><expr><name>K</name></expr></argument>,
    <argument><expr><name>V</name></expr></argument>&gt;</argument_list></name><operator>::</operator><name>get</name></name><parameter_list>()</parameter_list> <block>{ <expr_stmt><expr><call><name>lookup</name><argument_list>()</argument_list></call></expr>;</expr_stmt> }</block></function>"#,
        ));
        let get = ctx.classes.get("Map<K, V>").unwrap().method("get").unwrap();
        assert_eq!(invocations(&ctx), vec![("lookup()".to_string(), get)]);
    }

    #[test]
    fn test_constructor_calls_unattributed() {
        let ctx = resolve(&unit(
            "solver.h",
            r#"<class>class <name>Solver</name> <block>{<public><constructor><name>Solver</name><parameter_list>()</parameter_list> <block>{ <expr_stmt><expr><call><name>init</name><argument_list>()</argument_list></call></expr>;</expr_stmt> }</block></constructor></public>}</block>;</class>"#,
        ));
        assert!(invocations(&ctx).is_empty());
        assert_eq!(ctx.stats.calls_unattributed, 1);
    }

    #[test]
    fn test_interface_file_calls_ignored() {
        let ctx = resolve(&unit(
            "kernel.i",
            r#"<function><type><name>int</name></type> <name>helper</name><parameter_list>()</parameter_list> <block>{ <expr_stmt><expr><call><name>go</name><argument_list>()</argument_list></call></expr>;</expr_stmt> }</block></function>"#,
        ));
        assert!(invocations(&ctx).is_empty());
        assert_eq!(ctx.stats.calls_unattributed, 0);
    }

    #[test]
    fn test_global_initializer_call_unattributed() {
        let ctx = resolve(&unit(
            "globals.cpp",
            r#"<decl_stmt><decl><type><name>int</name></type> <name>x</name> <init>= <expr><call><name>compute</name><argument_list>()</argument_list></call></expr></init></decl>;</decl_stmt>"#,
        ));
        assert!(invocations(&ctx).is_empty());
        assert_eq!(ctx.stats.calls_unattributed, 1);
    }

    #[test]
    fn test_template_placeholder_body_unattributed() {
        let ctx = resolve(&unit(
            "gen.cpp",
            r#"<function><type><name>void</name></type> <name>$gen</name><parameter_list>()</parameter_list> <block>{ <expr_stmt><expr><call><name>go</name><argument_list>()</argument_list></call></expr>;</expr_stmt> }</block></function>"#,
        ));
        assert!(invocations(&ctx).is_empty());
        assert_eq!(ctx.stats.calls_unattributed, 1);
    }
}
