// Unit indexing
//
// Every `unit` element that names a file becomes a CompilationUnit or a
// Header, decided by extension. Interface-generator files are headers and
// always carry the SWIG language tag.

use super::ConversionContext;
use crate::error::Result;
use crate::model::{Entity, SourceUnit};
use crate::parser::srcml::{
    file_name, is_element, is_header_path, is_interface_path, INTERFACE_LANGUAGE,
};
use roxmltree::Node;
use tracing::debug;

/// A `unit` element naming a file, with its effective language
#[derive(Debug, Clone, Copy)]
pub struct UnitElement<'a, 'input> {
    pub node: Node<'a, 'input>,
    pub path: &'a str,
    pub language: &'a str,
}

impl UnitElement<'_, '_> {
    pub fn name(&self) -> &str {
        file_name(self.path)
    }
}

/// All file units below (and including) `root`, in document order
pub fn unit_elements<'a, 'input: 'a>(
    root: Node<'a, 'input>,
) -> impl Iterator<Item = UnitElement<'a, 'input>> + 'a {
    root.descendants()
        .filter(|n| is_element(*n, "unit"))
        .filter_map(|node| {
            let path = node.attribute("filename")?;
            let language = if is_interface_path(path) {
                INTERFACE_LANGUAGE
            } else {
                node.attribute("language").unwrap_or("")
            };
            Some(UnitElement {
                node,
                path,
                language,
            })
        })
}

/// Create unit entities and fill the unit index
pub fn index_units(ctx: &mut ConversionContext, root: Node) -> Result<()> {
    for unit in unit_elements(root) {
        let source = SourceUnit {
            file_path: ctx.string(unit.path)?,
            file_name: ctx.string(unit.name())?,
            language: ctx.string(unit.language)?,
        };
        let header = is_header_path(unit.path);
        let entity = if header {
            Entity::Header(source)
        } else {
            Entity::CompilationUnit(source)
        };
        let id = ctx.registry.add(entity);
        ctx.units.insert(unit.name(), unit.path, id);

        ctx.stats.units += 1;
        if header {
            ctx.stats.headers += 1;
        }
        debug!(path = unit.path, language = unit.language, id = %id, "unit");
    }
    Ok(())
}
