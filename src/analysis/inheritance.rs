// Inheritance linking
//
// Runs after every class is known. A base name that matches no extracted
// class (external library, unanalyzed code) produces no edge.

use super::ConversionContext;
use crate::model::{Entity, Inheritance};

/// Create an Inheritance edge for every base name that matches a class
pub fn link_inheritance(ctx: &mut ConversionContext) {
    let classes = &ctx.classes;
    let edges: Vec<Inheritance> = classes
        .iter()
        .flat_map(|class| {
            class.supers.iter().filter_map(move |base| {
                let superclass = classes.get(base)?.id;
                (superclass != class.id).then_some(Inheritance {
                    subclass: class.id,
                    superclass,
                })
            })
        })
        .collect();

    for edge in edges {
        ctx.registry.add(Entity::Inheritance(edge));
        ctx.stats.inheritances += 1;
    }
}
