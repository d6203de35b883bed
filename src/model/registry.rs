// Append-only node registry
//
// Identities are handed out in creation order and double as the index into
// the node vector. Nodes are never removed. After creation only two things
// may change: the source anchor link and, once, the declared type.

use super::entity::Entity;
use super::value::NodeId;
use crate::error::{Error, Result};

/// A registered entity with its identity
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub entity: Entity,
    pub source_anchor: Option<NodeId>,
}

/// All entities of one conversion, in creation order
#[derive(Debug, Default)]
pub struct Registry {
    nodes: Vec<Node>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and return its identity
    pub fn add(&mut self, entity: Entity) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            entity,
            source_anchor: None,
        });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn entity(&self, id: NodeId) -> Option<&Entity> {
        self.get(id).map(|n| &n.entity)
    }

    /// Iterate nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Count nodes with the given type tag
    pub fn count_tagged(&self, tag: &str) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.entity.type_tag() == tag)
            .count()
    }

    /// Link `owner` to its file anchor node
    pub fn attach_anchor(&mut self, owner: NodeId, anchor: NodeId) -> Result<()> {
        if self.get(anchor).is_none() {
            return Err(Error::conversion(format!("anchor {} does not exist", anchor)));
        }
        let node = self
            .nodes
            .get_mut(owner.0)
            .ok_or_else(|| Error::conversion(format!("node {} does not exist", owner)))?;
        if node.source_anchor.is_some() {
            return Err(Error::conversion(format!(
                "node {} already has a source anchor",
                owner
            )));
        }
        node.source_anchor = Some(anchor);
        Ok(())
    }

    /// Bind the declared type of `owner` to `class`.
    ///
    /// Returns `Ok(false)` if the type was already bound; a declared type is
    /// never rebound.
    pub fn bind_declared_type(&mut self, owner: NodeId, class: NodeId) -> Result<bool> {
        if !matches!(self.entity(class), Some(Entity::Class(_))) {
            return Err(Error::conversion(format!("node {} is not a class", class)));
        }
        let node = self
            .nodes
            .get_mut(owner.0)
            .ok_or_else(|| Error::conversion(format!("node {} does not exist", owner)))?;
        let slot = node.entity.declared_type_mut().ok_or_else(|| {
            Error::conversion(format!("node {} has no declared type slot", owner))
        })?;
        if slot.is_some() {
            return Ok(false);
        }
        *slot = Some(class);
        Ok(true)
    }
}
