//! Group-scoped projection of an entity graph.
//!
//! Related rows are loaded into a [`Graph`] first (see
//! `usecase::projection`); projection itself is synchronous and never touches
//! the store. An embedded relation is projected with the outer group, so it
//! only shows the fields the related entity tags with that group.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::domain::record::{Embed, Group, Relation, Resource, Table};

/// Nesting bound. Group tables are acyclic so this is never reached in practice.
const MAX_DEPTH: usize = 4;

/// Type-erased view of a loaded record.
pub trait Node: Send + Sync {
    fn table(&self) -> Table;
    fn key(&self) -> Option<i32>;
    fn reference(&self, field: &str) -> Option<i32>;
    fn embeds(&self) -> &'static [Embed];
    /// Own fields tagged with `group`.
    fn document(&self, group: Group) -> Map<String, Value>;
}

impl<T: Resource> Node for T {
    fn table(&self) -> Table {
        T::TABLE
    }

    fn key(&self) -> Option<i32> {
        self.id()
    }

    fn reference(&self, field: &str) -> Option<i32> {
        self.foreign_key(field)
    }

    fn embeds(&self) -> &'static [Embed] {
        T::EMBEDS
    }

    fn document(&self, group: Group) -> Map<String, Value> {
        T::EXPOSED
            .iter()
            .filter(|exposure| exposure.groups.contains(&group))
            .map(|exposure| (exposure.key.to_owned(), self.expose(exposure.key)))
            .collect()
    }
}

/// Embeds of `node` that appear in `group`.
pub fn embeds_in(node: &dyn Node, group: Group) -> impl Iterator<Item = &'static Embed> {
    node.embeds()
        .iter()
        .filter(move |embed| embed.groups.contains(&group))
}

/// Loaded records keyed by table and id.
#[derive(Default)]
pub struct Graph {
    nodes: HashMap<(Table, i32), Box<dyn Node>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record. Unsaved records and duplicates are ignored.
    /// Returns `true` when the record was new.
    pub fn insert(&mut self, node: Box<dyn Node>) -> bool {
        let Some(id) = node.key() else {
            return false;
        };
        let key = (node.table(), id);
        if self.nodes.contains_key(&key) {
            return false;
        }
        self.nodes.insert(key, node);
        true
    }

    pub fn contains(&self, table: Table, id: i32) -> bool {
        self.nodes.contains_key(&(table, id))
    }

    pub fn get(&self, table: Table, id: i32) -> Option<&dyn Node> {
        self.nodes.get(&(table, id)).map(|node| node.as_ref())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rows of `table` whose `field` references `parent`, in id order.
    pub fn children(&self, table: Table, field: &str, parent: i32) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = self
            .nodes
            .iter()
            .filter(|((t, _), node)| *t == table && node.reference(field) == Some(parent))
            .map(|(_, node)| node.as_ref())
            .collect();
        children.sort_by_key(|node| node.key());
        children
    }

    pub fn project(&self, node: &dyn Node, group: Group) -> Value {
        self.project_at(node, group, 0)
    }

    fn project_at(&self, node: &dyn Node, group: Group, depth: usize) -> Value {
        let mut document = node.document(group);
        if depth < MAX_DEPTH {
            for embed in embeds_in(node, group) {
                let value = match embed.relation {
                    Relation::BelongsTo { field, target } => node
                        .reference(field)
                        .and_then(|id| self.get(target, id))
                        .map_or(Value::Null, |related| {
                            self.project_at(related, group, depth + 1)
                        }),
                    Relation::HasMany { target, field } => match node.key() {
                        Some(id) => Value::Array(
                            self.children(target, field, id)
                                .into_iter()
                                .map(|child| self.project_at(child, group, depth + 1))
                                .collect(),
                        ),
                        None => Value::Array(Vec::new()),
                    },
                };
                document.insert(embed.key.to_owned(), value);
            }
        }
        Value::Object(document)
    }
}
