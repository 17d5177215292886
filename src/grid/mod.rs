//! The grid builder: reconstructs a step's nested layout tree from its flat,
//! position-keyed element lists.
//!
//! The builder applies viewport overrides, flattens every element list into
//! one position-keyed map (merging cell metadata with element payloads),
//! then assembles the tree root-down, splicing in repeated subtrees at the
//! instance counts the repeat resolver derives from field data. Malformed
//! payloads degrade: a position with no map entry renders nothing.

mod node;
mod viewport;

pub use node::{CellEntry, GridNode, NodeContent};
pub use viewport::{Viewport, apply_viewport};

use crate::field::FieldStore;
use crate::step::{Position, Step, Subgrid};
use crate::visibility::repeat_count;
use ahash::AHashMap;
use std::collections::hash_map::Entry;

/// The builder's output: the flattened, merged position map and the
/// assembled tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTree {
    pub map: AHashMap<String, CellEntry>,
    pub root: GridNode,
}

impl GridTree {
    pub fn entry(&self, position: &Position) -> Option<&CellEntry> {
        self.map.get(&position.key())
    }
}

/// Builds the layout tree for one step under the given viewport.
pub fn build_tree(step: &Step, viewport: Viewport, store: &FieldStore) -> GridTree {
    let step = apply_viewport(step, viewport);
    let map = flatten(&step);
    let root = assemble(&step, &map, Position::root(), None, store);
    GridTree { map, root }
}

/// Flattens every element list into one position-keyed map.
///
/// When a subgrid cell and a leaf element share a position, the element
/// payload wins and the cell's width/height/cell-styles carry over. Repeat
/// duplicates within a class keep the first occurrence.
fn flatten(step: &Step) -> AHashMap<String, CellEntry> {
    let mut map: AHashMap<String, CellEntry> = AHashMap::new();

    for element in step.leaf_elements() {
        let content = match element {
            crate::step::ElementRef::Field(field) => NodeContent::Field(field.clone()),
            crate::step::ElementRef::Content(content) => NodeContent::Content(content.clone()),
            crate::step::ElementRef::Subgrid(_) => continue,
        };
        match map.entry(element.position().key()) {
            Entry::Vacant(slot) => {
                slot.insert(CellEntry {
                    content,
                    width: None,
                    height: None,
                    cell_styles: crate::step::JsonMap::new(),
                });
            }
            Entry::Occupied(_) => {
                tracing::warn!(position = %element.position(), "duplicate element; keeping first");
            }
        }
    }

    for grid in &step.subgrids {
        match map.entry(grid.common.position.key()) {
            Entry::Vacant(slot) => {
                slot.insert(CellEntry {
                    content: NodeContent::Subgrid(grid.clone()),
                    width: grid.width.clone(),
                    height: grid.height.clone(),
                    cell_styles: grid.cell_styles.clone(),
                });
            }
            Entry::Occupied(mut slot) => {
                if slot.get().content.is_container() {
                    tracing::warn!(position = %grid.common.position, "duplicate subgrid; keeping first");
                } else {
                    // An element already claimed the cell; the subgrid
                    // contributes sizing and per-cell styles only.
                    enrich_entry(slot.get_mut(), grid);
                }
            }
        }
    }

    map
}

fn enrich_entry(entry: &mut CellEntry, grid: &Subgrid) {
    if entry.width.is_none() {
        entry.width = grid.width.clone();
    }
    if entry.height.is_none() {
        entry.height = grid.height.clone();
    }
    for (key, value) in &grid.cell_styles {
        entry.cell_styles.entry(key.clone()).or_insert(value.clone());
    }
}

/// Assembles the node at `position` and, recursively, its children: child
/// positions are probed at increasing indices until the first gap. A
/// repeated subgrid child is cloned once per repeat instance, each clone
/// tagged with its index and the final one flagged.
fn assemble(
    step: &Step,
    map: &AHashMap<String, CellEntry>,
    position: Position,
    parent: Option<&Position>,
    store: &FieldStore,
) -> GridNode {
    let mut node = match map.get(&position.key()) {
        Some(entry) => GridNode {
            key: position.key(),
            position: position.clone(),
            parent: parent.cloned(),
            is_element: !entry.content.is_container(),
            content: Some(entry.content.clone()),
            repeat: None,
            last_repeat: false,
            width: entry.width.clone(),
            height: entry.height.clone(),
            cell_styles: entry.cell_styles.clone(),
            children: Vec::new(),
        },
        None => GridNode::empty(position.clone(), parent.cloned()),
    };

    // Leaf elements never have children; don't probe below them.
    if node.is_element {
        return node;
    }

    let mut index = 0;
    loop {
        let child_position = position.child(index);
        let Some(entry) = map.get(&child_position.key()) else {
            break;
        };

        match &entry.content {
            NodeContent::Subgrid(grid) if grid.repeated => {
                let count = repeat_count(step, grid, store);
                for instance in 0..count {
                    let mut clone = assemble(step, map, child_position.clone(), Some(&position), store);
                    tag_repeat(&mut clone, instance, instance + 1 == count);
                    node.children.push(clone);
                }
            }
            _ => {
                node.children
                    .push(assemble(step, map, child_position, Some(&position), store));
            }
        }
        index += 1;
    }
    node
}

/// Tags a cloned subtree with its repeat instance. Field descendants get
/// their `servar.repeated` flag set so downstream logic treats their values
/// as array-indexed.
///
/// A node's tag always refers to its **nearest** repeating ancestor: a
/// repeated subgrid nested inside another repeated subgrid was already tagged
/// with its own instance when its clones were assembled, so an already-tagged
/// subtree is left alone.
fn tag_repeat(node: &mut GridNode, instance: usize, last: bool) {
    if node.repeat.is_some() {
        return;
    }
    node.repeat = Some(instance);
    node.last_repeat = last;
    if let Some(NodeContent::Field(field)) = &mut node.content {
        field.servar.repeated = true;
    }
    for child in &mut node.children {
        tag_repeat(child, instance, last);
    }
}
