use crate::step::{ContentElement, FieldElement, JsonMap, Position, Subgrid};

/// The payload a grid node renders.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    Subgrid(Subgrid),
    Field(FieldElement),
    Content(ContentElement),
}

impl NodeContent {
    pub fn is_container(&self) -> bool {
        matches!(self, NodeContent::Subgrid(_))
    }
}

/// One merged entry of the flattened position map.
///
/// A subgrid cell and a leaf element may target the same position; the
/// element payload wins while the cell's sizing and per-cell styles carry
/// over. This is also the `map` half of the builder's output.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEntry {
    pub content: NodeContent,
    pub width: Option<String>,
    pub height: Option<String>,
    pub cell_styles: JsonMap,
}

/// A node of the assembled layout tree.
///
/// `parent` is a non-owning back-reference (the parent's position) used only
/// for upward traversal; ownership flows strictly root-down through
/// `children`. Repeat clones share a position and are distinguished by
/// `repeat`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridNode {
    pub key: String,
    pub position: Position,
    pub parent: Option<Position>,
    pub content: Option<NodeContent>,
    /// False for pure containers, true for leaf elements.
    pub is_element: bool,
    /// The repeat instance this node belongs to, when under a repeating
    /// container.
    pub repeat: Option<usize>,
    /// Set on every node of the final repeat clone.
    pub last_repeat: bool,
    pub width: Option<String>,
    pub height: Option<String>,
    pub cell_styles: JsonMap,
    pub children: Vec<GridNode>,
}

impl GridNode {
    /// An empty placeholder node: a referenced position with no map entry
    /// renders nothing rather than failing.
    pub(crate) fn empty(position: Position, parent: Option<Position>) -> Self {
        GridNode {
            key: position.key(),
            position,
            parent,
            content: None,
            is_element: false,
            repeat: None,
            last_repeat: false,
            width: None,
            height: None,
            cell_styles: JsonMap::new(),
            children: Vec::new(),
        }
    }

    /// Depth-first traversal over this node and all descendants.
    pub fn walk(&self, visit: &mut dyn FnMut(&GridNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
