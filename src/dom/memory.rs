//! Arena-backed document for headless hosts and tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{ControlQuery, Dom, DomError, DomEvent, EventKind, Listener};

/// Handle to a node of a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    value: String,
    checked: bool,
    width: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<(EventKind, Rc<dyn Fn(&mut DomEvent)>)>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            style: BTreeMap::new(),
            value: String::new(),
            checked: false,
            width: 0.0,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn has_value(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }
}

/// In-memory document.
///
/// Every node is an element; node `0` is the document root. Nodes are never
/// freed, detached nodes simply lose their parent.
pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![NodeData::new("#document")]),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates an element and appends it to `parent`.
    pub fn element(&self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.alloc(tag);
        self.attach(parent, id, None);
        id
    }

    /// Creates an `<input type=...>` under `parent`.
    pub fn input(&self, parent: NodeId, input_type: &str) -> NodeId {
        let id = self.element(parent, "input");
        self.set_attribute(id, "type", input_type);
        id
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.with_node_mut(node, |n| {
            n.attributes.insert(name.to_ascii_lowercase(), value.to_string());
        });
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.with_node(node, |n| n.attributes.get(&name.to_ascii_lowercase()).cloned())
            .flatten()
    }

    pub fn set_value(&self, node: NodeId, value: &str) {
        self.with_node_mut(node, |n| n.value = value.to_string());
    }

    pub fn set_checked(&self, node: NodeId, checked: bool) {
        self.with_node_mut(node, |n| n.checked = checked);
    }

    pub fn set_width(&self, node: NodeId, width: f64) {
        self.with_node_mut(node, |n| n.width = width);
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root() {
                return true;
            }
            current = self.with_node(id, |n| n.parent).flatten();
        }
        false
    }

    /// Attached elements carrying `class`, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.has_class(id, class))
            .collect()
    }

    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.with_node(node, |n| n.listeners.iter().filter(|(k, _)| *k == kind).count())
            .unwrap_or(0)
    }

    /// Runs the listeners registered on `node` for `kind`.
    ///
    /// Listeners are collected before any runs, so a listener may freely
    /// mutate the document.
    pub fn dispatch(&self, node: NodeId, kind: EventKind) -> DomEvent {
        let listeners: Vec<_> = self
            .with_node(node, |n| {
                n.listeners
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, l)| Rc::clone(l))
                    .collect()
            })
            .unwrap_or_default();

        let mut event = DomEvent::new(kind);
        for listener in listeners {
            listener(&mut event);
        }
        event
    }

    fn alloc(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData::new(tag));
        NodeId(nodes.len() - 1)
    }

    fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&NodeData) -> R) -> Option<R> {
        self.nodes.borrow().get(id.0).map(f)
    }

    fn with_node_mut<R>(&self, id: NodeId, f: impl FnOnce(&mut NodeData) -> R) -> Option<R> {
        self.nodes.borrow_mut().get_mut(id.0).map(f)
    }

    fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.borrow().len()
    }

    fn detach(&self, id: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(parent) = nodes.get_mut(id.0).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = nodes.get_mut(parent.0) {
            p.children.retain(|c| *c != id);
        }
    }

    /// Moves `child` under `parent`, at `index` or at the end.
    fn attach(&self, parent: NodeId, child: NodeId, index: Option<usize>) {
        self.detach(child);
        let mut nodes = self.nodes.borrow_mut();
        if let Some(p) = nodes.get_mut(parent.0) {
            let index = index.unwrap_or(p.children.len()).min(p.children.len());
            p.children.insert(index, child);
        }
        if let Some(c) = nodes.get_mut(child.0) {
            c.parent = Some(parent);
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.with_node(id, |n| n.parent).flatten();
        }
        false
    }

    /// Pre-order descendants of `root`, excluding `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes
            .get(root.0)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(n) = nodes.get(id.0) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, id: NodeId, query: ControlQuery) -> bool {
        self.with_node(id, |n| query.matches(&n.tag, n.attributes.get("type").map(String::as_str)))
            .unwrap_or(false)
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn query_all(&self, query: ControlQuery) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.matches(*id, query))
            .collect()
    }

    fn query_within(&self, root: &NodeId, query: ControlQuery) -> Option<NodeId> {
        self.descendants(*root)
            .into_iter()
            .find(|id| self.matches(*id, query))
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.with_node(*node, |n| n.tag.clone()).unwrap_or_default()
    }

    fn value(&self, node: &NodeId) -> Option<String> {
        self.with_node(*node, |n| n.has_value().then(|| n.value.clone()))
            .flatten()
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.with_node(*node, |n| n.checked).unwrap_or(false)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.with_node(*node, |n| n.parent).flatten()
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.with_node(*node, |n| n.children.clone()).unwrap_or_default()
    }

    fn next_element_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(&parent);
        let index = siblings.iter().position(|c| c == node)?;
        siblings.get(index + 1).copied()
    }

    fn closest(&self, node: &NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id != self.root() && self.tag_name(&id).eq_ignore_ascii_case(tag) {
                return Some(id);
            }
            current = self.parent(&id);
        }
        None
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_node_mut(*node, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_node_mut(*node, |n| n.classes.retain(|c| c != class));
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.with_node(*node, |n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_node_mut(*node, |n| {
            n.style.insert(property.to_string(), value.to_string());
        });
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.with_node(*node, |n| n.style.get(property).cloned()).flatten()
    }

    fn bounding_width(&self, node: &NodeId) -> f64 {
        self.with_node(*node, |n| n.width).unwrap_or(0.0)
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomError::CreateFailed(tag.to_string()));
        }
        Ok(self.alloc(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        if !self.contains(*parent) || !self.contains(*child) {
            return Err(DomError::UnknownNode);
        }
        if self.is_inclusive_ancestor(*child, *parent) {
            return Err(DomError::Js("HierarchyRequestError".to_string()));
        }
        self.attach(*parent, *child, None);
        Ok(())
    }

    fn insert_after(&self, reference: &NodeId, node: &NodeId) -> Result<(), DomError> {
        if !self.contains(*reference) || !self.contains(*node) {
            return Err(DomError::UnknownNode);
        }
        let parent = self.parent(reference).ok_or(DomError::Detached)?;
        if self.is_inclusive_ancestor(*node, parent) {
            return Err(DomError::Js("HierarchyRequestError".to_string()));
        }
        self.detach(*node);
        let index = self
            .children(&parent)
            .iter()
            .position(|c| c == reference)
            .ok_or(DomError::Detached)?;
        self.attach(parent, *node, Some(index + 1));
        Ok(())
    }

    fn remove(&self, node: &NodeId) {
        self.detach(*node);
    }

    fn listen(&self, node: &NodeId, kind: EventKind, listener: Listener) -> Result<(), DomError> {
        self.with_node_mut(*node, |n| n.listeners.push((kind, Rc::from(listener))))
            .ok_or(DomError::UnknownNode)
    }
}
