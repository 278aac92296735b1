//! Document capability
//!
//! The enhancer only talks to the page through [`Dom`]. Two hosts are
//! provided: [`MemoryDom`], an arena-backed document, and `WebDom`
//! (feature `web`), a thin wrapper over `web_sys::Document`.

mod memory;
#[cfg(feature = "web")]
mod web;

pub use memory::{MemoryDom, NodeId};
#[cfg(feature = "web")]
pub use web::WebDom;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Failed to create <{0}> element")]
    CreateFailed(String),
    #[error("Node is not attached to a parent")]
    Detached,
    #[error("Unknown node")]
    UnknownNode,
    #[error("DOM operation failed: {0}")]
    Js(String),
}

/// Control groups the enhancer wires, each matching one selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlQuery {
    /// Inputs other than radio/checkbox, textareas and selects.
    TextLike,
    /// Submit buttons and submit inputs.
    Submit,
    Radio,
    Checkbox,
    Password,
    Form,
}

impl ControlQuery {
    /// CSS selector equivalent of the query.
    pub fn selector(self) -> &'static str {
        match self {
            ControlQuery::TextLike => {
                r#"input:not([type="radio"]):not([type="checkbox"]), textarea, select"#
            }
            ControlQuery::Submit => r#"button[type="submit"], input[type="submit"]"#,
            ControlQuery::Radio => r#"input[type="radio"]"#,
            ControlQuery::Checkbox => r#"input[type="checkbox"]"#,
            ControlQuery::Password => r#"input[type="password"]"#,
            ControlQuery::Form => "form",
        }
    }

    /// Matches an element by lowercase tag name and `type` attribute.
    pub fn matches(self, tag: &str, input_type: Option<&str>) -> bool {
        let type_is = |expected: &str| {
            input_type.is_some_and(|t| t.eq_ignore_ascii_case(expected))
        };
        match self {
            ControlQuery::TextLike => match tag {
                "input" => !type_is("radio") && !type_is("checkbox"),
                "textarea" | "select" => true,
                _ => false,
            },
            ControlQuery::Submit => (tag == "button" || tag == "input") && type_is("submit"),
            ControlQuery::Radio => tag == "input" && type_is("radio"),
            ControlQuery::Checkbox => tag == "input" && type_is("checkbox"),
            ControlQuery::Password => tag == "input" && type_is("password"),
            ControlQuery::Form => tag == "form",
        }
    }
}

/// DOM events the enhancer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Focus,
    Blur,
    Input,
    MouseOver,
    MouseOut,
    MouseDown,
    MouseUp,
    Change,
    Submit,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::Input => "input",
            EventKind::MouseOver => "mouseover",
            EventKind::MouseOut => "mouseout",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseUp => "mouseup",
            EventKind::Change => "change",
            EventKind::Submit => "submit",
        }
    }
}

/// Event handed to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    kind: EventKind,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            default_prevented: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type Listener = Box<dyn Fn(&mut DomEvent)>;

/// Read and mutate access to a document.
///
/// Methods take `&self`; implementations use interior mutability so that
/// listeners can hold the document behind an `Rc`.
pub trait Dom: 'static {
    type Node: Clone + PartialEq + 'static;

    /// All elements matching `query`, in document order.
    fn query_all(&self, query: ControlQuery) -> Vec<Self::Node>;

    /// First descendant of `root` matching `query`.
    fn query_within(&self, root: &Self::Node, query: ControlQuery) -> Option<Self::Node>;

    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    /// Current value of an input, textarea or select.
    fn value(&self, node: &Self::Node) -> Option<String>;

    fn is_checked(&self, node: &Self::Node) -> bool;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn next_element_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Nearest inclusive ancestor with the given tag name.
    fn closest(&self, node: &Self::Node, tag: &str) -> Option<Self::Node>;

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Sets an inline style property by its CSS name (`"box-shadow"`).
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// Rendered width in CSS pixels.
    fn bounding_width(&self, node: &Self::Node) -> f64;

    fn create_element(&self, tag: &str) -> Result<Self::Node, DomError>;

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Inserts `node` as the next sibling of `reference`.
    fn insert_after(&self, reference: &Self::Node, node: &Self::Node) -> Result<(), DomError>;

    /// Detaches `node`; a detached node is left untouched.
    fn remove(&self, node: &Self::Node);

    fn listen(&self, node: &Self::Node, kind: EventKind, listener: Listener) -> Result<(), DomError>;
}
