//! `web_sys` backed document.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList,
};

use super::{ControlQuery, Dom, DomError, DomEvent, EventKind, Listener};

/// The page's live document.
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Wraps `window.document`.
    pub fn from_window() -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| DomError::Js("No document object".to_string()))?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn js_error(err: JsValue) -> DomError {
    DomError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn log_failure(_op: &str, result: Result<(), JsValue>) {
    if let Err(_err) = result {
        #[cfg(feature = "tracing")]
        tracing::warn!("DOM {} failed: {:?}", _op, _err);
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn query_all(&self, query: ControlQuery) -> Vec<Element> {
        self.document
            .query_selector_all(query.selector())
            .map(elements)
            .unwrap_or_default()
    }

    fn query_within(&self, root: &Element, query: ControlQuery) -> Option<Element> {
        root.query_selector(query.selector()).ok().flatten()
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn value(&self, node: &Element) -> Option<String> {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
            return Some(textarea.value());
        }
        node.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn next_element_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn closest(&self, node: &Element, tag: &str) -> Option<Element> {
        node.closest(tag).ok().flatten()
    }

    fn add_class(&self, node: &Element, class: &str) {
        log_failure("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&self, node: &Element, class: &str) {
        log_failure("classList.remove", node.class_list().remove_1(class));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            log_failure("style.setProperty", el.style().set_property(property, value));
        }
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        node.dyn_ref::<HtmlElement>()
            .and_then(|el| el.style().get_property_value(property).ok())
            .filter(|v| !v.is_empty())
    }

    fn bounding_width(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().width()
    }

    fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(|_| DomError::CreateFailed(tag.to_string()))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn insert_after(&self, reference: &Element, node: &Element) -> Result<(), DomError> {
        let parent = reference.parent_node().ok_or(DomError::Detached)?;
        parent
            .insert_before(node, reference.next_sibling().as_ref())
            .map(|_| ())
            .map_err(js_error)
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn listen(&self, node: &Element, kind: EventKind, listener: Listener) -> Result<(), DomError> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let mut dom_event = DomEvent::new(kind);
            listener(&mut dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        });
        node.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        // Listeners live as long as the page.
        closure.forget();
        Ok(())
    }
}
