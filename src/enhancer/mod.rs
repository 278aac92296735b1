//! Form enhancer - wires visual feedback onto form controls.
//!
//! Every handler only changes classes and inline styles or plays an
//! effect. Missing relatives (no label, no sibling, no submit control)
//! skip the effect; nothing here ever cancels a form submission.

mod indicator;
mod recipes;

pub use indicator::INDICATOR_CLASS;

use std::rc::Rc;

use secrecy::SecretString;

use crate::config::{EnhancerConfig, RipplePolicy};
use crate::dom::{ControlQuery, Dom, DomError, DomEvent, EventKind};
use crate::effects::EffectsPlayer;
use crate::evaluator::score_value;

pub const FOCUS_CLASS: &str = "form-field-focus";
pub const CONTENT_CLASS: &str = "has-content";
pub const RIPPLE_CLASS: &str = "form-field-ripple";

/// Number of controls wired by [`FormEnhancer::attach`], per group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttachReport {
    pub text_fields: usize,
    pub submit_controls: usize,
    pub radios: usize,
    pub checkboxes: usize,
    /// Password fields that received a strength indicator.
    pub password_fields: usize,
    pub forms: usize,
}

/// Attaches focus, press, toggle, submit and strength behaviors.
pub struct FormEnhancer<D: Dom, P> {
    dom: Rc<D>,
    player: Rc<P>,
    config: Rc<EnhancerConfig>,
}

impl<D: Dom, P> Clone for FormEnhancer<D, P> {
    fn clone(&self) -> Self {
        Self {
            dom: Rc::clone(&self.dom),
            player: Rc::clone(&self.player),
            config: Rc::clone(&self.config),
        }
    }
}

fn log_dom_error(_context: &str, _err: &DomError) {
    #[cfg(feature = "tracing")]
    tracing::warn!("{} skipped: {}", _context, _err);
}

impl<D, P> FormEnhancer<D, P>
where
    D: Dom,
    P: EffectsPlayer<D::Node> + 'static,
{
    pub fn new(dom: Rc<D>, player: Rc<P>, config: EnhancerConfig) -> Self {
        Self {
            dom,
            player,
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    /// Queries the document once and attaches every listener.
    ///
    /// Call once per page load; calling again wires the same controls twice.
    pub fn attach(&self) -> AttachReport {
        let mut report = AttachReport::default();

        for control in self.dom.query_all(ControlQuery::TextLike) {
            self.wire_text_field(&control);
            report.text_fields += 1;
        }

        for button in self.dom.query_all(ControlQuery::Submit) {
            self.on(&button, EventKind::MouseOver, Self::on_hover_enter);
            self.on(&button, EventKind::MouseOut, Self::on_hover_leave);
            self.on(&button, EventKind::MouseDown, Self::on_press);
            self.on(&button, EventKind::MouseUp, Self::on_release);
            report.submit_controls += 1;
        }

        for radio in self.dom.query_all(ControlQuery::Radio) {
            self.on(&radio, EventKind::Change, Self::on_radio_change);
            report.radios += 1;
        }

        for checkbox in self.dom.query_all(ControlQuery::Checkbox) {
            self.on(&checkbox, EventKind::Change, Self::on_checkbox_change);
            report.checkboxes += 1;
        }

        for field in self.dom.query_all(ControlQuery::Password) {
            match self.wire_password_field(&field) {
                Ok(()) => report.password_fields += 1,
                Err(err) => log_dom_error("strength indicator", &err),
            }
        }

        for form in self.dom.query_all(ControlQuery::Form) {
            self.on(&form, EventKind::Submit, Self::on_form_submit);
            report.forms += 1;
        }

        #[cfg(feature = "tracing")]
        tracing::info!("form enhancements attached: {:?}", report);

        report
    }

    /// Registers `handler` for `kind` on `node`.
    fn on(&self, node: &D::Node, kind: EventKind, handler: fn(&Self, &D::Node)) {
        let enhancer = self.clone();
        let target = node.clone();
        let listener = Box::new(move |_: &mut DomEvent| handler(&enhancer, &target));
        if let Err(err) = self.dom.listen(node, kind, listener) {
            log_dom_error(kind.as_str(), &err);
        }
    }

    fn wire_text_field(&self, control: &D::Node) {
        self.dom
            .set_style(control, "transition", &self.config.field_transition);
        self.on(control, EventKind::Focus, Self::on_focus);
        self.on(control, EventKind::Blur, Self::on_blur);

        if matches!(self.dom.tag_name(control).as_str(), "input" | "textarea") {
            self.on(control, EventKind::Input, Self::on_input);
            self.on_input(control);
        }
    }

    fn wire_password_field(&self, field: &D::Node) -> Result<(), DomError> {
        let bar = indicator::create(&*self.dom, &self.config.indicator)?;
        self.dom.insert_after(field, &bar)?;

        let enhancer = self.clone();
        let target = field.clone();
        self.dom.listen(
            field,
            EventKind::Input,
            Box::new(move |_: &mut DomEvent| enhancer.on_password_input(&target, &bar)),
        )
    }

    pub fn on_focus(&self, control: &D::Node) {
        self.dom.add_class(control, FOCUS_CLASS);
        self.spawn_ripple(control);
    }

    pub fn on_blur(&self, control: &D::Node) {
        self.dom.remove_class(control, FOCUS_CLASS);
    }

    /// Toggles the content class from the control's current value.
    pub fn on_input(&self, control: &D::Node) {
        let has_content = self
            .dom
            .value(control)
            .is_some_and(|value| !value.is_empty());
        if has_content {
            self.dom.add_class(control, CONTENT_CLASS);
        } else {
            self.dom.remove_class(control, CONTENT_CLASS);
        }
    }

    pub fn on_hover_enter(&self, button: &D::Node) {
        self.lift(button);
        self.dom
            .set_style(button, "box-shadow", &self.config.button.hover_shadow);
    }

    pub fn on_hover_leave(&self, button: &D::Node) {
        self.dom.set_style(button, "transform", "translateY(0)");
        self.dom
            .set_style(button, "box-shadow", &self.config.button.rest_shadow);
    }

    pub fn on_press(&self, button: &D::Node) {
        self.dom.set_style(button, "transform", "translateY(0)");

        let player = Rc::clone(&self.player);
        let target = button.clone();
        self.player.play(
            button,
            recipes::press_down(),
            Some(Box::new(move || {
                player.play(&target, recipes::press_release(), None);
            })),
        );
    }

    pub fn on_release(&self, button: &D::Node) {
        self.lift(button);
    }

    pub fn on_radio_change(&self, radio: &D::Node) {
        if !self.dom.is_checked(radio) {
            return;
        }
        match self.dom.closest(radio, "label") {
            Some(label) => self.player.play(&label, recipes::radio_pulse(), None),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("radio without enclosing label, no effect");
            }
        }
    }

    pub fn on_checkbox_change(&self, checkbox: &D::Node) {
        if let Some(label) = self.dom.next_element_sibling(checkbox) {
            self.player.play(&label, recipes::checkbox_nudge(), None);
        }
    }

    /// Pulses the form's submit control; the submission itself is untouched.
    pub fn on_form_submit(&self, form: &D::Node) {
        if let Some(button) = self.dom.query_within(form, ControlQuery::Submit) {
            self.player.play(&button, recipes::submit_pulse(), None);
        }
    }

    /// Rescores the field and redraws its indicator.
    pub fn on_password_input(&self, field: &D::Node, bar: &D::Node) {
        let password = self
            .dom
            .value(field)
            .map(|value| SecretString::new(value.into()));
        let score = score_value(password.as_ref());
        indicator::render(&*self.dom, bar, score);
    }

    fn lift(&self, button: &D::Node) {
        let transform = format!("translateY(-{}px)", self.config.button.lift_px);
        self.dom.set_style(button, "transform", &transform);
    }

    fn spawn_ripple(&self, control: &D::Node) {
        let ripple_config = &self.config.ripple;

        if ripple_config.policy == RipplePolicy::Replace {
            for child in self.dom.children(control) {
                if self.dom.has_class(&child, RIPPLE_CLASS) {
                    self.dom.remove(&child);
                }
            }
        }

        let ripple = match self.dom.create_element("div") {
            Ok(ripple) => ripple,
            Err(err) => return log_dom_error("ripple", &err),
        };
        let size = format!("{}px", ripple_config.size_px);
        let left = format!("{}px", self.dom.bounding_width(control) / 2.0);
        self.dom.add_class(&ripple, RIPPLE_CLASS);
        self.dom.set_style(&ripple, "position", "absolute");
        self.dom.set_style(&ripple, "width", &size);
        self.dom.set_style(&ripple, "height", &size);
        self.dom.set_style(&ripple, "border-radius", "50%");
        self.dom
            .set_style(&ripple, "background-color", &ripple_config.color);
        self.dom
            .set_style(&ripple, "opacity", &ripple_config.start_opacity.to_string());
        self.dom.set_style(&ripple, "transform", "scale(1)");
        self.dom.set_style(&ripple, "left", &left);
        self.dom.set_style(&ripple, "top", "50%");

        self.dom.set_style(control, "position", "relative");
        self.dom.set_style(control, "overflow", "hidden");
        if let Err(err) = self.dom.append_child(control, &ripple) {
            return log_dom_error("ripple", &err);
        }

        let dom = Rc::clone(&self.dom);
        let target = ripple.clone();
        self.player.play(
            &ripple,
            recipes::ripple(ripple_config),
            Some(Box::new(move || dom.remove(&target))),
        );
    }
}

/// Enhances every form control of `dom`, playing effects through `player`.
///
/// The single entry point a host calls once the document is parsed.
pub fn init<D, P>(dom: Rc<D>, player: Rc<P>, config: EnhancerConfig) -> AttachReport
where
    D: Dom,
    P: EffectsPlayer<D::Node> + 'static,
{
    FormEnhancer::new(dom, player, config).attach()
}
