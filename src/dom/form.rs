//! Binds the `#contactForm` markup to a [`FormController`].
//!
//! [`DomFormView`] is the live [`FormView`]: it owns handles to the inputs,
//! their `.form-group` wrappers, and the submit control, and creates the
//! `.error-message`, `.character-count`, and `.form-notification` elements
//! on demand.

use std::cell::RefCell;
use std::rc::Rc;

use time::OffsetDateTime;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::{create, listen, query, set_class};
use crate::config::FormConfig;
use crate::consts::{
    CHARACTER_COUNT_CLASS, ERROR_MESSAGE_CLASS, FORM_GROUP_SELECTOR, FORM_ID, NOTIFICATION_CLASS, SUBMIT_SELECTOR,
    SUBMIT_TEXT_SELECTOR,
};
use crate::error::SetupError;
use crate::form::controller::{FormController, SubmitBlocked, SubmitOutcome, run_submission};
use crate::form::counter::{CharacterCount, CounterLevel};
use crate::form::field::{FieldMap, FieldName};
use crate::form::rules::RuleTable;
use crate::form::view::{FieldMarker, FormView, Notification, SubmitLabel};
use crate::net::submit::HttpTransport;
use crate::util::timer::BrowserTimer;

type Controller = FormController<DomFormView>;

/// An `<input>` or `<textarea>` bound to one field.
#[derive(Clone)]
enum FieldInput {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl FieldInput {
    fn from_element(el: Element) -> Option<Self> {
        match el.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(Self::Input(input)),
            Err(el) => match el.dyn_into::<HtmlTextAreaElement>() {
                Ok(area) => Some(Self::TextArea(area)),
                Err(_) => None,
            },
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Input(input) => input.value(),
            Self::TextArea(area) => area.value(),
        }
    }

    fn element(&self) -> &HtmlElement {
        match self {
            Self::Input(input) => input,
            Self::TextArea(area) => area,
        }
    }
}

fn input_selector(field: FieldName) -> &'static str {
    match field {
        FieldName::Name => "#name",
        FieldName::Email => "#email",
        FieldName::Subject => "#subject",
        FieldName::Message => "#message",
    }
}

fn cast<T: JsCast>(el: Element) -> Option<T> {
    match el.dyn_into::<T>() {
        Ok(cast) => Some(cast),
        Err(_) => None,
    }
}

pub struct DomFormView {
    document: Document,
    form: HtmlFormElement,
    inputs: FieldMap<FieldInput>,
    groups: FieldMap<Element>,
    submit: HtmlButtonElement,
    submit_text: Element,
    notification: Option<(u64, Element)>,
}

impl DomFormView {
    /// Locate every element of the form contract in `document`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingElement`] naming the first element that
    /// could not be found.
    pub fn attach(document: &Document) -> Result<Self, SetupError> {
        let form: HtmlFormElement = document
            .get_element_by_id(FORM_ID)
            .and_then(cast)
            .ok_or(SetupError::MissingElement("form#contactForm"))?;

        let inputs = FieldMap::try_from_fn(|field| {
            query(&form, input_selector(field))
                .and_then(FieldInput::from_element)
                .ok_or(SetupError::MissingElement(input_selector(field)))
        })?;

        let groups = FieldMap::try_from_fn(|field| match inputs[field].element().closest(FORM_GROUP_SELECTOR) {
            Ok(Some(group)) => Ok(group),
            Ok(None) => Err(SetupError::MissingElement(FORM_GROUP_SELECTOR)),
            Err(err) => {
                log::warn!("closest({FORM_GROUP_SELECTOR}) failed: {err:?}");
                Err(SetupError::MissingElement(FORM_GROUP_SELECTOR))
            }
        })?;

        let submit: HtmlButtonElement = query(&form, SUBMIT_SELECTOR)
            .and_then(cast)
            .ok_or(SetupError::MissingElement(SUBMIT_SELECTOR))?;
        let submit_text = query(&submit, SUBMIT_TEXT_SELECTOR).ok_or(SetupError::MissingElement(SUBMIT_TEXT_SELECTOR))?;

        Ok(Self { document: document.clone(), form, inputs, groups, submit, submit_text, notification: None })
    }

    /// Find the `.class` child of the field's group, creating a `<span>` if absent.
    fn ensure_child(&self, field: FieldName, class: &str) -> Option<Element> {
        let group = &self.groups[field];
        if let Some(existing) = query(group, &format!(".{class}")) {
            return Some(existing);
        }
        let el = create(&self.document, "span", class)?;
        if let Err(err) = group.append_child(&el) {
            log::warn!("failed to attach .{class} for {field}: {err:?}");
            return None;
        }
        Some(el)
    }
}

impl FormView for DomFormView {
    fn set_field_marker(&mut self, field: FieldName, marker: &FieldMarker) {
        let (message, error, success) = match marker {
            FieldMarker::Error(message) => (message.as_str(), true, false),
            FieldMarker::Success => ("", false, true),
            FieldMarker::Neutral => ("", false, false),
        };

        if let Some(el) = self.ensure_child(field, ERROR_MESSAGE_CLASS) {
            el.set_text_content(Some(message));
            set_class(&el, "show", error);
        }

        let input = self.inputs[field].element();
        set_class(input, "error", error);
        set_class(input, "valid", success);

        let group = &self.groups[field];
        set_class(group, "has-error", error);
        set_class(group, "has-success", success);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit.set_disabled(!enabled);
        set_class(&self.submit, "disabled", !enabled);
    }

    fn set_submit_label(&mut self, label: SubmitLabel) {
        self.submit_text.set_text_content(Some(label.text()));
        for class in ["loading", "success", "error"] {
            set_class(&self.submit, class, label.class() == Some(class));
        }
    }

    fn set_character_count(&mut self, field: FieldName, count: Option<CharacterCount>) {
        match count {
            Some(count) => {
                let Some(counter) = self.ensure_child(field, CHARACTER_COUNT_CLASS) else {
                    return;
                };
                counter.set_text_content(Some(&count.label()));
                let level = count.level();
                set_class(&counter, "warning", level >= CounterLevel::Warning);
                set_class(&counter, "error", level == CounterLevel::Error);
            }
            None => {
                if let Some(counter) = query(&self.groups[field], &format!(".{CHARACTER_COUNT_CLASS}")) {
                    counter.remove();
                }
            }
        }
    }

    fn show_notification(&mut self, notification: &Notification) {
        if let Some((_, existing)) = self.notification.take() {
            existing.remove();
        }

        let class = format!("{NOTIFICATION_CLASS} {}", notification.kind.as_str());
        let Some(el) = create(&self.document, "div", &class) else {
            return;
        };
        el.set_text_content(Some(&notification.message));

        let Some(parent) = self.form.parent_node() else {
            log::warn!("contact form has no parent; notification dropped");
            return;
        };
        if let Err(err) = parent.insert_before(&el, self.form.next_sibling().as_ref()) {
            log::warn!("failed to insert notification: {err:?}");
            return;
        }
        self.notification = Some((notification.id, el));
    }

    fn dismiss_notification(&mut self, id: u64) {
        if self.notification.as_ref().is_some_and(|(current, _)| *current == id) {
            if let Some((_, el)) = self.notification.take() {
                el.remove();
            }
        }
    }

    fn focus_field(&mut self, field: FieldName) {
        let input = self.inputs[field].element();
        if let Err(err) = input.focus() {
            log::warn!("failed to focus {field}: {err:?}");
        }
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        input.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn clear_values(&mut self) {
        self.form.reset();
    }
}

/// Run `f` against the controller unless it is already borrowed.
///
/// DOM calls made by the controller (focus, reset) can dispatch events
/// synchronously; those re-entrant events are dropped.
fn with_form(controller: &RefCell<Controller>, event: &str, f: impl FnOnce(&mut Controller)) {
    match controller.try_borrow_mut() {
        Ok(mut form) => f(&mut form),
        Err(_) => log::debug!("{event} skipped: form busy"),
    }
}

/// Attach validation and submission handling to `#contactForm`.
///
/// # Errors
///
/// Returns [`SetupError`] when the form markup is incomplete or its
/// `data-config` is invalid. The page keeps working without the form
/// behaviour in that case.
pub fn mount() -> Result<(), SetupError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(SetupError::MissingElement("document"))?;
    let view = DomFormView::attach(&document)?;
    let config = FormConfig::from_attribute(view.form.get_attribute("data-config").as_deref())?;

    let form_el = view.form.clone();
    let inputs = view.inputs.clone();
    let transport = Rc::new(HttpTransport::new(&config.endpoint));
    let controller = Rc::new(RefCell::new(FormController::new(view, RuleTable::contact()?, config)));

    for (field, input) in inputs.iter() {
        let ctrl = Rc::clone(&controller);
        let source = input.clone();
        listen(input.element(), "blur", move |_| {
            with_form(&ctrl, "blur", |form| {
                form.set_value(field, &source.value());
                form.on_blur(field);
            });
        });

        let ctrl = Rc::clone(&controller);
        let source = input.clone();
        listen(input.element(), "input", move |_| {
            with_form(&ctrl, "input", |form| form.on_input(field, &source.value()));
        });
    }

    let ctrl = Rc::clone(&controller);
    listen(&form_el, "submit", move |event: Event| {
        event.prevent_default();
        with_form(&ctrl, "submit", |form| {
            for (field, input) in inputs.iter() {
                form.set_value(field, &input.value());
            }
        });

        let ctrl = Rc::clone(&ctrl);
        let transport = Rc::clone(&transport);
        wasm_bindgen_futures::spawn_local(async move {
            match run_submission(&ctrl, &*transport, &BrowserTimer, OffsetDateTime::now_utc()).await {
                Ok(SubmitOutcome::Sent) => log::info!("contact form sent"),
                Ok(SubmitOutcome::Failed) => log::warn!("contact form submission failed"),
                Err(SubmitBlocked::InFlight) => log::debug!("submit ignored while a submission is in flight"),
                Err(SubmitBlocked::Invalid { first_invalid, .. }) => {
                    log::debug!("submit blocked, first invalid field: {first_invalid:?}");
                }
            }
        });
    });

    Ok(())
}
