//! Browser binding.
//!
//! Builds a [`PageController`] over the live document, attaches the event
//! listeners, and exports `showAlert`, `copyToClipboard`,
//! `animateProgressBar` and `createSkillsChart` for inline page scripts.
//! Listeners are bound only for the elements the current page actually has,
//! so the same module serves the analyze page and the results page.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::{Interval, Timeout};
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, DragEvent, Element, Event, EventTarget, FileList, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::dom::{Dom, Scheduler, TimerId};
use crate::file_picker::{FileMeta, PickerView};
use crate::notify::{Alert, AlertId, Severity, ALERT_STYLE};
use crate::progress::Frame;
use crate::reveal::{
    RevealId, REVEAL_CLASS, REVEAL_ROOT_MARGIN, REVEAL_TARGET_CLASS, REVEAL_THRESHOLD,
};
use crate::scroll::ANCHOR_SELECTOR;
use crate::{ids, PageController, DRAGOVER_CLASS, TOOLTIP_SELECTOR};

/// Attribute carrying a reveal target's index.
const REVEAL_INDEX_ATTR: &str = "data-reveal-index";

type WebController = PageController<WebDom, GlooScheduler>;

// ============================================================================
// Bootstrap widgets
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Modal;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Modal, JsValue>;

    #[wasm_bindgen(method)]
    fn show(this: &Modal);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Tooltip;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Tooltip, JsValue>;
}

// ============================================================================
// Document
// ============================================================================

pub struct WebDom {
    document: Document,
    controller: Weak<RefCell<WebController>>,
    modal: Option<Modal>,
    tooltips: Vec<Tooltip>,
    alerts: HashMap<AlertId, Element>,
    reveal_targets: Vec<Element>,
    observer: Option<IntersectionObserver>,
    observer_callback: Option<Closure<dyn FnMut(Array, IntersectionObserver)>>,
    pending_drop: Option<FileList>,
}

impl WebDom {
    fn new(document: Document, controller: Weak<RefCell<WebController>>) -> Self {
        let modal = document
            .get_element_by_id(ids::LOADING_MODAL)
            .and_then(|el| Modal::new(&el).ok());

        Self {
            document,
            controller,
            modal,
            tooltips: Vec::new(),
            alerts: HashMap::new(),
            reveal_targets: Vec::new(),
            observer: None,
            observer_callback: None,
            pending_drop: None,
        }
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn html_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.by_id(id).and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn file_input(&self) -> Option<HtmlInputElement> {
        self.by_id(ids::FILE_INPUT)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

impl Dom for WebDom {
    fn element_exists(&self, id: &str) -> bool {
        self.by_id(id).is_some()
    }

    fn render_picker(&mut self, view: &PickerView) {
        let has_file = view.file_name.is_some();

        if let Some(area) = self.html_by_id(ids::UPLOAD_AREA) {
            let classes = area.class_list();
            let _ = if view.dragging {
                classes.add_1(DRAGOVER_CLASS)
            } else {
                classes.remove_1(DRAGOVER_CLASS)
            };
            set_style(&area, "display", if has_file { "none" } else { "block" });
        }
        if let Some(info) = self.html_by_id(ids::FILE_INFO) {
            set_style(&info, "display", if has_file { "flex" } else { "none" });
        }
        if let (Some(label), Some(name)) = (self.by_id(ids::FILE_NAME), view.file_name.as_deref()) {
            label.set_text_content(Some(name));
        }
    }

    fn open_file_dialog(&mut self) {
        if let Some(input) = self.file_input() {
            input.click();
        }
    }

    fn clear_file_input(&mut self) {
        if let Some(input) = self.file_input() {
            input.set_value("");
        }
    }

    fn file_input_count(&self) -> usize {
        self.file_input()
            .and_then(|input| input.files())
            .map_or(0, |files| files.length() as usize)
    }

    fn commit_dropped_files(&mut self) {
        if let (Some(input), Some(files)) = (self.file_input(), self.pending_drop.take()) {
            input.set_files(Some(&files));
        }
    }

    fn append_alert(&mut self, alert: &Alert) {
        // Banners closed by their button are no longer worth tracking.
        self.alerts.retain(|_, el| el.parent_node().is_some());

        let Ok(div) = self.document.create_element("div") else {
            return;
        };
        div.set_class_name(&alert.class_name());
        let _ = div.set_attribute("style", ALERT_STYLE);
        div.set_inner_html(&alert.inner_html());

        if let Some(body) = self.document.body() {
            let _ = body.append_child(&div);
        }
        self.alerts.insert(alert.id, div);
    }

    fn alert_attached(&self, id: AlertId) -> bool {
        self.alerts
            .get(&id)
            .map(|el| el.parent_node().is_some())
            .unwrap_or(false)
    }

    fn remove_alert(&mut self, id: AlertId) {
        if let Some(el) = self.alerts.remove(&id) {
            el.remove();
        }
    }

    fn show_loading_modal(&mut self) {
        if let Some(modal) = &self.modal {
            modal.show();
        }
    }

    fn set_loading_progress(&mut self, percent: f64) {
        if let Some(bar) = self.html_by_id(ids::PROGRESS_BAR) {
            set_style(&bar, "width", &format!("{}%", percent));
        }
    }

    fn submit_form(&mut self) {
        let form = self
            .by_id(ids::ANALYZE_FORM)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        if let Some(form) = form {
            if let Err(err) = form.submit() {
                console::error!("form submission failed", err);
            }
        }
    }

    fn set_progress_bar(&mut self, element_id: &str, frame: &Frame) {
        if let Some(bar) = self.html_by_id(element_id) {
            set_style(&bar, "width", &frame.width());
            bar.set_text_content(Some(&frame.label()));
        }
    }

    fn scroll_into_view(&mut self, element_id: &str) {
        if let Some(target) = self.by_id(element_id) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn activate_tooltips(&mut self) -> usize {
        let tooltips: Vec<Tooltip> = self
            .select_all(TOOLTIP_SELECTOR)
            .iter()
            .filter_map(|el| Tooltip::new(el).ok())
            .collect();
        let count = tooltips.len();
        self.tooltips = tooltips;
        count
    }

    fn observe_reveal_targets(&mut self) -> usize {
        let targets = self.select_all(&format!(".{}", REVEAL_TARGET_CLASS));
        if targets.is_empty() {
            return 0;
        }

        let controller = self.controller.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let Some(controller) = controller.upgrade() else {
                    return;
                };
                let Ok(mut controller) = controller.try_borrow_mut() else {
                    return;
                };
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let index = entry
                        .target()
                        .get_attribute(REVEAL_INDEX_ATTR)
                        .and_then(|v| v.parse::<usize>().ok());
                    if let Some(index) = index {
                        controller.on_intersection(RevealId(index), entry.is_intersecting());
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        init.set_root_margin(REVEAL_ROOT_MARGIN);

        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            {
                Ok(observer) => observer,
                Err(err) => {
                    console::warn!("scroll reveal unavailable", err);
                    return 0;
                }
            };

        for (index, el) in targets.iter().enumerate() {
            let _ = el.set_attribute(REVEAL_INDEX_ATTR, &index.to_string());
            observer.observe(el);
        }

        let count = targets.len();
        self.reveal_targets = targets;
        self.observer = Some(observer);
        self.observer_callback = Some(callback);
        count
    }

    fn reveal(&mut self, target: RevealId) {
        if let Some(el) = self.reveal_targets.get(target.0) {
            let _ = el.class_list().add_1(REVEAL_CLASS);
        }
    }

    fn unobserve(&mut self, target: RevealId) {
        if let (Some(observer), Some(el)) = (&self.observer, self.reveal_targets.get(target.0)) {
            observer.unobserve(el);
        }
    }

    fn disconnect_observer(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.observer_callback = None;
    }

    fn write_clipboard(&mut self, text: &str) {
        let controller = self.controller.clone();
        let write = clipboard_write(text);
        spawn_local(async move {
            let result = match write {
                Ok(promise) => JsFuture::from(promise).await.map(|_| ()),
                Err(err) => Err(err),
            };
            let Some(controller) = controller.upgrade() else {
                return;
            };
            if let Ok(mut controller) = controller.try_borrow_mut() {
                controller.on_clipboard_settled(result.map_err(|err| format!("{:?}", err)));
            }
        });
    }

    fn console_log(&mut self, message: &str) {
        console::log!(message);
    }
}

/// `navigator.clipboard.writeText(text)`, failing if the API is missing.
fn clipboard_write(text: &str) -> Result<Promise, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<Function>()?;
    write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()
}

// ============================================================================
// Timers
// ============================================================================

enum Handle {
    Once(Timeout),
    Every(Interval),
}

pub struct GlooScheduler {
    controller: Weak<RefCell<WebController>>,
    handles: HashMap<TimerId, Handle>,
}

impl GlooScheduler {
    fn new(controller: Weak<RefCell<WebController>>) -> Self {
        Self {
            controller,
            handles: HashMap::new(),
        }
    }
}

impl Scheduler for GlooScheduler {
    fn arm(&mut self, id: TimerId, delay: Duration, repeat: bool) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let controller = self.controller.clone();
        let fire = move || dispatch_timer(&controller, id);

        let handle = if repeat {
            Handle::Every(Interval::new(millis, fire))
        } else {
            Handle::Once(Timeout::new(millis, fire))
        };
        if let Some(old) = self.handles.insert(id, handle) {
            retire(old);
        }
    }

    fn disarm(&mut self, id: TimerId) {
        if let Some(handle) = self.handles.remove(&id) {
            retire(handle);
        }
    }
}

/// Stop a timer now and release its closure on a later tick, since the
/// timer being stopped may be the one whose callback is on the stack.
fn retire(handle: Handle) {
    let closure = match handle {
        Handle::Once(timeout) => timeout.cancel(),
        Handle::Every(interval) => interval.cancel(),
    };
    spawn_local(async move {
        drop(closure);
    });
}

fn dispatch_timer(controller: &Weak<RefCell<WebController>>, id: TimerId) {
    if let Some(controller) = controller.upgrade() {
        if let Ok(mut controller) = controller.try_borrow_mut() {
            controller.on_timer(id);
        }
    }
}

// ============================================================================
// Event wiring
// ============================================================================

struct Page {
    controller: Rc<RefCell<WebController>>,
    listeners: Vec<EventListener>,
}

impl Page {
    fn mount() -> Result<Page, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let controller = Rc::new_cyclic(|weak: &Weak<RefCell<WebController>>| {
            RefCell::new(PageController::new(
                WebDom::new(document.clone(), weak.clone()),
                GlooScheduler::new(weak.clone()),
            ))
        });

        let mut listeners = Vec::new();
        bind_file_picker(&document, &controller, &mut listeners);
        bind_form(&document, &controller, &mut listeners);
        bind_anchors(&document, &controller, &mut listeners);

        controller.borrow_mut().init();

        Ok(Page {
            controller,
            listeners,
        })
    }

    fn teardown(mut self) {
        self.listeners.clear();
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.teardown();
        }
    }
}

/// Attach `handler` to `event` on `target`. The handler is skipped if the
/// controller is already busy further up the stack.
fn listen<F>(
    target: &EventTarget,
    event: &'static str,
    prevent_default: bool,
    controller: &Rc<RefCell<WebController>>,
    handler: F,
) -> EventListener
where
    F: Fn(&mut WebController, &Event) + 'static,
{
    let weak = Rc::downgrade(controller);
    let options = if prevent_default {
        EventListenerOptions::enable_prevent_default()
    } else {
        EventListenerOptions::default()
    };
    EventListener::new_with_options(target, event, options, move |event| {
        if prevent_default {
            event.prevent_default();
        }
        if let Some(controller) = weak.upgrade() {
            if let Ok(mut controller) = controller.try_borrow_mut() {
                handler(&mut controller, event);
            }
        }
    })
}

fn file_metas(files: &FileList) -> Vec<FileMeta> {
    (0..files.length())
        .filter_map(|i| files.item(i))
        .map(|file| FileMeta::new(file.name(), file.type_()))
        .collect()
}

fn bind_file_picker(
    document: &Document,
    controller: &Rc<RefCell<WebController>>,
    listeners: &mut Vec<EventListener>,
) {
    let (Some(area), Some(input)) = (
        document.get_element_by_id(ids::UPLOAD_AREA),
        document.get_element_by_id(ids::FILE_INPUT),
    ) else {
        return;
    };

    listeners.push(listen(&area, "dragover", true, controller, |c, _| {
        c.on_drag_over()
    }));
    listeners.push(listen(&area, "dragleave", true, controller, |c, _| {
        c.on_drag_leave()
    }));
    listeners.push(listen(&area, "drop", true, controller, |c, event| {
        let files = event
            .dyn_ref::<DragEvent>()
            .and_then(|drag| drag.data_transfer())
            .and_then(|transfer| transfer.files());
        let metas = files.as_ref().map(file_metas).unwrap_or_default();
        c.dom_mut().pending_drop = files;
        c.on_drop(&metas);
        c.dom_mut().pending_drop = None;
    }));
    listeners.push(listen(&area, "click", false, controller, |c, _| {
        c.on_upload_area_click()
    }));
    listeners.push(listen(&input, "change", false, controller, |c, event| {
        let files = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files());
        let metas = files.as_ref().map(file_metas).unwrap_or_default();
        c.on_file_change(&metas);
    }));

    if let Some(remove) = document.get_element_by_id(ids::REMOVE_FILE) {
        listeners.push(listen(&remove, "click", false, controller, |c, _| {
            c.on_remove_file()
        }));
    }
}

fn bind_form(
    document: &Document,
    controller: &Rc<RefCell<WebController>>,
    listeners: &mut Vec<EventListener>,
) {
    let Some(form) = document.get_element_by_id(ids::ANALYZE_FORM) else {
        return;
    };

    let document = document.clone();
    listeners.push(listen(&form, "submit", true, controller, move |c, _| {
        let description = job_description(&document);
        let _ = c.on_submit(&description);
    }));
}

fn job_description(document: &Document) -> String {
    let Some(el) = document.get_element_by_id(ids::JOB_DESCRIPTION) else {
        return String::new();
    };
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    el.dyn_ref::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

fn bind_anchors(
    document: &Document,
    controller: &Rc<RefCell<WebController>>,
    listeners: &mut Vec<EventListener>,
) {
    let Ok(anchors) = document.query_selector_all(ANCHOR_SELECTOR) else {
        return;
    };
    for anchor in (0..anchors.length()).filter_map(|i| anchors.item(i)) {
        listeners.push(listen(&anchor, "click", true, controller, |c, event| {
            let href = event
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|anchor| anchor.get_attribute("href"));
            if let Some(href) = href {
                c.on_anchor_click(&href);
            }
        }));
    }
}

// ============================================================================
// Exports
// ============================================================================

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn with_controller(f: impl FnOnce(&mut WebController)) {
    PAGE.with(|slot| {
        if let Some(page) = slot.borrow().as_ref() {
            if let Ok(mut controller) = page.controller.try_borrow_mut() {
                f(&mut controller);
            }
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let page = Page::mount()?;
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

/// Detach every listener, cancel pending timers, disconnect the observer.
#[wasm_bindgen]
pub fn teardown() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    if let Some(page) = page {
        page.teardown();
    }
}

#[wasm_bindgen(js_name = showAlert)]
pub fn show_alert(message: &str, severity: Option<String>) {
    let severity = severity
        .as_deref()
        .map(Severity::from_tag)
        .unwrap_or_default();
    with_controller(|c| {
        c.notify(message, severity);
    });
}

#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard(text: &str) {
    with_controller(|c| c.copy_to_clipboard(text));
}

#[wasm_bindgen(js_name = animateProgressBar)]
pub fn animate_progress_bar(element_id: &str, target_value: f64) {
    with_controller(|c| c.animate_progress_bar(element_id, target_value));
}

#[wasm_bindgen(js_name = createSkillsChart)]
pub fn create_skills_chart(canvas_id: &str, data: JsValue) {
    let data: serde_json::Value =
        serde_wasm_bindgen::from_value(data).unwrap_or(serde_json::Value::Null);
    with_controller(|c| c.create_skills_chart(canvas_id, &data));
}
