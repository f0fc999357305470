//! Browser binding: wires an HTML dimtable to an [`EditSession`].
//!
//! The host renders the table with hidden declaration inputs and `<td>`
//! elements named `{prefix}_cell_{flat}`; cells carrying the `editable`
//! class can be edited. Clicking such a cell replaces its content with an
//! input field, and arrow/tab keys in a field move to the next editable cell.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent};

use super::{EditSession, InputConfig, InputSpec, TextInputFactory, DETECT_KEYS_CLASS};
use crate::declaration::{cell_id, parse_cell_id, TableDeclaration, DEFAULT_PREFIX};
use crate::render::EDITABLE_CLASS;
use crate::types::FlatIndex;

const EDIT_CLASS: &str = "edit";
const EDIT_BACKGROUND: &str = "#EDF5FF";

/// An editable multi-dimensional HTML table.
#[wasm_bindgen]
pub struct DimTable {
    session: Rc<RefCell<EditSession>>,
    #[allow(dead_code)]
    click_closure: Closure<dyn FnMut(MouseEvent)>,
    #[allow(dead_code)]
    key_closure: Closure<dyn FnMut(KeyboardEvent)>,
    table: HtmlElement,
}

#[wasm_bindgen]
impl DimTable {
    /// Bind to `table`, reading the declaration from the page's hidden inputs.
    ///
    /// `prefix` defaults to `"table"`; `input_config` is an optional
    /// `{ size, maxLength }` object for the text fields.
    #[wasm_bindgen(constructor)]
    pub fn new(
        table: HtmlElement,
        prefix: Option<String>,
        input_config: JsValue,
    ) -> Result<DimTable, JsValue> {
        console_error_panic_hook::set_once();

        let document = document()?;
        let prefix = prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let declaration = TableDeclaration::from_fields(&prefix, |name| {
            hidden_value(&document, name)
        })?;

        let config: InputConfig = if input_config.is_undefined() || input_config.is_null() {
            InputConfig::default()
        } else {
            serde_wasm_bindgen::from_value(input_config)?
        };
        let mut session =
            EditSession::with_factory(&declaration, Box::new(TextInputFactory::new(config)))?;
        scan_cells(&table, &mut session)?;

        let session = Rc::new(RefCell::new(session));

        let click_closure = {
            let session = Rc::clone(&session);
            let table = table.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let Some(cell) = event_element(&event)
                    .and_then(|el| el.closest(&format!("td.{EDITABLE_CLASS}")).ok().flatten())
                else {
                    return;
                };
                let prefix = session.borrow().prefix().to_string();
                if let Ok(flat) = parse_cell_id(&prefix, &cell.id()) {
                    edit(&session, &table, flat);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        table
            .add_event_listener_with_callback("click", click_closure.as_ref().unchecked_ref())
            .ok();

        let key_closure = {
            let session = Rc::clone(&session);
            let table = table.clone();
            Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if on_key_down(&session, &table, &event) {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };
        table
            .add_event_listener_with_callback("keydown", key_closure.as_ref().unchecked_ref())
            .ok();

        Ok(DimTable {
            session,
            click_closure,
            key_closure,
            table,
        })
    }

    /// Put the cell at `flat` into edit mode and focus it.
    #[wasm_bindgen]
    pub fn edit(&self, flat: FlatIndex) {
        edit(&self.session, &self.table, flat);
    }

    /// Currently focused cell.
    #[wasm_bindgen]
    pub fn focused(&self) -> Option<FlatIndex> {
        self.session.borrow().focused()
    }

    /// `[name, value]` pairs of every open cell, in flat order.
    #[wasm_bindgen(js_name = "formFields")]
    pub fn form_fields(&self) -> Result<JsValue, JsValue> {
        sync_values(&self.session, &self.table);
        let fields = self.session.borrow().form_fields();
        serde_wasm_bindgen::to_value(&fields)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn hidden_value(document: &Document, name: &str) -> Option<String> {
    document
        .query_selector(&format!("input[name=\"{name}\"]"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
}

fn has_class(element: &Element, class: &str) -> bool {
    element.class_name().split_whitespace().any(|c| c == class)
}

fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Record initial values and read-only cells from the rendered table.
fn scan_cells(table: &HtmlElement, session: &mut EditSession) -> Result<(), JsValue> {
    let prefix = session.prefix().to_string();
    let cells = table.query_selector_all("td")?;
    // Cells without a `<td>` on the page are never navigation targets.
    session.set_all_editable(false);
    for i in 0..cells.length() {
        let Some(cell) = cells.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Ok(flat) = parse_cell_id(&prefix, &cell.id()) else {
            continue;
        };
        session.set_editable(flat, has_class(&cell, EDITABLE_CLASS))?;
        session.set_value(flat, cell.inner_html())?;
    }
    Ok(())
}

fn cell_element(table: &HtmlElement, prefix: &str, flat: FlatIndex) -> Option<HtmlElement> {
    table
        .query_selector(&format!("td[id=\"{}\"]", cell_id(prefix, flat)))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn edit(session: &Rc<RefCell<EditSession>>, table: &HtmlElement, flat: FlatIndex) {
    let (opened, prefix) = {
        let mut s = session.borrow_mut();
        (s.open(flat), s.prefix().to_string())
    };
    match opened {
        Ok(input) => show(table, &prefix, flat, input.as_ref()),
        Err(e) => warn!("cannot edit cell {flat}: {e}"),
    }
}

/// Install `input` in the cell (if given) and focus the cell's field.
fn show(table: &HtmlElement, prefix: &str, flat: FlatIndex, input: Option<&InputSpec>) {
    let Some(cell) = cell_element(table, prefix, flat) else {
        return;
    };

    if let Some(spec) = input {
        if let Some(field) = create_input(spec) {
            cell.set_inner_html("");
            let _ = cell.append_child(&field);
            cell.set_class_name(&format!("{} {EDIT_CLASS}", cell.class_name()));
            let _ = cell.style().set_property("background-color", EDIT_BACKGROUND);
        }
    }

    if let Some(field) = cell
        .query_selector("input")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        let _ = field.focus();
    }
}

fn create_input(spec: &InputSpec) -> Option<HtmlInputElement> {
    let document = web_sys::window().and_then(|w| w.document())?;
    let input = document
        .create_element("input")
        .ok()?
        .dyn_into::<HtmlInputElement>()
        .ok()?;
    input.set_type("text");
    input.set_value(&spec.value);
    input.set_name(&spec.name);
    input.set_size(spec.size);
    input.set_max_length(i32::try_from(spec.max_length).unwrap_or(i32::MAX));
    input.set_class_name(&spec.class);
    Some(input)
}

/// Copy every open field's current text back into the session.
fn sync_values(session: &Rc<RefCell<EditSession>>, table: &HtmlElement) {
    let Ok(fields) = table.query_selector_all(&format!("input.{DETECT_KEYS_CLASS}")) else {
        return;
    };
    let mut s = session.borrow_mut();
    let prefix = s.prefix().to_string();
    for i in 0..fields.length() {
        let Some(field) = fields
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };
        if let Ok(flat) = parse_cell_id(&prefix, &field.name()) {
            let _ = s.set_value(flat, field.value());
        }
    }
}

/// Returns `true` if the key was a navigation key.
fn on_key_down(
    session: &Rc<RefCell<EditSession>>,
    table: &HtmlElement,
    event: &KeyboardEvent,
) -> bool {
    let Some(field) = event_element(event)
        .filter(|el| has_class(el, DETECT_KEYS_CLASS))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return false;
    };

    let (outcome, prefix) = {
        let mut s = session.borrow_mut();
        let prefix = s.prefix().to_string();
        let Ok(current) = parse_cell_id(&prefix, &field.name()) else {
            return false;
        };
        let _ = s.set_value(current, field.value());
        (s.handle_key_at(current, &event.key(), event.shift_key()), prefix)
    };

    match outcome {
        Ok(outcome) => {
            if let Some(target) = outcome.target {
                show(table, &prefix, target, outcome.input.as_ref());
            }
            outcome.consumed
        }
        Err(e) => {
            warn!("key navigation failed: {e}");
            false
        }
    }
}
