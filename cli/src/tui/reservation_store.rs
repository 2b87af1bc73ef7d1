// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, collections::BTreeMap, error::Error, rc::Rc};

use raplamobile_core::{Attribute, AttributeType, Classification, DynamicType, format_value};

use crate::tui::component_form::AttributeStoreLike;
use crate::tui::dispatcher::{Action, Dispatcher};

/// Attribute texts of a reservation under edit.
#[derive(Debug)]
pub struct ReservationStore {
    pub attributes: Vec<Attribute>,
    pub data: BTreeMap<String, String>,
    classification: Classification,

    /// Whether any attribute has been changed
    pub dirty: bool,

    /// Whether the user submit the changes
    pub submit: bool,
}

impl ReservationStore {
    pub fn new(dynamic_type: &DynamicType, classification: &Classification) -> Self {
        let attributes: Vec<_> = dynamic_type.editable_attributes().cloned().collect();
        let data = attributes
            .iter()
            .map(|attr| {
                let text = classification
                    .get(&attr.key)
                    .map(format_value)
                    .unwrap_or_default();
                (attr.key.clone(), text)
            })
            .collect();

        Self {
            attributes,
            data,
            classification: classification.clone(),
            dirty: false,
            submit: false,
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| match action {
            Action::UpdateAttribute(key, value) => {
                let mut that = that.borrow_mut();
                if let Some(text) = that.data.get_mut(key) {
                    *text = value.clone();
                    that.dirty = true;
                }
            }
            Action::SubmitChanges => that.borrow_mut().submit = true,
            _ => {}
        }));
        dispatcher.register(callback);
    }

    /// Parses every field back into the classification.
    ///
    /// Blank date and category fields clear the attribute.
    pub fn submit_classification(self) -> Result<Classification, Box<dyn Error>> {
        let mut classification = self.classification;
        for attr in &self.attributes {
            let text = self.data.get(&attr.key).map(String::as_str).unwrap_or("");
            let optional = matches!(attr.kind, AttributeType::Date | AttributeType::Category);
            if optional && text.trim().is_empty() {
                classification.values.remove(&attr.key);
                continue;
            }

            let value = attr
                .parse(text)
                .map_err(|e| format!("Invalid {}: {e}", attr.label()))?;
            classification.set(&attr.key, value);
        }
        Ok(classification)
    }
}

impl AttributeStoreLike for ReservationStore {
    fn attribute_text(&self, key: &str) -> String {
        self.data.get(key).cloned().unwrap_or_default()
    }
}
