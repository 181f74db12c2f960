//! Simple test fixtures used across unit tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use formwalk_domain::{
    FieldDefinition, FieldId, FieldOption, FieldType, FormSchema, FormSection, SectionId,
};

use crate::application::view::SessionView;
use crate::ports::outbound::RenderSurfacePort;
use crate::session_types::SessionKey;

pub fn key(roll_number: &str) -> SessionKey {
    SessionKey::new(roll_number).expect("fixture session key must not be blank")
}

fn field_id(id: &str) -> FieldId {
    FieldId::new(id).expect("fixture field id must not be blank")
}

fn section_id(id: &str) -> SectionId {
    SectionId::new(id).expect("fixture section id must not be blank")
}

/// Two sections: required `name` (text), then required `contact` (email).
pub fn name_contact_schema() -> FormSchema {
    FormSchema::new(
        "Registration",
        vec![
            FormSection::new(section_id("1"), "About you").with_field(
                FieldDefinition::new(field_id("name"), FieldType::Text, "Name")
                    .required()
                    .with_placeholder("Your full name"),
            ),
            FormSection::new(section_id("2"), "Contact").with_field(
                FieldDefinition::new(field_id("contact"), FieldType::Email, "Email").required(),
            ),
        ],
    )
    .expect("fixture schema is valid")
}

/// One section with an optional `colors` checkbox group and `size` dropdown.
pub fn colors_schema() -> FormSchema {
    FormSchema::new(
        "Preferences",
        vec![FormSection::new(section_id("prefs"), "Preferences")
            .with_field(
                FieldDefinition::new(field_id("colors"), FieldType::Checkbox, "Colours")
                    .with_options(vec![
                        FieldOption::new("red", "Red"),
                        FieldOption::new("green", "Green"),
                        FieldOption::new("blue", "Blue"),
                    ]),
            )
            .with_field(
                FieldDefinition::new(field_id("size"), FieldType::Dropdown, "Size").with_options(
                    vec![
                        FieldOption::new("s", "Small"),
                        FieldOption::new("m", "Medium"),
                        FieldOption::new("l", "Large"),
                    ],
                ),
            )],
    )
    .expect("fixture schema is valid")
}

/// Render surface that keeps every view it is shown.
#[derive(Default)]
pub struct RecordingSurface {
    views: Mutex<Vec<SessionView>>,
}

impl RecordingSurface {
    pub fn views(&self) -> Vec<SessionView> {
        self.views.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl RenderSurfacePort for RecordingSurface {
    fn present(&self, view: &SessionView) {
        if let Ok(mut views) = self.views.lock() {
            views.push(view.clone());
        }
    }
}

/// Cloneable in-memory writer for inspecting terminal output.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .0
            .lock()
            .map_err(|_| io::Error::other("buffer poisoned"))?;
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
