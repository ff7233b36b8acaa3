//! Control page rendering with a typed view-model over `{{ field }}` placeholders.
//!
//! The page markup lives outside the code: either the embedded
//! `assets/index.html` or a user-supplied file. Rendering splits the template
//! into [`Segment`]s once and substitutes each known [`Field`] from a
//! [`PageModel`]. Unknown placeholders are kept verbatim so custom templates
//! with their own `{{ }}` syntax pass through untouched.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::led::on_off;
use crate::state::StatusSnapshot;

/// Page shipped with the binary.
pub const EMBEDDED_TEMPLATE: &str = include_str!("../assets/index.html");

/// Where the add-on image mounts an override template.
pub const DEFAULT_TEMPLATE_PATH: &str = "/templates/index.html";

/// Values the page is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageModel {
    pub has_leds: bool,
    pub auto_mode: bool,
    pub power: bool,
    pub activity: bool,
}

impl From<StatusSnapshot> for PageModel {
    fn from(s: StatusSnapshot) -> Self {
        Self {
            has_leds: s.has_leds,
            auto_mode: s.auto_mode,
            power: s.power,
            activity: s.activity,
        }
    }
}

/// A placeholder the renderer knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `"Yes"` / `"No"`.
    LedsDetected,
    /// CSS `display` value for the simulation warning.
    WarningDisplay,
    AutoMode,
    Power,
    Activity,
}

impl Field {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "leds_detected" => Some(Field::LedsDetected),
            "warning_display" => Some(Field::WarningDisplay),
            "auto_mode" => Some(Field::AutoMode),
            "power" => Some(Field::Power),
            "activity" => Some(Field::Activity),
            _ => None,
        }
    }

    pub fn value(self, model: &PageModel) -> &'static str {
        match self {
            Field::LedsDetected => {
                if model.has_leds {
                    "Yes"
                } else {
                    "No"
                }
            }
            Field::WarningDisplay => {
                if model.has_leds {
                    "none"
                } else {
                    "block"
                }
            }
            Field::AutoMode => on_off(model.auto_mode),
            Field::Power => on_off(model.power),
            Field::Activity => on_off(model.activity),
        }
    }
}

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Field(Field),
}

/// Split a template into literal text and known fields.
pub fn parse(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;
    // Start of the literal run not yet pushed.
    let mut text_start = 0;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        let placeholder_end = open + 2 + close + 2;
        if let Some(field) = Field::from_name(after_open[..close].trim()) {
            let literal = &template[text_start..offset + open];
            if !literal.is_empty() {
                segments.push(Segment::Text(literal));
            }
            segments.push(Segment::Field(field));
            text_start = offset + placeholder_end;
        }
        offset += placeholder_end;
        rest = &template[offset..];
    }

    if text_start < template.len() {
        segments.push(Segment::Text(&template[text_start..]));
    }
    segments
}

/// Render a template string against a model.
pub fn render(template: &str, model: &PageModel) -> String {
    let mut out = String::with_capacity(template.len());
    for segment in parse(template) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Field(field) => out.push_str(field.value(model)),
        }
    }
    out
}

/// Where the page template comes from.
///
/// The override file is re-read on every request so it can be edited
/// without restarting the add-on.
#[derive(Debug, Clone, Default)]
pub struct TemplateSource {
    override_path: Option<PathBuf>,
}

impl TemplateSource {
    pub fn new(override_path: Option<PathBuf>) -> Self {
        Self { override_path }
    }

    pub fn embedded() -> Self {
        Self::default()
    }

    /// The override file if it exists and is readable, else the embedded page.
    pub fn load(&self) -> Cow<'static, str> {
        if let Some(path) = self.override_path.as_deref()
            && path.exists()
        {
            match std::fs::read_to_string(path) {
                Ok(contents) => return Cow::Owned(contents),
                Err(e) => log::error!("Error loading template {}: {e}", path.display()),
            }
        }
        Cow::Borrowed(EMBEDDED_TEMPLATE)
    }

    pub fn render(&self, model: &PageModel) -> String {
        render(&self.load(), model)
    }
}
