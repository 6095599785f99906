//! Form field component types.
//!
//! Back-office forms are described as a list of [`FormField`]s and rendered
//! by one template. Values are always the raw strings last submitted, so a
//! rejected form comes back exactly as typed.

use serde::Serialize;

/// Option of a select field.
#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum FieldKind {
    Input(&'static str),
    TextArea,
    Select,
}

/// One labelled form control.
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub required: bool,
    pub hint: Option<String>,
    pub options: Vec<SelectOption>,
    kind: FieldKind,
}

impl FormField {
    fn input(input_type: &'static str, name: &str, label: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: value.to_string(),
            required: false,
            hint: None,
            options: vec![],
            kind: FieldKind::Input(input_type),
        }
    }

    #[must_use]
    pub fn text(name: &str, label: &str, value: &str) -> Self {
        Self::input("text", name, label, value)
    }

    #[must_use]
    pub fn email(name: &str, label: &str, value: &str) -> Self {
        Self::input("email", name, label, value)
    }

    /// Password input. Never prefilled.
    #[must_use]
    pub fn password(name: &str, label: &str) -> Self {
        Self::input("password", name, label, "")
    }

    #[must_use]
    pub fn tel(name: &str, label: &str, value: &str) -> Self {
        Self::input("tel", name, label, value)
    }

    #[must_use]
    pub fn url(name: &str, label: &str, value: &str) -> Self {
        Self::input("url", name, label, value)
    }

    #[must_use]
    pub fn date(name: &str, label: &str, value: &str) -> Self {
        Self::input("date", name, label, value)
    }

    #[must_use]
    pub fn time(name: &str, label: &str, value: &str) -> Self {
        Self::input("time", name, label, value)
    }

    #[must_use]
    pub fn number(name: &str, label: &str, value: &str) -> Self {
        Self::input("number", name, label, value)
    }

    #[must_use]
    pub fn textarea(name: &str, label: &str, value: &str) -> Self {
        Self {
            kind: FieldKind::TextArea,
            ..Self::input("text", name, label, value)
        }
    }

    /// Select over `(value, label)` pairs with `value` preselected.
    #[must_use]
    pub fn select(name: &str, label: &str, options: &[(&str, &str)], value: &str) -> Self {
        let options = options
            .iter()
            .map(|(v, l)| SelectOption {
                value: (*v).to_string(),
                label: (*l).to_string(),
                selected: *v == value,
            })
            .collect();
        Self {
            kind: FieldKind::Select,
            options,
            ..Self::input("text", name, label, value)
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Helper text under the control.
    #[must_use]
    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    /// `type` attribute of an `<input>`.
    #[must_use]
    pub const fn input_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Input(t) => t,
            FieldKind::TextArea | FieldKind::Select => "text",
        }
    }

    #[must_use]
    pub fn is_textarea(&self) -> bool {
        self.kind == FieldKind::TextArea
    }

    #[must_use]
    pub fn is_select(&self) -> bool {
        self.kind == FieldKind::Select
    }
}
