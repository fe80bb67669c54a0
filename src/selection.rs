#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub disabled: bool,
}

/// A single-choice list control (team or opponent picker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
    pub options: Vec<SelectOption>,
    pub selected: usize,
}

impl SelectControl {
    pub fn new(values: &[String], selected: usize) -> Self {
        let options = values
            .iter()
            .map(|value| SelectOption {
                value: value.clone(),
                disabled: false,
            })
            .collect::<Vec<_>>();
        let selected = selected.min(options.len().saturating_sub(1));
        Self { options, selected }
    }

    pub fn value(&self) -> Option<&str> {
        self.options.get(self.selected).map(|o| o.value.as_str())
    }

    pub fn is_disabled(&self, value: &str) -> bool {
        self.options
            .iter()
            .any(|o| o.value == value && o.disabled)
    }

    /// Selection currently points at an option the other control disabled.
    pub fn selection_is_stale(&self) -> bool {
        self.options
            .get(self.selected)
            .is_some_and(|o| o.disabled)
    }

    /// Move to the next enabled option. Returns whether the selection changed.
    pub fn select_next(&mut self) -> bool {
        let len = self.options.len();
        for step in 1..len {
            let idx = (self.selected + step) % len;
            if !self.options[idx].disabled {
                self.selected = idx;
                return true;
            }
        }
        false
    }

    pub fn select_prev(&mut self) -> bool {
        let len = self.options.len();
        for step in 1..len {
            let idx = (self.selected + len - step) % len;
            if !self.options[idx].disabled {
                self.selected = idx;
                return true;
            }
        }
        false
    }

    /// Select by value, ignoring the disabled flag (programmatic selection).
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o.value == value) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }
}

/// Recompute `other`'s disabled flags from scratch: exactly the options equal
/// to `changed_value` are disabled. `other`'s own selection is not touched.
pub fn enforce_exclusion(changed_value: Option<&str>, other: &mut SelectControl) {
    for option in &mut other.options {
        option.disabled = changed_value.is_some_and(|v| option.value == v);
    }
}
