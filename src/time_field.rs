/// Longest raw text a time field keeps while editing.
const MAX_RAW_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hour,
    Minute,
}

impl TimeUnit {
    pub fn max(self) -> i64 {
        match self {
            TimeUnit::Hour => 23,
            TimeUnit::Minute => 59,
        }
    }
}

/// One numeric sub-field of the kickoff time.
///
/// The raw text is kept as typed, up to two characters. It is only
/// zero-padded on blur and when a request is assembled, so mid-edit values
/// such as `"7"`, `"-"` or `""` are normal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeField {
    pub unit: TimeUnit,
    pub raw: String,
}

impl TimeField {
    pub fn new(unit: TimeUnit) -> Self {
        Self {
            unit,
            raw: String::new(),
        }
    }

    pub fn with_value(unit: TimeUnit, raw: &str) -> Self {
        Self {
            unit,
            raw: raw.to_string(),
        }
    }

    /// Clamp after an edit. Non-numeric text is left alone. In-range numbers
    /// keep their spelling while it is at most two plain digits (`"07"`);
    /// anything else (`"007"`, `"3pm"`) is rewritten to the bare value.
    pub fn on_edit(&mut self) {
        let Some(value) = parse_leading_int(&self.raw) else {
            return;
        };
        if value < 0 {
            self.raw = "0".to_string();
        } else if value > self.unit.max() {
            self.raw = self.unit.max().to_string();
        } else if !is_plain_digits(&self.raw) {
            self.raw = value.to_string();
        }
    }

    pub fn on_blur(&mut self) {
        if !self.raw.is_empty() {
            self.raw = self.padded();
        }
    }

    /// Submission form of the field: the clamped value as two digits, or
    /// `"00"` when nothing parses. Does not depend on blur having run.
    pub fn padded(&self) -> String {
        let value = parse_leading_int(&self.raw)
            .unwrap_or(0)
            .clamp(0, self.unit.max());
        format!("{value:02}")
    }

    /// Digits anywhere, `-` only as the first character.
    pub fn insert_char(&mut self, ch: char) {
        let accepted = ch.is_ascii_digit() || (ch == '-' && self.raw.is_empty());
        if !accepted {
            return;
        }
        if self.raw.chars().count() >= MAX_RAW_LEN {
            return;
        }
        self.raw.push(ch);
        self.on_edit();
    }

    pub fn backspace(&mut self) {
        self.raw.pop();
        self.on_edit();
    }
}

/// Lenient integer parse: optional leading whitespace and sign, then the
/// longest run of ASCII digits. Trailing garbage is ignored.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    // Saturate instead of overflowing; anything this large clamps anyway.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn is_plain_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.len() <= MAX_RAW_LEN && raw.bytes().all(|b| b.is_ascii_digit())
}
