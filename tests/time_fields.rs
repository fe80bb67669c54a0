use chrono::Weekday;

use predict_terminal::config::Config;
use predict_terminal::form::{FormField, FormState};
use predict_terminal::time_field::{TimeField, TimeUnit, parse_leading_int};

fn edited(unit: TimeUnit, raw: &str) -> String {
    let mut field = TimeField::with_value(unit, raw);
    field.on_edit();
    field.raw
}

#[test]
fn hours_clamp_into_range_on_edit() {
    for h in -30..=120 {
        let shown = edited(TimeUnit::Hour, &h.to_string());
        let value: i64 = shown.parse().expect("numeric after clamp");
        assert_eq!(value, (h as i64).clamp(0, 23), "input {h}");
    }
}

#[test]
fn minutes_clamp_into_range_on_edit() {
    for m in -10..=150 {
        let shown = edited(TimeUnit::Minute, &m.to_string());
        let value: i64 = shown.parse().expect("numeric after clamp");
        assert_eq!(value, (m as i64).clamp(0, 59), "input {m}");
    }
}

#[test]
fn typing_99_in_hours_clamps_immediately() {
    let mut field = TimeField::new(TimeUnit::Hour);
    field.insert_char('9');
    assert_eq!(field.raw, "9");
    field.insert_char('9');
    assert_eq!(field.raw, "23");
}

#[test]
fn in_range_text_is_kept_as_typed() {
    assert_eq!(edited(TimeUnit::Hour, "07"), "07");
    assert_eq!(edited(TimeUnit::Minute, "5"), "5");
}

#[test]
fn non_numeric_text_is_left_alone() {
    assert_eq!(edited(TimeUnit::Hour, ""), "");
    assert_eq!(edited(TimeUnit::Hour, "-"), "-");
    assert_eq!(edited(TimeUnit::Minute, "ab"), "ab");
}

#[test]
fn blur_pads_single_digits() {
    for v in 0..=59 {
        let mut field = TimeField::with_value(TimeUnit::Minute, &v.to_string());
        field.on_blur();
        assert_eq!(field.raw.len(), 2);
        assert_eq!(field.raw, format!("{v:02}"));
    }
}

#[test]
fn blur_leaves_empty_field_empty() {
    let mut field = TimeField::new(TimeUnit::Hour);
    field.on_blur();
    assert_eq!(field.raw, "");
}

#[test]
fn padded_does_not_depend_on_blur() {
    let field = TimeField::with_value(TimeUnit::Hour, "7");
    assert_eq!(field.padded(), "07");
    assert_eq!(field.raw, "7");
    assert_eq!(TimeField::new(TimeUnit::Minute).padded(), "00");
}

#[test]
fn typing_ignores_letters_and_caps_length() {
    let mut field = TimeField::new(TimeUnit::Minute);
    field.insert_char('x');
    assert_eq!(field.raw, "");
    field.insert_char('0');
    field.insert_char('0');
    field.insert_char('0');
    field.insert_char('1');
    assert_eq!(field.raw, "00");
}

#[test]
fn minus_is_only_accepted_as_the_first_character() {
    let mut field = TimeField::new(TimeUnit::Hour);
    field.insert_char('1');
    field.insert_char('-');
    assert_eq!(field.raw, "1");

    let mut field = TimeField::new(TimeUnit::Hour);
    field.insert_char('-');
    assert_eq!(field.raw, "-");
    field.insert_char('5');
    assert_eq!(field.raw, "0");
}

#[test]
fn over_long_or_suffixed_text_is_rewritten_on_edit() {
    assert_eq!(edited(TimeUnit::Hour, "007"), "7");
    assert_eq!(edited(TimeUnit::Minute, "059"), "59");
    assert_eq!(edited(TimeUnit::Hour, "3pm"), "3");
    assert_eq!(edited(TimeUnit::Hour, "+8"), "8");
    assert_eq!(edited(TimeUnit::Hour, "-0"), "0");
}

#[test]
fn padded_is_always_two_digits_in_range() {
    let cases = [
        ("", "00"),
        ("-", "00"),
        ("1-", "01"),
        ("000", "00"),
        ("007", "07"),
        ("3pm", "03"),
        ("abc", "00"),
        ("99", "23"),
        ("-4", "00"),
    ];
    for (raw, want) in cases {
        let field = TimeField::with_value(TimeUnit::Hour, raw);
        assert_eq!(field.padded(), want, "raw {raw:?}");
    }
    assert_eq!(TimeField::with_value(TimeUnit::Minute, "075").padded(), "59");
}

#[test]
fn blur_turns_a_lone_minus_into_zeros() {
    let mut field = TimeField::with_value(TimeUnit::Minute, "-");
    field.on_blur();
    assert_eq!(field.raw, "00");
}

/// Small deterministic generator so the key sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

const KEYS: &[char] = &['0', '1', '2', '3', '5', '7', '9', '-', 'x', ':', '\u{8}'];

fn type_into(form: &mut FormState, field: FormField, keys: &str) {
    form.set_focus(field);
    for ch in keys.chars() {
        if ch == '\u{8}' {
            form.backspace();
        } else {
            form.type_char(ch);
        }
    }
}

fn assert_hh_mm(time: &str, context: &str) {
    let (hh, mm) = time.split_once(':').expect("colon in time");
    assert_eq!(hh.len(), 2, "{context}: {time}");
    assert_eq!(mm.len(), 2, "{context}: {time}");
    assert!(hh.bytes().all(|b| b.is_ascii_digit()), "{context}: {time}");
    assert!(mm.bytes().all(|b| b.is_ascii_digit()), "{context}: {time}");
    let h: u32 = hh.parse().expect("hours");
    let m: u32 = mm.parse().expect("minutes");
    assert!(h <= 23, "{context}: {time}");
    assert!(m <= 59, "{context}: {time}");
}

#[test]
fn typed_time_always_submits_as_hh_mm() {
    let teams = Config::default().teams;
    let fixed = [
        ("000", "5"),
        ("-", "30"),
        ("1-", "0"),
        ("007", "059"),
        ("3pm", "99"),
        ("--", "-9"),
        ("", ""),
    ];
    let mut rng = Lcg(0x5eed);
    let random = (0..500).map(|_| {
        let mut seq = || {
            let len = (rng.next() % 6) as usize;
            (0..len)
                .map(|_| KEYS[(rng.next() as usize) % KEYS.len()])
                .collect::<String>()
        };
        (seq(), seq())
    });
    let cases = fixed
        .iter()
        .map(|(h, m)| (h.to_string(), m.to_string()))
        .chain(random.collect::<Vec<_>>());

    for (hours, minutes) in cases {
        let context = format!("{hours:?}/{minutes:?}");

        // Submitted while still focused on minutes, so no blur has run there.
        let mut form = FormState::new(&teams, Weekday::Sat);
        type_into(&mut form, FormField::Hours, &hours);
        type_into(&mut form, FormField::Minutes, &minutes);
        let request = form.build_request().expect("valid form");
        assert_hh_mm(&request.time, &context);

        // Blurring both fields first must not change what gets sent.
        form.set_focus(FormField::Submit);
        let blurred = form.build_request().expect("valid form");
        assert_eq!(blurred.time, request.time, "{context}");
        assert!(form.hours.raw.is_empty() || form.hours.raw.len() == 2, "{context}");
    }
}

#[test]
fn backspace_reclamps() {
    let mut field = TimeField::with_value(TimeUnit::Hour, "2");
    field.insert_char('0');
    assert_eq!(field.raw, "20");
    field.backspace();
    assert_eq!(field.raw, "2");
}

#[test]
fn leading_int_parse_is_lenient() {
    assert_eq!(parse_leading_int("12abc"), Some(12));
    assert_eq!(parse_leading_int("  -4"), Some(-4));
    assert_eq!(parse_leading_int("+8"), Some(8));
    assert_eq!(parse_leading_int("abc"), None);
    assert_eq!(parse_leading_int(""), None);
    assert_eq!(
        parse_leading_int("99999999999999999999999"),
        Some(i64::MAX)
    );
}
