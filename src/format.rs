//! Display helpers shared by the HTML renderers.

/// en-US style grouping with at most `max_fraction` decimals, trailing zeros dropped.
pub fn grouped(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }
    let text = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (text.as_str(), ""),
    };

    let mut out = String::with_capacity(text.len() + 4);
    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    if negative {
        out.push('-');
    }
    let digits = int_part.len();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (digits - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Fixed number of decimals, no grouping.
pub fn fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }
    format!("{:.*}", digits, value)
}

pub fn euros(value: f64) -> String {
    format!("€{}", grouped(value, 2))
}

pub fn euros_fixed(value: f64) -> String {
    format!("€{}", fixed(value, 2))
}

pub fn count(value: f64) -> String {
    grouped(value.round(), 0)
}

pub fn percent(value: f64, digits: usize) -> String {
    format!("{}%", fixed(value, digits))
}

pub fn esc(text: impl AsRef<str>) -> String {
    let text = text.as_ref();
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
