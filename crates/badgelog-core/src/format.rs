//! printf-style formatting of plain messages
//!
//! A template string consumes substitution arguments through `%s`, `%d`,
//! `%i`, `%f`, `%j`, `%o`, `%O` and `%c`; `%%` yields a literal percent sign.
//! Arguments left over after the template are appended, separated by spaces.
//! Non-string messages are inspected and followed by all arguments.
//!
//! Numeric specifiers read strings the way JavaScript does: `%d` converts the
//! whole string (exponents and `0x`/`0o`/`0b` literals included), `%i` takes
//! the leading integer (decimal or `0x`), `%f` the leading decimal number.
//! Anything unreadable prints `NaN`.
//!
//! Inspection renders values on a single line: strings quoted, object keys
//! bare when they are identifiers, and containers nested deeper than
//! [`INSPECT_DEPTH`] collapsed to `[Object]` / `[Array]`.

use serde_json::{Map, Value};

/// Nesting level beyond which containers are collapsed during inspection
pub const INSPECT_DEPTH: usize = 2;

/// Format a message value together with its substitution arguments
///
/// # Example
///
/// ```
/// use badgelog_core::format::format;
/// use serde_json::json;
///
/// assert_eq!(format(&json!("%s has %d items"), &[json!("cart"), json!(3)]), "cart has 3 items");
/// assert_eq!(format(&json!({ "id": 7 }), &[]), "{ id: 7 }");
/// ```
pub fn format(value: &Value, args: &[Value]) -> String {
    match value {
        Value::String(template) if args.is_empty() => template.clone(),
        Value::String(template) => substitute(template, args),
        other => {
            let mut out = inspect(other);
            for arg in args {
                out.push(' ');
                out.push_str(&display(arg));
            }
            out
        }
    }
}

/// Inspect a value the way it is shown inside formatted output
pub fn inspect(value: &Value) -> String {
    inspect_at(value, 0)
}

fn substitute(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let Some(&spec) = chars.peek() else {
            out.push('%');
            break;
        };

        if spec == '%' {
            chars.next();
            out.push('%');
            continue;
        }

        if !matches!(spec, 's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O' | 'c') {
            out.push('%');
            continue;
        }

        chars.next();
        let Some(arg) = remaining.next() else {
            out.push('%');
            out.push(spec);
            continue;
        };

        match spec {
            's' => out.push_str(&display(arg)),
            'd' => out.push_str(&to_number(arg).map(format_number).unwrap_or_else(nan)),
            'i' => out.push_str(&to_integer(arg).map(format_number).unwrap_or_else(nan)),
            'f' => out.push_str(&to_float(arg).map(format_number).unwrap_or_else(nan)),
            'j' => out.push_str(&arg.to_string()),
            'o' | 'O' => out.push_str(&inspect(arg)),
            // %c carries CSS in browsers; the argument is consumed and dropped
            _ => {}
        }
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&display(arg));
    }

    out
}

fn nan() -> String {
    "NaN".to_string()
}

/// Strings verbatim, everything else inspected
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => inspect(other),
    }
}

fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::String(s) => parse_number(s),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_float(s),
        _ => None,
    }
}

fn to_integer(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().map(f64::trunc),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn signed(negative: bool, n: f64) -> f64 {
    if negative {
        -n
    } else {
        n
    }
}

/// Whole-string conversion: decimal with optional exponent, `Infinity`,
/// unsigned `0x`/`0o`/`0b` literals; blank is zero
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if s.get(..2).is_some_and(|p| p.eq_ignore_ascii_case(prefix)) {
            let digits = &s[2..];
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return Some(digits_value(digits, radix));
        }
    }

    let (negative, unsigned) = split_sign(s);
    if unsigned == "Infinity" {
        return Some(signed(negative, f64::INFINITY));
    }
    if !s.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) {
        return None;
    }
    s.parse().ok()
}

/// Integer prefix of `s`, decimal or `0x` hex
fn leading_integer(s: &str) -> Option<f64> {
    let (negative, rest) = split_sign(s.trim_start());
    let (digits, radix) = match rest.get(..2) {
        Some(p) if p.eq_ignore_ascii_case("0x") => (&rest[2..], 16),
        _ => (rest, 10),
    };

    let end = digits.find(|c: char| !c.is_digit(radix)).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    Some(signed(negative, digits_value(&digits[..end], radix)))
}

/// Decimal prefix of `s`, fraction and exponent included
fn leading_float(s: &str) -> Option<f64> {
    let (negative, rest) = split_sign(s.trim_start());
    if rest.starts_with("Infinity") {
        return Some(signed(negative, f64::INFINITY));
    }

    let bytes = rest.as_bytes();
    let digits_from = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = digits_from(0);
    let mut seen_digit = end > 0;
    if bytes.get(end) == Some(&b'.') {
        let fraction = digits_from(end + 1);
        seen_digit |= fraction > 0;
        end += 1 + fraction;
    }
    if !seen_digit {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits_from(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    rest[..end].parse().ok().map(|n| signed(negative, n))
}

fn digits_value(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        nan()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        n.to_string()
    }
}

fn inspect_at(value: &Value, level: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (_, Some(u)) => u.to_string(),
            _ => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        },
        Value::String(s) => quote(s),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(_) if level > INSPECT_DEPTH => "[Array]".to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(|item| inspect_at(item, level + 1)).collect();
            format!("[ {} ]", parts.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(_) if level > INSPECT_DEPTH => "[Object]".to_string(),
        Value::Object(map) => inspect_object(map, level),
    }
}

fn inspect_object(map: &Map<String, Value>, level: usize) -> String {
    let parts: Vec<String> = map
        .iter()
        .map(|(key, value)| {
            let key = if is_identifier(key) { key.clone() } else { quote(key) };
            format!("{}: {}", key, inspect_at(value, level + 1))
        })
        .collect();
    format!("{{ {} }}", parts.join(", "))
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\n', "\\n");
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}
