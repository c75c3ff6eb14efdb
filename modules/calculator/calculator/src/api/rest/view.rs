//! HTML view for the calculator form.
//!
//! The page template uses `{{ name }}` placeholders. Substitution is a single
//! pass, so user input containing placeholder syntax is never re-expanded.

use std::fmt::Write as _;

use calculator_sdk::Operator;

const PAGE_TEMPLATE: &str = include_str!("../../../templates/index.html");

/// View model for the calculator page. All fields are raw (unescaped) text.
#[derive(Debug, Clone, Copy)]
pub struct CalcPage<'a> {
    pub title: &'a str,
    pub op1: &'a str,
    pub op2: &'a str,
    pub op: &'a str,
    pub result: &'a str,
}

impl CalcPage<'_> {
    #[must_use]
    pub fn render(&self) -> String {
        render_template(PAGE_TEMPLATE, |key| match key {
            "title" => Some(escape_html(self.title)),
            "op1" => Some(escape_html(self.op1)),
            "op2" => Some(escape_html(self.op2)),
            "result" => Some(escape_html(self.result)),
            "operators" => Some(operator_radios(self.op)),
            _ => None,
        })
    }
}

fn operator_radios(selected: &str) -> String {
    let mut out = String::new();
    for op in Operator::SUPPORTED {
        let checked = if op.token() == selected { " checked" } else { "" };
        let _ = writeln!(
            out,
            r#"      <label><input type="radio" name="op" value="{token}"{checked}> {symbol}</label>"#,
            token = op.token(),
            symbol = escape_html(op.symbol()),
        );
    }
    out
}

/// Replace `{{ key }}` placeholders via `lookup`. Unknown keys are left as-is.
fn render_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(len) = after_open.find("}}") else {
            break;
        };
        let placeholder = &rest[start..start + 2 + len + 2];
        match lookup(after_open[..len].trim()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(placeholder),
        }
        rest = &after_open[len + 2..];
    }

    // `rest` still starts at an unterminated `{{` when the loop broke early
    if let Some(start) = rest.find("{{") {
        out.push_str(&rest[start..]);
    } else {
        out.push_str(rest);
    }
    out
}

/// Escape text for use in HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
