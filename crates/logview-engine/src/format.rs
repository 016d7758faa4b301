//! Display-format templates, applied after sorting.
//!
//! A template is literal text with at most one placeholder, `{}` or
//! `{:SPEC}`, where `SPEC` is `[0][width][,][.precision][type]` and `type`
//! is one of:
//! - `d` — integer, zero-padded to `width` when the `0` flag is set
//! - `f` — fixed-point with `precision` decimals (default 6)
//! - `%` — value x 100 with `precision` decimals (default 6), `%` appended
//! - `s` (or none) — the value's display form
//! The `,` flag groups integer digits in thousands. `{{` and `}}` escape
//! literal braces. Failures surface per cell as `FORMAT_ERROR:` strings.

use logview_types::{Row, Scalar, ViewConfig};

/// Rewrite each formatted column's non-null cells in place. One cell's
/// failure never touches another cell; null cells are never formatted and
/// never become error strings.
pub fn apply_display_formats(rows: &mut [Row], view: &ViewConfig) {
    for (column, template) in &view.columns.format {
        if template.is_empty() {
            continue;
        }

        let parsed = Template::parse(template);

        for row in rows.iter_mut() {
            let Some(value) = row.get(column) else {
                continue;
            };
            if value.is_null() {
                continue;
            }

            let formatted = match &parsed {
                Ok(template) => template.render(&value.coerce_numeric_string()),
                Err(message) => Err(message.clone()),
            };
            let cell = match formatted {
                Ok(text) => Scalar::Str(text),
                Err(message) => Scalar::Str(format!("FORMAT_ERROR: {}", message)),
            };
            row.insert(column.clone(), cell);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Int,
    Float,
    Percent,
    Display,
}

#[derive(Debug, Clone, PartialEq)]
struct FormatSpec {
    zero_pad: bool,
    width: Option<usize>,
    grouped: bool,
    precision: Option<usize>,
    kind: Kind,
}

/// A parsed template: literal prefix, optional placeholder, literal suffix.
#[derive(Debug, Clone, PartialEq)]
struct Template {
    prefix: String,
    spec: Option<FormatSpec>,
    suffix: String,
}

impl Template {
    fn parse(input: &str) -> Result<Template, String> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut spec: Option<FormatSpec> = None;
        let mut literal = &mut prefix;

        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err("unmatched '}' in template".to_string()),
                '{' => {
                    if spec.is_some() {
                        return Err("template may contain only one placeholder".to_string());
                    }
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            None => return Err("unterminated placeholder".to_string()),
                            Some('}') => break,
                            Some(c) => body.push(c),
                        }
                    }
                    spec = Some(FormatSpec::parse(&body)?);
                    literal = &mut suffix;
                }
                c => literal.push(c),
            }
        }

        Ok(Template {
            prefix,
            spec,
            suffix,
        })
    }

    fn render(&self, value: &Scalar) -> Result<String, String> {
        let middle = match &self.spec {
            Some(spec) => spec.render(value)?,
            None => String::new(),
        };
        Ok(format!("{}{}{}", self.prefix, middle, self.suffix))
    }
}

impl FormatSpec {
    /// Parse the placeholder body: empty, or `:` followed by
    /// `[0][width][,][.precision][type]`.
    fn parse(body: &str) -> Result<FormatSpec, String> {
        let mut spec = FormatSpec {
            zero_pad: false,
            width: None,
            grouped: false,
            precision: None,
            kind: Kind::Display,
        };

        if body.is_empty() {
            return Ok(spec);
        }
        let Some(rest) = body.strip_prefix(':') else {
            return Err(format!("unsupported placeholder '{{{}}}'", body));
        };

        let mut chars = rest.chars().peekable();

        if chars.peek() == Some(&'0') {
            spec.zero_pad = true;
            chars.next();
        }

        let mut width = String::new();
        while let Some(c) = chars.peek() {
            if c.is_ascii_digit() {
                width.push(*c);
                chars.next();
            } else {
                break;
            }
        }
        if !width.is_empty() {
            spec.width = Some(width.parse().map_err(|_| "invalid width".to_string())?);
        } else if spec.zero_pad {
            // A lone '0' is a zero width, not a flag
            spec.width = Some(0);
            spec.zero_pad = false;
        }

        if chars.peek() == Some(&',') {
            spec.grouped = true;
            chars.next();
        }

        if chars.peek() == Some(&'.') {
            chars.next();
            let mut precision = String::new();
            while let Some(c) = chars.peek() {
                if c.is_ascii_digit() {
                    precision.push(*c);
                    chars.next();
                } else {
                    break;
                }
            }
            if precision.is_empty() {
                return Err("missing precision after '.'".to_string());
            }
            spec.precision = Some(
                precision
                    .parse()
                    .map_err(|_| "invalid precision".to_string())?,
            );
        }

        spec.kind = match chars.next() {
            None => Kind::Display,
            Some('d') => Kind::Int,
            Some('f') => Kind::Float,
            Some('%') => Kind::Percent,
            Some('s') => Kind::Display,
            Some(c) => return Err(format!("unsupported format type '{}'", c)),
        };
        if let Some(c) = chars.next() {
            return Err(format!("unexpected '{}' in format spec", c));
        }

        if spec.kind == Kind::Int && spec.precision.is_some() {
            return Err("precision is not allowed with 'd'".to_string());
        }

        Ok(spec)
    }

    fn render(&self, value: &Scalar) -> Result<String, String> {
        match self.kind {
            Kind::Int => {
                let Scalar::Int(n) = value else {
                    return Err(format!("expected an integer for 'd', got {}", value));
                };
                let digits = if self.grouped {
                    group_int(*n)
                } else {
                    n.to_string()
                };
                Ok(self.pad_number(digits))
            }
            Kind::Float => {
                let f = numeric(value, "f")?;
                Ok(self.pad_number(self.fixed(f)))
            }
            Kind::Percent => {
                let f = numeric(value, "%")?;
                let text = format!("{}%", self.fixed(f * 100.0));
                Ok(self.pad_number(text))
            }
            Kind::Display => {
                let text = if self.grouped {
                    match value {
                        Scalar::Int(n) => group_int(*n),
                        Scalar::Float(f) => group_fractional(&f.to_string()),
                        other => other.to_string(),
                    }
                } else {
                    value.to_string()
                };
                match self.width {
                    // Strings left-align, numbers right-align
                    Some(width) if matches!(value, Scalar::Str(_)) => {
                        Ok(format!("{:<width$}", text))
                    }
                    Some(_) => Ok(self.pad_number(text)),
                    None => Ok(text),
                }
            }
        }
    }

    fn fixed(&self, f: f64) -> String {
        let precision = self.precision.unwrap_or(6);
        let text = format!("{:.precision$}", f);
        if self.grouped {
            group_fractional(&text)
        } else {
            text
        }
    }

    /// Right-align to `width`, zero-filling after the sign when the `0`
    /// flag is set (grouped output falls back to space padding).
    fn pad_number(&self, text: String) -> String {
        let Some(width) = self.width else {
            return text;
        };
        if text.chars().count() >= width {
            return text;
        }
        if self.zero_pad && !self.grouped {
            let (sign, digits) = match text.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", text.as_str()),
            };
            let fill = width - sign.len() - digits.chars().count();
            return format!("{}{}{}", sign, "0".repeat(fill), digits);
        }
        format!("{:>width$}", text)
    }
}

fn numeric(value: &Scalar, directive: &str) -> Result<f64, String> {
    match value {
        Scalar::Int(n) => Ok(*n as f64),
        Scalar::Float(f) => Ok(*f),
        other => Err(format!("expected a number for '{}', got {}", directive, other)),
    }
}

/// Group an integer's digits in thousands: 1234567 -> "1,234,567".
fn group_int(n: i64) -> String {
    let text = n.to_string();
    group_fractional(&text)
}

/// Group the integer part of a numeric string, leaving sign and fraction
/// intact.
fn group_fractional(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logview_types::ViewConfig;

    fn render(template: &str, value: Scalar) -> Result<String, String> {
        Template::parse(template)?.render(&value.coerce_numeric_string())
    }

    #[test]
    fn test_zero_padded_integers() {
        assert_eq!(render("{:05d}", Scalar::Int(42)), Ok("00042".to_string()));
        assert_eq!(render("{:05d}", Scalar::Int(-42)), Ok("-0042".to_string()));
        assert_eq!(render("{:3d}", Scalar::Int(42)), Ok(" 42".to_string()));
    }

    #[test]
    fn test_fixed_decimals() {
        assert_eq!(render("{:.2f}", Scalar::Float(2.5)), Ok("2.50".to_string()));
        assert_eq!(render("{:.0f}", Scalar::Float(2.5)), Ok("2".to_string()));
        assert_eq!(render("{:.3f}", Scalar::Int(1)), Ok("1.000".to_string()));
        // Default precision is 6
        assert_eq!(render("{:f}", Scalar::Float(0.5)), Ok("0.500000".to_string()));
    }

    #[test]
    fn test_percent() {
        assert_eq!(
            render("{:.1%}", Scalar::Float(0.256)),
            Ok("25.6%".to_string())
        );
        assert_eq!(render("{:.0%}", Scalar::Int(1)), Ok("100%".to_string()));
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(render("{:,}", Scalar::Int(1234567)), Ok("1,234,567".to_string()));
        assert_eq!(render("{:,d}", Scalar::Int(-1234)), Ok("-1,234".to_string()));
        assert_eq!(
            render("{:,.2f}", Scalar::Float(1234.5)),
            Ok("1,234.50".to_string())
        );
        assert_eq!(render("{:,}", Scalar::Int(100)), Ok("100".to_string()));
    }

    #[test]
    fn test_literal_text_and_escapes() {
        assert_eq!(
            render("loss={:.3f}!", Scalar::Float(0.125)),
            Ok("loss=0.125!".to_string())
        );
        assert_eq!(
            render("{{raw}} {}", Scalar::from("x")),
            Ok("{raw} x".to_string())
        );
        assert_eq!(render("plain text", Scalar::Int(1)), Ok("plain text".to_string()));
    }

    #[test]
    fn test_numeric_string_coercion_before_formatting() {
        assert_eq!(render("{:04d}", Scalar::from("42")), Ok("0042".to_string()));
        assert_eq!(render("{:.1f}", Scalar::from("2.5")), Ok("2.5".to_string()));
        // A string with a decimal point is a float, which 'd' rejects
        assert!(render("{:d}", Scalar::from("2.5")).is_err());
    }

    #[test]
    fn test_type_mismatches_are_errors() {
        assert!(render("{:d}", Scalar::Float(2.5)).is_err());
        assert!(render("{:.2f}", Scalar::from("hello")).is_err());
        assert!(render("{:.2f}", Scalar::Bool(true)).is_err());
        assert!(render("{:q}", Scalar::Int(1)).is_err());
        assert!(render("{:.d}", Scalar::Int(1)).is_err());
        assert!(render("{one} {two}", Scalar::Int(1)).is_err());
    }

    #[test]
    fn test_apply_formats_to_rows() {
        let mut view = ViewConfig::new("test", ".*").unwrap();
        view.columns
            .format
            .insert("loss".to_string(), "{:.2f}".to_string());

        let mut good = Row::new();
        good.insert("path".to_string(), Scalar::from("a"));
        good.insert("loss".to_string(), Scalar::Float(0.5));

        let mut bad = Row::new();
        bad.insert("path".to_string(), Scalar::from("b"));
        bad.insert("loss".to_string(), Scalar::from("not a number"));

        let mut null = Row::new();
        null.insert("path".to_string(), Scalar::from("c"));
        null.insert("loss".to_string(), Scalar::Null);

        let mut rows = vec![good, bad, null];
        apply_display_formats(&mut rows, &view);

        assert_eq!(rows[0]["loss"], Scalar::from("0.50"));
        let error = rows[1]["loss"].to_string();
        assert!(error.starts_with("FORMAT_ERROR:"), "{}", error);
        // Nulls are never formatted and never become error strings
        assert_eq!(rows[2]["loss"], Scalar::Null);
    }
}
