//! Column type template formatting.
//!
//! Type-format tables hold templates such as `varchar(%(max_length)s)` or
//! `integer CHECK (%(qn_column)s >= 0)`. A [`FormatContext`] supplies the
//! values those placeholders may reference; `qn_`-prefixed keys receive the
//! connection-quoted form of the value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::connection::ConnectionDescriptor;
use crate::fields::FieldDef;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%%|%\((?P<key>[A-Za-z_][A-Za-z0-9_]*)\)s").expect("placeholder pattern is valid")
});

/// Values available to a column type template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatContext {
    /// The column name.
    pub column: String,
    /// The column name quoted for the connection.
    pub qn_column: String,
    /// Maximum character length.
    pub max_length: Option<usize>,
    /// Maximum total digits of a decimal.
    pub max_digits: Option<u32>,
    /// Digits after the decimal point.
    pub decimal_places: Option<u32>,
}

impl FormatContext {
    /// Builds the context for `field` on `connection`.
    pub fn for_field(field: &FieldDef, connection: &dyn ConnectionDescriptor) -> Self {
        let (max_digits, decimal_places) = field.field_type.decimal_precision().unzip();
        Self {
            column: field.column.clone(),
            qn_column: connection.quote_name(&field.column),
            max_length: field.max_length,
            max_digits,
            decimal_places,
        }
    }

    /// Returns the rendered value for `key`, or `None` if the key is unknown
    /// or has no value.
    pub fn value(&self, key: &str) -> Option<String> {
        match key {
            "column" => Some(self.column.clone()),
            "qn_column" => Some(self.qn_column.clone()),
            "max_length" => self.max_length.map(|v| v.to_string()),
            "max_digits" => self.max_digits.map(|v| v.to_string()),
            "decimal_places" => self.decimal_places.map(|v| v.to_string()),
            _ => None,
        }
    }
}

/// Substitutes every `%(key)s` placeholder in `template` from `context`.
///
/// `%%` renders as a literal `%`. Returns `None` when any placeholder cannot
/// be filled.
pub fn format_template(template: &str, context: &FormatContext) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(template) {
        let whole = caps.get(0)?;
        out.push_str(&template[last..whole.start()]);
        match caps.name("key") {
            Some(key) => match context.value(key.as_str()) {
                Some(value) => out.push_str(&value),
                None => {
                    tracing::trace!(template, key = key.as_str(), "template placeholder has no value");
                    return None;
                }
            },
            None => out.push('%'),
        }
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> FormatContext {
        FormatContext {
            column: "price".into(),
            qn_column: "\"price\"".into(),
            max_length: Some(100),
            max_digits: Some(10),
            decimal_places: Some(2),
        }
    }

    #[test]
    fn test_literal_template() {
        assert_eq!(format_template("bigint", &ctx()).as_deref(), Some("bigint"));
    }

    #[test]
    fn test_substitutes_values() {
        assert_eq!(
            format_template("varchar(%(max_length)s)", &ctx()).as_deref(),
            Some("varchar(100)")
        );
        assert_eq!(
            format_template("numeric(%(max_digits)s, %(decimal_places)s)", &ctx()).as_deref(),
            Some("numeric(10, 2)")
        );
    }

    #[test]
    fn test_quoted_column() {
        assert_eq!(
            format_template("integer CHECK (%(qn_column)s >= 0)", &ctx()).as_deref(),
            Some("integer CHECK (\"price\" >= 0)")
        );
    }

    #[test]
    fn test_percent_escape() {
        assert_eq!(
            format_template("text CHECK (%(column)s LIKE '%%x')", &ctx()).as_deref(),
            Some("text CHECK (price LIKE '%x')")
        );
    }

    #[test]
    fn test_missing_value_yields_none() {
        let mut c = ctx();
        c.max_length = None;
        assert_eq!(format_template("varchar(%(max_length)s)", &c), None);
    }

    #[test]
    fn test_unknown_key_yields_none() {
        assert_eq!(format_template("geometry(%(srid)s)", &ctx()), None);
    }
}
