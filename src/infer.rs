//! Scalar type inference.
//!
//! [`classify`] turns a raw token (the text right of the first top-level `:`,
//! one tabular cell, or the tail of a `- ` list line) into a [`Value`].
//! The precedence order matters: the quote guard on the number rules is what
//! keeps a quoted numeral like `"123"` a string instead of degrading it to a
//! number, so quote marks must survive untouched up to this point.

use crate::{Error, Result, Value};

/// Classifies a trimmed raw token, in this precedence order:
///
/// 1. unquoted top-level comma  -> list of the classified parts
/// 2. `true` / `false`          -> bool
/// 3. `null`                    -> null
/// 4. empty                     -> null
/// 5. digit, no quote, no `.`   -> i64 (parse failure is `NumberFormat`)
/// 6. digit, no quote, `.`      -> f64 (parse failure is `NumberFormat`)
/// 7. anything else             -> string, one quote layer stripped
pub(crate) fn classify(token: &str, line: usize) -> Result<Value> {
    let token = token.trim();

    if has_top_level_comma(token) {
        let mut items = Vec::new();
        for part in split_top_level(token, ',') {
            items.push(classify(part, line)?);
        }
        return Ok(Value::List(items));
    }

    match token {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" | "" => return Ok(Value::Null),
        _ => {}
    }

    let has_digit = token.bytes().any(|b| b.is_ascii_digit());
    let has_quote = token.contains('"');

    if has_digit && !has_quote {
        return if token.contains('.') {
            token
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| Error::number_format(line, token))
        } else {
            token
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| Error::number_format(line, token))
        };
    }

    Ok(Value::String(strip_quotes(token).to_string()))
}

/// Strips at most one leading and one trailing double quote, independently.
pub(crate) fn strip_quotes(token: &str) -> &str {
    let token = token.strip_prefix('"').unwrap_or(token);
    token.strip_suffix('"').unwrap_or(token)
}

/// Returns `true` if `token` contains a comma outside double quotes.
pub(crate) fn has_top_level_comma(token: &str) -> bool {
    let mut in_quotes = false;
    for ch in token.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => return true,
            _ => {}
        }
    }
    false
}

/// Splits `token` on every `sep` that sits outside double quotes.
///
/// The quote state is a plain toggle; there are no escape sequences in this
/// dialect. Parts come back trimmed of surrounding whitespace.
pub(crate) fn split_top_level(token: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, ch) in token.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => {
                parts.push(token[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(token[start..].trim());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(token: &str) -> Value {
        classify(token, 1).unwrap()
    }

    #[test]
    fn keywords_and_empty() {
        assert_eq!(c("true"), Value::Bool(true));
        assert_eq!(c("false"), Value::Bool(false));
        assert_eq!(c("null"), Value::Null);
        assert_eq!(c(""), Value::Null);
        assert_eq!(c("   "), Value::Null);
    }

    #[test]
    fn numbers() {
        assert_eq!(c("123"), Value::Int(123));
        assert_eq!(c("-42"), Value::Int(-42));
        assert_eq!(c("98.5"), Value::Float(98.5));
        assert_eq!(c("-0.25"), Value::Float(-0.25));
    }

    #[test]
    fn digit_bearing_garbage_is_number_format() {
        assert!(matches!(
            classify("abc123", 7),
            Err(Error::NumberFormat { line: 7, .. })
        ));
        assert!(matches!(
            classify("1.2.3", 1),
            Err(Error::NumberFormat { .. })
        ));
    }

    #[test]
    fn quoted_literals_stay_strings() {
        assert_eq!(c("\"123\""), Value::String("123".to_string()));
        assert_eq!(c("\"true\""), Value::String("true".to_string()));
        assert_eq!(c("\"null\""), Value::String("null".to_string()));
        assert_eq!(c("\"\""), Value::String(String::new()));
        assert_eq!(c("\" padded \""), Value::String(" padded ".to_string()));
    }

    #[test]
    fn plain_strings() {
        assert_eq!(c("hello"), Value::String("hello".to_string()));
        assert_eq!(c("Ada Lovelace"), Value::String("Ada Lovelace".to_string()));
    }

    #[test]
    fn comma_makes_a_list() {
        assert_eq!(
            c("1,2,3"),
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(
            c("a, true, null"),
            Value::List(vec![
                Value::String("a".to_string()),
                Value::Bool(true),
                Value::Null
            ])
        );
    }

    #[test]
    fn quoted_comma_is_not_a_separator() {
        assert_eq!(c("\"a,b\""), Value::String("a,b".to_string()));
        assert_eq!(
            c("\"a,b\",c"),
            Value::List(vec![
                Value::String("a,b".to_string()),
                Value::String("c".to_string())
            ])
        );
    }

    #[test]
    fn quoted_numeral_in_list_position() {
        assert_eq!(
            c("\"123\",456"),
            Value::List(vec![Value::String("123".to_string()), Value::Int(456)])
        );
    }

    #[test]
    fn split_respects_quotes() {
        assert_eq!(split_top_level("a|b|c", '|'), vec!["a", "b", "c"]);
        assert_eq!(split_top_level("\"a|b\"|c", '|'), vec!["\"a|b\"", "c"]);
        assert_eq!(split_top_level("lone", ','), vec!["lone"]);
    }
}
