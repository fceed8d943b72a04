//! Strict float parsing for command tokens.
//!
//! Every numeric argument on the command line goes through [`parse_float`],
//! which accepts only tokens that parse as a float in their entirety.

use crate::error::{CoreError, CoreResult};

/// Parses `token` as an `f64` using the full string.
///
/// Unlike `strtod`-style parsing there is no partial-parse mode: trailing
/// non-numeric characters reject the whole token. `position` is the 1-based
/// index of the token in the command stream and `label` names the slot being
/// parsed; both end up in the diagnostic.
pub fn parse_float(token: &str, position: usize, label: &str) -> CoreResult<f64> {
    token.parse::<f64>().map_err(|_| CoreError::Parse {
        token: token.to_string(),
        position,
        label: label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_scientific_floats() {
        assert_eq!(parse_float("1.5", 1, "x").unwrap(), 1.5);
        assert_eq!(parse_float("-0.25", 1, "x").unwrap(), -0.25);
        assert_eq!(parse_float("1e3", 1, "x").unwrap(), 1000.0);
        assert_eq!(parse_float("255", 1, "x").unwrap(), 255.0);
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse_float("1.5x", 7, "value 1 of local parameter 'gamma'").unwrap_err();
        match err {
            CoreError::Parse {
                token,
                position,
                label,
            } => {
                assert_eq!(token, "1.5x");
                assert_eq!(position, 7);
                assert_eq!(label, "value 1 of local parameter 'gamma'");
            }
            e => panic!("unexpected error type: {e:?}"),
        }
    }

    #[test]
    fn rejects_empty_and_whitespace_tokens() {
        assert!(parse_float("", 1, "x").is_err());
        assert!(parse_float(" 1.0", 1, "x").is_err());
        assert!(parse_float("1.0 ", 1, "x").is_err());
    }
}
