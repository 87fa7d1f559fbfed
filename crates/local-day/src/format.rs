//! Date-pattern formatting.
//!
//! Patterns are scanned left to right for runs of `Y` (up to 4), `M` (up to 4)
//! and `D` (up to 2). A longer run is split greedily, so `DDD` reads as `DD`
//! followed by `D`. Recognized tokens are substituted; every other run,
//! including `Y`, `YYY`, `MMM` and `MMMM`, is copied through as-is.

use serde::{Deserialize, Serialize};

/// The local calendar date an instant falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateComponents {
    pub year: i32,
    /// 1-based month (January = 1).
    pub month: u32,
    pub day: u32,
}

/// Substitute every token in `pattern` with the matching field of `date`.
pub fn format_components(date: &DateComponents, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;

    while let Some(first) = rest.chars().next() {
        let max_run = match first {
            'Y' | 'M' => 4,
            'D' => 2,
            _ => {
                out.push(first);
                rest = &rest[first.len_utf8()..];
                continue;
            }
        };

        // Token characters are ASCII, so byte length equals char count.
        let run = rest.bytes().take(max_run).take_while(|&b| b == first as u8).count();
        let (token, tail) = rest.split_at(run);
        match substitute(date, token) {
            Some(value) => out.push_str(&value),
            None => out.push_str(token),
        }
        rest = tail;
    }

    out
}

fn substitute(date: &DateComponents, token: &str) -> Option<String> {
    let value = match token {
        "YY" => {
            let year = date.year.to_string();
            let start = year.len().saturating_sub(2);
            year[start..].to_string()
        }
        "YYYY" => format!("{:0>4}", date.year.to_string()),
        "M" => date.month.to_string(),
        "MM" => format!("{:02}", date.month),
        "D" => date.day.to_string(),
        "DD" => format!("{:02}", date.day),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_2() -> DateComponents {
        DateComponents {
            year: 2023,
            month: 1,
            day: 2,
        }
    }

    #[test]
    fn test_default_pattern() {
        assert_eq!(format_components(&jan_2(), "YYYY-MM-DD"), "2023-01-02");
    }

    #[test]
    fn test_short_components() {
        assert_eq!(format_components(&jan_2(), "YY-M-D"), "23-1-2");
    }

    #[test]
    fn test_alternative_delimiters() {
        assert_eq!(format_components(&jan_2(), "YYYY/MM/DD"), "2023/01/02");
        assert_eq!(format_components(&jan_2(), "DD.MM.YYYY"), "02.01.2023");
    }

    #[test]
    fn test_out_of_order_and_partial() {
        assert_eq!(format_components(&jan_2(), "MM-DD-YYYY"), "01-02-2023");
        assert_eq!(format_components(&jan_2(), "DD-MM"), "02-01");
    }

    #[test]
    fn test_repeated_tokens_substitute_independently() {
        assert_eq!(format_components(&jan_2(), "YYYY-MM-MM"), "2023-01-01");
    }

    #[test]
    fn test_undefined_tokens_pass_through() {
        assert_eq!(format_components(&jan_2(), "YYY"), "YYY");
        assert_eq!(format_components(&jan_2(), "Y"), "Y");
        assert_eq!(format_components(&jan_2(), "MMM D"), "MMM 2");
        assert_eq!(format_components(&jan_2(), "MMMM"), "MMMM");
    }

    #[test]
    fn test_long_runs_split_greedily() {
        // DD + D
        assert_eq!(format_components(&jan_2(), "DDD"), "022");
        // YYYY + Y
        assert_eq!(format_components(&jan_2(), "YYYYY"), "2023Y");
        // MMMM + M
        assert_eq!(format_components(&jan_2(), "MMMMM"), "MMMM1");
    }

    #[test]
    fn test_non_token_text_is_verbatim() {
        assert_eq!(format_components(&jan_2(), "day D of ñ"), "day 2 of ñ");
        assert_eq!(format_components(&jan_2(), ""), "");
        assert_eq!(format_components(&jan_2(), "yyyy-mm-dd"), "yyyy-mm-dd");
    }

    #[test]
    fn test_year_padding_and_slicing() {
        let early = DateComponents {
            year: 5,
            month: 12,
            day: 31,
        };
        assert_eq!(format_components(&early, "YYYY"), "0005");
        assert_eq!(format_components(&early, "YY"), "5");
        assert_eq!(format_components(&early, "M/D"), "12/31");

        let distant = DateComponents {
            year: 12345,
            month: 6,
            day: 7,
        };
        assert_eq!(format_components(&distant, "YYYY"), "12345");
        assert_eq!(format_components(&distant, "YY"), "45");
    }

    #[test]
    fn test_components_serialize() {
        let json = serde_json::to_value(jan_2()).unwrap();
        assert_eq!(json, serde_json::json!({ "year": 2023, "month": 1, "day": 2 }));
    }
}
