//! Decoding of raw URL query strings into named parameters.
//!
//! [`QueryParams`] never fails: anything that looks wrong is kept as-is and
//! left for the validator to reject. [`parse_channel`] is the single
//! string-to-number step for RGB channels.

use url::form_urlencoded;

/// Decoded query parameters, in the order they appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decodes an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored, `%XX` escapes and `+` are decoded, and
    /// malformed escapes are decoded lossily.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Raw value of `name`. When a key repeats, the first occurrence wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `name` if it is present and non-empty.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// `true` if `name` carries a non-empty value.
    pub fn is_present(&self, name: &str) -> bool {
        self.non_empty(name).is_some()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parses a channel value with base-10 integer semantics.
///
/// Accepts an optional sign followed by ASCII digits and nothing else:
/// `"12.5"`, `"1e2"`, `"0x1F"`, `" 7"` and `""` all yield `None` instead of
/// being truncated or coerced. Range checking is left to the `Color`
/// constructors.
pub fn parse_channel(value: &str) -> Option<f64> {
    let digits = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Anything too long for i64 is certainly out of range; saturate so the
    // range check still reports it.
    match value.parse::<i64>() {
        Ok(n) => Some(n as f64),
        Err(_) if value.starts_with('-') => Some(f64::MIN),
        Err(_) => Some(f64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- QueryParams --

    #[test]
    fn parse_decodes_percent_escapes() {
        let q = QueryParams::parse("hex=%23C0FFEE");
        assert_eq!(q.get("hex"), Some("#C0FFEE"));
    }

    #[test]
    fn parse_tolerates_leading_question_mark() {
        let q = QueryParams::parse("?r=176&g=0&b=181");
        assert_eq!(q.get("r"), Some("176"));
        assert_eq!(q.get("g"), Some("0"));
        assert_eq!(q.get("b"), Some("181"));
    }

    #[test]
    fn parse_decodes_plus_as_space() {
        let q = QueryParams::parse("hex=+C0FFEE");
        assert_eq!(q.get("hex"), Some(" C0FFEE"));
    }

    #[test]
    fn first_occurrence_wins() {
        let q = QueryParams::parse("hex=%23000000&hex=%23FFFFFF");
        assert_eq!(q.get("hex"), Some("#000000"));
    }

    #[test]
    fn empty_value_is_not_present() {
        let q = QueryParams::parse("hex=&r=1");
        assert_eq!(q.get("hex"), Some(""));
        assert!(!q.is_present("hex"));
        assert!(q.is_present("r"));
        assert!(!q.is_present("g"));
    }

    #[test]
    fn empty_query_has_no_params() {
        assert_eq!(QueryParams::parse(""), QueryParams::default());
        assert_eq!(QueryParams::parse("?"), QueryParams::default());
    }

    #[test]
    fn malformed_escape_is_kept_lossily() {
        let q = QueryParams::parse("hex=%ZZ1234");
        assert_eq!(q.get("hex"), Some("%ZZ1234"));
    }

    #[test]
    fn collects_from_pairs() {
        let q: QueryParams = [("r", "1"), ("g", "2")].into_iter().collect();
        assert_eq!(q.get("g"), Some("2"));
        assert_eq!(q.get("b"), None);
    }

    // -- parse_channel --

    #[test]
    fn parse_channel_accepts_plain_integers() {
        assert_eq!(parse_channel("0"), Some(0.0));
        assert_eq!(parse_channel("255"), Some(255.0));
        assert_eq!(parse_channel("007"), Some(7.0));
        assert_eq!(parse_channel("+5"), Some(5.0));
        assert_eq!(parse_channel("-1"), Some(-1.0));
    }

    #[test]
    fn parse_channel_rejects_non_integer_syntax() {
        for input in ["", "12.5", "1e2", "0x1F", " 7", "7 ", "abc", "-", "+", "--1", "NaN"] {
            assert_eq!(parse_channel(input), None, "accepted {input:?}");
        }
    }

    #[test]
    fn parse_channel_saturates_huge_values() {
        assert_eq!(parse_channel("99999999999999999999999"), Some(f64::MAX));
        assert_eq!(parse_channel("-99999999999999999999999"), Some(f64::MIN));
    }
}
