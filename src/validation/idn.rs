use std::sync::LazyLock;

/// Characters recognised as label separators (RFC 3490 section 3.1).
const LABEL_SEPARATORS: [char; 4] = ['\u{002E}', '\u{3002}', '\u{FF0E}', '\u{FF61}'];

/// Whether the IDNA conversion keeps a trailing root dot on its own.
static PRESERVES_TRAILING_DOT: LazyLock<bool> =
    LazyLock::new(|| idna::domain_to_ascii("a.").is_ok_and(|ascii| ascii == "a."));

/// Converts a potentially Unicode domain to its ASCII (punycode) form.
///
/// Pure ASCII input is returned unchanged. If the conversion fails the
/// original input is returned, so that the ASCII-only grammars downstream
/// reject it.
///
/// # Examples
/// ```
/// use domain_validator::validation::idn::unicode_to_ascii;
///
/// assert_eq!(unicode_to_ascii("example.com"), "example.com");
/// assert_eq!(unicode_to_ascii("испытание.рф"), "xn--80akhbyknj4f.xn--p1ai");
/// assert_eq!(unicode_to_ascii("испытание.рф."), "xn--80akhbyknj4f.xn--p1ai.");
/// ```
pub fn unicode_to_ascii(input: &str) -> String {
    if input.is_ascii() {
        return input.to_string();
    }

    match idna::domain_to_ascii(input) {
        Ok(ascii) => restore_trailing_dot(input, ascii, *PRESERVES_TRAILING_DOT),
        Err(_) => input.to_string(),
    }
}

fn restore_trailing_dot(input: &str, ascii: String, preserves_trailing_dot: bool) -> String {
    if preserves_trailing_dot || ascii.ends_with('.') {
        return ascii;
    }
    match input.chars().last() {
        Some(last) if LABEL_SEPARATORS.contains(&last) => ascii + ".",
        _ => ascii,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_unchanged() {
        assert_eq!(unicode_to_ascii("example.com"), "example.com");
        assert_eq!(unicode_to_ascii("Example.COM."), "Example.COM.");
        assert_eq!(unicode_to_ascii(""), "");
        assert_eq!(unicode_to_ascii("xn--d1acufc.xn--p1ai."), "xn--d1acufc.xn--p1ai.");
    }

    #[test]
    fn test_unicode_is_converted() {
        assert_eq!(unicode_to_ascii("домен.рф"), "xn--d1acufc.xn--p1ai");
        assert_eq!(unicode_to_ascii("bücher.de"), "xn--bcher-kva.de");
    }

    #[test]
    fn test_trailing_separators_are_kept() {
        assert_eq!(unicode_to_ascii("домен.рф."), "xn--d1acufc.xn--p1ai.");
        assert_eq!(unicode_to_ascii("домен.рф\u{3002}"), "xn--d1acufc.xn--p1ai.");
        assert_eq!(unicode_to_ascii("домен.рф\u{FF0E}"), "xn--d1acufc.xn--p1ai.");
        assert_eq!(unicode_to_ascii("домен.рф\u{FF61}"), "xn--d1acufc.xn--p1ai.");
    }

    #[test]
    fn test_restore_when_conversion_drops_dot() {
        assert_eq!(
            restore_trailing_dot("домен.рф\u{3002}", "xn--d1acufc.xn--p1ai".to_string(), false),
            "xn--d1acufc.xn--p1ai."
        );
        assert_eq!(
            restore_trailing_dot("домен.рф", "xn--d1acufc.xn--p1ai".to_string(), false),
            "xn--d1acufc.xn--p1ai"
        );
        assert_eq!(
            restore_trailing_dot("домен.рф.", "xn--d1acufc.xn--p1ai".to_string(), true),
            "xn--d1acufc.xn--p1ai",
            "a converter that keeps dots is trusted as is"
        );
    }
}
