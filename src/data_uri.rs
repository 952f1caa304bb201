const IMAGE_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// Cheap check used when the modal opens.
pub fn looks_like_image(s: &str) -> bool {
    s.starts_with(IMAGE_PREFIX)
}

/// A `data:image/<subtype>;base64,<payload>` string split into its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri<'a> {
    pub mime: &'a str,
    pub payload: &'a str,
}

impl<'a> DataUri<'a> {
    pub fn png(payload: &str) -> String {
        format!("data:image/png;base64,{}", payload)
    }

    /// Strict parse; the subtype must be a single word (`png`, `jpeg`, ...),
    /// so `image/svg+xml` is rejected.
    pub fn parse(s: &'a str) -> Option<Self> {
        let rest = s.strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(BASE64_MARKER)?;
        let subtype = mime.strip_prefix("image/")?;
        let is_word = !subtype.is_empty()
            && subtype.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !is_word || payload.contains(is_line_terminator) {
            return None;
        }
        Some(Self { mime, payload })
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_wraps_payload() {
        assert_eq!(DataUri::png("iVBORw0KG"), "data:image/png;base64,iVBORw0KG");
    }

    #[test]
    fn looks_like_image_accepts_any_image_subtype() {
        assert!(looks_like_image("data:image/png;base64,AAAA"));
        assert!(looks_like_image("data:image/svg+xml;base64,AAAA"));
    }

    #[test]
    fn looks_like_image_rejects_other_strings() {
        assert!(!looks_like_image("not-an-image"));
        assert!(!looks_like_image("data:text/plain;base64,AAAA"));
        assert!(!looks_like_image(""));
    }

    #[test]
    fn parse_splits_mime_and_payload() {
        let uri = DataUri::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(uri.mime, "image/jpeg");
        assert_eq!(uri.payload, "/9j/4AAQ");
    }

    #[test]
    fn parse_allows_empty_payload() {
        let uri = DataUri::parse("data:image/png;base64,").unwrap();
        assert_eq!(uri.payload, "");
    }

    #[test]
    fn parse_rejects_compound_subtypes() {
        assert!(DataUri::parse("data:image/svg+xml;base64,PHN2Zz4=").is_none());
    }

    #[test]
    fn parse_rejects_non_base64_and_non_image() {
        assert!(DataUri::parse("data:image/png,rawbytes").is_none());
        assert!(DataUri::parse("data:text/plain;base64,aGk=").is_none());
        assert!(DataUri::parse("data:image/;base64,aGk=").is_none());
        assert!(DataUri::parse("not-an-image").is_none());
    }

    #[test]
    fn parse_rejects_multiline_payload() {
        assert!(DataUri::parse("data:image/png;base64,aGk=\naGk=").is_none());
        assert!(DataUri::parse("data:image/png;base64,aGk=\r").is_none());
        assert!(DataUri::parse("data:image/png;base64,aGk=\u{2028}aGk=").is_none());
        assert!(DataUri::parse("data:image/png;base64,aGk=\u{2029}").is_none());
    }
}
