//! Plain-text recovery from MIME payloads.
//!
//! Only `text/plain` bodies are kept. Attachments, HTML alternatives and
//! structural parts are dropped.

use encoding_rs::Encoding;
use mailparse::ParsedMail;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use tracing::{debug, warn};

use crate::errors::SummarizerError;

const TEXT_PLAIN: &str = "text/plain";
const DEFAULT_CHARSET: &str = "utf-8";

/// `name:` at the start of a line, with the RFC 5322 field-name alphabet.
static HEADER_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x21-\x39\x3B-\x7E]+:").expect("static regex compile"));

/// Concatenates every `text/plain` part of `raw`, in document order, and trims
/// the result.
///
/// Empty input and payloads without a `text/plain` part yield an empty string.
/// A payload that does not open with a header line is read as a bare
/// `text/plain` body. One that cannot be parsed as MIME at all yields an empty
/// string.
///
/// # Errors
///
/// Returns [`SummarizerError::Extraction`] when a `text/plain` part cannot be
/// decoded with its declared charset.
pub fn extract_text(raw: &[u8]) -> Result<String, SummarizerError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(String::new());
    }

    let framed;
    let message = if starts_with_header_block(raw) {
        raw
    } else {
        framed = [b"\r\n".as_slice(), raw].concat();
        framed.as_slice()
    };

    let mail = match mailparse::parse_mail(message) {
        Ok(mail) => mail,
        Err(e) => {
            warn!("Payload is not a parseable MIME message, no text extracted: {}", e);
            return Ok(String::new());
        }
    };

    let text = walk(&mail)
        .into_iter()
        .filter(|part| is_text_plain(part))
        .map(decode_part)
        .collect::<Result<Vec<_>, _>>()?
        .concat();

    debug!(extracted_len = text.len(), "Extracted text/plain content");
    Ok(text.trim().to_string())
}

/// True when the first line is a header field or the empty line that ends an
/// empty header block.
fn starts_with_header_block(raw: &[u8]) -> bool {
    let first_line = raw.split(|b| *b == b'\n').next().unwrap_or_default();
    let first_line = first_line.strip_suffix(b"\r").unwrap_or(first_line);
    first_line.is_empty() || HEADER_FIELD_RE.is_match(first_line)
}

/// Depth-first, document-ordered listing of `mail` and all nested parts,
/// containers included.
fn walk<'a, 'b>(mail: &'b ParsedMail<'a>) -> Vec<&'b ParsedMail<'a>> {
    std::iter::once(mail)
        .chain(mail.subparts.iter().flat_map(walk))
        .collect()
}

fn is_text_plain(part: &ParsedMail<'_>) -> bool {
    part.ctype.mimetype.eq_ignore_ascii_case(TEXT_PLAIN)
}

/// Declared charset of the part, if the `Content-Type` header names one.
fn declared_charset<'b>(part: &'b ParsedMail<'_>) -> Option<&'b str> {
    part.ctype
        .params
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
}

fn decode_part(part: &ParsedMail<'_>) -> Result<String, SummarizerError> {
    let bytes = part.get_body_raw()?;
    let label = declared_charset(part).unwrap_or(DEFAULT_CHARSET);
    decode_with_charset(&bytes, label)
}

fn decode_with_charset(bytes: &[u8], label: &str) -> Result<String, SummarizerError> {
    let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
        SummarizerError::Extraction(format!("unknown charset: {}", label))
    })?;

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            SummarizerError::Extraction(format!("body is not valid {}", encoding.name()))
        })
}
