//! Routines for manipulating single RFC 2047 encoded words.
//!
//! An encoded word looks like this: `=?charset?cte?encoded_string?=`.
//!
//! charset is `iso-8859-1` or `utf-8` (ignoring case), see the charset
//! module.  cte (Content Transfer Encoding) is either 'q' or 'b' (ignoring
//! case).  'q' is the Q flavour of Quoted Printable, 'b' is Base64.
//!
//! Only a single, already isolated word is handled here: there is no header
//! folding and no scanning of whole header lines.  Decoding streams the
//! encoded_string through a CTE decoder implementing `std::io::Read`, then
//! turns the bytes into text using the declared charset.

use std::io::Read;

use thiserror::Error;

use crate::charset::Charset;
use crate::chars::{is_visible_char, is_white_space};
use crate::defects::Defect;
use crate::q::QDecoder;

// -- Quoted Printable

fn write_q_byte<T: std::fmt::Write>(mut writer: T, byte: u8) -> std::fmt::Result {
    match byte {
        b' ' => writer.write_char('_'),
        b'=' | b'?' | b'_' => write!(writer, "={:02X}", byte),
        _ if is_visible_char(byte) => writer.write_char(byte as char),
        _ => write!(writer, "={:02X}", byte),
    }
}

fn encode_q<T: AsRef<[u8]>>(bstring: T) -> String {
    let mut out = String::with_capacity(bstring.as_ref().len());

    for byte in bstring.as_ref() {
        write_q_byte(&mut out, *byte).expect("String writes always succeed");
    }

    out
}

// -- Base64

fn encode_b<T: AsRef<[u8]>>(bstring: T) -> String {
    base64::encode(&bstring)
}

/// Content transfer encodings an encoded word may use.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    QuotedPrintable,
    Base64,
}

impl Encoding {
    /// Look up a cte letter, ignoring ASCII case.
    pub fn for_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("q") {
            Some(Encoding::QuotedPrintable)
        } else if label.eq_ignore_ascii_case("b") {
            Some(Encoding::Base64)
        } else {
            None
        }
    }

    pub fn char(self) -> char {
        match self {
            Encoding::QuotedPrintable => 'q',
            Encoding::Base64 => 'b',
        }
    }

    pub fn encode<T: AsRef<[u8]>>(self, bstring: T) -> String {
        match self {
            Encoding::QuotedPrintable => encode_q(bstring),
            Encoding::Base64 => encode_b(bstring),
        }
    }

    /// Wrap an encoded payload in the matching streaming decoder.
    pub fn reader<'a, R: Read + 'a>(self, payload: &'a mut R) -> Box<dyn Read + 'a> {
        match self {
            Encoding::QuotedPrintable => Box::new(QDecoder::new(payload)),
            Encoding::Base64 => Box::new(base64::read::DecoderReader::new(
                payload,
                base64::STANDARD,
            )),
        }
    }
}

/// The result from decoding an encoded word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWord {
    pub decoded: String,
    pub charset: Charset,
    pub encoding: Encoding,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodingError {
    #[error("not an RFC 2047 encoded word")]
    NotEncodedWord,
    #[error("charset not supported: {:?}", charset)]
    UnsupportedCharset { charset: String },
    #[error("RFC 2047 encoding not supported: {:?}", encoding)]
    UnsupportedEncoding { encoding: String },
    #[error("malformed encoded word payload")]
    MalformedPayload(#[source] Defect),
}

impl From<Defect> for DecodingError {
    fn from(defect: Defect) -> Self {
        DecodingError::MalformedPayload(defect)
    }
}

/// Split `=?charset?cte?encoded_string?=` into its three inner fields.
fn split_word(ew: &str) -> Result<(&str, &str, &str), DecodingError> {
    let fields: Vec<&str> = ew.split('?').collect();
    match fields.as_slice() {
        ["=", charset, cte, encoded, "="] => Ok((*charset, *cte, *encoded)),
        _ => Err(DecodingError::NotEncodedWord),
    }
}

/// Decode an encoded word, keeping the charset and cte it declared.
///
/// The input must be exactly one `=?charset?cte?encoded_string?=` token.
/// Fails on the first structural problem, unsupported label or payload
/// defect; no partially decoded text is ever returned.
pub fn decode_word<T: AsRef<str>>(ew: T) -> Result<DecodedWord, DecodingError> {
    let (charset, cte, encoded) = split_word(ew.as_ref())?;

    let charset =
        Charset::for_label(charset).ok_or_else(|| DecodingError::UnsupportedCharset {
            charset: charset.to_lowercase(),
        })?;
    let encoding =
        Encoding::for_label(cte).ok_or_else(|| DecodingError::UnsupportedEncoding {
            encoding: cte.to_lowercase(),
        })?;

    // The streaming base64 decoder accepts a short final quantum.
    if encoding == Encoding::Base64 && encoded.len() % 4 > 0 {
        return Err(Defect::InvalidBase64Padding.into());
    }

    let mut source = encoded.as_bytes();
    let mut bstring = Vec::with_capacity(encoded.len());
    encoding
        .reader(&mut source)
        .read_to_end(&mut bstring)
        .map_err(Defect::from)?;

    let decoded = charset.decode(&bstring)?;

    Ok(DecodedWord {
        decoded,
        charset,
        encoding,
    })
}

/// Decode an encoded word into its text.
pub fn decode<T: AsRef<str>>(ew: T) -> Result<String, DecodingError> {
    decode_word(ew).map(|word| word.decoded)
}

/// Make text safe for a mail header.
///
/// Text made only of visible ASCII, spaces and tabs is returned unchanged.
/// Anything else becomes a Q encoded UTF-8 word followed by a single space:
/// `=?utf-8?q?encoded_string?= `.  Callers that don't want the separator
/// must trim it.
pub fn encode<T: AsRef<str>>(text: T) -> String {
    let text = text.as_ref();
    let header_safe = text
        .bytes()
        .all(|byte| is_visible_char(byte) || is_white_space(byte));
    if header_safe {
        return text.to_owned();
    }

    let mut out = encode_with(text, Encoding::QuotedPrintable);
    out.push(' ');
    out
}

/// Encode text as a UTF-8 encoded word using the given cte.
///
/// Unlike [`encode`], this always produces a word and adds no trailing
/// separator.
pub fn encode_with<T: AsRef<str>>(text: T, encoding: Encoding) -> String {
    format!(
        "=?{}?{}?{}?=",
        Charset::Utf8.name(),
        encoding.char(),
        encoding.encode(text.as_ref().as_bytes())
    )
}
