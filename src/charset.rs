use encoding_rs::UTF_8;

use crate::defects::Defect;

/// Character sets an encoded word may declare for its decoded payload.
///
/// The set is closed: ISO-8859-1 bytes widen one-to-one onto the first 256
/// Unicode scalar values, UTF-8 bytes are the text itself.  Any other label
/// is rejected by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Iso8859_1,
    Utf8,
}

impl Charset {
    pub fn name(self) -> &'static str {
        match self {
            Charset::Iso8859_1 => "iso-8859-1",
            Charset::Utf8 => "utf-8",
        }
    }

    /// Look up a charset label, ignoring ASCII case.
    pub fn for_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("iso-8859-1") {
            Some(Charset::Iso8859_1)
        } else if label.eq_ignore_ascii_case("utf-8") {
            Some(Charset::Utf8)
        } else {
            None
        }
    }

    /// Turn transfer-decoded bytes into text.
    pub fn decode(self, bytes: &[u8]) -> Result<String, Defect> {
        match self {
            // Not encoding_rs::WINDOWS_1252: the 0x80..=0x9F range must stay
            // on the C1 controls.
            Charset::Iso8859_1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Charset::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
                .ok_or(Defect::InvalidUtf8),
        }
    }
}
