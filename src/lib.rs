mod chars;
mod charset;
mod defects;
mod encoded_words;
mod q;

pub use self::chars::{is_quoted_text, is_visible_char, is_white_space};
pub use self::charset::Charset;
pub use self::defects::Defect;
pub use self::encoded_words::*;
pub use self::q::QDecoder;
