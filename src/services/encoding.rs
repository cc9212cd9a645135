use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use tracing::warn;

use crate::error::Result;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug)]
pub struct DecodedText {
    pub text: String,
    pub encoding: String,
    /// Houve bytes inválidos, substituídos por U+FFFD
    pub had_errors: bool,
}

pub fn decode(bytes: &[u8]) -> DecodedText {
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        let (text, had_errors) = UTF_8.decode_without_bom_handling(rest);
        return DecodedText {
            text: text.into_owned(),
            encoding: "utf-8-sig".into(),
            had_errors,
        };
    }

    let encoding = guess(bytes);
    let (text, used, had_errors) = encoding.decode(bytes);

    if had_errors {
        warn!(encoding = used.name(), "lossy decode");
    }

    DecodedText {
        text: text.into_owned(),
        encoding: used.name().to_lowercase(),
        had_errors,
    }
}

pub fn decode_file(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path)?;
    Ok(decode(&bytes))
}

fn guess(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}
