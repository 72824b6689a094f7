use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // NFC, not NFKC: compatibility folding would mangle Indic matras
    fn process(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if text.is_empty() {
            return text;
        }

        text = text.nfc().collect();

        // Collapse newlines, catalog entries arrive copy-pasted
        text = text.replace(['\n', '\r'], " ").trim().to_string();

        text
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
