pub mod cascade;
pub mod detect;
pub mod engine;
pub mod preprocess;
pub mod route;

pub use cascade::{DICTIONARY_CONFIDENCE, FallbackCascade};
pub use detect::{DetectError, Detection, DetectionMethod, LanguageDetector};
pub use engine::{
    EngineError, Hop, MOCK_CONFIDENCE, MockDictionary, MockEngine, TranslationEngine, placeholder,
};
pub use preprocess::{DefaultPreprocessor, Preprocessor};
pub use route::{Direction, TranslationRouter};
