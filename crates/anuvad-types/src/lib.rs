pub mod language;
pub mod types;

pub use language::{Language, LanguageError};
pub use types::{
    CatalogItem, CorrectionReceipt, DetectionResponse, LanguagePairCount, ModelLabel, Statistics,
    TrainingExample, TranslatedCatalogItem, TranslationRecord, TranslationRequest,
    TranslationResponse, TranslationResult,
};
