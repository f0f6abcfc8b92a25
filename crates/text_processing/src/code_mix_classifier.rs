//! Code-Mix Classifier (§4.5): Fast Lane / Smart Checkpoint split. Grounded
//! on `code_mix_detector.py`.

use qprep_config::constants::code_mix as thresholds;
use qprep_core::{ClassificationMethod, CodeMixClassifier, ScriptClassLabel, ScriptClassification, Token};

use crate::markers::ENGLISH_MARKERS;
use crate::romanized_detector::SmartRomanizedDetector;

#[cfg(feature = "onnx")]
mod onnx_backend;

pub struct EcommerceCodeMixClassifier {
    romanized_detector: SmartRomanizedDetector,
    #[cfg(feature = "onnx")]
    onnx: Option<onnx_backend::OnnxCodeMixModel>,
}

impl EcommerceCodeMixClassifier {
    pub fn new() -> Self {
        Self {
            romanized_detector: SmartRomanizedDetector::new(),
            #[cfg(feature = "onnx")]
            onnx: None,
        }
    }

    #[cfg(feature = "onnx")]
    pub fn with_model(mut self, model_path: &std::path::Path) -> Self {
        match onnx_backend::OnnxCodeMixModel::load(model_path) {
            Ok(model) => self.onnx = Some(model),
            Err(err) => tracing::warn!(error = %err, "failed to load code-mix classifier artifact, using pattern fallback"),
        }
        self
    }

    fn fast_lane(&self, tokens: &[Token], language_code: &str, language_confidence: f32) -> Option<ScriptClassification> {
        let has_native = tokens.iter().any(|t| t.tag.is_native_indic());
        let has_latin = tokens.iter().any(|t| t.tag == qprep_core::ScriptTag::Latin);

        if has_native && !has_latin {
            return Some(ScriptClassification {
                label: ScriptClassLabel::PureNative,
                confidence: thresholds::RULE_A_CONFIDENCE,
                method: ClassificationMethod::FastLane,
                skip_step5: thresholds::RULE_A_CONFIDENCE >= thresholds::SKIP_STEP5_CONFIDENCE,
                romanized_language: None,
            });
        }

        if language_code == "en" && language_confidence >= thresholds::RULE_B_LID_THRESHOLD {
            return Some(ScriptClassification {
                label: ScriptClassLabel::PureEnglish,
                confidence: language_confidence,
                method: ClassificationMethod::FastLane,
                skip_step5: language_confidence >= thresholds::SKIP_STEP5_CONFIDENCE,
                romanized_language: None,
            });
        }

        None
    }

    fn pattern_fallback(&self, tokens: &[Token], language_code: &str, text: &str) -> ScriptClassification {
        let has_native = tokens.iter().any(|t| t.tag.is_native_indic());
        let has_latin = tokens.iter().any(|t| t.tag == qprep_core::ScriptTag::Latin);

        if has_native && has_latin {
            return ScriptClassification {
                label: ScriptClassLabel::Mixed,
                confidence: thresholds::FALLBACK_MIXED_CONFIDENCE,
                method: ClassificationMethod::Heuristic,
                skip_step5: false,
                romanized_language: None,
            };
        }

        if has_latin && language_code != "en" {
            let romanized_confidence = self
                .romanized_detector
                .detect(text)
                .map(|(_, confidence)| confidence)
                .unwrap_or(0.0);
            return ScriptClassification {
                label: ScriptClassLabel::RomanizedIndic,
                confidence: romanized_confidence.max(thresholds::FALLBACK_ROMANIZED_CONFIDENCE_FLOOR),
                method: ClassificationMethod::Heuristic,
                skip_step5: false,
                romanized_language: Some(language_code.to_string()),
            };
        }

        let english_hits = tokens
            .iter()
            .filter(|t| ENGLISH_MARKERS.contains(t.text.to_lowercase().as_str()))
            .count();
        if has_latin && language_code == "en" && english_hits >= 2 {
            return ScriptClassification {
                label: ScriptClassLabel::PureEnglish,
                confidence: thresholds::FALLBACK_PURE_ENGLISH_CONFIDENCE,
                method: ClassificationMethod::Heuristic,
                skip_step5: thresholds::FALLBACK_PURE_ENGLISH_CONFIDENCE >= thresholds::SKIP_STEP5_CONFIDENCE,
                romanized_language: None,
            };
        }

        ScriptClassification {
            label: ScriptClassLabel::Ambiguous,
            confidence: 0.0,
            method: ClassificationMethod::Heuristic,
            skip_step5: false,
            romanized_language: None,
        }
    }

    #[cfg(feature = "onnx")]
    fn smart_checkpoint(&self, tokens: &[Token], text: &str, language_code: &str) -> ScriptClassification {
        match &self.onnx {
            Some(model) => match model.classify(text) {
                Ok(result) => result,
                Err(err) => {
                    tracing::warn!(error = %err, "code-mix classifier inference failed");
                    ScriptClassification {
                        label: ScriptClassLabel::Ambiguous,
                        confidence: 0.0,
                        method: ClassificationMethod::OnnxFailed,
                        skip_step5: false,
                        romanized_language: None,
                    }
                }
            },
            None => self.pattern_fallback(tokens, language_code, text),
        }
    }

    #[cfg(not(feature = "onnx"))]
    fn smart_checkpoint(&self, tokens: &[Token], text: &str, language_code: &str) -> ScriptClassification {
        self.pattern_fallback(tokens, language_code, text)
    }
}

impl Default for EcommerceCodeMixClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeMixClassifier for EcommerceCodeMixClassifier {
    fn classify(&self, tokens: &[Token], language_code: &str, language_confidence: f32) -> ScriptClassification {
        if let Some(fast_lane) = self.fast_lane(tokens, language_code, language_confidence) {
            return fast_lane;
        }

        let text: String = tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ");
        let checkpoint = self.smart_checkpoint(tokens, &text, language_code);

        if checkpoint.confidence > thresholds::SMART_CHECKPOINT_ADOPTION_THRESHOLD {
            checkpoint
        } else {
            ScriptClassification {
                label: ScriptClassLabel::Ambiguous,
                confidence: checkpoint.confidence,
                method: ClassificationMethod::Heuristic,
                skip_step5: false,
                romanized_language: checkpoint.romanized_language,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qprep_core::ScriptTag;

    fn token(text: &str, tag: ScriptTag) -> Token {
        Token::new(text, tag)
    }

    #[test]
    fn pure_native_fast_lane() {
        let classifier = EcommerceCodeMixClassifier::new();
        let tokens = vec![token("नमस्ते", ScriptTag::Devanagari)];
        let result = classifier.classify(&tokens, "hi", 0.9);
        assert_eq!(result.label, ScriptClassLabel::PureNative);
        assert_eq!(result.method, ClassificationMethod::FastLane);
        assert!(result.skip_step5);
    }

    #[test]
    fn pure_english_fast_lane() {
        let classifier = EcommerceCodeMixClassifier::new();
        let tokens = vec![token("shoes", ScriptTag::Latin)];
        let result = classifier.classify(&tokens, "en", 0.95);
        assert_eq!(result.label, ScriptClassLabel::PureEnglish);
        assert_eq!(result.method, ClassificationMethod::FastLane);
    }

    #[test]
    fn mixed_script_pattern_fallback() {
        let classifier = EcommerceCodeMixClassifier::new();
        let tokens = vec![token("नमस्ते", ScriptTag::Devanagari), token("shoes", ScriptTag::Latin)];
        let result = classifier.classify(&tokens, "hi", 0.5);
        assert_eq!(result.label, ScriptClassLabel::Mixed);
    }

    #[test]
    fn ambiguous_when_checkpoint_confidence_low() {
        let classifier = EcommerceCodeMixClassifier::new();
        let tokens = vec![token("xyz", ScriptTag::Latin)];
        let result = classifier.classify(&tokens, "fr", 0.4);
        assert_eq!(result.label, ScriptClassLabel::Ambiguous);
    }
}
