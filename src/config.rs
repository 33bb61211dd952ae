//! Pipeline configuration.
//!
//! Built once by the caller and handed to [`Pipeline::new`](crate::Pipeline::new).
//!
//! ```toml
//! [vocabulary]
//! protocols = { "eth" = "ether" }
//! directions = { "from" = "src", "to" = "dst" }
//!
//! [negation]
//! not_cues = ["not", "n't", "never"]
//! ```

use crate::errors::{PipelineError, PipelineResult};
use crate::negation::NegationExtractor;
use crate::vocabulary::{Direction, FilterType, Protocol, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Configuration for the extraction pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub vocabulary: VocabularyConfig,
    pub negation: NegationConfig,
}

/// Surface forms added on top of the builtin tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VocabularyConfig {
    pub protocols: BTreeMap<String, Protocol>,
    pub filter_types: BTreeMap<String, FilterType>,
    pub directions: BTreeMap<String, Direction>,
}

impl VocabularyConfig {
    pub fn build(&self) -> Vocabulary {
        let mut vocabulary = Vocabulary::default();
        for (term, protocol) in &self.protocols {
            vocabulary.add_protocol(term, *protocol);
        }
        for (term, filter_type) in &self.filter_types {
            vocabulary.add_filter_type(term, *filter_type);
        }
        for (term, direction) in &self.directions {
            vocabulary.add_direction(term, *direction);
        }
        vocabulary
    }
}

/// Words treated as negation cues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NegationConfig {
    pub not_cues: Vec<String>,
    pub negative_heads: Vec<String>,
}

impl NegationConfig {
    pub fn extractor(&self) -> NegationExtractor {
        NegationExtractor::with_cues(self.not_cues.as_slice(), self.negative_heads.as_slice())
    }
}

impl Default for NegationConfig {
    fn default() -> Self {
        Self {
            not_cues: vec!["not".into(), "n't".into()],
            negative_heads: vec!["without".into()],
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> PipelineResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> PipelineResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| PipelineError::ConfigRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PipelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.negation.not_cues, vec!["not", "n't"]);
        assert_eq!(config.vocabulary.build(), Vocabulary::builtin().clone());
    }

    #[test]
    fn test_vocabulary_extensions() {
        let config = PipelineConfig::from_toml_str(
            r#"
            [vocabulary]
            protocols = { "eth" = "ether", "v6" = "ip6" }
            filter_types = { "hosts" = "host" }
            directions = { "from" = "src", "either" = "src_or_dst" }
            "#,
        )
        .unwrap();

        let vocabulary = config.vocabulary.build();
        assert_eq!(vocabulary.protocol("ETH"), Some(Protocol::Ether));
        assert_eq!(vocabulary.protocol("v6"), Some(Protocol::Ip6));
        assert_eq!(vocabulary.filter_type("hosts"), Some(FilterType::Host));
        assert_eq!(vocabulary.direction("from"), Some(Direction::Src));
        assert_eq!(vocabulary.direction("either"), Some(Direction::SrcOrDst));
        assert_eq!(vocabulary.protocol("tcp"), Some(Protocol::Tcp));
    }

    #[test]
    fn test_negation_cues_override_defaults() {
        let config = PipelineConfig::from_toml_str(
            r#"
            [negation]
            not_cues = ["not", "never"]
            "#,
        )
        .unwrap();

        let extractor = config.negation.extractor();
        assert!(extractor.is_not_cue("never"));
        assert!(!extractor.is_not_cue("n't"));
        assert!(extractor.is_negative_head("without"));
    }

    #[test]
    fn test_rejects_unknown_values() {
        let err = PipelineConfig::from_toml_str(
            r#"
            [vocabulary]
            protocols = { "eth" = "token-ring" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));

        let err = PipelineConfig::from_toml_str("[metrics]\nenabled = true").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PipelineConfig::from_path(Path::new("/nonexistent/pcap-lingu.toml")).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigRead { .. }));
    }
}
