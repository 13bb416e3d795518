//! Firewatch Core - Fire & Smoke Detection Pipeline
//!
//! Image bytes → tensor (1, 224, 224, 3) → classifier oracle →
//! probability vector → alert (HIGH / MEDIUM / SAFE / UNCERTAIN).
//!
//! ## Structure
//! - `preprocess`: Image Normalizer
//! - `decision`: Decision Engine (argmax, confidence gate, alert table)
//! - `oracle`: Classifier contract + ONNX implementation
//! - `pipeline`: Composition, validated against the oracle at startup
//!
//! Không có global state; mọi thứ được inject qua `DetectionPipeline::new`.

pub mod error;
pub mod labels;
pub mod preprocess;
pub mod decision;
pub mod oracle;
pub mod pipeline;

pub use error::{ConfigError, OracleError, PipelineError, PreprocessError};
pub use labels::{ClassLabel, LabelSet};
pub use decision::{AlertLevel, DecisionConfig, DecisionEngine, DecisionResult};
pub use oracle::{ClassifierOracle, FixedOracle, OnnxOracle};
pub use pipeline::DetectionPipeline;
