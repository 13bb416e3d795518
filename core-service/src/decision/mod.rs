//! Decision Module
//!
//! Probability vector → alert. Đây là CORE STEP - nơi quyết định
//! HIGH / MEDIUM / SAFE / UNCERTAIN.
//!
//! ## Structure
//! - `types`: AlertLevel, ClassScores, DecisionResult
//! - `rules`: Thresholds and DecisionConfig
//! - `engine`: Decision logic (argmax, reliability gate, alert table)
//!
//! ## Usage
//! ```ignore
//! use firewatch_core::decision::{DecisionConfig, DecisionEngine};
//!
//! let engine = DecisionEngine::new(DecisionConfig::default());
//! let result = engine.decide(&[0.95, 0.03, 0.02])?;
//! if result.alert_level.is_alarm() {
//!     println!("{}", result.message);
//! }
//! ```

pub mod types;
pub mod rules;
pub mod engine;

pub use types::{AlertLevel, ClassScores, DecisionResult};
pub use rules::{DecisionConfig, DEFAULT_CONFIDENCE_THRESHOLD, PROBABILITY_SUM_TOLERANCE};
pub use engine::{alert_level, argmax_first, render_message, DecisionEngine};
