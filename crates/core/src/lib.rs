//! Shared data model for the utterance routing core.
//!
//! This crate has no behavior of its own: it defines the Turn/Template/
//! Scenario/Company data model (spec §3), the collaborator trait contracts
//! consumed from and exposed to the rest of the system (spec §6), and the
//! crate-wide error type. `preprocessor`, `matcher`, `router`, `behavior`,
//! and `style` all depend on it and implement nothing here.

pub mod collaborators;
pub mod company;
pub mod error;
pub mod matching;
pub mod pattern;
pub mod preprocessing;
pub mod routing;
pub mod template;
pub mod trace;
pub mod turn;

pub use collaborators::{
    Alert, AlertSeverity, CompanyStore, CostAggregator, LlmAnalysis, LlmFallback, LlmPrewarm, LlmRequest,
    NameDictionary, NotificationSink, OptimizationDecision, OptimizationPolicy, PatternLearningLog,
    PrewarmHandle, TemplateApplyOutcome, TemplateStore, TraceSink,
};
pub use company::{BehaviorMode, BehaviorProfile, CompanyProfile, VoiceSettings};
pub use error::{Error, Result};
pub use matching::{sanitize_score, MatchCandidate, Subscores};
pub use pattern::{Pattern, PatternKind};
pub use preprocessing::{Entities, PreprocessorResult, QualityVerdict, StageTiming};
pub use routing::{CostBreakdown, ErrorKind, RoutedTurn, SelectionReason, Tier};
pub use template::{
    Channel, ContextPattern, Correction, CustomEntityPattern, MatchMode, Precondition, Scenario,
    ScenarioStatus, Template, ThresholdsConfig, UrgencyCategory, UrgencyKeyword,
};
pub use trace::{TraceEnvelope, TraceEvent, TraceStatus};
pub use turn::{ConversationContext, Turn};
