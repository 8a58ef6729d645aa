//! Alert decision engine for newswatch
//!
//! This crate turns fetched headlines into at most one alert per ticker per
//! cycle. It owns the persisted engine state and every rule that decides
//! whether an alert goes out:
//! - ingestion and first-seen bookkeeping
//! - time-windowed clustering of strong headlines
//! - confidence scoring
//! - per-ticker cooldown and per-signature suppression

pub mod cluster;
pub mod confidence;
pub mod config;
pub mod engine;
pub mod gate;
pub mod ingestion;
pub mod message;
pub mod sentiment;
pub mod state_store;

pub use cluster::{detect_cluster, Cluster, ClusterThresholds, Direction};
pub use confidence::{assess_confidence, Confidence, ConfidenceLabel, CredibilityTable};
pub use config::EngineConfig;
pub use engine::{AlertEngine, CycleReport};
pub use gate::{check_gates, GateDecision};
pub use ingestion::{ingest, score_raw_items, IngestOutcome};
pub use message::AlertMessage;
pub use sentiment::{score_text, VaderScorer, SentimentScorer, MAX_SCORING_CHARS};
pub use state_store::{EngineState, StateStore};
