//! Core engine — the fetch → consolidate → classify pipeline.

pub mod assessor;

pub use assessor::RiskService;
