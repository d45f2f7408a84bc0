//! Skill matching: ontology, extraction, weighted scoring, explainable
//! breakdowns, and the match-store coordination around them.

pub mod explanation;
pub mod extractor;
pub mod handlers;
pub mod ontology;
pub mod scorer;
pub mod service;
