pub mod app;
pub mod carousel;
pub mod charts;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod features;
pub mod motion;
pub mod output;
pub mod payload;
pub mod render;
pub mod search;
pub mod submit;
pub mod suggest;
pub mod validate;

pub use classifier::{classify, ClassifyError, PredictionScore, Verdict};

#[cfg(test)]
mod tests;
