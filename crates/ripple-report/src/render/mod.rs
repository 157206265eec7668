//! LaTeX rendering of aggregated records.
//!
//! Every function here is pure: it takes records and an
//! [`ExperimentContext`] and returns document source. Writing files is the
//! caller's job.
//!
//! - [`table`]: metric tables (`sidewaystable` long form, `table` short form).
//! - [`plot`]: pgfplots bar charts of threshold histograms.

pub mod plot;
pub mod table;

pub use plot::render_threshold_figure;
pub use table::{TableStyle, render_metric_table};

use serde::Serialize;

/// Which experiment a results file belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "experiment", rename_all = "lowercase")]
pub enum Experiment {
    /// Fixed initial threshold, varied initial configuration.
    First { threshold: String },
    /// Varied agent behaviour.
    Second,
}

impl Experiment {
    /// `first` or `second`, as used in captions and labels.
    #[must_use]
    pub const fn ordinal(&self) -> &'static str {
        match self {
            Self::First { .. } => "first",
            Self::Second => "second",
        }
    }
}

/// What a rendered document describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentContext {
    pub experiment: Experiment,
    /// Initial configuration (first experiment) or agent type (second).
    pub configuration: String,
    /// Number of repetitions each result averages over.
    pub repetitions: u32,
}

impl ExperimentContext {
    #[must_use]
    pub fn first(threshold: &str, configuration: &str, repetitions: u32) -> Self {
        Self {
            experiment: Experiment::First {
                threshold: threshold.to_string(),
            },
            configuration: configuration.to_string(),
            repetitions,
        }
    }

    #[must_use]
    pub fn second(configuration: &str, repetitions: u32) -> Self {
        Self {
            experiment: Experiment::Second,
            configuration: configuration.to_string(),
            repetitions,
        }
    }

    /// Closing sentence of every caption.
    #[must_use]
    pub fn repetition_sentence(&self) -> String {
        format!(
            "The results are an average of {} repetitions of the experiment.",
            self.repetitions
        )
    }
}

/// Ordinal name of a game model file stem: `model-1` → `first`,
/// `model-2` → `second`. Other stems pass through unchanged.
#[must_use]
pub fn model_ordinal(model: &str) -> &str {
    match model {
        "model-1" => "first",
        "model-2" => "second",
        other => other,
    }
}

/// Math symbol of a game model, for captions.
#[must_use]
pub fn game_symbol(model: &str) -> String {
    match model_ordinal(model) {
        "first" => r"$\Gamma_I$".to_string(),
        "second" => r"$\Gamma_f$".to_string(),
        other => other.to_string(),
    }
}

/// Join names as an English list: `a, b, and c`.
fn english_list(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [one] => (*one).to_string(),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_map_to_games() {
        assert_eq!(model_ordinal("model-1"), "first");
        assert_eq!(model_ordinal("model-2"), "second");
        assert_eq!(model_ordinal("model-3"), "model-3");
        assert_eq!(game_symbol("model-1"), r"$\Gamma_I$");
        assert_eq!(game_symbol("model-2"), r"$\Gamma_f$");
    }

    #[test]
    fn english_lists() {
        assert_eq!(english_list(&[]), "");
        assert_eq!(english_list(&["A"]), "A");
        assert_eq!(english_list(&["A", "B", "C"]), "A, B, and C");
    }

    #[test]
    fn repetition_sentence_uses_count() {
        let ctx = ExperimentContext::second("malicious", 7);
        assert!(ctx.repetition_sentence().contains("average of 7 repetitions"));
        assert_eq!(ctx.experiment.ordinal(), "second");
    }
}
