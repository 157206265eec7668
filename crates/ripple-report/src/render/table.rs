//! Metric tables.
//!
//! One row per network. Both styles start with the network name, the three
//! proportions (`pi_I`, `pi_F`, `pi_T`) and the round count. The long style
//! then prints min, avg, max of each metric; the short style prints only
//! the averages. Every number goes through [`format_value`].

use std::fmt::Write as _;

use crate::render::{Experiment, ExperimentContext, game_symbol, model_ordinal};
use crate::statistics::{MetricTriple, NetworkStatistics, Statistics, format_value};

/// Table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Full-page rotated `sidewaystable` with min/avg/max per metric.
    Long,
    /// Inline `table` with averages only.
    Short,
}

impl TableStyle {
    pub const ALL: [Self; 2] = [Self::Long, Self::Short];

    /// Suffix of the output file name and label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }

    const fn environment(self) -> &'static str {
        match self {
            Self::Long => "sidewaystable",
            Self::Short => "table",
        }
    }
}

/// Metric column groups in print order: header lines and accessor.
const METRICS: [(&str, &str, fn(&Statistics) -> MetricTriple); 6] = [
    ("Out-Degree", "Initial", |s| s.degree_initial),
    ("In-Degree", "Influence", |s| s.degree_influence),
    ("Betweenness", "Initial", |s| s.betweenness_initial),
    ("Betweenness", "Influence", |s| s.betweenness_influence),
    ("Pagerank", "Initial", |s| s.pagerank_initial),
    ("Pagerank", "Influence", |s| s.pagerank_influence),
];

/// Render the metric table of one results file.
///
/// `model` is the game model's file stem (`model-1`, `model-2`).
#[must_use]
pub fn render_metric_table(
    stats: &NetworkStatistics,
    style: TableStyle,
    ctx: &ExperimentContext,
    model: &str,
) -> String {
    let mut out = String::new();
    let env = style.environment();

    match style {
        TableStyle::Long => {
            let _ = writeln!(out, r"\begin{{{env}}}[p]");
            out.push_str("\\centering\n");
            let _ = writeln!(out, r"\caption{{Full {}}}", caption(ctx, model));
            let _ = writeln!(out, r"\label{{{}}}", label(ctx, model, style));
            out.push_str("\\resizebox{\\textheight}{!}{%\n");
            out.push_str(&long_header());
        }
        TableStyle::Short => {
            let _ = writeln!(out, r"\begin{{{env}}}[H]");
            out.push_str("\\centering\n");
            let _ = writeln!(out, r"\caption{{{}}}", caption(ctx, model));
            let _ = writeln!(out, r"\label{{{}}}", label(ctx, model, style));
            out.push_str("\\resizebox{\\textwidth}{!}{%\n");
            out.push_str(&short_header());
        }
    }

    for s in stats {
        out.push_str(&row(s, style));
    }

    out.push_str("\\hline\n\\end{tabular}%\n}\n");
    let _ = writeln!(out, r"\end{{{env}}}");
    out
}

fn caption(ctx: &ExperimentContext, model: &str) -> String {
    let exp = ctx.experiment.ordinal();
    let setting = match &ctx.experiment {
        Experiment::First { threshold } => format!(
            "with initial threshold {threshold} and initial {} configuration",
            ctx.configuration
        ),
        Experiment::Second => format!("with {} agents", ctx.configuration),
    };
    format!(
        "Table with the metrics of the {exp} experiment {setting} for the initial and influence sets. \
         This table is the outcome of the {} model. {}",
        game_symbol(model),
        ctx.repetition_sentence()
    )
}

fn label(ctx: &ExperimentContext, model: &str, style: TableStyle) -> String {
    let exp = ctx.experiment.ordinal();
    let model = model_ordinal(model);
    let style = style.label();
    match &ctx.experiment {
        Experiment::First { threshold } => format!(
            "tab:metrics-{exp}-{threshold}-{}-{model}-model-{style}",
            ctx.configuration
        ),
        Experiment::Second => {
            format!("tab:metrics-{exp}-{}-{model}-model-{style}", ctx.configuration)
        }
    }
}

fn bold(text: &str) -> String {
    format!(r"\textbf{{{text}}}")
}

/// Multi-line bold header cell.
fn stacked(lines: &[&str]) -> String {
    bold(&format!(
        r"\begin{{tabular}}[c]{{@{{}}c@{{}}}}{}\end{{tabular}}",
        lines.join(r"\\ ")
    ))
}

fn long_header() -> String {
    let groups = "|ccc".repeat(METRICS.len());
    let mut out = format!("\\begin{{tabular}}{{|c|cccc{groups}|}}\n\\hline\n");

    let _ = writeln!(out, r"\multirow{{2}}{{*}}{{{}}} &", bold("Network"));
    for symbol in [r"$\pi_I$", r"$\pi_F$", r"$\pi_T$"] {
        let _ = writeln!(
            out,
            r"  \multicolumn{{1}}{{c|}}{{\multirow{{2}}{{*}}{{{}}}}} &",
            bold(symbol)
        );
    }
    let _ = writeln!(out, "  {} &", bold("Rounds"));

    let last_col = 5 + 3 * METRICS.len();
    let titles: Vec<String> = METRICS
        .iter()
        .map(|(name, set, _)| format!(r"  \multicolumn{{3}}{{c|}}{{{}}}", stacked(&[*name, *set])))
        .collect();
    let _ = writeln!(out, "{} \\\\ \\cline{{6-{last_col}}}", titles.join(" &\n"));

    out.push_str(" &\n");
    out.push_str(&"  \\multicolumn{1}{c|}{} &\n".repeat(3));
    out.push_str("   &\n");
    let sub: Vec<String> = (0..METRICS.len())
        .map(|_| {
            format!(
                "  \\multicolumn{{1}}{{c|}}{{{}}} &\n  \\multicolumn{{1}}{{c|}}{{{}}} &\n  {}",
                bold("Min"),
                bold("Avg"),
                bold("Max")
            )
        })
        .collect();
    let _ = writeln!(out, "{} \\\\ \\hline", sub.join(" &\n"));
    out
}

fn short_header() -> String {
    let groups = "|cc".repeat(METRICS.len() / 2);
    let mut out = format!("\\begin{{tabular}}{{|c|cccc{groups}|}}\n\\hline\n");

    let mut cells = vec![
        bold("Network"),
        bold(r"$\pi_I$"),
        bold(r"$\pi_F$"),
        bold(r"$\pi_T$"),
        bold("Rounds"),
    ];
    cells.extend(
        METRICS
            .iter()
            .map(|(name, set, _)| stacked(&["Average", *name, *set])),
    );
    let _ = writeln!(out, "{} \\\\ \\hline", cells.join(" &\n  "));
    out
}

fn row(s: &Statistics, style: TableStyle) -> String {
    let mut cells = vec![
        format_value(s.initial_prop),
        format_value(s.influence_prop),
        format_value(s.target_prop),
        format_value(s.rounds),
    ];

    for (_, _, metric) in &METRICS {
        let t = metric(s);
        match style {
            TableStyle::Long => {
                cells.push(format_value(t.min));
                cells.push(format_value(t.avg));
                cells.push(format_value(t.max));
            }
            TableStyle::Short => cells.push(format_value(t.avg)),
        }
    }

    format!("  {} & {} \\\\\n", bold(&s.display_name()), cells.join(" & "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::BELOW_EPSILON;

    fn stats() -> NetworkStatistics {
        let mut dolphins = Statistics::empty("Dolphins");
        dolphins.initial_prop = 0.25;
        dolphins.rounds = 3.0;
        dolphins.degree_initial = MetricTriple {
            min: 0.1,
            avg: 0.2,
            max: 0.3,
        };
        dolphins.pagerank_influence = MetricTriple {
            min: 1e-7,
            avg: 0.5,
            max: 0.9,
        };
        NetworkStatistics::seeded(&["Dolphins", "Human_Brain"]).with_record(dolphins)
    }

    fn first_ctx() -> ExperimentContext {
        ExperimentContext::first("0.25", "complete", 5)
    }

    #[test]
    fn long_table_has_min_avg_max() {
        let tex = render_metric_table(&stats(), TableStyle::Long, &first_ctx(), "model-1");
        assert!(tex.starts_with("\\begin{sidewaystable}[p]\n"));
        assert!(tex.ends_with("\\end{sidewaystable}\n"));
        assert!(tex.contains(r"\label{tab:metrics-first-0.25-complete-first-model-long}"));
        assert!(tex.contains(r"\caption{Full Table with the metrics of the first experiment"));
        assert!(tex.contains(r"$\Gamma_I$"));
        assert!(tex.contains(r"\cline{6-23}"));

        let dolphins = tex
            .lines()
            .find(|l| l.contains(r"\textbf{Dolphins}"))
            .expect("dolphins row");
        assert!(dolphins.contains(
            "0.2500 & 0.0000 & 0.0000 & 3.0000 & 0.1000 & 0.2000 & 0.3000 &"
        ));
        assert!(dolphins.ends_with(&format!("{BELOW_EPSILON} & 0.5000 & 0.9000 \\\\")));
        assert_eq!(dolphins.matches(" & ").count(), 22);
    }

    #[test]
    fn short_table_has_averages_only() {
        let ctx = ExperimentContext::second("cooperative", 5);
        let tex = render_metric_table(&stats(), TableStyle::Short, &ctx, "model-2");
        assert!(tex.starts_with("\\begin{table}[H]\n"));
        assert!(tex.ends_with("\\end{table}\n"));
        assert!(tex.contains(r"\label{tab:metrics-second-cooperative-second-model-short}"));
        assert!(tex.contains("with cooperative agents"));

        let dolphins = tex
            .lines()
            .find(|l| l.contains(r"\textbf{Dolphins}"))
            .expect("dolphins row");
        assert_eq!(dolphins.matches(" & ").count(), 10);
        assert!(dolphins.ends_with("0.5000 \\\\"));
    }

    #[test]
    fn absent_networks_render_as_zero_rows() {
        let tex = render_metric_table(&stats(), TableStyle::Short, &first_ctx(), "model-1");
        let brain = tex
            .lines()
            .find(|l| l.contains(r"\textbf{Human Brain}"))
            .expect("zero row");
        assert_eq!(brain.matches("0.0000").count(), 10);
    }

    #[test]
    fn rows_follow_record_order() {
        let tex = render_metric_table(&stats(), TableStyle::Long, &first_ctx(), "model-1");
        let d = tex.find(r"\textbf{Dolphins}").expect("dolphins");
        let h = tex.find(r"\textbf{Human Brain}").expect("brain");
        assert!(d < h);
    }
}
