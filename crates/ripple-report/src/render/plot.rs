//! Threshold bar charts.
//!
//! One pgfplots `groupplot` figure per report group, one subplot per
//! network. Bars are drawn with `ybar interval`, so each bucket is given by
//! its lower edge and the last value is repeated at `x = 1` to close the
//! final interval.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::warn;

use ripple_core::ReportGroup;

use super::{english_list, Experiment, ExperimentContext};
use crate::threshold::ThresholdHistogram;

const FIGURE_PREFIX: &str = r"\begin{figure}[H]
    \centering
    \begin{tikzpicture}

    \begin{groupplot}[
        group style={
            group size=2 by ROWS,
            vertical sep=3cm,
            horizontal sep=2.5cm,
        },
        width=8cm,
        height=4.9cm,
        ybar interval,
        xlabel={Thresholds range},
        xtick=data,% reset from ybar interval
        xticklabel=
            {$(\pgfmathprintnumber\tick,%
            \pgfmathprintnumber\nexttick]$},
        x tick label style={font=\scriptsize,rotate=45,anchor=east,},
        ylabel={Proportion of nodes},
        enlargelimits=false
    ]
";

/// Upper y limit of a subplot: 1 when the tallest bar exceeds 0.9,
/// otherwise the tallest bar plus 0.1.
#[must_use]
pub fn y_max(histogram: &ThresholdHistogram) -> f64 {
    let max = histogram.max_proportion();
    if max > 0.9 { 1.0 } else { max + 0.1 }
}

/// Render the figure of one report group.
///
/// `histograms` is keyed by result key. A network of the group with no
/// histogram is left out of the figure with a warning.
#[must_use]
pub fn render_threshold_figure(
    histograms: &BTreeMap<String, ThresholdHistogram>,
    group: ReportGroup,
    ctx: &ExperimentContext,
) -> String {
    let mut plots = Vec::new();
    let mut plotted = Vec::new();
    for network in group.networks() {
        match histograms.get(network.result_key()) {
            Some(h) => {
                plots.push(subplot(network.display_name(), h));
                plotted.push(network.display_name());
            }
            None => warn!(
                network = network.result_key(),
                group = group.label(),
                "no threshold file for network; leaving it out of the figure"
            ),
        }
    }

    let rows = plots.len().div_ceil(2).max(1);
    let mut out = FIGURE_PREFIX.replace("ROWS", &rows.to_string());
    for plot in &plots {
        out.push('\n');
        out.push_str(plot);
        out.push('\n');
    }

    out.push_str("    \\end{groupplot}\n    \\end{tikzpicture}\n");
    let _ = writeln!(out, r"\caption{{{}}}", caption(group, &plotted, ctx));
    let _ = writeln!(out, r"\label{{{}}}", label(group, ctx));
    out.push_str("\\end{figure}\n");
    out
}

fn subplot(title: &str, histogram: &ThresholdHistogram) -> String {
    let mut out = String::new();
    out.push_str("    \\nextgroupplot[\n");
    let _ = writeln!(out, r"        title={{\textbf{{{title}}}}},");
    let _ = writeln!(out, "        ymin=0, ymax={:.2},", y_max(histogram));
    out.push_str("    ]\n    \\addplot coordinates {\n       ");

    let coords: Vec<String> = histogram
        .proportions()
        .iter()
        .enumerate()
        .map(|(i, p)| format!("({:.1},{p})", lower_edge(i)))
        .collect();
    out.push_str(&coords.join(" "));
    let _ = write!(out, " (1,{})", histogram.last());

    out.push_str("\n    };");
    out
}

#[allow(clippy::cast_precision_loss)]
fn lower_edge(bucket: usize) -> f64 {
    bucket as f64 / 10.0
}

fn caption(group: ReportGroup, plotted: &[&str], ctx: &ExperimentContext) -> String {
    let exp = ctx.experiment.ordinal();
    let setting = match &ctx.experiment {
        Experiment::First { threshold } => format!(
            "starting with thresholds ${threshold}$ and initial {} configuration",
            ctx.configuration
        ),
        Experiment::Second => format!("with {} agents", ctx.configuration),
    };
    format!(
        "Threshold value ranges for the {exp} experiment outcome {setting}. \
         Each bar is the number of nodes that have a threshold value lying in the corresponding range. \
         These plots are for the {} datasets: {}. {}",
        group.label(),
        english_list(plotted),
        ctx.repetition_sentence()
    )
}

fn label(group: ReportGroup, ctx: &ExperimentContext) -> String {
    let size = group.label();
    match &ctx.experiment {
        Experiment::First { threshold } => {
            format!("fig:ths-first-{threshold}-{}-{size}-nets", ctx.configuration)
        }
        Experiment::Second => format!("fig:ths-second-{}-{size}-nets", ctx.configuration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::Network;

    fn histograms(values: &[f64]) -> BTreeMap<String, ThresholdHistogram> {
        let h = ThresholdHistogram::from_values(values).expect("non-empty");
        ReportGroup::Small
            .networks()
            .iter()
            .map(|n| (n.result_key().to_string(), h.clone()))
            .collect()
    }

    #[test]
    fn y_max_caps_at_one() {
        let tall = ThresholdHistogram::from_values(&[0.95; 10]).expect("non-empty");
        assert!((y_max(&tall) - 1.0).abs() < 1e-12);

        let flat = ThresholdHistogram::from_values(&[0.05, 0.15, 0.25, 0.35]).expect("non-empty");
        assert!((y_max(&flat) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn one_subplot_per_group_network() {
        let ctx = ExperimentContext::first("0.50", "random", 5);
        let tex = render_threshold_figure(&histograms(&[0.5]), ReportGroup::Small, &ctx);

        assert_eq!(tex.matches(r"\nextgroupplot").count(), 5);
        assert!(tex.contains(r"title={\textbf{Dining Table}}"));
        assert!(tex.contains("group size=2 by 3"));
        assert!(tex.contains(r"\label{fig:ths-first-0.50-random-small-nets}"));
        assert!(tex.contains("starting with thresholds $0.50$ and initial random configuration"));
        assert!(tex.contains("Dining Table, Dolphins, Human Brain, ArXiv, and Wikipedia"));
        assert!(tex.ends_with("\\end{figure}\n"));
    }

    #[test]
    fn coordinates_use_lower_edges_and_repeat_last() {
        let ctx = ExperimentContext::second("malicious", 5);
        let tex = render_threshold_figure(&histograms(&[0.05, 1.0]), ReportGroup::Small, &ctx);
        assert!(tex.contains("(0.0,0.5) (0.1,0) (0.2,0)"));
        assert!(tex.contains("(0.9,0.5) (1,0.5)"));
        assert!(tex.contains("ymin=0, ymax=0.60,"));
        assert!(tex.contains(r"\label{fig:ths-second-malicious-small-nets}"));
    }

    #[test]
    fn missing_network_is_left_out() {
        let mut all = histograms(&[0.3]);
        all.remove(Network::Dolphins.result_key());
        let ctx = ExperimentContext::second("cooperative", 5);
        let tex = render_threshold_figure(&all, ReportGroup::Small, &ctx);
        assert_eq!(tex.matches(r"\nextgroupplot").count(), 4);
        assert!(!tex.contains(r"\textbf{Dolphins}"));
        assert!(tex.contains("small datasets: Dining Table, Human Brain, ArXiv, and Wikipedia."));
    }

    #[test]
    fn other_group_keys_are_ignored() {
        let ctx = ExperimentContext::second("cooperative", 5);
        let tex = render_threshold_figure(&histograms(&[0.3]), ReportGroup::Big, &ctx);
        assert_eq!(tex.matches(r"\nextgroupplot").count(), 0);
        assert!(tex.contains(r"\label{fig:ths-second-cooperative-big-nets}"));
    }
}
