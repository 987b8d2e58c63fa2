use std::{cmp::Ordering, fs::File, io::Write};

use graphviz_rust::{
    cmd::Format,
    dot_generator::{attr, edge, graph, id, node, node_id, stmt},
    dot_structures::*,
    printer::PrinterContext,
};
use uuid::Uuid;

use super::performance_dfg_struct::PerformanceDfg;

///
/// Export the image of a [`PerformanceDfg`]
///
/// Also see [`export_performance_dfg_image_svg`] and [`export_performance_dfg_image_png`]
///
pub fn export_performance_dfg_image<P: AsRef<std::path::Path>>(
    dfg: &PerformanceDfg,
    path: P,
    format: Format,
    dpi_factor: Option<f32>,
) -> Result<(), std::io::Error> {
    let g = export_performance_dfg_to_dot_graph(dfg, dpi_factor);

    let out = graphviz_rust::exec(g, &mut PrinterContext::default(), vec![format.into()])?;

    let mut f = File::create(path)?;
    f.write_all(&out)?;
    Ok(())
}

///
/// Export a [`PerformanceDfg`] to a DOT graph (used in Graphviz)
///
/// Activity nodes are labeled with their frequency; edges are labeled with the mean duration of
/// the directly-follows relation.
///
pub fn export_performance_dfg_to_dot_graph(dfg: &PerformanceDfg, dpi_factor: Option<f32>) -> Graph {
    let mut sorted_acts: Vec<_> = dfg.activities.iter().collect();
    sorted_acts.sort_by(|(a_act, _), (b_act, _)| {
        if dfg.start_activities.contains(*a_act) {
            Ordering::Less
        } else if dfg.start_activities.contains(*b_act) || dfg.end_activities.contains(*a_act) {
            Ordering::Greater
        } else if dfg.end_activities.contains(*b_act) {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    });
    let activity_nodes: Vec<Stmt> = sorted_acts
        .into_iter()
        .map(|(act, &frequency)| {
            let mut counted_label = act.to_owned();
            counted_label.push_str(": ");
            counted_label.push_str(&frequency.to_string());
            let fill_color: String = if dfg.is_start_activity(act) && dfg.is_end_activity(act) {
                "\"#4B9969:#D4001F\"".into()
            } else if dfg.is_start_activity(act) {
                "\"#4B9969\"".into()
            } else if dfg.is_end_activity(act) {
                "\"#D4001F\"".into()
            } else {
                "\"white\"".into()
            };

            let (font_size, width) = (12, 1);
            stmt!(node!(esc act; attr!("label", esc counted_label), attr!("gradientangle", "45"), attr!("shape","box"), attr!("fontsize",font_size),attr!("style","filled"), attr!("fillcolor",fill_color), attr!("width",width), attr!("height",0.5)))
        }).collect();

    let arcs: Vec<Stmt> = dfg
        .edges
        .iter()
        .map(|((from, to), performance)| {
            let duration_label = format_duration(performance.mean_seconds());
            stmt!(
                edge!(node_id!(esc from) => node_id!(esc to), vec![attr!("label", esc duration_label)])
            )
        })
        .collect();

    let mut global_graph_options = vec![stmt!(attr!("rankdir", "LR"))];
    if let Some(dpi_fac) = dpi_factor {
        global_graph_options.push(stmt!(attr!("dpi", (dpi_fac * 96.0))))
    }

    graph!(strict di id!(esc Uuid::new_v4()),vec![global_graph_options,activity_nodes, arcs].into_iter().flatten().collect())
}

/// Render a duration in seconds as a compact human-readable label (e.g., `42.0s`, `1.5h`, `2.3d`)
pub fn format_duration(seconds: f64) -> String {
    if seconds >= 86_400.0 {
        format!("{:.1}d", seconds / 86_400.0)
    } else if seconds >= 3_600.0 {
        format!("{:.1}h", seconds / 3_600.0)
    } else if seconds >= 60.0 {
        format!("{:.1}m", seconds / 60.0)
    } else {
        format!("{:.1}s", seconds)
    }
}

///
/// Export the image of a [`PerformanceDfg`] as a SVG file
///
/// Also consider using [`PerformanceDfg::export_svg`] for convenience.
pub fn export_performance_dfg_image_svg<P: AsRef<std::path::Path>>(
    dfg: &PerformanceDfg,
    path: P,
) -> Result<(), std::io::Error> {
    export_performance_dfg_image(dfg, path, Format::Svg, None)
}

///
/// Export the image of a [`PerformanceDfg`] as a PNG file
///
/// Also consider using [`PerformanceDfg::export_png`] for convenience.
pub fn export_performance_dfg_image_png<P: AsRef<std::path::Path>>(
    dfg: &PerformanceDfg,
    path: P,
) -> Result<(), std::io::Error> {
    export_performance_dfg_image(dfg, path, Format::Png, Some(2.0))
}

#[cfg(test)]
mod tests {
    use super::format_duration;

    #[test]
    fn duration_labels() {
        assert_eq!(format_duration(42.0), "42.0s");
        assert_eq!(format_duration(90.0), "1.5m");
        assert_eq!(format_duration(5_400.0), "1.5h");
        assert_eq!(format_duration(129_600.0), "1.5d");
    }
}
