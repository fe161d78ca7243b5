//! Demographic flow graph: acquisition sources linked to customer age groups.

use pulse_core::error::PulseResult;
use pulse_core::palette::ColorPalette;
use pulse_core::types::{AgeGroup, EnrichedTransaction};
use serde::{Deserialize, Serialize};

use crate::kpi::distinct_sources;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemographicGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Builds the source → age-group graph for the current period.
///
/// Source nodes appear in first-seen order, followed by the fixed age-group
/// targets. Every transaction contributes its own link; links sharing a
/// source and target are not merged. A source absent from the palette fails
/// the whole build.
pub fn build_demographic_graph(
    transactions: &[EnrichedTransaction<'_>],
    palette: &ColorPalette,
) -> PulseResult<DemographicGraph> {
    let mut nodes = Vec::new();
    for source in distinct_sources(transactions) {
        let colors = palette.source(&source)?;
        nodes.push(GraphNode {
            id: source.as_str().to_string(),
            name: source.display_name(),
            color: colors.node_color.clone(),
        });
    }
    nodes.extend(AgeGroup::GRAPH_TARGETS.iter().map(|group| GraphNode {
        id: group.label().to_string(),
        name: group.label().to_string(),
        color: palette.age_group(*group).to_string(),
    }));

    let links = transactions
        .iter()
        .map(|txn| {
            let colors = palette.source(txn.source())?;
            Ok(GraphLink {
                source: txn.source().as_str().to_string(),
                target: txn.age_group.label().to_string(),
                value: txn.revenue(),
                color: colors.link_color.clone(),
            })
        })
        .collect::<PulseResult<Vec<_>>>()?;

    Ok(DemographicGraph { nodes, links })
}
