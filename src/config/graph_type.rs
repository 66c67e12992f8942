use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CxError;
use crate::profile::Profile;

/// Chart kinds understood by CanvasXpress, carried by the `graphType` config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GraphType {
    Area,
    AreaLine,
    #[default]
    Bar,
    BarLine,
    Boxplot,
    Bubble,
    Chord,
    Circular,
    Contour,
    Correlation,
    Density,
    Donnut,
    DotLine,
    Dotplot,
    Facet,
    Gantt,
    Genome,
    Heatmap,
    Histogram,
    KaplanMeier,
    Layout,
    Line,
    Map,
    Meter,
    Network,
    NonLinearFit,
    Oncoprint,
    ParallelCoordinates,
    Pie,
    Radar,
    RemoteGraphs,
    RidgeLine,
    Splom,
    Sankey,
    Scatter2D,
    Scatter3D,
    ScatterBubble2D,
    Stacked,
    StackedLine,
    StackedPercent,
    StackedPercentLine,
    Sunburst,
    Tcga,
    TagCloud,
    Tree,
    Treemap,
    Venn,
    Violin,
}

impl GraphType {
    pub const LABEL: &'static str = "graphType";

    pub const ALL: [Self; 48] = [
        Self::Area,
        Self::AreaLine,
        Self::Bar,
        Self::BarLine,
        Self::Boxplot,
        Self::Bubble,
        Self::Chord,
        Self::Circular,
        Self::Contour,
        Self::Correlation,
        Self::Density,
        Self::Donnut,
        Self::DotLine,
        Self::Dotplot,
        Self::Facet,
        Self::Gantt,
        Self::Genome,
        Self::Heatmap,
        Self::Histogram,
        Self::KaplanMeier,
        Self::Layout,
        Self::Line,
        Self::Map,
        Self::Meter,
        Self::Network,
        Self::NonLinearFit,
        Self::Oncoprint,
        Self::ParallelCoordinates,
        Self::Pie,
        Self::Radar,
        Self::RemoteGraphs,
        Self::RidgeLine,
        Self::Splom,
        Self::Sankey,
        Self::Scatter2D,
        Self::Scatter3D,
        Self::ScatterBubble2D,
        Self::Stacked,
        Self::StackedLine,
        Self::StackedPercent,
        Self::StackedPercentLine,
        Self::Sunburst,
        Self::Tcga,
        Self::TagCloud,
        Self::Tree,
        Self::Treemap,
        Self::Venn,
        Self::Violin,
    ];

    /// The exact string CanvasXpress expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Area => "Area",
            Self::AreaLine => "AreaLine",
            Self::Bar => "Bar",
            Self::BarLine => "BarLine",
            Self::Boxplot => "Boxplot",
            Self::Bubble => "Bubble",
            Self::Chord => "Chord",
            Self::Circular => "Circular",
            Self::Contour => "Contour",
            Self::Correlation => "Correlation",
            Self::Density => "Density",
            Self::Donnut => "Donnut",
            Self::DotLine => "DotLine",
            Self::Dotplot => "Dotplot",
            Self::Facet => "Facet",
            Self::Gantt => "Gantt",
            Self::Genome => "Genome",
            Self::Heatmap => "Heatmap",
            Self::Histogram => "Histogram",
            Self::KaplanMeier => "Kaplan - Meier",
            Self::Layout => "Layout",
            Self::Line => "Line",
            Self::Map => "Map",
            Self::Meter => "Meter",
            Self::Network => "Network",
            Self::NonLinearFit => "NonLinear - Fit",
            Self::Oncoprint => "Oncoprint",
            Self::ParallelCoordinates => "ParallelCoordinates",
            Self::Pie => "Pie",
            Self::Radar => "Radar",
            Self::RemoteGraphs => "Remote - Graphs",
            Self::RidgeLine => "Ridge - Line",
            Self::Splom => "SPLOM",
            Self::Sankey => "Sankey",
            Self::Scatter2D => "Scatter2D",
            Self::Scatter3D => "Scatter3D",
            Self::ScatterBubble2D => "ScatterBubble2D",
            Self::Stacked => "Stacked",
            Self::StackedLine => "StackedLine",
            Self::StackedPercent => "StackedPercent",
            Self::StackedPercentLine => "StackedPercentLine",
            Self::Sunburst => "Sunburst",
            Self::Tcga => "TCGA",
            Self::TagCloud => "TagCloud",
            Self::Tree => "Tree",
            Self::Treemap => "Treemap",
            Self::Venn => "Venn",
            Self::Violin => "Violin",
        }
    }

    /// Profile used for data that has none attached.
    #[must_use]
    pub fn default_profile(self) -> Profile {
        match self {
            Self::Venn => Profile::Venn(Default::default()),
            Self::Network => Profile::Network(Default::default()),
            Self::Genome => Profile::Genome(Default::default()),
            _ => Profile::Standard(Default::default()),
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphType {
    type Err = CxError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|graph_type| graph_type.as_str() == value)
            .ok_or_else(|| CxError::InvalidConfig(format!("unknown graph type {value:?}")))
    }
}

impl TryFrom<String> for GraphType {
    type Error = CxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GraphType> for String {
    fn from(value: GraphType) -> Self {
        value.as_str().to_owned()
    }
}
