use crate::models::chart::{ChartKind, FigureSpec};

/// A drawable area the rendering engine plots one figure into.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureHost {
    /// Element id the engine targets
    pub target: String,

    /// Stretch to fill the parent (single-figure layouts)
    pub fill: bool,

    /// `None` leaves the host empty
    pub figure: Option<FigureSpec>,
}

impl FigureHost {
    pub fn new(target: impl Into<String>, figure: Option<FigureSpec>) -> Self {
        Self {
            target: target.into(),
            fill: false,
            figure,
        }
    }

    pub fn filling(target: impl Into<String>, figure: Option<FigureSpec>) -> Self {
        Self {
            fill: true,
            ..Self::new(target, figure)
        }
    }

    fn to_html(&self) -> String {
        if self.fill {
            format!(
                "<div id=\"{}\" style=\"width: 100%; height: 100%;\"></div>",
                self.target
            )
        } else {
            format!("<div id=\"{}\"></div>", self.target)
        }
    }
}

/// One tab: its button and the pane it reveals.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    /// Button element id
    pub id: String,
    pub label: String,
    pub active: bool,
    pub pane: FigureHost,
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>, pane: FigureHost) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            active: false,
            pane,
        }
    }
}

/// A tab strip plus its panes. Every tab exists even when its pane has no figure.
#[derive(Debug, Clone, PartialEq)]
pub struct TabSet {
    pub tabs: Vec<Tab>,
}

impl TabSet {
    /// Build a tab set with the first tab active.
    pub fn new(mut tabs: Vec<Tab>) -> Self {
        for (idx, tab) in tabs.iter_mut().enumerate() {
            tab.active = idx == 0;
        }
        Self { tabs }
    }

    pub fn active(&self) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.active)
    }

    fn to_html(&self) -> String {
        let mut html = String::from("<ul class=\"nav nav-tabs\" role=\"tablist\">");
        for tab in &self.tabs {
            html.push_str(&format!(
                "<li class=\"nav-item\" role=\"presentation\"><button class=\"nav-link{}\" id=\"{}\" data-bs-toggle=\"tab\" data-bs-target=\"#{}\" type=\"button\">{}</button></li>",
                if tab.active { " active" } else { "" },
                tab.id,
                tab.pane.target,
                tab.label,
            ));
        }
        html.push_str("</ul><div class=\"tab-content\">");
        for tab in &self.tabs {
            html.push_str(&format!(
                "<div class=\"tab-pane fade{}\" id=\"{}\" role=\"tabpanel\"></div>",
                if tab.active { " show active" } else { "" },
                tab.pane.target,
            ));
        }
        html.push_str("</div>");
        html
    }
}

/// A labelled value in the metrics summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricLine {
    pub label: String,
    pub value: String,
    /// Styling class wrapped around the value, if any
    pub class: Option<&'static str>,
}

impl MetricLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            class: None,
        }
    }

    pub fn styled(label: impl Into<String>, value: impl Into<String>, class: &'static str) -> Self {
        Self {
            class: Some(class),
            ..Self::new(label, value)
        }
    }

    fn to_html(&self) -> String {
        match self.class {
            Some(class) => format!(
                "<p><strong>{}:</strong> <span class=\"{class}\">{}</span></p>",
                self.label, self.value
            ),
            None => format!("<p><strong>{}:</strong> {}</p>", self.label, self.value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsBlock {
    pub lines: Vec<MetricLine>,
}

impl MetricsBlock {
    pub fn push(&mut self, line: MetricLine) {
        self.lines.push(line);
    }

    /// Value of the first line with this label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.value.as_str())
    }

    fn to_html(&self) -> String {
        let body: String = self.lines.iter().map(MetricLine::to_html).collect();
        format!("<div class=\"chart-metrics\">{body}</div>")
    }
}

/// A piece of a rendered visualization, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Figure(FigureHost),
    Tabs(TabSet),
    Metrics(MetricsBlock),
    Notice(String),
}

impl Block {
    fn to_html(&self) -> String {
        match self {
            Block::Figure(host) => host.to_html(),
            Block::Tabs(tabs) => tabs.to_html(),
            Block::Metrics(metrics) => metrics.to_html(),
            Block::Notice(text) => format!("<p>{text}</p>"),
        }
    }
}

/// Everything one renderer produced for one payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Visualization {
    pub kind: ChartKind,
    pub blocks: Vec<Block>,
}

impl Visualization {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Every host that has a figure to draw, as `(target id, figure)`, in
    /// display order. Tab panes are included whether or not they are active.
    pub fn figures(&self) -> Vec<(&str, &FigureSpec)> {
        let mut figures = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Figure(host) => {
                    if let Some(fig) = &host.figure {
                        figures.push((host.target.as_str(), fig));
                    }
                }
                Block::Tabs(set) => {
                    for tab in &set.tabs {
                        if let Some(fig) = &tab.pane.figure {
                            figures.push((tab.pane.target.as_str(), fig));
                        }
                    }
                }
                Block::Metrics(_) | Block::Notice(_) => {}
            }
        }
        figures
    }

    pub fn tabs(&self) -> Option<&TabSet> {
        self.blocks.iter().find_map(|b| match b {
            Block::Tabs(set) => Some(set),
            _ => None,
        })
    }

    pub fn metrics(&self) -> Option<&MetricsBlock> {
        self.blocks.iter().find_map(|b| match b {
            Block::Metrics(m) => Some(m),
            _ => None,
        })
    }

    pub fn notice(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Notice(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn to_html(&self) -> String {
        self.blocks.iter().map(Block::to_html).collect()
    }
}

/// The single shared area holding at most one live visualization.
///
/// Only the dispatcher writes to it. Installing a visualization replaces the
/// previous one wholesale.
#[derive(Debug, Default)]
pub struct VisualizationRegion {
    current: Option<Visualization>,
    /// Bumped on every clear or install
    generation: u64,
}

impl VisualizationRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.generation += 1;
    }

    /// Replace the contents and return a view of what is now live.
    pub fn install(&mut self, visualization: Visualization) -> &Visualization {
        self.generation += 1;
        self.current.insert(visualization)
    }

    pub fn current(&self) -> Option<&Visualization> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Markup for the region; empty when nothing is live.
    pub fn to_html(&self) -> String {
        self.current
            .as_ref()
            .map(Visualization::to_html)
            .unwrap_or_default()
    }
}
