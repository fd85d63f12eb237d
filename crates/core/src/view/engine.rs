use serde::Deserialize;

use crate::errors::CoreError;
use crate::models::chart::FigureSpec;

/// The external charting library, seen from the core.
///
/// Gets a target element id and the figure description, and draws. The core
/// hands figures over verbatim and never inspects them itself.
pub trait FigureEngine {
    /// Human-readable name of this engine (for logs/errors).
    fn name(&self) -> &str;

    /// Draw `figure` into the element with id `target`.
    fn plot(&mut self, target: &str, figure: &FigureSpec) -> Result<(), CoreError>;

    /// Called before a new visualization is drawn. Every pane drawn so far
    /// has just been removed from the region.
    fn reset(&mut self) {}
}

/// A queued `Plotly.newPlot` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotCall {
    pub target: String,
    pub script: String,
}

#[derive(Deserialize)]
struct PlotlyFigure {
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    layout: serde_json::Value,
}

/// Engine that turns each figure into a `Plotly.newPlot(...)` statement.
///
/// A browser host evaluates the queued scripts after injecting the region
/// markup. The queue only ever holds the current visualization's calls; it is
/// dropped whenever the dispatcher starts a new one. Figures are split into their `data` and `layout` members the way
/// Plotly's JSON export lays them out; text that does not parse as JSON is
/// rejected with `CoreError::Render`.
#[derive(Debug, Default)]
pub struct PlotlyScriptEngine {
    calls: Vec<PlotCall>,
}

impl PlotlyScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[PlotCall] {
        &self.calls
    }

    /// Drain the queued calls, oldest first.
    pub fn take_calls(&mut self) -> Vec<PlotCall> {
        std::mem::take(&mut self.calls)
    }
}

impl FigureEngine for PlotlyScriptEngine {
    fn name(&self) -> &str {
        "Plotly"
    }

    fn reset(&mut self) {
        if !self.calls.is_empty() {
            tracing::debug!(dropped = self.calls.len(), "Discarding undrained plot calls");
        }
        self.calls.clear();
    }

    fn plot(&mut self, target: &str, figure: &FigureSpec) -> Result<(), CoreError> {
        let parsed: PlotlyFigure =
            serde_json::from_str(figure.as_str()).map_err(|e| CoreError::Render {
                engine: self.name().to_string(),
                message: format!("Figure for '{target}' is not valid JSON: {e}"),
            })?;

        let data = if parsed.data.is_null() {
            serde_json::Value::Array(Vec::new())
        } else {
            parsed.data
        };
        let layout = if parsed.layout.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            parsed.layout
        };

        // serde_json escapes the id, so it is a valid JS string literal
        let target_literal = serde_json::Value::String(target.to_string());
        self.calls.push(PlotCall {
            target: target.to_string(),
            script: format!("Plotly.newPlot({target_literal}, {data}, {layout});"),
        });
        Ok(())
    }
}
