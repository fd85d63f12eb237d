use crate::models::chart::ChartPayload;
use crate::services::chart_service::ChartService;
use crate::view::engine::{FigureEngine, PlotlyScriptEngine};
use crate::view::region::{Visualization, VisualizationRegion};

/// Owns the visualization region and is its only writer.
///
/// Each dispatch clears the region and resets the engine, builds the
/// visualization for the payload's kind, installs it, then asks the engine to
/// draw its figures. All of that happens under one `&mut self`, so no caller
/// can observe the region half updated. Hosts sharing a dispatcher across
/// threads must wrap it in a mutex.
pub struct VisualizationService<E: FigureEngine = PlotlyScriptEngine> {
    region: VisualizationRegion,
    engine: E,
    chart_service: ChartService,
    no_visualization_notice: String,
}

impl<E: FigureEngine> VisualizationService<E> {
    pub fn new(engine: E, no_visualization_notice: impl Into<String>) -> Self {
        Self {
            region: VisualizationRegion::new(),
            engine,
            chart_service: ChartService::new(),
            no_visualization_notice: no_visualization_notice.into(),
        }
    }

    /// Replace whatever is shown with a rendering of `payload`.
    ///
    /// Never fails. `Unknown` shows the notice and draws nothing. A figure the
    /// engine cannot draw is logged and its host stays empty; the rest of the
    /// visualization is still shown.
    pub fn dispatch(&mut self, payload: &ChartPayload) -> &Visualization {
        self.region.clear();
        self.engine.reset();

        let kind = payload.kind();
        let visualization = match payload {
            ChartPayload::NetWorthTrend(chart) => self.chart_service.render_net_worth(chart),
            ChartPayload::InvestmentPerformance(chart) => {
                self.chart_service.render_investment(chart)
            }
            ChartPayload::SpendingPatterns(chart) => self.chart_service.render_spending(chart),
            ChartPayload::DebtAnalysis(chart) => self.chart_service.render_debt(chart),
            ChartPayload::Unknown => {
                tracing::debug!("No renderer for chart kind, showing notice");
                self.chart_service
                    .render_unavailable(&self.no_visualization_notice)
            }
        };

        let installed = self.region.install(visualization);
        let figures = installed.figures();
        tracing::debug!(kind = %kind, figures = figures.len(), "Dispatched visualization");

        for (target, figure) in figures {
            if let Err(e) = self.engine.plot(target, figure) {
                tracing::warn!(
                    engine = %self.engine.name(),
                    target = %target,
                    error = %e,
                    "Failed to draw figure, leaving pane empty"
                );
            }
        }

        installed
    }

    /// Remove the live visualization, if any.
    pub fn clear(&mut self) {
        self.region.clear();
        self.engine.reset();
    }

    pub fn region(&self) -> &VisualizationRegion {
        &self.region
    }

    pub fn current(&self) -> Option<&Visualization> {
        self.region.current()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
