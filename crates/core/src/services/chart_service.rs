use crate::format::numbers::{format_ceil, format_currency, format_percent};
use crate::models::chart::{
    AssetPerformance, ChartKind, DebtChart, InvestmentChart, NetWorthChart, SpendingChart,
};
use crate::view::region::{Block, FigureHost, MetricLine, MetricsBlock, Tab, TabSet, Visualization};

/// Element ids the renderers lay figures into.
pub mod targets {
    pub const NET_WORTH: &str = "net-worth-viz";
    pub const PORTFOLIO: &str = "portfolio-chart";
    pub const MUTUAL_FUNDS: &str = "mutual-funds-chart";
    pub const STOCKS: &str = "stocks-chart";
    pub const SPENDING_PIE: &str = "spending-pie-chart";
    pub const SPENDING_BAR: &str = "spending-bar-chart";
    pub const DEBT: &str = "debt-viz";
}

/// Lays out panels, tabs and the metrics summary for each chart kind.
///
/// Every method is a pure function of its payload: no renderer reads what a
/// previous one produced. Amounts go through the shared currency helper.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// One full-size figure, then current net worth and a signed change line.
    ///
    /// The change amount and percent are shown as magnitudes; direction comes
    /// from the glyph and styling picked by `trend`.
    pub fn render_net_worth(&self, chart: &NetWorthChart) -> Visualization {
        let m = &chart.metrics;
        let mut viz = Visualization::new(ChartKind::NetWorthTrend);

        viz.push(Block::Figure(FigureHost::filling(
            targets::NET_WORTH,
            Some(chart.chart.clone()),
        )));

        let mut metrics = MetricsBlock::default();
        metrics.push(MetricLine::new(
            "Current Net Worth",
            format_currency(m.current_net_worth),
        ));
        metrics.push(MetricLine::styled(
            "Change",
            format!(
                "{} {} ({})",
                m.trend.glyph(),
                format_currency(m.change_value.abs()),
                format_percent(m.change_percent.abs()),
            ),
            m.trend.css_class(),
        ));
        viz.push(Block::Metrics(metrics));

        viz
    }

    /// Portfolio / Mutual Funds / Stocks tabs, Portfolio active.
    pub fn render_investment(&self, chart: &InvestmentChart) -> Visualization {
        let m = &chart.metrics;
        let mut viz = Visualization::new(ChartKind::InvestmentPerformance);

        viz.push(Block::Tabs(TabSet::new(vec![
            Tab::new(
                "portfolio-tab",
                "Portfolio",
                FigureHost::new(targets::PORTFOLIO, chart.portfolio_allocation_chart.clone()),
            ),
            Tab::new(
                "mutual-funds-tab",
                "Mutual Funds",
                FigureHost::new(targets::MUTUAL_FUNDS, chart.mutual_funds_chart.clone()),
            ),
            Tab::new(
                "stocks-tab",
                "Stocks",
                FigureHost::new(targets::STOCKS, chart.stocks_chart.clone()),
            ),
        ])));

        let mut metrics = MetricsBlock::default();
        metrics.push(MetricLine::new(
            "Total Investment Value",
            format_currency(m.total_investment_value),
        ));
        metrics.push(MetricLine::new(
            "Average Return",
            format_percent(m.weighted_average_return),
        ));
        if let Some(best) = &m.best_performing_asset {
            metrics.push(MetricLine::new("Best Performing", performer(best)));
        }
        if let Some(worst) = &m.worst_performing_asset {
            metrics.push(MetricLine::new("Worst Performing", performer(worst)));
        }
        viz.push(Block::Metrics(metrics));

        viz
    }

    /// Distribution / By Category tabs, Distribution active.
    ///
    /// Top categories are joined in the order given; they are already ranked.
    pub fn render_spending(&self, chart: &SpendingChart) -> Visualization {
        let m = &chart.metrics;
        let mut viz = Visualization::new(ChartKind::SpendingPatterns);

        viz.push(Block::Tabs(TabSet::new(vec![
            Tab::new(
                "pie-tab",
                "Distribution",
                FigureHost::new(targets::SPENDING_PIE, chart.pie_chart.clone()),
            ),
            Tab::new(
                "bar-tab",
                "By Category",
                FigureHost::new(targets::SPENDING_BAR, chart.bar_chart.clone()),
            ),
        ])));

        let mut metrics = MetricsBlock::default();
        metrics.push(MetricLine::new("Month", m.month.clone()));
        metrics.push(MetricLine::new("Total Income", format_currency(m.total_income)));
        metrics.push(MetricLine::new("Total Expenses", format_currency(m.total_spending)));
        metrics.push(MetricLine::new(
            "Savings",
            format!(
                "{} ({})",
                format_currency(m.savings),
                format_percent(m.savings_rate)
            ),
        ));
        metrics.push(MetricLine::new(
            "Top Categories",
            m.top_spending_categories.join(", "),
        ));
        viz.push(Block::Metrics(metrics));

        viz
    }

    /// One full-size figure (empty without a pie), then the debt summary.
    /// Months to freedom are rounded up.
    pub fn render_debt(&self, chart: &DebtChart) -> Visualization {
        let m = &chart.metrics;
        let mut viz = Visualization::new(ChartKind::DebtAnalysis);

        viz.push(Block::Figure(FigureHost::filling(
            targets::DEBT,
            chart.pie_chart.clone(),
        )));

        let mut metrics = MetricsBlock::default();
        metrics.push(MetricLine::new("Total Debt", format_currency(m.total_debt)));
        metrics.push(MetricLine::new(
            "Monthly Payment",
            format_currency(m.monthly_debt_payment),
        ));
        metrics.push(MetricLine::new(
            "Debt-to-Income Ratio",
            format_percent(m.debt_to_income_ratio),
        ));
        metrics.push(MetricLine::new(
            "Est. Months to Debt Freedom",
            format_ceil(m.months_to_debt_freedom),
        ));
        viz.push(Block::Metrics(metrics));

        viz
    }

    /// The terminal state for a kind with no renderer.
    pub fn render_unavailable(&self, notice: &str) -> Visualization {
        let mut viz = Visualization::new(ChartKind::Unknown);
        viz.push(Block::Notice(notice.to_string()));
        viz
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

fn performer(asset: &AssetPerformance) -> String {
    format!("{} ({})", asset.name, format_percent(asset.return_pct))
}
