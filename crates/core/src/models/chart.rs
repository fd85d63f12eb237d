use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Which visualization the backend attached to a reply.
///
/// Selects both the payload shape and the renderer. Any tag outside the
/// four known ones decodes to `Unknown`, which renders a placeholder notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartKind {
    NetWorthTrend,
    InvestmentPerformance,
    SpendingPatterns,
    DebtAnalysis,
    Unknown,
}

impl ChartKind {
    /// Map a backend `chart_type` tag to a kind. Exact, case-sensitive match.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "net_worth_trend" => ChartKind::NetWorthTrend,
            "investment_performance" => ChartKind::InvestmentPerformance,
            "spending_patterns" => ChartKind::SpendingPatterns,
            "debt_analysis" => ChartKind::DebtAnalysis,
            _ => ChartKind::Unknown,
        }
    }

    /// The wire tag for this kind (`"unknown"` for `Unknown`).
    pub fn tag(&self) -> &'static str {
        match self {
            ChartKind::NetWorthTrend => "net_worth_trend",
            ChartKind::InvestmentPerformance => "investment_performance",
            ChartKind::SpendingPatterns => "spending_patterns",
            ChartKind::DebtAnalysis => "debt_analysis",
            ChartKind::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ChartKind::Unknown)
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<String> for ChartKind {
    fn from(tag: String) -> Self {
        ChartKind::from_tag(&tag)
    }
}

impl From<ChartKind> for String {
    fn from(kind: ChartKind) -> Self {
        kind.tag().to_string()
    }
}

/// An opaque serialized figure (data + layout) handed to the rendering engine.
///
/// The core never looks inside; it only carries the string through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FigureSpec(String);

impl FigureSpec {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for FigureSpec {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for FigureSpec {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

// ── Net worth ───────────────────────────────────────────────────────

/// Direction of the net worth change over the charted period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    /// Emitted by the backend when the change is exactly zero.
    Neutral,
}

impl Trend {
    pub fn is_positive(&self) -> bool {
        matches!(self, Trend::Positive)
    }

    /// Arrow shown in front of the change amount. Anything not positive points down.
    pub fn glyph(&self) -> &'static str {
        if self.is_positive() {
            "↑"
        } else {
            "↓"
        }
    }

    /// CSS class for the change line.
    pub fn css_class(&self) -> &'static str {
        if self.is_positive() {
            "text-success"
        } else {
            "text-danger"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthMetrics {
    pub current_net_worth: f64,
    pub trend: Trend,
    pub change_value: f64,
    pub change_percent: f64,

    /// Human-readable span the trend covers, e.g. "2024-01-01 to 2024-06-01"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthChart {
    pub chart: FigureSpec,
    pub metrics: NetWorthMetrics,
}

// ── Investments ─────────────────────────────────────────────────────

/// Best or worst performer across mutual funds and stocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPerformance {
    pub name: String,

    /// Return in percent
    #[serde(rename = "return")]
    pub return_pct: f64,

    /// Asset class label from the backend ("Mutual Fund", "Stock")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub total_investment_value: f64,
    pub weighted_average_return: f64,
    #[serde(default)]
    pub best_performing_asset: Option<AssetPerformance>,
    #[serde(default)]
    pub worst_performing_asset: Option<AssetPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentChart {
    #[serde(default)]
    pub portfolio_allocation_chart: Option<FigureSpec>,
    #[serde(default)]
    pub mutual_funds_chart: Option<FigureSpec>,
    #[serde(default)]
    pub stocks_chart: Option<FigureSpec>,
    pub metrics: InvestmentMetrics,
}

// ── Spending ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingMetrics {
    #[serde(default)]
    pub month: String,
    pub total_income: f64,
    pub total_spending: f64,
    pub savings: f64,
    pub savings_rate: f64,

    /// Largest categories first, in the order the backend ranked them
    #[serde(default)]
    pub top_spending_categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingChart {
    #[serde(default)]
    pub pie_chart: Option<FigureSpec>,
    #[serde(default)]
    pub bar_chart: Option<FigureSpec>,
    pub metrics: SpendingMetrics,
}

// ── Debt ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtMetrics {
    pub total_debt: f64,
    pub monthly_debt_payment: f64,
    /// Monthly debt payment over monthly income, in percent
    pub debt_to_income_ratio: f64,
    /// Fractional months; displayed rounded up
    pub months_to_debt_freedom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtChart {
    #[serde(default)]
    pub pie_chart: Option<FigureSpec>,
    pub metrics: DebtMetrics,
}

// ── Tagged union ────────────────────────────────────────────────────

/// The visualization data attached to a reply. Exactly one variant is active
/// and the variant is the chart kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPayload {
    NetWorthTrend(NetWorthChart),
    InvestmentPerformance(InvestmentChart),
    SpendingPatterns(SpendingChart),
    DebtAnalysis(DebtChart),
    Unknown,
}

impl ChartPayload {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartPayload::NetWorthTrend(_) => ChartKind::NetWorthTrend,
            ChartPayload::InvestmentPerformance(_) => ChartKind::InvestmentPerformance,
            ChartPayload::SpendingPatterns(_) => ChartKind::SpendingPatterns,
            ChartPayload::DebtAnalysis(_) => ChartKind::DebtAnalysis,
            ChartPayload::Unknown => ChartKind::Unknown,
        }
    }

    /// Decode the backend's `chart_data` object for the given kind.
    ///
    /// `Unknown` ignores the data entirely. For known kinds the data must match
    /// that kind's shape; optional figures may be absent or null.
    pub fn from_value(kind: ChartKind, data: serde_json::Value) -> Result<Self, CoreError> {
        let invalid = |e: serde_json::Error| CoreError::InvalidPayload {
            kind: kind.to_string(),
            message: e.to_string(),
        };

        let payload = match kind {
            ChartKind::NetWorthTrend => {
                ChartPayload::NetWorthTrend(serde_json::from_value(data).map_err(invalid)?)
            }
            ChartKind::InvestmentPerformance => {
                ChartPayload::InvestmentPerformance(serde_json::from_value(data).map_err(invalid)?)
            }
            ChartKind::SpendingPatterns => {
                ChartPayload::SpendingPatterns(serde_json::from_value(data).map_err(invalid)?)
            }
            ChartKind::DebtAnalysis => {
                ChartPayload::DebtAnalysis(serde_json::from_value(data).map_err(invalid)?)
            }
            ChartKind::Unknown => ChartPayload::Unknown,
        };

        Ok(payload)
    }

    /// Encode the active variant back into a `chart_data` object.
    /// `Unknown` encodes as `null`.
    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        let value = match self {
            ChartPayload::NetWorthTrend(c) => serde_json::to_value(c),
            ChartPayload::InvestmentPerformance(c) => serde_json::to_value(c),
            ChartPayload::SpendingPatterns(c) => serde_json::to_value(c),
            ChartPayload::DebtAnalysis(c) => serde_json::to_value(c),
            ChartPayload::Unknown => Ok(serde_json::Value::Null),
        };
        value.map_err(|e| {
            CoreError::Serialization(format!("Failed to encode {} payload: {e}", self.kind()))
        })
    }
}
