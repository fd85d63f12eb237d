pub mod errors;
pub mod format;
pub mod models;
pub mod services;
pub mod transport;
pub mod view;

use models::{
    chat::{ChatReply, ChatTurn},
    settings::Settings,
};
use services::{
    export_service::{ExportFile, ExportService},
    visualization_service::VisualizationService,
};
use transport::traits::ChatTransport;
use uuid::Uuid;
use view::{
    engine::{FigureEngine, PlotCall, PlotlyScriptEngine},
    log::ConversationLog,
    region::Visualization,
};

use errors::CoreError;

/// A query that has been shown in the log and is waiting for its reply.
///
/// Returned by [`FinanceChat::begin_turn`]; hand it back to
/// [`FinanceChat::complete_turn`] once the transport resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PendingTurn {
    query: String,
    placeholder: Uuid,
}

impl PendingTurn {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// How a call to [`FinanceChat::send`] ended.
#[derive(Debug)]
pub enum SendOutcome {
    /// The query was blank; nothing was sent or shown.
    Skipped,
    /// The reply was shown; holds the recorded turn's id.
    Completed(Uuid),
    /// The round-trip failed; the apology message was shown.
    Failed(CoreError),
}

/// Main entry point for the finance-chat core library.
/// Owns the conversation log, the visualization region (via its dispatcher)
/// and the history of completed turns.
#[must_use]
pub struct FinanceChat<E: FigureEngine = PlotlyScriptEngine> {
    settings: Settings,
    log: ConversationLog,
    visualization_service: VisualizationService<E>,
    export_service: ExportService,
    turns: Vec<ChatTurn>,
}

impl<E: FigureEngine> std::fmt::Debug for FinanceChat<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceChat")
            .field("settings", &self.settings)
            .field("messages", &self.log.len())
            .field("turns", &self.turns.len())
            .field("engine", &self.visualization_service.engine().name())
            .field(
                "visualization",
                &self.visualization_service.current().map(|v| v.kind),
            )
            .finish()
    }
}

impl FinanceChat<PlotlyScriptEngine> {
    /// Default settings, Plotly script engine.
    pub fn create_new() -> Self {
        Self::with_settings(Settings::default(), PlotlyScriptEngine::new())
    }

    /// Drain the `Plotly.newPlot` calls for the visualization now shown.
    /// The host evaluates them after injecting [`Self::visualization_html`].
    pub fn take_plot_calls(&mut self) -> Vec<PlotCall> {
        self.visualization_service.engine_mut().take_calls()
    }
}

impl<E: FigureEngine> FinanceChat<E> {
    /// Build a client from caller-supplied settings. They are validated
    /// first; bad settings are `CoreError::InvalidSettings`.
    pub fn new(settings: Settings, engine: E) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::with_settings(settings, engine))
    }

    fn with_settings(settings: Settings, engine: E) -> Self {
        let visualization_service =
            VisualizationService::new(engine, settings.no_visualization_notice.clone());
        Self {
            settings,
            log: ConversationLog::new(),
            visualization_service,
            export_service: ExportService::new(),
            turns: Vec::new(),
        }
    }

    // ── Chat Round-Trip ─────────────────────────────────────────────

    /// Show a user query and the "thinking" placeholder.
    /// Returns `None` (and shows nothing) when the query is blank.
    pub fn begin_turn(&mut self, query: &str) -> Option<PendingTurn> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.log.push_user(query);
        let placeholder = self.log.push_pending(&self.settings.loading_text);

        Some(PendingTurn {
            query: query.to_string(),
            placeholder,
        })
    }

    /// Finish a turn with the transport's result.
    ///
    /// The placeholder is always removed. On success the assistant text is
    /// appended to the log first, then the visualization (if any) replaces the
    /// region. On failure the configured apology is shown and the region is
    /// left as it was.
    pub fn complete_turn(
        &mut self,
        pending: PendingTurn,
        result: Result<ChatReply, CoreError>,
    ) -> Result<Uuid, CoreError> {
        self.log.remove(pending.placeholder);

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Chat round-trip failed");
                self.log.push_assistant(&self.settings.error_message);
                return Err(e);
            }
        };

        self.log.push_assistant(&reply.response);
        let turn = ChatTurn::new(&pending.query, reply)?;
        let id = turn.id();

        if let Some(payload) = turn.chart_payload() {
            self.visualization_service.dispatch(payload);
        }
        self.turns.push(turn);

        Ok(id)
    }

    /// Run a full round-trip: show the query, await the transport, show the reply.
    /// Transport failures are shown as the apology message and reported in the outcome.
    pub async fn send(&mut self, transport: &dyn ChatTransport, query: &str) -> SendOutcome {
        let Some(pending) = self.begin_turn(query) else {
            return SendOutcome::Skipped;
        };

        let result = transport.send_query(pending.query()).await;
        match self.complete_turn(pending, result) {
            Ok(id) => SendOutcome::Completed(id),
            Err(e) => SendOutcome::Failed(e),
        }
    }

    /// Discard every message and completed turn. The visualization stays.
    pub fn clear_conversation(&mut self) {
        self.log.clear();
        self.turns.clear();
    }

    // ── Visualization ───────────────────────────────────────────────

    /// The visualization currently shown, if any.
    #[must_use]
    pub fn visualization(&self) -> Option<&Visualization> {
        self.visualization_service.current()
    }

    /// Markup for the visualization region (empty when nothing is shown).
    #[must_use]
    pub fn visualization_html(&self) -> String {
        self.visualization_service.region().to_html()
    }

    pub fn visualization_service(&self) -> &VisualizationService<E> {
        &self.visualization_service
    }

    pub fn visualization_service_mut(&mut self) -> &mut VisualizationService<E> {
        &mut self.visualization_service
    }

    // ── Conversation ────────────────────────────────────────────────

    #[must_use]
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Markup for the whole conversation pane.
    #[must_use]
    pub fn log_html(&self) -> String {
        self.log.to_html()
    }

    /// Completed turns, oldest first.
    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    #[must_use]
    pub fn get_turn(&self, id: Uuid) -> Option<&ChatTurn> {
        self.turns.iter().find(|t| t.id() == id)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Fetch the full financial state and package it for download.
    pub async fn export(&self, transport: &dyn ChatTransport) -> Result<ExportFile, CoreError> {
        let data = transport.fetch_export().await?;
        let file = self
            .export_service
            .package(&data, &self.settings.export_file_name)?;
        tracing::info!(file = %file.file_name, bytes = file.len(), "Prepared data export");
        Ok(file)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
