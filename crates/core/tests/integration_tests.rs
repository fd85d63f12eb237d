use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use finance_chat_core::errors::CoreError;
use finance_chat_core::models::chart::{ChartKind, ChartPayload};
use finance_chat_core::models::chat::{ChatReply, Sender};
use finance_chat_core::models::settings::Settings;
use finance_chat_core::services::export_service::ExportFile;
use finance_chat_core::transport::http::HttpChatTransport;
use finance_chat_core::transport::traits::ChatTransport;
use finance_chat_core::view::engine::PlotlyScriptEngine;
use finance_chat_core::{FinanceChat, SendOutcome};
use serde_json::json;

// ═══════════════════════════════════════════════════════════════════
// Mock Chat Transport (for testing without a running backend)
// ═══════════════════════════════════════════════════════════════════

struct MockTransport {
    replies: Mutex<VecDeque<Result<ChatReply, CoreError>>>,
    queries: Mutex<Vec<String>>,
    export: Option<serde_json::Value>,
}

impl MockTransport {
    fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            export: None,
        }
    }

    fn replying(reply: Result<ChatReply, CoreError>) -> Self {
        let mock = Self::new();
        mock.queue(reply);
        mock
    }

    fn with_export(mut self, data: serde_json::Value) -> Self {
        self.export = Some(data);
        self
    }

    fn queue(&self, reply: Result<ChatReply, CoreError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    fn name(&self) -> &str {
        "MockTransport"
    }

    async fn send_query(&self, query: &str) -> Result<ChatReply, CoreError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CoreError::Network("no reply queued".into())))
    }

    async fn fetch_export(&self) -> Result<serde_json::Value, CoreError> {
        self.export.clone().ok_or_else(|| CoreError::Api {
            endpoint: "data/all".into(),
            message: "HTTP 503 Service Unavailable".into(),
        })
    }
}

fn net_worth_reply() -> ChatReply {
    ChatReply::from_value(json!({
        "response": "Your net worth grew **4.2%** this year.",
        "has_visualization": true,
        "chart_type": "net_worth_trend",
        "chart_data": {
            "chart": "{\"data\":[{\"x\":[1,2],\"y\":[3,4]}],\"layout\":{}}",
            "metrics": {
                "current_net_worth": 1234567.5,
                "trend": "positive",
                "change_value": 50000.0,
                "change_percent": 4.2
            }
        }
    }))
    .unwrap()
}

fn debt_reply() -> ChatReply {
    ChatReply::from_value(json!({
        "response": "Here is your debt.",
        "has_visualization": true,
        "chart_type": "debt_analysis",
        "chart_data": {
            "pie_chart": "{\"data\":[],\"layout\":{}}",
            "metrics": {
                "total_debt": 500000.0,
                "monthly_debt_payment": 25000.0,
                "debt_to_income_ratio": 20.0,
                "months_to_debt_freedom": 19.3
            }
        }
    }))
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Round-trip — happy path
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_send_text_only_reply() {
    let mut chat = FinanceChat::create_new();
    let transport = MockTransport::replying(Ok(ChatReply::text("Hello!\n- one\n- two")));

    let outcome = chat.send(&transport, "  hi  ").await;
    let id = match outcome {
        SendOutcome::Completed(id) => id,
        other => panic!("Expected Completed, got {:?}", other),
    };

    assert_eq!(transport.queries(), vec!["hi"]);
    let messages = chat.log().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].html, "hi");
    assert_eq!(messages[1].sender, Sender::Assistant);
    assert_eq!(messages[1].html, "Hello!<br><ul><li>one</li><br><li>two</li></ul>");
    assert!(!chat.log().has_pending());

    let turn = chat.get_turn(id).unwrap();
    assert_eq!(turn.query(), "hi");
    assert!(!turn.has_visualization());
    assert!(chat.visualization().is_none());
}

#[tokio::test]
async fn test_send_with_visualization() {
    let mut chat = FinanceChat::create_new();
    let transport = MockTransport::replying(Ok(net_worth_reply()));

    let outcome = chat.send(&transport, "How is my net worth?").await;
    assert!(matches!(outcome, SendOutcome::Completed(_)));

    let last = chat.log().last().unwrap();
    assert_eq!(
        last.html,
        "Your net worth grew <strong>4.2%</strong> this year."
    );

    let viz = chat.visualization().unwrap();
    assert_eq!(viz.kind, ChartKind::NetWorthTrend);
    assert_eq!(
        viz.metrics().unwrap().value("Current Net Worth"),
        Some("₹12,34,567.50")
    );

    let calls = chat.take_plot_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].script,
        "Plotly.newPlot(\"net-worth-viz\", [{\"x\":[1,2],\"y\":[3,4]}], {});"
    );
}

#[tokio::test]
async fn test_second_visualization_replaces_first() {
    let mut chat = FinanceChat::create_new();
    let transport = MockTransport::new();
    transport.queue(Ok(net_worth_reply()));
    transport.queue(Ok(debt_reply()));

    chat.send(&transport, "net worth").await;
    chat.send(&transport, "debt").await;

    assert_eq!(chat.turns().len(), 2);
    assert_eq!(chat.visualization().unwrap().kind, ChartKind::DebtAnalysis);
    let html = chat.visualization_html();
    assert!(html.contains("debt-viz"));
    assert!(!html.contains("net-worth-viz"));
    assert!(html.contains("<p><strong>Est. Months to Debt Freedom:</strong> 20</p>"));
}

#[tokio::test]
async fn test_plot_calls_only_cover_current_visualization() {
    let mut chat = FinanceChat::create_new();
    let transport = MockTransport::new();
    transport.queue(Ok(net_worth_reply()));
    transport.queue(Ok(debt_reply()));

    chat.send(&transport, "net worth").await;
    chat.send(&transport, "debt").await;

    let targets: Vec<String> = chat.take_plot_calls().into_iter().map(|c| c.target).collect();
    assert_eq!(targets, vec!["debt-viz"]);
    assert!(chat.take_plot_calls().is_empty());
}

#[tokio::test]
async fn test_text_reply_keeps_previous_visualization() {
    let mut chat = FinanceChat::create_new();
    let transport = MockTransport::new();
    transport.queue(Ok(debt_reply()));
    transport.queue(Ok(ChatReply::text("Anything else?")));

    chat.send(&transport, "debt").await;
    chat.send(&transport, "thanks").await;

    assert_eq!(chat.visualization().unwrap().kind, ChartKind::DebtAnalysis);
}

#[tokio::test]
async fn test_unknown_chart_kind_shows_notice() {
    let mut chat = FinanceChat::create_new();
    let reply = ChatReply::from_value(json!({
        "response": "Tax summary",
        "has_visualization": true,
        "chart_type": "tax_summary",
        "chart_data": {"anything": 1}
    }))
    .unwrap();
    let transport = MockTransport::replying(Ok(reply));

    chat.send(&transport, "taxes").await;

    assert_eq!(
        chat.visualization_html(),
        "<p>No visualization available for this query.</p>"
    );
    assert!(chat
        .visualization_service()
        .engine()
        .calls()
        .is_empty());
}

// ═══════════════════════════════════════════════════════════════════
// Round-trip — failures and blanks
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_blank_query_is_skipped() {
    let mut chat = FinanceChat::create_new();
    let transport = MockTransport::replying(Ok(ChatReply::text("unused")));

    let outcome = chat.send(&transport, "   \n\t ").await;

    assert!(matches!(outcome, SendOutcome::Skipped));
    assert!(transport.queries().is_empty());
    assert!(chat.log().is_empty());
    assert!(chat.turns().is_empty());
}

#[tokio::test]
async fn test_transport_failure_shows_apology() {
    let mut chat = FinanceChat::create_new();
    let transport =
        MockTransport::replying(Err(CoreError::Network("connection refused".into())));

    let outcome = chat.send(&transport, "net worth?").await;

    match outcome {
        SendOutcome::Failed(CoreError::Network(msg)) => assert_eq!(msg, "connection refused"),
        other => panic!("Expected Failed(Network), got {:?}", other),
    }
    let messages = chat.log().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[1].html,
        "Sorry, I encountered an error processing your request. Please try again."
    );
    assert!(!chat.log().has_pending());
    assert!(chat.turns().is_empty());
}

#[tokio::test]
async fn test_failure_leaves_visualization_untouched() {
    let mut chat = FinanceChat::create_new();
    let transport = MockTransport::new();
    transport.queue(Ok(net_worth_reply()));
    transport.queue(Err(CoreError::Api {
        endpoint: "chat".into(),
        message: "backend error".into(),
    }));

    chat.send(&transport, "net worth").await;
    let before = chat.visualization_html();
    chat.send(&transport, "again").await;

    assert_eq!(chat.visualization_html(), before);
}

#[tokio::test]
async fn test_custom_error_message() {
    let settings = Settings {
        error_message: "Backend is down.".into(),
        ..Settings::default()
    };
    let mut chat = FinanceChat::new(settings, PlotlyScriptEngine::new()).unwrap();
    let transport = MockTransport::new();

    chat.send(&transport, "hello").await;

    assert_eq!(chat.log().last().unwrap().html, "Backend is down.");
}

// ═══════════════════════════════════════════════════════════════════
// Pending placeholder (split round-trip)
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_begin_turn_shows_query_and_placeholder() {
    let mut chat = FinanceChat::create_new();

    let pending = chat.begin_turn("  **Spending** last month ").unwrap();

    assert_eq!(pending.query(), "**Spending** last month");
    let messages = chat.log().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].html, "<strong>Spending</strong> last month");
    assert!(messages[1].pending);
    assert_eq!(
        messages[1].html,
        "<p>Thinking... <span class=\"loading-dots\"><span>.</span><span>.</span><span>.</span></span></p>"
    );

    chat.complete_turn(pending, Ok(ChatReply::text("done"))).unwrap();
    assert!(!chat.log().has_pending());
    assert_eq!(chat.log().len(), 2);
}

#[test]
fn test_begin_turn_blank_returns_none() {
    let mut chat = FinanceChat::create_new();
    assert!(chat.begin_turn("").is_none());
    assert!(chat.log().is_empty());
}

#[test]
fn test_complete_turn_error_is_returned() {
    let mut chat = FinanceChat::create_new();
    let pending = chat.begin_turn("debts").unwrap();

    let result = chat.complete_turn(pending, Err(CoreError::Network("timeout".into())));

    assert!(matches!(result, Err(CoreError::Network(_))));
    assert!(!chat.log().has_pending());
}

#[test]
fn test_complete_turn_records_turn_and_dispatches() {
    let mut chat = FinanceChat::create_new();
    let pending = chat.begin_turn("debts").unwrap();

    let id = chat.complete_turn(pending, Ok(debt_reply())).unwrap();

    let turn = chat.get_turn(id).unwrap();
    assert_eq!(turn.chart_kind(), Some(ChartKind::DebtAnalysis));
    assert!(matches!(turn.chart_payload(), Some(ChartPayload::DebtAnalysis(_))));
    assert_eq!(chat.visualization().unwrap().kind, ChartKind::DebtAnalysis);
}

// ═══════════════════════════════════════════════════════════════════
// Conversation reset
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_clear_conversation_keeps_visualization() {
    let mut chat = FinanceChat::create_new();
    let transport = MockTransport::replying(Ok(net_worth_reply()));
    chat.send(&transport, "net worth").await;

    chat.clear_conversation();

    assert!(chat.log().is_empty());
    assert_eq!(chat.log_html(), "");
    assert!(chat.turns().is_empty());
    assert_eq!(chat.visualization().unwrap().kind, ChartKind::NetWorthTrend);
}

#[tokio::test]
async fn test_log_html_wraps_messages() {
    let mut chat = FinanceChat::create_new();
    let transport = MockTransport::replying(Ok(ChatReply::text("*ok*")));
    chat.send(&transport, "hi").await;

    assert_eq!(
        chat.log_html(),
        "<div class=\"message user\"><div class=\"message-content\">hi</div></div>\
         <div class=\"message ai\"><div class=\"message-content\"><em>ok</em></div></div>"
    );
}

// ═══════════════════════════════════════════════════════════════════
// Export
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_export_packages_pretty_json() {
    let chat = FinanceChat::create_new();
    let transport = MockTransport::new().with_export(json!({"net_worth": {"total": 100}}));

    let file: ExportFile = chat.export(&transport).await.unwrap();

    assert_eq!(file.file_name, "fi_money_mcp_data.json");
    assert_eq!(
        file.contents,
        "{\n  \"net_worth\": {\n    \"total\": 100\n  }\n}"
    );
    assert_eq!(ExportFile::MIME_TYPE, "text/json;charset=utf-8");
}

#[tokio::test]
async fn test_export_null_data_rejected() {
    let chat = FinanceChat::create_new();
    let transport = MockTransport::new().with_export(serde_json::Value::Null);

    let result = chat.export(&transport).await;
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[tokio::test]
async fn test_export_transport_failure_propagates() {
    let chat = FinanceChat::create_new();
    let transport = MockTransport::new();

    match chat.export(&transport).await {
        Err(CoreError::Api { endpoint, .. }) => assert_eq!(endpoint, "data/all"),
        other => panic!("Expected Api error, got {:?}", other),
    }
}

// ═══════════════════════════════════════════════════════════════════
// HTTP transport configuration
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_http_transport_default_urls() {
    let transport = HttpChatTransport::default();
    assert_eq!(transport.name(), "HTTP");
    assert_eq!(transport.chat_url(), "http://localhost:5000/chat");
    assert_eq!(transport.export_url(), "http://localhost:5000/data/all");
}

#[test]
fn test_http_transport_trailing_slash() {
    let settings = Settings {
        base_url: "https://fi.example.com/api/".into(),
        ..Settings::default()
    };
    let transport = HttpChatTransport::new(&settings);
    assert_eq!(transport.chat_url(), "https://fi.example.com/api/chat");
    assert_eq!(transport.export_url(), "https://fi.example.com/api/data/all");
}

#[test]
fn test_new_rejects_invalid_settings() {
    let zero_timeout = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    assert!(matches!(
        FinanceChat::new(zero_timeout, PlotlyScriptEngine::new()),
        Err(CoreError::InvalidSettings(_))
    ));

    let empty_url = Settings {
        base_url: String::new(),
        ..Settings::default()
    };
    assert!(matches!(
        FinanceChat::new(empty_url, PlotlyScriptEngine::new()),
        Err(CoreError::InvalidSettings(_))
    ));
}

#[test]
fn test_new_accepts_valid_settings() {
    let settings = Settings {
        base_url: "https://fi.example.com".into(),
        ..Settings::default()
    };
    let chat = FinanceChat::new(settings.clone(), PlotlyScriptEngine::new()).unwrap();
    assert_eq!(chat.settings(), &settings);
}

#[test]
fn test_default_chat_settings() {
    let chat = FinanceChat::create_new();
    assert_eq!(chat.settings(), &Settings::default());
    assert!(chat.visualization().is_none());
    assert_eq!(chat.visualization_html(), "");
}
