use maid_priority::workflows::priorities::ReportKind;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_report_kind(raw: &str) -> Result<ReportKind, String> {
    ReportKind::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = ReportKind::ordered()
            .into_iter()
            .map(ReportKind::label)
            .collect();
        format!("unknown report kind '{raw}' (expected one of: {})", known.join(", "))
    })
}
