use errors::NoteError;
use metrics::counter;

/// Per-operation outcome counters.
pub struct Telemetry;

impl Telemetry {
    pub fn record<T>(operation: &'static str, result: &Result<T, NoteError>) {
        let outcome = match result {
            Ok(_) => "ok",
            Err(err) => err.code().as_str()
        };
        counter!("notes_requests_total", "operation" => operation, "outcome" => outcome)
            .increment(1);
    }

    pub fn record_failed_request(status: u16) {
        counter!("notes_http_failures_total", "status" => status.to_string()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_outcomes_are_labelled() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            Telemetry::record("create", &Ok::<(), NoteError>(()));
            Telemetry::record("create", &Err::<(), _>(NoteError::conflict("a")));
            Telemetry::record_failed_request(409);
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"notes_requests_total{operation="create",outcome="ok"} 1"#));
        assert!(
            rendered.contains(r#"notes_requests_total{operation="create",outcome="CONFLICT"} 1"#)
        );
        assert!(rendered.contains(r#"notes_http_failures_total{status="409"} 1"#));
    }
}
