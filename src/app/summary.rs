use crate::metrics::StatsSnapshot;

/// Fixed plain-text report printed once every request has completed.
pub(crate) fn summary_lines(snapshot: &StatsSnapshot) -> Vec<String> {
    vec![
        "statistics".to_owned(),
        format!(
            " AVERAGE RESPONSE TIME: {}ms",
            snapshot.average_response_time_ms()
        ),
        format!(" TOTAL SUCCESSFUL REQS: {}", snapshot.total_successes),
        format!(" TOTAL FAILED REQS: {}", snapshot.total_failures),
        format!(
            " LONGEST RUNNING REQUEST: {}ms",
            snapshot.longest_running_request_ms
        ),
        format!(
            " SHORTEST RUNNING REQUEST: {}ms",
            snapshot.shortest_running_request_ms
        ),
    ]
}

pub(crate) fn print_summary(snapshot: &StatsSnapshot) {
    for line in summary_lines(snapshot) {
        println!("{}", line);
    }
}
