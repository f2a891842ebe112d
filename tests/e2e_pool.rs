mod support_single;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use fire::args::PositiveUsize;
use fire::http::{
    ClientSettings, HttpRequestExecutor, RequestSpec, build_client, dispatch_requests,
};
use fire::metrics::StatsSnapshot;
use fire::shutdown::shutdown_channel;

use support_single::{ServerBehavior, spawn_http_server_or_skip};

/// Scheduling slack allowed on top of the server's fixed delay.
const TIMING_TOLERANCE_MS: u64 = 1_000;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn spec(url: &str) -> RequestSpec {
    RequestSpec {
        method: "GET".to_owned(),
        url: url.to_owned(),
        headers: Vec::new(),
        body: String::new(),
    }
}

async fn fire_at(
    request: RequestSpec,
    concurrency: usize,
    requests: u64,
) -> Result<StatsSnapshot, String> {
    let client = build_client(ClientSettings::default()).map_err(|err| err.to_string())?;
    let executor = Arc::new(HttpRequestExecutor::new(client, request));
    let concurrency = PositiveUsize::try_from(concurrency).map_err(|err| err.to_string())?;
    let (shutdown_tx, _) = shutdown_channel();
    dispatch_requests(executor, concurrency, requests, &shutdown_tx)
        .await
        .map_err(|err| err.to_string())
}

#[test]
fn fixed_delay_server_reports_matching_latency() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(ServerBehavior {
        status: 200,
        delay: Duration::from_millis(10),
    })?
    else {
        return Ok(());
    };

    run_async_test(async move {
        let snapshot = fire_at(spec(&url), 4, 20).await?;
        if snapshot.total_successes != 20 || snapshot.total_failures != 0 {
            return Err(format!("Unexpected counts: {:?}", snapshot));
        }
        let shortest = snapshot.shortest_running_request_ms;
        let longest = snapshot.longest_running_request_ms;
        let average = snapshot.average_response_time_ms();
        if shortest < 10 || shortest > longest {
            return Err(format!("Unexpected extremes: {:?}", snapshot));
        }
        if longest > 10 + TIMING_TOLERANCE_MS {
            return Err(format!("Longest request too slow: {}ms", longest));
        }
        if average < shortest || average > longest {
            return Err(format!("Average {} outside [{}, {}]", average, shortest, longest));
        }
        Ok(())
    })
}

#[test]
fn server_errors_are_counted_as_failures() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(ServerBehavior {
        status: 500,
        delay: Duration::ZERO,
    })?
    else {
        return Ok(());
    };

    run_async_test(async move {
        let snapshot = fire_at(spec(&url), 2, 10).await?;
        if snapshot.total_failures != 10 || snapshot.total_successes != 0 {
            return Err(format!("Unexpected counts: {:?}", snapshot));
        }
        if snapshot.average_response_time_ms() != 0 || snapshot.longest_running_request_ms != 0 {
            return Err(format!("Failures leaked into extremes: {:?}", snapshot));
        }
        Ok(())
    })
}

#[test]
fn worker_count_does_not_change_counts() -> Result<(), String> {
    let Some((url, server)) = spawn_http_server_or_skip(ServerBehavior::default())? else {
        return Ok(());
    };

    run_async_test(async move {
        let serial = fire_at(spec(&url), 1, 30).await?;
        let parallel = fire_at(spec(&url), 50, 30).await?;
        if (serial.total_successes, serial.total_failures)
            != (parallel.total_successes, parallel.total_failures)
        {
            return Err(format!("Counts differ: {:?} vs {:?}", serial, parallel));
        }
        if serial.total_successes != 30 {
            return Err(format!("Unexpected counts: {:?}", serial));
        }
        if server.request_heads().len() != 60 {
            return Err(format!(
                "Server saw {} requests",
                server.request_heads().len()
            ));
        }
        Ok(())
    })
}

#[test]
fn headers_and_body_reach_the_server() -> Result<(), String> {
    let Some((url, server)) = spawn_http_server_or_skip(ServerBehavior::default())? else {
        return Ok(());
    };

    run_async_test(async move {
        let request = RequestSpec {
            method: "POST".to_owned(),
            url: url.clone(),
            headers: vec![
                "Content-Type:application/json".to_owned(),
                "NoColonHere".to_owned(),
            ],
            body: "{\"fire\":true}".to_owned(),
        };
        let snapshot = fire_at(request, 2, 3).await?;
        if snapshot.total_successes != 3 {
            return Err(format!("Unexpected counts: {:?}", snapshot));
        }

        let heads = server.request_heads();
        if heads.len() != 3 {
            return Err(format!("Server saw {} requests", heads.len()));
        }
        for head in &heads {
            if !head.starts_with("POST ") {
                return Err(format!("Unexpected request line: {}", head));
            }
            let has_content_type = head.lines().any(|line| {
                line.split_once(':').is_some_and(|(name, value)| {
                    name.eq_ignore_ascii_case("content-type") && value.trim() == "application/json"
                })
            });
            if !has_content_type {
                return Err(format!("Missing Content-Type header: {}", head));
            }
            if head.to_ascii_lowercase().contains("nocolonhere") {
                return Err(format!("Malformed header was sent: {}", head));
            }
        }
        Ok(())
    })
}

#[test]
fn zero_requests_never_touch_the_server() -> Result<(), String> {
    let Some((url, server)) = spawn_http_server_or_skip(ServerBehavior::default())? else {
        return Ok(());
    };

    run_async_test(async move {
        let snapshot = fire_at(spec(&url), 3, 0).await?;
        if snapshot != StatsSnapshot::default() {
            return Err(format!("Expected zero stats, got {:?}", snapshot));
        }
        if !server.request_heads().is_empty() {
            return Err("Server received requests for n=0".to_owned());
        }
        Ok(())
    })
}
