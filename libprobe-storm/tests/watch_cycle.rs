//! End-to-end cycle tests: probe a set of mock endpoints, fold results
//! into the ledger and check the rendered report.

use libprobe_storm::{report, Endpoint, ProbeConfig, Watcher};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(name: &str, url: &str) -> Endpoint {
    Endpoint {
        name: name.to_string(),
        url: url.to_string(),
        method: "GET".to_string(),
        headers: Default::default(),
        body: String::new(),
    }
}

fn host_of(uri: &str) -> String {
    libprobe_storm::extract_domain(uri).unwrap()
}

#[tokio::test]
async fn report_is_sorted_regardless_of_completion_order() {
    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&healthy)
        .await;

    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(150)))
        .mount(&slow)
        .await;

    // The unreachable endpoint fails fast, the slow one finishes last;
    // neither order shows in the report.
    let mut watcher = Watcher::new(vec![
        endpoint("slow", &slow.uri()),
        endpoint("dead", "http://127.0.0.1:1/"),
        endpoint("healthy", &healthy.uri()),
    ])
    .unwrap();

    watcher.run_cycle().await;

    let snapshot = watcher.ledger().snapshot();
    let domains: Vec<&str> = snapshot.iter().map(|(d, _)| d.as_str()).collect();
    let mut sorted = domains.clone();
    sorted.sort_unstable();
    assert_eq!(domains, sorted);

    let lines = report::render(&snapshot);
    assert_eq!(lines.len(), snapshot.len());
    for (line, (domain, pct)) in lines.iter().zip(&snapshot) {
        assert_eq!(line, &format!("{domain} has {pct}% availability percentage"));
    }
}

#[tokio::test]
async fn lifetime_percentages_survive_a_flapping_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let host = host_of(&server.uri());
    let mut watcher = Watcher::new(vec![endpoint("flappy", &server.uri())]).unwrap();

    watcher.run_cycle().await;
    assert_eq!(
        report::render(&watcher.ledger().snapshot()),
        vec![format!("{host} has 100% availability percentage")]
    );

    watcher.run_cycle().await;
    assert_eq!(
        report::render(&watcher.ledger().snapshot()),
        vec![format!("{host} has 50% availability percentage")]
    );

    // DOWN keeps being recorded with no suppression.
    watcher.run_cycle().await;
    watcher.run_cycle().await;
    assert_eq!(
        report::render(&watcher.ledger().snapshot()),
        vec![format!("{host} has 25% availability percentage")]
    );
}

#[tokio::test]
async fn many_endpoints_per_domain_and_many_domains() {
    let a = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&a)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&a)
        .await;

    let host = host_of(&a.uri());
    let config = ProbeConfig {
        max_concurrent: 2,
        ..ProbeConfig::default()
    };
    let mut watcher = Watcher::with_config(
        vec![
            endpoint("a-ok", &format!("{}/ok", a.uri())),
            endpoint("a-broken", &format!("{}/broken", a.uri())),
            endpoint("dead", "http://127.0.0.1:1/"),
        ],
        config,
    )
    .unwrap();

    watcher.run_cycle().await;

    // Two domains: the mock server's host and the unreachable one.
    let snapshot = watcher.ledger().snapshot();
    assert_eq!(snapshot.len(), 2);

    let stats = watcher.ledger().get(&host).unwrap();
    assert_eq!(stats.total_requests, 2);
    assert_eq!(stats.up_requests, 1);
    assert_eq!(stats.percentage(), 50);

    let dead = watcher.ledger().get("127.0.0.1:1").unwrap();
    assert_eq!(dead.total_requests, 1);
    assert_eq!(dead.up_requests, 0);
}
