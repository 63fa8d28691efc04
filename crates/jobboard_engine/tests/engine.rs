use std::sync::{mpsc, Arc};
use std::time::Duration;

use async_trait::async_trait;
use jobboard_engine::{
    ChannelEventSink, EngineEvent, EngineHandle, FailureKind, JobRecord, JobSearchService,
    SearchError, SearchPage, SearchRequest, SearchSettings,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

struct EchoSearch;

#[async_trait]
impl JobSearchService for EchoSearch {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, SearchError> {
        let keyword = request.keyword.clone().unwrap_or_default();
        Ok(SearchPage {
            items: vec![JobRecord {
                id: keyword,
                status: Some("APPROVED".to_string()),
                applicant_count: Some(request.page),
                title: None,
                company_name: None,
                location: None,
                job_type: None,
                work_mode: None,
                salary_min: None,
                salary_max: None,
                working_days: None,
                working_hours: None,
            }],
            total_pages: 1,
            total_elements: 1,
        })
    }
}

fn sink() -> (Arc<ChannelEventSink>, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    (Arc::new(ChannelEventSink::new(tx)), rx)
}

#[test]
fn search_results_carry_request_id() {
    let (sink, events) = sink();
    let engine = EngineHandle::with_service(Arc::new(EchoSearch), sink);

    engine.search(
        9,
        SearchRequest {
            keyword: Some("J9".to_string()),
            page: 4,
            size: 10,
            ..SearchRequest::default()
        },
    );

    match events.recv_timeout(WAIT).expect("search event") {
        EngineEvent::SearchCompleted { request_id, result } => {
            assert_eq!(request_id, 9);
            let page = result.expect("search ok");
            assert_eq!(page.items[0].id, "J9");
            assert_eq!(page.items[0].applicant_count, Some(4));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn timer_fires_until_stopped() {
    let (sink, events) = sink();
    let engine = EngineHandle::with_service(Arc::new(EchoSearch), sink);

    engine.start_timer(Duration::from_millis(20));
    assert_eq!(events.recv_timeout(WAIT), Ok(EngineEvent::TimerFired));

    engine.stop_timer();
    std::thread::sleep(Duration::from_millis(100));
    while events.try_recv().is_ok() {}
    assert!(events.recv_timeout(Duration::from_millis(200)).is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn http_failures_are_reported_as_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (sink, events) = sink();
    let engine = EngineHandle::new(
        SearchSettings {
            base_url: server.uri(),
            ..SearchSettings::default()
        },
        sink,
    )
    .expect("engine");
    engine.search(1, SearchRequest::default());

    let event = tokio::task::spawn_blocking(move || events.recv_timeout(WAIT))
        .await
        .unwrap()
        .expect("search event");
    match event {
        EngineEvent::SearchCompleted { request_id, result } => {
            assert_eq!(request_id, 1);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }
    drop(engine);
}
