use std::sync::Arc;

use serde_json::json;
use subgrab::app::AppContext;
use subgrab::cli::commands;
use subgrab::config::Config;
use subgrab::fetcher::http_fetcher::HttpFetcher;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing(server: &MockServer, posts: &[(&str, &str, bool, &str)]) -> serde_json::Value {
    let children: Vec<_> = posts
        .iter()
        .map(|(title, subreddit, over_18, file)| {
            json!({
                "kind": "t3",
                "data": {
                    "title": title,
                    "subreddit": subreddit,
                    "over_18": over_18,
                    "url": format!("{}/img/{}", server.uri(), file),
                }
            })
        })
        .collect();

    json!({ "kind": "Listing", "data": { "children": children } })
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_two_sources_end_with_one_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let feed_a = listing(
        &server,
        &[
            ("Lake", "a", false, "lake.png"),
            ("Not for work", "a", true, "nsfw.png"),
        ],
    );
    let feed_b = listing(&server, &[("Same lake", "b", false, "lake-copy.jpeg")]);

    mount(&server, "/r/a.json", ResponseTemplate::new(200).set_body_json(feed_a), 1).await;
    mount(&server, "/r/b.json", ResponseTemplate::new(200).set_body_json(feed_b), 1).await;
    mount(&server, "/img/lake.png", ResponseTemplate::new(200).set_body_bytes(b"lake".to_vec()), 1).await;
    mount(&server, "/img/lake-copy.jpeg", ResponseTemplate::new(200).set_body_bytes(b"lake".to_vec()), 1).await;
    mount(&server, "/img/nsfw.png", ResponseTemplate::new(200).set_body_bytes(b"nsfw".to_vec()), 0).await;

    let config = Config {
        sources: vec!["a".into(), "b".into()],
        folder: dir.path().to_path_buf(),
        allow_mature: false,
        feed_base_url: server.uri(),
        ..Default::default()
    };
    let fetcher = Arc::new(HttpFetcher::with_options(config.timeout(), &config.user_agent).unwrap());
    let ctx = AppContext::with_fetcher(config, fetcher);

    let summary = commands::grab(&ctx).await.unwrap();

    assert_eq!(summary.pipeline.sources_listed, 2);
    assert_eq!(summary.pipeline.images_downloaded, 2);
    assert_eq!(summary.pipeline.units_issued, 4);
    assert_eq!(summary.pipeline.units_completed, 4);

    let remaining: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0] == "lake.png" || remaining[0] == "lake-copy.jpeg");
    assert!(!dir.path().join("nsfw.png").exists());
}

#[tokio::test]
async fn test_failed_sources_do_not_fail_the_run() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let feed = listing(&server, &[("Ok", "good", false, "ok.jpg"), ("Gone", "good", false, "gone.jpg")]);
    mount(&server, "/r/good.json", ResponseTemplate::new(200).set_body_json(feed), 1).await;
    mount(&server, "/r/down.json", ResponseTemplate::new(503), 1).await;
    mount(&server, "/r/garbled.json", ResponseTemplate::new(200).set_body_string("<html>"), 1).await;
    mount(&server, "/img/ok.jpg", ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()), 1).await;
    mount(&server, "/img/gone.jpg", ResponseTemplate::new(404), 1).await;

    let config = Config {
        sources: vec!["good".into(), "down".into(), "garbled".into()],
        folder: dir.path().to_path_buf(),
        feed_base_url: server.uri(),
        ..Default::default()
    };
    let ctx = AppContext::with_fetcher(config, Arc::new(HttpFetcher::new().unwrap()));

    let summary = commands::grab(&ctx).await.unwrap();

    assert_eq!(summary.pipeline.sources_listed, 1);
    assert_eq!(summary.pipeline.sources_failed, 2);
    assert_eq!(summary.pipeline.images_downloaded, 1);
    assert_eq!(summary.pipeline.images_failed, 1);
    assert!(dir.path().join("ok.jpg").exists());
    assert!(!dir.path().join("gone.jpg").exists());
    assert_eq!(summary.dedup.unwrap().files_scanned, 1);
}
