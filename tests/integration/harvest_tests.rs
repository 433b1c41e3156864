use crate::common::{article_page, create_test_config, html, listing_page, mount_page};
use chrono::{TimeZone, Utc};
use page_harvest::harvester::{fetch_document, resolve_enclosure, Harvester};
use page_harvest::HarvestError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_full_harvest_two_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/browse",
        listing_page(&["/news/a", "/news/b"], Some("/browse/2")),
        1,
    )
    .await;
    mount_page(&mock_server, "/browse/2", listing_page(&["/news/c"], None), 1).await;
    mount_page(&mock_server, "/news/a", article_page("Alpha", Some("/media/a.jpg")), 1).await;
    mount_page(&mock_server, "/news/b", article_page("Beta", None), 1).await;
    mount_page(&mock_server, "/news/c", article_page("Gamma", None), 1).await;

    let harvester = Harvester::new(create_test_config(&base_url)).unwrap();
    let report = harvester.run().await;

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.articles_failed, 0);
    assert_eq!(report.links.len(), 3);

    let titles: Vec<_> = report
        .items
        .iter()
        .map(|item| item.title.clone().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);

    let first = &report.items[0];
    assert_eq!(first.id, format!("{}/news/a", base_url));
    assert_eq!(first.link, first.id);
    assert_eq!(first.author.as_deref(), Some("Institute of Testing"));
    assert_eq!(
        first.created,
        Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap())
    );
    assert_eq!(first.content.as_deref(), Some("<p>Body of Alpha</p>"));

    let enclosure = first.enclosure.as_ref().unwrap();
    assert_eq!(enclosure.url, format!("{}/media/a.jpg", base_url));
    assert_eq!(enclosure.mime_type, "image/jpeg");
    assert_eq!(enclosure.length, "-1");
}

#[tokio::test]
async fn test_failed_article_is_skipped_and_order_kept() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/browse",
        listing_page(&["/news/1", "/news/2", "/news/3", "/news/4", "/news/5"], None),
        1,
    )
    .await;
    for n in [1, 2, 4, 5] {
        mount_page(
            &mock_server,
            &format!("/news/{}", n),
            article_page(&format!("Story {}", n), None),
            1,
        )
        .await;
    }
    Mock::given(method("GET"))
        .and(path("/news/3"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.http.concurrency = 4;

    let harvester = Harvester::new(config).unwrap();
    let report = harvester.run().await;

    assert_eq!(report.links.len(), 5);
    assert_eq!(report.articles_failed, 1);

    let ids: Vec<_> = report.items.iter().map(|item| item.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            format!("{}/news/1", base_url),
            format!("{}/news/2", base_url),
            format!("{}/news/4", base_url),
            format!("{}/news/5", base_url),
        ]
    );
}

#[tokio::test]
async fn test_missing_title_leaves_other_fields() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let page = article_page("Unused", Some("/media/fig.png")).replace("page_title", "headline");
    mount_page(&mock_server, "/news/x", page, 1).await;

    let harvester = Harvester::new(create_test_config(&base_url)).unwrap();
    let item = harvester
        .harvest_article(&format!("{}/news/x", base_url))
        .await
        .unwrap();

    assert!(item.title.is_none());
    assert_eq!(item.author.as_deref(), Some("Institute of Testing"));
    assert!(item.created.is_some());
    assert_eq!(item.enclosure.unwrap().mime_type, "image/png");
    assert!(item.content.is_some());
}

#[tokio::test]
async fn test_extensionless_image_probed_with_head() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/news/x", article_page("Study Finds X", Some("/media/pic")), 1).await;
    Mock::given(method("HEAD"))
        .and(path("/media/pic"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/jpeg"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(create_test_config(&base_url)).unwrap();
    let item = harvester
        .harvest_article(&format!("{}/news/x", base_url))
        .await
        .unwrap();

    assert_eq!(item.title.as_deref(), Some("Study Finds X"));
    let enclosure = item.enclosure.unwrap();
    assert_eq!(enclosure.url, format!("{}/media/pic", base_url));
    assert_eq!(enclosure.mime_type, "image/jpeg");
    assert_eq!(enclosure.length, "-1");
}

#[tokio::test]
async fn test_known_extension_skips_head_probe() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/gif"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let enclosure = resolve_enclosure(&client, &format!("{}/media/photo.webp", base_url)).await;

    assert_eq!(enclosure.mime_type, "image/webp");
}

#[tokio::test]
async fn test_failed_head_probe_leaves_type_empty() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/news/x", article_page("Story", Some("/media/gone")), 1).await;
    Mock::given(method("HEAD"))
        .and(path("/media/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(create_test_config(&base_url)).unwrap();
    let item = harvester
        .harvest_article(&format!("{}/news/x", base_url))
        .await
        .unwrap();

    let enclosure = item.enclosure.unwrap();
    assert_eq!(enclosure.mime_type, "");
    assert_eq!(enclosure.length, "-1");
    assert_eq!(item.title.as_deref(), Some("Story"));
}

#[tokio::test]
async fn test_unreachable_head_probe_leaves_type_empty() {
    let client = reqwest::Client::new();
    let enclosure = resolve_enclosure(&client, "http://127.0.0.1:9/media/pic").await;

    assert_eq!(enclosure.url, "http://127.0.0.1:9/media/pic");
    assert_eq!(enclosure.mime_type, "");
    assert_eq!(enclosure.length, "-1");
}

#[tokio::test]
async fn test_malformed_date_is_omitted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let page = article_page("Dated", None).replace("05-Jan-2024", "2024/01/05");
    mount_page(&mock_server, "/news/x", page, 1).await;
    let page = article_page("Short Year", None).replace("05-Jan-2024", "05-Jan-24");
    mount_page(&mock_server, "/news/y", page, 1).await;

    let harvester = Harvester::new(create_test_config(&base_url)).unwrap();
    let item = harvester
        .harvest_article(&format!("{}/news/x", base_url))
        .await
        .unwrap();

    assert!(item.created.is_none());
    assert_eq!(item.title.as_deref(), Some("Dated"));

    let item = harvester
        .harvest_article(&format!("{}/news/y", base_url))
        .await
        .unwrap();

    assert!(item.created.is_none());
    assert_eq!(item.title.as_deref(), Some("Short Year"));
}

#[tokio::test]
async fn test_fetch_document_errors() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();

    let missing = url::Url::parse(&format!("{}/missing", base_url)).unwrap();
    match fetch_document(&client, &missing).await {
        Err(HarvestError::HttpStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected HttpStatus, got {:?}", other),
    }

    let empty = url::Url::parse(&format!("{}/empty", base_url)).unwrap();
    match fetch_document(&client, &empty).await {
        Err(HarvestError::HttpStatus { status, .. }) => assert_eq!(status, 204),
        other => panic!("expected HttpStatus, got {:?}", other),
    }

    let refused = url::Url::parse("http://127.0.0.1:9/page").unwrap();
    assert!(matches!(
        fetch_document(&client, &refused).await,
        Err(HarvestError::Transport { .. })
    ));
}

#[tokio::test]
async fn test_fetch_document_ignores_content_type() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let body = listing_page(&["/news/a"], None);
    Mock::given(method("GET"))
        .and(path("/binary"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.clone().into_bytes(), "application/octet-stream"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "image/png"))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let selector = scraper::Selector::parse("article.post > a").unwrap();

    for route in ["/binary", "/image"] {
        let url = url::Url::parse(&format!("{}{}", base_url, route)).unwrap();
        let doc = fetch_document(&client, &url).await.unwrap();
        assert_eq!(doc.select(&selector).count(), 1);
    }
}

#[tokio::test]
async fn test_document_keeps_request_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/news/rel"))
        .respond_with(html(r#"<a class="x" href="../other">o</a>"#.to_string()))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let url = url::Url::parse(&format!("{}/news/rel", base_url)).unwrap();
    let doc = fetch_document(&client, &url).await.unwrap();

    assert_eq!(doc.url(), &url);
    assert_eq!(
        doc.resolve("../other").unwrap().as_str(),
        format!("{}/other", base_url)
    );
}

#[tokio::test]
async fn test_rss_output_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/browse", listing_page(&["/news/a", "/news/b"], None), 1).await;
    mount_page(&mock_server, "/news/a", article_page("Alpha", Some("/media/pic")), 1).await;
    mount_page(&mock_server, "/news/b", article_page("Beta", Some("/media/nothing")), 1).await;
    Mock::given(method("HEAD"))
        .and(path("/media/pic"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/jpeg"))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/media/nothing"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let harvester = Harvester::new(create_test_config(&base_url)).unwrap();
    let rss = harvester.run_to_rss().await.unwrap();

    assert!(rss.contains("<title>Test Feed</title>"));
    assert!(rss.contains(&format!("<link>{}/browse</link>", base_url)));
    assert!(rss.contains("<title>Alpha</title>"));
    assert!(rss.contains("<pubDate>Fri, 05 Jan 2024 00:00:00 +0000</pubDate>"));
    assert!(rss.contains(&format!(
        "<enclosure url=\"{}/media/pic\" length=\"-1\" type=\"image/jpeg\"/>",
        base_url
    )));
    assert!(!rss.contains("/media/nothing"));
    assert!(rss.contains("<![CDATA[<p>Body of Alpha</p>]]>"));
    assert!(rss.find("Alpha").unwrap() < rss.find("Beta").unwrap());
}
