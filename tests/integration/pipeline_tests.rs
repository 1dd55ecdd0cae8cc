//! Integration tests for the generation pipeline
//!
//! These tests use wiremock to stand in for the Firecrawl and OpenAI APIs
//! and run the map, scrape, summarize and write stages end-to-end.

use llmstxt_gen::config::{Config, IndexFormat};
use llmstxt_gen::crawler::{map_site, Coordinator, Fetcher, FirecrawlClient};
use llmstxt_gen::llm::{Completion, CompletionRequest, OpenAiClient, SummarySource};
use llmstxt_gen::LlmsError;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing both APIs at the mock server
fn create_test_config(api_base: &str, output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = "https://x".to_string();
    config.firecrawl.api_key = Some("fc-test".to_string());
    config.firecrawl.api_base = api_base.to_string();
    config.firecrawl.retry_delay = 100;
    config.firecrawl.wait_for = 0;
    config.llm.api_key = Some("sk-test".to_string());
    config.llm.api_base = api_base.to_string();
    config.batch.batch_delay = 10;
    config.output.output_dir = output_dir.to_path_buf();
    config
}

fn scrape_ok(markdown: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": { "markdown": markdown, "metadata": {} }
    }))
}

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

/// Mounts the two-page site used by the end-to-end tests
async fn mount_two_page_site(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": ["https://x/", "https://x/blog/a"]
        })))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .and(body_partial_json(json!({ "url": "https://x/" })))
        .respond_with(scrape_ok("Hello World"))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .and(body_partial_json(json!({ "url": "https://x/blog/a" })))
        .respond_with(scrape_ok(""))
        .expect(1)
        .mount(mock_server)
        .await;

    // Only the non-empty page reaches the model
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(chat_reply(
            "Title: Hello Page\nDescription: A short greeting for visitors.",
        ))
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_generation() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    mount_two_page_site(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), temp.path());
    let stats = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(stats.urls_mapped, 2);
    assert_eq!(stats.pages_scraped, 2);
    assert_eq!(stats.pages_failed, 0);
    assert_eq!(stats.pages_empty, 1);
    assert_eq!(stats.pages_published, 1);
    assert_eq!(stats.summary_count(SummarySource::Generated), 1);
    assert_eq!(stats.summary_count(SummarySource::Placeholder), 1);

    // Blank pages are not publishable, so the index has a single item
    let compact = fs::read_to_string(temp.path().join("llms.txt")).unwrap();
    assert_eq!(
        compact,
        "# https://x llms.txt\n\n- [Hello Page](https://x/): A short greeting for visitors.\n"
    );

    // The blog URL was scraped first, so the home page is page 2
    let full = fs::read_to_string(temp.path().join("llms-full.txt")).unwrap();
    assert!(full.starts_with("# https://x llms-full.txt\n"));
    assert!(full.contains(
        "<|page-2-llmstxt|>\nURL: https://x/\nDescription: A short greeting for visitors.\n\nHello World\n"
    ));
    assert!(!full.contains("<|page-1-llmstxt|>"));
    assert!(!full.contains("https://x/blog/a"));
}

#[tokio::test]
async fn test_sections_format_without_full_text() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    mount_two_page_site(&mock_server).await;

    let mut config = create_test_config(&mock_server.uri(), temp.path());
    config.output.format = IndexFormat::Sections;
    config.output.full_text = false;

    let stats = Coordinator::new(config).unwrap().run().await.unwrap();

    assert!(!temp.path().join("llms-full.txt").exists());

    let compact = fs::read_to_string(temp.path().join("llms.txt")).unwrap();
    assert_eq!(stats.written, vec![(temp.path().join("llms.txt"), compact.len())]);
    assert!(compact.starts_with("# X - LLMs.txt\n# Generated: "));
    assert!(compact.contains("# Total Pages: 1\n"));
    assert!(compact.contains(
        "# Hello Page\nURL: https://x/\nDescription: A short greeting for visitors.\n"
    ));
}

#[tokio::test]
async fn test_plan_puts_focus_paths_first() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .and(body_partial_json(json!({ "url": "https://x", "limit": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [
                "https://x/",
                "https://x/pricing",
                "https://x/blog/a",
                "https://x/blog/b",
            ]
        })))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), temp.path());
    config.site.max_urls = 3;

    let urls = Coordinator::new(config).unwrap().plan().await.unwrap();

    assert_eq!(urls, vec!["https://x/blog/a", "https://x/blog/b", "https://x/"]);
}

#[tokio::test]
async fn test_empty_map_is_fatal() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "links": [] })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(scrape_ok("never requested"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), temp.path());
    let result = Coordinator::new(config).unwrap().run().await;

    assert!(matches!(result, Err(LlmsError::NoUrls { .. })));
    assert!(!temp.path().join("llms.txt").exists());
}

#[tokio::test]
async fn test_map_failure_uses_fallback_paths() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), temp.path());
    config.site.max_urls = 4;
    let client = FirecrawlClient::new(&config.firecrawl).unwrap();

    let urls = map_site(&client, &config.site).await;

    assert_eq!(
        urls,
        vec![
            "https://x/",
            "https://x/blog",
            "https://x/features",
            "https://x/pricing",
        ]
    );
}

#[tokio::test]
async fn test_map_accepts_response_shapes() {
    let temp = TempDir::new().unwrap();
    let bodies = [
        json!({ "success": true, "links": ["https://x/a", "https://x/b"] }),
        json!({ "data": { "urls": ["https://x/a", "https://x/b"] } }),
        json!({ "data": { "links": [{ "url": "https://x/a" }, { "url": "https://x/b" }] } }),
        json!(["https://x/a", { "url": "https://x/b" }]),
    ];

    for body in bodies {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/map"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri(), temp.path());
        let client = FirecrawlClient::new(&config.firecrawl).unwrap();

        let urls = client.map("https://x", 10, true).await.unwrap();
        assert_eq!(urls, vec!["https://x/a", "https://x/b"], "body: {}", body);
    }
}

#[tokio::test]
async fn test_rate_limited_scrape_retries_then_succeeds() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "markdown": "# Welcome\n\nHello there",
                "metadata": { "description": "Home page" }
            }
        })))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), temp.path());
    let fetcher = Fetcher::new(
        FirecrawlClient::new(&config.firecrawl).unwrap(),
        &config.firecrawl,
    );

    let start = Instant::now();
    let page = fetcher.fetch("https://x/").await;
    let elapsed = start.elapsed();

    assert!(page.success, "error: {:?}", page.error);
    assert_eq!(page.content, "# Welcome\n\nHello there");
    assert_eq!(page.metadata.title.as_deref(), Some("Welcome"));
    assert_eq!(page.metadata.description.as_deref(), Some("Home page"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);

    // Backoff grows: 100ms after the first 429, 200ms after the second
    assert!(elapsed >= Duration::from_millis(300), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_scrape_gives_up_after_max_attempts() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), temp.path());
    let fetcher = Fetcher::new(
        FirecrawlClient::new(&config.firecrawl).unwrap(),
        &config.firecrawl,
    );

    let page = fetcher.fetch("https://x/broken").await;

    assert!(!page.success);
    assert_eq!(page.url, "https://x/broken");
    assert!(page.content.is_empty());
    assert_eq!(page.error.as_deref(), Some("HTTP 500 after 3 attempts"));
}

#[tokio::test]
async fn test_no_wait_after_last_rate_limited_attempt() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), temp.path());
    let fetcher = Fetcher::new(
        FirecrawlClient::new(&config.firecrawl).unwrap(),
        &config.firecrawl,
    );

    let start = Instant::now();
    let page = fetcher.fetch("https://x/").await;
    let elapsed = start.elapsed();

    assert!(!page.success);
    assert_eq!(
        page.error.as_deref(),
        Some("rate limited (HTTP 429) after 3 attempts")
    );
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);

    // Waits of 100ms and 200ms; a third wait would push this past 600ms
    assert!(elapsed >= Duration::from_millis(300), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(550), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_no_wait_after_last_timed_out_attempt() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(scrape_ok("Slow page").set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), temp.path());
    config.firecrawl.request_timeout = 1;
    config.firecrawl.retry_delay = 800;
    let fetcher = Fetcher::new(
        FirecrawlClient::new(&config.firecrawl).unwrap(),
        &config.firecrawl,
    );

    let start = Instant::now();
    let page = fetcher.fetch("https://x/").await;
    let elapsed = start.elapsed();

    assert!(!page.success);
    assert_eq!(page.error.as_deref(), Some("request timed out after 3 attempts"));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);

    // Three 1s timeouts and two 800ms waits; a third wait would reach 5.4s
    assert!(elapsed >= Duration::from_millis(4600), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(5200), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_scrape_timeout_is_retried() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(scrape_ok("Slow page").set_delay(Duration::from_millis(2500)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(scrape_ok("Fast page"))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), temp.path());
    config.firecrawl.request_timeout = 1;
    let fetcher = Fetcher::new(
        FirecrawlClient::new(&config.firecrawl).unwrap(),
        &config.firecrawl,
    );

    let page = fetcher.fetch("https://x/").await;

    assert!(page.success, "error: {:?}", page.error);
    assert_eq!(page.content, "Fast page");
}

#[tokio::test]
async fn test_rejected_scrape_is_a_failure() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "blocked by site"
        })))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), temp.path());
    config.firecrawl.max_attempts = 1;
    let fetcher = Fetcher::new(
        FirecrawlClient::new(&config.firecrawl).unwrap(),
        &config.firecrawl,
    );

    let page = fetcher.fetch("https://x/").await;

    assert!(!page.success);
    assert_eq!(
        page.error.as_deref(),
        Some("scrape rejected: blocked by site after 1 attempts")
    );
}

#[tokio::test]
async fn test_openai_client_sends_chat_request() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 50,
            "messages": [
                { "role": "system", "content": "be brief" },
                { "role": "user", "content": "Summarize" }
            ]
        })))
        .respond_with(chat_reply("  Title: Docs\nDescription: Reference.  \n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), temp.path());
    let client = OpenAiClient::new(&config.llm).unwrap();
    let request = CompletionRequest {
        system: "be brief".to_string(),
        prompt: "Summarize".to_string(),
        max_tokens: 50,
        temperature: 0.3,
    };

    let text = client.complete(&request).await.unwrap();

    assert_eq!(text, "Title: Docs\nDescription: Reference.");
    assert_eq!(client.model_name(), "gpt-4o-mini");
}

#[tokio::test]
async fn test_openai_errors_surface() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), temp.path());
    let client = OpenAiClient::new(&config.llm).unwrap();
    let request = CompletionRequest {
        system: String::new(),
        prompt: "hi".to_string(),
        max_tokens: 50,
        temperature: 0.3,
    };

    assert!(matches!(
        client.complete(&request).await,
        Err(LlmsError::Api { status: 401, .. })
    ));
    assert!(matches!(
        client.complete(&request).await,
        Err(LlmsError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_model_failure_still_writes_files() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": ["https://x/features"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(scrape_ok("Everything the product can do"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), temp.path());
    let stats = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(stats.summary_count(SummarySource::Fallback), 1);
    let compact = fs::read_to_string(temp.path().join("llms.txt")).unwrap();
    assert!(compact.contains("- [Page](https://x/features): Content summary\n"));
}

#[tokio::test]
async fn test_unwritable_output_fails_the_run() {
    let mock_server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("public");
    fs::write(&blocker, "a file, not a directory").unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": ["https://x/"]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(scrape_ok(""))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), &blocker);
    let result = Coordinator::new(config).unwrap().run().await;

    assert!(matches!(result, Err(LlmsError::Output(_))));
}
