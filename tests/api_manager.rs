//! Requests against a local mock server through a real `reqwest::Client`.

use mockito::Matcher;
use serde::Deserialize;
use serde_json::{json, Value};

use news_api::config::Config;
use news_api::error::ApiError;
use news_api::news::{ArticlesResponse, TopHeadlines};
use news_api::placeholder::{CreatePost, Post};
use news_api::requests::{ApiClient, ApiManager, ApiRequest, Body, Method, Params};

#[derive(Debug, Deserialize, PartialEq)]
struct Todo {
    id: u32,
    title: String,
    completed: bool,
}

fn manager_for(server: &mockito::Server) -> ApiManager {
    ApiManager::with_config(Config::single_origin(format!("{}/", server.url())))
}

#[tokio::test]
async fn get_decodes_successful_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/todos/1")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 1, "title": "write tests", "completed": false}"#)
        .create_async()
        .await;

    let todo: Todo = manager_for(&server)
        .call_api("todos/1", Method::Get, None, None)
        .await
        .expect("request should succeed");

    assert_eq!(
        todo,
        Todo {
            id: 1,
            title: "write tests".to_string(),
            completed: false,
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn get_sends_params_as_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/everything")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "rust lang".into()),
            Matcher::UrlEncoded("pageSize".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"status": "ok", "totalResults": 0, "articles": []}"#)
        .create_async()
        .await;

    let mut params = Params::new();
    params.insert("q".to_string(), json!("rust lang"));
    params.insert("pageSize".to_string(), json!(10));

    let response: ArticlesResponse = manager_for(&server)
        .call_api("everything", Method::Get, Some(&params), None)
        .await
        .expect("request should succeed");

    assert_eq!(response.status, "ok");
    assert!(response.articles.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn post_sends_json_body_with_content_type() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/posts")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "title": "foo",
            "body": "bar",
            "userId": 1
        })))
        .with_status(201)
        .with_body(r#"{"userId": 1, "id": 101, "title": "foo", "body": "bar"}"#)
        .create_async()
        .await;

    let mut body = Body::new();
    body.insert("title".to_string(), json!("foo"));
    body.insert("body".to_string(), json!("bar"));
    body.insert("userId".to_string(), json!(1));

    let post: Post = manager_for(&server)
        .call_api("posts", Method::Post, None, Some(&body))
        .await
        .expect("request should succeed");

    assert_eq!(post.id, 101);
    mock.assert_async().await;
}

#[tokio::test]
async fn not_found_is_invalid_response_regardless_of_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/todos/999")
        .with_status(404)
        .with_body(r#"{"id": 999, "title": "looks valid", "completed": true}"#)
        .create_async()
        .await;

    let result: Result<Todo, _> = manager_for(&server)
        .call_api("todos/999", Method::Get, None, None)
        .await;

    assert!(matches!(
        result,
        Err(ApiError::InvalidResponse { status: Some(404) })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_on_post_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/posts")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let result: Result<Value, _> = manager_for(&server)
        .call_api("posts", Method::Post, None, Some(&Body::new()))
        .await;

    assert!(matches!(
        result,
        Err(ApiError::InvalidResponse { status: Some(500) })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_field_is_decoding_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/todos/1")
        .with_status(200)
        .with_body(r#"{"id": 1, "title": "no completed flag"}"#)
        .create_async()
        .await;

    let result: Result<Todo, _> = manager_for(&server)
        .call_api("todos/1", Method::Get, None, None)
        .await;

    match result {
        Err(ApiError::Decoding(err)) => assert!(err.to_string().contains("completed")),
        other => panic!("expected ApiError::Decoding, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn unsupported_method_never_reaches_the_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result: Result<Value, _> = manager_for(&server)
        .call_api("posts/1", Method::Put, None, None)
        .await;

    assert!(matches!(
        result,
        Err(ApiError::UnsupportedMethod(Method::Put))
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn connection_failure_is_transport_error() {
    // Nothing listens on the discard port.
    let manager = ApiManager::with_config(Config::single_origin("http://127.0.0.1:9/"));
    let result: Result<Value, _> = manager.call_api("posts", Method::Get, None, None).await;

    match result {
        Err(ApiError::Transport(cause)) => assert!(cause.is::<reqwest::Error>()),
        other => panic!("expected ApiError::Transport, got {:?}", other),
    }
}

#[tokio::test]
async fn concurrent_calls_do_not_interfere() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/todos/1")
        .with_status(200)
        .with_body(r#"{"id": 1, "title": "one", "completed": false}"#)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/todos/2")
        .with_status(200)
        .with_body(r#"{"id": 2, "title": "two", "completed": true}"#)
        .create_async()
        .await;

    let manager = manager_for(&server);
    let (one, two): (Result<Todo, ApiError>, Result<Todo, ApiError>) = tokio::join!(
        manager.call_api("todos/1", Method::Get, None, None),
        manager.call_api("todos/2", Method::Get, None, None),
    );

    assert_eq!(one.expect("first call").title, "one");
    assert_eq!(two.expect("second call").title, "two");
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn top_headlines_request_uses_get_base() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/top-headlines")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("country".into(), "us".into()),
            Matcher::UrlEncoded("apiKey".into(), "key".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{
                "status": "ok",
                "totalResults": 1,
                "articles": [{
                    "source": {"id": "bbc-news", "name": "BBC News"},
                    "author": "Reporter",
                    "title": "Headline",
                    "description": "Summary",
                    "url": "https://example.com/a",
                    "urlToImage": null,
                    "publishedAt": "2023-02-18T10:00:00Z",
                    "content": "Body"
                }]
            }"#,
        )
        .create_async()
        .await;

    let response = TopHeadlines {
        country: Some("us".to_string()),
        api_key: Some("key".to_string()),
        ..Default::default()
    }
    .request(&manager_for(&server))
    .await
    .expect("request should succeed");

    assert_eq!(response.total_results, 1);
    assert_eq!(response.articles[0].source.id.as_deref(), Some("bbc-news"));
    mock.assert_async().await;
}

#[tokio::test]
async fn create_post_goes_to_the_post_base_only() {
    let mut news = mockito::Server::new_async().await;
    let mut placeholder = mockito::Server::new_async().await;
    let news_mock = news.mock("POST", Matcher::Any).expect(0).create_async().await;
    let placeholder_mock = placeholder
        .mock("POST", "/posts")
        .match_body(Matcher::Json(json!({
            "userId": 7,
            "title": "t",
            "body": "b"
        })))
        .with_status(201)
        .with_body(r#"{"userId": 7, "id": 101, "title": "t", "body": "b"}"#)
        .create_async()
        .await;

    let manager = ApiManager::with_config(Config {
        news_url: format!("{}/", news.url()),
        placeholder_url: format!("{}/", placeholder.url()),
    });
    let post = CreatePost {
        user_id: 7,
        title: "t".to_string(),
        body: "b".to_string(),
    }
    .request(&manager)
    .await
    .expect("request should succeed");

    assert_eq!(post.user_id, 7);
    news_mock.assert_async().await;
    placeholder_mock.assert_async().await;
}
