#![cfg(feature = "reqwest")]

// std
use std::{sync::Arc, time::Duration};
// crates.io
use httpmock::prelude::*;
// self
use noclist::{
	auth::AuthClient,
	config::Config,
	error::{Error, TransportError},
	http::{HttpClient, HttpRequest, ReqwestHttpClient},
	obs::Operation,
	reqwest::Client,
	retry::RetryPolicy,
	url::Url,
};

fn build_client(server: &MockServer) -> AuthClient<ReqwestHttpClient> {
	let config = Config::parse(&server.base_url())
		.expect("Mock server URL should be a valid base URL.")
		.with_retry(RetryPolicy::new(3, Duration::from_millis(10)));

	AuthClient::new(Arc::new(config)).expect("Reqwest client should build.")
}

#[tokio::test]
async fn fetch_token_reads_header_on_first_success() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth");
			then.status(200).header("Badsec-Authentication-Token", "ABC123");
		})
		.await;
	let token = build_client(&server).fetch_token().await.expect("Auth should succeed.");

	assert_eq!(token.expose(), "ABC123");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn fetch_token_accepts_missing_header_as_empty_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth");
			then.status(200).body("no header here");
		})
		.await;
	let token = build_client(&server).fetch_token().await.expect("Auth should succeed.");

	assert!(token.is_empty());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn fetch_token_gives_up_after_three_failed_attempts() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth");
			then.status(500);
		})
		.await;
	let err = build_client(&server)
		.fetch_token()
		.await
		.expect_err("Auth should fail after exhausting retries.");

	match err {
		Error::RetriesExhausted { operation, attempts, source } => {
			assert_eq!(operation, Operation::Auth);
			assert_eq!(attempts, 3);
			assert!(matches!(*source, Error::UnexpectedStatus { status: 500, .. }));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn fetch_token_retries_unreachable_servers() {
	let config = Config::parse("http://127.0.0.1:1")
		.expect("Loopback URL should be a valid base URL.")
		.with_retry(RetryPolicy::new(2, Duration::from_millis(1)));
	let err = AuthClient::new(config)
		.expect("Reqwest client should build.")
		.fetch_token()
		.await
		.expect_err("Nothing listens on port 1.");

	assert!(matches!(
		err,
		Error::RetriesExhausted { attempts: 2, ref source, .. } if matches!(**source, Error::Transport(_))
	));
}

#[tokio::test]
async fn fetch_token_retries_requests_that_time_out() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/auth");
			then.status(200)
				.header("Badsec-Authentication-Token", "TOO-LATE")
				.delay(Duration::from_millis(500));
		})
		.await;
	let config = Config::parse(&server.base_url())
		.expect("Mock server URL should be a valid base URL.")
		.with_retry(RetryPolicy::new(2, Duration::from_millis(1)))
		.with_request_timeout(Duration::from_millis(50));
	let err = AuthClient::new(config)
		.expect("Reqwest client should build.")
		.fetch_token()
		.await
		.expect_err("Every attempt outlives the timeout.");

	assert!(matches!(
		err,
		Error::RetriesExhausted { attempts: 2, ref source, .. } if matches!(**source, Error::Transport(_))
	));

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn wrapped_clients_keep_their_own_timeout() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth");
			then.status(200).delay(Duration::from_millis(500));
		})
		.await;

	let client = Client::builder()
		.timeout(Duration::from_millis(50))
		.build()
		.expect("Reqwest client should build.");
	let url = Url::parse(&server.url("/auth")).expect("Mock server URL should parse.");
	let err = ReqwestHttpClient::with_client(client)
		.get(HttpRequest::get(url, "/auth"))
		.await
		.expect_err("The response arrives after the timeout.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert!(err.is_retryable());
}

#[tokio::test]
async fn headers_only_requests_leave_the_body_unread() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth");
			then.status(200)
				.header("Badsec-Authentication-Token", "ABC123")
				.body("a body nobody needs");
		})
		.await;

	let url = Url::parse(&server.url("/auth")).expect("Mock server URL should parse.");
	let response = ReqwestHttpClient::default()
		.get(HttpRequest::get(url.clone(), "/auth").headers_only())
		.await
		.expect("Headers-only request should succeed.");

	assert!(response.is_ok());
	assert_eq!(response.header("Badsec-Authentication-Token"), Some("ABC123"));
	assert!(response.body.is_empty());

	let response = ReqwestHttpClient::default()
		.get(HttpRequest::get(url, "/auth"))
		.await
		.expect("Full request should succeed.");

	assert_eq!(response.body, "a body nobody needs");
}
