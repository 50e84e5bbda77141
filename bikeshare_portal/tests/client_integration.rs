use bikeshare_portal::{Client, ClientConfig, Error};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn client_for(server: &MockServer) -> Client {
    Client::new(ClientConfig {
        member_url: server.uri(),
        ..ClientConfig::default()
    })
    .unwrap()
}

async fn mount_login_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/profile/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("login.html")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_success() {
    let server = MockServer::start().await;
    mount_login_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/profile/login_check"))
        .and(body_string_contains("_login_csrf_security_token=token123"))
        .and(body_string_contains("_username=jo"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.login("jo", "secret").await.is_ok());
}

#[tokio::test]
async fn login_303_is_rejected() {
    let server = MockServer::start().await;
    mount_login_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/profile/login_check"))
        .respond_with(ResponseTemplate::new(303).insert_header("location", "/challenge"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.login("jo", "secret").await.unwrap_err();
    assert!(matches!(err, Error::LoginRejected));
}

#[tokio::test]
async fn login_other_status_is_failure() {
    let server = MockServer::start().await;
    mount_login_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/profile/login_check"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.login("jo", "secret").await.unwrap_err();
    assert!(matches!(err, Error::LoginFailed { status: 401 }));
}

#[tokio::test]
async fn login_without_csrf_token_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><form></form></html>"))
        .mount(&server)
        .await;
    // no credential POST may go out when the token is missing
    Mock::given(method("POST"))
        .and(path("/profile/login_check"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.login("jo", "secret").await.unwrap_err();
    assert!(matches!(err, Error::Extraction(_)));
}

#[tokio::test]
async fn preseeded_cookies_skip_the_credential_post() {
    let server = MockServer::start().await;
    // the login page is still fetched once for the CSRF token
    Mock::given(method("GET"))
        .and(path("/profile/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("login.html")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/profile/login_check"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(ClientConfig {
        member_url: server.uri(),
        cookies: vec!["member_session=abc123".to_string()],
        ..ClientConfig::default()
    })
    .unwrap();
    assert!(client.login("jo", "secret").await.is_ok());
}

#[tokio::test]
async fn profile_fetch_returns_markup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("profile.html")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let html = client.profile_html().await.unwrap();
    let link = bikeshare_portal::trips_link(&html).unwrap();
    assert_eq!(link.path, "/profile/trips/4271");
    assert_eq!(link.account_id, "4271");
}

#[tokio::test]
async fn discover_page_count_from_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/trips/4271"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("trips_page1.html")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let trips_url = format!("{}/profile/trips/4271", server.uri());
    assert_eq!(client.discover_page_count(&trips_url).await.unwrap(), 2);
}

#[tokio::test]
async fn fetch_trip_pages_accumulates_in_page_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/trips/4271"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("trips_page1.html")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile/trips/4271"))
        .and(query_param("pageNumber", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("trips_page2.html")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let trips_url = format!("{}/profile/trips/4271", server.uri());
    let trips = client.fetch_trip_pages(&trips_url, 1, 2).await.unwrap();

    assert_eq!(trips.len(), 3);
    assert_eq!(trips[0].start_name, "10 Ave & W 28 St");
    assert_eq!(trips[1].start_name, "E 20 St & Park Ave");
    assert_eq!(trips[2].start_name, "Vanished Dock & Gone St");
}

#[tokio::test]
async fn bounded_run_reads_only_the_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/trips/4271"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("trips_page1.html")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let trips_url = format!("{}/profile/trips/4271", server.uri());
    let trips = client.fetch_trip_pages(&trips_url, 1, 1).await.unwrap();

    // exactly the rows of page 1, no cross-page leakage
    assert_eq!(trips.len(), 2);
}

#[tokio::test]
async fn mid_pagination_failure_aborts_remaining_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/trips/4271"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("trips_page1.html")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile/trips/4271"))
        .and(query_param("pageNumber", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile/trips/4271"))
        .and(query_param("pageNumber", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("trips_page2.html")))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let trips_url = format!("{}/profile/trips/4271", server.uri());
    let err = client.fetch_trip_pages(&trips_url, 1, 3).await.unwrap_err();
    assert!(matches!(err, Error::PageFetch { page: 2, status: 500 }));
}
