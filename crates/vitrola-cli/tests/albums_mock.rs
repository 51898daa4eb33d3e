use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Creates a home directory holding a signed-in session.
fn signed_in_home() -> TempDir {
    let home = tempdir().unwrap();
    let profile = json!({"id": 1, "name": "A", "email": "a@b.com", "password": "x"});
    let entries = json!({
        "@Auth.Token": "tok",
        "@Auth.Data": profile.to_string(),
    });
    std::fs::write(home.path().join("session.json"), entries.to_string()).unwrap();
    home
}

fn vitrola(home: &Path, server: &MockServer) -> assert_cmd::Command {
    let api = format!("{}/api", server.uri());
    let mut cmd = cargo_bin_cmd!("vitrola");
    cmd.env("VITROLA_HOME", home)
        .env("VITROLA_USER_API_URL", &api)
        .env("VITROLA_ALBUM_API_URL", &api);
    cmd
}

fn catalog() -> serde_json::Value {
    json!([{
        "id": "6deiaArbeoqp1xPEGdEKp1",
        "name": "Californication",
        "releaseDate": "1999-06-08",
        "value": 42.5,
        "artists": [{"name": "Red Hot Chili Peppers"}],
        "images": [{"url": "https://img.example/cali.jpg"}]
    }])
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_prints_results() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/albums/all"))
        .and(query_param("search", "californication"))
        .and(header("Authorization", "Basic tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
        .mount(&server)
        .await;

    let home = signed_in_home();
    vitrola(home.path(), &server)
        .args(["albums", "search", "californication"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Red Hot Chili Peppers - Californication"))
        .stdout(predicate::str::contains("08/06/1999"))
        .stdout(predicate::str::contains("R$42.50"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_buy_posts_sale_without_password() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/albums/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/albums/sale"))
        .and(body_partial_json(json!({
            "idSpotify": "6deiaArbeoqp1xPEGdEKp1",
            "value": 42.5,
            "users": {"id": 1, "name": "A", "email": "a@b.com"}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let home = signed_in_home();
    vitrola(home.path(), &server)
        .args(["albums", "buy", "6deiaArbeoqp1xPEGdEKp1", "--query", "rhcp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Album purchased!"));

    let requests = server.received_requests().await.unwrap();
    let sale = requests
        .iter()
        .find(|r| r.url.path() == "/api/albums/sale")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&sale.body).unwrap();
    assert!(body["users"].get("password").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_buy_surfaces_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/albums/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/albums/sale"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Album already bought"))
        .mount(&server)
        .await;

    let home = signed_in_home();
    vitrola(home.path(), &server)
        .args(["albums", "buy", "6deiaArbeoqp1xPEGdEKp1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Album already bought"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_collection_prints_totals() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/albums/my-collection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "idSpotify": "a", "name": "One", "artistName": "X", "imageUrl": "", "value": 10.0},
            {"id": 4, "idSpotify": "b", "name": "Two", "artistName": "Y", "imageUrl": "", "value": 5.25}
        ])))
        .mount(&server)
        .await;

    let home = signed_in_home();
    vitrola(home.path(), &server)
        .args(["albums", "collection"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total albums: 2"))
        .stdout(predicate::str::contains("R$15.25"))
        .stdout(predicate::str::contains("X - One"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wallet_credit_prints_new_balance() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/wallet/credit/12.5"))
        .and(header("Authorization", "Basic tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "balance": 112.5, "points": 3, "lastUpdate": "2024-03-01T10:20:00"
        })))
        .mount(&server)
        .await;

    let home = signed_in_home();
    vitrola(home.path(), &server)
        .args(["wallet", "credit", "12,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added R$12.50"))
        .stdout(predicate::str::contains("Balance: R$112.50"))
        .stdout(predicate::str::contains("01/03/2024 10:20"));
}

#[test]
fn test_albums_require_session() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("vitrola")
        .env("VITROLA_HOME", home.path())
        .args(["albums", "collection"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn test_wallet_credit_rejects_bad_amount() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("vitrola")
        .env("VITROLA_HOME", home.path())
        .args(["wallet", "credit", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount '-5'"));
}
