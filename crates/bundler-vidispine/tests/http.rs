use std::io::Read;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};

use httptest::{Expectation, Server, matchers::*, responders::*};

use bundler_vidispine::{
    Backoff, ChunkedReader, ConnectionConfig, Error, ReqwestClient, RetryPolicy, Transport,
    buffered_copy, fetch_descriptor,
};

const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<FileDocument xmlns="http://xml.vidispine.com/schema/vidispine">
    <id>VX-1</id>
    <path>deliverables/episode 1/final.mxf</path>
    <state>CLOSED</state>
    <size>10</size>
    <hash>0123456789abcdef</hash>
    <timestamp>2019-09-11T11:45:00.883+01:00</timestamp>
    <refreshFlag>0</refreshFlag>
    <storage>VX-2</storage>
</FileDocument>"#;

fn transport(server: &Server, config: ConnectionConfig) -> Transport<ReqwestClient> {
    let addr = server.addr();
    let config = ConnectionConfig {
        scheme: "http".into(),
        host: addr.ip().to_string(),
        port: addr.port(),
        ..config
    };
    Transport::new(Arc::new(config), ReqwestClient::new().unwrap())
}

fn basic() -> ConnectionConfig {
    ConnectionConfig::new("http", "unused", 0).basic_auth("admin", "secret")
}

#[test]
fn lookup_with_token_auth() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/API/storage/VX-2/file/VX-1"),
            request::headers(contains(("authorization", "token abc123"))),
            request::headers(contains(("accept", "application/xml"))),
        ])
        .respond_with(status_code(200).body(DOC)),
    );

    let config = basic().token(Some("abc123".into()));
    let transport = transport(&server, config);
    let document = fetch_descriptor(&transport, "VX-2", "VX-1").unwrap();

    assert_eq!(document.size, 10);
    assert_eq!(document.path, "deliverables/episode 1/final.mxf");
    assert_eq!(document.into_sized().unwrap().basename(), "final.mxf");
}

#[test]
fn ranged_download_with_basic_auth() {
    let server = Server::run();
    let data = b"0123456789";
    let blocks = [
        ("Bytes=0-3", &data[0..4]),
        ("Bytes=4-7", &data[4..8]),
        ("Bytes=8-9", &data[8..10]),
    ];
    for (range, body) in blocks {
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/API/storage/VX-2/file/VX-1/data"),
                request::headers(contains(("authorization", "Basic YWRtaW46c2VjcmV0"))),
                request::headers(contains(("range", range))),
            ])
            .respond_with(status_code(206).body(body.to_vec())),
        );
    }

    let transport = transport(&server, basic());
    let file = bundler_vidispine::FileDocument::from_xml(DOC.as_bytes())
        .unwrap()
        .into_sized()
        .unwrap();
    let mut reader = ChunkedReader::new(&transport, &file, 4).unwrap();
    let mut out = Vec::new();

    let copied = buffered_copy(&mut out, &mut reader, 1024).unwrap();

    assert_eq!(copied, 10);
    assert_eq!(out, data);
}

#[test]
fn unavailable_then_ok_is_retried() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/API/storage/VX-2/file/VX-1"))
            .times(2)
            .respond_with(cycle![
                status_code(503).body("maintenance"),
                status_code(200).body(DOC),
            ]),
    );

    let delay = Duration::from_millis(150);
    let policy = RetryPolicy::default().backoff(Backoff::Fixed(delay));
    let transport = transport(&server, basic()).with_policy(policy);

    let started = Instant::now();
    let document = fetch_descriptor(&transport, "VX-2", "VX-1").unwrap();

    assert!(started.elapsed() >= delay);
    assert_eq!(document.id, "VX-1");
}

#[test]
fn forbidden_carries_body() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/API/storage/VX-2/file/VX-1"))
            .times(1)
            .respond_with(status_code(403).body("user admin may not read VX-1")),
    );

    let transport = transport(&server, basic());
    let err = fetch_descriptor(&transport, "VX-2", "VX-1").unwrap_err();

    match err {
        Error::LookupFailed { source, .. } => match *source {
            Error::Forbidden { body } => assert_eq!(body, "user admin may not read VX-1"),
            other => panic!("expected Forbidden, got {other:?}"),
        },
        other => panic!("expected LookupFailed, got {other:?}"),
    }
}

#[test]
fn open_reads_whole_file() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/API/storage/VX-2/file/VX-1"))
            .respond_with(status_code(200).body(DOC)),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/API/storage/VX-2/file/VX-1/data"),
            request::headers(contains(("range", "Bytes=0-9"))),
        ])
        .respond_with(status_code(200).body("abcdefghij")),
    );

    let transport = transport(&server, basic());
    let mut reader = ChunkedReader::open(&transport, "VX-2", "VX-1", 64).unwrap();
    let mut out = String::new();
    reader.read_to_string(&mut out).unwrap();

    assert_eq!(out, "abcdefghij");
}

#[test]
fn connection_refused_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ConnectionConfig::new("http", "127.0.0.1", port);
    let transport = Transport::new(Arc::new(config), ReqwestClient::new().unwrap());

    let err = fetch_descriptor(&transport, "VX-2", "VX-1").unwrap_err();
    match err {
        Error::LookupFailed { source, .. } => assert!(matches!(*source, Error::Transport(_))),
        other => panic!("expected LookupFailed, got {other:?}"),
    }
}
