use criterion::{Criterion, Throughput};
use std::hint::black_box;
use iotfetch::network::application::http::request::build;
use iotfetch::network::application::http::response::parse;
use iotfetch::network::application::http::{BodyCleanup, Request, Url};

const REPLY: &[u8] = b"HTTP/1.1 200 OK\r\n\
    Content-Type: application/json; charset=UTF-8\r\n\
    Vary: Origin\r\n\
    Vary: X-Origin\r\n\
    Date: Sat, 17 Oct 2026 09:12:44 GMT\r\n\
    Server: ESF\r\n\
    Cache-Control: private\r\n\
    \r\n\
    \r\n{\"spreadsheetId\":\"abc\",\"updates\":{\"updatedRange\":\"Sheet1!A2:C2\",\"updatedRows\":1}}\r\n";

pub fn bench_build_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("http_request");
    let request = Request::post(
        "https://sheets.googleapis.com/v4/spreadsheets/abc/values/A1:append",
        r#"{"values":[["2026-10-17 09:12","21.5","48"]]}"#,
    )
    .with_content_type("application/json")
    .with_bearer_token("ya29.a0AfH6SMBexampletoken");
    let url = Url::parse(request.url).unwrap();
    group.bench_function("build", |b| {
        b.iter(|| build(black_box(&request), &url, "esp8266/0.1").expect("Failed to build"));
    });
    group.finish();
}

pub fn bench_parse_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("http_response");
    group.throughput(Throughput::Bytes(REPLY.len() as u64));
    group.bench_function("parse", |b| {
        b.iter(|| parse(black_box(REPLY)).expect("Failed to parse"));
    });
    group.bench_function("parse_and_trim", |b| {
        b.iter(|| {
            let mut response = parse(black_box(REPLY)).expect("Failed to parse");
            BodyCleanup::BraceTrim.apply(&mut response);
            response
        });
    });
    group.finish();
}
