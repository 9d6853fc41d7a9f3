use criterion::{criterion_group, criterion_main};

mod network;

criterion_group!(
    benches,
    network::application::http::bench_build_request,
    network::application::http::bench_parse_response,
    network::transport::bench_decode_frames,
    network::transport::bench_relay_request
);
criterion_main!(benches);
