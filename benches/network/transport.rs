use criterion::{BatchSize, Criterion, Throughput};
use iotfetch::network::application::http::{Client, Request};
use iotfetch::network::error::Error;
use iotfetch::network::transport::relay::FrameDecoder;
use iotfetch::network::transport::{MatchMode, RelayTransport};
use iotfetch::network::{Read, Write};
use iotfetch::system::clock::{Clock, Deadline};

/// Serial link replaying a captured module session
struct ScriptLink {
    script: Vec<u8>,
    pos: usize,
}

impl ScriptLink {
    fn new(script: Vec<u8>) -> Self {
        Self { script, pos: 0 }
    }
}

impl Read for ScriptLink {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match (buf.first_mut(), self.script.get(self.pos)) {
            (Some(slot), Some(&byte)) => {
                *slot = byte;
                self.pos += 1;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

impl Write for ScriptLink {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

struct TickClock(u64);

impl Clock for TickClock {
    fn now_ms(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

fn framed(payload: &[u8], frame_len: usize) -> Vec<u8> {
    let mut out = b"\r\nRecv 120 bytes\r\n\r\nSEND OK\r\n\r\n".to_vec();
    for chunk in payload.chunks(frame_len) {
        out.extend_from_slice(format!("+IPD,{}:", chunk.len()).as_bytes());
        out.extend_from_slice(chunk);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b"CLOSED\r\n");
    out
}

fn reply() -> Vec<u8> {
    let mut reply = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n".to_vec();
    reply.extend_from_slice(b"{\"readings\":[");
    for i in 0..60 {
        reply.extend_from_slice(format!("{{\"t\":{},\"v\":{}}},", i, i * 3).as_bytes());
    }
    reply.extend_from_slice(b"{}]}");
    reply
}

pub fn bench_decode_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay_frames");
    let stream = framed(&reply(), 256);
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("decode", |b| {
        b.iter_batched_ref(
            || (ScriptLink::new(stream.clone()), TickClock(0)),
            |(link, clock)| {
                let mut decoder = FrameDecoder::new(b"+IPD,", b"CLOSED", MatchMode::Retest);
                let deadline = Deadline::after(clock, u32::MAX);
                let mut total = 0;
                decoder
                    .decode(link, clock, deadline, |payload| {
                        total += payload.len();
                        Ok(())
                    })
                    .expect("Failed to decode");
                total
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

pub fn bench_relay_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay_request");
    let mut session = b"\r\nOK\r\n\r\nOK\r\n> ".to_vec();
    session.extend_from_slice(&framed(&reply(), 512));
    group.bench_function("get", |b| {
        b.iter_batched(
            || {
                Client::new(RelayTransport::new(
                    ScriptLink::new(session.clone()),
                    TickClock(0),
                ))
            },
            |mut client| {
                let response = client.http_request(&Request::get("https://api.example.com/readings"));
                assert!(response.connected);
                response
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}
