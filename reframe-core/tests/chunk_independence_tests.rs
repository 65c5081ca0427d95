//! Property tests: framing must not depend on how the stream is chunked

use proptest::prelude::*;
use reframe_core::{FramerConfig, Sentence, StreamFramer};

/// Split `bytes` into consecutive chunks of the given sizes, the last chunk
/// taking whatever is left
fn chunked<'a>(bytes: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = bytes;
    for &size in sizes {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(size.min(rest.len()));
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

fn frame(config: FramerConfig, chunks: &[&[u8]]) -> StreamFramer<Vec<Sentence>> {
    let mut framer = StreamFramer::with_config(config, Vec::<Sentence>::new()).unwrap();
    for chunk in chunks {
        framer.feed(chunk).unwrap();
    }
    framer
}

fn body() -> impl Strategy<Value = String> {
    // Mixed widths so chunk cuts land inside multi-byte code points
    "[a-zA-Z0-9,.*$°é€🦀]{0,24}"
}

proptest! {
    #[test]
    fn prop_sentences_independent_of_chunking(
        bodies in prop::collection::vec(body(), 0..12),
        sizes in prop::collection::vec(1usize..9, 0..64),
    ) {
        let delimiter = "\r";
        let expected: Vec<String> = bodies.iter().map(|b| format!("{b}{delimiter}")).collect();
        let stream = expected.concat();

        let framer = frame(FramerConfig::default(), &chunked(stream.as_bytes(), &sizes));
        let delivered: Vec<&str> = framer.sink().iter().map(|s| s.as_str()).collect();

        prop_assert_eq!(delivered, expected.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert!(framer.pending().is_empty());
    }

    #[test]
    fn prop_multibyte_delimiter_independent_of_chunking(
        bodies in prop::collection::vec("[a-z0-9,]{0,16}", 1..10),
        sizes in prop::collection::vec(1usize..5, 0..64),
    ) {
        let expected: Vec<String> = bodies.iter().map(|b| format!("{b}\r\n")).collect();
        let stream = expected.concat();

        let framer = frame(FramerConfig::crlf(), &chunked(stream.as_bytes(), &sizes));
        let delivered: Vec<String> = framer.sink().iter().map(|s| s.to_string()).collect();

        prop_assert_eq!(delivered, expected);
    }

    #[test]
    fn prop_oversized_sentences_dropped_others_delivered(
        bodies in prop::collection::vec("[a-z]{0,30}", 0..12),
        sizes in prop::collection::vec(1usize..16, 0..32),
    ) {
        let max = 16;
        let stream: String = bodies.iter().map(|b| format!("{b}\r")).collect();
        let expected: Vec<String> = bodies
            .iter()
            .map(|b| format!("{b}\r"))
            .filter(|s| s.len() <= max)
            .collect();

        let config = FramerConfig::new("\r", max).unwrap();
        let framer = frame(config, &chunked(stream.as_bytes(), &sizes));
        let delivered: Vec<String> = framer.sink().iter().map(|s| s.to_string()).collect();

        prop_assert_eq!(delivered, expected.clone());
        prop_assert_eq!(
            framer.stats().overruns as usize,
            bodies.len() - expected.len()
        );
    }

    #[test]
    fn prop_every_byte_accounted_for(
        stream in "[a-z\r]{0,200}",
        sizes in prop::collection::vec(1usize..12, 0..40),
        max in 1usize..20,
    ) {
        let config = FramerConfig::new("\r", max).unwrap();
        let framer = frame(config, &chunked(stream.as_bytes(), &sizes));
        let stats = framer.stats();

        prop_assert_eq!(stats.bytes_fed, stream.len() as u64);
        prop_assert_eq!(
            stats.bytes_fed,
            stats.bytes_delivered + stats.bytes_dropped + framer.pending_bytes() as u64
        );
        prop_assert!(framer.current().len() <= max);
    }
}
