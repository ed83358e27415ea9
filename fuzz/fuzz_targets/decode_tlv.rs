#![no_main]

use libfuzzer_sys::fuzz_target;
use bertlv::{decode, Decoder, Node};

fuzz_target!(|data: &[u8]| {
    let res = decode(data);

    // A successful decode accounts for every octet of the input.
    if let Ok(nodes) = res.as_ref() {
        let len: usize = nodes.iter().map(Node::encoded_len).sum();
        assert_eq!(len, data.len());
        assert_eq!(Node::walk(nodes).count() > 0, !data.is_empty());
    }

    // Decoding is deterministic.
    assert_eq!(decode(data), res);

    // A tighter depth limit never turns failure into success.
    if res.is_err() {
        assert!(Decoder::with_max_depth(2).decode(data).is_err());
    }
});
