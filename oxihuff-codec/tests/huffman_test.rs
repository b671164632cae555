//! Huffman codec integration tests.

use oxihuff_codec::{
    CodeTable, CodecConfig, FrequencyTable, HuffmanCodec, HuffmanDecoder, HuffmanEncoder,
    HuffmanTree, OxiHuffError, compress, decode, decompress, encode,
};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Reproducible pseudo-random bytes.
fn lcg_bytes(size: usize, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = seed;
    for _ in 0..size {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((state >> 32) as u8);
    }
    data
}

/// Skewed pseudo-random bytes: small values are much more likely.
fn skewed_bytes(size: usize, seed: u64) -> Vec<u8> {
    lcg_bytes(size, seed)
        .into_iter()
        .map(|b| (b as u32 * b as u32 / 1024) as u8)
        .collect()
}

/// Optimal total code length computed independently: the sum of every
/// merged weight while repeatedly combining the two lightest.
fn optimal_bits(table: &FrequencyTable) -> u64 {
    let mut heap: BinaryHeap<Reverse<u64>> = table.iter().map(|(_, c)| Reverse(c as u64)).collect();
    if heap.len() < 2 {
        return 0;
    }
    let mut cost = 0;
    while heap.len() > 1 {
        let Reverse(a) = heap.pop().unwrap();
        let Reverse(b) = heap.pop().unwrap();
        cost += a + b;
        heap.push(Reverse(a + b));
    }
    cost
}

fn roundtrip(data: &[u8]) {
    let compressed = compress(data).expect("compression failed");
    let restored =
        decompress(&compressed.frequency_file, &compressed.payload).expect("decompression failed");
    assert_eq!(restored.len(), data.len());
    assert_eq!(restored, data);
}

#[test]
fn test_roundtrip_random() {
    for (size, seed) in [(1, 1), (17, 2), (1000, 3), (65536, 4), (200_000, 5)] {
        roundtrip(&lcg_bytes(size, seed));
    }
}

#[test]
fn test_roundtrip_skewed() {
    roundtrip(&skewed_bytes(100_000, 0x1234_5678_9ABC_DEF0));
}

#[test]
fn test_roundtrip_text() {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. "
        .repeat(300);
    let compressed = compress(&text).unwrap();
    // English text compresses noticeably
    assert!(compressed.payload.len() < text.len() * 3 / 4);
    roundtrip(&text);
}

#[test]
fn test_roundtrip_all_byte_values() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 40).collect();
    roundtrip(&data);
}

#[test]
fn test_single_symbol_input() {
    let data = vec![0x41u8; 100];
    let compressed = compress(&data).unwrap();

    // Header: 65 zero bits, then 100 (1-byte width), then 190 zero bits
    // = 258 bits -> 33 bytes, plus a one-byte body.
    assert_eq!(compressed.frequency_file.len(), 34);
    assert_eq!(compressed.frequency_file[33], 100);
    assert!(compressed.payload.is_empty());

    let restored = decompress(&compressed.frequency_file, &compressed.payload).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn test_three_byte_scenario() {
    let data = [0x41, 0x41, 0x42];
    let compressed = compress(&data).unwrap();

    // One-bit codes, three bits of payload in one byte
    assert_eq!(compressed.payload.len(), 1);
    assert_eq!(compressed.payload[0] & 0b0001_1111, 0);

    let codec = HuffmanCodec::from_data(&data).unwrap();
    let a = codec.codes().get(0x41).unwrap();
    let b = codec.codes().get(0x42).unwrap();
    assert_eq!((a.length, b.length), (1, 1));
    assert_ne!(a.bits, b.bits);

    let restored = decompress(&compressed.frequency_file, &compressed.payload).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn test_empty_input() {
    let compressed = compress(b"").unwrap();
    assert_eq!(compressed.frequency_file, vec![0u8; 32]);
    assert!(compressed.payload.is_empty());
    assert!(
        decompress(&compressed.frequency_file, &compressed.payload)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_frequency_file_roundtrip() {
    let mut counts = [0u32; 256];
    counts[0] = 1;
    counts[1] = 255;
    counts[2] = 256;
    counts[3] = 65_535;
    counts[4] = 65_536;
    counts[5] = 16_777_215;
    counts[6] = 16_777_216;
    counts[255] = u32::MAX;
    let table = FrequencyTable::from_counts(counts);

    let bytes = table.to_bytes().unwrap();
    assert_eq!(bytes.len(), table.serialized_len());
    // 8 present symbols: 248 + 8 * 3 = 272 header bits, body 1+1+2+2+3+3+4+4
    assert_eq!(bytes.len(), 34 + 20);

    let restored = FrequencyTable::from_serialized(&bytes).unwrap();
    assert_eq!(restored, table);
}

#[test]
fn test_frequency_file_from_data_matches_counts() {
    let data = skewed_bytes(50_000, 99);
    let table = FrequencyTable::from_bytes(&data).unwrap();
    assert_eq!(table.total(), data.len() as u64);

    let streamed = FrequencyTable::from_reader(&data[..], 64).unwrap();
    assert_eq!(streamed, table);

    let restored = FrequencyTable::from_serialized(&table.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, table);
}

#[test]
fn test_truncated_frequency_file() {
    let table = FrequencyTable::from_bytes(b"hello world").unwrap();
    let bytes = table.to_bytes().unwrap();

    let err = FrequencyTable::from_serialized(&bytes[..10]).unwrap_err();
    assert!(matches!(
        err,
        OxiHuffError::FormatTruncated {
            section: "header",
            ..
        }
    ));

    let err = FrequencyTable::from_serialized(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(matches!(
        err,
        OxiHuffError::FormatTruncated {
            section: "body",
            ..
        }
    ));

    let err = FrequencyTable::from_serialized(&[]).unwrap_err();
    assert!(matches!(err, OxiHuffError::FormatTruncated { .. }));
}

#[test]
fn test_optimal_code_length() {
    for seed in 1..6u64 {
        let data = skewed_bytes(20_000, seed);
        let table = FrequencyTable::from_bytes(&data).unwrap();
        let tree = HuffmanTree::build(&table).unwrap();
        let codes = CodeTable::from_tree(&tree).unwrap();

        assert_eq!(codes.weighted_length(&table), optimal_bits(&table));
        assert_eq!(tree.weight(), table.total());
        assert_eq!(tree.leaf_count(), table.distinct());
        assert!(codes.is_prefix_free());

        // Payload size follows from the code lengths
        let payload = encode(&data, &codes).unwrap();
        assert_eq!(payload.len() as u64, codes.weighted_length(&table).div_ceil(8));
    }
}

#[test]
fn test_prefix_property_full_alphabet() {
    let data = lcg_bytes(100_000, 7);
    let codec = HuffmanCodec::from_data(&data).unwrap();
    assert_eq!(codec.codes().len(), 256);
    assert!(codec.codes().is_prefix_free());
}

#[test]
fn test_premature_end_of_bitstream() {
    let data = lcg_bytes(5000, 11);
    let compressed = compress(&data).unwrap();
    let truncated = &compressed.payload[..compressed.payload.len() / 2];

    let err = decompress(&compressed.frequency_file, truncated).unwrap_err();
    match err {
        OxiHuffError::PrematureEndOfBitstream { decoded, expected } => {
            assert_eq!(expected, 5000);
            assert!(decoded < expected);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_trailing_payload_ignored() {
    let data = b"abracadabra".repeat(20);
    let mut compressed = compress(&data).unwrap();
    compressed.payload.extend_from_slice(&[0xFF; 16]);
    let restored = decompress(&compressed.frequency_file, &compressed.payload).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn test_block_size_independence() {
    let data = skewed_bytes(30_000, 42);
    let codec = HuffmanCodec::from_data(&data).unwrap();

    let mut reference = None;
    for block_size in [64, 100, 4096, CodecConfig::MAX_BLOCK_SIZE] {
        let config = CodecConfig::new(block_size).unwrap();

        let mut payload = Vec::new();
        HuffmanEncoder::new(codec.codes(), config)
            .encode(&data[..], &mut payload)
            .unwrap();

        let mut restored = Vec::new();
        HuffmanDecoder::new(codec.tree(), config)
            .decode(&payload[..], &mut restored, data.len() as u64)
            .unwrap();
        assert_eq!(restored, data);

        match &reference {
            None => reference = Some(payload),
            Some(expected) => assert_eq!(&payload, expected),
        }
    }
}

#[test]
fn test_invalid_block_size() {
    assert!(matches!(
        CodecConfig::new(0),
        Err(OxiHuffError::InvalidConfig { .. })
    ));
    assert!(matches!(
        CodecConfig::new(10),
        Err(OxiHuffError::InvalidConfig { .. })
    ));
    assert!(CodecConfig::new(CodecConfig::MAX_BLOCK_SIZE + 1).is_err());
}

#[test]
fn test_decode_with_explicit_tree() {
    let data = b"mississippi river";
    let table = FrequencyTable::from_bytes(data).unwrap();
    let tree = HuffmanTree::build(&table).unwrap();
    let codes = CodeTable::from_tree(&tree).unwrap();
    let payload = encode(data, &codes).unwrap();
    assert_eq!(decode(&payload, &tree, data.len() as u64).unwrap(), data);
}
