use libdxx::{
    decode, decode_bytes, decode_n, encode, read_file, write, write_file, DxxError, Reader,
    SampleFormat,
};

fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() <= tol, "sample {}: got {}, expected {}", i, a, e);
    }
}

#[test]
fn test_short_text_rescales_to_nominal_amplitude() {
    let decoded = decode("100\n-200\n300\n".as_bytes(), SampleFormat::ShortText).unwrap();

    // min |v| = 100, max |v| = 300
    let expected = [
        (100.0 - 100.0) / (300.0 - 100.0) * 10000.0,
        -(200.0 - 100.0) / (300.0 - 100.0) * 10000.0,
        (300.0 - 100.0) / (300.0 - 100.0) * 10000.0,
    ];
    assert_eq!(decoded, expected.to_vec());
    assert_eq!(decoded, vec![0.0, -5000.0, 10000.0]);
}

#[test]
fn test_short_text_constant_magnitude() {
    let decoded = decode("5\n-5\n5\n".as_bytes(), SampleFormat::ShortText).unwrap();
    assert_eq!(decoded, vec![10000.0, -10000.0, 10000.0]);
}

#[test]
fn test_double_binary_round_trip_is_exact() {
    let samples = vec![0.1, -2.5, 1e-300, f64::MAX, -0.0, 12345.678901234];
    let bytes = encode(&samples, SampleFormat::DoubleBinary);
    assert_eq!(bytes.len(), samples.len() * 8);
    assert_eq!(decode_bytes(&bytes, SampleFormat::DoubleBinary).unwrap(), samples);
}

#[test]
fn test_double_text_round_trip_is_exact() {
    let samples = vec![0.1, -2.5, 1e-300, 3.141592653589793, 12345.678901234, -7e22];
    let bytes = encode(&samples, SampleFormat::DoubleText);
    assert_eq!(decode_bytes(&bytes, SampleFormat::DoubleText).unwrap(), samples);
}

#[test]
fn test_double_binary_is_little_endian() {
    let bytes = encode(&[1.0], SampleFormat::DoubleBinary);
    assert_eq!(bytes, 1.0f64.to_le_bytes().to_vec());
}

#[test]
fn test_short_binary_encode_rescales_to_full_range() {
    let bytes = encode(&[0.5, -1.0, 0.25], SampleFormat::ShortBinary);
    let values: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect();

    // min |v| = 0.25, max |v| = 1.0
    let first = ((0.5 - 0.25) / 0.75 * 32767.0) as i16;
    assert_eq!(values, vec![first, -32767, 0]);
    assert_eq!(first, 10922);
}

#[test]
fn test_short_text_encode_writes_plain_decimals() {
    let bytes = encode(&[-4.0, 2.0, 1.0], SampleFormat::ShortText);
    let text = String::from_utf8(bytes).unwrap();

    // min |v| = 1, max |v| = 4
    let middle = ((2.0 - 1.0) / 3.0 * 32767.0) as i16;
    assert_eq!(text, format!("-32767\n{}\n0\n", middle));
}

#[test]
fn test_float_text_encode_uses_scientific_notation() {
    let bytes = encode(&[0.0, -2.0, 4.0], SampleFormat::FloatText);
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, "0.000000e+00\n-5.000000e+03\n1.000000e+04\n");
}

#[test]
fn test_float_binary_rescales_both_ways() {
    let bytes = encode(&[1.0, -2.0, 4.0], SampleFormat::FloatBinary);
    let stored: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    let third = (1.0f64 / 3.0 * 10000.0) as f32;
    assert_eq!(stored, vec![0.0, -third, 10000.0]);

    // stored magnitudes already span 0..10000, decoding keeps them
    let decoded = decode_bytes(&bytes, SampleFormat::FloatBinary).unwrap();
    assert_close(&decoded, &[0.0, -f64::from(third), 10000.0], 1e-3);
}

#[test]
fn test_float_text_decode_rescales() {
    let decoded = decode("1.0\n-3.0\n2.0\n".as_bytes(), SampleFormat::FloatText).unwrap();
    assert_close(&decoded, &[0.0, -10000.0, 5000.0], 1e-9);
}

#[test]
fn test_truncated_binary_record_is_dropped() {
    let mut bytes = encode(&[1.0, 2.0, 3.0], SampleFormat::DoubleBinary);
    bytes.extend_from_slice(&[0xAA; 5]);
    let decoded = decode_bytes(&bytes, SampleFormat::DoubleBinary).unwrap();
    assert_eq!(decoded, vec![1.0, 2.0, 3.0]);

    let decoded = decode_bytes(&[0x10, 0x00, 0x7F], SampleFormat::ShortBinary).unwrap();
    assert_eq!(decoded.len(), 1);

    let decoded = decode_bytes(&[0x00, 0x00, 0x80], SampleFormat::FloatBinary).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_malformed_text_line_aborts_read() {
    let err = decode("1.0\nabc\n3.0\n".as_bytes(), SampleFormat::DoubleText).unwrap_err();
    match err {
        DxxError::MalformedSample { line, value } => {
            assert_eq!(line, 2);
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_short_text_out_of_range_is_malformed() {
    let err = decode("1\n40000\n".as_bytes(), SampleFormat::ShortText).unwrap_err();
    assert!(matches!(err, DxxError::MalformedSample { line: 2, .. }));
}

#[test]
fn test_empty_line_is_malformed() {
    let err = decode("1\n\n2\n".as_bytes(), SampleFormat::DoubleText).unwrap_err();
    assert!(matches!(err, DxxError::MalformedSample { line: 2, .. }));
}

#[test]
fn test_invalid_utf8_line_is_malformed() {
    let err = decode(&b"100\n\xff\xfe\n300\n"[..], SampleFormat::ShortText).unwrap_err();
    match err {
        DxxError::MalformedSample { line, value } => {
            assert_eq!(line, 2);
            assert_eq!(value, "\u{fffd}\u{fffd}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_last_line_without_newline() {
    let decoded = decode("1.5\n-2.5".as_bytes(), SampleFormat::DoubleText).unwrap();
    assert_eq!(decoded, vec![1.5, -2.5]);
}

#[test]
fn test_crlf_lines_are_accepted() {
    let decoded = decode("1.5\r\n-2.5\r\n".as_bytes(), SampleFormat::DoubleText).unwrap();
    assert_eq!(decoded, vec![1.5, -2.5]);
}

#[test]
fn test_empty_stream_decodes_to_empty_buffer() {
    for format in SampleFormat::ALL {
        assert!(decode_bytes(&[], format).unwrap().is_empty(), "{format}");
        assert!(encode(&[], format).is_empty(), "{format}");
    }
}

#[test]
fn test_file_round_trip_picks_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let samples = vec![0.25, -0.5, 1.0];

    let ddb = dir.path().join("signal.DDB");
    write_file(&ddb, &samples).unwrap();
    assert_eq!(std::fs::metadata(&ddb).unwrap().len(), 24);
    assert_eq!(read_file(&ddb).unwrap(), samples);

    let dda = dir.path().join("signal.DDA");
    write_file(&dda, &samples).unwrap();
    assert_eq!(read_file(&dda).unwrap(), samples);
}

#[test]
fn test_unknown_extension_has_no_side_effects() {
    let dir = tempfile::tempdir().unwrap();

    let wav = dir.path().join("signal.wav");
    let err = write_file(&wav, &[1.0]).unwrap_err();
    assert!(matches!(err, DxxError::UnknownFormat(_)));
    assert!(!wav.exists());

    let lower = dir.path().join("signal.ddb");
    assert!(matches!(write_file(&lower, &[1.0]), Err(DxxError::UnknownFormat(_))));
    assert!(!lower.exists());

    let bare = dir.path().join("signal");
    assert!(matches!(read_file(&bare), Err(DxxError::UnknownFormat(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_file(dir.path().join("absent.DDB")).unwrap_err();
    assert!(matches!(err, DxxError::Io(_)));
}

#[test]
fn test_decode_n_stops_after_len_elements() {
    let bytes = encode(&[1.0, 2.0, 3.0, 4.0], SampleFormat::DoubleBinary);
    assert_eq!(
        decode_n(&bytes[..], SampleFormat::DoubleBinary, 2).unwrap(),
        vec![1.0, 2.0]
    );

    // lines past the limit are never parsed
    let text = "1.0\n2.0\nnot a number\n";
    assert_eq!(
        decode_n(text.as_bytes(), SampleFormat::DoubleText, 2).unwrap(),
        vec![1.0, 2.0]
    );
    assert!(decode(text.as_bytes(), SampleFormat::DoubleText).is_err());
}

#[test]
fn test_decode_n_short_stream() {
    let bytes = encode(&[1.0, 2.0], SampleFormat::DoubleBinary);
    let decoded = decode_n(&bytes[..], SampleFormat::DoubleBinary, 10).unwrap();
    assert_eq!(decoded, vec![1.0, 2.0]);

    let decoded = decode_n("7\n".as_bytes(), SampleFormat::DoubleText, 3).unwrap();
    assert_eq!(decoded, vec![7.0]);

    assert!(decode_n(&bytes[..], SampleFormat::DoubleBinary, 0)
        .unwrap()
        .is_empty());
}

#[test]
fn test_reader_leaves_rest_of_stream() {
    let bytes = encode(&[1.0, 2.0, 3.0], SampleFormat::DoubleBinary);
    let mut stream = &bytes[..];

    let reader = Reader::new(SampleFormat::DoubleBinary);
    assert_eq!(reader.format(), SampleFormat::DoubleBinary);
    assert_eq!(reader.read_len(&mut stream, 1).unwrap(), vec![1.0]);
    assert_eq!(reader.read(&mut stream).unwrap(), vec![2.0, 3.0]);
}

#[test]
fn test_write_to_stream_matches_encode() {
    let samples = [0.5, -1.0, 0.25];
    for format in SampleFormat::ALL {
        let mut sink = Vec::new();
        write(&mut sink, &samples, format).unwrap();
        assert_eq!(sink, encode(&samples, format), "{format}");
    }
}
