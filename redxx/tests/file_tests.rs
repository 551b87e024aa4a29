#[cfg(test)]
mod tests {
    use redxx::{convert_file, file_info, load_options, RenderMode, SampleFormat};

    #[test]
    fn test_convert_double_binary_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.DDB");
        let output = dir.path().join("out.DDA");
        let samples = vec![0.5, -1.25, 3.0];
        libdxx::write_file(&input, &samples).unwrap();

        let summary = convert_file(&input, &output).unwrap();
        assert_eq!(summary.from, SampleFormat::DoubleBinary);
        assert_eq!(summary.to, SampleFormat::DoubleText);
        assert_eq!(summary.samples, 3);
        assert_eq!(
            summary.bytes_written as u64,
            std::fs::metadata(&output).unwrap().len()
        );

        // double formats carry the values through unchanged
        assert_eq!(libdxx::read_file(&output).unwrap(), samples);
    }

    #[test]
    fn test_convert_to_short_rescales() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.DDA");
        let output = dir.path().join("out.DSB");
        libdxx::write_file(&input, &[1.0, -2.0, 3.0]).unwrap();

        let summary = convert_file(&input, &output).unwrap();
        assert_eq!(summary.bytes_written, 6);

        let bytes = std::fs::read(&output).unwrap();
        let last = i16::from_le_bytes([bytes[4], bytes[5]]);
        assert_eq!(last, 32767);
    }

    #[test]
    fn test_convert_rejects_unknown_output_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        // input does not exist, the output extension is checked first
        let input = dir.path().join("missing.DDB");
        let output = dir.path().join("out.wav");

        let err = convert_file(&input, &output).unwrap_err();
        assert!(err.to_string().contains("out.wav"));
        assert!(!output.exists());
    }

    #[test]
    fn test_file_info_reports_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signal.DDB");
        libdxx::write_file(&path, &[3.0, -4.0, 1.0, 0.0]).unwrap();

        let info = file_info(&path).unwrap();
        assert_eq!(info.format, SampleFormat::DoubleBinary);
        assert_eq!(info.file_size, 32);
        assert_eq!(info.stats.len, 4);
        assert_eq!(info.stats.peak, 4.0);
        assert_eq!(info.stats.min_abs, 0.0);
        assert_eq!(info.stats.min, -4.0);
        assert_eq!(info.stats.max, 3.0);
        assert!((info.stats.rms - (26.0f64 / 4.0).sqrt()).abs() < 1e-12);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["file_size"], 32);
    }

    #[test]
    fn test_file_info_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(file_info(&dir.path().join("absent.DSA")).is_err());
    }

    #[test]
    fn test_load_options() {
        assert_eq!(load_options(None).unwrap(), redxx::RenderOptions::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        std::fs::write(&path, r#"{"mode": "FadeinFadeout", "sampling_rate": 44100}"#).unwrap();

        let options = load_options(Some(&path)).unwrap();
        assert_eq!(options.mode, RenderMode::FadeinFadeout);
        assert_eq!(options.sampling_rate, 44_100);

        std::fs::write(&path, "not json").unwrap();
        let err = load_options(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("render.json"));
    }
}
