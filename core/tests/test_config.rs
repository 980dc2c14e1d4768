#[cfg(test)]
mod config_tests {
    use transform_core::config::{ConfigError, StreamConfig};
    use transform_core::constants::{DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE, MIN_BUFFER_SIZE};
    use transform_core::transform::CompressingStream;
    use transform_core::{ErrorKind, StreamError};

    #[test]
    fn default_uses_default_buffer() {
        assert_eq!(StreamConfig::default().buffer_size, DEFAULT_BUFFER_SIZE);
        assert!(StreamConfig::default().validate().is_ok());
    }

    #[test]
    fn json_round_trip() {
        let config = StreamConfig::with_buffer_size(Some(8192));
        let json = config.to_json().unwrap();
        assert_eq!(StreamConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn json_missing_field_falls_back_to_default() {
        assert_eq!(StreamConfig::from_json_str("{}").unwrap(), StreamConfig::default());
    }

    #[test]
    fn json_out_of_range_is_rejected() {
        let err = StreamConfig::from_json_str(r#"{"buffer_size": 0}"#).unwrap_err();
        assert_eq!(err, ConfigError::BufferSize { have: 0, min: MIN_BUFFER_SIZE, max: MAX_BUFFER_SIZE });
    }

    #[test]
    fn json_garbage_is_malformed() {
        assert!(matches!(StreamConfig::from_json_str("buffer_size=1"), Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn streams_reject_invalid_config() {
        let bad = StreamConfig { buffer_size: MAX_BUFFER_SIZE + 1 };
        let err = match CompressingStream::writer_with_config(Vec::new(), bad) {
            Ok(_) => panic!("oversized buffer accepted"),
            Err(e) => e,
        };
        assert!(matches!(err, StreamError::Config(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
