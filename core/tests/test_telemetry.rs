#[cfg(test)]
mod telemetry_tests {
    use std::io::{Cursor, Write};

    use transform_core::compression::compress;
    use transform_core::resource::{encode_record, KeyedResourceReader};
    use transform_core::telemetry::{TelemetryCounters, TelemetrySnapshot};
    use transform_core::transform::{ByteStream, CompressingStream};

    fn make_counters() -> TelemetryCounters {
        TelemetryCounters {
            bytes_plain: 100,
            bytes_encoded: 40,
            records: 20,
            read_calls: 3,
            write_calls: 0,
        }
    }

// # 1. Counter arithmetic

    #[test]
    fn merge_and_add_assign_sum_fields() {
        let mut a = make_counters();
        a.merge(&make_counters());
        assert_eq!(a.bytes_plain, 200);
        assert_eq!(a.records, 40);

        let mut b = make_counters();
        b += make_counters();
        assert_eq!(a, b);
    }

    #[test]
    fn add_write_derives_records_from_encoded_len() {
        let mut c = TelemetryCounters::default();
        c.add_write(300, 4);
        assert_eq!(c.write_calls, 1);
        assert_eq!(c.bytes_plain, 300);
        assert_eq!(c.bytes_encoded, 4);
        assert_eq!(c.records, 2);
    }

// # 2. Snapshots

    #[test]
    fn snapshot_copies_counters_and_ratio() {
        let snap = TelemetrySnapshot::from(&make_counters());
        assert_eq!(snap.bytes_plain, 100);
        assert_eq!(snap.read_calls, 3);
        assert!((snap.compression_ratio - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn ratio_is_zero_without_plain_bytes() {
        let snap = TelemetrySnapshot::from(&TelemetryCounters::default());
        assert_eq!(snap.compression_ratio, 0.0);
    }

    #[test]
    fn ratio_is_not_capped() {
        // "ab" costs four record bytes.
        let mut c = TelemetryCounters::default();
        c.add_write(2, 4);
        assert_eq!(TelemetrySnapshot::from(&c).compression_ratio, 2.0);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let json = TelemetrySnapshot::from(&make_counters()).to_json().unwrap();
        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TelemetrySnapshot::from(&make_counters()));
    }

// # 3. Counters driven by the streams

    #[test]
    fn writer_counts_each_call() {
        let mut w = CompressingStream::writer(Vec::new());
        w.write_bytes(&[5u8; 6]).unwrap();
        w.write_all(b"ab").unwrap();

        let c = w.counters();
        assert_eq!(c.write_calls, 2);
        assert_eq!(c.bytes_plain, 8);
        assert_eq!(c.bytes_encoded, 6);
        assert_eq!(c.records, 3);
        assert_eq!(c.read_calls, 0);
    }

    #[test]
    fn reader_counts_pulled_and_returned_bytes() {
        let wire = compress(&[1u8; 600]);
        let mut r = CompressingStream::reader(Cursor::new(wire));
        let mut buf = [0u8; 1000];
        assert_eq!(r.read_bytes(&mut buf).unwrap(), 600);
        assert_eq!(r.read_bytes(&mut buf).unwrap(), 0);

        let snap = r.snapshot();
        assert_eq!(snap.read_calls, 2);
        assert_eq!(snap.bytes_plain, 600);
        assert_eq!(snap.bytes_encoded, 6);
        assert_eq!(snap.records, 3);
    }

    #[test]
    fn resource_reader_counts_wire_and_value_bytes() {
        let wire = [encode_record("pad", b"....").unwrap(), encode_record("k", b"\0v").unwrap()].concat();
        let total = wire.len() as u64;
        let mut r = KeyedResourceReader::new(Cursor::new(wire), "k").unwrap();
        assert_eq!(r.read_value_to_end().unwrap(), b"\0v");

        let snap = r.snapshot();
        assert_eq!(snap.bytes_encoded, total);
        assert_eq!(snap.bytes_plain, 2);
        assert_eq!(snap.records, 1);
    }
}
