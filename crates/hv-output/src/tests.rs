//! Integration tests for hv-output.

#[cfg(test)]
mod csv_tests {
    use std::sync::Arc;

    use hv_core::{CorridorConfig, Direction, MoverId, PauseMode};
    use hv_path::{CorridorBuilder, Mover, PositionSink};
    use tempfile::TempDir;

    use crate::csv::CsvSink;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_rows(path: &std::path::Path) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn header_written_on_create() {
        let dir = tmp();
        let path = dir.path().join("positions.csv");
        let sink = CsvSink::create(&path).unwrap();
        sink.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["mover_id", "lane", "depth"]);
        assert_eq!(sink.rows_written(), 0);
    }

    #[test]
    fn updates_become_rows() {
        let dir = tmp();
        let path = dir.path().join("positions.csv");
        let sink = CsvSink::create(&path).unwrap();
        sink.on_position_update(MoverId(2), 1, 0);
        sink.on_position_update(MoverId(5), 0, 3);
        sink.on_leave(MoverId(2));
        sink.finish().unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "2"); // mover_id
        assert_eq!(&rows[0][1], "1"); // lane
        assert_eq!(&rows[0][2], "0"); // depth
        assert_eq!(&rows[1][0], "5");
        assert_eq!(&rows[1][2], "3");
        assert_eq!(sink.rows_written(), 2);
        assert!(sink.take_error().is_none());
    }

    #[test]
    fn finish_is_idempotent_and_closes_the_sink() {
        let dir = tmp();
        let path = dir.path().join("positions.csv");
        let sink = CsvSink::create(&path).unwrap();
        sink.on_position_update(MoverId(0), 0, 0);
        sink.finish().unwrap();
        sink.finish().unwrap();
        sink.on_position_update(MoverId(0), 0, 1);
        assert_eq!(sink.rows_written(), 1);
        assert_eq!(read_rows(&path).len(), 1);
    }

    #[test]
    fn missing_directory_fails_on_create() {
        let dir = tmp();
        let path = dir.path().join("no_such_dir").join("positions.csv");
        assert!(CsvSink::create(&path).is_err());
    }

    #[test]
    fn records_a_full_corridor_run() {
        let dir = tmp();
        let path = dir.path().join("run.csv");
        let sink = Arc::new(CsvSink::create(&path).unwrap());

        let config = CorridorConfig {
            path_size:       4,
            lane_capacity:   2,
            required_movers: 1,
            max_steps:       1,
            max_delay_ms:    0,
            timeout_ms:      0,
            mover_capacity:  8,
            seed:            3,
            pause_mode:      PauseMode::Release,
        };
        let corridor = CorridorBuilder::new()
            .config(config)
            .sink(Arc::clone(&sink))
            .build()
            .unwrap();

        let mut m = Mover::new(MoverId(1), 11);
        corridor.enter(&mut m).unwrap();
        corridor.advance(&mut m).unwrap();
        m.heading(Direction::Reverse);
        corridor.enter(&mut m).unwrap();
        corridor.advance(&mut m).unwrap();
        sink.finish().unwrap();

        let depths: Vec<String> = read_rows(&path).iter().map(|r| r[2].to_owned()).collect();
        assert_eq!(depths, ["0", "1", "2", "3", "3", "2", "1", "0"]);
    }
}

#[cfg(test)]
mod message_tests {
    use hv_core::MoverId;

    use crate::{OutputError, PresentMessage};

    #[test]
    fn formats_as_wire_text() {
        let msg = PresentMessage::new(MoverId(7), 2, 9);
        assert_eq!(msg.to_string(), "presentInPath;7;2;9");
    }

    #[test]
    fn parses_wire_text() {
        let msg: PresentMessage = "presentInPath;12;0;4\n".parse().unwrap();
        assert_eq!(msg, PresentMessage::new(MoverId(12), 0, 4));
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in [
            "",
            "present;1;2;3",
            "presentInPath;1;2",
            "presentInPath;1;2;3;4",
            "presentInPath;x;2;3",
            "presentInPath;1;-2;3",
            "presentInPath;99999999999;0;0",
        ] {
            let err = bad.parse::<PresentMessage>().unwrap_err();
            assert!(matches!(err, OutputError::Message { .. }), "{bad:?} gave {err}");
        }
    }
}

#[cfg(test)]
mod channel_tests {
    use std::sync::Arc;
    use std::thread;

    use hv_core::{CorridorConfig, MoverId};
    use hv_path::{CorridorBuilder, Mover, PositionSink};

    use crate::{ChannelSink, PresentMessage, TracingSink};

    #[test]
    fn forwards_updates_in_order() {
        let (sink, rx) = ChannelSink::new();
        sink.on_position_update(MoverId(1), 0, 0);
        sink.on_position_update(MoverId(1), 1, 1);
        drop(sink);

        let got: Vec<PresentMessage> = rx.iter().collect();
        assert_eq!(got, [PresentMessage::new(MoverId(1), 0, 0), PresentMessage::new(MoverId(1), 1, 1)]);
    }

    #[test]
    fn closed_receiver_is_ignored() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.on_position_update(MoverId(0), 0, 0);
    }

    #[test]
    fn presentation_thread_sees_every_move() {
        let (sink, rx) = ChannelSink::new();
        let config = CorridorConfig {
            path_size:       5,
            lane_capacity:   1,
            required_movers: 1,
            max_steps:       1,
            max_delay_ms:    0,
            timeout_ms:      0,
            ..CorridorConfig::default()
        };
        let corridor = Arc::new(CorridorBuilder::new().config(config).sink(sink).build().unwrap());

        let ui = thread::spawn(move || rx.iter().map(|m| m.to_string()).collect::<Vec<_>>());

        let mut m = Mover::new(MoverId(4), 0);
        corridor.enter(&mut m).unwrap();
        corridor.advance(&mut m).unwrap();
        drop(corridor);

        let lines = ui.join().unwrap();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "presentInPath;4;0;0");
        assert_eq!(lines[4], "presentInPath;4;0;4");
    }

    #[test]
    fn tracing_sink_accepts_updates() {
        let sink = TracingSink;
        sink.on_position_update(MoverId(0), 1, 2);
        sink.on_leave(MoverId(0));
    }
}
