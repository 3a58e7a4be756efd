use super::*;

fn frame(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: vec![0; (w * h * 4) as usize],
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_keeps_frames_and_delays() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        frame_count: 2,
    })
    .unwrap();
    sink.push_frame(0, frame(2, 2), 800).unwrap();
    sink.push_frame(1, frame(2, 2), 0).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.delays_ms(), vec![800, 0]);
    assert!(sink.is_finished());
}

#[test]
fn in_memory_sink_rejects_out_of_order_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
        frame_count: 2,
    })
    .unwrap();
    assert!(sink.push_frame(1, frame(1, 1), 10).is_err());
}

#[test]
fn check_frame_validates_size_and_length() {
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        frame_count: 1,
    };
    assert!(check_frame(&cfg, &frame(2, 2)).is_ok());
    assert!(check_frame(&cfg, &frame(3, 2)).is_err());
    let mut short = frame(2, 2);
    short.data.pop();
    assert!(check_frame(&cfg, &short).is_err());
}
