//! Integration tests for elasto-telemetry.

use elasto_telemetry::bus::EventBus;
use elasto_telemetry::events::{EventKind, SimulationEvent};
use elasto_telemetry::sinks::{EventSink, TracingSink, VecSink};

fn begin(frame: u32) -> SimulationEvent {
    SimulationEvent::new(frame, EventKind::FrameBegin { sim_time: frame as f64 / 60.0 })
}

#[test]
fn emit_and_flush() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(sink.clone());

    bus.emit(begin(0));
    bus.emit(SimulationEvent::new(
        0,
        EventKind::FrameEnd {
            substeps: 40,
            wall_time: 0.001,
        },
    ));
    assert!(sink.is_empty());

    assert_eq!(bus.flush(), 2);

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], begin(0));
    assert_eq!(events[1].label(), "frame_end");
}

#[test]
fn disabled_bus_drops_events() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(sink.clone());
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit(begin(0));
    assert_eq!(bus.flush(), 0);
    assert!(sink.is_empty());
}

#[test]
fn every_sink_sees_every_event() {
    let a = VecSink::new();
    let b = VecSink::new();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(a.clone()));
    bus.add_sink(Box::new(b.clone()));
    bus.add_sink(Box::new(TracingSink::default()));
    assert_eq!(bus.sink_count(), 3);
    assert_eq!(bus.sink_names(), vec!["vec_sink", "vec_sink", "tracing_sink"]);

    for frame in 0..5 {
        bus.emit(begin(frame));
    }
    bus.finalize();

    assert_eq!(a.len(), 5);
    assert_eq!(a.events(), b.events());
}

#[test]
fn sender_outlives_borrow() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(sink.clone());

    let sender = bus.sender();
    let mut observe = |iteration: u32| {
        let _ = sender.send(SimulationEvent::new(
            0,
            EventKind::MesherIteration {
                iteration,
                vertex_count: 40,
                triangle_count: 62,
            },
        ));
    };
    observe(0);
    observe(1);

    bus.flush();
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.label() == "mesher_iteration"));
}

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::Contact {
            contact_count: 3,
            max_penetration: 0.002,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn custom_event_carries_json() {
    let event = SimulationEvent::custom(2, "sag", &[0.1f32, -0.25]).unwrap();
    assert_eq!(event.label(), "sag");
    match event.kind {
        EventKind::Custom { payload, .. } => assert_eq!(payload, "[0.1,-0.25]"),
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn tracing_sink_handles_fracture() {
    let mut sink = TracingSink::new(tracing::Level::TRACE);
    sink.handle(&SimulationEvent::new(
        1,
        EventKind::Fracture {
            count: 2,
            max_stress: 9000.0,
        },
    ));
    sink.handle(&SimulationEvent::new(1, EventKind::Energy { kinetic: 0.5 }));
    assert_eq!(sink.name(), "tracing_sink");
}
