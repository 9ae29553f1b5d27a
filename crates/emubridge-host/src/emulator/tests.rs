use super::*;
use crate::diagnostics::MemoryDiagnostics;
use emubridge_common::{LogLevel, PhysicalSize};
use emubridge_proxy::{channel, EnginePort, HostCall};
use emubridge_surface::{FixedDisplay, WindowObserver};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Changed,
    Exit(i32),
    Error(String),
    Stdout(String),
}

#[derive(Default)]
struct RecordingHost {
    events: Vec<Event>,
}

impl RecordingHost {
    fn changes(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Changed).count()
    }

    fn stdout(&self) -> String {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Stdout(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl WindowObserver for RecordingHost {
    fn on_window_changed(&mut self) {
        self.events.push(Event::Changed);
    }
}

impl EmulatorHost for RecordingHost {
    fn exit(&mut self, code: i32) {
        self.events.push(Event::Exit(code));
    }

    fn on_error(&mut self, message: &str) {
        self.events.push(Event::Error(message.to_string()));
    }

    fn on_stdout(&mut self, text: &str) {
        self.events.push(Event::Stdout(text.to_string()));
    }
}

type TestEmulator = Emulator<RecordingHost, MemoryDiagnostics>;

fn emulator(scale_factor: f64) -> (TestEmulator, EnginePort) {
    let (worker, port) = channel();
    let emu = Emulator::with_diagnostics(
        worker,
        RecordingHost::default(),
        Box::new(FixedDisplay(scale_factor)),
        MemoryDiagnostics::default(),
    );
    (emu, port)
}

fn frame(method: &str, args: &str) -> String {
    format!("{{\"method\":\"{method}\",\"args\":{args}}}")
}

// =============================================================================
// SIGNALS
// =============================================================================

#[test]
fn error_log_reaches_host_and_sink() {
    let (mut emu, _port) = emulator(1.0);
    emu.handle_frame(&frame("log", "[5, \"boom\"]")).unwrap();

    assert_eq!(emu.host().events, vec![Event::Error("boom".into())]);
    assert_eq!(
        emu.diagnostics().records,
        vec![(LogLevel::Error, "boom".into())]
    );
}

#[test]
fn non_error_logs_stay_in_the_sink() {
    let (mut emu, _port) = emulator(1.0);
    for level in 1..=4 {
        emu.handle_frame(&frame("log", &format!("[{level}, \"m{level}\"]")))
            .unwrap();
    }
    assert!(emu.host().events.is_empty());
    let levels: Vec<LogLevel> = emu.diagnostics().records.iter().map(|r| r.0).collect();
    assert_eq!(
        levels,
        vec![LogLevel::Debug, LogLevel::Log, LogLevel::Info, LogLevel::Warn]
    );
}

#[test]
fn out_of_range_log_level_is_rejected() {
    let (mut emu, _port) = emulator(1.0);
    let err = emu.handle_frame(&frame("log", "[9, \"x\"]")).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Protocol(ProtocolError::LogLevel(9))
    ));
    assert!(emu.diagnostics().records.is_empty());
}

#[test]
fn split_write_decodes_across_calls() {
    let (mut emu, _port) = emulator(1.0);
    let text = "h\u{e9}llo \u{1f30d}";
    let bytes = text.as_bytes();

    emu.write(&bytes[..2]);
    emu.write(&bytes[2..9]);
    emu.write(&bytes[9..]);

    assert_eq!(emu.host().stdout(), text);
    assert!(!emu.host().stdout().contains(char::REPLACEMENT_CHARACTER));
}

#[test]
fn held_back_bytes_do_not_produce_empty_stdout() {
    let (mut emu, _port) = emulator(1.0);
    emu.write(&"\u{20ac}".as_bytes()[..1]);
    assert!(emu.host().events.is_empty());
}

#[test]
fn exit_records_code_and_notifies() {
    let (mut emu, _port) = emulator(1.0);
    assert_eq!(emu.exit_code(), None);
    emu.handle_frame(&frame("exit", "[3]")).unwrap();
    assert_eq!(emu.exit_code(), Some(3));
    assert_eq!(emu.host().events, vec![Event::Exit(3)]);

    // Traffic after exit is still processed.
    emu.handle_frame(&frame("exit", "[0]")).unwrap();
    assert_eq!(emu.exit_code(), Some(0));
}

#[test]
fn exit_flushes_dangling_stdout_bytes() {
    let (mut emu, _port) = emulator(1.0);
    emu.write(b"bye\xe2");
    emu.exit(1);
    assert_eq!(
        emu.host().events,
        vec![
            Event::Stdout("bye".into()),
            Event::Stdout("\u{fffd}".into()),
            Event::Exit(1)
        ]
    );
}

// =============================================================================
// WINDOWS
// =============================================================================

#[test]
fn window_calls_route_to_surfaces() {
    let (mut emu, _port) = emulator(2.0);
    emu.handle_frame(&frame("window_create", "[1]")).unwrap();
    emu.handle_frame(&frame("window_set_title", "[1, \"Paint\"]"))
        .unwrap();
    emu.handle_frame(&frame("window_set_size", "[1, 100, 50]"))
        .unwrap();

    assert_eq!(emu.host().changes(), 3);
    let info = &emu.window_infos()[0];
    assert_eq!(info.title, "Paint");
    assert_eq!(info.physical, PhysicalSize::new(200, 100));
}

#[test]
fn show_paints_without_notifying() {
    let (mut emu, _port) = emulator(1.0);
    emu.window_create(WindowHandle(1)).unwrap();
    emu.window_set_size(WindowHandle(1), 2, 2).unwrap();
    let before = emu.host().changes();

    emu.window_show(WindowHandle(1), &Bitmap::solid(2, 2, [9, 8, 7, 255]))
        .unwrap();
    assert_eq!(emu.host().changes(), before);
    let canvas = emu.windows().get(WindowHandle(1)).unwrap().canvas();
    assert_eq!(canvas.pixel(1, 1), Some([9, 8, 7, 255]));
}

#[test]
fn unknown_window_is_a_protocol_error() {
    let (mut emu, _port) = emulator(1.0);
    let err = emu
        .handle_frame(&frame("window_set_title", "[4, \"x\"]"))
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Protocol(ProtocolError::UnknownWindow(WindowHandle(4)))
    ));
    assert!(emu.windows().is_empty());
}

#[test]
fn huge_bitmap_dimensions_are_a_protocol_error() {
    let (mut emu, _port) = emulator(1.0);
    emu.handle_frame(&frame("window_create", "[1]")).unwrap();
    emu.handle_frame(&frame("window_set_size", "[1, 4, 4]"))
        .unwrap();

    for (w, h) in [(2147483648u64, 2147483648u64), (4294967295, 4294967295), (9000, 9000)] {
        let show = frame(
            "window_show",
            &format!("[1, {{\"width\":{w},\"height\":{h},\"data\":\"\"}}]"),
        );
        let err = emu.handle_frame(&show).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Protocol(ProtocolError::SurfaceTooLarge { .. })
        ));
    }
    // Dimensions past u32 are rejected while reading the argument.
    let err = emu
        .handle_frame(&frame(
            "window_show",
            "[1, {\"width\":4294967296,\"height\":1,\"data\":\"\"}]",
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Protocol(ProtocolError::BadArgument { .. })
    ));
    let canvas = emu.windows().get(WindowHandle(1)).unwrap().canvas();
    assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn huge_window_size_is_a_protocol_error() {
    let (mut emu, _port) = emulator(2.0);
    emu.handle_frame(&frame("window_create", "[1]")).unwrap();
    emu.handle_frame(&frame("window_set_size", "[1, 10, 5]"))
        .unwrap();
    let changes = emu.host().changes();

    for args in ["[1, 4294967295, 4294967295]", "[1, 5000, 5000]", "[1, 2147483648, 3]"] {
        let err = emu.handle_frame(&frame("window_set_size", args)).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Protocol(ProtocolError::SurfaceTooLarge { .. })
        ));
    }
    assert_eq!(emu.host().changes(), changes);
    assert_eq!(emu.window_infos()[0].physical, PhysicalSize::new(20, 10));
}

#[test]
fn unknown_method_is_rejected() {
    let (mut emu, _port) = emulator(1.0);
    let err = emu.handle_frame(&frame("window_maximize", "[1]")).unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Protocol(ProtocolError::UnknownMethod(_))
    ));
}

// =============================================================================
// CHANNEL
// =============================================================================

#[tokio::test]
async fn start_reaches_the_engine() {
    let (emu, mut port) = emulator(1.0);
    emu.start().unwrap();
    assert_eq!(port.recv().await.unwrap().unwrap(), HostCall::Start);
}

#[tokio::test]
async fn run_processes_in_order_until_close() {
    let (mut emu, port) = emulator(1.0);
    port.send(&EngineCall::WindowCreate {
        handle: WindowHandle(1),
    })
    .unwrap();
    port.send(&EngineCall::Write {
        bytes: b"out".to_vec(),
    })
    .unwrap();
    port.send(&EngineCall::Exit { code: 0 }).unwrap();
    drop(port);

    emu.run().await.unwrap();
    assert_eq!(
        emu.host().events,
        vec![
            Event::Changed,
            Event::Stdout("out".into()),
            Event::Exit(0)
        ]
    );
}

#[tokio::test]
async fn run_stops_at_first_protocol_error() {
    let (mut emu, port) = emulator(1.0);
    port.post(frame("window_create", "[1]")).unwrap();
    port.post(frame("window_create", "[1]")).unwrap();
    port.post(frame("exit", "[0]")).unwrap();
    drop(port);

    let err = emu.run().await.unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Protocol(ProtocolError::DuplicateWindow(WindowHandle(1)))
    ));
    // The exit queued behind the bad call was never handled.
    assert_eq!(emu.exit_code(), None);
    assert_eq!(emu.pump().unwrap(), 1);
    assert_eq!(emu.exit_code(), Some(0));
}

#[tokio::test]
async fn host_restarts_engine_after_callback_returns() {
    #[derive(Default)]
    struct RestartingHost {
        restart_requested: bool,
    }
    impl WindowObserver for RestartingHost {
        fn on_window_changed(&mut self) {}
    }
    impl EmulatorHost for RestartingHost {
        fn exit(&mut self, _code: i32) {
            self.restart_requested = true;
        }
        fn on_error(&mut self, _message: &str) {}
        fn on_stdout(&mut self, _text: &str) {}
    }

    let (worker, mut port) = channel();
    let mut emu = Emulator::new(
        worker,
        RestartingHost::default(),
        Box::new(FixedDisplay::default()),
    );
    port.send(&EngineCall::Exit { code: 2 }).unwrap();
    assert_eq!(emu.pump().unwrap(), 1);

    if std::mem::take(&mut emu.host_mut().restart_requested) {
        emu.start().unwrap();
    }
    assert_eq!(port.recv().await.unwrap().unwrap(), HostCall::Start);
    assert!(!emu.host().restart_requested);
}

#[tokio::test]
async fn init_worker_discards_ready_frame() {
    let worker = init_worker(|port| {
        port.post("ready".into()).unwrap();
        port.send(&EngineCall::Exit { code: 7 }).unwrap();
    })
    .await
    .unwrap();

    let mut emu = Emulator::new(
        worker,
        RecordingHost::default(),
        Box::new(FixedDisplay::default()),
    );
    emu.run().await.unwrap();
    assert_eq!(emu.host().events, vec![Event::Exit(7)]);
}

#[tokio::test]
async fn init_worker_fails_if_engine_never_reports() {
    let result = init_worker(drop).await;
    assert!(matches!(result, Err(BridgeError::ChannelClosed)));
}

#[tokio::test]
async fn init_worker_with_engine_on_a_task() {
    let worker = init_worker(|mut port| {
        tokio::spawn(async move {
            port.post("{}".into()).unwrap();
            if let Some(Ok(HostCall::Start)) = port.recv().await {
                port.send(&EngineCall::Exit { code: 0 }).unwrap();
            }
        });
    })
    .await
    .unwrap();

    let mut emu = Emulator::new(
        worker,
        RecordingHost::default(),
        Box::new(FixedDisplay::default()),
    );
    emu.start().unwrap();
    emu.run().await.unwrap();
    assert_eq!(emu.exit_code(), Some(0));
}
