//! Tests for the diagnostics emitted through `tracing`.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use hermite_curves::{Curve, CurveError, KeyFrame, Point, Segment};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// Run `f` with a TRACE-level subscriber and return everything it logged.
fn capture<F: FnOnce()>(f: F) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.contents()
}

fn unit_segment() -> Segment {
    Segment {
        start: Point::new(0.0, 0.0),
        cp1: Point::new(0.25, 0.2),
        cp2: Point::new(0.75, 0.8),
        end: Point::new(1.0, 1.0),
    }
}

#[test]
fn test_root_fallback_logs_warning() {
    let segment = unit_segment();
    let mut t = f64::NAN;
    let logs = capture(|| t = segment.solve_parameter(5.0));

    assert!(t.abs() < f64::EPSILON);
    assert!(logs.contains("WARN"), "logs: {}", logs);
    assert!(logs.contains("falling back to t = 0"), "logs: {}", logs);
}

#[test]
fn test_try_solve_does_not_log() {
    let segment = unit_segment();
    let mut result = Ok(0.0);
    let logs = capture(|| result = segment.try_solve_parameter(5.0));

    assert_eq!(result, Err(CurveError::NoRootInRange { x: 5.0 }));
    assert!(!logs.contains("WARN"), "logs: {}", logs);
}

#[test]
fn test_keyframe_replacement_logged_at_debug() -> Result<(), CurveError> {
    let mut outcome = Ok(());
    let logs = capture(|| {
        let mut curve = Curve::new();
        outcome = curve.set_keyframes([
            KeyFrame::new(0.0, 0.0),
            KeyFrame::new(1.0, 1.0),
            KeyFrame::new(2.0, 0.0),
        ]);
    });
    outcome?;

    assert!(logs.contains("DEBUG"), "logs: {}", logs);
    assert!(logs.contains("Keyframes replaced"), "logs: {}", logs);
    assert!(logs.contains("keyframes=3"), "logs: {}", logs);
    Ok(())
}

#[test]
fn test_control_points_recomputed_once() -> Result<(), CurveError> {
    let curve = Curve::from_keyframes([KeyFrame::new(0.0, 0.0), KeyFrame::new(1.0, 1.0)])?;
    let logs = capture(|| {
        for i in 1..10 {
            let _ = curve.evaluate(f64::from(i) / 10.0);
        }
    });

    assert_eq!(logs.matches("Recomputing control points").count(), 1, "logs: {}", logs);
    Ok(())
}

#[test]
fn test_in_range_evaluation_is_quiet() -> Result<(), CurveError> {
    let curve = Curve::ease_in_out(0.0, 0.0, 1.0, 1.0)?;
    let _ = curve.segments();
    let logs = capture(|| {
        for i in 0..=10 {
            let _ = curve.evaluate(f64::from(i) / 10.0);
        }
    });

    assert!(logs.is_empty(), "logs: {}", logs);
    Ok(())
}
