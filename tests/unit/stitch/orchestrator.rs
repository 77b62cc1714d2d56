use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    prefs::StitchPreferences,
    source::MemorySource,
    surface::CpuSurfaceProvider,
};

#[derive(Debug, PartialEq)]
enum Event {
    Loading(bool),
    Error(String),
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Reporter for Recorder {
    fn show_content_loading(&self, loading: bool) {
        self.0.borrow_mut().push(Event::Loading(loading));
    }

    fn show_error(&self, error: &StitchError) {
        self.0.borrow_mut().push(Event::Error(error.to_string()));
    }
}

fn request(w: u32, h: u32) -> StitchRequest {
    StitchRequest {
        selected_scale: 1.0,
        result_width: w,
        result_height: h,
        format: OutputFormat::Jpeg,
        quality: 80,
    }
}

fn stitcher(prefs: StitchPreferences, images: Vec<Raster>, rec: &Recorder) -> Stitcher {
    StitchEngine::new(
        Arc::new(CpuSurfaceProvider::default()),
        Arc::new(prefs),
        StitcherOpts::default(),
    )
    .setup(Box::new(MemorySource::new(images)), Box::new(rec.clone()))
}

#[test]
fn result_constructors_hold_invariant() {
    let f = ProcessingResult::failed();
    assert_eq!(f.status, StitchStatus::Failed);
    assert_eq!(f.processed_count, 0);
    assert!(f.output.is_none() && f.format.is_none() && f.quality.is_none());
    assert!(!f.is_success());

    let e = ProcessingResult::empty();
    assert_eq!(e.status, StitchStatus::Empty);
    assert!(e.output.is_none());
}

#[tokio::test]
async fn success_echoes_format_and_toggles_loading() {
    let rec = Recorder::default();
    let prefs = StitchPreferences {
        stack_horizontally: true,
        ..StitchPreferences::default()
    };
    let mut s = stitcher(
        prefs,
        vec![Raster::filled(6, 4, [1, 2, 3, 255]), Raster::filled(6, 4, [1, 2, 3, 255])],
        &rec,
    );

    let r = s.stitch(request(12, 4)).await;
    assert!(r.is_success());
    assert_eq!(r.processed_count, 2);
    assert_eq!(r.format, Some(OutputFormat::Jpeg));
    assert_eq!(r.quality, Some(80));
    let out = r.output.unwrap();
    assert_eq!((out.width(), out.height()), (12, 4));
    assert_eq!(
        *rec.0.borrow(),
        vec![Event::Loading(true), Event::Loading(false)]
    );
}

#[tokio::test]
async fn empty_source_is_distinguished_from_failure() {
    let rec = Recorder::default();
    let mut s = stitcher(StitchPreferences::default(), Vec::new(), &rec);

    let r = s.stitch(request(4, 4)).await;
    assert_eq!(r.status, StitchStatus::Empty);
    assert_eq!(r.processed_count, 0);
    assert!(r.output.is_none());
    assert!(rec.0.borrow().iter().all(|e| matches!(e, Event::Loading(_))));
}

#[tokio::test]
async fn invalid_request_goes_through_failure_path() {
    let rec = Recorder::default();
    let mut s = stitcher(
        StitchPreferences::default(),
        vec![Raster::filled(2, 2, [0, 0, 0, 255])],
        &rec,
    );

    let r = s.stitch(request(0, 4)).await;
    assert_eq!(r.status, StitchStatus::Failed);
    let events = rec.0.borrow();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], Event::Loading(true));
    assert_eq!(events[1], Event::Loading(false));
    assert!(matches!(&events[2], Event::Error(msg) if msg.contains("validation error")));
}

#[tokio::test]
async fn consecutive_stitches_process_the_full_sequence() {
    let rec = Recorder::default();
    let mut s = stitcher(
        StitchPreferences::default(),
        vec![Raster::filled(4, 2, [9, 9, 9, 255]), Raster::filled(4, 2, [9, 9, 9, 255])],
        &rec,
    );

    let a = s.stitch(request(4, 4)).await;
    let b = s.stitch(request(4, 4)).await;
    assert_eq!(a.processed_count, 2);
    assert_eq!(b.processed_count, 2);
    assert_eq!(a.placements, b.placements);
    assert_eq!(a.output, b.output);

    let source = s.into_source().unwrap();
    assert_eq!(source.position(), 2);
}
