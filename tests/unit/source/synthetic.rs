use super::*;

fn res() -> Resolution {
    Resolution::new(16, 8).unwrap()
}

#[test]
fn capture_tags_frames_with_counter() {
    let mut src = SyntheticSource::new();
    let mut f = Frame::new(Resolution::new(1, 1).unwrap());
    for n in 0..3u8 {
        src.capture_into(res(), &mut f).unwrap();
        assert_eq!(f.resolution(), res());
        assert_eq!(f.pixel(0, 0)[0], n);
        assert_eq!(f.pixel(0, 0)[3], 255);
    }
    assert_eq!(src.captured(), 3);
}

#[test]
fn warmup_reports_unavailable_then_recovers() {
    let mut src = SyntheticSource::new().with_warmup(2);
    let mut f = Frame::new(res());
    assert!(!src.is_ready());
    assert!(matches!(
        src.capture_into(res(), &mut f),
        Err(TrailError::SourceUnavailable(_))
    ));
    assert!(src.capture_into(res(), &mut f).is_err());
    assert!(src.is_ready());
    assert!(src.capture_into(res(), &mut f).is_ok());
}

#[test]
fn dropouts_fail_only_listed_attempts() {
    let mut src = SyntheticSource::new().with_dropouts([1, 2]);
    let mut f = Frame::new(res());
    let results: Vec<bool> = (0..5)
        .map(|_| src.capture_into(res(), &mut f).is_ok())
        .collect();
    assert_eq!(results, vec![true, false, false, true, true]);
    assert_eq!(src.captured(), 3);
}

#[test]
fn capture_is_reproducible() {
    let mut a = SyntheticSource::new();
    let mut b = SyntheticSource::new();
    let mut fa = Frame::new(res());
    let mut fb = Frame::new(res());
    for _ in 0..4 {
        a.capture_into(res(), &mut fa).unwrap();
        b.capture_into(res(), &mut fb).unwrap();
    }
    assert_eq!(fa, fb);
}
