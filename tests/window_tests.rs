use leekling::engine::window::VolumeWindow;

#[test]
fn average_tracks_partial_fill() {
    let mut w = VolumeWindow::new(4);
    assert_eq!(w.average(), 0.0);
    w.push(8.0);
    assert!((w.average() - 8.0).abs() < f64::EPSILON);
    w.push(16.0);
    assert!((w.average() - 12.0).abs() < f64::EPSILON);
    assert_eq!(w.len(), 2);
    assert!(!w.is_full());
}

#[test]
fn push_returns_the_post_insert_average() {
    let mut w = VolumeWindow::new(3);
    assert!((w.push(3.0) - 3.0).abs() < f64::EPSILON);
    assert!((w.push(9.0) - 6.0).abs() < f64::EPSILON);
    assert!((w.push(6.0) - 6.0).abs() < f64::EPSILON);
}

#[test]
fn capacity_bounds_hold_under_churn() {
    let mut w = VolumeWindow::new(5);
    for i in 0..1_000 {
        w.push(i as f64);
        assert!(w.len() <= 5);
    }
    assert!(w.is_full());
    // Last five values: 995..=999.
    assert!((w.average() - 997.0).abs() < 1e-9);
}

#[test]
fn eviction_is_strictly_fifo() {
    let mut w = VolumeWindow::new(3);
    w.push(1.0);
    w.push(2.0);
    w.push(3.0);
    // 1.0 leaves, [2, 3, 10] remains.
    assert!((w.push(10.0) - 5.0).abs() < f64::EPSILON);
    // 2.0 leaves, [3, 10, 20] remains.
    assert!((w.push(20.0) - 11.0).abs() < f64::EPSILON);
}
