use crate::*;

use std::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_i64(&mut self) -> i64 {
        self.next_u64() as i64
    }

    fn gen_f64(&mut self, start: f64, end: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        start + (end - start) * unit
    }
}

const INSIDE: Point = Point { x: 10.0, y: 10.0 };
const OUTSIDE: Point = Point { x: 10.0, y: 900.0 };

fn bounds(slot: f64) -> Rect {
    Rect::new(0.0, 0.0, 800.0, slot)
}

fn engine_with(n: usize, slot: f64, options: CarouselOptions) -> Engine<usize> {
    let mut e = Engine::new((0..n).collect(), options).unwrap();
    e.on_resize(bounds(slot));
    e
}

fn engine(n: usize, slot: f64, buffer: usize) -> Engine<usize> {
    engine_with(n, slot, CarouselOptions::new().with_buffer_size(buffer))
}

/// Ticks at 60fps from `from` (exclusive) through `to` (inclusive); returns the last time.
fn run(e: &mut Engine<usize>, from: u64, to: u64) -> u64 {
    let mut now = from;
    while now + 16 <= to {
        now += 16;
        e.tick(now);
    }
    now
}

fn primary_indices(e: &Engine<usize>) -> Vec<VirtualIndex> {
    let mut out = Vec::new();
    e.for_each_transform(|t| {
        if t.surface == Surface::Primary {
            out.push(t.index);
        }
    });
    out
}

#[test]
fn empty_items_fail_at_construction() {
    let err = Engine::<u8>::new(Vec::new(), CarouselOptions::new()).unwrap_err();
    assert_eq!(err, CarouselError::EmptyItems);
    assert!(ItemRing::<u8>::new(Vec::new()).is_err());
}

#[test]
fn invalid_options_are_rejected() {
    let cases = [
        CarouselOptions::new().with_lerp_factor(0.0),
        CarouselOptions::new().with_lerp_factor(1.5),
        CarouselOptions::new().with_drag_multiplier(1.0),
        CarouselOptions::new().with_snap_duration_ms(0),
        CarouselOptions::new().with_max_velocity(f64::NAN),
        CarouselOptions::new().with_minimap_slot_size(0.0),
        CarouselOptions::new().with_buffer_size(MAX_BUFFER_SIZE + 1),
    ];
    for options in cases {
        let err = Engine::new(vec![1], options.clone()).unwrap_err();
        assert!(
            matches!(err, CarouselError::InvalidOption { .. }),
            "{options:?} -> {err:?}"
        );
    }
    assert!(CarouselOptions::new().validate().is_ok());
    assert!(CarouselOptions::compact().validate().is_ok());
}

#[test]
fn compact_mode_only_changes_minimap_geometry() {
    let wide = CarouselOptions::new();
    let compact = CarouselOptions::compact();
    assert_eq!(wide.minimap_slot(), 250.0);
    assert_eq!(compact.minimap_slot(), 180.0);
    assert_eq!(compact.clone().with_minimap_slot_size(90.0).minimap_slot(), 90.0);

    let mut a = Engine::new(vec![0, 1, 2], wide).unwrap();
    let mut b = Engine::new(vec![0, 1, 2], compact).unwrap();
    for e in [&mut a, &mut b] {
        e.on_resize(bounds(400.0));
        e.on_wheel(100.0, INSIDE, 0);
        e.tick(16);
    }
    assert_eq!(a.scroll_state(), b.scroll_state());
    assert_eq!(a.visible_range(), b.visible_range());
    assert_eq!(b.geometry().slot(Surface::Caption), 180.0);
}

#[test]
fn circular_mapping_is_periodic_and_total() {
    let ring = ItemRing::new(vec!['a', 'b', 'c', 'd', 'e']).unwrap();
    let n = ring.len() as i64;
    let mut rng = Lcg::new(7);
    for _ in 0..10_000 {
        let i = rng.gen_i64() / 2;
        assert_eq!(ring.item_at(i), ring.item_at(i + n), "i={i}");
        assert_eq!(ring.label_of(i), ring.label_of(i - n), "i={i}");
    }
    assert_eq!(*ring.item_at(-1), 'e');
    assert_eq!(*ring.item_at(5), 'a');
    for i in [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX - 1, i64::MAX] {
        assert!(ring.wrap(i) < ring.len());
        let label = ring.label_of(i);
        assert_eq!(label.len(), 2);
    }
}

#[test]
fn mirrored_mapping_matches_abs_formula() {
    let items: Vec<usize> = (0..7).collect();
    let ring = ItemRing::with_mapping(items, IndexMapping::Mirrored).unwrap();
    let n = 7i64;
    for i in -200i64..200 {
        let expected = (((i.abs() % n) + n) % n) as usize;
        assert_eq!(*ring.item_at(i), expected, "i={i}");
        assert_eq!(ring.item_at(i), ring.item_at(-i));
    }
    // Periodic on each side of zero.
    for i in 0i64..100 {
        assert_eq!(ring.item_at(i), ring.item_at(i + n));
        assert_eq!(ring.item_at(-i), ring.item_at(-i - n));
    }
    assert!(ring.wrap(i64::MIN) < 7);
}

#[test]
fn labels_are_one_based_and_zero_padded() {
    let ring = ItemRing::new((0..120).collect::<Vec<_>>()).unwrap();
    assert_eq!(ring.label_of(0), "01");
    assert_eq!(ring.label_of(8), "09");
    assert_eq!(ring.label_of(11), "12");
    assert_eq!(ring.label_of(99), "100");
    assert_eq!(ring.label_of(-1), "120");
    assert_eq!(ring.label_of(120), "01");
}

#[test]
fn motion_converges_monotonically_without_overshoot() {
    let m = MotionIntegrator::new(0.05, 0.01, DragPolicy::Smooth);
    for (start, target) in [(0.0, -90.0), (-90.0, 0.0), (1234.5, -4000.0), (3.0, 3.005)] {
        let bound = m.steps_to_settle(target - start);
        let mut current = start;
        let mut steps = 0u64;
        while current != target {
            let next = m.step(current, target, false);
            assert!(
                (target - next).abs() < (target - current).abs(),
                "not approaching: {current} -> {next} (target {target})"
            );
            assert!(
                (next - current).signum() == (target - current).signum(),
                "overshoot: {current} -> {next} (target {target})"
            );
            current = next;
            steps += 1;
            assert!(steps <= bound, "did not settle within {bound} steps");
        }
        // At rest it stays put.
        assert_eq!(m.step(current, target, false), target);
    }
}

#[test]
fn drag_policies_are_applied_while_dragging() {
    let smooth = MotionIntegrator::new(0.05, 0.01, DragPolicy::Smooth);
    let follow = MotionIntegrator::new(0.05, 0.01, DragPolicy::Follow);
    let hold = MotionIntegrator::new(0.05, 0.01, DragPolicy::Hold);
    assert_eq!(smooth.step(0.0, -100.0, true), -5.0);
    assert_eq!(follow.step(0.0, -100.0, true), -100.0);
    assert_eq!(hold.step(0.0, -100.0, true), 0.0);
    for m in [smooth, follow, hold] {
        assert_eq!(m.step(0.0, -100.0, false), -5.0);
    }
}

#[test]
fn follow_policy_tracks_drag_one_to_one() {
    let mut e = engine_with(
        5,
        400.0,
        CarouselOptions::new().with_drag_policy(DragPolicy::Follow),
    );
    e.on_touch_start(Point::new(10.0, 300.0), 0);
    e.on_touch_move(Point::new(10.0, 200.0), 10);
    e.tick(16);
    assert_eq!(e.current_offset(), -150.0);
    assert_eq!(e.current_offset(), e.target_offset());
}

#[test]
fn ease_out_cubic_shape() {
    assert_eq!(Easing::EaseOutCubic.sample(0.0), 0.0);
    assert_eq!(Easing::EaseOutCubic.sample(0.5), 0.875);
    assert_eq!(Easing::EaseOutCubic.sample(1.0), 1.0);

    let t = Tween::new(-90.0, 0.0, 100, 500, Easing::EaseOutCubic);
    assert_eq!(t.sample(100), -90.0);
    assert_eq!(t.sample(350), -90.0 + 90.0 * 0.875);
    assert_eq!(t.sample(600), 0.0);
    assert_eq!(t.sample(10_000), 0.0);
    assert!(t.is_done(600));
    assert!(!t.is_done(599));
}

#[test]
fn easing_curves_pass_through_known_points() {
    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseInOutCubic,
        Easing::EaseOutCubic,
    ] {
        assert_eq!(easing.sample(0.0), 0.0, "{easing:?}");
        assert_eq!(easing.sample(1.0), 1.0, "{easing:?}");
    }
    assert_eq!(Easing::Linear.sample(0.25), 0.25);
    assert_eq!(Easing::SmoothStep.sample(0.5), 0.5);
    assert_eq!(Easing::SmoothStep.sample(0.25), 0.15625);
    assert_eq!(Easing::EaseInOutCubic.sample(0.25), 0.0625);
    assert_eq!(Easing::EaseInOutCubic.sample(0.5), 0.5);
}

#[test]
fn snap_follows_the_configured_easing() {
    for (easing, quarter) in [
        (Easing::Linear, -100.0),
        (Easing::SmoothStep, -62.5),
        (Easing::EaseInOutCubic, -25.0),
    ] {
        let options = CarouselOptions::new()
            .with_buffer_size(2)
            .with_snap_easing(easing);
        let mut e = engine_with(5, 400.0, options);
        assert!(e.snap_to_index(1, 0).is_applied());

        e.tick(125);
        assert_eq!(e.target_offset(), quarter, "{easing:?}");
        e.tick(500);
        assert_eq!(e.target_offset(), -400.0, "{easing:?}");
        assert!(!e.is_snapping());
    }
}

#[test]
fn visible_range_len_matches_is_empty() {
    let r = VisibleRange::centered(0, 2);
    assert_eq!(r.len(), 5);
    assert!(!r.is_empty());

    let empty = VisibleRange { min: 3, max: 2 };
    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);
    assert_eq!(empty.iter().count(), 0);

    let inverted = VisibleRange {
        min: VirtualIndex::MAX,
        max: VirtualIndex::MIN,
    };
    assert_eq!(inverted.len(), 0);

    let single = VisibleRange { min: -7, max: -7 };
    assert_eq!(single.len(), 1);
}

#[test]
fn nearest_boundary_rounds_half_away_from_zero() {
    assert_eq!(nearest_boundary(-90.0, 400.0), 0.0);
    assert_eq!(nearest_boundary(-210.0, 400.0), -400.0);
    assert_eq!(nearest_boundary(-200.0, 400.0), -400.0);
    assert_eq!(nearest_boundary(200.0, 400.0), 400.0);
    assert_eq!(nearest_boundary(-1000.0, 400.0), -1200.0);
    // Zero slot size is treated as 1.
    assert_eq!(nearest_boundary(-2.4, 0.0), -2.0);
}

#[test]
fn wheel_scenario_snaps_back_for_sub_slot_scroll() {
    let mut e = engine(5, 400.0, 2);
    assert!(e.on_wheel(120.0, INSIDE, 0).is_applied());
    assert_eq!(e.target_offset(), -90.0);

    let report = e.tick(16);
    assert_eq!(report.range, Some(VisibleRange { min: -2, max: 2 }));
    assert_eq!(report.diff.entered, -2..3);
    assert!(report.diff.exited.is_empty());
    assert_eq!(e.current_index(), 0);
    assert!(!report.snapping);

    // 96ms after the wheel: still inside the inactivity threshold.
    e.tick(96);
    assert!(!e.is_snapping());
    assert_eq!(e.target_offset(), -90.0);

    e.tick(112);
    let SnapPhase::Snapping(tween) = e.snap_phase() else {
        panic!("expected a snap after 112ms of inactivity");
    };
    assert_eq!(tween.from, -90.0);
    assert_eq!(tween.to, 0.0);
    assert_eq!(tween.start_ms, 112);

    e.tick(400);
    assert!(e.is_snapping());
    assert!(e.target_offset() > -90.0 && e.target_offset() < 0.0);

    e.tick(612);
    assert!(!e.is_snapping());
    assert_eq!(e.target_offset(), 0.0);
    assert_eq!(e.visible_range(), Some(VisibleRange { min: -2, max: 2 }));

    // Idempotent at rest.
    let now = run(&mut e, 612, 8_000);
    assert!(!e.is_snapping());
    assert_eq!(e.target_offset(), 0.0);
    assert_eq!(e.current_offset(), 0.0);
    assert!(e.tick(now + 16).at_rest);
}

#[test]
fn snap_lands_on_nearest_boundary_from_anywhere() {
    let mut rng = Lcg::new(42);
    for _ in 0..50 {
        let mut e = engine(5, 400.0, 2);
        let delta = rng.gen_f64(-150.0, 150.0);
        e.on_wheel(delta / 0.75, INSIDE, 0);
        let start = e.target_offset();
        let boundary = nearest_boundary(start, 400.0);
        let expected = if (start - boundary).abs() > 1.0 {
            boundary
        } else {
            start
        };
        let now = run(&mut e, 0, 800);
        assert!(!e.is_snapping());
        assert_eq!(e.target_offset(), expected);
        run(&mut e, now, 1_600);
        assert_eq!(e.target_offset(), expected);
    }
}

#[test]
fn aligned_target_does_not_snap() {
    let options = CarouselOptions::new()
        .with_buffer_size(2)
        .with_scroll_speed(1.0)
        .with_max_velocity(1_000.0);
    let mut e = engine_with(5, 400.0, options);
    e.on_wheel(400.5, INSIDE, 0); // within tolerance of -400
    run(&mut e, 0, 400);
    assert!(!e.is_snapping());
    assert_eq!(e.target_offset(), -400.5);
}

#[test]
fn wheel_interrupts_snap() {
    let mut e = engine(5, 400.0, 2);
    e.on_wheel(120.0, INSIDE, 0);
    run(&mut e, 0, 300);
    assert!(e.is_snapping());
    let before = e.target_offset();

    assert!(e.on_wheel(40.0, INSIDE, 301).is_applied());
    assert!(!e.is_snapping());
    assert_eq!(e.target_offset(), before - 30.0);

    // Direct tracking until the inactivity threshold passes again.
    e.tick(320);
    e.tick(400);
    assert!(!e.is_snapping());
    assert_eq!(e.target_offset(), before - 30.0);
}

#[test]
fn drag_interrupts_snap_and_tracks_pointer() {
    let mut e = engine(5, 400.0, 2);
    e.on_wheel(120.0, INSIDE, 0);
    run(&mut e, 0, 300);
    assert!(e.is_snapping());
    let anchor = e.target_offset();

    assert!(e.on_touch_start(Point::new(10.0, 200.0), 301).is_applied());
    assert!(!e.is_snapping());
    assert!(e.is_dragging());
    assert_eq!(
        e.state().drag_anchor,
        Some(DragAnchor {
            pointer: 200.0,
            offset: anchor
        })
    );

    assert!(e.on_touch_move(Point::new(10.0, 100.0), 320).is_applied());
    assert_eq!(e.target_offset(), anchor - 150.0);

    // No snap while the finger is down, however long it rests.
    run(&mut e, 320, 2_000);
    assert!(!e.is_snapping());
    assert_eq!(e.target_offset(), anchor - 150.0);

    // Releasing does not snap by itself.
    assert!(e.on_touch_end(2_000).is_applied());
    assert!(!e.is_dragging());
    e.tick(2_016);
    assert!(!e.is_snapping());

    run(&mut e, 2_016, 3_000);
    assert_eq!(e.target_offset(), nearest_boundary(anchor - 150.0, 400.0));
}

#[test]
fn pointer_input_is_filtered_by_primary_bounds() {
    let mut e = Engine::new(vec![1, 2, 3], CarouselOptions::new()).unwrap();
    // No layout yet: nothing is inside.
    assert_eq!(e.on_wheel(100.0, INSIDE, 0), InputOutcome::Ignored);
    assert_eq!(e.on_touch_start(INSIDE, 0), InputOutcome::Ignored);

    e.on_resize(bounds(400.0));
    assert_eq!(e.on_wheel(100.0, OUTSIDE, 0), InputOutcome::Ignored);
    assert_eq!(e.on_touch_start(OUTSIDE, 0), InputOutcome::Ignored);
    assert_eq!(e.on_touch_move(INSIDE, 0), InputOutcome::Ignored);
    assert_eq!(e.target_offset(), 0.0);

    assert!(e.on_touch_start(INSIDE, 0).is_applied());
    assert_eq!(e.on_touch_move(OUTSIDE, 5), InputOutcome::Ignored);
    // Ending a drag is never filtered.
    assert!(e.on_touch_end(6).is_applied());
    assert_eq!(e.on_touch_end(7), InputOutcome::Ignored);
    assert_eq!(
        e.on_wheel(f64::NAN, INSIDE, 8),
        InputOutcome::Ignored,
        "non-finite deltas are dropped"
    );
}

#[test]
fn wheel_delta_is_scaled_and_capped() {
    let mut e = engine(5, 400.0, 2);
    e.on_wheel(100.0, INSIDE, 0);
    assert_eq!(e.target_offset(), -75.0);
    e.on_wheel(10_000.0, INSIDE, 1);
    assert_eq!(e.target_offset(), -225.0);
    e.on_wheel(-10_000.0, INSIDE, 2);
    assert_eq!(e.target_offset(), -75.0);
}

#[test]
fn rapid_wheel_burst_keeps_window_contiguous() {
    let mut e = engine(5, 400.0, 2);
    e.tick(0);
    assert_eq!(e.visible_range(), Some(VisibleRange { min: -2, max: 2 }));

    for t in 1..=6 {
        e.on_wheel(120.0, INSIDE, t);
    }
    let report = e.tick(7);
    assert_eq!(e.target_offset(), -540.0);
    assert_eq!(report.range, Some(VisibleRange { min: -1, max: 3 }));
    assert_eq!(report.diff.exited, -2..-1);
    assert_eq!(report.diff.entered, 3..4);
    assert_eq!(primary_indices(&e), vec![-1, 0, 1, 2, 3]);

    for t in 8..=21 {
        e.on_wheel(120.0, INSIDE, t);
    }
    let report = e.tick(22);
    assert_eq!(e.target_offset(), -1800.0);
    // 4.5 rounds away from zero.
    assert_eq!(report.range, Some(VisibleRange { min: 3, max: 7 }));
    assert_eq!(report.diff.exited, -1..3);
    assert_eq!(report.diff.entered, 4..8);
    assert_eq!(primary_indices(&e), vec![3, 4, 5, 6, 7]);
    assert_eq!(e.live_len(Surface::Primary), 5);
    assert_eq!(e.live_len(Surface::Minimap), 5);
}

#[test]
fn window_diff_cases() {
    let r = |min, max| VisibleRange { min, max };
    let d = WindowDiff::between(None, r(-2, 2));
    assert_eq!((d.exited, d.entered), (0..0, -2..3));

    let d = WindowDiff::between(Some(r(-2, 2)), r(0, 4));
    assert_eq!((d.exited, d.entered), (-2..0, 3..5));

    let d = WindowDiff::between(Some(r(0, 4)), r(-2, 2));
    assert_eq!((d.exited, d.entered), (3..5, -2..0));

    let d = WindowDiff::between(Some(r(0, 4)), r(100, 104));
    assert_eq!((d.exited, d.entered), (0..5, 100..105));

    let d = WindowDiff::between(Some(r(0, 4)), r(0, 4));
    assert!(d.is_empty());
}

#[test]
fn virtualization_stays_bounded_under_random_input() {
    let buffer = 3usize;
    let mut e = engine(4, 300.0, buffer);
    let cap = 2 * buffer + 1;
    let mut rng = Lcg::new(0xC0FFEE);
    let mut now = 0u64;
    let mut prev: Option<VisibleRange> = None;

    for _ in 0..4_000 {
        now += rng.gen_range_u64(1, 40);
        match rng.gen_range_u64(0, 6) {
            0 | 1 => {
                e.on_wheel(rng.gen_f64(-2_000.0, 2_000.0), INSIDE, now);
            }
            2 => {
                e.on_touch_start(Point::new(5.0, rng.gen_f64(0.0, 300.0)), now);
            }
            3 => {
                e.on_touch_move(Point::new(5.0, rng.gen_f64(0.0, 300.0)), now);
            }
            4 => {
                e.on_touch_end(now);
            }
            _ => {
                e.step(rng.gen_range_u64(0, 7) as i64 - 3, now);
            }
        }
        let report = e.tick(now);
        let range = report.range.unwrap();
        assert_eq!(range.max - range.min, 2 * buffer as i64);
        assert_eq!(range.center(), e.current_index());
        assert_eq!(e.live_len(Surface::Primary), cap);
        assert_eq!(e.live_len(Surface::Minimap), cap);
        assert_eq!(e.live_len(Surface::Caption), 0);

        let indices = primary_indices(&e);
        assert_eq!(indices, range.iter().collect::<Vec<_>>());

        if let Some(prev) = prev {
            let exited = report.diff.exited.clone();
            let entered = report.diff.entered.clone();
            for i in prev.iter() {
                assert_eq!(range.contains(i), !exited.contains(&i), "i={i}");
            }
            for i in range.iter() {
                assert_eq!(prev.contains(i), !entered.contains(&i), "i={i}");
            }
        }
        prev = Some(range);
    }
}

#[test]
fn zero_slot_size_is_treated_as_one() {
    let mut e = Engine::new(vec!['x', 'y'], CarouselOptions::new().with_buffer_size(1)).unwrap();
    assert_eq!(e.slot_size(), 1.0);
    let report = e.tick(0);
    assert_eq!(report.range, Some(VisibleRange { min: -1, max: 1 }));

    e.on_resize(Rect::new(0.0, 0.0, 100.0, 0.0));
    assert_eq!(e.slot_size(), 1.0);
    e.on_wheel(2.0, Point::new(0.0, 0.0), 1);
    assert_eq!(e.target_offset(), -1.5);
    let report = e.tick(2);
    // -(-1.5 / 1).round() = 2
    assert_eq!(report.range, Some(VisibleRange { min: 1, max: 3 }));

    // Recovers on the next real layout.
    e.on_resize(bounds(400.0));
    assert_eq!(e.slot_size(), 400.0);
    assert_eq!(e.target_offset(), -600.0);
}

#[test]
fn resize_keeps_the_same_slot_in_view() {
    let mut e = engine(5, 400.0, 2);
    e.snap_to_index(2, 0);
    let now = run(&mut e, 0, 6_000);
    assert_eq!(e.target_offset(), -800.0);
    assert_eq!(e.current_offset(), -800.0);

    e.on_resize(bounds(200.0));
    assert_eq!(e.target_offset(), -400.0);
    assert_eq!(e.current_offset(), -400.0);
    e.tick(now + 16);
    assert_eq!(e.current_index(), 2);
    assert!(!e.is_snapping());
}

#[test]
fn initial_index_is_centered_after_layout() {
    let mut e = engine_with(5, 400.0, CarouselOptions::new().with_initial_index(3));
    assert_eq!(e.target_offset(), -1200.0);
    let report = e.tick(0);
    assert_eq!(report.range.map(|r| r.center()), Some(3));
    assert!(!report.snapping);
}

#[test]
fn programmatic_snaps_and_steps() {
    let mut e = engine(5, 400.0, 2);
    assert!(e.step(1, 0).is_applied());
    assert!(e.is_snapping());
    // A second step while the first is in flight builds on its destination.
    e.tick(16);
    assert!(e.step(1, 20).is_applied());
    let SnapPhase::Snapping(tween) = e.snap_phase() else {
        panic!("expected a snap");
    };
    assert_eq!(tween.to, -800.0);
    run(&mut e, 20, 600);
    assert_eq!(e.target_offset(), -800.0);
    assert_eq!(e.current_index(), 2);

    e.on_touch_start(INSIDE, 700);
    assert!(e.snap_to_index(-1, 710).is_applied());
    assert!(!e.is_dragging(), "a programmatic snap ends the drag");
    run(&mut e, 710, 1_300);
    assert_eq!(e.target_offset(), 400.0);
    assert_eq!(e.item_at(e.current_index()), &4);
    assert_eq!(e.label_of(e.current_index()), "05");
}

#[test]
fn handle_input_dispatches_every_event() {
    let mut e = Engine::new(vec![0u8; 3], CarouselOptions::new()).unwrap();
    let events = [
        InputEvent::Resize {
            bounds: bounds(400.0),
        },
        InputEvent::Wheel {
            delta: 40.0,
            position: INSIDE,
        },
        InputEvent::TouchStart { position: INSIDE },
        InputEvent::TouchMove {
            position: Point::new(10.0, 30.0),
        },
        InputEvent::TouchEnd,
        InputEvent::SnapTo { index: 1 },
        InputEvent::Step { by: -1 },
    ];
    for (t, event) in events.into_iter().enumerate() {
        assert!(e.handle_input(event, t as u64).is_applied(), "{event:?}");
    }
    assert_eq!(e.handle_input(InputEvent::TouchEnd, 10), InputOutcome::Ignored);
}

#[test]
fn surfaces_share_indices_at_their_own_scale() {
    let g = SurfaceGeometry {
        primary_slot: 400.0,
        minimap_slot: 250.0,
    };
    assert_eq!(g.scroll_offset(Surface::Primary, -400.0), -400.0);
    assert_eq!(g.scroll_offset(Surface::Minimap, -400.0), -250.0);
    assert_eq!(g.scroll_offset(Surface::Caption, -400.0), -250.0);
    assert_eq!(g.position(Surface::Primary, 1, -400.0), 0.0);
    assert_eq!(g.position(Surface::Minimap, 1, -400.0), 0.0);
    assert_eq!(g.position(Surface::Caption, 2, -400.0), 250.0);

    let collapsed = SurfaceGeometry {
        primary_slot: 0.0,
        minimap_slot: 250.0,
    };
    assert_eq!(collapsed.scroll_offset(Surface::Minimap, -2.0), -500.0);
}

#[test]
fn transforms_cover_every_surface() {
    let mut e = engine(5, 400.0, 1);
    e.tick(0);
    let mut all = Vec::new();
    e.collect_transforms(&mut all);
    assert_eq!(all.len(), 9);
    assert!(all.iter().filter(|t| t.surface == Surface::Caption).all(|t| t.parallax.is_none()));
    assert!(all.iter().filter(|t| t.surface != Surface::Caption).all(|t| t.parallax.is_some()));

    let t = e.transform(Surface::Minimap, 1).unwrap();
    assert_eq!(t.offset, 250.0);
    assert_eq!(e.transform(Surface::Primary, 1).unwrap().offset, 400.0);
    // Outside the window there is nothing to render.
    assert_eq!(e.transform(Surface::Primary, 2), None);
}

#[test]
fn parallax_drifts_independently_and_settles() {
    let mut e = engine(5, 400.0, 1);
    e.tick(0);
    // First step: 10% of the way to (-0 - i * slot) * 0.2.
    assert_eq!(e.transform(Surface::Primary, 1).unwrap().parallax, Some(-8.0));
    assert_eq!(e.transform(Surface::Minimap, 1).unwrap().parallax, Some(-5.0));
    assert_eq!(e.transform(Surface::Primary, -1).unwrap().parallax, Some(8.0));
    assert_eq!(e.transform(Surface::Primary, 0).unwrap().parallax, Some(0.0));
    assert!(!e.is_at_rest());

    run(&mut e, 0, 3_000);
    assert!(e.is_at_rest());
    assert_eq!(e.transform(Surface::Primary, 1).unwrap().parallax, Some(-80.0));
    assert_eq!(e.transform(Surface::Minimap, -1).unwrap().parallax, Some(50.0));
}

#[test]
fn parallax_layer_follows_window_diff() {
    let mut layer = ParallaxLayer::new(0.2, 0.1, 0.01);
    layer.apply_diff(&WindowDiff {
        exited: 0..0,
        entered: -2..3,
    });
    assert_eq!(layer.len(), 5);
    layer.update(0.0, 100.0);
    let before = layer.get(2).unwrap();

    layer.apply_diff(&WindowDiff {
        exited: -2..-1,
        entered: 3..4,
    });
    assert_eq!(layer.len(), 5);
    assert!(!layer.contains(-2));
    assert_eq!(layer.get(3).unwrap().value, 0.0);
    assert_eq!(layer.get(2), Some(before), "surviving entries keep their state");

    layer.apply_diff(&WindowDiff {
        exited: i64::MIN / 2..i64::MAX / 2,
        entered: 1_000..1_005,
    });
    assert_eq!(layer.len(), 5);
    assert!(layer.contains(1_004));
    assert_eq!(layer.target(1_000, -100_000.0, 100.0), 0.0);
}

#[test]
fn teardown_releases_all_per_element_state() {
    let mut e = engine(5, 400.0, 2);
    e.tick(0);
    assert_eq!(e.teardown(), Some(VisibleRange { min: -2, max: 2 }));
    assert_eq!(e.visible_range(), None);
    assert_eq!(e.live_len(Surface::Primary), 0);
    assert_eq!(e.live_len(Surface::Minimap), 0);
    assert_eq!(e.teardown(), None);

    let report = e.tick(16);
    assert_eq!(report.diff.entered, -2..3);
    assert_eq!(e.live_len(Surface::Primary), 5);
}

#[test]
fn huge_offsets_do_not_panic() {
    let mut e = engine(3, 1.0, 2);
    e.snap_to_index(i64::MAX, 0);
    run(&mut e, 0, 700);
    let range = e.visible_range().unwrap();
    assert_eq!(range.max - range.min, 4);
    e.for_each_transform(|_| {});
    let _ = e.item_at(range.max);
}

#[cfg(feature = "serde")]
#[test]
fn options_load_from_partial_json() {
    let options: CarouselOptions =
        serde_json::from_str(r#"{ "buffer_size": 2, "compact": true, "drag_policy": "Follow" }"#)
            .unwrap();
    assert_eq!(options.buffer_size, 2);
    assert_eq!(options.minimap_slot(), 180.0);
    assert_eq!(options.drag_policy, DragPolicy::Follow);
    assert_eq!(options.snap_duration_ms, 500);

    let json = serde_json::to_string(&CarouselOptions::new()).unwrap();
    let back: CarouselOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, CarouselOptions::new());
}

#[cfg(feature = "serde")]
#[test]
fn frame_state_serializes() {
    let mut e = engine(5, 400.0, 2);
    e.tick(0);
    let json = serde_json::to_value(e.frame_state()).unwrap();
    assert_eq!(json["range"]["min"], -2);
    assert_eq!(json["primary_slot_size"], 400.0);
}
