use chrono::{Days, NaiveDate, Weekday};
use test_log::test;

use crate::contains::Contains;
use super::*;

// 2019-01-01 was a Tuesday
fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap() + Days::new(offset)
}

fn tuesday() -> NaiveDate {
    day(0)
}

fn wednesday() -> NaiveDate {
    day(1)
}

/// R0 = x:[0,5) y:(5,10], R1 = x:[5,10) y:(5,10]
fn engine(config: EngineConfig) -> Engine {
    let mut engine = Engine::new(config).unwrap();
    assert_eq!(engine.add_region(R2::new(0., 10.), R2::new(5., 5.)), Ok(0));
    assert_eq!(engine.add_region(R2::new(5., 10.), R2::new(10., 5.)), Ok(1));
    engine
}

fn mode(within: bool, between: bool, background: bool) -> ClassificationMode {
    ClassificationMode::new(within, between, background)
}

#[test]
fn scenario() {
    let mut engine = engine(EngineConfig::default());
    let edges = vec![
        Edge::new(1, (1., 9.), (1., 6.), wednesday()),    // A: within R0
        Edge::new(2, (1., 9.), (6., 6.), wednesday()),    // B: R0 → R1
        Edge::new(3, (1., 9.), (20., 20.), wednesday()),  // C: R0 → background
        Edge::new(4, (2., 8.), (3., 7.), tuesday()),      // D: within R0, on a Tuesday
    ];
    engine.load(edges);
    engine.set_weekdays(WeekdayMask::ALL.without(Weekday::Tue));

    engine.set_mode(mode(true, false, false));
    let pass = engine.recompute();
    assert_eq!(pass.matrix.count(&Attribution::within(0)), 1);
    assert_eq!(pass.total_visible, 1);
    assert_eq!(pass.visible.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1]);

    engine.set_mode(mode(false, true, false));
    let pass = engine.recompute();
    assert_eq!(pass.visible.len(), 1);
    assert_eq!(pass.visible[0].id, 2);
    assert_eq!(pass.visible[0].attribution, Attribution::between(0, 1));

    engine.set_mode(mode(false, false, true));
    let pass = engine.recompute();
    assert_eq!(pass.visible.len(), 1);
    assert_eq!(pass.visible[0].id, 3);
    assert_eq!(pass.visible[0].attribution, Attribution::outbound(0));
    assert_eq!(pass.matrix.get(0, 5), 1);

    // D is never visible while Tuesday is masked out
    engine.set_mode(ClassificationMode::all());
    let pass = engine.recompute();
    assert_eq!(pass.total_visible, 3);
    assert!(pass.visible.iter().all(|v| v.id != 4));

    engine.set_weekdays(WeekdayMask::ALL);
    let pass = engine.recompute();
    assert_eq!(pass.total_visible, 4);
    assert_eq!(pass.matrix.count(&Attribution::within(0)), 2);
}

#[test]
fn subsampling_keeps_counts_exact() {
    let mut engine = engine(EngineConfig { capacity: 5, target_count: 2 });
    let edges = (0..5).map(|id| Edge::new(id, (1., 9.), (1., 6.), wednesday())).collect();
    engine.load(edges);
    engine.set_mode(mode(true, false, false));
    let pass = engine.recompute();
    assert_eq!(pass.stride, 2);
    assert_eq!(pass.total_visible, 5);
    assert_eq!(pass.matrix.total(), 5);
    assert_eq!(pass.visible.iter().map(|v| v.id).collect::<Vec<_>>(), vec![0, 2, 4]);
}

#[test]
fn stride_clamped_below_target() {
    let mut engine = engine(EngineConfig::default());
    engine.load(vec![Edge::new(3, (1., 9.), (1., 6.), wednesday())]);
    let pass = engine.recompute();
    assert_eq!(pass.stride, 1);
    assert_eq!(pass.visible.len(), 1);
}

/// A small grid of edges between and around both regions, over a full week.
fn grid() -> Vec<Edge> {
    let points = [(1., 9.), (4., 6.), (6., 6.), (9., 9.), (20., 20.), (-3., 7.), (5., 7.), (0., 5.)];
    let mut edges = Vec::new();
    let mut id = 0;
    for &o in &points {
        for &d in &points {
            edges.push(Edge::new(id, o, d, day(id % 7)));
            id += 1;
        }
    }
    edges
}

#[test]
fn one_cell_per_visible_edge() {
    let modes = [
        mode(false, false, false), mode(true, false, false), mode(false, true, false), mode(true, true, false),
        mode(false, false, true), mode(true, false, true), mode(false, true, true), mode(true, true, true),
    ];
    let mut engine = engine(EngineConfig { capacity: 5, target_count: 0 });
    engine.load(grid());
    for m in modes {
        engine.set_mode(m);
        let pass = engine.recompute().clone();
        assert_eq!(pass.matrix.total(), pass.total_visible as u64, "mode {}", m);
        assert_eq!(pass.visible.len(), pass.total_visible, "mode {}", m);
        for v in &pass.visible {
            if v.attribution.is_within() {
                let region = engine.registry().rectangle_of(v.attribution.source.slot()).unwrap();
                assert!(region.contains(&v.origin) && region.contains(&v.destination));
            }
        }
        if !m.within {
            assert!(pass.visible.iter().all(|v| !v.attribution.is_within()), "mode {}", m);
        }
        if !m.background {
            assert!(pass.visible.iter().all(|v| !v.attribution.source.is_background() && !v.attribution.destination.is_background()));
        }
    }
}

#[test]
fn pure() {
    let mut engine = engine(EngineConfig { capacity: 5, target_count: 10 });
    engine.load(grid());
    let first = engine.recompute().clone();
    engine.set_mode(mode(true, false, false));
    engine.recompute();
    engine.set_mode(ClassificationMode::all());
    let second = engine.recompute().clone();
    assert_eq!(first, second);
    assert!(first.stride > 1);
}

#[test]
fn cached_until_changed() {
    let mut engine = engine(EngineConfig::default());
    engine.load(grid());
    assert!(engine.is_dirty());
    engine.recompute();
    assert!(!engine.is_dirty());

    // setting identical filters doesn't invalidate
    engine.set_filters(Filters::default());
    assert!(!engine.is_dirty());
    engine.set_weekdays(WeekdayMask(0xff));
    assert!(!engine.is_dirty());

    engine.set_weekdays(WeekdayMask::NONE);
    assert!(engine.is_dirty());
    assert_eq!(engine.recompute().total_visible, 0);

    // freeing an empty slot is a no-op
    assert!(!engine.remove_region(4));
    assert!(!engine.is_dirty());
}

#[test]
fn slot_reuse_leaves_no_residue() {
    let mut engine = engine(EngineConfig::default());
    engine.load(grid());
    let before = engine.recompute().matrix.slot_total(0);
    assert!(before > 0);

    assert!(engine.remove_region(0));
    assert_eq!(engine.recompute().matrix.slot_total(0), 0);

    // reallocate slot 0 far away from every edge
    assert_eq!(engine.add_region(R2::new(100., 110.), R2::new(105., 105.)), Ok(0));
    let pass = engine.recompute();
    assert_eq!(pass.matrix.slot_total(0), 0);
    assert!(pass.visible.iter().all(|v| v.attribution.source.slot() != 0 && v.attribution.destination.slot() != 0));
}

#[test]
fn capacity_exceeded_declined() {
    let mut engine = engine(EngineConfig { capacity: 2, target_count: 0 });
    engine.load(grid());
    let before = engine.recompute().clone();
    assert_eq!(
        engine.add_region(R2::new(20., 30.), R2::new(30., 20.)),
        Err(RegionError::Full { capacity: 2 }),
    );
    assert!(!engine.is_dirty());
    assert_eq!(engine.recompute(), &before);
}

#[test]
fn oversized_capacity_rejected() {
    let config = EngineConfig { capacity: usize::MAX / 2 + 2, target_count: 0 };
    assert_eq!(
        Engine::new(config).err(),
        Some(ConfigError::Capacity { capacity: usize::MAX / 2 + 2, max: EngineConfig::MAX_CAPACITY }),
    );
    let config = EngineConfig { capacity: EngineConfig::MAX_CAPACITY, target_count: 0 };
    let mut engine = Engine::new(config).unwrap();
    assert_eq!(engine.recompute().matrix.size(), 2 * EngineConfig::MAX_CAPACITY);
}

#[test]
fn degenerate_declined() {
    let mut engine = Engine::default();
    let p = R2::new(1., 1.);
    assert!(matches!(engine.add_region(p, R2::new(1., 5.)), Err(RegionError::Degenerate { .. })));
    assert!(engine.registry().is_empty());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn reversed_drag_normalized() {
    let mut engine = Engine::default();
    assert_eq!(engine.add_region(R2::new(5., 5.), R2::new(0., 10.)), Ok(0));
    engine.load(vec![Edge::new(0, (1., 9.), (1., 6.), wednesday())]);
    engine.set_mode(mode(true, false, false));
    assert_eq!(engine.recompute().matrix.count(&Attribution::within(0)), 1);
}

#[test]
fn empty_dataset() {
    let mut engine = engine(EngineConfig::default());
    let pass = engine.recompute();
    assert_eq!(pass.total_edges, 0);
    assert_eq!(pass.total_visible, 0);
    assert_eq!(pass.matrix.total(), 0);
    assert!(pass.visible.is_empty());
    assert_eq!(pass.stride, 1);
}

#[test]
fn stale_load_discarded() {
    let mut engine = engine(EngineConfig::default());
    let first = engine.begin_load();
    let second = engine.begin_load();
    assert!(engine.is_loading());

    let newer = vec![Edge::new(1, (1., 9.), (1., 6.), wednesday())];
    let older = grid();
    assert_eq!(engine.finish_load(second, newer), Ok(1));
    assert!(!engine.is_loading());
    assert_eq!(
        engine.finish_load(first, older),
        Err(DatasetError::Stale { ticket: 1, latest: 2 }),
    );
    assert_eq!(engine.edges().len(), 1);

    // finishing the same ticket twice is stale too
    assert!(engine.finish_load(second, grid()).is_err());
    assert_eq!(engine.edges().len(), 1);
}

#[test]
fn load_replaces_and_dedups() {
    let mut engine = engine(EngineConfig::default());
    engine.load(grid());
    let n = engine.load(vec![
        Edge::new(1, (1., 9.), (1., 6.), wednesday()),
        Edge::new(1, (6., 9.), (6., 6.), wednesday()),
    ]);
    assert_eq!(n, 1);
    assert_eq!(engine.edges()[0].origin, R2::new(1., 9.));
    assert_eq!(engine.recompute().total_edges, 1);
}

#[test]
fn lifecycle_events() {
    let mut engine = engine(EngineConfig::default());
    let events = engine.drain_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], SlotEvent::Allocated { slot: 0, .. }));
    engine.remove_region(1);
    assert_eq!(engine.clear_regions(), 1);
    assert_eq!(engine.drain_events(), vec![SlotEvent::Freed { slot: 1 }, SlotEvent::Freed { slot: 0 }]);
}
