//! Behaviour tests for the pager on a simulated surface
//!
//! Every test uses a 100pt extent so offsets read as percentages of a page.

use std::cell::RefCell;
use std::rc::Rc;

use crate::prelude::*;
use crate::recorder::Recorded;
use crate::{ContainerAnimation, DriveError, MAX_FRAMES};
use pan_core::pool::neighborhood;
use pan_core::{Container, PagingState, PanError, SurfaceEvent, ViewStatus, SLOT_COUNT};

const EXTENT: f32 = 100.0;

/// `count` lifecycle-aware pages on a 100x100 viewport, log cleared
fn pager(count: usize, loop_mode: LoopMode) -> (SimPager, EventLog) {
    let log = EventLog::new();
    let sim = SimConfig {
        viewport: Size::new(EXTENT, EXTENT),
        ..SimConfig::default()
    };
    let pages = labelled_pages(count, &log, |_| true);
    let mut pager = build_pager(
        sim,
        PanConfig::with_loop_mode(loop_mode),
        pages,
        EffectKind::None,
        &log,
    );
    pager.run_until_idle().expect("idle after setup");
    log.clear();
    (pager, log)
}

fn assert_views_unique(pager: &SimPager) {
    let views: Vec<&String> = pager
        .surface()
        .mounted_views()
        .into_iter()
        .flatten()
        .collect();
    for (i, view) in views.iter().enumerate() {
        assert!(
            !views[i + 1..].contains(view),
            "{view} mounted twice: {:?}",
            pager.surface().mounted_views()
        );
    }
}

fn expected_views(map: [Option<usize>; SLOT_COUNT]) -> [Option<String>; SLOT_COUNT] {
    map.map(|page| page.map(page_label))
}

fn mounted_views(pager: &SimPager) -> [Option<String>; SLOT_COUNT] {
    pager.surface().mounted_views().map(|view| view.cloned())
}

// =============================================================================
// Neighbourhood
// =============================================================================

#[test]
fn test_settled_map_holds_neighbourhood() {
    for loop_mode in [LoopMode::None, LoopMode::Loop, LoopMode::Bounded] {
        let (mut pager, _) = pager(5, loop_mode);
        for index in [2, 4, 0, 3, 1] {
            pager.jump_to(index, false).unwrap();
            pager.run_until_idle().unwrap();

            let wanted = neighborhood(index, 5, loop_mode);
            assert_eq!(pager.page_map(), wanted, "{loop_mode:?} at {index}");
            assert_eq!(mounted_views(&pager), expected_views(wanted));
            assert_eq!(pager.surface().offset(), EXTENT);
        }
    }
}

#[test]
fn test_swipes_keep_neighbourhood() {
    let (mut pager, log) = pager(5, LoopMode::None);
    pager.swipe(3).unwrap();
    assert_eq!(pager.index(), 3);
    assert_eq!(pager.page_map(), [Some(2), Some(3), Some(4)]);
    assert_eq!(log.pagings(), vec![(0, 1), (1, 2), (2, 3)]);

    pager.swipe(-2).unwrap();
    assert_eq!(pager.index(), 1);
    assert_eq!(pager.page_map(), [Some(0), Some(1), Some(2)]);
    assert_views_unique(&pager);
}

#[test]
fn test_change_progress_stays_in_range() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.swipe(2).unwrap();
    pager.swipe(-3).unwrap();
    let progresses = log.progresses();
    assert!(!progresses.is_empty());
    assert!(progresses.iter().all(|p| (0.0..=1.0).contains(p)));
}

// =============================================================================
// Settling
// =============================================================================

#[test]
fn test_settle_is_idempotent() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.swipe(1).unwrap();
    assert_eq!(
        log.without_changes()
            .into_iter()
            .filter(|event| !matches!(event, Recorded::Lifecycle { .. }))
            .collect::<Vec<_>>(),
        vec![
            Recorded::StartPanning { from: 0 },
            Recorded::StopPanning { from: 0, to: 1 },
            Recorded::Paging { from: 0, to: 1 },
        ]
    );

    log.clear();
    let map = pager.page_map();
    pager.handle_event(SurfaceEvent::DecelerationEnded);
    pager.handle_event(SurfaceEvent::DecelerationEnded);
    assert!(log.is_empty());
    assert_eq!(pager.page_map(), map);
    assert_eq!(pager.state(), PagingState::AtRest);
}

#[test]
fn test_release_short_of_half_returns() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.drag(40.0, 4);
    pager.release(0.0);
    pager.run_until_idle().unwrap();
    assert_eq!(pager.index(), 0);
    assert_eq!(pager.surface().offset(), EXTENT);
    assert!(log.pagings().is_empty());
    assert!(log
        .without_changes()
        .contains(&Recorded::StopPanning { from: 0, to: 0 }));
}

#[test]
fn test_fling_pages_forward() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.drag(20.0, 2);
    pager.release(600.0);
    pager.run_until_idle().unwrap();
    assert_eq!(pager.index(), 1);
    assert_eq!(log.pagings(), vec![(0, 1)]);
}

// =============================================================================
// Jumps
// =============================================================================

#[test]
fn test_immediate_jump_round_trip() {
    let (mut pager, _) = pager(5, LoopMode::Bounded);
    for index in 0..5 {
        pager.jump_to(index, false).unwrap();
        assert_eq!(pager.index(), index);
        assert_eq!(pager.state(), PagingState::AtRest);
    }
}

#[test]
fn test_animated_jump_round_trip() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    let route = [3, 1, 4, 0, 2];
    for index in route {
        pager.jump_to(index, true).unwrap();
        assert!(pager.is_jumping());
        pager.run_until_idle().unwrap();
        assert_eq!(pager.index(), index);
        assert_eq!(pager.state(), PagingState::AtRest);
        assert_eq!(pager.page_map(), neighborhood(index, 5, LoopMode::Loop));
        assert_views_unique(&pager);
    }
    assert_eq!(log.pagings(), vec![(0, 3), (3, 1), (1, 4), (4, 0), (0, 2)]);
}

#[test]
fn test_animated_jump_reports_start_stop_paging() {
    let (mut pager, log) = pager(5, LoopMode::None);
    pager.jump_to(3, true).unwrap();
    assert_eq!(pager.page_map()[2], Some(3));
    assert_eq!(pager.jump_to(1, true), Err(PanError::JumpInProgress));
    pager.run_until_idle().unwrap();

    let delegate: Vec<Recorded> = log
        .without_changes()
        .into_iter()
        .filter(|event| !matches!(event, Recorded::Lifecycle { .. }))
        .collect();
    assert_eq!(
        delegate,
        vec![
            Recorded::StartPanning { from: 0 },
            Recorded::StopPanning { from: 0, to: 3 },
            Recorded::Paging { from: 0, to: 3 },
        ]
    );
    assert!(log
        .snapshot()
        .iter()
        .filter_map(|event| match event {
            Recorded::ChangePanning { to, .. } => Some(*to),
            _ => None,
        })
        .all(|to| to == 3));
}

#[test]
fn test_drag_interrupts_animated_jump() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.jump_to(2, true).unwrap();
    for _ in 0..5 {
        pager.step_frame();
    }
    assert!(pager.surface().offset() > 150.0);

    pager.surface_mut().begin_drag();
    pager.pump();
    assert_eq!(pager.state(), PagingState::Panning);
    assert_eq!(pager.target_index(), 0);
    assert_eq!(pager.page_map(), [Some(4), Some(0), Some(1)]);

    pager.release(0.0);
    pager.run_until_idle().unwrap();
    assert_eq!(pager.index(), 1);
    assert_eq!(pager.page_map(), [Some(0), Some(1), Some(2)]);
    assert_eq!(log.pagings(), vec![(0, 1)]);
}

// =============================================================================
// Loop modes
// =============================================================================

#[test]
fn test_none_mode_resists_past_last_page() {
    let (mut pager, log) = pager(5, LoopMode::None);
    pager.jump_to(4, false).unwrap();
    log.clear();

    pager.drag(80.0, 8);
    assert_eq!(pager.surface().offset(), 140.0);
    assert_eq!(pager.index(), 4);
    assert_eq!(pager.page_map()[2], None);
    assert!(pager.surface().presented()[2].is_hidden());

    pager.release(0.0);
    pager.run_until_idle().unwrap();
    assert_eq!(pager.index(), 4);
    assert_eq!(pager.surface().offset(), EXTENT);
    assert_eq!(pager.surface().insets().right, -EXTENT);
    assert!(log.pagings().is_empty());
}

#[test]
fn test_none_mode_resists_before_first_page() {
    let (mut pager, log) = pager(5, LoopMode::None);
    pager.drag(-80.0, 8);
    assert_eq!(pager.surface().offset(), 60.0);
    assert_eq!(pager.index(), 0);
    assert!(pager.surface().presented()[0].is_hidden());

    pager.release(0.0);
    pager.run_until_idle().unwrap();
    assert_eq!(pager.index(), 0);
    assert_eq!(pager.surface().insets().left, -EXTENT);
    assert!(log.pagings().is_empty());
}

#[test]
fn test_loop_wraps_past_last_page() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.jump_to(4, false).unwrap();
    log.clear();

    pager.drag(EXTENT, 10);
    assert_eq!(pager.index(), 0);
    assert_eq!(pager.page_map(), [Some(4), Some(0), Some(1)]);
    pager.release(0.0);
    pager.run_until_idle().unwrap();
    assert_eq!(log.pagings(), vec![(4, 0)]);
}

#[test]
fn test_bounded_pull_releases_edge() {
    let (mut pager, log) = pager(5, LoopMode::Bounded);
    assert_eq!(
        pager.containers()[0].edge_offset(),
        Transform::translation(-EXTENT, 0.0)
    );

    // resisted to 70: progress 0.3 passes the 0.28 threshold
    pager.drag(-60.0, 1);
    assert_eq!(pager.surface().offset(), 70.0);
    assert_eq!(
        pager.surface().container_animations(),
        &[ContainerAnimation {
            slot: Slot::Previous,
            transform: Transform::IDENTITY,
            duration: 0.2,
        }]
    );
    assert!(pager.containers()[0].edge_offset().is_identity());
    assert_eq!(pager.surface().insets().left, 0.0);

    pager.drag(-70.0, 7);
    assert_eq!(pager.index(), 4);
    pager.release(0.0);
    pager.run_until_idle().unwrap();
    assert_eq!(log.pagings(), vec![(0, 4)]);
    assert_eq!(pager.page_map(), [Some(3), Some(4), Some(0)]);
    assert!(pager.surface().edge_transform(Slot::Previous).is_identity());
}

#[test]
fn test_bounded_short_pull_bounces_back() {
    let (mut pager, log) = pager(5, LoopMode::Bounded);
    pager.drag(-20.0, 1);
    assert_eq!(pager.surface().offset(), 90.0);
    pager.release(0.0);
    pager.run_until_idle().unwrap();

    assert_eq!(pager.index(), 0);
    assert_eq!(pager.surface().offset(), EXTENT);
    assert!(pager.surface().container_animations().is_empty());
    assert_eq!(
        pager.containers()[0].edge_offset(),
        Transform::translation(-EXTENT, 0.0)
    );
    assert_eq!(pager.surface().insets().left, -EXTENT);
    assert!(log.pagings().is_empty());
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_immediate_jump_exits_before_enter() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.jump_to(2, false).unwrap();
    assert_eq!(
        log.snapshot(),
        vec![
            Recorded::Paging { from: 0, to: 2 },
            Recorded::Lifecycle {
                page: 0,
                event: LifecycleEvent::WillExit(Direction::None)
            },
            Recorded::Lifecycle {
                page: 0,
                event: LifecycleEvent::DidExit(Direction::None)
            },
            Recorded::Lifecycle {
                page: 2,
                event: LifecycleEvent::WillEnter(Direction::None)
            },
            Recorded::Lifecycle {
                page: 2,
                event: LifecycleEvent::DidEnter(Direction::None)
            },
        ]
    );
}

#[test]
fn test_backward_jump_exits_before_enter() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.jump_to(3, false).unwrap();
    log.clear();

    pager.jump_to(1, false).unwrap();
    assert_eq!(log.pagings(), vec![(3, 1)]);
    assert_eq!(
        log.lifecycle(),
        vec![
            (3, LifecycleEvent::WillExit(Direction::None)),
            (3, LifecycleEvent::DidExit(Direction::None)),
            (1, LifecycleEvent::WillEnter(Direction::None)),
            (1, LifecycleEvent::DidEnter(Direction::None)),
        ]
    );
}

#[test]
fn test_swipe_lifecycle_is_directional() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.swipe(1).unwrap();
    assert_eq!(
        log.lifecycle_of(0),
        vec![
            LifecycleEvent::WillExit(Direction::Previous),
            LifecycleEvent::DidExit(Direction::Previous)
        ]
    );
    assert_eq!(
        log.lifecycle_of(1),
        vec![
            LifecycleEvent::WillEnter(Direction::Next),
            LifecycleEvent::DidEnter(Direction::Next)
        ]
    );
    assert!(log.lifecycle_of(4).is_empty());
    assert_eq!(pager.view_status(0), ViewStatus::Previous);
    assert_eq!(pager.view_status(1), ViewStatus::Center);
}

#[test]
fn test_cancelled_swipe_reenters_current() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.drag(30.0, 3);
    pager.release(0.0);
    pager.run_until_idle().unwrap();
    assert_eq!(
        log.lifecycle_of(0),
        vec![
            LifecycleEvent::WillExit(Direction::Previous),
            LifecycleEvent::DidEnter(Direction::Previous)
        ]
    );
    assert_eq!(
        log.lifecycle_of(1),
        vec![
            LifecycleEvent::WillEnter(Direction::Next),
            LifecycleEvent::DidExit(Direction::Next)
        ]
    );
}

#[test]
fn test_did_appear_seeds_silently() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.did_appear();
    assert!(log.is_empty());
    assert_eq!(pager.view_status(0), ViewStatus::Center);
    assert_eq!(pager.view_status(1), ViewStatus::Next);
    assert_eq!(pager.view_status(4), ViewStatus::Previous);
    assert_eq!(pager.view_status(2), ViewStatus::Out);
}

#[test]
fn test_bare_views_get_no_callbacks() {
    let log = EventLog::new();
    let pages = labelled_pages(4, &log, |index| index % 2 == 1);
    let mut pager = build_pager(
        SimConfig {
            viewport: Size::new(EXTENT, EXTENT),
            ..SimConfig::default()
        },
        PanConfig::default(),
        pages,
        EffectKind::None,
        &log,
    );
    pager.swipe(2).unwrap();
    assert!(log.lifecycle_of(0).is_empty());
    assert!(log.lifecycle_of(2).is_empty());
    assert!(!log.lifecycle_of(1).is_empty());
}

// =============================================================================
// Two pages
// =============================================================================

#[test]
fn test_two_pages_mount_on_demand() {
    let (mut pager, log) = pager(2, LoopMode::Loop);
    assert_eq!(pager.page_map(), [None, Some(0), None]);

    pager.drag(30.0, 3);
    assert_eq!(pager.page_map(), [None, Some(0), Some(1)]);
    assert_views_unique(&pager);

    pager.drag(70.0, 7);
    assert_eq!(pager.index(), 1);
    assert_eq!(pager.page_map(), [None, Some(1), None]);

    pager.drag(-30.0, 3);
    assert_eq!(pager.page_map(), [Some(0), Some(1), None]);
    assert_views_unique(&pager);

    // page 0 follows the direction of travel
    pager.drag(60.0, 6);
    assert_eq!(pager.page_map(), [None, Some(1), Some(0)]);
    assert_views_unique(&pager);

    pager.release(0.0);
    pager.run_until_idle().unwrap();
    assert_eq!(pager.index(), 1);
    assert_eq!(log.pagings(), vec![(0, 1)]);
}

#[test]
fn test_single_page_is_pinned() {
    let (mut pager, log) = pager(1, LoopMode::Loop);
    pager.drag(40.0, 4);
    assert!(pager.surface().offset() < 140.0);
    pager.release(0.0);
    pager.run_until_idle().unwrap();
    assert_eq!(pager.index(), 0);
    assert_eq!(pager.page_map(), [None, Some(0), None]);
    assert!(log.pagings().is_empty());
}

// =============================================================================
// Effects and configuration
// =============================================================================

#[derive(Clone, Default)]
struct FrameProbe {
    frames: Rc<RefCell<Vec<TransitionFrame>>>,
    teardowns: Rc<RefCell<usize>>,
}

impl Transformer for FrameProbe {
    fn update(&mut self, _containers: &mut [Container; SLOT_COUNT], frame: &TransitionFrame) {
        self.frames.borrow_mut().push(*frame);
    }

    fn teardown(&mut self, _containers: &mut [Container; SLOT_COUNT]) {
        *self.teardowns.borrow_mut() += 1;
    }
}

#[test]
fn test_transformer_sees_settled_frame_after_swap() {
    let (mut pager, _) = pager(5, LoopMode::Loop);
    let probe = FrameProbe::default();
    pager.set_transformer(Some(Box::new(probe.clone())));
    probe.frames.borrow_mut().clear();

    pager.drag(EXTENT, 10);
    let frames = probe.frames.borrow().clone();
    let settled = frames
        .iter()
        .position(|frame| frame.from == 1 && frame.to == 1)
        .expect("settled frame after the flip");
    assert_eq!(frames[settled].progress, 0.0);
    assert!(frames[..settled]
        .iter()
        .all(|frame| frame.from == 0 && frame.to == 1));

    pager.set_transformer(None);
    assert_eq!(*probe.teardowns.borrow(), 1);
}

#[test]
fn test_effect_teardown_restores_containers() {
    let (mut pager, _) = pager(5, LoopMode::Loop);
    pager.set_transformer(EffectKind::CardStack.build());
    pager.drag(40.0, 4);
    assert!(pager
        .containers()
        .iter()
        .any(|container| !container.transform.is_identity()));

    pager.set_transformer(None);
    for container in pager.containers() {
        assert!(container.transform.is_identity());
        assert_eq!(container.alpha, 1.0);
        assert_eq!(container.z_index, 0);
    }
}

#[test]
fn test_hide_outside_views() {
    let (mut pager, _) = pager(5, LoopMode::Loop);
    pager.set_hide_outside_views(true);
    let presented = pager.surface().presented();
    assert!(presented[0].is_hidden() && presented[2].is_hidden());

    pager.drag(30.0, 3);
    let presented = pager.surface().presented();
    assert!(presented[0].is_hidden());
    assert!(!presented[2].is_hidden());
}

#[test]
fn test_vertical_axis_swipe() {
    let log = EventLog::new();
    let mut pager = build_pager(
        SimConfig {
            viewport: Size::new(100.0, 80.0),
            ..SimConfig::default()
        },
        PanConfig {
            axis: ScrollAxis::Vertical,
            ..PanConfig::default()
        },
        labelled_pages(5, &log, |_| false),
        EffectKind::Parallax,
        &log,
    );
    assert_eq!(pager.surface().offset(), 80.0);
    pager.swipe(1).unwrap();
    assert_eq!(pager.index(), 1);
    assert_eq!(pager.surface().offset(), 80.0);
    assert_eq!(log.pagings(), vec![(0, 1)]);
}

#[test]
fn test_layout_change_recenters() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.surface_mut().resize(Size::new(200.0, 100.0));
    pager.layout_changed();
    pager.run_until_idle().unwrap();
    assert_eq!(pager.surface().offset(), 200.0);
    assert_eq!(pager.index(), 0);
    assert!(log.is_empty());
}

#[test]
fn test_loop_mode_switch_rebuilds() {
    let (mut pager, _) = pager(5, LoopMode::Loop);
    assert_eq!(pager.page_map(), [Some(4), Some(0), Some(1)]);
    pager.set_loop_mode(LoopMode::None);
    assert_eq!(pager.page_map(), [None, Some(0), Some(1)]);
    assert_eq!(mounted_views(&pager), expected_views([None, Some(0), Some(1)]));
    assert_eq!(pager.surface().insets().left, -EXTENT);
}

#[test]
fn test_run_until_idle_reports_stall_while_tracking() {
    let (mut pager, _) = pager(5, LoopMode::Loop);
    pager.drag(10.0, 1);
    assert_eq!(
        pager.run_until_idle(),
        Err(DriveError::Stalled { frames: MAX_FRAMES })
    );
}

#[test]
fn test_recorded_events_serialize() {
    let (mut pager, log) = pager(5, LoopMode::Loop);
    pager.jump_to(1, false).unwrap();
    let json = serde_json::to_string(&log.snapshot()).unwrap();
    assert!(json.contains(r#"{"kind":"paging","from":0,"to":1}"#));
    assert!(json.contains(r#""event":{"event":"will_exit","direction":"none"}"#));
}
