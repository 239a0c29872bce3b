use std::time::{Duration, Instant};

use super::*;
use crate::error::PlaybackError;
use crate::library::{Catalog, TrackId};
use crate::testing::{FakeSession, RecordingView, tracks};

type Controller = PlaybackController<FakeSession, RecordingView>;

fn controller(titles: &[&str]) -> Controller {
    let catalog = Catalog::new(tracks(titles)).unwrap();
    PlaybackController::new(catalog, FakeSession::default(), RecordingView::default())
}

fn current(c: &Controller) -> Option<u32> {
    c.store().current_id().map(|id| id.0)
}

#[test]
fn new_controller_renders_catalog_and_offers_first_track() {
    let c = controller(&["a", "b"]);
    assert_eq!(c.view().rows, vec![TrackId(0), TrackId(1)]);
    assert_eq!(c.view().highlighted, None);
    assert_eq!(c.view().label, "Play a");
    assert_eq!(c.view().now_playing, None);
    assert_eq!(c.state(), PlayerState::Stopped);
}

#[test]
fn next_walks_the_playlist_and_wraps() {
    let mut c = controller(&["a", "b", "c"]);
    c.play(TrackId(0));
    c.play_next();
    assert_eq!(current(&c), Some(1));
    c.play_next();
    assert_eq!(current(&c), Some(2));
    c.play_next();
    assert_eq!(current(&c), Some(0));
}

#[test]
fn previous_wraps_from_first_to_last() {
    let mut c = controller(&["a", "b", "c"]);
    c.play(TrackId(0));
    c.play_previous();
    assert_eq!(current(&c), Some(2));
}

#[test]
fn stepping_a_full_lap_returns_to_the_same_track() {
    for len in 1..=6usize {
        let titles: Vec<String> = (0..len).map(|i| format!("t{i}")).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();

        for start in 0..len as u32 {
            let mut c = controller(&titles);
            c.play(TrackId(start));
            for _ in 0..len {
                c.play_next();
            }
            assert_eq!(current(&c), Some(start), "next, len {len}");
            for _ in 0..len {
                c.play_previous();
            }
            assert_eq!(current(&c), Some(start), "previous, len {len}");
        }
    }
}

#[test]
fn next_and_previous_without_current_start_at_first() {
    let mut c = controller(&["a", "b", "c"]);
    c.play_previous();
    assert_eq!(current(&c), Some(0));

    let mut c = controller(&["a", "b", "c"]);
    c.play_next();
    assert_eq!(current(&c), Some(0));
}

#[test]
fn next_on_empty_playlist_is_a_no_op() {
    let mut c = controller(&[]);
    c.play_next();
    c.play_previous();
    assert_eq!(current(&c), None);
    assert!(c.session().loaded.is_empty());
    assert!(c.session().issued.is_empty());
}

#[test]
fn play_of_unknown_id_changes_nothing() {
    let mut c = controller(&["a"]);
    c.play(TrackId(42));
    assert_eq!(current(&c), None);
    assert!(c.session().loaded.is_empty());
    assert!(c.view().reports.is_empty());
}

#[test]
fn play_loads_source_and_updates_view() {
    let mut c = controller(&["a", "b"]);
    c.play(TrackId(1));

    assert_eq!(c.session().loaded, vec!["/music/1.mp3".to_string()]);
    assert_eq!(c.session().last_seek(), Some(Duration::ZERO));
    assert_eq!(c.state(), PlayerState::Playing);
    assert_eq!(c.view().transport, PlayerState::Playing);
    assert_eq!(c.view().highlighted, Some(TrackId(1)));
    assert_eq!(c.view().now_playing, Some(TrackId(1)));
    assert_eq!(c.view().label, "Play b");
    assert!(c.is_start_pending());
}

#[test]
fn replaying_paused_track_seeks_to_stored_offset() {
    let mut c = controller(&["a", "b"]);
    c.play(TrackId(0));
    c.session_mut().advance(Duration::from_secs(5));
    c.pause();
    assert_eq!(c.store().last_offset(), Duration::from_secs(5));

    c.play(TrackId(0));
    assert_eq!(c.session().last_seek(), Some(Duration::from_secs(5)));
    assert_eq!(c.position(), Duration::from_secs(5));
}

#[test]
fn playing_another_track_starts_from_zero() {
    let mut c = controller(&["a", "b"]);
    c.play(TrackId(0));
    c.session_mut().advance(Duration::from_secs(7));
    c.pause();

    c.play(TrackId(1));
    assert_eq!(c.session().last_seek(), Some(Duration::ZERO));
    assert_eq!(c.store().last_offset(), Duration::ZERO);
}

#[test]
fn pause_is_idempotent() {
    let mut c = controller(&["a"]);
    c.play(TrackId(0));
    c.session_mut().advance(Duration::from_secs(2));
    c.pause();
    c.pause();

    assert_eq!(c.session().pause_calls, 1);
    assert_eq!(c.store().last_offset(), Duration::from_secs(2));
    assert_eq!(c.state(), PlayerState::Paused);
    assert_eq!(c.view().transport, PlayerState::Paused);
}

#[test]
fn toggle_starts_pauses_and_resumes() {
    let mut c = controller(&["a", "b"]);
    c.toggle();
    assert_eq!(current(&c), Some(0));
    assert_eq!(c.state(), PlayerState::Playing);

    c.session_mut().advance(Duration::from_secs(3));
    c.toggle();
    assert_eq!(c.state(), PlayerState::Paused);

    c.toggle();
    assert_eq!(c.state(), PlayerState::Playing);
    assert_eq!(c.session().last_seek(), Some(Duration::from_secs(3)));
}

#[test]
fn resume_or_start_on_empty_playlist_does_nothing() {
    let mut c = controller(&[]);
    c.resume_or_start();
    assert!(c.session().issued.is_empty());
    assert_eq!(c.view().label, "Play");
}

#[test]
fn deleting_current_track_stops_and_clears_state() {
    let mut c = controller(&["a", "b"]);
    c.play(TrackId(0));
    c.session_mut().advance(Duration::from_secs(4));
    c.delete(TrackId(0));

    assert_eq!(current(&c), None);
    assert_eq!(c.store().last_offset(), Duration::ZERO);
    assert!(c.session().is_paused());
    assert_eq!(c.state(), PlayerState::Stopped);
    assert_eq!(c.view().rows, vec![TrackId(1)]);
    assert_eq!(c.view().highlighted, None);
    assert_eq!(c.view().now_playing, None);
    assert_eq!(c.view().label, "Play b");
}

#[test]
fn deleting_another_track_keeps_playing() {
    let mut c = controller(&["a", "b", "c"]);
    c.play(TrackId(1));
    c.delete(TrackId(2));

    assert_eq!(current(&c), Some(1));
    assert_eq!(c.state(), PlayerState::Playing);
    assert_eq!(c.session().pause_calls, 0);
    assert_eq!(c.view().rows, vec![TrackId(0), TrackId(1)]);
}

#[test]
fn deleting_unknown_id_is_ignored() {
    let mut c = controller(&["a"]);
    let renders = c.view().renders;
    c.delete(TrackId(8));
    assert_eq!(c.store().len(), 1);
    assert_eq!(c.view().renders, renders);
}

#[test]
fn deleting_every_track_leaves_a_bare_play_label() {
    let mut c = controller(&["a", "b"]);
    c.delete(TrackId(0));
    c.delete(TrackId(1));
    assert!(c.store().is_empty());
    assert_eq!(c.view().label, "Play");
}

#[test]
fn shuffle_keeps_current_track_and_playback() {
    let mut c = controller(&["a", "b", "c", "d", "e", "f"]);
    c.play(TrackId(4));
    c.shuffle();

    assert_eq!(current(&c), Some(4));
    assert_eq!(c.state(), PlayerState::Playing);
    assert_eq!(c.view().highlighted, Some(TrackId(4)));
    assert_eq!(c.view().rows.len(), 6);
    assert_eq!(c.session().issued.len(), 1);
}

#[test]
fn sort_orders_rows_by_title() {
    let mut c = controller(&["c", "a", "b"]);
    c.sort();
    assert_eq!(c.view().rows, vec![TrackId(1), TrackId(2), TrackId(0)]);
}

#[test]
fn reset_restores_sorted_catalog_with_nothing_loaded() {
    let mut c = controller(&["c", "a", "b"]);
    c.play(TrackId(1));
    c.delete(TrackId(0));
    c.delete(TrackId(2));

    c.reset_playlist();
    assert_eq!(c.view().rows, vec![TrackId(1), TrackId(2), TrackId(0)]);
    assert_eq!(current(&c), None);
    assert_eq!(c.store().last_offset(), Duration::ZERO);
    assert!(c.session().is_paused());
    assert_eq!(c.view().transport, PlayerState::Stopped);
    assert_eq!(c.view().label, "Play a");
    assert_eq!(c.catalog().len(), 3);
}

#[test]
fn ended_continues_with_next_track() {
    let mut c = controller(&["a", "b", "c"]);
    c.play(TrackId(2));
    let ticket = c.session().last_ticket();

    c.session_mut().push(SessionEvent::Ended(ticket));
    assert_eq!(c.pump_session_events(), 1);
    assert_eq!(current(&c), Some(0));
    assert_eq!(c.state(), PlayerState::Playing);
}

#[test]
fn ended_single_track_restarts_from_the_beginning() {
    let mut c = controller(&["only"]);
    c.play(TrackId(0));
    c.session_mut().advance(Duration::from_secs(30));
    c.pause();
    assert_eq!(c.store().last_offset(), Duration::from_secs(30));

    c.resume_or_start();
    let ticket = c.session().last_ticket();
    c.session_mut().push(SessionEvent::Ended(ticket));
    c.pump_session_events();

    assert_eq!(current(&c), Some(0));
    assert_eq!(c.session().loaded.len(), 3);
    assert_eq!(c.session().last_seek(), Some(Duration::ZERO));
    assert_eq!(c.state(), PlayerState::Playing);
}

#[test]
fn ended_after_current_was_deleted_resets_player() {
    let mut c = controller(&["a", "b"]);
    c.play(TrackId(0));
    let ticket = c.session().last_ticket();
    c.delete(TrackId(0));

    c.session_mut().push(SessionEvent::Ended(ticket));
    c.pump_session_events();
    assert_eq!(current(&c), None);
    assert_eq!(c.state(), PlayerState::Stopped);
    assert_eq!(c.session().issued.len(), 1);
}

#[test]
fn ended_of_superseded_request_is_ignored() {
    let mut c = controller(&["a", "b", "c"]);
    c.play(TrackId(0));
    let stale = c.session().last_ticket();
    c.play(TrackId(1));

    c.session_mut().push(SessionEvent::Ended(stale));
    c.pump_session_events();
    assert_eq!(current(&c), Some(1));
    assert_eq!(c.session().issued.len(), 2);
}

#[test]
fn rejection_reverts_to_paused_and_is_reported() {
    let mut c = controller(&["a"]);
    c.play(TrackId(0));
    let ticket = c.session().last_ticket();

    c.session_mut().push(SessionEvent::Rejected {
        ticket,
        reason: "output device unavailable".into(),
    });
    c.pump_session_events();

    assert_eq!(c.state(), PlayerState::Paused);
    assert_eq!(c.view().transport, PlayerState::Paused);
    assert_eq!(current(&c), Some(0));
    assert!(!c.is_start_pending());
    assert_eq!(
        c.view().reports,
        vec![PlaybackError::Rejected {
            title: "a".into(),
            reason: "output device unavailable".into(),
        }]
    );

    // The play control retries the same track.
    c.resume_or_start();
    assert_eq!(c.state(), PlayerState::Playing);
}

#[test]
fn rejection_of_superseded_request_is_ignored() {
    let mut c = controller(&["a", "b"]);
    c.play(TrackId(0));
    let stale = c.session().last_ticket();
    c.play(TrackId(1));

    c.session_mut().push(SessionEvent::Rejected {
        ticket: stale,
        reason: "too late".into(),
    });
    c.pump_session_events();

    assert_eq!(c.state(), PlayerState::Playing);
    assert!(c.view().reports.is_empty());
    assert!(c.is_start_pending());
}

#[test]
fn started_confirms_the_pending_request() {
    let mut c = controller(&["a"]);
    c.play(TrackId(0));
    let ticket = c.session().last_ticket();
    c.session_mut().push(SessionEvent::Started(ticket));
    c.pump_session_events();
    assert!(!c.is_start_pending());
    assert_eq!(c.state(), PlayerState::Playing);
}

#[test]
fn unanswered_start_times_out() {
    let catalog = Catalog::new(tracks(&["a"])).unwrap();
    let mut c = PlaybackController::new(catalog, FakeSession::default(), RecordingView::default())
        .with_start_timeout(Duration::from_secs(5));
    c.play(TrackId(0));

    c.tick(Instant::now());
    assert_eq!(c.state(), PlayerState::Playing);

    c.tick(Instant::now() + Duration::from_secs(6));
    assert_eq!(c.state(), PlayerState::Paused);
    assert_eq!(
        c.view().reports,
        vec![PlaybackError::StartTimedOut {
            title: "a".into(),
            timeout: Duration::from_secs(5),
        }]
    );
}

#[test]
fn confirmed_start_never_times_out() {
    let catalog = Catalog::new(tracks(&["a"])).unwrap();
    let mut c = PlaybackController::new(catalog, FakeSession::default(), RecordingView::default())
        .with_start_timeout(Duration::from_secs(1));
    c.play(TrackId(0));
    let ticket = c.session().last_ticket();
    c.session_mut().push(SessionEvent::Started(ticket));
    c.pump_session_events();

    c.tick(Instant::now() + Duration::from_secs(60));
    assert_eq!(c.state(), PlayerState::Playing);
    assert!(c.view().reports.is_empty());
}

#[test]
fn zero_timeout_disables_the_check() {
    let catalog = Catalog::new(tracks(&["a"])).unwrap();
    let mut c = PlaybackController::new(catalog, FakeSession::default(), RecordingView::default())
        .with_start_timeout(Duration::ZERO);
    c.play(TrackId(0));
    c.tick(Instant::now() + Duration::from_secs(3600));
    assert_eq!(c.state(), PlayerState::Playing);
}

#[test]
fn dispatch_routes_commands() {
    let mut c = controller(&["b", "a", "c"]);
    c.dispatch(Command::Next);
    assert_eq!(current(&c), Some(0));

    c.dispatch(Command::Play(TrackId(2)));
    assert_eq!(current(&c), Some(2));

    c.dispatch(Command::PlayPause);
    assert_eq!(c.state(), PlayerState::Paused);

    c.dispatch(Command::Resume);
    assert_eq!(c.state(), PlayerState::Playing);

    c.dispatch(Command::Previous);
    assert_eq!(current(&c), Some(1));

    c.dispatch(Command::Pause);
    assert_eq!(c.state(), PlayerState::Paused);

    c.dispatch(Command::Sort);
    assert_eq!(c.view().rows, vec![TrackId(1), TrackId(0), TrackId(2)]);

    c.dispatch(Command::Shuffle);
    assert_eq!(c.view().rows.len(), 3);

    c.dispatch(Command::Delete(TrackId(1)));
    assert_eq!(current(&c), None);
    assert_eq!(c.store().len(), 2);

    c.dispatch(Command::Reset);
    assert_eq!(c.view().rows, vec![TrackId(1), TrackId(0), TrackId(2)]);
}

#[test]
fn resume_while_playing_keeps_the_track_running() {
    let mut c = controller(&["a", "b"]);
    c.play(TrackId(0));
    c.session_mut().advance(Duration::from_secs(42));
    let loads = c.session().loaded.len();
    let seeks = c.session().seeks.clone();

    c.dispatch(Command::Resume);
    assert_eq!(c.session().loaded.len(), loads);
    assert_eq!(c.session().seeks, seeks);
    assert_eq!(c.session().issued.len(), 1);
    assert_eq!(c.position(), Duration::from_secs(42));
    assert_eq!(c.state(), PlayerState::Playing);
}

#[test]
fn play_button_label_prefers_current_then_first() {
    let list = tracks(&["first", "second"]);
    assert_eq!(play_button_label(Some(&list[1]), list.first()), "Play second");
    assert_eq!(play_button_label(None, list.first()), "Play first");
    assert_eq!(play_button_label(None, None), "Play");
}
