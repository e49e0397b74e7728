mod common;
use common::{approx, at, t0};

use rcycletimer::models::cycle::CycleActivity;
use rcycletimer::models::session::SessionState;
use rcycletimer::{CycleTimer, Feedback, TimerError, Transition};

fn active_timer() -> CycleTimer {
    let mut timer = CycleTimer::new();
    timer.start_session_at(t0()).expect("session start");
    timer
}

#[test]
fn test_start_timer_without_session_fails() {
    let mut timer = CycleTimer::new();

    let err = timer.start_timer_at("Assemble", t0()).unwrap_err();

    assert_eq!(err, TimerError::NoActiveSession);
    assert!(timer.current().is_none());
    assert!(timer.completed().is_empty());
    assert_eq!(timer, CycleTimer::new());
}

#[test]
fn test_reference_cycle() {
    // session at T0, task at T0, wait at +10s, resume at +15s, complete at +25s
    let mut timer = active_timer();
    timer.start_timer_at("Assemble", at(0)).unwrap();
    timer.start_waiting_at(at(10)).unwrap();
    timer.resume_timer_at(at(15)).unwrap();
    let done = timer.complete_cycle_at(at(25)).unwrap();

    let Transition::CycleCompleted(cycle) = done else {
        panic!("expected a completed cycle, got {done:?}");
    };

    assert_eq!(cycle.task_name, "Assemble");
    assert_eq!(cycle.seq, 1);
    assert!(approx(cycle.work_seconds, 20.0));
    assert!(approx(cycle.wait_seconds, 5.0));
    assert!(approx(cycle.total_seconds, 25.0));
    assert_eq!(cycle.end_time, at(25));

    assert!(timer.current().is_none());
    assert!(!timer.is_waiting());
    assert_eq!(timer.completed(), &[cycle]);
}

#[test]
fn test_work_plus_wait_equals_total_for_every_cycle() {
    let mut timer = active_timer();

    timer.start_timer_at("Weld", at(0)).unwrap();
    timer.start_waiting_at(at(3)).unwrap();
    timer.resume_timer_at(at(7)).unwrap();
    timer.start_waiting_at(at(11)).unwrap();
    timer.complete_cycle_at(at(20)).unwrap(); // closed while waiting

    timer.start_timer_at("Install", at(20)).unwrap();
    timer.complete_cycle_at(at(42)).unwrap(); // never waited

    timer.start_timer_at("Search", at(50)).unwrap();
    timer.start_waiting_at(at(50)).unwrap();
    timer.complete_cycle_at(at(61)).unwrap(); // only waited

    assert_eq!(timer.completed().len(), 3);
    for c in timer.completed() {
        assert!(c.work_seconds >= 0.0 && c.wait_seconds >= 0.0);
        assert!(
            approx(c.work_seconds + c.wait_seconds, c.total_seconds),
            "cycle {} breaks work + wait == total",
            c.task_name
        );
    }

    let weld = &timer.completed()[0];
    assert!(approx(weld.work_seconds, 7.0));
    assert!(approx(weld.wait_seconds, 13.0));

    let search = &timer.completed()[2];
    assert!(approx(search.work_seconds, 0.0));
    assert!(approx(search.wait_seconds, 11.0));

    let seqs: Vec<u32> = timer.completed().iter().map(|c| c.seq).collect();
    assert_eq!(seqs, vec![1, 2, 3]);
}

#[test]
fn test_repeated_wait_resume_accumulates() {
    let mut timer = active_timer();
    timer.start_timer_at("Assemble", at(0)).unwrap();

    let mut last_wait = 0.0;
    let mut t = 0;
    for _ in 0..5 {
        t += 4; // work 4s
        timer.start_waiting_at(at(t)).unwrap();
        t += 2; // wait 2s
        timer.resume_timer_at(at(t)).unwrap();

        let open = timer.current().unwrap();
        assert!(open.wait_seconds > last_wait);
        last_wait = open.wait_seconds;
    }

    let open = timer.current().unwrap();
    assert!(approx(open.work_seconds, 20.0));
    assert!(approx(open.wait_seconds, 10.0));

    timer.complete_cycle_at(at(t + 5)).unwrap();
    let c = &timer.completed()[0];
    assert!(approx(c.work_seconds, 25.0));
    assert!(approx(c.wait_seconds, 10.0));
    assert!(approx(c.total_seconds, 35.0));
}

#[test]
fn test_waiting_and_working_are_exclusive() {
    let mut timer = active_timer();
    timer.start_timer_at("Assemble", at(0)).unwrap();

    assert!(matches!(
        timer.current().unwrap().activity,
        CycleActivity::Working { resumed_at } if resumed_at == at(0)
    ));
    assert_eq!(timer.resume_timer_at(at(1)), Err(TimerError::NotWaiting));

    timer.start_waiting_at(at(2)).unwrap();
    assert!(timer.is_waiting());
    assert!(matches!(
        timer.current().unwrap().activity,
        CycleActivity::Waiting { wait_start } if wait_start == at(2)
    ));

    let before = timer.clone();
    assert_eq!(timer.start_waiting_at(at(3)), Err(TimerError::AlreadyWaiting));
    assert_eq!(timer, before);
}

#[test]
fn test_start_timer_rejects_open_cycle_and_blank_names() {
    let mut timer = active_timer();

    assert_eq!(
        timer.start_timer_at("   ", at(0)),
        Err(TimerError::EmptyTaskName)
    );

    timer.start_timer_at("  Assemble  ", at(0)).unwrap();
    assert_eq!(timer.current().unwrap().task_name, "Assemble");

    let before = timer.clone();
    assert_eq!(
        timer.start_timer_at("Weld", at(5)),
        Err(TimerError::CycleAlreadyOpen {
            task: "Assemble".into()
        })
    );
    assert_eq!(timer, before);
}

#[test]
fn test_commands_need_an_open_cycle() {
    let mut timer = active_timer();

    assert_eq!(timer.start_waiting_at(at(1)), Err(TimerError::NoOpenCycle));
    assert_eq!(timer.resume_timer_at(at(1)), Err(TimerError::NoOpenCycle));
    assert_eq!(timer.complete_cycle_at(at(1)), Err(TimerError::NoOpenCycle));
    assert!(timer.completed().is_empty());
}

#[test]
fn test_start_session_twice_is_rejected_without_changes() {
    let mut timer = active_timer();
    let before = timer.clone();

    assert_eq!(
        timer.start_session_at(at(100)),
        Err(TimerError::SessionAlreadyActive)
    );
    assert_eq!(timer, before);
    assert_eq!(timer.session().start_time(), Some(t0()));
    assert!(timer.session().is_active());
}

#[test]
fn test_end_session_closes_open_cycle_exactly_once() {
    let mut timer = active_timer();
    timer.start_timer_at("Assemble", at(0)).unwrap();
    timer.start_waiting_at(at(8)).unwrap();

    let ended = timer.end_session_at(at(12)).unwrap();

    match ended {
        Transition::SessionEnded { closed, cycles } => {
            let closed = closed.expect("open cycle closed");
            assert_eq!(closed.task_name, "Assemble");
            assert!(approx(closed.work_seconds, 8.0));
            assert!(approx(closed.wait_seconds, 4.0));
            assert_eq!(cycles, 1);
        }
        other => panic!("unexpected transition {other:?}"),
    }

    assert_eq!(timer.completed().len(), 1);
    assert!(timer.current().is_none());
    assert!(!timer.is_waiting());
    assert_eq!(
        timer.session(),
        &SessionState::Ended {
            start_time: t0(),
            end_time: at(12)
        }
    );

    // terminal: nothing else gets appended
    assert_eq!(timer.end_session_at(at(13)), Err(TimerError::SessionEnded));
    assert_eq!(timer.complete_cycle_at(at(13)), Err(TimerError::SessionEnded));
    assert_eq!(timer.start_session_at(at(13)), Err(TimerError::SessionEnded));
    assert_eq!(
        timer.start_timer_at("Again", at(13)),
        Err(TimerError::SessionEnded)
    );
    assert_eq!(timer.completed().len(), 1);
}

#[test]
fn test_end_session_without_open_cycle_appends_nothing() {
    let mut timer = active_timer();
    timer.start_timer_at("Assemble", at(0)).unwrap();
    timer.complete_cycle_at(at(10)).unwrap();

    let ended = timer.end_session_at(at(20)).unwrap();

    assert_eq!(
        ended,
        Transition::SessionEnded {
            closed: None,
            cycles: 1
        }
    );
    assert_eq!(timer.completed().len(), 1);
}

#[test]
fn test_end_session_before_start_fails() {
    let mut timer = CycleTimer::new();
    assert_eq!(timer.end_session_at(t0()), Err(TimerError::NoActiveSession));
    assert_eq!(timer.session(), &SessionState::NotStarted);
}

#[test]
fn test_stats_zero_when_nothing_accrued() {
    let timer = CycleTimer::new();
    let stats = timer.stats_at(t0());

    assert_eq!(stats.total_seconds, 0.0);
    assert_eq!(stats.work_percentage, 0.0);
    assert_eq!(stats.wait_percentage, 0.0);
    assert_eq!(stats.completed_cycles, 0);
    assert!(!stats.open_cycle);

    // a task started "now" has not accrued anything yet either
    let mut timer = active_timer();
    timer.start_timer_at("Assemble", at(0)).unwrap();
    let stats = timer.stats_at(at(0));
    assert_eq!(stats.work_percentage, 0.0);
    assert_eq!(stats.wait_percentage, 0.0);
    assert!(stats.open_cycle);
}

#[test]
fn test_stats_percentages_sum_to_hundred() {
    let mut timer = active_timer();
    timer.start_timer_at("Assemble", at(0)).unwrap();
    timer.start_waiting_at(at(10)).unwrap();
    timer.resume_timer_at(at(15)).unwrap();
    timer.complete_cycle_at(at(25)).unwrap();

    let stats = timer.stats_at(at(100));

    assert!(approx(stats.work_seconds, 20.0));
    assert!(approx(stats.wait_seconds, 5.0));
    assert!(approx(stats.work_percentage, 80.0));
    assert!(approx(stats.wait_percentage, 20.0));
    assert!(approx(stats.work_percentage + stats.wait_percentage, 100.0));
    assert_eq!(stats.completed_cycles, 1);
}

#[test]
fn test_stats_include_open_cycle_without_mutation() {
    let mut timer = active_timer();
    timer.start_timer_at("Assemble", at(0)).unwrap();
    timer.complete_cycle_at(at(10)).unwrap();
    timer.start_timer_at("Weld", at(10)).unwrap();
    timer.start_waiting_at(at(16)).unwrap();

    let before = timer.clone();
    let stats = timer.stats_at(at(20));

    // 10 + 6 work, 4 live wait
    assert!(approx(stats.work_seconds, 16.0));
    assert!(approx(stats.wait_seconds, 4.0));
    assert!(approx(stats.total_seconds, 20.0));
    assert!(approx(stats.work_percentage, 80.0));
    assert!(stats.open_cycle);
    assert!(stats.waiting);
    assert_eq!(timer, before);

    // later reads see more wait, stored values stay put
    let later = timer.stats_at(at(30));
    assert!(approx(later.wait_seconds, 14.0));
    assert!(approx(timer.current().unwrap().wait_seconds, 0.0));
}

#[test]
fn test_backwards_clock_keeps_invariant() {
    let mut timer = active_timer();
    timer.start_timer_at("Assemble", at(10)).unwrap();
    timer.start_waiting_at(at(20)).unwrap();
    timer.complete_cycle_at(at(5)).unwrap();

    let c = &timer.completed()[0];
    assert!(c.wait_seconds >= 0.0);
    assert!(c.work_seconds + c.wait_seconds <= c.total_seconds + 1e-9);
}

#[test]
fn test_operator_is_stamped_on_close() {
    let mut timer = CycleTimer::with_operator("  Alice ");
    timer.start_session_at(t0()).unwrap();
    timer.start_timer_at("Assemble", at(0)).unwrap();
    timer.set_operator("Bob");
    timer.complete_cycle_at(at(5)).unwrap();

    timer.set_operator("   ");
    timer.start_timer_at("Weld", at(5)).unwrap();
    timer.complete_cycle_at(at(9)).unwrap();

    assert_eq!(timer.completed()[0].operator.as_deref(), Some("Bob"));
    assert_eq!(timer.completed()[1].operator, None);
}

#[test]
fn test_feedback_pairs() {
    let mut timer = CycleTimer::new();

    let fb = Feedback::from(timer.start_timer_at("Assemble", t0()));
    assert!(!fb.success);
    assert!(fb.message.contains("No active session"));

    let fb = Feedback::from(timer.start_session_at(t0()));
    assert!(fb.success);
    assert!(fb.message.starts_with("Session started"));

    let fb = Feedback::from(timer.start_timer_at("Assemble", t0()));
    assert_eq!(fb, Feedback::ok("Started task 'Assemble'"));

    let fb = Feedback::from(timer.resume_timer_at(at(1)));
    assert_eq!(fb, Feedback::fail("Not waiting."));
}

#[test]
fn test_timer_state_survives_serialization() {
    let mut timer = CycleTimer::with_operator("Alice");
    timer.start_session_at(t0()).unwrap();
    timer.start_timer_at("Assemble", at(0)).unwrap();
    timer.complete_cycle_at(at(30)).unwrap();
    timer.start_timer_at("Weld", at(30)).unwrap();
    timer.start_waiting_at(at(40)).unwrap();

    let json = serde_json::to_string(&timer).unwrap();
    let mut restored: CycleTimer = serde_json::from_str(&json).unwrap();

    assert!(restored.is_waiting());
    restored.resume_timer_at(at(45)).unwrap();
    restored.complete_cycle_at(at(50)).unwrap();

    let weld = &restored.completed()[1];
    assert!(approx(weld.work_seconds, 15.0));
    assert!(approx(weld.wait_seconds, 5.0));
    assert_eq!(weld.operator.as_deref(), Some("Alice"));
}
