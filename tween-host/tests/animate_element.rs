//! 元素动画的端到端测试：手动时钟驱动，检查元素上的调用序列。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tween_host::{AnimatedElement, ElementCall, RecordingElement, StyleTarget, TimerScheduler};
use tween_runtime::{
    AnimateOptions, Delta, DeltaSpec, EaseMode, LoopState, ManualClock, ManualScheduler, Point,
};

fn setup() -> (
    Rc<ManualScheduler>,
    Rc<ManualClock>,
    Rc<RecordingElement>,
    AnimatedElement<RecordingElement>,
) {
    let scheduler = Rc::new(ManualScheduler::new());
    let clock = Rc::new(ManualClock::new(0.0));
    let element = Rc::new(RecordingElement::new());
    let animated = AnimatedElement::new(element.clone(), scheduler.clone(), clock.clone());
    (scheduler, clock, element, animated)
}

#[test]
fn test_linear_translate_reaches_end_once() {
    let (scheduler, clock, element, animated) = setup();
    let completions = Rc::new(Cell::new(0));

    let c = completions.clone();
    animated
        .animate(
            "x",
            AnimateOptions::new()
                .with_start(0.0)
                .with_end(100.0)
                .with_delta(Delta::linear())
                .with_callback(move |frame| {
                    assert_eq!(frame.progress, 1.0);
                    c.set(c.get() + 1);
                }),
        )
        .unwrap();

    let frames = scheduler.run_until_idle(&clock, 250.0, 100);

    assert_eq!(frames, 4);
    assert_eq!(completions.get(), 1);
    let values: Vec<String> = element.calls().iter().map(ToString::to_string).collect();
    assert_eq!(
        values,
        vec![
            "translateX(0)",
            "translateX(25)",
            "translateX(50)",
            "translateX(75)",
            "translateX(100)",
        ]
    );
}

#[test]
fn test_equal_endpoints_complete_immediately() {
    let (scheduler, _clock, element, animated) = setup();
    let completed = Rc::new(Cell::new(false));

    let c = completed.clone();
    animated
        .animate(
            "y",
            AnimateOptions::new()
                .with_start(5.0)
                .with_end(5.0)
                .with_callback(move |_| c.set(true)),
        )
        .unwrap();

    assert!(completed.get());
    assert!(scheduler.is_idle());
    assert_eq!(element.call_count(), 0);
}

#[test]
fn test_condition_false_skips() {
    let (scheduler, _clock, element, animated) = setup();
    let completed = Rc::new(Cell::new(false));

    let c = completed.clone();
    animated
        .animate(
            "x",
            AnimateOptions::new()
                .with_end(10.0)
                .with_condition(false)
                .with_callback(move |_| c.set(true)),
        )
        .unwrap();

    assert!(completed.get());
    assert!(scheduler.is_idle());
    assert_eq!(element.call_count(), 0);
}

#[test]
fn test_new_animation_replaces_running_one() {
    let (scheduler, clock, element, animated) = setup();
    let first_done = Rc::new(Cell::new(false));

    let f = first_done.clone();
    animated
        .animate(
            "x",
            AnimateOptions::new()
                .with_end(100.0)
                .with_callback(move |_| f.set(true)),
        )
        .unwrap();
    clock.set(200.0);
    scheduler.run_frame(200.0);

    element.clear();
    animated
        .animate(
            "y",
            AnimateOptions::new()
                .with_end(10.0)
                .with_delta(Delta::linear()),
        )
        .unwrap();
    assert_eq!(scheduler.pending_count(), 1);

    scheduler.run_until_idle(&clock, 500.0, 10);

    assert!(!first_done.get());
    assert!(
        element
            .calls()
            .iter()
            .all(|call| matches!(call, ElementCall::TranslateY(_)))
    );
    assert_eq!(element.last_call(), Some(ElementCall::TranslateY(10.0)));
}

#[test]
fn test_cancel_with_stale_handle_keeps_running() {
    let (scheduler, clock, element, animated) = setup();

    animated
        .animate("x", AnimateOptions::new().with_end(1.0))
        .unwrap();
    let stale = animated.animation().current_handle().unwrap();

    clock.set(100.0);
    scheduler.run_frame(100.0);
    let current = animated.animation().current_handle().unwrap();
    assert_ne!(stale, current);

    animated.cancel_animation(Some(stale));
    assert_eq!(animated.state(), LoopState::Scheduled);

    animated.cancel_animation(Some(current));
    assert_eq!(animated.state(), LoopState::Cancelled);
    let calls = element.call_count();
    scheduler.run_until_idle(&clock, 100.0, 20);
    assert_eq!(element.call_count(), calls);
}

#[test]
fn test_chained_animation_from_callback() {
    let scheduler = Rc::new(ManualScheduler::new());
    let clock = Rc::new(ManualClock::new(0.0));
    let element = Rc::new(RecordingElement::new());
    let animated = Rc::new(AnimatedElement::new(
        element.clone(),
        scheduler.clone(),
        clock.clone(),
    ));

    let next = Rc::downgrade(&animated);
    animated
        .animate(
            "x",
            AnimateOptions::new()
                .with_end(10.0)
                .with_delta(Delta::linear())
                .with_callback(move |_| {
                    if let Some(animated) = next.upgrade() {
                        animated
                            .animate(
                                "y",
                                AnimateOptions::new()
                                    .with_end(20.0)
                                    .with_delta(Delta::linear()),
                            )
                            .unwrap();
                    }
                }),
        )
        .unwrap();

    scheduler.run_until_idle(&clock, 500.0, 20);

    assert_eq!(animated.state(), LoopState::Completed);
    let calls = element.calls();
    assert!(calls.contains(&ElementCall::TranslateX(10.0)));
    assert_eq!(calls.last(), Some(&ElementCall::TranslateY(20.0)));
}

#[test]
fn test_custom_style_and_step_context() {
    let (scheduler, clock, element, animated) = setup();
    let angles = Rc::new(RefCell::new(Vec::new()));

    let a = angles.clone();
    let rotate = StyleTarget::custom(move |el, ctx| {
        let angle = ctx.get_value(0.0, 90.0);
        a.borrow_mut().push(angle);
        el.style("rotate", &format!("{angle}deg"));
    });

    animated
        .animate(
            rotate,
            AnimateOptions::new()
                .with_start(Point::new(0.0, 0.0))
                .with_end(Point::new(1.0, 1.0))
                .with_delta(Delta::linear()),
        )
        .unwrap();
    scheduler.run_until_idle(&clock, 500.0, 10);

    assert_eq!(*angles.borrow(), vec![0.0, 45.0, 90.0]);
    assert_eq!(
        element.last_call(),
        Some(ElementCall::Style {
            name: "rotate".to_string(),
            value: "90deg".to_string()
        })
    );
}

#[test]
fn test_ease_in_out_delta_curve() {
    let (scheduler, clock, element, animated) = setup();

    let delta = animated.set_delta(
        EaseMode::EaseInOutDelta,
        Some(&DeltaSpec::new("quadrantic", 2.0)),
        Some(&DeltaSpec::named("linear")),
    );
    animated
        .animate(
            "x",
            AnimateOptions::new().with_end(100.0).with_delta(delta),
        )
        .unwrap();
    scheduler.run_until_idle(&clock, 250.0, 10);

    // 前半段 quadrantic(2p)/2，后半段 (2 - linear(2(1-p)))/2
    assert_eq!(
        element.calls(),
        vec![
            ElementCall::TranslateX(0.0),
            ElementCall::TranslateX(12.5),
            ElementCall::TranslateX(50.0),
            ElementCall::TranslateX(75.0),
            ElementCall::TranslateX(100.0),
        ]
    );
}

#[test]
fn test_timer_scheduler_drives_element() {
    let clock = Rc::new(ManualClock::new(0.0));
    let scheduler = Rc::new(TimerScheduler::with_interval(clock.clone(), 100.0));
    let element = Rc::new(RecordingElement::new());
    let animated = AnimatedElement::new(element.clone(), scheduler.clone(), clock.clone());

    animated
        .animate(
            "x",
            AnimateOptions::new()
                .with_end(10.0)
                .with_duration(0.3)
                .with_delta(Delta::linear()),
        )
        .unwrap();
    // 同步第一帧之后排队一帧，间隔 100ms 内的请求会被推迟
    assert_eq!(scheduler.pending_count(), 1);

    for step in 1..=5 {
        clock.set(step as f64 * 100.0);
        scheduler.run_due();
    }

    assert!(scheduler.is_idle());
    assert_eq!(animated.state(), LoopState::Completed);
    assert_eq!(element.last_call(), Some(ElementCall::TranslateX(10.0)));
}
