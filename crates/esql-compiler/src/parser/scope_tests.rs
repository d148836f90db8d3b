use super::scope::MethodExprCounter;

#[test]
fn exit_returns_own_count() {
    let mut counter = MethodExprCounter::new();
    counter.enter_scope();
    for _ in 0..3 {
        counter.record_invocation();
    }
    assert_eq!(counter.exit_scope(), 3);
    assert_eq!(counter.count(), 3);
    assert_eq!(counter.depth(), 0);
}

#[test]
fn parent_gets_child_count_added() {
    let mut counter = MethodExprCounter::new();
    counter.enter_scope();
    counter.record_invocation();
    counter.record_invocation();

    counter.enter_scope();
    assert_eq!(counter.count(), 0);
    counter.record_invocation();
    assert_eq!(counter.exit_scope(), 1);
    assert_eq!(counter.count(), 3);

    counter.record_invocation();
    assert_eq!(counter.exit_scope(), 4);
}

#[test]
fn siblings_do_not_leak() {
    let mut counter = MethodExprCounter::new();
    counter.enter_scope();

    counter.enter_scope();
    counter.record_invocation();
    counter.record_invocation();
    assert_eq!(counter.exit_scope(), 2);

    counter.enter_scope();
    counter.record_invocation();
    assert_eq!(counter.exit_scope(), 1);

    assert_eq!(counter.exit_scope(), 3);
}

#[test]
fn exit_without_enter_starts_from_zero() {
    let mut counter = MethodExprCounter::new();
    counter.record_invocation();
    assert_eq!(counter.exit_scope(), 1);
    assert_eq!(counter.count(), 1);
}

#[test]
fn reset_restores_fresh_state() {
    let mut counter = MethodExprCounter::new();
    counter.enter_scope();
    counter.record_invocation();
    counter.enter_scope();
    counter.reset();
    assert_eq!(counter, MethodExprCounter::new());
}
