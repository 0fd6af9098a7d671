use super::*;
use crate::foundation::error::NinesError;

type Calls = Vec<(usize, f64)>;

fn recorder(index: usize) -> impl FnMut(&mut Calls, f64) -> NinesResult<()> {
    move |calls, t| {
        calls.push((index, t));
        Ok(())
    }
}

fn compose(weights: &[f64]) -> ComposeAnimation<'static, Calls> {
    let mut anim = ComposeAnimation::new(Calls::new());
    for (i, w) in weights.iter().enumerate() {
        anim.register(*w, recorder(i));
    }
    anim
}

fn take(anim: &mut ComposeAnimation<'_, Calls>) -> Calls {
    std::mem::take(anim.state_mut())
}

#[test]
fn start_invokes_only_first_segment() {
    let mut anim = compose(&[1.0, 2.0, 3.0]);
    anim.evaluate(0.0).unwrap();
    assert_eq!(take(&mut anim), vec![(0, 0.0)]);
}

#[test]
fn end_invokes_every_segment_at_one_in_order() {
    let mut anim = compose(&[1.0, 0.0, 2.0, 3.0]);
    anim.evaluate(1.0).unwrap();
    assert_eq!(
        take(&mut anim),
        vec![(0, 1.0), (1, 1.0), (2, 1.0), (3, 1.0)]
    );
}

#[test]
fn end_reaches_trailing_zero_weight_segment() {
    let mut anim = compose(&[0.25, 2.3, 0.1, 2.3, 0.1, 0.0]);
    anim.evaluate(1.0).unwrap();
    let calls = take(&mut anim);
    assert_eq!(calls.len(), 6);
    assert!(calls.iter().enumerate().all(|(i, c)| *c == (i, 1.0)));
}

#[test]
fn quarter_progress_stays_in_first_half() {
    let mut anim = compose(&[1.0, 1.0]);
    anim.evaluate(0.25).unwrap();
    assert_eq!(take(&mut anim), vec![(0, 0.5)]);
}

#[test]
fn three_quarters_finalizes_then_advances() {
    let mut anim = compose(&[1.0, 1.0]);
    anim.evaluate(0.75).unwrap();
    assert_eq!(take(&mut anim), vec![(0, 1.0), (1, 0.5)]);
}

#[test]
fn zero_weight_segment_is_only_seen_at_one() {
    let mut anim = compose(&[1.0, 0.0, 1.0]);
    for k in 0..=40 {
        anim.evaluate(f64::from(k) / 40.0).unwrap();
        let calls = take(&mut anim);
        let zero: Vec<_> = calls.iter().filter(|(i, _)| *i == 1).collect();
        assert!(zero.len() <= 1, "invoked more than once in one pass");
        assert!(zero.iter().all(|(_, t)| *t == 1.0));
        if k < 20 {
            assert!(zero.is_empty());
        } else {
            assert_eq!(zero.len(), 1);
        }
    }
}

#[test]
fn negative_weight_is_dropped() {
    let mut anim = compose(&[1.0, 1.0]);
    let before = anim.timeline().clone();
    anim.register(-1.0, recorder(99));
    assert_eq!(anim.len(), 2);
    assert_eq!(anim.timeline(), &before);

    anim.register(f64::NAN, recorder(98));
    anim.register(f64::INFINITY, recorder(97));
    assert_eq!(anim.len(), 2);
}

#[test]
fn duration_tracks_weight_sum() {
    let mut anim = ComposeAnimation::new(Calls::new());
    assert_eq!(anim.run_time(), DEFAULT_RUN_TIME);
    anim.set_duration_from_weights();
    anim.register(2.0, recorder(0)).register(3.0, recorder(1));
    assert_eq!(anim.run_time(), 5.0);
    anim.register(1.0, recorder(2));
    assert_eq!(anim.run_time(), 6.0);
    // Idempotent.
    anim.set_duration_from_weights().set_duration_from_weights();
    assert_eq!(anim.run_time(), 6.0);
}

#[test]
fn fixed_run_time_ignores_weights() {
    let anim = compose(&[2.0, 3.0]).with_run_time(4.0);
    assert_eq!(anim.run_time(), 4.0);
    let anim = anim.matching_weights().with_run_time(9.0);
    assert_eq!(anim.run_time(), 5.0);
}

#[test]
fn empty_compositor_is_a_no_op() {
    let mut anim = compose(&[]);
    anim.evaluate(0.5).unwrap();
    assert!(anim.state().is_empty());
}

#[test]
fn all_zero_weights_fail_loudly() {
    let mut anim = compose(&[0.0, 0.0]);
    let err = anim.evaluate(0.3).unwrap_err();
    assert!(matches!(err, NinesError::Animation(_)));
    assert!(anim.state().is_empty());
}

#[test]
fn mutator_errors_propagate() {
    let mut anim = ComposeAnimation::new(0u32)
        .with_segment(1.0, |n: &mut u32, _| {
            *n += 1;
            Ok(())
        })
        .with_segment(1.0, |_: &mut u32, _| Err(NinesError::evaluation("boom")));
    assert!(anim.evaluate(0.4).is_ok());
    let err = anim.evaluate(0.9).unwrap_err();
    assert!(err.to_string().contains("boom"));
    assert_eq!(*anim.state(), 2);
}

#[test]
fn clean_up_hook_runs_on_state() {
    let mut anim = compose(&[1.0]).on_clean_up(|calls| {
        calls.clear();
        calls.push((usize::MAX, 1.0));
        Ok(())
    });
    anim.evaluate(0.5).unwrap();
    Animation::clean_up(&mut anim).unwrap();
    assert_eq!(anim.into_state(), vec![(usize::MAX, 1.0)]);
}

#[test]
fn mutators_may_borrow_external_target() {
    let mut target = 0.0_f64;
    {
        let mut anim = ComposeAnimation::new(&mut target)
            .with_segment(1.0, |t: &mut &mut f64, p| {
                **t = p * 10.0;
                Ok(())
            })
            .with_segment(1.0, |t: &mut &mut f64, p| {
                **t = 10.0 + p;
                Ok(())
            });
        anim.interpolate(0.25).unwrap();
        assert_eq!(**anim.state(), 5.0);
        anim.interpolate(1.0).unwrap();
    }
    assert_eq!(target, 11.0);
}
