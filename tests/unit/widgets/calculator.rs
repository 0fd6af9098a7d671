use super::*;
use crate::animation::driver::{Animation, Player};
use crate::foundation::core::Fps;

fn calc() -> Calculator {
    Calculator::new(&CalculatorOpts::default()).unwrap()
}

#[test]
fn keys_form_a_five_by_four_grid() {
    let c = calc();
    assert_eq!(c.keys.len(), ROWS * COLS);
    let ac = c.key("AC").unwrap().button.center;
    let c_key = c.key("C").unwrap().button.center;
    let seven = c.key("7").unwrap().button.center;
    let plus = c.key("+").unwrap().button.center;
    // Same row, next column.
    assert!((ac.y - c_key.y).abs() < 1e-12);
    assert!(c_key.x > ac.x);
    // Next row down.
    assert!((ac.x - seven.x).abs() < 1e-12);
    assert!(seven.y < ac.y);
    // Bottom-right corner mirrors top-left about the origin, screen aside.
    assert!((plus.x + ac.x).abs() < 1e-9);
    assert!((plus.y + ac.y).abs() < 1e-9);
    // Labels sit on their buttons; every button is the same size.
    for key in &c.keys {
        assert_eq!(key.text.center, key.button.center);
        assert_eq!(key.button.size, c.keys[0].button.size);
        assert!(!key.pressed);
    }
}

#[test]
fn screen_sits_above_keys_inside_enclosure() {
    let c = calc();
    let top_row = c.key("AC").unwrap().button.bounds().y1;
    assert!((c.screen.bounds().y0 - (top_row + GRID_BUFF)).abs() < 1e-9);
    assert_eq!(c.screen.size.height, c.keys[0].button.size.height);
    let outer = c.bounds();
    assert!(outer.contains(c.screen.center));
    assert!(outer.y1 > c.screen.bounds().y1);
    assert!(outer.x0 < c.key("AC").unwrap().button.bounds().x0);

    let tall = Calculator::new(&CalculatorOpts {
        screen_height: Some(3.0),
        ..CalculatorOpts::default()
    })
    .unwrap();
    assert_eq!(tall.screen.size.height, 3.0);
}

#[test]
fn press_and_unpress_swap_colors() {
    let mut c = calc();
    c.press_button("5").unwrap();
    let key = c.key("5").unwrap();
    assert!(key.pressed);
    assert_eq!(key.button.color, Rgba8::PURPLE);
    assert_eq!(key.text.color, Rgba8::BLACK);
    c.unpress_button("5").unwrap();
    let key = c.key("5").unwrap();
    assert!(!key.pressed);
    assert_eq!(key.button.color, Rgba8::BLACK);
    assert_eq!(key.text.color, Rgba8::WHITE);
}

#[test]
fn unknown_key_is_a_validation_error() {
    let mut c = calc();
    assert!(matches!(
        c.press_button("%"),
        Err(NinesError::Validation(_))
    ));
    assert!(c.unpress_button("sqrt").is_err());
    assert!(c.taps_animation(&["1", "?"]).is_err());
}

#[test]
fn screen_text_is_right_aligned() {
    let mut c = calc();
    c.show_on_screen("1234");
    let shown = c.screen_text.as_ref().unwrap();
    assert_eq!(shown.text, "1234");
    let screen = c.screen.bounds();
    assert!((shown.item.bounds().x1 - (screen.x1 - KEY_BUFF)).abs() < 1e-9);
    assert!((shown.item.center.y - screen.center().y).abs() < 1e-12);

    c.show_on_screen("5");
    assert_eq!(c.screen_text.as_ref().unwrap().text, "5");
}

#[test]
fn tap_holds_for_first_half() {
    let mut c = calc();
    let mut anim = c.tap_animation("=").unwrap();
    assert_eq!(anim.run_time(), TAP_RUN_TIME);
    anim.evaluate(0.25).unwrap();
    assert!(anim.state().key("=").unwrap().pressed);
    anim.evaluate(0.5).unwrap();
    assert!(!anim.state().key("=").unwrap().pressed);
    anim.evaluate(0.0).unwrap();
    assert!(anim.state().key("=").unwrap().pressed);
    anim.evaluate(1.0).unwrap();
    drop(anim);
    assert!(!c.key("=").unwrap().pressed);
}

#[test]
fn taps_play_in_sequence() {
    let mut c = calc();
    let labels = ["1", "2", "3", "4", "="];
    let mut anim = c.taps_animation(&labels).unwrap();
    assert_eq!(anim.len(), labels.len());
    assert!((anim.run_time() - 5.0 * TAP_RUN_TIME).abs() < 1e-12);

    let mut held = Vec::new();
    Player::new(Fps::new(40, 1).unwrap())
        .play_with(&mut anim, |a, _, _| {
            let pressed: Vec<&str> = a
                .state()
                .keys
                .iter()
                .filter(|k| k.pressed)
                .map(|k| k.label.as_str())
                .collect();
            assert!(pressed.len() <= 1);
            if let Some(label) = pressed.first() {
                if held.last() != Some(&label.to_string()) {
                    held.push(label.to_string());
                }
            }
            Ok(())
        })
        .unwrap();
    drop(anim);
    assert_eq!(held, labels);
    assert!(c.keys.iter().all(|k| !k.pressed));
}
