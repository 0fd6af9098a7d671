use super::*;
use crate::foundation::core::Fps;
use crate::widgets::sequence_line::SequenceLineOpts;

fn small_config() -> Config {
    Config {
        fps: Fps::new(4, 1).unwrap(),
        sequence_line: SequenceLineOpts {
            samples: 20,
            text_samples: 5,
            ..SequenceLineOpts::default()
        },
        ..Config::default()
    }
}

#[test]
fn every_listed_scene_runs() {
    let cfg = small_config();
    for name in SCENES {
        let rec = run(name, &cfg).unwrap();
        assert_eq!(rec.scene, name);
        assert!(!rec.frames.is_empty(), "{name} recorded nothing");
    }
}

#[test]
fn unknown_scene_is_rejected() {
    let err = run("equations", &small_config()).unwrap_err();
    assert!(matches!(err, NinesError::Validation(_)));
    assert!(err.to_string().contains("sequence_line"));
}

#[test]
fn invalid_config_is_rejected_before_playing() {
    let mut cfg = small_config();
    cfg.clock.radius = 0.0;
    assert!(run("bucket", &cfg).is_err());
}

#[test]
fn clock_scene_ends_on_six() {
    let rec = run("clock", &small_config()).unwrap();
    assert_eq!(
        rec.steps(),
        vec![
            "setup",
            "jump_to_1",
            "jump_to_10",
            "sweep_to_1",
            "sweep_to_11",
            "sweep_back_to_1",
            "sweep_to_18",
        ]
    );
    let last = rec.frames.last().unwrap();
    assert_eq!(last.alpha, 1.0);
    // The committed hour is updated on clean-up, after the final frame.
    assert_eq!(last.state["hour"], 1);
    let hand = &last.state["hand"];
    let dy = hand["p1"]["y"].as_f64().unwrap() - hand["p0"]["y"].as_f64().unwrap();
    assert!(dy < 0.0);
}

#[test]
fn bucket_scene_takes_both_dots_out() {
    let rec = run("bucket", &small_config()).unwrap();
    let steps = rec.steps();
    assert!(steps.contains(&"put_in_both"));
    assert!(steps.contains(&"take_out_both"));
    let inside = rec.frames.iter().find(|f| f.step == "inside").unwrap();
    assert!(
        inside.state["items"]
            .as_array()
            .unwrap()
            .iter()
            .all(|i| i["visible"] == false)
    );
    let out = rec.frames.iter().find(|f| f.step == "taken_out").unwrap();
    assert!(
        out.state["items"]
            .as_array()
            .unwrap()
            .iter()
            .all(|i| i["visible"] == true)
    );
    assert_eq!(
        rec.frames.last().unwrap().state["bucket"]["label"]["text"],
        "0.99"
    );
}

#[test]
fn calculator_scene_presses_each_key_once() {
    let cfg = Config {
        fps: Fps::new(40, 1).unwrap(),
        ..small_config()
    };
    let rec = run("calculator", &cfg).unwrap();
    let pressed: Vec<String> = rec
        .frames
        .iter()
        .filter(|f| f.step == "type")
        .filter_map(|f| {
            f.state["keys"]
                .as_array()?
                .iter()
                .find(|k| k["pressed"] == true)
                .and_then(|k| k["label"].as_str().map(str::to_string))
        })
        .collect();
    let mut distinct = pressed.clone();
    distinct.dedup();
    assert_eq!(distinct, ["1", "2", "3", "4", "="]);
}
