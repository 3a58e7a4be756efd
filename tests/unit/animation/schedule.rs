use super::*;

#[test]
fn toggle_default_is_twelve_frames_of_800ms_holds() {
    let s = AnimationStyle::Toggle
        .schedule(AnimationStyle::Toggle.default_duration_secs())
        .unwrap();
    assert_eq!(s.frame_count, 12);
    assert_eq!(
        s.delays_ms,
        vec![800, 800, 800, 800, 0, 800, 800, 800, 800, 800, 0, 800]
    );
}

#[test]
fn toggle_cuts_are_zero_and_total_matches_duration() {
    for secs in [1.0, 2.5, 8.0, 13.37] {
        let s = AnimationStyle::Toggle.schedule(secs).unwrap();
        assert_eq!(s.delays_ms[4], 0);
        assert_eq!(s.delays_ms[10], 0);
        assert_eq!(s.total_ms(), (secs * 100.0_f64).round() as u64 * 10);
    }
}

#[test]
fn toggle_pattern_flips_and_flips_back() {
    let sides: Vec<Side> = TOGGLE_PATTERN.iter().map(|f| f.side()).collect();
    assert!(sides[..4].iter().all(|&s| s == Side::Before));
    assert!(sides[4..10].iter().all(|&s| s == Side::After));
    assert!(sides[10..].iter().all(|&s| s == Side::Before));
}

#[test]
fn continuous_styles_run_at_fifteen_fps() {
    let s = AnimationStyle::Slider.schedule(3.0).unwrap();
    assert_eq!(s.frame_count, 45);
    assert_eq!(s.total_ms(), 3000);
    assert!(s.delays_ms.iter().all(|&d| d == 60 || d == 70));

    let s = AnimationStyle::Crossfade.schedule(2.0).unwrap();
    assert_eq!(s.frame_count, 30);
    assert_eq!(s.total_ms(), 2000);
}

#[test]
fn delays_are_whole_gif_ticks_and_keep_the_duration() {
    for style in [
        AnimationStyle::Slider,
        AnimationStyle::Crossfade,
        AnimationStyle::Toggle,
    ] {
        for secs in [0.5, 1.0, 2.0, 3.0, 4.25, 7.0] {
            let s = style.schedule(secs).unwrap();
            assert!(s.delays_ms.iter().all(|d| d % DELAY_STEP_MS == 0), "{style:?} {secs}");
            assert_eq!(s.total_ms(), (secs * 1000.0_f64).round() as u64, "{style:?} {secs}");
        }
    }
}

#[test]
fn continuous_frame_count_is_bounded() {
    assert_eq!(AnimationStyle::Slider.schedule(0.01).unwrap().frame_count, 2);
    assert_eq!(
        AnimationStyle::Crossfade.schedule(600.0).unwrap().frame_count,
        MAX_CONTINUOUS_FRAMES
    );
}

#[test]
fn invalid_durations_are_rejected() {
    assert!(AnimationStyle::Slider.schedule(0.0).is_err());
    assert!(AnimationStyle::Toggle.schedule(-1.0).is_err());
    assert!(AnimationStyle::Crossfade.schedule(f64::NAN).is_err());
}

#[test]
fn style_parses_aliases() {
    assert_eq!("Wipe".parse::<AnimationStyle>().unwrap(), AnimationStyle::Slider);
    assert_eq!("fade".parse::<AnimationStyle>().unwrap(), AnimationStyle::Crossfade);
    assert_eq!("toggle".parse::<AnimationStyle>().unwrap(), AnimationStyle::Toggle);
    assert!("spin".parse::<AnimationStyle>().is_err());
}
