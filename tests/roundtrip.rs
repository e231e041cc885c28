//! Whole-file round trip: any file that decodes must re-encode to the
//! original line sequence exactly.

use pretty_assertions::assert_eq;

use osu_map_rs::prelude::*;

fn assert_line_roundtrip(source: &str) -> Beatmap {
    let lines: Vec<&str> = source.lines().collect();
    let beatmap = decode_beatmap_lines(lines.iter().copied(), &default_config())
        .expect("fixture must decode");
    let encoded = beatmap.encode_lines();
    assert_eq!(
        encoded.iter().map(String::as_str).collect::<Vec<_>>(),
        lines
    );
    assert_eq!(beatmap.encode(), source);
    beatmap
}

#[test]
fn roundtrip_empty_map() {
    let beatmap = assert_line_roundtrip(include_str!("files/empty.osu"));
    assert!(beatmap.hit_objects.is_empty());
    assert!(beatmap.timing_points.is_empty());
    assert_eq!(beatmap.title(), Some(""));
}

#[test]
fn roundtrip_map_with_every_entity_variant() {
    let beatmap = assert_line_roundtrip(include_str!("files/night_parade.osu"));

    assert_eq!(beatmap.title(), Some("Night Parade"));
    assert_eq!(beatmap.version(), Some("Insane"));
    assert_eq!(beatmap.slider_multiplier(), 1.8);
    assert_eq!(beatmap.timing_points.len(), 3);
    assert_eq!(beatmap.colours.len(), 3);
    assert_eq!(beatmap.hit_objects.len(), 8);

    let kinds: Vec<_> = beatmap
        .hit_objects
        .iter()
        .map(|object| match &object.kind {
            HitObjectKind::Circle => "circle",
            HitObjectKind::Slider(data) => match data.curve_type {
                CurveType::Linear => "linear",
                CurveType::PerfectCircle => "arc",
                CurveType::Bezier => "bezier",
                CurveType::CatmullRom => "catmull",
            },
            HitObjectKind::Spinner { .. } => "spinner",
            HitObjectKind::Hold { .. } => "hold",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "circle", "circle", "bezier", "arc", "linear", "spinner", "hold", "catmull"
        ]
    );

    // Structured events survived alongside verbatim storyboard lines.
    assert!(
        beatmap
            .events
            .iter()
            .any(|event| matches!(event, Event::Background(b) if b.file_path() == "bg.jpg"))
    );
    assert!(
        beatmap
            .events
            .iter()
            .any(|event| matches!(event, Event::Break(b) if b.end == 28001.0))
    );
}

#[test]
fn roundtrip_preserves_unknown_sections() {
    let source = "osu file format v14\n\n[General]\nAudioFilename: a.mp3\n\n[Mania]\nKeymap: 7\nSpecialStyle: 1\n\n[HitObjects]\n";
    let beatmap = assert_line_roundtrip(source);
    assert_eq!(beatmap.unknown_sections.len(), 1);
    assert_eq!(beatmap.unknown_sections[0].name, "Mania");
}

#[test]
fn geometry_honors_the_pixel_length_override() {
    let beatmap = assert_line_roundtrip(include_str!("files/night_parade.osu"));
    for object in &beatmap.hit_objects {
        let Some(path) = object.slider_path() else {
            continue;
        };
        let HitObjectKind::Slider(slider) = &object.kind else {
            unreachable!()
        };
        assert!(
            (path.total_length() - slider.pixel_length).abs() < 1e-6,
            "length {} should match override {}",
            path.total_length(),
            slider.pixel_length
        );
    }
}

#[test]
fn timeline_of_the_full_map_is_ordered() {
    let beatmap = assert_line_roundtrip(include_str!("files/night_parade.osu"));
    let timeline = timeline_objects(&beatmap);
    // 2 circles + slider nodes (2 + 3 + 2 + 2) + spinner 2 + hold 2.
    assert_eq!(timeline.len(), 15);
    let mut previous = f64::MIN;
    for event in &timeline {
        assert!(event.time >= previous);
        previous = event.time;
    }
}

#[test]
fn decode_failure_surfaces_the_offending_line() {
    let source = "osu file format v14\n\n[TimingPoints]\n313,333.33,4,2,1,60,1,0\nnot-a-timing-point\n";
    let error = decode_beatmap(source, &default_config()).unwrap_err();
    assert_eq!(error.line(), "not-a-timing-point");
}

#[test]
fn batch_decode_is_embarrassingly_parallel() {
    use rayon::prelude::*;

    let sources = [
        include_str!("files/empty.osu"),
        include_str!("files/night_parade.osu"),
    ];
    let repeated: Vec<&str> = sources.iter().copied().cycle().take(64).collect();

    let sequential: Vec<Beatmap> = repeated
        .iter()
        .map(|source| decode_beatmap(source, &default_config()).expect("decodes"))
        .collect();
    let parallel: Vec<Beatmap> = repeated
        .par_iter()
        .map(|source| decode_beatmap(source, &default_config()).expect("decodes"))
        .collect();
    assert_eq!(sequential, parallel);
}
