//! Benchmark for `.osu` beatmap decoding and slider path evaluation.

use criterion::{Criterion, Throughput};
use osu_map_rs::osu::{decode_beatmap, default_config};

struct OsuFile {
    name: String,
    source: String,
}

fn scan_osu_files() -> Vec<OsuFile> {
    let dir = "tests/files";

    std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.to_string_lossy().ends_with(".osu"))
        .filter_map(|path| {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from)?;

            let source = std::fs::read_to_string(&path).expect("Failed to load test file");

            Some(OsuFile { name, source })
        })
        .collect()
}

fn bench_decode_beatmap(c: &mut Criterion) {
    let files = scan_osu_files();
    let mut group = c.benchmark_group("decode_beatmap");

    for file in files.iter() {
        group.throughput(Throughput::Bytes(file.source.len() as u64));
        group.bench_function(&file.name, |b| {
            b.iter(|| {
                decode_beatmap(
                    std::hint::black_box(&file.source),
                    std::hint::black_box(&default_config()),
                )
            });
        });
    }

    group.finish();
}

fn bench_slider_paths(c: &mut Criterion) {
    let files = scan_osu_files();
    let mut group = c.benchmark_group("slider_paths");

    for file in files.iter() {
        let beatmap =
            decode_beatmap(&file.source, &default_config()).expect("bench file must decode");
        if beatmap.hit_objects.is_empty() {
            continue;
        }
        group.bench_function(&file.name, |b| {
            b.iter(|| {
                beatmap
                    .hit_objects
                    .iter()
                    .filter_map(|object| std::hint::black_box(object).slider_path())
                    .map(|path| path.total_length())
                    .sum::<f64>()
            });
        });
    }

    group.finish();
}

fn main() {
    let mut criterion = Criterion::default();
    bench_decode_beatmap(&mut criterion);
    bench_slider_paths(&mut criterion);
}
