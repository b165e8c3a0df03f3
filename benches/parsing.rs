use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mapparser::{from_table, parse_str, to_string, Level};
use serde::Deserialize;

#[derive(Deserialize)]
struct Player {
    x: f64,
    y: f64,
    name: String,
}

fn level_source(size: usize) -> String {
    let mut rows = Vec::with_capacity(size);
    for r in 0..size {
        let cells: Vec<String> = (0..size)
            .map(|c| {
                let wall = r == 0 || c == 0 || r + 1 == size || c + 1 == size;
                let cell = if wall {
                    "1"
                } else if (r + c) % 7 == 0 {
                    "2"
                } else {
                    "0"
                };
                cell.to_string()
            })
            .collect();
        rows.push(format!("[{}]", cells.join(", ")));
    }

    format!(
        "# generated level\n\
         [Map]\n\
         rows : {size}\n\
         cols : {size}\n\
         grid : [{}]\n\
         \n\
         [Tiles]\n\
         wall : {{ id: 1, texture: \"wall.png\" }}\n\
         glass : {{ id: 2, color: [0, 128, 255, 128], transparent: true }}\n\
         \n\
         [Player]\n\
         x : 1.5\n\
         y : 1.5\n\
         name : \"bench # player\"\n",
        rows.join(",\n        "),
        size = size,
    )
}

fn benchmark_parse_scalars(c: &mut Criterion) {
    let source = "[Player]\nx : 1.5\ny : 2.5\nname : \"Ann\"   # comment\nalive : true\nlives : 3\n";

    c.bench_function("parse_scalars", |b| b.iter(|| parse_str(black_box(source))));
}

fn benchmark_parse_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_grid");

    for size in [8, 32, 128].iter() {
        let source = level_source(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| parse_str(black_box(source)))
        });
    }
    group.finish();
}

fn benchmark_nested_values(c: &mut Criterion) {
    let mut source = String::from("[Billboards]\nsprites : [\n");
    for i in 0..200 {
        source.push_str(&format!(
            "  {{ sprite: \"barrel_{}.png\", x: {}, y: {}, tags: [\"a\", \"b\"] }},\n",
            i,
            i % 17,
            i / 17
        ));
    }
    source.push_str("  { sprite: \"last.png\", x: 0, y: 0 }\n]\n");

    c.bench_function("parse_nested_values", |b| {
        b.iter(|| parse_str(black_box(&source)))
    });
}

fn benchmark_write(c: &mut Criterion) {
    let doc = parse_str(&level_source(64)).unwrap();

    c.bench_function("write_document", |b| b.iter(|| to_string(black_box(&doc))));
}

fn benchmark_typed_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed_views");
    let doc = parse_str(&level_source(64)).unwrap();

    group.bench_function("deserialize_table", |b| {
        b.iter(|| {
            let player: Player = from_table(black_box(doc.table("Player").unwrap())).unwrap();
            black_box((player.x, player.y, player.name.len()))
        })
    });

    group.bench_function("build_level", |b| {
        b.iter(|| Level::from_document(black_box(&doc)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_scalars,
    benchmark_parse_grid,
    benchmark_nested_values,
    benchmark_write,
    benchmark_typed_views
);
criterion_main!(benches);
