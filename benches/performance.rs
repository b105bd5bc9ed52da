use criterion::{black_box, criterion_group, criterion_main, Criterion};
use settings_tree::loader::{parse_tree, DEMO_TREE};
use settings_tree::node::{
    outline, OptionItem, OptionsButton, Screen, Section, SectionNode, Slider, Switch, TextField,
};
use settings_tree::presentation::{IndexPath, SettingsController};
use settings_tree::settings::Settings;
use settings_tree::storage::{shared, MemoryStorage};
use settings_tree::tui::state::visible_paths;

/// Create a root screen with `sections` sections of mixed rows, each with a
/// nested screen
fn create_large_tree(sections: usize) -> Screen {
    Screen::build("Settings", || {
        (0..sections)
            .map(|s| {
                let section = Section::build(format!("Section {}", s), || {
                    vec![
                        Switch::new(format!("switch-{}", s), "Enabled").into(),
                        Slider::new(format!("level-{}", s), "Level")
                            .with_range(0.0, 100.0)
                            .with_default(50.0)
                            .into(),
                        TextField::new(format!("name-{}", s), "Name").into(),
                        OptionsButton::build(format!("mode-{}", s), "Mode", || {
                            (0..8)
                                .map(|i| OptionItem::new(format!("Mode {}", i), i))
                                .collect()
                        })
                        .into(),
                        Screen::build(format!("Details {}", s), || {
                            vec![Section::build("More", || {
                                vec![Switch::new(format!("detail-{}", s), "Detail").into()]
                            })
                            .into()]
                        })
                        .into(),
                    ]
                });
                SectionNode::from(section)
            })
            .collect()
    })
}

fn create_controller(sections: usize) -> SettingsController {
    let settings = Settings::from_screen(shared(MemoryStorage::new()), create_large_tree(sections));
    SettingsController::new(settings)
}

/// Benchmark projecting every row of the root page
fn bench_projection(c: &mut Criterion) {
    let controller = create_controller(100);

    let mut group = c.benchmark_group("projection");

    group.bench_function("project_root_page", |b| {
        b.iter(|| {
            let sections = controller.section_count().unwrap_or(0);
            let mut rows = Vec::new();
            for section in 0..sections {
                for row in 0..controller.row_count(section).unwrap_or(0) {
                    rows.push(controller.row(IndexPath::new(section, row)));
                }
            }
            black_box(rows)
        })
    });

    group.bench_function("visible_paths", |b| {
        b.iter(|| black_box(visible_paths(black_box(&controller))))
    });

    group.bench_function("outline", |b| {
        b.iter(|| black_box(outline(controller.settings().main())))
    });

    group.finish();
}

/// Benchmark navigation transitions
fn bench_navigation(c: &mut Criterion) {
    let mut controller = create_controller(100);

    let mut group = c.benchmark_group("navigation");

    group.bench_function("push_and_back", |b| {
        b.iter(|| {
            let pushed = controller.select(black_box(IndexPath::new(99, 4)));
            let popped = controller.back();
            black_box((pushed, popped))
        })
    });

    group.bench_function("choose_option", |b| {
        b.iter(|| {
            let pushed = controller.select(IndexPath::new(50, 3));
            let chosen = controller.select(black_box(IndexPath::new(0, 5)));
            black_box((pushed, chosen))
        })
    });

    group.finish();
}

/// Benchmark loading the bundled tree description
fn bench_loader(c: &mut Criterion) {
    let mut group = c.benchmark_group("loader");

    group.bench_function("parse_and_build_demo", |b| {
        b.iter(|| {
            let description = parse_tree(black_box(DEMO_TREE));
            black_box(description.and_then(|d| d.build(None)))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_projection, bench_navigation, bench_loader);
criterion_main!(benches);
