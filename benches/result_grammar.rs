use criterion::{Criterion, black_box, criterion_group, criterion_main};
use results_processor::app::services::race_importer::parse_race_page;
use results_processor::app::services::result_grammar::ResultGrammar;

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn load_page(name: &str) -> Vec<u8> {
    std::fs::read(format!("{}/{}", FIXTURES, name)).expect("read fixture page")
}

/// A large slash-pairs block, one line per finisher
fn synthetic_block(rows: usize) -> String {
    let categories = ["U20", "20-29", "30-39", "40-49", "50-59", "60-69"];
    let mut block = String::from("Pl.  Bib Name                 Sex/Pl  Cat/Pl   Time\n");
    for position in 1..=rows {
        let sex = if position % 3 == 0 { "F" } else { "M" };
        let category = categories[position % categories.len()];
        block.push_str(&format!(
            "{:>4}. {:>4} RUNNER NUMBER{:<8} {}/{:<4}  {}/{:<3} {}:{:02}\n",
            position,
            1000 + position,
            position,
            sex,
            position,
            category,
            position / 6 + 1,
            15 + position / 60,
            position % 60
        ));
    }
    block
}

fn bench_result_grammar(c: &mut Criterion) {
    let grammar = ResultGrammar::new();
    let block = synthetic_block(2000);

    c.bench_function("grammar_slash_pairs_2000", |b| {
        b.iter(|| {
            let output = grammar.parse(black_box(&block)).expect("block parses");
            black_box(output.rows.len())
        })
    });

    for name in ["tely_10.html", "boxing_day_10k.html"] {
        let page = load_page(name);
        c.bench_function(&format!("page_{}", name), |b| {
            b.iter(|| {
                let parsed = parse_race_page(black_box(&page)).expect("page parses");
                black_box(parsed.rows.len())
            })
        });
    }
}

criterion_group!(benches, bench_result_grammar);
criterion_main!(benches);
