use agari::algo::agari::evaluate;
use agari::dataset::{par_records, tally, tally_par, RecordReader};
use agari::hand::hand;
use agari::stats::combinations;
use agari::tile::Variant;
use std::hint::black_box;
use std::io::Cursor;
use criterion::{Criterion, criterion_group, criterion_main};

const FOUR: [&str; 6] = [
    "99s 234s 345m 456p 678m",
    "CC EEE SSS WWW NNN",
    "789s 33445566m 123p",
    "EE 89s 1m 234m 567p 999p",
    "111s 11123444m 111p",
    "EE 111122223333s",
];

fn evaluate_hands(c: &mut Criterion) {
    let hands = FOUR.map(|s| hand(Variant::Four, s).unwrap());
    c.bench_function("evaluate", |b| {
        b.iter(|| {
            for h in &hands {
                black_box(evaluate(black_box(h)));
            }
        });
    });
    c.bench_function("combinations", |b| {
        b.iter(|| {
            for h in &hands {
                black_box(combinations(black_box(h)));
            }
        });
    });
}

fn tally_records(c: &mut Criterion) {
    let v = Variant::Four;
    let data: Vec<u8> = FOUR
        .iter()
        .flat_map(|s| hand(v, s).unwrap().to_record())
        .cycle()
        .take(v.hand_len() * 6_000)
        .collect();

    c.bench_function("tally", |b| {
        b.iter(|| tally(v, RecordReader::new(v, Cursor::new(&data))).unwrap());
    });
    c.bench_function("tally_par", |b| {
        b.iter(|| tally_par(v, par_records(v, &data)).unwrap());
    });
}

criterion_group!(benches, evaluate_hands, tally_records);
criterion_main!(benches);
