use agari::algo::agari::{candidates, evaluate};
use agari::algo::yaku::{Yaku, YakuSet};
use agari::hand::{Hand, tiles_to_string};
use agari::stats::combinations;
use agari::tile::Variant;
use std::fmt::Write;

fn yaku_string(variant: Variant, set: YakuSet) -> String {
    set.iter()
        .map(|y| match y {
            Yaku::ValueHonors => format!("{y} {}x{}", y.base_value(variant), set.value_honors()),
            _ => format!("{y} {}", y.base_value(variant)),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per candidate pair, the chosen one marked with `*`.
pub fn explain(hand: &Hand) -> String {
    let v = hand.variant();
    let best = evaluate(hand);

    let mut s = String::new();
    writeln!(s, "{hand} ({v}, {} combinations)", combinations(hand)).ok();
    for (i, res) in candidates(hand) {
        let mark = if best.as_ref().is_some_and(|b| b.pair_idx == i) { '*' } else { ' ' };
        match res {
            Ok(e) => {
                let kind = if e.outcome.is_jackpot() { " jackpot" } else { "" };
                writeln!(
                    s,
                    "{mark} {:<28} {:>4}{kind}  {}",
                    e.div.to_log_string(v),
                    e.outcome.value(),
                    yaku_string(v, e.outcome.yaku()),
                )
                .ok();
            }
            Err(err) => {
                let t = hand.tiles()[i];
                writeln!(s, "{mark} [{}] {err}", tiles_to_string(v, &[t, t])).ok();
            }
        }
    }
    if best.is_none() {
        writeln!(s, "no pattern").ok();
    }
    s
}
