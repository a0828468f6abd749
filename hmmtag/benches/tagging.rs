use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use hmmtag::{Eojeol, Model, SentenceCandidates, Tagger};

const TAGS: &[&str] = &["ncn", "npp", "pvg", "paa", "mag", "jxc", "jca", "ecs", "etm", "ef"];

fn synthetic_model() -> Model {
    let mut pwt_pos = String::new();
    let mut ptt_pos = String::from("bnk -1.0\n");
    for (i, t) in TAGS.iter().enumerate() {
        pwt_pos.push_str(&format!("w{i}/{t} -{}.5\n", i % 7 + 1));
        ptt_pos.push_str(&format!("{t} -{}.25\n", i % 5 + 1));
        ptt_pos.push_str(&format!("bnk-{t} -{}.0\n", i % 3 + 1));
        ptt_pos.push_str(&format!("{t}-bnk -{}.0\n", i % 4 + 1));
        for (j, u) in TAGS.iter().enumerate() {
            ptt_pos.push_str(&format!("{t}-{u} -{}.75\n", (i * j) % 6 + 1));
        }
    }
    let ptt_wp = "N -1.0\nP -1.5\nA -2.0\nNJ -1.2\nPC -1.7\nPE -1.9\nPM -2.1\n\
                  N-P -0.5\nNJ-P -0.4\nNJ-PE -0.6\nPC-NJ -0.8\nPM-N -0.3\nA-P -0.9\n";
    Model::from_readers(pwt_pos.as_bytes(), ptt_pos.as_bytes(), ptt_wp.as_bytes()).unwrap()
}

fn synthetic_sentence(num_tokens: usize, num_readings: usize) -> SentenceCandidates {
    let mut sent = SentenceCandidates::new(0, 0, false);
    for k in 0..num_tokens {
        let readings = (0..num_readings)
            .map(|r| {
                let a = (k + r) % TAGS.len();
                let b = (k * 3 + r * 7) % TAGS.len();
                Eojeol::from_pairs([(format!("w{a}"), TAGS[a]), (format!("w{b}"), TAGS[b])])
            })
            .collect();
        sent.push_token(format!("t{k}"), readings);
    }
    sent
}

fn bench_tagging(c: &mut Criterion) {
    let tagger = Tagger::new(synthetic_model());
    let mut group = c.benchmark_group("Tagging");

    for (num_tokens, num_readings) in [(20, 2), (20, 8), (200, 4)] {
        let sent = synthetic_sentence(num_tokens, num_readings);
        group.throughput(Throughput::Elements(num_tokens as u64));
        group.bench_function(format!("{num_tokens}x{num_readings}"), |b| {
            let mut worker = tagger.new_worker();
            b.iter(|| {
                worker.reset_sentence(sent.clone());
                worker.tag().unwrap();
                std::hint::black_box(worker.num_tokens());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tagging);
criterion_main!(benches);
