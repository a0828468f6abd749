mod table;

use crate::model::Model;
use crate::sentence::{Eojeol, SentenceCandidates};

const PWT_POS: &str = include_str!("./tests/resources/pwt.pos");
const PTT_POS: &str = include_str!("./tests/resources/ptt.pos");
const PTT_WP: &str = include_str!("./tests/resources/ptt.wp");
const TAGGER_CONF: &str = include_str!("./tests/resources/tagger.conf");

fn model() -> Model {
    Model::from_readers(PWT_POS.as_bytes(), PTT_POS.as_bytes(), PTT_WP.as_bytes()).unwrap()
}

fn readings(texts: &[&str]) -> Vec<Eojeol> {
    texts.iter().map(|t| t.parse().unwrap()).collect()
}

/// 나는 학교에 간다 .
fn school_sentence() -> SentenceCandidates {
    SentenceCandidates::new(1, 2, false)
        .with_token(
            "나는",
            readings(&["나/npp+는/jxc", "나/npp+는/jxt", "나/pvg+는/etm"]),
        )
        .with_token("학교에", readings(&["학교/ncn+에/jca"]))
        .with_token("간다", readings(&["가/pvg+ㄴ다/ef", "갈/pvg+ㄴ다/ef"]))
        .with_token(".", readings(&["./sf"]))
}
