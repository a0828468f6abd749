use crate::model::ProbTable;

use super::{PTT_POS, PTT_WP, PWT_POS};

fn check_round_trip(data: &str) {
    let table = ProbTable::from_reader(data.as_bytes(), "test").unwrap();
    let mut num_lines = 0;
    for line in data.lines() {
        let mut spl = line.split_whitespace();
        let key = spl.next().unwrap();
        let values: Vec<f64> = spl.map(|v| v.parse().unwrap()).collect();
        assert_eq!(table.get(key), Some(values.as_slice()), "{key}");
        num_lines += 1;
    }
    assert_eq!(table.len(), num_lines);
}

#[test]
fn test_round_trip() {
    check_round_trip(PWT_POS);
    check_round_trip(PTT_POS);
    check_round_trip(PTT_WP);
}

#[test]
fn test_absent_keys() {
    let table = ProbTable::from_reader(PTT_POS.as_bytes(), "ptt.pos").unwrap();
    assert_eq!(table.get("npp-jca"), None);
    assert_eq!(table.get(""), None);
    assert_eq!(table.get("NPP"), None);
    assert_eq!(table.get("bnk -1.0"), None);
}

#[test]
fn test_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pwt.pos");
    std::fs::write(&path, PWT_POS).unwrap();
    let table = ProbTable::from_path(&path).unwrap();
    assert_eq!(table.get("학교/ncn"), Some(&[-4.0][..]));
    assert_eq!(table.get("학교/ncp"), None);
}
