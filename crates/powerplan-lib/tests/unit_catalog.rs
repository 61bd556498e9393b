mod common;

use common::fixtures_dir;
use powerplan_lib::error::Error;
use powerplan_lib::{UnitCatalog, UnitKind};

#[test]
fn loads_fixture_catalog_in_file_order() {
    let path = fixtures_dir().join("units.csv");
    let catalog = UnitCatalog::from_path(&path).expect("fixture should load");

    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.source_path(), Some(path.as_path()));
    assert_eq!(catalog.units()[0].name, "gasfiredbig1");

    let tj = catalog.get("TJ1").expect("tj1 present");
    assert_eq!(tj.kind, UnitKind::Turbojet);
    assert_eq!(tj.pmax, 16.0);
}

#[test]
fn rejects_duplicate_names_case_insensitive() {
    let csv = "name,type,efficiency,pmin,pmax\n".to_string()
        + "Gas1,gasfired,0.5,0,100\n"
        + "gas1,gasfired,0.5,0,100\n";

    let err = UnitCatalog::from_reader(csv.as_bytes()).expect_err("should reject duplicates");
    match err {
        Error::DuplicateUnitName { name } => assert_eq!(name, "gas1"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn rejects_unknown_unit_type() {
    let csv = "name,type,efficiency,pmin,pmax\n".to_string() + "n1,nuclear,0.3,0,100\n";
    let err = UnitCatalog::from_reader(csv.as_bytes()).expect_err("unknown type");
    assert!(matches!(err, Error::UnitCatalog { .. }));
    assert!(err.to_string().contains("nuclear"));
}

#[test]
fn rejects_invalid_unit_bounds() {
    let csv = "name,type,efficiency,pmin,pmax\n".to_string() + "g1,gasfired,0.5,100,50\n";
    let err = UnitCatalog::from_reader(csv.as_bytes()).expect_err("pmax below pmin");
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[test]
fn loads_catalog_written_to_disk() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "Plant,Technology,Eff,Min,Max").expect("write header");
    writeln!(file, "w1,wind,1,0,80").expect("write row");
    writeln!(file, "g1,gas,0.45,30,120").expect("write row");

    let catalog = UnitCatalog::from_path(file.path()).expect("catalog loads");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.units()[0].kind, UnitKind::Wind);
    assert_eq!(catalog.units()[1].pmin, 30.0);
}
