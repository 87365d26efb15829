//! Loading the four category tables from a directory, the way the
//! simulator does at startup.

use factory_core::config::KgConfig;
use factory_core::KgCategory;
use factory_graph::{KgTables, LoadStatus};

const HEADER: &str = "Source entity,relationship,target entity\n";

#[test]
fn loads_present_tables_and_degrades_missing_ones() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("maintenance-kg.csv"),
        format!("{HEADER}Maintenance_KG:Tool_Change,requires,Tool_Inventory_Check\n"),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("cyberattack-kg.csv"),
        format!("{HEADER}Cyberattack_KG:Major_Position_Change,indicates,Encoder_Tampering\n"),
    )
    .unwrap();

    let config = KgConfig {
        dir: dir.path().to_path_buf(),
        ..KgConfig::default()
    };
    let (tables, results) = KgTables::load(&config);

    assert_eq!(results.len(), 4);
    for result in &results {
        match result.category {
            KgCategory::Maintenance | KgCategory::Cyberattack => {
                assert_eq!(result.status, LoadStatus::Loaded { rows: 1, skipped: 0 })
            }
            KgCategory::Normal | KgCategory::PowerDraw => {
                assert_eq!(result.status, LoadStatus::Missing)
            }
        }
    }

    let triple = tables
        .lookup(KgCategory::Maintenance, "Maintenance_KG:Tool_Change")
        .unwrap();
    assert_eq!(triple.relationship, "requires");
    assert_eq!(triple.target_entity, "Tool_Inventory_Check");

    assert!(tables
        .lookup(KgCategory::Normal, "Normal_KG:Operation_Normal")
        .is_none());
    assert_eq!(tables.stats().triple_count, 2);
}

#[test]
fn explicit_path_overrides_directory() {
    let dir = tempfile::tempdir().unwrap();
    let custom = dir.path().join("line2-normal.csv");
    std::fs::write(
        &custom,
        format!("{HEADER}Normal_KG:Inspection_Fail,routes_to,Rework_Queue\n"),
    )
    .unwrap();

    let config = KgConfig {
        dir: dir.path().join("does-not-exist"),
        normal_csv: Some(custom),
        ..KgConfig::default()
    };
    let (tables, _) = KgTables::load(&config);

    assert!(tables
        .lookup(KgCategory::Normal, "Normal_KG:Inspection_Fail")
        .is_some());
}

#[test]
fn bundled_tables_cover_every_cascade_label() {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = KgConfig {
        dir: manifest.join("../../data/kg"),
        ..KgConfig::default()
    };
    let (tables, results) = KgTables::load(&config);
    assert!(results
        .iter()
        .all(|r| matches!(r.status, LoadStatus::Loaded { skipped: 0, .. })));

    let labels = [
        (KgCategory::Maintenance, "Maintenance_KG:Possible_Overheating"),
        (KgCategory::Maintenance, "Maintenance_KG:Spindle_Overheat"),
        (KgCategory::Maintenance, "Maintenance_KG:Minor_Position_Drift"),
        (KgCategory::Maintenance, "Maintenance_KG:Tool_Change"),
        (KgCategory::Cyberattack, "Cyberattack_KG:Possible_Glitch/Firmware"),
        (KgCategory::Cyberattack, "Cyberattack_KG:Likely_Glitch/Firmware"),
        (KgCategory::Cyberattack, "Cyberattack_KG:Possible_Vibration_Sabotage"),
        (KgCategory::Cyberattack, "Cyberattack_KG:Likely_Vibration_Sabotage"),
        (KgCategory::Cyberattack, "Cyberattack_KG:Major_Position_Change"),
        (KgCategory::PowerDraw, "PowerDraw_KG:Possible_Elevated_Load"),
        (KgCategory::PowerDraw, "PowerDraw_KG:High_Power_Consumption"),
        (KgCategory::Normal, "Normal_KG:Inspection_Fail"),
        (KgCategory::Normal, "Normal_KG:Operation_Normal"),
    ];
    for (category, label) in labels {
        assert!(
            tables.lookup(category, label).is_some(),
            "no bundled triple for {label}"
        );
    }
}
