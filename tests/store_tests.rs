mod common;

use alchemy_randomizer::error::RandomizerError;
use alchemy_randomizer::records::{EffectFields, FormId, Magnitude};
use alchemy_randomizer::store::plugin::{LoadOrder, PatchFile};
use alchemy_randomizer::store::{PluginStore, RecordStore};
use common::{effect, ids_of, plugin, store_of, IngredientBuilder};
use rstest::rstest;
use std::fs;

// --- FORM IDS ---
#[rstest]
#[case("00073F30", 0x0007_3F30)]
#[case("0x73f30", 0x0007_3F30)]
#[case("0X0001", 0x1)]
#[case(" FFFFFFFF ", 0xFFFF_FFFF)]
fn test_form_id_parsing(#[case] raw: &str, #[case] expected: u32) {
    assert_eq!(raw.parse::<FormId>().unwrap(), FormId::new(expected));
}

#[rstest]
#[case("")]
#[case("0x")]
#[case("123456789")]
#[case("XYZ")]
fn test_form_id_rejects_garbage(#[case] raw: &str) {
    let err = raw.parse::<FormId>().unwrap_err();
    assert!(matches!(err, RandomizerError::InvalidFormId(_)));
}

#[test]
fn test_form_id_display_and_serde() {
    let id = FormId::new(0x3EB15);
    assert_eq!(id.to_string(), "0003EB15");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"0003EB15\"");
    let back: FormId = serde_json::from_str("\"0x3eb15\"").unwrap();
    assert_eq!(back, id);
    assert!(serde_json::from_str::<FormId>("\"nope\"").is_err());
}

// --- MAGNITUDES ---
#[rstest]
#[case(1.5, "1.5")]
#[case(10.0, "10")]
#[case(-2.25, "-2.25")]
#[case(0.000001, "0.000001")]
fn test_magnitude_display(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(Magnitude::from_f64(value).to_string(), expected);
}

#[test]
fn test_effect_fields_json_defaults() {
    let fields: EffectFields =
        serde_json::from_str(r#"{ "effect_id": "0003EB15", "magnitude": 2.5 }"#).unwrap();
    assert_eq!(fields.effect_id, FormId::new(0x3EB15));
    assert_eq!(fields.magnitude, Magnitude::from_scaled(2_500_000));
    assert_eq!(fields.area, 0);
    assert_eq!(fields.duration, 0);
    assert!(fields.name.is_empty());
}

#[test]
fn test_effect_fields_display() {
    let fields = EffectFields {
        effect_id: FormId::new(0x3EB15),
        name: "Restore Health".to_string(),
        magnitude: Magnitude::from_f64(0.5),
        area: 0,
        duration: 30,
    };
    assert_eq!(fields.to_string(), "Restore Health (Mag: 0.5, Area: 0, Dur: 30)");
}

// --- LOAD ORDER ---
fn overridden_store() -> PluginStore {
    store_of(vec![
        plugin(
            "Skyrim.esm",
            vec![
                IngredientBuilder::new(0x100, "Wheat")
                    .effects(&[0xA, 0xB, 0xC, 0xD])
                    .build(),
                IngredientBuilder::new(0x101, "Garlic")
                    .effects(&[0xE, 0xF, 0x10, 0x11])
                    .build(),
            ],
        ),
        plugin(
            "Update.esm",
            vec![IngredientBuilder::new(0x100, "Wheat")
                .effects(&[0xD, 0xC, 0xB, 0xA])
                .build()],
        ),
    ])
}

#[test]
fn test_sources_are_deduplicated_in_load_order() {
    let store = overridden_store();
    let sources = store.list_source_records().unwrap();
    let ids: Vec<FormId> = sources
        .iter()
        .map(|r| store.record_info(r).form_id)
        .collect();
    assert_eq!(ids, vec![FormId::new(0x100), FormId::new(0x101)]);
}

#[test]
fn test_override_resolution_picks_last_definition() {
    let store = overridden_store();
    let sources = store.list_source_records().unwrap();

    let wheat = store.resolve_override(&sources[0]);
    assert_ne!(wheat, sources[0]);
    let fields: Vec<EffectFields> = store
        .effect_occurrences(&wheat)
        .iter()
        .map(|o| store.read_effect_fields(o).unwrap())
        .collect();
    assert_eq!(ids_of(&fields), vec![0xD, 0xC, 0xB, 0xA]);

    // No override: resolves to itself.
    assert_eq!(store.resolve_override(&sources[1]), sources[1]);
}

#[test]
fn test_empty_load_order_has_no_records() {
    let store = PluginStore::new(LoadOrder::default(), "Out.esp");
    assert!(matches!(
        store.list_source_records(),
        Err(RandomizerError::NoRecords)
    ));
}

// --- WRITES ---
#[test]
fn test_slot_write_copies_occurrence_into_patch() {
    let mut store = overridden_store();
    let sources = store.list_source_records().unwrap();
    let wheat = store.resolve_override(&sources[0]);
    let garlic = store.resolve_override(&sources[1]);

    let donor = store.effect_occurrences(&garlic)[2];
    store.write_effect_slot(&wheat, 0, &donor).unwrap();

    let patch = store.patch();
    assert_eq!(patch.records.len(), 1);
    let written = patch.record(FormId::new(0x100)).unwrap();
    assert_eq!(written.effects[0], effect(0x10));
    // Remaining slots still hold the winning override's effects.
    assert_eq!(ids_of(&written.effects[1..]), vec![0xC, 0xB, 0xA]);

    // Sources stay untouched.
    let again = store.read_effect_fields(&store.effect_occurrences(&wheat)[0]).unwrap();
    assert_eq!(again, effect(0xD));
}

#[test]
fn test_slot_write_past_end_is_rejected() {
    let mut store = store_of(vec![plugin(
        "Skyrim.esm",
        vec![
            IngredientBuilder::new(0x200, "Slaughterfish Egg")
                .effects(&[0xA])
                .build(),
            IngredientBuilder::new(0x201, "Troll Fat")
                .effects(&[0xB])
                .build(),
        ],
    )]);
    let sources = store.list_source_records().unwrap();
    let donor = store.effect_occurrences(&sources[1])[0];

    // Slot 1 appends, slot 3 would leave a hole.
    store.write_effect_slot(&sources[0], 1, &donor).unwrap();
    let err = store.write_effect_slot(&sources[0], 3, &donor).unwrap_err();
    assert!(matches!(err, RandomizerError::Store(_)));

    let written = store.patch();
    assert_eq!(ids_of(&written.record(FormId::new(0x200)).unwrap().effects), vec![0xA, 0xB]);
}

#[test]
fn test_truncate_drops_trailing_effects_only() {
    let mut store = store_of(vec![plugin(
        "Skyrim.esm",
        vec![IngredientBuilder::new(0x300, "Briar Heart")
            .effects(&[0xA, 0xB, 0xC, 0xD, 0xE])
            .build()],
    )]);
    let sources = store.list_source_records().unwrap();

    store.truncate_effects(&sources[0], 4).unwrap();
    let patch = store.patch();
    assert_eq!(
        ids_of(&patch.record(FormId::new(0x300)).unwrap().effects),
        vec![0xA, 0xB, 0xC, 0xD]
    );

    // Never grows a record.
    store.truncate_effects(&sources[0], 6).unwrap();
    assert_eq!(store.patch().records[0].effects.len(), 4);

    // Sources stay untouched.
    assert_eq!(store.effect_occurrences(&sources[0]).len(), 5);
}

#[test]
fn test_group_write_replaces_all_effects() {
    let mut store = overridden_store();
    let sources = store.list_source_records().unwrap();
    let wheat = store.resolve_override(&sources[0]);
    let group = store.effect_group(&sources[1]);

    store.write_effect_group(&wheat, &group).unwrap();
    let patch = store.patch();
    let written = patch.record(FormId::new(0x100)).unwrap();
    assert_eq!(ids_of(&written.effects), vec![0xE, 0xF, 0x10, 0x11]);
    assert_eq!(written.name, "Wheat");
}

#[test]
fn test_output_flags_and_patch_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patch.json");

    let mut store = overridden_store();
    store.set_output_flag("ESL", true);
    let sources = store.list_source_records().unwrap();
    let group = store.effect_group(&sources[0]);
    store.write_effect_group(&sources[1], &group).unwrap();
    store.save_patch(&path).unwrap();

    let patch = PatchFile::load_from_file(&path).unwrap();
    assert_eq!(patch.name, "TestPatch.esp");
    assert_eq!(patch.flags.get("ESL"), Some(&true));
    assert_eq!(patch.records.len(), 1);
    assert_eq!(
        ids_of(&patch.record(FormId::new(0x101)).unwrap().effects),
        vec![0xA, 0xB, 0xC, 0xD]
    );
}

#[test]
fn test_load_order_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("load_order.json");
    let json = r#"{
        "plugins": [
            { "name": "Skyrim.esm", "records": [
                { "form_id": "00034CDF", "editor_id": "SaltPile", "name": "Salt Pile",
                  "effects": [
                    { "effect_id": "0003EB15", "name": "Weakness to Magic", "magnitude": 2, "duration": 30 },
                    { "effect_id": "0003EB16", "name": "Fortify Restoration", "magnitude": 1, "duration": 60 }
                  ] },
                { "form_id": "00034D00", "editor_id": "UnnamedThing" }
            ] }
        ]
    }"#;
    fs::write(&path, json).unwrap();

    let store = PluginStore::load_from_file(&path, "Out.esp").unwrap();
    let sources = store.list_source_records().unwrap();
    assert_eq!(sources.len(), 2);

    let salt = store.record_info(&sources[0]);
    assert_eq!(salt.name, "Salt Pile");
    assert_eq!(store.effect_occurrences(&sources[0]).len(), 2);
    let first = store
        .read_effect_fields(&store.effect_occurrences(&sources[0])[0])
        .unwrap();
    assert_eq!(first.magnitude, Magnitude::from_f64(2.0));
    assert_eq!(first.duration, 30);

    // Falls back to the editor id.
    assert_eq!(store.record_info(&sources[1]).name, "UnnamedThing");
    assert!(store.effect_occurrences(&sources[1]).is_empty());
}

#[test]
fn test_bad_json_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"plugins\": [ ").unwrap();
    assert!(matches!(
        PluginStore::load_from_file(&path, "Out.esp"),
        Err(RandomizerError::Json(_))
    ));
}
