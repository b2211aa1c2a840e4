//! Catalog ingestion tests.
//!
//! These tests feed realistic catalog documents through ingestion and
//! then use the accepted cards in battles.

use tcg_battle::battle::{BattleState, SubmitOutcome};
use tcg_battle::cards::{CardId, NormalizeError, RecordErrorKind};
use tcg_battle::core::{EngineConfig, ErrorKind, PlayerId};
use tcg_battle::engine::BattleEngine;

const BASE_SET: &str = r#"[
    {
        "id": "base1-4",
        "name": "Charizard",
        "supertype": "Pokémon",
        "level": "76",
        "hp": "120",
        "attacks": [
            { "name": "Energy Burn", "damage": "" },
            { "name": "Fire Spin", "damage": "100" }
        ],
        "rarity": "Rare Holo",
        "images": {
            "small": "https://images.example/base1/4.png",
            "large": "https://images.example/base1/4_hires.png"
        }
    },
    {
        "id": "base1-7",
        "name": "Hitmonchan",
        "supertype": "Pokémon",
        "level": 33,
        "hp": 70,
        "attacks": [
            { "name": "Jab", "damage": "20" },
            { "name": "Special Punch", "damage": "40" }
        ],
        "rarity": "Rare Holo"
    },
    {
        "id": "base1-10",
        "name": "Mewtwo",
        "supertype": "Pokémon",
        "level": "53",
        "hp": "60",
        "attacks": [
            { "name": "Psychic", "damage": "10+" },
            { "name": "Barrier" }
        ]
    },
    {
        "id": "base1-91",
        "name": "Bill",
        "supertype": "Trainer",
        "rarity": "Common"
    },
    {
        "id": "base1-98",
        "name": "Fighting Energy",
        "supertype": "Energy"
    },
    {
        "id": "base1-42",
        "name": "Wartortle",
        "supertype": "Pokémon",
        "level": "22",
        "hp": "??",
        "attacks": [{ "name": "Bite", "damage": "40" }]
    },
    {
        "id": "base1-5",
        "name": "Clefairy",
        "supertype": "Pokémon",
        "level": "14",
        "hp": "40",
        "attacks": [{ "name": "Sing" }, { "name": "Metronome" }]
    },
    {
        "id": "base1-13",
        "name": "Poliwrath",
        "supertype": "Pokémon",
        "level": "48",
        "hp": "90",
        "attacks": "Water Gun"
    },
    {
        "id": "base1-7",
        "name": "Hitmonchan (reprint)",
        "supertype": "Pokémon",
        "level": "33",
        "hp": "70",
        "attacks": [{ "name": "Jab", "damage": "20" }]
    }
]"#;

fn engine() -> BattleEngine {
    BattleEngine::in_memory(EngineConfig::default().with_id_seed(3))
}

/// Test a mixed feed is sorted into accepted, skipped and rejected records.
#[test]
fn test_ingest_base_set() {
    let mut engine = engine();
    let report = engine.cards_mut().ingest_json(BASE_SET).unwrap();

    assert_eq!(
        report.accepted,
        vec![
            CardId::new("base1-4"),
            CardId::new("base1-7"),
            CardId::new("base1-10"),
        ]
    );
    // Bill, Fighting Energy and Clefairy can never fight.
    assert_eq!(report.skipped, 3);
    assert_eq!(report.errors.len(), 3);
    assert_eq!(report.total(), 9);
    assert!(!report.is_clean());

    let positions: Vec<_> = report.errors.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![5, 7, 8]);

    assert!(matches!(
        &report.errors[0].error,
        RecordErrorKind::Invalid(NormalizeError::NotNumeric { field: "hp", .. })
    ));
    assert!(matches!(&report.errors[1].error, RecordErrorKind::Malformed(_)));
    assert_eq!(report.errors[1].card_id.as_deref(), Some("base1-13"));
    assert_eq!(report.errors[2].error, RecordErrorKind::Duplicate);
}

/// Test accepted cards keep only their first damaging attack.
#[test]
fn test_normalized_cards() {
    let mut engine = engine();
    engine.cards_mut().ingest_json(BASE_SET).unwrap();

    let charizard = engine.card(&CardId::new("base1-4")).unwrap();
    assert_eq!(charizard.attack.name, "Fire Spin");
    assert_eq!(charizard.attack.damage, 100);
    assert_eq!(charizard.level, 76);
    assert_eq!(charizard.hp, 120);
    assert_eq!(charizard.rarity.as_deref(), Some("Rare Holo"));
    assert!(charizard.images.large.is_some());

    let mewtwo = engine.card(&CardId::new("base1-10")).unwrap();
    assert_eq!(mewtwo.attack.name, "Psychic");
    assert_eq!(mewtwo.attack.damage, 10);

    // The first record with an id wins over a later duplicate.
    let hitmonchan = engine.card(&CardId::new("base1-7")).unwrap();
    assert_eq!(hitmonchan.name, "Hitmonchan");

    let err = engine.card(&CardId::new("base1-91")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Test a document that is not an array is rejected as a whole.
#[test]
fn test_non_array_document() {
    let mut engine = engine();
    let err = engine
        .cards_mut()
        .ingest_json(r#"{ "data": [] }"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(engine.cards().is_empty());
}

/// Test ingested cards can be taken straight into a battle.
#[test]
fn test_battle_with_ingested_cards() {
    let mut engine = engine();
    engine.cards_mut().ingest_json(BASE_SET).unwrap();
    let ash = PlayerId::new("ash");
    let gary = PlayerId::new("gary");

    let battle = engine
        .create_battle(&ash, &[CardId::new("base1-7")])
        .unwrap();
    let battle = engine
        .join_battle(battle.id(), &gary, &[CardId::new("base1-10")])
        .unwrap();
    assert_eq!(battle.state(), BattleState::Active);

    engine
        .submit_round(battle.id(), &ash, 0, battle.player_one_cards()[0].id)
        .unwrap();
    let outcome = engine
        .submit_round(battle.id(), &gary, 0, battle.player_two_cards()[0].id)
        .unwrap();
    assert!(outcome.is_resolved());

    // Hitmonchan (70 hp, 20 dmg) vs Mewtwo (60 hp, 10 dmg).
    let hitmonchan = engine
        .battle_card(battle.id(), battle.player_one_cards()[0].id)
        .unwrap();
    let mewtwo = engine
        .battle_card(battle.id(), battle.player_two_cards()[0].id)
        .unwrap();
    assert_eq!(hitmonchan.current_hp(), 60);
    assert_eq!(mewtwo.current_hp(), 40);
    assert!(matches!(outcome, SubmitOutcome::Resolved { completed: false, .. }));
}

/// Test a battle cannot be created from cards that were never ingested.
#[test]
fn test_unknown_cards_rejected() {
    let mut engine = engine();
    engine.cards_mut().ingest_json(BASE_SET).unwrap();

    let err = engine
        .create_battle(&PlayerId::new("ash"), &[CardId::new("base1-91")])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(engine.store().is_empty());
}

/// Test a configured creature category drives eligibility.
#[test]
fn test_custom_creature_category() {
    let mut engine = BattleEngine::in_memory(
        EngineConfig::default().with_creature_category("Monster"),
    );
    let report = engine
        .cards_mut()
        .ingest_json(
            r#"[
                { "id": "m-1", "name": "Slime", "category": "Monster", "level": "1",
                  "hp": "10", "attacks": [{ "name": "Ooze", "damage": "2" }] },
                { "id": "p-1", "name": "Pikachu", "supertype": "Pokémon", "level": "12",
                  "hp": "40", "attacks": [{ "name": "Gnaw", "damage": "10" }] }
            ]"#,
        )
        .unwrap();

    assert_eq!(report.accepted, vec![CardId::new("m-1")]);
    assert_eq!(report.skipped, 1);
}
