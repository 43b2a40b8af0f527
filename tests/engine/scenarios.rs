//! Whole-combat scenarios.

use luchadores_engine::{CombatEvent, Outcome};

use super::{program, run};

const PUNCHERS: &str = "
    luchador Rex {
        stats(hp=100, st=50);
        acciones { golpe: puño(daño=20, costo=10); }
        combos { doble(st_req=30) { puño, puño } }
    }
    luchador Tom {
        stats(hp=100, st=50);
        acciones { golpe: puño(daño=15, costo=5); }
        combos { doble(st_req=10) { puño, puño } }
    }
";

// =============================================================================
// Full Combat
// =============================================================================

#[test]
fn two_rounds_of_punches() {
    let program = program(
        PUNCHERS,
        "turno Rex { usa puño; } turno Tom { usa puño; }",
        "Rex",
        2,
    );
    let (log, result) = run(&program);

    let applied: Vec<_> = log
        .events()
        .filter_map(|e| match e {
            CombatEvent::ActionApplied {
                actor,
                target_hp,
                actor_stamina,
                ..
            } => Some((actor.as_str(), *target_hp, *actor_stamina)),
            _ => None,
        })
        .collect();
    assert_eq!(
        applied,
        vec![("Rex", 80, 40), ("Tom", 85, 45), ("Rex", 60, 30), ("Tom", 70, 40)]
    );

    assert_eq!((result.fighter_a.hp, result.fighter_a.stamina), (70, 30));
    assert_eq!((result.fighter_b.hp, result.fighter_b.stamina), (60, 40));
    assert_eq!(result.outcome, Outcome::Winner("Rex".into()));
    assert_eq!(result.rounds_played, 2);
    assert!(!result.knockout);
}

#[test]
fn equal_hp_is_a_tie() {
    let program = program(PUNCHERS, "turno Rex { usa nada; }", "Tom", 3);
    let (log, result) = run(&program);
    assert_eq!(result.outcome, Outcome::Tie);
    assert_eq!(result.outcome.winner(), None);
    assert!(matches!(
        log.last().map(|r| &r.event),
        Some(CombatEvent::CombatEnd { outcome: Outcome::Tie, .. })
    ));
}

// =============================================================================
// Conditionals
// =============================================================================

#[test]
fn branch_switches_exactly_below_threshold() {
    let fighters = "
        luchador Rex {
            stats(hp=100, st=0);
            acciones { golpe: puño(daño=1); bloqueo: guardia; }
            combos { nada(st_req=1) { guardia } }
        }
        luchador Tom {
            stats(hp=100, st=0);
            acciones { golpe: puño(daño=10); }
            combos { nada(st_req=1) { puño } }
        }
    ";
    let program = program(
        fighters,
        "turno Rex { si (self.hp < 50) { usa guardia; } sino { usa puño; } }
         turno Tom { usa puño; }",
        "Rex",
        8,
    );
    let (log, _) = run(&program);

    let rex_choices: Vec<_> = log
        .iter()
        .filter(|r| r.event.actor() == Some("Rex") && r.event_type() != "turn-start")
        .map(|r| (r.round, r.event_type()))
        .collect();
    // Rex sees hp 100, 90, ..., 50 in rounds 1 to 6, then 40 and 30.
    let expected: Vec<_> = (1..=8)
        .map(|round| {
            let kind = if round <= 6 { "action-applied" } else { "block-used" };
            (round, kind)
        })
        .collect();
    assert_eq!(rex_choices, expected);
}

#[test]
fn condition_reads_opponent() {
    let program = program(
        PUNCHERS,
        "turno Rex { si (oponente.st <= 40) { usa doble; } sino { usa puño; } }
         turno Tom { usa puño; usa puño; }",
        "Tom",
        2,
    );
    let (log, _) = run(&program);
    // Round 1: Tom is at 40 when Rex acts, so Rex pays for doble.
    assert_eq!(log.by_event_type("combo-executed").len(), 1);
    assert_eq!(log.by_event_type("combo-executed")[0].round, 1);
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn damage_clamps_at_zero() {
    let fighters = "
        luchador Rex {
            stats(hp=100, st=50);
            acciones { golpe: puño(daño=20, costo=10); }
            combos { doble(st_req=30) { puño, puño } }
        }
        luchador Tom {
            stats(hp=15, st=50);
            acciones { golpe: puño(daño=15, costo=5); }
            combos { doble(st_req=10) { puño, puño } }
        }
    ";
    let program = program(fighters, "turno Rex { usa puño; } turno Tom { usa puño; }", "Rex", 5);
    let (log, result) = run(&program);

    let Some(CombatEvent::ActionApplied {
        damage, target_hp, ..
    }) = log.events().find(|e| e.event_type() == "action-applied")
    else {
        panic!("expected a hit");
    };
    assert_eq!((*damage, *target_hp), (15, 0));
    assert_eq!(result.fighter_b.hp, 0);
    assert!(result.knockout);
    assert_eq!(result.rounds_played, 1);
    // Tom never gets a turn.
    assert_eq!(log.by_event_type("turn-start").len(), 1);
}

#[test]
fn missing_script_is_skipped() {
    let program = program(PUNCHERS, "turno Tom { usa puño; }", "Rex", 4);
    let (log, result) = run(&program);
    assert!(log.iter().all(|r| r.event.actor() != Some("Rex")));
    assert_eq!(result.fighter("Rex").unwrap().stamina, 50);
    assert_eq!(result.fighter("Rex").unwrap().hp, 40);
    assert_eq!(result.outcome, Outcome::Winner("Tom".into()));
}

#[test]
fn unknown_name_changes_nothing() {
    let program = program(PUNCHERS, "turno Rex { usa patadon; }", "Rex", 1);
    let (log, result) = run(&program);
    assert!(matches!(
        log.events().nth(1),
        Some(CombatEvent::UnknownAction { name, .. }) if name == "patadon"
    ));
    assert_eq!((result.fighter_a.hp, result.fighter_a.stamina), (100, 50));
}

#[test]
fn repeated_runs_are_identical() {
    let program = program(
        PUNCHERS,
        "turno Rex { si (self.st >= 30) { usa doble; } sino { usa puño; } }
         turno Tom { usa doble; usa nada; }",
        "Tom",
        10,
    );
    let first = run(&program);
    let second = run(&program);
    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
    assert_eq!(program.fighter("Rex").unwrap().stamina_max, 50);
}
