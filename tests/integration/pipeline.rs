//! Source text through parsing, execution, and rendering.

use luchadores::debug::{CombatStats, EventFilter, FormatConfig, OutputFormat};
use luchadores::engine::{CombatEvent, EngineConfig, run_with_config};
use luchadores::language::parse_with_diagnostics;
use luchadores::runtime::{Session, SessionConfig};
use proptest::prelude::*;

const SOURCE: &str = "
luchador Ana {
    stats(hp=80, st=60);
    acciones {
        golpe: directo(daño=12, costo=8);
        patada: lateral_alta(daño=20, costo=15, altura=alta, forma=lateral);
        bloqueo: cruce;
    }
    combos {
        tormenta(st_req=25) { directo, lateral_alta }
    }
}

luchador Bea {
    stats(hp=90, st=40);
    acciones {
        golpe: jab(daño=6, costo=2);
        bloqueo: muro;
    }
    combos {
        metralla(st_req=10) { jab, jab, jab }
    }
}

simulacion {
    config {
        luchadores: Ana vs Bea;
        inicia: Bea;
        turnos_max: 8;
    }
    pelea {
        turno Ana {
            si (self.st >= 25) {
                usa tormenta;
            } sino {
                si (oponente.hp > 40) { usa directo; } sino { usa cruce; }
            }
        }
        turno Bea {
            si (self.hp < 30) { usa muro; } sino { usa metralla; }
        }
    }
}
";

#[test]
fn stats_agree_with_result() {
    let parsed = parse_with_diagnostics(SOURCE).unwrap();
    assert!(parsed.is_clean());

    let (log, result) = run_with_config(&parsed.program, EngineConfig::default()).unwrap();
    let stats = CombatStats::from_log(&log);

    for snapshot in [&result.fighter_a, &result.fighter_b] {
        let fighter = stats.fighter(&snapshot.name).unwrap();
        assert_eq!(snapshot.hp_max - snapshot.hp, fighter.damage_taken, "{}", snapshot.name);
        assert_eq!(
            snapshot.stamina_max - snapshot.stamina,
            fighter.stamina_spent,
            "{}",
            snapshot.name
        );
    }
}

#[test]
fn log_ends_with_the_result() {
    let parsed = parse_with_diagnostics(SOURCE).unwrap();
    let (log, result) = luchadores::engine::run(&parsed.program).unwrap();

    let Some(CombatEvent::CombatEnd {
        fighter_a,
        fighter_b,
        outcome,
    }) = log.last().map(|r| &r.event)
    else {
        panic!("log must end with combat-end");
    };
    assert_eq!(fighter_a, &result.fighter_a);
    assert_eq!(fighter_b, &result.fighter_b);
    assert_eq!(outcome, &result.outcome);
    assert_eq!(log.last().unwrap().round, result.rounds_played);
    assert_eq!(log.stats().count("combat-end"), 1);
}

#[test]
fn round_numbers_never_decrease() {
    let parsed = parse_with_diagnostics(SOURCE).unwrap();
    let (log, result) = luchadores::engine::run(&parsed.program).unwrap();
    let rounds: Vec<_> = log.iter().map(|r| r.round).collect();
    assert!(rounds.windows(2).all(|w| w[0] <= w[1]));
    assert!(rounds.iter().all(|r| (1..=result.rounds_played).contains(r)));
}

#[test]
fn session_renders_filtered_json() {
    let format = FormatConfig::new()
        .with_format(OutputFormat::Json)
        .with_filter(EventFilter::new().with_fighter("Ana"));
    let session = Session::new(SessionConfig::new().with_format(format));
    let loaded = session.load_source("pipeline", SOURCE).unwrap();
    let combat = session.run(&loaded).unwrap();
    let lines = session.render(&combat);

    let ana_records = combat
        .log
        .iter()
        .filter(|r| r.event.actor().is_none_or(|a| a == "Ana"))
        .count();
    assert_eq!(lines.len(), ana_records + 1);
    assert!(lines.iter().all(|l| l.starts_with('{') && l.ends_with('}')));
    assert!(!lines.iter().any(|l| l.contains("\"actor\":\"Bea\"")));
}

proptest! {
    #[test]
    fn stats_agree_for_any_stat_block(
        ana in (0..150u32, 0..80u32),
        bea in (0..150u32, 0..80u32),
        turns in 1..20u32,
    ) {
        let source = SOURCE
            .replace("stats(hp=80, st=60)", &format!("stats(hp={}, st={})", ana.0, ana.1))
            .replace("stats(hp=90, st=40)", &format!("stats(hp={}, st={})", bea.0, bea.1))
            .replace("turnos_max: 8", &format!("turnos_max: {turns}"));
        let program = luchadores::language::parse(&source).unwrap();
        let (log, result) = luchadores::engine::run(&program).unwrap();
        let stats = CombatStats::from_log(&log);

        for snapshot in [&result.fighter_a, &result.fighter_b] {
            let (taken, spent) = stats
                .fighter(&snapshot.name)
                .map_or((0, 0), |f| (f.damage_taken, f.stamina_spent));
            prop_assert_eq!(snapshot.hp_max - snapshot.hp, taken);
            prop_assert_eq!(snapshot.stamina_max - snapshot.stamina, spent);
        }
        prop_assert!(result.rounds_played <= turns);
    }
}
