//! Combo resolution: payment, fallback, and the recursion guards.

use luchadores_engine::{
    AbortReason, CombatEvent, DEFAULT_MAX_COMBOS_PER_TURN, EngineConfig, MAX_COMBO_DEPTH,
    run_with_config,
};
use luchadores_foundation::ErrorKind;
use luchadores_language::{ActionKind, AtomicAction, Combo, FighterBuilder, Span};

use super::{program, run};

const TOM: &str = "
    luchador Tom {
        stats(hp=100, st=0);
        acciones { bloqueo: guardia; }
        combos { muro(st_req=0) { guardia } }
    }
";

fn rex(stamina: u32, actions: &str, combos: &str) -> String {
    format!(
        "luchador Rex {{
            stats(hp=100, st={stamina});
            acciones {{ {actions} }}
            combos {{ {combos} }}
        }}
        {TOM}"
    )
}

fn event_types(log: &luchadores_engine::EventLog) -> Vec<&'static str> {
    log.iter()
        .map(|r| r.event_type())
        .filter(|t| *t != "turn-start" && *t != "combat-end")
        .collect()
}

// =============================================================================
// Payment and Fallback
// =============================================================================

#[test]
fn paid_combo_runs_every_step() {
    let fighters = rex(40, "golpe: x(daño=5, costo=4), y(daño=7, costo=6);", "xy(st_req=10) { x, y }");
    let program = program(&fighters, "turno Rex { usa xy; }", "Rex", 1);
    let (log, result) = run(&program);

    assert_eq!(
        event_types(&log),
        vec!["combo-executed", "action-applied", "action-applied"]
    );
    assert_eq!(result.fighter("Rex").unwrap().stamina, 20);
    assert_eq!(result.fighter("Tom").unwrap().hp, 88);
}

#[test]
fn fallback_charges_only_the_first_step() {
    let fighters = rex(10, "golpe: x(daño=5, costo=4), y(daño=7, costo=6);", "xy(st_req=30) { x, y }");
    let program = program(&fighters, "turno Rex { usa xy; }", "Rex", 1);
    let (log, result) = run(&program);

    assert_eq!(event_types(&log), vec!["combo-fallback", "action-applied"]);
    assert!(matches!(
        log.events().nth(1),
        Some(CombatEvent::ComboFallback { cost: 30, stamina: 10, fallback, .. }) if fallback == "x"
    ));
    assert_eq!(result.fighter("Rex").unwrap().stamina, 6);
    assert_eq!(result.fighter("Tom").unwrap().hp, 95);
}

#[test]
fn step_without_stamina_fails_alone() {
    let fighters = rex(14, "golpe: x(daño=5, costo=4), y(daño=7, costo=6);", "xy(st_req=10) { x, y }");
    let program = program(&fighters, "turno Rex { usa xy; }", "Rex", 1);
    let (log, result) = run(&program);

    assert_eq!(
        event_types(&log),
        vec!["combo-executed", "action-applied", "action-failed"]
    );
    assert_eq!(result.fighter("Rex").unwrap().stamina, 0);
}

#[test]
fn nested_combo_pays_its_own_cost() {
    let fighters = rex(
        20,
        "golpe: x(daño=1, costo=1);",
        "interno(st_req=5) { x } externo(st_req=10) { interno, x }",
    );
    let program = program(&fighters, "turno Rex { usa externo; }", "Rex", 1);
    let (log, result) = run(&program);

    assert_eq!(
        event_types(&log),
        vec!["combo-executed", "combo-executed", "action-applied", "action-applied"]
    );
    assert_eq!(result.fighter("Rex").unwrap().stamina, 3);
}

// =============================================================================
// Recursion Guards
// =============================================================================

#[test]
fn fallback_cycle_is_aborted() {
    let fighters = rex(0, "bloqueo: guardia;", "a(st_req=5) { b } b(st_req=5) { a }");
    let program = program(&fighters, "turno Rex { usa a; usa guardia; }", "Rex", 1);
    let (log, _) = run(&program);

    assert_eq!(
        event_types(&log),
        vec!["combo-fallback", "combo-fallback", "combo-aborted", "block-used"]
    );
    assert!(matches!(
        log.events().nth(3),
        Some(CombatEvent::ComboAborted { combo, reason: AbortReason::Cycle, .. }) if combo == "a"
    ));
}

#[test]
fn paying_self_reference_repeats_until_stamina_runs_out() {
    let fighters = rex(12, "bloqueo: guardia;", "otra(st_req=5) { otra }");
    let program = program(&fighters, "turno Rex { usa otra; }", "Rex", 1);
    let (log, result) = run(&program);

    assert_eq!(
        event_types(&log),
        vec!["combo-executed", "combo-executed", "combo-fallback", "combo-aborted"]
    );
    assert_eq!(result.fighter("Rex").unwrap().stamina, 2);
}

#[test]
fn free_self_reference_hits_depth_limit() {
    let fighters = rex(0, "bloqueo: guardia;", "gratis(st_req=0) { gratis }");
    let program = program(&fighters, "turno Rex { usa gratis; }", "Rex", 1);

    let (log, _) = run(&program);
    assert_eq!(log.by_event_type("combo-executed").len(), 32);
    let aborted = log.by_event_type("combo-aborted");
    assert_eq!(aborted.len(), 1);
    assert!(matches!(
        aborted[0].event,
        CombatEvent::ComboAborted { reason: AbortReason::DepthLimit, .. }
    ));

    let (log, _) =
        run_with_config(&program, EngineConfig::new().with_max_combo_depth(4)).unwrap();
    assert_eq!(log.by_event_type("combo-executed").len(), 4);
}

#[test]
fn branching_free_combo_is_cut_off_by_turn_budget() {
    let fighters = rex(0, "bloqueo: guardia;", "a(st_req=0) { a, a }");
    let program = program(&fighters, "turno Rex { usa a; usa guardia; }", "Rex", 2);
    let (log, result) = run(&program);

    // Each combo entered leaves exactly one event: executed or depth-limited.
    let entered = DEFAULT_MAX_COMBOS_PER_TURN as usize;
    let budget_aborts: Vec<_> = log
        .by_event_type("combo-aborted")
        .into_iter()
        .filter(|r| matches!(r.event, CombatEvent::ComboAborted { reason: AbortReason::Budget, .. }))
        .collect();
    assert_eq!(budget_aborts.len(), 2);
    assert_eq!(budget_aborts[0].round, 1);
    assert_eq!(budget_aborts[1].round, 2);
    assert!(log.by_event_type("block-used").is_empty());
    assert_eq!(log.len(), 2 * (1 + entered + 1) + 1);
    assert_eq!(result.rounds_played, 2);
}

#[test]
fn turn_budget_skips_rest_of_turn() {
    let fighters = rex(0, "bloqueo: guardia;", "gratis(st_req=0) { gratis }");
    let program = program(&fighters, "turno Rex { usa gratis; usa guardia; }", "Rex", 1);
    let config = EngineConfig::new().with_max_combos_per_turn(3);
    let (log, _) = run_with_config(&program, config).unwrap();

    assert_eq!(
        event_types(&log),
        vec!["combo-executed", "combo-executed", "combo-executed", "combo-aborted"]
    );
    assert!(matches!(
        log.last().map(|r| &r.event),
        Some(CombatEvent::CombatEnd { .. })
    ));
}

#[test]
fn oversized_depth_limit_is_clamped() {
    let fighters = rex(0, "bloqueo: guardia;", "gratis(st_req=0) { gratis }");
    let program = program(&fighters, "turno Rex { usa gratis; }", "Rex", 1);

    let config = EngineConfig::new().with_max_combo_depth(1_000_000);
    assert_eq!(config.max_combo_depth, MAX_COMBO_DEPTH);
    let (log, _) = run_with_config(&program, config).unwrap();
    assert_eq!(log.by_event_type("combo-executed").len(), MAX_COMBO_DEPTH as usize);

    let config = EngineConfig {
        max_combo_depth: u32::MAX,
        ..EngineConfig::default()
    };
    let (log, _) = run_with_config(&program, config).unwrap();
    let aborted = log.by_event_type("combo-aborted");
    assert_eq!(aborted.len(), 1);
    assert!(matches!(
        aborted[0].event,
        CombatEvent::ComboAborted { reason: AbortReason::DepthLimit, .. }
    ));
}

// =============================================================================
// Hand-built Programs
// =============================================================================

#[test]
fn empty_combo_falls_back_to_nothing() {
    let fighters = rex(0, "bloqueo: guardia;", "muro(st_req=0) { guardia }");
    let mut program = program(&fighters, "turno Rex { usa vacio; usa guardia; }", "Rex", 1);

    let mut builder = FighterBuilder::new("Rex", 100, 0, Span::default());
    builder
        .add_action(AtomicAction::new(ActionKind::Block, "guardia", Span::default()))
        .unwrap();
    builder
        .add_combo(Combo {
            name: "vacio".into(),
            stamina_cost: 5,
            steps: Vec::new(),
            span: Span::default(),
        })
        .unwrap();
    program.fighters.insert("Rex".into(), builder.build());

    let (log, _) = run(&program);
    assert_eq!(event_types(&log), vec!["block-used"]);
}

#[test]
fn unknown_combatant_is_an_error() {
    let fighters = rex(0, "bloqueo: guardia;", "muro(st_req=0) { guardia }");
    let mut program = program(&fighters, "turno Rex { usa guardia; }", "Rex", 1);
    program.config.fighter_b = "Ana".into();

    let err = luchadores_engine::run(&program).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownFighter(ref name) if name == "Ana"));
}
