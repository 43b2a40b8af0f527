//! Integration tests for the parser
//!
//! Tests parsing of complete programs and the errors it reports.

use luchadores_foundation::ErrorKind;
use luchadores_language::{
    ActionKind, Attribute, Height, Instruction, RelOp, Shape, Subject, Warning, parse,
    parse_with_diagnostics,
};

const FIGHTERS: &str = "
luchador Rex {
    stats(hp=100, st=50);
    acciones {
        golpe: puño(daño=20, costo=10), gancho(daño=30, costo=20, altura=alta, forma=lateral);
        patada: barrida(costo=15, daño=25, giratoria=si, altura=baja);
        bloqueo: guardia;
    }
    combos {
        rafaga(st_req=30) { puño, gancho }
        cierre(st_req=0) { guardia }
    }
}
luchador Tom {
    stats(hp=90, st=40);
    acciones { golpe: puño(daño=15, costo=5); }
    combos { doble(st_req=10) { puño, puño } }
}
";

fn with_simulation(simulation: &str) -> String {
    format!("{FIGHTERS}\n{simulation}")
}

const SIMULATION: &str = "
simulacion {
    config { luchadores: Rex vs Tom; inicia: Tom; turnos_max: 3; }
    pelea {
        turno Rex {
            si (self.hp < 50) { usa guardia; } sino { usa rafaga; }
        }
        turno Tom { usa doble; usa puño; }
    }
}
";

// =============================================================================
// Successful Parses
// =============================================================================

#[test]
fn counts_match_source() {
    let program = parse(&with_simulation(SIMULATION)).unwrap();
    let summary = program.summary();
    assert_eq!(summary.fighters.len(), 2);

    let rex = summary.fighter("Rex").unwrap();
    assert_eq!((rex.actions, rex.combos), (4, 2));
    let tom = summary.fighter("Tom").unwrap();
    assert_eq!((tom.actions, tom.combos), (1, 1));
    assert_eq!(summary.scripts, 2);
    assert_eq!(summary.max_turns, 3);
}

#[test]
fn action_attributes() {
    let program = parse(&with_simulation(SIMULATION)).unwrap();
    let rex = program.fighter("Rex").unwrap();

    let gancho = rex.action("gancho").unwrap();
    assert_eq!(gancho.kind, ActionKind::Strike);
    assert_eq!((gancho.damage, gancho.cost), (30, 20));
    assert_eq!(gancho.height, Some(Height::High));
    assert_eq!(gancho.shape, Some(Shape::Lateral));
    assert!(!gancho.spinning);

    let barrida = rex.action("barrida").unwrap();
    assert_eq!(barrida.kind, ActionKind::Kick);
    assert_eq!((barrida.damage, barrida.cost), (25, 15));
    assert_eq!(barrida.height, Some(Height::Low));
    assert_eq!(barrida.shape, None);
    assert!(barrida.spinning);

    let guardia = rex.action("guardia").unwrap();
    assert_eq!(guardia.kind, ActionKind::Block);
    assert_eq!((guardia.damage, guardia.cost), (0, 0));
}

#[test]
fn combo_steps_in_order() {
    let program = parse(&with_simulation(SIMULATION)).unwrap();
    let rafaga = program.fighter("Rex").unwrap().combo("rafaga").unwrap();
    assert_eq!(rafaga.stamina_cost, 30);
    assert_eq!(rafaga.steps, vec!["puño", "gancho"]);
    assert_eq!(rafaga.first_step(), Some("puño"));
}

#[test]
fn config_and_scripts() {
    let program = parse(&with_simulation(SIMULATION)).unwrap();
    assert_eq!(program.config.fighter_a, "Rex");
    assert_eq!(program.config.fighter_b, "Tom");
    assert_eq!(program.config.turn_order(), ["Tom", "Rex"]);

    let rex = program.script_for("Rex").unwrap();
    let Instruction::Conditional {
        condition,
        then_block,
        else_block,
    } = &rex.instructions[0]
    else {
        panic!("expected a conditional");
    };
    assert_eq!(condition.subject, Subject::Actor);
    assert_eq!(condition.attribute, Attribute::Hp);
    assert_eq!(condition.op, RelOp::Lt);
    assert_eq!(condition.threshold, 50);
    assert!(matches!(then_block.as_slice(), [Instruction::Use { name, .. }] if name == "guardia"));
    assert!(matches!(else_block.as_slice(), [Instruction::Use { name, .. }] if name == "rafaga"));
}

#[test]
fn last_script_wins() {
    let source = with_simulation(
        "simulacion {
            config { luchadores: Rex vs Tom; inicia: Rex; turnos_max: 1; }
            pelea {
                turno Tom { usa puño; }
                turno Tom { usa doble; usa doble; }
            }
        }",
    );
    let parsed = parse_with_diagnostics(&source).unwrap();
    assert_eq!(parsed.program.script_for("Tom").unwrap().instructions.len(), 2);
    assert!(parsed.program.script_for("Rex").is_none());
    assert!(matches!(
        parsed.warnings.as_slice(),
        [Warning::ShadowedScript { fighter, .. }] if fighter == "Tom"
    ));
}

#[test]
fn repeated_attribute_last_wins() {
    let source = "
        luchador Rex { stats(hp=1, st=1); acciones { golpe: jab(daño=1, daño=7); } combos { x(st_req=0) { jab } } }
        luchador Tom { stats(hp=1, st=1); acciones { bloqueo: b; } combos { y(st_req=0) { b } } }
        simulacion { config { luchadores: Rex vs Tom; inicia: Rex; turnos_max: 1; } pelea { turno Rex { usa jab; } } }
    ";
    let program = parse(source).unwrap();
    assert_eq!(program.fighter("Rex").unwrap().action("jab").unwrap().damage, 7);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn missing_semicolon_names_token_and_line() {
    let source = with_simulation(&SIMULATION.replace("usa doble;", "usa doble"));
    let err = parse(&source).unwrap_err();
    let ErrorKind::Syntax { message, line, .. } = &err.kind else {
        panic!("expected a syntax error, got {err}");
    };
    assert_eq!(message, "expected ';', found 'usa'");
    assert_eq!(*line, 27);
}

#[test]
fn truncated_input_is_eof() {
    let source = with_simulation(SIMULATION);
    let cut = &source[..source.len() - 4];
    let err = parse(cut).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedEof { .. }));
}

#[test]
fn missing_simulation_is_an_error() {
    assert!(parse(FIGHTERS).is_err());
}

#[test]
fn lexical_errors_attached_to_syntax_error() {
    let source = with_simulation(&SIMULATION.replace("turnos_max: 3;", "turnos_max: #;"));
    let err = parse(&source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
    assert_eq!(err.lexical.len(), 1);
    assert_eq!(err.lexical[0].character, '#');
}

#[test]
fn semantic_errors() {
    let unknown = with_simulation(&SIMULATION.replace("Rex vs Tom", "Rex vs Ana"));
    let err = parse(&unknown).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Semantic { .. }));
    assert!(err.to_string().contains("'Ana'"));

    let bad_starter = with_simulation(&SIMULATION.replace("inicia: Tom", "inicia: Ana"));
    assert!(matches!(parse(&bad_starter).unwrap_err().kind, ErrorKind::Semantic { .. }));

    let zero = with_simulation(&SIMULATION.replace("turnos_max: 3", "turnos_max: 0"));
    assert!(matches!(parse(&zero).unwrap_err().kind, ErrorKind::Semantic { .. }));

    let twice = format!("{FIGHTERS}{}", with_simulation(SIMULATION));
    let err = parse(&twice).unwrap_err();
    assert!(err.to_string().contains("fighter 'Rex' is declared twice"));
}

#[test]
fn out_of_range_number() {
    let source = with_simulation(&SIMULATION.replace("turnos_max: 3", "turnos_max: 4294967296"));
    assert!(matches!(parse(&source).unwrap_err().kind, ErrorKind::Syntax { .. }));
}
