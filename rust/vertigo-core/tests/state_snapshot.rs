//! Interpreter state persistence and library routing from the host's side.

use num_bigint::BigInt;
use tracing_subscriber::EnvFilter;
use vertigo_core::{
    Complex64, ErrorKind, InterpreterState, Library, LibraryError, LibrarySet, OperandResolver,
    Value, VertigoError,
};

fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Handler that copies its last operand into the `acc` register.
fn load(parts: &[&str], state: &mut InterpreterState) -> Result<(), VertigoError> {
    let Some(token) = parts.get(1..).and_then(|rest| rest.last()) else {
        return Err(VertigoError::syntax(state.current_line(), "LOAD needs an operand."));
    };
    let value = state.resolve(token)?;
    state.declare_register("acc", value);
    Ok(())
}

fn seed_constants(state: &mut InterpreterState) {
    state.immutables.insert("+half".into(), Value::Float(0.5));
}

fn sample_state() -> InterpreterState {
    let mut state = InterpreterState::with_registers(["r1", "r2"]);
    state.declare_register("big", Value::from_bigint(BigInt::from(i64::MAX) * 4));
    state.declare_register("z", Value::Complex(Complex64::new(1.5, -2.0)));
    state.declare_stack("main");
    state.stacks.get_mut("main").unwrap().push(Value::Float(2.5));
    state.select_stack(Some("main"));
    state.instruction_pointer = 9;
    state
}

// ─── Snapshots ───

#[test]
fn state_survives_json_round_trip() {
    init_test();
    let state = sample_state();
    let json = serde_json::to_string(&state).unwrap();
    let restored: InterpreterState = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.register("r1"), Some(&Value::Int(0)));
    assert_eq!(restored.register("big"), state.register("big"));
    assert_eq!(
        restored.register("z"),
        Some(&Value::Complex(Complex64::new(1.5, -2.0)))
    );
    assert_eq!(restored.stack("main").unwrap(), &[Value::Float(2.5)]);
    assert_eq!(restored.current_stack_name.as_deref(), Some("main"));
    assert_eq!(restored.current_line(), 10);
}

#[test]
fn error_kinds_serialize_by_name() {
    let json = serde_json::to_string(&ErrorKind::ZeroDivision).unwrap();
    assert_eq!(json, "\"ZeroDivision\"");
    let back: ErrorKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ErrorKind::ZeroDivision);
}

// ─── Routing ───

#[test]
fn installed_library_handles_its_instruction() {
    init_test();
    let mut state = sample_state();
    let mut libs = LibrarySet::new();
    let lib = Library::new("loader")
        .with_instruction("LOAD", load)
        .with_initializer(seed_constants);
    libs.install(&lib, &mut state).unwrap();

    libs.execute_line("load +half", &mut state).unwrap();
    assert_eq!(state.register("acc"), Some(&Value::Float(0.5)));
    libs.execute_line("LOAD big", &mut state).unwrap();
    assert_eq!(state.register("acc"), state.register("big"));
    libs.execute_line("   ", &mut state).unwrap();
}

#[test]
fn unknown_instruction_reports_line() {
    let mut state = sample_state();
    let libs = LibrarySet::new();
    let err = libs.execute_line("FROB r1", &mut state).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.line(), 10);
    assert_eq!(err.to_string(), "SyntaxError at line 10: Unknown instruction 'FROB'.");
}

#[test]
fn handler_errors_reach_the_host() {
    let mut state = sample_state();
    let mut libs = LibrarySet::new();
    libs.install(&Library::new("loader").with_instruction("LOAD", load), &mut state)
        .unwrap();
    let err = libs.execute_line("LOAD nowhere", &mut state).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
    assert!(state.register("acc").is_none());
}

#[test]
fn second_library_cannot_claim_an_instruction() {
    let mut state = InterpreterState::new();
    let mut libs = LibrarySet::new();
    libs.install(&Library::new("first").with_instruction("LOAD", load), &mut state)
        .unwrap();
    let err = libs
        .install(&Library::new("second").with_instruction("load", load), &mut state)
        .unwrap_err();
    assert!(matches!(err, LibraryError::InstructionConflict { .. }));
    assert!(!libs.is_installed("second"));
}

// ─── Operand resolution ───

#[test]
fn registers_shadow_literals() {
    let mut state = InterpreterState::new();
    state.declare_register("10", Value::Int(99));
    assert_eq!(state.resolve("10").unwrap(), Value::Int(99));
    assert_eq!(state.resolve("11").unwrap(), Value::Int(11));
    assert_eq!(state.resolve("-0.25").unwrap(), Value::Float(-0.25));
    assert!(matches!(
        state.resolve("123456789012345678901234567890").unwrap(),
        Value::BigInt(_)
    ));
}
