//! Integration tests for the IPPcode24 VM.
//!
//! Programs are built either directly from instructions or from XML
//! documents through the loader, and run against in-memory ports.

use ippcode_common::{ErrorKind, Instruction, Operand, OperandKind, Program};
use ippcode_vm::io::{LineInput, Ports, WriterPort};
use ippcode_vm::{run, RuntimeError};

// ============================================================
// Helpers
// ============================================================

struct Outcome {
    result: Result<i32, RuntimeError>,
    stdout: String,
    stderr: String,
}

impl Outcome {
    fn code(&self) -> i32 {
        match &self.result {
            Ok(code) => *code,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    fn kind(&self) -> ErrorKind {
        match &self.result {
            Ok(code) => panic!("expected an error, program exited with {code}"),
            Err(err) => err.kind(),
        }
    }
}

fn run_with_input(instructions: Vec<Instruction>, input: &str) -> Outcome {
    let program = Program::new(instructions);
    run_loaded(&program, input)
}

fn run_loaded(program: &Program, input: &str) -> Outcome {
    let mut input = LineInput::new(input.as_bytes());
    let mut output = WriterPort::new(Vec::new());
    let mut diagnostics = WriterPort::new(Vec::new());
    let result = run(
        program,
        Ports {
            input: &mut input,
            output: &mut output,
            diagnostics: &mut diagnostics,
        },
    );
    Outcome {
        result,
        stdout: String::from_utf8(output.into_inner()).unwrap(),
        stderr: String::from_utf8(diagnostics.into_inner()).unwrap(),
    }
}

/// Run a program given as `(opcode, operands)` pairs with orders 1, 2, ...
fn run_program(steps: Vec<(&str, Vec<Operand>)>) -> Outcome {
    run_with_input(numbered(steps), "")
}

fn numbered(steps: Vec<(&str, Vec<Operand>)>) -> Vec<Instruction> {
    (1u32..)
        .zip(steps)
        .map(|(order, (opcode, operands))| Instruction::new(order, opcode, operands))
        .collect()
}

fn var(text: &str) -> Operand {
    Operand::var(text)
}

fn int(value: i64) -> Operand {
    Operand::int(value)
}

fn string(text: &str) -> Operand {
    Operand::string(text)
}

fn label(name: &str) -> Operand {
    Operand::label(name)
}

fn defvar(name: &str) -> (&str, Vec<Operand>) {
    ("DEFVAR", vec![var(name)])
}

fn write(operand: Operand) -> (&'static str, Vec<Operand>) {
    ("WRITE", vec![operand])
}

/// Program that declares `GF@r`, computes `opcode GF@r a b` and writes it.
fn binary(opcode: &str, a: Operand, b: Operand) -> Outcome {
    run_program(vec![
        defvar("GF@r"),
        (opcode, vec![var("GF@r"), a, b]),
        write(var("GF@r")),
    ])
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn write_assigned_int() {
    let out = run_program(vec![
        defvar("GF@x"),
        ("MOVE", vec![var("GF@x"), int(42)]),
        write(var("GF@x")),
    ]);
    assert_eq!(out.code(), 0);
    assert_eq!(out.stdout, "42");
}

#[test]
fn string_escapes_decode_on_use() {
    let out = run_program(vec![
        defvar("GF@s"),
        ("MOVE", vec![var("GF@s"), string("ab\\099c")]),
        write(var("GF@s")),
        write(string("\\065")),
    ]);
    assert_eq!(out.stdout, "abccA");
}

#[test]
fn popped_local_frame_is_gone() {
    let out = run_program(vec![
        ("CREATEFRAME", vec![]),
        ("PUSHFRAME", vec![]),
        defvar("LF@x"),
        ("POPFRAME", vec![]),
        defvar("LF@y"),
    ]);
    assert_eq!(out.kind(), ErrorKind::FrameAccess);
}

#[test]
fn division_by_zero_after_operands() {
    let out = run_program(vec![
        defvar("GF@a"),
        ("MOVE", vec![var("GF@a"), int(5)]),
        defvar("GF@b"),
        ("MOVE", vec![var("GF@b"), int(0)]),
        defvar("GF@c"),
        ("IDIV", vec![var("GF@c"), var("GF@a"), var("GF@b")]),
    ]);
    assert_eq!(out.kind(), ErrorKind::OperandValue);
    assert_eq!(out.result, Err(RuntimeError::DivisionByZero { at: 6 }));
}

#[test]
fn undeclared_destination_is_checked_first() {
    let out = run_program(vec![
        defvar("GF@a"),
        ("MOVE", vec![var("GF@a"), int(5)]),
        ("IDIV", vec![var("GF@c"), var("GF@a"), int(0)]),
    ]);
    assert_eq!(out.kind(), ErrorKind::VariableAccess);
}

#[test]
fn duplicate_label_fails_before_execution() {
    let out = run_program(vec![
        write(string("never")),
        ("LABEL", vec![label("same")]),
        ("LABEL", vec![label("same")]),
    ]);
    assert_eq!(out.kind(), ErrorKind::Semantic);
    assert_eq!(out.stdout, "");
}

// ============================================================
// Program flow
// ============================================================

#[test]
fn empty_program_exits_zero() {
    let out = run_program(vec![]);
    assert_eq!(out.code(), 0);
}

#[test]
fn gaps_in_orders_are_skipped() {
    let out = run_with_input(
        vec![
            Instruction::new(10, "WRITE", vec![int(2)]),
            Instruction::new(3, "WRITE", vec![int(1)]),
            Instruction::new(100, "WRITE", vec![int(3)]),
        ],
        "",
    );
    assert_eq!(out.code(), 0);
    assert_eq!(out.stdout, "123");
}

#[test]
fn sparse_high_orders_run_directly() {
    let out = run_with_input(
        vec![
            Instruction::new(7, "WRITE", vec![int(1)]),
            Instruction::new(u32::MAX - 1, "BREAK", vec![]),
            Instruction::new(u32::MAX, "WRITE", vec![int(2)]),
        ],
        "",
    );
    assert_eq!(out.code(), 0);
    assert_eq!(out.stdout, "12");
    assert!(out
        .stderr
        .contains("- IP (next instruction index) = 4294967295, IC (processed instruction counter) = 2\n"));
}

#[test]
fn exit_stops_execution() {
    let out = run_program(vec![("EXIT", vec![int(7)]), write(int(1))]);
    assert_eq!(out.code(), 7);
    assert_eq!(out.stdout, "");
}

#[test]
fn exit_code_bounds() {
    assert_eq!(run_program(vec![("EXIT", vec![int(0)])]).code(), 0);
    assert_eq!(run_program(vec![("EXIT", vec![int(9)])]).code(), 9);
    for code in [-1, 10, i64::MAX] {
        let out = run_program(vec![("EXIT", vec![int(code)])]);
        assert_eq!(out.kind(), ErrorKind::OperandValue, "{code}");
    }
    let out = run_program(vec![("EXIT", vec![string("1")])]);
    assert_eq!(out.kind(), ErrorKind::OperandType);
}

#[test]
fn invalid_instruction_after_exit_is_never_checked() {
    let out = run_program(vec![("EXIT", vec![int(1)]), ("FROB", vec![])]);
    assert_eq!(out.code(), 1);
}

#[test]
fn unknown_opcode_is_structural() {
    let out = run_program(vec![("FROB", vec![])]);
    assert_eq!(out.kind(), ErrorKind::Structure);
}

#[test]
fn jump_forward_skips_instructions() {
    let out = run_program(vec![
        ("JUMP", vec![label("end")]),
        write(string("skipped")),
        ("LABEL", vec![label("end")]),
        write(string("done")),
    ]);
    assert_eq!(out.stdout, "done");
}

#[test]
fn jump_to_undefined_label_is_semantic() {
    let out = run_program(vec![("JUMP", vec![label("nowhere")])]);
    assert_eq!(out.kind(), ErrorKind::Semantic);
}

#[test]
fn countdown_loop() {
    let out = run_program(vec![
        defvar("GF@i"),
        ("MOVE", vec![var("GF@i"), int(3)]),
        ("LABEL", vec![label("loop")]),
        write(var("GF@i")),
        ("SUB", vec![var("GF@i"), var("GF@i"), int(1)]),
        ("JUMPIFNEQ", vec![label("loop"), var("GF@i"), int(0)]),
    ]);
    assert_eq!(out.code(), 0);
    assert_eq!(out.stdout, "321");
}

#[test]
fn jumpifeq_takes_branch_on_equal() {
    let out = run_program(vec![
        ("JUMPIFEQ", vec![label("yes"), string("a"), string("a")]),
        write(string("no")),
        ("EXIT", vec![int(0)]),
        ("LABEL", vec![label("yes")]),
        write(string("yes")),
    ]);
    assert_eq!(out.stdout, "yes");
}

#[test]
fn conditional_jump_checks_label_before_types() {
    let out = run_program(vec![("JUMPIFEQ", vec![label("none"), int(1), string("a")])]);
    assert_eq!(out.kind(), ErrorKind::Semantic);

    let out = run_program(vec![
        ("JUMPIFEQ", vec![label("here"), int(1), string("a")]),
        ("LABEL", vec![label("here")]),
    ]);
    assert_eq!(out.kind(), ErrorKind::OperandType);
}

#[test]
fn conditional_jump_with_nil() {
    let out = run_program(vec![
        ("JUMPIFNEQ", vec![label("end"), Operand::nil(), int(1)]),
        write(string("not taken")),
        ("LABEL", vec![label("end")]),
    ]);
    assert_eq!(out.stdout, "");
}

#[test]
fn call_and_return() {
    let out = run_program(vec![
        ("CALL", vec![label("f")]),
        write(string("back")),
        ("EXIT", vec![int(0)]),
        ("LABEL", vec![label("f")]),
        write(string("in f,")),
        ("RETURN", vec![]),
    ]);
    assert_eq!(out.code(), 0);
    assert_eq!(out.stdout, "in f,back");
}

#[test]
fn recursive_calls_with_frames() {
    // f(n): if n == 0 return; write n; f(n - 1)
    let out = run_program(vec![
        ("CREATEFRAME", vec![]),
        defvar("TF@n"),
        ("MOVE", vec![var("TF@n"), int(3)]),
        ("CALL", vec![label("f")]),
        ("EXIT", vec![int(0)]),
        ("LABEL", vec![label("f")]),
        ("PUSHFRAME", vec![]),
        ("JUMPIFEQ", vec![label("out"), var("LF@n"), int(0)]),
        write(var("LF@n")),
        ("CREATEFRAME", vec![]),
        defvar("TF@n"),
        ("SUB", vec![var("TF@n"), var("LF@n"), int(1)]),
        ("CALL", vec![label("f")]),
        ("LABEL", vec![label("out")]),
        ("POPFRAME", vec![]),
        ("RETURN", vec![]),
    ]);
    assert_eq!(out.code(), 0);
    assert_eq!(out.stdout, "321");
}

#[test]
fn return_on_empty_call_stack_is_value_error() {
    let out = run_program(vec![("RETURN", vec![])]);
    assert_eq!(out.result, Err(RuntimeError::CallStackEmpty { at: 1 }));
    assert_eq!(out.kind(), ErrorKind::Value);
}

// ============================================================
// Operand shape
// ============================================================

#[test]
fn too_many_operands_is_structural() {
    let out = run_program(vec![("CREATEFRAME", vec![int(1)])]);
    assert_eq!(out.kind(), ErrorKind::Structure);
}

#[test]
fn missing_operand_is_structural() {
    let out = run_program(vec![("MOVE", vec![var("GF@x")])]);
    assert_eq!(out.kind(), ErrorKind::Structure);
}

#[test]
fn wrong_operand_kinds_are_operand_type() {
    let out = run_program(vec![("MOVE", vec![int(1), int(2)])]);
    assert_eq!(out.kind(), ErrorKind::OperandType);
    let out = run_program(vec![("WRITE", vec![label("x")])]);
    assert_eq!(out.kind(), ErrorKind::OperandType);
    let out = run_program(vec![("JUMP", vec![string("x")])]);
    assert_eq!(out.kind(), ErrorKind::OperandType);
}

#[test]
fn unknown_operand_kind_is_operand_type() {
    let out = run_program(vec![(
        "WRITE",
        vec![Operand::new(OperandKind::parse("float"), "1.5")],
    )]);
    assert_eq!(out.kind(), ErrorKind::OperandType);
}

#[test]
fn read_type_slot_must_be_type() {
    let out = run_program(vec![defvar("GF@x"), ("READ", vec![var("GF@x"), string("int")])]);
    assert_eq!(out.kind(), ErrorKind::Structure);
}

#[test]
fn bad_label_name_in_jump_is_operand_value() {
    let out = run_program(vec![("JUMP", vec![label("9lives")])]);
    assert_eq!(out.kind(), ErrorKind::OperandValue);
}

#[test]
fn invalid_literal_is_value_error() {
    let out = run_program(vec![write(Operand::new(OperandKind::Int, "12a"))]);
    assert_eq!(out.kind(), ErrorKind::Value);
    let out = run_program(vec![write(Operand::new(OperandKind::String, "a\\12"))]);
    assert_eq!(out.kind(), ErrorKind::Value);
}

#[test]
fn integer_literal_forms() {
    let out = run_program(vec![
        write(Operand::new(OperandKind::Int, "0x1A")),
        write(string(",")),
        write(Operand::new(OperandKind::Int, "-0x1A")),
        write(string(",")),
        write(Operand::new(OperandKind::Int, "0o32")),
        write(string(",")),
        write(Operand::new(OperandKind::Int, "+26")),
    ]);
    assert_eq!(out.stdout, "26,-26,26,26");
}

// ============================================================
// Variables and frames
// ============================================================

#[test]
fn variable_errors() {
    let out = run_program(vec![write(var("GF@nope"))]);
    assert_eq!(out.kind(), ErrorKind::VariableAccess);

    let out = run_program(vec![defvar("GF@x"), write(var("GF@x"))]);
    assert_eq!(out.kind(), ErrorKind::Value);

    let out = run_program(vec![write(var("LF@x"))]);
    assert_eq!(out.kind(), ErrorKind::FrameAccess);

    let out = run_program(vec![write(var("XF@x"))]);
    assert_eq!(out.kind(), ErrorKind::Structure);

    let out = run_program(vec![write(var("noframe"))]);
    assert_eq!(out.kind(), ErrorKind::OperandValue);

    let out = run_program(vec![write(var("GF@1x"))]);
    assert_eq!(out.kind(), ErrorKind::OperandValue);
}

#[test]
fn defvar_errors() {
    let out = run_program(vec![defvar("GF@x"), defvar("GF@x")]);
    assert_eq!(out.kind(), ErrorKind::Semantic);

    let out = run_program(vec![defvar("XF@x")]);
    assert_eq!(out.kind(), ErrorKind::OperandValue);

    let out = run_program(vec![defvar("TF@x")]);
    assert_eq!(out.kind(), ErrorKind::FrameAccess);
}

#[test]
fn frame_stack_errors() {
    let out = run_program(vec![("PUSHFRAME", vec![])]);
    assert_eq!(out.kind(), ErrorKind::FrameAccess);
    let out = run_program(vec![("POPFRAME", vec![])]);
    assert_eq!(out.kind(), ErrorKind::FrameAccess);
}

#[test]
fn pop_frame_returns_local_to_temporary() {
    let out = run_program(vec![
        ("CREATEFRAME", vec![]),
        defvar("TF@x"),
        ("MOVE", vec![var("TF@x"), int(1)]),
        ("PUSHFRAME", vec![]),
        ("ADD", vec![var("LF@x"), var("LF@x"), int(1)]),
        ("POPFRAME", vec![]),
        write(var("TF@x")),
    ]);
    assert_eq!(out.stdout, "2");
}

#[test]
fn type_of_unassigned_is_empty() {
    let out = run_program(vec![
        defvar("GF@u"),
        defvar("GF@t"),
        ("TYPE", vec![var("GF@t"), var("GF@u")]),
        write(string("[")),
        write(var("GF@t")),
        write(string("]")),
        ("TYPE", vec![var("GF@t"), Operand::nil()]),
        write(var("GF@t")),
        ("TYPE", vec![var("GF@t"), Operand::bool(true)]),
        write(var("GF@t")),
    ]);
    assert_eq!(out.code(), 0);
    assert_eq!(out.stdout, "[]nilbool");
}

// ============================================================
// Data stack
// ============================================================

#[test]
fn pushs_pops_is_lifo() {
    let out = run_program(vec![
        defvar("GF@x"),
        ("PUSHS", vec![int(1)]),
        ("PUSHS", vec![string("two")]),
        ("POPS", vec![var("GF@x")]),
        write(var("GF@x")),
        ("POPS", vec![var("GF@x")]),
        write(var("GF@x")),
    ]);
    assert_eq!(out.stdout, "two1");
}

#[test]
fn pops_on_empty_stack() {
    let out = run_program(vec![defvar("GF@x"), ("POPS", vec![var("GF@x")])]);
    assert_eq!(out.result, Err(RuntimeError::DataStackEmpty { at: 2 }));
    assert_eq!(out.kind(), ErrorKind::Value);

    // the destination is resolved before the stack is inspected
    let out = run_program(vec![("POPS", vec![var("GF@x")])]);
    assert_eq!(out.kind(), ErrorKind::VariableAccess);
}

#[test]
fn pushs_requires_assigned_value() {
    let out = run_program(vec![defvar("GF@x"), ("PUSHS", vec![var("GF@x")])]);
    assert_eq!(out.kind(), ErrorKind::Value);
}

// ============================================================
// Arithmetic, relational and logic
// ============================================================

#[test]
fn arithmetic() {
    assert_eq!(binary("ADD", int(2), int(3)).stdout, "5");
    assert_eq!(binary("SUB", int(2), int(3)).stdout, "-1");
    assert_eq!(binary("MUL", int(-4), int(3)).stdout, "-12");
    assert_eq!(binary("IDIV", int(7), int(2)).stdout, "3");
    assert_eq!(binary("IDIV", int(-7), int(2)).stdout, "-3");
}

#[test]
fn arithmetic_wraps() {
    assert_eq!(
        binary("ADD", int(i64::MAX), int(1)).stdout,
        i64::MIN.to_string()
    );
    assert_eq!(
        binary("IDIV", int(i64::MIN), int(-1)).stdout,
        i64::MIN.to_string()
    );
}

#[test]
fn arithmetic_type_errors() {
    assert_eq!(
        binary("ADD", int(1), string("1")).kind(),
        ErrorKind::OperandType
    );
    assert_eq!(
        binary("MUL", Operand::nil(), int(1)).kind(),
        ErrorKind::OperandType
    );
    assert_eq!(
        binary("IDIV", int(1), int(0)).kind(),
        ErrorKind::OperandValue
    );
}

#[test]
fn relational() {
    assert_eq!(binary("LT", int(1), int(2)).stdout, "true");
    assert_eq!(binary("GT", int(1), int(2)).stdout, "false");
    assert_eq!(binary("LT", string("abc"), string("abd")).stdout, "true");
    assert_eq!(
        binary("GT", Operand::bool(true), Operand::bool(false)).stdout,
        "true"
    );
    assert_eq!(binary("EQ", string("a"), string("a")).stdout, "true");
    assert_eq!(binary("EQ", Operand::nil(), Operand::nil()).stdout, "true");
    assert_eq!(binary("EQ", Operand::nil(), int(0)).stdout, "false");
}

#[test]
fn relational_type_errors() {
    assert_eq!(
        binary("LT", Operand::nil(), Operand::nil()).kind(),
        ErrorKind::OperandType
    );
    assert_eq!(
        binary("GT", int(1), string("1")).kind(),
        ErrorKind::OperandType
    );
    assert_eq!(
        binary("EQ", int(1), Operand::bool(true)).kind(),
        ErrorKind::OperandType
    );
}

#[test]
fn logic() {
    let t = || Operand::bool(true);
    let f = || Operand::bool(false);
    assert_eq!(binary("AND", t(), f()).stdout, "false");
    assert_eq!(binary("OR", t(), f()).stdout, "true");
    assert_eq!(binary("AND", t(), int(1)).kind(), ErrorKind::OperandType);

    let out = run_program(vec![
        defvar("GF@r"),
        ("NOT", vec![var("GF@r"), f()]),
        write(var("GF@r")),
    ]);
    assert_eq!(out.stdout, "true");
}

// ============================================================
// Strings
// ============================================================

#[test]
fn int2char_and_stri2int() {
    let out = run_program(vec![
        defvar("GF@r"),
        ("INT2CHAR", vec![var("GF@r"), int(0x10D)]),
        write(var("GF@r")),
        ("STRI2INT", vec![var("GF@r"), string("ač"), int(1)]),
        write(var("GF@r")),
    ]);
    assert_eq!(out.stdout, "č269");
}

#[test]
fn int2char_rejects_invalid_code_points() {
    for code in [-1, 0xD800, 0x110000] {
        let out = run_program(vec![defvar("GF@r"), ("INT2CHAR", vec![var("GF@r"), int(code)])]);
        assert_eq!(out.kind(), ErrorKind::StringOperation, "{code}");
    }
}

#[test]
fn string_index_bounds() {
    for index in [-1, 3] {
        assert_eq!(
            binary("STRI2INT", string("abc"), int(index)).kind(),
            ErrorKind::StringOperation
        );
        assert_eq!(
            binary("GETCHAR", string("abc"), int(index)).kind(),
            ErrorKind::StringOperation
        );
    }
    assert_eq!(binary("GETCHAR", string("abc"), int(2)).stdout, "c");
}

#[test]
fn concat_and_strlen() {
    assert_eq!(binary("CONCAT", string("ab"), string("čd")).stdout, "abčd");
    assert_eq!(
        binary("CONCAT", string("a"), int(1)).kind(),
        ErrorKind::OperandType
    );
    let out = run_program(vec![
        defvar("GF@r"),
        ("STRLEN", vec![var("GF@r"), string("žluť")]),
        write(var("GF@r")),
        ("STRLEN", vec![var("GF@r"), string("")]),
        write(var("GF@r")),
    ]);
    assert_eq!(out.stdout, "40");
    let out = run_program(vec![
        defvar("GF@r"),
        ("STRLEN", vec![var("GF@r"), int(4)]),
    ]);
    assert_eq!(out.kind(), ErrorKind::OperandType);
}

fn setchar(initial: Operand, index: Operand, replacement: Operand) -> Outcome {
    run_program(vec![
        defvar("GF@s"),
        ("MOVE", vec![var("GF@s"), initial]),
        ("SETCHAR", vec![var("GF@s"), index, replacement]),
        write(var("GF@s")),
    ])
}

#[test]
fn setchar_replaces_one_character() {
    assert_eq!(setchar(string("abc"), int(1), string("xyz")).stdout, "axc");
    assert_eq!(setchar(string("čau"), int(0), string("C")).stdout, "Cau");
}

#[test]
fn setchar_errors() {
    assert_eq!(
        setchar(string("abc"), int(3), string("x")).kind(),
        ErrorKind::StringOperation
    );
    assert_eq!(
        setchar(string("abc"), int(0), string("")).kind(),
        ErrorKind::StringOperation
    );
    assert_eq!(
        setchar(int(5), int(0), string("x")).kind(),
        ErrorKind::StringOperation
    );
    assert_eq!(
        setchar(string("abc"), string("0"), string("x")).kind(),
        ErrorKind::OperandType
    );
}

// ============================================================
// I/O
// ============================================================

#[test]
fn read_values_by_type() {
    let out = run_with_input(
        numbered(vec![
            defvar("GF@x"),
            ("READ", vec![var("GF@x"), Operand::type_name("int")]),
            write(var("GF@x")),
            ("READ", vec![var("GF@x"), Operand::type_name("bool")]),
            write(var("GF@x")),
            ("READ", vec![var("GF@x"), Operand::type_name("string")]),
            write(var("GF@x")),
            ("READ", vec![var("GF@x"), Operand::type_name("int")]),
            ("TYPE", vec![var("GF@x"), var("GF@x")]),
            write(var("GF@x")),
        ]),
        "12\nTrue\nhello world\nnot a number\n",
    );
    assert_eq!(out.code(), 0);
    assert_eq!(out.stdout, "12truehello worldnil");
}

#[test]
fn read_past_end_of_input_is_nil() {
    let out = run_program(vec![
        defvar("GF@x"),
        ("READ", vec![var("GF@x"), Operand::type_name("string")]),
        ("TYPE", vec![var("GF@x"), var("GF@x")]),
        write(var("GF@x")),
    ]);
    assert_eq!(out.stdout, "nil");
}

#[test]
fn read_rejects_unknown_type() {
    let out = run_program(vec![
        defvar("GF@x"),
        ("READ", vec![var("GF@x"), Operand::type_name("nil")]),
    ]);
    assert_eq!(out.kind(), ErrorKind::OperandValue);
}

#[test]
fn write_formats() {
    let out = run_program(vec![
        write(Operand::bool(false)),
        write(Operand::nil()),
        write(int(-3)),
        write(string("a\\032b")),
    ]);
    assert_eq!(out.stdout, "false-3a b");
}

#[test]
fn write_unassigned_is_value_error() {
    for opcode in ["WRITE", "DPRINT"] {
        let out = run_program(vec![defvar("GF@u"), (opcode, vec![var("GF@u")])]);
        assert_eq!(
            out.result,
            Err(RuntimeError::Uninitialized {
                at: 2,
                name: "GF@u".into()
            }),
            "{opcode}"
        );
        assert_eq!(out.kind(), ErrorKind::Value);
        assert!(out.stdout.is_empty() && out.stderr.is_empty());
    }
}

#[test]
fn dprint_goes_to_diagnostics() {
    let out = run_program(vec![("DPRINT", vec![string("dbg")]), write(int(1))]);
    assert_eq!(out.stdout, "1");
    assert_eq!(out.stderr, "dbg");
}

#[test]
fn break_dumps_state_and_continues() {
    let out = run_program(vec![
        defvar("GF@x"),
        ("MOVE", vec![var("GF@x"), int(42)]),
        ("PUSHS", vec![int(1)]),
        ("CREATEFRAME", vec![]),
        ("BREAK", vec![]),
        write(string("after")),
    ]);
    assert_eq!(out.code(), 0);
    assert_eq!(out.stdout, "after");
    assert_eq!(
        out.stderr,
        "DEBUG INFO:\n\
         - IP (next instruction index) = 6, IC (processed instruction counter) = 5\n\
         - Frames in frame stack: 0\n\
         - Values in data stack: 1\n\
         - Values in code stack: 0\n\
         - Global frame variables:\n\
         --- name=\"GF@x\": type=int, value=42\n\
         - Local frame variables:\n\
         --- frame is not created\n\
         - Temp frame variables:\n\
         --- frame doesn't contain variables\n"
    );
}

// ============================================================
// Loaded programs
// ============================================================

#[test]
fn runs_loaded_xml_program() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<program language="IPPcode24">
  <instruction order="2" opcode="move">
    <arg2 type="string">hello\032world</arg2>
    <arg1 type="var">GF@msg</arg1>
  </instruction>
  <instruction order="1" opcode="DEFVAR">
    <arg1 type="var">GF@msg</arg1>
  </instruction>
  <instruction order="5" opcode="WRITE">
    <arg1 type="var">GF@msg</arg1>
  </instruction>
  <instruction order="6" opcode="EXIT">
    <arg1 type="int">0o3</arg1>
  </instruction>
</program>"#;
    let program = ippcode_loader::load_xml(xml).unwrap();
    let out = run_loaded(&program, "");
    assert_eq!(out.code(), 3);
    assert_eq!(out.stdout, "hello world");
}

// ============================================================
// Properties
// ============================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Applying the same SETCHAR twice leaves the same string as once.
        #[test]
        fn setchar_is_idempotent(
            text in "[a-z]{1,12}",
            index in 0usize..12,
            replacement in "[A-Z]{1,3}",
        ) {
            prop_assume!(index < text.len());
            let step = || {
                (
                    "SETCHAR",
                    vec![var("GF@s"), int(index as i64), string(&replacement)],
                )
            };
            let once = run_program(vec![
                defvar("GF@s"),
                ("MOVE", vec![var("GF@s"), string(&text)]),
                step(),
                write(var("GF@s")),
            ]);
            let twice = run_program(vec![
                defvar("GF@s"),
                ("MOVE", vec![var("GF@s"), string(&text)]),
                step(),
                step(),
                write(var("GF@s")),
            ]);
            prop_assert_eq!(once.stdout, twice.stdout);
        }

        /// Integer arithmetic agrees with wrapping i64 arithmetic.
        #[test]
        fn add_matches_wrapping_add(a in any::<i64>(), b in any::<i64>()) {
            let out = binary("ADD", int(a), int(b));
            prop_assert_eq!(out.stdout, a.wrapping_add(b).to_string());
        }

        /// Any sequence of WRITEs without EXIT ends with code 0.
        #[test]
        fn straight_line_program_exits_zero(values in prop::collection::vec(any::<i64>(), 0..20)) {
            let steps = values.iter().map(|&v| write(int(v))).collect();
            let out = run_program(steps);
            prop_assert_eq!(out.code(), 0);
            let expected: String = values.iter().map(|v| v.to_string()).collect();
            prop_assert_eq!(out.stdout, expected);
        }
    }
}
