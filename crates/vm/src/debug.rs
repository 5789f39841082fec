//! State dump written by BREAK to the diagnostics port.

use std::fmt::Write as _;

use ippcode_common::{FrameKind, Value};

use crate::frames::Frame;
use crate::machine::VM;

impl<'p, 'io> VM<'p, 'io> {
    /// Write the BREAK report to the diagnostics port.
    pub(crate) fn dump_state(&mut self) {
        let report = self.state_report();
        self.ports.diagnostics.write_string(&report);
    }

    /// Render the current machine state.
    pub fn state_report(&self) -> String {
        let mut out = String::from("DEBUG INFO:\n");
        let _ = writeln!(
            out,
            "- IP (next instruction index) = {}, IC (processed instruction counter) = {}",
            self.ip, self.ic
        );
        let _ = writeln!(out, "- Frames in frame stack: {}", self.memory.active_frames());
        let _ = writeln!(out, "- Values in data stack: {}", self.data_stack.len());
        let _ = writeln!(out, "- Values in code stack: {}", self.call_stack.len());

        for (title, kind) in [
            ("Global", FrameKind::Global),
            ("Local", FrameKind::Local),
            ("Temp", FrameKind::Temporary),
        ] {
            let _ = writeln!(out, "- {title} frame variables:");
            dump_frame(&mut out, kind, self.memory.frame(kind));
        }
        out
    }
}

fn dump_frame(out: &mut String, kind: FrameKind, frame: Option<&Frame>) {
    let Some(frame) = frame else {
        out.push_str("--- frame is not created\n");
        return;
    };
    if frame.is_empty() {
        out.push_str("--- frame doesn't contain variables\n");
        return;
    }
    for (name, value) in frame.iter() {
        let _ = write!(out, "--- name=\"{kind}@{name}\": type=");
        let _ = match value {
            Value::Int(n) => writeln!(out, "int, value={n}"),
            Value::Bool(b) => writeln!(out, "bool, value={b}"),
            Value::Str(s) => writeln!(out, "string, value=\"{}\"", s.replace('\n', "\\n")),
            Value::Nil => writeln!(out, "nil, value=nil"),
            Value::Unassigned => writeln!(out, "unassigned"),
        };
    }
}
