//! The frame model: global, local and temporary frames plus the stack of
//! saved local frames.
//!
//! Variables are reached through [`VarHandle`]s. A handle names a frame and
//! a slot inside it; reads and writes go through [`Memory::get`] and
//! [`Memory::set`].

use indexmap::IndexMap;
use ippcode_common::{FrameKind, Value};

use crate::error::FrameError;

/// A set of variables, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    vars: IndexMap<String, Value>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Location of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarHandle {
    frame: FrameKind,
    slot: usize,
}

/// All variable storage of one execution.
///
/// The local frame exists exactly while `active_frames > 0`.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    global: Frame,
    local: Option<Frame>,
    temporary: Option<Frame>,
    saved_locals: Vec<Frame>,
    active_frames: usize,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame of the given kind, or `None` if it is not created.
    pub fn frame(&self, kind: FrameKind) -> Option<&Frame> {
        match kind {
            FrameKind::Global => Some(&self.global),
            FrameKind::Local => self.local.as_ref(),
            FrameKind::Temporary => self.temporary.as_ref(),
        }
    }

    fn frame_mut(&mut self, kind: FrameKind) -> Result<&mut Frame, FrameError> {
        let frame = match kind {
            FrameKind::Global => Some(&mut self.global),
            FrameKind::Local => self.local.as_mut(),
            FrameKind::Temporary => self.temporary.as_mut(),
        };
        frame.ok_or(FrameError::NotCreated(kind))
    }

    /// Number of PUSHFRAMEs not yet undone by a POPFRAME.
    pub fn active_frames(&self) -> usize {
        self.active_frames
    }

    /// Find a declared variable.
    pub fn lookup(&self, kind: FrameKind, name: &str) -> Result<VarHandle, FrameError> {
        let frame = self.frame(kind).ok_or(FrameError::NotCreated(kind))?;
        let slot = frame
            .vars
            .get_index_of(name)
            .ok_or_else(|| FrameError::Undefined(kind, name.to_string()))?;
        Ok(VarHandle { frame: kind, slot })
    }

    /// Declare a variable as unassigned (DEFVAR).
    pub fn declare(&mut self, kind: FrameKind, name: &str) -> Result<VarHandle, FrameError> {
        let frame = self.frame_mut(kind)?;
        if frame.vars.contains_key(name) {
            return Err(FrameError::Redefined(kind, name.to_string()));
        }
        let (slot, _) = frame.vars.insert_full(name.to_string(), Value::Unassigned);
        Ok(VarHandle { frame: kind, slot })
    }

    /// Read the value behind a handle.
    pub fn get(&self, handle: VarHandle) -> Result<&Value, FrameError> {
        let frame = self
            .frame(handle.frame)
            .ok_or(FrameError::NotCreated(handle.frame))?;
        frame
            .vars
            .get_index(handle.slot)
            .map(|(_, value)| value)
            .ok_or_else(|| FrameError::Undefined(handle.frame, format!("#{}", handle.slot)))
    }

    /// Overwrite the value behind a handle.
    pub fn set(&mut self, handle: VarHandle, value: Value) -> Result<(), FrameError> {
        let frame = self.frame_mut(handle.frame)?;
        let (_, slot) = frame
            .vars
            .get_index_mut(handle.slot)
            .ok_or_else(|| FrameError::Undefined(handle.frame, format!("#{}", handle.slot)))?;
        *slot = value;
        Ok(())
    }

    /// CREATEFRAME: replace the temporary frame with an empty one.
    pub fn create_temporary(&mut self) {
        self.temporary = Some(Frame::new());
    }

    /// PUSHFRAME: the temporary frame becomes the local frame; the previous
    /// local frame, if any, is saved.
    pub fn push_frame(&mut self) -> Result<(), FrameError> {
        let frame = self
            .temporary
            .take()
            .ok_or(FrameError::NotCreated(FrameKind::Temporary))?;
        if let Some(previous) = self.local.replace(frame) {
            self.saved_locals.push(previous);
        }
        self.active_frames += 1;
        Ok(())
    }

    /// POPFRAME: the local frame becomes the temporary frame and the most
    /// recently saved local frame, if any, is restored.
    pub fn pop_frame(&mut self) -> Result<(), FrameError> {
        if self.active_frames == 0 {
            return Err(FrameError::NotCreated(FrameKind::Local));
        }
        self.temporary = self.local.take();
        self.local = self.saved_locals.pop();
        self.active_frames -= 1;
        Ok(())
    }
}
