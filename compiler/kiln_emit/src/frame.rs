//! Method frame: slot table, instruction buffer and jump bookkeeping for
//! one routine under construction.

use std::fmt;

use rustc_hash::FxHashMap;

use kiln_eval::InternalError;
use kiln_ir::bound::BoundLabel;
use kiln_ir::{TypeSymbol, VariableSymbol};

use crate::{HostMethod, IlType, OpCode};

/// Slot holding the boxed result.
pub(crate) const RESULT_SLOT: usize = 0;

/// Construction phases. A frame only ever moves forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FramePhase {
    Empty,
    AllocatingSlots,
    EmittingCode,
    PatchingJumps,
    Finalized,
}

/// Declared type of a local slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LocalType {
    Object,
    Typed(TypeSymbol),
}

impl fmt::Display for LocalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalType::Object => f.write_str("object"),
            LocalType::Typed(ty) => IlType(*ty).fmt(f),
        }
    }
}

/// A variable marshalled through the argument array.
///
/// Slots start at 1, so the array index is always `slot - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDef {
    pub variable: VariableSymbol,
    pub slot: usize,
}

impl VariableDef {
    /// Position in the argument array.
    pub fn index(&self) -> usize {
        self.slot - 1
    }
}

struct JumpPatch {
    at: usize,
    label: BoundLabel,
}

/// A compiled routine under construction.
pub struct MethodFrame {
    phase: FramePhase,
    slots: FxHashMap<VariableSymbol, usize>,
    variables: Vec<VariableDef>,
    body: Vec<OpCode>,
    labels: FxHashMap<BoundLabel, usize>,
    patches: Vec<JumpPatch>,
}

impl Default for MethodFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodFrame {
    /// An empty frame holding only the result slot.
    pub fn new() -> Self {
        MethodFrame {
            phase: FramePhase::Empty,
            slots: FxHashMap::default(),
            variables: Vec::new(),
            body: Vec::new(),
            labels: FxHashMap::default(),
            patches: Vec::new(),
        }
    }

    /// Current construction phase.
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    fn advance_to(&mut self, phase: FramePhase) -> Result<(), InternalError> {
        if phase < self.phase {
            return Err(InternalError::InvalidProgram(format!(
                "method frame cannot go back from {:?} to {phase:?}",
                self.phase
            )));
        }
        self.phase = phase;
        Ok(())
    }

    /// Slot for `variable`, allocating the next one on first encounter.
    pub fn allocate_slot(&mut self, variable: &VariableSymbol) -> Result<usize, InternalError> {
        self.advance_to(FramePhase::AllocatingSlots)?;
        if let Some(&slot) = self.slots.get(variable) {
            return Ok(slot);
        }
        let slot = self.variables.len() + 1;
        self.slots.insert(variable.clone(), slot);
        self.variables.push(VariableDef {
            variable: variable.clone(),
            slot,
        });
        tracing::trace!(variable = variable.name(), slot, "allocated slot");
        Ok(slot)
    }

    /// Slot of an already allocated variable.
    pub fn slot(&self, variable: &VariableSymbol) -> Result<usize, InternalError> {
        self.slots.get(variable).copied().ok_or_else(|| {
            InternalError::InvalidProgram(format!("variable `{variable}` has no slot"))
        })
    }

    /// Allocated variables, in slot order.
    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    /// Append `op` to the body. Ends slot allocation.
    pub fn emit(&mut self, op: OpCode) -> Result<(), InternalError> {
        self.advance_to(FramePhase::EmittingCode)?;
        self.body.push(op);
        Ok(())
    }

    /// Mark `label` at the current position: jumps to it land on the next
    /// instruction emitted.
    pub fn mark_label(&mut self, label: BoundLabel) -> Result<(), InternalError> {
        self.advance_to(FramePhase::EmittingCode)?;
        self.labels.insert(label, self.body.len());
        Ok(())
    }

    /// Emit a branch whose target is resolved when the frame is finalized.
    pub fn emit_jump(&mut self, op: OpCode, label: BoundLabel) -> Result<(), InternalError> {
        if op.branch_target().is_none() {
            return Err(InternalError::InvalidProgram(format!("`{op}` is not a branch")));
        }
        self.patches.push(JumpPatch {
            at: self.body.len(),
            label,
        });
        self.emit(op)
    }

    /// Patch jumps, wrap the body with the marshalling prologue and
    /// epilogue, and produce the finished routine.
    pub fn finalize(mut self) -> Result<HostMethod, InternalError> {
        self.advance_to(FramePhase::PatchingJumps)?;
        for patch in &self.patches {
            let target = *self
                .labels
                .get(&patch.label)
                .ok_or(InternalError::UnmarkedLabel(patch.label))?;
            tracing::trace!(at = patch.at, label = %patch.label, target, "patched jump");
            self.body[patch.at].retarget(|_| target);
        }

        let prologue = self.prologue()?;
        let shift = prologue.len();
        let mut instructions = prologue;
        instructions.extend(self.body.into_iter().map(|mut op| {
            op.retarget(|target| target + shift);
            op
        }));
        for def in &self.variables {
            instructions.extend([
                OpCode::Ldarg0,
                OpCode::LdcI4(array_index(def)?),
                OpCode::Ldloc(def.slot),
                OpCode::Box(def.variable.ty()),
                OpCode::StelemRef,
            ]);
        }
        instructions.extend([OpCode::Ldloc(RESULT_SLOT), OpCode::Ret]);

        let locals = std::iter::once(LocalType::Object)
            .chain(self.variables.iter().map(|def| LocalType::Typed(def.variable.ty())))
            .collect();
        let max_stack = max_stack(&instructions);
        self.phase = FramePhase::Finalized;
        tracing::debug!(
            instructions = instructions.len(),
            variables = self.variables.len(),
            max_stack,
            "finalized method frame"
        );
        Ok(HostMethod::new(instructions, locals, self.variables, max_stack))
    }

    fn prologue(&self) -> Result<Vec<OpCode>, InternalError> {
        let mut prologue = Vec::with_capacity(self.variables.len() * 5);
        for def in &self.variables {
            prologue.extend([
                OpCode::Ldarg0,
                OpCode::LdcI4(array_index(def)?),
                OpCode::LdelemRef,
                OpCode::UnboxAny(def.variable.ty()),
                OpCode::Stloc(def.slot),
            ]);
        }
        Ok(prologue)
    }
}

fn array_index(def: &VariableDef) -> Result<i32, InternalError> {
    i32::try_from(def.index())
        .map_err(|_| InternalError::InvalidProgram("too many variables".to_owned()))
}

/// Deepest evaluation stack reached by a straight-line walk.
///
/// Lowered code leaves the stack empty between statements, so the depth
/// at every label is zero and the walk never needs to follow branches.
fn max_stack(instructions: &[OpCode]) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for op in instructions {
        let (pops, pushes) = op.stack_effect();
        depth = depth.saturating_sub(pops) + pushes;
        max = max.max(depth);
    }
    max
}
