//! MMIX machine shell
//!
//! Owns the register file, memory and program counter and drives the
//! fetch/execute loop. Every event the machine emits is recorded inside the
//! `tracing::Span` it was constructed with.

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::memory::Memory;
use crate::registers::RegisterFile;
use crate::state::{Flow, HaltReason};
use mmix_spec::{Instruction, MmixError, Tetra, Width, INSTRUCTION_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, trace, warn, Span};

/// Machine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Address of the first instruction
    pub entry_point: u64,

    /// Maximum number of instructions `run` executes
    pub max_steps: u64,

    /// Emit a trace event per executed instruction
    pub trace: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            entry_point: 0,
            max_steps: 1_000_000,
            trace: false,
        }
    }
}

/// Execution result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Instructions executed by this `run` call, including the halting one
    pub steps: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,
}

/// MMIX machine
#[derive(Debug)]
pub struct Machine {
    registers: RegisterFile,
    memory: Memory,
    pc: u64,
    halted: Option<HaltReason>,
    config: MachineConfig,
    span: Span,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self::with_span(config, info_span!("mmix"))
    }

    /// Create a machine that records its events under `span`
    pub fn with_span(config: MachineConfig, span: Span) -> Self {
        span.in_scope(|| {
            debug!(
                entry_point = config.entry_point,
                max_steps = config.max_steps,
                "machine created"
            )
        });
        Self {
            registers: RegisterFile::new(),
            memory: Memory::new(),
            pc: config.entry_point,
            halted: None,
            config,
            span,
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn pc(&self) -> u64 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u64) {
        self.pc = pc;
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halted
    }

    /// Instruction word stored at `address`
    pub fn fetch_instruction(&self, address: u64) -> Result<Tetra> {
        Ok(self.memory.read_tetra(address)?)
    }

    /// Index of the special register called `name`
    pub fn special_register_index(&self, name: &str) -> Result<usize> {
        Ok(mmix_spec::special_register_index(name)?)
    }

    /// Write consecutive instruction words starting at `address`.
    ///
    /// The whole block must fit below 2^64; nothing is written otherwise.
    pub fn load_program(&mut self, address: u64, words: &[Tetra]) -> Result<()> {
        let _enter = self.span.enter();
        if !words.is_empty() {
            let bytes = words.len() as u64 * INSTRUCTION_SIZE;
            if address.checked_add(bytes - 1).is_none() {
                return Err(MmixError::AddressOutOfRange {
                    address,
                    bytes: bytes as usize,
                }
                .into());
            }
        }
        for (offset, word) in (0u64..).step_by(INSTRUCTION_SIZE as usize).zip(words) {
            self.memory.write_tetra(address + offset, *word)?;
        }
        debug!(address, words = words.len(), "program loaded");
        Ok(())
    }

    /// Execute `instruction` as if it sat at the current pc, without moving pc
    pub fn execute(&mut self, instruction: &Instruction) -> Result<Flow> {
        if let Some(reason) = self.halted {
            return Err(RuntimeError::Halted { reason });
        }
        let _enter = self.span.enter();
        let pc = self.pc;
        let flow = execute(instruction, pc, &mut self.registers, &mut self.memory).map_err(|source| {
            warn!(pc, %instruction, error = %source, "instruction faulted");
            RuntimeError::Fault { pc, source }
        })?;
        if let Flow::Halt(reason) = flow {
            info!(?reason, "machine halted");
            self.halted = Some(reason);
        }
        Ok(flow)
    }

    /// Fetch the instruction at pc, execute it and advance pc
    pub fn step(&mut self) -> Result<Flow> {
        if let Some(reason) = self.halted {
            return Err(RuntimeError::Halted { reason });
        }
        let pc = self.pc;
        let instruction = Instruction::decode(self.fetch_instruction(pc)?)?;
        if self.config.trace {
            self.span.in_scope(|| trace!(pc, %instruction, "step"));
        }
        let flow = self.execute(&instruction)?;
        if flow == Flow::Continue {
            self.pc = pc.wrapping_add(INSTRUCTION_SIZE);
        }
        Ok(flow)
    }

    /// Step until the machine halts or `max_steps` instructions have run
    pub fn run(&mut self) -> Result<ExecutionResult> {
        let mut steps = 0;
        loop {
            if steps >= self.config.max_steps {
                let reason = HaltReason::StepLimit;
                self.span.in_scope(|| info!(steps, ?reason, "machine halted"));
                self.halted = Some(reason);
                return Ok(ExecutionResult { steps, halt_reason: reason });
            }
            let flow = self.step()?;
            steps += 1;
            if let Flow::Halt(halt_reason) = flow {
                return Ok(ExecutionResult { steps, halt_reason });
            }
        }
    }

    /// Memory dump at `width` granularity
    pub fn dump_memory(&self, width: Width) -> Result<String> {
        Ok(self.memory.dump(width)?)
    }
}
