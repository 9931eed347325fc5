use crate::coproc::*;
use crate::core::*;
use crate::debug::{DebugCommand, DebugResponse};
use crate::memory::{AxiLite, Wishbone};

/// A debug unit backed by a plain register file.
///
/// Accepts a command once it has been offered for `latency` cycles.
/// Reads return on the edge the command is accepted.
pub struct TestDebugUnit {
    pub regs:       [u32; 64],
    pub latency:    usize,
    pub accepted:   Vec<DebugCommand>,
    waited:         usize,
    rsp_data:       u32,
}

impl TestDebugUnit {
    pub fn new(latency: usize) -> Self {
        Self {
            regs:       [0; 64],
            latency:    latency,
            accepted:   Vec::new(),
            waited:     0,
            rsp_data:   0,
        }
    }

    pub fn response(&self) -> DebugResponse {
        DebugResponse {
            ready:  self.waited >= self.latency,
            data:   self.rsp_data,
        }
    }

    pub fn register(&self, address: u8) -> u32 {
        self.regs[(address >> 2) as usize]
    }

    pub fn clock(&mut self, cmd: &DebugCommand) {
        if !cmd.valid {
            self.waited = 0;
        } else if self.response().ready {
            let idx = (cmd.address >> 2) as usize;
            if cmd.wr {
                self.regs[idx] = cmd.data;
            } else {
                self.rsp_data = self.regs[idx];
            }
            self.accepted.push(*cmd);
            self.waited = 0;
        } else {
            self.waited += 1;
        }
    }

    pub fn reset(&mut self) {
        self.waited = 0;
        self.rsp_data = 0;
    }
}

/// A core whose ports are set directly by the test.
///
/// Records the inputs it saw on every edge.
pub struct TestCore {
    pub ibus:           Wishbone,
    pub dbus:           Wishbone,
    pub reset_out:      bool,
    pub debug_unit:     TestDebugUnit,

    pub cfu_cmd:        Channel<CfuCommand>,
    pub cfu_rsp_ready:  bool,
    pub vfu_cmd:        Channel<VfuCommand>,
    pub vfu_rsp_ready:  bool,

    pub history:        Vec<CoreInputs>,
    pub cfu_results:    Vec<u32>,
}

impl TestCore {
    pub fn new() -> Self {
        Self {
            ibus:           Wishbone::default(),
            dbus:           Wishbone::default(),
            reset_out:      false,
            debug_unit:     TestDebugUnit::new(0),

            cfu_cmd:        Channel::default(),
            cfu_rsp_ready:  false,
            vfu_cmd:        Channel::default(),
            vfu_rsp_ready:  false,

            history:        Vec::new(),
            cfu_results:    Vec::new(),
        }
    }

    /// Inputs seen on the last edge.
    pub fn last(&self) -> &CoreInputs {
        self.history.last().expect("core never clocked")
    }
}

impl CoreModel for TestCore {
    fn outputs(&self) -> CoreOutputs {
        CoreOutputs {
            ibus:           self.ibus,
            dbus:           self.dbus,
            debug_rsp:      self.debug_unit.response(),
            reset_out:      self.reset_out,
            cfu_cmd:        self.cfu_cmd,
            cfu_rsp_ready:  self.cfu_rsp_ready,
            vfu_cmd:        self.vfu_cmd,
            vfu_rsp_ready:  self.vfu_rsp_ready,
        }
    }

    fn clock(&mut self, inputs: &CoreInputs) {
        self.history.push(*inputs);
        if inputs.debug_reset {
            self.debug_unit.reset();
        } else {
            self.debug_unit.clock(&inputs.debug_cmd);
        }

        if inputs.cfu.cmd.fire() {
            self.cfu_cmd.valid = false;
        }
        if let Some(rsp) = inputs.cfu.rsp.transfer() {
            self.cfu_results.push(rsp.outputs_0);
        }
        if inputs.vfu.cmd.fire() {
            self.vfu_cmd.valid = false;
        }
    }
}

/// Adds its two inputs, one command at a time.
pub struct LoopbackCfu {
    result: Option<u32>,
}

impl LoopbackCfu {
    pub fn new() -> Self {
        Self { result: None }
    }
}

impl FunctionUnit for LoopbackCfu {
    type Command = CfuCommand;
    type Response = CfuResponse;

    fn cmd_ready(&self) -> bool {
        self.result.is_none()
    }

    fn response(&self) -> Option<CfuResponse> {
        self.result.map(|r| CfuResponse { outputs_0: r })
    }

    fn clock(&mut self, cmd: Option<CfuCommand>, rsp_taken: bool) {
        if rsp_taken {
            self.result = None;
        }
        if let Some(cmd) = cmd {
            self.result = Some(cmd.inputs_0.wrapping_add(cmd.inputs_1));
        }
    }

    fn reset(&mut self) {
        self.result = None;
    }
}

/// Starts a memory read at `inputs_0` for every command.
pub struct TestVfu {
    axi: AxiLite,
}

impl TestVfu {
    pub fn new() -> Self {
        Self { axi: AxiLite::default() }
    }
}

impl FunctionUnit for TestVfu {
    type Command = VfuCommand;
    type Response = VfuResponse;

    fn cmd_ready(&self) -> bool {
        !self.axi.ar.valid
    }

    fn response(&self) -> Option<VfuResponse> {
        None
    }

    fn clock(&mut self, cmd: Option<VfuCommand>, _rsp_taken: bool) {
        if let Some(cmd) = cmd {
            self.axi.ar = Channel::offer(cmd.inputs_0);
        }
    }

    fn memory_bus(&mut self) -> Option<&mut AxiLite> {
        Some(&mut self.axi)
    }
}
