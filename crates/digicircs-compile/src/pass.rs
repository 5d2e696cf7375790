//! Pass trait for compilation passes.

use digicircs_ir::Circuit;

use crate::error::CompileResult;

/// A compilation pass that rewrites a circuit in place.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Run the pass on the given circuit.
    fn run(&self, circuit: &mut Circuit) -> CompileResult<()>;

    /// Check if this pass should run based on current state.
    ///
    /// This can be overridden to skip passes that have nothing to rewrite.
    fn should_run(&self, _circuit: &Circuit) -> bool {
        true
    }
}
