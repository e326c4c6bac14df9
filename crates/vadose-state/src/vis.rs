//! The visualization collaborator seam.

/// Interface to the visualization/checkpoint writer.
///
/// The registry never decides file formats or output cadence; it asks
/// the collaborator whether this cycle should be dumped and, if so,
/// pushes each vis-enabled field's buffer and subfield names through
/// [`write_vector`](Vis::write_vector). Invoked only from
/// [`State::write_vis`](crate::State::write_vis).
pub trait Vis {
    /// Whether the collaborator wants output at this cycle.
    fn dump_requested(&self, cycle: u64) -> bool;

    /// Whether visualization output is globally disabled.
    fn is_disabled(&self) -> bool {
        false
    }

    /// Open a new output record for `(time, cycle)`.
    fn create_timestep(&mut self, time: f64, cycle: u64);

    /// Write one field's buffer with its per-dof names.
    fn write_vector(&mut self, name: &str, data: &[f64], subfield_names: &[String]);
}
