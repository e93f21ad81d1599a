/// Index of a layer in a [`crate::simulation::Simulation`].
///
/// This is an index into `Simulation::layers`, and is only meaningful
/// within the lifetime of a given `Simulation` instance. Exactly one
/// layer is driven today; the index exists so stacked layers can be
/// addressed later without reshaping the API.
pub type LayerId = usize;
