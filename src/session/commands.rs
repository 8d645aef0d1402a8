use crate::criteria::Criteria;

/// One outgoing query: the criteria snapshot to run and the generation
/// number to tag the response with. The snapshot is owned, so later draft
/// edits cannot reach a request already in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryJob {
    pub generation: u64,
    pub criteria: Criteria,
}

/// Side effect requested by a state transition. The controller itself never
/// performs I/O; the runner executes commands against a query client.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    None,
    ExecuteSearch(QueryJob),
}
