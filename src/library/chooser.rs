//! Capability for picking one catalog candidate.

/// Presents an ordered list of candidate labels and returns the user's pick.
///
/// Selections are 1-based. `None` means the user declined to choose.
pub trait CandidateChooser {
    fn choose(&mut self, candidates: &[String]) -> Option<usize>;
}

impl<F> CandidateChooser for F
where
    F: FnMut(&[String]) -> Option<usize>,
{
    fn choose(&mut self, candidates: &[String]) -> Option<usize> {
        self(candidates)
    }
}
