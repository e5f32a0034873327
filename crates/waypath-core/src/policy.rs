//! Contracts between the simulator and the external search engine.
//!
//! The search engine owns genomes; the simulator only ever sees the
//! decision function a genome decodes to. [`Candidate`] is the genome
//! side of that boundary and [`Policy`] the network side.

/// A black-box decision function: sensor vector in, action vector out.
///
/// Implementations may keep internal state between calls (recurrent
/// networks do); the simulator drives one fresh policy per evaluation,
/// so state never leaks between candidates or generations.
pub trait Policy: Send {
    /// Map `inputs` to an action vector.
    ///
    /// The simulator expects exactly two outputs; any other length is a
    /// configuration bug and aborts the evaluation.
    fn activate(&mut self, inputs: &[f64]) -> Vec<f64>;

    /// Input width this policy was built for, if it knows.
    ///
    /// When `Some`, the simulator checks it against the sensor layout
    /// before the first step and fails fast on mismatch.
    fn input_len(&self) -> Option<usize> {
        None
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn activate(&mut self, inputs: &[f64]) -> Vec<f64> {
        (**self).activate(inputs)
    }

    fn input_len(&self) -> Option<usize> {
        (**self).input_len()
    }
}

/// Something the search engine can turn into a fresh [`Policy`].
///
/// `instantiate` must be deterministic: two policies built from the same
/// candidate must behave identically. `Sync` lets the evaluation pool
/// share a batch across worker threads.
pub trait Candidate: Sync {
    /// Build a policy in its initial state.
    fn instantiate(&self) -> Box<dyn Policy>;
}

impl<F, P> Candidate for F
where
    F: Fn() -> P + Sync,
    P: Policy + 'static,
{
    fn instantiate(&self) -> Box<dyn Policy> {
        Box::new(self())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubler;

    impl Policy for Doubler {
        fn activate(&mut self, inputs: &[f64]) -> Vec<f64> {
            inputs.iter().map(|v| v * 2.0).collect()
        }
    }

    #[test]
    fn closure_is_a_candidate() {
        let c = || Doubler;
        let mut p = c.instantiate();
        assert_eq!(p.activate(&[1.0, 2.5]), vec![2.0, 5.0]);
        assert_eq!(p.input_len(), None);
    }
}
