//! Container evaluation: size bounds, then container rules.

use tracing::debug;

use crate::config::ContainerConfig;

use super::Runner;

impl<F: Clone> Runner<F> {
    /// Validates a container object, not its members.
    ///
    /// Batch-size bounds are checked first and a violation is returned without
    /// invoking any container rule. Otherwise the container rules run as in
    /// [`validate`](Runner::validate).
    pub fn validate_container<C>(
        &self,
        container: &C,
        config: &ContainerConfig<C, F>,
    ) -> Option<F> {
        match self.shielded(|| config.size_violation(container).cloned()) {
            Ok(None) => self.validate(container, config.rules()),
            Ok(Some(failure)) => {
                debug!("container batch size out of bounds");
                Some(failure)
            }
            Err(failure) => Some(failure),
        }
    }
}
