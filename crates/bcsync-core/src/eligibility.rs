//! Which local jobs may carry a binding.
use bcsync_model::JobType;

/// Predicate deciding whether a job type may be bound to a build configuration.
///
/// The sync engine calls this before attaching a binding to a job.
pub trait JobEligibility: Send + Sync {
    /// Returns `true` if jobs of this type can be bound.
    fn is_eligible(&self, job: JobType) -> bool;
}

/// Default policy: only parameterized job types are bindable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterizedJobs;

impl JobEligibility for ParameterizedJobs {
    #[inline]
    fn is_eligible(&self, job: JobType) -> bool {
        job.is_parameterized()
    }
}

/// Shorthand for [`ParameterizedJobs::is_eligible`].
#[inline]
pub fn is_bindable(job: JobType) -> bool {
    ParameterizedJobs.is_eligible(job)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_follows_parameterized_flag() {
        assert!(is_bindable(JobType::Pipeline));
        assert!(is_bindable(JobType::Freestyle));
        assert!(!is_bindable(JobType::Folder));
    }

    #[test]
    fn custom_policy_can_be_used_as_trait_object() {
        struct PipelinesOnly;
        impl JobEligibility for PipelinesOnly {
            fn is_eligible(&self, job: JobType) -> bool {
                job == JobType::Pipeline
            }
        }

        let policies: Vec<Box<dyn JobEligibility>> =
            vec![Box::new(ParameterizedJobs), Box::new(PipelinesOnly)];
        let allowed: Vec<bool> = policies
            .iter()
            .map(|p| p.is_eligible(JobType::Matrix))
            .collect();
        assert_eq!(allowed, vec![true, false]);
    }
}
