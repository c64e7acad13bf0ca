pub mod binding;
pub mod eligibility;
pub mod metrics;
pub mod service;
pub mod store;

pub use binding::{BindingError, ResourceBinding};
pub use eligibility::{JobEligibility, ParameterizedJobs, is_bindable};
pub use metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, ResolveOutcome, noop_metrics};
pub use service::BindingService;
pub use store::{BoxError, BuildConfigStore, MemoryStore, StoreError};

pub mod prelude {
    pub use crate::binding::{BindingError, ResourceBinding};
    pub use crate::eligibility::JobEligibility;
    pub use crate::service::BindingService;
    pub use crate::store::{BuildConfigStore, StoreError};
}
