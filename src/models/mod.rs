pub mod case;
pub mod cause;

pub use case::{Case, CaseResult, CaseStatus};
pub use cause::{cause_code, is_establishment, DEFAULT_CAUSE_CODE};
