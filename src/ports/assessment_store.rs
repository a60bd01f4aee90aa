//! AssessmentStore port - read access to live assessments.
//!
//! Assessments are authored outside this engine. This port is read-only.

use async_trait::async_trait;

use crate::domain::assessment::Assessment;
use crate::domain::foundation::{AssessmentType, CustomerId, DomainError};

/// Read-only access to live assessment data.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Finds the current assessment of the given type for a customer.
    ///
    /// Returns `None` if the customer has no assessment of that type.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` / `ExternalServiceError` if the store is unreachable
    async fn find_by_customer_and_type(
        &self,
        customer_id: &CustomerId,
        assessment_type: AssessmentType,
    ) -> Result<Option<Assessment>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn AssessmentStore) {}
}
